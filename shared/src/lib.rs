//! Domain types and the weight normalizer shared by the engine server and
//! the `weightctl` client.

pub mod models;
pub mod normalizer;
pub mod utils;

pub use models::{CellValue, NormalizedWeight, UnitToken};
pub use normalizer::{convert_to_kg, normalize};
