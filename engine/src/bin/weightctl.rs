// weightctl: upload a product file to the engine, show the conversion report
// and save the converted file; or download the empty template.
use clap::{Parser, Subcommand, ValueEnum};
use engine::client::render::render_report;
use engine::client::{convert_offline, save_download, WeightClient};
use engine::config::EngineSettings;
use engine::data::FileKind;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "weightctl", about = "Convert product weights to kilograms")]
struct Cli {
    /// Engine address.
    #[arg(long, default_value = "http://127.0.0.1:50051")]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the empty product template
    Template {
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Directory to save the template in
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Convert the 'weight' column of a CSV or XLSX file
    Convert {
        /// File to upload
        file: PathBuf,

        /// Format of the converted file
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Directory to save the converted file in
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Run the conversion in-process instead of calling the engine
        #[arg(long)]
        offline: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Xlsx,
}

impl From<Format> for FileKind {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => FileKind::Csv,
            Format::Xlsx => FileKind::Xlsx,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    run(Cli::parse()).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Template { format, out_dir } => {
            let mut client = WeightClient::connect(cli.endpoint).await?;
            let template = client.template(format.into()).await?;
            let path = save_download(&out_dir, &template.file_name, &template.content)?;
            println!("Template saved to {}", path.display());
        }
        Commands::Convert { file, format, out_dir, offline } => {
            let response = if offline {
                let settings = EngineSettings::load()?;
                convert_offline(&file, format.into(), settings.preview)?
            } else {
                let mut client = WeightClient::connect(cli.endpoint).await?;
                client.convert_file(&file, format.into()).await?
            };
            print!("{}", render_report(&response));
            let path = save_download(&out_dir, &response.file_name, &response.content)?;
            println!();
            println!("Converted data saved to {}", path.display());
        }
    }
    Ok(())
}
