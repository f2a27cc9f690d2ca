fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/weights.proto");
    std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    tonic_build::configure()
        .build_server(true)
        .build_client(true) // used by weightctl and the integration tests
        .compile(&["proto/weights.proto"], &["proto"])?;
    Ok(())
}
