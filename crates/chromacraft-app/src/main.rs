//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    env_logger::init();
    let cli = chromacraft_app::Cli::parse();
    log::debug!("Starting ChromaCraft: {:?}", cli.command);

    match chromacraft_app::run(cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
