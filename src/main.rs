use clap::Parser;
use flexi_logger::with_thread;
use log::error;
use sqlcodec::application::{self, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = flexi_logger::Logger::try_with_str(&cli.log_level)?
        .format(with_thread)
        .start()?;
    if let Err(e) = application::run_application(cli) {
        error!("execution error {}", e);
        std::process::exit(1);
    }
    Ok(())
}
