use std::io::{self, BufRead};

use tracing::debug;
use micro_logger::cli::{build_cli, parse_invocation};
use micro_logger::internal::diagnostics::init_diagnostics;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments first
    let matches = build_cli().get_matches();
    let invocation = match parse_invocation(&matches) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_diagnostics(&invocation.settings.diagnostics_level) {
        eprintln!("Failed to initialize diagnostics: {}", e);
        std::process::exit(1);
    }

    if invocation.print_config {
        print!("{}", serde_yaml::to_string(&invocation.settings)?);
        return Ok(());
    }

    // Queued file writes land when the guard drops at the end of main
    let _guard = match micro_logger::configure(
        invocation.settings.destination(),
        invocation.settings.to_options(),
    ) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to configure logger: {}", e);
            std::process::exit(1);
        }
    };

    let logger = micro_logger::global();
    let sender = invocation.sender.as_deref();
    match &invocation.message {
        Some(message) => logger.log(invocation.level, message.as_str(), sender),
        None => {
            debug!(level = %invocation.level, "logging lines from stdin");
            for line in io::stdin().lock().lines() {
                logger.log(invocation.level, line?, sender);
            }
        }
    }

    Ok(())
}
