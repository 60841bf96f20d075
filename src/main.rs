use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use territory::cli::Cli;
use territory::error::EngineError;

fn main() -> std::process::ExitCode {
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io) if io.kind() == std::io::ErrorKind::NotFound) {
            eprintln!("warning: failed to load .env: {e}");
        }
    }

    let cli = Cli::parse();
    let logger = Logger::try_with_env_or_str(cli.log_level.clone().unwrap_or("info".into()).as_str())
        .and_then(|builder| {
            builder
                .write_mode(WriteMode::BufferAndFlush)
                .log_to_stderr()
                .adaptive_format_for_stderr(match cfg!(debug_assertions) {
                    true => AdaptiveFormat::WithThread,
                    _ => AdaptiveFormat::Default,
                })
                .set_palette("b196;208;195;111;67".to_owned())
                .start()
        });
    let _logger = match logger {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("warning: failed to start logger: {e}");
            None
        }
    };

    match territory::cli::run(cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            log::error!("fatal error: {err}");
            let code = err.downcast_ref::<EngineError>().map(EngineError::exit_code).unwrap_or(1);
            std::process::ExitCode::from(code as u8)
        }
    }
}
