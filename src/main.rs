use std::process::ExitCode;

use push_relay::cli::{
    EXIT_FAILURE, init_logger_from_settings, load_and_merge_config, parse_args, run_command,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(code) => return ExitCode::from(code),
    };

    let settings = match load_and_merge_config(&cli).and_then(|settings| {
        init_logger_from_settings(&settings)?;
        Ok(settings)
    }) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    ExitCode::from(run_command(&cli, settings).await)
}
