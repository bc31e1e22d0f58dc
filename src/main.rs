use std::process::ExitCode;

use env_logger::Env;

use tnotify::cli::{self, Opts};

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let opts = match Opts::parse_args(std::env::args_os()) {
        Ok(opts) => opts,
        Err(e) => e.exit(),
    };

    let result = cli::run(&opts);
    if let Err(e) = &result {
        eprintln!("Error: {}", e);
    }

    ExitCode::from(cli::exit_status(&result))
}
