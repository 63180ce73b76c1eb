mod logging;

use std::io;
use std::process;

use fat12::cli::{self, EXIT_USAGE};
use fat12::config::Config;

fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(EXIT_USAGE);
        }
    };

    if let Err(e) = logging::init(config.log_level) {
        eprintln!("Logger initialization failed: {}", e);
    }

    let code = cli::run(&config, &mut io::stdout().lock());
    process::exit(code);
}
