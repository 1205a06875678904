use std::io::{stderr, stdin, stdout, BufWriter, Write};
use std::str::FromStr;

use log::{error, LevelFilter};
use simple_logger::SimpleLogger;

use tramfare::Processor;

// Set to `off`, `error`, `warn`, `info`, `debug` or `trace`.
const LOG_LEVEL_VAR: &str = "TRAMFARE_LOG";

fn log_level() -> LevelFilter {
    std::env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|level| LevelFilter::from_str(level.trim()).ok())
        .unwrap_or(LevelFilter::Error)
}

fn main() {
    if let Err(e) = SimpleLogger::new().with_level(log_level()).init() {
        eprintln!("Failed to initialise logging: {e}");
    }

    let mut out = BufWriter::new(stdout().lock());
    let mut err = stderr().lock();
    let result = Processor::new().run(stdin().lock(), &mut out, &mut err).and_then(|_| out.flush());
    if let Err(e) = result {
        error!("Failed to process input: {e}");
        std::process::exit(1);
    }
}
