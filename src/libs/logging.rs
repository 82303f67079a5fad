//! Process-scoped logging: timestamped records on stderr, optionally teed to
//! a per-run log file.

use anyhow::Context;
use std::io::Write;
use std::path::Path;

struct Tee {
    file: std::fs::File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        std::io::stderr().write_all(buf)?;
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stderr().flush()?;
        self.file.flush()
    }
}

/// Initializes the global logger once per process. `--verbose` lowers the
/// threshold to debug, which is where `[Run]`/`[Note]` command traces go.
/// The log file is opened in append mode so re-runs accumulate.
pub fn init_logger(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format_timestamp_secs();

    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("could not open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(Tee { file })));
    }

    builder.try_init()?;

    Ok(())
}
