use crate::error::Result;
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self},
    prelude::*,
};

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let level_filter = if quiet {
        LevelFilter::OFF
    } else {
        match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer);

    if let Some(path) = log_file {
        let file = File::create(&path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true);

        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tracing::{info, warn};

    // The global subscriber can only be installed once per process, so the
    // file branch and the filtering are exercised from a single test.
    #[test]
    fn setup_logging_writes_filtered_events_to_the_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kinodata.log");

        setup_logging(0, false, Some(path.clone())).unwrap();
        warn!("reference sheet is larger than the data sheet");
        info!("this is below the configured level");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("reference sheet is larger than the data sheet"));
        assert!(!contents.contains("below the configured level"));
    }

    #[test]
    fn setup_logging_fails_when_log_file_cannot_be_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("kinodata.log");
        assert!(setup_logging(0, false, Some(path)).is_err());
    }
}
