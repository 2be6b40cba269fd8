use std::path::PathBuf;

use anyhow::Context;
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode};

use crate::config;

/// Logging setup, built from the command line and handed to `init_logging`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// flexi_logger spec, e.g. "info" or "debug,regex=warn".
    pub level: String,
    /// When set, logs are also written (and rotated) in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: config::logging::DEFAULT_LEVEL.to_string(),
            log_dir: None,
        }
    }
}

/// Start the logger. Keep the returned handle alive for the whole run; dropping it
/// flushes and stops logging.
pub fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<LoggerHandle> {
    let logger = Logger::try_with_str(&cfg.level)
        .with_context(|| format!("invalid log level spec {:?}", cfg.level))?
        .format(flexi_logger::detailed_format);

    let logger = match &cfg.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).with_context(|| format!("failed creating log dir {}", dir.display()))?;
            // File gets everything at the configured level; stderr mirrors it.
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir)
                        .basename(config::logging::LOG_FILE_NAME),
                )
                .rotate(
                    Criterion::Size(config::logging::LOG_ROTATE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(config::logging::LOG_ROTATE_KEEP_FILES),
                )
                .duplicate_to_stderr(Duplicate::All)
        }
        None => logger.log_to_stderr().write_mode(WriteMode::Direct),
    };

    let handle = logger.start().context("failed to start logger")?;
    log::debug!("glove2w2v {} on {}", config::TOOL_VERSION, std::env::consts::OS);
    Ok(handle)
}
