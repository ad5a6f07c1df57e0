// src/logging.rs

use crate::config::Config;
use crate::errors::{ConfabError, ConfabResult};
use crate::models::ApiCallLog;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use log::warn;
use std::fs::OpenOptions;
use std::io::Write;

/// Starts the file logger. The terminal is owned by the UI, so nothing may
/// ever be logged to stdout/stderr while the app runs.
pub fn init(config: &Config) -> ConfabResult<LoggerHandle> {
    let handle = Logger::try_with_str(&config.log_level)
        .map_err(|e| {
            ConfabError::config_error(format!("invalid log level '{}': {}", config.log_level, e))
        })?
        .log_to_file(
            FileSpec::default()
                .directory(config.log_dir.clone())
                .basename("confab")
                .suppress_timestamp(),
        )
        .start()
        .map_err(|e| ConfabError::config_error(format!("failed to start logger: {}", e)))?;

    Ok(handle)
}

/// Logs a backend call to the `api_calls.log` file.
pub fn log_api_call(log: &ApiCallLog) {
    let log_entry = format!(
        "[{}] {} - {} - Status: {} - Time: {}ms\n",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    );

    let mut file = match OpenOptions::new()
        .append(true)
        .create(true)
        .open("api_calls.log")
    {
        Ok(file) => file,
        Err(e) => {
            warn!("failed to open api_calls.log: {}", e);
            return;
        }
    };

    if let Err(e) = file.write_all(log_entry.as_bytes()) {
        warn!("failed to write to api_calls.log: {}", e);
    }
}
