//! [`SdkLogger`] backed by the `log` facade.

use std::fmt;
use std::panic::Location;

use log::{Level, Metadata, Record};

use super::{Classification, SdkLogger, SDK_TARGET};

/// Writes each line as an INFO `log` record.
///
/// The record's file and line are the `caller` handed to
/// [`log_line`](SdkLogger::log_line), not this adapter's.
#[derive(Debug, Clone, Copy)]
pub struct LogFacadeLogger {
    target: &'static str,
}

impl LogFacadeLogger {
    pub fn new() -> Self {
        Self {
            target: SDK_TARGET,
        }
    }

    /// Same adapter writing under a different `log` target.
    pub fn with_target(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogFacadeLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl SdkLogger for LogFacadeLogger {
    fn log_line(
        &self,
        classification: Classification,
        caller: &'static Location<'static>,
        message: fmt::Arguments<'_>,
    ) {
        if Level::Info > log::max_level() {
            return;
        }
        let metadata = Metadata::builder()
            .level(Level::Info)
            .target(self.target)
            .build();

        let logger = log::logger();
        if !logger.enabled(&metadata) {
            return;
        }
        logger.log(
            &Record::builder()
                .metadata(metadata)
                .args(format_args!("[{classification}] {message}"))
                .file_static(Some(caller.file()))
                .line(Some(caller.line()))
                .build(),
        );
    }
}
