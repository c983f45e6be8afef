//! Pluggable trace lines for SDK requests.
//!
//! An [`SdkLogger`] formats and emits one line. Two implementations exist:
//!
//! - [`TracingLogger`] emits a `tracing` event.
//! - [`LogFacadeLogger`] writes a `log` record and reports its caller's file
//!   and line as the record's location.
//!
//! [`LoggingInterceptor`] is the piece installed into the SDK client; it turns
//! each outgoing request and incoming response into lines for the configured
//! logger, filtered by [`LogMode`].
//!
//! # Invariants
//!
//! - Logging never fails a request.
//! - Bodies are only logged when [`LogMode::body`] is set. Request bodies carry
//!   the base64 plaintext, so leave it off outside of local debugging.

pub mod facade;
pub mod interceptor;
pub mod tracing_logger;

use std::fmt;
use std::panic::Location;

pub use self::facade::LogFacadeLogger;
pub use self::interceptor::LoggingInterceptor;
pub use self::tracing_logger::TracingLogger;

/// Target used for every SDK line, by both adapters.
pub const SDK_TARGET: &str = "awskms::sdk";

/// Severity tag carried by every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Debug,
    Warn,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Classification::Debug => "DEBUG",
            Classification::Warn => "WARN",
        })
    }
}

/// Format and emit one SDK trace line.
///
/// Implementations write `[<classification>] <message>` through whatever
/// logging facility they wrap. They must not panic.
///
/// The origin of a line is passed in as `caller` because `#[track_caller]`
/// does not see through a `dyn SdkLogger` call: the interceptor captures its
/// own location and hands it over.
pub trait SdkLogger: fmt::Debug + Send + Sync {
    fn log_line(
        &self,
        classification: Classification,
        caller: &'static Location<'static>,
        message: fmt::Arguments<'_>,
    );

    /// [`log_line`](Self::log_line) attributed to the calling code.
    ///
    /// Only accurate on a concrete logger type. Through `dyn SdkLogger` the
    /// location is this method's own.
    #[track_caller]
    fn logf(&self, classification: Classification, message: fmt::Arguments<'_>) {
        self.log_line(classification, Location::caller(), message);
    }
}

/// Which parts of an SDK exchange get logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogMode {
    /// One line per outgoing request: method and URI.
    pub request: bool,
    /// One line per response: status.
    pub response: bool,
    /// Append request/response bodies to the lines above.
    pub body: bool,
}

impl LogMode {
    /// Log nothing.
    pub const fn off() -> Self {
        Self {
            request: false,
            response: false,
            body: false,
        }
    }

    /// Request and response lines, without bodies.
    pub const fn requests_and_responses() -> Self {
        Self {
            request: true,
            response: true,
            body: false,
        }
    }

    /// Same mode with bodies included.
    pub const fn with_body(self) -> Self {
        Self { body: true, ..self }
    }
}

impl Default for LogMode {
    fn default() -> Self {
        Self::requests_and_responses()
    }
}
