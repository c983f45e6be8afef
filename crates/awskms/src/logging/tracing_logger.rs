//! [`SdkLogger`] backed by `tracing` events.

use std::fmt;
use std::panic::Location;

use super::{Classification, SdkLogger, SDK_TARGET};

/// Emits each line as an INFO `tracing` event on target [`SDK_TARGET`], with the
/// classification and the caller's file/line recorded as fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl SdkLogger for TracingLogger {
    fn log_line(
        &self,
        classification: Classification,
        caller: &'static Location<'static>,
        message: fmt::Arguments<'_>,
    ) {
        tracing::info!(
            target: SDK_TARGET,
            classification = %classification,
            caller.file = caller.file(),
            caller.line = caller.line(),
            "[{classification}] {message}"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn emits_prefixed_line_on_sdk_target() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingLogger::new().logf(
                Classification::Warn,
                format_args!("response status={}", 503),
            );
        });

        let out = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(out.contains("[WARN] response status=503"), "{out}");
        assert!(out.contains(SDK_TARGET), "{out}");
        assert!(out.contains("tracing_logger.rs"), "{out}");
    }
}
