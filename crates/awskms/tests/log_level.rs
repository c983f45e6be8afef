//! `LogFacadeLogger` against a real `log` logger and the global max level.
//!
//! Lives in its own test binary because it changes `log::max_level()`.

use std::sync::Mutex;

use awskms::{Classification, LogFacadeLogger, SdkLogger};
use log::{LevelFilter, Metadata, Record};

static MESSAGES: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Accepts everything; filtering is left to `log::max_level()`.
struct AcceptAll;

impl log::Log for AcceptAll {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        MESSAGES.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

static LOGGER: AcceptAll = AcceptAll;

#[test]
fn respects_global_max_level() {
    log::set_logger(&LOGGER).unwrap();
    let sdk = LogFacadeLogger::new();

    log::set_max_level(LevelFilter::Warn);
    sdk.logf(Classification::Warn, format_args!("response status=403"));
    assert!(MESSAGES.lock().unwrap().is_empty());

    log::set_max_level(LevelFilter::Info);
    sdk.logf(Classification::Warn, format_args!("response status=403"));
    assert_eq!(
        *MESSAGES.lock().unwrap(),
        vec!["[WARN] response status=403".to_owned()]
    );
}
