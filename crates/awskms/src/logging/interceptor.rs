//! SDK interceptor that feeds request/response lines to an [`SdkLogger`].

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use aws_smithy_runtime_api::box_error::BoxError;
use aws_smithy_runtime_api::client::interceptors::context::{
    AfterDeserializationInterceptorContextRef, BeforeTransmitInterceptorContextRef,
};
use aws_smithy_runtime_api::client::interceptors::Intercept;
use aws_smithy_runtime_api::client::runtime_components::RuntimeComponents;
use aws_smithy_types::config_bag::ConfigBag;

use super::{Classification, LogMode, SdkLogger};

/// Installed on the KMS client by [`crate::bootstrap`] when a logger is set.
#[derive(Debug, Clone)]
pub struct LoggingInterceptor {
    logger: Arc<dyn SdkLogger>,
    mode: LogMode,
}

impl LoggingInterceptor {
    pub fn new(logger: Arc<dyn SdkLogger>, mode: LogMode) -> Self {
        Self { logger, mode }
    }

    /// Hand a line to the logger, attributed to the line that called this.
    #[track_caller]
    fn emit(&self, classification: Classification, message: fmt::Arguments<'_>) {
        self.logger
            .log_line(classification, Location::caller(), message);
    }

    fn log_request(&self, method: &str, uri: &str, body: Option<&[u8]>) {
        if !self.mode.request {
            return;
        }
        if self.mode.body {
            self.emit(
                Classification::Debug,
                format_args!("request {method} {uri} body={}", render_body(body)),
            );
        } else {
            self.emit(Classification::Debug, format_args!("request {method} {uri}"));
        }
    }

    fn log_response(&self, status: u16, body: Option<&[u8]>) {
        // Error statuses are reported even when response lines are off.
        let failed = !(200..300).contains(&status);
        if !self.mode.response && !failed {
            return;
        }
        let classification = if failed {
            Classification::Warn
        } else {
            Classification::Debug
        };
        if self.mode.body {
            self.emit(
                classification,
                format_args!("response status={status} body={}", render_body(body)),
            );
        } else {
            self.emit(classification, format_args!("response status={status}"));
        }
    }
}

fn render_body(body: Option<&[u8]>) -> String {
    match body {
        Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        None => "<streaming>".into(),
    }
}

impl Intercept for LoggingInterceptor {
    fn name(&self) -> &'static str {
        "AwsKmsLoggingInterceptor"
    }

    fn read_before_transmit(
        &self,
        context: &BeforeTransmitInterceptorContextRef<'_>,
        _runtime_components: &RuntimeComponents,
        _cfg: &mut ConfigBag,
    ) -> Result<(), BoxError> {
        let request = context.request();
        self.log_request(request.method(), request.uri(), request.body().bytes());
        Ok(())
    }

    // The response body is only buffered once deserialization has read it.
    fn read_after_deserialization(
        &self,
        context: &AfterDeserializationInterceptorContextRef<'_>,
        _runtime_components: &RuntimeComponents,
        _cfg: &mut ConfigBag,
    ) -> Result<(), BoxError> {
        let response = context.response();
        self.log_response(response.status().as_u16(), response.body().bytes());
        Ok(())
    }
}
