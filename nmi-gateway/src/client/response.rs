use serde::Serialize;

use crate::error::NmiError;

/// Uniform result of every client method.
///
/// `status` is 200 when the gateway returned a well-formed response, even a
/// decline. It is 400 when the request was rejected locally and never sent,
/// and 500 for transport failures, gateway error envelopes and undecodable
/// responses. `data` is set exactly when `status` is 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    /// HTTP-like status.
    pub status: u16,
    /// Typed response on success.
    pub data: Option<T>,
    /// Gateway message or failure diagnostic.
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Status of a well-formed gateway response.
    pub const OK: u16 = 200;

    pub(crate) fn success(data: T, message: String) -> Self {
        Self { status: Self::OK, data: Some(data), message }
    }

    pub(crate) fn failure(operation: &str, error: &NmiError) -> Self {
        Self { status: error.status_code(), data: None, message: format!("{operation} failed: {error}") }
    }

    /// Whether the gateway returned a well-formed response.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status == Self::OK
    }

    /// Converts into a `Result`, yielding the message on failure.
    ///
    /// # Errors
    ///
    /// Returns `(status, message)` when no data is present.
    pub fn into_result(self) -> Result<T, (u16, String)> {
        match self.data {
            Some(data) => Ok(data),
            None => Err((self.status, self.message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_keeps_diagnostic() {
        let response: ApiResponse<()> =
            ApiResponse::failure("capture", &NmiError::InvalidInput("amount is required".into()));
        assert_eq!(response.status, 400);
        assert!(!response.is_success());
        assert_eq!(response.message, "capture failed: Invalid input: amount is required");
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ApiResponse::success(5, "ok".into()).into_result(), Ok(5));
        let failure: ApiResponse<i32> =
            ApiResponse::failure("sale", &NmiError::GatewayError("down".into()));
        assert_eq!(failure.into_result().map_err(|(status, _)| status), Err(500));
    }
}
