use std::fmt;

use tracing::{debug, error, instrument, trace, warn};

use super::ApiResponse;
use crate::{
    config::{Endpoint, GatewayConfig},
    credential::SecurityKey,
    error::{NmiError, Result},
    normalize::{RawResponse, ResponseSchema, normalize},
    request::{Call, Operation},
    security::redacted_pairs,
    transport::{AuthenticatedRequest, Transport},
    wire::OperationRequest,
};

/// Runs one operation end to end: overrides, validation, flattening,
/// credential injection, transport and normalization.
pub(crate) struct Dispatcher<T> {
    transport: T,
    credential: SecurityKey,
    transact_url: String,
    query_url: String,
}

impl<T> fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("credential", &self.credential)
            .field("transact_url", &self.transact_url)
            .field("query_url", &self.query_url)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Dispatcher<T> {
    pub(crate) fn new(credential: SecurityKey, transport: T, config: &GatewayConfig) -> Self {
        Self {
            transport,
            credential,
            transact_url: config.transact_url(),
            query_url: config.query_url(),
        }
    }

    /// Executes `call`, folding every failure into the returned status.
    #[instrument(skip(self, call), fields(operation = O::NAME, endpoint = ?O::ENDPOINT))]
    pub(crate) async fn execute<O: Operation>(&self, call: Call<O>) -> ApiResponse<O::Response> {
        match self.try_execute(call).await {
            Ok(response) => {
                let message = response
                    .gateway_message()
                    .map_or_else(|| format!("{} succeeded", O::NAME), ToOwned::to_owned);
                debug!(status = ApiResponse::<O::Response>::OK, "operation completed");
                ApiResponse::success(response, message)
            }
            Err(e @ NmiError::InvalidInput(_)) => {
                warn!(error = %e, "request rejected before sending");
                ApiResponse::failure(O::NAME, &e)
            }
            Err(e) => {
                error!(error = %e, status = e.status_code(), "operation failed");
                ApiResponse::failure(O::NAME, &e)
            }
        }
    }

    async fn try_execute<O: Operation>(&self, call: Call<O>) -> Result<O::Response> {
        let request = call.resolve()?;
        request.validate()?;

        let body = OperationRequest::from_operation(&request)?.flatten();
        trace!(
            transport = self.transport.protocol_name(),
            fields = ?redacted_pairs(&body),
            "sending request"
        );

        let url = match O::ENDPOINT {
            Endpoint::Transact => &self.transact_url,
            Endpoint::Query => &self.query_url,
        };
        let request = AuthenticatedRequest::new(body, self.credential.clone());
        let response = self.transport.post_form(url, &request).await?;

        let raw = RawResponse {
            status: response.status,
            body: response.body,
            encoding: <O::Response as ResponseSchema>::ENCODING,
        };
        normalize(&raw)
    }
}
