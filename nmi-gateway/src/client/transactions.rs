use super::{ApiResponse, operation_client};
use crate::{
    request::{
        Call,
        transaction::{
            Authorize, CaptureRequest, CompletePartialPayment, Credit, Offline, RefundRequest, Sale,
            TransactionRequest, UpdateRequest, Validate, VoidRequest,
        },
    },
    response::TransactionResponse,
    transport::Transport,
};

operation_client! {
    /// Transaction operations (`type=...`).
    Transactions
}

impl<T: Transport> Transactions<T> {
    /// Authorizes and captures `amount`.
    pub async fn sale(
        &self,
        call: impl Into<Call<TransactionRequest>>,
    ) -> ApiResponse<TransactionResponse> {
        self.dispatcher.execute(call.into().map(Sale)).await
    }

    /// Authorizes `amount` for later capture.
    pub async fn authorize(
        &self,
        call: impl Into<Call<TransactionRequest>>,
    ) -> ApiResponse<TransactionResponse> {
        self.dispatcher.execute(call.into().map(Authorize)).await
    }

    /// Captures a prior authorization.
    pub async fn capture(&self, call: impl Into<Call<CaptureRequest>>) -> ApiResponse<TransactionResponse> {
        self.dispatcher.execute(call.into()).await
    }

    /// Verifies payment data without charging.
    pub async fn validate(
        &self,
        call: impl Into<Call<TransactionRequest>>,
    ) -> ApiResponse<TransactionResponse> {
        self.dispatcher.execute(call.into().map(Validate)).await
    }

    /// Credits funds without a prior transaction.
    pub async fn credit(
        &self,
        call: impl Into<Call<TransactionRequest>>,
    ) -> ApiResponse<TransactionResponse> {
        self.dispatcher.execute(call.into().map(Credit)).await
    }

    /// Records a voice-authorized sale.
    pub async fn offline(
        &self,
        call: impl Into<Call<TransactionRequest>>,
    ) -> ApiResponse<TransactionResponse> {
        self.dispatcher.execute(call.into().map(Offline)).await
    }

    /// Refunds a settled transaction.
    pub async fn refund(&self, call: impl Into<Call<RefundRequest>>) -> ApiResponse<TransactionResponse> {
        self.dispatcher.execute(call.into()).await
    }

    /// Voids an unsettled transaction.
    pub async fn void(&self, call: impl Into<Call<VoidRequest>>) -> ApiResponse<TransactionResponse> {
        self.dispatcher.execute(call.into()).await
    }

    /// Updates order and shipping details.
    pub async fn update(&self, call: impl Into<Call<UpdateRequest>>) -> ApiResponse<TransactionResponse> {
        self.dispatcher.execute(call.into()).await
    }

    /// Settles an outstanding partial payment.
    pub async fn complete_partial_payment(
        &self,
        call: impl Into<Call<TransactionRequest>>,
    ) -> ApiResponse<TransactionResponse> {
        self.dispatcher.execute(call.into().map(CompletePartialPayment)).await
    }
}
