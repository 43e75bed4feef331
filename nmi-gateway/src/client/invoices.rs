use super::{ApiResponse, operation_client};
use crate::{
    request::{
        Call,
        invoice::{CloseInvoice, CreateInvoice, InvoiceRef, InvoiceRequest, SendInvoice, UpdateInvoice},
    },
    response::InvoiceResponse,
    transport::Transport,
};

operation_client! {
    /// Invoicing operations (`invoicing=...`).
    Invoices
}

impl<T: Transport> Invoices<T> {
    /// Creates an invoice.
    pub async fn create(&self, call: impl Into<Call<InvoiceRequest>>) -> ApiResponse<InvoiceResponse> {
        self.dispatcher.execute(call.into().map(CreateInvoice)).await
    }

    /// Updates an invoice.
    pub async fn update(&self, call: impl Into<Call<InvoiceRequest>>) -> ApiResponse<InvoiceResponse> {
        self.dispatcher.execute(call.into().map(UpdateInvoice)).await
    }

    /// Emails an invoice.
    pub async fn send(&self, call: impl Into<Call<InvoiceRef>>) -> ApiResponse<InvoiceResponse> {
        self.dispatcher.execute(call.into().map(SendInvoice)).await
    }

    /// Closes an invoice.
    pub async fn close(&self, call: impl Into<Call<InvoiceRef>>) -> ApiResponse<InvoiceResponse> {
        self.dispatcher.execute(call.into().map(CloseInvoice)).await
    }
}
