use super::{ApiResponse, operation_client};
use crate::{
    request::{
        Call,
        customer_vault::{
            AddBilling, AddCustomer, BillingRecord, CustomerRecord, DeleteBilling, DeleteCustomer,
            UpdateBilling, UpdateCustomer, ValidateCustomer, VaultAuthorize, VaultCredit,
            VaultOffline, VaultSale, VaultTransaction,
        },
    },
    response::CustomerVaultResponse,
    transport::Transport,
};

operation_client! {
    /// Customer vault operations (`customer_vault=...`) and vault-funded transactions.
    CustomerVault
}

impl<T: Transport> CustomerVault<T> {
    /// Stores a new customer.
    pub async fn add_customer(
        &self,
        call: impl Into<Call<CustomerRecord>>,
    ) -> ApiResponse<CustomerVaultResponse> {
        self.dispatcher.execute(call.into().map(AddCustomer)).await
    }

    /// Updates a stored customer.
    pub async fn update_customer(
        &self,
        call: impl Into<Call<CustomerRecord>>,
    ) -> ApiResponse<CustomerVaultResponse> {
        self.dispatcher.execute(call.into().map(UpdateCustomer)).await
    }

    /// Verifies a stored customer's payment data.
    pub async fn validate_customer(
        &self,
        call: impl Into<Call<CustomerRecord>>,
    ) -> ApiResponse<CustomerVaultResponse> {
        self.dispatcher.execute(call.into().map(ValidateCustomer)).await
    }

    /// Deletes a stored customer.
    pub async fn delete_customer(
        &self,
        call: impl Into<Call<DeleteCustomer>>,
    ) -> ApiResponse<CustomerVaultResponse> {
        self.dispatcher.execute(call.into()).await
    }

    /// Adds a billing record.
    pub async fn add_billing(
        &self,
        call: impl Into<Call<BillingRecord>>,
    ) -> ApiResponse<CustomerVaultResponse> {
        self.dispatcher.execute(call.into().map(AddBilling)).await
    }

    /// Updates a billing record.
    pub async fn update_billing(
        &self,
        call: impl Into<Call<BillingRecord>>,
    ) -> ApiResponse<CustomerVaultResponse> {
        self.dispatcher.execute(call.into().map(UpdateBilling)).await
    }

    /// Deletes a billing record.
    pub async fn delete_billing(
        &self,
        call: impl Into<Call<DeleteBilling>>,
    ) -> ApiResponse<CustomerVaultResponse> {
        self.dispatcher.execute(call.into()).await
    }

    /// Sale charged to a stored customer.
    pub async fn sale(&self, call: impl Into<Call<VaultTransaction>>) -> ApiResponse<CustomerVaultResponse> {
        self.dispatcher.execute(call.into().map(VaultSale)).await
    }

    /// Authorization against a stored customer.
    pub async fn authorize(
        &self,
        call: impl Into<Call<VaultTransaction>>,
    ) -> ApiResponse<CustomerVaultResponse> {
        self.dispatcher.execute(call.into().map(VaultAuthorize)).await
    }

    /// Credit to a stored customer.
    pub async fn credit(&self, call: impl Into<Call<VaultTransaction>>) -> ApiResponse<CustomerVaultResponse> {
        self.dispatcher.execute(call.into().map(VaultCredit)).await
    }

    /// Offline sale against a stored customer.
    pub async fn offline(
        &self,
        call: impl Into<Call<VaultTransaction>>,
    ) -> ApiResponse<CustomerVaultResponse> {
        self.dispatcher.execute(call.into().map(VaultOffline)).await
    }
}
