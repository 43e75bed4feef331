use super::{ApiResponse, operation_client};
use crate::{
    request::{
        Call,
        query::{
            AccountUpdaterQuery, CustomerVaultQuery, GatewayProcessorsQuery, InvoiceQuery,
            ProfileQuery, ReceiptQuery, RecurringPlansQuery, RecurringQuery, TestModeQuery,
            TransactionQuery, TransactionSearch, TransactionsByActionType, TransactionsByCard,
            TransactionsByCondition, TransactionsByDate, TransactionsBySource,
        },
    },
    response::{
        CustomerVaultReport, GatewayProcessorsReport, InvoiceReport, ProfileReport, Receipt,
        RecurringPlansReport, RecurringReport, TestModeReport, TransactionReport,
    },
    transport::Transport,
};

operation_client! {
    /// Reporting queries against the query endpoint.
    Query
}

impl<T: Transport> Query<T> {
    /// One transaction by id.
    pub async fn transaction(&self, call: impl Into<Call<TransactionQuery>>) -> ApiResponse<TransactionReport> {
        self.dispatcher.execute(call.into()).await
    }

    /// Transactions matching any combination of filters.
    pub async fn transactions(
        &self,
        call: impl Into<Call<TransactionSearch>>,
    ) -> ApiResponse<TransactionReport> {
        self.dispatcher.execute(call.into()).await
    }

    /// Transactions in a date window.
    pub async fn transactions_by_date(
        &self,
        call: impl Into<Call<TransactionsByDate>>,
    ) -> ApiResponse<TransactionReport> {
        self.dispatcher.execute(call.into()).await
    }

    /// Transactions in the given conditions.
    pub async fn transactions_by_condition(
        &self,
        call: impl Into<Call<TransactionsByCondition>>,
    ) -> ApiResponse<TransactionReport> {
        self.dispatcher.execute(call.into()).await
    }

    /// Transactions from the given sources.
    pub async fn transactions_by_source(
        &self,
        call: impl Into<Call<TransactionsBySource>>,
    ) -> ApiResponse<TransactionReport> {
        self.dispatcher.execute(call.into()).await
    }

    /// Transactions with the given actions.
    pub async fn transactions_by_action_type(
        &self,
        call: impl Into<Call<TransactionsByActionType>>,
    ) -> ApiResponse<TransactionReport> {
        self.dispatcher.execute(call.into()).await
    }

    /// Transactions on one card.
    pub async fn transactions_by_card(
        &self,
        call: impl Into<Call<TransactionsByCard>>,
    ) -> ApiResponse<TransactionReport> {
        self.dispatcher.execute(call.into()).await
    }

    /// Printable receipt, unparsed.
    pub async fn receipt(&self, call: impl Into<Call<ReceiptQuery>>) -> ApiResponse<Receipt> {
        self.dispatcher.execute(call.into()).await
    }

    /// Merchant profile.
    pub async fn profile(&self, call: impl Into<Call<ProfileQuery>>) -> ApiResponse<ProfileReport> {
        self.dispatcher.execute(call.into()).await
    }

    /// Vault customers.
    pub async fn customer_vault(
        &self,
        call: impl Into<Call<CustomerVaultQuery>>,
    ) -> ApiResponse<CustomerVaultReport> {
        self.dispatcher.execute(call.into()).await
    }

    /// Cards changed by the automatic card updater.
    pub async fn account_updater(&self) -> ApiResponse<CustomerVaultReport> {
        self.dispatcher.execute(Call::new(AccountUpdaterQuery {})).await
    }

    /// Subscriptions.
    pub async fn recurring(&self, call: impl Into<Call<RecurringQuery>>) -> ApiResponse<RecurringReport> {
        self.dispatcher.execute(call.into()).await
    }

    /// Recurring plans.
    pub async fn recurring_plans(
        &self,
        call: impl Into<Call<RecurringPlansQuery>>,
    ) -> ApiResponse<RecurringPlansReport> {
        self.dispatcher.execute(call.into()).await
    }

    /// Invoices.
    pub async fn invoices(&self, call: impl Into<Call<InvoiceQuery>>) -> ApiResponse<InvoiceReport> {
        self.dispatcher.execute(call.into()).await
    }

    /// Processors configured on the account.
    pub async fn gateway_processors(&self) -> ApiResponse<GatewayProcessorsReport> {
        self.dispatcher.execute(Call::new(GatewayProcessorsQuery {})).await
    }

    /// Test mode flag.
    pub async fn test_mode_status(&self) -> ApiResponse<TestModeReport> {
        self.dispatcher.execute(Call::new(TestModeQuery {})).await
    }
}
