//! Reporting queries, posted to the query endpoint.
//!
//! Multi-valued filters (`condition`, `action_type`, `source`,
//! `invoice_status`) are lists here and comma-joined on the wire; they also
//! read back from that joined form, so `"complete,failed"` is accepted
//! wherever `["complete", "failed"]` is. Paging
//! fields are repeated on each query that supports them; `page_number`
//! needs `result_limit`.

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{DeserializeOwned, IntoDeserializer, value::StrDeserializer},
};

use super::{PaymentKind, gateway_operation, validate, validate::DayBound};
use crate::{
    error::{NmiError, Result},
    response::{
        CustomerVaultReport, GatewayProcessorsReport, InvoiceReport, ProfileReport, Receipt,
        RecurringPlansReport, RecurringReport, TestModeReport, TransactionReport,
    },
    wire::CustomFieldMap,
};

/// Transaction condition filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Authorized, awaiting capture.
    Pending,
    /// Captured, awaiting settlement.
    #[serde(rename = "pendingsettlement")]
    PendingSettlement,
    /// Processing.
    InProgress,
    /// Abandoned.
    Abandoned,
    /// Failed.
    Failed,
    /// Cancelled or voided.
    Canceled,
    /// Settled.
    Complete,
    /// Unknown.
    Unknown,
}

/// Transaction action filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Sale.
    Sale,
    /// Refund.
    Refund,
    /// Credit.
    Credit,
    /// Authorization.
    Auth,
    /// Capture.
    Capture,
    /// Void.
    Void,
    /// Check return.
    Return,
    /// Validate.
    Validate,
}

/// Transaction source filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Direct API.
    Api,
    /// Batch upload.
    BatchUpload,
    /// Mobile.
    Mobile,
    /// QuickClick.
    Quickclick,
    /// QuickBooks.
    Quickbooks,
    /// Recurring billing.
    Recurring,
    /// Card swipe.
    Swipe,
    /// Virtual terminal.
    VirtualTerminal,
    /// Internal.
    Internal,
}

/// Which timestamp a date window applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSearch {
    /// Creation time.
    Created,
    /// Last update time.
    Updated,
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultOrder {
    /// Oldest first.
    Standard,
    /// Newest first.
    Reverse,
}

/// Invoice status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Open.
    Open,
    /// Paid.
    Paid,
    /// Closed.
    Closed,
    /// Past due.
    PastDue,
}

fn check_paging(page_number: Option<u32>, result_limit: Option<u32>) -> Result<()> {
    if page_number.is_some() && result_limit.is_none() {
        return Err(NmiError::InvalidInput("page_number requires result_limit".to_owned()));
    }
    validate::in_range("result_limit", result_limit, 1, u32::MAX)
}

/// Dates are `YYYYMMDD` or `YYYYMMDDhhmmss`; a window may not end before it starts.
fn check_window(start_date: Option<&str>, end_date: Option<&str>) -> Result<()> {
    let start = start_date
        .map(|v| validate::parse_gateway_date("start_date", v, DayBound::Start))
        .transpose()?;
    let end = end_date
        .map(|v| validate::parse_gateway_date("end_date", v, DayBound::End))
        .transpose()?;
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        return Err(NmiError::InvalidInput("end_date is before start_date".to_owned()));
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CommaList<T> {
    Many(Vec<T>),
    Joined(String),
}

fn comma_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match CommaList::<T>::deserialize(deserializer)? {
        CommaList::Many(items) => Ok(items),
        CommaList::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                let part: StrDeserializer<'_, D::Error> = part.into_deserializer();
                T::deserialize(part)
            })
            .collect(),
    }
}

fn non_empty<T>(field: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(NmiError::InvalidInput(format!("{field} requires at least one value")));
    }
    Ok(())
}

/// One transaction by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionQuery {
    /// Transaction id.
    pub transaction_id: String,
}

impl TransactionQuery {
    /// Looks up `transaction_id`.
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self { transaction_id: transaction_id.into() }
    }

    fn check(&self) -> Result<()> {
        validate::required("transaction_id", &self.transaction_id)
    }
}

gateway_operation! {
    impl TransactionQuery => TransactionReport {
        name: "query_transaction",
        endpoint: Query,
        discriminant: [],
        validate: TransactionQuery::check,
    }
}

/// Printable receipt of one transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReceiptQuery {
    /// Transaction id.
    pub transaction_id: String,
}

impl ReceiptQuery {
    /// Receipt for `transaction_id`.
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self { transaction_id: transaction_id.into() }
    }

    fn check(&self) -> Result<()> {
        validate::required("transaction_id", &self.transaction_id)
    }
}

gateway_operation! {
    impl ReceiptQuery => Receipt {
        name: "query_receipt",
        endpoint: Query,
        discriminant: ["report_type" = "receipt"],
        validate: ReceiptQuery::check,
    }
}

/// Merchant profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileQuery {
    /// Include per-processor details.
    pub processor_details: Option<bool>,
}

gateway_operation! {
    impl ProfileQuery => ProfileReport {
        name: "query_profile",
        endpoint: Query,
        discriminant: ["report_type" = "profile"],
        validate: no_rules,
    }
}

/// General transaction search. Every filter is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionSearch {
    /// Transaction id.
    pub transaction_id: Option<String>,
    /// Conditions.
    #[serde(default, deserialize_with = "comma_list")]
    pub condition: Vec<Condition>,
    /// Payment type.
    pub transaction_type: Option<PaymentKind>,
    /// Actions.
    #[serde(default, deserialize_with = "comma_list")]
    pub action_type: Vec<ActionType>,
    /// Sources.
    #[serde(default, deserialize_with = "comma_list")]
    pub source: Vec<Source>,
    /// Subscription id.
    pub subscription_id: Option<String>,
    /// Invoice id.
    pub invoice_id: Option<String>,
    /// Partial payment id.
    pub partial_payment_id: Option<String>,
    /// Order id.
    pub order_id: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Address line 1.
    pub address1: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Two-letter state.
    pub state: Option<String>,
    /// Postal code.
    pub zip: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Fax.
    pub fax: Option<String>,
    /// Order description.
    pub order_description: Option<String>,
    /// Driver's license number.
    pub drivers_license_number: Option<String>,
    /// Driver's license date of birth.
    pub drivers_license_dob: Option<String>,
    /// Driver's license state.
    pub drivers_license_state: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Full card number or last four digits.
    pub cc_number: Option<String>,
    /// Vault customer.
    pub customer_vault_id: Option<String>,
    /// Mobile device license.
    pub mobile_device_license: Option<String>,
    /// Mobile device nickname.
    pub mobile_device_nickname: Option<String>,
    /// Window start.
    pub start_date: Option<String>,
    /// Window end.
    pub end_date: Option<String>,
    /// Timestamp the window applies to.
    pub date_search: Option<DateSearch>,
    /// Zero-based page.
    pub page_number: Option<u32>,
    /// Page size.
    pub result_limit: Option<u32>,
    /// Ordering.
    pub result_order: Option<ResultOrder>,
    /// Merchant-defined field filters, by position.
    #[serde(default)]
    pub custom_fields: CustomFieldMap,
}

impl TransactionSearch {
    fn check(&self) -> Result<()> {
        validate::exact_len("state", self.state.as_deref(), 2)?;
        check_window(self.start_date.as_deref(), self.end_date.as_deref())?;
        check_paging(self.page_number, self.result_limit)
    }
}

gateway_operation! {
    impl TransactionSearch => TransactionReport {
        name: "query_transactions",
        endpoint: Query,
        discriminant: [],
        validate: TransactionSearch::check,
    }
}

/// Transactions in a date window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionsByDate {
    /// Window start.
    pub start_date: String,
    /// Window end.
    pub end_date: Option<String>,
    /// Timestamp the window applies to.
    pub date_search: Option<DateSearch>,
    /// Zero-based page.
    pub page_number: Option<u32>,
    /// Page size.
    pub result_limit: Option<u32>,
    /// Ordering.
    pub result_order: Option<ResultOrder>,
}

impl TransactionsByDate {
    fn check(&self) -> Result<()> {
        validate::required("start_date", &self.start_date)?;
        check_window(Some(&self.start_date), self.end_date.as_deref())?;
        check_paging(self.page_number, self.result_limit)
    }
}

gateway_operation! {
    impl TransactionsByDate => TransactionReport {
        name: "query_transactions_by_date",
        endpoint: Query,
        discriminant: [],
        validate: TransactionsByDate::check,
    }
}

/// Transactions in any of the given conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionsByCondition {
    /// Conditions.
    #[serde(default, deserialize_with = "comma_list")]
    pub condition: Vec<Condition>,
    /// Zero-based page.
    pub page_number: Option<u32>,
    /// Page size.
    pub result_limit: Option<u32>,
    /// Ordering.
    pub result_order: Option<ResultOrder>,
}

impl TransactionsByCondition {
    fn check(&self) -> Result<()> {
        non_empty("condition", &self.condition)?;
        check_paging(self.page_number, self.result_limit)
    }
}

gateway_operation! {
    impl TransactionsByCondition => TransactionReport {
        name: "query_transactions_by_condition",
        endpoint: Query,
        discriminant: [],
        validate: TransactionsByCondition::check,
    }
}

/// Transactions from any of the given sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionsBySource {
    /// Sources.
    #[serde(default, deserialize_with = "comma_list")]
    pub source: Vec<Source>,
    /// Zero-based page.
    pub page_number: Option<u32>,
    /// Page size.
    pub result_limit: Option<u32>,
    /// Ordering.
    pub result_order: Option<ResultOrder>,
}

impl TransactionsBySource {
    fn check(&self) -> Result<()> {
        non_empty("source", &self.source)?;
        check_paging(self.page_number, self.result_limit)
    }
}

gateway_operation! {
    impl TransactionsBySource => TransactionReport {
        name: "query_transactions_by_source",
        endpoint: Query,
        discriminant: [],
        validate: TransactionsBySource::check,
    }
}

/// Transactions with any of the given actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionsByActionType {
    /// Actions.
    #[serde(default, deserialize_with = "comma_list")]
    pub action_type: Vec<ActionType>,
    /// Zero-based page.
    pub page_number: Option<u32>,
    /// Page size.
    pub result_limit: Option<u32>,
    /// Ordering.
    pub result_order: Option<ResultOrder>,
}

impl TransactionsByActionType {
    fn check(&self) -> Result<()> {
        non_empty("action_type", &self.action_type)?;
        check_paging(self.page_number, self.result_limit)
    }
}

gateway_operation! {
    impl TransactionsByActionType => TransactionReport {
        name: "query_transactions_by_action_type",
        endpoint: Query,
        discriminant: [],
        validate: TransactionsByActionType::check,
    }
}

/// Transactions on one card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionsByCard {
    /// Full card number or last four digits.
    pub cc_number: String,
    /// Zero-based page.
    pub page_number: Option<u32>,
    /// Page size.
    pub result_limit: Option<u32>,
    /// Ordering.
    pub result_order: Option<ResultOrder>,
}

impl TransactionsByCard {
    fn check(&self) -> Result<()> {
        validate::required("cc_number", &self.cc_number)?;
        check_paging(self.page_number, self.result_limit)
    }
}

gateway_operation! {
    impl TransactionsByCard => TransactionReport {
        name: "query_transactions_by_card",
        endpoint: Query,
        discriminant: [],
        validate: TransactionsByCard::check,
    }
}

/// Vault customers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerVaultQuery {
    /// One customer.
    pub customer_vault_id: Option<String>,
    /// Window start.
    pub start_date: Option<String>,
    /// Window end.
    pub end_date: Option<String>,
    /// Timestamp the window applies to.
    pub date_search: Option<DateSearch>,
    /// Zero-based page.
    pub page_number: Option<u32>,
    /// Page size.
    pub result_limit: Option<u32>,
    /// Ordering.
    pub result_order: Option<ResultOrder>,
}

impl CustomerVaultQuery {
    fn check(&self) -> Result<()> {
        check_window(self.start_date.as_deref(), self.end_date.as_deref())?;
        check_paging(self.page_number, self.result_limit)
    }
}

gateway_operation! {
    impl CustomerVaultQuery => CustomerVaultReport {
        name: "query_customer_vault",
        endpoint: Query,
        discriminant: ["report_type" = "customer_vault"],
        validate: CustomerVaultQuery::check,
    }
}

/// Cards changed by the automatic card updater.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountUpdaterQuery {}

gateway_operation! {
    impl AccountUpdaterQuery => CustomerVaultReport {
        name: "query_account_updater",
        endpoint: Query,
        discriminant: ["report_type" = "account_updater"],
        validate: no_rules,
    }
}

/// Subscriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecurringQuery {
    /// One subscription.
    pub subscription_id: Option<String>,
    /// Window start.
    pub start_date: Option<String>,
    /// Window end.
    pub end_date: Option<String>,
    /// Timestamp the window applies to.
    pub date_search: Option<DateSearch>,
    /// Zero-based page.
    pub page_number: Option<u32>,
    /// Page size.
    pub result_limit: Option<u32>,
    /// Ordering.
    pub result_order: Option<ResultOrder>,
}

impl RecurringQuery {
    fn check(&self) -> Result<()> {
        check_window(self.start_date.as_deref(), self.end_date.as_deref())?;
        check_paging(self.page_number, self.result_limit)
    }
}

gateway_operation! {
    impl RecurringQuery => RecurringReport {
        name: "query_recurring",
        endpoint: Query,
        discriminant: ["report_type" = "recurring"],
        validate: RecurringQuery::check,
    }
}

/// Recurring plans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecurringPlansQuery {
    /// Zero-based page.
    pub page_number: Option<u32>,
    /// Page size.
    pub result_limit: Option<u32>,
    /// Ordering.
    pub result_order: Option<ResultOrder>,
}

impl RecurringPlansQuery {
    fn check(&self) -> Result<()> {
        check_paging(self.page_number, self.result_limit)
    }
}

gateway_operation! {
    impl RecurringPlansQuery => RecurringPlansReport {
        name: "query_recurring_plans",
        endpoint: Query,
        discriminant: ["report_type" = "recurring_plans"],
        validate: RecurringPlansQuery::check,
    }
}

/// Invoices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvoiceQuery {
    /// One invoice.
    pub invoice_id: Option<String>,
    /// Statuses.
    #[serde(default, deserialize_with = "comma_list")]
    pub invoice_status: Vec<InvoiceStatus>,
    /// Zero-based page.
    pub page_number: Option<u32>,
    /// Page size.
    pub result_limit: Option<u32>,
    /// Ordering.
    pub result_order: Option<ResultOrder>,
}

impl InvoiceQuery {
    fn check(&self) -> Result<()> {
        check_paging(self.page_number, self.result_limit)
    }
}

gateway_operation! {
    impl InvoiceQuery => InvoiceReport {
        name: "query_invoices",
        endpoint: Query,
        discriminant: ["report_type" = "invoicing"],
        validate: InvoiceQuery::check,
    }
}

/// Processors configured on the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayProcessorsQuery {}

gateway_operation! {
    impl GatewayProcessorsQuery => GatewayProcessorsReport {
        name: "query_gateway_processors",
        endpoint: Query,
        discriminant: ["report_type" = "gateway_processors"],
        validate: no_rules,
    }
}

/// Whether the account is in test mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestModeQuery {}

gateway_operation! {
    impl TestModeQuery => TestModeReport {
        name: "query_test_mode_status",
        endpoint: Query,
        discriminant: ["report_type" = "test_mode_status"],
        validate: no_rules,
    }
}

fn no_rules<T>(_: &T) -> Result<()> {
    Ok(())
}
