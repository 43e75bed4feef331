//! Transaction requests (`type=...`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    AccountHolderType, AccountType, Currency, InitiatedBy, LineItem, PaymentMethod, SecCode,
    StoredCredentialIndicator, gateway_operation,
    validate::{self, Schedule},
};
use crate::{error::Result, response::TransactionResponse, wire::CustomFieldMap};

/// Longest duplicate-detection window the gateway accepts, in seconds.
pub const MAX_DUP_SECONDS: u32 = 7_862_400;

/// Length of a Kount transaction session id.
pub const TRANSACTION_SESSION_ID_LEN: usize = 32;

/// Billing method for recurring or installment charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingMethod {
    /// Recurring billing.
    Recurring,
    /// Installment billing.
    Installment,
}

/// 3-D Secure authentication result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardholderAuth {
    /// Fully authenticated.
    Verified,
    /// Authentication attempted.
    Attempted,
}

/// Vault action performed alongside a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaultDirective {
    /// Store the payment data as a new vault customer.
    AddCustomer,
    /// Update the referenced vault customer.
    UpdateCustomer,
}

/// Recurring action performed alongside a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringDirective {
    /// Start a subscription after the charge.
    AddSubscription,
}

/// Partial payment handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialPayments {
    /// Approve the partial amount.
    SettlePartial,
    /// Decline unless the full amount is approved.
    PaymentInFull,
}

/// Sale, authorization, credit, validate, offline and partial-payment completion.
///
/// The operation itself (`type`) is chosen by the client method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionRequest {
    /// Payment instrument.
    pub payment: Option<PaymentMethod>,
    /// Card number.
    pub ccnumber: Option<String>,
    /// Card expiry, `MMYY`.
    pub ccexp: Option<String>,
    /// Card security code.
    pub cvv: Option<String>,
    /// Name on the checking account.
    pub checkname: Option<String>,
    /// Routing number.
    pub checkaba: Option<String>,
    /// Account number.
    pub checkaccount: Option<String>,
    /// ACH account holder type.
    pub account_holder_type: Option<AccountHolderType>,
    /// ACH account type.
    pub account_type: Option<AccountType>,
    /// ACH entry class.
    pub sec_code: Option<SecCode>,
    /// Collect.js or tokenization payment token.
    pub payment_token: Option<String>,

    /// Total amount.
    pub amount: Option<Decimal>,
    /// Surcharge included in `amount`.
    pub surcharge: Option<Decimal>,
    /// Tip included in `amount`.
    pub tip: Option<Decimal>,
    /// Currency.
    pub currency: Currency,
    /// Processor to route to.
    pub processor_id: Option<String>,
    /// Authorization code, required for `offline`.
    pub authorization_code: Option<String>,

    /// Soft descriptor.
    pub descriptor: Option<String>,
    /// Descriptor phone.
    pub descriptor_phone: Option<String>,
    /// Descriptor address.
    pub descriptor_address: Option<String>,
    /// Descriptor city.
    pub descriptor_city: Option<String>,
    /// Descriptor state.
    pub descriptor_state: Option<String>,
    /// Descriptor postal code.
    pub descriptor_postal: Option<String>,
    /// Descriptor country.
    pub descriptor_country: Option<String>,
    /// Descriptor MCC.
    pub descriptor_mcc: Option<String>,
    /// Descriptor merchant id.
    pub descriptor_merchant_id: Option<String>,
    /// Descriptor URL.
    pub descriptor_url: Option<String>,

    /// Recurring or installment billing.
    pub billing_method: Option<BillingMethod>,
    /// Installment number, 0-99.
    pub billing_number: Option<u32>,
    /// Installment total.
    pub billing_total: Option<Decimal>,

    /// Order template id.
    pub order_template: Option<String>,
    /// Order id.
    pub orderid: Option<String>,
    /// Order description.
    pub order_description: Option<String>,
    /// Cardholder IP address.
    pub ipaddress: Option<String>,
    /// Sales tax.
    pub tax: Option<Decimal>,
    /// Shipping amount.
    pub shipping: Option<Decimal>,
    /// Purchase order number.
    pub ponumber: Option<String>,

    /// Billing first name.
    pub first_name: Option<String>,
    /// Billing last name.
    pub last_name: Option<String>,
    /// Billing company.
    pub company: Option<String>,
    /// Billing address line 1.
    pub address1: Option<String>,
    /// Billing address line 2.
    pub address2: Option<String>,
    /// Billing city.
    pub city: Option<String>,
    /// Billing state.
    pub state: Option<String>,
    /// Billing postal code.
    pub zip: Option<String>,
    /// Billing country.
    pub country: Option<String>,
    /// Billing phone.
    pub phone: Option<String>,
    /// Billing fax.
    pub fax: Option<String>,
    /// Billing email.
    pub email: Option<String>,

    /// Shipping first name.
    pub shipping_firstname: Option<String>,
    /// Shipping last name.
    pub shipping_lastname: Option<String>,
    /// Shipping company.
    pub shipping_company: Option<String>,
    /// Shipping address line 1.
    pub shipping_address1: Option<String>,
    /// Shipping address line 2.
    pub shipping_address2: Option<String>,
    /// Shipping city.
    pub shipping_city: Option<String>,
    /// Shipping state.
    pub shipping_state: Option<String>,
    /// Shipping postal code.
    pub shipping_zip: Option<String>,
    /// Shipping country.
    pub shipping_country: Option<String>,
    /// Shipping email.
    pub shipping_email: Option<String>,

    /// Email a receipt to the customer.
    pub customer_receipt: Option<bool>,

    /// 3-D Secure result.
    pub cardholder_auth: Option<CardholderAuth>,
    /// 3-D Secure CAVV.
    pub cavv: Option<String>,
    /// 3-D Secure XID.
    pub xid: Option<String>,
    /// 3-D Secure version.
    pub three_ds_version: Option<String>,
    /// 3-D Secure directory server transaction id.
    pub directory_server_id: Option<String>,

    /// Start a subscription with this charge.
    pub recurring: Option<RecurringDirective>,
    /// Existing plan to subscribe to.
    pub plan_id: Option<String>,
    /// Custom plan: number of payments, 0 = until cancelled.
    pub plan_payments: Option<u32>,
    /// Custom plan: amount per payment.
    pub plan_amount: Option<Decimal>,
    /// Custom plan: bill every N days.
    pub day_frequency: Option<u32>,
    /// Custom plan: bill every N months (1-24).
    pub month_frequency: Option<u32>,
    /// Custom plan: day of month to bill (1-31).
    pub day_of_month: Option<u32>,
    /// Subscription start date, `YYYYMMDD`.
    pub start_date: Option<String>,

    /// Store or update the payment data in the vault.
    pub customer_vault: Option<VaultDirective>,
    /// Vault customer to charge or update.
    pub customer_vault_id: Option<String>,
    /// Billing record of the vault customer.
    pub billing_id: Option<String>,

    /// Stored credential: who initiated the transaction.
    pub initiated_by: Option<InitiatedBy>,
    /// Stored credential: original transaction id.
    pub initial_transaction_id: Option<String>,
    /// Stored credential: stored or used.
    pub stored_credential_indicator: Option<StoredCredentialIndicator>,

    /// Level 3: shipping postal code.
    pub shipping_postal: Option<String>,
    /// Level 3: ship-from postal code.
    pub ship_from_postal: Option<String>,
    /// Level 3: summary commodity code.
    pub summary_commodity_code: Option<String>,
    /// Level 3: duty.
    pub duty_amount: Option<Decimal>,
    /// Level 3: discount.
    pub discount_amount: Option<Decimal>,
    /// Level 3: national tax.
    pub national_tax_amount: Option<Decimal>,
    /// Level 3: alternate tax.
    pub alternate_tax_amount: Option<Decimal>,
    /// Level 3: alternate tax id.
    pub alternate_tax_id: Option<String>,
    /// Level 3: VAT amount.
    pub vat_tax_amount: Option<Decimal>,
    /// Level 3: VAT rate.
    pub vat_tax_rate: Option<Decimal>,
    /// Level 3: VAT invoice reference.
    pub vat_invoice_reference_number: Option<String>,
    /// Level 3: customer VAT registration.
    pub customer_vat_registration: Option<String>,
    /// Level 3: merchant VAT registration.
    pub merchant_vat_registration: Option<String>,
    /// Level 3: order date, `YYMMDD`.
    pub order_date: Option<String>,

    /// Partial payment being completed.
    pub partial_payment_id: Option<String>,
    /// Partial payment handling.
    pub partial_payments: Option<PartialPayments>,

    /// Duplicate-detection window in seconds, at most [`MAX_DUP_SECONDS`].
    pub dup_seconds: Option<u32>,
    /// Kount session id, exactly 32 characters.
    pub transaction_session_id: Option<String>,

    /// Level-3 line items.
    #[serde(default)]
    pub products: Vec<LineItem>,
    /// Merchant-defined fields.
    #[serde(default)]
    pub custom_fields: CustomFieldMap,
}

impl TransactionRequest {
    fn validate_common(&self) -> Result<()> {
        validate::in_range("billing_number", self.billing_number, 0, 99)?;
        validate::in_range("dup_seconds", self.dup_seconds, 0, MAX_DUP_SECONDS)?;
        validate::exact_len(
            "transaction_session_id",
            self.transaction_session_id.as_deref(),
            TRANSACTION_SESSION_ID_LEN,
        )?;
        validate::email("email", self.email.as_deref())?;
        validate::email("shipping_email", self.shipping_email.as_deref())?;
        validate::gateway_date("start_date", self.start_date.as_deref())?;
        for (field, value) in [
            ("amount", self.amount),
            ("surcharge", self.surcharge),
            ("tip", self.tip),
            ("tax", self.tax),
            ("shipping", self.shipping),
        ] {
            validate::non_negative(field, value)?;
        }
        if self.payment == Some(PaymentMethod::Check) {
            validate::required_opt("checkname", self.checkname.as_deref())?;
            validate::required_opt("checkaba", self.checkaba.as_deref())?;
            validate::required_opt("checkaccount", self.checkaccount.as_deref())?;
        }

        let schedule = Schedule {
            day_frequency: self.day_frequency,
            month_frequency: self.month_frequency,
            day_of_month: self.day_of_month,
        };
        if self.recurring.is_some() && self.plan_id.is_none() {
            validate::present("plan_payments", self.plan_payments.as_ref())?;
            validate::positive_amount("plan_amount", self.plan_amount)?;
            schedule.require_complete()
        } else {
            schedule.require_complete_if_any()
        }
    }

    fn validate_charge(&self) -> Result<()> {
        validate::present("amount", self.amount.as_ref())?;
        self.validate_common()
    }

    fn validate_offline(&self) -> Result<()> {
        validate::required_opt("authorization_code", self.authorization_code.as_deref())?;
        self.validate_charge()
    }

    fn validate_partial_completion(&self) -> Result<()> {
        validate::required_opt("partial_payment_id", self.partial_payment_id.as_deref())?;
        self.validate_common()
    }
}

gateway_operation! {
    /// Authorize and capture in one step.
    Sale(TransactionRequest) -> TransactionResponse {
        name: "sale",
        endpoint: Transact,
        discriminant: "type" = "sale",
        validate: TransactionRequest::validate_charge,
    }
}

gateway_operation! {
    /// Authorize only; settle later with [`CaptureRequest`].
    Authorize(TransactionRequest) -> TransactionResponse {
        name: "authorize",
        endpoint: Transact,
        discriminant: "type" = "auth",
        validate: TransactionRequest::validate_charge,
    }
}

gateway_operation! {
    /// Verify the payment data without moving funds.
    Validate(TransactionRequest) -> TransactionResponse {
        name: "validate",
        endpoint: Transact,
        discriminant: "type" = "validate",
        validate: TransactionRequest::validate_common,
    }
}

gateway_operation! {
    /// Credit funds without referencing a prior transaction.
    Credit(TransactionRequest) -> TransactionResponse {
        name: "credit",
        endpoint: Transact,
        discriminant: "type" = "credit",
        validate: TransactionRequest::validate_charge,
    }
}

gateway_operation! {
    /// Record a voice-authorized sale.
    Offline(TransactionRequest) -> TransactionResponse {
        name: "offline",
        endpoint: Transact,
        discriminant: "type" = "offline",
        validate: TransactionRequest::validate_offline,
    }
}

gateway_operation! {
    /// Settle an outstanding partial payment.
    CompletePartialPayment(TransactionRequest) -> TransactionResponse {
        name: "complete_partial_payment",
        endpoint: Transact,
        discriminant: "type" = "complete_partial_payment",
        validate: TransactionRequest::validate_partial_completion,
    }
}

/// Carrier for shipment tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingCarrier {
    /// UPS.
    Ups,
    /// FedEx.
    Fedex,
    /// DHL.
    Dhl,
    /// USPS.
    Usps,
}

/// Capture a prior authorization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptureRequest {
    /// Authorization to capture.
    pub transactionid: String,
    /// Amount to capture.
    pub amount: Option<Decimal>,
    /// Shipment tracking number.
    pub tracking_number: Option<String>,
    /// Shipment carrier.
    pub shipping_carrier: Option<ShippingCarrier>,
    /// Order id.
    pub orderid: Option<String>,
    /// Signature capture image, base64.
    pub signature_image: Option<String>,
}

impl CaptureRequest {
    fn check(&self) -> Result<()> {
        validate::required("transactionid", &self.transactionid)?;
        validate::positive_amount("amount", self.amount)
    }
}

/// Reason code for a void.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoidReason {
    /// Suspected fraud.
    Fraud,
    /// Cancelled by the user.
    UserCancel,
    /// Card rejected by the chip.
    IccRejected,
    /// Card removed before completion.
    IccCardRemoved,
    /// Chip did not confirm.
    IccNoConfirmation,
    /// Terminal timeout.
    PosTimeout,
}

/// Void an unsettled transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoidRequest {
    /// Transaction to void.
    pub transactionid: String,
    /// Reason code.
    pub void_reason: Option<VoidReason>,
    /// Payment instrument of the original transaction.
    pub payment: Option<PaymentMethod>,
}

impl VoidRequest {
    fn check(&self) -> Result<()> {
        validate::required("transactionid", &self.transactionid)
    }
}

/// Refund a settled transaction, fully or partially.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefundRequest {
    /// Transaction to refund.
    pub transactionid: String,
    /// Amount; omit to refund in full.
    pub amount: Option<Decimal>,
    /// Payment instrument of the original transaction.
    pub payment: Option<PaymentMethod>,
}

impl RefundRequest {
    fn check(&self) -> Result<()> {
        validate::required("transactionid", &self.transactionid)?;
        if self.amount.is_some() {
            validate::positive_amount("amount", self.amount)?;
        }
        Ok(())
    }
}

/// Update order and shipping details of an existing transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateRequest {
    /// Transaction to update.
    pub transactionid: String,
    /// Payment instrument of the original transaction.
    pub payment: Option<PaymentMethod>,
    /// Shipment tracking number.
    pub tracking_number: Option<String>,
    /// Shipping amount.
    pub shipping: Option<Decimal>,
    /// Shipping postal code.
    pub shipping_postal: Option<String>,
    /// Ship-from postal code.
    pub ship_from_postal: Option<String>,
    /// Shipping country.
    pub shipping_country: Option<String>,
    /// Shipment carrier.
    pub shipping_carrier: Option<ShippingCarrier>,
    /// Shipment date, `YYYYMMDD`.
    pub shipping_date: Option<String>,
    /// Order description.
    pub order_description: Option<String>,
    /// Order date, `YYMMDD`.
    pub order_date: Option<String>,
    /// Email a receipt to the customer.
    pub customer_receipt: Option<bool>,
    /// Purchase order number.
    pub ponumber: Option<String>,
    /// Summary commodity code.
    pub summary_commodity_code: Option<String>,
    /// Duty.
    pub duty_amount: Option<Decimal>,
    /// Discount.
    pub discount_amount: Option<Decimal>,
    /// Sales tax.
    pub tax: Option<Decimal>,
    /// National tax.
    pub national_tax_amount: Option<Decimal>,
    /// Alternate tax.
    pub alternate_tax_amount: Option<Decimal>,
    /// Alternate tax id.
    pub alternate_tax_id: Option<String>,
    /// VAT amount.
    pub vat_tax_amount: Option<Decimal>,
    /// VAT rate.
    pub vat_tax_rate: Option<Decimal>,
    /// VAT invoice reference.
    pub vat_invoice_reference_number: Option<String>,
    /// Customer VAT registration.
    pub customer_vat_registration: Option<String>,
    /// Merchant VAT registration.
    pub merchant_vat_registration: Option<String>,
    /// Merchant-defined fields.
    #[serde(default)]
    pub custom_fields: CustomFieldMap,
}

impl UpdateRequest {
    fn check(&self) -> Result<()> {
        validate::required("transactionid", &self.transactionid)?;
        validate::gateway_date("shipping_date", self.shipping_date.as_deref())
    }
}

gateway_operation! {
    impl CaptureRequest => TransactionResponse {
        name: "capture",
        endpoint: Transact,
        discriminant: ["type" = "capture"],
        validate: CaptureRequest::check,
    }
}

gateway_operation! {
    impl VoidRequest => TransactionResponse {
        name: "void",
        endpoint: Transact,
        discriminant: ["type" = "void"],
        validate: VoidRequest::check,
    }
}

gateway_operation! {
    impl RefundRequest => TransactionResponse {
        name: "refund",
        endpoint: Transact,
        discriminant: ["type" = "refund"],
        validate: RefundRequest::check,
    }
}

gateway_operation! {
    impl UpdateRequest => TransactionResponse {
        name: "update",
        endpoint: Transact,
        discriminant: ["type" = "update"],
        validate: UpdateRequest::check,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::NmiError, request::Operation};

    fn card_sale() -> TransactionRequest {
        TransactionRequest {
            ccnumber: Some("4111111111111111".into()),
            ccexp: Some("1025".into()),
            amount: Some(Decimal::new(1000, 2)),
            ..TransactionRequest::default()
        }
    }

    #[test]
    fn test_currency_defaults_to_usd() {
        assert_eq!(TransactionRequest::default().currency.0, "USD");
    }

    #[test]
    fn test_sale_requires_amount() {
        let request = Sale(TransactionRequest { amount: None, ..card_sale() });
        assert!(matches!(request.validate(), Err(NmiError::InvalidInput(m)) if m.contains("amount")));
        assert!(Sale(card_sale()).validate().is_ok());
    }

    #[test]
    fn test_validate_does_not_require_amount() {
        assert!(Validate(TransactionRequest { amount: None, ..card_sale() }).validate().is_ok());
    }

    #[test]
    fn test_field_ranges() {
        let billing = Sale(TransactionRequest { billing_number: Some(100), ..card_sale() });
        assert!(billing.validate().is_err());

        let dup = Sale(TransactionRequest { dup_seconds: Some(MAX_DUP_SECONDS + 1), ..card_sale() });
        assert!(dup.validate().is_err());

        let session = Sale(TransactionRequest {
            transaction_session_id: Some("short".into()),
            ..card_sale()
        });
        assert!(session.validate().is_err());
    }

    #[test]
    fn test_inline_subscription_schedule() {
        let both = Sale(TransactionRequest {
            recurring: Some(RecurringDirective::AddSubscription),
            plan_payments: Some(12),
            plan_amount: Some(Decimal::new(999, 2)),
            day_frequency: Some(30),
            month_frequency: Some(1),
            day_of_month: Some(1),
            ..card_sale()
        });
        assert!(both.validate().is_err());

        let existing_plan = Sale(TransactionRequest {
            recurring: Some(RecurringDirective::AddSubscription),
            plan_id: Some("gold".into()),
            ..card_sale()
        });
        assert!(existing_plan.validate().is_ok());
    }

    #[test]
    fn test_offline_requires_authorization_code() {
        assert!(Offline(card_sale()).validate().is_err());
        let with_code =
            Offline(TransactionRequest { authorization_code: Some("123456".into()), ..card_sale() });
        assert!(with_code.validate().is_ok());
    }

    #[test]
    fn test_check_payment_requires_account() {
        let request = Sale(TransactionRequest {
            payment: Some(PaymentMethod::Check),
            checkname: Some("Ada".into()),
            amount: Some(Decimal::ONE),
            ..TransactionRequest::default()
        });
        assert!(matches!(request.validate(), Err(NmiError::InvalidInput(m)) if m.contains("checkaba")));
    }

    #[test]
    fn test_follow_up_operations_require_transaction_id() {
        assert!(CaptureRequest { amount: Some(Decimal::ONE), ..Default::default() }.check().is_err());
        assert!(VoidRequest::default().check().is_err());
        assert!(RefundRequest::default().check().is_err());
        assert!(UpdateRequest::default().check().is_err());

        let refund = RefundRequest { transactionid: "42".into(), ..Default::default() };
        assert!(Operation::validate(&refund).is_ok());
    }

    #[test]
    fn test_discriminants() {
        assert_eq!(Sale::DISCRIMINANT.map(|d| d.value), Some("sale"));
        assert_eq!(Authorize::DISCRIMINANT.map(|d| d.value), Some("auth"));
        assert_eq!(<CaptureRequest as Operation>::DISCRIMINANT.map(|d| d.value), Some("capture"));
    }
}
