//! Customer vault requests (`customer_vault=...`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    AccountHolderType, AccountType, Currency, InitiatedBy, PaymentMethod, SecCode,
    StoredCredentialIndicator, gateway_operation, validate,
};
use crate::{
    error::{NmiError, Result},
    response::CustomerVaultResponse,
    wire::CustomFieldMap,
};

/// A vault customer: payment data, addresses and order details.
///
/// Shared by [`AddCustomer`], [`UpdateCustomer`] and [`ValidateCustomer`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerRecord {
    /// Vault id. Generated by the gateway on add when omitted.
    pub customer_vault_id: Option<String>,
    /// Billing record to add or update.
    pub billing_id: Option<String>,
    /// Shipping record to add or update.
    pub shipping_id: Option<String>,
    /// Collect.js payment token.
    pub payment_token: Option<String>,
    /// Google Pay payment data.
    pub googlepay_payment_data: Option<String>,
    /// Card number.
    pub ccnumber: Option<String>,
    /// Card expiry, `MMYY`.
    pub ccexp: Option<String>,
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
    /// Currency.
    pub currency: Currency,
    /// Payment instrument.
    pub payment: Option<PaymentMethod>,
    /// Order id.
    pub orderid: Option<String>,
    /// Order description.
    pub order_description: Option<String>,
    /// Copy payment data from a prior transaction.
    pub source_transaction_id: Option<String>,
    /// Include the card in automatic card updater runs.
    pub acu_enabled: Option<bool>,

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
    /// Shipping phone.
    pub shipping_phone: Option<String>,
    /// Shipping fax.
    pub shipping_fax: Option<String>,
    /// Shipping email.
    pub shipping_email: Option<String>,

    /// Merchant-defined fields.
    #[serde(default)]
    pub custom_fields: CustomFieldMap,
}

impl CustomerRecord {
    fn has_card(&self) -> bool {
        self.ccnumber.is_some() && self.ccexp.is_some()
    }

    fn has_check(&self) -> bool {
        self.checkname.is_some() && self.checkaba.is_some() && self.checkaccount.is_some()
    }

    fn has_token(&self) -> bool {
        self.payment_token.is_some()
            || self.googlepay_payment_data.is_some()
            || self.source_transaction_id.is_some()
    }

    fn check_contact(&self) -> Result<()> {
        validate::email("email", self.email.as_deref())?;
        validate::email("shipping_email", self.shipping_email.as_deref())
    }

    fn check_add(&self) -> Result<()> {
        if !(self.has_card() || self.has_check() || self.has_token()) {
            return Err(NmiError::InvalidInput(
                "payment data is required: ccnumber and ccexp, checkname, checkaba and \
                 checkaccount, or a payment token"
                    .to_owned(),
            ));
        }
        self.check_contact()
    }

    fn check_update(&self) -> Result<()> {
        validate::required_opt("customer_vault_id", self.customer_vault_id.as_deref())?;
        self.check_contact()
    }

    /// Validation re-checks stored data and takes nothing but the vault id.
    fn check_validate(&self) -> Result<()> {
        validate::required_opt("customer_vault_id", self.customer_vault_id.as_deref())?;
        let id_only = Self { customer_vault_id: self.customer_vault_id.clone(), ..Self::default() };
        if *self != id_only {
            return Err(NmiError::InvalidInput(
                "validate_customer accepts only customer_vault_id".to_owned(),
            ));
        }
        Ok(())
    }
}

gateway_operation! {
    /// Store a new customer.
    AddCustomer(CustomerRecord) -> CustomerVaultResponse {
        name: "add_customer",
        endpoint: Transact,
        discriminant: "customer_vault" = "add_customer",
        validate: CustomerRecord::check_add,
    }
}

gateway_operation! {
    /// Replace a stored customer's details.
    UpdateCustomer(CustomerRecord) -> CustomerVaultResponse {
        name: "update_customer",
        endpoint: Transact,
        discriminant: "customer_vault" = "update_customer",
        validate: CustomerRecord::check_update,
    }
}

gateway_operation! {
    /// Verify a stored customer's payment data.
    ValidateCustomer(CustomerRecord) -> CustomerVaultResponse {
        name: "validate_customer",
        endpoint: Transact,
        discriminant: "customer_vault" = "validate",
        validate: CustomerRecord::check_validate,
    }
}

/// Remove a customer from the vault.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteCustomer {
    /// Vault id to delete.
    pub customer_vault_id: String,
}

impl DeleteCustomer {
    /// Targets `customer_vault_id`.
    pub fn new(customer_vault_id: impl Into<String>) -> Self {
        Self { customer_vault_id: customer_vault_id.into() }
    }

    fn check(&self) -> Result<()> {
        validate::required("customer_vault_id", &self.customer_vault_id)
    }
}

gateway_operation! {
    impl DeleteCustomer => CustomerVaultResponse {
        name: "delete_customer",
        endpoint: Transact,
        discriminant: ["customer_vault" = "delete_customer"],
        validate: DeleteCustomer::check,
    }
}

/// A billing record attached to a vault customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BillingRecord {
    /// Owning vault customer.
    pub customer_vault_id: Option<String>,
    /// Billing record id.
    pub billing_id: Option<String>,
    /// Card number.
    pub ccnumber: Option<String>,
    /// Card expiry, `MMYY`.
    pub ccexp: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Address line 1.
    pub address1: Option<String>,
    /// Address line 2.
    pub address2: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State.
    pub state: Option<String>,
    /// Postal code.
    pub zip: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Fax.
    pub fax: Option<String>,
    /// Email.
    pub email: Option<String>,
}

impl BillingRecord {
    fn check_add(&self) -> Result<()> {
        validate::required_opt("customer_vault_id", self.customer_vault_id.as_deref())?;
        validate::email("email", self.email.as_deref())
    }

    fn check_update(&self) -> Result<()> {
        validate::required_opt("billing_id", self.billing_id.as_deref())?;
        self.check_add()
    }
}

gateway_operation! {
    /// Add a billing record to a customer.
    AddBilling(BillingRecord) -> CustomerVaultResponse {
        name: "add_billing",
        endpoint: Transact,
        discriminant: "customer_vault" = "add_billing",
        validate: BillingRecord::check_add,
    }
}

gateway_operation! {
    /// Update one of a customer's billing records.
    UpdateBilling(BillingRecord) -> CustomerVaultResponse {
        name: "update_billing",
        endpoint: Transact,
        discriminant: "customer_vault" = "update_billing",
        validate: BillingRecord::check_update,
    }
}

/// Remove a billing record from a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteBilling {
    /// Owning vault customer.
    pub customer_vault_id: String,
    /// Billing record to delete.
    pub billing_id: String,
}

impl DeleteBilling {
    fn check(&self) -> Result<()> {
        validate::required("customer_vault_id", &self.customer_vault_id)?;
        validate::required("billing_id", &self.billing_id)
    }
}

gateway_operation! {
    impl DeleteBilling => CustomerVaultResponse {
        name: "delete_billing",
        endpoint: Transact,
        discriminant: ["customer_vault" = "delete_billing"],
        validate: DeleteBilling::check,
    }
}

/// A transaction funded by a stored customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VaultTransaction {
    /// Vault customer to charge.
    pub customer_vault_id: String,
    /// Billing record to charge; the priority-1 record when omitted.
    pub billing_id: Option<String>,
    /// Amount.
    pub amount: Option<Decimal>,
    /// Currency.
    pub currency: Currency,
    /// Order id.
    pub orderid: Option<String>,
    /// Order description.
    pub order_description: Option<String>,
    /// Stored credential: who initiated the transaction.
    pub initiated_by: Option<InitiatedBy>,
    /// Stored credential: original transaction id.
    pub initial_transaction_id: Option<String>,
    /// Stored credential: stored or used.
    pub stored_credential_indicator: Option<StoredCredentialIndicator>,
}

impl VaultTransaction {
    /// Charges `amount` to `customer_vault_id`.
    pub fn new(customer_vault_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            customer_vault_id: customer_vault_id.into(),
            amount: Some(amount),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<()> {
        validate::required("customer_vault_id", &self.customer_vault_id)?;
        validate::positive_amount("amount", self.amount)
    }
}

gateway_operation! {
    /// Sale against a stored customer.
    VaultSale(VaultTransaction) -> CustomerVaultResponse {
        name: "vault_sale",
        endpoint: Transact,
        discriminant: "type" = "sale",
        validate: VaultTransaction::check,
    }
}

gateway_operation! {
    /// Authorization against a stored customer.
    VaultAuthorize(VaultTransaction) -> CustomerVaultResponse {
        name: "vault_authorize",
        endpoint: Transact,
        discriminant: "type" = "auth",
        validate: VaultTransaction::check,
    }
}

gateway_operation! {
    /// Credit to a stored customer.
    VaultCredit(VaultTransaction) -> CustomerVaultResponse {
        name: "vault_credit",
        endpoint: Transact,
        discriminant: "type" = "credit",
        validate: VaultTransaction::check,
    }
}

gateway_operation! {
    /// Offline sale against a stored customer.
    VaultOffline(VaultTransaction) -> CustomerVaultResponse {
        name: "vault_offline",
        endpoint: Transact,
        discriminant: "type" = "offline",
        validate: VaultTransaction::check,
    }
}
