//! Field types shared by several operations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ISO 4217 currency code. Defaults to `USD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(pub String);

impl Default for Currency {
    fn default() -> Self {
        Self("USD".to_owned())
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

/// Product unit of measure. Defaults to `NAR` (no applicable unit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitOfMeasure(pub String);

impl Default for UnitOfMeasure {
    fn default() -> Self {
        Self("NAR".to_owned())
    }
}

/// Payment instrument of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card.
    Creditcard,
    /// ACH.
    Check,
    /// Cash (offline).
    Cash,
}

/// Short payment type code used by invoices and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    /// Credit card.
    Cc,
    /// Check.
    Ck,
    /// Cash.
    Cs,
}

/// ACH account holder type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountHolderType {
    /// Business account.
    Business,
    /// Personal account.
    Personal,
}

/// ACH account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Checking.
    Checking,
    /// Savings.
    Savings,
}

/// ACH standard entry class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SecCode {
    /// Prearranged payment.
    Ppd,
    /// Internet initiated.
    Web,
    /// Telephone initiated.
    Tel,
    /// Corporate.
    Ccd,
}

/// Who initiated a stored-credential transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitiatedBy {
    /// Cardholder initiated.
    Customer,
    /// Merchant initiated.
    Merchant,
}

/// Whether stored credentials are being saved or used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoredCredentialIndicator {
    /// First use; credentials are being stored.
    Stored,
    /// Subsequent use of stored credentials.
    Used,
}

/// Level-3 line item. Flattened to `item_*_<n>` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineItem {
    /// Merchant product code.
    pub item_product_code: Option<String>,
    /// Description.
    pub item_description: Option<String>,
    /// Commodity code.
    pub item_commodity_code: Option<String>,
    /// Unit of measure.
    pub item_unit_of_measure: Option<String>,
    /// Unit cost.
    pub item_unit_cost: Option<Decimal>,
    /// Quantity.
    pub item_quantity: Option<Decimal>,
    /// Line total.
    pub item_total_amount: Option<Decimal>,
    /// Tax amount.
    pub item_tax_amount: Option<Decimal>,
    /// Tax rate.
    pub item_tax_rate: Option<Decimal>,
    /// Discount amount.
    pub item_discount_amount: Option<Decimal>,
    /// Discount rate.
    pub item_discount_rate: Option<Decimal>,
    /// Tax type.
    pub item_tax_type: Option<String>,
    /// Alternate tax id.
    pub item_alternate_tax_id: Option<String>,
}
