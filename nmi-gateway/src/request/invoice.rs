//! Invoicing requests (`invoicing=...`).

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use super::{Currency, LineItem, PaymentKind, gateway_operation, validate};
use crate::{
    error::{NmiError, Result},
    response::InvoiceResponse,
    wire::CustomFieldMap,
};

/// Longest payment term in days.
pub const MAX_PAYMENT_TERM_DAYS: u16 = 999;

/// When an invoice is due.
///
/// Encoded as `upon_receipt` or a number of days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentTerms {
    /// Due on receipt.
    #[default]
    UponReceipt,
    /// Due within this many days (0-999).
    Days(u16),
}

const UPON_RECEIPT: &str = "upon_receipt";

impl Serialize for PaymentTerms {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::UponReceipt => serializer.serialize_str(UPON_RECEIPT),
            Self::Days(days) => serializer.serialize_u16(*days),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentTerms {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TermsVisitor;

        impl de::Visitor<'_> for TermsVisitor {
            type Value = PaymentTerms;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "\"{UPON_RECEIPT}\" or a number of days")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                u16::try_from(v)
                    .map(PaymentTerms::Days)
                    .map_err(|_| E::custom(format!("payment_terms out of range: {v}")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("payment_terms out of range: {v}")))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                if v == UPON_RECEIPT {
                    return Ok(PaymentTerms::UponReceipt);
                }
                v.parse::<u16>().map(PaymentTerms::Days).map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(TermsVisitor)
    }
}

/// Payment types an invoice may be paid with. Defaults to all three.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowedPayments(pub Vec<PaymentKind>);

impl Default for AllowedPayments {
    fn default() -> Self {
        Self(vec![PaymentKind::Cc, PaymentKind::Ck, PaymentKind::Cs])
    }
}

/// An invoice definition, used to create or update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvoiceRequest {
    /// Invoice being updated.
    pub invoice_id: Option<String>,
    /// Amount due.
    pub amount: Option<Decimal>,
    /// Recipient email.
    pub email: Option<String>,
    /// Due date terms.
    pub payment_terms: PaymentTerms,
    /// Accepted payment types, sent comma-separated.
    pub payment_terms_allowed: AllowedPayments,
    /// Processor routing, comma-separated per payment type.
    pub processor_id: Option<String>,
    /// Currency.
    pub currency: Currency,
    /// Order description.
    pub order_description: Option<String>,
    /// Merchant customer id.
    pub customer_id: Option<String>,
    /// Shipping amount.
    pub shipping: Option<Decimal>,
    /// Purchase order number.
    pub ponumber: Option<String>,
    /// Sales tax.
    pub tax: Option<Decimal>,

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

    /// Line items, flattened to `item_*_<n>`.
    #[serde(default)]
    pub products: Vec<LineItem>,
    /// Merchant-defined fields.
    #[serde(default)]
    pub custom_fields: CustomFieldMap,
}

impl InvoiceRequest {
    fn check_terms(&self) -> Result<()> {
        if let PaymentTerms::Days(days) = self.payment_terms
            && days > MAX_PAYMENT_TERM_DAYS
        {
            return Err(NmiError::InvalidInput(format!(
                "payment_terms must be between 0 and {MAX_PAYMENT_TERM_DAYS} days, got {days}"
            )));
        }
        if self.payment_terms_allowed.0.is_empty() {
            return Err(NmiError::InvalidInput(
                "payment_terms_allowed must name at least one payment type".to_owned(),
            ));
        }
        validate::email("shipping_email", self.shipping_email.as_deref())
    }

    fn check_create(&self) -> Result<()> {
        validate::positive_amount("amount", self.amount)?;
        validate::required_opt("email", self.email.as_deref())?;
        validate::email("email", self.email.as_deref())?;
        self.check_terms()
    }

    fn check_update(&self) -> Result<()> {
        validate::required_opt("invoice_id", self.invoice_id.as_deref())?;
        if self.amount.is_some() {
            validate::positive_amount("amount", self.amount)?;
        }
        validate::email("email", self.email.as_deref())?;
        self.check_terms()
    }
}

gateway_operation! {
    /// Create an invoice.
    CreateInvoice(InvoiceRequest) -> InvoiceResponse {
        name: "create_invoice",
        endpoint: Transact,
        discriminant: "invoicing" = "add_invoice",
        validate: InvoiceRequest::check_create,
    }
}

gateway_operation! {
    /// Update an open invoice.
    UpdateInvoice(InvoiceRequest) -> InvoiceResponse {
        name: "update_invoice",
        endpoint: Transact,
        discriminant: "invoicing" = "update_invoice",
        validate: InvoiceRequest::check_update,
    }
}

/// Reference to an existing invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvoiceRef {
    /// Invoice id.
    pub invoice_id: String,
}

impl InvoiceRef {
    /// Targets `invoice_id`.
    pub fn new(invoice_id: impl Into<String>) -> Self {
        Self { invoice_id: invoice_id.into() }
    }

    fn check(&self) -> Result<()> {
        validate::required("invoice_id", &self.invoice_id)
    }
}

gateway_operation! {
    /// Email an invoice to its recipient.
    SendInvoice(InvoiceRef) -> InvoiceResponse {
        name: "send_invoice",
        endpoint: Transact,
        discriminant: "invoicing" = "send_invoice",
        validate: InvoiceRef::check,
    }
}

gateway_operation! {
    /// Close an invoice.
    CloseInvoice(InvoiceRef) -> InvoiceResponse {
        name: "close_invoice",
        endpoint: Transact,
        discriminant: "invoicing" = "close_invoice",
        validate: InvoiceRef::check,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::request::Operation;

    fn invoice() -> InvoiceRequest {
        InvoiceRequest {
            amount: Some(Decimal::new(2500, 2)),
            email: Some("ada@example.com".into()),
            ..InvoiceRequest::default()
        }
    }

    #[test]
    fn test_defaults_serialize() {
        let value = serde_json::to_value(invoice()).unwrap();
        assert_eq!(value["payment_terms"], json!("upon_receipt"));
        assert_eq!(value["payment_terms_allowed"], json!(["cc", "ck", "cs"]));
        assert_eq!(value["currency"], json!("USD"));
    }

    #[test]
    fn test_payment_terms_forms() {
        let days: PaymentTerms = serde_json::from_value(json!(30)).unwrap();
        assert_eq!(days, PaymentTerms::Days(30));
        let receipt: PaymentTerms = serde_json::from_value(json!("upon_receipt")).unwrap();
        assert_eq!(receipt, PaymentTerms::UponReceipt);
        assert!(serde_json::from_value::<PaymentTerms>(json!("net30")).is_err());
        assert!(serde_json::from_value::<PaymentTerms>(json!(-1)).is_err());
    }

    #[test]
    fn test_create_rules() {
        assert!(CreateInvoice(invoice()).validate().is_ok());
        assert!(CreateInvoice(InvoiceRequest { amount: Some(Decimal::ZERO), ..invoice() }).validate().is_err());
        assert!(CreateInvoice(InvoiceRequest { email: Some("nope".into()), ..invoice() }).validate().is_err());
        assert!(CreateInvoice(InvoiceRequest { email: None, ..invoice() }).validate().is_err());
        assert!(
            CreateInvoice(InvoiceRequest { payment_terms: PaymentTerms::Days(1000), ..invoice() })
                .validate()
                .is_err()
        );
        assert!(
            CreateInvoice(InvoiceRequest { payment_terms: PaymentTerms::Days(999), ..invoice() })
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_invoice_id_required() {
        assert!(UpdateInvoice(invoice()).validate().is_err());
        assert!(SendInvoice(InvoiceRef::new("")).validate().is_err());
        assert!(CloseInvoice(InvoiceRef::new("inv-1")).validate().is_ok());
    }
}
