//! Query-string responses of the transact endpoint.
//!
//! Every value arrives as text. Fields the gateway omits are `None`; fields it
//! sends empty are `Some("")`. Unlisted fields are ignored.

use serde::{Deserialize, Serialize};

use super::ResponseCode;
use crate::normalize::{Encoding, ResponseSchema};

macro_rules! form_response {
    ($name:ident) => {
        impl ResponseSchema for $name {
            const ENCODING: Encoding = Encoding::QueryString;

            fn gateway_message(&self) -> Option<&str> {
                self.responsetext.as_deref().filter(|text| !text.is_empty())
            }
        }

        impl $name {
            /// Whether the gateway approved the request.
            #[must_use]
            pub const fn is_approved(&self) -> bool {
                self.response.is_approved()
            }
        }
    };
}

/// Reply to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// Outcome code.
    pub response: ResponseCode,
    /// Gateway message.
    pub responsetext: Option<String>,
    /// Authorization code.
    pub authcode: Option<String>,
    /// Transaction id.
    pub transactionid: Option<String>,
    /// AVS result.
    pub avsresponse: Option<String>,
    /// CVV result.
    pub cvvresponse: Option<String>,
    /// Echoed order id.
    pub orderid: Option<String>,
    /// Echoed transaction type.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Numeric result code.
    pub response_code: Option<String>,
    /// Vault id, when the transaction stored the customer.
    pub customer_vault_id: Option<String>,
    /// Partial payment id.
    pub partial_payment_id: Option<String>,
    /// Remaining partial payment balance.
    pub partial_payment_balance: Option<String>,
    /// Amount actually authorized.
    pub amount_authorized: Option<String>,
    /// EMV issuer data.
    pub emv_auth_response_data: Option<String>,
    /// Kount risk score.
    pub kount_score: Option<String>,
    /// Card network advice code.
    pub merchant_advice_code: Option<String>,
}

form_response!(TransactionResponse);

/// Reply to a customer vault operation or vault-funded transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerVaultResponse {
    /// Outcome code.
    pub response: ResponseCode,
    /// Gateway message.
    pub responsetext: Option<String>,
    /// Authorization code.
    pub authcode: Option<String>,
    /// Transaction id.
    pub transactionid: Option<String>,
    /// AVS result.
    pub avsresponse: Option<String>,
    /// CVV result.
    pub cvvresponse: Option<String>,
    /// Echoed order id.
    pub orderid: Option<String>,
    /// Echoed operation type.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Numeric result code.
    pub response_code: Option<String>,
    /// Vault id.
    pub customer_vault_id: Option<String>,
    /// Billing record id.
    pub billing_id: Option<String>,
    /// EMV issuer data.
    pub emv_auth_response_data: Option<String>,
    /// Kount risk score.
    pub kount_score: Option<String>,
    /// Card network advice code.
    pub merchant_advice_code: Option<String>,
}

form_response!(CustomerVaultResponse);

/// Reply to a plan or subscription operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringResponse {
    /// Outcome code.
    pub response: ResponseCode,
    /// Gateway message.
    pub responsetext: Option<String>,
    /// Transaction id of an initial charge.
    pub transactionid: Option<String>,
    /// Echoed operation type.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Numeric result code.
    pub response_code: Option<String>,
    /// Subscription id.
    pub subscription_id: Option<String>,
    /// Plan id.
    pub plan_id: Option<String>,
    /// Legacy recurring id.
    pub recurring_id: Option<String>,
}

form_response!(RecurringResponse);

/// Reply to an invoicing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceResponse {
    /// Outcome code.
    pub response: ResponseCode,
    /// Gateway message.
    pub responsetext: Option<String>,
    /// Numeric result code.
    pub response_code: Option<String>,
    /// Invoice id.
    pub invoice_id: Option<String>,
    /// Echoed payment terms.
    pub payment_terms: Option<String>,
}

form_response!(InvoiceResponse);

/// Reply to a product catalog operation. Echoes the stored product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResponse {
    /// Outcome code.
    pub response: ResponseCode,
    /// Gateway message.
    pub responsetext: Option<String>,
    /// Numeric result code.
    pub response_code: Option<String>,
    /// Product id.
    pub product_id: Option<String>,
    /// SKU.
    pub product_sku: Option<String>,
    /// Description.
    pub product_description: Option<String>,
    /// Cost.
    pub product_cost: Option<String>,
    /// Currency.
    pub product_currency: Option<String>,
    /// Commodity code.
    pub product_commodity_code: Option<String>,
    /// Unit of measure.
    pub product_unit_of_measure: Option<String>,
    /// Tax amount.
    pub product_tax_amount: Option<String>,
    /// Discount amount.
    pub product_discount_amount: Option<String>,
    /// Image file name.
    pub product_image_name: Option<String>,
    /// Category.
    pub product_category: Option<String>,
}

form_response!(ProductResponse);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::NmiError,
        normalize::{RawResponse, normalize},
    };

    fn form(body: &str) -> RawResponse {
        RawResponse { status: 200, body: body.to_owned(), encoding: Encoding::QueryString }
    }

    #[test]
    fn test_vault_response() {
        let response: CustomerVaultResponse =
            normalize(&form("response=1&responsetext=SUCCESS&customer_vault_id=999")).unwrap();
        assert!(response.is_approved());
        assert_eq!(response.customer_vault_id.as_deref(), Some("999"));
        assert_eq!(response.gateway_message(), Some("SUCCESS"));
        assert_eq!(response.billing_id, None);
    }

    #[test]
    fn test_declined_transaction() {
        let response: TransactionResponse = normalize(&form(
            "response=2&responsetext=DECLINE&authcode=&transactionid=123&type=sale&response_code=200",
        ))
        .unwrap();
        assert_eq!(response.response, ResponseCode::Declined);
        assert_eq!(response.authcode.as_deref(), Some(""));
        assert_eq!(response.kind.as_deref(), Some("sale"));
    }

    #[test]
    fn test_unknown_response_code_is_mismatch() {
        let result = normalize::<TransactionResponse>(&form("response=9&responsetext=?"));
        assert!(matches!(result, Err(NmiError::SchemaMismatch { .. })));
    }

    #[test]
    fn test_empty_message_is_none() {
        let response: InvoiceResponse =
            normalize(&form("response=1&responsetext=&invoice_id=7")).unwrap();
        assert_eq!(response.gateway_message(), None);
        assert_eq!(response.invoice_id.as_deref(), Some("7"));
    }
}
