//! Response normalization.
//!
//! Turns raw gateway text into a typed response. Three encodings are handled:
//!
//! | Encoding | Used by | Failure modes |
//! |----------|---------|---------------|
//! | Query string | transact endpoint | [`SchemaMismatch`](NmiError::SchemaMismatch) |
//! | XML | query endpoint | [`GatewayError`](NmiError::GatewayError), [`SchemaMismatch`](NmiError::SchemaMismatch) |
//! | Text | receipts | none |
//!
//! A query-string `response` of "declined" or "error" is data, not a failure.
//! For XML the gateway's error envelope always wins over shape validation.

mod coerce;
mod xml;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

pub use coerce::{Container, ContainerKind, EACH, coerce_containers};

use crate::error::{self, NmiError, Result};

/// Root element of every XML report.
pub const XML_ROOT: &str = "nm_response";

/// Field of the XML error envelope.
pub const ERROR_ENVELOPE_FIELD: &str = "error_response";

/// How a response body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// `key=value&key2=value2`.
    QueryString,
    /// `<nm_response>...</nm_response>`.
    Xml,
    /// Opaque text passed through unchanged.
    Text,
}

/// Raw transport output plus its declared encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status.
    pub status: u16,
    /// Response body.
    pub body: String,
    /// Declared encoding.
    pub encoding: Encoding,
}

/// A typed response shape the normalizer can produce.
pub trait ResponseSchema: DeserializeOwned + Send {
    /// Encoding the gateway uses for this response.
    const ENCODING: Encoding;

    /// Container fields to coerce before validation (XML only).
    const CONTAINERS: &'static [Container] = &[];

    /// The gateway's human-readable message, if the shape carries one.
    fn gateway_message(&self) -> Option<&str> {
        None
    }
}

/// Normalizes `raw` into `T`.
///
/// # Errors
///
/// - [`NmiError::GatewayError`] if an XML body is the gateway's error envelope
/// - [`NmiError::SchemaMismatch`] if the body cannot be decoded into `T`
pub fn normalize<T: ResponseSchema>(raw: &RawResponse) -> Result<T> {
    match raw.encoding {
        Encoding::QueryString => normalize_query_string(&raw.body),
        Encoding::Xml => normalize_xml(&raw.body),
        Encoding::Text => validate(Value::String(raw.body.clone()), &raw.body),
    }
}

fn normalize_query_string<T: ResponseSchema>(body: &str) -> Result<T> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body.trim())
        .map_err(|e| NmiError::schema_mismatch(format!("invalid query string: {e}"), body))?;

    let fields: Map<String, Value> =
        pairs.into_iter().map(|(k, v)| (k, Value::String(v))).collect();

    validate(Value::Object(fields), body)
}

fn normalize_xml<T: ResponseSchema>(body: &str) -> Result<T> {
    let tree = xml::parse(body).map_err(|reason| NmiError::schema_mismatch(reason, body))?;

    let Value::Object(mut document) = tree else {
        return Err(NmiError::schema_mismatch("XML document has no root element", body));
    };

    let mut root = match document.remove(XML_ROOT) {
        Some(Value::String(s)) if s.is_empty() => Value::Object(Map::new()),
        Some(root @ Value::Object(_)) => root,
        Some(_) => {
            return Err(NmiError::schema_mismatch(format!("<{XML_ROOT}> holds bare text"), body));
        }
        None => {
            return Err(NmiError::schema_mismatch(format!("missing <{XML_ROOT}> root"), body));
        }
    };

    coerce_containers(&mut root, T::CONTAINERS);

    if let Some(message) = error_envelope(&root) {
        debug!(gateway_error = message, "gateway returned error envelope");
        let message = if message.trim().is_empty() {
            format!("empty {ERROR_ENVELOPE_FIELD} (raw: {})", error::excerpt(body))
        } else {
            message.to_owned()
        };
        return Err(NmiError::GatewayError(message));
    }

    validate(root, body)
}

/// Returns the embedded message if `root` is the gateway error envelope.
fn error_envelope(root: &Value) -> Option<&str> {
    root.get(ERROR_ENVELOPE_FIELD).and_then(Value::as_str)
}

fn validate<T: ResponseSchema>(tree: Value, body: &str) -> Result<T> {
    serde_json::from_value(tree).map_err(|e| NmiError::schema_mismatch(e.to_string(), body))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Flat {
        response: String,
        #[serde(default)]
        responsetext: Option<String>,
    }

    impl ResponseSchema for Flat {
        const ENCODING: Encoding = Encoding::QueryString;
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Plans {
        plan: Vec<Plan>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Plan {
        plan_id: String,
    }

    impl ResponseSchema for Plans {
        const ENCODING: Encoding = Encoding::Xml;
        const CONTAINERS: &'static [Container] = &[Container::list(&["plan"])];
    }

    fn raw(body: &str, encoding: Encoding) -> RawResponse {
        RawResponse { status: 200, body: body.to_owned(), encoding }
    }

    #[test]
    fn test_declined_is_not_a_failure() {
        let flat: Flat =
            normalize(&raw("response=2&responsetext=DECLINE", Encoding::QueryString)).unwrap();
        assert_eq!(flat.response, "2");
        assert_eq!(flat.responsetext.as_deref(), Some("DECLINE"));
    }

    #[test]
    fn test_query_string_missing_required_field() {
        let result = normalize::<Flat>(&raw("responsetext=OK", Encoding::QueryString));
        assert!(matches!(result, Err(NmiError::SchemaMismatch { raw, .. }) if raw == "responsetext=OK"));
    }

    #[test]
    fn test_xml_single_plan_becomes_list() {
        let body = "<nm_response><plan><plan_id>gold</plan_id></plan></nm_response>";
        let plans: Plans = normalize(&raw(body, Encoding::Xml)).unwrap();
        assert_eq!(plans.plan, vec![Plan { plan_id: "gold".to_owned() }]);
    }

    #[test]
    fn test_xml_empty_envelope_defaults() {
        let plans: Plans = normalize(&raw("<nm_response></nm_response>", Encoding::Xml)).unwrap();
        assert!(plans.plan.is_empty());
    }

    #[test]
    fn test_error_envelope_wins() {
        let body = "<nm_response><error_response>Invalid Security Key</error_response></nm_response>";
        let result = normalize::<Plans>(&raw(body, Encoding::Xml));
        assert!(matches!(result, Err(NmiError::GatewayError(m)) if m == "Invalid Security Key"));
    }

    #[test]
    fn test_blank_error_envelope_keeps_raw_body() {
        for body in [
            "<nm_response><error_response></error_response></nm_response>",
            "<nm_response><error_response>   </error_response></nm_response>",
        ] {
            let result = normalize::<Plans>(&raw(body, Encoding::Xml));
            assert!(
                matches!(&result, Err(NmiError::GatewayError(m)) if m.starts_with("empty error_response") && m.contains(body)),
                "{body}: {result:?}"
            );
        }
    }

    #[test]
    fn test_wrong_root_is_schema_mismatch() {
        let result = normalize::<Plans>(&raw("<html>oops</html>", Encoding::Xml));
        assert!(matches!(result, Err(NmiError::SchemaMismatch { .. })));
    }
}
