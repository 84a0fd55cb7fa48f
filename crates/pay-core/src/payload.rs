//! # Payload Types
//!
//! Request and response shapes for a single payment request:
//! the inbound body, the transaction descriptor sent to the provider,
//! the provider's reply, and the three fields handed back to the wallet UI.

use crate::amount::XrpAmount;
use crate::error::{PaymentError, PaymentResult};
use crate::provider::ReturnUrls;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Returned when `destination` or `amount` is absent or empty
pub const MISSING_FIELDS_MESSAGE: &str = "Destination address and amount are required.";

/// Returned when `amount` is present but not a usable XRP value
pub const INVALID_AMOUNT_MESSAGE: &str =
    "Amount must be a positive XRP value with at most 6 decimal places.";

/// Transaction type for every payload this service creates
pub const PAYMENT_TRANSACTION_TYPE: &str = "Payment";

// =============================================================================
// Inbound request
// =============================================================================

/// Raw inbound body. Fields stay loosely typed until `validate()` so that
/// "missing" and "malformed" can be told apart.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentRequestInput {
    #[serde(default)]
    pub destination: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
}

/// Input that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPayment {
    pub destination: String,
    pub amount: XrpAmount,
}

impl PaymentRequestInput {
    /// Parse a request body. Anything that is not a JSON object counts as
    /// having no fields at all.
    pub fn from_body(body: &[u8]) -> PaymentResult<Self> {
        let missing = || PaymentError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_string());

        let value: Value = serde_json::from_slice(body).map_err(|_| missing())?;
        if !value.is_object() {
            return Err(missing());
        }
        serde_json::from_value(value).map_err(|_| missing())
    }

    /// Check both fields are present and convert the amount.
    pub fn validate(&self) -> PaymentResult<ValidatedPayment> {
        let destination = match &self.destination {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            _ => return Err(PaymentError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_string())),
        };

        let amount = match &self.amount {
            Some(Value::Number(n)) => XrpAmount::from_number(n),
            Some(Value::String(s)) if !s.trim().is_empty() => s.parse::<XrpAmount>(),
            _ => return Err(PaymentError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_string())),
        }
        .map_err(|_| PaymentError::InvalidRequest(INVALID_AMOUNT_MESSAGE.to_string()))?;

        Ok(ValidatedPayment {
            destination,
            amount,
        })
    }
}

// =============================================================================
// Outbound payload descriptor
// =============================================================================

/// Body of a "create payload" call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadRequest {
    pub txjson: PaymentTransaction,
    pub options: PayloadOptions,
}

/// The XRPL transaction the user will be asked to sign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentTransaction {
    pub transaction_type: String,
    pub destination: String,
    /// Native XRP amount in drops, as an integer string
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadOptions {
    pub return_url: ReturnUrls,
}

impl PayloadRequest {
    /// Build a Payment payload for validated input.
    pub fn payment(payment: &ValidatedPayment, return_url: ReturnUrls) -> Self {
        Self {
            txjson: PaymentTransaction {
                transaction_type: PAYMENT_TRANSACTION_TYPE.to_string(),
                destination: payment.destination.clone(),
                amount: payment.amount.drops_string(),
            },
            options: PayloadOptions { return_url },
        }
    }
}

// =============================================================================
// Provider reply
// =============================================================================

/// Provider reply to "create payload". Every field is optional here; the
/// reply is only trusted once `into_result()` has checked it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedPayload {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub next: Option<PayloadNext>,
    #[serde(default)]
    pub refs: Option<PayloadRefs>,
    /// Reply exactly as received, for logging
    #[serde(skip)]
    pub raw: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayloadNext {
    #[serde(default)]
    pub always: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayloadRefs {
    #[serde(default)]
    pub qr_png: Option<String>,
}

impl CreatedPayload {
    /// Wrap a raw JSON reply. A reply of the wrong shape yields an empty
    /// payload, which `into_result()` then rejects.
    pub fn from_value(raw: Value) -> Self {
        let mut payload: CreatedPayload = serde_json::from_value(raw.clone()).unwrap_or_default();
        payload.raw = raw;
        payload
    }

    /// Extract the three fields the caller needs.
    pub fn into_result(self) -> PaymentResult<PaymentRequestResult> {
        let deep_link = self.next.and_then(|n| n.always).filter(|s| !s.is_empty());
        let qr_code_url = self.refs.and_then(|r| r.qr_png).filter(|s| !s.is_empty());
        let payload_id = self.uuid.filter(|s| !s.is_empty());

        match (qr_code_url, deep_link, payload_id) {
            (Some(qr_code_url), Some(deep_link), Some(payload_id)) => Ok(PaymentRequestResult {
                qr_code_url,
                deep_link,
                payload_id,
            }),
            _ => Err(PaymentError::ProviderResponse { raw: self.raw }),
        }
    }
}

// =============================================================================
// Response
// =============================================================================

/// Successful response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequestResult {
    #[serde(rename = "qrCodeUrl")]
    pub qr_code_url: String,
    #[serde(rename = "xummDeepLink")]
    pub deep_link: String,
    #[serde(rename = "payloadUuid")]
    pub payload_id: String,
}
