//! Request and response types exchanged with the client application.
//!
//! Upstream Teller payloads cross the boundary as `serde_json::Value` and are
//! converted into these typed structures before anything else touches them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Fetch endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /api/fetch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    /// Teller access token obtained from Teller Connect. Required; requests
    /// without one are rejected before any upstream call.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Maximum number of transactions to fetch per account. Defaults to 50
    /// when absent; the upstream API applies its own limits beyond that.
    #[serde(default)]
    pub count: Option<u32>,
}

/// Successful response body for `POST /api/fetch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResponse {
    /// One entry per linked account, in upstream listing order.
    pub accounts: Vec<AggregatedAccount>,
}

/// One account with its balance and most recent transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedAccount {
    /// Normalised account fields.
    pub account: Account,
    /// Available and ledger amounts.
    pub balance: Balance,
    /// Raw upstream transaction records, passed through unmodified.
    pub transactions: Vec<Value>,
}

/// Normalised account fields extracted from a Teller account record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Upstream account identifier. Always present; entries without one are
    /// excluded from the response.
    pub id: String,
    /// Display name.
    pub name: Option<String>,
    /// Institution name, lifted from the nested `institution.name` upstream
    /// field. Absent when the upstream record has none.
    pub institution: Option<String>,
    /// Last four digits of the account number.
    pub last_four: Option<String>,
    /// Account type (e.g. `"depository"`, `"credit"`).
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Available and ledger amounts for one account.
///
/// Amounts are opaque strings formatted by Teller; precision and currency
/// formatting are upstream's responsibility and are not reinterpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    /// Available balance.
    pub available: Option<String>,
    /// Ledger balance.
    pub ledger: Option<String>,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /healthz`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `true` when the process is serving requests.
    pub ok: bool,
    /// Configured Teller environment (`"sandbox"`, `"development"`, or
    /// `"production"`).
    pub env: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fetch_request_uses_camel_case() {
        let req: FetchRequest =
            serde_json::from_value(json!({"accessToken": "tok_abc", "count": 10})).unwrap();
        assert_eq!(req.access_token.as_deref(), Some("tok_abc"));
        assert_eq!(req.count, Some(10));
    }

    #[test]
    fn fetch_request_fields_are_optional() {
        let req: FetchRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.access_token.is_none());
        assert!(req.count.is_none());
    }

    #[test]
    fn account_serialises_type_field() {
        let account = Account {
            id: "acc_1".into(),
            name: Some("Checking".into()),
            institution: Some("Chase".into()),
            last_four: Some("1234".into()),
            kind: Some("depository".into()),
        };
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["type"], "depository");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn fetch_response_round_trip() {
        let resp = FetchResponse {
            accounts: vec![AggregatedAccount {
                account: Account {
                    id: "acc_1".into(),
                    name: None,
                    institution: None,
                    last_four: None,
                    kind: None,
                },
                balance: Balance {
                    available: Some("100.00".into()),
                    ledger: None,
                },
                transactions: vec![json!({"id": "txn_1"})],
            }],
        };
        let text = serde_json::to_string(&resp).unwrap();
        let decoded: FetchResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded.accounts.len(), 1);
        assert_eq!(decoded.accounts[0].account.id, "acc_1");
        assert_eq!(decoded.accounts[0].transactions.len(), 1);
    }

    #[test]
    fn error_response_new() {
        let e = ErrorResponse::new("bad_request", "missing 'accessToken' in request body");
        assert_eq!(e.code, "bad_request");
        assert!(e.message.contains("accessToken"));
    }

    #[test]
    fn health_response_serde() {
        let h = HealthResponse {
            ok: true,
            env: "sandbox".into(),
        };
        let value = serde_json::to_value(&h).unwrap();
        assert_eq!(value, json!({"ok": true, "env": "sandbox"}));
    }
}
