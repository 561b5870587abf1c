//! Account aggregation: one access token in, a consolidated snapshot out.
//!
//! The pipeline lists the accounts linked to the token, then fetches the
//! balance and recent transactions for every account. Results keep the
//! upstream listing order. Any single upstream failure aborts the whole
//! request; callers get either a complete snapshot or an error, never a
//! partial one.

use futures::future;
use serde_json::Value;
use tracing::debug;

use common::protocol::{Account, AggregatedAccount, FetchResponse};
use common::ServiceError;

use crate::config::Config;
use crate::teller::client::string_field;
use crate::teller::TellerClient;

/// Transactions fetched per account when the caller does not supply a count.
pub const DEFAULT_TRANSACTION_COUNT: u32 = 50;

/// Fetch accounts, balances, and transactions for `access_token` and merge
/// them into a single response.
///
/// Per-account fetches run concurrently but the response preserves the
/// upstream account listing order. Entries without a non-empty `id` are
/// skipped. The upstream client lives only for the duration of this call.
///
/// # Errors
///
/// - [`ServiceError::BadRequest`] if the token is empty; no upstream call is
///   made in that case.
/// - [`ServiceError::Configuration`] if the environment requires a client
///   certificate that is not configured.
/// - [`ServiceError::Upstream`] if any Teller call answers non-2xx; the first
///   failure aborts the request and in-flight sibling fetches are dropped.
pub async fn aggregate(
    cfg: &Config,
    access_token: &str,
    max_transactions: u32,
) -> Result<FetchResponse, ServiceError> {
    if access_token.trim().is_empty() {
        return Err(ServiceError::BadRequest(
            "missing 'accessToken' in request body".into(),
        ));
    }

    let client = TellerClient::new(cfg, access_token)?;

    let listed = client.list_accounts().await?;
    debug!(accounts = listed.len(), "upstream account listing fetched");

    // One fetch per account, joined in listing order. try_join_all resolves
    // in input order and aborts on the first error, dropping the remaining
    // in-flight fetches.
    let fetches = listed.iter().filter_map(|entry| {
        match entry
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
        {
            Some(id) => Some(fetch_account(&client, entry, id, max_transactions)),
            None => {
                debug!("skipping account entry without an identifier");
                None
            }
        }
    });
    let accounts = future::try_join_all(fetches).await?;

    Ok(FetchResponse { accounts })
}

/// Fetch the balance and transactions for one account, concurrently, and
/// assemble the normalised result.
async fn fetch_account(
    client: &TellerClient,
    entry: &Value,
    id: &str,
    max_transactions: u32,
) -> Result<AggregatedAccount, ServiceError> {
    let (balance, transactions) = tokio::try_join!(
        client.balance(id),
        client.transactions(id, max_transactions)
    )?;

    Ok(AggregatedAccount {
        account: normalise_account(entry, id),
        balance,
        transactions,
    })
}

/// Normalise a raw Teller account record into the response shape.
///
/// The institution name lives in a nested object upstream; a missing or null
/// `institution` yields an absent name, never an error.
fn normalise_account(entry: &Value, id: &str) -> Account {
    Account {
        id: id.to_owned(),
        name: string_field(entry, "name"),
        institution: entry
            .get("institution")
            .and_then(|institution| institution.get("name"))
            .and_then(Value::as_str)
            .map(str::to_owned),
        last_four: string_field(entry, "last_four"),
        kind: string_field(entry, "type"),
    }
}
