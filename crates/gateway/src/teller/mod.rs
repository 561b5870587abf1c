//! Teller API client and the account aggregation pipeline.
//!
//! Every Teller call is authenticated with the caller's access token using
//! HTTP Basic auth (token as username, blank password). In the development
//! and production environments the client additionally presents the Teller
//! client certificate for mutual TLS; sandbox needs only the token.

pub mod aggregate;
pub mod client;

pub use client::TellerClient;
