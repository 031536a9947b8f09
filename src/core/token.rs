//! Purpose: Authentication token and the tenant it is scoped to.
//! Exports: `Token`, `Tenant`.
//! Role: Typed result of a token decode; built only by `core::decode`.
//! Invariants: `expires_at` is always a real parsed instant, never a placeholder.
//! Invariants: `id` is opaque; compare it for equality, never inspect it.
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::core::catalog::null_as_default;

/// Tenant record as reported by the identity service.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Tenant {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
}

/// The basic facts about an issued token.
///
/// Requests made with `id` after `expires_at` are rejected by the provider;
/// re-authenticating is the caller's job.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub id: String,
    pub expires_at: OffsetDateTime,
    pub tenant: Tenant,
}
