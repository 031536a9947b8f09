//! Purpose: JSON envelopes for tokens, catalogs, and endpoints printed by the CLI.
//! Exports: `token_json`, `catalog_json`, `endpoint_json`.
//! Role: Keep output shape in one place for every `idcat` subcommand and error path.
//! Invariants: Endpoint keys use the identity service's wire names (`publicURL`, ...).
//! Invariants: Expiry renders in the same layout it was parsed from.

use identity_catalog::api::{CatalogEntry, Endpoint, Error, ServiceCatalog, Token, format_expiry};
use serde_json::{Map, Value, json};

pub(crate) fn token_json(token: &Token) -> Result<Value, Error> {
    let expires_at = format_expiry(token.expires_at)?;
    Ok(json!({
        "id": token.id,
        "expires_at": expires_at,
        "tenant": {
            "id": token.tenant.id,
            "name": token.tenant.name,
            "description": token.tenant.description,
            "enabled": token.tenant.enabled,
        },
    }))
}

pub(crate) fn catalog_json(catalog: &ServiceCatalog) -> Value {
    Value::Array(catalog.entries().iter().map(entry_json).collect())
}

pub(crate) fn endpoint_json(endpoint: &Endpoint) -> Value {
    let mut map = Map::new();
    map.insert("tenantId".to_string(), json!(endpoint.tenant_id));
    map.insert("publicURL".to_string(), json!(endpoint.public_url));
    map.insert("internalURL".to_string(), json!(endpoint.internal_url));
    map.insert("adminURL".to_string(), json!(endpoint.admin_url));
    map.insert("region".to_string(), json!(endpoint.region));
    map.insert("versionId".to_string(), json!(endpoint.version_id));
    map.insert("versionInfo".to_string(), json!(endpoint.version_info));
    map.insert("versionList".to_string(), json!(endpoint.version_list));
    Value::Object(map)
}

fn entry_json(entry: &CatalogEntry) -> Value {
    json!({
        "name": entry.name,
        "type": entry.service_type,
        "endpoints": entry.endpoints.iter().map(endpoint_json).collect::<Vec<_>>(),
    })
}
