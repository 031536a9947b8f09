//! Purpose: Turn an untyped authentication response body into `Token` and `ServiceCatalog`.
//! Exports: `token_from_body`, `catalog_from_body`.
//! Role: Explicit structural walk of `access.*`; serde decodes only the leaf records.
//! Invariants: Unknown fields are ignored; absent collections decode as empty.
//! Invariants: Shape mismatches are `Decode` errors naming the path and the JSON type found.
//! Invariants: The expiry is parsed only after the token record decoded structurally.
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::catalog::{CatalogEntry, ServiceCatalog, null_as_default};
use crate::core::error::{Error, ErrorKind};
use crate::core::expiry::parse_expiry;
use crate::core::token::{Tenant, Token};

const ACCESS: &str = "access";
const ACCESS_TOKEN: &str = "access.token";
const ACCESS_SERVICE_CATALOG: &str = "access.serviceCatalog";

#[derive(Deserialize)]
struct TokenRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    id: String,
    expires: String,
    #[serde(default, deserialize_with = "null_as_default")]
    tenant: Tenant,
}

pub fn token_from_body(body: &Value) -> Result<Token, Error> {
    let root = expect_object(Some(body), "response body")?;
    let access = expect_object(root.get(ACCESS), ACCESS)?;
    let token = access
        .get("token")
        .ok_or_else(|| missing(ACCESS_TOKEN, "object"))?;
    expect_object(Some(token), ACCESS_TOKEN)?;

    let record = TokenRecord::deserialize(token).map_err(|err| {
        Error::new(ErrorKind::Decode)
            .with_message(format!("invalid token record: {err}"))
            .with_field(ACCESS_TOKEN)
            .with_source(err)
    })?;

    let expires_at =
        parse_expiry(&record.expires).map_err(|err| err.with_field("access.token.expires"))?;

    tracing::debug!(tenant = %record.tenant.id, "decoded identity token");
    Ok(Token {
        id: record.id,
        expires_at,
        tenant: record.tenant,
    })
}

pub fn catalog_from_body(body: &Value) -> Result<ServiceCatalog, Error> {
    let root = expect_object(Some(body), "response body")?;
    let access = match root.get(ACCESS) {
        None | Some(Value::Null) => return Ok(ServiceCatalog::default()),
        Some(value) => expect_object(Some(value), ACCESS)?,
    };
    let raw_entries = match access.get("serviceCatalog") {
        None | Some(Value::Null) => return Ok(ServiceCatalog::default()),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(mismatch(ACCESS_SERVICE_CATALOG, "array", other)),
    };

    let entries = raw_entries
        .iter()
        .enumerate()
        .map(|(index, raw)| decode_entry(index, raw))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(entries = entries.len(), "decoded service catalog");
    Ok(ServiceCatalog::new(entries))
}

fn decode_entry(index: usize, raw: &Value) -> Result<CatalogEntry, Error> {
    let field = format!("{ACCESS_SERVICE_CATALOG}[{index}]");
    if !raw.is_object() {
        return Err(mismatch(&field, "object", raw));
    }
    CatalogEntry::deserialize(raw).map_err(|err| {
        Error::new(ErrorKind::Decode)
            .with_message(format!("invalid catalog entry: {err}"))
            .with_field(field)
            .with_source(err)
    })
}

fn expect_object<'a>(
    value: Option<&'a Value>,
    field: &str,
) -> Result<&'a Map<String, Value>, Error> {
    match value {
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(mismatch(field, "object", other)),
        None => Err(missing(field, "object")),
    }
}

fn missing(field: &str, expected: &str) -> Error {
    Error::new(ErrorKind::Decode)
        .with_message(format!("expected {expected} at {field}, found nothing"))
        .with_field(field)
}

fn mismatch(field: &str, expected: &str, found: &Value) -> Error {
    Error::new(ErrorKind::Decode)
        .with_message(format!(
            "expected {expected} at {field}, found {}",
            json_type_name(found)
        ))
        .with_field(field)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
