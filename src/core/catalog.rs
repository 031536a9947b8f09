//! Purpose: In-memory service catalog returned alongside an identity token.
//! Exports: `ServiceCatalog`, `CatalogEntry`, `Endpoint`.
//! Role: Plain data carriers; decoding lives in `core::decode`, selection in `core::resolve`.
//! Invariants: Entry and endpoint order is preserved from the response payload.
//! Invariants: Every endpoint field is optional on the wire; absent or null reads as "".
use serde::{Deserialize, Deserializer, Serialize};

/// A single API endpoint offered by a service.
///
/// Fields the provider does not supply stay empty rather than failing the decode;
/// the meaning of `region` is provider specific.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Endpoint {
    #[serde(rename = "tenantId", default, deserialize_with = "null_as_default")]
    pub tenant_id: String,
    #[serde(rename = "publicURL", default, deserialize_with = "null_as_default")]
    pub public_url: String,
    #[serde(rename = "internalURL", default, deserialize_with = "null_as_default")]
    pub internal_url: String,
    #[serde(rename = "adminURL", default, deserialize_with = "null_as_default")]
    pub admin_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(rename = "versionId", default, deserialize_with = "null_as_default")]
    pub version_id: String,
    #[serde(rename = "versionInfo", default, deserialize_with = "null_as_default")]
    pub version_info: String,
    #[serde(rename = "versionList", default, deserialize_with = "null_as_default")]
    pub version_list: String,
}

/// One class of service (compute, object storage, ...) and all of its endpoints.
///
/// Prefer filtering on `service_type`: `name` is a provider-assigned label and
/// ties lookups to a specific deployment.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct CatalogEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub service_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub endpoints: Vec<Endpoint>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ServiceCatalog {
    entries: Vec<CatalogEntry>,
}

impl ServiceCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::{CatalogEntry, Endpoint, ServiceCatalog};
    use serde_json::json;

    #[test]
    fn endpoint_missing_and_null_fields_read_as_empty() {
        let endpoint: Endpoint = serde_json::from_value(json!({
            "publicURL": "https://dfw.servers.api.example.com/v2/123",
            "adminURL": null,
            "region": "DFW",
            "unexpected": 42
        }))
        .expect("endpoint");
        assert_eq!(endpoint.public_url, "https://dfw.servers.api.example.com/v2/123");
        assert_eq!(endpoint.region, "DFW");
        assert!(endpoint.admin_url.is_empty());
        assert!(endpoint.internal_url.is_empty());
        assert!(endpoint.version_list.is_empty());
    }

    #[test]
    fn endpoint_rejects_non_string_field() {
        let err = serde_json::from_value::<Endpoint>(json!({ "region": 7 })).expect_err("err");
        assert!(err.to_string().contains("invalid type"));
    }

    #[test]
    fn entry_without_endpoints_is_empty() {
        let entry: CatalogEntry =
            serde_json::from_value(json!({ "name": "cloudDNS", "type": "rax:dns" }))
                .expect("entry");
        assert_eq!(entry.service_type, "rax:dns");
        assert!(entry.endpoints.is_empty());

        let entry: CatalogEntry =
            serde_json::from_value(json!({ "type": "rax:dns", "endpoints": null }))
                .expect("entry");
        assert!(entry.endpoints.is_empty());
    }

    #[test]
    fn endpoint_serializes_with_wire_names() {
        let endpoint = Endpoint {
            public_url: "http://x/v1".to_string(),
            region: "ORD".to_string(),
            ..Endpoint::default()
        };
        let value = serde_json::to_value(&endpoint).expect("json");
        assert_eq!(value["publicURL"], "http://x/v1");
        assert_eq!(value["region"], "ORD");
        assert_eq!(value["tenantId"], "");
    }

    #[test]
    fn catalog_preserves_entry_order() {
        let catalog = ServiceCatalog::new(vec![
            CatalogEntry {
                name: "b".to_string(),
                ..CatalogEntry::default()
            },
            CatalogEntry {
                name: "a".to_string(),
                ..CatalogEntry::default()
            },
        ]);
        let names: Vec<_> = catalog.entries().iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
    }
}
