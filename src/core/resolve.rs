//! Purpose: Pick exactly one catalog endpoint for a query and return its URL.
//! Exports: `EndpointQuery`, `Visibility`, `locate_endpoint`, `locate_endpoint_url`.
//! Role: Pure selection over a borrowed `ServiceCatalog`; never caches or mutates it.
//! Invariants: Filters compose as type AND name AND region; empty name/region mean "any".
//! Invariants: Zero matches is `EndpointNotFound`; several is `AmbiguousEndpoint`, never "first wins".
//! Invariants: Visibility is validated only after a unique endpoint was found.
use std::fmt;

use crate::core::catalog::{CatalogEntry, Endpoint, ServiceCatalog};
use crate::core::error::{Error, ErrorKind};
use crate::core::normalize::normalize_url;

/// Which URL of an endpoint a caller wants.
///
/// Parsing text never fails; unknown values are kept as `Unrecognized` and
/// rejected by the resolver once an endpoint has been selected.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Visibility {
    #[default]
    Public,
    Internal,
    Admin,
    Unrecognized(String),
}

impl Visibility {
    pub fn parse(value: &str) -> Self {
        match value {
            "public" => Self::Public,
            "internal" => Self::Internal,
            "admin" => Self::Admin,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Admin => "admin",
            Self::Unrecognized(value) => value,
        }
    }
}

impl From<&str> for Visibility {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selection criteria for a single endpoint.
///
/// `service_type` is required. `name` and `region` narrow the search when set;
/// an empty string leaves that filter off.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EndpointQuery {
    pub service_type: String,
    pub name: String,
    pub region: String,
    pub visibility: Visibility,
}

impl EndpointQuery {
    pub fn new(service_type: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_visibility(mut self, visibility: impl Into<Visibility>) -> Self {
        self.visibility = visibility.into();
        self
    }

    fn describe(&self) -> String {
        let mut out = format!("type {:?}", self.service_type);
        if !self.name.is_empty() {
            out.push_str(&format!(", name {:?}", self.name));
        }
        if !self.region.is_empty() {
            out.push_str(&format!(", region {:?}", self.region));
        }
        out
    }
}

pub fn locate_endpoint<'a>(
    catalog: &'a ServiceCatalog,
    query: &EndpointQuery,
) -> Result<&'a Endpoint, Error> {
    let entries = entries_matching(catalog.entries(), query);
    let matches: Vec<&'a Endpoint> = endpoints_in_region(entries, &query.region).collect();
    single_endpoint(&matches, query)
}

pub fn locate_endpoint_url(catalog: &ServiceCatalog, query: &EndpointQuery) -> Result<String, Error> {
    let endpoint = locate_endpoint(catalog, query)?;
    let url = select_url(endpoint, &query.visibility)?;
    tracing::debug!(
        service_type = %query.service_type,
        region = %endpoint.region,
        visibility = %query.visibility,
        "resolved catalog endpoint"
    );
    Ok(normalize_url(url))
}

fn entries_matching<'a>(
    entries: &'a [CatalogEntry],
    query: &EndpointQuery,
) -> impl Iterator<Item = &'a CatalogEntry> {
    entries.iter().filter(move |entry| {
        entry.service_type == query.service_type
            && (query.name.is_empty() || entry.name == query.name)
    })
}

fn endpoints_in_region<'a>(
    entries: impl Iterator<Item = &'a CatalogEntry>,
    region: &str,
) -> impl Iterator<Item = &'a Endpoint> {
    entries
        .flat_map(|entry| entry.endpoints.iter())
        .filter(move |endpoint| region.is_empty() || endpoint.region == region)
}

fn single_endpoint<'a>(
    matches: &[&'a Endpoint],
    query: &EndpointQuery,
) -> Result<&'a Endpoint, Error> {
    match matches {
        [] => Err(Error::new(ErrorKind::EndpointNotFound)
            .with_message(format!("no catalog endpoint matches {}", query.describe()))),
        [endpoint] => Ok(*endpoint),
        many => Err(Error::new(ErrorKind::AmbiguousEndpoint)
            .with_message(format!(
                "discovered {} matching endpoints for {}",
                many.len(),
                query.describe()
            ))
            .with_hint("Add a service name or region to the query to select one endpoint.")
            .with_matches(many.iter().map(|endpoint| (*endpoint).clone()).collect())),
    }
}

fn select_url<'a>(endpoint: &'a Endpoint, visibility: &Visibility) -> Result<&'a str, Error> {
    match visibility {
        Visibility::Public => Ok(endpoint.public_url.as_str()),
        Visibility::Internal => Ok(endpoint.internal_url.as_str()),
        Visibility::Admin => Ok(endpoint.admin_url.as_str()),
        Visibility::Unrecognized(value) => Err(Error::new(ErrorKind::InvalidVisibility)
            .with_message(format!("unexpected visibility in endpoint query: {value:?}"))
            .with_hint("Use one of: public, internal, admin.")),
    }
}
