//! Purpose: Turn a resolved catalog URL into a base for composing service request URLs.
//! Exports: `ServiceEndpoint`.
//! Role: Thin `url::Url` wrapper layered on the resolver; performs no requests.
//! Invariants: The base always uses http(s) and its path ends with `/`.
//! Invariants: An unconfigured (empty) catalog URL is rejected here, not in the resolver.
use url::Url;

use crate::core::catalog::ServiceCatalog;
use crate::core::error::{Error, ErrorKind};
use crate::core::resolve::{EndpointQuery, locate_endpoint_url};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServiceEndpoint {
    base_url: Url,
}

impl ServiceEndpoint {
    pub fn locate(catalog: &ServiceCatalog, query: &EndpointQuery) -> Result<Self, Error> {
        let raw = locate_endpoint_url(catalog, query)?;
        Self::parse(&raw).map_err(|err| {
            err.with_hint(format!(
                "The catalog lists a {} endpoint for {:?} without a usable URL.",
                query.visibility, query.service_type
            ))
        })
    }

    pub fn parse(raw: &str) -> Result<Self, Error> {
        if raw.is_empty() {
            return Err(Error::new(ErrorKind::InvalidUrl).with_message("endpoint url is empty"));
        }
        let mut base_url = Url::parse(raw).map_err(|err| {
            Error::new(ErrorKind::InvalidUrl)
                .with_message(format!("invalid endpoint url {raw:?}"))
                .with_source(err)
        })?;
        let scheme = base_url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(Error::new(ErrorKind::InvalidUrl)
                .with_message(format!("endpoint url must use http or https scheme: {raw:?}")));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        base_url.set_fragment(None);
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    /// No segments yields the base unchanged.
    pub fn service_url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        if !segments.is_empty() {
            let mut path = url.path_segments_mut().map_err(|_| {
                Error::new(ErrorKind::InvalidUrl).with_message("endpoint url cannot be a base")
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceEndpoint;
    use crate::core::catalog::{CatalogEntry, Endpoint, ServiceCatalog};
    use crate::core::error::ErrorKind;
    use crate::core::resolve::EndpointQuery;

    fn catalog() -> ServiceCatalog {
        ServiceCatalog::new(vec![CatalogEntry {
            name: "cloudServersOpenStack".to_string(),
            service_type: "compute".to_string(),
            endpoints: vec![Endpoint {
                region: "DFW".to_string(),
                public_url: "https://dfw.servers.api.example.com/v2/123".to_string(),
                ..Endpoint::default()
            }],
        }])
    }

    #[test]
    fn locate_builds_normalized_base() {
        let endpoint = ServiceEndpoint::locate(&catalog(), &EndpointQuery::new("compute"))
            .expect("endpoint");
        assert_eq!(
            endpoint.base_url().as_str(),
            "https://dfw.servers.api.example.com/v2/123/"
        );
    }

    #[test]
    fn service_url_appends_segments() {
        let endpoint = ServiceEndpoint::parse("http://x/v2/t/").expect("endpoint");
        let url = endpoint.service_url(&["servers", "detail"]).expect("url");
        assert_eq!(url.as_str(), "http://x/v2/t/servers/detail");

        let url = endpoint.service_url(&["servers", "a b"]).expect("url");
        assert_eq!(url.as_str(), "http://x/v2/t/servers/a%20b");

        let url = endpoint.service_url(&[]).expect("url");
        assert_eq!(url.as_str(), "http://x/v2/t/");
        assert_eq!(&url, endpoint.base_url());
    }

    #[test]
    fn unconfigured_url_is_rejected() {
        let err = ServiceEndpoint::locate(
            &catalog(),
            &EndpointQuery::new("compute").with_visibility("admin"),
        )
        .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::InvalidUrl);
        assert!(err.hint().is_some());
    }

    #[test]
    fn resolver_errors_pass_through() {
        let err = ServiceEndpoint::locate(&catalog(), &EndpointQuery::new("dns")).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::EndpointNotFound);
    }

    #[test]
    fn parse_rejects_non_http_schemes() {
        let err = ServiceEndpoint::parse("ftp://files.example.com/").expect_err("err");
        assert_eq!(err.kind(), ErrorKind::InvalidUrl);
        let err = ServiceEndpoint::parse("not a url").expect_err("err");
        assert_eq!(err.kind(), ErrorKind::InvalidUrl);
    }
}
