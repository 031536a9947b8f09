//! Purpose: Define the stable public Rust API boundary for identity-catalog.
//! Exports: Token and catalog types, the result wrapper, the resolver, and errors.
//! Role: Public, additive-only surface; hides the internal `core` module layout.
//! Invariants: This module is the only public path to decoding and resolution.
//! Invariants: Everything exported here is synchronous and free of I/O.

mod result;
mod service;

pub use crate::core::catalog::{CatalogEntry, Endpoint, ServiceCatalog};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::expiry::{EXPIRY_LAYOUT, format_expiry, parse_expiry};
pub use crate::core::normalize::normalize_url;
pub use crate::core::resolve::{EndpointQuery, Visibility, locate_endpoint, locate_endpoint_url};
pub use crate::core::token::{Tenant, Token};
pub use result::CreateResult;
pub use service::ServiceEndpoint;
