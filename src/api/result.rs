//! Purpose: Deferred outcome of an authentication call, decoded on demand.
//! Exports: `CreateResult`.
//! Role: Boundary between the transport collaborator and the decoders in `core::decode`.
//! Invariants: A captured error short-circuits every decode and is returned unchanged.
//! Invariants: Decoding borrows the payload, so token and catalog can both be read from one result.
use serde_json::Value;

use crate::core::catalog::ServiceCatalog;
use crate::core::decode::{catalog_from_body, token_from_body};
use crate::core::error::{Error, ErrorKind};
use crate::core::token::Token;

/// Either the raw response body of a successful authentication, or the error
/// the upstream call failed with.
///
/// Use [`CreateResult::extract_token`] and [`CreateResult::extract_service_catalog`]
/// to interpret the body.
#[derive(Clone, Debug)]
pub enum CreateResult {
    Ok(Value),
    Err(Error),
}

impl CreateResult {
    pub fn from_body(body: Value) -> Self {
        Self::Ok(body)
    }

    pub fn from_error(err: Error) -> Self {
        Self::Err(err)
    }

    /// Parses raw response text; malformed JSON is captured as a `Decode` error.
    pub fn from_json_str(body: &str) -> Self {
        match serde_json::from_str(body) {
            Ok(value) => Self::Ok(value),
            Err(err) => Self::Err(
                Error::new(ErrorKind::Decode)
                    .with_message("invalid response json")
                    .with_source(err),
            ),
        }
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    pub fn body(&self) -> Result<&Value, Error> {
        match self {
            Self::Ok(body) => Ok(body),
            Self::Err(err) => Err(err.clone()),
        }
    }

    pub fn extract_token(&self) -> Result<Token, Error> {
        token_from_body(self.body()?)
    }

    pub fn extract_service_catalog(&self) -> Result<ServiceCatalog, Error> {
        catalog_from_body(self.body()?)
    }
}

impl From<Result<Value, Error>> for CreateResult {
    fn from(result: Result<Value, Error>) -> Self {
        match result {
            Ok(body) => Self::Ok(body),
            Err(err) => Self::Err(err),
        }
    }
}
