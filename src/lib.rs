//! Purpose: Library crate for interpreting identity-service authentication responses.
//! Exports: `api` (token/catalog decoding, endpoint resolution, errors).
//! Role: Backs the `idcat` CLI and is consumed by HTTP clients that own the transport.
//! Invariants: No I/O, no global state; every operation is a pure function of its inputs.
//! Invariants: `core` stays private; `api` is the public surface.
pub mod api;
mod core;
