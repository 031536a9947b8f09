// Core modules implementing decoding, endpoint resolution, and error modeling.
pub mod catalog;
pub mod decode;
pub mod error;
pub mod expiry;
pub mod normalize;
pub mod resolve;
pub mod token;
