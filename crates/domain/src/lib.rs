//! dohgate domain layer
pub mod config;
pub mod errors;
pub mod framing;

pub use config::{CliOverrides, Config, UpstreamEndpoint};
pub use errors::GatewayError;
pub use framing::MAX_MESSAGE_SIZE;
