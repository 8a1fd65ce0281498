//! dohgate infrastructure layer: the TCP leg of the gateway.
pub mod dns;
