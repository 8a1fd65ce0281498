//! dohgate HTTP layer: the RFC 8484 surface of the gateway.
pub mod errors;
pub mod handlers;
pub mod query;
pub mod routes;
pub mod state;

pub use routes::create_routes;
pub use state::AppState;
