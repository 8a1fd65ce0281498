pub mod forward;
pub mod relay;
pub mod upstream;

pub use forward::forward_query;
pub use relay::{relay_response, RelayStream};
pub use upstream::connect;
