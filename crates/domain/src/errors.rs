use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    #[error("Invalid 'dns' query parameter: {0}")]
    InvalidQueryEncoding(String),

    #[error("Missing 'dns' query parameter")]
    MissingQueryParameter,

    #[error("No body provided")]
    MissingBody,

    #[error("Content-Length header is required")]
    MissingLengthHeader,

    #[error("Invalid Content-Length header: {0}")]
    InvalidLengthHeader(String),

    #[error("DNS message of {0} bytes exceeds the 65535-byte framing limit")]
    MessageTooLarge(usize),

    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error("Connection to {server} failed: {reason}")]
    ConnectFailed { server: String, reason: String },

    #[error("No response received from DNS server")]
    EmptyUpstreamResponse,

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
