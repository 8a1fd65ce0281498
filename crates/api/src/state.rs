use dohgate_domain::config::UpstreamEndpoint;
use dohgate_domain::Config;

#[derive(Clone)]
pub struct AppState {
    /// Process-wide default resolver. Never mutated; per-request overrides
    /// are derived from it with the request path's host.
    pub upstream: UpstreamEndpoint,
    /// Redirect target for `/`.
    pub homepage: String,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            upstream: config.upstream.endpoint(),
            homepage: config.server.homepage.clone(),
        }
    }
}
