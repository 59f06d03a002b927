use surfcast_aggregate::SurfcastConfig;

/// Holds the configuration for a surfcast web server.
pub struct ServerConfig {
    /// Settings shared with the report builder: endpoints, cache root,
    /// namespaces and the default start IRI.
    pub config: SurfcastConfig,
    /// The IP address or DNS name that the socket binds to.
    pub bind: String,
}
