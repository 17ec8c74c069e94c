//! Where and how the engine obtains travel times.

/// Routing backend address used when `-a` is absent.
pub const DEFAULT_ROUTING_ADDRESS: &str = "0.0.0.0";
/// Routing backend port used when `-p` is absent.
pub const DEFAULT_ROUTING_PORT: &str = "5000";
/// Profile placed in routing requests when `-m` is absent.
pub const DEFAULT_ROUTING_PROFILE: &str = "car";

/// Which routing backend computes travel times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingBackend {
    /// A routing service reached over the network.
    #[default]
    Networked,
    /// A routing engine linked into the process.
    Embedded,
}

/// Routing settings resolved from the command line.
///
/// # Examples
/// ```
/// use fleetplan_core::RoutingOptions;
///
/// let options = RoutingOptions::default();
/// assert_eq!(options.base_url(), "http://0.0.0.0:5000");
/// assert_eq!(options.profile(), "car");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingOptions {
    /// Host name or address of the routing service.
    pub address: String,
    /// Port of the routing service, kept verbatim.
    pub port: String,
    /// Requested routing profile, if any.
    pub profile: Option<String>,
    /// Selected backend.
    pub backend: RoutingBackend,
}

impl Default for RoutingOptions {
    fn default() -> Self {
        Self {
            address: DEFAULT_ROUTING_ADDRESS.to_owned(),
            port: DEFAULT_ROUTING_PORT.to_owned(),
            profile: None,
            backend: RoutingBackend::default(),
        }
    }
}

impl RoutingOptions {
    /// Base URL of the networked routing service.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.address, self.port)
    }

    /// Profile name to request, falling back to [`DEFAULT_ROUTING_PROFILE`].
    #[must_use]
    pub fn profile(&self) -> &str {
        self.profile.as_deref().unwrap_or(DEFAULT_ROUTING_PROFILE)
    }
}
