//! Builds the networked provider from per-invocation routing options.

use fleetplan_core::{
    RoutingBackend, RoutingOptions, TravelTimeError, TravelTimeProvider,
    TravelTimeProviderFactory,
};
use log::debug;

use crate::{HttpTravelTimeProvider, HttpTravelTimeProviderConfig};

/// [`TravelTimeProviderFactory`] producing [`HttpTravelTimeProvider`]s.
///
/// No embedded routing engine is linked, so
/// [`RoutingBackend::Embedded`] is answered with
/// [`TravelTimeError::EmbeddedUnavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpProviderFactory;

impl HttpProviderFactory {
    /// Translate routing options into provider configuration.
    #[must_use]
    pub fn config_for(routing: &RoutingOptions) -> HttpTravelTimeProviderConfig {
        HttpTravelTimeProviderConfig::new(routing.base_url()).with_profile(routing.profile())
    }
}

impl TravelTimeProviderFactory for HttpProviderFactory {
    fn build(
        &self,
        routing: &RoutingOptions,
    ) -> Result<Box<dyn TravelTimeProvider>, TravelTimeError> {
        if routing.backend == RoutingBackend::Embedded {
            return Err(TravelTimeError::EmbeddedUnavailable);
        }
        let config = Self::config_for(routing);
        debug!("Routing through {} with profile {}", config.base_url, config.profile);
        let provider =
            HttpTravelTimeProvider::with_config(config).map_err(|err| TravelTimeError::Setup {
                message: err.to_string(),
            })?;
        Ok(Box::new(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_follows_routing_options() {
        let routing = RoutingOptions {
            address: "10.0.0.7".into(),
            port: "5050".into(),
            profile: Some("truck".into()),
            backend: RoutingBackend::Networked,
        };

        let config = HttpProviderFactory::config_for(&routing);

        assert_eq!(config.base_url, "http://10.0.0.7:5050");
        assert_eq!(config.profile, "truck");
    }

    #[rstest]
    fn networked_backend_builds_a_provider() {
        assert!(HttpProviderFactory.build(&RoutingOptions::default()).is_ok());
    }

    #[rstest]
    fn embedded_backend_is_unavailable() {
        let routing = RoutingOptions {
            backend: RoutingBackend::Embedded,
            ..RoutingOptions::default()
        };

        let Err(err) = HttpProviderFactory.build(&routing) else {
            panic!("embedded routing should be refused");
        };

        assert_eq!(err, TravelTimeError::EmbeddedUnavailable);
    }
}
