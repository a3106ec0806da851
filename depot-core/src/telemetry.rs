use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{CoreError, CoreResult};

pub const DEFAULT_FILTER: &str = "depot_catalog=info,depot_analytics=info";

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set. Fails if a global
/// subscriber is already installed, which callers that may run twice
/// (tests) can ignore.
pub fn init_tracing(default_filter: &str) -> CoreResult<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| CoreError::Telemetry(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_reported_not_fatal() {
        // Ignored: another test may already own the global subscriber.
        let _ = init_tracing(DEFAULT_FILTER);
        let second = init_tracing(DEFAULT_FILTER);

        assert!(matches!(second, Err(CoreError::Telemetry(_))));
    }
}
