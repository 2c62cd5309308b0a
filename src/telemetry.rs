//! Opt-in tracing setup for hosts embedding `chart-bind`.
//!
//! Reconciliation logs through `tracing`; hosts that already install a
//! subscriber can ignore this module.

/// Default filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "chart_bind=info";

/// Installs a compact `tracing` subscriber (requires the `telemetry` feature).
///
/// Returns `false` when the feature is disabled or a global subscriber was
/// already installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Like `init_default_tracing`, falling back to `fallback_filter` instead.
#[must_use]
pub fn init_tracing_with_filter(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
