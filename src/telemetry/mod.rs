use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default `info`
/// level.
pub fn init_tracing(service_name: &str) -> Result<(), String> {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::registry()
    .with(env_filter)
    .with(tracing_subscriber::fmt::layer().with_target(true))
    .try_init()
    .map_err(|e| format!("failed to set logger for {}: {}", service_name, e))
}
