use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
const FILTER_ENV: &str = "QUERN_LOG";

/// Installs a console subscriber filtered by `QUERN_LOG` (default `info`).
///
/// Returns false if a global subscriber is already set.
pub fn init_tracing() -> bool {
	let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(true)
		.try_init()
		.is_ok()
}
