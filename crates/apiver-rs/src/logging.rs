//! Tracing setup

use crate::environment::Environment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the environment's default level. Returns `false` when
/// a subscriber was already installed, in which case nothing changes.
pub fn init_tracing(env: &Environment) -> bool {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(env.default_log_level())),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
