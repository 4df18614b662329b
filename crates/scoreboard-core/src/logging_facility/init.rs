//! Global subscriber setup

use std::sync::Once;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Output shape of the global subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Plain text on stderr
    Development,
    /// One JSON object per line on stderr
    Production,
    /// No output; pair with `init_test_capture()`
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is not set
    pub fn default_filter(self) -> &'static str {
        match self {
            Profile::Production => "scoreboard=info",
            Profile::Development | Profile::Test => "scoreboard=debug",
        }
    }
}

static INSTALLED: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Call before opening the database so schema convergence is logged.
/// Only the first call in a process has an effect.
pub fn init(profile: Profile) {
    init_with_filter(profile, profile.default_filter());
}

/// Like [`init`], with an explicit fallback filter; `RUST_LOG` still wins
pub fn init_with_filter(profile: Profile, fallback: &str) {
    INSTALLED.call_once(|| {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(from_env) => from_env,
            Err(_) => EnvFilter::new(fallback),
        };
        let stderr = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter);
        match profile {
            Profile::Development => stderr.init(),
            Profile::Production => stderr.json().init(),
            Profile::Test => tracing_subscriber::registry().init(),
        }
    });
}
