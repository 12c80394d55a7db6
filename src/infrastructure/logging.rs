//! Logging system configuration and initialization
//!
//! Console logging with env-filter control and KST (Korea Standard Time)
//! timestamps. Host applications that need file output install their own
//! subscriber instead of calling this.

use anyhow::{anyhow, Result};
use chrono::{FixedOffset, Utc};
use tracing_subscriber::fmt::{self, time::FormatTime};
use tracing_subscriber::EnvFilter;

/// Time formatter for KST (Korea Standard Time, UTC+9)
struct KstTimeFormatter;

impl FormatTime for KstTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        let kst_offset = FixedOffset::east_opt(9 * 3600).expect("fixed offset in range");
        let kst_time = Utc::now().with_timezone(&kst_offset);
        write!(w, "{}", kst_time.format("%Y-%m-%d %H:%M:%S%.3f %Z"))
    }
}

/// Initialize console logging.
///
/// The filter comes from `RUST_LOG` when set, defaulting to `info`. Fails
/// if a global subscriber is already installed.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(KstTimeFormatter)
        .try_init()
        .map_err(|error| anyhow!("failed to initialize logging: {error}"))
}
