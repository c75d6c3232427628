use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Configuration for the bot, read once at startup from the environment.
/// UltraMsg instance ID
/// Read from ULTRAMSG_INSTANCE_ID environment variable
pub static ULTRAMSG_INSTANCE_ID: Lazy<String> =
    Lazy::new(|| env::var("ULTRAMSG_INSTANCE_ID").unwrap_or_else(|_| String::new()));

/// UltraMsg API token
/// Read from ULTRAMSG_TOKEN environment variable
pub static ULTRAMSG_TOKEN: Lazy<String> = Lazy::new(|| env::var("ULTRAMSG_TOKEN").unwrap_or_else(|_| String::new()));

/// UltraMsg API base URL
/// Read from ULTRAMSG_API_URL environment variable
/// Overridable so tests can point the sender at a local mock server
pub static ULTRAMSG_API_URL: Lazy<String> =
    Lazy::new(|| env::var("ULTRAMSG_API_URL").unwrap_or_else(|_| "https://api.ultramsg.com".to_string()));

/// Conversation state file path
/// Read from STATE_FILE_PATH environment variable
/// Default: conversation_states.json
pub static STATE_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("STATE_FILE_PATH").unwrap_or_else(|_| "conversation_states.json".to_string()));

/// Sealed/used device catalog document path
/// Read from CATALOG_PATH environment variable
/// Default: produtos_lacrados.json
pub static CATALOG_PATH: Lazy<String> =
    Lazy::new(|| env::var("CATALOG_PATH").unwrap_or_else(|_| "produtos_lacrados.json".to_string()));

/// Repair price list document path
/// Read from REPAIR_PRICES_PATH environment variable
/// Default: reparo_iphones.json
pub static REPAIR_PRICES_PATH: Lazy<String> =
    Lazy::new(|| env::var("REPAIR_PRICES_PATH").unwrap_or_else(|_| "reparo_iphones.json".to_string()));

/// Directory where generated receipts are written
/// Read from RECEIPTS_DIR environment variable
/// Default: receipts
pub static RECEIPTS_DIR: Lazy<String> = Lazy::new(|| env::var("RECEIPTS_DIR").unwrap_or_else(|_| "receipts".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Port for the webhook/control HTTP server
/// Read from WEB_PORT environment variable
/// Default: 5000
pub static WEB_PORT: Lazy<u16> = Lazy::new(|| {
    env::var("WEB_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000)
});

/// Whether the bot starts enabled
/// Read from BOT_ENABLED environment variable
/// Default: false — the operator flips it on via POST /status
pub static BOT_ENABLED: Lazy<bool> = Lazy::new(|| {
    env::var("BOT_ENABLED")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
});

/// Idle sweep configuration
pub mod sweeper {
    use super::Duration;

    /// Interval between sweep cycles (in seconds)
    pub const CHECK_INTERVAL_SECS: u64 = 60;

    /// Inactivity before the warning message is sent (in seconds)
    pub const WARN_AFTER_SECS: i64 = 15 * 60;

    /// Inactivity before the session is closed (in seconds)
    pub const CLOSE_AFTER_SECS: i64 = 30 * 60;

    /// How long a closed/finished record is retained before deletion (in seconds)
    pub const RETENTION_SECS: i64 = 24 * 60 * 60;

    /// Sweep interval duration
    pub fn check_interval() -> Duration {
        Duration::from_secs(CHECK_INTERVAL_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for UltraMsg API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}
