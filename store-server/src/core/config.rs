//! Server configuration

/// Server configuration - all tunables of the store backend
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/slicecrafter | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP service port |
/// | ENVIRONMENT | development | Runtime environment |
/// | RAZORPAY_KEY_ID | (empty) | Payment gateway key id |
/// | RAZORPAY_KEY_SECRET | (empty) | Payment gateway key secret |
/// | RAZORPAY_BASE_URL | https://api.razorpay.com | Payment gateway base URL |
/// | RESEND_API_KEY | (empty) | Mail delivery API key |
/// | ALERT_FROM_ADDRESS | SliceCrafter Alerts <onboarding@resend.dev> | Alert sender |
/// | LOG_DIR | (none) | Optional directory for rolling log files |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API service port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,

    // === Payment gateway ===
    pub razorpay_key_id: String,
    pub razorpay_key_secret: String,
    pub razorpay_base_url: String,

    // === Alert delivery ===
    pub resend_api_key: String,
    pub alert_from_address: String,

    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/slicecrafter".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            razorpay_key_id: std::env::var("RAZORPAY_KEY_ID").unwrap_or_default(),
            razorpay_key_secret: std::env::var("RAZORPAY_KEY_SECRET").unwrap_or_default(),
            razorpay_base_url: std::env::var("RAZORPAY_BASE_URL")
                .unwrap_or_else(|_| "https://api.razorpay.com".into()),
            resend_api_key: std::env::var("RESEND_API_KEY").unwrap_or_default(),
            alert_from_address: std::env::var("ALERT_FROM_ADDRESS")
                .unwrap_or_else(|_| "SliceCrafter Alerts <onboarding@resend.dev>".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
