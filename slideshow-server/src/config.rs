use std::path::PathBuf;

/// Uploads above this size are rejected with 413.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub struct Config {
    pub listen_addr: String,
    /// Flat directory holding the uploaded photos. It is the only photo inventory.
    pub photos_dir: PathBuf,
    /// JSON document with the slideshow and display settings.
    pub settings_path: PathBuf,
    pub max_upload_bytes: usize,
    /// Comma-separated allowed CORS origins. If empty or "*", allows all origins.
    pub cors_origins: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            photos_dir: std::env::var("PHOTOS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static/photos")),
            settings_path: std::env::var("SLIDESHOW_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("slideshow_config.json")),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            cors_origins: std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        }
    }

    /// Port part of `listen_addr`, used when printing the access URLs.
    pub fn port(&self) -> u16 {
        self.listen_addr
            .rsplit(':')
            .next()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_addr(addr: &str) -> Config {
        Config {
            listen_addr: addr.to_string(),
            photos_dir: PathBuf::from("photos"),
            settings_path: PathBuf::from("settings.json"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cors_origins: "*".to_string(),
        }
    }

    #[test]
    fn test_port_from_listen_addr() {
        assert_eq!(config_with_addr("0.0.0.0:8080").port(), 8080);
        assert_eq!(config_with_addr("[::]:5001").port(), 5001);
    }

    #[test]
    fn test_port_falls_back_to_default() {
        assert_eq!(config_with_addr("localhost").port(), 5000);
    }
}
