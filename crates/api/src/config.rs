//! Application configuration loaded from environment variables.

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `WAREHOUSE_URL` — warehouse service base URL
/// - `DELIVERY_URL` — delivery service base URL
/// - `WAREHOUSE_ADDRESS` — street address of the default warehouse
/// - `ORDER_DB_PATH` — redb database file for order records
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub warehouse_url: String,
    pub delivery_url: String,
    pub warehouse_address: String,
    pub order_db_path: String,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            warehouse_url: std::env::var("WAREHOUSE_URL").unwrap_or(defaults.warehouse_url),
            delivery_url: std::env::var("DELIVERY_URL").unwrap_or(defaults.delivery_url),
            warehouse_address: std::env::var("WAREHOUSE_ADDRESS")
                .unwrap_or(defaults.warehouse_address),
            order_db_path: std::env::var("ORDER_DB_PATH").unwrap_or(defaults.order_db_path),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            warehouse_url: "http://warehouseapi:8081".to_string(),
            delivery_url: "http://deliveryapi:8082".to_string(),
            warehouse_address: "Avenida simpatica de tuquito 123".to_string(),
            order_db_path: "control_tower.redb".to_string(),
            log_level: "info".to_string(),
        }
    }
}
