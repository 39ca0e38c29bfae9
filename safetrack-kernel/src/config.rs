use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub http: HttpConf,
    pub data_dir: String,
    pub fleet: FleetConf,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpConf { pub port: u16 }

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FleetConf {
    /// Taille de la flotte fixe (ids 1..=vehicle_count)
    pub vehicle_count: u32,
    pub baseline_fuel: f64,
    pub baseline_temperature: f64,
    pub origin_latitude: f64,
    pub origin_longitude: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http: HttpConf { port: 3000 },
            data_dir: "./data".into(),
            fleet: FleetConf::default(),
        }
    }
}

impl Default for FleetConf {
    fn default() -> Self {
        Self {
            vehicle_count: 5,
            baseline_fuel: 50.0,
            baseline_temperature: 25.0,
            origin_latitude: 4.0,
            origin_longitude: -74.0,
        }
    }
}

pub async fn load_config() -> ServerConfig {
    let path = std::env::var("SAFETRACK_KERNEL_CONFIG").unwrap_or_else(|_| "safetrack.yaml".into());
    if Path::new(&path).exists() {
        let txt = fs::read_to_string(&path).await.unwrap_or_default();
        if txt.trim().is_empty() { return ServerConfig::default(); }
        serde_yaml::from_str(&txt).unwrap_or_else(|e| {
            log::warn!("[kernel] config invalide: {e}");
            ServerConfig::default()
        })
    } else {
        log::info!("[kernel] pas de safetrack.yaml, usage config par défaut");
        ServerConfig::default()
    }
}
