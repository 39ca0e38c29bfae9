use super::StoreError;
use crate::models::ThresholdConfig;
use parking_lot::Mutex;
use std::fs;
use std::path::PathBuf;

/// Store de la configuration des seuils (enregistrement unique).
/// Lecture directe du fichier à chaque `get` : une édition externe de
/// config.json prend effet au rafraîchissement suivant, et une corruption
/// remonte immédiatement en ConfigError.
pub struct ThresholdStore {
    /// Chemin du fichier de stockage JSON
    storage_path: PathBuf,
    /// Verrou couvrant lecture et remplacement intégral
    lock: Mutex<()>,
}

impl ThresholdStore {
    /// Crée le store ; fichier initialisé avec les seuils par défaut
    /// (fuel_low 10, temperature_high 35, temperature_low 15) s'il est absent
    pub fn new<P: Into<PathBuf>>(storage_path: P) -> Result<Self, StoreError> {
        let path = storage_path.into();
        if !path.exists() {
            let defaults = serde_json::to_string_pretty(&ThresholdConfig::default())
                .map_err(|e| StoreError::Config(e.to_string()))?;
            fs::write(&path, defaults).map_err(|e| StoreError::Config(e.to_string()))?;
            log::info!("[thresholds] created default threshold config at {:?}", path);
        }
        Ok(Self { storage_path: path, lock: Mutex::new(()) })
    }

    /// Retourne la configuration courante ; enregistrement absent ou
    /// illisible -> ConfigError (pas de valeur de repli ici, le choix
    /// "pas de config" appartient à la bordure HTTP)
    pub fn get(&self) -> Result<ThresholdConfig, StoreError> {
        let _guard = self.lock.lock();
        self.load()
    }

    /// Remplace intégralement l'enregistrement. Un payload vide ou
    /// incomplet est rejeté sans toucher à la configuration précédente :
    /// pas de fusion partielle de champs.
    pub fn replace_value(&self, value: &serde_json::Value) -> Result<ThresholdConfig, StoreError> {
        if value.is_null() || value.as_object().is_some_and(|o| o.is_empty()) {
            return Err(StoreError::InvalidInput("empty threshold payload".to_string()));
        }
        let config: ThresholdConfig = serde_json::from_value(value.clone())
            .map_err(|e| StoreError::InvalidInput(format!("incomplete threshold payload: {e}")))?;

        let _guard = self.lock.lock();
        let json = serde_json::to_string_pretty(&config)
            .map_err(|e| StoreError::Config(e.to_string()))?;
        fs::write(&self.storage_path, json).map_err(|e| StoreError::Config(e.to_string()))?;
        log::info!(
            "[thresholds] replaced config (fuel_low={}, temperature_high={}, temperature_low={})",
            config.fuel_low, config.temperature_high, config.temperature_low
        );
        Ok(config)
    }

    fn load(&self) -> Result<ThresholdConfig, StoreError> {
        let content = fs::read_to_string(&self.storage_path)
            .map_err(|e| StoreError::Config(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| StoreError::Config(e.to_string()))
    }
}
