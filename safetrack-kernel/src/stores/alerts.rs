use super::StoreError;
use crate::models::Alert;
use parking_lot::Mutex;
use std::fs;
use std::path::PathBuf;

/// Journal d'alertes durable, partagé entre tous les véhicules.
/// Append-only : les entrées existantes ne sont jamais modifiées ni retirées.
pub struct AlertLog {
    /// Chemin du fichier de stockage JSON
    storage_path: PathBuf,
    /// Verrou couvrant le cycle lecture-ajout-écriture complet
    lock: Mutex<()>,
}

impl AlertLog {
    /// Crée le journal ; fichier initialisé à `[]` s'il n'existe pas encore
    pub fn new<P: Into<PathBuf>>(storage_path: P) -> Result<Self, StoreError> {
        let path = storage_path.into();
        if !path.exists() {
            fs::write(&path, "[]").map_err(|e| StoreError::Storage(e.to_string()))?;
            log::info!("[alerts] created empty alert log at {:?}", path);
        }
        Ok(Self { storage_path: path, lock: Mutex::new(()) })
    }

    /// Ajoute une entrée de manière durable. Atomique vis-à-vis des appends
    /// concurrents : tout le cycle se déroule sous le verrou du store.
    pub fn append(&self, alert: Alert) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let mut alerts = self.load()?;
        alerts.push(alert);
        let json = serde_json::to_string_pretty(&alerts)
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        fs::write(&self.storage_path, json).map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Retourne la séquence complète dans l'ordre d'insertion
    pub fn read_all(&self) -> Result<Vec<Alert>, StoreError> {
        let _guard = self.lock.lock();
        self.load()
    }

    fn load(&self) -> Result<Vec<Alert>, StoreError> {
        let content = fs::read_to_string(&self.storage_path)
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| StoreError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn alert(vehicle_id: u32, message: &str) -> Alert {
        Alert { vehicle_id, message: message.to_string(), timestamp: 1_700_000_000 }
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let alert_log = AlertLog::new(dir.path().join("alerts.json")).unwrap();

        alert_log.append(alert(1, "low fuel")).unwrap();
        alert_log.append(alert(2, "high temperature")).unwrap();
        alert_log.append(alert(1, "low temperature")).unwrap();

        let entries = alert_log.read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "low fuel");
        assert_eq!(entries[1].vehicle_id, 2);
        assert_eq!(entries[2].message, "low temperature");
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let alert_log = Arc::new(AlertLog::new(dir.path().join("alerts.json")).unwrap());

        let mut handles = Vec::new();
        for worker in 0..8u32 {
            let alert_log = alert_log.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..5 {
                    alert_log.append(alert(worker, &format!("message {i}"))).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        // 8 threads x 5 appends : aucune entrée perdue ni dupliquée
        assert_eq!(alert_log.read_all().unwrap().len(), 40);
    }

    #[test]
    fn test_corrupted_file_surfaces_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerts.json");
        let alert_log = AlertLog::new(&path).unwrap();

        fs::write(&path, "{not json").unwrap();

        assert!(matches!(alert_log.read_all(), Err(StoreError::Storage(_))));
        assert!(matches!(alert_log.append(alert(1, "low fuel")), Err(StoreError::Storage(_))));
    }
}
