use super::StoreError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Historique de recorrido : id véhicule -> séquence append-only d'entrées
/// opaques (payload JSON fourni par l'appelant, jamais interprété ici)
pub type RouteHistory = HashMap<u32, Vec<serde_json::Value>>;

/// Journal durable du recorrido, indexé par véhicule.
/// La séquence d'un id est créée au premier append ; aucun contrôle contre
/// la flotte en mémoire (un id inconnu crée simplement sa séquence).
pub struct RouteHistoryLog {
    /// Chemin du fichier de stockage JSON
    storage_path: PathBuf,
    /// Verrou couvrant le cycle lecture-ajout-écriture complet
    lock: Mutex<()>,
}

impl RouteHistoryLog {
    /// Crée le journal ; fichier initialisé à `{}` s'il n'existe pas encore
    pub fn new<P: Into<PathBuf>>(storage_path: P) -> Result<Self, StoreError> {
        let path = storage_path.into();
        if !path.exists() {
            fs::write(&path, "{}").map_err(|e| StoreError::Storage(e.to_string()))?;
            log::info!("[routes] created empty route history at {:?}", path);
        }
        Ok(Self { storage_path: path, lock: Mutex::new(()) })
    }

    /// Ajoute une entrée à la séquence du véhicule, sous verrou.
    /// Sémantique d'atomicité identique au journal d'alertes.
    pub fn append_entry(&self, vehicle_id: u32, entry: serde_json::Value) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let mut history = self.load()?;
        history.entry(vehicle_id).or_default().push(entry);
        let json = serde_json::to_string_pretty(&history)
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        fs::write(&self.storage_path, json).map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Retourne le mapping complet id -> séquence
    pub fn read_all(&self) -> Result<RouteHistory, StoreError> {
        let _guard = self.lock.lock();
        self.load()
    }

    fn load(&self) -> Result<RouteHistory, StoreError> {
        let content = fs::read_to_string(&self.storage_path)
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| StoreError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_append_creates_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let route_log = RouteHistoryLog::new(dir.path().join("history.json")).unwrap();

        assert!(route_log.read_all().unwrap().is_empty());

        route_log.append_entry(3, json!({"latitude": 4.1, "longitude": -74.2})).unwrap();

        let history = route_log.read_all().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[&3].len(), 1);
    }

    #[test]
    fn test_append_preserves_order_per_vehicle() {
        let dir = tempfile::tempdir().unwrap();
        let route_log = RouteHistoryLog::new(dir.path().join("history.json")).unwrap();

        for i in 0..4 {
            route_log.append_entry(1, json!({"seq": i})).unwrap();
        }
        route_log.append_entry(2, json!({"seq": "other"})).unwrap();

        let history = route_log.read_all().unwrap();
        let seqs: Vec<i64> = history[&1].iter().map(|e| e["seq"].as_i64().unwrap()).collect();
        assert_eq!(seqs, vec![0, 1, 2, 3]);
        assert_eq!(history[&2].len(), 1);
    }

    #[test]
    fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        {
            let route_log = RouteHistoryLog::new(&path).unwrap();
            route_log.append_entry(5, json!({"stop": "depot"})).unwrap();
        }

        let reopened = RouteHistoryLog::new(&path).unwrap();
        assert_eq!(reopened.read_all().unwrap()[&5][0]["stop"], "depot");
    }

    #[test]
    fn test_corrupted_file_surfaces_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let route_log = RouteHistoryLog::new(&path).unwrap();

        fs::write(&path, "[]").unwrap(); // mauvais type racine

        assert!(matches!(route_log.read_all(), Err(StoreError::Storage(_))));
    }
}
