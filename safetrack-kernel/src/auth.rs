/**
 * AUTH STORE - Récupération de mot de passe par code de recovery
 *
 * RÔLE :
 * Store externe opaque pour le kernel : le moteur flotte ne le lit jamais.
 * Gère uniquement la mise à jour du mot de passe d'un utilisateur identifié
 * par son code de récupération (flux dashboard "mot de passe oublié").
 *
 * FONCTIONNEMENT :
 * - Stockage en fichier JSON (auth.json), créé vide au démarrage
 * - Verrou propre, volontairement hors du domaine de concurrence flotte
 * - Réécriture intégrale du fichier sous verrou, comme les autres stores
 */

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Enregistrement utilisateur tel que persisté dans auth.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub usr: String,
    pub pwd: String,
    /// Session active côté dashboard (0/1), jamais modifiée ici
    #[serde(default)]
    pub status: i32,
    #[serde(rename = "recoveryCode")]
    pub recovery_code: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Unknown recovery code")]
    UnknownCode,
    #[error("Incomplete recovery payload")]
    Incomplete,
    #[error("Auth storage error: {0}")]
    Storage(String),
}

pub struct AuthStore {
    storage_path: PathBuf,
    lock: Mutex<()>,
}

impl AuthStore {
    /// Crée le store ; fichier initialisé à `[]` s'il n'existe pas encore
    pub fn new<P: Into<PathBuf>>(storage_path: P) -> Result<Self, AuthError> {
        let path = storage_path.into();
        if !path.exists() {
            fs::write(&path, "[]").map_err(|e| AuthError::Storage(e.to_string()))?;
            log::info!("[auth] created empty auth store at {:?}", path);
        }
        Ok(Self { storage_path: path, lock: Mutex::new(()) })
    }

    /// Remplace le mot de passe de l'utilisateur correspondant au code de
    /// récupération. Champs vides -> Incomplete, code inconnu -> UnknownCode.
    pub fn update_password(&self, recovery_code: &str, new_password: &str) -> Result<(), AuthError> {
        if recovery_code.is_empty() || new_password.is_empty() {
            return Err(AuthError::Incomplete);
        }

        let _guard = self.lock.lock();
        let mut users = self.load()?;

        let user = users
            .iter_mut()
            .find(|u| u.recovery_code == recovery_code)
            .ok_or(AuthError::UnknownCode)?;
        user.pwd = new_password.to_string();

        let json = serde_json::to_string_pretty(&users)
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        fs::write(&self.storage_path, json).map_err(|e| AuthError::Storage(e.to_string()))?;
        log::info!("[auth] password updated via recovery code");
        Ok(())
    }

    fn load(&self) -> Result<Vec<AuthUser>, AuthError> {
        let content = fs::read_to_string(&self.storage_path)
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| AuthError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store(dir: &tempfile::TempDir) -> AuthStore {
        let path = dir.path().join("auth.json");
        fs::write(
            &path,
            r#"[{"usr": "admin", "pwd": "old-secret", "status": 0, "recoveryCode": "RC-1234"}]"#,
        )
        .unwrap();
        AuthStore::new(&path).unwrap()
    }

    #[test]
    fn test_update_password_with_valid_code() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir);

        store.update_password("RC-1234", "new-secret").unwrap();

        let content = fs::read_to_string(dir.path().join("auth.json")).unwrap();
        let users: Vec<AuthUser> = serde_json::from_str(&content).unwrap();
        assert_eq!(users[0].pwd, "new-secret");
        assert_eq!(users[0].usr, "admin"); // les autres champs restent intacts
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir);

        assert!(matches!(store.update_password("RC-9999", "x"), Err(AuthError::UnknownCode)));
    }

    #[test]
    fn test_incomplete_payload_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir);

        assert!(matches!(store.update_password("", "x"), Err(AuthError::Incomplete)));
        assert!(matches!(store.update_password("RC-1234", ""), Err(AuthError::Incomplete)));
    }
}
