/**
 * STORES SAFETRACK - Persistence JSON des données durables
 *
 * RÔLE :
 * Ce module regroupe les trois stores durables du kernel : le journal
 * d'alertes, l'historique de recorrido par véhicule et la configuration
 * des seuils. Chaque store possède son propre fichier JSON et son propre
 * verrou.
 *
 * FONCTIONNEMENT :
 * - Stockage en fichier JSON (alerts.json, history.json, config.json)
 * - Cycle lecture-modification-écriture entièrement sous verrou : deux
 *   appends concurrents ne peuvent pas s'écraser mutuellement
 * - Fichiers créés vides/avec défauts au démarrage s'ils sont absents
 * - Aucune réparation : un fichier corrompu remonte une erreur typée
 *
 * UTILITÉ DANS SAFETRACK :
 * 🎯 Journal d'alertes : trace durable de toutes les alertes émises
 * 🎯 Historique recorrido : séquence append-only par véhicule
 * 🎯 Seuils : remplacement intégral à chaud depuis le dashboard
 */

pub mod alerts;
pub mod routes;
pub mod thresholds;

/// Erreurs possibles lors des opérations sur les stores durables
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Vehicle not found: {0}")]
    NotFound(u32),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Threshold config error: {0}")]
    Config(String),
}
