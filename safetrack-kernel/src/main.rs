/**
 * SAFETRACK KERNEL - Point d'entrée principal du serveur flotte
 *
 * RÔLE : Orchestration de tous les modules : config, stores durables,
 * flotte, API REST. Bootstrap du système complet avec gestion d'erreurs.
 *
 * ARCHITECTURE : État flotte en mémoire + stores JSON verrouillés + API REST.
 * UTILITÉ : Backend unique du dashboard de suivi de flotte.
 */

mod auth;
mod config;
mod fleet;
mod http;
mod models;
mod stores;
mod thresholds;

use crate::auth::AuthStore;
use crate::fleet::FleetStore;
use crate::http::AppState;
use crate::stores::alerts::AlertLog;
use crate::stores::routes::RouteHistoryLog;
use crate::stores::thresholds::ThresholdStore;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Charger les variables d'environnement depuis .env (si présent)
    dotenvy::dotenv().ok(); // Ok si .env n'existe pas
    env_logger::init();

    let cfg = config::load_config().await;

    // stores durables (créés vides/avec défauts si absents)
    std::fs::create_dir_all(&cfg.data_dir).unwrap_or_else(|e| {
        log::warn!("[kernel] failed to create data dir: {e}");
    });
    let data_dir = PathBuf::from(&cfg.data_dir);

    let thresholds = match ThresholdStore::new(data_dir.join("config.json")) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::error!("[kernel] failed to open threshold store: {e}");
            std::process::exit(1);
        }
    };
    let alerts = match AlertLog::new(data_dir.join("alerts.json")) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::error!("[kernel] failed to open alert log: {e}");
            std::process::exit(1);
        }
    };
    let routes = match RouteHistoryLog::new(data_dir.join("history.json")) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::error!("[kernel] failed to open route history: {e}");
            std::process::exit(1);
        }
    };
    let auth = match AuthStore::new(data_dir.join("auth.json")) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            log::error!("[kernel] failed to open auth store: {e}");
            std::process::exit(1);
        }
    };

    // flotte fixe, rafraîchie une première fois dès l'init
    let fleet = Arc::new(FleetStore::new(cfg.fleet.clone()));
    if let Err(e) = fleet.initialize(&thresholds, &alerts) {
        log::error!("[kernel] fleet initialization failed: {e}");
        std::process::exit(1);
    }

    // fabrique l'état unique pour Axum
    let app_state = AppState { fleet, thresholds, alerts, routes, auth };

    // HTTP
    let app = http::build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.http.port));
    log::info!("[kernel] listening on http://{addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
