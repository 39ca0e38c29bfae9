/**
 * API REST SAFETRACK - Serveur HTTP principal du kernel
 *
 * RÔLE :
 * Ce module expose l'API REST consommée par le dashboard flotte.
 * Couche de glue uniquement : tout l'état et toutes les règles vivent
 * dans les stores, les handlers se contentent de mapper les erreurs.
 *
 * FONCTIONNEMENT :
 * - Serveur Axum, routes : /health, /vehicles, /config, /alerts, /routes, /auth
 * - Sérialisation JSON automatique des réponses
 * - CORS permissif (dashboard navigateur servi depuis un autre origin)
 * - Mapping erreurs : NotFound -> 404, InvalidInput -> 400, stores -> 500
 *
 * UTILITÉ DANS SAFETRACK :
 * 🎯 Dashboard temps réel : poll de /vehicles pour la carte et les alertes
 * 🎯 Administration : remplacement des seuils à chaud via POST /config
 * 🎯 Historique : consultation des journaux d'alertes et de recorrido
 */

use crate::auth::{AuthError, AuthStore};
use crate::fleet::FleetStore;
use crate::models::{Alert, FleetMap, ThresholdConfig, Vehicle};
use crate::stores::alerts::AlertLog;
use crate::stores::routes::{RouteHistory, RouteHistoryLog};
use crate::stores::thresholds::ThresholdStore;
use crate::stores::StoreError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub fleet: Arc<FleetStore>,
    pub thresholds: Arc<ThresholdStore>,
    pub alerts: Arc<AlertLog>,
    pub routes: Arc<RouteHistoryLog>,
    pub auth: Arc<AuthStore>,
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/vehicles", get(get_vehicles))
        .route("/vehicles/{id}", get(get_vehicle))
        .route("/config", get(get_config).post(replace_config))
        .route("/alerts", get(get_alerts))
        .route("/routes", get(get_routes))
        .route("/routes/{id}", post(append_route))
        .route("/auth/recover", post(recover_password))
        .with_state(app_state)
        .layer(CorsLayer::permissive())
}

fn error_response(err: StoreError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match &err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        StoreError::Storage(_) | StoreError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() })))
}

// GET /vehicles (snapshot de toute la flotte, rafraîchie)
async fn get_vehicles(
    State(app): State<AppState>,
) -> Result<Json<FleetMap>, (StatusCode, Json<serde_json::Value>)> {
    app.fleet
        .get_all(&app.thresholds, &app.alerts)
        .map(Json)
        .map_err(error_response)
}

// GET /vehicles/{id} (snapshot d'un véhicule, rafraîchi)
async fn get_vehicle(
    State(app): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Vehicle>, (StatusCode, Json<serde_json::Value>)> {
    app.fleet
        .get_one(id, &app.thresholds, &app.alerts)
        .map(Json)
        .map_err(error_response)
}

// GET /config (lecture best-effort : erreur logguée, objet vide en retour)
async fn get_config(State(app): State<AppState>) -> Json<serde_json::Value> {
    match app.thresholds.get() {
        Ok(config) => Json(serde_json::to_value(config).unwrap_or_default()),
        Err(e) => {
            log::warn!("[http] threshold config unreadable: {e}");
            Json(serde_json::json!({}))
        }
    }
}

// POST /config (remplacement intégral, payload partiel rejeté)
async fn replace_config(
    State(app): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let config: ThresholdConfig =
        app.thresholds.replace_value(&payload).map_err(error_response)?;
    Ok(Json(serde_json::json!({
        "message": "threshold configuration updated",
        "config": config,
    })))
}

// GET /alerts (séquence complète, ordre d'insertion)
async fn get_alerts(
    State(app): State<AppState>,
) -> Result<Json<Vec<Alert>>, (StatusCode, Json<serde_json::Value>)> {
    app.alerts.read_all().map(Json).map_err(error_response)
}

// GET /routes (mapping complet id -> séquence)
async fn get_routes(
    State(app): State<AppState>,
) -> Result<Json<RouteHistory>, (StatusCode, Json<serde_json::Value>)> {
    app.routes.read_all().map(Json).map_err(error_response)
}

// POST /routes/{id} (ajout d'une entrée opaque au recorrido du véhicule)
async fn append_route(
    State(app): State<AppState>,
    Path(id): Path<u32>,
    Json(entry): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    app.routes.append_entry(id, entry).map_err(error_response)?;
    Ok(Json(serde_json::json!({ "vehicle_id": id, "status": "created" })))
}

#[derive(Debug, Deserialize)]
struct RecoveryIn {
    #[serde(rename = "recoveryCode", default)]
    recovery_code: String,
    #[serde(rename = "newPassword", default)]
    new_password: String,
}

// POST /auth/recover (mise à jour du mot de passe par code de récupération)
async fn recover_password(
    State(app): State<AppState>,
    Json(payload): Json<RecoveryIn>,
) -> (StatusCode, Json<serde_json::Value>) {
    match app.auth.update_password(&payload.recovery_code, &payload.new_password) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "password updated" })),
        ),
        Err(e) => {
            let status = match &e {
                AuthError::Incomplete => StatusCode::BAD_REQUEST,
                AuthError::UnknownCode => StatusCode::NOT_FOUND,
                AuthError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(serde_json::json!({ "error": e.to_string() })))
        }
    }
}
