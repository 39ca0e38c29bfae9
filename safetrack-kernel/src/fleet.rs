/**
 * FLEET STORE - État en mémoire de la flotte et rafraîchissement des alertes
 *
 * RÔLE :
 * Ce module détient le snapshot autoritaire de chaque véhicule et maintient
 * son jeu d'alertes à jour. C'est le cœur du kernel : toute lecture d'état
 * passe par un rafraîchissement contre la configuration de seuils courante.
 *
 * FONCTIONNEMENT :
 * - Flotte fixe créée à l'initialisation (ids 1..=n, télémétrie de base)
 * - refresh : lit les seuils, recalcule le jeu d'alertes (remplacé, jamais
 *   accumulé), puis journalise chaque message dans le journal d'alertes
 * - La ré-émission à chaque refresh est volontaire : pas de déduplication
 *   contre les entrées déjà journalisées
 *
 * CONCURRENCE :
 * - La map des véhicules est un domaine d'exclusion unique (Mutex)
 * - Le verrou flotte est relâché avant les appends au journal : chaque
 *   store garde son propre verrou, pas de transaction inter-stores
 */

use crate::config::FleetConf;
use crate::models::{Alert, FleetMap, GpsReading, Vehicle};
use crate::stores::alerts::AlertLog;
use crate::stores::thresholds::ThresholdStore;
use crate::stores::StoreError;
use crate::thresholds::evaluate;
use parking_lot::Mutex;
use time::OffsetDateTime;

pub struct FleetStore {
    vehicles: Mutex<FleetMap>,
    settings: FleetConf,
}

impl FleetStore {
    pub fn new(settings: FleetConf) -> Self {
        Self { vehicles: Mutex::new(FleetMap::new()), settings }
    }

    /// (Ré)initialise la flotte complète : purge puis recréation des ids
    /// fixes avec la télémétrie de base, suivi d'un refresh par véhicule.
    /// Si la config courante est déjà violée par les valeurs de base
    /// (ex: temperature_low très stricte), des alertes partent dès ici.
    pub fn initialize(
        &self,
        thresholds: &ThresholdStore,
        alert_log: &AlertLog,
    ) -> Result<(), StoreError> {
        {
            let mut vehicles = self.vehicles.lock();
            vehicles.clear();
            for id in 1..=self.settings.vehicle_count {
                vehicles.insert(id, self.baseline_vehicle());
            }
        }
        for id in 1..=self.settings.vehicle_count {
            self.refresh(id, thresholds, alert_log)?;
        }
        log::info!("[fleet] initialized {} vehicles", self.settings.vehicle_count);
        Ok(())
    }

    /// Recalcule le jeu d'alertes d'un véhicule contre les seuils courants,
    /// puis journalise chaque message du nouveau jeu (horodaté à l'appel).
    /// Retourne le snapshot rafraîchi.
    pub fn refresh(
        &self,
        id: u32,
        thresholds: &ThresholdStore,
        alert_log: &AlertLog,
    ) -> Result<Vehicle, StoreError> {
        let config = thresholds.get()?;

        let snapshot = {
            let mut vehicles = self.vehicles.lock();
            let vehicle = vehicles.get_mut(&id).ok_or(StoreError::NotFound(id))?;
            vehicle.alerts = evaluate(&config, vehicle);
            vehicle.clone()
        };

        // append après calcul du jeu en mémoire ; un crash entre les deux
        // laisse les deux états indépendamment cohérents
        let now = OffsetDateTime::now_utc().unix_timestamp();
        for message in &snapshot.alerts {
            alert_log.append(Alert {
                vehicle_id: id,
                message: message.clone(),
                timestamp: now,
            })?;
        }

        Ok(snapshot)
    }

    /// Snapshot de toute la flotte, chaque véhicule rafraîchi au préalable
    pub fn get_all(
        &self,
        thresholds: &ThresholdStore,
        alert_log: &AlertLog,
    ) -> Result<FleetMap, StoreError> {
        let ids: Vec<u32> = { self.vehicles.lock().keys().copied().collect() };
        for id in ids {
            self.refresh(id, thresholds, alert_log)?;
        }
        Ok(self.vehicles.lock().clone())
    }

    /// Snapshot d'un véhicule, rafraîchi au préalable ; id inconnu -> NotFound
    pub fn get_one(
        &self,
        id: u32,
        thresholds: &ThresholdStore,
        alert_log: &AlertLog,
    ) -> Result<Vehicle, StoreError> {
        self.refresh(id, thresholds, alert_log)
    }

    fn baseline_vehicle(&self) -> Vehicle {
        Vehicle {
            fuel: self.settings.baseline_fuel,
            temperature: self.settings.baseline_temperature,
            gps: GpsReading {
                latitude: self.settings.origin_latitude,
                longitude: self.settings.origin_longitude,
                speed: 0.0,
            },
            alerts: Vec::new(),
            route: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn set_telemetry(&self, id: u32, fuel: f64, temperature: f64) {
        let mut vehicles = self.vehicles.lock();
        if let Some(vehicle) = vehicles.get_mut(&id) {
            vehicle.fuel = fuel;
            vehicle.temperature = temperature;
        }
    }
}
