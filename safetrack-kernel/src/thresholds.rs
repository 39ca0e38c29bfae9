use crate::models::{ThresholdConfig, Vehicle};

// Messages d'alerte fixes, dans l'ordre d'évaluation
pub const MSG_LOW_FUEL: &str = "low fuel";
pub const MSG_HIGH_TEMPERATURE: &str = "high temperature";
pub const MSG_LOW_TEMPERATURE: &str = "low temperature";

/// Évalue la télémétrie d'un véhicule contre les seuils configurés.
/// Les trois contrôles sont indépendants et non exclusifs ; l'ordre
/// (carburant, temp haute, temp basse) détermine l'ordre des messages.
/// Bornes : `<=` pour le carburant, `>` / `<` stricts pour la température.
pub fn evaluate(config: &ThresholdConfig, vehicle: &Vehicle) -> Vec<String> {
    let mut alerts = Vec::new();

    if vehicle.fuel <= config.fuel_low {
        alerts.push(MSG_LOW_FUEL.to_string());
    }
    if vehicle.temperature > config.temperature_high {
        alerts.push(MSG_HIGH_TEMPERATURE.to_string());
    }
    if vehicle.temperature < config.temperature_low {
        alerts.push(MSG_LOW_TEMPERATURE.to_string());
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GpsReading;

    fn vehicle(fuel: f64, temperature: f64) -> Vehicle {
        Vehicle {
            fuel,
            temperature,
            gps: GpsReading { latitude: 4.0, longitude: -74.0, speed: 0.0 },
            alerts: Vec::new(),
            route: Vec::new(),
        }
    }

    fn config(fuel_low: f64, temperature_high: f64, temperature_low: f64) -> ThresholdConfig {
        ThresholdConfig { fuel_low, temperature_high, temperature_low }
    }

    #[test]
    fn test_fuel_at_threshold_triggers() {
        // borne inclusive pour le carburant
        let alerts = evaluate(&config(10.0, 35.0, 15.0), &vehicle(10.0, 25.0));
        assert_eq!(alerts, vec![MSG_LOW_FUEL]);
    }

    #[test]
    fn test_fuel_above_threshold_is_silent() {
        let alerts = evaluate(&config(10.0, 35.0, 15.0), &vehicle(10.1, 25.0));
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_temperature_bounds_are_strict() {
        // exactement au seuil -> pas d'alerte (comparaisons strictes)
        assert!(evaluate(&config(10.0, 35.0, 15.0), &vehicle(50.0, 35.0)).is_empty());
        assert!(evaluate(&config(10.0, 35.0, 15.0), &vehicle(50.0, 15.0)).is_empty());

        assert_eq!(
            evaluate(&config(10.0, 35.0, 15.0), &vehicle(50.0, 35.5)),
            vec![MSG_HIGH_TEMPERATURE]
        );
        assert_eq!(
            evaluate(&config(10.0, 35.0, 15.0), &vehicle(50.0, 14.5)),
            vec![MSG_LOW_TEMPERATURE]
        );
    }

    #[test]
    fn test_message_order_is_fixed() {
        let alerts = evaluate(&config(10.0, 35.0, 15.0), &vehicle(8.0, 40.0));
        assert_eq!(alerts, vec![MSG_LOW_FUEL, MSG_HIGH_TEMPERATURE]);
    }

    #[test]
    fn test_inverted_thresholds_trigger_both_temperatures() {
        // seuils inversés (haut < bas) : entrée permise, non validée
        let alerts = evaluate(&config(10.0, 10.0, 20.0), &vehicle(50.0, 15.0));
        assert_eq!(alerts, vec![MSG_HIGH_TEMPERATURE, MSG_LOW_TEMPERATURE]);
    }
}
