use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Vehicle {
    pub fuel: f64,
    pub temperature: f64,
    pub gps: GpsReading,
    pub alerts: Vec<String>,
    pub route: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GpsReading { pub latitude: f64, pub longitude: f64, pub speed: f64 }

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Alert {
    pub vehicle_id: u32,
    pub message: String,
    pub timestamp: i64, // secondes epoch, horloge murale (non monotone)
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ThresholdConfig {
    pub fuel_low: f64,
    pub temperature_high: f64,
    pub temperature_low: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self { fuel_low: 10.0, temperature_high: 35.0, temperature_low: 15.0 }
    }
}

pub type FleetMap = HashMap<u32, Vehicle>;
