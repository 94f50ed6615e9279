//! Carbon footprint estimator.
//!
//! DESIGN
//! ======
//! A single-pass weighted sum over four input categories. Every reading is
//! accepted as either a JSON number or a string; anything that does not
//! parse to a finite number counts as zero. Results are in tonnes of CO2.

use serde::{Deserialize, Serialize};

/// Diesel combustion factor, kg CO2 per litre.
const DIESEL_KG_PER_LITRE: f64 = 2.3;

const ELECTRICITY_FACTOR: f64 = 0.5;
const GAS_FACTOR: f64 = 2.0;
const HEATING_FACTOR: f64 = 2.5;

const GENERAL_WASTE_FACTOR: f64 = 0.5;
const ORGANIC_WASTE_FACTOR: f64 = 1.2;

const PER_EMPLOYEE_FACTOR: f64 = 2.5;
const BUSINESS_TRAVEL_FACTOR: f64 = 0.3;

/// A numeric form field as submitted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Number(f64),
    Text(String),
}

impl Default for Reading {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Reading {
    #[must_use]
    pub fn value(&self) -> f64 {
        let v = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        };
        if v.is_finite() { v } else { 0.0 }
    }
}

impl From<&str> for Reading {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransportationInput {
    /// Average distance per trip, km.
    pub distance: Reading,
    pub fuel_type: String,
    /// Litres per 100 km.
    pub fuel_consumption: Reading,
    /// Trips per month.
    pub trips: Reading,
}

impl Default for TransportationInput {
    fn default() -> Self {
        Self {
            distance: Reading::default(),
            fuel_type: "diesel".to_owned(),
            fuel_consumption: Reading::default(),
            trips: Reading::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnergyInput {
    /// Monthly kWh.
    pub electricity: Reading,
    pub gas: Reading,
    pub heating: Reading,
    /// Percentage of energy from renewable sources, 0-100.
    pub renewable: Reading,
}

impl Default for EnergyInput {
    fn default() -> Self {
        Self {
            electricity: Reading::default(),
            gas: Reading::default(),
            heating: Reading::default(),
            renewable: Reading::from("0"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WasteInput {
    pub general: Reading,
    pub recyclable: Reading,
    pub organic: Reading,
    pub disposal: String,
}

impl Default for WasteInput {
    fn default() -> Self {
        Self {
            general: Reading::default(),
            recyclable: Reading::default(),
            organic: Reading::default(),
            disposal: "landfill".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OperationsInput {
    pub employees: Reading,
    pub business_travel: Reading,
    pub facilities: Reading,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EstimatorInput {
    pub transportation: TransportationInput,
    pub energy: EnergyInput,
    pub waste: WasteInput,
    pub operations: OperationsInput,
}

/// The estimator's HTML form: every field flat, every value a string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EstimatorForm {
    pub distance: String,
    pub fuel_type: String,
    pub fuel_consumption: String,
    pub trips: String,
    pub electricity: String,
    pub gas: String,
    pub heating: String,
    pub renewable: String,
    pub general: String,
    pub recyclable: String,
    pub organic: String,
    pub disposal: String,
    pub employees: String,
    pub business_travel: String,
    pub facilities: String,
}

impl From<EstimatorForm> for EstimatorInput {
    fn from(form: EstimatorForm) -> Self {
        let defaults = Self::default();
        let or_default = |value: String, default: String| if value.trim().is_empty() { default } else { value };
        Self {
            transportation: TransportationInput {
                distance: Reading::Text(form.distance),
                fuel_type: or_default(form.fuel_type, defaults.transportation.fuel_type),
                fuel_consumption: Reading::Text(form.fuel_consumption),
                trips: Reading::Text(form.trips),
            },
            energy: EnergyInput {
                electricity: Reading::Text(form.electricity),
                gas: Reading::Text(form.gas),
                heating: Reading::Text(form.heating),
                renewable: Reading::Text(form.renewable),
            },
            waste: WasteInput {
                general: Reading::Text(form.general),
                recyclable: Reading::Text(form.recyclable),
                organic: Reading::Text(form.organic),
                disposal: or_default(form.disposal, defaults.waste.disposal),
            },
            operations: OperationsInput {
                employees: Reading::Text(form.employees),
                business_travel: Reading::Text(form.business_travel),
                facilities: Reading::Text(form.facilities),
            },
        }
    }
}

/// Per-category and total emissions, tonnes CO2.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Emissions {
    pub transportation: f64,
    pub energy: f64,
    pub waste: f64,
    pub operations: f64,
    pub total: f64,
}

#[must_use]
pub fn estimate(input: &EstimatorInput) -> Emissions {
    let t = &input.transportation;
    let transportation =
        t.distance.value() * t.fuel_consumption.value() * t.trips.value() * DIESEL_KG_PER_LITRE / 1000.0;

    let e = &input.energy;
    let energy = (e.electricity.value() * ELECTRICITY_FACTOR
        + e.gas.value() * GAS_FACTOR
        + e.heating.value() * HEATING_FACTOR)
        * (1.0 - e.renewable.value() / 100.0);

    let w = &input.waste;
    let waste = w.general.value() * GENERAL_WASTE_FACTOR + w.organic.value() * ORGANIC_WASTE_FACTOR;

    let o = &input.operations;
    let operations = o.employees.value() * PER_EMPLOYEE_FACTOR + o.business_travel.value() * BUSINESS_TRAVEL_FACTOR;

    Emissions { transportation, energy, waste, operations, total: transportation + energy + waste + operations }
}

#[cfg(test)]
#[path = "estimator_test.rs"]
mod tests;
