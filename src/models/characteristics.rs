// src/models/characteristics.rs

use crate::config::parameters::{ConstructionParameters, SensorParameters};
use crate::models::circuit::ChargeAmplifier;
use crate::models::construction::{element_gap, element_positions, total_stack_thickness};
use crate::models::material::{relative_coefficient, Material};
use crate::models::sensor::{capacitance, operating_temperature_range, output_voltage, resonant_frequency};

/// 現在の設定から求めた特性値一式 (丸めなし)
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedCharacteristics {
    pub capacitance: f64,                    // pF
    pub resonant_frequency: f64,             // kHz
    pub output_voltage: f64,                 // V
    pub temperature_range: (f64, f64),       // °C
    pub relative_coefficient: f64,           // 0〜1
    pub amplifier: ChargeAmplifier,
    pub stack_thickness: f64,                // mm
    pub element_positions: Vec<f64>,         // m
    pub element_gap: f64,                    // m
}

impl DerivedCharacteristics {
    pub fn compute(
        params: &SensorParameters,
        material: &Material,
        construction: &ConstructionParameters,
    ) -> Self {
        DerivedCharacteristics {
            capacitance: capacitance(material),
            resonant_frequency: resonant_frequency(material, params.length),
            output_voltage: output_voltage(params.sensitivity, params.mechanical_load),
            temperature_range: operating_temperature_range(material),
            relative_coefficient: relative_coefficient(material),
            amplifier: ChargeAmplifier::design(material, params.sensitivity, params.frequency),
            stack_thickness: total_stack_thickness(construction),
            element_positions: element_positions(params.length, construction.piezo_elements),
            element_gap: element_gap(params.length, construction),
        }
    }
}
