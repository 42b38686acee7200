// src/models/material.rs

/// 拡張仕様 (一部の材料のみ)
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedMetrics {
    pub measurement_range: &'static str,
    pub sensitivity_tolerance: &'static str,
    pub detection_threshold: &'static str,
    pub accuracy: &'static str,
    pub operating_temperature: &'static str,
    pub ip_rating: &'static str,
}

/// 圧電材料
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: &'static str,
    pub category: &'static str,
    pub piezo_coefficient: f64, // d33 (pC/N)
    pub density: f64,           // 密度 (kg/m³)
    pub young_modulus: f64,     // ヤング率 (GPa)
    pub curie: f64,             // キュリー温度 (°C)
    pub extended: Option<ExtendedMetrics>,
}

const fn basic(
    name: &'static str,
    category: &'static str,
    piezo_coefficient: f64,
    density: f64,
    young_modulus: f64,
    curie: f64,
) -> Material {
    Material {
        name,
        category,
        piezo_coefficient,
        density,
        young_modulus,
        curie,
        extended: None,
    }
}

static MATERIALS: [Material; 6] = [
    basic("PZT-5H", "Piezoceramic", 593.0, 7500.0, 60.6, 193.0),
    basic("PZT-4", "Piezoceramic", 289.0, 7600.0, 81.3, 328.0),
    basic("PMN-PT", "Single crystal", 2820.0, 8100.0, 60.0, 130.0),
    basic("BaTiO3", "Ceramic", 191.0, 5700.0, 67.0, 120.0),
    basic("PVDF", "Polymer", 33.0, 1780.0, 2.5, 80.0),
    Material {
        name: "Quartz (Lineas 9195F)",
        category: "Quartz crystal",
        piezo_coefficient: -2.3,
        density: 2650.0,
        young_modulus: 86.6,
        curie: 573.0,
        extended: Some(ExtendedMetrics {
            measurement_range: "0 ... 150 kN",
            sensitivity_tolerance: "±5 %",
            detection_threshold: "< 0.5 N",
            accuracy: "±2 %",
            operating_temperature: "-40 ... +80 °C",
            ip_rating: "IP68",
        }),
    },
];

/// 材料カタログ全体
pub fn materials() -> &'static [Material] {
    &MATERIALS
}

/// 起動時に選択される材料 (カタログの先頭)
pub fn default_material() -> &'static Material {
    &MATERIALS[0]
}

/// 名前で材料を検索する (完全一致)
pub fn find_material(name: &str) -> Option<&'static Material> {
    MATERIALS.iter().find(|m| m.name == name)
}

/// カタログ中の |d33| の最大値に対する比 (0〜1)
pub fn relative_coefficient(material: &Material) -> f64 {
    let max = MATERIALS
        .iter()
        .map(|m| m.piezo_coefficient.abs())
        .fold(0.0, f64::max);
    material.piezo_coefficient.abs() / max
}
