// src/models/sensor.rs

//! センサ特性の計算
//!
//! すべて閉形式の式で、入力が範囲外や非有限値の場合はパニックせず
//! 非有限値 (inf / NaN) をそのまま返す。

use crate::models::material::Material;

/// 真空の誘電率に相当する係数 (F/m)
pub const EPSILON_SCALE: f64 = 8.85e-12;
/// 公称電極面積 (m²)
pub const PLATE_AREA: f64 = 0.01;
/// 公称素子厚さ (m)
pub const PLATE_THICKNESS: f64 = 0.002;
/// 動作温度の下限 (°C)
pub const MIN_OPERATING_TEMPERATURE: f64 = -40.0;

/// 静電容量 (pF)
pub fn capacitance(material: &Material) -> f64 {
    let epsilon = material.piezo_coefficient * EPSILON_SCALE;
    epsilon * PLATE_AREA / PLATE_THICKNESS * 1e12
}

/// 共振周波数 (kHz)
///
/// # 引数
/// - `material`: 材料
/// - `length`: センサ長 (m)
pub fn resonant_frequency(material: &Material, length: f64) -> f64 {
    let speed = (material.young_modulus * 1e9 / material.density).sqrt();
    speed / (2.0 * length) / 1000.0
}

/// 出力電圧 (V)
pub fn output_voltage(sensitivity: f64, mechanical_load: f64) -> f64 {
    sensitivity * mechanical_load / 1000.0
}

/// 校正曲線上の1点
///
/// 荷重に比例する単純な近似で、物理モデルから導いたものではない。
pub fn calibration_point(load: f64, material: &Material) -> f64 {
    load * material.piezo_coefficient.abs() / 10.0
}

/// 校正曲線 (荷重, 出力) の列
///
/// 拡張仕様を持つ材料のみが対象で、それ以外は `None`。
pub fn calibration_curve(material: &Material, max_load: f64, steps: usize) -> Option<Vec<(f64, f64)>> {
    material.extended.as_ref()?;
    let steps = steps.max(1);
    let curve = (0..=steps)
        .map(|i| {
            let load = max_load * i as f64 / steps as f64;
            (load, calibration_point(load, material))
        })
        .collect();
    Some(curve)
}

/// 動作温度範囲 (°C): 下限は固定値、上限はキュリー温度
pub fn operating_temperature_range(material: &Material) -> (f64, f64) {
    (MIN_OPERATING_TEMPERATURE, material.curie)
}
