// src/models/circuit.rs

use std::f64::consts::PI;

use crate::models::material::Material;
use crate::models::sensor::{capacitance, output_voltage};

/// 回路図の出力電圧を評価する基準荷重 (N)
pub const REFERENCE_LOAD: f64 = 100.0;
/// 帯域の下限 (Hz)
pub const BANDWIDTH_LOWER_HZ: f64 = 0.1;

/// ローパスフィルタ段の入力抵抗 R1 (kΩ)
pub const FILTER_R1_KOHM: f64 = 10.0;
/// ローパスフィルタ段の帰還抵抗 R2 (kΩ)
pub const FILTER_R2_KOHM: f64 = 10.0;
/// ローパスフィルタ段のコンデンサ C1 (nF)
pub const FILTER_C1_NF: f64 = 10.0;
/// ローパスフィルタ段のコンデンサ C2 (nF)
pub const FILTER_C2_NF: f64 = 4.7;
/// 出力段の帰還抵抗 (kΩ)
pub const OUTPUT_FEEDBACK_KOHM: f64 = 10.0;

/// チャージアンプの帰還容量 (pF)
///
/// 素子の静電容量と同じ式を用いる。
pub fn charge_amplifier_feedback_capacitance(material: &Material) -> f64 {
    capacitance(material)
}

/// 帰還抵抗 (MΩ)
///
/// # 引数
/// - `frequency`: 下限カットオフを合わせる周波数 (Hz)
/// - `feedback_capacitance`: 帰還容量 (pF)
///
/// # 戻り値
/// - 1 / (2π f Cf) を MΩ 単位で返す。`frequency` が 0 の場合は `inf`。
pub fn feedback_resistor(frequency: f64, feedback_capacitance: f64) -> f64 {
    1.0 / (2.0 * PI * frequency * feedback_capacitance * 1e-12) / 1e6
}

/// 素子の漏れ抵抗 (GΩ)
pub fn leakage_resistance(feedback_resistor_mohm: f64) -> f64 {
    feedback_resistor_mohm * 100.0
}

/// 出力段の利得 (倍)
pub fn gain(sensitivity: f64) -> f64 {
    sensitivity * 0.1
}

/// 利得設定抵抗 (kΩ)
///
/// 出力段の帰還抵抗との比で利得が決まる。
pub fn gain_resistor(gain: f64) -> f64 {
    OUTPUT_FEEDBACK_KOHM / gain
}

/// 基準荷重における回路出力電圧 (V)
pub fn schematic_output_voltage(sensitivity: f64) -> f64 {
    output_voltage(sensitivity, REFERENCE_LOAD)
}

/// ローパスフィルタのカットオフ周波数 (Hz)
pub fn lowpass_cutoff() -> f64 {
    1.0 / (2.0 * PI * FILTER_R1_KOHM * 1e3 * FILTER_C1_NF * 1e-9)
}

/// 信号経路の帯域
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bandwidth {
    pub lower_hz: f64,
    pub upper_khz: f64,
}

/// 励振周波数から帯域を求める
pub fn bandwidth(frequency: f64) -> Bandwidth {
    Bandwidth {
        lower_hz: BANDWIDTH_LOWER_HZ,
        upper_khz: frequency * 1.5 / 1000.0,
    }
}

/// チャージアンプ回路の部品定数
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeAmplifier {
    pub feedback_capacitance: f64, // pF
    pub feedback_resistor: f64,    // MΩ
    pub leakage_resistance: f64,   // GΩ
    pub gain: f64,                 // 倍
    pub gain_resistor: f64,        // kΩ
    pub output_voltage: f64,       // V (基準荷重時)
    pub bandwidth: Bandwidth,
}

impl ChargeAmplifier {
    pub fn design(material: &Material, sensitivity: f64, frequency: f64) -> Self {
        let cf = charge_amplifier_feedback_capacitance(material);
        let rf = feedback_resistor(frequency, cf);
        let g = gain(sensitivity);
        ChargeAmplifier {
            feedback_capacitance: cf,
            feedback_resistor: rf,
            leakage_resistance: leakage_resistance(rf),
            gain: g,
            gain_resistor: gain_resistor(g),
            output_voltage: schematic_output_voltage(sensitivity),
            bandwidth: bandwidth(frequency),
        }
    }
}

/// 部品表の1行
#[derive(Debug, Clone, PartialEq)]
pub struct BomItem {
    pub reference: &'static str,
    pub part: String,
    pub quantity: u32,
    pub description: &'static str,
}

fn bom_item(reference: &'static str, part: impl Into<String>, quantity: u32, description: &'static str) -> BomItem {
    BomItem {
        reference,
        part: part.into(),
        quantity,
        description,
    }
}

/// 部品表 (BOM)
pub fn bill_of_materials(amplifier: &ChargeAmplifier, material: &Material, piezo_elements: u32) -> Vec<BomItem> {
    vec![
        bom_item("U1", "INA116 / AD8615", 1, "Charge amplifier"),
        bom_item("U2", "OPA2277", 1, "Low-pass filter + output gain"),
        bom_item("U3", "ADS1256", 1, "24-bit ADC"),
        bom_item("U4", "REF2025", 1, "2.5 V reference"),
        bom_item("Cf", format!("{:.1} pF / C0G", amplifier.feedback_capacitance), 1, "Charge amplifier feedback"),
        bom_item("Rf", format!("{:.2} MOhm", amplifier.feedback_resistor), 1, "Feedback discharge"),
        bom_item("R1", format!("{} kOhm 0.1%", FILTER_R1_KOHM), 1, "Low-pass filter input"),
        bom_item("R2", format!("{} kOhm 0.1%", FILTER_R2_KOHM), 1, "Low-pass filter feedback"),
        bom_item("C1", format!("{} nF / C0G", FILTER_C1_NF), 1, "Low-pass filter"),
        bom_item("C2", format!("{} nF / C0G", FILTER_C2_NF), 1, "Low-pass filter"),
        bom_item("Rg1", format!("{:.1} kOhm 0.1%", amplifier.gain_resistor), 1, "Output gain set"),
        bom_item("Rg2", format!("{} kOhm 0.1%", OUTPUT_FEEDBACK_KOHM), 1, "Output stage feedback"),
        bom_item("PZ", material.name, piezo_elements, "Piezo elements"),
    ]
}
