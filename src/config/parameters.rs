// src/config/parameters.rs

use serde::{Deserialize, Serialize};

use crate::error::DesignError;

/// 長さの範囲 (m)
pub const LENGTH_RANGE: (f64, f64) = (1.5, 2.5);
/// 周波数の範囲 (Hz)
pub const FREQUENCY_RANGE: (f64, f64) = (100.0, 10000.0);
/// 感度の範囲 (pC/N)
pub const SENSITIVITY_RANGE: (f64, f64) = (10.0, 100.0);

/// センサの基本パラメータ
///
/// 範囲付きの値 (長さ・周波数・感度) は `set_*` 経由で更新するとクランプされる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SensorParameters {
    pub length: f64,           // センサ長 (m)
    pub frequency: f64,        // 励振周波数 (Hz)
    pub sensitivity: f64,      // 感度 (pC/N)
    pub nonlinearity: f64,     // 非直線性 (%)
    pub temp_coefficient: f64, // 温度係数 (%/°C)
    pub mechanical_load: f64,  // 機械的荷重 (N)
}

impl Default for SensorParameters {
    fn default() -> Self {
        Self {
            length: 2.0,
            frequency: 1000.0,
            sensitivity: 50.0,
            nonlinearity: 0.5,
            temp_coefficient: 0.02,
            mechanical_load: 100.0,
        }
    }
}

fn clamp_to(value: f64, (min, max): (f64, f64)) -> f64 {
    // NaN はそのまま通す (`check_finite` で弾く)
    value.clamp(min, max)
}

fn ensure_finite(name: &'static str, value: f64) -> Result<(), DesignError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DesignError::NonFiniteParameter(name))
    }
}

impl SensorParameters {
    pub fn set_length(&mut self, value: f64) {
        self.length = clamp_to(value, LENGTH_RANGE);
    }

    pub fn set_frequency(&mut self, value: f64) {
        self.frequency = clamp_to(value, FREQUENCY_RANGE);
    }

    pub fn set_sensitivity(&mut self, value: f64) {
        self.sensitivity = clamp_to(value, SENSITIVITY_RANGE);
    }

    pub fn set_nonlinearity(&mut self, value: f64) {
        self.nonlinearity = value;
    }

    pub fn set_temp_coefficient(&mut self, value: f64) {
        self.temp_coefficient = value;
    }

    pub fn set_mechanical_load(&mut self, value: f64) {
        self.mechanical_load = value;
    }

    /// 範囲付きの値をすべてクランプしたコピーを返す
    pub fn clamped(&self) -> Self {
        let mut params = self.clone();
        params.set_length(self.length);
        params.set_frequency(self.frequency);
        params.set_sensitivity(self.sensitivity);
        params
    }

    /// すべての値が有限であることを確認する
    ///
    /// JSON は NaN・無限大を表現できないため、保存前に必ず通す。
    pub fn check_finite(&self) -> Result<(), DesignError> {
        ensure_finite("length", self.length)?;
        ensure_finite("frequency", self.frequency)?;
        ensure_finite("sensitivity", self.sensitivity)?;
        ensure_finite("nonlinearity", self.nonlinearity)?;
        ensure_finite("tempCoefficient", self.temp_coefficient)?;
        ensure_finite("mechanicalLoad", self.mechanical_load)
    }
}

/// センサの構造パラメータ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructionParameters {
    pub housing_thickness: f64,       // ハウジング壁厚 (mm)
    pub piezo_layers: u32,            // 圧電層の数
    pub contact_plate_thickness: f64, // 接触板の厚さ (mm)
    pub insulator_thickness: f64,     // 絶縁層の厚さ (mm)
    pub piezo_elements: u32,          // 圧電素子の数
    pub element_spacing: f64,         // 素子間隔 (有効長に対する %)
}

impl Default for ConstructionParameters {
    fn default() -> Self {
        Self {
            housing_thickness: 3.0,
            piezo_layers: 3,
            contact_plate_thickness: 0.5,
            insulator_thickness: 0.2,
            piezo_elements: 8,
            element_spacing: 10.0,
        }
    }
}

impl ConstructionParameters {
    /// 構造パラメータの妥当性を確認する
    ///
    /// 厚さはすべて正、層数・素子数は1以上でなければならない。
    pub fn validate(&self) -> Result<(), DesignError> {
        // `!(x > 0.0)` で NaN も弾く
        if !(self.housing_thickness > 0.0) {
            return Err(DesignError::InvalidConstruction("ハウジング壁厚は正の値が必要です"));
        }
        if !(self.contact_plate_thickness > 0.0) {
            return Err(DesignError::InvalidConstruction("接触板の厚さは正の値が必要です"));
        }
        if !(self.insulator_thickness > 0.0) {
            return Err(DesignError::InvalidConstruction("絶縁層の厚さは正の値が必要です"));
        }
        if self.piezo_layers == 0 {
            return Err(DesignError::InvalidConstruction("圧電層は1層以上必要です"));
        }
        if self.piezo_elements == 0 {
            return Err(DesignError::InvalidConstruction("圧電素子は1個以上必要です"));
        }
        if !(0.0..=100.0).contains(&self.element_spacing) {
            return Err(DesignError::InvalidConstruction("素子間隔は0〜100%の範囲で指定してください"));
        }
        Ok(())
    }
}

/// 試験信号の波形
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Triangle,
}

impl std::str::FromStr for Waveform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sine" => Ok(Waveform::Sine),
            "square" => Ok(Waveform::Square),
            "triangle" => Ok(Waveform::Triangle),
            other => Err(format!("未知の波形です: {}", other)),
        }
    }
}

/// 試験信号
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestSignal {
    pub waveform: Waveform,
    pub amplitude: f64, // 振幅 (N)
    pub frequency: f64, // 周波数 (Hz)
}

impl Default for TestSignal {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            amplitude: 100.0,
            frequency: 2.0,
        }
    }
}

impl TestSignal {
    pub fn check_finite(&self) -> Result<(), DesignError> {
        ensure_finite("amplitude", self.amplitude)?;
        ensure_finite("frequency", self.frequency)
    }
}
