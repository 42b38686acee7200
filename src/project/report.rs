// src/project/report.rs

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;

use crate::config::parameters::{ConstructionParameters, SensorParameters};
use crate::error::DesignError;
use crate::models::characteristics::DerivedCharacteristics;
use crate::models::material::Material;

/// 出力ファイルの拡張子
pub const REPORT_EXTENSION: &str = "txt";

/// 設計レポート (エクスポート時点のスナップショット)
#[derive(Debug, Clone)]
pub struct DesignReport<'a> {
    pub material: &'a Material,
    pub params: &'a SensorParameters,
    pub construction: &'a ConstructionParameters,
    pub derived: DerivedCharacteristics,
    pub generated_at: DateTime<Utc>,
}

impl<'a> DesignReport<'a> {
    pub fn new(
        material: &'a Material,
        params: &'a SensorParameters,
        construction: &'a ConstructionParameters,
        generated_at: DateTime<Utc>,
    ) -> Self {
        DesignReport {
            material,
            params,
            construction,
            derived: DerivedCharacteristics::compute(params, material, construction),
            generated_at,
        }
    }

    /// `Sensor_<材料>_<長さ>m_<日付>.<拡張子>`
    pub fn file_name(&self) -> String {
        let material: String = self
            .material
            .name
            .chars()
            .map(|c| if c.is_whitespace() || "/\\:*?\"<>|".contains(c) { '_' } else { c })
            .collect();
        format!(
            "Sensor_{}_{}m_{}.{}",
            material,
            self.params.length,
            self.generated_at.format("%Y-%m-%d"),
            REPORT_EXTENSION
        )
    }

    /// 製造工程 (固定の5段階)
    pub fn manufacturing_steps(&self) -> [String; 5] {
        [
            format!("Prepare the piezoelectric material {}", self.material.name),
            "Apply electrodes by sputter deposition".to_string(),
            "Pole in an electric field (2-4 kV/mm)".to_string(),
            "Assemble the multilayer stack".to_string(),
            "Seal in a polymer jacket".to_string(),
        ]
    }

    /// テキスト形式で出力する
    pub fn render(&self) -> String {
        let p = self.params;
        let c = self.construction;
        let m = self.material;
        let d = &self.derived;
        let amp = &d.amplifier;
        let mut out = String::new();

        out.push_str("PIEZOELECTRIC SENSOR DESIGN REPORT\n");
        out.push_str(&format!("Material: {} ({})\n", m.name, m.category));
        out.push('\n');

        out.push_str("Configuration\n");
        out.push_str(&format!("  Length: {:.2} m\n", p.length));
        out.push_str(&format!("  Frequency: {} Hz\n", p.frequency));
        out.push_str(&format!("  Sensitivity: {} pC/N\n", p.sensitivity));
        out.push_str(&format!("  Nonlinearity: {} %\n", p.nonlinearity));
        out.push_str(&format!("  Temperature coefficient: {} %/°C\n", p.temp_coefficient));
        out.push_str(&format!("  Mechanical load: {} N\n", p.mechanical_load));
        out.push_str(&format!("  Housing wall: {} mm\n", c.housing_thickness));
        out.push_str(&format!("  Piezo layers: {}\n", c.piezo_layers));
        out.push_str(&format!("  Contact plate: {} mm\n", c.contact_plate_thickness));
        out.push_str(&format!("  Insulator: {} mm\n", c.insulator_thickness));
        out.push_str(&format!("  Piezo elements: {}\n", c.piezo_elements));
        out.push_str(&format!("  Element spacing: {} %\n", c.element_spacing));
        out.push('\n');

        out.push_str("Derived characteristics\n");
        out.push_str(&format!("  Capacitance: {:.2} pF\n", d.capacitance));
        out.push_str(&format!("  Resonant frequency: {:.2} kHz\n", d.resonant_frequency));
        out.push_str(&format!("  Output voltage: {:.2} V\n", d.output_voltage));
        out.push_str(&format!(
            "  Temperature range: {}...+{} °C\n",
            d.temperature_range.0, d.temperature_range.1
        ));
        out.push_str(&format!("  Feedback capacitor Cf: {:.1} pF\n", amp.feedback_capacitance));
        out.push_str(&format!("  Feedback resistor Rf: {:.2} MOhm\n", amp.feedback_resistor));
        out.push_str(&format!("  Gain: x{:.1}\n", amp.gain));
        out.push_str(&format!(
            "  Bandwidth: {} Hz ... {:.1} kHz\n",
            amp.bandwidth.lower_hz, amp.bandwidth.upper_khz
        ));
        out.push_str(&format!("  Stack thickness: {:.2} mm\n", d.stack_thickness));
        out.push('\n');

        out.push_str("Material properties\n");
        out.push_str(&format!("  d33: {} pC/N\n", m.piezo_coefficient));
        out.push_str(&format!("  Density: {} kg/m³\n", m.density));
        out.push_str(&format!("  Young's modulus: {} GPa\n", m.young_modulus));
        out.push_str(&format!("  Curie temperature: {} °C\n", m.curie));

        if let Some(ext) = &m.extended {
            out.push('\n');
            out.push_str("Extended specifications\n");
            out.push_str(&format!("  Measurement range: {}\n", ext.measurement_range));
            out.push_str(&format!("  Sensitivity tolerance: {}\n", ext.sensitivity_tolerance));
            out.push_str(&format!("  Detection threshold: {}\n", ext.detection_threshold));
            out.push_str(&format!("  Accuracy: {}\n", ext.accuracy));
            out.push_str(&format!("  Operating temperature: {}\n", ext.operating_temperature));
            out.push_str(&format!("  Protection: {}\n", ext.ip_rating));
        }
        out.push('\n');

        out.push_str("Manufacturing procedure\n");
        for (i, step) in self.manufacturing_steps().iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, step));
        }
        out.push('\n');

        out.push_str(&format!("Generated: {}\n", self.generated_at.format("%Y-%m-%d")));
        out
    }

    /// ディレクトリにレポートを書き出し、そのパスを返す
    pub fn export(&self, dir: &Path) -> Result<PathBuf, DesignError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, self.render())?;
        info!("exported design report to {}", path.display());
        Ok(path)
    }
}
