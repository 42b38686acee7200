// src/config/design.rs

use serde::Deserialize;

use crate::config::parameters::{ConstructionParameters, SensorParameters, TestSignal};
use crate::error::DesignError;
use crate::models::material::{default_material, find_material, Material};

/// 設計ファイル (YAML) の全体
///
/// どのセクションも省略可能で、省略時は既定値が使われる。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DesignFile {
    pub material: String,
    pub sensor: SensorParameters,
    pub construction: ConstructionParameters,
    pub test_signal: TestSignal,
}

impl Default for DesignFile {
    fn default() -> Self {
        Self {
            material: default_material().name.to_string(),
            sensor: SensorParameters::default(),
            construction: ConstructionParameters::default(),
            test_signal: TestSignal::default(),
        }
    }
}

impl DesignFile {
    /// 材料名をカタログから解決する
    pub fn resolve_material(&self) -> Result<&'static Material, DesignError> {
        find_material(&self.material).ok_or_else(|| DesignError::MaterialNotFound(self.material.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "material: PVDF\nsensor:\n  length: 1.8\n";
        let design: DesignFile = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(design.material, "PVDF");
        assert_eq!(design.sensor.length, 1.8);
        assert_eq!(design.sensor.frequency, 1000.0);
        assert_eq!(design.construction, ConstructionParameters::default());
        assert_eq!(design.test_signal, TestSignal::default());
    }

    #[test]
    fn test_resolve_material() {
        let design = DesignFile::default();
        assert_eq!(design.resolve_material().unwrap().name, "PZT-5H");

        let unknown = DesignFile {
            material: "Unobtainium".to_string(),
            ..DesignFile::default()
        };
        assert!(matches!(
            unknown.resolve_material(),
            Err(DesignError::MaterialNotFound(name)) if name == "Unobtainium"
        ));
    }
}
