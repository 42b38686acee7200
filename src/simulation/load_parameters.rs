// src/simulation/load_parameters.rs

use std::fs::File;

use log::{debug, warn};
use serde_yaml::from_reader;

use crate::config::DesignFile;
use crate::error::DesignError;

/// 設計ファイルの読み込み
///
/// 範囲付きのセンサパラメータはクランプし、構造パラメータは検証する。
pub fn load_design(path: &str) -> Result<DesignFile, DesignError> {
    let file = File::open(path)?;
    let design: DesignFile = from_reader(file)?;
    debug!("loaded design file {}", path);
    normalize_design(design)
}

/// 読み込んだ設計をクランプ・検証する
///
/// `.inf` や `.nan` を含む値は `NonFiniteParameter` で拒否する。
pub fn normalize_design(mut design: DesignFile) -> Result<DesignFile, DesignError> {
    design.sensor.check_finite()?;
    design.test_signal.check_finite()?;
    let clamped = design.sensor.clamped();
    if clamped != design.sensor {
        warn!("sensor parameters were outside their ranges and have been clamped");
        design.sensor = clamped;
    }
    design.construction.validate()?;
    design.resolve_material()?;
    Ok(design)
}
