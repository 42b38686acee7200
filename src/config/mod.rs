// src/config/mod.rs

pub mod design;
pub mod parameters;

pub use design::DesignFile;
pub use parameters::{ConstructionParameters, SensorParameters, TestSignal, Waveform};
