// src/math/mod.rs

pub mod waveform;

pub use waveform::peak_test_output;
pub use waveform::sample;
