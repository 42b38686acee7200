// src/math/waveform.rs

use std::f64::consts::PI;

use crate::config::parameters::{ConstructionParameters, SensorParameters, TestSignal, Waveform};

/// 波形の1サンプル (-1〜1)
///
/// # 引数
/// - `waveform`: 波形の種類
/// - `frequency`: 周波数 (Hz)
/// - `t`: 経過時間 (s)
///
/// # 戻り値
/// - 矩形波は必ず -1 か 1 (sin が 0 のときは 1)
/// - 三角波は正規化時間 f·t に対して周期1、t = 0 で 0 から立ち上がる
pub fn sample(waveform: Waveform, frequency: f64, t: f64) -> f64 {
    let phase = frequency * t;
    match waveform {
        Waveform::Sine => (2.0 * PI * phase).sin(),
        Waveform::Square => {
            if (2.0 * PI * phase).sin() >= 0.0 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Triangle => triangle(phase),
    }
}

/// 周期1の三角波 (正弦波と同位相)
fn triangle(x: f64) -> f64 {
    let shifted = x + 0.25;
    let frac = shifted - shifted.floor();
    1.0 - 4.0 * (frac - 0.5).abs()
}

/// 試験信号に対するセンサ出力
///
/// 振幅を感度 (100 pC/N 基準) と圧電層数 (3層基準) でスケーリングする。
pub fn peak_test_output(
    signal: &TestSignal,
    t: f64,
    params: &SensorParameters,
    construction: &ConstructionParameters,
) -> f64 {
    sample(signal.waveform, signal.frequency, t)
        * signal.amplitude
        * (params.sensitivity / 100.0)
        * (construction.piezo_layers as f64 / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sine_starts_at_zero() {
        assert_eq!(sample(Waveform::Sine, 5.0, 0.0), 0.0);
        assert!((sample(Waveform::Sine, 1.0, 0.25) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_square_at_zero_crossing_is_positive() {
        assert_eq!(sample(Waveform::Square, 1.0, 0.0), 1.0);
        assert_eq!(sample(Waveform::Square, 1.0, 0.75), -1.0);
    }

    #[test]
    fn test_triangle_key_points() {
        assert!(sample(Waveform::Triangle, 1.0, 0.0).abs() < 1e-12);
        assert!((sample(Waveform::Triangle, 1.0, 0.25) - 1.0).abs() < 1e-12);
        assert!(sample(Waveform::Triangle, 1.0, 0.5).abs() < 1e-12);
        assert!((sample(Waveform::Triangle, 1.0, 0.75) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_peak_test_output_scaling() {
        let signal = TestSignal {
            waveform: Waveform::Square,
            amplitude: 200.0,
            frequency: 1.0,
        };
        let params = SensorParameters {
            sensitivity: 50.0,
            ..SensorParameters::default()
        };
        let construction = ConstructionParameters {
            piezo_layers: 6,
            ..ConstructionParameters::default()
        };
        // 1 × 200 × 0.5 × 2
        assert!((peak_test_output(&signal, 0.1, &params, &construction) - 200.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_square_is_binary(f in 0.01f64..1000.0, t in 0.0f64..100.0) {
            let s = sample(Waveform::Square, f, t);
            prop_assert!(s == 1.0 || s == -1.0);
        }

        #[test]
        fn prop_sine_is_bounded(f in 0.01f64..1000.0, t in 0.0f64..100.0) {
            let s = sample(Waveform::Sine, f, t);
            prop_assert!((-1.0..=1.0).contains(&s));
        }

        #[test]
        fn prop_triangle_is_periodic_and_bounded(x in -50.0f64..50.0) {
            let s = sample(Waveform::Triangle, 1.0, x);
            prop_assert!((-1.0..=1.0).contains(&s));
            prop_assert!((sample(Waveform::Triangle, 1.0, x + 1.0) - s).abs() < 1e-9);
        }

        #[test]
        fn prop_triangle_is_continuous(x in -50.0f64..50.0) {
            // 傾きは ±4 なので微小区間での変化はその範囲に収まる
            let h = 1e-6;
            let ds = (sample(Waveform::Triangle, 1.0, x + h) - sample(Waveform::Triangle, 1.0, x)).abs();
            prop_assert!(ds <= 4.0 * h + 1e-9);
        }
    }
}
