// src/simulation/framework.rs

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use log::info;

use crate::config::parameters::{ConstructionParameters, SensorParameters, TestSignal};
use crate::error::DesignError;
use crate::math::sample;
use crate::simulation::csv::create_csv_row;
use crate::simulation::TestRunner;

/// 画面の更新周期に相当する既定のティック周波数 (Hz)
pub const DEFAULT_REFRESH_HZ: f64 = 60.0;

/// プレビューの実行設定
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSettings {
    pub duration: f64,   // 実行時間 (s)
    pub refresh_hz: f64, // ティック周波数 (Hz)
    pub realtime: bool,  // true なら1周期ごとに実際に待つ
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            duration: 2.0,
            refresh_hz: DEFAULT_REFRESH_HZ,
            realtime: false,
        }
    }
}

/// プレビューの結果
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSummary {
    pub ticks: usize,
    pub peak_output: f64,  // |出力| の最大値 (N)
    pub final_output: f64, // 停止後の出力 (常に0)
}

/// 試験信号のプレビューを実行し、各ティックをCSV行として書き出す
pub fn run_preview<W: Write + ?Sized>(
    writer: &mut W,
    signal: &TestSignal,
    params: &SensorParameters,
    construction: &ConstructionParameters,
    settings: &PreviewSettings,
) -> Result<PreviewSummary, DesignError> {
    if !(settings.refresh_hz > 0.0) || !settings.refresh_hz.is_finite() {
        return Err(DesignError::InvalidPreview("ティック周波数は正の値が必要です"));
    }
    if !(settings.duration >= 0.0) || !settings.duration.is_finite() {
        return Err(DesignError::InvalidPreview("実行時間は0以上が必要です"));
    }

    let period = Duration::try_from_secs_f64(1.0 / settings.refresh_hz)
        .map_err(|_| DesignError::InvalidPreview("ティック周波数が小さすぎます"))?;
    let cycles = (settings.duration * settings.refresh_hz).round() as usize;

    let mut runner = TestRunner::new();
    let origin = Instant::now();
    let handle = runner.start(origin);
    let mut peak_output: f64 = 0.0;
    let mut ticks = 0;

    // プレビューのメインループ
    for cycle in 0..cycles {
        let (now, time) = if settings.realtime {
            thread::sleep(period);
            let now = Instant::now();
            (now, now.saturating_duration_since(origin).as_secs_f64())
        } else {
            // 経過時間はティック番号から直接求める
            let time = cycle as f64 / settings.refresh_hz;
            let now = Duration::try_from_secs_f64(time)
                .ok()
                .and_then(|elapsed| origin.checked_add(elapsed))
                .ok_or(DesignError::InvalidPreview("実行時間が長すぎます"))?;
            (now, time)
        };

        if let Some(output) = runner.tick(handle, now, signal, params, construction) {
            let value = sample(signal.waveform, signal.frequency, time);
            writer.write_all(create_csv_row(time, value, output).as_bytes())?;
            peak_output = peak_output.max(output.abs());
            ticks += 1;
        }
    }

    runner.stop();
    writer.flush()?;
    info!("test preview finished: {} ticks, peak {:.3} N", ticks, peak_output);

    Ok(PreviewSummary {
        ticks,
        peak_output,
        final_output: runner.output(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parameters::Waveform;
    use crate::simulation::csv::write_csv_header;

    #[test]
    fn test_run_preview_writes_one_row_per_tick() {
        let mut buffer: Vec<u8> = Vec::new();
        write_csv_header(&mut buffer).unwrap();

        let settings = PreviewSettings {
            duration: 1.0,
            refresh_hz: 10.0,
            realtime: false,
        };
        let summary = run_preview(
            &mut buffer,
            &TestSignal::default(),
            &SensorParameters::default(),
            &ConstructionParameters::default(),
            &settings,
        )
        .unwrap();

        assert_eq!(summary.ticks, 10);
        assert_eq!(summary.final_output, 0.0);
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 11);
        assert!(text.lines().nth(1).unwrap().starts_with("0.0000,0.000000,"));
        assert!(text.lines().nth(4).unwrap().starts_with("0.3000,"));
        assert!(text.lines().last().unwrap().starts_with("0.9000,"));
    }

    #[test]
    fn test_square_preview_peak() {
        let mut buffer: Vec<u8> = Vec::new();
        let signal = TestSignal {
            waveform: Waveform::Square,
            amplitude: 80.0,
            frequency: 1.0,
        };
        let settings = PreviewSettings {
            duration: 0.5,
            refresh_hz: 20.0,
            realtime: false,
        };
        let summary = run_preview(
            &mut buffer,
            &signal,
            &SensorParameters::default(),
            &ConstructionParameters::default(),
            &settings,
        )
        .unwrap();

        // 80 N × 0.5 × 1
        assert!((summary.peak_output - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_refresh_rate() {
        let mut buffer: Vec<u8> = Vec::new();
        let settings = PreviewSettings {
            refresh_hz: 0.0,
            ..PreviewSettings::default()
        };
        let result = run_preview(
            &mut buffer,
            &TestSignal::default(),
            &SensorParameters::default(),
            &ConstructionParameters::default(),
            &settings,
        );
        assert!(matches!(result, Err(DesignError::InvalidPreview(_))));
    }

    #[test]
    fn test_tiny_refresh_rate_is_rejected() {
        let mut buffer: Vec<u8> = Vec::new();
        let settings = PreviewSettings {
            duration: 0.0,
            refresh_hz: 1e-20,
            realtime: false,
        };
        let result = run_preview(
            &mut buffer,
            &TestSignal::default(),
            &SensorParameters::default(),
            &ConstructionParameters::default(),
            &settings,
        );
        assert!(matches!(result, Err(DesignError::InvalidPreview(_))));
        assert!(buffer.is_empty());
    }
}
