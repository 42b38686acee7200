// src/simulation/mod.rs

pub mod csv;
pub mod framework;
pub mod load_parameters;

use std::time::Instant;

use log::{debug, warn};

use crate::config::parameters::{ConstructionParameters, SensorParameters, TestSignal};
use crate::math::peak_test_output;

/// 実行中の試験を識別するハンドル
///
/// 停止や再開始の後は古いハンドルでの `tick` が無視される。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunHandle {
    generation: u64,
    started_at: Instant,
}

impl RunHandle {
    /// 実行を開始した時刻 (試験信号の時間原点)
    pub fn started_at(&self) -> Instant {
        self.started_at
    }
}

/// 試験ランナーの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Running(RunHandle),
}

/// 試験信号ランナー (Idle / Running の2状態)
#[derive(Debug)]
pub struct TestRunner {
    state: RunnerState,
    next_generation: u64,
    output: f64,
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRunner {
    pub fn new() -> Self {
        TestRunner {
            state: RunnerState::Idle,
            next_generation: 0,
            output: 0.0,
        }
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RunnerState::Running(_))
    }

    /// 現在の出力値 (N)
    pub fn output(&self) -> f64 {
        self.output
    }

    /// 試験を開始する。実行中なら新しい実行に置き換える。
    pub fn start(&mut self, now: Instant) -> RunHandle {
        let handle = RunHandle {
            generation: self.next_generation,
            started_at: now,
        };
        self.next_generation += 1;
        self.state = RunnerState::Running(handle);
        debug!("test runner started (generation {})", handle.generation);
        handle
    }

    /// 試験を停止し、出力を0に戻す
    pub fn stop(&mut self) {
        if let RunnerState::Running(handle) = self.state {
            debug!("test runner stopped (generation {})", handle.generation);
        }
        self.state = RunnerState::Idle;
        self.output = 0.0;
    }

    /// 1フレーム分の出力を計算する
    ///
    /// # 戻り値
    /// - `handle` が現在の実行のものであれば出力値
    /// - 停止済み・再開始済みのハンドルであれば `None` (出力は変更しない)
    pub fn tick(
        &mut self,
        handle: RunHandle,
        now: Instant,
        signal: &TestSignal,
        params: &SensorParameters,
        construction: &ConstructionParameters,
    ) -> Option<f64> {
        match self.state {
            RunnerState::Running(current) if current == handle => {
                let elapsed = now.saturating_duration_since(handle.started_at).as_secs_f64();
                self.output = peak_test_output(signal, elapsed, params, construction);
                Some(self.output)
            }
            _ => {
                warn!("dropping tick for stale run (generation {})", handle.generation);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parameters::Waveform;
    use std::time::Duration;

    fn square_signal() -> TestSignal {
        TestSignal {
            waveform: Waveform::Square,
            amplitude: 100.0,
            frequency: 1.0,
        }
    }

    #[test]
    fn test_runner_starts_idle() {
        let runner = TestRunner::new();
        assert_eq!(runner.state(), RunnerState::Idle);
        assert_eq!(runner.output(), 0.0);
    }

    #[test]
    fn test_tick_while_running() {
        let mut runner = TestRunner::new();
        let origin = Instant::now();
        let handle = runner.start(origin);
        let params = SensorParameters::default();
        let construction = ConstructionParameters::default();

        let out = runner
            .tick(handle, origin + Duration::from_millis(100), &square_signal(), &params, &construction)
            .unwrap();
        // 1 × 100 N × 0.5 × 1
        assert!((out - 50.0).abs() < 1e-12);
        assert_eq!(runner.output(), out);
    }

    #[test]
    fn test_stop_resets_output() {
        let mut runner = TestRunner::new();
        let origin = Instant::now();
        let handle = runner.start(origin);
        let params = SensorParameters::default();
        let construction = ConstructionParameters::default();
        runner.tick(handle, origin + Duration::from_millis(100), &square_signal(), &params, &construction);

        runner.stop();
        assert!(!runner.is_running());
        assert_eq!(runner.output(), 0.0);
        assert!(runner
            .tick(handle, origin + Duration::from_millis(200), &square_signal(), &params, &construction)
            .is_none());
        assert_eq!(runner.output(), 0.0);
    }

    #[test]
    fn test_restart_invalidates_old_handle() {
        let mut runner = TestRunner::new();
        let origin = Instant::now();
        let params = SensorParameters::default();
        let construction = ConstructionParameters::default();

        let first = runner.start(origin);
        runner.stop();
        let second = runner.start(origin + Duration::from_millis(10));
        assert_ne!(first, second);
        assert_eq!(first.started_at(), origin);
        assert_eq!(second.started_at(), origin + Duration::from_millis(10));

        let later = origin + Duration::from_millis(500);
        assert!(runner.tick(first, later, &square_signal(), &params, &construction).is_none());
        assert!(runner.tick(second, later, &square_signal(), &params, &construction).is_some());
    }

    #[test]
    fn test_start_while_running_replaces_run() {
        let mut runner = TestRunner::new();
        let origin = Instant::now();
        let first = runner.start(origin);
        let second = runner.start(origin);

        assert_eq!(runner.state(), RunnerState::Running(second));
        assert_ne!(first, second);
    }
}
