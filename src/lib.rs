// src/lib.rs

//! 圧電式力センサの設計計算
//!
//! 材料カタログとセンサ設定から静電容量・共振周波数・出力電圧などの特性値と
//! チャージアンプの部品定数を求め、試験信号のプレビュー・プロジェクト保存・
//! レポート出力を提供する。

pub mod config;
pub mod error;
pub mod math;
pub mod models;
pub mod project;
pub mod simulation;

pub use error::DesignError;
