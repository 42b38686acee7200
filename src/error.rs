// src/error.rs

use thiserror::Error;

/// 設計計算・プロジェクト保存で発生するエラー
#[derive(Error, Debug)]
pub enum DesignError {
    #[error("ファイルの入出力に失敗しました: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAMLの解析に失敗しました: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSONの解析に失敗しました: {0}")]
    Json(#[from] serde_json::Error),

    #[error("プロジェクト名が空です。")]
    EmptyProjectName,

    #[error("材料 `{0}` はカタログに存在しません。")]
    MaterialNotFound(String),

    #[error("プロジェクト `{0}` は見つかりません。")]
    ProjectNotFound(String),

    #[error("構造パラメータが不正です: {0}")]
    InvalidConstruction(&'static str),

    #[error("試験信号の設定が不正です: {0}")]
    InvalidPreview(&'static str),

    #[error("パラメータ `{0}` が有限の値ではありません。")]
    NonFiniteParameter(&'static str),
}
