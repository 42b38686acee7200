// src/project/store.rs

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::parameters::SensorParameters;
use crate::error::DesignError;
use crate::models::material::{find_material, Material};

/// 保存済みプロジェクト
///
/// 材料は名前だけを保存し、読み込み時にカタログから引き直す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProject {
    pub id: String,
    pub name: String,
    pub params: SensorParameters,
    pub material_name: String,
    pub created_at: DateTime<Utc>,
}

/// 読み込んだプロジェクトと解決済みの材料
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedProject {
    pub project: SavedProject,
    pub material: &'static Material,
}

/// プロジェクトの保存先 (1ファイルに JSON 配列で保持)
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProjectStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 保存済みプロジェクトの一覧 (ファイルが無ければ空)
    pub fn list(&self) -> Result<Vec<SavedProject>, DesignError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let projects: Vec<SavedProject> = serde_json::from_reader(BufReader::new(file))?;
        debug!("read {} projects from {}", projects.len(), self.path.display());
        Ok(projects)
    }

    /// 現在時刻でプロジェクトを保存する
    pub fn save(
        &self,
        name: &str,
        params: &SensorParameters,
        material: &Material,
    ) -> Result<SavedProject, DesignError> {
        self.save_at(name, params, material, Utc::now())
    }

    /// 指定時刻でプロジェクトを保存する
    ///
    /// 名前が空白のみの場合は何も書き込まずに `EmptyProjectName` を返す。
    /// 非有限の値を含むパラメータも、ファイルに触れる前に拒否する。
    pub fn save_at(
        &self,
        name: &str,
        params: &SensorParameters,
        material: &Material,
        now: DateTime<Utc>,
    ) -> Result<SavedProject, DesignError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DesignError::EmptyProjectName);
        }
        params.check_finite()?;

        let mut projects = self.list()?;

        // ID は作成時刻 (ミリ秒)、重複時は1ずつずらす
        let mut stamp = now.timestamp_millis();
        while projects.iter().any(|p| p.id == stamp.to_string()) {
            stamp += 1;
        }

        let project = SavedProject {
            id: stamp.to_string(),
            name: name.to_string(),
            params: params.clone(),
            material_name: material.name.to_string(),
            created_at: now,
        };
        projects.push(project.clone());
        self.write_all(&projects)?;
        info!("saved project `{}` ({})", project.name, project.id);
        Ok(project)
    }

    /// プロジェクトを読み込み、材料をカタログから解決する
    pub fn load(&self, id: &str) -> Result<LoadedProject, DesignError> {
        let project = self.find(id)?;
        let material = find_material(&project.material_name)
            .ok_or_else(|| DesignError::MaterialNotFound(project.material_name.clone()))?;
        debug!("loaded project `{}` with material {}", project.name, material.name);
        Ok(LoadedProject { project, material })
    }

    /// プロジェクトを読み込む。材料がカタログに無ければ `current` を維持する
    ///
    /// # 引数
    /// * `id` - プロジェクトID
    /// * `current` - 現在選択中の材料
    ///
    /// # 戻り値
    /// * 読み込んだプロジェクト (`material` は解決できた材料か `current`)
    pub fn load_or_keep(&self, id: &str, current: &'static Material) -> Result<LoadedProject, DesignError> {
        let project = self.find(id)?;
        let material = match find_material(&project.material_name) {
            Some(material) => material,
            None => {
                warn!(
                    "material `{}` of project `{}` is not in the catalog, keeping {}",
                    project.material_name, project.name, current.name
                );
                current
            }
        };
        Ok(LoadedProject { project, material })
    }

    fn find(&self, id: &str) -> Result<SavedProject, DesignError> {
        self.list()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| DesignError::ProjectNotFound(id.to_string()))
    }

    /// プロジェクトを削除する
    pub fn delete(&self, id: &str) -> Result<SavedProject, DesignError> {
        let mut projects = self.list()?;
        let index = projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| DesignError::ProjectNotFound(id.to_string()))?;
        let removed = projects.remove(index);
        self.write_all(&projects)?;
        info!("deleted project `{}` ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// 一時ファイルに書いてから置き換える
    fn write_all(&self, projects: &[SavedProject]) -> Result<(), DesignError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            serde_json::to_writer_pretty(&mut writer, projects)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
