use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::{LedgerError, Result};
use crate::utils::paths::{self, ensure_dir, write_atomic};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Disables colours in shell output.
    pub plain_output: bool,
    /// Preset texts offered by the quick-message buttons.
    pub quick_messages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plain_output: false,
            quick_messages: vec![
                "Olá! Sua entrega está a caminho.".into(),
                "Olá! A entrega foi concluída com sucesso.".into(),
                "Olá! Precisamos reagendar a entrega. Qual o melhor horário?".into(),
            ],
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    /// Missing file means defaults; a malformed one is a configuration error.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            LedgerError::Config(format!("`{}` é inválido: {err}", self.path.display()))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
