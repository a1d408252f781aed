//! Configuração da oficina carregada a partir de `cyclechronicles.toml`.
//!
//! A struct [`ShopConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `CYCLECHRONICLES_AUDIT_LOG` tem precedência sobre o arquivo.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ShopError;
use crate::order::BicycleType;
use crate::shop::{AdmissionPolicy, DEFAULT_MAX_PENDING};

/// Nome do arquivo de configuração procurado no diretório atual.
pub const CONFIG_FILE: &str = "cyclechronicles.toml";

/// Variável de ambiente que sobrescreve `audit_log`.
pub const AUDIT_LOG_ENV: &str = "CYCLECHRONICLES_AUDIT_LOG";

/// Configuração de nível superior carregada de `cyclechronicles.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Máximo de pedidos pendentes ao mesmo tempo.
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,

    /// Tipos de bicicleta que a oficina recusa.
    #[serde(default = "default_refused_types")]
    pub refused_types: Vec<BicycleType>,

    /// Arquivo CSV de auditoria. Sem valor, a trilha vai apenas para o log.
    #[serde(default)]
    pub audit_log: Option<PathBuf>,
}

// Valor padrão para pedidos pendentes: 5.
fn default_max_pending() -> usize {
    DEFAULT_MAX_PENDING
}

// Valor padrão para tipos recusados: GRAVEL e EBIKE.
fn default_refused_types() -> Vec<BicycleType> {
    vec![BicycleType::Gravel, BicycleType::Ebike]
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            max_pending: default_max_pending(),
            refused_types: default_refused_types(),
            audit_log: None,
        }
    }
}

impl ShopConfig {
    /// Carrega a configuração do caminho dado ou de `cyclechronicles.toml`
    /// no diretório atual. Só o arquivo implícito pode faltar: nesse caso
    /// usa valores padrão. Um caminho explícito inexistente é erro.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::read(path)?,
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::read(path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_audit_log_override(std::env::var(AUDIT_LOG_ENV).ok());
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("read config {:?}", path))?;
        Self::from_toml(&contents).with_context(|| format!("parse config {:?}", path))
    }

    /// Interpreta e valida o conteúdo TOML.
    pub fn from_toml(contents: &str) -> crate::error::Result<Self> {
        let config: ShopConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        if self.max_pending == 0 {
            return Err(ShopError::Config(
                "max_pending must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Monta a política de admissão correspondente.
    pub fn policy(&self) -> AdmissionPolicy {
        AdmissionPolicy {
            refused_types: self.refused_types.clone(),
            max_pending: self.max_pending,
        }
    }

    // Valor vazio não sobrescreve o arquivo.
    fn apply_audit_log_override(&mut self, value: Option<String>) {
        if let Some(path) = value.filter(|v| !v.is_empty()) {
            self.audit_log = Some(PathBuf::from(path));
        }
    }
}
