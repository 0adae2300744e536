use thiserror::Error;

/// Error type shared by the record store, storage backends and configuration.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),
    #[error("Erro de serialização: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Erro de persistência: {0}")]
    Storage(String),
    #[error("Entrada inválida: {0}")]
    InvalidInput(String),
    #[error("Erro de configuração: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
