use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to read host file {}: {source}", path.display())]
    ReadHostFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write host file {}: {source}", path.display())]
    WriteHostFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Kubernetes error: {0}")]
    KubernetesError(#[from] kube::error::Error),
}
