#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("partial formatting requested before any boundary was marked")]
    NoBoundaries,
    #[error("source has no token for tok index {index}")]
    UnknownToken { index: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("invalid output options: {0}")]
    Parse(#[from] toml::de::Error),
}
