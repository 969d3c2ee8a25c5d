pub type ChoreoResult<T> = Result<T, ChoreoError>;

#[derive(thiserror::Error, Debug)]
pub enum ChoreoError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChoreoError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }
}
