/// Why a handshake was refused. Only logged; callers see one uniform error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    MissingToken,
    InvalidToken,
}

impl AuthFailure {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing token",
            Self::InvalidToken => "invalid token",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("authentication failed")]
    AuthenticationFailed(AuthFailure),

    #[error("relay is not ready")]
    RelayNotReady,

    #[error("transport error: {0}")]
    Transport(String),
}

impl From<axum::Error> for RelayError {
    fn from(err: axum::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
