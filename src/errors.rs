use std::fmt;

#[derive(Debug)]
pub enum DashboardError {
    Transport(reqwest::Error),
    Endpoint { status: u16, message: String },
    Malformed(serde_json::Error),
    MissingElement(String),
    Config(String),
    Io(std::io::Error),
}

impl DashboardError {
    pub fn missing_element(id: impl Into<String>) -> Self {
        Self::MissingElement(id.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn endpoint(status: u16, message: impl Into<String>) -> Self {
        Self::Endpoint {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "trend data request failed: {err}"),
            Self::Endpoint { status, message } => {
                write!(f, "trend endpoint returned {status}: {message}")
            }
            Self::Malformed(err) => write!(f, "trend data was not valid JSON: {err}"),
            Self::MissingElement(id) => write!(f, "page element #{id} is missing"),
            Self::Config(message) => write!(f, "invalid configuration: {message}"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Malformed(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err)
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
