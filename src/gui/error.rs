use std::{error::Error, fmt::Display, io};

#[derive(Debug)]
pub enum MonitorError {
    IOError(io::Error),
}

impl Display for MonitorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonitorError::IOError(e) => write!(f, "terminal error: {}", e),
        }
    }
}

impl Error for MonitorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MonitorError::IOError(e) => Some(e),
        }
    }
}

impl From<io::Error> for MonitorError {
    fn from(value: io::Error) -> Self {
        Self::IOError(value)
    }
}
