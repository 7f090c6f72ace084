use std::{error, fmt};

/// Geometry that can't be built without producing NaN or infinity downstream.
#[derive(Clone, Debug, PartialEq)]
pub enum GeomError {
    InvalidGeometry(String),
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeomError::InvalidGeometry(msg) => write!(f, "invalid geometry: {}", msg),
        }
    }
}

impl error::Error for GeomError {}
