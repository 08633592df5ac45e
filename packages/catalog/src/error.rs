use thiserror::Error;

/// Why a single prop value was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropIssue {
    #[error("required field is missing")]
    Missing,

    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("'{value}' is not one of {}", allowed.join(", "))]
    NotInEnum { value: String, allowed: Vec<String> },

    #[error("{value} is outside {}", describe_range(*min, *max))]
    OutOfRange {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },
}

fn describe_range(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("[{}, {}]", min, max),
        (Some(min), None) => format!("[{}, ∞)", min),
        (None, Some(max)) => format!("(-∞, {}]", max),
        (None, None) => "(-∞, ∞)".to_string(),
    }
}

/// Errors returned by [`Catalog::validate`](crate::Catalog::validate)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Unknown component type: {0}")]
    UnknownType(String),

    #[error("Invalid prop '{}' on {component}: {issue}", if path.is_empty() { "props" } else { path.as_str() })]
    InvalidProp {
        component: String,
        path: String,
        issue: PropIssue,
    },
}

/// Errors raised while loading a catalog document
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SchemaResult<T> = Result<T, SchemaError>;
