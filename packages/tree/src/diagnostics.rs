/// Non-fatal problems recorded while applying a stream
use serde::Serialize;
use std::fmt;
use streamui_catalog::SchemaError;
use streamui_protocol::DecodeError;

/// Diagnostic category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// Line was not valid JSON
    StreamDecode,
    /// Valid JSON, but not one of the two accepted operation shapes
    UnsupportedOperation,
    /// Element rejected by the catalog
    SchemaValidation,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DiagnosticKind::StreamDecode => "stream-decode",
            DiagnosticKind::UnsupportedOperation => "unsupported-operation",
            DiagnosticKind::SchemaValidation => "schema-validation",
        };
        f.write_str(label)
    }
}

/// One dropped line or element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// 1-based line number within the session
    pub line: usize,
    pub kind: DiagnosticKind,
    pub message: String,
    /// Element key, when the line got far enough to name one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            message: message.into(),
            key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub(crate) fn from_decode(line: usize, error: &DecodeError) -> Self {
        let kind = if error.is_syntax() {
            DiagnosticKind::StreamDecode
        } else {
            DiagnosticKind::UnsupportedOperation
        };
        Self::new(line, kind, error.to_string())
    }

    pub(crate) fn from_schema(line: usize, key: &str, error: &SchemaError) -> Self {
        Self::new(line, DiagnosticKind::SchemaValidation, error.to_string()).with_key(key)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: [{}] ", self.line, self.kind)?;
        if let Some(key) = &self.key {
            write!(f, "{}: ", key)?;
        }
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::new(3, DiagnosticKind::SchemaValidation, "Unknown component type: Foo")
            .with_key("x");
        assert_eq!(
            diagnostic.to_string(),
            "line 3: [schema-validation] x: Unknown component type: Foo"
        );
    }

    #[test]
    fn test_decode_error_kinds() {
        let syntax = DecodeError::InvalidJson(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert_eq!(Diagnostic::from_decode(1, &syntax).kind, DiagnosticKind::StreamDecode);

        let unsupported = DecodeError::Malformed("missing 'op'".to_string());
        assert_eq!(
            Diagnostic::from_decode(2, &unsupported).kind,
            DiagnosticKind::UnsupportedOperation
        );
    }
}
