use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    Io,
    Parse,
    SchemaDefinition,
    MissingField,
    TypeMismatch,
    UnknownDiscriminator,
    ValueFormat,
    DepthLimit,
    UnreadableResponse,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    record: Option<&'static str>,
    field: Option<String>,
    expected: Option<String>,
    actual: Option<String>,
    payload: Option<Value>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            record: None,
            field: None,
            expected: None,
            actual: None,
            payload: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn record(&self) -> Option<&'static str> {
        self.record
    }

    /// Dotted path of the offending field, e.g. `status.entities.urls[1].url`.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    pub fn actual(&self) -> Option<&str> {
        self.actual.as_deref()
    }

    /// Original value tree attached by the response boundary.
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_record(mut self, record: &'static str) -> Self {
        self.record = Some(record);
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the field path only when no deeper frame already did.
    pub fn or_field(self, field: impl FnOnce() -> String) -> Self {
        if self.field.is_some() {
            self
        } else {
            self.with_field(field())
        }
    }

    /// Prefixes the field path with an enclosing key or index segment.
    pub fn within(mut self, segment: &str) -> Self {
        self.field = Some(match self.field.take() {
            None => segment.to_string(),
            Some(inner) if inner.starts_with('[') => format!("{segment}{inner}"),
            Some(inner) => format!("{segment}.{inner}"),
        });
        self
    }

    pub fn or_record(mut self, record: &'static str) -> Self {
        if self.record.is_none() {
            self.record = Some(record);
        }
        self
    }

    pub fn with_shapes(mut self, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(record) = self.record {
            write!(f, " (record: {record})")?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {field})")?;
        }
        if let (Some(expected), Some(actual)) = (&self.expected, &self.actual) {
            write!(f, " (expected {expected}, found {actual})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::Io => 3,
        ErrorKind::Parse => 4,
        ErrorKind::SchemaDefinition => 5,
        ErrorKind::MissingField
        | ErrorKind::TypeMismatch
        | ErrorKind::UnknownDiscriminator
        | ErrorKind::ValueFormat
        | ErrorKind::DepthLimit => 6,
        ErrorKind::UnreadableResponse => 7,
    }
}
