use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Something the host observed, forwarded to plugins as JSON text.
///
/// Only the outer shape is checked on decode: a missing or non-string
/// `event_type` reads as `None`, and `data` is kept as whatever value was sent.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Event {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Event {
    #[must_use]
    pub fn kind(&self) -> Option<EventType> {
        self.event_type
            .as_deref()
            .and_then(|tag| EventType::try_from(tag).ok())
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        self.event_type.as_deref().unwrap_or_default()
    }

    /// Reads a string field from `data`. An absent `data` or field reads as
    /// empty; anything present with the wrong type is a [`ShapeError`].
    pub fn str_field(&self, key: &str) -> Result<&str, ShapeError> {
        let fields = match &self.data {
            None => return Ok(""),
            Some(Value::Object(fields)) => fields,
            Some(_) => {
                return Err(ShapeError {
                    field: String::from("data"),
                    expected: "an object",
                })
            }
        };
        match fields.get(key) {
            None => Ok(""),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(_) => Err(ShapeError {
                field: format!("data.{key}"),
                expected: "a string",
            }),
        }
    }
}

impl TryFrom<&str> for Event {
    type Error = DecodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match serde_json::from_str::<Value>(value).map_err(DecodeError::Json)? {
            Value::Object(mut fields) => Ok(Self {
                event_type: match fields.remove("event_type") {
                    Some(Value::String(tag)) => Some(tag),
                    _ => None,
                },
                data: fields.remove("data"),
            }),
            _ => Err(DecodeError::NotAnObject),
        }
    }
}

#[derive(Debug)]
pub enum DecodeError {
    Json(serde_json::Error),
    NotAnObject,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "{e}"),
            Self::NotAnObject => write!(f, "expected a JSON object"),
        }
    }
}

impl std::error::Error for DecodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    FileOpen,
    FileSave,
    FileCreate,
    FileDelete,
    FileRename,
    VaultSwitch,
    EditorChange,
}

impl EventType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileOpen => "FileOpen",
            Self::FileSave => "FileSave",
            Self::FileCreate => "FileCreate",
            Self::FileDelete => "FileDelete",
            Self::FileRename => "FileRename",
            Self::VaultSwitch => "VaultSwitch",
            Self::EditorChange => "EditorChange",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownEventType;

impl TryFrom<&str> for EventType {
    type Error = UnknownEventType;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "FileOpen" => Ok(Self::FileOpen),
            "FileSave" => Ok(Self::FileSave),
            "FileCreate" => Ok(Self::FileCreate),
            "FileDelete" => Ok(Self::FileDelete),
            "FileRename" => Ok(Self::FileRename),
            "VaultSwitch" => Ok(Self::VaultSwitch),
            "EditorChange" => Ok(Self::EditorChange),
            _ => Err(UnknownEventType),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ShapeError {
    pub field: String,
    pub expected: &'static str,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected `{}` to be {}", self.field, self.expected)
    }
}

impl std::error::Error for ShapeError {}
