use crate::error::SermonError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

/// Body of a generation request.
///
/// Fields that are absent, `null`, not strings, or empty all fail validation
/// the same way.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SermonRequest {
    #[serde(default, deserialize_with = "text_field")]
    #[validate(required, length(min = 1))]
    pub tema: Option<String>,

    #[serde(default, deserialize_with = "text_field")]
    #[validate(required, length(min = 1))]
    pub versiculo: Option<String>,
}

fn text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

impl SermonRequest {
    /// Parse a raw request body.
    ///
    /// An empty body or a JSON value other than an object carries no fields.
    /// Bytes that are not JSON at all are an internal error.
    pub fn from_body(body: &[u8]) -> Result<Self, SermonError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value =
            serde_json::from_slice(body).map_err(|e| SermonError::Internal(e.to_string()))?;

        match value {
            Value::Object(_) => {
                serde_json::from_value(value).map_err(|e| SermonError::Internal(e.to_string()))
            }
            _ => Ok(Self::default()),
        }
    }

    /// Validated `(tema, versiculo)` pair.
    pub fn into_fields(self) -> Result<(String, String), SermonError> {
        self.validate().map_err(|_| SermonError::MissingParameters)?;

        match (self.tema, self.versiculo) {
            (Some(tema), Some(versiculo)) => Ok((tema, versiculo)),
            _ => Err(SermonError::MissingParameters),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SermonResponse {
    /// Upstream message content, relayed unchanged. Omitted when the message
    /// had no `content` key; an explicit `null` is kept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resultado: Option<Value>,
    pub tema: String,
    pub versiculo: String,
    pub timestamp: String,
}

impl SermonResponse {
    pub fn new(resultado: Option<Value>, tema: String, versiculo: String) -> Self {
        Self::generated_at(resultado, tema, versiculo, Utc::now())
    }

    fn generated_at(
        resultado: Option<Value>,
        tema: String,
        versiculo: String,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            resultado,
            tema,
            versiculo,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
