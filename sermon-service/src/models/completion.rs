//! OpenAI-compatible chat completion payloads, as spoken by OpenRouter.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Model every sermon is generated with.
pub const SERMON_MODEL: &str = "mistralai/mistral-7b-instruct";
pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 3000;
pub const TOP_P: f32 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl ChatCompletionRequest {
    /// Single user turn carrying `prompt`, with the fixed model and sampling
    /// parameters.
    pub fn for_prompt(prompt: impl Into<String>) -> Self {
        Self {
            model: SERMON_MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.into(),
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
        }
    }
}

/// Only the part of the upstream body the handler reads.
///
/// Any JSON value decodes. `choices` and the first message are inspected
/// loosely, so wrongly typed fields read as absent instead of failing the
/// decode.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct ChatCompletionResponse {
    pub choices: Option<Value>,
}

impl From<Value> for ChatCompletionResponse {
    fn from(body: Value) -> Self {
        let choices = match body {
            Value::Object(mut fields) => fields.remove("choices"),
            _ => None,
        };
        Self { choices }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceMessage {
    /// `None` when the message carries no `content` key. Any JSON value,
    /// `null` included, is passed through as-is.
    pub content: Option<Value>,
}

impl ChatCompletionResponse {
    /// Message of the first choice, if the body has one.
    ///
    /// `choices` may be an array or an object keyed by `"0"`. The first choice
    /// and its `message` must both be present and not falsy (`null`, `false`,
    /// `0` or `""`).
    pub fn first_message(&self) -> Option<ChoiceMessage> {
        let first = match self.choices.as_ref()? {
            Value::Array(items) => items.first(),
            Value::Object(fields) => fields.get("0"),
            _ => None,
        }
        .filter(|choice| is_present(choice))?;

        let message = first.get("message").filter(|message| is_present(message))?;

        Some(ChoiceMessage {
            content: message.get("content").cloned(),
        })
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_fixed_parameters() {
        let request = ChatCompletionRequest::for_prompt("Gere um sermão");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "mistralai/mistral-7b-instruct");
        assert_eq!(value["messages"], json!([{"role": "user", "content": "Gere um sermão"}]));
        assert_eq!(value["max_tokens"], 3000);
        assert_eq!(value["temperature"].as_f64().map(|t| (t * 10.0).round()), Some(7.0));
        assert_eq!(value["top_p"].as_f64().map(|p| (p * 10.0).round()), Some(9.0));
    }

    #[test]
    fn first_message_reads_first_choice() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "gen-1",
            "choices": [
                {"message": {"role": "assistant", "content": "primeiro"}},
                {"message": {"role": "assistant", "content": "segundo"}}
            ]
        }))
        .unwrap();

        let message = response.first_message().unwrap();
        assert_eq!(message.content, Some(json!("primeiro")));
    }

    #[test]
    fn malformed_shapes_have_no_first_message() {
        for body in [
            json!({}),
            json!(null),
            json!("texto"),
            json!([{"message": {"content": "x"}}]),
            json!({"choices": null}),
            json!({"choices": []}),
            json!({"choices": {}}),
            json!({"choices": "x"}),
            json!({"choices": 1}),
            json!({"choices": [null]}),
            json!({"choices": [0]}),
            json!({"choices": [""]}),
            json!({"choices": [{"finish_reason": "stop"}]}),
            json!({"choices": [{"message": null}]}),
            json!({"choices": [{"message": false}]}),
            json!({"choices": [{"message": ""}]}),
        ] {
            let response: ChatCompletionResponse = serde_json::from_value(body.clone()).unwrap();
            assert!(response.first_message().is_none(), "{body}");
        }
    }

    #[test]
    fn loosely_typed_messages_still_count() {
        let cases = [
            (json!({"choices": [{"message": "str"}]}), None),
            (json!({"choices": [{"message": {}}]}), None),
            (json!({"choices": [{"message": {"content": null}}]}), Some(Value::Null)),
            (json!({"choices": [{"message": {"content": 42}}]}), Some(json!(42))),
            (json!({"choices": {"0": {"message": {"content": "a"}}}}), Some(json!("a"))),
        ];

        for (body, content) in cases {
            let response: ChatCompletionResponse = serde_json::from_value(body.clone()).unwrap();
            let message = response.first_message().unwrap_or_else(|| panic!("{body}"));
            assert_eq!(message.content, content, "{body}");
        }
    }
}
