use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RequestError;

pub const DEFAULT_ACTION: &str = "Unknown Action";

/// Fields the dispatcher needs from a fulfillment webhook call.
#[derive(Clone, Debug, PartialEq)]
pub struct IntentRequest {
    pub action: String,
    pub parameters: Map<String, Value>,
    pub callback_token: Option<String>,
}

impl IntentRequest {
    pub fn from_body(body: &Value) -> Result<Self, RequestError> {
        let query_result = body
            .get("queryResult")
            .and_then(Value::as_object)
            .ok_or(RequestError::MissingQueryResult)?;

        let action = query_result
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_ACTION)
            .to_string();
        let parameters = query_result
            .get("parameters")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Ok(Self {
            action,
            parameters,
            callback_token: callback_token(body),
        })
    }
}

/// `originalDetectIntentRequest.payload.data.callback_query.data`, if every level exists.
fn callback_token(body: &Value) -> Option<String> {
    ["originalDetectIntentRequest", "payload", "data", "callback_query", "data"]
        .iter()
        .try_fold(body, |node, key| node.get(*key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentResponse {
    pub fulfillment_messages: Vec<FulfillmentMessage>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct FulfillmentMessage {
    pub text: TextMessage,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct TextMessage {
    pub text: Vec<String>,
}

impl FulfillmentResponse {
    pub fn from_texts(texts: Vec<String>) -> Self {
        Self {
            fulfillment_messages: vec![FulfillmentMessage {
                text: TextMessage { text: texts },
            }],
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.fulfillment_messages
            .iter()
            .flat_map(|message| message.text.text.iter().map(String::as_str))
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: &'static str,
}
