//! Serverless handlers that keep third-party API keys on the server side.
//!
//! Both handlers take an API Gateway / function URL style event and always
//! answer with a JSON [`HttpResponse`]; failures become status codes, never
//! panics or `Err`s.

pub mod contact;
pub mod tts;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub use contact::ContactProxy;
pub use tts::TtsProxy;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpContext {
    pub method: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub http: Option<HttpContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpEvent {
    /// REST API (payload v1)
    pub http_method: Option<String>,
    /// HTTP API / function URL (payload v2)
    pub request_context: Option<RequestContext>,
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl HttpEvent {
    pub fn post(body: impl Into<String>) -> Self {
        Self {
            http_method: Some("POST".to_string()),
            body: Some(body.into()),
            ..Default::default()
        }
    }

    pub fn with_method(method: &str) -> Self {
        Self {
            http_method: Some(method.to_string()),
            ..Default::default()
        }
    }

    pub fn method(&self) -> &str {
        self.http_method
            .as_deref()
            .or_else(|| {
                self.request_context
                    .as_ref()
                    .and_then(|ctx| ctx.http.as_ref())
                    .and_then(|http| http.method.as_deref())
            })
            .unwrap_or("GET")
    }

    pub fn is_post(&self) -> bool {
        self.method().eq_ignore_ascii_case("POST")
    }

    /// Parses the body as JSON; an absent or empty body is `{}`.
    pub fn json_body(&self) -> Result<Value, String> {
        let raw = match &self.body {
            None => return Ok(Value::Object(Default::default())),
            Some(body) if self.is_base64_encoded => {
                let bytes = STANDARD.decode(body).map_err(|e| e.to_string())?;
                String::from_utf8(bytes).map_err(|e| e.to_string())?
            }
            Some(body) => body.clone(),
        };

        if raw.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        serde_json::from_str(&raw).map_err(|e| e.to_string())
    }
}

/// `null`, `false`, `0` and `""` count as "not provided".
pub(crate) fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn json(status_code: u16, body: &Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body: body.to_string(),
        }
    }

    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self::json(status_code, &serde_json::json!({ "error": message.into() }))
    }

    pub fn body_json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

/// The handler a Lambda deployment serves.
pub enum Proxy {
    Contact(ContactProxy),
    Tts(TtsProxy),
}

impl Proxy {
    pub async fn handle(&self, event: HttpEvent) -> HttpResponse {
        match self {
            Proxy::Contact(proxy) => proxy.handle(event).await,
            Proxy::Tts(proxy) => proxy.handle(event).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_either_payload_version() {
        let v1: HttpEvent = serde_json::from_value(serde_json::json!({
            "httpMethod": "POST",
            "body": "{}"
        }))
        .unwrap();
        assert!(v1.is_post());

        let v2: HttpEvent = serde_json::from_value(serde_json::json!({
            "requestContext": { "http": { "method": "GET" } },
            "body": null
        }))
        .unwrap();
        assert_eq!(v2.method(), "GET");
        assert!(!v2.is_post());
    }

    #[test]
    fn test_base64_body_is_decoded() {
        let event = HttpEvent {
            http_method: Some("POST".to_string()),
            body: Some(STANDARD.encode(r#"{"text":"Bonjour"}"#)),
            is_base64_encoded: true,
            ..Default::default()
        };
        assert_eq!(event.json_body().unwrap()["text"], "Bonjour");
    }

    #[test]
    fn test_empty_body_is_empty_object() {
        let event = HttpEvent::post("");
        assert_eq!(event.json_body().unwrap(), serde_json::json!({}));
        assert!(HttpEvent::post("{not json").json_body().is_err());
    }

    #[test]
    fn test_blank_values() {
        use serde_json::json;
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(is_blank(Some(&value)), "{} should be blank", value);
        }
        for value in [json!(true), json!(1), json!(" "), json!({}), json!([])] {
            assert!(!is_blank(Some(&value)), "{} should not be blank", value);
        }
        assert!(is_blank(None));
    }

    #[test]
    fn test_response_shape() {
        let response = HttpResponse::error(405, "Method not allowed");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["statusCode"], 405);
        assert_eq!(json["headers"]["Content-Type"], "application/json");
        assert_eq!(response.body_json()["error"], "Method not allowed");
    }
}
