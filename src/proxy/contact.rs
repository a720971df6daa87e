use crate::proxy::{is_blank, HttpEvent, HttpResponse};
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Map, Value};

pub const SYSTEME_API_BASE: &str = "https://api.systeme.io";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemeRegion {
    #[default]
    Eu,
    Us,
}

impl SystemeRegion {
    /// `us` selects the US region; anything else falls back to EU.
    pub fn from_setting(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "us" => SystemeRegion::Us,
            "" | "eu" => SystemeRegion::Eu,
            other => {
                tracing::warn!("⚠️ Unknown Systeme.io region '{}', using eu", other);
                SystemeRegion::Eu
            }
        }
    }

    /// 兩個區域目前共用同一個 API 主機
    pub fn base_url(&self) -> &'static str {
        match self {
            SystemeRegion::Eu | SystemeRegion::Us => SYSTEME_API_BASE,
        }
    }
}

/// Status and raw body of one upstream call, echoed back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

/// Creates a Systeme.io contact, then sets its custom fields.
pub struct ContactProxy {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl ContactProxy {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn handle(&self, event: HttpEvent) -> HttpResponse {
        if !event.is_post() {
            return HttpResponse::error(405, "Method not allowed");
        }

        let body = match event.json_body() {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("❌ Unreadable contact request body: {}", e);
                return HttpResponse::error(500, e);
            }
        };

        let Some(api_key) = self.api_key.as_deref() else {
            tracing::error!("❌ SYSTEME_IO_API_KEY is not configured");
            return HttpResponse::error(500, "Missing SYSTEME_IO_API_KEY");
        };

        // 非物件的 JSON (如 `null`) 無法讀取欄位
        if body.is_null() {
            return HttpResponse::error(500, "request body must be a JSON object");
        }

        let email = string_field(&body, "email");
        if email.is_empty() {
            return HttpResponse::error(400, "email is required");
        }
        let first_name = string_field(&body, "firstName");

        match self.create_and_update(api_key, &email, &first_name, &body).await {
            Ok((create, update)) => {
                HttpResponse::json(200, &json!({ "create": create, "update": update }))
            }
            Err(e) => {
                tracing::error!("❌ Systeme.io request failed: {}", e);
                HttpResponse::error(500, e.to_string())
            }
        }
    }

    async fn create_and_update(
        &self,
        api_key: &str,
        email: &str,
        first_name: &str,
        body: &Value,
    ) -> Result<(UpstreamReply, Option<UpstreamReply>), reqwest::Error> {
        let mut contact = Map::new();
        contact.insert("email".to_string(), json!(email));
        if !first_name.is_empty() {
            contact.insert("first_name".to_string(), json!(first_name));
        }

        tracing::info!("👤 Creating Systeme.io contact");
        let create = self
            .post_json(&format!("{}/contacts", self.base_url), api_key, &Value::Object(contact))
            .await?;
        tracing::info!("👤 Create responded {}", create.status);

        let custom_fields = custom_fields(body);
        let update = if custom_fields.is_empty() {
            None
        } else {
            tracing::info!("🏷️ Updating {} custom field(s)", custom_fields.len());
            let reply = self
                .post_json(
                    &format!("{}/contacts/update-by-email", self.base_url),
                    api_key,
                    &json!({ "email": email, "custom_fields": custom_fields }),
                )
                .await?;
            Some(reply)
        };

        Ok((create, update))
    }

    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        data: &Value,
    ) -> Result<UpstreamReply, reqwest::Error> {
        let response = self
            .client
            .post(url)
            .header("X-Api-Key", api_key)
            .json(data)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(UpstreamReply { status, body })
    }
}

/// Trimmed text of a field; blank values (`false`, `0`, `null`, `""`) are empty.
fn string_field(body: &Value, key: &str) -> String {
    match body.get(key) {
        value if is_blank(value) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Birth date when it is not blank, life path number when present.
fn custom_fields(body: &Value) -> Map<String, Value> {
    let mut fields = Map::new();

    if let Some(birth_date) = body.get("birthDate").filter(|v| !is_blank(Some(v))) {
        fields.insert("date_de_naissance".to_string(), birth_date.clone());
    }

    match body.get("lifePathNumber") {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) => {
            fields.insert("life_path_number".to_string(), json!(s));
        }
        Some(other) => {
            fields.insert("life_path_number".to_string(), json!(other.to_string()));
        }
    }

    fields
}
