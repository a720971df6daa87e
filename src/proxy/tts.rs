use crate::proxy::{is_blank, HttpEvent, HttpResponse};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};

pub const ELEVENLABS_API_BASE: &str = "https://api.elevenlabs.io";
/// Emilie, French voice
pub const DEFAULT_VOICE_ID: &str = "g5CIjZEefAph4nQFvHAz";
pub const MODEL_ID: &str = "eleven_multilingual_v2";
pub const MAX_TEXT_CHARS: usize = 2500;

#[derive(Debug, Clone, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

/// Converts text to speech through ElevenLabs and returns base64 MP3.
pub struct TtsProxy {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    voice_id: String,
    voice_settings: VoiceSettings,
}

impl TtsProxy {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            voice_id: voice_id.into(),
            voice_settings: VoiceSettings::default(),
        }
    }

    pub async fn handle(&self, event: HttpEvent) -> HttpResponse {
        if !event.is_post() {
            return HttpResponse::error(405, "Méthode non autorisée");
        }

        let text = match event.json_body() {
            Ok(body) => match body.get("text") {
                Some(Value::String(text)) if !text.is_empty() => text.clone(),
                _ => return HttpResponse::error(400, "Texte requis"),
            },
            Err(e) => {
                tracing::error!("❌ Unreadable TTS request body: {}", e);
                return HttpResponse::json(
                    500,
                    &json!({ "error": "Erreur interne du serveur", "details": e }),
                );
            }
        };

        if text.chars().count() > MAX_TEXT_CHARS {
            return HttpResponse::error(400, "Texte trop long (max 2500 caractères)");
        }

        let Some(api_key) = self.api_key.as_deref() else {
            tracing::error!("❌ ELEVENLABS_API_KEY is not configured");
            return HttpResponse::error(500, "Configuration serveur manquante");
        };

        let preview: String = text.chars().take(50).collect();
        tracing::info!("🔊 Generating speech for: {}...", preview);

        match self.synthesize(api_key, &text).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("❌ TTS request failed: {}", e);
                HttpResponse::json(
                    500,
                    &json!({ "error": "Erreur interne du serveur", "details": e.to_string() }),
                )
            }
        }
    }

    async fn synthesize(&self, api_key: &str, text: &str) -> Result<HttpResponse, reqwest::Error> {
        let url = format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id);
        let request = SpeechRequest {
            text,
            model_id: MODEL_ID,
            voice_settings: &self.voice_settings,
        };

        let response = self
            .client
            .post(&url)
            .header("Accept", "audio/mpeg")
            .header("xi-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_data: Value = response.json().await.unwrap_or(Value::Null);
            tracing::error!("❌ ElevenLabs error {}: {}", status, error_data);
            let detail = match error_data.get("detail") {
                detail if is_blank(detail) => "Erreur inconnue".to_string(),
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => "Erreur inconnue".to_string(),
            };
            return Ok(HttpResponse::error(status.as_u16(), format!("API Error: {}", detail)));
        }

        let audio = response.bytes().await?;
        tracing::info!("✅ Audio generated ({} bytes)", audio.len());

        Ok(HttpResponse::json(
            200,
            &json!({
                "success": true,
                "audio": STANDARD.encode(&audio),
                "contentType": "audio/mpeg"
            }),
        ))
    }
}
