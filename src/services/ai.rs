//! AI-assisted transaction entry
//!
//! Free text, a receipt image, or a transcribed voice note is sent to a
//! chat-completion API together with the user's categories, payment methods
//! and currencies. The model answers with a JSON object holding a
//! transaction draft and a short message.

use std::path::Path;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::{error_message, mime_for_path, FormPart, HttpRequest, Method, Transport};
use crate::config::AiSettings;
use crate::error::{FinanzError, FinanzResult};
use crate::models::{Category, CreateTransactionRequest, Currency, PaymentMethod};

use super::mock_data::{DEFAULT_CATEGORY_ID, DEFAULT_CURRENCY_ID, DEFAULT_PAYMENT_METHOD_ID};

/// Instructions sent as the system message
pub const SYSTEM_PROMPT: &str = "You are an assistant that turns the user's message into a JSON \
object describing a transaction for an income and expense tracking app.\n\n\
If the message cannot be turned into that JSON, because information is missing or because it is \
about an unrelated topic, reply with a short message explaining the problem.\n\
{\n\
\"transaction\":{\n\
  \"amount\": 42.99,\n\
  \"description\": \"Dinner at an Italian restaurant\",\n\
  \"category_id\": \"a1b2c3d4-e5f6-7890-ab12-cd34ef56gh78\",\n\
  \"type\": \"EXPENSE\",\n\
  \"payment_method_id\": \"987f6543-21ba-4cde-bc43-112233445566\",\n\
  \"currency_id\": \"123e4567-e89b-12d3-a456-426614174000\",\n\
  \"date\": \"2025-05-10T20:15:00Z\"\n\
},\n\
\"message\": \"a short error or success message\"\n\
}\n\
The type is either EXPENSE or INCOME.\n\
category_id, payment_method_id and currency_id must be chosen from the context the user provides.\n\n\
Infer the remaining properties from the user's message.\n\n\
Your reply must be nothing but an object like the example, starting with { and ending with }\n";

/// Appended to the system prompt for every request
pub const JSON_ONLY_SUFFIX: &str =
    "\n\nIMPORTANT: Reply ONLY with a valid JSON object, with no additional text.";

/// Appended after `JSON_ONLY_SUFFIX` for image requests
pub const IMAGE_SUFFIX: &str =
    " If you cannot process the image, return a JSON object with an error message.";

/// User text sent alongside an image
pub const IMAGE_USER_MESSAGE: &str = "read the image";

const TEXT_PARSE_FAILURE: &str = "Could not process the text: the reply was not valid JSON. \
Please try again with a clearer description.";

const IMAGE_PARSE_FAILURE: &str = "Could not analyze the image: the reply was not valid JSON. \
Please try again with a clearer image.";

/// What kind of input produced a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    Text,
    Image,
}

// === Chat request wire types ===

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    pub response_format: ResponseFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(content: MessageContent) -> Self {
        Self {
            role: "user".to_string(),
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrl {
    pub url: String,
    pub detail: String,
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

// === Inputs ===

/// An image to read a transaction from
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl ImageInput {
    pub fn from_path(path: &Path) -> FinanzResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| FinanzError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let mime = mime_for_path(path);
        if !mime.starts_with("image/") {
            return Err(FinanzError::Validation(format!(
                "{} is not a supported image (png, jpg, gif, webp)",
                path.display()
            )));
        }
        Ok(Self {
            bytes,
            mime: mime.to_string(),
        })
    }

    /// `data:<mime>;base64,<payload>`
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }
}

/// A recorded voice note
#[derive(Debug, Clone, PartialEq)]
pub struct AudioInput {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl AudioInput {
    pub fn from_path(path: &Path) -> FinanzResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| FinanzError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let mime = mime_for_path(path);
        if !mime.starts_with("audio/") {
            return Err(FinanzError::Validation(format!(
                "{} is not a supported audio file (mp3, m4a, wav, webm, ogg, flac)",
                path.display()
            )));
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());
        Ok(Self {
            file_name,
            mime: mime.to_string(),
            bytes,
        })
    }
}

// === Context ===

/// An `{id, name}` row offered to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    pub id: String,
    pub name: String,
}

/// The lists the model may pick IDs from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AiContext {
    pub categories: Vec<ContextEntry>,
    pub payment_methods: Vec<ContextEntry>,
    pub currencies: Vec<ContextEntry>,
}

impl AiContext {
    pub fn from_lists(
        categories: &[Category],
        payment_methods: &[PaymentMethod],
        currencies: &[Currency],
    ) -> Self {
        Self {
            categories: categories
                .iter()
                .map(|c| ContextEntry {
                    id: c.id.to_string(),
                    name: c.name.clone(),
                })
                .collect(),
            payment_methods: payment_methods
                .iter()
                .map(|m| ContextEntry {
                    id: m.id.to_string(),
                    name: m.name.clone(),
                })
                .collect(),
            currencies: currencies
                .iter()
                .map(|c| ContextEntry {
                    id: c.id.to_string(),
                    name: c.name.clone(),
                })
                .collect(),
        }
    }
}

fn push_table(out: &mut String, title: &str, rows: &[ContextEntry]) {
    out.push_str(title);
    out.push_str(":\n| id | name |\n");
    for row in rows {
        out.push_str(&format!("| {} | {} |\n", row.id, row.name));
    }
}

/// Render the context block. Empty when there is no context.
pub fn build_context(context: Option<&AiContext>, now: DateTime<Utc>) -> String {
    let Some(context) = context else {
        return String::new();
    };

    let mut out = String::new();

    push_table(&mut out, "categories", &context.categories);
    out.push_str(&format!(
        "(if no category context is given, use {} by default)\n",
        DEFAULT_CATEGORY_ID
    ));

    push_table(&mut out, "PaymentMethods", &context.payment_methods);
    out.push_str(&format!(
        "(if no context is given, always use {})\n",
        DEFAULT_PAYMENT_METHOD_ID
    ));

    push_table(&mut out, "currencies", &context.currencies);
    out.push_str(&format!(
        "(if no context is given, use only {} by default)\n",
        DEFAULT_CURRENCY_ID
    ));

    out.push_str(&format!(
        "date: {}\n",
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    out.push_str("If the message gives no date, infer it as a string relative to the current date\n");

    out
}

fn user_content(context: &str, message: &str) -> String {
    format!("<context>{}</context>\n<message>{}</message>", context, message)
}

// === Parsing ===

/// The model's answer: an optional transaction draft and a message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiTransactionResponse {
    pub transaction: Option<CreateTransactionRequest>,
    pub message: String,
}

impl AiTransactionResponse {
    pub fn into_request(self) -> Option<CreateTransactionRequest> {
        self.transaction
    }

    pub fn has_transaction(&self) -> bool {
        self.transaction.is_some()
    }
}

/// Parse a completion. Never fails: invalid JSON becomes a message.
pub fn parse_completion(content: &str, kind: CompletionKind) -> AiTransactionResponse {
    let value: serde_json::Value = match serde_json::from_str(content.trim()) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "completion was not valid JSON");
            let message = match kind {
                CompletionKind::Text => TEXT_PARSE_FAILURE,
                CompletionKind::Image => IMAGE_PARSE_FAILURE,
            };
            return AiTransactionResponse {
                transaction: None,
                message: message.to_string(),
            };
        }
    };

    let message = value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    let mut rejected = false;
    let transaction = match value.get("transaction") {
        None | Some(serde_json::Value::Null) => None,
        Some(raw) => match serde_json::from_value::<CreateTransactionRequest>(raw.clone()) {
            Ok(request) => Some(request),
            Err(e) => {
                warn!(error = %e, "completion transaction did not match the expected shape");
                rejected = true;
                None
            }
        },
    };

    let message = message.unwrap_or_else(|| {
        if transaction.is_some() {
            "Transaction ready to review.".to_string()
        } else if rejected {
            "The reply contained a transaction that could not be read.".to_string()
        } else {
            "No transaction could be extracted from the input.".to_string()
        }
    });

    AiTransactionResponse {
        transaction,
        message,
    }
}

// === Backend ===

/// A hosted completion API
pub trait CompletionBackend: Send + Sync {
    /// Run a chat completion, returning the first choice's content
    fn complete(&self, request: &ChatRequest) -> FinanzResult<String>;

    /// Speech to text
    fn transcribe(&self, audio: &AudioInput, model: &str, language: &str) -> FinanzResult<String>;
}

/// OpenAI-compatible backend over the shared transport
pub struct OpenAiBackend {
    transport: Arc<dyn Transport>,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiBackend {
    pub fn new(transport: Arc<dyn Transport>, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            transport,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_settings(transport: Arc<dyn Transport>, settings: &AiSettings) -> Self {
        Self::new(transport, &settings.base_url, settings.api_key())
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn authorized(&self, request: HttpRequest) -> FinanzResult<HttpRequest> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| FinanzError::Ai("API key not configured".into()))?;
        let mut request = request;
        request.set_bearer(key);
        Ok(request)
    }

    fn send(&self, request: HttpRequest, what: &str) -> FinanzResult<Vec<u8>> {
        debug!(url = %request.url, "calling completion API");
        let response = self
            .transport
            .send(&request)
            .map_err(|e| FinanzError::Ai(format!("{} request failed: {}", what, e)))?;
        if !response.is_success() {
            return Err(FinanzError::Ai(format!(
                "{} failed (HTTP {}): {}",
                what,
                response.status,
                error_message(&response)
            )));
        }
        Ok(response.body)
    }
}

impl CompletionBackend for OpenAiBackend {
    fn complete(&self, request: &ChatRequest) -> FinanzResult<String> {
        let body = serde_json::to_value(request)?;
        let http = self.authorized(
            HttpRequest::new(Method::Post, format!("{}/chat/completions", self.base_url))
                .json(body),
        )?;

        let bytes = self.send(http, "Completion")?;
        let completion: ChatCompletion = serde_json::from_slice(&bytes)
            .map_err(|e| FinanzError::Ai(format!("Unexpected completion response: {}", e)))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_else(|| "{}".to_string()))
    }

    fn transcribe(&self, audio: &AudioInput, model: &str, language: &str) -> FinanzResult<String> {
        let parts = vec![
            FormPart::File {
                name: "file".to_string(),
                file_name: audio.file_name.clone(),
                mime: audio.mime.clone(),
                bytes: audio.bytes.clone(),
            },
            FormPart::Text {
                name: "model".to_string(),
                value: model.to_string(),
            },
            FormPart::Text {
                name: "language".to_string(),
                value: language.to_string(),
            },
            FormPart::Text {
                name: "response_format".to_string(),
                value: "text".to_string(),
            },
        ];
        let http = self.authorized(
            HttpRequest::new(
                Method::Post,
                format!("{}/audio/transcriptions", self.base_url),
            )
            .multipart(parts),
        )?;

        let bytes = self.send(http, "Transcription")?;
        Ok(String::from_utf8_lossy(&bytes).trim().to_string())
    }
}

// === Service ===

/// Turns user input into transaction drafts
pub struct AiService<'a> {
    backend: &'a dyn CompletionBackend,
    settings: &'a AiSettings,
}

impl<'a> AiService<'a> {
    pub fn new(backend: &'a dyn CompletionBackend, settings: &'a AiSettings) -> Self {
        Self { backend, settings }
    }

    pub fn process_text(
        &self,
        message: &str,
        context: Option<&AiContext>,
    ) -> FinanzResult<AiTransactionResponse> {
        let message = message.trim();
        if message.is_empty() {
            return Err(FinanzError::Validation("Message cannot be empty".into()));
        }

        let context = build_context(context, Utc::now());
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(format!("{}{}", SYSTEM_PROMPT, JSON_ONLY_SUFFIX)),
                ChatMessage::user(MessageContent::Text(user_content(&context, message))),
            ],
            temperature: Some(self.settings.temperature),
            max_tokens: None,
            response_format: ResponseFormat::json_object(),
        };

        let content = self.backend.complete(&request)?;
        Ok(parse_completion(&content, CompletionKind::Text))
    }

    pub fn process_image(
        &self,
        image: &ImageInput,
        context: Option<&AiContext>,
    ) -> FinanzResult<AiTransactionResponse> {
        let context = build_context(context, Utc::now());
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(format!(
                    "{}{}{}",
                    SYSTEM_PROMPT, JSON_ONLY_SUFFIX, IMAGE_SUFFIX
                )),
                ChatMessage::user(MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: user_content(&context, IMAGE_USER_MESSAGE),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.data_url(),
                            detail: self.settings.image_detail.clone(),
                        },
                    },
                ])),
            ],
            temperature: None,
            max_tokens: Some(self.settings.max_tokens),
            response_format: ResponseFormat::json_object(),
        };

        let content = self.backend.complete(&request)?;
        Ok(parse_completion(&content, CompletionKind::Image))
    }

    /// Speech to text in the configured language
    pub fn transcribe(&self, audio: &AudioInput) -> FinanzResult<String> {
        self.backend.transcribe(
            audio,
            &self.settings.transcription_model,
            &self.settings.transcription_language,
        )
    }

    /// Transcribe a voice note, then process the text
    pub fn process_audio(
        &self,
        audio: &AudioInput,
        context: Option<&AiContext>,
    ) -> FinanzResult<(String, AiTransactionResponse)> {
        let transcript = self.transcribe(audio)?;
        if transcript.is_empty() {
            return Err(FinanzError::Ai("The transcription was empty".into()));
        }
        let response = self.process_text(&transcript, context)?;
        Ok((transcript, response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedTransport;
    use crate::api::RequestBody;
    use crate::models::TransactionType;
    use crate::services::mock_data;
    use chrono::TimeZone;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeBackend {
        reply: String,
        transcript: String,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl FakeBackend {
        fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                transcript: "lunch 12 dollars".to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn last(&self) -> ChatRequest {
            self.seen.lock().unwrap().last().unwrap().clone()
        }
    }

    impl CompletionBackend for FakeBackend {
        fn complete(&self, request: &ChatRequest) -> FinanzResult<String> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.reply.clone())
        }

        fn transcribe(&self, _: &AudioInput, _: &str, _: &str) -> FinanzResult<String> {
            Ok(self.transcript.clone())
        }
    }

    fn draft_reply() -> String {
        json!({
            "transaction": {
                "amount": 42.99,
                "description": "Dinner",
                "category_id": "55555555-5555-5555-5555-555555555501",
                "type": "EXPENSE",
                "payment_method_id": "33333333-3333-3333-3333-333333333333",
                "currency_id": "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11",
                "date": "2025-05-10T20:15:00Z"
            },
            "message": "Saved dinner"
        })
        .to_string()
    }

    fn mock_context() -> AiContext {
        AiContext::from_lists(
            &mock_data::categories(),
            &mock_data::payment_methods(),
            &mock_data::currencies(),
        )
    }

    #[test]
    fn test_build_context_without_context_is_empty() {
        assert_eq!(build_context(None, Utc::now()), "");
    }

    #[test]
    fn test_build_context_layout() {
        let context = AiContext {
            categories: vec![ContextEntry {
                id: "c-1".into(),
                name: "Food".into(),
            }],
            payment_methods: vec![],
            currencies: vec![ContextEntry {
                id: "cur-1".into(),
                name: "Euro".into(),
            }],
        };
        let now = Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0).unwrap();
        let text = build_context(Some(&context), now);

        assert!(text.starts_with("categories:\n| id | name |\n| c-1 | Food |\n"));
        assert!(text.contains("55555555-5555-5555-5555-555555555505"));
        assert!(text.contains("PaymentMethods:\n| id | name |\n("));
        assert!(text.contains("33333333-3333-3333-3333-333333333333"));
        assert!(text.contains("currencies:\n| id | name |\n| cur-1 | Euro |\n"));
        assert!(text.contains("a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11"));
        assert!(text.contains("date: 2025-05-10T12:00:00.000Z\n"));
    }

    #[test]
    fn test_parse_valid_completion() {
        let response = parse_completion(&draft_reply(), CompletionKind::Text);
        assert_eq!(response.message, "Saved dinner");
        let request = response.into_request().unwrap();
        assert_eq!(request.amount.cents(), 4299);
        assert_eq!(request.transaction_type, TransactionType::Expense);
    }

    #[test]
    fn test_parse_invalid_json_is_a_message() {
        let text = parse_completion("sure! here you go", CompletionKind::Text);
        assert!(text.transaction.is_none());
        assert!(text.message.contains("clearer description"));

        let image = parse_completion("{oops", CompletionKind::Image);
        assert!(image.message.contains("clearer image"));
    }

    #[test]
    fn test_parse_message_only() {
        let response = parse_completion(
            r#"{"message": "That is not about money"}"#,
            CompletionKind::Text,
        );
        assert!(!response.has_transaction());
        assert_eq!(response.message, "That is not about money");
    }

    #[test]
    fn test_parse_malformed_transaction_is_dropped() {
        let response = parse_completion(
            r#"{"transaction": {"amount": "lots"}}"#,
            CompletionKind::Text,
        );
        assert!(response.transaction.is_none());
        assert!(response.message.contains("could not be read"));
    }

    fn reply_with(field: &str, value: serde_json::Value) -> String {
        let mut reply: serde_json::Value = serde_json::from_str(&draft_reply()).unwrap();
        reply["transaction"][field] = value;
        reply["message"] = serde_json::Value::Null;
        reply.to_string()
    }

    #[test]
    fn test_parse_unreadable_amount_is_dropped() {
        for amount in ["1.aé", "100000000000000000"] {
            let response = parse_completion(&reply_with("amount", json!(amount)), CompletionKind::Text);
            assert!(response.transaction.is_none(), "amount {:?}", amount);
            assert!(response.message.contains("could not be read"));
        }
    }

    #[test]
    fn test_parse_accepts_lowercase_type() {
        let response = parse_completion(&reply_with("type", json!("income")), CompletionKind::Text);
        let request = response.into_request().unwrap();
        assert_eq!(request.transaction_type, TransactionType::Income);
    }

    #[test]
    fn test_process_text_request_shape() {
        let backend = FakeBackend::replying(&draft_reply());
        let settings = AiSettings::default();
        let service = AiService::new(&backend, &settings);

        let response = service
            .process_text("dinner 42.99", Some(&mock_context()))
            .unwrap();
        assert!(response.has_transaction());

        let request = backend.last();
        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.temperature, Some(1.0));
        assert_eq!(request.max_tokens, None);

        let wire = serde_json::to_value(&request).unwrap();
        assert_eq!(wire["response_format"], json!({"type": "json_object"}));
        assert_eq!(wire["messages"][0]["role"], "system");
        assert!(wire["messages"][0]["content"]
            .as_str()
            .unwrap()
            .ends_with(JSON_ONLY_SUFFIX));

        let user = wire["messages"][1]["content"].as_str().unwrap();
        assert!(user.starts_with("<context>categories:"));
        assert!(user.ends_with("</context>\n<message>dinner 42.99</message>"));
    }

    #[test]
    fn test_process_text_rejects_empty() {
        let backend = FakeBackend::replying("{}");
        let settings = AiSettings::default();
        let err = AiService::new(&backend, &settings)
            .process_text("   ", None)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_process_image_request_shape() {
        let backend = FakeBackend::replying("not json");
        let settings = AiSettings::default();
        let image = ImageInput {
            bytes: vec![0xff, 0xd8],
            mime: "image/jpeg".into(),
        };

        let response = AiService::new(&backend, &settings)
            .process_image(&image, None)
            .unwrap();
        assert!(response.message.contains("clearer image"));

        let wire = serde_json::to_value(backend.last()).unwrap();
        assert_eq!(wire["max_tokens"], 2048);
        assert!(wire.get("temperature").is_none());
        assert!(wire["messages"][0]["content"]
            .as_str()
            .unwrap()
            .ends_with(IMAGE_SUFFIX));

        let parts = &wire["messages"][1]["content"];
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[0]["text"], "<context></context>\n<message>read the image</message>");
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(parts[1]["image_url"]["url"], "data:image/jpeg;base64,/9g=");
        assert_eq!(parts[1]["image_url"]["detail"], "low");
    }

    #[test]
    fn test_process_audio_transcribes_then_processes() {
        let backend = FakeBackend::replying(&draft_reply());
        let settings = AiSettings::default();
        let audio = AudioInput {
            file_name: "note.webm".into(),
            mime: "audio/webm".into(),
            bytes: vec![1, 2, 3],
        };

        let (transcript, response) = AiService::new(&backend, &settings)
            .process_audio(&audio, None)
            .unwrap();
        assert_eq!(transcript, "lunch 12 dollars");
        assert!(response.has_transaction());

        let wire = serde_json::to_value(backend.last()).unwrap();
        assert!(wire["messages"][1]["content"]
            .as_str()
            .unwrap()
            .contains("<message>lunch 12 dollars</message>"));
    }

    #[test]
    fn test_openai_backend_requires_key() {
        let transport = ScriptedTransport::new();
        let backend = OpenAiBackend::new(transport.clone(), "https://ai.test/v1", None);
        let request = ChatRequest {
            model: "gpt-4o".into(),
            messages: vec![],
            temperature: None,
            max_tokens: None,
            response_format: ResponseFormat::json_object(),
        };

        let err = backend.complete(&request).unwrap_err();
        assert_eq!(err.to_string(), "AI error: API key not configured");
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_openai_backend_complete() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            200,
            json!({"choices": [{"message": {"role": "assistant", "content": "{\"message\":\"hi\"}"}}]}),
        );
        transport.push_json(200, json!({"choices": [{"message": {"content": null}}]}));
        let backend =
            OpenAiBackend::new(transport.clone(), "https://ai.test/v1/", Some("sk-test".into()));
        let request = ChatRequest {
            model: "gpt-4o".into(),
            messages: vec![ChatMessage::system("x")],
            temperature: Some(1.0),
            max_tokens: None,
            response_format: ResponseFormat::json_object(),
        };

        assert_eq!(backend.complete(&request).unwrap(), "{\"message\":\"hi\"}");
        assert_eq!(backend.complete(&request).unwrap(), "{}");

        let sent = transport.request(0);
        assert_eq!(sent.url, "https://ai.test/v1/chat/completions");
        assert_eq!(sent.header_value("Authorization"), Some("Bearer sk-test"));
        assert_eq!(sent.json_body().unwrap()["model"], "gpt-4o");
    }

    #[test]
    fn test_openai_backend_transcribe() {
        let transport = ScriptedTransport::new();
        transport.push_response(crate::api::HttpResponse::new(200, "  almuerzo doce dólares\n"));
        let backend = OpenAiBackend::new(transport.clone(), "https://ai.test/v1", Some("k".into()));
        let audio = AudioInput {
            file_name: "note.webm".into(),
            mime: "audio/webm".into(),
            bytes: vec![1],
        };

        let text = backend.transcribe(&audio, "whisper-1", "es").unwrap();
        assert_eq!(text, "almuerzo doce dólares");

        let sent = transport.request(0);
        assert_eq!(sent.url, "https://ai.test/v1/audio/transcriptions");
        match sent.body {
            RequestBody::Multipart(parts) => {
                let names: Vec<&str> = parts.iter().map(|p| p.name()).collect();
                assert_eq!(names, vec!["file", "model", "language", "response_format"]);
                assert!(parts.contains(&FormPart::Text {
                    name: "language".into(),
                    value: "es".into()
                }));
            }
            other => panic!("expected multipart, got {:?}", other),
        }
    }

    #[test]
    fn test_openai_backend_http_failure() {
        let transport = ScriptedTransport::new();
        transport.push_json(429, json!({"error": {"message": "rate limited"}}));
        let backend = OpenAiBackend::new(transport.clone(), "https://ai.test/v1", Some("k".into()));
        let request = ChatRequest {
            model: "gpt-4o".into(),
            messages: vec![],
            temperature: None,
            max_tokens: None,
            response_format: ResponseFormat::json_object(),
        };

        let err = backend.complete(&request).unwrap_err();
        assert!(matches!(err, FinanzError::Ai(_)));
        assert!(err.to_string().contains("HTTP 429"));
    }
}
