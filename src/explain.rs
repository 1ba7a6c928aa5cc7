//! Explanation client - short, kid-friendly explanations from a text model.
//!
//! [`ExplanationClient::explain`] always hands back something to show. A
//! disabled client or an empty reply yields [`FALLBACK_EMPTY`]; a transport
//! failure or a missing API key yields [`FALLBACK_TRANSPORT`]. Failures are
//! logged, never returned.
//!
//! The model call sits behind the [`TextGenerator`] trait. On native targets
//! [`GeminiGenerator`] posts to the generateContent endpoint with a
//! blocking reqwest client; tests and browser hosts plug in their own.
//!
//! Hosts that run the call in the background pair it with
//! [`RequestTokens`] so that only the reply to the latest request is shown.

use serde::Deserialize;

use crate::config::ExplainConfig;
use crate::Result;

/// Shown when the model returned nothing, or the client is disabled.
pub const FALLBACK_EMPTY: &str = "魔法师正在休息，请稍后再试。";

/// Shown when the request could not be made or failed.
pub const FALLBACK_TRANSPORT: &str = "魔法师现在的信号不太好，请稍后再试哦！";

/// Something that turns a prompt into text.
pub trait TextGenerator {
    /// Run the prompt once. An empty string means "no content".
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Build the prompt for `topic` at a `side`×`side` resolution.
pub fn explanation_prompt(topic: &str, side: usize) -> String {
    format!(
        "你是一位亲切的小学信息科技老师。\n\
         请给四年级的小学生解释一下：当图像的分辨率为 {side}x{side} 时，\n\
         关于\"{topic}\"的知识。\n\
         \n\
         要求：\n\
         1. 语言通俗易懂，多用比喻。\n\
         2. 字数控制在 100 字以内。\n\
         3. 语气要活泼有趣。"
    )
}

/// Client that never fails past its boundary.
pub struct ExplanationClient {
    generator: Option<Box<dyn TextGenerator>>,
    // set when the generator could not be built, e.g. no API key
    unavailable: bool,
}

impl std::fmt::Debug for ExplanationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplanationClient")
            .field("has_generator", &self.generator.is_some())
            .field("unavailable", &self.unavailable)
            .finish()
    }
}

impl ExplanationClient {
    /// Wrap an existing generator.
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
            unavailable: false,
        }
    }

    /// A client that answers every request with [`FALLBACK_EMPTY`].
    pub fn disabled() -> Self {
        Self {
            generator: None,
            unavailable: false,
        }
    }

    /// Build the default client from configuration.
    ///
    /// On native targets this is a [`GeminiGenerator`]. If it cannot be
    /// built the client still works and answers with
    /// [`FALLBACK_TRANSPORT`].
    pub fn from_config(config: &ExplainConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }
        match default_generator(config) {
            Ok(generator) => Self::new(generator),
            Err(e) => {
                log::warn!("explanation client unavailable: {e}");
                Self {
                    generator: None,
                    unavailable: true,
                }
            }
        }
    }

    /// Explain `topic` for a `side`×`side` image.
    ///
    /// Always returns non-empty text.
    pub fn explain(&self, topic: &str, side: usize) -> String {
        let Some(generator) = self.generator.as_ref() else {
            return if self.unavailable {
                FALLBACK_TRANSPORT.to_string()
            } else {
                FALLBACK_EMPTY.to_string()
            };
        };
        match generator.generate(&explanation_prompt(topic, side)) {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                log::warn!("explanation for {topic:?} came back empty");
                FALLBACK_EMPTY.to_string()
            }
            Err(e) => {
                log::warn!("explanation for {topic:?} failed: {e}");
                FALLBACK_TRANSPORT.to_string()
            }
        }
    }
}

/// Identifies one explanation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Issues request tokens and recognises the latest one.
///
/// # Example
///
/// ```
/// use pixelbits::explain::RequestTokens;
///
/// let mut tokens = RequestTokens::new();
/// let first = tokens.issue();
/// let second = tokens.issue();
/// // the reply to `first` arrives late and is dropped
/// assert!(!tokens.accept(first));
/// assert!(tokens.accept(second));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestTokens {
    latest: u64,
}

impl RequestTokens {
    /// No token issued yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding all earlier ones.
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// Whether a reply for `token` should be shown.
    pub fn accept(&self, token: RequestToken) -> bool {
        token.0 == self.latest && self.latest != 0
    }
}

// ---- generateContent wire format ----

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    // Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Extract the reply text from a generateContent JSON body.
pub fn parse_generate_response(json: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(json)?;
    Ok(response.text())
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::GeminiGenerator;

#[cfg(not(target_arch = "wasm32"))]
fn default_generator(config: &ExplainConfig) -> Result<Box<dyn TextGenerator>> {
    Ok(Box::new(GeminiGenerator::from_config(config)?))
}

#[cfg(target_arch = "wasm32")]
fn default_generator(_config: &ExplainConfig) -> Result<Box<dyn TextGenerator>> {
    Err(crate::PixelError::ExplanationUnavailable(
        "no built-in generator on wasm".into(),
    ))
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::Duration;

    use reqwest::blocking::Client;

    use super::{GenerateResponse, TextGenerator};
    use crate::config::ExplainConfig;
    use crate::{PixelError, Result};

    /// Blocking client for the generateContent endpoint.
    pub struct GeminiGenerator {
        client: Client,
        url: String,
        api_key: String,
    }

    impl GeminiGenerator {
        /// Build a generator, reading the API key from the configured
        /// environment variable.
        pub fn from_config(config: &ExplainConfig) -> Result<Self> {
            let api_key = std::env::var(&config.api_key_env)
                .ok()
                .filter(|key| !key.is_empty())
                .ok_or_else(|| {
                    PixelError::ExplanationUnavailable(format!("{} is not set", config.api_key_env))
                })?;
            Self::with_key(config, api_key)
        }

        /// Build a generator with an explicit API key.
        pub fn with_key(config: &ExplainConfig, api_key: String) -> Result<Self> {
            let client = Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .map_err(|e| PixelError::ExplanationUnavailable(e.to_string()))?;
            Ok(Self {
                client,
                url: config.url(),
                api_key,
            })
        }
    }

    impl TextGenerator for GeminiGenerator {
        fn generate(&self, prompt: &str) -> Result<String> {
            log::debug!("POST {}", self.url);
            let body = serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            });
            let response = self
                .client
                .post(&self.url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .and_then(|r| r.error_for_status())
                .map_err(|e| PixelError::ExplanationUnavailable(e.to_string()))?;
            let parsed: GenerateResponse = response
                .json()
                .map_err(|e| PixelError::ExplanationUnavailable(e.to_string()))?;
            Ok(parsed.text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelError;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Canned {
        reply: Result<String>,
        prompts: Rc<RefCell<Vec<String>>>,
    }

    impl TextGenerator for Canned {
        fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.borrow_mut().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(PixelError::ExplanationUnavailable(e.to_string())),
            }
        }
    }

    fn client(reply: Result<String>) -> (ExplanationClient, Rc<RefCell<Vec<String>>>) {
        let prompts = Rc::new(RefCell::new(Vec::new()));
        let generator = Canned {
            reply,
            prompts: Rc::clone(&prompts),
        };
        (ExplanationClient::new(Box::new(generator)), prompts)
    }

    #[test]
    fn test_returns_trimmed_reply() {
        let (client, prompts) = client(Ok("  像素就是小方块！ \n".into()));
        assert_eq!(client.explain("像素", 8), "像素就是小方块！");
        let prompts = prompts.borrow();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("8x8"));
        assert!(prompts[0].contains("\"像素\""));
    }

    #[test]
    fn test_empty_reply_falls_back() {
        let (client, _) = client(Ok("   ".into()));
        assert_eq!(client.explain("分辨率", 16), FALLBACK_EMPTY);
    }

    #[test]
    fn test_error_falls_back() {
        let (client, _) = client(Err(PixelError::Other("timeout".into())));
        assert_eq!(client.explain("分辨率", 16), FALLBACK_TRANSPORT);
    }

    #[test]
    fn test_disabled() {
        let config = ExplainConfig {
            enabled: false,
            ..ExplainConfig::default()
        };
        let client = ExplanationClient::from_config(&config);
        assert_eq!(client.explain("像素", 8), FALLBACK_EMPTY);
    }

    #[test]
    fn test_missing_key_falls_back_to_transport() {
        let config = ExplainConfig {
            api_key_env: "PIXELBITS_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..ExplainConfig::default()
        };
        let client = ExplanationClient::from_config(&config);
        assert_eq!(client.explain("像素", 8), FALLBACK_TRANSPORT);
    }

    #[test]
    fn test_parse_generate_response() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "像素"}, {"text": "是小格子"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        assert_eq!(parse_generate_response(json).unwrap(), "像素是小格子");
        assert_eq!(parse_generate_response("{}").unwrap(), "");
        assert!(parse_generate_response("not json").is_err());
    }

    #[test]
    fn test_request_tokens() {
        let mut tokens = RequestTokens::new();
        assert!(!tokens.accept(RequestToken(0)));
        let a = tokens.issue();
        assert!(tokens.accept(a));
        let b = tokens.issue();
        assert!(b > a);
        assert!(!tokens.accept(a));
        assert!(tokens.accept(b));
    }
}
