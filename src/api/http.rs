use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AssistantApi, ChatError, ChatResult, HistoryEntry, SendReply};

const API_BASE_VAR: &str = "COURSEMATE_API_BASE";
const API_KEY_VAR: &str = "COURSEMATE_API_KEY";

/// `reqwest`-backed client for the marketplace assistant endpoints.
pub struct HttpAssistantApi {
    client: Client,
    base: String,
    api_key: Option<String>,
}

impl HttpAssistantApi {
    pub fn new(base: impl Into<String>, api_key: Option<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base,
            api_key,
        }
    }

    /// Read endpoint configuration from the environment:
    /// `COURSEMATE_API_BASE` (required) and `COURSEMATE_API_KEY`
    /// (optional bearer token).
    pub fn from_env() -> anyhow::Result<Self> {
        let base = std::env::var(API_BASE_VAR)
            .map_err(|_| anyhow::anyhow!("{API_BASE_VAR} is not set"))?;
        let api_key = std::env::var(API_KEY_VAR).ok();
        Ok(Self::new(base, api_key))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    async fn post<T, R>(&self, path: &str, payload: &T) -> ChatResult<R>
    where
        T: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let mut request = self.client.post(self.endpoint(path)).json(payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(ChatError::Endpoint {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryRequest<'a> {
    identity: &'a str,
    page: u64,
    page_size: usize,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    identity: Option<&'a str>,
    body: &'a str,
}

#[derive(Serialize)]
struct ClearRequest<'a> {
    identity: &'a str,
}

#[derive(Deserialize)]
struct HistoryResponse {
    items: Vec<HistoryEntry>,
}

#[derive(Deserialize)]
struct ClearResponse {}

#[async_trait]
impl AssistantApi for HttpAssistantApi {
    async fn fetch_history(
        &self,
        identity: &str,
        page: u64,
        page_size: usize,
    ) -> ChatResult<Vec<HistoryEntry>> {
        let response: HistoryResponse = self
            .post(
                "chat/history",
                &HistoryRequest {
                    identity,
                    page,
                    page_size,
                },
            )
            .await?;
        Ok(response.items)
    }

    async fn send_message(&self, identity: Option<&str>, body: &str) -> ChatResult<SendReply> {
        self.post("chat/send", &SendRequest { identity, body }).await
    }

    async fn clear_history(&self, identity: &str) -> ChatResult<()> {
        let _: ClearResponse = self.post("chat/clear", &ClearRequest { identity }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let api = HttpAssistantApi::new("https://api.example.com/v1/", None);
        assert_eq!(
            api.endpoint("chat/history"),
            "https://api.example.com/v1/chat/history"
        );
    }

    #[test]
    fn test_send_request_omits_identity_for_guests() {
        let guest = serde_json::to_value(SendRequest {
            identity: None,
            body: "hi",
        })
        .unwrap();
        assert_eq!(guest, serde_json::json!({ "body": "hi" }));

        let signed_in = serde_json::to_value(SendRequest {
            identity: Some("user-7"),
            body: "hi",
        })
        .unwrap();
        assert_eq!(
            signed_in,
            serde_json::json!({ "identity": "user-7", "body": "hi" })
        );
    }

    #[test]
    fn test_history_request_uses_camel_case_page_size() {
        let value = serde_json::to_value(HistoryRequest {
            identity: "user-7",
            page: 2,
            page_size: 20,
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "identity": "user-7", "page": 2, "pageSize": 20 })
        );
    }

    #[test]
    fn test_send_reply_parses_partial_payloads() {
        let full: SendReply =
            serde_json::from_str(r#"{"replyBody":"hi there","detectedLanguage":"vi"}"#).unwrap();
        assert_eq!(full.reply_body.as_deref(), Some("hi there"));
        assert_eq!(full.detected_language.as_deref(), Some("vi"));

        let empty: SendReply = serde_json::from_str("{}").unwrap();
        assert!(empty.reply_body.is_none());
        assert!(empty.detected_language.is_none());
    }
}
