//! Generation API client.

use crate::error::{GenerationError, Result};
use crate::types::{ClientConfig, GeneratedTrack, GenerationRequest, RecordStatus, SubmitBody};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Submit and look up generation jobs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationApi: Send + Sync {
    /// Start a job, returning its task id.
    async fn submit(&self, request: &GenerationRequest) -> Result<String>;

    /// Look up a job's current record.
    async fn fetch_record(&self, task_id: &str) -> Result<RecordStatus>;
}

/// HTTP client for the generation API.
///
/// # Example
///
/// ```ignore
/// use cadence_generation::{ClientConfig, GenerationApi, GenerationClient, GenerationRequest};
///
/// let client = GenerationClient::new(ClientConfig::new("https://apibox.erweima.ai", "key"))?;
/// let task_id = client
///     .submit(&GenerationRequest { style: "Synthwave".into(), title: "Night Drive".into() })
///     .await?;
/// let status = client.fetch_record(&task_id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: Client,
    config: ClientConfig,
}

impl GenerationClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(GenerationError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(GenerationError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Cadence/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: ClientConfig { base_url, ..config },
        })
    }

    /// Normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Fail on non-2xx, otherwise parse the JSON body.
    async fn json_body(response: Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(format!("body is not JSON: {}", e)))
    }
}

#[async_trait]
impl GenerationApi for GenerationClient {
    async fn submit(&self, request: &GenerationRequest) -> Result<String> {
        let url = self.endpoint("/api/v1/generate");
        let body = SubmitBody {
            custom_mode: true,
            instrumental: true,
            style: &request.style,
            title: &request.title,
            model: &self.config.model,
            call_back_url: &self.config.callback_url,
        };

        debug!(url = %url, style = %request.style, title = %request.title, "Submitting generation job");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;
        let value = Self::json_body(response).await?;

        let task_id = value
            .pointer("/data/taskId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| GenerationError::InvalidResponse("missing data.taskId".into()))?;

        info!(task_id, "Generation job submitted");
        Ok(task_id.to_string())
    }

    async fn fetch_record(&self, task_id: &str) -> Result<RecordStatus> {
        let url = self.endpoint("/api/v1/generate/record-info");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .query(&[("taskId", task_id)])
            .send()
            .await?;
        let value = Self::json_body(response).await?;

        Ok(parse_record(&value))
    }
}

/// Extract the first generated item from a record-info body.
fn parse_record(value: &Value) -> RecordStatus {
    let Some(items) = value
        .pointer("/data/response/sunoData")
        .and_then(Value::as_array)
    else {
        return RecordStatus::Incomplete("generated data missing from response".into());
    };

    let Some(first) = items.first() else {
        return RecordStatus::Incomplete("no generated items yet".into());
    };

    let audio_url = first.get("audioUrl").and_then(Value::as_str);
    let image_url = first.get("imageUrl").and_then(Value::as_str);
    let duration = first.get("duration").and_then(Value::as_f64);

    match (audio_url, image_url, duration) {
        (Some(url), Some(image_url), Some(duration))
            if is_absolute_url(url) && is_absolute_url(image_url) =>
        {
            RecordStatus::Ready(GeneratedTrack {
                url: url.to_string(),
                duration,
                image_url: image_url.to_string(),
            })
        }
        (Some(_), Some(_), Some(_)) => {
            RecordStatus::Incomplete("audioUrl or imageUrl not an absolute URL yet".into())
        }
        _ => RecordStatus::Incomplete("audioUrl, imageUrl or duration missing".into()),
    }
}

fn is_absolute_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}
