// Kie.ai API client — bearer-token HTTP wrapper for image generation.
//
// The API wraps results in an envelope: HTTP 200 with a JSON body carrying
// its own `code` field, 200 meaning success. Task status payloads have
// shifted shape over provider versions, so the image URL is probed at every
// location it has been seen in.
//
// API docs: https://docs.kie.ai

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default Kie.ai API base URL.
pub const DEFAULT_KIE_API_BASE: &str = "https://api.kie.ai/api/v1";

/// A point-in-time view of a generation task.
#[derive(Debug, Clone)]
pub struct TaskSnapshot {
    pub status: String,
    pub image_url: Option<String>,
}

/// Map a public model name to the provider's model identifier.
/// Unknown names fall back to the cheapest model.
pub fn map_model_id(model: &str) -> &'static str {
    match model {
        "nano-banana-pro" => "google/nano-banana",
        "flux-kontext-pro" => "flux-kontext-pro",
        "flux-kontext-max" => "flux-kontext-max",
        "4o-image" => "openai/gpt-image-1",
        _ => "google/nano-banana",
    }
}

/// Authenticated client for the Kie.ai task endpoints.
pub struct KieClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl KieClient {
    /// Create a new client pointing at the given base URL.
    ///
    /// Defaults to [`DEFAULT_KIE_API_BASE`] — pass a different URL for
    /// testing or a proxy.
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent("folio/0.1 (ebook-authoring)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Start an image generation task. Returns the provider task id.
    pub async fn create_task(
        &self,
        prompt: &str,
        model: &str,
        aspect_ratio: &str,
        output_format: &str,
    ) -> Result<String> {
        let url = format!("{}/jobs/createTask", self.base_url);
        let model_id = map_model_id(model);

        info!(
            model = model_id,
            prompt_preview = &prompt[..prompt.len().min(100)],
            "Creating image generation task"
        );

        let request = CreateTaskRequest {
            model: model_id,
            prompt,
            image_size: aspect_ratio,
            output_format,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(60))
            .json(&request)
            .send()
            .await
            .context("Failed to call Kie.ai createTask")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Kie.ai createTask returned {}: {}", status, body);
        }

        let result: CreateTaskResponse = response
            .json()
            .await
            .context("Failed to parse createTask response")?;

        if result.code != 200 {
            anyhow::bail!(
                "Kie.ai API error: {}",
                result.msg.as_deref().unwrap_or("Unknown error")
            );
        }

        Ok(result.data.map(|d| d.task_id).unwrap_or_default())
    }

    /// Poll the status of a generation task.
    pub async fn task_status(&self, task_id: &str) -> Result<TaskSnapshot> {
        let url = format!("{}/jobs/taskStatus", self.base_url);

        debug!(task_id = task_id, "Polling task status");

        let response = self
            .client
            .get(&url)
            .query(&[("taskId", task_id)])
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(30))
            .send()
            .await
            .context("Failed to call Kie.ai taskStatus")?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Kie.ai taskStatus returned {}", status);
        }

        let result: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse taskStatus response")?;

        let data = result.get("data").cloned().unwrap_or_default();
        let status = data
            .get("status")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();

        Ok(TaskSnapshot {
            status,
            image_url: extract_image_url(&data),
        })
    }
}

/// Find the image URL wherever the provider put it this time.
fn extract_image_url(data: &serde_json::Value) -> Option<String> {
    let candidates = [
        data.get("imageUrl"),
        data.get("image_url"),
        data.get("output").and_then(|o| o.get("imageUrl")),
        data.get("output").and_then(|o| o.get("image_url")),
        data.get("images")
            .and_then(|imgs| imgs.get(0))
            .and_then(|img| img.get("url")),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(|v| v.as_str())
        .find(|s| !s.is_empty())
        .map(String::from)
}

// --- Kie.ai request/response types ---

#[derive(Serialize)]
struct CreateTaskRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    image_size: &'a str,
    output_format: &'a str,
}

#[derive(Deserialize)]
struct CreateTaskResponse {
    code: i64,
    msg: Option<String>,
    data: Option<CreateTaskData>,
}

#[derive(Deserialize)]
struct CreateTaskData {
    #[serde(rename = "taskId", default)]
    task_id: String,
}
