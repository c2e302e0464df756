use reqwest::Client;
use serde_json::json;
use tracing::debug;

use crate::constants::DEFAULT_AZURE_API_VERSION;
use crate::error::{ApiError, ErrorCode};
use crate::prompt::compose_prompt;
use crate::types::{GenerateOptions, GenerateResult};

use super::openai::{ImagesResponse, map_quality, map_size, parse_images_response, upstream_error};

/// Assembles the deployment-scoped generations URL. A trailing slash on the
/// configured endpoint is stripped before the fixed path is appended.
pub(crate) fn build_url(endpoint: &str, deployment: &str, api_version: &str) -> String {
    format!(
        "{}/openai/deployments/{}/images/generations?api-version={}",
        endpoint.trim_end_matches('/'),
        deployment,
        api_version
    )
}

pub async fn generate(options: &GenerateOptions) -> Result<GenerateResult, ApiError> {
    let settings = &options.app_settings;

    // Each required field gets its own code so the user is told exactly
    // which one to fix.
    let api_key = settings.azure_api_key.trim();
    if api_key.is_empty() {
        return Err(ApiError::config(
            "Azure OpenAI API key is not configured",
            ErrorCode::MissingApiKey,
        ));
    }
    let endpoint = settings.azure_endpoint.trim();
    if endpoint.is_empty() {
        return Err(ApiError::config(
            "Azure OpenAI endpoint is not configured",
            ErrorCode::MissingEndpoint,
        ));
    }
    let deployment = settings.azure_deployment.trim();
    if deployment.is_empty() {
        return Err(ApiError::config(
            "Azure deployment name is not configured",
            ErrorCode::MissingDeployment,
        ));
    }

    let full_prompt = compose_prompt(&options.prompt, &options.style_tags);
    let size = map_size(options.output_settings.aspect_ratio);
    let quality = map_quality(options.output_settings.resolution);

    let api_version = match settings.azure_api_version.trim() {
        "" => DEFAULT_AZURE_API_VERSION,
        value => value,
    };
    let url = build_url(endpoint, deployment, api_version);

    let body = json!({
        "prompt": full_prompt,
        "n": 1,
        "size": size,
        "quality": quality,
        "style": "vivid",
    });

    debug!(%url, size, "dispatching Azure OpenAI image request");

    // Azure authenticates with a raw key header, not a bearer token.
    let response = Client::new()
        .post(url)
        .header("api-key", api_key)
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(ApiError::unknown)?;

    let status = response.status();
    let text = response.text().await.map_err(ApiError::unknown)?;

    if !status.is_success() {
        return Err(upstream_error("Azure API Error", status, &text));
    }

    let parsed: ImagesResponse = serde_json::from_str(&text).map_err(ApiError::unknown)?;
    parse_images_response(parsed)
}
