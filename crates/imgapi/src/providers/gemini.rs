use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::constants::{DEFAULT_GEMINI_ENDPOINT, GEMINI_FALLBACK_MODEL};
use crate::error::{ApiError, ErrorCode};
use crate::prompt::compose_prompt;
use crate::types::{AspectRatio, GenerateOptions, GenerateResult};

use super::openai::upstream_error;

/// This backend takes colon-separated ratio tokens instead of pixel sizes;
/// the lookup is independent of the size-string table the other API
/// adapters use.
pub(crate) fn map_aspect_ratio(aspect_ratio: AspectRatio) -> &'static str {
    match aspect_ratio {
        AspectRatio::Portrait => "9:16",
        AspectRatio::Landscape => "16:9",
        AspectRatio::Square | AspectRatio::Auto => "1:1",
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Prediction {
    pub bytes_base64_encoded: Option<String>,
}

/// Predictions only ever carry inline base64 bytes, so the data URI is
/// always synthesized here.
pub(crate) fn parse_predict_response(
    response: PredictResponse,
) -> Result<GenerateResult, ApiError> {
    let bytes = response
        .predictions
        .into_iter()
        .next()
        .and_then(|prediction| prediction.bytes_base64_encoded)
        .filter(|data| !data.is_empty())
        .ok_or_else(|| ApiError::invalid_response("Response contained no image bytes"))?;

    Ok(GenerateResult {
        url: format!("data:image/png;base64,{}", bytes),
        // this backend does not report a revised prompt
        revised_prompt: None,
    })
}

pub async fn generate(options: &GenerateOptions) -> Result<GenerateResult, ApiError> {
    let settings = &options.app_settings;

    let api_key = settings.gemini_api_key.trim();
    if api_key.is_empty() {
        return Err(ApiError::config(
            "Gemini API key is not configured",
            ErrorCode::MissingApiKey,
        ));
    }

    let full_prompt = compose_prompt(&options.prompt, &options.style_tags);
    let aspect_ratio = map_aspect_ratio(options.output_settings.aspect_ratio);

    let model = match settings.gemini_model.trim() {
        "" => GEMINI_FALLBACK_MODEL,
        value => value,
    };
    let endpoint = match settings.gemini_endpoint.trim() {
        "" => DEFAULT_GEMINI_ENDPOINT,
        value => value,
    };
    let url = format!(
        "{}/models/{}:predict",
        endpoint.trim_end_matches('/'),
        model
    );

    let body = json!({
        "instances": [
            { "prompt": full_prompt }
        ],
        "parameters": {
            "sampleCount": 1,
            "aspectRatio": aspect_ratio,
        }
    });

    debug!(%url, aspect_ratio, "dispatching Gemini image request");

    let response = Client::new()
        .post(url)
        .query(&[("key", api_key)])
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(ApiError::unknown)?;

    let status = response.status();
    let text = response.text().await.map_err(ApiError::unknown)?;

    if !status.is_success() {
        return Err(upstream_error("Gemini API Error", status, &text));
    }

    let parsed: PredictResponse = serde_json::from_str(&text).map_err(ApiError::unknown)?;
    parse_predict_response(parsed)
}
