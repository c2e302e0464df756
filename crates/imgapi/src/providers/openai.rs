use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::constants::{DEFAULT_OPENAI_BASE_URL, OPENAI_FALLBACK_MODEL};
use crate::error::{ApiError, ErrorCode};
use crate::prompt::compose_prompt;
use crate::types::{AspectRatio, GenerateOptions, GenerateResult, Resolution};

/// Maps the workbench aspect ratios onto the size strings this backend
/// accepts. The portrait/landscape dimensions differ from the nominal
/// internal ones.
pub(crate) fn map_size(aspect_ratio: AspectRatio) -> &'static str {
    match aspect_ratio {
        AspectRatio::Portrait => "1024x1792",
        AspectRatio::Landscape => "1792x1024",
        AspectRatio::Square | AspectRatio::Auto => "1024x1024",
    }
}

pub(crate) fn map_quality(resolution: Resolution) -> &'static str {
    match resolution {
        Resolution::High => "hd",
        _ => "standard",
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImagesResponse {
    #[serde(default)]
    pub data: Vec<ImageEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageEntry {
    pub url: Option<String>,
    pub b64_json: Option<String>,
    pub revised_prompt: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
    pub code: Option<String>,
}

/// Builds the typed error for a non-success wire response, preferring the
/// backend's own error envelope over a synthesized status line.
pub(crate) fn upstream_error(prefix: &str, status: StatusCode, body: &str) -> ApiError {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let error = envelope.error.unwrap_or_default();
    let message = error.message.unwrap_or_else(|| match status.canonical_reason() {
        Some(reason) => format!("{}: {} {}", prefix, status.as_u16(), reason),
        None => format!("{}: {}", prefix, status.as_u16()),
    });
    ApiError::upstream(message, error.code, status.as_u16())
}

/// Normalizes the `data` list into the shared result shape. The backend may
/// return either a direct URL or inline base64 bytes; inline bytes are
/// synthesized into a data URI so callers never see the two shapes.
pub(crate) fn parse_images_response(response: ImagesResponse) -> Result<GenerateResult, ApiError> {
    let entry = response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::invalid_response("Response contained no image data"))?;

    let url = match (entry.b64_json, entry.url) {
        (Some(b64), _) => format!("data:image/png;base64,{}", b64),
        (None, Some(url)) => url,
        (None, None) => {
            return Err(ApiError::invalid_response(
                "Image entry carried neither a URL nor inline bytes",
            ));
        }
    };

    Ok(GenerateResult {
        url,
        revised_prompt: entry.revised_prompt,
    })
}

pub(crate) fn build_request_body(
    model: &str,
    prompt: &str,
    size: &str,
    quality: &str,
) -> Value {
    let mut body = json!({
        "model": model,
        "prompt": prompt,
        "n": 1,
        "size": size,
    });
    // quality/style are DALL-E 3 parameters; other models reject them.
    if model.contains("dall-e-3") {
        body["quality"] = json!(quality);
        body["style"] = json!("vivid");
    }
    body
}

pub async fn generate(options: &GenerateOptions) -> Result<GenerateResult, ApiError> {
    let settings = &options.app_settings;

    let api_key = settings.openai_api_key.trim();
    if api_key.is_empty() {
        return Err(ApiError::config(
            "OpenAI API key is not configured",
            ErrorCode::MissingApiKey,
        ));
    }

    let full_prompt = compose_prompt(&options.prompt, &options.style_tags);
    let size = map_size(options.output_settings.aspect_ratio);
    let quality = map_quality(options.output_settings.resolution);

    let model = match settings.openai_model.trim() {
        "" => OPENAI_FALLBACK_MODEL,
        value => value,
    };
    let base_url = match settings.openai_base_url.trim() {
        "" => DEFAULT_OPENAI_BASE_URL,
        value => value,
    };
    let url = format!("{}/images/generations", base_url.trim_end_matches('/'));
    let body = build_request_body(model, &full_prompt, size, quality);

    debug!(%url, model, size, "dispatching OpenAI image request");

    let response = Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(ApiError::unknown)?;

    let status = response.status();
    let text = response.text().await.map_err(ApiError::unknown)?;

    if !status.is_success() {
        return Err(upstream_error("API Error", status, &text));
    }

    let parsed: ImagesResponse = serde_json::from_str(&text).map_err(ApiError::unknown)?;
    parse_images_response(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppSettings;

    fn options_without_key() -> GenerateOptions {
        GenerateOptions {
            prompt: "a lighthouse".into(),
            style_tags: Vec::new(),
            reference_image: None,
            app_settings: AppSettings {
                connection_type: crate::types::ConnectionType::OpenAi,
                openai_api_key: String::new(),
                ..AppSettings::default()
            },
            output_settings: Default::default(),
        }
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_network_call() {
        let err = generate(&options_without_key()).await.unwrap_err();
        assert_eq!(err.code, Some(ErrorCode::MissingApiKey));
        assert_eq!(err.status, None);
    }

    #[test]
    fn size_lookup_matches_backend_vocabulary() {
        assert_eq!(map_size(AspectRatio::Square), "1024x1024");
        assert_eq!(map_size(AspectRatio::Portrait), "1024x1792");
        assert_eq!(map_size(AspectRatio::Landscape), "1792x1024");
        assert_eq!(map_size(AspectRatio::Auto), "1024x1024");
    }

    #[test]
    fn only_high_resolution_maps_to_hd() {
        assert_eq!(map_quality(Resolution::High), "hd");
        assert_eq!(map_quality(Resolution::Low), "standard");
        assert_eq!(map_quality(Resolution::Auto), "standard");
    }

    #[test]
    fn dalle3_body_carries_quality_and_style() {
        let body = build_request_body("dall-e-3", "p", "1024x1024", "hd");
        assert_eq!(body["quality"], "hd");
        assert_eq!(body["style"], "vivid");
        assert_eq!(body["n"], 1);
    }

    #[test]
    fn non_dalle3_body_omits_quality_and_style() {
        let body = build_request_body("gpt-image-1.5", "p", "1024x1024", "hd");
        assert!(body.get("quality").is_none());
        assert!(body.get("style").is_none());
    }

    #[test]
    fn inline_bytes_become_a_png_data_uri() {
        let response: ImagesResponse =
            serde_json::from_str(r#"{"data":[{"b64_json":"aGVsbG8="}]}"#).unwrap();
        let result = parse_images_response(response).unwrap();
        assert!(result.url.starts_with("data:image/png;base64,"));
        assert_eq!(result.revised_prompt, None);
    }

    #[test]
    fn remote_url_and_revised_prompt_pass_through() {
        let response: ImagesResponse = serde_json::from_str(
            r#"{"data":[{"url":"https://img.example/1.png","revised_prompt":"a tall lighthouse"}]}"#,
        )
        .unwrap();
        let result = parse_images_response(response).unwrap();
        assert_eq!(result.url, "https://img.example/1.png");
        assert_eq!(result.revised_prompt.as_deref(), Some("a tall lighthouse"));
    }

    #[test]
    fn empty_data_is_an_invalid_response() {
        let response: ImagesResponse = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        let err = parse_images_response(response).unwrap_err();
        assert_eq!(err.code, Some(ErrorCode::InvalidResponse));
    }

    #[test]
    fn upstream_error_prefers_the_backend_envelope() {
        let err = upstream_error(
            "API Error",
            StatusCode::BAD_REQUEST,
            r#"{"error":{"message":"prompt rejected","code":"content_policy"}}"#,
        );
        assert_eq!(err.message, "prompt rejected");
        assert_eq!(err.code_str(), Some("content_policy"));
        assert_eq!(err.status, Some(400));
    }

    #[test]
    fn upstream_error_synthesizes_from_the_status_line() {
        let err = upstream_error("API Error", StatusCode::INTERNAL_SERVER_ERROR, "not json");
        assert_eq!(err.message, "API Error: 500 Internal Server Error");
        assert_eq!(err.code, None);
        assert_eq!(err.status, Some(500));
    }
}
