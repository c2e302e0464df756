use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GEMINI_APP_URL, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, DEFAULT_OPENAI_BASE_URL,
    DEFAULT_OPENAI_MODEL,
};

/// Which backend a generation request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionType {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "azure")]
    Azure,
    #[serde(rename = "gemini-api")]
    GeminiApi,
    #[serde(rename = "chatgpt")]
    ChatGpt,
    #[serde(rename = "gemini")]
    Gemini,
}

impl ConnectionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionType::OpenAi => "openai",
            ConnectionType::Azure => "azure",
            ConnectionType::GeminiApi => "gemini-api",
            ConnectionType::ChatGpt => "chatgpt",
            ConnectionType::Gemini => "gemini",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AzureAuthMode {
    ApiKey,
    Aad,
}

/// Nominal output dimensions offered by the workbench. Individual adapters
/// map these onto whatever vocabulary their backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1024x1536")]
    Portrait,
    #[serde(rename = "1536x1024")]
    Landscape,
    #[serde(rename = "auto")]
    Auto,
}

impl AspectRatio {
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1024x1024",
            AspectRatio::Portrait => "1024x1536",
            AspectRatio::Landscape => "1536x1024",
            AspectRatio::Auto => "auto",
        }
    }

    /// Nominal pixel dimensions, used by the offline placeholder adapter.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            AspectRatio::Portrait => (1024, 1536),
            AspectRatio::Landscape => (1536, 1024),
            AspectRatio::Square | AspectRatio::Auto => (1024, 1024),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Low,
    Medium,
    High,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Png,
    Jpeg,
    Webp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyLevel {
    Low,
    Medium,
    High,
}

/// Connection configuration. Only the sub-fields of the active
/// `connection_type` need to be filled in; the rest may stay blank.
/// Unknown or missing persisted fields fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub connection_type: ConnectionType,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_api_key: String,
    pub azure_endpoint: String,
    pub azure_auth_mode: AzureAuthMode,
    pub azure_api_key: String,
    pub azure_deployment: String,
    pub azure_api_version: String,
    pub gemini_endpoint: String,
    pub gemini_model: String,
    pub gemini_api_key: String,
    pub gemini_base_url: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            connection_type: ConnectionType::GeminiApi,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_api_key: String::new(),
            azure_endpoint: String::new(),
            azure_auth_mode: AzureAuthMode::ApiKey,
            azure_api_key: String::new(),
            azure_deployment: String::new(),
            azure_api_version: String::new(),
            gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_key: String::new(),
            gemini_base_url: DEFAULT_GEMINI_APP_URL.to_string(),
        }
    }
}

/// Output preferences. `compression_quality` is meaningful only for
/// jpeg/webp output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputSettings {
    pub aspect_ratio: AspectRatio,
    pub resolution: Resolution,
    pub file_format: FileFormat,
    pub compression_quality: u8,
    pub safety_level: SafetyLevel,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::Square,
            resolution: Resolution::Auto,
            file_format: FileFormat::Png,
            compression_quality: 80,
            safety_level: SafetyLevel::Medium,
        }
    }
}

/// One generation request. Carries owned snapshots of the settings taken at
/// call time, so later settings edits cannot affect an in-flight call.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub prompt: String,
    /// Style descriptors in selection order; duplicate prevention is the
    /// caller's toggle semantics.
    pub style_tags: Vec<String>,
    /// Optional embedded reference image as a data URI.
    pub reference_image: Option<String>,
    pub app_settings: AppSettings,
    pub output_settings: OutputSettings,
}

/// Normalized generation result: a resolvable image source (remote URL or
/// data URI) plus the backend-revised prompt when one was reported.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResult {
    pub url: String,
    pub revised_prompt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_type_round_trips_through_wire_names() {
        let json = serde_json::to_string(&ConnectionType::GeminiApi).unwrap();
        assert_eq!(json, "\"gemini-api\"");
        let parsed: ConnectionType = serde_json::from_str("\"chatgpt\"").unwrap();
        assert_eq!(parsed, ConnectionType::ChatGpt);
    }

    #[test]
    fn app_settings_tolerate_partial_shapes() {
        let parsed: AppSettings =
            serde_json::from_str(r#"{"connectionType":"openai","openaiApiKey":"sk-test"}"#)
                .unwrap();
        assert_eq!(parsed.connection_type, ConnectionType::OpenAi);
        assert_eq!(parsed.openai_api_key, "sk-test");
        // untouched fields keep their documented defaults
        assert_eq!(parsed.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(parsed.gemini_model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn output_settings_default_shape() {
        let defaults = OutputSettings::default();
        assert_eq!(defaults.aspect_ratio, AspectRatio::Square);
        assert_eq!(defaults.resolution, Resolution::Auto);
        assert_eq!(defaults.file_format, FileFormat::Png);
        assert_eq!(defaults.compression_quality, 80);
        assert_eq!(defaults.safety_level, SafetyLevel::Medium);
    }

    #[test]
    fn aspect_ratio_uses_nominal_dimension_names() {
        let parsed: AspectRatio = serde_json::from_str("\"1024x1536\"").unwrap();
        assert_eq!(parsed, AspectRatio::Portrait);
        assert_eq!(AspectRatio::Auto.dimensions(), (1024, 1024));
    }
}
