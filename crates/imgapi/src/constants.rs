pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-image-1.5";
pub const OPENAI_FALLBACK_MODEL: &str = "dall-e-3";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-image-preview";
pub const GEMINI_FALLBACK_MODEL: &str = "imagen-3.0-generate-001";
pub const DEFAULT_GEMINI_APP_URL: &str = "https://gemini.google.com/app";
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-01";
pub const CHATGPT_IMAGES_URL: &str = "https://chatgpt.com/images";
