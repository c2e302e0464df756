pub mod azure;
pub mod browser;
pub mod gemini;
pub mod mock;
pub mod openai;

use std::io;
use std::process::Command;
use std::sync::Arc;

use crate::error::ApiError;
use crate::types::{ConnectionType, GenerateOptions, GenerateResult};

/// Seam for the extension handoff's "open a URL in a new browsing context"
/// side effect, so the dispatcher stays testable without a browser.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Default opener: hands the URL to the platform launcher.
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        #[cfg(target_os = "windows")]
        {
            Command::new("explorer").arg(url).spawn()?;
        }

        #[cfg(target_os = "macos")]
        {
            Command::new("open").arg(url).spawn()?;
        }

        #[cfg(target_os = "linux")]
        {
            Command::new("xdg-open").arg(url).spawn()?;
        }

        Ok(())
    }
}

/// Pure routing over the configured connection type. All provider-specific
/// transformation is adapter-local; adding a provider means one new module
/// plus one arm here.
pub struct ImageGenerator {
    opener: Arc<dyn UrlOpener>,
}

impl ImageGenerator {
    pub fn new() -> Self {
        Self::with_opener(Arc::new(SystemOpener))
    }

    pub fn with_opener(opener: Arc<dyn UrlOpener>) -> Self {
        Self { opener }
    }

    pub async fn generate(&self, options: &GenerateOptions) -> Result<GenerateResult, ApiError> {
        match options.app_settings.connection_type {
            ConnectionType::OpenAi => openai::generate(options).await,
            ConnectionType::Azure => azure::generate(options).await,
            ConnectionType::GeminiApi => gemini::generate(options).await,
            ConnectionType::ChatGpt | ConnectionType::Gemini => {
                browser::generate(options, self.opener.as_ref())
            }
        }
    }
}

impl Default for ImageGenerator {
    fn default() -> Self {
        Self::new()
    }
}
