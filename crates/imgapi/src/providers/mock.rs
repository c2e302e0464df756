use std::time::Duration;

use rand::Rng;

use crate::error::ApiError;
use crate::types::{GenerateOptions, GenerateResult};

/// Artificial latency so the mock feels like a real backend.
pub const MOCK_DELAY: Duration = Duration::from_secs(3);

/// Offline stand-in for providers without a real implementation: returns a
/// randomly selected hosted placeholder sized to the requested aspect ratio
/// and flags the result as simulated via the revised prompt.
pub async fn generate(options: &GenerateOptions) -> Result<GenerateResult, ApiError> {
    generate_with_delay(options, MOCK_DELAY).await
}

pub async fn generate_with_delay(
    options: &GenerateOptions,
    delay: Duration,
) -> Result<GenerateResult, ApiError> {
    tokio::time::sleep(delay).await;

    let (width, height) = options.output_settings.aspect_ratio.dimensions();
    let random_id: u32 = rand::rng().random_range(0..1000);

    Ok(GenerateResult {
        url: format!("https://picsum.photos/{}/{}?random={}", width, height, random_id),
        revised_prompt: Some(format!(
            "[Simulated] Placeholder image generated for the \"{}\" connection. \
             Configure an API key to run real generations.",
            options.app_settings.connection_type.as_str()
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AppSettings, AspectRatio, ConnectionType, OutputSettings};

    fn mock_options(aspect_ratio: AspectRatio) -> GenerateOptions {
        GenerateOptions {
            prompt: "anything".into(),
            style_tags: Vec::new(),
            reference_image: None,
            app_settings: AppSettings {
                connection_type: ConnectionType::OpenAi,
                ..AppSettings::default()
            },
            output_settings: OutputSettings {
                aspect_ratio,
                ..OutputSettings::default()
            },
        }
    }

    #[tokio::test]
    async fn placeholder_matches_the_requested_aspect_ratio() {
        let result = generate_with_delay(&mock_options(AspectRatio::Portrait), Duration::ZERO)
            .await
            .unwrap();
        assert!(result.url.starts_with("https://picsum.photos/1024/1536?random="));
    }

    #[tokio::test]
    async fn result_is_flagged_as_simulated() {
        let result = generate_with_delay(&mock_options(AspectRatio::Square), Duration::ZERO)
            .await
            .unwrap();
        let notice = result.revised_prompt.unwrap();
        assert!(notice.starts_with("[Simulated]"));
        assert!(notice.contains("\"openai\""));
    }
}
