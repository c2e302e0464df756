use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;

use crate::constants::{CHATGPT_IMAGES_URL, DEFAULT_GEMINI_APP_URL};
use crate::error::{ApiError, ErrorCode};
use crate::prompt::compose_prompt;
use crate::types::{ConnectionType, GenerateOptions, GenerateResult};

use super::UrlOpener;

// Escape set matching encodeURIComponent: alphanumerics and -_.!~*'()
// stay literal, everything else (spaces included) becomes %XX. The browser
// extension parses the fragment with decodeURIComponent and expects %20.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub(crate) fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Builds the destination URL. The prompt and auto-submit flag travel in the
/// fragment, not the query string, so they never reach the target's server.
pub(crate) fn handoff_url(
    connection_type: ConnectionType,
    full_prompt: &str,
    gemini_base_url: &str,
) -> Result<String, ApiError> {
    let mut hash = format!("autoSubmit=true&prompt={}", encode_component(full_prompt));

    let target = match connection_type {
        ConnectionType::ChatGpt => {
            hash.push_str("&tool=image");
            CHATGPT_IMAGES_URL
        }
        ConnectionType::Gemini => match gemini_base_url.trim() {
            "" => DEFAULT_GEMINI_APP_URL,
            value => value,
        },
        // the dispatcher never routes other types here; reaching this arm
        // means the routing table and configuration disagree
        other => {
            return Err(ApiError::config(
                format!("Unsupported browser handoff type: {}", other.as_str()),
                ErrorCode::InvalidConnectionType,
            ));
        }
    };

    Ok(format!("{}#{}", target, hash))
}

/// Hands the augmented prompt off to a web UI in a new browsing context and
/// returns a locally generated placeholder, since the actual generation
/// happens out of process with no response channel.
pub fn generate(
    options: &GenerateOptions,
    opener: &dyn UrlOpener,
) -> Result<GenerateResult, ApiError> {
    let connection_type = options.app_settings.connection_type;
    let full_prompt = compose_prompt(&options.prompt, &options.style_tags);
    let url = handoff_url(
        connection_type,
        &full_prompt,
        &options.app_settings.gemini_base_url,
    )?;

    debug!(target = %url, "opening browser handoff");
    opener.open(&url).map_err(ApiError::unknown)?;

    Ok(GenerateResult {
        url: placeholder_image(connection_type),
        revised_prompt: None,
    })
}

/// SVG placeholder telling the user the generation continues in a new tab.
fn placeholder_image(connection_type: ConnectionType) -> String {
    let (provider, color) = match connection_type {
        ConnectionType::ChatGpt => ("ChatGPT", "#10a37f"),
        _ => ("Gemini", "#4b90ff"),
    };

    let svg = format!(
        r##"<svg width="1024" height="1024" xmlns="http://www.w3.org/2000/svg">
  <rect width="100%" height="100%" fill="#18181b"/>
  <rect width="100%" height="100%" fill="url(#grid)" opacity="0.1"/>
  <defs>
    <pattern id="grid" width="40" height="40" patternUnits="userSpaceOnUse">
      <path d="M 40 0 L 0 0 0 40" fill="none" stroke="#ffffff" stroke-width="1"/>
    </pattern>
  </defs>
  <circle cx="512" cy="400" r="80" fill="{color}" opacity="0.2"/>
  <circle cx="512" cy="400" r="60" stroke="{color}" stroke-width="4" fill="none"/>
  <path d="M512 360 L512 440 M472 400 L552 400" stroke="{color}" stroke-width="4" stroke-linecap="round"/>
  <text x="50%" y="580" font-family="sans-serif" font-size="48" font-weight="bold" fill="#ffffff" text-anchor="middle">Opened {provider} in a new tab</text>
  <text x="50%" y="640" font-family="sans-serif" font-size="24" fill="#a1a1aa" text-anchor="middle">Check the new browser tab for the generated image</text>
  <text x="50%" y="680" font-family="sans-serif" font-size="18" fill="#52525b" text-anchor="middle">The prompt was filled in and submitted automatically</text>
</svg>"##
    );

    format!(
        "data:image/svg+xml;base64,{}",
        BASE64_ENGINE.encode(svg.as_bytes())
    )
}
