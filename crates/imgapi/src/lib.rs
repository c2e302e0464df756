pub mod constants;
pub mod error;
pub mod prompt;
pub mod providers;
pub mod types;

pub use error::{ApiError, ErrorCode};
pub use prompt::compose_prompt;
pub use providers::{ImageGenerator, SystemOpener, UrlOpener};
pub use types::{
    AppSettings, AspectRatio, AzureAuthMode, ConnectionType, FileFormat, GenerateOptions,
    GenerateResult, OutputSettings, Resolution, SafetyLevel,
};
