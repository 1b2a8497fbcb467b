use core_config::{ConfigError, FromEnv, env_optional, env_parse};
use std::str::FromStr;
use std::sync::Arc;

use crate::models::{ImageRef, Subheading};

pub const DEFAULT_GENERATED_BASE_URL: &str = "https://image.pollinations.ai";
pub const DEFAULT_PLACEHOLDER_BASE_URL: &str = "https://placehold.co";

/// Produces the image shown under a subheading.
pub trait ImageSource: Send + Sync {
    /// `context` is a topic hint such as the article title.
    fn image_for(&self, subheading: &Subheading, context: Option<&str>) -> ImageRef;
}

fn prompt_for(subheading: &Subheading, context: Option<&str>) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(context) => format!("{context}: {}, automotive blog illustration", subheading.text),
        None => format!("{}, automotive blog illustration", subheading.text),
    }
}

/// Text-to-image URLs of the form
/// `{base}/prompt/{prompt}?width=W&height=H&seed=S&nologo=true`.
#[derive(Debug, Clone)]
pub struct GeneratedImageSource {
    base_url: String,
    width: u32,
    height: u32,
    seed: Option<u32>,
}

impl GeneratedImageSource {
    pub fn new(base_url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            width,
            height,
            seed: None,
        }
    }

    /// Use `seed` for every image instead of a random one.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl ImageSource for GeneratedImageSource {
    fn image_for(&self, subheading: &Subheading, context: Option<&str>) -> ImageRef {
        let seed = self.seed.unwrap_or_else(rand::random::<u32>);
        let prompt = prompt_for(subheading, context);

        ImageRef {
            url: format!(
                "{}/prompt/{}?width={}&height={}&seed={}&nologo=true",
                self.base_url,
                urlencoding::encode(&prompt),
                self.width,
                self.height,
                seed
            ),
            alt: subheading.text.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Static placeholder images labelled with the subheading.
#[derive(Debug, Clone)]
pub struct PlaceholderImageSource {
    base_url: String,
    width: u32,
    height: u32,
}

impl PlaceholderImageSource {
    pub fn new(base_url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            width,
            height,
        }
    }
}

impl ImageSource for PlaceholderImageSource {
    fn image_for(&self, subheading: &Subheading, _context: Option<&str>) -> ImageRef {
        ImageRef {
            url: format!(
                "{}/{}x{}?text={}",
                self.base_url,
                self.width,
                self.height,
                urlencoding::encode(&subheading.text)
            ),
            alt: subheading.text.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageProvider {
    Generated,
    Placeholder,
}

impl FromStr for ImageProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generated" => Ok(Self::Generated),
            "placeholder" => Ok(Self::Placeholder),
            other => Err(format!("expected 'generated' or 'placeholder', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub provider: ImageProvider,
    /// Defaults per provider when unset.
    pub base_url: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            provider: ImageProvider::Generated,
            base_url: None,
            width: 1024,
            height: 576,
        }
    }
}

impl ImageConfig {
    pub fn into_source(self) -> Arc<dyn ImageSource> {
        match self.provider {
            ImageProvider::Generated => Arc::new(GeneratedImageSource::new(
                self.base_url
                    .unwrap_or_else(|| DEFAULT_GENERATED_BASE_URL.to_string()),
                self.width,
                self.height,
            )),
            ImageProvider::Placeholder => Arc::new(PlaceholderImageSource::new(
                self.base_url
                    .unwrap_or_else(|| DEFAULT_PLACEHOLDER_BASE_URL.to_string()),
                self.width,
                self.height,
            )),
        }
    }
}

/// - `IMAGE_PROVIDER`: `generated` (default) or `placeholder`
/// - `IMAGE_BASE_URL`
/// - `IMAGE_WIDTH` / `IMAGE_HEIGHT` (default 1024x576)
impl FromEnv for ImageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let width: u32 = env_parse("IMAGE_WIDTH", "1024")?;
        let height: u32 = env_parse("IMAGE_HEIGHT", "576")?;

        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidValue {
                key: if width == 0 { "IMAGE_WIDTH" } else { "IMAGE_HEIGHT" }.to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            provider: env_parse("IMAGE_PROVIDER", "generated")?,
            base_url: env_optional("IMAGE_BASE_URL"),
            width,
            height,
        })
    }
}
