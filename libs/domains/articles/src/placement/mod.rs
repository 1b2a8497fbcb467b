//! Image placement under article subheadings.
//!
//! ```text
//! extract_subheadings ─► SubheadingSelector ─► ImageSource ─► insert_images
//!   (<h2> plain text)      (first N / LLM)      (URL per pick)   (<figure> after </h2>)
//! ```

mod html;
mod image;
mod selector;

pub use html::{extract_subheadings, figure_markup, insert_images};
pub use image::{
    DEFAULT_GENERATED_BASE_URL, DEFAULT_PLACEHOLDER_BASE_URL, GeneratedImageSource, ImageConfig,
    ImageProvider, ImageSource, PlaceholderImageSource,
};
pub use selector::{
    DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL, FirstN, LlmConfig, LlmSubheadingSelector,
    SubheadingSelector, first_n,
};

use std::sync::Arc;
use tracing::debug;

use crate::error::{ArticleError, ArticleResult};
use crate::models::{ImagePlacement, PlacementPreview};

#[derive(Clone)]
pub struct ImagePlacer {
    selector: Arc<dyn SubheadingSelector>,
    images: Arc<dyn ImageSource>,
}

impl ImagePlacer {
    pub fn new(selector: Arc<dyn SubheadingSelector>, images: Arc<dyn ImageSource>) -> Self {
        Self { selector, images }
    }

    /// Choose up to `count` subheadings of `html` and insert an image under each.
    ///
    /// Fails with [`ArticleError::NoPlacementTargets`] when `html` has no
    /// non-empty `<h2>`. Fewer subheadings than `count` yields one placement
    /// per subheading.
    pub async fn place(
        &self,
        html: &str,
        count: usize,
        context: Option<&str>,
    ) -> ArticleResult<PlacementPreview> {
        let subheadings = extract_subheadings(html);
        if subheadings.is_empty() {
            return Err(ArticleError::NoPlacementTargets);
        }

        let selected = self.selector.select(&subheadings, count, context).await;
        let placements: Vec<ImagePlacement> = selected
            .iter()
            .take(count)
            .map(|subheading| ImagePlacement {
                subheading: subheading.text.clone(),
                image: self.images.image_for(subheading, context),
            })
            .collect();

        let (html, placements) = insert_images(html, placements);
        debug!(
            available = subheadings.len(),
            placed = placements.len(),
            "Placed article images"
        );

        Ok(PlacementPreview { placements, html })
    }
}
