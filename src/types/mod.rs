//! Parsed deck structures consumed by the matching engine.
//!
//! Decks arrive already decomposed by the ingestion side. Geometry is
//! normalized to fractions of the slide size, so boxes from decks with
//! different page dimensions are directly comparable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use crate::signals::PerceptualHash;

/// Kind of visual element on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Table,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position and size as fractions of the slide width/height.
///
/// Absent fields deserialize to `0.0`, so an element without geometry is
/// compared as the zero vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The box as a `[left, top, width, height]` vector.
    pub fn to_array(&self) -> [f64; 4] {
        [self.left, self.top, self.width, self.height]
    }
}

/// A single visual item on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: ElementKind,

    /// Text content, empty for images and tables.
    #[serde(default)]
    pub text: String,

    #[serde(flatten)]
    pub bbox: BoundingBox,

    /// Externally computed embedding of `text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Element {
    pub fn new(kind: ElementKind, text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            kind,
            text: text.into(),
            bbox,
            embedding: None,
        }
    }

    pub fn text(text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self::new(ElementKind::Text, text, bbox)
    }

    pub fn image(bbox: BoundingBox) -> Self {
        Self::new(ElementKind::Image, "", bbox)
    }

    pub fn table(bbox: BoundingBox) -> Self {
        Self::new(ElementKind::Table, "", bbox)
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}

/// One slide of a deck.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Slide {
    /// 0-based position in the owning deck. Assigned by [`Deck::new`].
    #[serde(skip)]
    pub index: usize,

    #[serde(
        rename = "slidetitle",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty"
    )]
    pub title: Option<String>,

    #[serde(rename = "shapes", default)]
    pub elements: Vec<Element>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_empty")]
    pub notes: Option<String>,

    /// Perceptual hash of the rendered slide image.
    #[serde(rename = "imagehash", default, skip_serializing_if = "Option::is_none")]
    pub image_hash: Option<PerceptualHash>,

    /// Embedding of the concatenated slide text.
    #[serde(rename = "textvector", default, skip_serializing_if = "Option::is_none")]
    pub text_vector: Option<Vec<f32>>,
}

impl Slide {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_signals(mut self, image_hash: PerceptualHash, text_vector: Vec<f32>) -> Self {
        self.image_hash = Some(image_hash);
        self.text_vector = Some(text_vector);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Title for display, falling back to an empty string.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// An ordered, read-only collection of slides.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Deck {
    /// Where the deck came from (path or name).
    pub source: String,

    #[serde(rename = "DocumentTitle", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub slides: Vec<Slide>,
}

impl Deck {
    /// Build a deck and number its slides by position.
    pub fn new(source: impl Into<String>, title: Option<String>, mut slides: Vec<Slide>) -> Self {
        for (index, slide) in slides.iter_mut().enumerate() {
            slide.index = index;
        }
        Self {
            source: source.into(),
            title: title.filter(|t| !t.is_empty()),
            slides,
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Contiguous window of slides, clamped to the deck bounds.
    ///
    /// Slides keep their deck indices, so results computed over a window
    /// still refer to positions in the full deck.
    pub fn window(&self, range: Range<usize>) -> &[Slide] {
        let end = range.end.min(self.slides.len());
        let start = range.start.min(end);
        &self.slides[start..end]
    }

    /// All slides after the first `skip` (e.g. skipping a title slide).
    pub fn skip_leading(&self, skip: usize) -> &[Slide] {
        self.window(skip..self.slides.len())
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_numbers_slides() {
        let deck = Deck::new(
            "a.json",
            None,
            vec![Slide::default(), Slide::default(), Slide::default()],
        );
        let indices: Vec<usize> = deck.slides.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_window_clamps_and_keeps_indices() {
        let deck = Deck::new("a.json", None, vec![Slide::default(); 4]);

        let window = deck.skip_leading(1);
        assert_eq!(window.len(), 3);
        assert_eq!(window[0].index, 1);

        assert!(deck.window(3..99).len() == 1);
        assert!(deck.window(10..20).is_empty());
        assert!(deck.skip_leading(7).is_empty());
    }

    #[test]
    fn test_element_deserializes_flat_geometry() {
        let json = r#"{"type": "text", "text": "Revenue", "left": 0.1, "top": 0.2, "width": 0.3, "height": 0.4}"#;
        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.kind, ElementKind::Text);
        assert_eq!(element.text, "Revenue");
        assert_eq!(element.bbox, BoundingBox::new(0.1, 0.2, 0.3, 0.4));
    }

    #[test]
    fn test_missing_geometry_is_zero_vector() {
        let json = r#"{"type": "image", "filename": "image1.png"}"#;
        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.kind, ElementKind::Image);
        assert!(element.text.is_empty());
        assert_eq!(element.bbox.to_array(), [0.0; 4]);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let json = r#"{"type": "chart", "left": 0.1}"#;
        assert!(serde_json::from_str::<Element>(json).is_err());
    }

    #[test]
    fn test_slide_blank_title_is_none() {
        let json = r#"{"slidetitle": "", "shapes": [], "notes": "speaker notes"}"#;
        let slide: Slide = serde_json::from_str(json).unwrap();
        assert!(slide.title.is_none());
        assert_eq!(slide.notes.as_deref(), Some("speaker notes"));
        assert!(slide.is_empty());
    }
}
