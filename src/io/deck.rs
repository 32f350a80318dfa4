//! Reading decks from JSON.
//!
//! Accepted shapes:
//! - `{ "DocumentTitle": "...", "slides": [ ... ] }`
//! - a bare array of slides
//!
//! Slides are numbered by position after parsing.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::{Deck, Slide};

/// Failure to turn a file into a [`Deck`].
#[derive(Error, Debug)]
pub enum DeckError {
    #[error("cannot read deck '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed deck '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct WrappedDeck {
    #[serde(rename = "DocumentTitle", default)]
    title: Option<String>,
    #[serde(default)]
    slides: Vec<Slide>,
}

/// Parse deck JSON. `source` names the deck in results and errors.
pub fn parse_deck(json: &str, source: &str) -> Result<Deck, DeckError> {
    let json_error = |e: serde_json::Error| DeckError::Json {
        path: PathBuf::from(source),
        source: e,
    };

    let deck = if json.trim_start().starts_with('[') {
        let slides: Vec<Slide> = serde_json::from_str(json).map_err(json_error)?;
        Deck::new(source, None, slides)
    } else {
        let wrapped: WrappedDeck = serde_json::from_str(json).map_err(json_error)?;
        Deck::new(source, wrapped.title, wrapped.slides)
    };

    tracing::debug!(target: "compare", "parsed deck '{source}' with {} slides", deck.len());
    Ok(deck)
}

/// Read and parse a deck file.
pub fn load_deck(path: impl AsRef<Path>) -> Result<Deck, DeckError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_deck(&json, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElementKind;

    #[test]
    fn test_parse_wrapped_deck() {
        let json = r#"{
            "DocumentTitle": "Quarterly Review",
            "slides": [
                {"slidetitle": "Intro", "shapes": []},
                {"slidetitle": "Numbers", "shapes": [
                    {"type": "text", "text": "Revenue Q1", "left": 0.1, "top": 0.1, "width": 0.5, "height": 0.2},
                    {"type": "image", "filename": "chart.png", "left": 0.1, "top": 0.4, "width": 0.8, "height": 0.5}
                ], "imagehash": "00000000000000ff", "textvector": [0.1, 0.9]}
            ]
        }"#;

        let deck = parse_deck(json, "review.json").unwrap();
        assert_eq!(deck.title.as_deref(), Some("Quarterly Review"));
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.slides[1].index, 1);
        assert_eq!(deck.slides[1].elements[1].kind, ElementKind::Image);
        assert_eq!(deck.slides[1].image_hash.as_ref().unwrap().bit_len(), 64);
        assert_eq!(deck.slides[1].text_vector.as_deref(), Some(&[0.1f32, 0.9][..]));
    }

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[{"shapes": []}, {"shapes": []}, {"shapes": []}]"#;
        let deck = parse_deck(json, "bare.json").unwrap();
        assert!(deck.title.is_none());
        assert_eq!(deck.slides.last().unwrap().index, 2);
    }

    #[test]
    fn test_malformed_deck_names_source() {
        let err = parse_deck(r#"{"slides": [{"shapes": [{"type": "video"}]}]}"#, "bad.json")
            .unwrap_err();
        assert!(matches!(err, DeckError::Json { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_bad_hash_is_rejected() {
        let json = r#"[{"shapes": [], "imagehash": "xyz"}]"#;
        assert!(parse_deck(json, "hash.json").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_deck("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DeckError::Io { .. }));
    }
}
