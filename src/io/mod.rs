//! Input/Output handling for the CLI.
//!
//! This module provides:
//! - Deck loading from the JSON produced by the extraction side
//! - Unified JSON output envelope
//! - Exit codes shared by text and JSON output

pub mod deck;
pub mod envelope;
pub mod exit_code;

pub use deck::{DeckError, load_deck, parse_deck};
pub use envelope::{EntityType, Envelope, MessageType, Meta, ResultCode, SCHEMA_VERSION, Status};
pub use exit_code::ExitCode;
