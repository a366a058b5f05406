//! Progressive text reveal.
//!
//! Text is tokenized into atomic spans (`` `code` ``, `**bold**`) and single
//! characters, then revealed one token per tick so a half-open span is never
//! visible. The revealed prefix can be rendered into themed segments at any
//! point.

pub mod driver;
pub mod engine;
pub mod render;
pub mod theme;
pub mod token;

use serde::{Deserialize, Serialize};

pub use driver::{RevealHandle, RevealSlot, spawn_reveal};
pub use engine::{Reveal, Revealer, Tick};
pub use render::{Line, Segment, Styled, parse_line, render};
pub use theme::{Palette, Theme, UnknownTheme};
pub use token::{Token, TokenKind, tokenize};

/// Which reveal interval applies to a message.
///
/// Assistant replies reveal quickly; notices (greetings, errors) reveal at a
/// slower pace. The concrete durations come from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RevealPace {
    #[default]
    Reply,
    Notice,
}
