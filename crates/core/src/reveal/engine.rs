//! Reveal state machine.
//!
//! [`Reveal`] owns the source text and the end offset of every token; the
//! display is always `source[..end of last revealed token]`, so a span is
//! either fully shown or not at all. Nothing here knows about time: a
//! driver calls [`Reveal::tick`] on whatever schedule it likes.

use super::token::tokenize;

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick<'a> {
    /// One more token was appended; carries the new display.
    Advanced(&'a str),
    /// Every token is already shown. Further ticks keep returning this.
    Done,
    /// The tick belonged to a reveal that has since been replaced.
    Superseded,
}

#[derive(Debug, Clone)]
pub struct Reveal {
    source: String,
    ends: Vec<usize>,
    cursor: usize,
    shown: usize,
}

impl Reveal {
    /// Start a reveal. With `animate` false the full text shows immediately.
    pub fn new(text: impl Into<String>, animate: bool) -> Self {
        if !animate {
            return Self::instant(text);
        }

        let source = text.into();
        let ends = tokenize(&source)
            .iter()
            .scan(0, |end, token| {
                *end += token.text.len();
                Some(*end)
            })
            .collect();

        Self { source, ends, cursor: 0, shown: 0 }
    }

    pub fn instant(text: impl Into<String>) -> Self {
        let source = text.into();
        let shown = source.len();
        Self { source, ends: Vec::new(), cursor: 0, shown }
    }

    /// Reveal the next token.
    pub fn tick(&mut self) -> Tick<'_> {
        let next = self.ends.get(self.cursor).copied();
        match next {
            Some(end) => {
                self.shown = end;
                self.cursor += 1;
                Tick::Advanced(self.display())
            }
            None => Tick::Done,
        }
    }

    pub fn display(&self) -> &str {
        &self.source[..self.shown]
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.ends.len()
    }

    /// (revealed tokens, total tokens). Instant reveals report (0, 0).
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.ends.len())
    }
}

/// Owner of the reveal for one displayed message.
///
/// Calling [`Revealer::show`] with different text or a different animate
/// flag replaces the reveal and bumps the generation; ticks stamped with an
/// older generation are ignored.
#[derive(Debug, Default)]
pub struct Revealer {
    current: Option<(Reveal, bool)>,
    generation: u64,
}

impl Revealer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `text`, restarting from an empty cursor unless it is already shown
    /// with the same animate flag. Returns the generation ticks must carry.
    pub fn show(&mut self, text: &str, animate: bool) -> u64 {
        let unchanged = matches!(&self.current, Some((reveal, flag)) if reveal.source() == text && *flag == animate);
        if !unchanged {
            self.generation += 1;
            self.current = Some((Reveal::new(text, animate), animate));
        }
        self.generation
    }

    pub fn tick(&mut self, generation: u64) -> Tick<'_> {
        if generation != self.generation {
            return Tick::Superseded;
        }
        match self.current.as_mut() {
            Some((reveal, _)) => reveal.tick(),
            None => Tick::Superseded,
        }
    }

    /// Drop the reveal, e.g. when the message goes away.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.current = None;
    }

    pub fn display(&self) -> &str {
        self.current.as_ref().map_or("", |(reveal, _)| reveal.display())
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when nothing is left to reveal (including when nothing is shown).
    pub fn is_done(&self) -> bool {
        self.current.as_ref().is_none_or(|(reveal, _)| reveal.is_done())
    }
}
