use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{IndexError, ParseError};

/// The edit command parser.
pub mod edit;

/// A parser for one command's argument string.
///
/// Each command supplies its own prefixes and validators behind this single
/// entry point.
pub trait CommandParser {
    /// What a successful parse produces.
    type Output;

    /// Parse the arguments that follow the command word.
    fn parse(&self, args: &str) -> Result<Self::Output, ParseError>;
}

/// A position in the displayed list, 1-based for users and 0-based for code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "usize")]
pub struct Index(NonZeroUsize);

impl Index {
    /// Index from a 1-based position; `None` for 0.
    pub fn from_one_based(position: usize) -> Option<Self> {
        NonZeroUsize::new(position).map(Self)
    }

    /// Index from a 0-based offset.
    pub fn from_zero_based(offset: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(offset))
    }

    /// The 1-based position.
    pub fn one_based(self) -> usize {
        self.0.get()
    }

    /// The 0-based offset.
    pub fn zero_based(self) -> usize {
        self.0.get() - 1
    }
}

impl From<Index> for usize {
    fn from(index: Index) -> usize {
        index.one_based()
    }
}

impl std::fmt::Display for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Index {
    type Err = IndexError;

    /// Parse a trimmed, unsigned, non-zero decimal integer. A leading `+` is
    /// rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IndexError);
        }
        s.parse::<NonZeroUsize>().map(Self).map_err(|_| IndexError)
    }
}
