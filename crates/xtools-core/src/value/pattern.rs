//! Pattern-matching expression handle.
//!
//! A pattern couples the source text of a regular expression with a set of
//! single-letter flags (`g`, `i`, `m`, `s`, `u`, `y`) and a `last_index`
//! cursor used by global and sticky matching.
//!
//! The compiled [`Regex`] is immutable and cheap to share, so copying a
//! pattern never recompiles it.  Regex syntax is the `regex` crate's; Unicode
//! matching is always on, so the `u` flag is recorded but changes nothing.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use regex::{Match, Regex, RegexBuilder};

use super::{NodeId, ValueError};

/// Matching flags of a [`Pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PatternFlags {
    /// `g`: successive matches continue from `last_index`.
    pub global: bool,
    /// `i`: case-insensitive matching.
    pub ignore_case: bool,
    /// `m`: `^` and `$` match at line boundaries.
    pub multi_line: bool,
    /// `s`: `.` also matches `\n`.
    pub dot_all: bool,
    /// `u`: Unicode mode.
    pub unicode: bool,
    /// `y`: matches must start exactly at `last_index`.
    pub sticky: bool,
}

impl FromStr for PatternFlags {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = PatternFlags::default();
        for letter in s.chars() {
            let slot = match letter {
                'g' => &mut flags.global,
                'i' => &mut flags.ignore_case,
                'm' => &mut flags.multi_line,
                's' => &mut flags.dot_all,
                'u' => &mut flags.unicode,
                'y' => &mut flags.sticky,
                other => {
                    return Err(ValueError::InvalidFlags {
                        flags: s.to_string(),
                        reason: format!("unknown flag '{other}'"),
                    })
                }
            };
            if *slot {
                return Err(ValueError::InvalidFlags {
                    flags: s.to_string(),
                    reason: format!("repeated flag '{letter}'"),
                });
            }
            *slot = true;
        }
        Ok(flags)
    }
}

impl fmt::Display for PatternFlags {
    /// Writes the flags in canonical `gimsuy` order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters = [
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multi_line, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.sticky, 'y'),
        ];
        for (set, letter) in letters {
            if set {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

struct PatternData {
    source: String,
    flags: PatternFlags,
    regex: Regex,
    last_index: Cell<usize>,
}

/// A compiled pattern with its flags and match cursor, shared by handle.
#[derive(Clone)]
pub struct Pattern(Rc<PatternData>);

impl Pattern {
    /// Compiles `source` with the flags spelled in `flags` (e.g. `"gi"`).
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidFlags`] for unknown or repeated flag
    /// letters, and [`ValueError::InvalidPattern`] if `source` does not
    /// compile.
    pub fn new(source: &str, flags: &str) -> Result<Self, ValueError> {
        Self::with_flags(source, flags.parse()?)
    }

    /// Compiles `source` with already-parsed flags.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidPattern`] if `source` does not compile.
    pub fn with_flags(source: &str, flags: PatternFlags) -> Result<Self, ValueError> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(flags.ignore_case)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_all)
            .build()
            .map_err(|e| ValueError::InvalidPattern {
                pattern: source.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self(Rc::new(PatternData {
            source: source.to_string(),
            flags,
            regex,
            last_index: Cell::new(0),
        })))
    }

    pub fn source(&self) -> &str {
        &self.0.source
    }

    pub fn flags(&self) -> PatternFlags {
        self.0.flags
    }

    /// Returns `true` if the pattern matches anywhere in `text`.
    ///
    /// Ignores and does not move `last_index`.
    pub fn is_match(&self, text: &str) -> bool {
        self.0.regex.is_match(text)
    }

    /// Finds the next match in `text`.
    ///
    /// Without the `g` or `y` flag the search always starts at 0 and the
    /// cursor is left alone.  With either flag the search starts at
    /// `last_index`, which then moves to the end of the match, or back to 0
    /// when nothing matches.  A sticky pattern only accepts a match that
    /// starts exactly at `last_index`.
    pub fn find_next<'t>(&self, text: &'t str) -> Option<Match<'t>> {
        let flags = self.0.flags;
        if !flags.global && !flags.sticky {
            return self.0.regex.find(text);
        }

        let start = self.0.last_index.get();
        let found = if start <= text.len() && text.is_char_boundary(start) {
            self.0
                .regex
                .find_at(text, start)
                .filter(|m| !flags.sticky || m.start() == start)
        } else {
            None
        };

        self.0.last_index.set(found.map_or(0, |m| m.end()));
        found
    }

    /// Byte offset where the next global or sticky search starts.
    pub fn last_index(&self) -> usize {
        self.0.last_index.get()
    }

    pub fn set_last_index(&self, index: usize) {
        self.0.last_index.set(index);
    }

    /// Returns `true` when both handles point at the same pattern.
    pub fn ptr_eq(&self, other: &Pattern) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn node_id(&self) -> NodeId {
        NodeId::of(&self.0)
    }

    /// A new pattern with the same source and flags and a reset cursor.
    pub(crate) fn fresh_copy(&self) -> Self {
        Self(Rc::new(PatternData {
            source: self.0.source.clone(),
            flags: self.0.flags,
            regex: self.0.regex.clone(),
            last_index: Cell::new(0),
        }))
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.0.source, self.0.flags)
    }
}
