//! Pattern segments and the trie keys derived from them.

use crate::router::PatternError;

use std::fmt;

const SLASH: char = '/';

/// One `/`-delimited token of a pattern.
///
/// Equality and hashing are structural: `{a}` and `{b}` are different
/// segments. The alias-insensitive grouping used by the trie lives in
/// [`SegmentKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches exactly one identical token.
    Literal(Box<str>),
    /// `{alias}`: matches any single token.
    Named(Box<str>),
    /// `<alias>`: matches one or more consecutive tokens.
    Greedy(Box<str>),
}

/// The kind of a segment, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Literal,
    Named,
    Greedy,
}

impl Segment {
    /// Parses a single token.
    ///
    /// Tokens shorter than two characters are always literal. `{x}` is
    /// named, `<x>` is greedy. A token that opens or closes with a bracket
    /// but not as a matched pair is rejected, as is a token containing `/`.
    pub fn parse(token: &str) -> Result<Self, PatternError> {
        if token.contains(SLASH) {
            return Err(PatternError::SlashInSegment {
                segment: token.into(),
            });
        }
        if token.len() < 2 {
            return Ok(Self::Literal(token.into()));
        }

        let bytes = token.as_bytes();
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        // both delimiters are ascii here, so the slice is on char boundaries
        let inner = || &token[1..token.len() - 1];

        match (first, last) {
            (b'{', b'}') => Ok(Self::Named(inner().into())),
            (b'<', b'>') => Ok(Self::Greedy(inner().into())),
            (b'{', _) | (b'<', _) | (_, b'}') | (_, b'>') => {
                Err(PatternError::MismatchedBrackets {
                    segment: token.into(),
                })
            }
            _ => Ok(Self::Literal(token.into())),
        }
    }

    pub fn kind(&self) -> SegmentKind {
        match self {
            Self::Literal(_) => SegmentKind::Literal,
            Self::Named(_) => SegmentKind::Named,
            Self::Greedy(_) => SegmentKind::Greedy,
        }
    }

    /// The placeholder alias, if this is not a literal.
    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Named(a) | Self::Greedy(a) => Some(a),
        }
    }

    pub fn is_greedy(&self) -> bool {
        matches!(self, Self::Greedy(_))
    }

    pub(crate) fn is_empty_literal(&self) -> bool {
        matches!(self, Self::Literal(v) if v.is_empty())
    }

    /// Sort rank: greedy > named > non-empty literal > empty literal.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Self::Greedy(_) => 4,
            Self::Named(_) => 3,
            Self::Literal(v) if !v.is_empty() => 2,
            Self::Literal(_) => 1,
        }
    }

    pub(crate) fn payload(&self) -> &str {
        match self {
            Self::Literal(s) | Self::Named(s) | Self::Greedy(s) => s,
        }
    }

    pub(crate) fn key(&self) -> SegmentKey {
        match self {
            Self::Literal(v) => SegmentKey::Literal(v.clone()),
            Self::Named(_) => SegmentKey::Named,
            Self::Greedy(_) => SegmentKey::Greedy,
        }
    }

    pub(crate) fn key_ref(&self) -> KeyRef<'_> {
        match self {
            Self::Literal(v) => KeyRef::Literal(v),
            Self::Named(_) => KeyRef::Named,
            Self::Greedy(_) => KeyRef::Greedy,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => f.write_str(v),
            Self::Named(a) => write!(f, "{{{}}}", a),
            Self::Greedy(a) => write!(f, "<{}>", a),
        }
    }
}

/// Trie key of a segment.
///
/// Placeholder aliases are dropped, so every `Named` segment maps to the same
/// key, and likewise every `Greedy` segment. As a consequence a trie level
/// holds at most one named child and one greedy child; two patterns that
/// differ only in a placeholder alias share a trie address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum SegmentKey {
    Literal(Box<str>),
    Named,
    Greedy,
}

impl SegmentKey {
    /// Whether a literal request token is accepted by this key.
    #[inline]
    pub(crate) fn accepts(&self, token: &str) -> bool {
        match self {
            Self::Literal(v) => &**v == token,
            Self::Named | Self::Greedy => true,
        }
    }

    #[inline]
    pub(crate) fn is_greedy(&self) -> bool {
        matches!(self, Self::Greedy)
    }

    #[inline]
    pub(crate) fn as_ref(&self) -> KeyRef<'_> {
        match self {
            Self::Literal(v) => KeyRef::Literal(v),
            Self::Named => KeyRef::Named,
            Self::Greedy => KeyRef::Greedy,
        }
    }
}

/// Borrowed form of [`SegmentKey`], ordered the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum KeyRef<'a> {
    Literal(&'a str),
    Named,
    Greedy,
}
