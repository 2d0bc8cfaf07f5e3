//! Parsed patterns and request paths.

use crate::router::PatternError;
use crate::segment::Segment;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;

use smallvec::SmallVec;

const SLASH: char = '/';

/// Trailing-slash disposition of a pattern.
///
/// A pattern ending in a greedy placeholder is `Indeterminate`: it accepts
/// request paths with or without a trailing slash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrailingSlash {
    No,
    Yes,
    Indeterminate,
}

impl TrailingSlash {
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Self::No => 0,
            Self::Yes => 1,
            Self::Indeterminate => 2,
        }
    }

    #[inline]
    pub(crate) fn from_bool(b: bool) -> Self {
        if b {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// A compiled route pattern.
///
/// Immutable once built. Patterns are totally ordered: segment by segment,
/// greedy ranks above named, named above non-empty literals and non-empty
/// literals above the empty literal; ties fall through to the alias or
/// literal text, and finally to the trailing-slash flag.
#[derive(Debug, Clone)]
pub struct PatternPath {
    segments: Box<[Segment]>,
    trailing: TrailingSlash,
}

impl PatternPath {
    /// Compiles a pattern string such as `/users/{id}/files/<path>`.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let segments = split(pattern)
            .map(Segment::parse)
            .collect::<Result<Vec<_>, _>>()?;
        let ends_with_slash = pattern.ends_with(SLASH) && pattern.len() > 1;
        Self::from_parts(segments, TrailingSlash::from_bool(ends_with_slash))
    }

    /// Builds a pattern from already parsed segments.
    ///
    /// An empty segment list denotes the root pattern. The trailing flag is
    /// forced to `Indeterminate` when the last segment is greedy.
    pub fn from_parts(
        mut segments: Vec<Segment>,
        trailing: TrailingSlash,
    ) -> Result<Self, PatternError> {
        if segments.is_empty() {
            segments.push(Segment::Literal("".into()));
        }

        {
            let mut aliases: SmallVec<[&str; 8]> = SmallVec::new();
            for alias in segments.iter().filter_map(Segment::alias) {
                if aliases.contains(&alias) {
                    return Err(PatternError::DuplicateAlias {
                        alias: alias.into(),
                    });
                }
                aliases.push(alias);
            }
        }

        let trailing = match segments.last() {
            Some(s) if s.is_greedy() => TrailingSlash::Indeterminate,
            _ if trailing == TrailingSlash::Indeterminate => TrailingSlash::No,
            _ => trailing,
        };

        Ok(Self {
            segments: segments.into_boxed_slice(),
            trailing,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn trailing_slash(&self) -> TrailingSlash {
        self.trailing
    }

    /// Number of segments; the root pattern has one empty segment, so this
    /// is never zero.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// `/` or the empty string.
    pub fn is_root(&self) -> bool {
        self.segments.len() == 1 && self.segments[0].is_empty_literal()
    }

    /// Concatenates `self` and `other`, used for mounting one table under a
    /// prefix. A root on either side yields the other side's segments; the
    /// trailing flag is taken from `other`.
    pub fn join(&self, other: &PatternPath) -> Result<PatternPath, PatternError> {
        let segments: Vec<Segment> = match (self.is_root(), other.is_root()) {
            (true, true) => Vec::new(),
            (true, false) => other.segments.to_vec(),
            (false, true) => self.segments.to_vec(),
            (false, false) => self
                .segments
                .iter()
                .chain(other.segments.iter())
                .cloned()
                .collect(),
        };
        Self::from_parts(segments, other.trailing)
    }

    fn cmp_segments(&self, other: &Self) -> Ordering {
        let lhs = self.segments.iter().map(|s| (s.rank(), s.payload()));
        let rhs = other.segments.iter().map(|s| (s.rank(), s.payload()));
        lhs.cmp(rhs)
    }
}

impl PartialEq for PatternPath {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PatternPath {}

impl PartialOrd for PatternPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PatternPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_segments(other)
            .then_with(|| self.trailing.cmp(&other.trailing))
    }
}

impl Hash for PatternPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
        self.trailing.hash(state);
    }
}

impl fmt::Display for PatternPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seg in self.segments.iter() {
            write!(f, "/{}", seg)?;
        }
        if self.trailing == TrailingSlash::Yes {
            f.write_str("/")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for PatternPath {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for &PatternPath {
    type Output = Result<PatternPath, PatternError>;

    fn add(self, rhs: &PatternPath) -> Self::Output {
        self.join(rhs)
    }
}

/// A request path split into literal tokens.
#[derive(Debug, Clone)]
pub struct LiteralPath<'p> {
    tokens: SmallVec<[&'p str; 8]>,
    ends_with_slash: bool,
}

impl<'p> LiteralPath<'p> {
    pub fn new(path: &'p str) -> Self {
        Self {
            tokens: split(path).collect(),
            ends_with_slash: path.ends_with(SLASH) && path.len() > 1,
        }
    }

    pub fn tokens(&self) -> &[&'p str] {
        &self.tokens
    }

    pub fn ends_with_slash(&self) -> bool {
        self.ends_with_slash
    }
}

/// Strips every leading and trailing slash, then splits on `/`.
/// Always yields at least one (possibly empty) token.
#[inline]
fn split(s: &str) -> std::str::Split<'_, char> {
    s.trim_matches(SLASH).split(SLASH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PatternPath {
        PatternPath::parse(s).unwrap()
    }

    #[test]
    fn parse_trailing_slash() {
        assert_eq!(p("/a/b").trailing_slash(), TrailingSlash::No);
        assert_eq!(p("/a/b/").trailing_slash(), TrailingSlash::Yes);
        assert_eq!(p("/a/<b>").trailing_slash(), TrailingSlash::Indeterminate);
        assert_eq!(p("/a/<b>/").trailing_slash(), TrailingSlash::Indeterminate);
        assert_eq!(p("/").trailing_slash(), TrailingSlash::No);
        assert!(p("/").is_root());
        assert!(p("").is_root());
        assert_eq!(p("").len(), 1);
        assert_eq!(p("/"), p(""));
    }

    #[test]
    fn display_round_trip() {
        for s in &["/", "/a", "/a/", "/a/{b}/c/", "/x/<rest>"] {
            assert_eq!(p(s).to_string(), *s);
        }
        assert_eq!(p("//a//").to_string(), "/a/");
    }

    #[test]
    fn duplicate_alias() {
        assert!(matches!(
            PatternPath::parse("/{x}/{x}"),
            Err(PatternError::DuplicateAlias { .. })
        ));
        assert!(matches!(
            PatternPath::parse("/{x}/<x>"),
            Err(PatternError::DuplicateAlias { .. })
        ));
        assert!(PatternPath::parse("/{x}/{y}").is_ok());
    }

    #[test]
    fn ordering() {
        let mut v = vec![p("/<a>"), p("/{a}"), p("/b"), p("/"), p("/b/")];
        v.sort();
        let s: Vec<String> = v.iter().map(ToString::to_string).collect();
        assert_eq!(s, ["/", "/b", "/b/", "/{a}", "/<a>"]);

        assert!(p("/a/{x}") < p("/a/{y}"));
        assert_ne!(p("/{x}"), p("/{y}"));
    }

    #[test]
    fn concatenation() {
        let api = p("/api");
        assert_eq!((&api + &p("/{x}")).unwrap(), p("/api/{x}"));
        assert_eq!((&api + &p("/")).unwrap(), p("/api"));
        assert_eq!((&p("/") + &p("/{x}/")).unwrap(), p("/{x}/"));
        assert_eq!((&p("/") + &p("/")).unwrap(), p("/"));
        assert_eq!(
            (&p("/files/") + &p("/<rest>")).unwrap().trailing_slash(),
            TrailingSlash::Indeterminate
        );
        assert!(matches!(
            &p("/{id}") + &p("/{id}"),
            Err(PatternError::DuplicateAlias { .. })
        ));
    }

    #[test]
    fn literal_path() {
        let l = LiteralPath::new("/a/b/");
        assert_eq!(l.tokens(), &["a", "b"]);
        assert!(l.ends_with_slash());

        let root = LiteralPath::new("/");
        assert_eq!(root.tokens(), &[""]);
        assert!(!root.ends_with_slash());

        let gap = LiteralPath::new("/a//b");
        assert_eq!(gap.tokens(), &["a", "", "b"]);
    }
}
