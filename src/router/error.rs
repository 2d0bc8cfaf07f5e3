/// A pattern string that can not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("segment can not contain '/': {segment:?}")]
    SlashInSegment { segment: Box<str> },

    #[error("mismatched placeholder brackets in segment {segment:?}")]
    MismatchedBrackets { segment: Box<str> },

    #[error("placeholder alias {alias:?} is used more than once")]
    DuplicateAlias { alias: Box<str> },
}

/// Registration and deregistration failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: Box<str>,
        #[source]
        source: PatternError,
    },

    #[error("route is already registered: {pattern}")]
    DuplicateRoute { pattern: Box<str> },

    #[error("route is not registered: {pattern}")]
    RouteNotFound { pattern: Box<str> },
}

impl RouterError {
    pub(crate) fn pattern(pattern: &str, source: PatternError) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            source,
        }
    }
}
