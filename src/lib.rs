//! A URL path router.
//!
//! Patterns are `/`-delimited and may contain `{name}` placeholders, which
//! match one segment, and `<name>` placeholders, which match one or more
//! segments:
//!
//! ```
//! use trie_router::{Binding, Router};
//!
//! let mut router: Router<u32> = Router::new();
//! router
//!     .insert("/a/b", 1)
//!     .insert("/a/{x}", 2)
//!     .insert("/a/<x>", 3);
//!
//! assert_eq!(*router.find("/a/b").unwrap().resource(), 1);
//!
//! let m = router.find("/a/c").unwrap();
//! assert_eq!((*m.resource(), m.bindings().get_one("x")), (2, Some("c")));
//!
//! let m = router.find("/a/c/d").unwrap();
//! assert_eq!(
//!     m.bindings().get("x"),
//!     Some(&Binding::Many(vec!["c".into(), "d".into()]))
//! );
//! ```
//!
//! The most specific pattern wins: more literal segments first, then more
//! `{name}` placeholders, then the most recent registration.

#![forbid(unsafe_code)]

mod cache;
mod config;
mod matcher;
mod path;
mod router;
mod segment;
mod shared;
mod table;

#[cfg(feature = "hyper-service")]
pub mod hyper_service;

pub use crate::cache::CacheStats;
pub use crate::config::{CacheCapacity, RouterConfig};
pub use crate::matcher::MatchKey;
pub use crate::path::{LiteralPath, PatternPath, TrailingSlash};
pub use crate::router::{Binding, Bindings, Match, PatternError, Router, RouterError};
pub use crate::segment::{Segment, SegmentKind};
pub use crate::shared::SharedRouter;
pub use crate::table::{Route, RouteTable};
