//! `hyper` service adapter.
//!
//! Resolves the request path against a [`SharedRouter`](crate::SharedRouter)
//! and hands the request plus its [`Params`] to the matched handler, or to
//! the default handler when nothing matches.

mod handler;
mod params;
mod service;
mod service_macro;

pub use self::handler::{BoxHandler, Handler};
pub use self::params::Params;
pub use self::service::RouterService;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use http_body_util::Full;

pub type Request<B> = http::Request<B>;
pub type Response = http::Response<Full<Bytes>>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
pub type BoxError = Box<dyn StdError + Send + Sync>;
