use super::handler::{BoxHandler, Handler};
use super::params::Params;
use super::{BoxError, BoxFuture, Request, Response};

use crate::router::Router;
use crate::shared::SharedRouter;

use std::sync::Arc;

use hyper::service::Service;
use percent_encoding::percent_decode_str;
use tracing::trace;

/// Dispatches requests by percent-decoded path. Cheap to clone; clones share
/// the router.
pub struct RouterService<H> {
    router: Arc<SharedRouter<H>>,
    default: Arc<H>,
}

impl<H> Clone for RouterService<H> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
            default: Arc::clone(&self.default),
        }
    }
}

impl<B, H> Service<Request<B>> for RouterService<H>
where
    H: Handler<B>,
{
    type Response = Response;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Response, BoxError>>;

    fn call(&self, req: Request<B>) -> Self::Future {
        let decoded = percent_decode_str(req.uri().path())
            .decode_utf8()
            .map(|path| path.into_owned());
        let path = match decoded {
            Ok(path) => path,
            Err(_) => {
                trace!(path = %req.uri().path(), "path is not utf-8 after decoding");
                return Handler::call(&*self.default, req, Params::empty());
            }
        };
        let router = self.router.load();
        let found = router.find(&path);
        let fut = match found {
            Some(m) => {
                let params = Params::new(m.shared_bindings());
                Handler::call(m.resource(), req, params)
            }
            None => {
                trace!(path = %path, "dispatch to default handler");
                Handler::call(&*self.default, req, Params::empty())
            }
        };
        fut
    }
}

impl<H> RouterService<H> {
    pub fn new(default: H) -> Self {
        Self::from_router(Router::new(), default)
    }

    pub fn from_router(router: Router<H>, default: H) -> Self {
        Self::from_shared(Arc::new(SharedRouter::new(router)), default)
    }

    /// Serves from `router`; updates published through it take effect on the
    /// next request.
    pub fn from_shared(router: Arc<SharedRouter<H>>, default: H) -> Self {
        Self {
            router,
            default: Arc::new(default),
        }
    }

    pub fn router(&self) -> &Arc<SharedRouter<H>> {
        &self.router
    }
}

impl<B> Router<BoxHandler<B>> {
    pub fn route(&mut self, pattern: &str, h: impl Handler<B> + Send + Sync + 'static) -> &mut Self {
        self.insert(pattern, Box::new(h))
    }

    pub fn with_default(
        self,
        default: impl Handler<B> + Send + Sync + 'static,
    ) -> RouterService<BoxHandler<B>> {
        RouterService::from_router(self, Box::new(default))
    }
}
