use super::params::Params;
use super::{BoxError, BoxFuture, Request, Response, StdError};

use std::future::Future;

pub trait Handler<B> {
    fn call(&self, req: Request<B>, params: Params) -> BoxFuture<'static, Result<Response, BoxError>>;
}

pub type BoxHandler<B> = Box<dyn Handler<B> + Send + Sync>;

impl<B> Handler<B> for BoxHandler<B> {
    fn call(&self, req: Request<B>, params: Params) -> BoxFuture<'static, Result<Response, BoxError>> {
        Handler::call(&**self, req, params)
    }
}

impl<F, B, E, Fut> Handler<B> for F
where
    F: Fn(Request<B>, Params) -> Fut,
    E: StdError + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, E>> + Send + 'static,
{
    fn call(&self, req: Request<B>, params: Params) -> BoxFuture<'static, Result<Response, BoxError>> {
        let fut = (self)(req, params);
        Box::pin(async move {
            match fut.await {
                Ok(r) => Ok(r),
                Err(e) => Err(Box::new(e) as BoxError),
            }
        })
    }
}
