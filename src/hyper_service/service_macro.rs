/// Builds a [`RouterService`](crate::hyper_service::RouterService) from
/// `pattern => handler` pairs and a default handler.
///
/// ```ignore
/// let service = router_service! {
///     "/hello/{name}" => hello,
///     "/files/<path>" => file;
///     _ => not_found
/// };
/// ```
#[macro_export]
macro_rules! router_service {
    {$($pattern:expr => $handler:expr),+ ; _ => $default:expr} => {{
        let mut __router: $crate::Router<$crate::hyper_service::BoxHandler<_>> = $crate::Router::new();
        $(__router.route($pattern, $handler);)+
        __router.with_default($default)
    }};
}
