//! Response hardening headers and path-based cache policy.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};

/// Sources allowed by the page templates: self-hosted assets plus the web
/// font CDNs.
pub const CONTENT_SECURITY_POLICY: &str = concat!(
    "default-src 'self'; ",
    "script-src 'self' 'unsafe-inline' https://fonts.cdnfonts.com; ",
    "style-src 'self' 'unsafe-inline' https://fonts.googleapis.com https://fonts.cdnfonts.com; ",
    "font-src 'self' https://fonts.gstatic.com https://fonts.cdnfonts.com; ",
    "img-src 'self' data: https:;"
);

const HSTS: &str = "max-age=31536000; includeSubDomains";
const PERMISSIONS_POLICY: &str = "geolocation=(), microphone=(), camera=()";
const STATIC_CACHE: &str = "public, max-age=31536000, immutable";
const HOME_CACHE: &str = "public, max-age=3600";
const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Cache policy chosen from the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Fingerprinted assets under `/static/`.
    Immutable,
    /// The landing page.
    Home,
    /// Everything else.
    NoStore,
}

impl CachePolicy {
    /// Pick the policy for `path`.
    ///
    /// # Examples
    /// ```
    /// use vidensbank::middleware::security_headers::CachePolicy;
    ///
    /// assert_eq!(CachePolicy::for_path("/static/site.css"), CachePolicy::Immutable);
    /// assert_eq!(CachePolicy::for_path("/"), CachePolicy::Home);
    /// assert_eq!(CachePolicy::for_path("/search"), CachePolicy::NoStore);
    /// ```
    pub fn for_path(path: &str) -> Self {
        if path.starts_with("/static/") {
            Self::Immutable
        } else if path == "/" || path == "/index" {
            Self::Home
        } else {
            Self::NoStore
        }
    }

    fn apply(self, headers: &mut HeaderMap) {
        match self {
            Self::Immutable => insert(headers, header::CACHE_CONTROL, STATIC_CACHE),
            Self::Home => insert(headers, header::CACHE_CONTROL, HOME_CACHE),
            Self::NoStore => {
                insert(headers, header::CACHE_CONTROL, NO_CACHE);
                insert(headers, header::PRAGMA, "no-cache");
                insert(headers, header::EXPIRES, "0");
            }
        }
    }
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &'static str) {
    headers.insert(name, HeaderValue::from_static(value));
}

/// Middleware adding the browser hardening headers to every response.
///
/// `Strict-Transport-Security` is only sent when HSTS is enabled, which the
/// server does for production deployments.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use vidensbank::middleware::SecurityHeaders;
///
/// let app = App::new().wrap(SecurityHeaders::new(false));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityHeaders {
    hsts: bool,
}

impl SecurityHeaders {
    /// Create the middleware, optionally emitting HSTS.
    pub fn new(hsts: bool) -> Self {
        Self { hsts }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityHeadersMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersMiddleware {
            service,
            hsts: self.hsts,
        }))
    }
}

/// Service wrapper produced by [`SecurityHeaders`].
pub struct SecurityHeadersMiddleware<S> {
    service: S,
    hsts: bool,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let policy = CachePolicy::for_path(req.path());
        let hsts = self.hsts;
        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            let headers = res.headers_mut();
            insert(headers, header::X_CONTENT_TYPE_OPTIONS, "nosniff");
            insert(headers, header::X_FRAME_OPTIONS, "SAMEORIGIN");
            insert(headers, header::X_XSS_PROTECTION, "1; mode=block");
            insert(
                headers,
                header::CONTENT_SECURITY_POLICY,
                CONTENT_SECURITY_POLICY,
            );
            insert(
                headers,
                header::REFERRER_POLICY,
                "strict-origin-when-cross-origin",
            );
            insert(
                headers,
                HeaderName::from_static("permissions-policy"),
                PERMISSIONS_POLICY,
            );
            if hsts {
                insert(headers, header::STRICT_TRANSPORT_SECURITY, HSTS);
            }
            policy.apply(headers);
            Ok(res)
        })
    }
}
