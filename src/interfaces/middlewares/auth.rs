use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{constants::API_PREFIX, entities::token::Claims, errors::AuthError, AppState};

/// The Auth Gate: every route outside the public allow-list needs a valid
/// bearer token before any handler runs.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if is_public_route(req.path(), req.method()) {
                return service.call(req).await;
            }

            let claims = match get_valid_claims(&req) {
                Ok(claims) => claims,
                Err(AuthError::MissingAppState) => {
                    tracing::error!("AppState missing in auth middleware");
                    return Ok(req.into_response(
                        HttpResponse::InternalServerError()
                            .json(serde_json::json!({"error": "Internal server error"})),
                    ));
                }
                Err(e) => {
                    tracing::warn!(
                        path = %req.path(),
                        method = %req.method(),
                        reason = %e,
                        "Rejected unauthenticated request"
                    );
                    return Ok(req.into_response(unauthorized()));
                }
            };

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({"error": "Unauthorized"}))
}

/// Reads are public for content, writes only for the contact form.
pub fn is_public_route(path: &str, method: &Method) -> bool {
    if *method == Method::OPTIONS {
        return true;
    }

    let path = path.trim_end_matches('/');
    let api_path = path.strip_prefix(API_PREFIX);

    match (method, api_path) {
        (&Method::GET, None) => path.is_empty(),
        (&Method::GET, Some(route)) => {
            route == "/health"
                || route == "/bot"
                || is_collection_or_item(route, "/projects")
                || is_collection_or_item(route, "/updates")
        }
        (&Method::POST, Some(route)) => route == "/auth/login" || route == "/contact",
        _ => false,
    }
}

fn is_collection_or_item(route: &str, collection: &str) -> bool {
    match route.strip_prefix(collection) {
        Some("") => true,
        Some(rest) => rest.starts_with('/') && !rest[1..].is_empty() && !rest[1..].contains('/'),
        None => false,
    }
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn get_valid_claims(req: &ServiceRequest) -> Result<Claims, AuthError> {
    let state = req.app_data::<web::Data<AppState>>()
        .ok_or(AuthError::MissingAppState)?;

    let token = extract_token(req).ok_or(AuthError::MissingCredentials)?;
    state.auth_handler.verify(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_reads_and_submissions() {
        assert!(is_public_route("/", &Method::GET));
        assert!(is_public_route("/api/health", &Method::GET));
        assert!(is_public_route("/api/projects", &Method::GET));
        assert!(is_public_route("/api/projects/my-site", &Method::GET));
        assert!(is_public_route("/api/updates/hello-world", &Method::GET));
        assert!(is_public_route("/api/bot", &Method::GET));
        assert!(is_public_route("/api/contact", &Method::POST));
        assert!(is_public_route("/api/auth/login", &Method::POST));
        assert!(is_public_route("/api/projects", &Method::OPTIONS));
    }

    #[test]
    fn mutations_and_inbox_are_protected() {
        assert!(!is_public_route("/api/projects", &Method::POST));
        assert!(!is_public_route("/api/projects/abc", &Method::PUT));
        assert!(!is_public_route("/api/projects/abc", &Method::DELETE));
        assert!(!is_public_route("/api/updates", &Method::POST));
        assert!(!is_public_route("/api/bot", &Method::PUT));
        assert!(!is_public_route("/api/contact", &Method::GET));
        assert!(!is_public_route("/api/contact/abc", &Method::PATCH));
        assert!(!is_public_route("/api/projects/a/b", &Method::GET));
        assert!(!is_public_route("/api/projectsx", &Method::GET));
    }
}
