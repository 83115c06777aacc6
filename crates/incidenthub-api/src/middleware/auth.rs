//! The access-control middleware.
//!
//! Every protected request passes through a fixed pipeline, terminal at the
//! first failing step:
//!
//! 1. extract the bearer token,
//! 2. verify it against the candidate secrets,
//! 3. hydrate the identity from the store,
//! 4. gate on password expiry (whitelisted remediation routes excepted),
//! 5. attach the resolved [`CurrentUser`] to the request.

use axum::extract::{MatchedPath, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{Extensions, HeaderMap, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use incidenthub_core::error::AppError;
use incidenthub_entity::user::UserRole;
use incidenthub_service::context::CurrentUser;

use crate::state::AuthState;

/// Routes reachable with an expired password, so the user can still see who
/// they are, change the password, and sign out. Matched against the router's
/// registered route template, not the raw URL.
const EXPIRY_WHITELIST: &[(Method, &str)] = &[
    (Method::GET, "/api/auth/me"),
    (Method::PATCH, "/api/auth/password"),
    (Method::POST, "/api/auth/logout"),
];

/// Whether the request is on the expiry whitelist.
fn is_expiry_whitelisted(method: &Method, route: &str) -> bool {
    EXPIRY_WHITELIST
        .iter()
        .any(|(m, path)| m == method && *path == route)
}

/// Authenticates the request and attaches the resolved identity.
pub async fn authenticate(
    State(auth): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    match resolve_identity(&auth, request.headers(), request.method(), request.extensions()).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Runs steps 1-4 of the pipeline and returns the identity to attach.
///
/// Takes the request head (`headers`/`method`/`extensions`) by reference rather
/// than the whole `&Request`: a reference to `Request<Body>` is not `Send`
/// (its body is `!Sync`), which would make the middleware future non-`Send` and
/// reject it from axum's `from_fn` layer. The head components are all `Sync`.
async fn resolve_identity(
    auth: &AuthState,
    headers: &HeaderMap,
    method: &Method,
    extensions: &Extensions,
) -> Result<CurrentUser, AppError> {
    // 1. Extract.
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(AppError::no_token)?;

    // 2. Verify.
    let claims = auth.token_decoder.verify_access(token)?;

    // 3. Hydrate. A store failure degrades to the token's embedded claims
    // so an identity-store outage does not take every session down with it;
    // a store that answers "gone" is authoritative.
    let user = match auth.identity_store.find_by_id(claims.id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(AppError::authorization("User not found")),
        Err(e) => {
            warn!(
                user_id = claims.id,
                error = %e,
                "Identity store unavailable; trusting token claims"
            );
            let role: UserRole = claims
                .role
                .parse()
                .map_err(|_| AppError::invalid_access())?;
            return Ok(CurrentUser {
                id: claims.id,
                username: claims.username,
                fullname: claims.fullname,
                role,
            });
        }
    };

    // 4. Expiry gate.
    if auth.password_policy.is_expired_for(&user) {
        let route = extensions
            .get::<MatchedPath>()
            .map(|p| p.as_str().to_string())
            .unwrap_or_default();
        if !is_expiry_whitelisted(method, &route) {
            return Err(AppError::password_expired());
        }
    }

    // 5. Attach.
    Ok(CurrentUser {
        id: user.id,
        username: user.username,
        fullname: user.fullname,
        role: user.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::middleware::from_fn_with_state;
    use axum::routing::{get, patch, post};
    use chrono::{Duration, Utc};
    use tower::ServiceExt;

    use incidenthub_auth::password::PasswordPolicy;
    use incidenthub_auth::store::IdentityStore;
    use incidenthub_auth::token::keys::{CandidateSecret, SecretSource};
    use incidenthub_auth::token::{TokenDecoder, TokenEncoder, TokenKeys};
    use incidenthub_core::result::AppResult;
    use incidenthub_entity::user::{User, UserStatus};

    /// In-memory identity store; can be switched into a failing mode.
    struct MemoryStore {
        users: HashMap<i64, User>,
        unavailable: AtomicBool,
    }

    #[async_trait::async_trait]
    impl IdentityStore for MemoryStore {
        async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(AppError::database("store offline"));
            }
            Ok(self.users.get(&id).cloned())
        }

        async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
            Ok(self.users.values().find(|u| u.username == username).cloned())
        }

        async fn update_password(&self, _user_id: i64, _hash: &str) -> AppResult<()> {
            Ok(())
        }
    }

    fn test_keys() -> TokenKeys {
        let candidates = vec![CandidateSecret {
            source: SecretSource::Primary,
            secret: "middleware-test-secret".to_string(),
        }];
        TokenKeys {
            access: candidates.clone(),
            refresh: candidates,
        }
    }

    fn user(id: i64, role: UserRole, password_age_days: i64) -> User {
        let now = Utc::now();
        User {
            id,
            username: format!("user{id}"),
            fullname: "Test User".to_string(),
            position: None,
            role,
            status: UserStatus::Active,
            password_hash: String::new(),
            password_changed_at: Some(now - Duration::days(password_age_days)),
            created_at: now,
            updated_at: now,
        }
    }

    fn auth_state(users: Vec<User>, unavailable: bool) -> AuthState {
        let keys = test_keys();
        AuthState {
            token_decoder: Arc::new(TokenDecoder::new(&keys)),
            password_policy: Arc::new(PasswordPolicy::with_max_age_days(90)),
            identity_store: Arc::new(MemoryStore {
                users: users.into_iter().map(|u| (u.id, u)).collect(),
                unavailable: AtomicBool::new(unavailable),
            }),
        }
    }

    fn token_for(user: &User) -> String {
        let encoder = TokenEncoder::with_ttls(
            &test_keys(),
            Duration::minutes(30),
            Duration::minutes(30),
        );
        encoder.sign_access(user).unwrap().0
    }

    async fn ok_handler() -> &'static str {
        "ok"
    }

    fn app(state: AuthState) -> Router {
        Router::new()
            .route("/api/auth/me", get(ok_handler))
            .route("/api/auth/password", patch(ok_handler))
            .route("/api/auth/logout", post(ok_handler))
            .route("/api/incidents", get(ok_handler))
            .layer(from_fn_with_state(state, authenticate))
    }

    async fn send(app: Router, method: &str, path: &str, token: Option<&str>) -> StatusCode {
        let mut builder = HttpRequest::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let state = auth_state(vec![user(1, UserRole::User, 1)], false);
        let status = send(app(state), "GET", "/api/incidents", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_passes() {
        let u = user(1, UserRole::User, 1);
        let token = token_for(&u);
        let state = auth_state(vec![u], false);
        let status = send(app(state), "GET", "/api/incidents", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_garbage_token_is_401() {
        let state = auth_state(vec![user(1, UserRole::User, 1)], false);
        let status = send(app(state), "GET", "/api/incidents", Some("garbage")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_vanished_user_is_403() {
        let u = user(1, UserRole::User, 1);
        let token = token_for(&u);
        // Store answers, but the user is gone.
        let state = auth_state(vec![], false);
        let status = send(app(state), "GET", "/api/incidents", Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_store_outage_degrades_to_claims() {
        let u = user(1, UserRole::User, 1);
        let token = token_for(&u);
        let state = auth_state(vec![u], true);
        let status = send(app(state), "GET", "/api/incidents", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_expired_password_blocks_normal_routes() {
        let u = user(1, UserRole::User, 120);
        let token = token_for(&u);
        let state = auth_state(vec![u], false);
        let status = send(app(state), "GET", "/api/incidents", Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_expired_password_body_carries_machine_code() {
        let u = user(1, UserRole::User, 120);
        let token = token_for(&u);
        let state = auth_state(vec![u], false);

        let response = app(state)
            .oneshot(
                HttpRequest::builder()
                    .method("GET")
                    .uri("/api/incidents")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "PASSWORD_EXPIRED");
    }

    #[tokio::test]
    async fn test_expired_password_allows_whitelisted_routes() {
        let u = user(1, UserRole::User, 120);
        let token = token_for(&u);

        for (method, path) in [
            ("GET", "/api/auth/me"),
            ("PATCH", "/api/auth/password"),
            ("POST", "/api/auth/logout"),
        ] {
            let state = auth_state(vec![u.clone()], false);
            let status = send(app(state), method, path, Some(&token)).await;
            assert_eq!(status, StatusCode::OK, "{method} {path} should be allowed");
        }
    }

    #[tokio::test]
    async fn test_system_admin_is_exempt_from_expiry() {
        let u = user(1, UserRole::SystemAdmin, 400);
        let token = token_for(&u);
        let state = auth_state(vec![u], false);
        let status = send(app(state), "GET", "/api/incidents", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
    }
}
