//! Identity middleware.
//!
//! Resolves the caller before any `/api` handler runs and stores the result
//! as a [`CurrentUser`] request extension. The identity cookie is managed
//! here on every exit path:
//!
//! - a provisioned user gets a fresh long-lived cookie on the handler's response
//! - a rejected cookie is removed on the 401 response
//!
//! A rejected request never reaches the handler.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use secrecy::ExposeSecret;
use tracing::Span;

use crate::config::AuthCookieConfig;
use crate::error::{AppError, set_sentry_user};
use crate::models::CurrentUser;
use crate::services::{AuthError, Credentials, IdentityResolver, Resolution};
use crate::state::AppState;

/// Build the cookie that binds a browser to a remember token.
#[must_use]
pub fn identity_cookie(config: &AuthCookieConfig, token: &str) -> Cookie<'static> {
    Cookie::build((config.name.clone(), token.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .max_age(time::Duration::days(i64::from(config.max_age_days)))
        .build()
}

fn removal_cookie(config: &AuthCookieConfig) -> Cookie<'static> {
    Cookie::build(config.name.clone()).path("/").build()
}

/// Credential material of a request.
///
/// An `Authorization` header with non-ASCII bytes still counts as present;
/// its token then fails to parse and the request is rejected.
fn credentials(request: &Request, jar: &CookieJar, config: &AuthCookieConfig) -> Credentials {
    Credentials {
        authorization: request
            .headers()
            .get(AUTHORIZATION)
            .map(|h| String::from_utf8_lossy(h.as_bytes()).into_owned()),
        cookie_token: jar.get(&config.name).map(|c| c.value().to_owned()),
    }
}

/// Middleware that attaches a [`CurrentUser`] to every request.
pub async fn identity_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_config = &state.config().auth_cookie;
    let credentials = credentials(&request, &jar, cookie_config);
    let resolver = IdentityResolver::new(state.store());

    let (current, issued) = match resolver.resolve(&credentials).await {
        Ok(Resolution::Existing(user)) => (CurrentUser::for_user(&user), None),
        Ok(Resolution::NeedsProvisioning) => match resolver.provision().await {
            Ok(provisioned) => {
                let cookie =
                    identity_cookie(cookie_config, provisioned.remember_token.expose_secret());
                (CurrentUser::for_user(&provisioned.user), Some(cookie))
            }
            Err(err) => return AppError::from(err).into_response(),
        },
        Err(err @ AuthError::Unauthenticated(_)) => {
            let response = AppError::from(err).into_response();
            if credentials.bearer_token().is_none() && credentials.cookie_token.is_some() {
                return (jar.remove(removal_cookie(cookie_config)), response).into_response();
            }
            return response;
        }
        Err(err) => return AppError::from(err).into_response(),
    };

    Span::current().record("user_id", current.id.as_i32());
    set_sentry_user(&current.id);

    request.extensions_mut().insert(current);
    let response = next.run(request).await;

    match issued {
        Some(cookie) => (jar.add(cookie), response).into_response(),
        None => response,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_non_ascii_authorization_is_still_a_bearer_credential() {
        let request = Request::builder()
            .header(AUTHORIZATION, HeaderValue::from_bytes(b"Bearer t\xe9st").unwrap())
            .body(Body::empty())
            .unwrap();
        let jar = CookieJar::from_headers(request.headers());

        let credentials = credentials(&request, &jar, &AuthCookieConfig::default());
        let token = credentials.bearer_token().unwrap();
        assert!(token.starts_with('t') && token.ends_with("st"));
        assert_ne!(token, "test");
    }

    #[test]
    fn test_identity_cookie_attributes() {
        let config = AuthCookieConfig::default();
        let cookie = identity_cookie(&config, "abc");

        assert_eq!(cookie.name(), "auth_token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(30)));
        assert_ne!(cookie.secure(), Some(true));
    }

    #[test]
    fn test_identity_cookie_secure_on_https() {
        let config = AuthCookieConfig {
            secure: true,
            ..AuthCookieConfig::default()
        };
        assert_eq!(identity_cookie(&config, "abc").secure(), Some(true));
    }
}
