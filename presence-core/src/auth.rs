//! Shared-secret authorization for mutating requests

use constant_time_eq::constant_time_eq;

/// Checks callers against the configured token.
///
/// With no token configured every request is allowed. Otherwise the token
/// must be presented either as `Authorization: Bearer <token>` or as the
/// `token` query parameter.
#[derive(Debug, Clone, Default)]
pub struct TokenGuard {
    token: Option<String>,
}

impl TokenGuard {
    /// Create a guard; empty tokens disable authorization
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Whether a token is required at all
    pub fn is_enabled(&self) -> bool {
        self.token.is_some()
    }

    /// Decide whether a request may proceed.
    ///
    /// `authorization` is the raw `Authorization` header value and
    /// `query_token` the `token` query parameter, if present.
    pub fn authorize(&self, authorization: Option<&str>, query_token: Option<&str>) -> bool {
        let Some(expected) = self.token.as_deref() else {
            return true;
        };

        let bearer = authorization.and_then(|v| v.strip_prefix("Bearer "));
        if bearer.is_some_and(|t| matches(t, expected)) {
            return true;
        }

        query_token.is_some_and(|t| matches(t, expected))
    }
}

fn matches(presented: &str, expected: &str) -> bool {
    constant_time_eq(presented.as_bytes(), expected.as_bytes())
}
