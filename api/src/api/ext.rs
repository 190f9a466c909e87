use std::sync::{Arc, Weak};

use common::http::RouteError;
use hyper::{Body, Request, StatusCode};
use routerify::prelude::RequestExt as _;

use super::auth::AuthData;
use super::error::ApiError;
use crate::global::GlobalState;

pub trait RequestExt {
    fn get_global(&self) -> Result<Arc<GlobalState>, RouteError<ApiError>>;
    fn auth(&self) -> Option<AuthData>;
}

impl RequestExt for Request<Body> {
    fn get_global(&self) -> Result<Arc<GlobalState>, RouteError<ApiError>> {
        self.data::<Weak<GlobalState>>()
            .expect("global state not found")
            .upgrade()
            .ok_or_else(|| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to upgrade global state",
                )
                    .into()
            })
    }

    fn auth(&self) -> Option<AuthData> {
        self.context::<AuthData>()
    }
}

/// Extracts a field from a form-urlencoded request body.
pub fn form_field(body: &[u8], name: &str) -> Option<String> {
    url::form_urlencoded::parse(body).find_map(|(k, v)| (k == name).then(|| v.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_field() {
        let body = b"name=Ada&email=ada%40example.com&message=hello+there";

        assert_eq!(form_field(body, "name").as_deref(), Some("Ada"));
        assert_eq!(
            form_field(body, "email").as_deref(),
            Some("ada@example.com")
        );
        assert_eq!(form_field(body, "message").as_deref(), Some("hello there"));
        assert_eq!(form_field(body, "missing"), None);
        assert_eq!(form_field(b"", "name"), None);
    }
}
