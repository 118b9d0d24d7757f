use async_trait::async_trait;
use axum::extract::{Extension, FromRequest, RequestParts};
use axum::http::header::AUTHORIZATION;
use oso::PolarClass;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{unexpected_error, Error};

/// Token that grants the admin role when presented as a bearer token. With
/// no token configured nobody is an admin.
#[derive(Clone, Debug, Default)]
pub struct AdminToken(Option<String>);

impl AdminToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token.filter(|token| !token.is_empty()))
    }

    fn matches(&self, candidate: &str) -> bool {
        matches!(&self.0, Some(token) if token == candidate)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub roles: Vec<String>,
}

impl User {
    pub fn new_anonymous_user() -> Self {
        Self {
            id: Uuid::new_v4(),
            roles: vec![],
        }
    }

    pub fn new_admin_user() -> Self {
        Self {
            id: Uuid::new_v4(),
            roles: vec!["admin".into()],
        }
    }

    pub fn from_bearer_token(token: Option<&str>, admin_token: &AdminToken) -> Self {
        match token {
            Some(token) if admin_token.matches(token) => Self::new_admin_user(),
            _ => Self::new_anonymous_user(),
        }
    }

    fn has_role(&self, role: String) -> bool {
        self.roles.iter().any(|x| x == &role)
    }
}

impl PolarClass for User {
    fn get_polar_class_builder() -> oso::ClassBuilder<User> {
        oso::Class::builder()
            .name("User")
            .add_attribute_getter("id", |recv: &User| recv.id)
            .add_attribute_getter("roles", |recv: &User| recv.roles.clone())
            .add_method("has_role", User::has_role)
    }

    fn get_polar_class() -> oso::Class {
        let builder = User::get_polar_class_builder();
        builder.build()
    }
}

#[async_trait]
impl<B: Send> FromRequest<B> for User {
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let Extension(admin_token) = Extension::<AdminToken>::from_request(req)
            .await
            .map_err(|_| unexpected_error())?;

        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        Ok(Self::from_bearer_token(token, &admin_token))
    }
}

#[test]
fn bearer_token_roles_test() {
    let admin_token = AdminToken::new(Some("s3cret".into()));

    let user = User::from_bearer_token(Some("s3cret"), &admin_token);
    assert!(user.has_role("admin".into()));

    let user = User::from_bearer_token(Some("guess"), &admin_token);
    assert!(user.roles.is_empty());

    let user = User::from_bearer_token(None, &admin_token);
    assert!(user.roles.is_empty());
}

#[test]
fn unset_admin_token_test() {
    for admin_token in [AdminToken::new(None), AdminToken::new(Some("".into()))] {
        let user = User::from_bearer_token(Some(""), &admin_token);
        assert!(user.roles.is_empty());
    }
}
