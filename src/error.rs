use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::{self, Debug, Display};

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        database_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<oso::OsoError> for Error {
    fn from(err: oso::OsoError) -> Self {
        authorizor_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            2 => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            3 | 4 => (StatusCode::BAD_GATEWAY, "Upstream error"),
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            102 => (StatusCode::FORBIDDEN, self.message.as_str()),
            103 => (StatusCode::NOT_FOUND, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl Error {
    pub fn is_invalid_input_error(&self) -> bool {
        self.code == 101
    }

    pub fn is_unauthorized_error(&self) -> bool {
        self.code == 102
    }

    pub fn is_not_found_error(&self) -> bool {
        self.code == 103
    }

    pub fn is_upstream_error(&self) -> bool {
        self.code == 4
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn unauthorized_error() -> Error {
    Error {
        code: 102,
        message: "unauthorized".into(),
    }
}

pub fn not_found_error(message: &str) -> Error {
    Error {
        code: 103,
        message: message.into(),
    }
}

pub fn malformed_polyline_error() -> Error {
    Error {
        code: 104,
        message: "malformed polyline".into(),
    }
}

pub fn env_var_error(key: &str) -> Error {
    Error {
        code: 1,
        message: format!("environment variable error: {}", key),
    }
}

pub fn database_error<T: Debug>(err: T) -> Error {
    tracing::error!("database error: {:?}", err);

    Error {
        code: 2,
        message: "database error".into(),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: format!("reqwest error: {}", err),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn upstream_status_error(status: &str, detail: Option<&str>) -> Error {
    let message = match detail {
        Some(detail) => format!("upstream error: {} ({})", status, detail),
        None => format!("upstream error: {}", status),
    };

    Error { code: 4, message }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

pub fn authorizor_error(err: oso::OsoError) -> Error {
    Error {
        code: 6,
        message: format!("authorizor error: {}", err),
    }
}

#[test]
fn error_status_mapping_test() {
    let cases = vec![
        (database_error("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        (upstream_error(), StatusCode::BAD_GATEWAY),
        (unexpected_error(), StatusCode::INTERNAL_SERVER_ERROR),
        (env_var_error("DATABASE_URL"), StatusCode::INTERNAL_SERVER_ERROR),
        (invalid_input_error(), StatusCode::BAD_REQUEST),
        (malformed_polyline_error(), StatusCode::BAD_REQUEST),
        (unauthorized_error(), StatusCode::FORBIDDEN),
        (not_found_error("User not found"), StatusCode::NOT_FOUND),
    ];

    for (err, status) in cases {
        assert_eq!(err.into_response().status(), status);
    }
}

#[test]
fn upstream_status_error_test() {
    let err = upstream_status_error("REQUEST_DENIED", Some("The provided API key is invalid."));
    assert!(err.is_upstream_error());
    assert_eq!(
        err.message,
        "upstream error: REQUEST_DENIED (The provided API key is invalid.)"
    );

    let err = upstream_status_error("OVER_QUERY_LIMIT", None);
    assert_eq!(err.message, "upstream error: OVER_QUERY_LIMIT");
}
