use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug};

pub const NO_ACTIVE_SESSION: i32 = 100;
pub const MISSING_DESTINATION: i32 = 101;
pub const SESSION_ACTIVE: i32 = 102;
pub const LAUNCH_TARGET_UNAVAILABLE: i32 = 103;
pub const PRESENTATION_FAILURE: i32 = 104;
pub const INVALID_INPUT: i32 = 105;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_missing_destination(&self) -> bool {
        self.code == MISSING_DESTINATION
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn no_active_session_error() -> Error {
    Error {
        code: NO_ACTIVE_SESSION,
        message: "no navigation session is presenting".into(),
    }
}

pub fn missing_destination_error() -> Error {
    Error {
        code: MISSING_DESTINATION,
        message: "destination is required (destination.lat/lng, destination.latitude/longitude or destLat/destLng)".into(),
    }
}

pub fn session_active_error() -> Error {
    Error {
        code: SESSION_ACTIVE,
        message: "a navigation session is already presenting".into(),
    }
}

pub fn launch_target_unavailable_error() -> Error {
    Error {
        code: LAUNCH_TARGET_UNAVAILABLE,
        message: "launch target is not installed".into(),
    }
}

pub fn presentation_failure_error() -> Error {
    Error {
        code: PRESENTATION_FAILURE,
        message: "no host view available to present navigation".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: INVALID_INPUT,
        message: "invalid input".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn reqwest_error(_: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}
