//! Framework-free request and response types.
//!
//! The HTTP server converts each hyper request into an [`ApiRequest`] and
//! each [`ApiResponse`] back into a hyper response.  Everything in between
//! (routing, authentication, persistence) only ever sees these types.
//!
//! # Wire format
//!
//! | Method  | Body                              | Success               |
//! |---------|-----------------------------------|-----------------------|
//! | `GET`   | none                              | 200, the document     |
//! | `POST`  | full document                     | 200, acknowledgement  |
//! | `PATCH` | `{"path": "...", "value": ...}`   | 200, updated document |
//!
//! Writes must carry the shared secret in the [`ADMIN_SECRET_HEADER`] header.

use serde::Deserialize;
use serde_json::{json, Value};

/// The single route the API is served on.
pub const CONFIG_ROUTE: &str = "/api/portfolio";

/// Request header carrying the shared secret on writes.
pub const ADMIN_SECRET_HEADER: &str = "x-admin-password";

/// Value of the `Allow` header on 405 responses.
pub const ALLOWED_METHODS: &str = "GET, POST, PATCH";

/// HTTP methods the API distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Post,
    Patch,
    /// Any other method; always answered with 405.
    Other,
}

impl ApiMethod {
    /// Maps an HTTP method name.  Matching is exact, as method names are
    /// case-sensitive.
    pub fn from_name(name: &str) -> Self {
        match name {
            "GET" => ApiMethod::Get,
            "POST" => ApiMethod::Post,
            "PATCH" => ApiMethod::Patch,
            _ => ApiMethod::Other,
        }
    }
}

/// An incoming request with the body already read.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: ApiMethod,
    /// The URI path, without query string.
    pub path: String,
    /// Value of the [`ADMIN_SECRET_HEADER`] header, if present.
    pub admin_secret: Option<String>,
    pub body: Vec<u8>,
}

impl ApiRequest {
    /// A `GET` on [`CONFIG_ROUTE`].
    pub fn get() -> Self {
        Self {
            method: ApiMethod::Get,
            path: CONFIG_ROUTE.to_string(),
            admin_secret: None,
            body: Vec::new(),
        }
    }

    /// A write on [`CONFIG_ROUTE`] with the given secret and body.
    pub fn write(method: ApiMethod, admin_secret: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method,
            path: CONFIG_ROUTE.to_string(),
            admin_secret: admin_secret.map(str::to_string),
            body: body.into(),
        }
    }
}

/// Body of a `PATCH` request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchBody {
    /// Path expression, e.g. `experience[0].title`.
    pub path: String,
    pub value: Value,
}

/// A response ready to be serialized as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
    /// Set on 405 responses.
    pub allow: Option<&'static str>,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            allow: None,
        }
    }

    /// Acknowledgement of a successful full-document save.
    pub fn saved() -> Self {
        Self::ok(json!({ "success": true, "message": "Configuration saved" }))
    }

    /// An error body of the form `{"error": message}`.
    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
            allow: None,
        }
    }

    /// An error body of the form `{"error": message, "details": details}`.
    pub fn error_with_details(status: u16, message: &str, details: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message, "details": details }),
            allow: None,
        }
    }

    pub fn not_found() -> Self {
        Self::error(404, "Not found")
    }

    pub fn method_not_allowed() -> Self {
        Self {
            allow: Some(ALLOWED_METHODS),
            ..Self::error(405, "Method not allowed")
        }
    }

    pub fn payload_too_large(limit: usize) -> Self {
        Self::error_with_details(
            413,
            "Request body too large",
            &format!("limit is {limit} bytes"),
        )
    }
}
