//! AuthZ Client Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthzError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("token acquisition failed: {message}")]
    Token { message: String },

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

impl AuthzError {
    pub fn token(message: impl Into<String>) -> Self {
        Self::Token { message: message.into() }
    }

    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api { status, body: body.into() }
    }
}

pub type Result<T> = std::result::Result<T, AuthzError>;
