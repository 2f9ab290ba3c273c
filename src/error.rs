//! Error types for the bookshelf client.

use thiserror::Error;

/// Message shown to the user whenever an action fails, whatever the cause.
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] cynic::http::CynicReqwestError),

    #[error("server reported errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("failed to encode variables: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("response contained no data")]
    EmptyResponse,

    #[error("invalid `{field}` in response: {reason}")]
    Decode { field: &'static str, reason: String },

    #[error("{0}")]
    Validation(String),

    #[error("not in edit mode")]
    NotEditing,

    #[error("{0} has not been loaded")]
    NotLoaded(&'static str),
}

impl Error {
    pub fn decode(field: &'static str, reason: impl ToString) -> Self {
        Self::Decode {
            field,
            reason: reason.to_string(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Validation errors carry a message meant for the user; everything else
    /// collapses into [`FAILURE_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            _ => FAILURE_MESSAGE.to_owned(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
