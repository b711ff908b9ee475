// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

use crate::generation::errors::{GenerationError, NormalizationFailure};

/// Error envelope shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Body could not be read as multipart or JSON
    InvalidRequest(String),
    /// Required field missing or malformed
    ValidationError(String),
    MissingCredential,
    /// Provider answered with a payload no extraction path understands
    UnrecognizedResult {
        message: String,
        raw: Value,
    },
    InternalError(String),
}

/// How an endpoint words its generation failures
#[derive(Debug, Clone, Copy)]
pub struct FailureContext {
    /// Prefix for unexpected failures, e.g. "Podcast generation failed"
    pub prefix: &'static str,
    /// Message when the provider result carries no usable URL
    pub missing_url: &'static str,
    /// Whether unrecognized payloads are echoed back with 502
    pub expose_raw: bool,
}

impl ApiError {
    /// Map a pipeline error onto the endpoint's HTTP contract
    pub fn from_generation(err: GenerationError, context: FailureContext) -> Self {
        match err {
            GenerationError::Validation(message) => ApiError::ValidationError(message),
            GenerationError::MissingCredential => ApiError::MissingCredential,
            GenerationError::Normalization(NormalizationFailure::UnrecognizedShape { raw }) => {
                if context.expose_raw {
                    ApiError::UnrecognizedResult {
                        message: context.missing_url.to_string(),
                        raw,
                    }
                } else {
                    ApiError::InternalError(context.missing_url.to_string())
                }
            }
            GenerationError::Normalization(NormalizationFailure::InvalidUrl(candidate)) => {
                warn!("Provider returned unusable url {:?}", candidate);
                ApiError::InternalError(context.missing_url.to_string())
            }
            other => ApiError::InternalError(format!("{}: {}", context.prefix, other)),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        match self {
            ApiError::InvalidRequest(msg)
            | ApiError::ValidationError(msg)
            | ApiError::InternalError(msg) => ErrorResponse {
                error: msg.clone(),
                raw: None,
            },
            ApiError::MissingCredential => ErrorResponse {
                error: "FAL_KEY not set".to_string(),
                raw: None,
            },
            ApiError::UnrecognizedResult { message, raw } => ErrorResponse {
                error: message.clone(),
                raw: Some(raw.clone()),
            },
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) | ApiError::ValidationError(_) => 400,
            ApiError::MissingCredential | ApiError::InternalError(_) => 500,
            ApiError::UnrecognizedResult { .. } => 502,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::MissingCredential => write!(f, "FAL_KEY not set"),
            ApiError::UnrecognizedResult { message, .. } => write!(f, "{}", message),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}
