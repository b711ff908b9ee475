// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request body extraction
//!
//! Mobile clients post multipart forms; scripted clients post JSON. Both are
//! flattened into a [`FormBody`] so handlers look fields up by name.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use axum_extra::extract::Multipart;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use super::errors::ApiError;

/// File part of a multipart body
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Text fields and files of a request body
#[derive(Debug, Clone, Default)]
pub struct FormBody {
    pub is_multipart: bool,
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl FormBody {
    /// Trimmed, non-empty text field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Text field exactly as sent
    pub fn raw_text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// First file posted under `name`
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.field == name)
    }

    /// Every file posted under `name`, in submission order
    pub fn files(&self, name: &str) -> Vec<&UploadedFile> {
        self.files.iter().filter(|f| f.field == name).collect()
    }

    pub fn from_json(value: &Value) -> Self {
        let fields = value
            .as_object()
            .map(|map| {
                map.iter()
                    .filter_map(|(key, v)| json_field(v).map(|s| (key.clone(), s)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            is_multipart: false,
            fields,
            files: Vec::new(),
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut body = FormBody {
            is_multipart: true,
            ..Default::default()
        };

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("Multipart error: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::InvalidRequest(format!("Multipart error: {}", e)))?;
                    body.files.push(UploadedFile {
                        field: name,
                        file_name: Some(file_name),
                        content_type,
                        data: data.to_vec(),
                    });
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::InvalidRequest(format!("Multipart error: {}", e)))?;
                    body.fields.entry(name).or_insert(text);
                }
            }
        }

        debug!(
            "Multipart body: fields={:?}, files={}",
            body.fields.keys().collect::<Vec<_>>(),
            body.files.len()
        );
        Ok(body)
    }
}

/// Scalars become text; nested values and nulls are dropped
fn json_field(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
            return FormBody::from_multipart(multipart).await;
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

        // Unparseable JSON reads as an empty body
        let value = serde_json::from_slice::<Value>(&bytes).unwrap_or(Value::Null);
        Ok(FormBody::from_json(&value))
    }
}
