// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Input classification: picks the generation pathway from the input shape

use serde::Serialize;

/// Generation strategy for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pathway {
    /// Remote model conditioned on two or more reference images
    MultiImageRemote,
    /// Remote text-to-image model
    TextOnlyRemote,
    /// Exactly one reference image; the remote model handles this badly
    SingleImagePlaceholder,
    /// Nothing usable for the remote pathways
    LocalPlaceholder,
}

impl Pathway {
    pub fn is_remote(&self) -> bool {
        matches!(self, Pathway::MultiImageRemote | Pathway::TextOnlyRemote)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Pathway::MultiImageRemote => "multi_image_remote",
            Pathway::TextOnlyRemote => "text_only_remote",
            Pathway::SingleImagePlaceholder => "single_image_placeholder",
            Pathway::LocalPlaceholder => "local_placeholder",
        }
    }
}

/// Choose a pathway. Callers reject empty descriptions before getting here;
/// the last arm keeps the function total.
pub fn classify(image_count: usize, description: &str) -> Pathway {
    let has_text = !description.trim().is_empty();
    match image_count {
        n if n >= 2 && has_text => Pathway::MultiImageRemote,
        0 if has_text => Pathway::TextOnlyRemote,
        1 => Pathway::SingleImagePlaceholder,
        _ => Pathway::LocalPlaceholder,
    }
}
