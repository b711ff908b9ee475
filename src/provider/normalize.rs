// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Response normalization
//!
//! Provider payloads have no stable schema across workflow versions. Each
//! known location of the output URL is a [`ResultPath`]; paths are evaluated
//! in a fixed order per media kind and the first match wins.

use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::generation::errors::NormalizationFailure;
use crate::generation::imaging::{decode_data_uri, is_data_uri};
use crate::generation::outcome::{ArtifactLocation, NormalizedArtifact};

/// Candidates shorter than this are partially-populated responses
pub const MIN_CANDIDATE_LEN: usize = 10;

/// Kind of artifact a workflow produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    /// Extraction attempts in priority order
    pub fn extraction_order(&self) -> &'static [ResultPath] {
        match self {
            MediaKind::Image => &[
                ResultPath::DataImagesUrl,
                ResultPath::ImagesUrl,
                ResultPath::DataUrl,
                ResultPath::Url,
            ],
            MediaKind::Video => &[
                ResultPath::DataImagesUrl,
                ResultPath::ImagesUrl,
                ResultPath::DataUrl,
                ResultPath::Url,
                ResultPath::VideoUrl,
                ResultPath::OutputUrl,
                ResultPath::ResultUrl,
            ],
            MediaKind::Audio => &[ResultPath::AudioUrl, ResultPath::Url],
        }
    }

    pub fn default_content_type(&self) -> &'static str {
        match self {
            MediaKind::Image => "image/jpeg",
            MediaKind::Video => "video/mp4",
            MediaKind::Audio => "application/octet-stream",
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            MediaKind::Image => "generated_image.jpg",
            MediaKind::Video => "short_animation.mp4",
            MediaKind::Audio => "podcast.mp3",
        }
    }
}

/// A known location of the output URL inside a provider payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultPath {
    /// `data.images[0].url`
    DataImagesUrl,
    /// `images[0].url`
    ImagesUrl,
    /// `data.url`
    DataUrl,
    /// `url`
    Url,
    /// `video.url`, else `video.signed_url`
    VideoUrl,
    /// `output.url` / `output.video_url`, or the same on `output[0]`
    OutputUrl,
    /// `result.url` / `result.video_url`, or the same on `result[0]`
    ResultUrl,
    /// `audio.url`
    AudioUrl,
}

/// Outcome of evaluating one [`ResultPath`]
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction<'a> {
    FoundAt {
        path: ResultPath,
        candidate: &'a str,
        container: &'a Map<String, Value>,
    },
    NotFound,
}

impl ResultPath {
    pub fn describe(&self) -> &'static str {
        match self {
            ResultPath::DataImagesUrl => "data.images[0].url",
            ResultPath::ImagesUrl => "images[0].url",
            ResultPath::DataUrl => "data.url",
            ResultPath::Url => "url",
            ResultPath::VideoUrl => "video",
            ResultPath::OutputUrl => "output",
            ResultPath::ResultUrl => "result",
            ResultPath::AudioUrl => "audio.url",
        }
    }

    /// Evaluate this path against a payload. A path matches when the value
    /// it names is a JSON string, whatever its content. Where a path names
    /// alternative keys, empty strings fall through to the next key.
    pub fn extract<'a>(&self, result: &'a Value) -> Extraction<'a> {
        let found = match self {
            ResultPath::DataImagesUrl => result
                .get("data")
                .and_then(|data| data.get("images"))
                .and_then(|images| images.get(0))
                .and_then(|first| string_in(first, &["url"])),
            ResultPath::ImagesUrl => result
                .get("images")
                .and_then(|images| images.get(0))
                .and_then(|first| string_in(first, &["url"])),
            ResultPath::DataUrl => result.get("data").and_then(|data| string_in(data, &["url"])),
            ResultPath::Url => string_in(result, &["url"]),
            ResultPath::VideoUrl => result
                .get("video")
                .and_then(|v| string_in(v, &["url", "signed_url"])),
            ResultPath::OutputUrl => result
                .get("output")
                .and_then(first_or_self)
                .and_then(|v| string_in(v, &["url", "video_url"])),
            ResultPath::ResultUrl => result
                .get("result")
                .and_then(first_or_self)
                .and_then(|v| string_in(v, &["url", "video_url"])),
            ResultPath::AudioUrl => result.get("audio").and_then(|a| string_in(a, &["url"])),
        };

        match found {
            Some((candidate, container)) => Extraction::FoundAt {
                path: *self,
                candidate,
                container,
            },
            None => Extraction::NotFound,
        }
    }
}

/// First non-empty string among `keys` on a mapping, with the mapping
/// itself. When none is non-empty the last key decides.
fn string_in<'a>(value: &'a Value, keys: &[&str]) -> Option<(&'a str, &'a Map<String, Value>)> {
    let map = value.as_object()?;
    let lookup = |key: &&str| map.get(*key).and_then(Value::as_str);
    keys.iter()
        .filter_map(lookup)
        .find(|candidate| !candidate.is_empty())
        .or_else(|| keys.last().and_then(lookup))
        .map(|candidate| (candidate, map))
}

/// Sequences stand for their first element
fn first_or_self(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.first(),
        other => Some(other),
    }
}

/// Evaluate the extraction order for `media` and return the first match
pub fn extract(result: &Value, media: MediaKind) -> Extraction<'_> {
    media
        .extraction_order()
        .iter()
        .map(|path| path.extract(result))
        .find(|extraction| matches!(extraction, Extraction::FoundAt { .. }))
        .unwrap_or(Extraction::NotFound)
}

/// Turn a provider payload into a single artifact
pub fn normalize(result: &Value, media: MediaKind) -> Result<NormalizedArtifact, NormalizationFailure> {
    let (path, candidate, container) = match extract(result, media) {
        Extraction::FoundAt {
            path,
            candidate,
            container,
        } => (path, candidate, container),
        Extraction::NotFound => {
            warn!("No known {:?} output path in provider response", media);
            return Err(NormalizationFailure::UnrecognizedShape { raw: result.clone() });
        }
    };

    let candidate = candidate.trim();
    debug!("Provider output found at {}", path.describe());

    if candidate.len() < MIN_CANDIDATE_LEN {
        return Err(NormalizationFailure::InvalidUrl(candidate.to_string()));
    }

    let declared_type = non_empty_str(container, "content_type");
    let declared_name = non_empty_str(container, "file_name");

    if is_data_uri(candidate) {
        let inline = decode_data_uri(candidate)
            .map_err(|e| NormalizationFailure::InvalidUrl(format!("inline data: {}", e)))?;
        return Ok(NormalizedArtifact {
            content_type: declared_type.unwrap_or_else(|| inline.media_type.clone()),
            file_name: declared_name.unwrap_or_else(|| media.default_file_name().to_string()),
            location: ArtifactLocation::Inline(inline),
        });
    }

    Ok(NormalizedArtifact {
        content_type: declared_type.unwrap_or_else(|| media.default_content_type().to_string()),
        file_name: declared_name
            .or_else(|| url_file_name(candidate))
            .unwrap_or_else(|| media.default_file_name().to_string()),
        location: ArtifactLocation::Remote(candidate.to_string()),
    })
}

fn non_empty_str(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Last path segment of a URL
pub fn url_file_name(candidate: &str) -> Option<String> {
    let parsed = Url::parse(candidate).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    Some(segment.to_string())
}
