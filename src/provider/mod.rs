// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Remote provider: workflow invocation, uploads and response normalization

pub mod artifact;
pub mod client;
pub mod normalize;
pub mod upload;
pub mod workflows;

pub use artifact::ArtifactFetcher;
pub use client::{JobHandle, JobStatus, ProviderClient};
pub use normalize::{extract, normalize, Extraction, MediaKind, ResultPath};
pub use upload::{CdnDirectUpload, StorageInitiateUpload, UploadBlob, UploadStrategy, Uploader};
pub use workflows::{
    MultiImageArguments, PodcastArguments, ShortAnimationArguments, TextToImageArguments,
    VideoWithAudioArguments,
};
