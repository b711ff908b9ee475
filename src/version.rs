// Version information for the Veramo backend

/// Full version string with feature description
pub const VERSION: &str = "v1.0.0-media-generation-2025-10-13";

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.0.0";

pub const VERSION_MAJOR: u32 = 1;
pub const VERSION_MINOR: u32 = 0;
pub const VERSION_PATCH: u32 = 0;

/// Build date
pub const BUILD_DATE: &str = "2025-10-13";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "multi-image-generation",
    "text-to-image",
    "local-placeholder",
    "couple-podcast",
    "short-animation",
    "video-with-audio",
    "upload-fallback",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Veramo Backend {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
    })
}
