//! Common types shared across the worksheet pipeline

use serde::{Deserialize, Serialize};

/// How hard the regenerated variant should be relative to the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easier,
    #[default]
    Same,
    Harder,
}

impl Difficulty {
    /// Parse a client-supplied tag, treating anything unrecognized as `Same`.
    pub fn parse_lenient(tag: &str) -> Self {
        match tag.trim() {
            "easier" => Difficulty::Easier,
            "harder" => Difficulty::Harder,
            _ => Difficulty::Same,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easier => write!(f, "easier"),
            Difficulty::Same => write!(f, "same"),
            Difficulty::Harder => write!(f, "harder"),
        }
    }
}

/// One uploaded source image, held in memory for the duration of a request.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SourceImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Best-effort MIME type from the file extension; the provider only
    /// accepts raster images.
    pub fn mime_type(&self) -> &'static str {
        let lower = self.file_name.to_ascii_lowercase();
        if lower.ends_with(".png") {
            "image/png"
        } else if lower.ends_with(".webp") {
            "image/webp"
        } else {
            "image/jpeg"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_leniently() {
        assert_eq!(Difficulty::parse_lenient("easier"), Difficulty::Easier);
        assert_eq!(Difficulty::parse_lenient("harder"), Difficulty::Harder);
        assert_eq!(Difficulty::parse_lenient("same"), Difficulty::Same);
        assert_eq!(Difficulty::parse_lenient(""), Difficulty::Same);
        assert_eq!(Difficulty::parse_lenient("extreme"), Difficulty::Same);
    }

    #[test]
    fn mime_type_from_extension() {
        assert_eq!(SourceImage::new("a.PNG", vec![]).mime_type(), "image/png");
        assert_eq!(SourceImage::new("a.webp", vec![]).mime_type(), "image/webp");
        assert_eq!(SourceImage::new("scan.jpg", vec![]).mime_type(), "image/jpeg");
        assert_eq!(SourceImage::new("noext", vec![]).mime_type(), "image/jpeg");
    }
}
