//! Audio, video and image classification for package resources.
//!
//! Files under `ppt/media/` mix images with audio/video payloads. The assembler
//! routes each file into the image or media map of the resource aggregate using the
//! content type table, falling back to the file extension; media elements on slides
//! report the container format of the file they point at.

use crate::ooxml::opc::packuri::extension;
use serde::Serialize;

/// Media type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaType {
    /// Audio file (mp3, wav, etc.)
    Audio,
    /// Video file (mp4, wmv, etc.)
    Video,
}

/// Audio/Video container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaFormat {
    Mp3,
    Wav,
    Wma,
    M4a,
    Mp4,
    Wmv,
    Avi,
    Mov,
    Unknown,
}

impl MediaFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => MediaFormat::Mp3,
            "wav" => MediaFormat::Wav,
            "wma" => MediaFormat::Wma,
            "m4a" => MediaFormat::M4a,
            "mp4" | "m4v" => MediaFormat::Mp4,
            "wmv" | "asf" => MediaFormat::Wmv,
            "avi" => MediaFormat::Avi,
            "mov" => MediaFormat::Mov,
            _ => MediaFormat::Unknown,
        }
    }

    /// Detect format from the leading bytes of a file.
    pub fn detect_from_bytes(data: &[u8]) -> Self {
        if data.starts_with(b"ID3") || (data.len() >= 2 && data[0] == 0xFF && (data[1] & 0xE0) == 0xE0)
        {
            return MediaFormat::Mp3;
        }
        if data.len() >= 12 && data.starts_with(b"RIFF") {
            return match &data[8..12] {
                b"WAVE" => MediaFormat::Wav,
                b"AVI " => MediaFormat::Avi,
                _ => MediaFormat::Unknown,
            };
        }
        if data.len() >= 12 && &data[4..8] == b"ftyp" {
            return match &data[8..12] {
                b"M4A " | b"M4B " => MediaFormat::M4a,
                b"qt  " => MediaFormat::Mov,
                _ => MediaFormat::Mp4,
            };
        }
        // ASF header object GUID, shared by WMV and WMA
        if data.starts_with(&[0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11]) {
            return MediaFormat::Wmv;
        }
        MediaFormat::Unknown
    }

    /// Extension first, then magic bytes.
    pub fn detect(path: &str, data: Option<&[u8]>) -> Self {
        match MediaFormat::from_extension(&extension(path)) {
            MediaFormat::Unknown => data.map(Self::detect_from_bytes).unwrap_or(MediaFormat::Unknown),
            format => format,
        }
    }

    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            MediaFormat::Mp3 => "audio/mpeg",
            MediaFormat::Wav => "audio/wav",
            MediaFormat::Wma => "audio/x-ms-wma",
            MediaFormat::M4a => "audio/mp4",
            MediaFormat::Mp4 => "video/mp4",
            MediaFormat::Wmv => "video/x-ms-wmv",
            MediaFormat::Avi => "video/avi",
            MediaFormat::Mov => "video/quicktime",
            MediaFormat::Unknown => "application/octet-stream",
        }
    }

    /// Audio or video; unknown containers count as video.
    pub fn media_type(&self) -> MediaType {
        match self {
            MediaFormat::Mp3 | MediaFormat::Wav | MediaFormat::Wma | MediaFormat::M4a => {
                MediaType::Audio
            },
            _ => MediaType::Video,
        }
    }
}

/// Image extensions recognized when the content type table has no entry.
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "jpe", "gif", "bmp", "dib", "tif", "tiff", "emf", "wmf", "svg", "ico",
    "wdp", "jxr", "webp",
];

/// Whether a media-folder file is an image.
///
/// The content type decides when known (`image/*`); otherwise the extension.
pub fn is_image(path: &str, content_type: Option<&str>) -> bool {
    match content_type {
        Some(ct) if ct.contains('/') && !ct.starts_with("application/") => ct.starts_with("image/"),
        _ => IMAGE_EXTENSIONS.contains(&extension(path).as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension_then_bytes() {
        assert_eq!(MediaFormat::detect("ppt/media/media1.MP4", None), MediaFormat::Mp4);
        assert_eq!(
            MediaFormat::detect("ppt/media/media1.bin", Some(&b"RIFF\0\0\0\0WAVEfmt "[..])),
            MediaFormat::Wav
        );
        assert_eq!(
            MediaFormat::detect("ppt/media/media2", Some(&b"\0\0\0\x20ftypqt  \0\0"[..])),
            MediaFormat::Mov
        );
        assert_eq!(MediaFormat::detect("ppt/media/x", Some(&b"??"[..])), MediaFormat::Unknown);
    }

    #[test]
    fn test_media_type() {
        assert_eq!(MediaFormat::Mp3.media_type(), MediaType::Audio);
        assert_eq!(MediaFormat::Avi.media_type(), MediaType::Video);
        assert_eq!(MediaFormat::M4a.mime_type(), "audio/mp4");
    }

    #[test]
    fn test_image_classification() {
        assert!(is_image("ppt/media/image1.png", Some("image/png")));
        assert!(!is_image("ppt/media/media1.mp4", Some("video/mp4")));
        assert!(is_image("ppt/media/image2.jpeg", None));
        assert!(is_image("ppt/media/image3.emf", Some("application/octet-stream")));
        assert!(!is_image("ppt/media/media2.wav", None));
    }
}
