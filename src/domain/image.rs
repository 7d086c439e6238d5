//! Encoded image payloads and their data URL form

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// MIME type of every captured or imported frame
pub const JPEG_MIME: &str = "image/jpeg";

/// An encoded raster image (JPEG bytes in practice) together with its MIME type.
///
/// Persisted as a `data:<mime>;base64,<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    mime: String,
    bytes: Vec<u8>,
}

impl ImageData {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        ImageData {
            mime: mime.into(),
            bytes,
        }
    }

    /// Wrap already-encoded JPEG bytes
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self::new(JPEG_MIME, bytes)
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Render as a base64 data URL
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    /// Parse a base64 data URL such as `data:image/jpeg;base64,/9j/4AAQ...`
    pub fn from_data_url(url: &str) -> Result<Self, String> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| "image is not a data URL".to_string())?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| "data URL has no payload separator".to_string())?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| "data URL is not base64 encoded".to_string())?;
        if mime.is_empty() {
            return Err("data URL has no MIME type".to_string());
        }

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| format!("invalid base64 image payload: {}", e))?;

        Ok(ImageData::new(mime, bytes))
    }
}

impl Serialize for ImageData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_url())
    }
}

impl<'de> Deserialize<'de> for ImageData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let url = String::deserialize(deserializer)?;
        ImageData::from_data_url(&url).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_data_url() {
        let image = ImageData::jpeg(vec![0xFF, 0xD8, 0xFF]);
        assert_eq!(image.to_data_url(), "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn test_from_data_url() {
        let image = ImageData::from_data_url("data:image/jpeg;base64,/9j/").unwrap();
        assert_eq!(image.mime(), "image/jpeg");
        assert_eq!(image.bytes(), &[0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn test_from_data_url_keeps_other_mime() {
        let image = ImageData::from_data_url("data:image/png;base64,iVBORw==").unwrap();
        assert_eq!(image.mime(), "image/png");
        assert_eq!(image.len(), 4);
    }

    #[test]
    fn test_from_data_url_rejects_plain_string() {
        assert!(ImageData::from_data_url("blob:http://localhost/abc").is_err());
    }

    #[test]
    fn test_from_data_url_rejects_non_base64() {
        let result = ImageData::from_data_url("data:text/plain,hello");
        assert!(result.unwrap_err().contains("not base64"));
    }

    #[test]
    fn test_from_data_url_rejects_bad_payload() {
        assert!(ImageData::from_data_url("data:image/jpeg;base64,***").is_err());
    }

    #[test]
    fn test_serde_uses_data_url_string() {
        let image = ImageData::jpeg(vec![1, 2, 3]);
        let json = serde_json::to_string(&image).unwrap();
        assert_eq!(json, "\"data:image/jpeg;base64,AQID\"");

        let back: ImageData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, image);
    }
}
