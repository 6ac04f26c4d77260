//! `data:` URL handling.
//!
//! A file picker hands the widget a base64 `data:` URL; the crop result is
//! returned in the same form so it can be dropped straight into an `<img>`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::DecodeError;

/// A parsed `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Media type, e.g. `image/png`. Empty when the URL omits it.
    pub mime: String,
    /// Decoded payload bytes.
    pub bytes: Vec<u8>,
}

/// Parse a base64 `data:` URL.
///
/// Only the base64 form is accepted, which is what `FileReader.readAsDataURL`
/// and `canvas.toDataURL` produce.
pub fn parse_data_url(url: &str) -> Result<DataUrl, DecodeError> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| DecodeError::InvalidDataUrl("missing data: scheme".to_string()))?;

    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| DecodeError::InvalidDataUrl("missing ',' separator".to_string()))?;

    let mime = meta
        .strip_suffix(";base64")
        .ok_or_else(|| DecodeError::InvalidDataUrl("payload is not base64".to_string()))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| DecodeError::InvalidDataUrl(e.to_string()))?;

    Ok(DataUrl {
        // Drop parameters such as `;charset=...`
        mime: mime.split(';').next().unwrap_or_default().to_string(),
        bytes,
    })
}

/// Build a base64 `data:` URL from a media type and payload.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
