//! Media type selection for uploaded images.

const FALLBACK_MIME: &str = "image/png";

/// Declared types that carry no information about the actual format.
fn is_generic(declared: &str) -> bool {
    declared.is_empty() || declared == "application/octet-stream"
}

/// Recognize the image formats Gemini accepts inline by their magic bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, b'P', b'N', b'G', ..] => Some("image/png"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        _ => None,
    }
}

/// Media type to send upstream for an upload. A specific declared type wins;
/// otherwise the bytes decide, and unknown content is sent as PNG.
pub fn upload_mime(declared: Option<&str>, bytes: &[u8]) -> String {
    if let Some(declared) = declared.map(str::trim).filter(|d| !is_generic(d)) {
        return declared.to_string();
    }

    match sniff_image_mime(bytes) {
        Some(sniffed) => sniffed.to_string(),
        None => {
            tracing::warn!(
                "Upload declared as {:?} has unknown leading bytes {:02X?}, sending as {}",
                declared,
                &bytes[..bytes.len().min(4)],
                FALLBACK_MIME
            );
            FALLBACK_MIME.to_string()
        }
    }
}
