//! Turns uploaded or dropped files into resume text.
//!
//! Only plain text is understood. Bytes are decoded as UTF-8 with invalid
//! sequences replaced, and a leading byte-order mark is dropped. There is no
//! size limit.

use std::borrow::Cow;
use std::path::Path;

use crate::errors::CoachError;

const UTF8_BOM: char = '\u{feff}';

pub fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text {
        Cow::Borrowed(s) => s.strip_prefix(UTF8_BOM).unwrap_or(s).to_string(),
        Cow::Owned(s) => match s.strip_prefix(UTF8_BOM) {
            Some(stripped) => stripped.to_string(),
            None => s,
        },
    }
}

pub async fn read_text_file(path: impl AsRef<Path>) -> Result<String, CoachError> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    Ok(decode_text(&bytes))
}
