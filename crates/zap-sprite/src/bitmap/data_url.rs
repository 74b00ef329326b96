//! Parsing and building of self-contained `data:` URLs.
//!
//! Only the inline form is accepted: `data:[<mime>][;param...][;base64],<payload>`.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{Result, SpriteError};

const SCHEME: &str = "data:";

/// A borrowed view of a parsed data URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrl<'a> {
    /// Media type, empty when the URL omits it.
    pub mime: &'a str,
    /// Whether the payload is base64 encoded (otherwise percent-encoded).
    pub base64: bool,
    /// The raw payload text after the comma.
    pub payload: &'a str,
}

impl<'a> DataUrl<'a> {
    /// Parse a data URL. Fails with `InvalidArgument` when the string is not
    /// a data URL or carries no inline data.
    pub fn parse(url: &'a str) -> Result<Self> {
        let url = url.trim();
        let has_scheme = url
            .get(..SCHEME.len())
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case(SCHEME));
        if !has_scheme {
            return Err(SpriteError::invalid(format!(
                "expected a data URL, got {:?}",
                truncate(url)
            )));
        }

        let rest = &url[SCHEME.len()..];
        let Some((meta, payload)) = rest.split_once(',') else {
            return Err(SpriteError::invalid("data URL has no ',' before its payload"));
        };
        if payload.is_empty() {
            return Err(SpriteError::invalid("data URL carries no inline data"));
        }

        let mut params = meta.split(';');
        let mime = params.next().unwrap_or_default().trim();
        let base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

        Ok(Self { mime, base64, payload })
    }

    /// Decode the payload into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        if self.base64 {
            let compact: String = self.payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            STANDARD
                .decode(compact.as_bytes())
                .map_err(|err| SpriteError::invalid(format!("data URL payload is not valid base64: {err}")))
        } else {
            percent_decode(self.payload)
        }
    }

    /// Build a base64 data URL for `bytes` with the given media type.
    pub fn encode(mime: &str, bytes: &[u8]) -> String {
        format!("{SCHEME}{mime};base64,{}", STANDARD.encode(bytes))
    }
}

fn percent_decode(text: &str) -> Result<Vec<u8>> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .filter(|h| h.iter().all(u8::is_ascii_hexdigit))
                .and_then(|h| std::str::from_utf8(h).ok())
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| SpriteError::invalid("data URL has a malformed percent escape"))?;
            out.push(hex);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(out)
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(32) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
