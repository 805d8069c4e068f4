//! How the target spreadsheet is addressed.

use std::fmt;

use crate::error::{Error, Result};

const URL_KEY_MARKER: &str = "/spreadsheets/d/";

/// Explicit prefix for a bare spreadsheet key.
const KEY_PREFIX: &str = "key:";

/// Shortest token taken as a bare key. Drive file ids are 44 characters;
/// spreadsheet titles of this length without spaces are not expected.
const MIN_BARE_KEY_LEN: usize = 40;

/// A spreadsheet addressed either by its human-readable name or by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetReference {
    /// Looked up by name on every write; the first match wins.
    Name(String),
    /// Fixed spreadsheet key, usually taken from a share URL.
    Key(String),
}

impl SheetReference {
    /// Interprets a configured reference.
    ///
    /// In order:
    /// - `key:<id>` is a bare key;
    /// - anything starting with `http://` or `https://` is a spreadsheet URL
    ///   and must carry a key (`/spreadsheets/d/<key>` or `key=`);
    /// - a single token of key characters (`[A-Za-z0-9_-]`) at least 40
    ///   characters long is a bare key;
    /// - everything else is a spreadsheet name.
    pub fn parse(reference: &str) -> Result<Self> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(Error::invalid_reference(reference, "must not be empty"));
        }
        if let Some(key) = reference.strip_prefix(KEY_PREFIX) {
            let key = key.trim();
            if key.is_empty() || !key.chars().all(is_key_char) {
                return Err(Error::invalid_reference(
                    reference,
                    "key must be letters, digits, '-' or '_'",
                ));
            }
            return Ok(SheetReference::Key(key.to_string()));
        }
        if reference.starts_with("https://") || reference.starts_with("http://") {
            return extract_key(reference)
                .map(SheetReference::Key)
                .ok_or_else(|| Error::invalid_reference(reference, "no spreadsheet key in URL"));
        }
        if looks_like_bare_key(reference) {
            return Ok(SheetReference::Key(reference.to_string()));
        }
        Ok(SheetReference::Name(reference.to_string()))
    }
}

impl fmt::Display for SheetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetReference::Name(name) => write!(f, "{name}"),
            SheetReference::Key(key) => write!(f, "{key}"),
        }
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn looks_like_bare_key(s: &str) -> bool {
    s.len() >= MIN_BARE_KEY_LEN && s.chars().all(is_key_char)
}

fn take_key(s: &str) -> Option<String> {
    let key: String = s.chars().take_while(|c| is_key_char(*c)).collect();
    (!key.is_empty()).then_some(key)
}

fn extract_key(url: &str) -> Option<String> {
    if let Some(idx) = url.find(URL_KEY_MARKER) {
        return take_key(&url[idx + URL_KEY_MARKER.len()..]);
    }
    let query = url.split_once('?')?.1;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("key="))
        .and_then(take_key)
}
