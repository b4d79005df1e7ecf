//! Conversion between local filesystem paths and `file://` document URIs.
//!
//! A [`DocumentUri`] never stores the wire string. It keeps a normalized,
//! forward-slash path and rebuilds the URI on demand, so two URIs that only
//! differ in percent-encoding or drive-letter case are the same value (and
//! the same map key).

use crate::error::{LspError, Result};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

/// Bytes left as-is in an encoded path: alphanumerics plus `/ - _ . ~`.
const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Separator convention used to interpret a local path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStyle {
    /// `/` is the only separator; `\` is an ordinary filename character.
    Posix,
    /// Both `\` and `/` separate components.
    Windows,
}

impl PathStyle {
    /// The convention of the platform this crate was compiled for.
    pub fn native() -> Self {
        if cfg!(windows) {
            PathStyle::Windows
        } else {
            PathStyle::Posix
        }
    }

    /// Rewrite `path` so that `/` is its only separator.
    pub fn to_slash(self, path: &str) -> Cow<'_, str> {
        match self {
            PathStyle::Posix => Cow::Borrowed(path),
            PathStyle::Windows => Cow::Owned(path.replace('\\', "/")),
        }
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::native()
    }
}

/// A document URI as exchanged with a language server.
///
/// Serializes to the `file://` wire form and deserializes from it, including
/// when used as a map key (`"changes"` in a workspace edit, for example).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentUri {
    /// `/`-separated; drive-letter paths are stored as `c:/...`.
    path: String,
}

impl DocumentUri {
    /// Build a URI from a local path using the native separator convention.
    pub fn from_path(path: &str) -> Self {
        Self::from_path_with_style(path, PathStyle::native())
    }

    /// Build a URI from a local path written in the given convention.
    pub fn from_path_with_style(path: &str, style: PathStyle) -> Self {
        Self {
            path: normalize(&style.to_slash(path)),
        }
    }

    /// Parse a `file://` URI received from the wire.
    ///
    /// Both `file:///C:/x` and `file:///c%3A/x` yield the local path `c:/x`.
    /// The path is only percent-decoded: `.` and `..` segments are kept as
    /// sent. A URI naming a host other than `localhost` is rejected.
    pub fn from_url(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|e| LspError::invalid_uri(raw, e.to_string()))?;
        if url.scheme() != "file" {
            return Err(LspError::invalid_uri(
                raw,
                format!("unsupported scheme {:?}, expected \"file\"", url.scheme()),
            ));
        }
        // The URL parser already folds `localhost` into the empty host.
        if let Some(host) = url.host_str().filter(|host| !host.is_empty()) {
            return Err(LspError::invalid_uri(
                raw,
                format!("authority {:?} is not supported, expected an empty one", host),
            ));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(LspError::invalid_uri(raw, "unexpected query or fragment"));
        }

        let encoded = raw_path(raw).map_err(|reason| LspError::invalid_uri(raw, reason))?;
        check_percent_triplets(encoded).map_err(|reason| LspError::invalid_uri(raw, reason))?;
        let decoded = percent_decode_str(encoded)
            .decode_utf8()
            .map_err(|e| LspError::invalid_uri(raw, format!("path is not UTF-8: {}", e)))?;

        Ok(Self {
            path: normalize(&decoded),
        })
    }

    /// The normalized local path, without scheme or percent-encoding.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The local path as a [`PathBuf`].
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

/// True when the path starts with a `x:` drive letter (`c:`, `c:/...`).
fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes.len() == 2 || bytes[2] == b'/')
}

fn normalize(path: &str) -> String {
    let trimmed = match path.strip_prefix('/') {
        Some(rest) if has_drive_prefix(rest) => rest,
        _ => path,
    };

    if has_drive_prefix(trimmed) {
        // Only the first byte changes, and it is ASCII.
        let mut owned = trimmed.to_string();
        owned[..1].make_ascii_lowercase();
        owned
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// The path text of a `file:` URI exactly as written, before any dot-segment
/// resolution. The host, if any, must already have been validated.
fn raw_path(raw: &str) -> std::result::Result<&str, String> {
    let rest = match raw.get(..5) {
        Some(scheme) if scheme.eq_ignore_ascii_case("file:") => &raw[5..],
        _ => return Err("URI must start with \"file:\"".to_string()),
    };
    let Some(after_slashes) = rest.strip_prefix("//") else {
        return Ok(rest);
    };
    if has_drive_prefix(after_slashes) {
        return Ok(after_slashes);
    }
    match after_slashes.find('/') {
        Some(start) => Ok(&after_slashes[start..]),
        None => Ok(""),
    }
}

fn check_percent_triplets(encoded: &str) -> std::result::Result<(), String> {
    let bytes = encoded.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(format!("malformed percent-escape at byte {}", i));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("file://")?;
        if has_drive_prefix(&self.path) {
            f.write_str("/")?;
        }
        write!(f, "{}", utf8_percent_encode(&self.path, PATH_ENCODE_SET))
    }
}

impl FromStr for DocumentUri {
    type Err = LspError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_url(s)
    }
}

impl TryFrom<&str> for DocumentUri {
    type Error = LspError;

    fn try_from(value: &str) -> Result<Self> {
        Self::from_url(value)
    }
}

impl AsRef<str> for DocumentUri {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

impl Serialize for DocumentUri {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DocumentUri {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_url(&raw).map_err(serde::de::Error::custom)
    }
}
