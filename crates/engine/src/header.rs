//! Version header embedded as the first line of every installed file
//!
//! ```text
//! // @hookshelf hook:use-debounce@1.2.0 registry:2.1.0
//! ```
//!
//! The `hook:<id>@<major.minor.patch>` token is the machine-readable part and
//! must stay stable for external tooling.

use regex::Regex;
use std::sync::LazyLock;

/// How far into a file the decoder looks for the header
pub const HEADER_SCAN_LIMIT: usize = 2048;

/// Marker that opens every header line
const HEADER_MARKER: &str = "// @hookshelf ";

static HOOK_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"hook:([A-Za-z0-9._/-]+)@(\d+\.\d+\.\d+)").expect("hook token pattern is valid")
});

/// Identity decoded from an installed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Hook identifier
    pub id: String,
    /// Hook version at install time
    pub version: String,
}

/// Render the header line (without trailing newline)
pub fn encode(id: &str, version: &str, registry_version: &str) -> String {
    format!("{HEADER_MARKER}hook:{id}@{version} registry:{registry_version}")
}

/// Extract the hook identity from the start of a file
///
/// Returns `None` when no header token appears in the first
/// [`HEADER_SCAN_LIMIT`] bytes.
pub fn decode(content: &str) -> Option<HeaderInfo> {
    let mut end = content.len().min(HEADER_SCAN_LIMIT);
    while !content.is_char_boundary(end) {
        end -= 1;
    }

    let caps = HOOK_TOKEN.captures(&content[..end])?;
    Some(HeaderInfo {
        id: caps[1].to_string(),
        version: caps[2].to_string(),
    })
}

/// Remove a leading header line, if any
pub fn strip(content: &str) -> &str {
    if !content.starts_with(HEADER_MARKER) {
        return content;
    }
    content.find('\n').map_or("", |newline| &content[newline + 1..])
}

/// Prepend a header line to file content
///
/// An existing header is replaced rather than stacked.
pub fn prepend(content: &str, id: &str, version: &str, registry_version: &str) -> String {
    format!("{}\n{}", encode(id, version, registry_version), strip(content))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(
            encode("use-debounce", "1.2.0", "2.1.0"),
            "// @hookshelf hook:use-debounce@1.2.0 registry:2.1.0"
        );
    }

    #[test]
    fn test_encode_then_decode() {
        let content = format!("{}\nexport function useX() {{}}\n", encode("use-x", "0.4.12", "1.0.0"));
        let info = decode(&content).unwrap();
        assert_eq!(info.id, "use-x");
        assert_eq!(info.version, "0.4.12");
    }

    #[test]
    fn test_decode_without_header() {
        assert!(decode("export const x = 1;\n").is_none());
        assert!(decode("").is_none());
        assert!(decode("// hook:use-x@not-a-version").is_none());
    }

    #[test]
    fn test_decode_accepts_foreign_comment_styles() {
        let info = decode("/* hook:use-y@3.0.1 registry:x */\n").unwrap();
        assert_eq!(info.id, "use-y");
        assert_eq!(info.version, "3.0.1");
    }

    #[test]
    fn test_decode_only_scans_leading_bytes() {
        let mut content = "x".repeat(HEADER_SCAN_LIMIT);
        content.push_str("hook:use-late@1.0.0");
        assert!(decode(&content).is_none());
    }

    #[test]
    fn test_decode_cuts_on_char_boundary() {
        // 'é' is two bytes; place it across the scan limit
        let mut content = "a".repeat(HEADER_SCAN_LIMIT - 1);
        content.push('é');
        assert!(decode(&content).is_none());
    }

    #[test]
    fn test_strip_and_prepend() {
        let body = "export const x = 1;\n";
        let once = prepend(body, "use-x", "1.0.0", "1.0.0");
        assert_eq!(strip(&once), body);

        let twice = prepend(&once, "use-x", "1.1.0", "1.0.0");
        assert_eq!(twice.matches("@hookshelf").count(), 1);
        assert_eq!(decode(&twice).unwrap().version, "1.1.0");
    }

    #[test]
    fn test_strip_without_header() {
        assert_eq!(strip("const a = 1;\n"), "const a = 1;\n");
    }
}
