//! Semantic version comparison
//!
//! Versions in this domain are `MAJOR.MINOR.PATCH` strings written by
//! registry authors, parsed with `semver`. Only the numeric core takes part
//! in ordering; pre-release and build tags are ignored. A version that does
//! not parse counts as `0.0.0` so a sloppy registry never aborts a check.

use std::cmp::Ordering;

/// Compare two versions component-wise (major, then minor, then patch)
///
/// # Examples
///
/// ```
/// use hookshelf_engine::version::compare_versions;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_versions("1.2.0", "1.1.9"), Ordering::Greater);
/// assert_eq!(compare_versions("1.0.0", "1.0.0"), Ordering::Equal);
/// assert_eq!(compare_versions("0.9.0", "1.0.0"), Ordering::Less);
/// ```
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    core_of(a).cmp(&core_of(b))
}

/// Whether `remote` is strictly newer than `local`
pub fn is_newer(remote: &str, local: &str) -> bool {
    compare_versions(remote, local) == Ordering::Greater
}

fn core_of(version: &str) -> (u64, u64, u64) {
    normalize_version(version).map_or((0, 0, 0), |v| (v.major, v.minor, v.patch))
}

/// Parse a version, accepting a leading `v` and `MAJOR.MINOR` or `MAJOR` forms
fn normalize_version(s: &str) -> Option<semver::Version> {
    let s = s.trim();
    let s = s.strip_prefix(['v', 'V']).unwrap_or(s);

    if let Ok(v) = semver::Version::parse(s) {
        return Some(v);
    }

    // Missing components count as 0
    ["0", "0.0"]
        .iter()
        .find_map(|tail| semver::Version::parse(&format!("{s}.{tail}")).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_versions() {
        assert_eq!(compare_versions("1.2.0", "1.1.9"), Ordering::Greater);
        assert_eq!(compare_versions("1.0.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("0.9.0", "1.0.0"), Ordering::Less);
        assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("2.0.0", "1.99.99"), Ordering::Greater);
    }

    #[test]
    fn test_lenient_inputs() {
        assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("v1.2.3", "1.2.3"), Ordering::Equal);
        assert_eq!(compare_versions("1.2.3-beta.1", "1.2.3"), Ordering::Equal);
        assert_eq!(compare_versions("garbage", "0.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("", "0.0.1"), Ordering::Less);
        assert_eq!(compare_versions("2", "1.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("1.2.3+build.7", "1.2.3"), Ordering::Equal);
    }

    #[test]
    fn test_is_newer() {
        assert!(is_newer("1.2.0", "1.1.0"));
        assert!(!is_newer("1.1.0", "1.1.0"));
        assert!(!is_newer("1.0.0", "1.1.0"));
    }
}
