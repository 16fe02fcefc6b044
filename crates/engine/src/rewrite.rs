//! Alias import rewriting
//!
//! Hooks in the registry import shared code through a symbolic alias
//! (`@/lib/utils`). Projects that install them may not configure that alias,
//! so every aliased import is rewritten to a path relative to the installed
//! file. Only four statement shapes are recognized; a prefix that merely
//! appears inside a string or comment is left alone.

use hookshelf_config::AliasRule;
use hookshelf_core::path::{AbsPath, normalize, relative_to};
use regex::Regex;
use std::path::{Component, Path, PathBuf};

/// One recognized import statement shape
///
/// Each pattern exposes two named groups: `spec` (the full `<prefix>X`
/// specifier, which is the only span ever replaced) and `sub` (the `X` part).
#[derive(Debug)]
pub struct ImportShape {
    /// Short name, for diagnostics
    pub name: &'static str,
    regex: Regex,
}

impl ImportShape {
    /// Build the ordered matcher list for an alias prefix
    ///
    /// Order matters: when two shapes match at the same offset the earlier
    /// one wins.
    pub fn for_prefix(prefix: &str) -> Vec<Self> {
        let spec = format!(r#"(?P<spec>{}(?P<sub>[^"'\s]+))"#, regex::escape(prefix));

        vec![
            Self::new("static", &format!(r#"\bfrom\s*["']{spec}["']"#)),
            Self::new(
                "dynamic",
                &format!(r#"\bimport\s*\(\s*["']{spec}["']\s*\)"#),
            ),
            Self::new(
                "reexport",
                &format!(r#"\bexport\s*\*\s*(?:as\s+[\w$]+\s+)?from\s*["']{spec}["']"#),
            ),
            Self::new(
                "require",
                &format!(r#"\brequire\s*\(\s*["']{spec}["']\s*\)"#),
            ),
        ]
    }

    fn new(name: &'static str, pattern: &str) -> Self {
        // The prefix is escaped, so the pattern is always valid
        let regex = Regex::new(pattern).expect("import shape pattern is valid");
        Self { name, regex }
    }

    /// Find the next occurrence at or after `pos`
    ///
    /// Returns `(match_start, spec_range, sub)`.
    fn find_at<'a>(
        &self,
        code: &'a str,
        pos: usize,
    ) -> Option<(usize, std::ops::Range<usize>, &'a str)> {
        let caps = self.regex.captures_at(code, pos)?;
        let whole = caps.get(0)?;
        let spec = caps.name("spec")?;
        let sub = caps.name("sub")?;
        Some((whole.start(), spec.range(), sub.as_str()))
    }
}

/// Rewrite every aliased import in `code` to a path relative to `destination`
///
/// Returns `code` unchanged when no alias rule is configured or when nothing
/// in the file uses the prefix.
///
/// # Examples
///
/// ```
/// use hookshelf_config::AliasRule;
/// use hookshelf_core::path::AbsPath;
/// use hookshelf_engine::rewrite::rewrite_imports;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let alias = AliasRule::new("@/", "src");
/// let dest = AbsPath::new("/app/src/hooks/use-x.ts".into())?;
///
/// let out = rewrite_imports(
///     r#"import { cn } from "@/lib/utils";"#,
///     Some(&alias),
///     &dest,
///     Path::new("/app"),
/// );
/// assert_eq!(out, r#"import { cn } from "../lib/utils";"#);
/// # Ok(())
/// # }
/// ```
pub fn rewrite_imports(
    code: &str,
    alias: Option<&AliasRule>,
    destination: &AbsPath,
    project_root: &Path,
) -> String {
    let Some(alias) = alias else {
        return code.to_string();
    };
    if alias.prefix.is_empty() || alias.target.as_os_str().is_empty() {
        return code.to_string();
    }

    let prefix = if alias.prefix.ends_with('/') {
        alias.prefix.clone()
    } else {
        format!("{}/", alias.prefix)
    };
    if !code.contains(prefix.as_str()) {
        return code.to_string();
    }

    let alias_root = normalize(&project_root.join(&alias.target));
    let dest_dir = destination
        .parent()
        .map_or_else(|| PathBuf::from("/"), AbsPath::into_path_buf);
    let shapes = ImportShape::for_prefix(&prefix);

    let mut out = String::with_capacity(code.len());
    let mut copied = 0;
    let mut pos = 0;

    while pos < code.len() {
        // Earliest match wins; ties go to the first shape in the list
        let next = shapes
            .iter()
            .filter_map(|shape| shape.find_at(code, pos).map(|m| (shape.name, m)))
            .min_by_key(|(_, (start, _, _))| *start);

        let Some((shape, (_, spec, sub))) = next else {
            break;
        };

        let replacement = relative_specifier(&alias_root.join(sub), &dest_dir);
        tracing::debug!(shape, from = &code[spec.clone()], to = %replacement, "Rewrote import");

        out.push_str(&code[copied..spec.start]);
        out.push_str(&replacement);
        copied = spec.end;
        pos = spec.end;
    }

    out.push_str(&code[copied..]);
    out
}

/// Portable relative import specifier for `target` as seen from `from_dir`
fn relative_specifier(target: &Path, from_dir: &Path) -> String {
    let rel = relative_to(target, from_dir);
    let joined = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        ".".to_string()
    } else if joined.starts_with('.') {
        joined
    } else {
        format!("./{joined}")
    }
}
