//! Output file naming.
//!
//! Woven documents are named after their first source-script line. The
//! sanitizer turns arbitrary text into an underscore-joined name while
//! keeping "Chapter" and "Verses" readable as separate words.

use crate::models::FilenamePolicy;

/// Keywords that get a space instead of an underscore in front of them
const SPACED_KEYWORDS: [&str; 2] = ["Chapter", "Verses"];

/// Sanitize `raw` into a file name.
///
/// Steps, in order:
/// 1. whitespace runs become a single underscore
/// 2. underscore runs collapse to one
/// 3. `_Chapter` / `_Verses` become ` Chapter` / ` Verses` when the keyword
///    is a whole word (its number stays underscore-joined)
/// 4. trailing underscores are removed
/// 5. underscores dangling before the extension are removed
///
/// `sanitize(sanitize(s)) == sanitize(s)` for every `s`.
pub fn sanitize(raw: &str) -> String {
    let joined = join_whitespace(raw);
    let collapsed = collapse_underscores(&joined);
    let spaced = space_keywords(&collapsed);
    let trimmed = spaced.trim_end_matches('_');
    strip_dangling_before_extension(trimmed)
}

fn join_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_whitespace = false;

    for c in raw.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }

    out
}

fn collapse_underscores(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out
}

fn space_keywords(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut rest = name;

    while let Some(c) = rest.chars().next() {
        if c == '_' {
            if let Some(keyword) = SPACED_KEYWORDS
                .iter()
                .find(|kw| keyword_follows(&rest[1..], kw))
            {
                out.push(' ');
                out.push_str(keyword);
                rest = &rest[1 + keyword.len()..];
                continue;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// `rest` starts with `keyword` as a whole word.
fn keyword_follows(rest: &str, keyword: &str) -> bool {
    rest.strip_prefix(keyword)
        .map(|after| !after.chars().next().is_some_and(char::is_alphanumeric))
        .unwrap_or(false)
}

fn strip_dangling_before_extension(name: &str) -> String {
    if let Some((stem, extension)) = name.rsplit_once('.') {
        let is_extension =
            !extension.is_empty() && extension.chars().all(|c| c.is_ascii_alphanumeric());
        if is_extension && stem.ends_with('_') {
            return format!("{}.{}", stem.trim_end_matches('_'), extension);
        }
    }
    name.to_string()
}

/// Replace everything that is neither alphanumeric nor whitespace with `_`.
fn filename_safe(line: &str) -> String {
    line.trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Compose the output file name for a woven document.
///
/// The first source-script line (if any) is made filename-safe, prefixed,
/// given the policy's extension, and sanitized. A missing line, or one with
/// no alphanumeric character left, is replaced by the policy's fallback.
pub fn output_filename(first_line: Option<&str>, policy: &FilenamePolicy) -> String {
    let stem = first_line
        .map(filename_safe)
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .unwrap_or_else(|| policy.fallback.clone());

    let mut name = if policy.prefix.is_empty() {
        stem
    } else {
        format!("{}_{}", policy.prefix, stem)
    };

    let extension = policy.extension.trim_start_matches('.');
    if !extension.is_empty() {
        name.push('.');
        name.push_str(extension);
    }

    sanitize(&name)
}
