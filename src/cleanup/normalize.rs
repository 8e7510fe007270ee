use std::path::PathBuf;

pub const SEPARATOR: char = '/';
const ALT_SEPARATOR: char = '\\';

/// Canonicalize a user-supplied directory path without touching the disk.
///
/// `\` becomes `/`, a leading drive letter is upper-cased and trailing
/// separators are dropped unless the path is a root (`/`, `C:/`).
pub fn normalize_path(raw: &str) -> PathBuf {
    let mut normalized: String = raw
        .trim()
        .chars()
        .map(|c| if c == ALT_SEPARATOR { SEPARATOR } else { c })
        .collect();

    if has_drive_prefix(&normalized) {
        normalized[..1].make_ascii_uppercase();
    }

    while normalized.ends_with(SEPARATOR) && !is_root(&normalized) {
        normalized.pop();
    }

    PathBuf::from(normalized)
}

/// Lowercase and dot-prefix an extension. Returns an empty string when
/// nothing is left, which matches no file.
pub fn normalize_extension(raw: &str) -> String {
    let trimmed = raw.trim();
    let bare = trimmed.strip_prefix('.').unwrap_or(trimmed);
    if bare.is_empty() {
        return String::new();
    }
    format!(".{}", bare.to_lowercase())
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn is_root(path: &str) -> bool {
    path.len() == 1 || (path.len() <= 3 && has_drive_prefix(path))
}
