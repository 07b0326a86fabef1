//! Text and path sanitisation for generated file and directory names.
//!
//! Two character sets are used: [`INVALID_FILE_NAME_CHARS`] for a single
//! name component, and [`INVALID_PATH_CHARS`] for directory components,
//! which leaves the directory separators alone.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Replacement used for every invalid character.
pub const REPLACEMENT: char = '_';

const CONTROL_CHARS: [char; 32] = [
    '\u{00}', '\u{01}', '\u{02}', '\u{03}', '\u{04}', '\u{05}', '\u{06}', '\u{07}', '\u{08}',
    '\u{09}', '\u{0a}', '\u{0b}', '\u{0c}', '\u{0d}', '\u{0e}', '\u{0f}', '\u{10}', '\u{11}',
    '\u{12}', '\u{13}', '\u{14}', '\u{15}', '\u{16}', '\u{17}', '\u{18}', '\u{19}', '\u{1a}',
    '\u{1b}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{1f}',
];

/// Characters that may not appear in a file name.
pub const INVALID_FILE_NAME_CHARS: [char; 41] =
    concat_sets(['"', '<', '>', '|', ':', '*', '?', '\\', '/']);

/// Characters that may not appear in a directory path.
pub const INVALID_PATH_CHARS: [char; 39] = concat_sets(['"', '<', '>', '|', ':', '*', '?']);

const fn concat_sets<const N: usize, const M: usize>(extra: [char; N]) -> [char; M] {
    let mut out = ['\0'; M];
    let mut i = 0;
    while i < CONTROL_CHARS.len() {
        out[i] = CONTROL_CHARS[i];
        i += 1;
    }
    let mut j = 0;
    while j < N {
        out[i + j] = extra[j];
        j += 1;
    }
    out
}

/// Normalises typographic quotes to ASCII and replaces the platform path
/// separator with `_`.
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            c if c == MAIN_SEPARATOR => REPLACEMENT,
            c => c,
        })
        .collect()
}

/// Replaces every character of `invalid` found in `text` with [`REPLACEMENT`].
pub fn replace_invalid(text: &str, invalid: &[char]) -> String {
    replace_invalid_with(text, invalid, REPLACEMENT)
}

/// Replaces every character of `invalid` found in `text` with `replacement`.
///
/// `replacement` must not itself be a member of `invalid`, which keeps the
/// operation idempotent.
pub fn replace_invalid_with(text: &str, invalid: &[char], replacement: char) -> String {
    text.chars()
        .map(|c| if invalid.contains(&c) { replacement } else { c })
        .collect()
}

/// Sanitises a single file name with [`INVALID_FILE_NAME_CHARS`].
pub fn sanitize_file_name(name: &str) -> String {
    replace_invalid(name, &INVALID_FILE_NAME_CHARS)
}

/// Sanitises every normal component of `path` with [`INVALID_PATH_CHARS`].
///
/// Prefixes (drive letters, UNC shares), the root and `.`/`..` components
/// are kept verbatim. Components that are not valid UTF-8 are passed through.
pub fn sanitize_path(path: &Path) -> PathBuf {
    path.components()
        .map(|component| match component {
            Component::Normal(part) => match part.to_str() {
                Some(text) => OsString::from(replace_invalid(text, &INVALID_PATH_CHARS)),
                None => part.to_os_string(),
            },
            other => other.as_os_str().to_os_string(),
        })
        .collect()
}
