//! Path validation and platform path-length handling
//!
//! Everything here is a pure function of its inputs; nothing touches the
//! filesystem. That keeps the Windows long-path rules testable on any host by
//! passing an explicit [`Platform`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Escape that lifts the legacy maximum path length on Windows
pub const EXTENDED_LENGTH_PREFIX: &str = r"\\?\";

/// Extended-length form of a UNC path (`\\server\share` becomes `\\?\UNC\server\share`)
pub const EXTENDED_LENGTH_UNC_PREFIX: &str = r"\\?\UNC\";

/// Device namespace prefix, already exempt from path length limits
const DEVICE_NAMESPACE_PREFIX: &str = r"\\.\";

/// Characters Windows rejects anywhere in a path
const WINDOWS_RESERVED_CHARS: &[char] = &['<', '>', '"', '|', '?', '*'];

/// Path rules of the platform a path is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows: `\` separators, reserved characters, short default max path
    Windows,
    /// Unix-like: only NUL is forbidden, no short path limit
    Unix,
}

impl Platform {
    /// Platform of the running process
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    /// Whether the platform's default maximum path length is short enough to
    /// need [`EXTENDED_LENGTH_PREFIX`] for deep trees
    pub const fn has_short_max_path(self) -> bool {
        matches!(self, Self::Windows)
    }
}

/// Check that `path` is absolute and syntactically valid on this platform.
///
/// Returns `false` rather than failing for empty paths, embedded NUL bytes and
/// (on Windows) reserved characters.
pub fn is_valid_absolute_path(path: &Path) -> bool {
    if path.as_os_str().is_empty() || has_invalid_characters(path, Platform::current()) {
        return false;
    }
    path.is_absolute()
}

/// Whether `path` contains characters `platform` does not allow in paths
pub fn has_invalid_characters(path: &Path, platform: Platform) -> bool {
    if path.as_os_str().as_encoded_bytes().contains(&0) {
        return true;
    }

    match platform {
        Platform::Unix => false,
        Platform::Windows => {
            let text = path.to_string_lossy();
            let body = text
                .strip_prefix(EXTENDED_LENGTH_PREFIX)
                .or_else(|| text.strip_prefix(DEVICE_NAMESPACE_PREFIX))
                .unwrap_or(&text);

            body.char_indices().any(|(index, c)| {
                c.is_control()
                    || WINDOWS_RESERVED_CHARS.contains(&c)
                    // A colon is only legal right after a drive letter
                    || (c == ':' && !(index == 1 && body.starts_with(|d: char| d.is_ascii_alphabetic())))
            })
        }
    }
}

/// Length of `path` in the units the platform counts its path limit in
/// (UTF-16 code units)
pub fn path_length(path: &Path) -> usize {
    path.to_string_lossy().encode_utf16().count()
}

/// Prefix `path` with the extended-length escape when `platform` has a short
/// maximum path and `path` is at least `threshold` units long.
///
/// Paths that already carry a verbatim or device prefix are returned as is.
/// UNC paths get the `\\?\UNC\` form.
pub fn apply_long_path_prefix(path: &Path, platform: Platform, threshold: usize) -> PathBuf {
    if !platform.has_short_max_path() || path_length(path) < threshold {
        return path.to_path_buf();
    }

    let Some(text) = path.to_str() else {
        // Unpaired surrogates: leave the path alone rather than mangle it
        return path.to_path_buf();
    };

    if text.starts_with(EXTENDED_LENGTH_PREFIX) || text.starts_with(DEVICE_NAMESPACE_PREFIX) {
        return path.to_path_buf();
    }

    if let Some(unc) = text.strip_prefix(r"\\") {
        return PathBuf::from(format!("{EXTENDED_LENGTH_UNC_PREFIX}{unc}"));
    }

    let mut prefixed = OsString::from(EXTENDED_LENGTH_PREFIX);
    prefixed.push(path.as_os_str());
    PathBuf::from(prefixed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn long_windows_path(len: usize) -> String {
        let mut path = String::from(r"C:\");
        while path.len() < len {
            path.push('a');
        }
        path
    }

    #[test]
    fn test_empty_path_is_invalid() {
        assert!(!is_valid_absolute_path(Path::new("")));
    }

    #[test]
    fn test_relative_path_is_invalid() {
        assert!(!is_valid_absolute_path(Path::new("rel/path")));
        assert!(!is_valid_absolute_path(Path::new("./here")));
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_absolute_path_is_valid() {
        assert!(is_valid_absolute_path(Path::new("/tmp/some dir/x")));
        assert!(is_valid_absolute_path(Path::new("/")));
    }

    #[cfg(unix)]
    #[test]
    fn test_nul_byte_is_invalid() {
        use std::os::unix::ffi::OsStrExt;
        let path = Path::new(std::ffi::OsStr::from_bytes(b"/tmp/a\0b"));
        assert!(!is_valid_absolute_path(path));
    }

    #[rstest]
    #[case(r"C:\data\file.txt", false)]
    #[case(r"C:\data\fi|le.txt", true)]
    #[case(r"C:\data\what?.txt", true)]
    #[case(r"C:\data\<x>", true)]
    #[case(r"C:\data\a:b", true)]
    #[case(r"\\?\C:\data\file.txt", false)]
    #[case(r"\\server\share\dir", false)]
    #[case("C:\\tab\there", true)]
    fn test_windows_invalid_characters(#[case] path: &str, #[case] invalid: bool) {
        assert_eq!(has_invalid_characters(Path::new(path), Platform::Windows), invalid);
    }

    #[test]
    fn test_unix_allows_windows_reserved_characters() {
        assert!(!has_invalid_characters(Path::new("/tmp/a|b?c"), Platform::Unix));
    }

    #[test]
    fn test_short_path_not_prefixed() {
        let path = PathBuf::from(long_windows_path(199));
        assert_eq!(apply_long_path_prefix(&path, Platform::Windows, 200), path);
    }

    #[test]
    fn test_path_at_threshold_is_prefixed() {
        let raw = long_windows_path(200);
        let prefixed = apply_long_path_prefix(Path::new(&raw), Platform::Windows, 200);
        assert_eq!(prefixed, PathBuf::from(format!(r"\\?\{raw}")));
    }

    #[test]
    fn test_unc_path_uses_unc_form() {
        let raw = format!(r"\\server\share\{}", "d".repeat(250));
        let prefixed = apply_long_path_prefix(Path::new(&raw), Platform::Windows, 200);
        assert_eq!(
            prefixed,
            PathBuf::from(format!(r"\\?\UNC\server\share\{}", "d".repeat(250)))
        );
    }

    #[test]
    fn test_already_prefixed_path_unchanged() {
        let raw = format!(r"\\?\{}", long_windows_path(300));
        let path = PathBuf::from(&raw);
        assert_eq!(apply_long_path_prefix(&path, Platform::Windows, 200), path);
    }

    #[test]
    fn test_unix_never_prefixed() {
        let path = PathBuf::from(format!("/{}", "x".repeat(4000)));
        assert_eq!(apply_long_path_prefix(&path, Platform::Unix, 200), path);
    }

    #[test]
    fn test_current_platform_short_path_flag() {
        assert_eq!(Platform::current().has_short_max_path(), cfg!(windows));
    }

    proptest! {
        #[test]
        fn test_prefix_only_adds_escape(len in 1usize..600, threshold in 1usize..400) {
            let raw = long_windows_path(len.max(3));
            let prefixed = apply_long_path_prefix(Path::new(&raw), Platform::Windows, threshold);
            let text = prefixed.to_string_lossy().into_owned();

            if raw.len() >= threshold {
                prop_assert_eq!(text.strip_prefix(EXTENDED_LENGTH_PREFIX), Some(raw.as_str()));
            } else {
                prop_assert_eq!(text, raw);
            }
        }

        #[test]
        fn test_prefix_is_idempotent(len in 3usize..600) {
            let raw = long_windows_path(len);
            let once = apply_long_path_prefix(Path::new(&raw), Platform::Windows, 200);
            let twice = apply_long_path_prefix(&once, Platform::Windows, 200);
            prop_assert_eq!(once, twice);
        }
    }
}
