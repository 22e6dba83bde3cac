//! Entry-name repair and sanitization.
//!
//! ZIP writers on Russian-locale systems historically stored names in the
//! DOS code page 866 without setting the UTF-8 flag, and readers decode such
//! names as code page 437. [`decode_name`] undoes that one mapping. It is a
//! best-effort heuristic: a name that was never mis-decoded but happens to
//! be representable in CP437 (for example `café.txt`) is "repaired" into
//! something else. Do not strengthen it without evidence about the encodings
//! that actually show up in real archives.

use std::borrow::Cow;
use std::path::PathBuf;

use codepage_437::{CP437_CONTROL, ToCp437};
use once_cell::sync::Lazy;
use regex::Regex;

static RESERVED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("reserved-character pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Recover a human-readable name from one that was read back as CP437.
///
/// Pure-ASCII names are returned unchanged. Otherwise the characters are
/// mapped back to their CP437 bytes and those bytes are decoded as CP866.
/// If the name is not representable in CP437, or the result is empty, the
/// input is returned as is.
pub fn decode_name(name: &str) -> String {
    if name.is_ascii() {
        return name.to_string();
    }

    let bytes: Cow<'_, [u8]> = match name.to_cp437(&CP437_CONTROL) {
        Ok(bytes) => bytes,
        Err(_) => return name.to_string(),
    };

    let (decoded, _) = encoding_rs::IBM866.decode_without_bom_handling(&bytes);
    if decoded.is_empty() {
        name.to_string()
    } else {
        decoded.into_owned()
    }
}

/// Make a single name safe for use as a file name.
///
/// Filesystem-reserved characters become `_`, whitespace runs collapse to a
/// single space, and leading/trailing dots and spaces are trimmed. Applying
/// it twice gives the same result as applying it once.
pub fn sanitize_name(name: &str) -> String {
    let replaced = RESERVED.replace_all(name, "_");
    let collapsed = WHITESPACE.replace_all(&replaced, " ");
    collapsed.trim_matches(['.', ' ']).to_string()
}

/// Sanitize every component of a container-relative path.
///
/// Both `/` and `\` separate components. Components that sanitize to nothing
/// (`.`, `..`, blanks) are dropped, so the result is always relative and
/// never climbs out of the directory it is joined onto. Returns `None` when
/// no component survives.
pub fn sanitize_relative_path(path: &str) -> Option<PathBuf> {
    let sanitized: PathBuf = path
        .split(['/', '\\'])
        .map(sanitize_name)
        .filter(|component| !component.is_empty())
        .collect();

    if sanitized.as_os_str().is_empty() {
        None
    } else {
        Some(sanitized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ascii_names_are_untouched() {
        assert_eq!(decode_name("docs/report 2024.txt"), "docs/report 2024.txt");
        assert_eq!(decode_name(""), "");
    }

    #[test]
    fn cp866_read_as_cp437_is_repaired() {
        // "Привет" stored as CP866 bytes and read back as CP437
        assert_eq!(decode_name("Åα¿óÑΓ.txt"), "Привет.txt");
        assert_eq!(decode_name("ÄΓτ±Γ 2024.txt"), "Отчёт 2024.txt");
    }

    #[test]
    fn names_outside_cp437_are_kept() {
        assert_eq!(decode_name("Привет.txt"), "Привет.txt");
        assert_eq!(decode_name("报告.pdf"), "报告.pdf");
    }

    #[test]
    fn reserved_characters_replaced() {
        assert_eq!(sanitize_name(r#"a<b>c:d"e/f\g|h?i*j"#), "a_b_c_d_e_f_g_h_i_j");
    }

    #[test]
    fn dots_and_spaces_trimmed() {
        assert_eq!(sanitize_name("  .hidden. "), "hidden");
        assert_eq!(sanitize_name(".."), "");
        assert_eq!(sanitize_name("report.txt."), "report.txt");
    }

    #[test]
    fn whitespace_collapsed() {
        assert_eq!(sanitize_name("annual\t \n report.txt"), "annual report.txt");
        assert_eq!(sanitize_name("a\t"), "a");
    }

    #[test]
    fn relative_path_components() {
        assert_eq!(
            sanitize_relative_path("docs/2024: q1/report?.txt"),
            Some(PathBuf::from("docs/2024_ q1/report_.txt"))
        );
        assert_eq!(
            sanitize_relative_path("..\\..\\etc/passwd.txt"),
            Some(PathBuf::from("etc/passwd.txt"))
        );
        assert_eq!(
            sanitize_relative_path("/abs/file.txt"),
            Some(PathBuf::from("abs/file.txt"))
        );
        assert_eq!(sanitize_relative_path("../ /."), None);
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(name in any::<String>()) {
            let once = sanitize_name(&name);
            prop_assert_eq!(sanitize_name(&once), once.clone());
        }

        #[test]
        fn sanitize_is_idempotent_on_nasty_names(name in r#"[ .\t<>:"/\\|?*a-zА-я]{0,24}"#) {
            let once = sanitize_name(&name);
            prop_assert_eq!(sanitize_name(&once), once.clone());
        }

        #[test]
        fn decode_is_identity_on_ascii(name in "[\\x00-\\x7F]{0,48}") {
            prop_assert_eq!(decode_name(&name), name);
        }

        #[test]
        fn sanitized_relative_paths_stay_relative(path in any::<String>()) {
            if let Some(relative) = sanitize_relative_path(&path) {
                prop_assert!(relative.is_relative());
                prop_assert!(relative
                    .components()
                    .all(|c| matches!(c, std::path::Component::Normal(_))));
            }
        }
    }
}
