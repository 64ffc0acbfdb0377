//! Canonical software naming.
//!
//! Pure string logic - no I/O, no platform dependencies.

/// Combine an executable stem and a product name into one display name.
///
/// - only the stem: title-cased stem (`notepad` → `Notepad`)
/// - the product name contains the stem (ignoring case): the product name
/// - otherwise both: `Notepad (Microsoft Windows Operating System)`
///
/// Returns `None` when neither name is usable.
pub fn normalize_name(short_name: Option<&str>, long_name: Option<&str>) -> Option<String> {
    let short = short_name.map(str::trim).filter(|s| !s.is_empty());
    let long = long_name.map(str::trim).filter(|s| !s.is_empty());

    match (short, long) {
        (None, None) => None,
        (Some(short), None) => Some(title_case(short)),
        (None, Some(long)) => Some(long.to_string()),
        (Some(short), Some(long)) => {
            if long.to_lowercase().contains(&short.to_lowercase()) {
                Some(long.to_string())
            } else {
                Some(format!("{} ({})", title_case(short), long))
            }
        }
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_is_alpha = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if prev_is_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(ch);
            prev_is_alpha = false;
        }
    }
    out
}

/// Strip directories and a trailing `.exe` from an executable name.
pub fn executable_stem(executable: &str) -> &str {
    let file = executable
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(executable);
    match file.len().checked_sub(4) {
        Some(cut) if file.is_char_boundary(cut) && file[cut..].eq_ignore_ascii_case(".exe") => {
            &file[..cut]
        }
        _ => file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_only_is_title_cased() {
        assert_eq!(normalize_name(Some("notepad"), None), Some("Notepad".into()));
        assert_eq!(normalize_name(Some("notepad"), Some("")), Some("Notepad".into()));
    }

    #[test]
    fn test_long_name_containing_short_wins() {
        assert_eq!(
            normalize_name(Some("firefox"), Some("Mozilla Firefox")),
            Some("Mozilla Firefox".into())
        );
    }

    #[test]
    fn test_unrelated_names_are_combined() {
        assert_eq!(
            normalize_name(Some("notepad"), Some("Microsoft Windows Operating System")),
            Some("Notepad (Microsoft Windows Operating System)".into())
        );
    }

    #[test]
    fn test_no_names_fails() {
        assert_eq!(normalize_name(None, None), None);
        assert_eq!(normalize_name(Some("  "), Some("")), None);
    }

    #[test]
    fn test_long_name_alone_is_kept() {
        assert_eq!(normalize_name(None, Some("Calculator")), Some("Calculator".into()));
    }

    #[test]
    fn test_title_case_runs() {
        assert_eq!(title_case("notepad++"), "Notepad++");
        assert_eq!(title_case("WINWORD"), "Winword");
        assert_eq!(title_case("foo_bar baz"), "Foo_Bar Baz");
    }

    #[test]
    fn test_executable_stem() {
        assert_eq!(executable_stem("notepad.exe"), "notepad");
        assert_eq!(executable_stem(r"C:\Windows\NOTEPAD.EXE"), "NOTEPAD");
        assert_eq!(executable_stem("/usr/bin/gedit"), "gedit");
        assert_eq!(executable_stem("exe"), "exe");
    }
}
