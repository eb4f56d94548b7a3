//! Go-specific resolution helpers (spec §4.4 "Go" bullet): receiver
//! type normalisation and the same-package (same-directory) lookup
//! rule's pure predicate. Repo-wide pieces (symbol table, directory
//! scan) live in `codegraph-index`.

/// Pointer and value receivers are equivalent for attachment (spec
/// §4.4): `func (u *User) Name()` and `func (u User) Name()` both bind
/// to the `User` class. Receiver text may still carry a leading `*`
/// from the raw parameter text depending on capture path; this
/// normalises it away.
pub fn normalize_receiver(receiver: &str) -> &str {
    receiver.trim_start_matches('*').trim()
}

/// Splits a package-qualified reference (`pkg.Sym`) into its package
/// alias and local symbol, or `None` for an unqualified name (which is
/// resolved via same-package/same-directory lookup instead).
pub fn split_package_qualifier(name_path: &[String]) -> Option<(&str, &str)> {
    if name_path.len() >= 2 {
        Some((name_path[0].as_str(), name_path[1].as_str()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_pointer_receiver() {
        assert_eq!(normalize_receiver("*User"), "User");
        assert_eq!(normalize_receiver("User"), "User");
    }

    #[test]
    fn splits_package_qualifier() {
        assert_eq!(split_package_qualifier(&["fmt".to_string(), "Println".to_string()]), Some(("fmt", "Println")));
        assert_eq!(split_package_qualifier(&["helper".to_string()]), None);
    }
}
