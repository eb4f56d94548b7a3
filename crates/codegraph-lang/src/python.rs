//! Python-specific resolution helpers (spec §4.4 "Python" bullet).
//! Everything that needs repo-wide context (the symbol table, the
//! resolver's ordered rules) lives in `codegraph-index`; this module
//! holds only the pure, language-local pieces of that logic.

/// `self.m(...)` call sites are method calls on the enclosing
/// instance; the resolver special-cases a leading `self` segment by
/// dropping it and resolving `m` against the enclosing class's members
/// instead of the repo-global index.
pub const SELF_RECEIVER: &str = "self";

/// True if `name_path`'s first segment is the implicit instance
/// receiver, meaning the remainder should resolve against the
/// enclosing class rather than an import alias or the repo index.
pub fn is_self_reference(name_path: &[String]) -> bool {
    name_path.first().map(|s| s.as_str()) == Some(SELF_RECEIVER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_self_receiver() {
        assert!(is_self_reference(&["self".to_string(), "helper".to_string()]));
        assert!(!is_self_reference(&["other".to_string(), "helper".to_string()]));
    }
}
