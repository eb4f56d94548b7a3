//! JavaScript-specific extractor notes (spec §4.4): the same import
//! binding shapes as TypeScript apply (named/namespace/default), minus
//! type-level constructs (no interfaces, type aliases, or enums — the
//! `javascript.scm` query simply omits those patterns). Resolution
//! reuses [`crate::typescript::classify_binding`] since the binding
//! shapes are identical; this module is a marker for where
//! JavaScript-only extractor quirks would go (there are none yet).

pub use crate::typescript::{classify_binding, ImportBindingKind};
