//! Per-language definition/reference extraction (spec §4.1, §4.2) and
//! the gitignore-aware file walker (spec §2 item 7).

pub mod definition;
pub mod go;
pub mod javascript;
pub mod python;
pub mod queries;
pub mod registry;
pub mod treesitter;
pub mod typescript;
pub mod walker;

pub use definition::{Definition, ExtractResult, Param, RawReference, ReferenceRole};
pub use registry::{LanguageSupport, LanguageTag, Registry};
