//! The Language Registry (spec §4.1): per-language bundle of grammar,
//! queries, file-extension dispatch, and a name resolved by language
//! tag. Adding a language means registering a new [`LanguageSupport`]
//! implementation here, never editing the extractor or resolver core
//! (spec §9).

use std::path::Path;

use codegraph_core::IndexError;

use crate::definition::ExtractResult;
use crate::treesitter::TreeSitterParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageTag {
    Python,
    Go,
    TypeScript,
    JavaScript,
}

impl LanguageTag {
    pub const ALL: [LanguageTag; 4] =
        [LanguageTag::Python, LanguageTag::Go, LanguageTag::TypeScript, LanguageTag::JavaScript];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::Python => "python",
            LanguageTag::Go => "go",
            LanguageTag::TypeScript => "typescript",
            LanguageTag::JavaScript => "javascript",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<LanguageTag> {
        Some(match s {
            "python" => LanguageTag::Python,
            "go" => LanguageTag::Go,
            "typescript" | "tsx" => LanguageTag::TypeScript,
            "javascript" => LanguageTag::JavaScript,
            _ => return None,
        })
    }

    /// File→language dispatch by extension (spec §4.1), falling back to
    /// `None` ("skip") for anything unrecognised.
    pub fn from_path(path: &Path) -> Option<LanguageTag> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "py" | "pyi" => Some(LanguageTag::Python),
            "go" => Some(LanguageTag::Go),
            "ts" | "tsx" => Some(LanguageTag::TypeScript),
            "js" | "jsx" | "mjs" | "cjs" => Some(LanguageTag::JavaScript),
            _ => None,
        }
    }

    /// Per-language capability set: whether `pkg.Sym`-style same-directory
    /// lookup applies (Go only, spec §4.4 rule 3).
    pub fn has_package_scoping(&self) -> bool {
        matches!(self, LanguageTag::Go)
    }
}

/// The capability set a registered language exposes: `{parse,
/// extract_definitions, extract_references}` (spec §9). Resolution
/// rules live in `codegraph-index`, since they need repo-wide context
/// this crate doesn't have.
pub trait LanguageSupport: Send + Sync {
    fn tag(&self) -> LanguageTag;
    fn parse_file(&self, path: &Path, source: &str) -> Result<ExtractResult, IndexError>;

    /// Same as [`Self::parse_file`] with an explicit soft timeout (spec
    /// §5). Defaults to the crate-wide default budget.
    fn parse_file_with_timeout(&self, path: &Path, source: &str, timeout_micros: u64) -> Result<ExtractResult, IndexError> {
        let _ = timeout_micros;
        self.parse_file(path, source)
    }
}

struct TreeSitterLanguageSupport {
    tag: LanguageTag,
}

impl LanguageSupport for TreeSitterLanguageSupport {
    fn tag(&self) -> LanguageTag {
        self.tag
    }

    fn parse_file(&self, path: &Path, source: &str) -> Result<ExtractResult, IndexError> {
        // `TreeSitterParser` wraps a `tree_sitter::Parser`, which is not
        // `Sync`; a fresh instance per call keeps this type trivially
        // `Send + Sync` for the rayon worker pool (spec §5).
        let mut parser = TreeSitterParser::new();
        parser.parse_file(self.tag, path, source)
    }

    fn parse_file_with_timeout(&self, path: &Path, source: &str, timeout_micros: u64) -> Result<ExtractResult, IndexError> {
        let mut parser = TreeSitterParser::new();
        parser.parse_file_with_timeout(self.tag, path, source, timeout_micros)
    }
}

/// Holds one [`LanguageSupport`] per registered language tag, keyed by
/// tag (spec §4.1: "the registry keys by language tag").
pub struct Registry {
    languages: Vec<Box<dyn LanguageSupport>>,
    allow_list: Option<Vec<LanguageTag>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            languages: LanguageTag::ALL
                .into_iter()
                .map(|tag| Box::new(TreeSitterLanguageSupport { tag }) as Box<dyn LanguageSupport>)
                .collect(),
            allow_list: None,
        }
    }

    /// Restrict dispatch to the given language tags (spec §6
    /// `languages` config option).
    pub fn with_allow_list(mut self, tags: Option<Vec<LanguageTag>>) -> Self {
        self.allow_list = tags;
        self
    }

    pub fn dispatch(&self, path: &Path) -> Option<&dyn LanguageSupport> {
        let tag = LanguageTag::from_path(path)?;
        if let Some(allow) = &self.allow_list {
            if !allow.contains(&tag) {
                return None;
            }
        }
        self.languages.iter().find(|l| l.tag() == tag).map(|b| b.as_ref())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
