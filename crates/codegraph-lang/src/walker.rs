//! Ignore/Walk Adapter (spec §4's external collaborator #7): enumerates
//! candidate files under `repo_root`, honouring `.gitignore`, a
//! project-specific `.codegraphignore`, and the `ignore_patterns`
//! config option (spec §6), then dispatches each to a language tag.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use codegraph_core::config::Config;

use crate::registry::LanguageTag;

pub struct WalkEntry {
    pub path: PathBuf,
    pub language: LanguageTag,
}

pub struct FileWalker {
    root: PathBuf,
}

impl FileWalker {
    pub fn new(root: &Path) -> Self {
        Self { root: root.to_path_buf() }
    }

    /// Walk the root directory, returning every file with a recognised
    /// extension that survives both gitignore rules and `config`'s
    /// `ignore_patterns` (a `!`-prefixed pattern re-includes a path an
    /// earlier pattern excluded, per spec §6).
    pub fn walk(&self, config: &Config) -> Vec<WalkEntry> {
        let matcher = compile_ignore_patterns(&config.ignore_patterns);
        let allow_list: Option<Vec<LanguageTag>> =
            config.languages.as_ref().map(|tags| tags.iter().filter_map(|t| LanguageTag::from_str_opt(t)).collect());

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .add_custom_ignore_filename(codegraph_core::config::IGNORE_FILE)
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let Ok(entry) = result else { continue };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let path = entry.into_path();
            let relative = path.strip_prefix(&self.root).unwrap_or(&path);
            if matcher.is_excluded(relative) {
                continue;
            }
            let Some(language) = LanguageTag::from_path(&path) else { continue };
            if let Some(allow) = &allow_list {
                if !allow.contains(&language) {
                    continue;
                }
            }
            entries.push(WalkEntry { path, language });
        }
        entries
    }
}

/// A compiled `ignore_patterns` list. Later patterns override earlier
/// ones, matching gitignore's last-match-wins semantics; a `!`-prefixed
/// pattern re-includes.
struct IgnoreMatcher {
    rules: Vec<(globset::GlobMatcher, bool)>,
}

impl IgnoreMatcher {
    fn is_excluded(&self, relative: &Path) -> bool {
        let mut excluded = false;
        for (glob, negate) in &self.rules {
            if glob.is_match(relative) {
                excluded = !negate;
            }
        }
        excluded
    }
}

fn compile_ignore_patterns(patterns: &[String]) -> IgnoreMatcher {
    let mut rules = Vec::new();
    for pattern in patterns {
        let (negate, raw) = match pattern.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, pattern.as_str()),
        };
        if let Ok(glob) = globset::Glob::new(raw) {
            rules.push((glob.compile_matcher(), negate));
        }
    }
    IgnoreMatcher { rules }
}
