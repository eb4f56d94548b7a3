//! The tree-sitter driven half of the Pattern-Driven Extractor (spec
//! §4.2): parse a file, evaluate its language's combined
//! definition/reference query, and assemble [`Definition`]s and
//! [`RawReference`]s from the captures.

use std::path::Path;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node as TsNode, Parser, Query, QueryCursor};

use codegraph_core::types::NodeKind;
use codegraph_core::IndexError;

use crate::definition::{Definition, ExtractResult, Param, RawReference, ReferenceRole};
use crate::queries;
use crate::registry::LanguageTag;

/// Default soft per-file parse budget (spec §5: "default 10 s").
pub const DEFAULT_PARSE_TIMEOUT_MICROS: u64 = 10_000_000;

pub struct TreeSitterParser {
    parser: Parser,
}

impl Default for TreeSitterParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSitterParser {
    pub fn new() -> Self {
        Self { parser: Parser::new() }
    }

    /// Parse `source` under `tag`'s grammar and extract definitions and
    /// raw references (spec §4.2 algorithm, steps 1-6), using the
    /// default per-file parse timeout. A grammar error is surfaced as
    /// `IndexError::ParseFailure`; callers recover by emitting a
    /// childless File node (spec §7).
    pub fn parse_file(&mut self, tag: LanguageTag, path: &Path, source: &str) -> Result<ExtractResult, IndexError> {
        self.parse_file_with_timeout(tag, path, source, DEFAULT_PARSE_TIMEOUT_MICROS)
    }

    /// Same as [`Self::parse_file`] with an explicit timeout budget.
    /// tree-sitter's `parse` only returns `None` when its internal
    /// timeout or cancellation flag fires (a syntax error still yields
    /// a tree full of `ERROR` nodes), so a `None` result here is always
    /// `IndexError::QueryTimeout`, never a parse failure.
    pub fn parse_file_with_timeout(
        &mut self,
        tag: LanguageTag,
        path: &Path,
        source: &str,
        timeout_micros: u64,
    ) -> Result<ExtractResult, IndexError> {
        let lang = language_for_tag(tag);
        self.parser.set_language(&lang).map_err(|e| IndexError::ParseFailure {
            path: path.to_path_buf(),
            reason: format!("grammar error: {e}"),
        })?;
        self.parser.set_timeout_micros(timeout_micros);
        let tree = self.parser.parse(source.as_bytes(), None).ok_or_else(|| IndexError::QueryTimeout {
            path: path.to_path_buf(),
            timeout_ms: timeout_micros / 1000,
        })?;
        let query = queries::query_for(&lang, tag.as_str()).map_err(|e| IndexError::ParseFailure {
            path: path.to_path_buf(),
            reason: format!("query compilation error: {e}"),
        })?;

        let bytes = source.as_bytes();
        let root = tree.root_node();
        let file_key = path.to_string_lossy().to_string();

        let mut raw_defs = collect_raw_definitions(&query, root, bytes);
        raw_defs.sort_by_key(|d| d.start_line);
        disambiguate_duplicates(&mut raw_defs);

        let definitions = finalize_definitions(raw_defs, bytes, &file_key);
        let references = collect_references(&query, root, bytes, &definitions, &file_key);

        Ok(ExtractResult { definitions, references })
    }
}

pub fn language_for_tag(tag: LanguageTag) -> Language {
    match tag {
        LanguageTag::Python => tree_sitter_python::LANGUAGE.into(),
        LanguageTag::Go => tree_sitter_go::LANGUAGE.into(),
        LanguageTag::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        LanguageTag::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
    }
}

fn node_text<'a>(node: TsNode<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Intermediate per-match bookkeeping, before names are qualified and
/// skeletons are rendered. Carries the raw byte/line spans that
/// qualification and skeleton generation both need.
struct RawDef {
    kind: NodeKind,
    local_name: String,
    parent_hint: Option<String>,
    start_line: u32,
    end_line: u32,
    start_byte: usize,
    end_byte: usize,
    body_span: Option<(usize, usize)>,
    params_text: Option<String>,
    return_type_text: Option<String>,
    receiver_type: Option<String>,
}

fn collect_raw_definitions(query: &Query, root: TsNode<'_>, source: &[u8]) -> Vec<RawDef> {
    let mut cursor = QueryCursor::new();
    let capture_names = query.capture_names();
    let mut matches = cursor.matches(query, root, source);
    let mut out = Vec::new();

    while let Some(m) = matches.next() {
        let mut name = None;
        let mut kind = None;
        let mut parent_hint = None;
        let mut params_text = None;
        let mut return_type_text = None;
        let mut receiver_type = None;
        let mut body_span = None;
        let mut span: Option<(u32, u32, usize, usize)> = None;

        for cap in m.captures {
            let cap_name = capture_names[cap.index as usize];
            match cap_name {
                "definition.class.name" => {
                    name = Some(node_text(cap.node, source).to_string());
                    kind = Some(NodeKind::Class);
                }
                "definition.interface.name" => {
                    name = Some(node_text(cap.node, source).to_string());
                    kind = Some(NodeKind::Interface);
                }
                "definition.function.name" => {
                    name = Some(node_text(cap.node, source).to_string());
                    kind = Some(NodeKind::Function);
                }
                "definition.method.name" => {
                    name = Some(node_text(cap.node, source).to_string());
                    kind = Some(NodeKind::Function);
                }
                "definition.variable.name" => {
                    name = Some(node_text(cap.node, source).to_string());
                    kind = Some(NodeKind::Variable);
                }
                "definition.other_type.name" => {
                    name = Some(node_text(cap.node, source).to_string());
                    kind = Some(NodeKind::OtherType);
                }
                "definition.method.parent" | "definition.variable.parent" => {
                    parent_hint = Some(node_text(cap.node, source).to_string());
                }
                "definition.method.receiver_type" => {
                    receiver_type = Some(node_text(cap.node, source).to_string());
                }
                "definition.function.params" | "definition.method.params" => {
                    params_text = Some(node_text(cap.node, source).to_string());
                }
                "definition.function.return_type" | "definition.method.return_type" => {
                    let text = node_text(cap.node, source).to_string();
                    if !text.is_empty() {
                        return_type_text = Some(text);
                    }
                }
                "definition.function.body" | "definition.method.body" => {
                    body_span = Some((cap.node.start_byte(), cap.node.end_byte()));
                }
                "definition.class" | "definition.interface" | "definition.function" | "definition.method"
                | "definition.variable" | "definition.other_type" => {
                    span = Some((
                        cap.node.start_position().row as u32 + 1,
                        cap.node.end_position().row as u32 + 1,
                        cap.node.start_byte(),
                        cap.node.end_byte(),
                    ));
                }
                _ => {}
            }
        }

        if let (Some(n), Some(k), Some((start_line, end_line, start_byte, end_byte))) = (name, kind, span) {
            out.push(RawDef {
                kind: k,
                local_name: n,
                parent_hint,
                start_line,
                end_line,
                start_byte,
                end_byte,
                body_span,
                params_text,
                return_type_text,
                receiver_type,
            });
        }
    }

    out
}

/// Tie-break rule from spec §4.2: duplicate names within the same file
/// scope keep the earliest by `start_line`; later duplicates are
/// disambiguated with a `#N` suffix but still emitted.
fn disambiguate_duplicates(defs: &mut [RawDef]) {
    let mut seen: std::collections::HashMap<(String, Option<String>), u32> = std::collections::HashMap::new();
    for def in defs.iter_mut() {
        let key = (def.local_name.clone(), def.parent_hint.clone());
        let count = seen.entry(key).or_insert(0);
        if *count > 0 {
            def.local_name = format!("{}#{}", def.local_name, count);
        }
        *count += 1;
    }
}

fn parse_params(raw: &str) -> Vec<Param> {
    let inner = raw.trim().trim_start_matches('(').trim_end_matches(')');
    if inner.trim().is_empty() {
        return Vec::new();
    }
    let mut params = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for ch in inner.chars() {
        match ch {
            '(' | '<' | '[' | '{' => {
                depth += 1;
                current.push(ch);
            }
            ')' | '>' | ']' | '}' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 => {
                params.push(parse_one_param(&current));
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        params.push(parse_one_param(&current));
    }
    params.into_iter().filter(|p| !p.name.is_empty() && p.name != "self" && p.name != "this").collect()
}

fn parse_one_param(raw: &str) -> Param {
    let raw = raw.trim();
    // Go-style `name *Type` / `name Type`, Python/TS `name: Type`, both handled
    // by trying the colon form first, falling back to the last-space form.
    if let Some((name, ty)) = raw.split_once(':') {
        return Param {
            name: name.trim().trim_start_matches('*').trim_start_matches("...").to_string(),
            type_name: Some(ty.split('=').next().unwrap_or(ty).trim().to_string()),
        };
    }
    let mut parts = raw.rsplitn(2, ' ');
    let last = parts.next().unwrap_or("").trim();
    if let Some(first) = parts.next() {
        let first = first.trim();
        if !first.is_empty() {
            return Param {
                name: first.trim_start_matches('*').to_string(),
                type_name: Some(last.to_string()),
            };
        }
    }
    Param { name: last.trim_start_matches('*').to_string(), type_name: None }
}

fn finalize_definitions(raw_defs: Vec<RawDef>, source: &[u8], file_key: &str) -> Vec<Definition> {
    let mut out = Vec::with_capacity(raw_defs.len());
    for def in &raw_defs {
        let code = String::from_utf8_lossy(&source[def.start_byte..def.end_byte]).to_string();
        let skeleton_code = build_skeleton(def, raw_defs.as_slice(), source);
        let params = def.params_text.as_deref().map(parse_params).unwrap_or_default();

        let short_names = short_name_chain(&def.local_name, def.parent_hint.as_deref(), def.receiver_type.as_deref());
        let name = match &def.parent_hint {
            Some(parent) => format!("{file_key}#{parent}.{}", def.local_name),
            None => format!("{file_key}#{}", def.local_name),
        };

        out.push(Definition {
            kind: def.kind,
            name,
            short_names,
            start_line: def.start_line,
            end_line: def.end_line,
            code,
            skeleton_code,
            params,
            receiver_type: def.receiver_type.clone(),
            first_return_type: def.return_type_text.clone(),
            parent: def.parent_hint.clone(),
        });
    }
    out
}

fn short_name_chain(local: &str, parent: Option<&str>, receiver: Option<&str>) -> Vec<String> {
    let mut names = vec![local.to_string()];
    if let Some(parent) = parent {
        names.push(format!("{parent}.{local}"));
    }
    if let Some(receiver) = receiver {
        let receiver = receiver.trim_start_matches('*');
        names.push(format!("{receiver}.{local}"));
    }
    names
}

/// Skeleton generation (spec §4.2 step 4): a purely textual operation
/// that replaces every *nested* function/method body span with a
/// single-line placeholder, leaving signatures intact. For a
/// function/method definition itself, its own body is the thing
/// elided; for a class/interface, each directly-contained method's
/// body is elided in turn.
fn build_skeleton(def: &RawDef, all_defs: &[RawDef], source: &[u8]) -> String {
    let mut spans: Vec<(usize, usize)> = Vec::new();
    match def.kind {
        NodeKind::Function => {
            if let Some(span) = def.body_span {
                spans.push(span);
            }
        }
        NodeKind::Class | NodeKind::Interface => {
            for other in all_defs {
                if other.kind == NodeKind::Function
                    && other.start_byte >= def.start_byte
                    && other.end_byte <= def.end_byte
                    && other.start_byte != def.start_byte
                {
                    if let Some(span) = other.body_span {
                        spans.push(span);
                    }
                }
            }
        }
        _ => {}
    }

    if spans.is_empty() {
        return String::from_utf8_lossy(&source[def.start_byte..def.end_byte]).to_string();
    }

    spans.sort_by_key(|s| s.0);
    let mut out = String::new();
    let mut cursor = def.start_byte;
    for (body_start, body_end) in spans {
        if body_start < cursor || body_end > def.end_byte {
            continue;
        }
        out.push_str(&String::from_utf8_lossy(&source[cursor..body_start]));
        out.push_str(" { ... }");
        cursor = body_end;
    }
    out.push_str(&String::from_utf8_lossy(&source[cursor..def.end_byte]));
    out
}

/// Find the innermost definition whose line span contains `line` (spec
/// §4.2 step 3: "innermost for nested" references).
fn innermost_enclosing(def_line_spans: &[(u32, u32)], line: u32) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, (start, end)) in def_line_spans.iter().enumerate() {
        if line >= *start && line <= *end {
            let width = end - start;
            if best.map(|(_, w)| width < w).unwrap_or(true) {
                best = Some((i, width));
            }
        }
    }
    best.map(|(i, _)| i)
}

fn collect_references(
    query: &Query,
    root: TsNode<'_>,
    source: &[u8],
    definitions: &[Definition],
    file_key: &str,
) -> Vec<RawReference> {
    // Definitions carry only line spans post-finalization; recompute byte
    // spans is unnecessary since line-based containment is precise enough
    // for attributing a reference to its enclosing definition (multiple
    // definitions rarely share a start line).
    let def_line_spans: Vec<(u32, u32)> = definitions.iter().map(|d| (d.start_line, d.end_line)).collect();

    let mut cursor = QueryCursor::new();
    let capture_names = query.capture_names();
    let mut matches = cursor.matches(query, root, source);
    let mut out = Vec::new();

    while let Some(m) = matches.next() {
        let mut role = None;
        let mut path_segments: [Option<String>; 3] = [None, None, None];
        let mut import_source = None;
        let mut import_name = None;
        let mut import_alias = None;
        let mut line = 0u32;

        for cap in m.captures {
            let cap_name = capture_names[cap.index as usize];
            match cap_name {
                "reference.call.path1" | "reference.arg.path1" => path_segments[0] = Some(node_text(cap.node, source).to_string()),
                "reference.call.path2" | "reference.arg.path2" => path_segments[1] = Some(node_text(cap.node, source).to_string()),
                "reference.call.name" => {
                    path_segments[2] = Some(node_text(cap.node, source).to_string());
                    role = Some(ReferenceRole::Call);
                }
                "reference.arg.name" => {
                    path_segments[2] = Some(node_text(cap.node, source).to_string());
                    role = Some(ReferenceRole::Arg);
                }
                "reference.kwarg.name" => {
                    path_segments[2] = Some(node_text(cap.node, source).to_string());
                    role = Some(ReferenceRole::Kwarg);
                }
                "reference.assign_rhs.name" => {
                    path_segments[2] = Some(node_text(cap.node, source).to_string());
                    role = Some(ReferenceRole::AssignRhs);
                }
                "reference.binop.name" => {
                    path_segments[2] = Some(node_text(cap.node, source).to_string());
                    role = Some(ReferenceRole::BinOp);
                }
                "reference.compare.name" => {
                    path_segments[2] = Some(node_text(cap.node, source).to_string());
                    role = Some(ReferenceRole::Compare);
                }
                "reference.typeref.name" => {
                    path_segments[2] = Some(node_text(cap.node, source).to_string());
                    role = Some(ReferenceRole::TypeRef);
                }
                "reference.inherit.name" => {
                    path_segments[2] = Some(node_text(cap.node, source).to_string());
                    role = Some(ReferenceRole::Inherit);
                }
                "reference.import.source" => {
                    let raw = node_text(cap.node, source);
                    import_source = Some(raw.trim_matches('"').trim_matches('\'').to_string());
                }
                "reference.import.name" => {
                    import_name = Some(node_text(cap.node, source).to_string());
                }
                "reference.import.alias" => {
                    import_alias = Some(node_text(cap.node, source).to_string());
                }
                "reference.import" | "reference.inherit" | "reference.call" | "reference.arg" | "reference.kwarg"
                | "reference.assign_rhs" | "reference.binop" | "reference.compare" | "reference.typeref" => {
                    line = cap.node.start_position().row as u32 + 1;
                }
                _ => {}
            }
        }

        if import_source.is_some() {
            let source_path = import_source.unwrap();
            let imported = import_name.clone().unwrap_or_else(|| source_path.clone());
            let alias = import_alias.clone().unwrap_or_else(|| import_name.clone().unwrap_or_else(|| source_path.clone()));
            out.push(RawReference {
                name_path: vec![imported],
                role: ReferenceRole::Import,
                from: file_key.to_string(),
                line,
                import_path: Some(source_path),
                alias: Some(alias),
            });
            continue;
        }

        let Some(role) = role else { continue };
        let name_path: Vec<String> = path_segments.into_iter().flatten().collect();
        if name_path.is_empty() {
            continue;
        }

        let from = innermost_enclosing(&def_line_spans, line)
            .map(|i| definitions[i].name.clone())
            .unwrap_or_else(|| file_key.to_string());

        out.push(RawReference { name_path, role, from, line, import_path: None, alias: None });
    }

    out
}

#[cfg(test)]
#[path = "treesitter_tests.rs"]
mod tests;
