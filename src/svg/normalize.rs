//! SVG cleanup: turns an arbitrary editor export into a canonical fragment.
//!
//! Steps run in a fixed order, see [`Normalizer::normalize`]. Every step is a
//! fixed point on its own output, so normalizing an already normalized file
//! reproduces it byte for byte.

use super::document::{Document, NamespaceDecl, NodeId, NodeKind, QualName, SVG_NS, XML_NS};
use super::error::{Result, SvgError};
use super::geometry::{format_number, parse_length, parse_translate, ViewBox};
use super::writer::{write_document, WriteOptions};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

static URL_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"url\(\s*['\x22]?#([^)'\x22\s]+)").expect("url reference pattern"));

/// 根元素尺寸策略
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SizePolicy {
    /// Keep only the `viewBox`; explicit `width`/`height` are dropped.
    #[default]
    ViewBoxOnly,
    /// Force a fixed physical size (e.g. `10mm`) next to the `viewBox`.
    Fixed { width: String, height: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    pub editor_prefixes: Vec<String>,
    pub gray_tokens: Vec<String>,
    pub size_policy: SizePolicy,
    pub minify: bool,
    pub xml_declaration: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            editor_prefixes: vec!["-inkscape".to_string()],
            gray_tokens: vec!["#999".to_string()],
            size_policy: SizePolicy::default(),
            minify: false,
            xml_declaration: false,
        }
    }
}

/// Why a parseable document produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoSizeInfo,
    UnparseableSize { width: String, height: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoSizeInfo => write!(f, "Neither viewBox nor size attributes found"),
            SkipReason::UnparseableSize { width, height } => {
                write!(f, "Could not parse width/height ({}, {})", width, height)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Normalized(Vec<u8>),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// 正規化單一 SVG 文件
    ///
    /// Malformed markup is returned as an error; documents that parse but
    /// carry no usable size come back as [`Outcome::Skipped`].
    pub fn normalize(&self, input: &[u8], source: &str) -> Result<Outcome> {
        let mut doc = Document::parse(input)?;

        let root = doc.root_element();
        if !root.name.is(SVG_NS, "svg") {
            return Err(SvgError::NotSvgRoot {
                found: root.name.qualified(),
            });
        }

        let comments = strip_comments(&mut doc);
        let foreign = prune_foreign_elements(&mut doc);
        strip_editor_attributes(&mut doc, &self.options.editor_prefixes);
        cleanup_namespaces(&mut doc);
        let defs = remove_definitions(&mut doc);
        let gray = prune_gray_strokes(&mut doc, &self.options.gray_tokens);
        let orphans = remove_orphan_groups(&mut doc);

        // 尺寸推導出的 viewBox 必須先存在，translate 才能被吸收
        if let Err(reason) = reconcile_size(&mut doc, &self.options.size_policy) {
            tracing::error!("{}: {}, skipping...", source, reason);
            return Ok(Outcome::Skipped(reason));
        }
        let absorbed = absorb_root_translate(&mut doc);

        tracing::debug!(
            "{}: removed {} comments, {} foreign, {} defs, {} gray, {} orphan groups; translate absorbed: {}",
            source,
            comments,
            foreign,
            defs,
            gray,
            orphans,
            absorbed
        );

        if self.options.minify {
            minify(&mut doc);
        }

        let bytes = write_document(
            &doc,
            WriteOptions {
                xml_declaration: self.options.xml_declaration,
            },
        )?;
        Ok(Outcome::Normalized(bytes))
    }
}

fn strip_comments(doc: &mut Document) -> usize {
    let comments: Vec<NodeId> = doc
        .descendants(doc.root())
        .into_iter()
        .filter(|&id| matches!(doc.node(id).kind, NodeKind::Comment(_)))
        .collect();
    for &id in &comments {
        doc.detach(id);
    }
    comments.len()
}

fn is_definition_container(name: &QualName) -> bool {
    name.local == "defs"
}

/// Non-rendering blocks dropped together with foreign content.
fn is_non_rendering_block(name: &QualName) -> bool {
    is_definition_container(name) || name.local == "metadata"
}

fn prune_foreign_elements(doc: &mut Document) -> usize {
    let mut removed = 0;
    // 根元素已在前面檢查過，這裡只處理子孫
    for id in doc.descendant_elements(doc.root()).into_iter().skip(1) {
        let Some(el) = doc.element(id) else { continue };
        if el.name.namespace.as_deref() != Some(SVG_NS) || is_non_rendering_block(&el.name) {
            doc.detach(id);
            removed += 1;
        }
    }
    removed
}

fn has_editor_prefix(name: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
}

fn strip_editor_attributes(doc: &mut Document, prefixes: &[String]) {
    for id in doc.descendant_elements(doc.root()) {
        let Some(el) = doc.element_mut(id) else { continue };
        el.attributes
            .retain(|attr| !attr.is_qualified() && !has_editor_prefix(&attr.name.local, prefixes));

        let Some(style) = el.attr("style") else { continue };
        let declarations: Vec<&str> = style
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty() && !has_editor_prefix(part, prefixes))
            .collect();
        if declarations.is_empty() {
            el.remove_attr("style");
        } else {
            let cleaned = declarations.join("; ");
            el.set_attr("style", cleaned);
        }
    }
}

/// Binding `(prefix, uri)` pairs used by element and attribute names below `id`.
fn used_bindings(doc: &Document, id: NodeId) -> HashSet<(Option<String>, String)> {
    let mut used = HashSet::new();
    for node in doc.descendant_elements(id) {
        let Some(el) = doc.element(node) else { continue };
        if let Some(ns) = &el.name.namespace {
            used.insert((el.name.prefix.clone(), ns.clone()));
        }
        for attr in &el.attributes {
            if let (Some(prefix), Some(ns)) = (&attr.name.prefix, &attr.name.namespace) {
                if prefix != "xml" {
                    used.insert((Some(prefix.clone()), ns.clone()));
                }
            }
        }
    }
    used
}

fn in_scope(scope: &[NamespaceDecl], prefix: Option<&str>) -> Option<String> {
    if prefix == Some("xml") {
        return Some(XML_NS.to_string());
    }
    scope
        .iter()
        .rev()
        .find(|decl| decl.prefix.as_deref() == prefix)
        .map(|decl| decl.uri.clone())
}

/// Drop unused and redundant namespace declarations.
///
/// SVG elements are rewritten to the unprefixed form first, so a clean
/// document ends up with a single default declaration on the root.
fn cleanup_namespaces(doc: &mut Document) {
    let root = doc.root();
    for id in doc.descendant_elements(root) {
        if let Some(el) = doc.element_mut(id) {
            if el.name.namespace.as_deref() == Some(SVG_NS) {
                el.name.prefix = None;
            }
        }
    }

    let mut stack: Vec<(NodeId, Vec<NamespaceDecl>)> = vec![(root, Vec::new())];
    while let Some((id, inherited)) = stack.pop() {
        let used = used_bindings(doc, id);
        let Some(el) = doc.element_mut(id) else { continue };

        el.namespaces.retain(|decl| {
            used.contains(&(decl.prefix.clone(), decl.uri.clone()))
                && in_scope(&inherited, decl.prefix.as_deref()).as_deref() != Some(decl.uri.as_str())
        });

        let mut scope = inherited;
        scope.extend(el.namespaces.iter().cloned());

        // 元素自身的綁定必須在作用域內，否則輸出不是合法 XML
        let mut required: Vec<(Option<String>, String)> = Vec::new();
        if let Some(ns) = &el.name.namespace {
            required.push((el.name.prefix.clone(), ns.clone()));
        }
        for attr in &el.attributes {
            if let (Some(prefix), Some(ns)) = (&attr.name.prefix, &attr.name.namespace) {
                required.push((Some(prefix.clone()), ns.clone()));
            }
        }
        for (prefix, uri) in required {
            if in_scope(&scope, prefix.as_deref()).as_deref() != Some(uri.as_str()) {
                let decl = NamespaceDecl { prefix, uri };
                if decl.prefix.is_none() {
                    el.namespaces.insert(0, decl.clone());
                } else {
                    el.namespaces.push(decl.clone());
                }
                scope.push(decl);
            }
        }

        let children = doc.child_elements(id);
        for child in children.into_iter().rev() {
            stack.push((child, scope.clone()));
        }
    }
}

fn remove_definitions(doc: &mut Document) -> usize {
    let mut removed = 0;
    for id in doc.descendant_elements(doc.root()).into_iter().skip(1) {
        if doc.element(id).is_some_and(|el| is_definition_container(&el.name)) {
            doc.detach(id);
            removed += 1;
        }
    }
    removed
}

fn prune_gray_strokes(doc: &mut Document, tokens: &[String]) -> usize {
    let mut removed = 0;
    for kind in ["g", "path"] {
        for attribute in ["stroke", "style"] {
            for id in doc.descendant_elements(doc.root()).into_iter().skip(1) {
                let matches = doc.element(id).is_some_and(|el| {
                    el.name.local == kind
                        && el.attr(attribute).is_some_and(|value| {
                            tokens.iter().any(|token| value.contains(token.as_str()))
                        })
                });
                if matches {
                    doc.detach(id);
                    removed += 1;
                }
            }
        }
    }
    removed
}

fn is_group(doc: &Document, id: NodeId) -> bool {
    doc.element(id).is_some_and(|el| el.name.is(SVG_NS, "g"))
}

/// 反覆移除沒有子元素的 `<g>`，直到某一輪沒有任何移除
fn remove_orphan_groups(doc: &mut Document) -> usize {
    let mut total = 0;
    loop {
        let orphans: Vec<NodeId> = doc
            .descendant_elements(doc.root())
            .into_iter()
            .skip(1)
            .filter(|&id| is_group(doc, id) && doc.child_elements(id).is_empty())
            .collect();
        if orphans.is_empty() {
            break;
        }
        for &id in &orphans {
            doc.detach(id);
        }
        total += orphans.len();
    }
    total
}

/// Fold a lone top-level `translate(tx, ty)` group into the root viewBox.
fn absorb_root_translate(doc: &mut Document) -> bool {
    let root = doc.root();
    let Some(view_box) = doc.root_element().attr("viewBox").and_then(ViewBox::parse) else {
        return false;
    };
    let children = doc.child_elements(root);
    let [group] = children.as_slice() else {
        return false;
    };
    let group = *group;
    if !is_group(doc, group) {
        return false;
    }
    let Some((tx, ty)) = doc
        .element(group)
        .and_then(|el| el.attr("transform"))
        .and_then(parse_translate)
    else {
        return false;
    };

    doc.root_element_mut()
        .set_attr("viewBox", view_box.shifted_back(tx, ty).to_string());
    if let Some(el) = doc.element_mut(group) {
        el.remove_attr("transform");
    }
    true
}

fn present(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_owned)
}

fn reconcile_size(doc: &mut Document, policy: &SizePolicy) -> std::result::Result<(), SkipReason> {
    let root = doc.root_element_mut();
    let width = present(root.attr("width"));
    let height = present(root.attr("height"));
    let has_view_box = present(root.attr("viewBox")).is_some();

    match (width, height) {
        (Some(width), Some(height)) => {
            if !has_view_box {
                let (Some(w), Some(h)) = (parse_length(&width), parse_length(&height)) else {
                    return Err(SkipReason::UnparseableSize { width, height });
                };
                root.set_attr(
                    "viewBox",
                    format!("0 0 {} {}", format_number(w), format_number(h)),
                );
            }
        }
        _ if has_view_box => {}
        _ => return Err(SkipReason::NoSizeInfo),
    }

    match policy {
        SizePolicy::ViewBoxOnly => {
            root.remove_attr("width");
            root.remove_attr("height");
        }
        SizePolicy::Fixed { width, height } => {
            root.set_attr("width", width.clone());
            root.set_attr("height", height.clone());
        }
    }
    Ok(())
}

/// Whitespace-only text and unreferenced ids are dropped; no prolog is written.
fn minify(doc: &mut Document) {
    let root = doc.root();
    let blank: Vec<NodeId> = doc
        .descendants(root)
        .into_iter()
        .filter(|&id| {
            matches!(&doc.node(id).kind, NodeKind::Text(t) if t.trim().is_empty())
        })
        .collect();
    for id in blank {
        doc.detach(id);
    }

    let mut referenced = HashSet::new();
    for id in doc.descendant_elements(root) {
        let Some(el) = doc.element(id) else { continue };
        for attr in &el.attributes {
            for caps in URL_REFERENCE.captures_iter(&attr.value) {
                referenced.insert(caps[1].to_string());
            }
            if attr.name.local == "href" {
                if let Some(target) = attr.value.strip_prefix('#') {
                    referenced.insert(target.to_string());
                }
            }
        }
    }

    for id in doc.descendant_elements(root) {
        if let Some(el) = doc.element_mut(id) {
            el.attributes
                .retain(|attr| attr.name.local != "id" || attr.is_qualified() || referenced.contains(&attr.value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize_with(input: &str, options: NormalizeOptions) -> Outcome {
        Normalizer::new(options)
            .normalize(input.as_bytes(), "test.svg")
            .unwrap()
    }

    fn normalized(input: &str) -> String {
        match normalize_with(input, NormalizeOptions::default()) {
            Outcome::Normalized(bytes) => String::from_utf8(bytes).unwrap(),
            Outcome::Skipped(reason) => panic!("unexpected skip: {}", reason),
        }
    }

    const INKSCAPE: &str = r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<!-- Created with Inkscape (http://www.inkscape.org/) -->
<svg xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:svg="http://www.w3.org/2000/svg" xmlns="http://www.w3.org/2000/svg" xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape" width="100" height="50" id="svg2" sodipodi:docname="ISO_7000_-_Ref-No_0001.svg" inkscape:version="1.2"><defs id="defs4"><linearGradient id="grad"/></defs><sodipodi:namedview id="base" pagecolor="#ffffff"/><metadata id="metadata7"><rdf:RDF/></metadata><g inkscape:label="Layer 1" inkscape:groupmode="layer" id="layer1"><!-- outline --><path d="M0 0L10 10" style="fill:#000000;-inkscape-font-specification:Sans;stroke:none" -inkscape-stroke="none"/></g></svg>"##;

    #[test]
    fn test_inkscape_export_is_cleaned() {
        assert_eq!(
            normalized(INKSCAPE),
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="svg2" viewBox="0 0 100 50"><g id="layer1"><path d="M0 0L10 10" style="fill:#000000; stroke:none"/></g></svg>"#
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalized(INKSCAPE);
        assert_eq!(normalized(&once), once);

        let fixed = NormalizeOptions {
            size_policy: SizePolicy::Fixed {
                width: "10mm".to_string(),
                height: "10mm".to_string(),
            },
            minify: true,
            ..NormalizeOptions::default()
        };
        let Outcome::Normalized(first) = normalize_with(INKSCAPE, fixed.clone()) else {
            panic!("expected output");
        };
        let first = String::from_utf8(first).unwrap();
        let Outcome::Normalized(second) = normalize_with(&first, fixed) else {
            panic!("expected output");
        };
        assert_eq!(String::from_utf8(second).unwrap(), first);
    }

    #[test]
    fn test_style_without_survivors_is_removed() {
        let out = normalized(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1 1"><path d="M0 0" style="-inkscape-font-specification:Sans ; ;"/></svg>"#,
        );
        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1 1"><path d="M0 0"/></svg>"#
        );
    }

    #[test]
    fn test_prefixed_svg_elements_are_canonicalized() {
        let out = normalized(
            r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg" viewBox="0 0 4 4"><svg:rect width="1" height="1"/></svg:svg>"#,
        );
        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 4 4"><rect width="1" height="1"/></svg>"#
        );
    }

    #[test]
    fn test_redundant_inner_declarations_are_dropped() {
        let out = normalized(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 4 4"><g xmlns="http://www.w3.org/2000/svg" xmlns:x="urn:x"><path d="M0 0"/></g></svg>"#,
        );
        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 4 4"><g><path d="M0 0"/></g></svg>"#
        );
    }

    #[test]
    fn test_gray_strokes_are_pruned() {
        let out = normalized(
            r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><g stroke="#999999"><path d="M1 1"/></g><path d="M2 2" style="stroke:#999;fill:none"/><g><path d="M3 3" stroke="#999"/><path d="M4 4" stroke="#000"/></g><rect stroke="#999"/></svg>"##,
        );
        assert_eq!(
            out,
            r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><g><path d="M4 4" stroke="#000"/></g><rect stroke="#999"/></svg>"##
        );
    }

    #[test]
    fn test_nested_orphan_groups_collapse() {
        let out = normalized(
            r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><g> <g><g><path stroke="#999" d="M0 0"/></g></g> </g><circle r="1"/></svg>"##,
        );
        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><circle r="1"/></svg>"#
        );
    }

    #[test]
    fn test_translate_is_absorbed_into_view_box() {
        let out = normalized(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <g transform="translate(10,5)"><path d="M0 0"/></g>
</svg>"#,
        );
        assert_eq!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"-10 -5 100 100\">\n  <g><path d=\"M0 0\"/></g>\n</svg>"
        );
    }

    #[test]
    fn test_translate_absorbed_into_derived_view_box() {
        let input = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100px" height="100px"><g transform="translate(10,5)"><path d="M0 0"/></g></svg>"#;
        let once = normalized(input);
        assert_eq!(
            once,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="-10 -5 100 100"><g><path d="M0 0"/></g></svg>"#
        );
        assert_eq!(normalized(&once), once);
    }

    #[test]
    fn test_root_without_namespace_is_rejected() {
        let outcome = Normalizer::default().normalize(
            br#"<svg width="10" height="10"><path d="M0 0"/></svg>"#,
            "plain.svg",
        );
        assert!(matches!(
            outcome,
            Err(SvgError::NotSvgRoot { ref found }) if found == "svg"
        ));
    }

    #[test]
    fn test_translate_kept_when_not_absorbable() {
        let scaled = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><g transform="translate(10,5) scale(2)"><path d="M0 0"/></g></svg>"#;
        assert_eq!(normalized(scaled), scaled);

        let siblings = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><g transform="translate(10,5)"><path d="M0 0"/></g><path d="M1 1"/></svg>"#;
        assert_eq!(normalized(siblings), siblings);
    }

    #[test]
    fn test_translate_group_emptied_by_pruning_is_not_absorbed() {
        let out = normalized(
            r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><g transform="translate(10,5)"><path stroke="#999" d="M0 0"/></g><path d="M1 1"/></svg>"##,
        );
        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><path d="M1 1"/></svg>"#
        );
    }

    #[test]
    fn test_size_cases() {
        // 只有尺寸：從數值前綴推導 viewBox
        assert_eq!(
            normalized(r#"<svg xmlns="http://www.w3.org/2000/svg" width="64px" height="32.5mm"><path d="M0 0"/></svg>"#),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 32.5"><path d="M0 0"/></svg>"#
        );
        // 兩者皆有：保留 viewBox
        assert_eq!(
            normalized(r#"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 32 32"/>"#),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32"></svg>"#
        );
        // 只有單一尺寸加上 viewBox
        assert_eq!(
            normalized(r#"<svg xmlns="http://www.w3.org/2000/svg" width="64" viewBox="0 0 32 32"/>"#),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32"></svg>"#
        );
    }

    #[test]
    fn test_fixed_size_policy() {
        let options = NormalizeOptions {
            size_policy: SizePolicy::Fixed {
                width: "10mm".to_string(),
                height: "10mm".to_string(),
            },
            ..NormalizeOptions::default()
        };
        let Outcome::Normalized(out) = normalize_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32"><path d="M0 0"/></svg>"#,
            options.clone(),
        ) else {
            panic!("expected output");
        };
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32" width="10mm" height="10mm"><path d="M0 0"/></svg>"#
        );

        let Outcome::Normalized(out) = normalize_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="48" height="24"/>"#,
            options,
        ) else {
            panic!("expected output");
        };
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10mm" height="10mm" viewBox="0 0 48 24"></svg>"#
        );
    }

    #[test]
    fn test_missing_size_is_skipped() {
        let outcome = normalize_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0"/></svg>"#,
            NormalizeOptions::default(),
        );
        assert_eq!(outcome, Outcome::Skipped(SkipReason::NoSizeInfo));

        let outcome = normalize_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" height="10"><path d="M0 0"/></svg>"#,
            NormalizeOptions::default(),
        );
        assert_eq!(outcome, Outcome::Skipped(SkipReason::NoSizeInfo));
    }

    #[test]
    fn test_unparseable_size_is_skipped() {
        let outcome = normalize_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="abcpx" height="10"/>"#,
            NormalizeOptions::default(),
        );
        assert_eq!(
            outcome,
            Outcome::Skipped(SkipReason::UnparseableSize {
                width: "abcpx".to_string(),
                height: "10".to_string(),
            })
        );
    }

    #[test]
    fn test_malformed_and_foreign_roots_are_errors() {
        let normalizer = Normalizer::default();
        assert!(normalizer.normalize(b"<svg><g></svg>", "broken.svg").is_err());
        assert!(matches!(
            normalizer.normalize(b"<html viewBox=\"0 0 1 1\"/>", "page.svg"),
            Err(SvgError::NotSvgRoot { .. })
        ));
    }

    #[test]
    fn test_minify_drops_whitespace_and_unused_ids() {
        let options = NormalizeOptions {
            minify: true,
            ..NormalizeOptions::default()
        };
        let Outcome::Normalized(out) = normalize_with(
            r##"<svg xmlns="http://www.w3.org/2000/svg" id="root" viewBox="0 0 4 4">
  <clipPath id="clip"><rect width="4" height="4"/></clipPath>
  <path id="p1" clip-path="url(#clip)" d="M0 0"/>
  <use href="#p1"/>
</svg>"##,
            options,
        ) else {
            panic!("expected output");
        };
        assert_eq!(
            String::from_utf8(out).unwrap(),
            r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 4 4"><clipPath id="clip"><rect width="4" height="4"/></clipPath><path id="p1" clip-path="url(#clip)" d="M0 0"/><use href="#p1"/></svg>"##
        );
    }
}
