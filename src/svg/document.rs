//! Mutable SVG tree backed by an index arena.
//!
//! Nodes are never freed: detaching a node only unlinks it from its parent,
//! so `NodeId`s collected before a mutation stay valid afterwards.

use super::error::{Result, SvgError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

static ENTITY_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<!ENTITY\s+([A-Za-z_][\w.\-]*)\s+(?:"([^"]*)"|'([^']*)')\s*>"#)
        .expect("entity declaration pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualName {
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub local: String,
}

impl QualName {
    pub fn unqualified(local: &str) -> Self {
        Self {
            namespace: None,
            prefix: None,
            local: local.to_string(),
        }
    }

    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local == local
    }

    /// Name as written in markup (`prefix:local` or `local`).
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local),
            None => self.local.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

impl Attribute {
    pub fn is_qualified(&self) -> bool {
        self.name.prefix.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    pub prefix: Option<String>,
    pub uri: String,
}

#[derive(Debug, Clone)]
pub struct Element {
    pub name: QualName,
    pub namespaces: Vec<NamespaceDecl>,
    pub attributes: Vec<Attribute>,
    pub children: Vec<NodeId>,
}

impl Element {
    /// Value of an unqualified attribute.
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| !a.is_qualified() && a.name.local == local)
            .map(|a| a.value.as_str())
    }

    /// Replace an unqualified attribute in place, or append it.
    pub fn set_attr(&mut self, local: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|a| !a.is_qualified() && a.name.local == local)
        {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute {
                name: QualName::unqualified(local),
                value,
            }),
        }
    }

    pub fn remove_attr(&mut self, local: &str) -> Option<String> {
        let index = self
            .attributes
            .iter()
            .position(|a| !a.is_qualified() && a.name.local == local)?;
        Some(self.attributes.remove(index).value)
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// 從原始位元組解析 SVG 文件
    ///
    /// Internal DTD entities (`<!ENTITY ns_svg "...">`) are expanded in text
    /// and attribute values. Everything outside the root element (prolog,
    /// doctype, processing instructions, comments) is dropped.
    pub fn parse(input: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(input)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut reader = Reader::from_str(text);
        let mut nodes: Vec<Node> = Vec::new();
        let mut root: Option<NodeId> = None;
        let mut open: Vec<NodeId> = Vec::new();
        let mut scopes: Vec<Vec<NamespaceDecl>> = Vec::new();
        let mut entities: HashMap<String, String> = HashMap::new();

        loop {
            match reader.read_event()? {
                Event::DocType(e) => {
                    let doctype = String::from_utf8_lossy(&e);
                    for caps in ENTITY_DECL.captures_iter(&doctype) {
                        let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
                        entities.insert(caps[1].to_string(), value.to_string());
                    }
                }
                Event::Start(e) => {
                    let id = open_element(&mut nodes, &mut root, &open, &mut scopes, &e, &entities)?;
                    open.push(id);
                }
                Event::Empty(e) => {
                    open_element(&mut nodes, &mut root, &open, &mut scopes, &e, &entities)?;
                    scopes.pop();
                }
                Event::End(_) => {
                    open.pop();
                    scopes.pop();
                }
                Event::Text(e) => {
                    if let Some(&parent) = open.last() {
                        let value = e.unescape_with(|name: &str| resolve_entity(&entities, name))?;
                        push_node(&mut nodes, parent, NodeKind::Text(value.into_owned()));
                    }
                }
                Event::CData(e) => {
                    if let Some(&parent) = open.last() {
                        let value = std::str::from_utf8(&e)?.to_string();
                        push_node(&mut nodes, parent, NodeKind::CData(value));
                    }
                }
                Event::Comment(e) => {
                    if let Some(&parent) = open.last() {
                        let value = String::from_utf8_lossy(&e).into_owned();
                        push_node(&mut nodes, parent, NodeKind::Comment(value));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !open.is_empty() {
            return Err(SvgError::Malformed {
                message: format!("{} element(s) left unclosed", open.len()),
            });
        }

        let root = root.ok_or(SvgError::NoRoot)?;
        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn root_element(&self) -> &Element {
        self.element(self.root)
            .expect("document root is always an element")
    }

    pub fn root_element_mut(&mut self) -> &mut Element {
        let root = self.root;
        self.element_mut(root)
            .expect("document root is always an element")
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.0].kind {
            NodeKind::Element(el) => &el.children,
            _ => &[],
        }
    }

    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.element(child).is_some())
            .collect()
    }

    /// Pre-order snapshot of `id` and everything below it.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub fn descendant_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&node| self.element(node).is_some())
            .collect()
    }

    /// Unlink a node (and thereby its subtree) from its parent.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.0].parent.take() else {
            return;
        };
        if let NodeKind::Element(el) = &mut self.nodes[parent.0].kind {
            el.children.retain(|&child| child != id);
        }
    }
}

fn push_node(nodes: &mut Vec<Node>, parent: NodeId, kind: NodeKind) -> NodeId {
    let id = NodeId(nodes.len());
    nodes.push(Node {
        parent: Some(parent),
        kind,
    });
    if let NodeKind::Element(el) = &mut nodes[parent.0].kind {
        el.children.push(id);
    }
    id
}

fn open_element(
    nodes: &mut Vec<Node>,
    root: &mut Option<NodeId>,
    open: &[NodeId],
    scopes: &mut Vec<Vec<NamespaceDecl>>,
    start: &BytesStart<'_>,
    entities: &HashMap<String, String>,
) -> Result<NodeId> {
    let raw_name = std::str::from_utf8(start.name().as_ref())?.to_string();

    let mut namespaces = Vec::new();
    let mut raw_attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value_with(|name: &str| resolve_entity(entities, name))?
            .into_owned();

        if key == "xmlns" {
            namespaces.push(NamespaceDecl { prefix: None, uri: value });
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            namespaces.push(NamespaceDecl {
                prefix: Some(prefix.to_string()),
                uri: value,
            });
        } else {
            raw_attributes.push((key, value));
        }
    }
    scopes.push(namespaces.clone());

    let (prefix, local) = split_name(&raw_name);
    let name = QualName {
        namespace: lookup_namespace(scopes, prefix.as_deref()),
        prefix,
        local,
    };

    let attributes = raw_attributes
        .into_iter()
        .map(|(key, value)| {
            let (prefix, local) = split_name(&key);
            // 無前綴屬性不屬於任何命名空間
            let namespace = match prefix.as_deref() {
                Some(p) => lookup_namespace(scopes, Some(p)),
                None => None,
            };
            Attribute {
                name: QualName {
                    namespace,
                    prefix,
                    local,
                },
                value,
            }
        })
        .collect();

    let element = NodeKind::Element(Element {
        name,
        namespaces,
        attributes,
        children: Vec::new(),
    });

    match open.last() {
        Some(&parent) => Ok(push_node(nodes, parent, element)),
        None if root.is_none() => {
            let id = NodeId(nodes.len());
            nodes.push(Node {
                parent: None,
                kind: element,
            });
            *root = Some(id);
            Ok(id)
        }
        None => Err(SvgError::Malformed {
            message: format!("unexpected second root element <{}>", raw_name),
        }),
    }
}

fn split_name(raw: &str) -> (Option<String>, String) {
    match raw.split_once(':') {
        Some((prefix, local)) => (Some(prefix.to_string()), local.to_string()),
        None => (None, raw.to_string()),
    }
}

fn lookup_namespace(scopes: &[Vec<NamespaceDecl>], prefix: Option<&str>) -> Option<String> {
    if prefix == Some("xml") {
        return Some(XML_NS.to_string());
    }
    scopes
        .iter()
        .rev()
        .flat_map(|scope| scope.iter().rev())
        .find(|decl| decl.prefix.as_deref() == prefix)
        .map(|decl| decl.uri.clone())
        .filter(|uri| !uri.is_empty())
}

fn resolve_entity<'a>(entities: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    match name {
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "apos" => Some("'"),
        "quot" => Some("\""),
        _ => entities.get(name).map(String::as_str),
    }
}
