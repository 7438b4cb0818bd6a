use super::document::{Document, NodeId, NodeKind};
use super::error::Result;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    pub xml_declaration: bool,
}

enum Step {
    Enter(NodeId),
    Leave(NodeId),
}

/// Serialize the reachable tree without indentation.
///
/// The root is always written with an explicit end tag.
pub fn write_document(doc: &Document, options: WriteOptions) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    if options.xml_declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    }

    // 顯式堆疊，避免深層巢狀時遞迴過深
    let mut stack = vec![Step::Enter(doc.root())];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id) => match &doc.node(id).kind {
                NodeKind::Element(el) => {
                    let mut start = BytesStart::new(el.name.qualified());
                    for decl in &el.namespaces {
                        let key = match &decl.prefix {
                            Some(prefix) => format!("xmlns:{}", prefix),
                            None => "xmlns".to_string(),
                        };
                        start.push_attribute((key.as_str(), decl.uri.as_str()));
                    }
                    for attr in &el.attributes {
                        let key = attr.name.qualified();
                        start.push_attribute((key.as_str(), attr.value.as_str()));
                    }

                    // 根元素永遠寫出結束標籤，下游依賴 `</svg>` 結尾
                    if el.children.is_empty() && id != doc.root() {
                        writer.write_event(Event::Empty(start))?;
                    } else {
                        writer.write_event(Event::Start(start))?;
                        stack.push(Step::Leave(id));
                        stack.extend(el.children.iter().rev().map(|&child| Step::Enter(child)));
                    }
                }
                NodeKind::Text(text) => {
                    writer.write_event(Event::Text(BytesText::new(text)))?;
                }
                NodeKind::CData(text) => {
                    writer.write_event(Event::CData(BytesCData::new(text.as_str())))?;
                }
                NodeKind::Comment(text) => {
                    writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?;
                }
            },
            Step::Leave(id) => {
                if let Some(el) = doc.element(id) {
                    writer.write_event(Event::End(BytesEnd::new(el.name.qualified())))?;
                }
            }
        }
    }

    Ok(writer.into_inner())
}
