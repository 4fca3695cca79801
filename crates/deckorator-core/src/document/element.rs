//! A minimal typed element tree.
//!
//! Documents are built as `Element` values and serialized in one place, so
//! every text value goes through the same escaping. Parsing produces the same
//! tree shape; attributes, comments and processing instructions are dropped.

use deckorator_types::error::DocumentError;
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;

/// Element content: either text or child elements, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Text(String),
    Children(Vec<Element>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    body: Body,
}

impl Element {
    /// A text element.
    pub fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            body: Body::Text(text.into()),
        }
    }

    /// An element with no content.
    pub fn empty(tag: impl Into<String>) -> Self {
        Self::leaf(tag, String::new())
    }

    pub fn branch(tag: impl Into<String>, children: Vec<Element>) -> Self {
        Self {
            tag: tag.into(),
            body: Body::Children(children),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Text content; `None` for elements that hold children.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            Body::Text(text) => Some(text),
            Body::Children(_) => None,
        }
    }

    pub fn children(&self) -> &[Element] {
        match &self.body {
            Body::Children(children) => children,
            Body::Text(_) => &[],
        }
    }

    /// First child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children().iter().find(|c| c.tag == tag)
    }

    /// Descend through `path`, one child tag per step. An empty path is `self`.
    pub fn find(&self, path: &[&str]) -> Option<&Element> {
        path.iter().try_fold(self, |node, tag| node.child(tag))
    }

    /// Serialize with an XML declaration and two-space indentation.
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        self.write_into(&mut out, 0);
        out
    }

    fn write_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match &self.body {
            Body::Text(text) if text.is_empty() => {
                out.push_str(&format!("{indent}<{}/>\n", self.tag));
            }
            Body::Text(text) => {
                out.push_str(&format!(
                    "{indent}<{tag}>{}</{tag}>\n",
                    escape(text.as_str()),
                    tag = self.tag
                ));
            }
            Body::Children(children) if children.is_empty() => {
                out.push_str(&format!("{indent}<{}/>\n", self.tag));
            }
            Body::Children(children) => {
                out.push_str(&format!("{indent}<{}>\n", self.tag));
                for child in children {
                    child.write_into(out, depth + 1);
                }
                out.push_str(&format!("{indent}</{}>\n", self.tag));
            }
        }
    }

    /// Parse a well-formed document into its root element.
    ///
    /// Text is trimmed. An element holding both text and children keeps only
    /// the children.
    pub fn parse(xml: &str) -> Result<Element, DocumentError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut tree = TreeBuilder::default();
        loop {
            let event = reader.read_event().map_err(|e| {
                DocumentError::Malformed(format!("at byte {}: {e}", reader.buffer_position()))
            })?;
            match event {
                Event::Start(start) => {
                    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                    tree.open(tag)?;
                }
                Event::Empty(start) => {
                    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                    tree.attach(Element::empty(tag))?;
                }
                Event::End(_) => tree.close()?,
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| DocumentError::Malformed(e.to_string()))?;
                    tree.push_text(&text)?;
                }
                Event::CData(data) => {
                    let bytes = data.into_inner();
                    tree.push_text(&String::from_utf8_lossy(&bytes))?;
                }
                Event::Eof => break,
                // Declarations, comments, doctypes and processing instructions.
                _ => {}
            }
        }
        tree.finish()
    }
}

#[derive(Default)]
struct TreeBuilder {
    open: Vec<Frame>,
    root: Option<Element>,
}

struct Frame {
    tag: String,
    text: String,
    children: Vec<Element>,
}

impl TreeBuilder {
    fn open(&mut self, tag: String) -> Result<(), DocumentError> {
        if self.open.is_empty() && self.root.is_some() {
            return Err(DocumentError::Malformed(format!(
                "element <{tag}> after the root element"
            )));
        }
        self.open.push(Frame {
            tag,
            text: String::new(),
            children: Vec::new(),
        });
        Ok(())
    }

    fn close(&mut self) -> Result<(), DocumentError> {
        let frame = self
            .open
            .pop()
            .ok_or_else(|| DocumentError::Malformed("unmatched closing tag".to_string()))?;
        let element = if frame.children.is_empty() {
            Element::leaf(frame.tag, frame.text.trim())
        } else {
            Element::branch(frame.tag, frame.children)
        };
        self.attach(element)
    }

    fn attach(&mut self, element: Element) -> Result<(), DocumentError> {
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(element);
            return Ok(());
        }
        if self.root.is_some() {
            return Err(DocumentError::Malformed(
                "more than one root element".to_string(),
            ));
        }
        self.root = Some(element);
        Ok(())
    }

    fn push_text(&mut self, text: &str) -> Result<(), DocumentError> {
        match self.open.last_mut() {
            Some(frame) => {
                frame.text.push_str(text);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(DocumentError::Malformed(
                "text outside the root element".to_string(),
            )),
        }
    }

    fn finish(self) -> Result<Element, DocumentError> {
        if let Some(frame) = self.open.last() {
            return Err(DocumentError::Malformed(format!(
                "element <{}> is never closed",
                frame.tag
            )));
        }
        self.root
            .ok_or_else(|| DocumentError::Malformed("document has no root element".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::branch(
            "deck_plan_request",
            vec![
                Element::branch(
                    "project_overview",
                    vec![
                        Element::leaf("kind", "basic plan request"),
                        Element::empty("template_version"),
                    ],
                ),
                Element::leaf("notes", "Rails & <posts> \"cedar\""),
            ],
        )
    }

    #[test]
    fn test_serialize_and_parse_back() {
        let xml = sample().to_xml();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<template_version/>"));
        assert!(xml.contains("&amp;"));
        assert!(xml.contains("&lt;posts&gt;"));

        let parsed = Element::parse(&xml).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_find_path() {
        let root = sample();
        assert_eq!(
            root.find(&["project_overview", "kind"]).and_then(Element::text),
            Some("basic plan request")
        );
        assert!(root.find(&["project_overview", "missing"]).is_none());
        assert_eq!(root.find(&[]).map(Element::tag), Some("deck_plan_request"));
    }

    #[test]
    fn test_parse_trims_text_and_reads_cdata() {
        let xml = "<root>\n  <a>  spaced  </a>\n  <b><![CDATA[x < y]]></b>\n</root>";
        let root = Element::parse(xml).unwrap();
        assert_eq!(root.child("a").and_then(Element::text), Some("spaced"));
        assert_eq!(root.child("b").and_then(Element::text), Some("x < y"));
    }

    #[test]
    fn test_parse_ignores_comments() {
        let xml = "<?xml version=\"1.0\"?>\n<!-- generated -->\n<root><a>1</a></root>";
        let root = Element::parse(xml).unwrap();
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_parse_rejects_malformed_documents() {
        assert!(Element::parse("<root><a>1</a>").is_err());
        assert!(Element::parse("<root><a>1</b></root>").is_err());
        assert!(Element::parse("<a/><b/>").is_err());
        assert!(Element::parse("").is_err());
        assert!(Element::parse("just some text").is_err());
    }
}
