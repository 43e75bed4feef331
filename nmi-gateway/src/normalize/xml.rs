//! XML to JSON tree conversion.
//!
//! Attributes are ignored and text is trimmed. An element with children
//! becomes an object, an element with only text becomes a string, an empty
//! element becomes `""`, and repeated siblings collapse into an array.

use quick_xml::{Reader, events::Event};
use serde_json::{Map, Value};

struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn new(name: String) -> Self {
        Self { name, children: Map::new(), text: String::new() }
    }

    fn into_entry(self) -> (String, Value) {
        let value = if self.children.is_empty() {
            Value::String(self.text.trim().to_owned())
        } else {
            Value::Object(self.children)
        };
        (self.name, value)
    }
}

fn insert_child(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(name, value);
        }
    }
}

fn element_name(raw: &[u8]) -> Result<String, String> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|e| format!("element name is not UTF-8: {e}"))
}

/// Parses `xml` into a JSON object keyed by the root element name.
pub(crate) fn parse(xml: &str) -> Result<Value, String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut stack = vec![Frame::new(String::new())];

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("malformed XML at byte {}: {e}", reader.buffer_position()))?;

        match event {
            Event::Start(start) => {
                stack.push(Frame::new(element_name(start.name().as_ref())?));
            }
            Event::Empty(empty) => {
                let name = element_name(empty.name().as_ref())?;
                if let Some(parent) = stack.last_mut() {
                    insert_child(&mut parent.children, name, Value::String(String::new()));
                }
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| format!("bad XML text: {e}"))?;
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&bytes));
                }
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or("unbalanced closing tag")?;
                let parent = stack.last_mut().ok_or("unbalanced closing tag")?;
                let (name, value) = frame.into_entry();
                insert_child(&mut parent.children, name, value);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match stack.pop() {
        Some(root) if stack.is_empty() => Ok(Value::Object(root.children)),
        _ => Err("unexpected end of XML: unclosed element".to_owned()),
    }
}
