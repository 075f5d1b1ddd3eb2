use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node in a declarative view tree.
///
/// The framework never renders or diffs nodes; it only hands whatever the view
/// function returns to hooks. `UiNode` is a convenient value for views to return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiNode {
    pub tag: String,
    pub props: Vec<(String, Value)>,
    pub children: Vec<UiNode>,
}

impl UiNode {
    pub fn new(tag: impl Into<String>) -> Self {
        UiNode {
            tag: tag.into(),
            props: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.props.push((key.into(), value));
        self
    }

    pub fn with_child(mut self, child: UiNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Concatenated text of every text node in the tree, depth first.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if self.tag == "text" {
            match self.prop("value") {
                Some(Value::String(s)) => out.push_str(s),
                Some(other) => out.push_str(&other.to_string()),
                None => {}
            }
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// Build an element node. `props` is a JSON object; anything else means no props.
pub fn h(tag: impl Into<String>, props: Value, children: impl IntoIterator<Item = UiNode>) -> UiNode {
    let props = match props {
        Value::Object(map) => map.into_iter().collect(),
        _ => Vec::new(),
    };
    UiNode {
        tag: tag.into(),
        props,
        children: children.into_iter().collect(),
    }
}

/// A text leaf. Numbers and booleans are kept as their JSON value.
pub fn text(value: impl Into<Value>) -> UiNode {
    UiNode::new("text").with_prop("value", value.into())
}
