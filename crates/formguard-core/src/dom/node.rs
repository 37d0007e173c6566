//! Snapshot node, geometry and attributes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::NodeId;

/// Bounding rectangle for an element, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DomRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DomRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Get the center point of this rectangle.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Node attributes extracted from the DOM.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeAttributes {
    /// Element ID attribute.
    pub id: Option<String>,
    /// Element class names.
    pub class: Option<String>,
    /// Name attribute.
    pub name: Option<String>,
    /// Type attribute (inputs and buttons).
    pub r#type: Option<String>,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Current value for inputs.
    pub value: Option<String>,
    /// Autocomplete hint.
    pub autocomplete: Option<String>,
    /// Role attribute (ARIA).
    pub role: Option<String>,
    /// Aria-label.
    pub aria_label: Option<String>,
    /// Href for links.
    pub href: Option<String>,
    /// Action for forms.
    pub action: Option<String>,
    /// Pattern constraint for inputs.
    pub pattern: Option<String>,
    /// Maxlength constraint for inputs, when present.
    pub maxlength: Option<u32>,
    /// Whether the element carries the `disabled` attribute.
    pub disabled: bool,
    /// Whether the element carries the `aria-hidden="true"` attribute.
    pub aria_hidden: bool,
    /// Remaining attributes (data-*, vendor attributes).
    pub data: HashMap<String, String>,
}

/// One element in a [`super::DomSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DomNode {
    /// Stable host-assigned id.
    pub id: NodeId,
    /// Tag name, lowercase.
    pub tag: String,
    #[serde(default)]
    pub attributes: NodeAttributes,
    /// Direct text content (not from children).
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rect: DomRect,
    /// Parent node, `None` for document and shadow roots.
    #[serde(default)]
    pub parent: Option<NodeId>,
    /// Child nodes in DOM order. Recomputed by the builder from parent links.
    #[serde(default)]
    pub children: Vec<NodeId>,
    /// For a shadow root, the host element it is attached to.
    #[serde(default)]
    pub shadow_host: Option<NodeId>,
    /// Whether the host computed the element as rendered (not `display:none`
    /// or `visibility:hidden`). Geometry checks still apply on top.
    #[serde(default = "default_rendered")]
    pub rendered: bool,
}

fn default_rendered() -> bool {
    true
}

impl DomNode {
    pub fn new(id: NodeId, tag: &str) -> Self {
        Self {
            id,
            tag: tag.to_ascii_lowercase(),
            attributes: NodeAttributes::default(),
            text: String::new(),
            rect: DomRect::default(),
            parent: None,
            children: Vec::new(),
            shadow_host: None,
            rendered: true,
        }
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_shadow_host(mut self, host: NodeId) -> Self {
        self.shadow_host = Some(host);
        self
    }

    pub fn with_rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.rect = DomRect::new(x, y, width, height);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.rendered = false;
        self
    }

    /// Set a named attribute, mapping known names onto typed fields and the
    /// rest into the data bag.
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        let attrs = &mut self.attributes;
        match key {
            "id" => attrs.id = Some(value.to_string()),
            "class" => attrs.class = Some(value.to_string()),
            "name" => attrs.name = Some(value.to_string()),
            "type" => attrs.r#type = Some(value.to_ascii_lowercase()),
            "placeholder" => attrs.placeholder = Some(value.to_string()),
            "value" => attrs.value = Some(value.to_string()),
            "autocomplete" => attrs.autocomplete = Some(value.to_ascii_lowercase()),
            "role" => attrs.role = Some(value.to_string()),
            "aria-label" => attrs.aria_label = Some(value.to_string()),
            "href" => attrs.href = Some(value.to_string()),
            "action" => attrs.action = Some(value.to_string()),
            "pattern" => attrs.pattern = Some(value.to_string()),
            "maxlength" => attrs.maxlength = value.parse().ok(),
            "disabled" => attrs.disabled = true,
            "aria-hidden" => attrs.aria_hidden = value == "true",
            _ => {
                attrs.data.insert(key.to_string(), value.to_string());
            }
        }
        self
    }

    /// Whether this is a `<form>` element.
    pub fn is_form(&self) -> bool {
        self.tag == "form"
    }

    /// Whether this element can carry a classifiable field.
    pub fn is_input(&self) -> bool {
        self.tag == "input"
    }

    /// Normalized input type; inputs with no explicit type default to text.
    pub fn input_type(&self) -> &str {
        if !self.is_input() {
            return "";
        }
        self.attributes.r#type.as_deref().unwrap_or("text")
    }

    /// Whether this element acts as a button.
    pub fn is_button(&self) -> bool {
        self.tag == "button"
            || (self.is_input() && matches!(self.input_type(), "submit" | "button" | "image"))
            || self.attributes.role.as_deref() == Some("button")
    }
}
