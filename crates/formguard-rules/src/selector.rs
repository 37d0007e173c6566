//! Minimal CSS-subset selector matcher.
//!
//! The rule feed uses a small grammar: tag, `#id`, `.class`, `[attr]`,
//! `[attr=value]` compounds joined by descendant (space) and child (`>`)
//! combinators. The snapshot arena is not an HTML parse tree, so a full
//! selector engine does not apply; this matcher covers exactly the grammar
//! the feed emits.

use formguard_core::{DomNode, DomSnapshot, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrCheck {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    universal: bool,
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCheck>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        !self.universal
            && self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
    }

    fn matches(&self, node: &DomNode) -> bool {
        if let Some(tag) = &self.tag {
            if node.tag != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.attributes.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class_attr = node.attributes.class.as_deref().unwrap_or("");
            let classes: Vec<&str> = class_attr.split_whitespace().collect();
            if !self.classes.iter().all(|c| classes.contains(&c.as_str())) {
                return false;
            }
        }
        self.attrs.iter().all(|check| {
            let actual = attribute_value(node, &check.name);
            match (&check.value, actual) {
                (None, Some(_)) => true,
                (Some(expected), Some(actual)) => *expected == actual,
                (_, None) => false,
            }
        })
    }
}

fn attribute_value(node: &DomNode, name: &str) -> Option<String> {
    let attrs = &node.attributes;
    match name {
        "id" => attrs.id.clone(),
        "class" => attrs.class.clone(),
        "name" => attrs.name.clone(),
        "type" => attrs.r#type.clone(),
        "placeholder" => attrs.placeholder.clone(),
        "value" => attrs.value.clone(),
        "autocomplete" => attrs.autocomplete.clone(),
        "role" => attrs.role.clone(),
        "aria-label" => attrs.aria_label.clone(),
        "href" => attrs.href.clone(),
        "action" => attrs.action.clone(),
        "pattern" => attrs.pattern.clone(),
        _ => attrs.data.get(name).cloned(),
    }
}

/// A parsed selector path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// `(combinator, compound)` steps, leftmost first. The first combinator
    /// is meaningless and always `Descendant`.
    steps: Vec<(Combinator, Compound)>,
}

impl Selector {
    /// Parse a selector path; `None` on unsupported or malformed syntax.
    pub fn parse(input: &str) -> Option<Self> {
        let mut steps = Vec::new();
        let mut pending = Combinator::Descendant;
        let mut saw_compound = false;

        for token in tokenize(input)? {
            match token {
                Token::Child => {
                    if !saw_compound {
                        return None;
                    }
                    pending = Combinator::Child;
                    saw_compound = false;
                }
                Token::Compound(text) => {
                    let compound = parse_compound(&text)?;
                    steps.push((pending, compound));
                    pending = Combinator::Descendant;
                    saw_compound = true;
                }
            }
        }

        if steps.is_empty() || !saw_compound {
            return None;
        }
        Some(Self { steps })
    }

    /// Whether `node` matches this selector within `snapshot`.
    pub fn matches(&self, snapshot: &DomSnapshot, node: NodeId) -> bool {
        self.matches_from(snapshot, node, self.steps.len())
    }

    /// Match the first `upto` steps with the rightmost compound on `node`.
    fn matches_from(&self, snapshot: &DomSnapshot, node: NodeId, upto: usize) -> bool {
        let (combinator, compound) = &self.steps[upto - 1];
        let Some(dom_node) = snapshot.get(node) else {
            return false;
        };
        if !compound.matches(dom_node) {
            return false;
        }
        if upto == 1 {
            return true;
        }

        let ancestors = snapshot.ancestors(node);
        match combinator {
            Combinator::Child => ancestors
                .first()
                .is_some_and(|parent| self.matches_from(snapshot, *parent, upto - 1)),
            Combinator::Descendant => ancestors
                .iter()
                .any(|ancestor| self.matches_from(snapshot, *ancestor, upto - 1)),
        }
    }
}

enum Token {
    Compound(String),
    Child,
}

fn tokenize(input: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;

    for ch in input.trim().chars() {
        match ch {
            '[' if !in_brackets => {
                in_brackets = true;
                current.push(ch);
            }
            ']' if in_brackets => {
                in_brackets = false;
                current.push(ch);
            }
            '>' if !in_brackets => {
                if !current.is_empty() {
                    tokens.push(Token::Compound(std::mem::take(&mut current)));
                }
                tokens.push(Token::Child);
            }
            c if c.is_whitespace() && !in_brackets => {
                if !current.is_empty() {
                    tokens.push(Token::Compound(std::mem::take(&mut current)));
                }
            }
            c => current.push(c),
        }
    }

    if in_brackets {
        return None;
    }
    if !current.is_empty() {
        tokens.push(Token::Compound(current));
    }
    Some(tokens)
}

fn parse_compound(input: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut chars = input.chars().peekable();

    // Optional leading tag (or universal `*`).
    let mut tag = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            tag.push(c.to_ascii_lowercase());
            chars.next();
        } else {
            break;
        }
    }
    if !tag.is_empty() {
        compound.tag = Some(tag);
    } else if chars.peek() == Some(&'*') {
        compound.universal = true;
        chars.next();
    }

    while let Some(c) = chars.next() {
        match c {
            '#' => {
                let name = take_identifier(&mut chars);
                if name.is_empty() {
                    return None;
                }
                compound.id = Some(name);
            }
            '.' => {
                let name = take_identifier(&mut chars);
                if name.is_empty() {
                    return None;
                }
                compound.classes.push(name);
            }
            '[' => {
                let mut body = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    body.push(c);
                }
                if !closed || body.is_empty() {
                    return None;
                }
                let (name, value) = match body.split_once('=') {
                    Some((name, value)) => {
                        let value = value.trim_matches(|c| c == '"' || c == '\'');
                        (name.trim().to_string(), Some(value.to_string()))
                    }
                    None => (body.trim().to_string(), None),
                };
                if name.is_empty() {
                    return None;
                }
                compound.attrs.push(AttrCheck { name, value });
            }
            _ => return None,
        }
    }

    if compound.is_empty() {
        return None;
    }
    Some(compound)
}

fn take_identifier(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
            chars.next();
        } else {
            break;
        }
    }
    out
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
