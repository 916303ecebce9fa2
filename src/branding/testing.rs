// In-memory DOM with shadow roots for exercising the suppression routine.
use super::{has_inline_style, BrandingDom, HTML_NAMESPACE};
use crate::error::BrandingError;
use std::cell::{Cell, RefCell};

const DOCUMENT: usize = 0;

#[derive(Default)]
struct FakeNode {
    tag: String,
    namespace: String,
    attrs: Vec<(String, String)>,
    children: Vec<usize>,
    shadow: Option<usize>,
    restricted: bool,
    inline: Vec<(String, String)>,
}

impl FakeNode {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Arena of nodes. Node 0 is the document; shadow roots are nodes reachable only
/// through their host's `shadow` link.
pub struct FakeDom {
    nodes: RefCell<Vec<FakeNode>>,
    has_support: bool,
    mutations: Cell<usize>,
    queries: Cell<usize>,
}

impl FakeDom {
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![FakeNode {
                tag: "#document".to_string(),
                ..FakeNode::default()
            }]),
            has_support: true,
            mutations: Cell::new(0),
            queries: Cell::new(0),
        }
    }

    pub fn without_has_support() -> Self {
        Self {
            has_support: false,
            ..Self::new()
        }
    }

    pub fn add_document_node(&self, tag: &str, attrs: &[(&str, &str)]) -> usize {
        self.add_child(DOCUMENT, tag, attrs)
    }

    pub fn add_child(&self, parent: usize, tag: &str, attrs: &[(&str, &str)]) -> usize {
        self.add_child_ns(parent, HTML_NAMESPACE, tag, attrs)
    }

    pub fn add_child_ns(
        &self,
        parent: usize,
        namespace: &str,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> usize {
        let mut nodes = self.nodes.borrow_mut();
        let id = nodes.len();
        nodes.push(FakeNode {
            tag: tag.to_string(),
            namespace: namespace.to_string(),
            attrs: attrs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            ..FakeNode::default()
        });
        nodes[parent].children.push(id);
        id
    }

    pub fn attach_shadow(&self, host: usize) -> usize {
        let mut nodes = self.nodes.borrow_mut();
        let id = nodes.len();
        nodes.push(FakeNode {
            tag: "#shadow-root".to_string(),
            ..FakeNode::default()
        });
        nodes[host].shadow = Some(id);
        id
    }

    pub fn restrict(&self, host: usize) {
        self.nodes.borrow_mut()[host].restricted = true;
    }

    /// Drop every child of a shadow root, as a widget re-render would.
    pub fn clear_shadow(&self, root: usize) {
        self.nodes.borrow_mut()[root].children.clear();
    }

    pub fn inline_style(&self, node: usize, property: &str) -> Option<String> {
        self.nodes.borrow()[node]
            .inline
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value.clone())
    }

    pub fn hidden_nodes(&self) -> Vec<usize> {
        (0..self.nodes.borrow().len())
            .filter(|&id| self.inline_style(id, "display").as_deref() == Some("none"))
            .collect()
    }

    pub fn style_count(&self, root: usize) -> usize {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.nodes.borrow()[id].tag == "style")
            .count()
    }

    pub fn mutations(&self) -> usize {
        self.mutations.get()
    }

    pub fn queries(&self) -> usize {
        self.queries.get()
    }

    fn descendants(&self, id: usize) -> Vec<usize> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<usize> = nodes[id].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(nodes[next].children.iter().rev().copied());
        }
        out
    }

    fn select(&self, scope: usize, selector: &str) -> Result<Vec<usize>, BrandingError> {
        self.queries.set(self.queries.get() + 1);
        if !self.has_support && selector.contains(":has(") {
            return Err(BrandingError::Query {
                selector: selector.to_string(),
                reason: "unsupported pseudo-class".to_string(),
            });
        }
        let parts: Vec<&str> = selector.split(',').map(str::trim).collect();
        Ok(self
            .descendants(scope)
            .into_iter()
            .filter(|&id| parts.iter().any(|part| self.matches(id, part)))
            .collect())
    }

    /// Supports `tag`, `tag[attr]`, `tag[attr*="value"]` and `div:has(<simple>)`.
    fn matches(&self, id: usize, selector: &str) -> bool {
        if let Some(inner) = selector
            .strip_prefix("div:has(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return self.nodes.borrow()[id].tag == "div"
                && self
                    .descendants(id)
                    .into_iter()
                    .any(|child| self.matches(child, inner));
        }

        let nodes = self.nodes.borrow();
        let node = &nodes[id];
        let (tag, attr) = match selector.find('[') {
            Some(idx) => (&selector[..idx], Some(&selector[idx..])),
            None => (selector, None),
        };
        if !tag.is_empty() && node.tag != tag {
            return false;
        }
        let Some(attr) = attr else {
            return true;
        };
        let body = attr.trim_start_matches('[').trim_end_matches(']');
        match body.split_once("*=") {
            Some((name, value)) => node
                .attr(name)
                .is_some_and(|actual| actual.contains(value.trim_matches('"'))),
            None => node.attr(body).is_some(),
        }
    }
}

impl BrandingDom for FakeDom {
    type Node = usize;
    type Root = usize;

    fn query_all(&self, selector: &str) -> Result<Vec<usize>, BrandingError> {
        self.select(DOCUMENT, selector)
    }

    fn shadow_root(&self, host: &usize) -> Result<Option<usize>, BrandingError> {
        let nodes = self.nodes.borrow();
        let node = &nodes[*host];
        if node.restricted {
            return Err(BrandingError::AccessRestricted {
                reason: format!("<{}> is cross-origin", node.tag),
            });
        }
        Ok(node.shadow)
    }

    fn query_root(&self, root: &usize, selector: &str) -> Result<Vec<usize>, BrandingError> {
        self.select(*root, selector)
    }

    fn append_style(&self, root: &usize, marker: &str, css: &str) -> Result<(), BrandingError> {
        self.add_child(*root, "style", &[(marker, ""), ("data-css", css)]);
        self.mutations.set(self.mutations.get() + 1);
        Ok(())
    }

    fn hide(&self, node: &usize, declarations: &[(&str, &str)]) -> Result<(), BrandingError> {
        let mut nodes = self.nodes.borrow_mut();
        let target = &mut nodes[*node];
        if !has_inline_style(Some(target.namespace.as_str())) {
            return Err(BrandingError::Mutation {
                reason: format!("<{}> has no inline style", target.tag),
            });
        }
        let inline = &mut target.inline;
        for (property, value) in declarations {
            match inline.iter_mut().find(|(key, _)| key == property) {
                Some(entry) => entry.1 = value.to_string(),
                None => inline.push((property.to_string(), value.to_string())),
            }
        }
        self.mutations.set(self.mutations.get() + 1);
        Ok(())
    }
}
