//! Arc-linked UI tree node implementing [`Reporter`].

use std::borrow::Cow;
use std::sync::Arc;

use super::{Reporter, identity};

/// Mounted UI entity with an optional structural parent.
///
/// Nodes are immutable once built; a tree is assembled top-down with
/// [`ViewNode::root`] and [`ViewNode::child`].
///
/// ## Example
/// ```rust
/// use interactivity::reporter::{Reporter, ViewNode, component_identity};
///
/// let root = ViewNode::root("<app@view:application-wrapper::ember1>");
/// let page = ViewNode::child(&root, component_identity("app", "page", "ember2"));
/// assert_eq!(page.reporting_name(), "page");
/// assert_eq!(page.parent().map(|p| p.reporting_name().into_owned()).as_deref(), Some("application-wrapper"));
/// ```
#[derive(Debug)]
pub struct ViewNode {
    identity: String,
    name_override: Option<String>,
    parent: Option<Arc<ViewNode>>,
}

impl ViewNode {
    /// Creates a parentless node.
    pub fn root(identity: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            identity: identity.into(),
            name_override: None,
            parent: None,
        })
    }

    /// Creates a node mounted under `parent`.
    pub fn child(parent: &Arc<ViewNode>, identity: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            identity: identity.into(),
            name_override: None,
            parent: Some(Arc::clone(parent)),
        })
    }

    /// Creates a node whose reporting name is fixed instead of derived from its identity.
    pub fn named(
        parent: Option<&Arc<ViewNode>>,
        identity: impl Into<String>,
        reporting_name: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            identity: identity.into(),
            name_override: Some(reporting_name.into()),
            parent: parent.cloned(),
        })
    }
}

impl Reporter for ViewNode {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn parent(&self) -> Option<&dyn Reporter> {
        self.parent.as_deref().map(|p| p as &dyn Reporter)
    }

    fn reporting_name(&self) -> Cow<'_, str> {
        match &self.name_override {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Borrowed(identity::reporting_name(&self.identity)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::{ROOT_REPORTING_NAME, ancestors, component_identity};

    fn chain(depth: usize) -> Arc<ViewNode> {
        let mut node = ViewNode::root(component_identity("app", "n0", "ember0"));
        for i in 1..=depth {
            node = ViewNode::child(&node, component_identity("app", &format!("n{i}"), &format!("ember{i}")));
        }
        node
    }

    #[test]
    fn override_wins_over_identity() {
        let node = ViewNode::named(None, component_identity("app", "interactivity-beacon", "e1"), "beacon:hero");
        assert_eq!(node.reporting_name(), "beacon:hero");
        assert_eq!(node.subscription_id(), "<app@component:interactivity-beacon::e1>");
    }

    #[test]
    fn ancestors_are_nearest_first_and_exclude_self() {
        let leaf = chain(3);
        let names: Vec<String> = ancestors(&*leaf)
            .map(|r| r.reporting_name().into_owned())
            .collect();
        assert_eq!(names, vec!["n2", "n1", "n0"]);
    }

    #[test]
    fn ancestors_stop_after_root_sentinel() {
        let top = ViewNode::root(component_identity("app", "outer", "e0"));
        let wrapper = ViewNode::named(Some(&top), "<app@view:wrapper::e1>", ROOT_REPORTING_NAME);
        let leaf = ViewNode::child(&wrapper, component_identity("app", "leaf", "e2"));

        let names: Vec<String> = ancestors(&*leaf)
            .map(|r| r.reporting_name().into_owned())
            .collect();
        assert_eq!(names, vec![ROOT_REPORTING_NAME.to_string()]);
    }
}
