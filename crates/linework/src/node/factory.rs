//! Node construction and validation.

use indexmap::IndexMap;
use log::{debug, trace, warn};

use linework_core::{
    geometry::Point,
    identifier::{Id, IdGenerator, SequentialIds},
    model::{NodeData, NodeDraft},
};

use super::{BuiltinNodeType, Node, NodeConstructor, NodeDefaults, NodeTypeInfo};
use crate::error::LineworkError;

/// Prefix of generated node ids.
const NODE_ID_PREFIX: &str = "node";

/// Outcome of [`NodeFactory::validate_node_data`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    /// Returns true when no errors were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable descriptions of every problem found.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

/// Builds nodes from partial data using a registry of node types.
///
/// The registry starts with every [`BuiltinNodeType`]; more types can be
/// added with [`register_node_type`](Self::register_node_type). Fresh ids
/// come from the injected [`IdGenerator`].
///
/// # Examples
///
/// ```
/// use linework::node::NodeFactory;
/// use linework_core::{geometry::{Point, Size}, model::NodeDraft};
///
/// let mut factory = NodeFactory::new();
/// let node = factory
///     .create_node("process", NodeDraft::new().with_position(Point::new(10.0, 20.0)))
///     .unwrap();
///
/// assert_eq!(node.id(), "node_1");
/// assert_eq!(node.size(), Size::new(120.0, 60.0));
/// assert_eq!(node.label(), "Process");
/// ```
pub struct NodeFactory<G = SequentialIds> {
    registry: IndexMap<Id, Box<dyn NodeConstructor>>,
    ids: G,
}

impl NodeFactory<SequentialIds> {
    /// Creates a factory with the built-in types and a sequential id generator.
    pub fn new() -> Self {
        Self::with_id_generator(SequentialIds::default())
    }
}

impl Default for NodeFactory<SequentialIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> NodeFactory<G> {
    /// Creates a factory with the built-in types and the given id generator.
    pub fn with_id_generator(ids: G) -> Self {
        let mut factory = Self {
            registry: IndexMap::new(),
            ids,
        };
        for node_type in BuiltinNodeType::ALL {
            factory.register_node_type(node_type.key(), *node_type);
        }
        factory
    }

    /// Adds a node type to the registry, replacing any previous entry for the same key.
    pub fn register_node_type(
        &mut self,
        node_type: impl Into<Id>,
        constructor: impl NodeConstructor + 'static,
    ) {
        let node_type = node_type.into();
        debug!(node_type:%; "Registering node type");
        self.registry.insert(node_type, Box::new(constructor));
    }

    /// Returns true if `node_type` has a registry entry.
    pub fn is_registered(&self, node_type: impl Into<Id>) -> bool {
        self.registry.contains_key(&node_type.into())
    }

    /// Registered type keys, in registration order.
    pub fn registered_types(&self) -> impl Iterator<Item = Id> + '_ {
        self.registry.keys().copied()
    }

    /// Creates a node of `node_type`, completing `draft` from the type defaults.
    ///
    /// A missing id is generated; missing position defaults to the origin;
    /// missing size, label and style come from the type. The type given
    /// here takes precedence over any type in the draft.
    ///
    /// # Errors
    ///
    /// Returns [`LineworkError::UnsupportedNodeType`] if `node_type` is not
    /// registered.
    pub fn create_node(
        &mut self,
        node_type: impl Into<Id>,
        draft: NodeDraft,
    ) -> Result<Node, LineworkError> {
        let node_type = node_type.into();
        let constructor = self
            .registry
            .get(&node_type)
            .ok_or(LineworkError::UnsupportedNodeType(node_type))?;

        let defaults = constructor.defaults();
        let id = match draft.id {
            Some(id) => id,
            None => self.ids.next_id(NODE_ID_PREFIX),
        };

        let data = NodeData {
            id,
            node_type,
            position: draft.position.unwrap_or(Point::new(0.0, 0.0)),
            size: draft.size.unwrap_or(defaults.size()),
            label: draft.label.unwrap_or_else(|| defaults.label().to_string()),
            style: draft.style.unwrap_or_else(|| defaults.style().clone()),
            properties: draft.properties,
        };

        trace!(node_id:% = id, node_type:%; "Creating node");
        Ok(constructor.construct(data))
    }

    /// Returns the defaults of `node_type`, or [`NodeDefaults::generic`] for unknown types.
    pub fn get_default_node_config(&self, node_type: impl Into<Id>) -> NodeDefaults {
        self.registry
            .get(&node_type.into())
            .map(|constructor| constructor.defaults())
            .unwrap_or_else(NodeDefaults::generic)
    }

    /// Creates every well-formed draft, skipping the rest.
    ///
    /// Drafts missing their type, position or label, or naming an
    /// unregistered type, are logged and skipped; the remaining drafts still
    /// produce nodes, in input order.
    pub fn create_nodes(&mut self, drafts: impl IntoIterator<Item = NodeDraft>) -> Vec<Node> {
        let mut nodes = Vec::new();
        for (index, draft) in drafts.into_iter().enumerate() {
            let errors = self.collect_errors(&draft, false);
            if !errors.is_empty() {
                warn!(index, reasons:? = errors; "Skipping malformed node data");
                continue;
            }
            let Some(node_type) = draft.node_type else {
                continue;
            };
            match self.create_node(node_type, draft) {
                Ok(node) => nodes.push(node),
                Err(err) => warn!(index, err:%; "Skipping node"),
            }
        }
        debug!(created = nodes.len(); "Batch node creation finished");
        nodes
    }

    /// Deep-copies `node` under a freshly generated id.
    pub fn clone_node(&mut self, node: &Node) -> Node {
        let mut data = node.data().clone();
        data.id = self.ids.next_id(NODE_ID_PREFIX);
        trace!(source:% = node.id(), clone:% = data.id; "Cloning node");
        Node::new(data, node.shape())
    }

    /// Checks that `draft` carries an id, type, position and label, and
    /// that its type is registered. Never fails; problems are reported in
    /// the result.
    pub fn validate_node_data(&self, draft: &NodeDraft) -> ValidationResult {
        ValidationResult {
            errors: self.collect_errors(draft, true),
        }
    }

    /// Palette metadata of `node_type`, if registered.
    pub fn node_type_info(&self, node_type: impl Into<Id>) -> Option<NodeTypeInfo> {
        self.registry
            .get(&node_type.into())
            .map(|constructor| constructor.info())
    }

    /// Palette metadata of every registered type, in registration order.
    pub fn all_node_type_info(&self) -> Vec<(Id, NodeTypeInfo)> {
        self.registry
            .iter()
            .map(|(key, constructor)| (*key, constructor.info()))
            .collect()
    }

    fn collect_errors(&self, draft: &NodeDraft, require_id: bool) -> Vec<String> {
        let mut errors = Vec::new();
        if require_id && draft.id.is_none() {
            errors.push("missing id".to_string());
        }
        match draft.node_type {
            None => errors.push("missing type".to_string()),
            Some(node_type) if !self.registry.contains_key(&node_type) => {
                errors.push(format!("unsupported node type `{node_type}`"));
            }
            Some(_) => {}
        }
        if draft.position.is_none() {
            errors.push("missing position".to_string());
        }
        if draft.label.is_none() {
            errors.push("missing label".to_string());
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use linework_core::{
        geometry::Size,
        model::{NodeDraft, PropertyValue},
        style::Style,
    };

    use super::*;
    use crate::node::NodeShape;

    struct Sticky;

    impl NodeConstructor for Sticky {
        fn defaults(&self) -> NodeDefaults {
            NodeDefaults::new(
                Size::new(80.0, 80.0),
                "Note",
                Style::default(),
                NodeShape::Rectangle,
            )
        }

        fn info(&self) -> NodeTypeInfo {
            NodeTypeInfo::new("Sticky", "A sticky note", "annotation", "sticky-note")
        }
    }

    fn draft(label: &str) -> NodeDraft {
        NodeDraft::new()
            .with_type("process")
            .with_position(Point::new(0.0, 0.0))
            .with_label(label)
    }

    #[test]
    fn test_create_node_fills_defaults() {
        let mut factory = NodeFactory::new();
        let node = factory
            .create_node("process", NodeDraft::new().with_position(Point::new(10.0, 20.0)))
            .unwrap();

        assert_eq!(node.id(), "node_1");
        assert_eq!(node.node_type(), "process");
        assert_eq!(node.position(), Point::new(10.0, 20.0));
        assert_eq!(node.size(), Size::new(120.0, 60.0));
        assert_eq!(node.label(), "Process");
        assert_eq!(node.style(), factory.get_default_node_config("process").style());
    }

    #[test]
    fn test_create_node_keeps_given_fields() {
        let mut factory = NodeFactory::new();
        let node = factory
            .create_node(
                "decision",
                NodeDraft::new()
                    .with_id("d1")
                    .with_label("Approved?")
                    .with_size(Size::new(10.0, 10.0))
                    .with_property("priority", 2.0),
            )
            .unwrap();

        assert_eq!(node.id(), "d1");
        assert_eq!(node.label(), "Approved?");
        assert_eq!(node.size(), Size::new(10.0, 10.0));
        assert_eq!(node.shape(), NodeShape::Diamond);
        assert_eq!(node.properties()["priority"], PropertyValue::Number(2.0));
    }

    #[test]
    fn test_create_node_unknown_type_fails() {
        let mut factory = NodeFactory::new();
        let err = factory.create_node("teleporter", NodeDraft::new()).unwrap_err();
        assert!(matches!(err, LineworkError::UnsupportedNodeType(t) if t == "teleporter"));
    }

    #[test]
    fn test_register_node_type() {
        let mut factory = NodeFactory::new();
        assert!(!factory.is_registered("sticky"));

        factory.register_node_type("sticky", Sticky);
        assert!(factory.registered_types().any(|t| t == "sticky"));
        let node = factory.create_node("sticky", NodeDraft::new()).unwrap();

        assert_eq!(node.label(), "Note");
        assert_eq!(node.size(), Size::new(80.0, 80.0));
        assert_eq!(factory.node_type_info("sticky").unwrap().category(), "annotation");
    }

    #[test]
    fn test_unknown_type_defaults_fall_back() {
        let factory = NodeFactory::new();
        assert_eq!(factory.get_default_node_config("mystery"), NodeDefaults::generic());
    }

    #[test]
    fn test_create_nodes_skips_malformed_entries() {
        let mut factory = NodeFactory::new();
        let drafts = vec![
            draft("first"),
            NodeDraft::new().with_type("process").with_label("no position"),
            draft("third"),
            NodeDraft::new()
                .with_type("warp-drive")
                .with_position(Point::new(0.0, 0.0))
                .with_label("unknown"),
            NodeDraft::new().with_position(Point::new(0.0, 0.0)),
        ];

        let nodes = factory.create_nodes(drafts);
        let labels: Vec<&str> = nodes.iter().map(|n| n.label()).collect();
        assert_eq!(labels, ["first", "third"]);
    }

    #[test]
    fn test_clone_node_assigns_fresh_id() {
        let mut factory = NodeFactory::new();
        let node = factory.create_node("approval", draft("Sign off")).unwrap();
        let clone = factory.clone_node(&node);

        assert_ne!(clone.id(), node.id());
        assert_eq!(clone.node_type(), node.node_type());

        let mut expected = node.data().clone();
        expected.id = clone.id();
        assert_eq!(clone.data(), &expected);
    }

    #[test]
    fn test_validate_node_data() {
        let factory = NodeFactory::new();

        let result = factory.validate_node_data(&draft("ok").with_id("n1"));
        assert!(result.is_valid());

        let result = factory.validate_node_data(&NodeDraft::new());
        assert!(!result.is_valid());
        assert_eq!(
            result.errors(),
            ["missing id", "missing type", "missing position", "missing label"]
        );

        let result = factory.validate_node_data(&draft("x").with_id("n1").with_type("nope"));
        assert_eq!(result.errors(), ["unsupported node type `nope`"]);
    }

    #[test]
    fn test_all_node_type_info_lists_builtins_in_order() {
        let factory = NodeFactory::new();
        let info = factory.all_node_type_info();

        assert_eq!(info.len(), BuiltinNodeType::ALL.len());
        assert_eq!(info[0].0, "start");
        assert_eq!(info[0].1.icon(), "play");
    }
}
