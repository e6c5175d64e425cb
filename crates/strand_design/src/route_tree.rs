//! Physical route trees.
//!
//! A [`RouteTree`] describes the wires one net occupies within a single
//! routing domain: either the inside of a site or the general routing fabric
//! between sites. Nodes live in an arena and are addressed by
//! [`RouteNodeId`]; node 0 is the root. Each node records the wire it
//! occupies, how it is connected to its parent, its downstream branches, and
//! for leaves the site pin or bel pin it terminates on.

use crate::ids::RouteNodeId;
use serde::{Deserialize, Serialize};
use strand_device::{BelPinRef, SitePinRef, WireId};

/// How a route node is connected to its parent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connection {
    /// A programmable interconnect point (configurable switch).
    Pip,
    /// A logic element used purely as a pass-through.
    RouteThrough,
    /// A fixed, non-switched continuation of the parent wire.
    #[default]
    NonProgrammable,
}

impl Connection {
    /// Returns whether this connection is a PIP.
    pub fn is_pip(self) -> bool {
        self == Connection::Pip
    }

    /// Returns whether this connection is a route-through.
    pub fn is_route_through(self) -> bool {
        self == Connection::RouteThrough
    }

    /// Returns whether the connection starts a new hop (PIP or route-through).
    pub fn is_hop(self) -> bool {
        self.is_pip() || self.is_route_through()
    }
}

/// One wire segment in a route tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteNode {
    /// The wire this segment occupies.
    pub wire: WireId,
    /// The connection from the parent segment. Ignored on the root.
    #[serde(default)]
    pub connection: Connection,
    /// Downstream segments; more than one marks a branch in the wire.
    #[serde(default)]
    pub children: Vec<RouteNodeId>,
    /// The site pin this leaf terminates on.
    #[serde(default)]
    pub site_pin: Option<SitePinRef>,
    /// The bel pin this leaf terminates on.
    #[serde(default)]
    pub bel_pin: Option<BelPinRef>,
}

impl RouteNode {
    fn new(wire: WireId, connection: Connection) -> Self {
        Self {
            wire,
            connection,
            children: Vec::new(),
            site_pin: None,
            bel_pin: None,
        }
    }

    /// Returns whether this node has no downstream segments.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// The routing of a net within one domain, rooted at its entry wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteTree {
    /// The node arena. Node 0 is the root.
    pub nodes: Vec<RouteNode>,
}

impl RouteTree {
    /// Creates a tree holding only a root segment on `wire`.
    pub fn new(wire: WireId) -> Self {
        Self {
            nodes: vec![RouteNode::new(wire, Connection::NonProgrammable)],
        }
    }

    /// Returns the ID of the root node.
    pub fn root(&self) -> RouteNodeId {
        RouteNodeId::from_raw(0)
    }

    /// Returns the wire at the root of the tree.
    pub fn root_wire(&self) -> WireId {
        self.nodes[0].wire
    }

    /// Returns the node with the given ID.
    pub fn node(&self, id: RouteNodeId) -> &RouteNode {
        &self.nodes[id.index()]
    }

    /// Returns the node with the given ID, if it exists.
    pub fn get_node(&self, id: RouteNodeId) -> Option<&RouteNode> {
        self.nodes.get(id.index())
    }

    /// Returns the downstream segments of a node.
    pub fn children(&self, id: RouteNodeId) -> &[RouteNodeId] {
        &self.node(id).children
    }

    /// Returns whether a node has no downstream segments.
    pub fn is_leaf(&self, id: RouteNodeId) -> bool {
        self.node(id).is_leaf()
    }

    /// Appends a segment below `parent` and returns its ID.
    pub fn add_child(
        &mut self,
        parent: RouteNodeId,
        wire: WireId,
        connection: Connection,
    ) -> RouteNodeId {
        let id = RouteNodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(RouteNode::new(wire, connection));
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Marks a node as terminating on a site pin.
    pub fn connect_site_pin(&mut self, node: RouteNodeId, pin: SitePinRef) {
        self.nodes[node.index()].site_pin = Some(pin);
    }

    /// Marks a node as terminating on a bel pin.
    pub fn connect_bel_pin(&mut self, node: RouteNodeId, pin: BelPinRef) {
        self.nodes[node.index()].bel_pin = Some(pin);
    }

    /// Returns the number of segments in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of segments on the longest root-to-leaf path.
    ///
    /// The tree must be acyclic; checkpoints are validated for this on load.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root(), 1)];
        while let Some((id, depth)) = stack.pop() {
            max = max.max(depth);
            for &child in self.children(id) {
                stack.push((child, depth + 1));
            }
        }
        max
    }

    /// Returns the number of segments where the wire branches.
    pub fn branch_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.children.len() > 1).count()
    }

    /// Returns every wire used by the tree, in arena order.
    pub fn wires_used(&self) -> Vec<WireId> {
        self.nodes.iter().map(|n| n.wire).collect()
    }

    /// Returns the site pins the leaves of this tree terminate on.
    pub fn site_pin_leaves(&self) -> Vec<SitePinRef> {
        self.nodes
            .iter()
            .filter(|n| n.is_leaf())
            .filter_map(|n| n.site_pin)
            .collect()
    }
}
