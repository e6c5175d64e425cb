//! Route trace rendering.
//!
//! A trace follows a net's physical route from the head of a route tree to
//! every sink, crossing between the inside of sites and the general routing
//! fabric at site pins, and renders it as a single string:
//!
//! ```text
//! <head>SLICE_X0Y10/AQ SitePin{SLICE_X0Y10.AQ} <<entering general routing fabric>> <head>CLBLL_L_X2Y10/CLBLL_L_AQ=LOGIC_OUTS_L4 ...
//! ```
//!
//! Programmable hops print the full wire name, fixed continuations print
//! `=` and the short name, and a fork in the wire prints one parenthesized,
//! indented group per branch.

use std::collections::{HashMap, HashSet};
use std::ptr;

use strand_config::TraceConfig;
use strand_design::{Net, RouteNode, RouteNodeId, RouteTree};
use strand_device::{Device, SitePinRef, WireId};

/// The routing domain a trace is currently walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Wires inside a site's internal fabric.
    InsideSite,
    /// The general routing fabric between sites.
    OutsideSite,
}

impl Domain {
    /// Returns the domain on the far side of a site pin.
    pub fn cross_site_pin(self) -> Self {
        match self {
            Domain::InsideSite => Domain::OutsideSite,
            Domain::OutsideSite => Domain::InsideSite,
        }
    }
}

/// Errors detected while tracing a route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    /// A route node was reached again from below itself.
    #[error("net '{net}': route node {node} loops back onto its own path")]
    Cycle {
        /// The net being traced.
        net: String,
        /// The node that was revisited.
        node: RouteNodeId,
    },

    /// A child index points outside its tree.
    #[error("net '{net}': route node {node} does not exist")]
    MissingNode {
        /// The net being traced.
        net: String,
        /// The dangling node index.
        node: RouteNodeId,
    },

    /// The net has several inter-site trees and some of them start on a
    /// wire that no site pin of the net leads out onto, so a trace from the
    /// source cannot reach them.
    #[error(
        "net '{net}': {unreached} of {trees} inter-site route trees are not entered through any site pin"
    )]
    UnsupportedTopology {
        /// The net being traced.
        net: String,
        /// Number of inter-site trees on the net.
        trees: usize,
        /// Number of inter-site trees no site pin exit leads into.
        unreached: usize,
    },
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceOptions {
    /// Spaces added per branch level.
    pub indent: usize,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self { indent: 3 }
    }
}

impl From<&TraceConfig> for TraceOptions {
    fn from(config: &TraceConfig) -> Self {
        Self {
            indent: config.indent,
        }
    }
}

/// A rendered route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTrace {
    /// The rendered route.
    pub text: String,
    /// The longest chain of segments followed, across domain crossings.
    pub depth: usize,
    /// The number of forks rendered.
    pub branches: usize,
}

impl RouteTrace {
    fn append(&mut self, other: RouteTrace) {
        self.text.push_str(&other.text);
        self.depth = self.depth.max(other.depth);
        self.branches += other.branches;
    }
}

/// Names one route tree of the traced net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TreeRef {
    /// A tree handed to [`RouteTraceFormatter::format`] that the net does not own.
    Detached,
    Source,
    Intersite(usize),
    Sink(usize),
}

/// Pending work on the explicit traversal stack.
enum Work<'t> {
    Visit {
        tree: &'t RouteTree,
        tree_ref: TreeRef,
        node: RouteNodeId,
        head: bool,
        domain: Domain,
        level: usize,
    },
    Text(String),
    Leave(PathKey),
}

/// Identifies one node of one tree on the active path.
type PathKey = (TreeRef, RouteNodeId);

/// Renders route trees of one net.
///
/// The inter-site trees of the net are indexed by root wire once, on
/// construction. The device must be the one the net's trees were built
/// against; wire and pin lookups assume it.
pub struct RouteTraceFormatter<'a> {
    device: &'a Device,
    net: &'a Net,
    intersite_by_root: HashMap<WireId, usize>,
    indent_unit: String,
}

impl<'a> RouteTraceFormatter<'a> {
    /// Creates a formatter with the default three-space indent.
    pub fn new(device: &'a Device, net: &'a Net) -> Self {
        Self::with_options(device, net, &TraceOptions::default())
    }

    /// Creates a formatter with explicit options.
    pub fn with_options(device: &'a Device, net: &'a Net, options: &TraceOptions) -> Self {
        let mut intersite_by_root = HashMap::new();
        for (i, tree) in net.intersite_trees().iter().enumerate() {
            let Some(root) = tree.nodes.first() else {
                continue;
            };
            // first tree wins on a shared root wire
            intersite_by_root.entry(root.wire).or_insert(i);
        }
        Self {
            device,
            net,
            intersite_by_root,
            indent_unit: " ".repeat(options.indent),
        }
    }

    /// Returns the inter-site tree rooted at `wire`, if any.
    pub fn intersite_tree(&self, wire: WireId) -> Option<&'a RouteTree> {
        self.intersite_entry(wire).map(|(_, tree)| tree)
    }

    fn intersite_entry(&self, wire: WireId) -> Option<(TreeRef, &'a RouteTree)> {
        let index = *self.intersite_by_root.get(&wire)?;
        let tree = self.net.intersite_trees().get(index)?;
        Some((TreeRef::Intersite(index), tree))
    }

    fn sink_entry(&self, pin: SitePinRef) -> Option<(TreeRef, &'a RouteTree)> {
        let index = self.net.sink_tree_position(pin)?;
        let sink = self.net.sink_trees().get(index)?;
        Some((TreeRef::Sink(index), &sink.tree))
    }

    /// Resolves a caller-supplied tree to the net tree it is, if any.
    fn tree_ref(&self, tree: &RouteTree) -> TreeRef {
        if self.net.source_tree().is_some_and(|s| ptr::eq(s, tree)) {
            return TreeRef::Source;
        }
        if let Some(i) = self.net.intersite_trees().iter().position(|t| ptr::eq(t, tree)) {
            return TreeRef::Intersite(i);
        }
        match self.net.sink_trees().iter().position(|st| ptr::eq(&st.tree, tree)) {
            Some(i) => TreeRef::Sink(i),
            None => TreeRef::Detached,
        }
    }

    /// Renders `tree` starting at its root.
    ///
    /// `head` forces the root to print as a head segment. `domain` is the
    /// domain the root lives in. An absent tree renders as the empty trace.
    pub fn format<'t>(
        &'t self,
        tree: Option<&'t RouteTree>,
        head: bool,
        domain: Domain,
    ) -> Result<RouteTrace, TraceError> {
        let mut out = RouteTrace::default();
        let Some(tree) = tree else {
            return Ok(out);
        };

        let mut active: HashSet<PathKey> = HashSet::new();
        let mut stack = vec![Work::Visit {
            tree,
            tree_ref: self.tree_ref(tree),
            node: tree.root(),
            head,
            domain,
            level: 0,
        }];

        while let Some(work) = stack.pop() {
            let (tree, tree_ref, id, head, domain, level) = match work {
                Work::Text(text) => {
                    out.text.push_str(&text);
                    continue;
                }
                Work::Leave(key) => {
                    active.remove(&key);
                    continue;
                }
                Work::Visit {
                    tree,
                    tree_ref,
                    node,
                    head,
                    domain,
                    level,
                } => (tree, tree_ref, node, head, domain, level),
            };

            let node = tree.get_node(id).ok_or_else(|| TraceError::MissingNode {
                net: self.net.name.clone(),
                node: id,
            })?;
            let key: PathKey = (tree_ref, id);
            if !active.insert(key) {
                return Err(TraceError::Cycle {
                    net: self.net.name.clone(),
                    node: id,
                });
            }
            out.depth = out.depth.max(active.len());
            stack.push(Work::Leave(key));

            self.push_segment(&mut out.text, node, head);

            match node.children.as_slice() {
                [] => {
                    if let Some((next_ref, next)) = self.push_leaf(&mut out.text, node, domain) {
                        stack.push(Work::Visit {
                            tree: next,
                            tree_ref: next_ref,
                            node: next.root(),
                            head: true,
                            domain: domain.cross_site_pin(),
                            level,
                        });
                    }
                }
                [child] => stack.push(Work::Visit {
                    tree,
                    tree_ref,
                    node: *child,
                    head: false,
                    domain,
                    level,
                }),
                children => {
                    out.branches += 1;
                    let pad = self.indent_unit.repeat(level + 1);
                    for &child in children.iter().rev() {
                        stack.push(Work::Text(format!("\n{pad})")));
                        stack.push(Work::Visit {
                            tree,
                            tree_ref,
                            node: child,
                            head: false,
                            domain,
                            level: level + 1,
                        });
                        stack.push(Work::Text(format!("\n{pad}(")));
                    }
                }
            }
        }

        Ok(out)
    }

    fn push_segment(&self, text: &mut String, node: &RouteNode, head: bool) {
        if head {
            text.push_str("<head>");
            text.push_str(&self.device.wire_full_name(node.wire));
        } else if node.connection.is_hop() {
            text.push(' ');
            text.push_str(&self.device.wire_full_name(node.wire));
        } else {
            text.push('=');
            text.push_str(self.device.wire_name(node.wire));
        }
    }

    /// Renders the end of a leaf and returns the tree to continue into when
    /// the leaf crosses a site pin.
    fn push_leaf(
        &self,
        text: &mut String,
        node: &RouteNode,
        domain: Domain,
    ) -> Option<(TreeRef, &'a RouteTree)> {
        if let Some(pin) = node.site_pin {
            let name = self.device.site_pin_name(pin);
            match domain {
                Domain::InsideSite => {
                    let external = self.device.site_pin(pin).external_wire;
                    match self.intersite_entry(external) {
                        Some(next) => {
                            text.push_str(&format!(
                                " SitePin{{{name}}} <<entering general routing fabric>> "
                            ));
                            Some(next)
                        }
                        None => {
                            log::debug!(
                                "net '{}': site pin {name} has no inter-site tree",
                                self.net.name
                            );
                            text.push_str(&format!(
                                " SitePin{{{name}}} <<<<Connects to no corresponding RouteTree outside site>>>> "
                            ));
                            None
                        }
                    }
                }
                Domain::OutsideSite => {
                    text.push_str(&format!(
                        " SitePin{{{name}}} <<Leaving general routing fabric, entering site>> "
                    ));
                    self.sink_entry(pin)
                }
            }
        } else if let Some(pin) = node.bel_pin {
            text.push_str(&format!(" BelPin{{{}}}", self.device.bel_pin_name(pin)));
            None
        } else {
            text.push_str(" <stub> ");
            None
        }
    }

    /// Rejects a net traced from its source whose inter-site trees are not
    /// all entered through a site pin.
    ///
    /// Every site-pin leaf of the source and sink trees is an exit onto the
    /// pin's external wire. A net with several inter-site trees must root
    /// each of them on one of those wires. A single unmatched tree is left to
    /// render with the no-corresponding-tree marker.
    pub fn check_topology(&self) -> Result<(), TraceError> {
        if self.net.is_static() {
            return Ok(());
        }
        let Some(source) = self.net.source_tree() else {
            return Ok(());
        };
        let trees = self.net.intersite_trees();
        if trees.len() < 2 {
            return Ok(());
        }

        let exits: HashSet<WireId> = std::iter::once(source)
            .chain(self.net.sink_trees().iter().map(|st| &st.tree))
            .flat_map(|tree| tree.site_pin_leaves())
            .map(|pin| self.device.site_pin(pin).external_wire)
            .collect();
        let unreached = trees
            .iter()
            .filter(|tree| tree.nodes.first().is_some_and(|root| !exits.contains(&root.wire)))
            .count();
        if unreached > 0 {
            return Err(TraceError::UnsupportedTopology {
                net: self.net.name.clone(),
                trees: trees.len(),
                unreached,
            });
        }
        Ok(())
    }
}

/// Traces a whole net.
///
/// Starts inside the source site when the net has a source tree, otherwise
/// from each inter-site tree in turn, one root per line. Unrouted nets render
/// as the empty trace.
pub fn trace_net(
    device: &Device,
    net: &Net,
    options: &TraceOptions,
) -> Result<RouteTrace, TraceError> {
    let formatter = RouteTraceFormatter::with_options(device, net, options);
    formatter.check_topology()?;

    if let Some(source) = net.source_tree() {
        return formatter.format(Some(source), true, Domain::InsideSite);
    }

    let mut combined = RouteTrace::default();
    for (i, tree) in net.intersite_trees().iter().enumerate() {
        if i > 0 {
            combined.text.push('\n');
        }
        combined.append(formatter.format(Some(tree), true, Domain::OutsideSite)?);
    }
    Ok(combined)
}
