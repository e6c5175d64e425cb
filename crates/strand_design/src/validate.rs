//! Structural validation of a loaded design against its device slice.
//!
//! Everything downstream of the loader indexes tables directly, so every
//! cross-reference in a checkpoint is checked here once: IDs in range,
//! pins owned by the cells that list them, and route trees that are trees.

use crate::data::CellDesign;
use crate::ids::RouteNodeId;
use crate::route_tree::RouteTree;
use strand_device::Device;

/// Checks that every reference in `design` resolves and every route tree is
/// well formed. Returns a description of the first problem found.
pub fn validate_design(design: &CellDesign, device: &Device) -> Result<(), String> {
    for (i, cell) in design.cells.iter().enumerate() {
        if cell.id.index() != i {
            return Err(format!("cell '{}' has id {} at position {i}", cell.name, cell.id));
        }
        if design.lib_cell(&cell.lib_cell).is_none() {
            return Err(format!(
                "cell '{}' refers to unknown library cell '{}'",
                cell.name, cell.lib_cell
            ));
        }
        if let Some(bel) = cell.placement {
            if device.get_bel(bel).is_none() {
                return Err(format!("cell '{}' is placed on an unknown bel", cell.name));
            }
        }
        if let Some(parent) = cell.parent {
            if parent.index() >= design.cells.len() {
                return Err(format!("cell '{}' has unknown parent {parent}", cell.name));
            }
        }
        for &pin in &cell.pins {
            match design.pins.get(pin.index()) {
                Some(p) if p.cell == cell.id => {}
                Some(p) => {
                    return Err(format!(
                        "cell '{}' lists pin '{}' owned by another cell",
                        cell.name, p.name
                    ))
                }
                None => return Err(format!("cell '{}' lists unknown pin {pin}", cell.name)),
            }
        }
    }

    for (i, pin) in design.pins.iter().enumerate() {
        if pin.id.index() != i {
            return Err(format!("pin '{}' has id {} at position {i}", pin.name, pin.id));
        }
        if pin.cell.index() >= design.cells.len() {
            return Err(format!("pin '{}' belongs to unknown cell {}", pin.name, pin.cell));
        }
        if let Some(net) = pin.net {
            if net.index() >= design.nets.len() {
                return Err(format!("pin '{}' is connected to unknown net {net}", pin.name));
            }
        }
        if pin.mapped_bel_pins.iter().any(|&bp| device.get_bel_pin(bp).is_none()) {
            return Err(format!("pin '{}' is mapped to an unknown bel pin", pin.name));
        }
    }

    for (i, net) in design.nets.iter().enumerate() {
        if net.id.index() != i {
            return Err(format!("net '{}' has id {} at position {i}", net.name, net.id));
        }
        let endpoints = net.source.iter().chain(net.sinks.iter());
        for &pin in endpoints {
            if pin.index() >= design.pins.len() {
                return Err(format!("net '{}' refers to unknown pin {pin}", net.name));
            }
        }
        let Some(routing) = &net.routing else {
            continue;
        };
        let trees = routing
            .source_tree
            .iter()
            .chain(routing.intersite.iter())
            .chain(routing.sink_trees.iter().map(|st| &st.tree));
        for tree in trees {
            validate_tree(tree, device).map_err(|e| format!("net '{}': {e}", net.name))?;
        }
        for st in &routing.sink_trees {
            if device.get_site_pin(st.site_pin).is_none() {
                return Err(format!(
                    "net '{}' has a sink tree on an unknown site pin",
                    net.name
                ));
            }
        }
    }

    Ok(())
}

/// Checks that a route tree is non-empty, references existing device
/// resources, and that every node except the root has exactly one parent.
pub fn validate_tree(tree: &RouteTree, device: &Device) -> Result<(), String> {
    if tree.nodes.is_empty() {
        return Err("route tree has no nodes".to_string());
    }
    let mut parents = vec![0u32; tree.nodes.len()];
    for (i, node) in tree.nodes.iter().enumerate() {
        if device.get_wire(node.wire).is_none() {
            return Err(format!("route node {i} uses unknown wire {}", node.wire.as_raw()));
        }
        if let Some(pin) = node.site_pin {
            if device.get_site_pin(pin).is_none() {
                return Err(format!("route node {i} ends on an unknown site pin"));
            }
        }
        if let Some(pin) = node.bel_pin {
            if device.get_bel_pin(pin).is_none() {
                return Err(format!("route node {i} ends on an unknown bel pin"));
            }
        }
        for &child in &node.children {
            if tree.get_node(child).is_none() {
                return Err(format!("route node {i} has unknown child {child}"));
            }
            parents[child.index()] += 1;
        }
    }
    if parents[tree.root().index()] != 0 {
        return Err("route tree root has a parent".to_string());
    }
    if let Some(i) = parents.iter().skip(1).position(|&n| n != 1) {
        return Err(format!(
            "route node {} has {} parents",
            RouteNodeId::from_raw(i as u32 + 1),
            parents[i + 1]
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Cell, CellPin, LibraryCell, Net, NetRouting};
    use crate::route_tree::Connection;
    use strand_device::{PinDirection, WireId, WireOwner};

    fn device() -> Device {
        let mut dev = Device::new("xc7a100tcsg324", "artix7");
        let tile = dev.add_tile("INT_L_X6Y4", "INT_L");
        for name in ["A", "B", "C"] {
            dev.add_wire(WireOwner::Tile(tile), name);
        }
        dev
    }

    #[test]
    fn valid_chain() {
        let dev = device();
        let mut rt = RouteTree::new(WireId::from_raw(0));
        let a = rt.add_child(rt.root(), WireId::from_raw(1), Connection::Pip);
        rt.add_child(a, WireId::from_raw(2), Connection::Pip);
        assert!(validate_tree(&rt, &dev).is_ok());
    }

    #[test]
    fn rejects_unknown_wire() {
        let dev = device();
        let rt = RouteTree::new(WireId::from_raw(9));
        let err = validate_tree(&rt, &dev).unwrap_err();
        assert!(err.contains("unknown wire"));
    }

    #[test]
    fn rejects_child_out_of_range() {
        let dev = device();
        let mut rt = RouteTree::new(WireId::from_raw(0));
        rt.nodes[0].children.push(RouteNodeId::from_raw(4));
        let err = validate_tree(&rt, &dev).unwrap_err();
        assert!(err.contains("unknown child"));
    }

    #[test]
    fn rejects_cycle_back_to_root() {
        let dev = device();
        let mut rt = RouteTree::new(WireId::from_raw(0));
        let a = rt.add_child(rt.root(), WireId::from_raw(1), Connection::Pip);
        let root = rt.root();
        rt.nodes[a.index()].children.push(root);
        let err = validate_tree(&rt, &dev).unwrap_err();
        assert!(err.contains("root has a parent"));
    }

    #[test]
    fn rejects_shared_child() {
        let dev = device();
        let mut rt = RouteTree::new(WireId::from_raw(0));
        let a = rt.add_child(rt.root(), WireId::from_raw(1), Connection::Pip);
        let b = rt.add_child(rt.root(), WireId::from_raw(2), Connection::Pip);
        rt.nodes[b.index()].children.push(a);
        let err = validate_tree(&rt, &dev).unwrap_err();
        assert!(err.contains("2 parents"));
    }

    #[test]
    fn rejects_unknown_lib_cell() {
        let dev = device();
        let mut design = CellDesign::new("top", "xc7a100tcsg324");
        design.add_cell(Cell::new("u0", "MISSING"));
        let err = validate_design(&design, &dev).unwrap_err();
        assert!(err.contains("unknown library cell"));
    }

    #[test]
    fn rejects_dangling_net_pin() {
        let dev = device();
        let mut design = CellDesign::new("top", "xc7a100tcsg324");
        design.add_lib_cell(LibraryCell::new("FDRE"));
        let c = design.add_cell(Cell::new("u0", "FDRE"));
        design.add_pin(CellPin::new("Q", PinDirection::Output, c));
        let mut net = Net::new("n0");
        net.sinks.push(crate::ids::PinId::from_raw(5));
        design.add_net(net);
        let err = validate_design(&design, &dev).unwrap_err();
        assert!(err.contains("unknown pin"));
    }

    #[test]
    fn reports_net_name_for_bad_tree() {
        let dev = device();
        let mut design = CellDesign::new("top", "xc7a100tcsg324");
        let mut net = Net::new("data");
        net.routing = Some(NetRouting {
            source_tree: None,
            intersite: vec![RouteTree { nodes: Vec::new() }],
            sink_trees: Vec::new(),
        });
        design.add_net(net);
        let err = validate_design(&design, &dev).unwrap_err();
        assert_eq!(err, "net 'data': route tree has no nodes");
    }
}
