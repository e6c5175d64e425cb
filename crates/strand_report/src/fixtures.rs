//! Small hand-built devices and designs shared by the report tests.

use strand_design::{
    BelAnchor, Cell, CellDesign, CellPin, Connection, LibraryCell, Net, NetRouting, Property,
    RouteTree, SinkTree,
};
use strand_device::{
    Bel, BelPin, BelPinRef, Device, PinDirection, SitePin, SitePinRef, WireId, WireOwner,
};

/// A single interconnect tile owning wires `W0..Wn`.
pub fn fabric(wires: usize) -> Device {
    let mut dev = Device::new("xc7a100tcsg324", "artix7");
    let tile = dev.add_tile("INT_X0Y0", "INT_L");
    for i in 0..wires {
        dev.add_wire(WireOwner::Tile(tile), format!("W{i}"));
    }
    dev
}

pub fn wire(n: u32) -> WireId {
    WireId::from_raw(n)
}

/// Handles into the device built by [`slice_to_bram`].
pub struct SliceToBram {
    pub device: Device,
    pub slice_aq: SitePinRef,
    pub bram_addr: SitePinRef,
    pub bram_addr_bel_pin: BelPinRef,
    pub bram_clk_bel_pin: BelPinRef,
    pub slice_site_wire: WireId,
    pub clb_out: WireId,
    pub logic_out: WireId,
    pub nl1: WireId,
    pub bram_addr_ext: WireId,
    pub bram_addr_int: WireId,
}

/// A SLICEL driving one address pin of a RAMB36 through the interconnect.
pub fn slice_to_bram() -> SliceToBram {
    let mut dev = Device::new("xc7a100tcsg324", "artix7");
    let clb = dev.add_tile("CLBLL_L_X2Y10", "CLBLL_L");
    let int = dev.add_tile("INT_L_X2Y10", "INT_L");
    let bram = dev.add_tile("BRAM_L_X6Y10", "BRAM_L");
    let slice = dev.add_site("SLICE_X0Y10", "SLICEL", clb);
    let ramb = dev.add_site("RAMB36_X0Y2", "RAMB36E1", bram);

    let slice_site_wire = dev.add_wire(WireOwner::Site(slice), "AQ");
    let clb_out = dev.add_wire(WireOwner::Tile(clb), "CLBLL_L_AQ");
    let logic_out = dev.add_wire(WireOwner::Tile(int), "LOGIC_OUTS_L4");
    let nl1 = dev.add_wire(WireOwner::Tile(int), "NL1BEG1");
    let bram_addr_ext = dev.add_wire(WireOwner::Tile(bram), "BRAM_ADDRARDADDRL0");
    let bram_addr_int = dev.add_wire(WireOwner::Site(ramb), "ADDRARDADDRL0");
    let bram_clk_int = dev.add_wire(WireOwner::Site(ramb), "CLKARDCLKL");

    let slice_aq = dev.add_site_pin(
        slice,
        SitePin {
            name: "AQ".into(),
            direction: PinDirection::Output,
            internal_wire: slice_site_wire,
            external_wire: clb_out,
        },
    );
    let bram_addr = dev.add_site_pin(
        ramb,
        SitePin {
            name: "ADDRARDADDRL0".into(),
            direction: PinDirection::Input,
            internal_wire: bram_addr_int,
            external_wire: bram_addr_ext,
        },
    );

    let aff = dev.add_bel(
        slice,
        Bel {
            name: "AFF".into(),
            bel_type: "REG_INIT".into(),
            pins: Vec::new(),
        },
    );
    dev.add_bel_pin(
        aff,
        BelPin {
            name: "Q".into(),
            direction: PinDirection::Output,
            wire: slice_site_wire,
        },
    );
    let ramb_bel = dev.add_bel(
        ramb,
        Bel {
            name: "RAMB36E1".into(),
            bel_type: "RAMB36E1".into(),
            pins: Vec::new(),
        },
    );
    let bram_addr_bel_pin = dev.add_bel_pin(
        ramb_bel,
        BelPin {
            name: "ADDRARDADDRL0".into(),
            direction: PinDirection::Input,
            wire: bram_addr_int,
        },
    );
    let bram_clk_bel_pin = dev.add_bel_pin(
        ramb_bel,
        BelPin {
            name: "CLKARDCLKL".into(),
            direction: PinDirection::Input,
            wire: bram_clk_int,
        },
    );

    SliceToBram {
        device: dev,
        slice_aq,
        bram_addr,
        bram_addr_bel_pin,
        bram_clk_bel_pin,
        slice_site_wire,
        clb_out,
        logic_out,
        nl1,
        bram_addr_ext,
        bram_addr_int,
    }
}

/// The full routing of `addr0` from the slice flop to the RAMB36 address pin.
pub fn addr_routing(fx: &SliceToBram) -> NetRouting {
    let mut source = RouteTree::new(fx.slice_site_wire);
    source.connect_site_pin(source.root(), fx.slice_aq);

    let mut intersite = RouteTree::new(fx.clb_out);
    let a = intersite.add_child(intersite.root(), fx.logic_out, Connection::NonProgrammable);
    let b = intersite.add_child(a, fx.nl1, Connection::Pip);
    let c = intersite.add_child(b, fx.bram_addr_ext, Connection::Pip);
    intersite.connect_site_pin(c, fx.bram_addr);

    let mut sink = RouteTree::new(fx.bram_addr_int);
    sink.connect_bel_pin(sink.root(), fx.bram_addr_bel_pin);

    NetRouting {
        source_tree: Some(source),
        intersite: vec![intersite],
        sink_trees: vec![SinkTree {
            site_pin: fx.bram_addr,
            tree: sink,
        }],
    }
}

/// The rendering of [`addr_routing`].
pub const ADDR_TRACE: &str = "<head>SLICE_X0Y10/AQ SitePin{SLICE_X0Y10.AQ} <<entering general routing fabric>> \
<head>CLBLL_L_X2Y10/CLBLL_L_AQ=LOGIC_OUTS_L4 INT_L_X2Y10/NL1BEG1 BRAM_L_X6Y10/BRAM_ADDRARDADDRL0 \
SitePin{RAMB36_X0Y2.ADDRARDADDRL0} <<Leaving general routing fabric, entering site>> \
<head>RAMB36_X0Y2/ADDRARDADDRL0 BelPin{RAMB36_X0Y2/RAMB36E1.ADDRARDADDRL0}";

/// A design with one placed RAMB36, one unplaced RAMB18, a flop and a macro.
pub fn bram_design(fx: &SliceToBram) -> CellDesign {
    let mut design = CellDesign::new("bram_top", "xc7a100tcsg324");

    let mut ramb36 = LibraryCell::new("RAMB36E1");
    ramb36.defaults.insert("READ_WIDTH_A".into(), "0".into());
    ramb36.defaults.insert("DOA_REG".into(), "0".into());
    ramb36.anchors.push(BelAnchor {
        site_type: "RAMB36E1".into(),
        bel_type: "RAMB36E1".into(),
    });
    design.add_lib_cell(ramb36);
    design.add_lib_cell(LibraryCell::new("RAMB18E1"));
    let mut fdre = LibraryCell::new("FDRE");
    fdre.anchors.push(BelAnchor {
        site_type: "SLICEL".into(),
        bel_type: "REG_INIT".into(),
    });
    fdre.anchors.push(BelAnchor {
        site_type: "SLICEM".into(),
        bel_type: "REG_INIT".into(),
    });
    design.add_lib_cell(fdre);
    let mut ram32m = LibraryCell::new("RAM32M");
    ram32m.is_macro = true;
    design.add_lib_cell(ram32m);

    let mut mem = Cell::new("mem_reg", "RAMB36E1");
    mem.placement = Some(fx.bram_addr_bel_pin.bel_ref());
    mem.properties = vec![
        Property::new("READ_WIDTH_A", "36"),
        Property::new("DOA_REG", "0"),
        Property::new("INIT_00", "256'h0000"),
        Property::new("INITP_00", "256'h0000"),
        Property::new("RAM_MODE", "TDP"),
    ];
    let mem = design.add_cell(mem);
    design.add_cell(Cell::new("fifo_reg", "RAMB18E1"));
    let flop = design.add_cell(Cell::new("addr_reg[0]", "FDRE"));
    design.add_cell(Cell::new("lut_ram", "RAM32M"));

    let q = design.add_pin(CellPin::new("Q", PinDirection::Output, flop));
    let mut addr = CellPin::new("ADDRARDADDR[0]", PinDirection::Input, mem);
    addr.mapped_bel_pins.push(fx.bram_addr_bel_pin);
    let addr = design.add_pin(addr);
    let mut clk = CellPin::new("CLKARDCLK", PinDirection::Input, mem);
    clk.mapped_bel_pins.push(fx.bram_clk_bel_pin);
    let clk = design.add_pin(clk);

    let mut addr0 = Net::new("addr0");
    addr0.routing = Some(addr_routing(fx));
    let addr0 = design.add_net(addr0);
    design.connect(q, addr0);
    design.connect(addr, addr0);
    let clk_net = design.add_net(Net::new("clk"));
    design.connect(clk, clk_net);

    design
}
