//! Opaque ID newtypes for device entities.
//!
//! Each ID is a thin `u32` index into one of the [`Device`](crate::Device)
//! tables. IDs are `Copy`, `Hash`, and serialize as plain integers.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            /// Returns the ID as a table index.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// A tile in the device grid.
    TileId
);

define_id!(
    /// A site (placement cluster) within a tile.
    SiteId
);

define_id!(
    /// A wire segment, either in the general routing fabric or inside a site.
    WireId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn id_roundtrip() {
        let id = SiteId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn id_hash_in_set() {
        let mut set = HashSet::new();
        set.insert(WireId::from_raw(1));
        set.insert(WireId::from_raw(2));
        set.insert(WireId::from_raw(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn id_serializes_as_integer() {
        let json = serde_json::to_string(&TileId::from_raw(7)).unwrap();
        assert_eq!(json, "7");
        let back: TileId = serde_json::from_str("7").unwrap();
        assert_eq!(back, TileId::from_raw(7));
    }
}
