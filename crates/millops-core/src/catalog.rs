// crates/millops-core/src/catalog.rs

use std::collections::HashMap;

use crate::types::{Bin, Godown, Magnet};

/// Id-indexed view over the reference rows supplied to an evaluation call.
///
/// Built once per call so the per-session loops resolve labels in O(1)
/// instead of rescanning the slices.
pub struct ReferenceCatalog<'a> {
    magnets: HashMap<i64, &'a Magnet>,
    godowns: HashMap<i64, &'a Godown>,
    bins: HashMap<i64, &'a Bin>,
}

impl<'a> ReferenceCatalog<'a> {
    pub fn new(magnets: &'a [Magnet], godowns: &'a [Godown], bins: &'a [Bin]) -> Self {
        Self {
            magnets: magnets.iter().map(|m| (m.id, m)).collect(),
            godowns: godowns.iter().map(|g| (g.id, g)).collect(),
            bins: bins.iter().map(|b| (b.id, b)).collect(),
        }
    }

    pub fn magnet(&self, id: i64) -> Option<&'a Magnet> {
        self.magnets.get(&id).copied()
    }

    pub fn godown(&self, id: i64) -> Option<&'a Godown> {
        self.godowns.get(&id).copied()
    }

    pub fn bin(&self, id: i64) -> Option<&'a Bin> {
        self.bins.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_ids_and_rejects_unknown() {
        let magnets = vec![Magnet { id: 1, name: "Drum magnet".into() }];
        let godowns = vec![Godown { id: 4, name: "Godown A".into() }];
        let bins = vec![Bin { id: 9, bin_number: "B-09".into() }];

        let catalog = ReferenceCatalog::new(&magnets, &godowns, &bins);

        assert_eq!(catalog.magnet(1).map(|m| m.name.as_str()), Some("Drum magnet"));
        assert_eq!(catalog.godown(4).map(|g| g.name.as_str()), Some("Godown A"));
        assert_eq!(catalog.bin(9).map(|b| b.bin_number.as_str()), Some("B-09"));
        assert!(catalog.magnet(2).is_none());
        assert!(catalog.godown(1).is_none());
        assert!(catalog.bin(4).is_none());
    }
}
