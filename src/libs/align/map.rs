use std::collections::BTreeMap;

use itertools::izip;

use super::pairwise::PairAlignment;

/// Bidirectional ungapped-position maps derived from a pairwise alignment.
///
/// Entries exist only for columns where neither row holds a gap, so the two
/// maps are exact inverses of each other over their domains.
#[derive(Debug, Clone, Default)]
pub struct PositionMaps {
    pub msa_to_structure: BTreeMap<usize, usize>,
    pub structure_to_msa: BTreeMap<usize, usize>,
}

/// Walk an alignment once, recording the ungapped position pair at every
/// residue-residue column.
///
/// Panics if the two rows differ in length; the aligner guarantees equal
/// lengths, so a mismatch here is a bug upstream, not an input condition.
pub fn build_maps(alignment: &PairAlignment) -> PositionMaps {
    let row1 = &alignment.rows[0].seq;
    let row2 = &alignment.rows[1].seq;
    assert_eq!(
        row1.chars().count(),
        row2.chars().count(),
        "aligned rows differ in length"
    );

    let mut maps = PositionMaps::default();
    let mut pos1 = 0;
    let mut pos2 = 0;

    for (c1, c2) in izip!(row1.chars(), row2.chars()) {
        match (c1 == '-', c2 == '-') {
            (false, false) => {
                maps.msa_to_structure.insert(pos1, pos2);
                maps.structure_to_msa.insert(pos2, pos1);
                pos1 += 1;
                pos2 += 1;
            }
            (true, false) => pos2 += 1,
            (false, true) => pos1 += 1,
            (true, true) => {}
        }
    }

    maps
}
