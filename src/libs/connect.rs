//! Persistent links between MSA rows and externally rendered structures.
//!
//! A [`ConnectionManager`] owns its connection list outright; collaborating
//! views are reached through the [`MsaSequences`] and [`StructureSequences`]
//! traits passed in at each call, never discovered by scanning.

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

use crate::libs::align;
use crate::libs::coord;

/// Supplies gapped row sequences from the MSA data store.
pub trait MsaSequences {
    fn row_names(&self) -> Vec<String>;
    fn get_row_sequence(&self, row: &str) -> Option<String>;
}

/// Supplies primary sequences from 3D-structure views.
pub trait StructureSequences {
    fn get_structure_sequence(&self, structure: &StructureRef) -> Option<String>;
}

/// Identifies one structure inside one protein view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureRef {
    pub protein_view_id: String,
    pub structure_idx: usize,
}

impl std::fmt::Display for StructureRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.protein_view_id, self.structure_idx)
    }
}

/// A live link between one MSA row and one structure, with the bidirectional
/// ungapped-position maps computed at connect time.
///
/// Serializes to plain JSON for session snapshots; the integer map keys come
/// back as decimal strings and parse back on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureConnection {
    pub structure: StructureRef,
    pub msa_row_name: String,
    pub msa_to_structure: BTreeMap<usize, usize>,
    pub structure_to_msa: BTreeMap<usize, usize>,
}

/// Candidate structure view offered to [`ConnectionManager::auto_connect`].
#[derive(Debug, Clone)]
pub struct StructureViewState {
    pub view_id: String,
    /// Id of the MSA view this structure view follows, if any.
    pub connected_view_id: Option<String>,
    pub structures: Vec<StructureMeta>,
}

#[derive(Debug, Clone)]
pub struct StructureMeta {
    /// Shared cross-reference id (e.g. a UniProt accession) naming the MSA
    /// row this structure corresponds to.
    pub xref_id: Option<String>,
}

/// Owns the connection list for one MSA view.
#[derive(Debug, Default)]
pub struct ConnectionManager {
    msa_view_id: String,
    connections: Vec<StructureConnection>,
}

impl ConnectionManager {
    pub fn new(msa_view_id: &str) -> Self {
        Self {
            msa_view_id: msa_view_id.to_string(),
            connections: Vec::new(),
        }
    }

    pub fn msa_view_id(&self) -> &str {
        &self.msa_view_id
    }

    pub fn connections(&self) -> &[StructureConnection] {
        &self.connections
    }

    pub fn is_connected(&self, structure: &StructureRef, row: &str) -> bool {
        self.connections
            .iter()
            .any(|c| c.structure == *structure && c.msa_row_name == row)
    }

    /// Align the named MSA row (gaps stripped) against the structure's
    /// primary sequence and store the resulting connection.
    ///
    /// The connection list is only touched after the whole pipeline has
    /// succeeded; a failed attempt leaves it unchanged. Re-connecting an
    /// existing (structure, row) pair replaces the old record.
    pub fn connect(
        &mut self,
        structure: StructureRef,
        row: &str,
        msa: &dyn MsaSequences,
        structures: &dyn StructureSequences,
    ) -> Result<()> {
        let row_seq = msa
            .get_row_sequence(row)
            .ok_or_else(|| anyhow!("MSA row {} not found", row))?;
        let ungapped: String = row_seq.chars().filter(|c| *c != coord::GAP).collect();
        if ungapped.is_empty() {
            bail!("MSA row {} has no residues", row);
        }

        let structure_seq = structures
            .get_structure_sequence(&structure)
            .ok_or_else(|| anyhow!("structure {} not found", structure))?;
        if structure_seq.is_empty() {
            bail!("structure {} has no usable sequence", structure);
        }

        let aln = align::pair_alignment(&ungapped, &structure_seq);
        let maps = align::build_maps(&aln);

        let conn = StructureConnection {
            structure,
            msa_row_name: row.to_string(),
            msa_to_structure: maps.msa_to_structure,
            structure_to_msa: maps.structure_to_msa,
        };
        self.connections
            .retain(|c| !(c.structure == conn.structure && c.msa_row_name == conn.msa_row_name));
        self.connections.push(conn);

        Ok(())
    }

    /// Remove every connection to the given structure. No-op when none exist.
    pub fn disconnect(&mut self, structure: &StructureRef) {
        self.connections.retain(|c| c.structure != *structure);
    }

    pub fn disconnect_all(&mut self) {
        self.connections.clear();
    }

    /// Translate a hovered MSA column into a structure residue position.
    ///
    /// First connection that maps the column wins; gaps, out-of-range
    /// columns and unmapped positions all fall through to the next
    /// connection, then to `None`.
    pub fn column_to_structure(
        &self,
        column: usize,
        msa: &dyn MsaSequences,
    ) -> Option<(StructureRef, usize)> {
        for conn in &self.connections {
            let seq = match msa.get_row_sequence(&conn.msa_row_name) {
                Some(seq) => seq,
                None => continue,
            };
            let p = match coord::gapped_to_ungapped(&seq, column) {
                Some(p) => p,
                None => continue,
            };
            if let Some(&sp) = conn.msa_to_structure.get(&p) {
                return Some((conn.structure.clone(), sp));
            }
        }
        None
    }

    /// Inverse of [`ConnectionManager::column_to_structure`]: a residue
    /// position in the given structure back to a gapped MSA column.
    pub fn structure_to_column(
        &self,
        structure: &StructureRef,
        position: usize,
        msa: &dyn MsaSequences,
    ) -> Option<usize> {
        for conn in &self.connections {
            if conn.structure != *structure {
                continue;
            }
            let mp = match conn.structure_to_msa.get(&position) {
                Some(&mp) => mp,
                None => continue,
            };
            let seq = match msa.get_row_sequence(&conn.msa_row_name) {
                Some(seq) => seq,
                None => continue,
            };
            if let Some(column) = coord::ungapped_to_gapped(&seq, mp) {
                return Some(column);
            }
        }
        None
    }

    /// Connect every eligible (structure, row) pair that shares a
    /// cross-reference id with an MSA row. Host calls this whenever the MSA
    /// data, the view list or the identifiers change.
    ///
    /// Safe to re-run with unchanged inputs: already-connected pairs are
    /// skipped, so repeated passes never duplicate a connection. Individual
    /// failures are logged and do not abort the pass. Returns the number of
    /// connections added.
    pub fn auto_connect(
        &mut self,
        views: &[StructureViewState],
        msa: &dyn MsaSequences,
        structures: &dyn StructureSequences,
    ) -> usize {
        let rows = msa.row_names();
        let mut added = 0;

        for view in views {
            if view.connected_view_id.as_deref() != Some(self.msa_view_id.as_str()) {
                continue;
            }
            for (idx, meta) in view.structures.iter().enumerate() {
                let xref = match &meta.xref_id {
                    Some(xref) => xref,
                    None => continue,
                };
                for row in rows.iter().filter(|r| *r == xref) {
                    let structure = StructureRef {
                        protein_view_id: view.view_id.clone(),
                        structure_idx: idx,
                    };
                    if self.is_connected(&structure, row) {
                        continue;
                    }
                    match self.connect(structure, row, msa, structures) {
                        Ok(()) => added += 1,
                        Err(e) => log::warn!("auto-connect of row {}: {}", row, e),
                    }
                }
            }
        }

        added
    }

    /// Serialize the connection list for a host session snapshot.
    pub fn to_snapshot(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.connections)?)
    }

    /// Replace the connection list from a snapshot produced by
    /// [`ConnectionManager::to_snapshot`].
    pub fn load_snapshot(&mut self, json: &str) -> Result<()> {
        self.connections = serde_json::from_str(json)?;
        Ok(())
    }
}
