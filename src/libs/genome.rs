//! Mapping MSA columns onto genomic coordinates through a transcript.

use std::collections::BTreeMap;
use std::io::BufRead;

use anyhow::{bail, Result};

use crate::libs::coord;

/// A genomic interval on a named reference, `start < end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomeInterval {
    pub ref_name: String,
    pub start: i64,
    pub end: i64,
}

impl std::fmt::Display for GenomeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.ref_name, self.start, self.end)
    }
}

/// Sparse map from ungapped protein position to genomic coordinate for one
/// transcript. Computed by genome-side tooling; consumed read-only here.
#[derive(Debug, Clone, Default)]
pub struct TranscriptToGenomeMap {
    pub ref_name: String,
    pub p2g: BTreeMap<usize, i64>,
}

impl TranscriptToGenomeMap {
    /// Parse a transcript map from tab-separated text.
    ///
    /// One `ref_name<TAB>name` line, then `position<TAB>coordinate` pairs.
    /// Empty lines and `#` comments are skipped.
    pub fn from_tsv<R: BufRead>(reader: R) -> Result<Self> {
        let mut map = TranscriptToGenomeMap::default();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 2 {
                bail!("malformed p2g line: {}", line);
            }

            if fields[0] == "ref_name" {
                map.ref_name = fields[1].to_string();
                continue;
            }

            let pos: usize = match fields[0].parse() {
                Ok(v) => v,
                Err(_) => bail!("malformed p2g position: {}", fields[0]),
            };
            let coord: i64 = match fields[1].parse() {
                Ok(v) => v,
                Err(_) => bail!("malformed p2g coordinate: {}", fields[1]),
            };
            map.p2g.insert(pos, coord);
        }

        if map.ref_name.is_empty() {
            bail!("p2g input lacks a ref_name line");
        }

        Ok(map)
    }
}

/// Genomic interval covered by one MSA column of `query_row`.
///
/// The column converts to an ungapped position `p`; the interval spans
/// `p2g[p]` to `p2g[p+1]`, min/max-normalized so reverse-strand transcripts
/// (whose coordinates decrease with protein position) still yield
/// `start < end`. Any miss along the way returns `None`.
pub fn msa_column_to_genome_interval(
    query_row: &str,
    map: &TranscriptToGenomeMap,
    column: usize,
) -> Option<GenomeInterval> {
    let p = coord::gapped_to_ungapped(query_row, column)?;
    let s = *map.p2g.get(&p)?;
    let e = *map.p2g.get(&(p + 1))?;

    Some(GenomeInterval {
        ref_name: map.ref_name.clone(),
        start: s.min(e),
        end: s.max(e),
    })
}

/// One CDS exon as a 0-based half-open genomic span.
#[derive(Debug, Clone, Copy)]
pub struct Exon {
    pub start: i64,
    pub end: i64,
}

/// CDS/exon structure of a transcript, for hosts that supply features
/// rather than a flat p2g table.
#[derive(Debug, Clone)]
pub struct CdsFeatures {
    pub ref_name: String,
    /// Exons in genomic order.
    pub exons: Vec<Exon>,
    /// +1 or -1.
    pub strand: i8,
    /// Protein position at which the CDS begins.
    pub protein_start: f64,
}

impl CdsFeatures {
    fn cds_len(&self) -> i64 {
        self.exons.iter().map(|e| e.end - e.start).sum()
    }

    /// Genomic coordinate of a 0-based transcript offset, walking exons in
    /// transcription order.
    fn offset_to_genomic(&self, offset: i64) -> Option<i64> {
        if offset < 0 {
            return None;
        }

        let mut acc = 0;
        if self.strand >= 0 {
            for exon in &self.exons {
                let len = exon.end - exon.start;
                if offset < acc + len {
                    return Some(exon.start + (offset - acc));
                }
                acc += len;
            }
        } else {
            for exon in self.exons.iter().rev() {
                let len = exon.end - exon.start;
                if offset < acc + len {
                    return Some(exon.end - 1 - (offset - acc));
                }
                acc += len;
            }
        }

        None
    }

    /// Genomic span of the codon at `protein_pos`.
    ///
    /// The intra-CDS offset is `round((protein_pos - protein_start) * 3)`.
    /// This rounding does not account for ribosomal phase or partial-CDS
    /// offsets, so spans near the boundaries of incomplete features can be
    /// off by a base or two; kept as-is deliberately.
    pub fn codon_span(&self, protein_pos: f64) -> Option<GenomeInterval> {
        let offset = ((protein_pos - self.protein_start) * 3.0).round() as i64;
        if offset < 0 || offset >= self.cds_len() {
            return None;
        }
        let last = (offset + 2).min(self.cds_len() - 1);

        let g1 = self.offset_to_genomic(offset)?;
        let g2 = self.offset_to_genomic(last)?;

        Some(GenomeInterval {
            ref_name: self.ref_name.clone(),
            start: g1.min(g2),
            end: g1.max(g2) + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn map_from(entries: &[(usize, i64)]) -> TranscriptToGenomeMap {
        TranscriptToGenomeMap {
            ref_name: "chr1".to_string(),
            p2g: entries.iter().copied().collect(),
        }
    }

    #[test]
    fn test_forward_strand_interval() {
        let map = map_from(&[(0, 100), (1, 103), (2, 106)]);
        let got = msa_column_to_genome_interval("MKA", &map, 1).unwrap();
        assert_eq!(got.ref_name, "chr1");
        assert_eq!(got.start, 103);
        assert_eq!(got.end, 106);
    }

    #[test]
    fn test_reverse_strand_normalized() {
        let map = map_from(&[(0, 109), (1, 106), (2, 103), (3, 100)]);
        let got = msa_column_to_genome_interval("MKAA", &map, 0).unwrap();
        assert_eq!(got.start, 106);
        assert_eq!(got.end, 109);
    }

    #[test]
    fn test_gap_column_misses() {
        let map = map_from(&[(0, 100), (1, 103)]);
        assert_eq!(msa_column_to_genome_interval("M-K", &map, 1), None);
        assert_eq!(msa_column_to_genome_interval("M-K", &map, 9), None);
    }

    #[test]
    fn test_missing_map_entry_misses() {
        let map = map_from(&[(0, 100)]);
        // Needs both p2g[0] and p2g[1].
        assert_eq!(msa_column_to_genome_interval("M", &map, 0), None);
    }

    #[test]
    fn test_from_tsv() {
        let text = "# transcript ENST00000318560\nref_name\tchr1\n0\t109\n1\t106\n";
        let map = TranscriptToGenomeMap::from_tsv(Cursor::new(text)).unwrap();
        assert_eq!(map.ref_name, "chr1");
        assert_eq!(map.p2g.get(&1), Some(&106));
    }

    #[test]
    fn test_from_tsv_requires_ref_name() {
        let res = TranscriptToGenomeMap::from_tsv(Cursor::new("0\t109\n"));
        assert!(res.is_err());
    }

    #[test]
    fn test_codon_span_forward() {
        let cds = CdsFeatures {
            ref_name: "chr2".to_string(),
            exons: vec![Exon { start: 100, end: 130 }],
            strand: 1,
            protein_start: 0.0,
        };
        let got = cds.codon_span(2.0).unwrap();
        assert_eq!(got.start, 106);
        assert_eq!(got.end, 109);
    }

    #[test]
    fn test_codon_span_reverse_across_exons() {
        let cds = CdsFeatures {
            ref_name: "chr2".to_string(),
            exons: vec![Exon { start: 100, end: 110 }, Exon { start: 120, end: 130 }],
            strand: -1,
            protein_start: 0.0,
        };
        // Codon 3 covers transcript offsets 9..=11, which straddle the
        // intron: genomic bases 120, 109, 108.
        let got = cds.codon_span(3.0).unwrap();
        assert_eq!(got.start, 108);
        assert_eq!(got.end, 121);
    }

    #[test]
    fn test_codon_span_out_of_range() {
        let cds = CdsFeatures {
            ref_name: "chr2".to_string(),
            exons: vec![Exon { start: 100, end: 106 }],
            strand: 1,
            protein_start: 0.0,
        };
        assert!(cds.codon_span(2.0).is_none());
        assert!(cds.codon_span(-1.0).is_none());
    }

    #[test]
    fn test_codon_span_fractional_position_rounds() {
        let cds = CdsFeatures {
            ref_name: "chr2".to_string(),
            exons: vec![Exon { start: 0, end: 30 }],
            strand: 1,
            protein_start: 0.0,
        };
        // 1.4 * 3 = 4.2 rounds to offset 4.
        let got = cds.codon_span(1.4).unwrap();
        assert_eq!(got.start, 4);
        assert_eq!(got.end, 7);
    }
}
