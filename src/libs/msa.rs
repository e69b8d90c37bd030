//! In-memory store of named, gap-padded alignment rows.

use std::io::BufRead;

use anyhow::{bail, Result};

use crate::libs::connect::MsaSequences;

/// Ordered rows of a multiple sequence alignment.
///
/// Row names are FASTA identifiers (header up to the first whitespace).
/// Sequences keep whatever gaps the input carried.
#[derive(Debug, Clone, Default)]
pub struct Msa {
    names: Vec<String>,
    seqs: Vec<String>,
}

impl Msa {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn push(&mut self, name: &str, seq: &str) {
        self.names.push(name.to_string());
        self.seqs.push(seq.to_string());
    }

    /// Sequence of the named row.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.seqs[i].as_str())
    }

    /// Row by index, as `(name, sequence)`.
    pub fn row(&self, idx: usize) -> Option<(&str, &str)> {
        if idx < self.names.len() {
            Some((self.names[idx].as_str(), self.seqs[idx].as_str()))
        } else {
            None
        }
    }

    /// Read FASTA records from a file path (`stdin` and `.gz` handled by
    /// [`crate::reader`]). No length validation; call [`Msa::validate`] when
    /// the rows must form a rectangular alignment.
    pub fn from_fasta(input: &str) -> Result<Self> {
        Self::parse(crate::reader(input)?)
    }

    /// Parse FASTA records from any buffered reader.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut msa = Msa::new();
        let mut name: Option<String> = None;
        let mut seq = String::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix('>') {
                if let Some(prev) = name.take() {
                    msa.push(&prev, &seq);
                }
                let id = match header.split_whitespace().next() {
                    Some(id) => id,
                    None => bail!("empty FASTA header"),
                };
                name = Some(id.to_string());
                seq.clear();
            } else {
                if name.is_none() {
                    bail!("sequence data before first FASTA header: {}", line);
                }
                seq.push_str(line.trim());
            }
        }

        if let Some(prev) = name.take() {
            msa.push(&prev, &seq);
        }

        Ok(msa)
    }

    /// Check that every row has the same gapped length.
    pub fn validate(&self) -> Result<()> {
        let mut expected: Option<usize> = None;
        for (name, seq) in self.names.iter().zip(self.seqs.iter()) {
            let len = seq.chars().count();
            match expected {
                None => expected = Some(len),
                Some(e) => {
                    if len != e {
                        bail!("row {} has length {}, expected {}", name, len, e);
                    }
                }
            }
        }
        Ok(())
    }
}

impl MsaSequences for Msa {
    fn row_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn get_row_sequence(&self, row: &str) -> Option<String> {
        self.get(row).map(|s| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_multi_line_records() {
        let text = ">sp1 some description\nMK-A\nA-\n>sp2\nMKCAAA\n";
        let msa = Msa::parse(Cursor::new(text)).unwrap();
        assert_eq!(msa.len(), 2);
        assert_eq!(msa.names(), ["sp1", "sp2"]);
        assert_eq!(msa.get("sp1"), Some("MK-AA-"));
        assert_eq!(msa.get("sp2"), Some("MKCAAA"));
        assert_eq!(msa.get("sp3"), None);
        assert_eq!(msa.row(1), Some(("sp2", "MKCAAA")));
    }

    #[test]
    fn test_parse_rejects_headerless_data() {
        let res = Msa::parse(Cursor::new("MKAA\n"));
        assert!(res.is_err());
    }

    #[test]
    fn test_validate_ragged() {
        let mut msa = Msa::new();
        msa.push("a", "MK-A");
        msa.push("b", "MK");
        let err = msa.validate().unwrap_err().to_string();
        assert!(err.contains("row b"));

        let mut square = Msa::new();
        square.push("a", "MK-A");
        square.push("b", "MKCA");
        assert!(square.validate().is_ok());
    }

    #[test]
    fn test_from_fasta_gz() {
        use flate2::write::GzEncoder;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msa.fa.gz");
        {
            let file = std::fs::File::create(&path).unwrap();
            let mut encoder = GzEncoder::new(file, flate2::Compression::default());
            writeln!(encoder, ">sp1\nMKAA").unwrap();
            encoder.finish().unwrap();
        }
        let msa = Msa::from_fasta(path.to_str().unwrap()).unwrap();
        assert_eq!(msa.get("sp1"), Some("MKAA"));
    }

    #[test]
    fn test_row_sequence_provider() {
        let mut msa = Msa::new();
        msa.push("sp1", "MK-AA");
        let provider: &dyn MsaSequences = &msa;
        assert_eq!(provider.row_names(), vec!["sp1".to_string()]);
        assert_eq!(provider.get_row_sequence("sp1"), Some("MK-AA".to_string()));
        assert_eq!(provider.get_row_sequence("nope"), None);
    }
}
