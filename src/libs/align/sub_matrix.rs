use lazy_static::lazy_static;

/// Score returned for any residue pair not covered by the table.
pub const DEFAULT_SCORE: i32 = -4;

/// Row/column order of the tabulated residues.
const RESIDUES: &[u8; 24] = b"ARNDCQEGHILKMFPSTWYVBZX*";

// NCBI reference values, 24x24 flattened.
#[rustfmt::skip]
const BLOSUM62_SCORES: [i32; 24 * 24] = [
//   A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
     4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0, -2, -1,  0, -4, // A
    -1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3, -1,  0, -1, -4, // R
    -2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3,  3,  0, -1, -4, // N
    -2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3,  4,  1, -1, -4, // D
     0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1, -3, -3, -2, -4, // C
    -1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2,  0,  3, -1, -4, // Q
    -1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4, // E
     0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3, -1, -2, -1, -4, // G
    -2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3,  0,  0, -1, -4, // H
    -1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3, -3, -3, -1, -4, // I
    -1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1, -4, -3, -1, -4, // L
    -1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2,  0,  1, -1, -4, // K
    -1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1, -3, -1, -1, -4, // M
    -2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1, -3, -3, -1, -4, // F
    -1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2, -2, -1, -2, -4, // P
     1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2,  0,  0,  0, -4, // S
     0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0, -1, -1,  0, -4, // T
    -3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3, -4, -3, -2, -4, // W
    -2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1, -3, -2, -1, -4, // Y
     0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4, -3, -2, -1, -4, // V
    -2, -1,  3,  4, -3,  0,  1, -1,  0, -3, -4,  0, -3, -3, -2,  0, -1, -4, -3, -3,  4,  1, -1, -4, // B
    -1,  0,  0,  1, -3,  3,  4, -2,  0, -3, -3,  1, -1, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4, // Z
     0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2,  0,  0, -2, -1, -1, -1, -1, -1, -4, // X
    -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4,  1, // *
];

/// An amino-acid substitution matrix for alignment scoring.
///
/// Stores scores for all pairs of bytes (256x256) so lookups stay a single
/// index, with both case combinations filled for the tabulated residues.
/// Untabulated bytes score [`DEFAULT_SCORE`].
pub struct SubMatrix {
    matrix: Vec<i32>,
}

impl SubMatrix {
    /// BLOSUM62 over the 20 standard amino acids plus B, Z, X and `*`.
    pub fn blosum62() -> Self {
        let mut m = vec![DEFAULT_SCORE; 256 * 256];

        for (i, &b1) in RESIDUES.iter().enumerate() {
            for (j, &b2) in RESIDUES.iter().enumerate() {
                let score = BLOSUM62_SCORES[i * 24 + j];

                let r_upper = b1.to_ascii_uppercase();
                let c_upper = b2.to_ascii_uppercase();
                let r_lower = b1.to_ascii_lowercase();
                let c_lower = b2.to_ascii_lowercase();

                let indices = [
                    (r_upper, c_upper),
                    (r_lower, c_lower),
                    (r_upper, c_lower),
                    (r_lower, c_upper),
                ];

                for (r, c) in indices {
                    m[(r as usize) * 256 + (c as usize)] = score;
                }
            }
        }

        SubMatrix { matrix: m }
    }

    /// Get the substitution score for two residue codes.
    ///
    /// Case-insensitive; non-ASCII characters fall back to [`DEFAULT_SCORE`].
    pub fn get_score(&self, c1: char, c2: char) -> i32 {
        match (u8::try_from(c1 as u32), u8::try_from(c2 as u32)) {
            (Ok(b1), Ok(b2)) => self.matrix[(b1 as usize) * 256 + (b2 as usize)],
            _ => DEFAULT_SCORE,
        }
    }
}

impl Default for SubMatrix {
    fn default() -> Self {
        Self::blosum62()
    }
}

lazy_static! {
    /// Process-wide BLOSUM62 instance shared by all alignments.
    pub static ref BLOSUM62: SubMatrix = SubMatrix::blosum62();
}
