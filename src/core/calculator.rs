// calculator.rs - Pairwise distance calculation over a multiple alignment

use rayon::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use crate::core::matrix::DistanceMatrix;
use crate::data::Alignment;

/// Characters ignored during scoring (gap and stop)
const SKIP_CHARS: &[u8] = b"-*";

/// DNA alphabet used by the scoring matrices
const DNA_ALPHABET: &[u8; 4] = b"ATCG";

/// BLASTN scores: match 5, mismatch -4
const BLASTN: [[i32; 4]; 4] = [
    [5, -4, -4, -4],
    [-4, 5, -4, -4],
    [-4, -4, 5, -4],
    [-4, -4, -4, 5],
];

/// Transition/transversion scores: match 6, transition -1, transversion -5
const TRANS: [[i32; 4]; 4] = [
    [6, -5, -5, -1],
    [-5, 6, -1, -5],
    [-5, -1, 6, -5],
    [-1, -5, -5, 6],
];

/// Scoring model backing a distance calculation. `identity` scores plain
/// character equality; the DNA models score via a substitution matrix.
#[derive(Debug, Clone)]
pub struct ScoringModel {
    pub name: &'static str,
    pub description: &'static str,
    scores: Option<&'static [[i32; 4]; 4]>,
}

impl ScoringModel {
    /// The plain identity model (always available)
    pub fn identity() -> Self {
        Self {
            name: "identity",
            description: "Fraction of mismatching columns",
            scores: None,
        }
    }

    pub fn by_name(name: &str) -> Result<Self, String> {
        match name.to_lowercase().as_str() {
            "identity" => Ok(Self::identity()),
            "blastn" => Ok(Self {
                name: "blastn",
                description: "BLASTN substitution scores (match 5, mismatch -4)",
                scores: Some(&BLASTN),
            }),
            "trans" => Ok(Self {
                name: "trans",
                description: "Transition/transversion scores (match 6, transition -1, transversion -5)",
                scores: Some(&TRANS),
            }),
            _ => Err(format!(
                "Unknown scoring model '{}'. Available: {}",
                name,
                Self::available()
                    .iter()
                    .map(|(n, _)| *n)
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }

    /// List all available models
    pub fn available() -> Vec<(&'static str, &'static str)> {
        vec![
            ("identity", "Fraction of mismatching columns"),
            ("blastn", "BLASTN substitution scores (match 5, mismatch -4)"),
            (
                "trans",
                "Transition/transversion scores (match 6, transition -1, transversion -5)",
            ),
        ]
    }

    /// Scaled distance between two equal-length sequences:
    /// `1 - score / max_score`. Gap and stop characters are skipped; for
    /// matrix models characters outside the alphabet are skipped too.
    pub fn pairwise_distance(&self, seq1: &[u8], seq2: &[u8]) -> f64 {
        match self.scores {
            None => {
                let score = seq1
                    .iter()
                    .zip(seq2.iter())
                    .filter(|(&a, &b)| !SKIP_CHARS.contains(&a) && !SKIP_CHARS.contains(&b))
                    .filter(|(&a, &b)| a == b)
                    .count();
                // identity scales by the full alignment length, so gap
                // columns count against similarity
                let max_score = seq1.len();
                if max_score == 0 {
                    return 1.0;
                }
                1.0 - score as f64 / max_score as f64
            }
            Some(matrix) => {
                let mut score = 0i64;
                let mut max_score1 = 0i64;
                let mut max_score2 = 0i64;
                for (&a, &b) in seq1.iter().zip(seq2.iter()) {
                    let (i, j) = match (alphabet_index(a), alphabet_index(b)) {
                        (Some(i), Some(j)) => (i, j),
                        _ => continue,
                    };
                    score += matrix[i][j] as i64;
                    max_score1 += matrix[i][i] as i64;
                    max_score2 += matrix[j][j] as i64;
                }
                let max_score = max_score1.max(max_score2);
                if max_score <= 0 {
                    return 1.0;
                }
                1.0 - score as f64 / max_score as f64
            }
        }
    }
}

fn alphabet_index(c: u8) -> Option<usize> {
    DNA_ALPHABET
        .iter()
        .position(|&a| a == c.to_ascii_uppercase())
}

/// Computes a distance matrix from a multiple alignment using a scoring
/// model, in parallel over sequence pairs.
pub struct DistanceCalculator {
    model: ScoringModel,
    show_progress: bool,
}

impl DistanceCalculator {
    pub fn new(method: &str) -> Result<Self, String> {
        Ok(Self::with_model(ScoringModel::by_name(method)?))
    }

    pub fn with_model(model: ScoringModel) -> Self {
        Self {
            model,
            show_progress: true,
        }
    }

    /// Disable the progress bar (used by tests and library callers)
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Compute the full pairwise distance matrix for the alignment
    pub fn get_distance(&self, alignment: &Alignment) -> Result<DistanceMatrix, String> {
        let records = alignment.records();
        let names: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
        let mut dm = DistanceMatrix::new(names)?;

        let pairs: Vec<(usize, usize)> = (1..records.len())
            .flat_map(|i| (0..i).map(move |j| (i, j)))
            .collect();

        let pb = if self.show_progress {
            let pb = ProgressBar::new(pairs.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pairs",
                    )
                    .unwrap(),
            );
            Some(pb)
        } else {
            None
        };

        let distances: Vec<((usize, usize), f64)> = pairs
            .par_iter()
            .map(|&(i, j)| {
                let d = self
                    .model
                    .pairwise_distance(&records[i].seq, &records[j].seq);
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                ((i, j), d)
            })
            .collect();

        if let Some(pb) = &pb {
            pb.finish_and_clear();
        }

        for ((i, j), d) in distances {
            dm.set(i, j, d);
        }
        Ok(dm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SeqRecord;

    fn alignment(rows: &[(&str, &[u8])]) -> Alignment {
        Alignment::new(
            rows.iter()
                .map(|(id, seq)| SeqRecord::new(id, seq))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_identity_distance() {
        let model = ScoringModel::by_name("identity").unwrap();
        assert_eq!(model.pairwise_distance(b"ACGT", b"ACGT"), 0.0);
        assert_eq!(model.pairwise_distance(b"ACGT", b"ACGA"), 0.25);
        // gap column counts against similarity under identity scaling
        assert_eq!(model.pairwise_distance(b"AC-T", b"ACGT"), 0.25);
    }

    #[test]
    fn test_blastn_distance() {
        let model = ScoringModel::by_name("blastn").unwrap();
        // scores: 5 + 5 + 5 - 4 = 11, max = 20
        let d = model.pairwise_distance(b"ACGT", b"ACGA");
        assert!((d - 0.45).abs() < 1e-9);
        assert_eq!(model.pairwise_distance(b"ACGT", b"ACGT"), 0.0);
    }

    #[test]
    fn test_trans_distance() {
        let model = ScoringModel::by_name("trans").unwrap();
        // A->G transition: -1 + 6 = 5, max = 12
        let d = model.pairwise_distance(b"AG", b"GG");
        assert!((d - (1.0 - 5.0 / 12.0)).abs() < 1e-9);
        // A->T transversion scores lower than a transition
        let dv = model.pairwise_distance(b"AG", b"TG");
        assert!(dv > d);
    }

    #[test]
    fn test_unknown_model() {
        assert!(ScoringModel::by_name("blosum62").is_err());
        assert!(DistanceCalculator::new("nope").is_err());
    }

    #[test]
    fn test_get_distance_matrix() {
        let aln = alignment(&[
            ("a", b"ACGT"),
            ("b", b"ACGA"),
            ("c", b"TTTT"),
        ]);
        let calc = DistanceCalculator::new("identity").unwrap().quiet();
        let dm = calc.get_distance(&aln).unwrap();
        assert_eq!(dm.len(), 3);
        assert_eq!(dm.get(0, 0), 0.0);
        assert_eq!(dm.get(0, 1), 0.25);
        assert_eq!(dm.get(1, 0), dm.get(0, 1));
        assert_eq!(dm.get(0, 2), 0.75);
    }

    #[test]
    fn test_all_gap_overlap() {
        let model = ScoringModel::by_name("blastn").unwrap();
        assert_eq!(model.pairwise_distance(b"--", b"AA"), 1.0);
    }
}
