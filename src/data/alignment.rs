// alignment.rs - Aligned sequence collection and taxon filtering

use std::collections::HashSet;
use regex::Regex;

/// A single aligned sequence
#[derive(Debug, Clone)]
pub struct SeqRecord {
    pub id: String,
    pub seq: Vec<u8>,
}

impl SeqRecord {
    pub fn new(id: &str, seq: &[u8]) -> Self {
        Self {
            id: id.to_string(),
            seq: seq.to_ascii_uppercase(),
        }
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

/// Taxon selection criteria applied before tree construction
#[derive(Debug, Default)]
pub struct TaxonFilter<'a> {
    pub include_regex: Option<&'a Regex>,
    pub exclude_regex: Option<&'a Regex>,
    pub include_set: Option<&'a HashSet<String>>,
    pub exclude_set: Option<&'a HashSet<String>>,
}

impl TaxonFilter<'_> {
    pub fn is_active(&self) -> bool {
        self.include_regex.is_some()
            || self.exclude_regex.is_some()
            || self.include_set.is_some()
            || self.exclude_set.is_some()
    }

    fn keeps(&self, id: &str) -> bool {
        if let Some(re) = self.include_regex {
            if !re.is_match(id) {
                return false;
            }
        }
        if let Some(re) = self.exclude_regex {
            if re.is_match(id) {
                return false;
            }
        }
        if let Some(set) = self.include_set {
            if !set.contains(id) {
                return false;
            }
        }
        if let Some(set) = self.exclude_set {
            if set.contains(id) {
                return false;
            }
        }
        true
    }
}

/// Multiple sequence alignment: equal-length sequences with unique ids
#[derive(Debug, Clone)]
pub struct Alignment {
    records: Vec<SeqRecord>,
    length: usize,
}

impl Alignment {
    pub fn new(records: Vec<SeqRecord>) -> Result<Self, String> {
        if records.is_empty() {
            return Err("Alignment contains no sequences".to_string());
        }
        let length = records[0].len();
        if length == 0 {
            return Err("Alignment sequences are empty".to_string());
        }
        let mut seen = HashSet::new();
        for record in &records {
            if record.id.is_empty() {
                return Err("Alignment contains a sequence without an identifier".to_string());
            }
            if !seen.insert(record.id.clone()) {
                return Err(format!("Duplicate sequence identifier: '{}'", record.id));
            }
            if record.len() != length {
                return Err(format!(
                    "Sequence '{}' has length {} but alignment length is {}",
                    record.id,
                    record.len(),
                    length
                ));
            }
        }
        Ok(Self { records, length })
    }

    pub fn records(&self) -> &[SeqRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of columns
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&SeqRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Fraction of gap characters across the whole alignment
    pub fn gap_fraction(&self) -> f64 {
        let total = self.records.len() * self.length;
        if total == 0 {
            return 0.0;
        }
        let gaps: usize = self
            .records
            .iter()
            .map(|r| r.seq.iter().filter(|&&c| c == b'-').count())
            .sum();
        gaps as f64 / total as f64
    }

    /// Apply taxon filters, returning the reduced alignment
    pub fn filter(&self, filter: &TaxonFilter) -> Result<Alignment, String> {
        if !filter.is_active() {
            return Ok(self.clone());
        }
        let kept: Vec<SeqRecord> = self
            .records
            .iter()
            .filter(|r| filter.keeps(&r.id))
            .cloned()
            .collect();

        let removed = self.records.len() - kept.len();
        if removed > 0 {
            println!(
                "🔍 Taxon filters removed {} of {} sequences",
                removed,
                self.records.len()
            );
        }
        if kept.is_empty() {
            return Err("Taxon filters removed every sequence".to_string());
        }
        Alignment::new(kept)
    }
}
