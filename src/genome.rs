//! Chromosome metadata: lengths and name resolution.
//!
//! Parses .genome files (tab-delimited: chrom\tsize) and answers the
//! two questions boundary-sensitive operations ask of the assembly
//! layer: how long is this chromosome, and what is the canonical name
//! behind this synonym.

use crate::error::{Result, TrackError};
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Chromosome sizes plus a synonym table.
/// Preserves chromosome order from the input file.
#[derive(Debug, Clone, Default)]
pub struct Genome {
    /// Map of canonical chromosome name to size.
    sizes: FxHashMap<String, i64>,
    /// Chromosome order (preserves input file order).
    order: Vec<String>,
    /// Synonym -> canonical name.
    aliases: FxHashMap<String, String>,
}

impl Genome {
    /// Create an empty genome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load chromosome sizes from a file.
    /// Format: tab-delimited with chrom\tsize per line.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut genome = Self::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 2 {
                return Err(TrackError::Parse {
                    line: line_num + 1,
                    message: "genome file requires two columns: chrom and size".to_string(),
                });
            }

            let size: i64 = fields[1].parse().map_err(|_| TrackError::Parse {
                line: line_num + 1,
                message: format!("invalid chromosome size: {}", fields[1]),
            })?;

            genome.insert(fields[0].to_string(), size);
        }

        Ok(genome)
    }

    /// Insert a chromosome size (appends to order if new).
    pub fn insert(&mut self, chrom: String, size: i64) {
        if !self.sizes.contains_key(&chrom) {
            self.order.push(chrom.clone());
        }
        self.sizes.insert(chrom, size);
    }

    /// Register a synonym for a canonical chromosome name.
    pub fn add_alias(&mut self, alias: impl Into<String>, canonical: impl Into<String>) {
        self.aliases.insert(alias.into(), canonical.into());
    }

    /// Resolve any known name (canonical or synonym) to the canonical
    /// one. Returns `None` for names the assembly does not know about.
    pub fn canonical_name<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.sizes.contains_key(name) {
            return Some(name);
        }
        self.aliases
            .get(name)
            .map(String::as_str)
            .filter(|canonical| self.sizes.contains_key(*canonical))
    }

    /// The length of a chromosome, accepting synonyms.
    pub fn chrom_length(&self, name: &str) -> Option<i64> {
        self.canonical_name(name)
            .and_then(|canonical| self.sizes.get(canonical))
            .copied()
    }

    /// Like [`Genome::chrom_length`], but unknown chromosomes are an
    /// error - for call sites where a length is mandatory.
    pub fn require_chrom_length(&self, name: &str) -> Result<i64> {
        self.chrom_length(name)
            .ok_or_else(|| TrackError::UnknownChromosome(name.to_string()))
    }

    /// Check if a chromosome (or synonym) exists.
    pub fn has_chrom(&self, name: &str) -> bool {
        self.canonical_name(name).is_some()
    }

    /// All canonical chromosome names, in file order.
    pub fn chromosomes(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// Number of chromosomes.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}
