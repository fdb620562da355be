//! In-memory track store.
//!
//! A [`Track`] holds one track's features grouped per chromosome, in
//! the order chromosomes were first seen, and hands out sorted owned
//! streams - the same `read(chromosome) -> sorted iterator` /
//! `write(chromosome, iterator)` contract a persistent backend would
//! provide. Loaders sort each chromosome on finalization; `read` never
//! re-sorts.

use crate::bed::{BedReader, BedWriter};
use crate::error::Result;
use crate::feature::{Feature, FEATURE_FIELDS, INTERVAL_FIELDS};
use crate::stream::FeatureStream;
use rustc_hash::FxHashMap;
use std::io::{Read, Write};
use std::path::Path;

/// One track's features, per chromosome, plus its declared field schema.
#[derive(Debug, Clone, Default)]
pub struct Track {
    /// Chromosome order (preserves first-seen order).
    order: Vec<String>,
    data: FxHashMap<String, Vec<Feature>>,
    /// Ordered field names describing the feature columns.
    pub fields: Vec<String>,
}

impl Track {
    /// Create an empty track with the standard feature schema.
    pub fn new() -> Self {
        Self::with_fields(FEATURE_FIELDS)
    }

    /// Create an empty track with an explicit schema.
    pub fn with_fields(fields: &[&str]) -> Self {
        Self {
            order: Vec::new(),
            data: FxHashMap::default(),
            fields: fields.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Load a track from a BED file, sorting each chromosome.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(BedReader::from_path(path)?)
    }

    /// Load a track from any BED reader, sorting each chromosome.
    pub fn from_reader<R: Read>(reader: BedReader<R>) -> Result<Self> {
        let mut track = Self::new();
        for record in reader.records() {
            let record = record?;
            track.insert(&record.chrom, record.feature);
        }
        track.sort();
        Ok(track)
    }

    /// Append one feature; call [`Track::sort`] before reading if
    /// insertion order is not already sorted.
    pub fn insert(&mut self, chrom: &str, feature: Feature) {
        if !self.data.contains_key(chrom) {
            self.order.push(chrom.to_string());
        }
        self.data.entry(chrom.to_string()).or_default().push(feature);
    }

    /// Consume a result stream into one chromosome (the writer side of
    /// the storage contract). The stream is assumed sorted, as every
    /// operation in this crate emits.
    pub fn write<I>(&mut self, chrom: &str, stream: I) -> Result<()>
    where
        I: Iterator<Item = Result<Feature>>,
    {
        for feature in stream {
            self.insert(chrom, feature?);
        }
        Ok(())
    }

    /// Sort every chromosome by `(start, end)`.
    pub fn sort(&mut self) {
        for features in self.data.values_mut() {
            features.sort_by(Feature::cmp_position);
        }
    }

    /// A sorted owned stream over one chromosome (the reader side of
    /// the storage contract). Unknown chromosomes yield an empty
    /// stream.
    pub fn read(&self, chrom: &str) -> FeatureStream {
        match self.data.get(chrom) {
            Some(features) => Box::new(features.clone().into_iter().map(Ok)),
            None => Box::new(std::iter::empty()),
        }
    }

    /// Borrowing access to one chromosome's features.
    pub fn features(&self, chrom: &str) -> &[Feature] {
        self.data.get(chrom).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Chromosome names in first-seen order.
    pub fn chromosomes(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// Total number of features across all chromosomes.
    pub fn len(&self) -> usize {
        self.data.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize the whole track as BED, chromosomes in stored order.
    ///
    /// Tracks with a bare interval schema come out as three columns,
    /// everything else as the full feature line.
    pub fn to_writer<W: Write>(&self, writer: &mut BedWriter<W>) -> Result<()> {
        let bare = self
            .fields
            .iter()
            .map(String::as_str)
            .eq(INTERVAL_FIELDS.iter().copied());
        for chrom in &self.order {
            for feature in &self.data[chrom] {
                if bare {
                    writer.write_span(chrom, feature.start, feature.end)?;
                } else {
                    writer.write_feature(chrom, feature)?;
                }
            }
        }
        writer.flush()
    }

    /// Write the track to a BED file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BedWriter::create(path)?;
        self.to_writer(&mut writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_groups_and_sorts() {
        let content = "chr2\t50\t60\nchr1\t30\t40\nchr1\t10\t20\n";
        let track = Track::from_reader(BedReader::new(content.as_bytes())).unwrap();

        let chroms: Vec<_> = track.chromosomes().cloned().collect();
        assert_eq!(chroms, vec!["chr2".to_string(), "chr1".to_string()]);

        let chr1: Vec<_> = track
            .read("chr1")
            .collect::<Result<Vec<_>>>()
            .unwrap()
            .iter()
            .map(Feature::position)
            .collect();
        assert_eq!(chr1, vec![(10, 20), (30, 40)]);
    }

    #[test]
    fn test_unknown_chromosome_reads_empty() {
        let track = Track::new();
        assert_eq!(track.read("chrMissing").count(), 0);
    }

    #[test]
    fn test_write_stream_into_chromosome() {
        let mut track = Track::new();
        let stream = vec![Ok(Feature::new(0, 5)), Ok(Feature::new(10, 15))];
        track.write("chrI", stream.into_iter()).unwrap();
        assert_eq!(track.len(), 2);
        assert_eq!(track.features("chrI")[1].position(), (10, 15));
    }

    #[test]
    fn test_round_trip_through_bed() {
        let content = "chr1\t10\t20\tsite\t1.5\t+\n";
        let track = Track::from_reader(BedReader::new(content.as_bytes())).unwrap();

        let mut output = Vec::new();
        {
            let mut writer = BedWriter::new(&mut output);
            track.to_writer(&mut writer).unwrap();
        }
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "chr1\t10\t20\tsite\t1.5\t+\n");
    }

    #[test]
    fn test_interval_schema_writes_three_columns() {
        let mut track = Track::with_fields(INTERVAL_FIELDS);
        track.insert("chr1", Feature::new(3, 9));

        let mut output = Vec::new();
        {
            let mut writer = BedWriter::new(&mut output);
            track.to_writer(&mut writer).unwrap();
        }
        assert_eq!(String::from_utf8(output).unwrap(), "chr1\t3\t9\n");
    }
}
