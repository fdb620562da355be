//! Streaming BED adapter.
//!
//! The one concrete I/O collaborator this crate ships: BED5+ text in,
//! BED text out. Everything else (WIG, GFF, bigWig, database backends)
//! is expected to present the same stream-of-features contract from the
//! outside.

use crate::config::normalize_end;
use crate::error::{Result, TrackError};
use crate::feature::{Feature, Strand};
use memchr::memchr;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// One parsed BED line: the chromosome plus the feature proper.
#[derive(Debug, Clone, PartialEq)]
pub struct BedRecord {
    pub chrom: String,
    pub feature: Feature,
}

/// A streaming BED reader.
pub struct BedReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
}

impl BedReader<File> {
    /// Open a BED file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> BedReader<R> {
    /// Create a new BED reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: String::with_capacity(1024),
        }
    }

    /// Read the next BED record, skipping blank lines, comments, and
    /// `track`/`browser` headers.
    pub fn read_record(&mut self) -> Result<Option<BedRecord>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_line(&mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if line.is_empty()
                || line.starts_with('#')
                || line.starts_with("track")
                || line.starts_with("browser")
            {
                continue;
            }

            return self.parse_line(line).map(Some);
        }
    }

    fn parse_line(&self, line: &str) -> Result<BedRecord> {
        let bytes = line.as_bytes();

        let tab1 = memchr(b'\t', bytes).ok_or_else(|| self.error("expected at least 3 fields"))?;
        let chrom = &line[..tab1];

        let rest = &line[tab1 + 1..];
        let tab2 = memchr(b'\t', rest.as_bytes())
            .ok_or_else(|| self.error("expected at least 3 fields"))?;
        let start: i64 = self.parse_position(&rest[..tab2], "start")?;

        let after_start = &rest[tab2 + 1..];
        let end_len = memchr(b'\t', after_start.as_bytes()).unwrap_or(after_start.len());
        let end: i64 = self.parse_position(&after_start[..end_len], "end")?;

        let end = normalize_end(start, end);
        if start >= end {
            return Err(self.error(&format!(
                "start ({}) must be less than end ({})",
                start, end
            )));
        }

        let mut feature = Feature::new(start, end);
        if end_len < after_start.len() {
            let mut optional = after_start[end_len + 1..].split('\t');
            if let Some(name) = optional.next() {
                feature.name = name.to_string();
            }
            if let Some(score) = optional.next() {
                feature.score = score.parse().unwrap_or(0.0);
            }
            if let Some(strand) = optional.next() {
                feature.strand = strand.chars().next().map(Strand::from_char).unwrap_or_default();
            }
            feature.rest = optional.map(str::to_string).collect();
        }

        Ok(BedRecord {
            chrom: chrom.to_string(),
            feature,
        })
    }

    fn parse_position(&self, s: &str, field_name: &str) -> Result<i64> {
        s.parse()
            .map_err(|_| self.error(&format!("invalid {} position: '{}'", field_name, s)))
    }

    fn error(&self, message: &str) -> TrackError {
        TrackError::Parse {
            line: self.line_number,
            message: message.to_string(),
        }
    }

    /// Get an iterator over all records.
    pub fn records(self) -> BedRecordIter<R> {
        BedRecordIter { reader: self }
    }
}

/// Iterator over BED records.
pub struct BedRecordIter<R: Read> {
    reader: BedReader<R>,
}

impl<R: Read> Iterator for BedRecordIter<R> {
    type Item = Result<BedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Buffer size for BedWriter.
const WRITE_BUFFER_SIZE: usize = 256 * 1024;

/// Buffered BED output with allocation-free number formatting.
pub struct BedWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    ryu_buf: ryu::Buffer,
}

impl<W: Write> BedWriter<W> {
    pub fn new(output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(WRITE_BUFFER_SIZE, output),
            itoa_buf: itoa::Buffer::new(),
            ryu_buf: ryu::Buffer::new(),
        }
    }

    /// Write a bare three-column line.
    pub fn write_span(&mut self, chrom: &str, start: i64, end: i64) -> Result<()> {
        self.writer.write_all(chrom.as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer.write_all(self.itoa_buf.format(start).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer.write_all(self.itoa_buf.format(end).as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write a full six-or-more-column line.
    pub fn write_feature(&mut self, chrom: &str, feature: &Feature) -> Result<()> {
        self.writer.write_all(chrom.as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(feature.start).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(feature.end).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer.write_all(feature.name.as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.ryu_buf.format(feature.score).as_bytes())?;
        self.writer.write_all(b"\t")?;
        write!(self.writer, "{}", feature.strand)?;
        for extra in &feature.rest {
            self.writer.write_all(b"\t")?;
            self.writer.write_all(extra.as_bytes())?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(TrackError::Io)
    }
}

impl BedWriter<File> {
    /// Create a writer targeting a new file.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(file))
    }
}

impl BedWriter<io::Stdout> {
    /// Create a writer targeting stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn read_all(content: &str) -> Result<Vec<BedRecord>> {
        BedReader::new(content.as_bytes()).records().collect()
    }

    #[test]
    fn test_parse_bed3() {
        let records = read_all("chr1\t100\t200\nchr1\t300\t400\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].chrom, "chr1");
        assert_eq!(records[0].feature.position(), (100, 200));
    }

    #[test]
    fn test_parse_bed6_with_extras() {
        let records =
            read_all("chr2\t10\t20\tpeak1\t3.5\t-\taaa\tbbb\n").unwrap();
        let f = &records[0].feature;
        assert_eq!(f.name, "peak1");
        assert_eq!(f.score, 3.5);
        assert_eq!(f.strand, Strand::Reverse);
        assert_eq!(f.rest, vec!["aaa".to_string(), "bbb".to_string()]);
    }

    #[test]
    fn test_skips_comments_and_headers() {
        let content = "# a comment\ntrack name=foo\nbrowser position chr1\n\nchr1\t5\t10\n";
        let records = read_all(content).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_unparseable_score_defaults_to_zero() {
        let records = read_all("chr1\t5\t10\tx\t.\t+\n").unwrap();
        assert_eq!(records[0].feature.score, 0.0);
        assert_eq!(records[0].feature.strand, Strand::Forward);
    }

    #[test]
    fn test_inverted_interval_rejected() {
        let result = read_all("chr1\t200\t100\n");
        assert!(matches!(result, Err(TrackError::Parse { line: 1, .. })));
    }

    #[test]
    #[serial]
    fn test_zero_length_policy() {
        crate::config::set_widen_zero_length(false);
        assert!(read_all("chr1\t100\t100\n").is_err());

        crate::config::set_widen_zero_length(true);
        let records = read_all("chr1\t100\t100\n").unwrap();
        assert_eq!(records[0].feature.position(), (100, 101));
        crate::config::set_widen_zero_length(false);
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert!(read_all("chr1\t100\n").is_err());
    }

    #[test]
    fn test_writer_round_trip() {
        let mut output = Vec::new();
        {
            let mut writer = BedWriter::new(&mut output);
            let feature = Feature::new(100, 200)
                .with_name("site")
                .with_score(2.5)
                .with_strand(Strand::Forward);
            writer.write_feature("chr1", &feature).unwrap();
            writer.write_span("chr2", 5, 10).unwrap();
            writer.flush().unwrap();
        }
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "chr1\t100\t200\tsite\t2.5\t+\nchr2\t5\t10\n");

        let records = read_all(&text).unwrap();
        assert_eq!(records[0].feature.name, "site");
        assert_eq!(records[1].chrom, "chr2");
    }
}
