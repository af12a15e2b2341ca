//! Line-oriented text codecs for rename tables.
//!
//! Two formats are supported: the tagged one (`CL:`/`FD:`/`MD:` records)
//! and the compact one, which distinguishes record kinds by field count.
//! The format is always chosen by the caller; nothing is auto-detected.

mod csrg;
mod srg;

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::MappingError;
use crate::mappings::Mappings;

/// Text representation used when reading or writing mapping documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingsFormat {
    /// Tagged records: `CL: a b`, `FD: a b`, `MD: a adesc b bdesc`.
    /// Package records (`PK:`) are read but discarded.
    Srg,
    /// Positional records: 2 fields for a class, 3 for a field,
    /// 4 for a method. Member records may precede their class record.
    CompactSrg,
}

impl fmt::Display for MappingsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MappingsFormat::Srg => "srg",
            MappingsFormat::CompactSrg => "csrg",
        })
    }
}

impl MappingsFormat {
    /// Parses a whole document from an iterator of lines. Blank lines and
    /// `#` comments are skipped; the first malformed line aborts.
    ///
    /// Tagged documents resolve record by record and come back as the
    /// mutable kind; compact documents resolve in a second phase and come
    /// back immutable.
    pub fn parse_line_iter<I, S>(self, lines: I) -> Result<Mappings, MappingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = match self {
            MappingsFormat::Srg => srg::parse(lines.into_iter())?,
            MappingsFormat::CompactSrg => csrg::parse(lines.into_iter())?,
        };
        debug!(
            format = %self,
            classes = parsed.classes().len(),
            methods = parsed.methods().len(),
            fields = parsed.fields().len(),
            "parsed mapping document"
        );
        Ok(parsed)
    }

    pub fn parse_str(self, source: &str) -> Result<Mappings, MappingError> {
        self.parse_line_iter(source.lines())
    }

    pub fn parse_reader<R: BufRead>(self, reader: R) -> Result<Mappings, MappingError> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line?);
        }
        self.parse_line_iter(lines)
    }

    pub fn parse_file(self, path: impl AsRef<Path>) -> Result<Mappings, MappingError> {
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file))
    }

    /// Serialized document as individual lines, without terminators.
    /// Classes come first, then fields, then methods, each in insertion
    /// order.
    pub fn to_lines(self, mappings: &Mappings) -> Vec<String> {
        match self {
            MappingsFormat::Srg => srg::to_lines(mappings),
            MappingsFormat::CompactSrg => csrg::to_lines(mappings),
        }
    }

    /// Writes the document to a sink, one `\n`-terminated record per line.
    pub fn write_to<W: Write>(
        self,
        mappings: &Mappings,
        writer: &mut W,
    ) -> Result<(), MappingError> {
        for line in self.to_lines(mappings) {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }

    pub fn write_file(
        self,
        mappings: &Mappings,
        path: impl AsRef<Path>,
    ) -> Result<(), MappingError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(mappings, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Strips comment and blank lines; returns the trimmed payload otherwise.
fn content_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed)
    }
}
