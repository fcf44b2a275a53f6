//! Reader for CVRP instances in a TSPLIB-like section format:
//!
//! ```text
//! DIMENSION : 3
//! CAPACITY : 100
//! PERMUTATION : 2 3
//! NODE_COORD_SECTION
//! 1 0.0 0.0
//! 2 3.0 4.0
//! 3 -1.5 2.0
//! DEMAND_SECTION
//! 1 0
//! 2 30
//! 3 45
//! DEPOT_SECTION
//! 1
//! -1
//! EOF
//! ```
//!
//! Sections may come in any order, but `DIMENSION` has to precede the two
//! fixed-length sections, which otherwise read zero entries. Lines are matched
//! against the markers by substring, so annotations after a marker are fine.
//! Node ids in the file are 1-based and become 0-based indices on the way in.
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::*;

use crate::{Error, FileErrorKind, ParseErrorKind, Result};
use crate::dataset::cvrp::{CvrpInstance, Loc, Point};
use crate::raw::{cvrp::RawCvrp, FromRaw};
use super::{ParseInstance, common::*};

#[derive(Debug, Copy, Clone)]
pub struct TsplibFmt<P>(pub P);

impl<P: AsRef<Path>> ParseInstance<TsplibFmt<P>> for CvrpInstance {
  fn parse(input: TsplibFmt<P>) -> Result<Self> {
    let raw = read_file(input.0.as_ref())?;
    CvrpInstance::from_raw(raw)
  }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Marker {
  Dimension,
  Capacity,
  Permutation,
  NodeCoordSection,
  DemandSection,
  DepotSection,
  End,
}

/// Lookup order when a line contains several markers.
const MARKERS: [Marker; 7] = [
  Marker::Dimension,
  Marker::Capacity,
  Marker::Permutation,
  Marker::NodeCoordSection,
  Marker::DemandSection,
  Marker::DepotSection,
  Marker::End,
];

impl Marker {
  fn keyword(self) -> &'static str {
    match self {
      Marker::Dimension => "DIMENSION",
      Marker::Capacity => "CAPACITY",
      Marker::Permutation => "PERMUTATION",
      Marker::NodeCoordSection => "NODE_COORD_SECTION",
      Marker::DemandSection => "DEMAND_SECTION",
      Marker::DepotSection => "DEPOT_SECTION",
      Marker::End => "EOF",
    }
  }

  fn detect(line: &str) -> Option<Marker> {
    MARKERS.iter().copied().find(|m| line.contains(m.keyword()))
  }
}


/// Checks, in order, that `path` exists, is a regular file, is not empty and
/// can be opened. Returns the opened file.
pub fn open_file(path: &Path) -> Result<BufReader<File>> {
  let metadata = match std::fs::metadata(path) {
    Ok(m) => m,
    Err(e) if e.kind() == io::ErrorKind::PermissionDenied => return Err(Error::file(FileErrorKind::AccessDenied, path)),
    Err(_) => return Err(Error::file(FileErrorKind::NotFound, path)),
  };
  if !metadata.is_file() {
    return Err(Error::file(FileErrorKind::NotARegularFile, path));
  }
  if metadata.len() == 0 {
    return Err(Error::file(FileErrorKind::Empty, path));
  }
  let file = File::open(path).map_err(|_| Error::file(FileErrorKind::AccessDenied, path))?;
  Ok(BufReader::new(file))
}

#[instrument(level = "debug")]
pub fn read_file(path: &Path) -> Result<RawCvrp> {
  let reader = open_file(path)?;
  read_raw(reader)
}

/// Single forward pass over `reader`, stopping at the `EOF` marker or at the
/// physical end of input. No cross-field validation happens here.
pub fn read_raw<R: BufRead>(reader: R) -> Result<RawCvrp> {
  let mut scanner = Scanner::new(reader);
  let mut raw = RawCvrp::default();

  while let Some(line) = scanner.next_line()? {
    let marker = match Marker::detect(&line) {
      Some(m) => m,
      None => continue,
    };
    trace!(line = scanner.line_no, ?marker);

    match marker {
      Marker::Dimension => {
        let dimension = header_value(&line, marker, scanner.line_no, dimension_token)?;
        debug!(dimension);
        raw.set_dimension(dimension)?;
      },
      Marker::Capacity => {
        raw.capacity = header_value(&line, marker, scanner.line_no, int_token)?;
        debug!(capacity = raw.capacity);
      },
      Marker::Permutation => {
        raw.permutation = read_permutation(&line, scanner.line_no)?;
        debug!(len = raw.permutation.len(), "initial permutation");
      },
      Marker::NodeCoordSection => read_coordinates(&mut scanner, &mut raw)?,
      Marker::DemandSection => read_demands(&mut scanner, &mut raw)?,
      Marker::DepotSection => {
        let id = scanner.expect_token(marker, "depot id", int_token)?;
        raw.depot_id = id.saturating_sub(1);
        debug!(depot_id = raw.depot_id);
      },
      Marker::End => break,
    }
  }

  Ok(raw)
}

fn malformed(line: usize, token: &str, field: &str) -> Error {
  Error::parse(
    ParseErrorKind::MalformedNumber,
    format!("line {}: cannot read `{}` as {}", line, token, field),
  )
}

/// First token after the colon of a header line; anything after it is ignored.
fn header_value<T>(line: &str, marker: Marker, line_no: usize, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
  let field = marker.keyword();
  let token = header_payload(line, field).split_whitespace().next()
    .ok_or_else(|| malformed(line_no, "", field))?;
  parse(token).ok_or_else(|| malformed(line_no, token, field))
}

fn read_permutation(line: &str, line_no: usize) -> Result<Vec<Loc>> {
  header_payload(line, Marker::Permutation.keyword())
    .split_whitespace()
    .map(|token| {
      let id = int_token(token).ok_or_else(|| malformed(line_no, token, "permutation entry"))?;
      if id < 1 {
        return Err(Error::invalid_data(format!(
          "line {}: permutation entry {} is not a 1-based node id", line_no, id
        )));
      }
      Ok((id - 1) as Loc)
    })
    .collect()
}

fn read_coordinates<R: BufRead>(scanner: &mut Scanner<R>, raw: &mut RawCvrp) -> Result<()> {
  let section = Marker::NodeCoordSection;
  let n = raw.dimension;
  debug!(entries = n, "reading {}", section.keyword());
  for _ in 0..n {
    let id = scanner.expect_token(section, "node id", int_token)?;
    let x = scanner.expect_token(section, "x coordinate", float_token)?;
    let y = scanner.expect_token(section, "y coordinate", float_token)?;
    match RawCvrp::slot(id, n) {
      Some(i) => raw.coordinates[i] = Point::new(x, y),
      None => warn!(id, line = scanner.line_no, "node id out of range, coordinates ignored"),
    }
  }
  Ok(())
}

fn read_demands<R: BufRead>(scanner: &mut Scanner<R>, raw: &mut RawCvrp) -> Result<()> {
  let section = Marker::DemandSection;
  let n = raw.dimension;
  debug!(entries = n, "reading {}", section.keyword());
  for _ in 0..n {
    let id = scanner.expect_token(section, "node id", int_token)?;
    let demand = scanner.expect_token(section, "demand", int_token)?;
    match RawCvrp::slot(id, n) {
      Some(i) => raw.demands[i] = demand,
      None => warn!(id, line = scanner.line_no, "node id out of range, demand ignored"),
    }
  }
  Ok(())
}


/// Line and token reader over the same stream. Section bodies pull tokens
/// across line breaks; whatever they leave of their last line is handed out
/// as the next line.
struct Scanner<R> {
  reader: R,
  bytes: Vec<u8>,
  buffer: String,
  cursor: usize,
  line_no: usize,
}

impl<R: BufRead> Scanner<R> {
  fn new(reader: R) -> Self {
    Scanner { reader, bytes: Vec::new(), buffer: String::new(), cursor: 0, line_no: 0 }
  }

  /// Reads the next physical line. Bytes that are not UTF-8 (Latin-1 names and
  /// comments) are replaced; markers and numbers are ASCII.
  fn fill(&mut self) -> Result<bool> {
    self.bytes.clear();
    self.cursor = 0;
    let n = self.reader.read_until(b'\n', &mut self.bytes)?;
    self.buffer = String::from_utf8_lossy(&self.bytes).into_owned();
    if n > 0 {
      self.line_no += 1;
    }
    Ok(n > 0)
  }

  /// Next non-blank line, or `None` at the end of input.
  fn next_line(&mut self) -> Result<Option<String>> {
    while self.buffer[self.cursor..].trim().is_empty() {
      if !self.fill()? {
        return Ok(None);
      }
    }
    let line = self.buffer[self.cursor..].to_string();
    self.cursor = self.buffer.len();
    Ok(Some(line))
  }

  fn next_token(&mut self) -> Result<Option<String>> {
    loop {
      let rest = &self.buffer[self.cursor..];
      let trimmed = rest.trim_start();
      if !trimmed.is_empty() {
        let start = self.cursor + (rest.len() - trimmed.len());
        let end = start + trimmed.find(char::is_whitespace).unwrap_or_else(|| trimmed.len());
        self.cursor = end;
        return Ok(Some(self.buffer[start..end].to_string()));
      }
      if !self.fill()? {
        return Ok(None);
      }
    }
  }

  fn expect_token<T>(&mut self, section: Marker, field: &str, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
    let token = self.next_token()?.ok_or_else(|| Error::parse(
      ParseErrorKind::UnexpectedEof,
      format!("input ended inside {} while reading {}", section.keyword(), field),
    ))?;
    parse(&token).ok_or_else(|| malformed(self.line_no, &token, field))
  }
}
