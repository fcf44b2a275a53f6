use std::fmt;
use std::path::Path;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FileErrorKind {
  NotFound,
  NotARegularFile,
  Empty,
  AccessDenied,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ParseErrorKind {
  /// The parsed fields violate an instance invariant.
  InvalidData,
  /// A token could not be read as the number its field requires.
  MalformedNumber,
  /// The file ended inside a fixed-length section.
  UnexpectedEof,
}

impl fmt::Display for FileErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      FileErrorKind::NotFound => "file not found",
      FileErrorKind::NotARegularFile => "not a regular file",
      FileErrorKind::Empty => "file is empty",
      FileErrorKind::AccessDenied => "access denied",
    };
    f.write_str(s)
  }
}

impl fmt::Display for ParseErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      ParseErrorKind::InvalidData => "invalid data",
      ParseErrorKind::MalformedNumber => "malformed number",
      ParseErrorKind::UnexpectedEof => "unexpected end of file",
    };
    f.write_str(s)
  }
}

/// Every failure the instance reader can report. None of them are recoverable
/// within a single parse attempt.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Error {
  #[error("{kind}: {path}")]
  File { kind: FileErrorKind, path: String },

  #[error("{kind}: {context}")]
  Parse { kind: ParseErrorKind, context: String },

  #[error("unknown error: {message}")]
  Unknown { message: String },
}

impl Error {
  pub fn file(kind: FileErrorKind, path: impl AsRef<Path>) -> Self {
    Error::File { kind, path: path.as_ref().display().to_string() }
  }

  pub fn parse(kind: ParseErrorKind, context: impl Into<String>) -> Self {
    Error::Parse { kind, context: context.into() }
  }

  pub fn invalid_data(context: impl Into<String>) -> Self {
    Self::parse(ParseErrorKind::InvalidData, context)
  }

  pub fn unknown(message: impl Into<String>) -> Self {
    Error::Unknown { message: message.into() }
  }

  pub fn file_kind(&self) -> Option<FileErrorKind> {
    match self {
      Error::File { kind, .. } => Some(*kind),
      _ => None,
    }
  }

  pub fn parse_kind(&self) -> Option<ParseErrorKind> {
    match self {
      Error::Parse { kind, .. } => Some(*kind),
      _ => None,
    }
  }
}

impl From<std::io::Error> for Error {
  fn from(e: std::io::Error) -> Self {
    Error::unknown(e.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_names_kind_and_path() {
    let e = Error::file(FileErrorKind::Empty, "data/E-n22-k4.vrp");
    assert_eq!(e.to_string(), "file is empty: data/E-n22-k4.vrp");
    assert_eq!(e.file_kind(), Some(FileErrorKind::Empty));
    assert_eq!(e.parse_kind(), None);
  }

  #[test]
  fn io_errors_are_unclassified() {
    let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
    let e: Error = io.into();
    assert!(matches!(e, Error::Unknown { .. }));
    assert_eq!(e.to_string(), "unknown error: stream did not contain valid UTF-8");
  }
}
