//! Reading and validating capacitated vehicle routing (CVRP) instances.
//!
//! Files are scanned once by [`parsers::tsplib`] into [`raw::cvrp::RawCvrp`]
//! buffers, which [`CvrpInstance::create`] then checks and turns into an
//! immutable instance.
use std::path::Path;

mod error;
pub use error::{Error, FileErrorKind, ParseErrorKind, Result};

pub mod dataset;
pub mod parsers;
pub mod raw;

pub use dataset::cvrp::{CvrpInstance, Demand, Loc, Node, Point};
use parsers::{ParseInstance, TsplibFmt};

/// Reads the instance stored at `path`.
pub fn read_instance(path: impl AsRef<Path>) -> Result<CvrpInstance> {
  CvrpInstance::parse(TsplibFmt(path))
}
