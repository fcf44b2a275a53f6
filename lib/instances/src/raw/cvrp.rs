use crate::dataset::cvrp::{Demand, Loc, Point};
use crate::{Error, Result};

/// Buffers accumulated by a single scan of a TSPLIB-style CVRP file. Ids have
/// already been shifted to 0-based indices, nothing else has been checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCvrp {
  pub dimension: usize,
  pub capacity: Demand,
  pub coordinates: Vec<Point>,
  pub demands: Vec<Demand>,
  pub depot_id: i64,
  pub permutation: Vec<Loc>,
}

impl RawCvrp {
  /// Sets the node count, growing or shrinking both node buffers. Entries that
  /// were not written yet read as the origin with zero demand. Fails without
  /// touching the buffers if they cannot grow that far.
  pub fn set_dimension(&mut self, dimension: usize) -> Result<()> {
    let extra = dimension.saturating_sub(self.coordinates.len());
    self.coordinates.try_reserve_exact(extra)
      .and_then(|_| self.demands.try_reserve_exact(dimension.saturating_sub(self.demands.len())))
      .map_err(|_| Error::invalid_data(format!("cannot allocate buffers for {} nodes", dimension)))?;
    self.dimension = dimension;
    self.coordinates.resize(dimension, Point::default());
    self.demands.resize(dimension, 0);
    Ok(())
  }

  /// Maps a 1-based file id onto a buffer index, `None` if the id is outside
  /// `1..=len`.
  pub(crate) fn slot(id: i64, len: usize) -> Option<usize> {
    if id >= 1 && (id as u64) <= len as u64 {
      Some(id as usize - 1)
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resize_keeps_written_entries() {
    let mut raw = RawCvrp::default();
    raw.set_dimension(2).unwrap();
    raw.coordinates[1] = Point::new(3.0, 4.0);
    raw.demands[1] = 5;
    raw.set_dimension(3).unwrap();
    assert_eq!(raw.coordinates, vec![Point::default(), Point::new(3.0, 4.0), Point::default()]);
    assert_eq!(raw.demands, vec![0, 5, 0]);
  }

  #[test]
  fn oversized_dimension_is_an_error() {
    let mut raw = RawCvrp::default();
    raw.set_dimension(1).unwrap();
    let err = raw.set_dimension(usize::MAX).unwrap_err();
    assert_eq!(err.parse_kind(), Some(crate::ParseErrorKind::InvalidData));
    assert_eq!(raw.dimension, 1);
    assert_eq!(raw.coordinates.len(), 1);
  }

  #[test]
  fn slot_is_one_based() {
    assert_eq!(RawCvrp::slot(1, 3), Some(0));
    assert_eq!(RawCvrp::slot(3, 3), Some(2));
    assert_eq!(RawCvrp::slot(0, 3), None);
    assert_eq!(RawCvrp::slot(-2, 3), None);
    assert_eq!(RawCvrp::slot(4, 3), None);
    assert_eq!(RawCvrp::slot(1, 0), None);
  }
}
