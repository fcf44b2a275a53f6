use super::*;
use crate::parsers::{ParseInstance, TsplibFmt};
use crate::raw::{cvrp::RawCvrp, FromRaw};
use crate::Error;
use std::fmt;

use itertools::Itertools;

pub type Demand = i64;
pub type Loc = usize;

#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

impl Point {
  pub fn new(x: f64, y: f64) -> Self { Point { x, y } }
}

#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct Node {
  pub location: Point,
  pub demand: Demand,
}

/// A validated CVRP instance. Node `i` corresponds to node id `i + 1` of the
/// source file, and every index stored here (depot, permutation) is 0-based.
#[derive(Debug, Clone, PartialEq)]
pub struct CvrpInstance {
  capacity: Demand,
  nodes: Vec<Node>,
  permutation: Vec<Loc>,
  depot_id: Loc,
  number_of_clients: usize,
}

impl CvrpInstance {
  /// Checks, in order, that the capacity is positive, that coordinates and
  /// demands have equal length, and that the depot indexes a node.
  pub fn create(
    capacity: Demand,
    coordinates: Vec<Point>,
    demands: Vec<Demand>,
    depot_id: i64,
    permutation: Vec<Loc>,
  ) -> crate::Result<CvrpInstance> {
    if capacity <= 0 {
      return Err(Error::invalid_data(format!("capacity must be positive, got {}", capacity)));
    }
    if coordinates.len() != demands.len() {
      return Err(Error::invalid_data(format!(
        "{} coordinates but {} demands", coordinates.len(), demands.len()
      )));
    }
    if depot_id < 0 || depot_id as u64 >= coordinates.len() as u64 {
      return Err(Error::invalid_data(format!(
        "depot index {} outside of 0..{}", depot_id, coordinates.len()
      )));
    }

    let nodes: Vec<Node> = coordinates.into_iter()
      .zip(demands)
      .map(|(location, demand)| Node { location, demand })
      .collect();

    Ok(CvrpInstance {
      capacity,
      nodes,
      number_of_clients: permutation.len(),
      permutation,
      depot_id: depot_id as Loc,
    })
  }

  pub fn capacity(&self) -> Demand { self.capacity }

  pub fn nodes(&self) -> &[Node] { &self.nodes }

  pub fn node(&self, i: Loc) -> Option<&Node> { self.nodes.get(i) }

  pub fn depot(&self) -> &Node { &self.nodes[self.depot_id] }

  pub fn depot_id(&self) -> Loc { self.depot_id }

  /// Visiting order supplied by the file, empty if it had none.
  pub fn initial_permutation(&self) -> &[Loc] { &self.permutation }

  pub fn dimension(&self) -> usize { self.nodes.len() }

  /// Length of the initial permutation. This only equals `dimension() - 1` when
  /// the permutation lists every client.
  pub fn number_of_clients(&self) -> usize { self.number_of_clients }

  pub fn total_demand(&self) -> Demand {
    self.nodes.iter().map(|n| n.demand).sum()
  }
}

impl FromRaw<RawCvrp> for CvrpInstance {
  fn from_raw(raw: RawCvrp) -> crate::Result<Self> {
    CvrpInstance::create(raw.capacity, raw.coordinates, raw.demands, raw.depot_id, raw.permutation)
  }
}

impl fmt::Display for CvrpInstance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "CvrpInstance:")?;
    writeln!(f, "  Capacity: {}", self.capacity)?;
    writeln!(f, "  Nodes: {}", self.nodes.len())?;
    writeln!(f, "  Depot: {}", self.depot_id)?;
    writeln!(f, "  Initial permutation size: {}", self.permutation.len())?;
    if !self.permutation.is_empty() {
      writeln!(f, "  Initial permutation: {}", self.permutation.iter().join(" "))?;
    }
    for (i, node) in self.nodes.iter().enumerate() {
      writeln!(f, "  Node {}: pos=({}, {}), demand={}", i, node.location.x, node.location.y, node.demand)?;
    }
    Ok(())
  }
}

/// Instance files in the TSPLIB-style CVRP format read by [`TsplibFmt`].
pub enum CvrpLib {}

impl Dataset for StdLayout<CvrpLib> {
  type Instance = CvrpInstance;

  fn load_instance(&self, idx: usize) -> Result<Self::Instance> {
    let path = self.instance_path(idx)?;
    let instance = CvrpInstance::parse(TsplibFmt(&path)).context(format!("failed to load {:?}", path))?;
    Ok(instance)
  }
}

impl Dataset for DynLayout<CvrpLib> {
  type Instance = CvrpInstance;

  fn load_instance(&self, idx: usize) -> Result<Self::Instance> {
    self.check_idx(idx)?;
    let path = &self.name_order[idx];
    let instance = CvrpInstance::parse(TsplibFmt(path)).context(format!("failed to load {:?}", path))?;
    Ok(instance)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ParseErrorKind;
  use proptest::prelude::*;

  fn coords(n: usize) -> Vec<Point> {
    (0..n).map(|i| Point::new(i as f64, 2.0 * i as f64)).collect()
  }

  #[test]
  fn zips_nodes_in_index_order() -> crate::Result<()> {
    let data = CvrpInstance::create(10, vec![Point::new(0., 0.), Point::new(3., 4.)], vec![0, 5], 0, vec![1])?;
    assert_eq!(data.dimension(), 2);
    assert_eq!(data.nodes()[1], Node { location: Point::new(3., 4.), demand: 5 });
    assert_eq!(data.depot(), &Node::default());
    assert_eq!(data.number_of_clients(), 1);
    assert_eq!(data.total_demand(), 5);
    Ok(())
  }

  #[test]
  fn capacity_is_checked_first() {
    let err = CvrpInstance::create(0, coords(1), vec![], 7, vec![]).unwrap_err();
    assert_eq!(err.parse_kind(), Some(ParseErrorKind::InvalidData));
    assert!(err.to_string().contains("capacity"));
  }

  #[test]
  fn client_count_follows_permutation() -> crate::Result<()> {
    let data = CvrpInstance::create(3, coords(5), vec![0; 5], 4, vec![])?;
    assert_eq!(data.number_of_clients(), 0);
    assert_eq!(data.dimension(), 5);
    Ok(())
  }

  #[test]
  fn display_lists_nodes() -> crate::Result<()> {
    let data = CvrpInstance::create(10, vec![Point::new(0., 0.), Point::new(3., 4.)], vec![0, 5], 0, vec![1])?;
    let text = data.to_string();
    assert!(text.contains("  Capacity: 10\n"));
    assert!(text.contains("  Initial permutation: 1\n"));
    assert!(text.contains("  Node 1: pos=(3, 4), demand=5\n"));
    Ok(())
  }

  proptest! {
    #[test]
    fn valid_fields_construct(capacity in 1..10_000i64, n in 1..40usize, depot_frac in 0.0..1.0f64) {
      let depot = ((n as f64 * depot_frac) as usize).min(n - 1);
      let data = CvrpInstance::create(capacity, coords(n), vec![1; n], depot as i64, vec![]).unwrap();
      prop_assert_eq!(data.dimension(), n);
      prop_assert_eq!(data.capacity(), capacity);
      prop_assert_eq!(data.depot_id(), depot);
    }

    #[test]
    fn non_positive_capacity_rejected(capacity in -10_000..=0i64, n in 1..20usize) {
      let err = CvrpInstance::create(capacity, coords(n), vec![0; n], 0, vec![]).unwrap_err();
      prop_assert_eq!(err.parse_kind(), Some(ParseErrorKind::InvalidData));
    }

    #[test]
    fn mismatched_lengths_rejected(n in 1..20usize, m in 0..20usize) {
      prop_assume!(n != m);
      let err = CvrpInstance::create(5, coords(n), vec![0; m], 0, vec![]).unwrap_err();
      prop_assert_eq!(err.parse_kind(), Some(ParseErrorKind::InvalidData));
    }

    #[test]
    fn depot_out_of_range_rejected(n in 0..20usize, over in 0..50i64) {
      let high = CvrpInstance::create(5, coords(n), vec![0; n], n as i64 + over, vec![]);
      prop_assert!(high.is_err());
      let low = CvrpInstance::create(5, coords(n), vec![0; n], -1 - over, vec![]);
      prop_assert!(low.is_err());
    }
  }
}
