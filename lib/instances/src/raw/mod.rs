use crate::Result;

pub mod cvrp;

/// Conversion from unvalidated parser output into a domain type. Fails when the
/// raw fields are inconsistent.
pub trait FromRaw<T> where Self: Sized {
  fn from_raw(raw: T) -> Result<Self>;
}
