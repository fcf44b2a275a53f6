use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fmt;


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DatasetError {
  UnknownInstanceName,
  IndexOutOfRange,
}

impl fmt::Display for DatasetError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

impl std::error::Error for DatasetError {}


pub trait IdxNameMap {
  fn index_to_name(&self, idx: usize) -> Result<Cow<str>>;

  fn name_to_index(&self, name: &str) -> Result<usize>;

  fn len(&self) -> usize;

  fn is_empty(&self) -> bool { self.len() == 0 }

  fn check_idx(&self, idx: usize) -> Result<()> {
    if self.len() <= idx {
      Err(DatasetError::IndexOutOfRange.into())
    } else {
      Ok(())
    }
  }
}

impl<'a, D: IdxNameMap> IdxNameMap for &'a D {
  fn index_to_name(&self, idx: usize) -> Result<Cow<str>> {
    D::index_to_name(self, idx)
  }

  fn name_to_index(&self, name: &str) -> Result<usize> {
    D::name_to_index(self, name)
  }

  fn len(&self) -> usize {
    D::len(self)
  }
}

pub trait Dataset: IdxNameMap + Sync {
  type Instance;
  fn load_instance(&self, idx: usize) -> Result<Self::Instance>;

  fn load_instance_by_name(&self, name: &str) -> Result<Self::Instance> {
    self.load_instance(self.name_to_index(name)?)
  }
}

impl<'a, D: Dataset> Dataset for &'a D {
  type Instance = D::Instance;

  fn load_instance(&self, idx: usize) -> Result<Self::Instance> {
    D::load_instance(self, idx)
  }
}


/// Directory that relative dataset directories are resolved against, taken
/// from the `DATA_ROOT` environment variable.
pub fn data_root() -> Result<PathBuf> {
  let root = std::env::var("DATA_ROOT").context("environment variable DATA_ROOT must be defined")?;
  Ok(PathBuf::from(root))
}


/// A Standard Layout Dataset: a directory containing instance files and `INDEX.txt` index file.
/// The index file contains a whitespace separated list of instance names, which acts as a map from index -> name.
/// Each instance file is named `NAME.SUFFIX`.
pub struct StdLayout<D> {
  _marker: PhantomData<D>,
  name_order: Vec<String>,
  name_to_idx_map: HashMap<String, usize>,
  dir: PathBuf,
  suffix: String,
}

impl<D> StdLayout<D> {
  /// Opens `dir` relative to `DATA_ROOT`.
  pub fn new(dir: impl AsRef<Path>, suffix: &str) -> Result<StdLayout<D>> {
    StdLayout::at(data_root()?.join(dir), suffix)
  }

  pub fn at(dir: impl AsRef<Path>, suffix: &str) -> Result<StdLayout<D>> {
    let dir = dir.as_ref();
    let ctx = format!("try read directory {:?}", dir);
    let dir = dir.canonicalize().context(ctx)?;

    let index = dir.join("INDEX.txt");
    let contents = std::fs::read_to_string(&index).context(format!("failed to read {:?}", index))?;
    let name_order: Vec<String> = contents.split_whitespace().map(|s| s.to_string()).collect();
    let name_to_idx_map: HashMap<_, _> = name_order.iter().enumerate().map(|(i, s)| (s.clone(), i)).collect();

    Ok(StdLayout {
      _marker: PhantomData {},
      name_order,
      name_to_idx_map,
      dir,
      suffix: suffix.to_string(),
    })
  }

  fn instance_path(&self, idx: usize) -> Result<PathBuf> {
    let name = self.index_to_name(idx)?;
    let mut path = self.dir.join(&*name);
    path.set_extension(&self.suffix);
    Ok(path)
  }
}

impl<D> IdxNameMap for StdLayout<D> {
  fn index_to_name(&self, idx: usize) -> Result<Cow<str>> {
    self.check_idx(idx)?;
    Ok(Cow::Borrowed(&self.name_order[idx]))
  }

  fn name_to_index(&self, name: &str) -> Result<usize> {
    self.name_to_idx_map.get(name).copied().ok_or_else(|| DatasetError::UnknownInstanceName.into())
  }

  fn len(&self) -> usize { self.name_order.len() }
}


/// A Dynamic Layout Dataset: every file in a directory matching a glob pattern, in the order
/// the pattern yields them. Instance names are the file stems.
pub struct DynLayout<D> {
  _marker: PhantomData<D>,
  name_order: Vec<PathBuf>,
  name_to_idx_map: HashMap<String, usize>,
}

impl<D> DynLayout<D> {
  /// Opens `dir` relative to `DATA_ROOT`.
  pub fn new(dir: impl AsRef<Path>, patt: &str) -> Result<Self> {
    DynLayout::at(data_root()?.join(dir), patt)
  }

  pub fn at(dir: impl AsRef<Path>, patt: &str) -> Result<Self> {
    let mut p = dir.as_ref().to_string_lossy().into_owned();
    p.push('/');
    p.push_str(patt);

    let names: std::result::Result<Vec<PathBuf>, _> = glob::glob(&p)?.collect();
    let name_order = names?;
    let name_to_idx_map: Result<HashMap<_, _>> = name_order.iter()
      .enumerate()
      .map(|(k, p)| {
        let n = p.file_stem().ok_or_else(|| anyhow::anyhow!("missing file stem: {:?}", p))?;
        Ok((n.to_string_lossy().into_owned(), k))
      })
      .collect();
    let name_to_idx_map = name_to_idx_map?;
    Ok(DynLayout {
      _marker: Default::default(),
      name_order,
      name_to_idx_map,
    })
  }
}

impl<D> IdxNameMap for DynLayout<D> {
  fn index_to_name(&self, idx: usize) -> Result<Cow<str>> {
    self.check_idx(idx)?;
    let name = self.name_order[idx].file_stem()
      .ok_or_else(|| anyhow::anyhow!("missing file stem for idx {}", idx))?;
    Ok(name.to_string_lossy())
  }

  fn name_to_index(&self, name: &str) -> Result<usize> {
    let idx = *self.name_to_idx_map.get(name).ok_or(DatasetError::UnknownInstanceName)?;
    Ok(idx)
  }

  fn len(&self) -> usize { self.name_order.len() }
}


pub mod cvrp;
