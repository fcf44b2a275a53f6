pub mod tsplib;
pub use tsplib::TsplibFmt;


mod nom_prelude {
  pub use nom::{
    IResult,
    error::{
      self,
      ParseError,
      FromExternalError,
    },
    sequence::*,
    combinator::*,
    character::complete::*,
    bytes::complete::take_until,
    number::complete::double,
    Finish,
  };
  pub use std::str::FromStr;
  pub use std::num::ParseIntError;
}

mod common;

pub trait ParseInstance<Fmt>: Sized {
  fn parse(inputs: Fmt) -> crate::Result<Self>;
}
