use super::nom_prelude::*;

type TokenError<'a> = error::Error<&'a str>;

pub fn usize_<'a, E>(input: &'a str) -> IResult<&'a str, usize, E>
  where
    E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>
{
  map_res(recognize(pair(opt(char('+')), digit1)), usize::from_str)(input)
}

pub fn i64_<'a, E>(input: &'a str) -> IResult<&'a str, i64, E>
  where
    E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>
{
  map_res(
    recognize(
      pair(
        opt(one_of("+-")),
        digit1
      )
    ), i64::from_str)(input)
}

/// Text following the first `:` of a header line. Lines without a colon yield
/// whatever follows `keyword`.
pub fn header_payload<'a>(line: &'a str, keyword: &str) -> &'a str {
  let colon: IResult<&str, char, TokenError> = preceded(take_until(":"), char(':'))(line);
  match colon {
    Ok((rest, _)) => rest,
    Err(_) => line.find(keyword).map(|k| &line[k + keyword.len()..]).unwrap_or(""),
  }
}

/// Runs `parser` on a single whitespace-free token, which it has to consume completely.
fn whole<'a, O>(parser: impl FnMut(&'a str) -> IResult<&'a str, O, TokenError<'a>>, token: &'a str) -> Option<O> {
  all_consuming(parser)(token).finish().ok().map(|(_, v)| v)
}

pub fn uint_token(token: &str) -> Option<usize> {
  whole(usize_, token)
}

/// Node counts share the range of a signed 32 bit integer.
pub fn dimension_token(token: &str) -> Option<usize> {
  uint_token(token).filter(|&n| n <= i32::MAX as usize)
}

pub fn int_token(token: &str) -> Option<i64> {
  whole(i64_, token)
}

/// Parses a finite floating point token. `inf` and `nan` are rejected.
pub fn float_token(token: &str) -> Option<f64> {
  whole(double, token).filter(|x| x.is_finite())
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn integers() {
    assert_eq!(int_token("42"), Some(42));
    assert_eq!(int_token("-3"), Some(-3));
    assert_eq!(int_token("+7"), Some(7));
    assert_eq!(int_token("4.0"), None);
    assert_eq!(int_token("12abc"), None);
    assert_eq!(int_token(""), None);
    assert_eq!(int_token("99999999999999999999"), None);
    assert_eq!(uint_token("5"), Some(5));
    assert_eq!(uint_token("-5"), None);
    assert_eq!(dimension_token("2147483647"), Some(2147483647));
    assert_eq!(dimension_token("2147483648"), None);
    assert_eq!(dimension_token("18446744073709551615"), None);
  }

  #[test]
  fn floats() {
    assert_eq!(float_token("28.00000"), Some(28.0));
    assert_eq!(float_token("-1.5e2"), Some(-150.0));
    assert_eq!(float_token("7"), Some(7.0));
    assert_eq!(float_token("inf"), None);
    assert_eq!(float_token("NaN"), None);
    assert_eq!(float_token("1.2.3"), None);
  }

  #[test]
  fn payload_after_first_colon() {
    assert_eq!(header_payload("DIMENSION : 22", "DIMENSION").trim(), "22");
    assert_eq!(header_payload("PERMUTATION: 1 3 : 2", "PERMUTATION"), " 1 3 : 2");
    assert_eq!(header_payload("CAPACITY 6000", "CAPACITY").trim(), "6000");
    assert_eq!(header_payload("CAPACITY", "CAPACITY"), "");
  }
}
