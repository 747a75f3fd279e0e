//! Free-form coordinate text: `"x y z"` or `"x,y,z"`.
//!
//! Tokens are separated by any mix of whitespace and commas. At least three
//! are required and every token must be a finite number; numbers after the
//! third are accepted and ignored.

use nom::{
    bytes::complete::{take_while, take_while1},
    combinator::all_consuming,
    multi::many0,
    number::complete::double,
    sequence::preceded,
    IResult,
};

use crate::error::{EngineError, Result};
use crate::vector::Vector3;

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

fn token(input: &str) -> IResult<&str, &str> {
    preceded(take_while(is_separator), take_while1(|c| !is_separator(c)))(input)
}

fn tokens(input: &str) -> IResult<&str, Vec<&str>> {
    let (input, tokens) = many0(token)(input)?;
    let (input, _) = take_while(is_separator)(input)?;
    Ok((input, tokens))
}

fn number(token: &str) -> Option<f64> {
    all_consuming(double::<&str, nom::error::Error<&str>>)(token)
        .ok()
        .map(|(_, value)| value)
        .filter(|value| value.is_finite())
}

/// Parses three coordinates.
pub fn parse_point(input: &str) -> Result<Vector3> {
    let fail = |reason: String| EngineError::Parse {
        input: input.to_string(),
        reason,
    };

    let (_, tokens) = tokens(input).map_err(|e| fail(e.to_string()))?;

    let mut values = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let value = number(token).ok_or_else(|| fail(format!("{token:?} is not a number")))?;
        values.push(value);
    }

    match values.as_slice() {
        [x, y, z, ..] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(fail(format!("expected 3 numbers, found {}", values.len()))),
    }
}
