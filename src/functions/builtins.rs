use crate::error::{CalcError, Result};
use crate::functions::NameTables;
use crate::token::{Arity, Scalar};
use rcalc_macros::calc_fn;

pub fn register(tables: &mut NameTables) {
    tables.register_function("abs", Arity::Exact(1), abs);
    tables.register_function("round", Arity::Range(1, 2), round);
}

#[calc_fn]
pub fn abs(x: Scalar) -> Result<Scalar> {
    match x {
        Scalar::Float(v) => Ok(Scalar::Float(v.abs())),
        other => {
            let v = other.as_integer().unwrap_or_default();
            Ok(v.checked_abs()
                .map(Scalar::Int)
                .unwrap_or_else(|| Scalar::Float((v as f64).abs())))
        }
    }
}

/// `round(x)` rounds half to even and returns an integer; `round(x, n)`
/// keeps `n` decimal digits.
pub fn round(args: &[Scalar]) -> Result<Scalar> {
    let (x, ndigits) = match args {
        [x] => return round_integral(*x),
        [x, n] => (*x, n),
        _ => {
            return Err(CalcError::ArgumentCount {
                name: "round".to_string(),
                given: args.len(),
            })
        }
    };
    let ndigits = ndigits.as_integer().ok_or_else(|| {
        CalcError::Arithmetic("round() ndigits must be an integer".to_string())
    })?;

    match x {
        Scalar::Float(v) => {
            let exponent = i32::try_from(ndigits).map_err(|_| CalcError::range())?;
            let factor = 10f64.powi(exponent);
            if !factor.is_finite() || factor == 0.0 {
                return Ok(Scalar::Float(v));
            }
            Ok(Scalar::Float((v * factor).round_ties_even() / factor))
        }
        other if ndigits >= 0 => Ok(Scalar::Int(other.as_integer().unwrap_or_default())),
        other => {
            let factor = 10f64.powi(i32::try_from(ndigits.unsigned_abs()).map_err(|_| CalcError::range())?);
            Scalar::integral((other.as_f64() / factor).round_ties_even() * factor)
        }
    }
}

fn round_integral(x: Scalar) -> Result<Scalar> {
    match x {
        Scalar::Float(v) => Scalar::integral(v.round_ties_even()),
        other => Ok(Scalar::Int(other.as_integer().unwrap_or_default())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abs() {
        assert_eq!(abs(&[Scalar::Int(-56)]), Ok(Scalar::Int(56)));
        assert_eq!(abs(&[Scalar::Float(-1.5)]), Ok(Scalar::Float(1.5)));
        assert_eq!(abs(&[Scalar::Bool(true)]), Ok(Scalar::Int(1)));
        assert!(abs(&[]).is_err());
    }

    #[test]
    fn test_round_half_to_even() {
        assert_eq!(round(&[Scalar::Float(4.67)]), Ok(Scalar::Int(5)));
        assert_eq!(round(&[Scalar::Float(2.5)]), Ok(Scalar::Int(2)));
        assert_eq!(round(&[Scalar::Float(3.5)]), Ok(Scalar::Int(4)));
        assert_eq!(round(&[Scalar::Int(7)]), Ok(Scalar::Int(7)));
    }

    #[test]
    fn test_round_with_digits() {
        assert_eq!(
            round(&[Scalar::Float(3.14159), Scalar::Int(2)]),
            Ok(Scalar::Float(3.14))
        );
        assert_eq!(
            round(&[Scalar::Int(1234), Scalar::Int(-2)]),
            Ok(Scalar::Int(1200))
        );
        assert!(round(&[Scalar::Float(1.0), Scalar::Float(0.5)]).is_err());
    }
}
