use crate::error::{CalcError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Rem, Sub};

/// A value produced by a literal, a constant, an operator or a function call.
///
/// Integers are an exact representation of integral floats. Booleans take
/// part in arithmetic as `0` and `1`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Operand view used by the arithmetic: booleans already folded into integers.
#[derive(Copy, Clone)]
enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(v) => v as f64,
            Numeric::Float(v) => v,
        }
    }
}

impl Scalar {
    fn numeric(self) -> Numeric {
        match self {
            Scalar::Int(v) => Numeric::Int(v),
            Scalar::Float(v) => Numeric::Float(v),
            Scalar::Bool(v) => Numeric::Int(v as i64),
        }
    }

    pub fn as_f64(self) -> f64 {
        self.numeric().as_f64()
    }

    /// Returns the value as an integer when it is one (booleans included).
    pub fn as_integer(self) -> Option<i64> {
        match self.numeric() {
            Numeric::Int(v) => Some(v),
            Numeric::Float(_) => None,
        }
    }

    pub fn is_truthy(self) -> bool {
        match self {
            Scalar::Int(v) => v != 0,
            Scalar::Float(v) => v != 0.0,
            Scalar::Bool(v) => v,
        }
    }

    /// Converts an integral float into `Int` when it fits, the way
    /// `floor`/`ceil`/`round` hand back integers.
    pub fn integral(value: f64) -> Result<Scalar> {
        if value.is_nan() {
            return Err(CalcError::domain());
        }
        if value.is_infinite() {
            return Err(CalcError::range());
        }
        if value >= i64::MIN as f64 && value < i64::MAX as f64 {
            Ok(Scalar::Int(value as i64))
        } else {
            Ok(Scalar::Float(value))
        }
    }

    /// Numeric ordering across variants: `1 == 1.0`, `true == 1`.
    pub fn numeric_cmp(self, rhs: Scalar) -> Option<Ordering> {
        match (self.numeric(), rhs.numeric()) {
            (Numeric::Int(a), Numeric::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }

    pub fn numeric_eq(self, rhs: Scalar) -> bool {
        self.numeric_cmp(rhs) == Some(Ordering::Equal)
    }

    fn arithmetic(
        self,
        rhs: Scalar,
        int_op: fn(i64, i64) -> Option<i64>,
        float_op: fn(f64, f64) -> f64,
    ) -> Scalar {
        match (self.numeric(), rhs.numeric()) {
            (Numeric::Int(a), Numeric::Int(b)) => int_op(a, b)
                .map(Scalar::Int)
                .unwrap_or_else(|| Scalar::Float(float_op(a as f64, b as f64))),
            (a, b) => Scalar::Float(float_op(a.as_f64(), b.as_f64())),
        }
    }

    /// Division rounded toward negative infinity.
    pub fn floor_div(self, rhs: Scalar) -> Result<Scalar> {
        match (self.numeric(), rhs.numeric()) {
            (Numeric::Int(_), Numeric::Int(0)) => Err(CalcError::modulo_by_zero()),
            (Numeric::Int(a), Numeric::Int(b)) => match (a.checked_div(b), a.checked_rem(b)) {
                (Some(q), Some(r)) if r != 0 && ((r < 0) != (b < 0)) => Ok(Scalar::Int(q - 1)),
                (Some(q), Some(_)) => Ok(Scalar::Int(q)),
                _ => Ok(Scalar::Float((a as f64 / b as f64).floor())),
            },
            (a, b) => {
                let (a, b) = (a.as_f64(), b.as_f64());
                if b == 0.0 {
                    Err(CalcError::Arithmetic("float floor division by zero".to_string()))
                } else {
                    Ok(Scalar::Float((a / b).floor()))
                }
            }
        }
    }

    pub fn pow(self, rhs: Scalar) -> Result<Scalar> {
        match (self.numeric(), rhs.numeric()) {
            (Numeric::Int(a), Numeric::Int(b)) if b >= 0 => {
                let exact = u32::try_from(b).ok().and_then(|e| a.checked_pow(e));
                match exact {
                    Some(v) => Ok(Scalar::Int(v)),
                    None => checked_float((a as f64).powf(b as f64), a as f64, b as f64),
                }
            }
            (a, b) => {
                let (a, b) = (a.as_f64(), b.as_f64());
                if a == 0.0 && b < 0.0 {
                    return Err(CalcError::Arithmetic(
                        "0.0 cannot be raised to a negative power".to_string(),
                    ));
                }
                checked_float(a.powf(b), a, b)
            }
        }
    }
}

/// Rejects NaN and overflow that did not come from the operands themselves.
fn checked_float(value: f64, a: f64, b: f64) -> Result<Scalar> {
    if value.is_nan() && !a.is_nan() && !b.is_nan() {
        Err(CalcError::domain())
    } else if value.is_infinite() && a.is_finite() && b.is_finite() {
        Err(CalcError::range())
    } else {
        Ok(Scalar::Float(value))
    }
}

impl Add for Scalar {
    type Output = Scalar;

    fn add(self, rhs: Self) -> Self::Output {
        self.arithmetic(rhs, i64::checked_add, |a, b| a + b)
    }
}

impl Sub for Scalar {
    type Output = Scalar;

    fn sub(self, rhs: Self) -> Self::Output {
        self.arithmetic(rhs, i64::checked_sub, |a, b| a - b)
    }
}

impl Mul for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Self) -> Self::Output {
        self.arithmetic(rhs, i64::checked_mul, |a, b| a * b)
    }
}

impl Div for Scalar {
    type Output = Result<Scalar>;

    fn div(self, rhs: Self) -> Self::Output {
        let divisor = rhs.as_f64();
        if divisor == 0.0 {
            Err(CalcError::division_by_zero())
        } else {
            Ok(Scalar::Float(self.as_f64() / divisor))
        }
    }
}

impl Rem for Scalar {
    type Output = Result<Scalar>;

    /// The remainder carries the sign of the divisor.
    fn rem(self, rhs: Self) -> Self::Output {
        match (self.numeric(), rhs.numeric()) {
            (Numeric::Int(_), Numeric::Int(0)) => Err(CalcError::modulo_by_zero()),
            (Numeric::Int(a), Numeric::Int(b)) => match a.checked_rem(b) {
                Some(r) if r != 0 && ((r < 0) != (b < 0)) => Ok(Scalar::Int(r + b)),
                Some(r) => Ok(Scalar::Int(r)),
                None => Ok(Scalar::Int(0)),
            },
            (a, b) => {
                let (a, b) = (a.as_f64(), b.as_f64());
                if b == 0.0 {
                    return Err(CalcError::Arithmetic("float modulo".to_string()));
                }
                let r = a % b;
                if r != 0.0 && ((r < 0.0) != (b < 0.0)) {
                    Ok(Scalar::Float(r + b))
                } else {
                    Ok(Scalar::Float(r))
                }
            }
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Float(v) if v.is_nan() => write!(f, "nan"),
            Scalar::Float(v) if v.is_infinite() => {
                write!(f, "{}", if *v > 0.0 { "inf" } else { "-inf" })
            }
            Scalar::Float(v) if *v != 0.0 && (v.abs() >= 1e16 || v.abs() < 1e-4) => {
                write_exponent(f, *v)
            }
            // Integral floats keep a trailing `.0` so they read as floats.
            Scalar::Float(v) if v.fract() == 0.0 => write!(f, "{v:.1}"),
            Scalar::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Scientific notation with a signed, two-digit exponent: `1e-05`, `1.5e+20`.
fn write_exponent(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    let formatted = format!("{v:e}");
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or_default();
    let sign = if exponent < 0 { '-' } else { '+' };
    write!(f, "{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}
