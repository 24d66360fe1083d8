use crate::error::{CalcError, Result};
use crate::functions::NameTables;
use crate::token::{Arity, Scalar};
use rcalc_macros::calc_fn;
use std::f64::consts;

pub fn register(tables: &mut NameTables) {
    tables.register_constant("pi", consts::PI);
    tables.register_constant("e", consts::E);
    tables.register_constant("tau", consts::TAU);
    tables.register_constant("inf", f64::INFINITY);
    tables.register_constant("nan", f64::NAN);

    let unary: [(&str, fn(&[Scalar]) -> Result<Scalar>); 25] = [
        ("sin", sin),
        ("cos", cos),
        ("tan", tan),
        ("asin", asin),
        ("acos", acos),
        ("atan", atan),
        ("sinh", sinh),
        ("cosh", cosh),
        ("tanh", tanh),
        ("asinh", asinh),
        ("acosh", acosh),
        ("atanh", atanh),
        ("exp", exp),
        ("expm1", expm1),
        ("log10", log10),
        ("log2", log2),
        ("log1p", log1p),
        ("sqrt", sqrt),
        ("ceil", ceil),
        ("floor", floor),
        ("trunc", trunc),
        ("fabs", fabs),
        ("degrees", degrees),
        ("radians", radians),
        ("factorial", factorial),
    ];
    for (name, function) in unary {
        tables.register_function(name, Arity::Exact(1), function);
    }

    let binary: [(&str, fn(&[Scalar]) -> Result<Scalar>); 5] = [
        ("atan2", atan2),
        ("pow", pow),
        ("fmod", fmod),
        ("copysign", copysign),
        ("gcd", gcd),
    ];
    for (name, function) in binary {
        tables.register_function(name, Arity::Exact(2), function);
    }

    tables.register_function("isfinite", Arity::Exact(1), isfinite);
    tables.register_function("isinf", Arity::Exact(1), isinf);
    tables.register_function("isnan", Arity::Exact(1), isnan);
    tables.register_function("log", Arity::Range(1, 2), log);
    tables.register_function("hypot", Arity::AtLeast(0), hypot);
}

/// Wraps a float result, turning NaN and overflow produced from ordinary
/// inputs into errors.
fn real(value: f64, inputs: &[f64]) -> Result<Scalar> {
    if value.is_nan() && inputs.iter().all(|x| !x.is_nan()) {
        Err(CalcError::domain())
    } else if value.is_infinite() && inputs.iter().all(|x| x.is_finite()) {
        Err(CalcError::range())
    } else {
        Ok(Scalar::Float(value))
    }
}

fn positive(x: f64) -> Result<f64> {
    if x > 0.0 || x.is_nan() {
        Ok(x)
    } else {
        Err(CalcError::domain())
    }
}

#[calc_fn]
fn sin(x: f64) -> Result<Scalar> {
    real(x.sin(), &[x])
}

#[calc_fn]
fn cos(x: f64) -> Result<Scalar> {
    real(x.cos(), &[x])
}

#[calc_fn]
fn tan(x: f64) -> Result<Scalar> {
    real(x.tan(), &[x])
}

#[calc_fn]
fn asin(x: f64) -> Result<Scalar> {
    real(x.asin(), &[x])
}

#[calc_fn]
fn acos(x: f64) -> Result<Scalar> {
    real(x.acos(), &[x])
}

#[calc_fn]
fn atan(x: f64) -> Result<Scalar> {
    real(x.atan(), &[x])
}

#[calc_fn]
fn atan2(y: f64, x: f64) -> Result<Scalar> {
    real(y.atan2(x), &[y, x])
}

#[calc_fn]
fn sinh(x: f64) -> Result<Scalar> {
    real(x.sinh(), &[x])
}

#[calc_fn]
fn cosh(x: f64) -> Result<Scalar> {
    real(x.cosh(), &[x])
}

#[calc_fn]
fn tanh(x: f64) -> Result<Scalar> {
    real(x.tanh(), &[x])
}

#[calc_fn]
fn asinh(x: f64) -> Result<Scalar> {
    real(x.asinh(), &[x])
}

#[calc_fn]
fn acosh(x: f64) -> Result<Scalar> {
    real(x.acosh(), &[x])
}

#[calc_fn]
fn atanh(x: f64) -> Result<Scalar> {
    if x.abs() >= 1.0 {
        return Err(CalcError::domain());
    }
    real(x.atanh(), &[x])
}

#[calc_fn]
fn exp(x: f64) -> Result<Scalar> {
    real(x.exp(), &[x])
}

#[calc_fn]
fn expm1(x: f64) -> Result<Scalar> {
    real(x.exp_m1(), &[x])
}

/// `log(x)` is the natural logarithm, `log(x, base)` any other base.
fn log(args: &[Scalar]) -> Result<Scalar> {
    match args {
        [x] => {
            let x = positive(x.as_f64())?;
            real(x.ln(), &[x])
        }
        [x, base] => {
            let (x, base) = (positive(x.as_f64())?, positive(base.as_f64())?);
            if base == 1.0 {
                return Err(CalcError::division_by_zero());
            }
            real(x.ln() / base.ln(), &[x, base])
        }
        _ => Err(CalcError::ArgumentCount {
            name: "log".to_string(),
            given: args.len(),
        }),
    }
}

#[calc_fn]
fn log10(x: f64) -> Result<Scalar> {
    let x = positive(x)?;
    real(x.log10(), &[x])
}

#[calc_fn]
fn log2(x: f64) -> Result<Scalar> {
    let x = positive(x)?;
    real(x.log2(), &[x])
}

#[calc_fn]
fn log1p(x: f64) -> Result<Scalar> {
    if x <= -1.0 {
        return Err(CalcError::domain());
    }
    real(x.ln_1p(), &[x])
}

#[calc_fn]
fn sqrt(x: f64) -> Result<Scalar> {
    real(x.sqrt(), &[x])
}

#[calc_fn]
fn pow(x: f64, y: f64) -> Result<Scalar> {
    if x == 0.0 && y < 0.0 {
        return Err(CalcError::domain());
    }
    real(x.powf(y), &[x, y])
}

fn hypot(args: &[Scalar]) -> Result<Scalar> {
    let values: Vec<f64> = args.iter().map(|x| x.as_f64()).collect();
    let result = values.iter().fold(0.0_f64, |acc, x| acc.hypot(*x));
    real(result, &values)
}

#[calc_fn]
fn ceil(x: f64) -> Result<Scalar> {
    Scalar::integral(x.ceil())
}

#[calc_fn]
fn floor(x: f64) -> Result<Scalar> {
    Scalar::integral(x.floor())
}

#[calc_fn]
fn trunc(x: f64) -> Result<Scalar> {
    Scalar::integral(x.trunc())
}

#[calc_fn]
fn fabs(x: f64) -> Result<Scalar> {
    Ok(Scalar::Float(x.abs()))
}

#[calc_fn]
fn fmod(x: f64, y: f64) -> Result<Scalar> {
    if y == 0.0 || x.is_infinite() {
        return Err(CalcError::domain());
    }
    Ok(Scalar::Float(x % y))
}

#[calc_fn]
fn copysign(x: f64, y: f64) -> Result<Scalar> {
    Ok(Scalar::Float(x.copysign(y)))
}

#[calc_fn]
fn degrees(x: f64) -> Result<Scalar> {
    real(x.to_degrees(), &[x])
}

#[calc_fn]
fn radians(x: f64) -> Result<Scalar> {
    Ok(Scalar::Float(x.to_radians()))
}

#[calc_fn]
fn factorial(n: i64) -> Result<Scalar> {
    if n < 0 {
        return Err(CalcError::Arithmetic(
            "factorial() not defined for negative values".to_string(),
        ));
    }
    (2..=n)
        .try_fold(1_i64, |acc, k| acc.checked_mul(k))
        .map(Scalar::Int)
        .ok_or_else(CalcError::range)
}

#[calc_fn]
fn gcd(a: i64, b: i64) -> Result<Scalar> {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    i64::try_from(a)
        .map(Scalar::Int)
        .map_err(|_| CalcError::range())
}

#[calc_fn]
fn isfinite(x: f64) -> Result<Scalar> {
    Ok(Scalar::Bool(x.is_finite()))
}

#[calc_fn]
fn isinf(x: f64) -> Result<Scalar> {
    Ok(Scalar::Bool(x.is_infinite()))
}

#[calc_fn]
fn isnan(x: f64) -> Result<Scalar> {
    Ok(Scalar::Bool(x.is_nan()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Scalar]) -> Result<Scalar> {
        let mut tables = NameTables::default();
        register(&mut tables);
        tables.function(name).unwrap().call(args)
    }

    #[test]
    fn test_constants() {
        let mut tables = NameTables::default();
        register(&mut tables);
        assert_eq!(tables.constant("pi"), Some(Scalar::Float(consts::PI)));
        assert_eq!(tables.constant("e"), Some(Scalar::Float(consts::E)));
    }

    #[test]
    fn test_trigonometry() {
        assert_eq!(call("sin", &[Scalar::Int(0)]), Ok(Scalar::Float(0.0)));
        assert_eq!(call("cos", &[Scalar::Int(0)]), Ok(Scalar::Float(1.0)));
        assert_eq!(
            call("atan2", &[Scalar::Int(1), Scalar::Int(1)]),
            Ok(Scalar::Float(consts::FRAC_PI_4))
        );
    }

    #[test]
    fn test_domain_errors() {
        assert_eq!(call("sqrt", &[Scalar::Int(-1)]), Err(CalcError::domain()));
        assert_eq!(call("log", &[Scalar::Int(0)]), Err(CalcError::domain()));
        assert_eq!(call("asin", &[Scalar::Int(2)]), Err(CalcError::domain()));
        assert_eq!(call("fmod", &[Scalar::Int(1), Scalar::Int(0)]), Err(CalcError::domain()));
    }

    #[test]
    fn test_range_errors() {
        assert_eq!(call("exp", &[Scalar::Int(1000)]), Err(CalcError::range()));
        assert_eq!(call("factorial", &[Scalar::Int(30)]), Err(CalcError::range()));
    }

    #[test]
    fn test_log_with_base() {
        let value = call("log", &[Scalar::Int(8), Scalar::Int(2)]).unwrap().as_f64();
        assert!((value - 3.0).abs() < 1e-12);
        assert_eq!(call("log10", &[Scalar::Int(1000)]), Ok(Scalar::Float(3.0)));
        assert!(call("log", &[Scalar::Int(8), Scalar::Int(2), Scalar::Int(1)]).is_err());
    }

    #[test]
    fn test_integer_results() {
        assert_eq!(call("floor", &[Scalar::Float(-2.5)]), Ok(Scalar::Int(-3)));
        assert_eq!(call("ceil", &[Scalar::Float(2.1)]), Ok(Scalar::Int(3)));
        assert_eq!(call("factorial", &[Scalar::Int(5)]), Ok(Scalar::Int(120)));
        assert_eq!(call("gcd", &[Scalar::Int(12), Scalar::Int(-18)]), Ok(Scalar::Int(6)));
    }

    #[test]
    fn test_integral_arguments_are_required() {
        assert_eq!(
            call("factorial", &[Scalar::Float(5.5)]),
            Err(CalcError::Arithmetic(
                "factorial() only accepts integral values".to_string()
            ))
        );
    }

    #[test]
    fn test_variadic_hypot() {
        assert_eq!(call("hypot", &[]), Ok(Scalar::Float(0.0)));
        assert_eq!(call("hypot", &[Scalar::Int(3), Scalar::Int(4)]), Ok(Scalar::Float(5.0)));
    }

    #[test]
    fn test_predicates() {
        assert_eq!(call("isnan", &[Scalar::Float(f64::NAN)]), Ok(Scalar::Bool(true)));
        assert_eq!(call("isinf", &[Scalar::Int(1)]), Ok(Scalar::Bool(false)));
    }
}
