use crate::error::{CalcError, Result};
use crate::functions::NameTables;
use crate::token::{Arity, Scalar};
use std::cmp::Ordering;

/// Aggregates over their argument lists, e.g. `mean(1, 2, 3)`.
pub fn register(tables: &mut NameTables) {
    tables.register_function("sum", Arity::AtLeast(0), sum);
    tables.register_function("min", Arity::AtLeast(1), min);
    tables.register_function("max", Arity::AtLeast(1), max);
    tables.register_function("mean", Arity::AtLeast(1), mean);
    tables.register_function("median", Arity::AtLeast(1), median);
}

pub fn sum(args: &[Scalar]) -> Result<Scalar> {
    Ok(args.iter().fold(Scalar::Int(0), |acc, x| acc + *x))
}

fn extreme(args: &[Scalar], wanted: Ordering) -> Result<Scalar> {
    let (first, rest) = args.split_first().ok_or_else(no_data)?;
    Ok(rest.iter().fold(*first, |best, x| {
        if x.numeric_cmp(best) == Some(wanted) {
            *x
        } else {
            best
        }
    }))
}

pub fn min(args: &[Scalar]) -> Result<Scalar> {
    extreme(args, Ordering::Less)
}

pub fn max(args: &[Scalar]) -> Result<Scalar> {
    extreme(args, Ordering::Greater)
}

pub fn mean(args: &[Scalar]) -> Result<Scalar> {
    if args.is_empty() {
        return Err(no_data());
    }
    sum(args)? / Scalar::Int(args.len() as i64)
}

pub fn median(args: &[Scalar]) -> Result<Scalar> {
    let mut sorted = args.to_vec();
    sorted.sort_by(|a, b| a.numeric_cmp(*b).unwrap_or(Ordering::Equal));
    let middle = sorted.len() / 2;
    match sorted.len() {
        0 => Err(no_data()),
        n if n % 2 == 1 => Ok(sorted[middle]),
        _ => (sorted[middle - 1] + sorted[middle]) / Scalar::Int(2),
    }
}

fn no_data() -> CalcError {
    CalcError::Arithmetic("no data points".to_string())
}
