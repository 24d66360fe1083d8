use log::debug;
use rcalc_macros::calc_fn;
use rcalc_rs::{Arity, CalcError, Calculator, Result, Scalar};

#[calc_fn]
fn clamp(x: f64, low: f64, high: f64) -> Result<Scalar> {
    Ok(Scalar::Float(x.max(low).min(high)))
}

#[calc_fn]
fn is_even(n: i64) -> Result<Scalar> {
    Ok(Scalar::Bool(n % 2 == 0))
}

fn main() {
    pretty_env_logger::init();

    let mut calculator = match Calculator::new().with_module("stats") {
        Ok(calculator) => calculator,
        Err(err) => {
            eprintln!("ERROR: {err}");
            return;
        }
    };
    calculator.register_constant("answer", 42_i64);
    calculator.register_function("clamp", Arity::Exact(3), clamp);
    calculator.register_function("is_even", Arity::Exact(1), is_even);

    let expressions = [
        "2pi(1 + 1)",
        "1034 // 12 < 90",
        "clamp(answer / 4, 0, 10)",
        "is_even(answer) + mean(1, 2, 3)",
        "round(e^2, 3)",
        "sqrt(-1)",
        "2 + ",
    ];

    for expression in expressions {
        debug!("Evaluating {expression:?}");
        match calculator.evaluate(expression) {
            Ok(result) => println!("{expression} = {result}"),
            Err(err) => println!("{expression}: {err}"),
        }
    }
}
