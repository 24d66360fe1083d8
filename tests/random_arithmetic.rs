use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rcalc_rs::{evaluate, ErrorKind, NameTables};

const OPERATORS: [&str; 4] = ["+", "-", "*", "/"];

fn random_expression(rng: &mut StdRng, depth: u32) -> String {
    if depth == 0 || rng.random_bool(0.3) {
        return rng.random_range(1..=9).to_string();
    }
    if rng.random_bool(0.25) {
        return format!("({})", random_expression(rng, depth - 1));
    }
    let op = OPERATORS[rng.random_range(0..OPERATORS.len())];
    format!(
        "{} {} {}",
        random_expression(rng, depth - 1),
        op,
        random_expression(rng, depth - 1)
    )
}

#[test]
fn test_random_expressions_agree_with_meval() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let tables = NameTables::default();

    for _ in 0..500 {
        let expression = random_expression(&mut rng, 4);
        let expected = meval::eval_str(&expression).unwrap();

        match evaluate(&expression, &tables) {
            Ok(result) => {
                let result = result.as_f64();
                let tolerance = 1e-9 * expected.abs().max(1.0);
                assert!(
                    (result - expected).abs() <= tolerance,
                    "{expression}: {result} != {expected}"
                );
            }
            Err(err) => assert_eq!(err.kind(), ErrorKind::Arithmetic, "{expression}: {err}"),
        }
        if !expected.is_finite() {
            assert!(evaluate(&expression, &tables).is_err(), "{expression}");
        }
    }
}
