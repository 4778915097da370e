//! End-to-end runs of the full pipeline: parse an expression, differentiate
//! it symbolically, lambdify both, solve, and render the report.

use raphson::{find_root, render_report, Expr, DEFAULT_MAX_ITER, DEFAULT_TOL};

fn solve(input: &str, x0: f64) -> (raphson::RootFindResult<f64>, String) {
    let expr = Expr::parse(input).unwrap();
    let derivative = expr.diff();
    let f = expr.lambdify();
    let df = derivative.lambdify();
    let result = find_root(&f, &df, x0, DEFAULT_TOL, DEFAULT_MAX_ITER).unwrap();
    let report = render_report(&result, &f);
    (result, report)
}

#[test]
fn quadratic_end_to_end() {
    let (result, report) = solve("x**2 - 4", 1.0);
    assert!(result.converged);
    assert!((result.root - 2.0).abs() < DEFAULT_TOL);
    assert!(result.trace.len() <= 10);

    // the first row of the classic hand-worked table
    let first = result.trace[0];
    assert_eq!(first.index, 1);
    assert_eq!(first.x, 1.0);
    assert_eq!(first.f_x, -3.0);
    assert_eq!(first.error, 1.5);

    assert!(report.contains("CONVERGED in"));
    assert!(report.contains("root: x = 2.0000000"));
}

#[test]
fn transcendental_end_to_end() {
    // exp(x) = 2 at x = ln 2
    let (result, _) = solve("exp(x) - 2", 0.0);
    assert!(result.converged);
    assert!((result.root - 2.0_f64.ln()).abs() < DEFAULT_TOL);
}

#[test]
fn mixed_end_to_end() {
    let (result, _) = solve("sin(x) + x**2", -1.5);
    assert!(result.converged);
    let f = Expr::parse("sin(x) + x**2").unwrap();
    assert!(f.eval(result.root).abs() < 1e-9);
}

#[test]
fn converged_trace_satisfies_the_contract() {
    for (input, x0) in [("x**2 - 4", 10.0), ("exp(x) - 2", 2.0), ("cos(x) - x", 1.0)] {
        let (result, _) = solve(input, x0);
        assert!(result.converged, "{input}");
        assert!(result.trace.len() <= DEFAULT_MAX_ITER);
        assert!(result.trace.last().unwrap().error < DEFAULT_TOL, "{input}");
        for (i, rec) in result.trace.iter().enumerate() {
            assert_eq!(rec.index, i + 1, "{input}");
        }
    }
}

#[test]
fn rootless_function_never_converges() {
    let (result, report) = solve("x**2 + 1", 1.0);
    assert!(!result.converged);
    assert!(report.contains("DID NOT CONVERGE"));
}

#[test]
fn flat_start_aborts_with_an_empty_trace() {
    // derivative 2x vanishes exactly at the initial guess
    let (result, report) = solve("x**2", 0.0);
    assert!(!result.converged);
    assert!(result.trace.is_empty());
    assert!(report.contains("DID NOT CONVERGE in 0 iterations"));
}

#[test]
fn derivative_display_survives_lambdify() {
    let expr = Expr::parse("x**3 - 2*x + 2").unwrap();
    let derivative = expr.diff();
    assert_eq!(derivative.to_string(), "3*x**2 - 2");
    let df = derivative.clone().lambdify();
    let reparsed = Expr::parse(&derivative.to_string()).unwrap().lambdify();
    for x in [-2.0, -0.5, 0.0, 1.0, 3.0] {
        assert_eq!(df(x), reparsed(x));
    }
}
