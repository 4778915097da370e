//! Console rendering of a [`RootFindResult`].
//!
//! Pure string building, no printing. The table mirrors the classic
//! hand-worked Newton-Raphson layout: one row per iteration with the
//! pre-update iterate, its function value and the step taken from it.

use std::fmt::Write;

use itertools::Itertools;

use crate::newton::RootFindResult;
use crate::RealScalar;

const RULE_WIDTH: usize = 64;

/// Render the iteration table and summary for a finished solver run.
///
/// `f` is the same function the solver iterated on; it is evaluated once
/// more at the final estimate so the summary can show the residual.
#[must_use]
pub fn render_report<T, F>(result: &RootFindResult<T>, f: F) -> String
where
    T: RealScalar,
    F: Fn(T) -> T,
{
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:^RULE_WIDTH$}", "NEWTON-RAPHSON METHOD RESULTS");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "{:^10} | {:^15} | {:^15} | {:^15}",
        "Iteration", "x_i", "f(x_i)", "Error"
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    let rows = result
        .trace
        .iter()
        .map(|rec| {
            format!(
                "{:^10} | {:^15.8} | {:^15.8} | {:^15.8}",
                rec.index, rec.x, rec.f_x, rec.error
            )
        })
        .join("\n");
    if !rows.is_empty() {
        let _ = writeln!(out, "{rows}");
    }

    let _ = writeln!(out, "{rule}");
    if result.converged {
        let _ = writeln!(out, "CONVERGED in {} iterations", result.trace.len());
    } else {
        let _ = writeln!(out, "DID NOT CONVERGE in {} iterations", result.trace.len());
    }
    let _ = writeln!(out, "root: x = {:.10}", result.root);
    let _ = writeln!(out, "f(root) = {:.10}", f(result.root));
    out
}

#[cfg(test)]
mod test {
    use super::render_report;
    use crate::newton::{find_root, DEFAULT_MAX_ITER, DEFAULT_TOL};

    fn quadratic_report() -> String {
        let res = find_root(|x| x * x - 4.0, |x| 2.0 * x, 1.0, DEFAULT_TOL, DEFAULT_MAX_ITER)
            .unwrap();
        render_report(&res, |x| x * x - 4.0)
    }

    #[test]
    fn header_names_all_columns() {
        let report = quadratic_report();
        let header = report
            .lines()
            .find(|l| l.contains("Iteration"))
            .expect("header line");
        for column in ["Iteration", "x_i", "f(x_i)", "Error"] {
            assert!(header.contains(column), "missing {column}");
        }
    }

    #[test]
    fn one_row_per_iteration() {
        let res = find_root(|x| x * x - 4.0, |x| 2.0 * x, 1.0, DEFAULT_TOL, DEFAULT_MAX_ITER)
            .unwrap();
        let report = render_report(&res, |x| x * x - 4.0);
        let rows = report
            .lines()
            .filter(|l| l.contains('|') && !l.contains("x_i"))
            .count();
        assert_eq!(rows, res.trace.len());
    }

    #[test]
    fn first_row_matches_the_hand_worked_table() {
        let report = quadratic_report();
        let first = report
            .lines()
            .filter(|l| l.contains('|'))
            .nth(1)
            .expect("first data row");
        assert!(first.contains("1.00000000"), "{first}");
        assert!(first.contains("-3.00000000"), "{first}");
        assert!(first.contains("1.50000000"), "{first}");
    }

    #[test]
    fn converged_summary() {
        let report = quadratic_report();
        assert!(report.contains("CONVERGED in"));
        assert!(!report.contains("DID NOT CONVERGE"));
        assert!(report.contains("root: x = 2.0000000"));
        assert!(report.contains("f(root) = 0.0000000000"));
    }

    #[test]
    fn non_converged_summary() {
        let res = find_root(|x| x * x + 1.0, |x| 2.0 * x, 1.0, DEFAULT_TOL, DEFAULT_MAX_ITER)
            .unwrap();
        let report = render_report(&res, |x| x * x + 1.0);
        assert!(report.contains("DID NOT CONVERGE in"));
    }

    #[test]
    fn empty_trace_still_renders() {
        let res = find_root(|x| x * x, |x| 2.0 * x, 0.0, DEFAULT_TOL, DEFAULT_MAX_ITER).unwrap();
        let report = render_report(&res, |x| x * x);
        assert!(report.contains("DID NOT CONVERGE in 0 iterations"));
    }
}
