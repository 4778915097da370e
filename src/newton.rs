//! The Newton-Raphson iteration loop.
//!
//! [`find_root`] is deliberately small: it owns the update rule, the two
//! stopping criteria and the degenerate-derivative guard, and nothing else.
//! Presentation lives in [`crate::report`] and [`crate::plot`].

use thiserror::Error;

use crate::RealScalar;

/// Derivative magnitudes below this are treated as degenerate: dividing by
/// them would blow up the step. Fixed, independent of the caller's `tol`.
const DERIVATIVE_EPSILON: f64 = 1e-10;

/// Tolerance the application uses when the user keeps the defaults.
pub const DEFAULT_TOL: f64 = 1e-6;

/// Iteration cap the application uses when the user keeps the defaults.
pub const DEFAULT_MAX_ITER: usize = 100;

/// Contract violations on the solver inputs.
///
/// Numerical non-convergence is *not* an error; it comes back as a
/// [`RootFindResult`] with `converged == false`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SolverError {
    #[error("invalid initial guess: x0 = {x0} must be finite")]
    InvalidGuess { x0: f64 },

    #[error("invalid tolerance: tol = {tol} must be positive and finite")]
    InvalidTolerance { tol: f64 },
}

/// One pass of the iteration loop.
///
/// `x` and `f_x` are the iterate *before* the update, `error` is the size of
/// the step that moved away from them. Keeping that pairing is what makes
/// the trace line up with the classic hand-worked tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationRecord<T> {
    /// 1-based iteration index.
    pub index: usize,
    pub x: T,
    pub f_x: T,
    /// Step size `|x_next - x|`, not the residual `|f(x)|`.
    pub error: T,
}

/// Outcome of a [`find_root`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct RootFindResult<T> {
    /// Best root estimate. Only meaningful when `converged` is true; on the
    /// degenerate-derivative abort this is the pre-abort iterate.
    pub root: T,
    pub trace: Vec<IterationRecord<T>>,
    pub converged: bool,
}

/// Find a real root of `f` near `x0` using the Newton-Raphson method.
///
/// Convergence is declared when the step size `|x_next - x|` drops below
/// `tol`. The iteration aborts early if `|df(x)|` falls below `1e-10`, and
/// gives up after `max_iter` passes; both outcomes return `Ok` with
/// `converged == false` and the trace accumulated so far. `max_iter == 0`
/// returns immediately with an empty trace.
///
/// `f` and `df` must be pure; evaluating them outside their domain is the
/// caller's responsibility.
///
/// # Errors
/// - [`SolverError::InvalidGuess`] if `x0` is not finite
/// - [`SolverError::InvalidTolerance`] if `tol` is not positive and finite
pub fn find_root<T, F, D>(
    f: F,
    df: D,
    x0: T,
    tol: T,
    max_iter: usize,
) -> Result<RootFindResult<T>, SolverError>
where
    T: RealScalar,
    F: Fn(T) -> T,
    D: Fn(T) -> T,
{
    if !x0.is_finite() {
        return Err(SolverError::InvalidGuess {
            x0: x0.to_f64().unwrap_or(f64::NAN),
        });
    }
    if tol <= T::zero() || !tol.is_finite() {
        return Err(SolverError::InvalidTolerance {
            tol: tol.to_f64().unwrap_or(f64::NAN),
        });
    }

    log::trace!("starting with arguments: {{x0: {x0}, tol: {tol}, max_iter: {max_iter}}}");

    let degenerate = T::from_f64(DERIVATIVE_EPSILON).expect("overflow");
    let mut x = x0;
    let mut trace = Vec::new();

    for i in 1..=max_iter {
        let fx = f(x);
        let dfx = df(x);

        if dfx.abs() < degenerate {
            log::trace!("stopping because derivative is degenerate {{x: {x}, dfx: {dfx}}}");
            return Ok(RootFindResult {
                root: x,
                trace,
                converged: false,
            });
        }

        let x_next = x - fx / dfx;
        let error = (x_next - x).abs();

        trace.push(IterationRecord {
            index: i,
            x,
            f_x: fx,
            error,
        });
        x = x_next;

        if error < tol {
            log::trace!("stopping because target precision reached {{root: {x}, iterations: {i}}}");
            return Ok(RootFindResult {
                root: x,
                trace,
                converged: true,
            });
        }
    }

    log::trace!("did not converge {{best_guess: {x}, max_iter: {max_iter}}}");
    Ok(RootFindResult {
        root: x,
        trace,
        converged: false,
    })
}
