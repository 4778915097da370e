//! Symbolic differentiation with respect to the free variable.
//!
//! Derivative trees are assembled through the normalizing constructors on
//! [`Expr`], so `d/dx (x**2 - 4)` comes out as `2*x` rather than
//! `2*x**1 + 0`.

use super::{Expr, Func};

impl Expr {
    /// The first derivative with respect to `x`.
    #[must_use]
    pub fn diff(&self) -> Self {
        match self {
            Self::Num(_) => Self::num(0.0),
            Self::Var => Self::num(1.0),
            Self::Neg(e) => Self::neg(e.diff()),
            Self::Add(a, b) => Self::add(a.diff(), b.diff()),
            Self::Sub(a, b) => Self::sub(a.diff(), b.diff()),
            Self::Mul(a, b) => Self::add(
                Self::mul(a.diff(), (**b).clone()),
                Self::mul((**a).clone(), b.diff()),
            ),
            Self::Div(a, b) => Self::div(
                Self::sub(
                    Self::mul(a.diff(), (**b).clone()),
                    Self::mul((**a).clone(), b.diff()),
                ),
                Self::pow((**b).clone(), Self::num(2.0)),
            ),
            Self::Pow(base, exponent) => Self::diff_pow(base, exponent),
            Self::Func(func, arg) => Self::mul(Self::diff_func(*func, arg), arg.diff()),
        }
    }

    fn diff_pow(base: &Self, exponent: &Self) -> Self {
        match exponent {
            // power rule: d/dx u^n = n * u^(n-1) * u'
            Self::Num(n) => Self::mul(
                Self::mul(
                    Self::num(*n),
                    Self::pow(base.clone(), Self::num(n - 1.0)),
                ),
                base.diff(),
            ),
            // general case: u^v * (v' * log(u) + v * u'/u)
            _ => Self::mul(
                Self::pow(base.clone(), exponent.clone()),
                Self::add(
                    Self::mul(exponent.diff(), Self::func(Func::Ln, base.clone())),
                    Self::mul(
                        exponent.clone(),
                        Self::div(base.diff(), base.clone()),
                    ),
                ),
            ),
        }
    }

    /// Derivative of `func` with respect to its argument, chain rule excluded.
    fn diff_func(func: Func, arg: &Self) -> Self {
        let arg = arg.clone();
        match func {
            Func::Sin => Self::func(Func::Cos, arg),
            Func::Cos => Self::neg(Self::func(Func::Sin, arg)),
            Func::Tan => Self::div(
                Self::num(1.0),
                Self::pow(Self::func(Func::Cos, arg), Self::num(2.0)),
            ),
            Func::Sinh => Self::func(Func::Cosh, arg),
            Func::Cosh => Self::func(Func::Sinh, arg),
            Func::Tanh => Self::div(
                Self::num(1.0),
                Self::pow(Self::func(Func::Cosh, arg), Self::num(2.0)),
            ),
            Func::Exp => Self::func(Func::Exp, arg),
            Func::Ln => Self::div(Self::num(1.0), arg),
            Func::Sqrt => Self::div(
                Self::num(1.0),
                Self::mul(Self::num(2.0), Self::func(Func::Sqrt, arg)),
            ),
        }
    }
}
