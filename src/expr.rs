//! Symbolic expressions for single-variable real functions.
//!
//! [`Expr::parse`] turns conventional notation (`x**2 - 4`, `sin(x) + x**2`,
//! `exp(x) - 2`) into an AST, [`Expr::diff`] produces the symbolic first
//! derivative, and [`Expr::lambdify`] collapses the tree into a plain
//! `Fn(f64) -> f64` for the solver. The solver never sees any of this, only
//! the closures.

use std::fmt;

mod calculus;
mod parse;

pub use parse::ParseError;

/// Unary functions understood by the parser and the differentiator.
///
/// `log` follows the convention of the natural logarithm; `ln` is accepted
/// as an alias when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Sqrt,
}

impl Func {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "log" | "ln" => Self::Ln,
            "sqrt" => Self::Sqrt,
            _ => return None,
        })
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Ln => "log",
            Self::Sqrt => "sqrt",
        }
    }

    #[must_use]
    pub fn apply(self, v: f64) -> f64 {
        match self {
            Self::Sin => v.sin(),
            Self::Cos => v.cos(),
            Self::Tan => v.tan(),
            Self::Sinh => v.sinh(),
            Self::Cosh => v.cosh(),
            Self::Tanh => v.tanh(),
            Self::Exp => v.exp(),
            Self::Ln => v.ln(),
            Self::Sqrt => v.sqrt(),
        }
    }
}

/// An expression in one free variable `x`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    /// The free variable `x`.
    Var,
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Func(Func, Box<Expr>),
}

impl Expr {
    /// Parse conventional mathematical notation into an expression.
    ///
    /// Both `**` and `^` denote exponentiation; `pi` and `e` are recognized
    /// constants.
    ///
    /// # Errors
    /// Any malformed input is reported as a [`ParseError`]; this never
    /// panics.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parse::parse(input)
    }

    /// Evaluate at a point.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Num(v) => *v,
            Self::Var => x,
            Self::Neg(e) => -e.eval(x),
            Self::Add(a, b) => a.eval(x) + b.eval(x),
            Self::Sub(a, b) => a.eval(x) - b.eval(x),
            Self::Mul(a, b) => a.eval(x) * b.eval(x),
            Self::Div(a, b) => a.eval(x) / b.eval(x),
            Self::Pow(a, b) => a.eval(x).powf(b.eval(x)),
            Self::Func(func, arg) => func.apply(arg.eval(x)),
        }
    }

    /// Consume the tree and return a plain evaluation closure for the solver.
    #[must_use]
    pub fn lambdify(self) -> impl Fn(f64) -> f64 {
        move |x| self.eval(x)
    }

    fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    // Normalizing constructors, used by the differentiator so that derivative
    // trees come out without 0 and 1 noise. The parser builds variants
    // directly and keeps the user's structure untouched.

    const fn num(v: f64) -> Self {
        Self::Num(v)
    }

    fn neg(e: Self) -> Self {
        match e {
            Self::Num(v) => Self::Num(-v),
            Self::Neg(inner) => *inner,
            other => Self::Neg(other.boxed()),
        }
    }

    fn add(a: Self, b: Self) -> Self {
        match (a, b) {
            (Self::Num(x), Self::Num(y)) => Self::Num(x + y),
            (Self::Num(z), b) if z == 0.0 => b,
            (a, Self::Num(z)) if z == 0.0 => a,
            (a, b) => Self::Add(a.boxed(), b.boxed()),
        }
    }

    fn sub(a: Self, b: Self) -> Self {
        match (a, b) {
            (Self::Num(x), Self::Num(y)) => Self::Num(x - y),
            (a, Self::Num(z)) if z == 0.0 => a,
            (Self::Num(z), b) if z == 0.0 => Self::neg(b),
            (a, b) => Self::Sub(a.boxed(), b.boxed()),
        }
    }

    fn mul(a: Self, b: Self) -> Self {
        match (a, b) {
            (Self::Num(x), Self::Num(y)) => Self::Num(x * y),
            (Self::Num(z), _) | (_, Self::Num(z)) if z == 0.0 => Self::Num(0.0),
            (Self::Num(o), b) if o == 1.0 => b,
            (a, Self::Num(o)) if o == 1.0 => a,
            // constants read better in front: cos(x)*2 -> 2*cos(x)
            (a, b @ Self::Num(_)) => Self::Mul(b.boxed(), a.boxed()),
            (a, b) => Self::Mul(a.boxed(), b.boxed()),
        }
    }

    fn div(a: Self, b: Self) -> Self {
        match (a, b) {
            (Self::Num(x), Self::Num(y)) if y != 0.0 => Self::Num(x / y),
            (Self::Num(z), _) if z == 0.0 => Self::Num(0.0),
            (a, Self::Num(o)) if o == 1.0 => a,
            (a, b) => Self::Div(a.boxed(), b.boxed()),
        }
    }

    fn pow(a: Self, b: Self) -> Self {
        match (a, b) {
            (_, Self::Num(z)) if z == 0.0 => Self::Num(1.0),
            (a, Self::Num(o)) if o == 1.0 => a,
            (Self::Num(x), Self::Num(y)) => Self::Num(x.powf(y)),
            (a, b) => Self::Pow(a.boxed(), b.boxed()),
        }
    }

    fn func(f: Func, arg: Self) -> Self {
        Self::Func(f, arg.boxed())
    }
}

// Precedence bands for rendering: additive 1, multiplicative 2, unary 3,
// power 4, atoms 5. A child is parenthesized when its band is below what the
// position requires, which keeps `Display` output re-parsable.
impl Expr {
    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        let prec = match self {
            Self::Num(v) if *v < 0.0 => 3,
            Self::Num(_) | Self::Var | Self::Func(..) => 5,
            Self::Neg(_) => 3,
            Self::Add(..) | Self::Sub(..) => 1,
            Self::Mul(..) | Self::Div(..) => 2,
            Self::Pow(..) => 4,
        };
        if prec < min {
            write!(f, "(")?;
        }
        match self {
            Self::Num(v) => write!(f, "{v}")?,
            Self::Var => write!(f, "x")?,
            Self::Neg(e) => {
                write!(f, "-")?;
                e.fmt_prec(f, 3)?;
            }
            Self::Add(a, b) => {
                a.fmt_prec(f, 1)?;
                write!(f, " + ")?;
                b.fmt_prec(f, 1)?;
            }
            Self::Sub(a, b) => {
                a.fmt_prec(f, 1)?;
                write!(f, " - ")?;
                b.fmt_prec(f, 2)?;
            }
            Self::Mul(a, b) => {
                a.fmt_prec(f, 2)?;
                write!(f, "*")?;
                b.fmt_prec(f, 2)?;
            }
            Self::Div(a, b) => {
                a.fmt_prec(f, 2)?;
                write!(f, "/")?;
                b.fmt_prec(f, 3)?;
            }
            Self::Pow(a, b) => {
                a.fmt_prec(f, 5)?;
                write!(f, "**")?;
                b.fmt_prec(f, 3)?;
            }
            Self::Func(func, arg) => {
                write!(f, "{}(", func.name())?;
                arg.fmt_prec(f, 0)?;
                write!(f, ")")?;
            }
        }
        if prec < min {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}

#[cfg(test)]
mod test {
    use super::Expr;

    #[test]
    fn eval_polynomial() {
        let e = Expr::parse("x**2 - 4").unwrap();
        assert_eq!(e.eval(3.0), 5.0);
        assert_eq!(e.eval(-2.0), 0.0);
    }

    #[test]
    fn eval_transcendental() {
        let e = Expr::parse("sin(x) + x**2").unwrap();
        let x = 0.7;
        assert!((e.eval(x) - (x.sin() + x * x)).abs() < 1e-15);
    }

    #[test]
    fn eval_constants() {
        let e = Expr::parse("cos(pi)").unwrap();
        assert!((e.eval(0.0) - -1.0).abs() < 1e-15);
        let e = Expr::parse("log(e)").unwrap();
        assert!((e.eval(0.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn lambdify_matches_eval() {
        let e = Expr::parse("exp(x) - 2").unwrap();
        let f = e.clone().lambdify();
        for x in [-1.0, 0.0, 0.5, 2.0] {
            assert_eq!(f(x), e.eval(x));
        }
    }

    #[test]
    fn display_round_trips() {
        for input in [
            "x**2 - 4",
            "sin(x) + x**2",
            "-(x + 1)*x",
            "1/(2*sqrt(x))",
            "x**-2",
            "2*x/(x - 1)",
        ] {
            let e = Expr::parse(input).unwrap();
            let reparsed = Expr::parse(&e.to_string()).unwrap();
            assert_eq!(e, reparsed, "{input} -> {e}");
        }
    }

    #[test]
    fn display_is_conventional() {
        let e = Expr::parse("(x+1)^2").unwrap();
        assert_eq!(e.to_string(), "(x + 1)**2");
    }
}
