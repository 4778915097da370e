use std::fmt;

use num::{Float, FromPrimitive, ToPrimitive};

/// Real scalar types the solver can iterate on.
///
/// `f64` is what the interactive app uses; `f32` works too, at the cost of
/// the default tolerance sitting close to its precision floor.
pub trait RealScalar: Float + FromPrimitive + ToPrimitive + fmt::Debug + fmt::Display {}

impl<T> RealScalar for T where T: Float + FromPrimitive + ToPrimitive + fmt::Debug + fmt::Display {}
