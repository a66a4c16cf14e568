//! Number types an [`Expression`](super::Expression) can be evaluated over.
//!
//! Evaluating over `f64` gives the value of a formula. With the
//! `num-dual-mode` feature, evaluating over `Dual64` gives the value and the
//! exact first derivative in one pass (forward-mode automatic
//! differentiation).

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Single-argument functions known to the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryFunction {
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
    /// Arcsine
    Asin,
    /// Arccosine
    Acos,
    /// Arctangent
    Atan,
    /// Hyperbolic sine
    Sinh,
    /// Hyperbolic cosine
    Cosh,
    /// Hyperbolic tangent
    Tanh,
    /// Natural exponential
    Exp,
    /// Natural logarithm (`ln` or single-argument `log`)
    Ln,
    /// Base-10 logarithm
    Log10,
    /// Base-2 logarithm
    Log2,
    /// Square root
    Sqrt,
    /// Cube root
    Cbrt,
    /// Absolute value
    Abs,
}

impl UnaryFunction {
    /// Look a function up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        let f = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "ln" | "log" => Self::Ln,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "abs" => Self::Abs,
            _ => return None,
        };
        Some(f)
    }
}

/// Arithmetic needed to evaluate an expression.
pub trait Scalar:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Lift a plain number.
    fn constant(value: f64) -> Self;

    /// The real value.
    fn value(&self) -> f64;

    /// `self ^ exponent`.
    fn pow(self, exponent: Self) -> Self;

    /// Truncated remainder, matching `f64 % f64`.
    fn rem(self, divisor: Self) -> Self;

    /// Apply a named function.
    fn apply(self, function: UnaryFunction) -> Self;
}

impl Scalar for f64 {
    #[inline]
    fn constant(value: f64) -> Self {
        value
    }

    #[inline]
    fn value(&self) -> f64 {
        *self
    }

    #[inline]
    fn pow(self, exponent: Self) -> Self {
        self.powf(exponent)
    }

    #[inline]
    fn rem(self, divisor: Self) -> Self {
        self % divisor
    }

    fn apply(self, function: UnaryFunction) -> Self {
        match function {
            UnaryFunction::Sin => self.sin(),
            UnaryFunction::Cos => self.cos(),
            UnaryFunction::Tan => self.tan(),
            UnaryFunction::Asin => self.asin(),
            UnaryFunction::Acos => self.acos(),
            UnaryFunction::Atan => self.atan(),
            UnaryFunction::Sinh => self.sinh(),
            UnaryFunction::Cosh => self.cosh(),
            UnaryFunction::Tanh => self.tanh(),
            UnaryFunction::Exp => self.exp(),
            UnaryFunction::Ln => self.ln(),
            UnaryFunction::Log10 => self.log10(),
            UnaryFunction::Log2 => self.log2(),
            UnaryFunction::Sqrt => self.sqrt(),
            UnaryFunction::Cbrt => self.cbrt(),
            UnaryFunction::Abs => self.abs(),
        }
    }
}

#[cfg(feature = "num-dual-mode")]
mod dual {
    use super::{Scalar, UnaryFunction};
    use num_dual::{Dual64, DualNum};
    use num_traits::Signed;

    impl Scalar for Dual64 {
        #[inline]
        fn constant(value: f64) -> Self {
            Dual64::from(value)
        }

        #[inline]
        fn value(&self) -> f64 {
            self.re
        }

        fn pow(self, exponent: Self) -> Self {
            // A constant integer exponent must not go through exp(n ln x),
            // which is undefined for negative bases.
            if exponent.eps == 0.0 {
                let n = exponent.re;
                if n.fract() == 0.0 && n.abs() <= i32::MAX as f64 {
                    DualNum::powi(&self, n as i32)
                } else {
                    DualNum::powf(&self, n)
                }
            } else {
                DualNum::powd(&self, exponent)
            }
        }

        fn rem(self, divisor: Self) -> Self {
            self - divisor * Dual64::from((self.re / divisor.re).trunc())
        }

        fn apply(self, function: UnaryFunction) -> Self {
            match function {
                UnaryFunction::Sin => DualNum::sin(&self),
                UnaryFunction::Cos => DualNum::cos(&self),
                UnaryFunction::Tan => DualNum::tan(&self),
                UnaryFunction::Asin => DualNum::asin(&self),
                UnaryFunction::Acos => DualNum::acos(&self),
                UnaryFunction::Atan => DualNum::atan(&self),
                UnaryFunction::Sinh => DualNum::sinh(&self),
                UnaryFunction::Cosh => DualNum::cosh(&self),
                UnaryFunction::Tanh => DualNum::tanh(&self),
                UnaryFunction::Exp => DualNum::exp(&self),
                UnaryFunction::Ln => DualNum::ln(&self),
                UnaryFunction::Log10 => DualNum::log10(&self),
                UnaryFunction::Log2 => DualNum::log2(&self),
                UnaryFunction::Sqrt => DualNum::sqrt(&self),
                UnaryFunction::Cbrt => DualNum::cbrt(&self),
                UnaryFunction::Abs => Signed::abs(&self),
            }
        }
    }
}
