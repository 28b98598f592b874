//! Dense Univariate Polynomials over the Rationals.
//!
//! Witness polynomials of interval-represented algebraic numbers live in
//! `Q[x]`. They are small and dense, so coefficients are kept in a plain
//! vector indexed by degree.
//!
//! ## Operations
//!
//! - Evaluation (Horner) and sign evaluation
//! - Derivative, Euclidean division, GCD
//! - Square-free part (used to normalize witness polynomials)
//!
//! ## References
//!
//! - Knuth: "The Art of Computer Programming Vol. 2" (polynomial arithmetic)
//! - Z3's `math/polynomial/upolynomial.cpp`

pub mod root_isolation;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::ops::{Mul, Neg};

/// A univariate polynomial with rational coefficients.
///
/// `coeffs[i]` is the coefficient of `x^i`. The vector never carries
/// trailing zeros, so the zero polynomial has no coefficients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UnivariatePolynomial {
    coeffs: Vec<BigRational>,
}

impl UnivariatePolynomial {
    /// Create a polynomial from coefficients in ascending degree order.
    pub fn new(coeffs: Vec<BigRational>) -> Self {
        let mut poly = Self { coeffs };
        poly.normalize();
        poly
    }

    /// Create a polynomial from integer coefficients in ascending degree order.
    ///
    /// `from_i64(&[-2, 0, 1])` is `x^2 - 2`.
    pub fn from_i64(coeffs: &[i64]) -> Self {
        Self::new(
            coeffs
                .iter()
                .map(|&c| BigRational::from_integer(BigInt::from(c)))
                .collect(),
        )
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// A constant polynomial.
    pub fn constant(c: BigRational) -> Self {
        Self::new(vec![c])
    }

    /// The linear polynomial `x - root`.
    pub fn linear_root(root: BigRational) -> Self {
        Self::new(vec![-root, BigRational::one()])
    }

    fn normalize(&mut self) {
        while self.coeffs.last().is_some_and(|c| c.is_zero()) {
            self.coeffs.pop();
        }
    }

    /// Check if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Check if this polynomial is a constant (including zero).
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    /// Degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Coefficients in ascending degree order.
    pub fn coeffs(&self) -> &[BigRational] {
        &self.coeffs
    }

    /// Leading coefficient, or `None` for the zero polynomial.
    pub fn leading_coeff(&self) -> Option<&BigRational> {
        self.coeffs.last()
    }

    /// Evaluate at a rational point using Horner's method.
    pub fn eval(&self, x: &BigRational) -> BigRational {
        let mut result = BigRational::zero();
        for coeff in self.coeffs.iter().rev() {
            result = result * x + coeff;
        }
        result
    }

    /// Sign of the polynomial at a point: -1, 0 or 1.
    pub fn sign_at(&self, x: &BigRational) -> i8 {
        let value = self.eval(x);
        if value.is_zero() {
            0
        } else if value.is_positive() {
            1
        } else {
            -1
        }
    }

    /// Formal derivative.
    pub fn derivative(&self) -> Self {
        if self.coeffs.len() <= 1 {
            return Self::zero();
        }
        Self::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| c * BigRational::from_integer(BigInt::from(i)))
                .collect(),
        )
    }

    /// Euclidean division: returns `(quotient, remainder)` with
    /// `deg(remainder) < deg(divisor)`.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is the zero polynomial.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        let Some(lead) = divisor.leading_coeff() else {
            panic!("Division by zero polynomial");
        };

        if self.coeffs.len() < divisor.coeffs.len() {
            return (Self::zero(), self.clone());
        }

        let shift_max = self.coeffs.len() - divisor.coeffs.len();
        let mut quotient = vec![BigRational::zero(); shift_max + 1];
        let mut remainder = self.coeffs.clone();

        for shift in (0..=shift_max).rev() {
            let top = shift + divisor.degree();
            if remainder[top].is_zero() {
                continue;
            }
            let factor = &remainder[top] / lead;
            for (i, d) in divisor.coeffs.iter().enumerate() {
                remainder[shift + i] -= &factor * d;
            }
            quotient[shift] = factor;
        }

        remainder.truncate(divisor.degree());
        (Self::new(quotient), Self::new(remainder))
    }

    /// Remainder of Euclidean division.
    pub fn rem(&self, divisor: &Self) -> Self {
        self.div_rem(divisor).1
    }

    /// Scale so that the leading coefficient is one. Zero stays zero.
    pub fn monic(&self) -> Self {
        match self.leading_coeff() {
            Some(lead) if !lead.is_one() => {
                Self::new(self.coeffs.iter().map(|c| c / lead).collect())
            }
            _ => self.clone(),
        }
    }

    /// Monic greatest common divisor. `gcd(0, 0)` is zero.
    pub fn gcd(&self, other: &Self) -> Self {
        let mut r0 = self.clone();
        let mut r1 = other.clone();

        while !r1.is_zero() {
            let remainder = r0.rem(&r1);
            r0 = r1;
            r1 = remainder;
        }

        r0.monic()
    }

    /// Monic square-free part: `p / gcd(p, p')`.
    ///
    /// Has the same distinct real roots as `self`, each simple.
    pub fn squarefree(&self) -> Self {
        if self.is_constant() {
            return self.monic();
        }
        let g = self.gcd(&self.derivative());
        if g.is_constant() {
            return self.monic();
        }
        self.div_rem(&g).0.monic()
    }
}

impl Neg for UnivariatePolynomial {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            coeffs: self.coeffs.into_iter().map(|c| -c).collect(),
        }
    }
}

impl Mul for &UnivariatePolynomial {
    type Output = UnivariatePolynomial;

    fn mul(self, rhs: Self) -> UnivariatePolynomial {
        if self.is_zero() || rhs.is_zero() {
            return UnivariatePolynomial::zero();
        }
        let mut coeffs = vec![BigRational::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        UnivariatePolynomial::new(coeffs)
    }
}

impl fmt::Display for UnivariatePolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (i, coeff) in self.coeffs.iter().enumerate().rev() {
            if coeff.is_zero() {
                continue;
            }
            if first {
                if coeff.is_negative() {
                    write!(f, "-")?;
                }
            } else if coeff.is_negative() {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            first = false;

            let magnitude = coeff.abs();
            let show_coeff = i == 0 || !magnitude.is_one();
            if show_coeff {
                write!(f, "{}", magnitude)?;
            }
            if i > 0 {
                if show_coeff {
                    write!(f, "*")?;
                }
                write!(f, "x")?;
                if i > 1 {
                    write!(f, "^{}", i)?;
                }
            }
        }
        Ok(())
    }
}
