//! The [`Field`] trait for coefficients of a series.
//!
//! A single generic algorithm serves the real (`f64`) and complex
//! (`Complex64`) coefficient fields. Arithmetic and the elementary
//! transcendentals come from [`num_complex::ComplexFloat`]; this trait only
//! adds the hooks that differ between fields.

use std::fmt::{Debug, Display};

use num_complex::{Complex64, ComplexFloat};

use crate::desc::Desc;
use crate::scratch::ScratchPool;

/// Coefficient field of a [`Tpsa`](crate::Tpsa).
///
/// Implemented for `f64` and `Complex64` only: each field owns a dedicated
/// scratch pool inside [`Desc`].
pub trait Field: ComplexFloat<Real = f64> + Default + Debug + Display + 'static {
    /// `true` for the real field. Real domain guards also constrain signs.
    const REAL: bool;

    /// Lift a real number into the field.
    fn from_f64(v: f64) -> Self;

    /// The scratch pool serving this field in `desc`.
    fn pool(desc: &Desc) -> &ScratchPool<Self>;

    /// Error function (Abramowitz & Stegun 7.1.26, |ε| < 1.5e-7 on the real axis).
    ///
    /// The rational form only holds for `Re(x) >= 0`; the left half-plane
    /// goes through `erf(x) = -erf(-x)`.
    fn erf(self) -> Self {
        if self.re() < 0.0 {
            -erf_rational(-self)
        } else {
            erf_rational(self)
        }
    }
}

impl Field for f64 {
    const REAL: bool = true;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn pool(desc: &Desc) -> &ScratchPool<Self> {
        desc.real_pool()
    }
}

impl Field for Complex64 {
    const REAL: bool = false;

    #[inline]
    fn from_f64(v: f64) -> Self {
        Complex64::new(v, 0.0)
    }

    #[inline]
    fn pool(desc: &Desc) -> &ScratchPool<Self> {
        desc.complex_pool()
    }
}

const ERF_A: [f64; 5] = [
    0.254829592,
    -0.284496736,
    1.421413741,
    -1.453152027,
    1.061405429,
];
const ERF_P: f64 = 0.3275911;

/// `1 - t(a1 + t(a2 + t(a3 + t(a4 + t·a5))))·e^{-x²}` with `t = 1/(1 + p·x)`.
fn erf_rational<T: Field>(x: T) -> T {
    let one = T::one();
    let t = one / (one + T::from_f64(ERF_P) * x);
    let poly = ERF_A
        .iter()
        .rev()
        .fold(T::zero(), |acc, &a| t * (T::from_f64(a) + acc));
    one - poly * (-(x * x)).exp()
}
