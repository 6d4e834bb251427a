//! Hand-derived expansions up to order [`MANUAL_ORD`].
//!
//! The functions below have no short stable recurrence for `F^(k)(a0)/k!`,
//! so their first six coefficients are written out in closed form, in terms
//! of `sin a0`/`cos a0` (tan, cot), `sinh a0`/`cosh a0` (tanh, coth), or
//! powers of a single reciprocal (inverse functions, erf).
//!
//! Callers slice the table to `..=to` with `to <= MANUAL_ORD`.

use std::f64::consts::{FRAC_2_SQRT_PI, FRAC_PI_2};

use crate::field::Field;
pub use crate::guard::MANUAL_ORD;

pub(crate) type Table<T> = [T; MANUAL_ORD as usize + 1];

#[inline]
fn c<T: Field>(v: f64) -> T {
    T::from_f64(v)
}

/// Powers `x^0 ..= x^9` (the deepest entry is `(1/√(1-a0²))^9`).
fn powers<T: Field>(x: T) -> [T; 10] {
    let mut p = [T::one(); 10];
    for k in 1..10 {
        p[k] = p[k - 1] * x;
    }
    p
}

/// `tan(a0+p)`, requires `cos a0 ≠ 0`.
pub(crate) fn tan<T: Field>(a0: T) -> Table<T> {
    let (s, co) = (a0.sin(), a0.cos());
    let x = powers(co.recip());
    let (s2, c2) = (s * s, co * co);
    [
        s * x[1],
        x[2],
        s * x[3],
        (c2 + c::<T>(3.0) * s2) * x[4] / c(3.0),
        (c::<T>(2.0) * s + s2 * s) * x[5] / c(3.0),
        (c::<T>(2.0) * c2 + c::<T>(3.0) * c2 * s2 + c::<T>(10.0) * s2 + c::<T>(5.0) * s2 * s2)
            * x[6]
            / c(15.0),
    ]
}

/// `cot(a0+p)`, requires `sin a0 ≠ 0`.
pub(crate) fn cot<T: Field>(a0: T) -> Table<T> {
    let (s, co) = (a0.sin(), a0.cos());
    let x = powers(s.recip());
    let (s2, c2) = (s * s, co * co);
    [
        co * x[1],
        -x[2],
        co * x[3],
        -(s2 + c::<T>(3.0) * c2) * x[4] / c(3.0),
        (c::<T>(2.0) * co + c2 * co) * x[5] / c(3.0),
        -(c::<T>(2.0) * s2 + c::<T>(3.0) * s2 * c2 + c::<T>(10.0) * c2 + c::<T>(5.0) * c2 * c2)
            * x[6]
            / c(15.0),
    ]
}

/// `tanh(a0+p)`, requires `cosh a0 ≠ 0`.
pub(crate) fn tanh<T: Field>(a0: T) -> Table<T> {
    let (s, co) = (a0.sinh(), a0.cosh());
    let x = powers(co.recip());
    let (s2, c2) = (s * s, co * co);
    [
        s * x[1],
        x[2],
        -s * x[3],
        (c::<T>(3.0) * s2 - c2) * x[4] / c(3.0),
        (c::<T>(2.0) * s - s2 * s) * x[5] / c(3.0),
        (c::<T>(2.0) * c2 - c::<T>(3.0) * c2 * s2 - c::<T>(10.0) * s2 + c::<T>(5.0) * s2 * s2)
            * x[6]
            / c(15.0),
    ]
}

/// `coth(a0+p)`, requires `sinh a0 ≠ 0`.
pub(crate) fn coth<T: Field>(a0: T) -> Table<T> {
    let (s, co) = (a0.sinh(), a0.cosh());
    let x = powers(s.recip());
    let (s2, c2) = (s * s, co * co);
    [
        co * x[1],
        -x[2],
        co * x[3],
        (s2 - c::<T>(3.0) * c2) * x[4] / c(3.0),
        (c::<T>(2.0) * co + c2 * co) * x[5] / c(3.0),
        (c::<T>(2.0) * s2 + c::<T>(3.0) * s2 * c2 - c::<T>(10.0) * c2 - c::<T>(5.0) * c2 * c2)
            * x[6]
            / c(15.0),
    ]
}

/// Orders 1..=5 of `asin` (sign `+1`) and of `asinh` (sign `-1`), built on
/// `x = 1/√(1 - sign·a0²)`.
fn asin_like<T: Field>(a0: T, sign: T) -> [T; 5] {
    let a2 = a0 * a0;
    let x = powers((T::one() - sign * a2).sqrt().recip());
    [
        x[1],
        sign * a0 * x[3] / c(2.0),
        (c::<T>(2.0) * a2 + sign) * x[5] / c(6.0),
        (c::<T>(3.0) * a0 + sign * c::<T>(2.0) * a2 * a0) * x[7] / c(8.0),
        (c::<T>(3.0) + sign * c::<T>(24.0) * a2 + c::<T>(8.0) * a2 * a2) * x[9] / c(40.0),
    ]
}

/// `asin(a0+p)`, requires `|a0| < 1` (real) or `a0² ≠ 1` (complex).
pub(crate) fn asin<T: Field>(a0: T) -> Table<T> {
    let d = asin_like(a0, T::one());
    [a0.asin(), d[0], d[1], d[2], d[3], d[4]]
}

/// `acos(a0+p) = π/2 - asin(a0+p)`.
pub(crate) fn acos<T: Field>(a0: T) -> Table<T> {
    let d = asin_like(a0, T::one());
    [a0.acos(), -d[0], -d[1], -d[2], -d[3], -d[4]]
}

/// `asinh(a0+p)`, requires `a0² ≠ -1`.
pub(crate) fn asinh<T: Field>(a0: T) -> Table<T> {
    let d = asin_like(a0, -T::one());
    [a0.asinh(), d[0], d[1], d[2], d[3], d[4]]
}

/// `acosh(a0+p)`, requires `a0 > 1` (real) or `a0² ≠ 1` (complex).
pub(crate) fn acosh<T: Field>(a0: T) -> Table<T> {
    let a2 = a0 * a0;
    let x = powers((a2 - T::one()).sqrt().recip());
    [
        a0.acosh(),
        x[1],
        -a0 * x[3] / c(2.0),
        (T::one() + c::<T>(2.0) * a2) * x[5] / c(6.0),
        -(c::<T>(3.0) * a0 + c::<T>(2.0) * a2 * a0) * x[7] / c(8.0),
        (c::<T>(3.0) + c::<T>(24.0) * a2 + c::<T>(8.0) * a2 * a2) * x[9] / c(40.0),
    ]
}

/// Orders 1..=5 of `atan` (sign `+1`) and of `atanh` (sign `-1`), built on
/// `x = 1/(1 + sign·a0²)`.
fn atan_like<T: Field>(a0: T, sign: T) -> [T; 5] {
    let a2 = a0 * a0;
    let x = powers((T::one() + sign * a2).recip());
    [
        x[1],
        -sign * a0 * x[2],
        (a2 - sign * c::<T>(1.0 / 3.0)) * x[3],
        (a0 - sign * a2 * a0) * x[4],
        (c::<T>(1.0 / 5.0) - sign * c::<T>(2.0) * a2 + a2 * a2) * x[5],
    ]
}

/// `atan(a0+p)`, requires `a0² ≠ -1`.
pub(crate) fn atan<T: Field>(a0: T) -> Table<T> {
    let d = atan_like(a0, T::one());
    [a0.atan(), d[0], d[1], d[2], d[3], d[4]]
}

/// `acot(a0+p) = π/2 - atan(a0+p)`.
pub(crate) fn acot<T: Field>(a0: T) -> Table<T> {
    let d = atan_like(a0, T::one());
    [c::<T>(FRAC_PI_2) - a0.atan(), -d[0], -d[1], -d[2], -d[3], -d[4]]
}

/// `atanh(a0+p)`, requires `|a0| < 1` (real) or `a0² ≠ 1` (complex).
pub(crate) fn atanh<T: Field>(a0: T) -> Table<T> {
    let d = atan_like(a0, -T::one());
    [a0.atanh(), d[0], d[1], d[2], d[3], d[4]]
}

/// `acoth(a0+p) = atanh(1/(a0+p))`: same derivatives as atanh.
pub(crate) fn acoth<T: Field>(a0: T) -> Table<T> {
    let d = atan_like(a0, -T::one());
    [a0.recip().atanh(), d[0], d[1], d[2], d[3], d[4]]
}

/// `erf(a0+p)`: derivatives of `2/√π · e^{-x²}`, seeded by [`Field::erf`].
pub(crate) fn erf<T: Field>(a0: T) -> Table<T> {
    let a2 = a0 * a0;
    let e = c::<T>(FRAC_2_SQRT_PI) * (-a2).exp();
    [
        a0.erf(),
        e,
        -a0 * e,
        (c::<T>(2.0) * a2 - T::one()) / c(3.0) * e,
        (c::<T>(12.0) * a0 - c::<T>(8.0) * a2 * a0) / c(24.0) * e,
        (c::<T>(16.0) * a2 * a2 - c::<T>(48.0) * a2 + c::<T>(12.0)) / c(120.0) * e,
    ]
}
