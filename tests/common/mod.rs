//! Univariate jet oracle shared by the integration tests.
//!
//! Coefficient slices hold `c[k] = f^(k)(t0) / k!`. Each elementary function
//! is propagated with the logarithmic-derivative recurrences (Griewank ch. 13),
//! independently of the composition engine under test.

#![allow(dead_code)]

use approx::assert_relative_eq;
use tpsa::{Desc, Field, Tpsa};

use std::rc::Rc;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn num<T: Field>(k: usize) -> T {
    T::from_f64(k as f64)
}

/// The jet of the independent variable `t0 + t`, `n` coefficients.
pub fn var<T: Field>(t0: T, n: usize) -> Vec<T> {
    let mut a = vec![T::zero(); n];
    a[0] = t0;
    if n > 1 {
        a[1] = T::one();
    }
    a
}

/// `c = a * b` (Cauchy product).
pub fn mul<T: Field>(a: &[T], b: &[T]) -> Vec<T> {
    (0..a.len())
        .map(|k| (0..=k).fold(T::zero(), |s, j| s + a[j] * b[k - j]))
        .collect()
}

pub fn recip<T: Field>(a: &[T]) -> Vec<T> {
    let inv_a0 = T::one() / a[0];
    let mut c = vec![T::zero(); a.len()];
    c[0] = inv_a0;
    for k in 1..a.len() {
        let sum = (1..=k).fold(T::zero(), |s, j| s + a[j] * c[k - j]);
        c[k] = -sum * inv_a0;
    }
    c
}

pub fn div<T: Field>(a: &[T], b: &[T]) -> Vec<T> {
    mul(a, &recip(b))
}

pub fn scale<T: Field>(a: &[T], s: T) -> Vec<T> {
    a.iter().map(|&x| s * x).collect()
}

/// `v + a` on the constant term.
pub fn shift<T: Field>(a: &[T], v: T) -> Vec<T> {
    let mut c = a.to_vec();
    c[0] = c[0] + v;
    c
}

pub fn exp<T: Field>(a: &[T]) -> Vec<T> {
    let mut c = vec![T::zero(); a.len()];
    c[0] = a[0].exp();
    for k in 1..a.len() {
        let sum = (1..=k).fold(T::zero(), |s, j| s + num::<T>(j) * a[j] * c[k - j]);
        c[k] = sum / num(k);
    }
    c
}

pub fn ln<T: Field>(a: &[T]) -> Vec<T> {
    let inv_a0 = T::one() / a[0];
    let mut c = vec![T::zero(); a.len()];
    c[0] = a[0].ln();
    for k in 1..a.len() {
        let sum = (1..k).fold(T::zero(), |s, j| s + num::<T>(j) * c[j] * a[k - j]);
        c[k] = (a[k] - sum / num(k)) * inv_a0;
    }
    c
}

pub fn sqrt<T: Field>(a: &[T]) -> Vec<T> {
    let mut c = vec![T::zero(); a.len()];
    c[0] = a[0].sqrt();
    let two_c0 = num::<T>(2) * c[0];
    for k in 1..a.len() {
        let sum = (1..k).fold(T::zero(), |s, j| s + c[j] * c[k - j]);
        c[k] = (a[k] - sum) / two_c0;
    }
    c
}

/// `(sin a, cos a)` for `sign = -1`, `(sinh a, cosh a)` for `sign = +1`.
fn coupled<T: Field>(a: &[T], s0: T, c0: T, sign: T) -> (Vec<T>, Vec<T>) {
    let n = a.len();
    let (mut s, mut c) = (vec![T::zero(); n], vec![T::zero(); n]);
    s[0] = s0;
    c[0] = c0;
    for k in 1..n {
        let mut sum_s = T::zero();
        let mut sum_c = T::zero();
        for j in 1..=k {
            let jf = num::<T>(j);
            sum_s = sum_s + jf * a[j] * c[k - j];
            sum_c = sum_c + jf * a[j] * s[k - j];
        }
        s[k] = sum_s / num(k);
        c[k] = sign * sum_c / num(k);
    }
    (s, c)
}

pub fn sin_cos<T: Field>(a: &[T]) -> (Vec<T>, Vec<T>) {
    coupled(a, a[0].sin(), a[0].cos(), -T::one())
}

pub fn sinh_cosh<T: Field>(a: &[T]) -> (Vec<T>, Vec<T>) {
    coupled(a, a[0].sinh(), a[0].cosh(), T::one())
}

/// `c` with `c' = a' · d` and `c[0] = c0`.
pub fn integrate<T: Field>(a: &[T], d: &[T], c0: T) -> Vec<T> {
    let mut c = vec![T::zero(); a.len()];
    c[0] = c0;
    for k in 1..a.len() {
        let sum = (1..=k).fold(T::zero(), |s, j| s + num::<T>(j) * a[j] * d[k - j]);
        c[k] = sum / num(k);
    }
    c
}

/// `1 + sign·a²`
fn one_plus_sq<T: Field>(a: &[T], sign: T) -> Vec<T> {
    shift(&scale(&mul(a, a), sign), T::one())
}

pub fn asin<T: Field>(a: &[T]) -> Vec<T> {
    integrate(a, &recip(&sqrt(&one_plus_sq(a, -T::one()))), a[0].asin())
}

pub fn acos<T: Field>(a: &[T]) -> Vec<T> {
    let d = scale(&recip(&sqrt(&one_plus_sq(a, -T::one()))), -T::one());
    integrate(a, &d, a[0].acos())
}

pub fn atan<T: Field>(a: &[T]) -> Vec<T> {
    integrate(a, &recip(&one_plus_sq(a, T::one())), a[0].atan())
}

pub fn asinh<T: Field>(a: &[T]) -> Vec<T> {
    integrate(a, &recip(&sqrt(&one_plus_sq(a, T::one()))), a[0].asinh())
}

pub fn acosh<T: Field>(a: &[T]) -> Vec<T> {
    let d = recip(&sqrt(&shift(&mul(a, a), -T::one())));
    integrate(a, &d, a[0].acosh())
}

pub fn atanh<T: Field>(a: &[T]) -> Vec<T> {
    integrate(a, &recip(&one_plus_sq(a, -T::one())), a[0].atanh())
}

pub fn erf<T: Field>(a: &[T]) -> Vec<T> {
    let two_over_sqrt_pi = T::from_f64(std::f64::consts::FRAC_2_SQRT_PI);
    let d = scale(&exp(&scale(&mul(a, a), -T::one())), two_over_sqrt_pi);
    integrate(a, &d, a[0].erf())
}

// ══════════════════════════════════════════════
//  Series helpers
// ══════════════════════════════════════════════

/// One-variable descriptor and the variable `a0 + x` at order `mo`.
pub fn univariate<T: Field>(mo: u8, a0: T) -> (Rc<Desc>, Tpsa<T>) {
    let d = Desc::new(1, mo);
    let x = Tpsa::variable(&d, mo, 0, a0);
    (d, x)
}

/// Univariate coefficients `c[0..=mo]` of a one-variable series.
pub fn coeffs_1d<T: Field>(c: &Tpsa<T>) -> Vec<T> {
    (0..=c.mo()).map(|k| c.get(&[k])).collect()
}

pub fn assert_close<T: Field>(got: T, want: T, tol: f64) {
    assert_relative_eq!(got.re(), want.re(), epsilon = tol, max_relative = tol);
    assert_relative_eq!(got.im(), want.im(), epsilon = tol, max_relative = tol);
}

/// Compare a one-variable series against oracle coefficients.
pub fn assert_jet<T: Field>(c: &Tpsa<T>, want: &[T], tol: f64) {
    assert_eq!(c.mo() as usize + 1, want.len());
    for (k, (&g, &w)) in coeffs_1d(c).iter().zip(want).enumerate() {
        assert!(
            (g - w).abs() <= tol * (1.0 + w.abs()),
            "order {k}: got {g}, want {w}"
        );
    }
}
