//! Taylor coefficients of `F(a0 + p)` about `p = 0`.
//!
//! Convention: `coef[k] = F^(k)(a0) / k!`, `k = 0..=to`. Each generator seeds
//! the first one or two coefficients in closed form and fills the rest with a
//! one- or two-term recurrence. Callers guarantee `to >= 1` and the domain of
//! `a0`.

use crate::field::Field;

#[inline]
fn num<T: Field>(n: usize) -> T {
    T::from_f64(n as f64)
}

/// `e^{a0+p} = e^{a0} · Σ p^k / k!`
pub(crate) fn exp<T: Field>(a0: T, to: u8) -> Vec<T> {
    let mut coef = Vec::with_capacity(to as usize + 1);
    coef.push(a0.exp());
    for o in 1..=to as usize {
        coef.push(coef[o - 1] / num(o));
    }
    coef
}

/// `ln(a0+p) = ln a0 + (p/a0) - (p/a0)²/2 + (p/a0)³/3 - ...`
pub(crate) fn log<T: Field>(a0: T, to: u8) -> Vec<T> {
    let mut coef = Vec::with_capacity(to as usize + 1);
    coef.push(a0.ln());
    coef.push(a0.recip());
    for o in 2..=to as usize {
        coef.push(-coef[o - 1] / a0 / num(o) * num(o - 1));
    }
    coef
}

/// `√(a0+p) = √a0 · (1 + (p/a0)/2 - (p/a0)²/8 + ...)`
pub(crate) fn sqrt<T: Field>(a0: T, to: u8) -> Vec<T> {
    let mut coef = Vec::with_capacity(to as usize + 1);
    coef.push(a0.sqrt());
    for o in 1..=to as usize {
        // (2o - 3) is -1 at o = 1
        let k = T::from_f64(2.0 * o as f64 - 3.0);
        coef.push(-coef[o - 1] / a0 / num(2 * o) * k);
    }
    coef
}

/// `v / √(a0+p)`
pub(crate) fn invsqrt<T: Field>(a0: T, v: T, to: u8) -> Vec<T> {
    let mut coef = Vec::with_capacity(to as usize + 1);
    coef.push(v / a0.sqrt());
    for o in 1..=to as usize {
        coef.push(-coef[o - 1] / a0 / num(2 * o) * num(2 * o - 1));
    }
    coef
}

/// `v / (a0+p) = (v/a0) · Σ (-p/a0)^k`
pub(crate) fn inv<T: Field>(a0: T, v: T, to: u8) -> Vec<T> {
    let mut coef = Vec::with_capacity(to as usize + 1);
    coef.push(v / a0);
    for o in 1..=to as usize {
        coef.push(-coef[o - 1] / a0);
    }
    coef
}

/// Two-term recurrence shared by the circular (`sign = -1`) and hyperbolic
/// (`sign = +1`) functions: `coef[o] = sign · coef[o-2] / (o(o-1))`.
fn second_order<T: Field>(c0: T, c1: T, sign: T, to: u8) -> Vec<T> {
    let mut coef = Vec::with_capacity(to as usize + 1);
    coef.push(c0);
    coef.push(c1);
    for o in 2..=to as usize {
        coef.push(sign * coef[o - 2] / num(o * (o - 1)));
    }
    coef
}

/// `sin(a0+p) = sin a0 · cos p + cos a0 · sin p`
pub(crate) fn sin<T: Field>(a0: T, to: u8) -> Vec<T> {
    second_order(a0.sin(), a0.cos(), -T::one(), to)
}

/// `cos(a0+p) = cos a0 · cos p - sin a0 · sin p`
pub(crate) fn cos<T: Field>(a0: T, to: u8) -> Vec<T> {
    second_order(a0.cos(), -a0.sin(), -T::one(), to)
}

pub(crate) fn sinh<T: Field>(a0: T, to: u8) -> Vec<T> {
    second_order(a0.sinh(), a0.cosh(), T::one(), to)
}

pub(crate) fn cosh<T: Field>(a0: T, to: u8) -> Vec<T> {
    second_order(a0.cosh(), a0.sinh(), T::one(), to)
}

/// `sin(√p)/√p = 1 - p/3! + p²/5! - p³/7! + ...` (about `a0 = 0` only).
pub(crate) fn sirx<T: Field>(to: u8) -> Vec<T> {
    let mut coef = Vec::with_capacity(to as usize + 1);
    coef.push(T::one());
    for o in 1..=to as usize {
        coef.push(-coef[o - 1] / num(2 * o * (2 * o + 1)));
    }
    coef
}

/// `cos(√p) = 1 - p/2! + p²/4! - p³/6! + ...` (about `a0 = 0` only).
pub(crate) fn corx<T: Field>(to: u8) -> Vec<T> {
    let mut coef = Vec::with_capacity(to as usize + 1);
    coef.push(T::one());
    for o in 1..=to as usize {
        coef.push(-coef[o - 1] / num(2 * o * (2 * o - 1)));
    }
    coef
}

/// `sin(p)/p = 1 - p²/3! + p⁴/5! - ...` (about `a0 = 0` only).
pub(crate) fn sinc<T: Field>(to: u8) -> Vec<T> {
    let mut coef = Vec::with_capacity(to as usize + 1);
    coef.push(T::one());
    coef.push(T::zero());
    for o in 2..=to as usize {
        coef.push(-coef[o - 2] / num(o * (o + 1)));
    }
    coef
}
