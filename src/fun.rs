//! Elementary functions of a series.
//!
//! Every operation reads a source (`&a`, or `Src::Output` to work in place)
//! and writes `c`. The effective order is `to = min(c.mo, desc.trunc)`.
//! Checks run first: same descriptor, the order ceiling of the manual table
//! where it applies, then the domain of `a0`. If `to == 0` or the source is
//! a pure constant (`hi == 0`), `c` becomes the scalar `F(a0)`; otherwise the
//! expansion of `F` about `a0` is composed with the deviation of the source.
//!
//! # Panics
//!
//! All operations panic on a violated precondition (see
//! [`Violation`](crate::Violation)).

use log::{debug, trace};

use crate::compose::{fixed_point, fixed_point_pair};
use crate::expand;
use crate::field::Field;
use crate::guard::{self, MANUAL_ORD};
use crate::manual;
use crate::scratch::Scratch;
use crate::tpsa::{Src, Tpsa};

/// What dispatch knows about a call before touching the output.
struct Call<T> {
    a0: T,
    to: u8,
    /// `false` when the result is the pure constant `F(a0)`.
    expand: bool,
}

#[track_caller]
fn begin<T: Field>(fun: &'static str, a: &Src<'_, T>, c: &Tpsa<T>) -> Call<T> {
    let src = a.resolve(c);
    guard::same_desc(fun, src, c);
    let to = c.effective_ord();
    let expand = to > 0 && src.hi() > 0;
    trace!("{fun}: a0={}, to={to}, expand={expand}", src.get0());
    Call {
        a0: src.get0(),
        to,
        expand,
    }
}

#[inline]
fn upto<T: Field>(table: &manual::Table<T>, to: u8) -> &[T] {
    &table[..=to as usize]
}

// ══════════════════════════════════════════════
//  Generic recurrences
// ══════════════════════════════════════════════

/// `c = v / a`
pub fn inv<'a, T: Field>(a: impl Into<Src<'a, T>>, v: T, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("inv", &a, c);
    guard::domain("inv", p.a0 != T::zero(), "a0 != 0");
    if !p.expand {
        c.scalar(v / p.a0);
        return;
    }
    fixed_point(a, c, &expand::inv(p.a0, v, p.to));
}

/// `c = v / √a`
pub fn invsqrt<'a, T: Field>(a: impl Into<Src<'a, T>>, v: T, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("invsqrt", &a, c);
    guard::domain("invsqrt", guard::positive(p.a0), "a0 > 0");
    if !p.expand {
        c.scalar(v / p.a0.sqrt());
        return;
    }
    fixed_point(a, c, &expand::invsqrt(p.a0, v, p.to));
}

/// `c = √a`. A zero constant term gives the zero series.
pub fn sqrt<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("sqrt", &a, c);
    guard::domain("sqrt", guard::non_negative(p.a0), "a0 >= 0");
    if p.a0 == T::zero() {
        c.clear();
        return;
    }
    if !p.expand {
        c.scalar(p.a0.sqrt());
        return;
    }
    fixed_point(a, c, &expand::sqrt(p.a0, p.to));
}

/// `c = e^a`
pub fn exp<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("exp", &a, c);
    if !p.expand {
        c.scalar(p.a0.exp());
        return;
    }
    fixed_point(a, c, &expand::exp(p.a0, p.to));
}

/// `c = ln a`
pub fn log<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("log", &a, c);
    guard::domain("log", guard::positive(p.a0), "a0 > 0");
    if !p.expand {
        c.scalar(p.a0.ln());
        return;
    }
    fixed_point(a, c, &expand::log(p.a0, p.to));
}

/// `c = sin a`
pub fn sin<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("sin", &a, c);
    if !p.expand {
        c.scalar(p.a0.sin());
        return;
    }
    fixed_point(a, c, &expand::sin(p.a0, p.to));
}

/// `c = cos a`
pub fn cos<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("cos", &a, c);
    if !p.expand {
        c.scalar(p.a0.cos());
        return;
    }
    fixed_point(a, c, &expand::cos(p.a0, p.to));
}

/// `c = sinh a`
pub fn sinh<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("sinh", &a, c);
    if !p.expand {
        c.scalar(p.a0.sinh());
        return;
    }
    fixed_point(a, c, &expand::sinh(p.a0, p.to));
}

/// `c = cosh a`
pub fn cosh<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("cosh", &a, c);
    if !p.expand {
        c.scalar(p.a0.cosh());
        return;
    }
    fixed_point(a, c, &expand::cosh(p.a0, p.to));
}

/// `s = sin a`, `c = cos a` in one pass.
pub fn sincos<T: Field>(a: &Tpsa<T>, s: &mut Tpsa<T>, c: &mut Tpsa<T>) {
    guard::same_desc("sincos", a, s);
    guard::same_desc("sincos", a, c);
    let a0 = a.get0();
    let (sto, cto) = (s.effective_ord(), c.effective_ord());
    trace!("sincos: a0={a0}, sto={sto}, cto={cto}");

    if a.hi() == 0 {
        s.scalar(a0.sin());
        c.scalar(a0.cos());
        return;
    }
    if sto == 0 || cto == 0 {
        if sto == 0 {
            s.scalar(a0.sin());
        } else {
            sin(a, s);
        }
        if cto == 0 {
            c.scalar(a0.cos());
        } else {
            cos(a, c);
        }
        return;
    }
    fixed_point_pair(a, s, c, &expand::sin(a0, sto), &expand::cos(a0, cto));
}

/// `sh = sinh a`, `ch = cosh a` in one pass.
pub fn sincosh<T: Field>(a: &Tpsa<T>, sh: &mut Tpsa<T>, ch: &mut Tpsa<T>) {
    guard::same_desc("sincosh", a, sh);
    guard::same_desc("sincosh", a, ch);
    let a0 = a.get0();
    let (sto, cto) = (sh.effective_ord(), ch.effective_ord());
    trace!("sincosh: a0={a0}, sto={sto}, cto={cto}");

    if a.hi() == 0 {
        sh.scalar(a0.sinh());
        ch.scalar(a0.cosh());
        return;
    }
    if sto == 0 || cto == 0 {
        if sto == 0 {
            sh.scalar(a0.sinh());
        } else {
            sinh(a, sh);
        }
        if cto == 0 {
            ch.scalar(a0.cosh());
        } else {
            cosh(a, ch);
        }
        return;
    }
    fixed_point_pair(a, sh, ch, &expand::sinh(a0, sto), &expand::cosh(a0, cto));
}

/// `c = sin(√a)/√a`, requires `a0 = 0`.
pub fn sirx<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("sirx", &a, c);
    guard::domain("sirx", p.a0 == T::zero(), "a0 == 0");
    if !p.expand {
        c.scalar(T::one());
        return;
    }
    fixed_point(a, c, &expand::sirx(p.to));
}

/// `c = cos(√a)`, requires `a0 = 0`.
pub fn corx<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("corx", &a, c);
    guard::domain("corx", p.a0 == T::zero(), "a0 == 0");
    if !p.expand {
        c.scalar(T::one());
        return;
    }
    fixed_point(a, c, &expand::corx(p.to));
}

/// `c = sin(a)/a`, requires `a0 = 0`.
pub fn sinc<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("sinc", &a, c);
    guard::domain("sinc", p.a0 == T::zero(), "a0 == 0");
    if !p.expand {
        c.scalar(T::one());
        return;
    }
    fixed_point(a, c, &expand::sinc(p.to));
}

// ══════════════════════════════════════════════
//  Manual tables (order <= MANUAL_ORD)
// ══════════════════════════════════════════════

/// `c = tan a`. Above the manual order: `sin a · (1 / cos a)`.
pub fn tan<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("tan", &a, c);
    let (sa, ca) = (p.a0.sin(), p.a0.cos());
    guard::domain("tan", ca != T::zero(), "cos(a0) != 0");
    if !p.expand {
        c.scalar(sa / ca);
        return;
    }
    if p.to > MANUAL_ORD {
        debug!("tan: order {} above manual table, using sin/cos", p.to);
        let desc = c.desc().clone();
        let mut scratch = Scratch::<T, 1>::take(&desc, c.mo());
        let [num] = scratch.series();
        // read the source before the output is overwritten
        sin(a.resolve(c), num);
        cos(a, c);
        inv(Src::Output, T::one(), c);
        c.mul_by(num);
        return;
    }
    fixed_point(a, c, upto(&manual::tan(p.a0), p.to));
}

/// `c = cot a`. Above the manual order: `cos a · (1 / sin a)`.
pub fn cot<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("cot", &a, c);
    let (sa, ca) = (p.a0.sin(), p.a0.cos());
    guard::domain("cot", sa != T::zero(), "sin(a0) != 0");
    if !p.expand {
        c.scalar(ca / sa);
        return;
    }
    if p.to > MANUAL_ORD {
        debug!("cot: order {} above manual table, using cos/sin", p.to);
        let desc = c.desc().clone();
        let mut scratch = Scratch::<T, 1>::take(&desc, c.mo());
        let [num] = scratch.series();
        cos(a.resolve(c), num);
        sin(a, c);
        inv(Src::Output, T::one(), c);
        c.mul_by(num);
        return;
    }
    fixed_point(a, c, upto(&manual::cot(p.a0), p.to));
}

/// `c = asin a`, requires `|a0| < 1` on reals.
pub fn asin<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("asin", &a, c);
    guard::manual_ord("asin", p.to);
    guard::domain("asin", guard::inside_unit(p.a0), "|a0| < 1");
    if !p.expand {
        c.scalar(p.a0.asin());
        return;
    }
    fixed_point(a, c, upto(&manual::asin(p.a0), p.to));
}

/// `c = acos a`, requires `|a0| < 1` on reals.
pub fn acos<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("acos", &a, c);
    guard::manual_ord("acos", p.to);
    guard::domain("acos", guard::inside_unit(p.a0), "|a0| < 1");
    if !p.expand {
        c.scalar(p.a0.acos());
        return;
    }
    fixed_point(a, c, upto(&manual::acos(p.a0), p.to));
}

/// `c = atan a`
pub fn atan<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("atan", &a, c);
    guard::manual_ord("atan", p.to);
    guard::domain("atan", guard::not_pole_i(p.a0), "a0^2 != -1");
    if !p.expand {
        c.scalar(p.a0.atan());
        return;
    }
    fixed_point(a, c, upto(&manual::atan(p.a0), p.to));
}

/// `c = acot a = π/2 - atan a`
pub fn acot<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("acot", &a, c);
    guard::manual_ord("acot", p.to);
    guard::domain("acot", guard::not_pole_i(p.a0), "a0^2 != -1");
    let table = manual::acot(p.a0);
    if !p.expand {
        c.scalar(table[0]);
        return;
    }
    fixed_point(a, c, upto(&table, p.to));
}

/// `c = tanh a`
pub fn tanh<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("tanh", &a, c);
    guard::manual_ord("tanh", p.to);
    guard::domain("tanh", p.a0.cosh() != T::zero(), "cosh(a0) != 0");
    if !p.expand {
        c.scalar(p.a0.tanh());
        return;
    }
    fixed_point(a, c, upto(&manual::tanh(p.a0), p.to));
}

/// `c = coth a`, requires `sinh a0 != 0`.
pub fn coth<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("coth", &a, c);
    guard::manual_ord("coth", p.to);
    guard::domain("coth", p.a0.sinh() != T::zero(), "sinh(a0) != 0");
    if !p.expand {
        c.scalar(p.a0.tanh().recip());
        return;
    }
    fixed_point(a, c, upto(&manual::coth(p.a0), p.to));
}

/// `c = asinh a`
pub fn asinh<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("asinh", &a, c);
    guard::manual_ord("asinh", p.to);
    guard::domain("asinh", guard::not_pole_i(p.a0), "a0^2 != -1");
    if !p.expand {
        c.scalar(p.a0.asinh());
        return;
    }
    fixed_point(a, c, upto(&manual::asinh(p.a0), p.to));
}

/// `c = acosh a`, requires `a0 > 1` on reals.
pub fn acosh<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("acosh", &a, c);
    guard::manual_ord("acosh", p.to);
    guard::domain("acosh", guard::above_one(p.a0), "a0 > 1");
    if !p.expand {
        c.scalar(p.a0.acosh());
        return;
    }
    fixed_point(a, c, upto(&manual::acosh(p.a0), p.to));
}

/// `c = atanh a`, requires `|a0| < 1` on reals.
pub fn atanh<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("atanh", &a, c);
    guard::manual_ord("atanh", p.to);
    guard::domain("atanh", guard::inside_unit(p.a0), "|a0| < 1");
    if !p.expand {
        c.scalar(p.a0.atanh());
        return;
    }
    fixed_point(a, c, upto(&manual::atanh(p.a0), p.to));
}

/// `c = acoth a = atanh(1/a)`, requires `|a0| > 1` on reals.
pub fn acoth<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("acoth", &a, c);
    guard::manual_ord("acoth", p.to);
    guard::domain("acoth", guard::outside_unit(p.a0), "|a0| > 1");
    if !p.expand {
        c.scalar(p.a0.recip().atanh());
        return;
    }
    fixed_point(a, c, upto(&manual::acoth(p.a0), p.to));
}

/// `c = erf a`. The constant term comes from [`Field::erf`].
pub fn erf<'a, T: Field>(a: impl Into<Src<'a, T>>, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("erf", &a, c);
    guard::manual_ord("erf", p.to);
    if !p.expand {
        c.scalar(p.a0.erf());
        return;
    }
    fixed_point(a, c, upto(&manual::erf(p.a0), p.to));
}

// ══════════════════════════════════════════════
//  Derived operations
// ══════════════════════════════════════════════

/// `c = a / b = a · inv(b)`
pub fn div<T: Field>(a: &Tpsa<T>, b: &Tpsa<T>, c: &mut Tpsa<T>) {
    guard::same_desc("div", a, c);
    let desc = c.desc().clone();
    let mut scratch = Scratch::<T, 1>::take(&desc, c.mo());
    let [rb] = scratch.series();
    inv(b, T::one(), rb);
    c.mul_from(a, rb);
}

/// `c = a^n` by binary exponentiation; negative `n` goes through `inv`.
pub fn powi<'a, T: Field>(a: impl Into<Src<'a, T>>, n: i32, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    let p = begin("powi", &a, c);
    if n == 0 {
        c.scalar(T::one());
        return;
    }
    if n < 0 {
        guard::domain("powi", p.a0 != T::zero(), "a0 != 0 for n < 0");
    }
    if !p.expand {
        c.scalar(p.a0.powi(n));
        return;
    }

    let desc = c.desc().clone();
    let mut scratch = Scratch::<T, 2>::take(&desc, c.mo());
    let [base, sq] = scratch.series();
    base.copy_from(a.resolve(c));
    if n < 0 {
        inv(Src::Output, T::one(), base);
    }

    let mut m = n.unsigned_abs();
    c.scalar(T::one());
    loop {
        if m & 1 == 1 {
            c.mul_by(base);
        }
        m >>= 1;
        if m == 0 {
            break;
        }
        sq.mul_from(base, base);
        std::mem::swap(base, sq);
    }
}

/// `c = a^v = exp(v · ln a)` for a scalar exponent.
pub fn pown<'a, T: Field>(a: impl Into<Src<'a, T>>, v: T, c: &mut Tpsa<T>) {
    let a: Src<'_, T> = a.into();
    log(a, c);
    c.scale(v);
    exp(Src::Output, c);
}

/// `c = a^b = exp(b · ln a)` for a series exponent.
pub fn pow<T: Field>(a: &Tpsa<T>, b: &Tpsa<T>, c: &mut Tpsa<T>) {
    guard::same_desc("pow", b, c);
    log(a, c);
    c.mul_by(b);
    exp(Src::Output, c);
}

// ══════════════════════════════════════════════
//  Allocating forms
// ══════════════════════════════════════════════

macro_rules! impl_unary_methods {
    ($($name:ident),* $(,)?) => {
        impl<T: Field> Tpsa<T> {
            $(
                #[doc = concat!("`", stringify!($name), "(self)` as a new series of the same order.")]
                pub fn $name(&self) -> Tpsa<T> {
                    let mut c = self.same();
                    $name(self, &mut c);
                    c
                }
            )*
        }
    };
}

impl_unary_methods!(
    sqrt, exp, log, sin, cos, sinh, cosh, sirx, corx, sinc, tan, cot, asin, acos, atan, acot,
    tanh, coth, asinh, acosh, atanh, acoth, erf,
);

impl<T: Field> Tpsa<T> {
    /// `v / self` as a new series.
    pub fn inv(&self, v: T) -> Tpsa<T> {
        let mut c = self.same();
        inv(self, v, &mut c);
        c
    }

    /// `v / √self` as a new series.
    pub fn invsqrt(&self, v: T) -> Tpsa<T> {
        let mut c = self.same();
        invsqrt(self, v, &mut c);
        c
    }

    /// `(sin self, cos self)`.
    pub fn sincos(&self) -> (Tpsa<T>, Tpsa<T>) {
        let (mut s, mut c) = (self.same(), self.same());
        sincos(self, &mut s, &mut c);
        (s, c)
    }

    /// `(sinh self, cosh self)`.
    pub fn sincosh(&self) -> (Tpsa<T>, Tpsa<T>) {
        let (mut s, mut c) = (self.same(), self.same());
        sincosh(self, &mut s, &mut c);
        (s, c)
    }

    pub fn powi(&self, n: i32) -> Tpsa<T> {
        let mut c = self.same();
        powi(self, n, &mut c);
        c
    }

    pub fn pown(&self, v: T) -> Tpsa<T> {
        let mut c = self.same();
        pown(self, v, &mut c);
        c
    }

    pub fn pow(&self, b: &Tpsa<T>) -> Tpsa<T> {
        let mut c = self.same();
        pow(self, b, &mut c);
        c
    }
}
