//! Truncated power series: [`Tpsa<T>`].
//!
//! Coefficients are indexed by monomial in the layout of the owning
//! [`Desc`]; `coef[0]` is the constant term. The bitmask `nz` records which
//! degree blocks hold a nonzero coefficient, so `lo`/`hi` are exact.
//!
//! Every write is truncated at the effective order
//! `min(self.mo, desc.trunc)`; blocks above it are zero afterwards.

use std::fmt::{self, Display};
use std::rc::Rc;

use crate::desc::Desc;
use crate::field::Field;
use crate::guard::{self, Violation};

/// Truncated multivariate power series over the field `T`.
#[derive(Clone, Debug)]
pub struct Tpsa<T: Field> {
    desc: Rc<Desc>,
    mo: u8,
    nz: u64,
    coef: Vec<T>,
}

/// Source operand of an operation whose output may alias its input.
///
/// `&a` converts into `Src::Series(&a)`; `Src::Output` means the output
/// series is read as the input and overwritten in place.
#[derive(Clone, Copy, Debug)]
pub enum Src<'a, T: Field> {
    Series(&'a Tpsa<T>),
    Output,
}

impl<'a, T: Field> From<&'a Tpsa<T>> for Src<'a, T> {
    #[inline]
    fn from(a: &'a Tpsa<T>) -> Self {
        Src::Series(a)
    }
}

impl<'a, T: Field> Src<'a, T> {
    /// The series read by the operation: `a` itself, or the output `c`.
    #[inline]
    pub fn resolve<'s>(&'s self, c: &'s Tpsa<T>) -> &'s Tpsa<T>
    where
        'a: 's,
    {
        match self {
            Src::Series(a) => *a,
            Src::Output => c,
        }
    }
}

/// Bits `0..=o`.
#[inline]
fn mask_upto(o: u8) -> u64 {
    if o >= 63 {
        u64::MAX
    } else {
        (1u64 << (o + 1)) - 1
    }
}

impl<T: Field> Tpsa<T> {
    /// Create a zero series of order `mo` in `desc`.
    ///
    /// # Panics
    ///
    /// Panics if `mo` exceeds the descriptor order.
    pub fn new(desc: &Rc<Desc>, mo: u8) -> Self {
        if mo > desc.mo() {
            guard::fail("new", Violation::OrderTooHigh { mo, max: desc.mo() });
        }
        Tpsa {
            desc: Rc::clone(desc),
            mo,
            nz: 0,
            coef: vec![T::zero(); desc.len_upto(mo)],
        }
    }

    /// A zero series with the same descriptor and order as `self`.
    pub fn same(&self) -> Self {
        Tpsa::new(&self.desc, self.mo)
    }

    /// The pure constant `v` at order `mo`.
    pub fn constant(desc: &Rc<Desc>, mo: u8, v: T) -> Self {
        let mut t = Tpsa::new(desc, mo);
        t.scalar(v);
        t
    }

    /// The variable `v + x_var` at order `mo`.
    pub fn variable(desc: &Rc<Desc>, mo: u8, var: usize, v: T) -> Self {
        let mut t = Tpsa::new(desc, mo);
        t.set_var(var, v);
        t
    }

    /// Wrap a pooled buffer (at least `desc.nc()` long) as a zero series.
    pub(crate) fn from_buffer(desc: &Rc<Desc>, mo: u8, mut coef: Vec<T>) -> Self {
        debug_assert!(coef.len() >= desc.len_upto(mo));
        coef[..desc.len_upto(mo)].fill(T::zero());
        Tpsa {
            desc: Rc::clone(desc),
            mo,
            nz: 0,
            coef,
        }
    }

    pub(crate) fn take_buffer(&mut self) -> Vec<T> {
        self.nz = 0;
        std::mem::take(&mut self.coef)
    }

    // ── Accessors ──

    #[inline]
    pub fn desc(&self) -> &Rc<Desc> {
        &self.desc
    }

    /// Maximum order of this series.
    #[inline]
    pub fn mo(&self) -> u8 {
        self.mo
    }

    /// Order bounding every write: `min(mo, desc.trunc)`.
    #[inline]
    pub fn effective_ord(&self) -> u8 {
        self.mo.min(self.desc.trunc())
    }

    /// Degree-class bitmask: bit `o` is set iff some coefficient of degree `o` is nonzero.
    #[inline]
    pub fn nz(&self) -> u64 {
        self.nz
    }

    /// Lowest order with nonzero content (0 for the zero series).
    #[inline]
    pub fn lo(&self) -> u8 {
        if self.nz == 0 {
            0
        } else {
            self.nz.trailing_zeros() as u8
        }
    }

    /// Highest order with nonzero content (0 for constants and the zero series).
    #[inline]
    pub fn hi(&self) -> u8 {
        if self.nz == 0 {
            0
        } else {
            (63 - self.nz.leading_zeros()) as u8
        }
    }

    /// Constant term `a0`.
    #[inline]
    pub fn get0(&self) -> T {
        self.coef[0]
    }

    /// Coefficients of all monomials up to `mo`.
    #[inline]
    pub fn coeffs(&self) -> &[T] {
        &self.coef[..self.desc.len_upto(self.mo)]
    }

    /// Coefficient of monomial index `i`.
    #[inline]
    pub fn geti(&self, i: usize) -> T {
        self.coeffs()[i]
    }

    /// Coefficient of the monomial with exponents `exps` (zero above `mo`).
    pub fn get(&self, exps: &[u8]) -> T {
        let i = self.desc.index(exps);
        if self.desc.ord(i) > self.mo {
            T::zero()
        } else {
            self.coef[i]
        }
    }

    // ── Setters ──

    /// Set the coefficient of monomial index `i`. Ignored above the effective order.
    pub fn seti(&mut self, i: usize, v: T) {
        assert!(
            i < self.desc.len_upto(self.mo),
            "monomial index {i} out of range for order {}",
            self.mo
        );
        let o = self.desc.ord(i);
        if o > self.effective_ord() {
            return;
        }
        self.coef[i] = v;
        self.refresh_block(o);
    }

    /// Set the coefficient of the monomial with exponents `exps`.
    pub fn set(&mut self, exps: &[u8], v: T) {
        let i = self.desc.index(exps);
        self.seti(i, v);
    }

    /// Set the constant term, leaving higher orders untouched.
    #[inline]
    pub fn set0(&mut self, v: T) {
        self.coef[0] = v;
        self.refresh_block(0);
    }

    /// Become the variable `v + x_var`.
    ///
    /// # Panics
    ///
    /// Panics if `var >= nv`.
    pub fn set_var(&mut self, var: usize, v: T) {
        assert!(
            var < self.desc.nv(),
            "var ({}) >= nv ({})",
            var,
            self.desc.nv()
        );
        self.scalar(v);
        if self.effective_ord() >= 1 {
            self.coef[1 + var] = T::one();
            self.nz |= 1 << 1;
        }
    }

    /// Zero every coefficient.
    pub fn clear(&mut self) {
        let len = self.desc.len_upto(self.mo);
        self.coef[..len].fill(T::zero());
        self.nz = 0;
    }

    /// Become the pure constant `v`.
    pub fn scalar(&mut self, v: T) {
        self.clear();
        self.set0(v);
    }

    // ── Linear algebra ──

    /// `self = a`, truncated at the effective order.
    pub fn copy_from(&mut self, a: &Tpsa<T>) {
        guard::same_desc("copy", a, self);
        let to = self.effective_ord().min(a.mo);
        let n = self.desc.len_upto(to);
        let len = self.desc.len_upto(self.mo);
        self.coef[..n].copy_from_slice(&a.coef[..n]);
        self.coef[n..len].fill(T::zero());
        self.nz = a.nz & mask_upto(to);
    }

    /// `self = v · a`.
    pub fn scale_from(&mut self, a: &Tpsa<T>, v: T) {
        guard::same_desc("scl", a, self);
        let to = self.effective_ord().min(a.mo);
        let n = self.desc.len_upto(to);
        let len = self.desc.len_upto(self.mo);
        for (c, &x) in self.coef[..n].iter_mut().zip(&a.coef[..n]) {
            *c = v * x;
        }
        self.coef[n..len].fill(T::zero());
        self.refresh();
    }

    /// `self = v · self`.
    pub fn scale(&mut self, v: T) {
        let n = self.desc.len_upto(self.effective_ord());
        let len = self.desc.len_upto(self.mo);
        for c in self.coef[..n].iter_mut() {
            *c = v * *c;
        }
        self.coef[n..len].fill(T::zero());
        self.refresh();
    }

    /// `self += v · a`.
    pub fn acc(&mut self, a: &Tpsa<T>, v: T) {
        guard::same_desc("acc", a, self);
        let top = self.desc.len_upto(self.effective_ord());
        let len = self.desc.len_upto(self.mo);
        self.coef[top..len].fill(T::zero());
        if a.nz != 0 {
            let n = self.desc.len_upto(self.effective_ord().min(a.hi()));
            for (c, &x) in self.coef[..n].iter_mut().zip(&a.coef[..n]) {
                *c = *c + v * x;
            }
        }
        self.refresh();
    }

    /// `self += v`, truncated at the effective order.
    pub fn shift(&mut self, v: T) {
        let n = self.desc.len_upto(self.effective_ord());
        let len = self.desc.len_upto(self.mo);
        self.coef[n..len].fill(T::zero());
        self.coef[0] = self.coef[0] + v;
        self.refresh();
    }

    /// `self = a · b`, truncated at the effective order of `self`.
    pub fn mul_from(&mut self, a: &Tpsa<T>, b: &Tpsa<T>) {
        guard::same_desc("mul", a, self);
        guard::same_desc("mul", b, self);
        self.clear();
        if a.nz == 0 || b.nz == 0 {
            return;
        }

        let to = self.effective_ord();
        let desc = &*self.desc;
        let coef = &mut self.coef;
        let mut exps = vec![0u8; desc.nv()];

        for oa in a.lo()..=a.hi().min(to) {
            if a.nz & (1 << oa) == 0 {
                continue;
            }
            for ob in b.lo()..=b.hi().min(to - oa) {
                if b.nz & (1 << ob) == 0 {
                    continue;
                }
                for i in desc.block(oa) {
                    let ai = a.coef[i];
                    if ai == T::zero() {
                        continue;
                    }
                    let ma = desc.mono(i);
                    for j in desc.block(ob) {
                        let bj = b.coef[j];
                        if bj == T::zero() {
                            continue;
                        }
                        for ((e, &x), &y) in exps.iter_mut().zip(ma).zip(desc.mono(j)) {
                            *e = x + y;
                        }
                        let k = desc.index(&exps);
                        coef[k] = coef[k] + ai * bj;
                    }
                }
            }
        }
        self.refresh();
    }

    /// `self = self · b`, through one scratch series.
    pub fn mul_by(&mut self, b: &Tpsa<T>) {
        let mut scratch = crate::scratch::Scratch::<T, 1>::take(&self.desc, self.mo);
        let [tmp] = scratch.series();
        tmp.mul_from(self, b);
        self.copy_from(tmp);
    }

    // ── nz maintenance ──

    fn refresh_block(&mut self, o: u8) {
        let zero = T::zero();
        if self.coef[self.desc.block(o)].iter().any(|&c| c != zero) {
            self.nz |= 1 << o;
        } else {
            self.nz &= !(1 << o);
        }
    }

    fn refresh(&mut self) {
        self.nz = 0;
        for o in 0..=self.mo {
            self.refresh_block(o);
        }
    }
}

impl<T: Field> Display for Tpsa<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coef[0])?;
        for i in 1..self.desc.len_upto(self.hi()) {
            let c = self.coef[i];
            if c == T::zero() {
                continue;
            }
            write!(f, " + {}", c)?;
            for (var, &e) in self.desc.mono(i).iter().enumerate() {
                match e {
                    0 => {}
                    1 => write!(f, "·x{}", var)?,
                    _ => write!(f, "·x{}^{}", var, e)?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_has_unit_slope() {
        let d = Desc::new(3, 4);
        let x = Tpsa::<f64>::variable(&d, 4, 1, 2.5);
        assert_eq!(x.get0(), 2.5);
        assert_eq!(x.get(&[0, 1, 0]), 1.0);
        assert_eq!(x.get(&[1, 0, 0]), 0.0);
        assert_eq!((x.lo(), x.hi()), (0, 1));
    }

    #[test]
    fn product_of_two_variables() {
        let d = Desc::new(2, 3);
        let x = Tpsa::<f64>::variable(&d, 3, 0, 1.0);
        let y = Tpsa::<f64>::variable(&d, 3, 1, 2.0);
        let mut c = x.same();
        c.mul_from(&x, &y);
        // (1 + x)(2 + y) = 2 + 2x + y + xy
        assert_eq!(c.get0(), 2.0);
        assert_eq!(c.get(&[1, 0]), 2.0);
        assert_eq!(c.get(&[0, 1]), 1.0);
        assert_eq!(c.get(&[1, 1]), 1.0);
        assert_eq!(c.hi(), 2);
    }

    #[test]
    fn writes_respect_truncation() {
        let d = Desc::new(1, 6);
        let x = Tpsa::<f64>::variable(&d, 6, 0, 1.0);
        let mut c = x.same();
        c.mul_from(&x, &x);
        c.mul_by(&x);
        assert_eq!(c.hi(), 3);

        d.set_trunc(2);
        c.mul_by(&x);
        assert_eq!(c.hi(), 2);
        assert_eq!(c.get(&[3]), 0.0);
        assert_eq!(c.get(&[2]), 6.0);
        d.set_trunc(6);
    }

    #[test]
    fn cancellation_clears_degree_bits() {
        let d = Desc::new(2, 2);
        let x = Tpsa::<f64>::variable(&d, 2, 0, 3.0);
        let mut c = x.clone();
        c.acc(&x, -1.0);
        assert_eq!(c.nz(), 0);
        assert_eq!(c.hi(), 0);
    }

    #[test]
    fn display_lists_nonzero_terms() {
        let d = Desc::new(2, 2);
        let mut t = Tpsa::<f64>::constant(&d, 2, 1.0);
        t.set(&[1, 1], 3.0);
        assert_eq!(t.to_string(), "1 + 3·x0·x1");
    }
}
