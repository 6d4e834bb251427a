//! Descriptors: the context shared by a family of series.
//!
//! A [`Desc`] fixes the number of variables, the maximum order, the monomial
//! layout and the global truncation order. It also owns the scratch pools
//! borrowed by the composition engine. Series combined in one operation must
//! point to the same descriptor.
//!
//! Monomials are exponent vectors ordered by total degree, then
//! lexicographically descending inside a degree block (`x0^d` first). Index 0
//! is always the constant monomial.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use log::debug;
use num_complex::Complex64;

use crate::guard::{self, Violation};
use crate::scratch::ScratchPool;

/// Highest supported order (degree classes are tracked in a `u64` bitmask).
pub const MAX_ORD: u8 = 63;

/// Shared context of a family of [`Tpsa`](crate::Tpsa).
pub struct Desc {
    nv: usize,
    mo: u8,
    trunc: Cell<u8>,
    /// `nv` exponents per monomial, `nc` monomials.
    monos: Vec<u8>,
    /// Total degree of each monomial.
    ords: Vec<u8>,
    /// `ord_start[o]` = index of the first monomial of degree `o` (len `mo + 2`).
    ord_start: Vec<usize>,
    /// `binom[n][k]` = C(n, k) for `n <= mo + nv`.
    binom: Vec<Vec<usize>>,
    real_pool: ScratchPool<f64>,
    complex_pool: ScratchPool<Complex64>,
}

impl Desc {
    /// Create a descriptor for `nv` variables up to order `mo`.
    ///
    /// # Panics
    ///
    /// Panics if `nv == 0` or `mo > MAX_ORD`.
    pub fn new(nv: usize, mo: u8) -> Rc<Self> {
        assert!(nv > 0, "descriptor needs at least one variable");
        if mo > MAX_ORD {
            guard::fail("desc", Violation::OrderTooHigh { mo, max: MAX_ORD });
        }

        let binom = binomials(mo as usize + nv);
        let mut monos = Vec::new();
        let mut ords = Vec::new();
        let mut ord_start = Vec::with_capacity(mo as usize + 2);
        let mut exps = vec![0u8; nv];
        for d in 0..=mo {
            ord_start.push(ords.len());
            push_degree_block(&mut exps, 0, d, &mut monos);
            let count = monos.len() / nv - ords.len();
            ords.extend(std::iter::repeat(d).take(count));
        }
        ord_start.push(ords.len());

        debug!("new descriptor: nv={nv}, mo={mo}, nc={}", ords.len());

        Rc::new(Desc {
            nv,
            mo,
            trunc: Cell::new(mo),
            monos,
            ords,
            ord_start,
            binom,
            real_pool: ScratchPool::new(),
            complex_pool: ScratchPool::new(),
        })
    }

    /// Number of variables.
    #[inline]
    pub fn nv(&self) -> usize {
        self.nv
    }

    /// Maximum order.
    #[inline]
    pub fn mo(&self) -> u8 {
        self.mo
    }

    /// Global truncation order.
    #[inline]
    pub fn trunc(&self) -> u8 {
        self.trunc.get()
    }

    /// Set the global truncation order (clamped to `mo`). Returns the previous one.
    ///
    /// Every subsequent write is truncated at `min(series.mo, trunc)`.
    pub fn set_trunc(&self, to: u8) -> u8 {
        let to = to.min(self.mo);
        debug!("truncation order {} -> {to}", self.trunc.get());
        self.trunc.replace(to)
    }

    /// Total number of monomials up to `mo`.
    #[inline]
    pub fn nc(&self) -> usize {
        self.ords.len()
    }

    /// Number of monomials of degree `<= o`.
    #[inline]
    pub fn len_upto(&self, o: u8) -> usize {
        self.ord_start[o as usize + 1]
    }

    /// Index range of the monomials of degree exactly `o`.
    #[inline]
    pub fn block(&self, o: u8) -> std::ops::Range<usize> {
        self.ord_start[o as usize]..self.ord_start[o as usize + 1]
    }

    /// Exponent vector of monomial `i`.
    #[inline]
    pub fn mono(&self, i: usize) -> &[u8] {
        &self.monos[i * self.nv..(i + 1) * self.nv]
    }

    /// Total degree of monomial `i`.
    #[inline]
    pub fn ord(&self, i: usize) -> u8 {
        self.ords[i]
    }

    /// Index of the monomial with exponents `exps`.
    ///
    /// # Panics
    ///
    /// Panics if `exps.len() != nv` or the total degree exceeds `mo`.
    pub fn index(&self, exps: &[u8]) -> usize {
        assert_eq!(
            exps.len(),
            self.nv,
            "monomial has {} exponents, descriptor has {} variables",
            exps.len(),
            self.nv
        );
        let d: usize = exps.iter().map(|&e| e as usize).sum();
        assert!(
            d <= self.mo as usize,
            "monomial order {d} exceeds descriptor order {}",
            self.mo
        );
        self.ord_start[d] + self.rank(exps, d)
    }

    /// Rank of `exps` inside its degree block: the number of monomials of the
    /// same degree with a larger exponent at the first differing position.
    fn rank(&self, exps: &[u8], d: usize) -> usize {
        let mut rank = 0;
        let mut rem = d;
        for (k, &e) in exps.iter().enumerate().take(self.nv - 1) {
            let vars_left = self.nv - k - 1;
            for v in (e as usize + 1)..=rem {
                rank += self.count(vars_left, rem - v);
            }
            rem -= e as usize;
        }
        rank
    }

    /// Number of monomials in `n` variables of total degree exactly `d`.
    #[inline]
    fn count(&self, n: usize, d: usize) -> usize {
        self.binom[d + n - 1][n - 1]
    }

    pub(crate) fn real_pool(&self) -> &ScratchPool<f64> {
        &self.real_pool
    }

    pub(crate) fn complex_pool(&self) -> &ScratchPool<Complex64> {
        &self.complex_pool
    }
}

impl fmt::Debug for Desc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Desc")
            .field("nv", &self.nv)
            .field("mo", &self.mo)
            .field("trunc", &self.trunc.get())
            .field("nc", &self.nc())
            .finish()
    }
}

/// Append all exponent vectors of degree `rem` over `exps[k..]`, largest
/// leading exponent first.
fn push_degree_block(exps: &mut [u8], k: usize, rem: u8, out: &mut Vec<u8>) {
    if k + 1 == exps.len() {
        exps[k] = rem;
        out.extend_from_slice(exps);
        return;
    }
    for e in (0..=rem).rev() {
        exps[k] = e;
        push_degree_block(exps, k + 1, rem - e, out);
    }
    exps[k] = 0;
}

fn binomials(n: usize) -> Vec<Vec<usize>> {
    let mut table = vec![vec![0usize; n + 1]; n + 1];
    for i in 0..=n {
        table[i][0] = 1;
        for j in 1..=i {
            table[i][j] = table[i - 1][j - 1] + table[i - 1][j];
        }
    }
    table
}
