//! Composition of an expansion with the deviation part of a series.
//!
//! Given `coef[k] = F^(k)(a0)/k!`, the output is
//! `c = Σ_{k=0}^{iter} coef[k] · (a - a0)^k`, accumulated with one series
//! multiplication per order: a running power buffer is multiplied by the
//! deviation into a temp buffer, accumulated, then the two buffers swap.
//!
//! The source is copied into scratch before the output is first written, so
//! `Src::Output` (output aliasing the input) is safe.

use crate::field::Field;
use crate::scratch::Scratch;
use crate::tpsa::{Src, Tpsa};

/// `c = Σ coef[k] · a_dev^k`, `iter = coef.len() - 1 >= 1`.
pub(crate) fn fixed_point<T: Field>(a: Src<'_, T>, c: &mut Tpsa<T>, coef: &[T]) {
    debug_assert!(coef.len() >= 2, "order 0 is handled by dispatch");
    let iter = coef.len() - 1;

    let desc = c.desc().clone();
    let mut scratch = Scratch::<T, 3>::take(&desc, c.effective_ord());
    let [acp, pow, tmp] = scratch.series();

    acp.copy_from(a.resolve(c));
    acp.set0(T::zero());

    // order 1
    c.scale_from(acp, coef[1]);

    // orders 2..=iter
    if iter >= 2 {
        pow.copy_from(acp);
        for &ck in &coef[2..] {
            tmp.mul_from(acp, pow);
            c.acc(tmp, ck);
            std::mem::swap(pow, tmp);
        }
    }

    c.set0(coef[0]);
}

/// Two expansions (`s` from `sc`, `c` from `cc`) of one source, sharing the
/// power buffer. Each output only takes the terms within its own order.
pub(crate) fn fixed_point_pair<T: Field>(
    a: &Tpsa<T>,
    s: &mut Tpsa<T>,
    c: &mut Tpsa<T>,
    sc: &[T],
    cc: &[T],
) {
    debug_assert!(sc.len() >= 2 && cc.len() >= 2, "order 0 is handled by dispatch");
    let (iter_s, iter_c) = (sc.len() - 1, cc.len() - 1);
    let max_iter = iter_s.max(iter_c);

    let to = s.effective_ord().max(c.effective_ord());
    let mut scratch = Scratch::<T, 3>::take(a.desc(), to);
    let [acp, pow, tmp] = scratch.series();

    acp.copy_from(a);
    acp.set0(T::zero());

    s.scale_from(acp, sc[1]);
    c.scale_from(acp, cc[1]);

    if max_iter >= 2 {
        pow.copy_from(acp);
        for k in 2..=max_iter {
            tmp.mul_from(acp, pow);
            if k <= iter_s {
                s.acc(tmp, sc[k]);
            }
            if k <= iter_c {
                c.acc(tmp, cc[k]);
            }
            std::mem::swap(pow, tmp);
        }
    }

    s.set0(sc[0]);
    c.set0(cc[0]);
}
