//! Scratch series borrowed from a descriptor for the duration of one call.
//!
//! Each [`Desc`] keeps a small pool of coefficient buffers per field. A
//! [`Scratch`] guard takes `N` of them, exposes them as series truncated at a
//! given order, and hands them back on drop. Nothing about their content is
//! guaranteed across calls; only the buffer allocation is reused.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::desc::Desc;
use crate::field::Field;
use crate::tpsa::Tpsa;

/// Buffers kept by a pool once returned; extra ones are freed.
pub const SCRATCH_RETAIN: usize = 8;

/// Per-descriptor, per-field pool of coefficient buffers.
pub struct ScratchPool<T> {
    free: RefCell<Vec<Vec<T>>>,
}

impl<T: Field> ScratchPool<T> {
    pub(crate) fn new() -> Self {
        ScratchPool {
            free: RefCell::new(Vec::new()),
        }
    }

    /// Take a zeroed buffer of `len` coefficients.
    fn take(&self, len: usize) -> Vec<T> {
        match self.free.borrow_mut().pop() {
            Some(mut buf) => {
                buf.clear();
                buf.resize(len, T::zero());
                buf
            }
            None => {
                debug!("scratch pool: allocating buffer of {len} coefficients");
                vec![T::zero(); len]
            }
        }
    }

    fn give(&self, buf: Vec<T>) {
        let mut free = self.free.borrow_mut();
        if free.len() < SCRATCH_RETAIN {
            free.push(buf);
        }
    }

    /// Number of buffers currently waiting in the pool.
    pub fn available(&self) -> usize {
        self.free.borrow().len()
    }
}

/// `N` scratch series borrowed from a descriptor's pool.
///
/// The borrow ends when the guard drops; the series cannot outlive it.
pub(crate) struct Scratch<T: Field, const N: usize> {
    bufs: [Tpsa<T>; N],
}

impl<T: Field, const N: usize> Scratch<T, N> {
    /// Borrow `N` zeroed series of order `mo` sharing `desc`.
    pub(crate) fn take(desc: &Rc<Desc>, mo: u8) -> Self {
        let pool = T::pool(desc);
        let len = desc.nc();
        Scratch {
            bufs: std::array::from_fn(|_| Tpsa::from_buffer(desc, mo, pool.take(len))),
        }
    }

    #[inline]
    pub(crate) fn series(&mut self) -> &mut [Tpsa<T>; N] {
        &mut self.bufs
    }
}

impl<T: Field, const N: usize> Drop for Scratch<T, N> {
    fn drop(&mut self) {
        for t in self.bufs.iter_mut() {
            let buf = t.take_buffer();
            T::pool(t.desc()).give(buf);
        }
    }
}
