//! Precondition checks shared by every operation.
//!
//! All violations are caller errors and abort the computation with a panic
//! naming the operation and the [`Violation`]. Nothing is recovered.

use std::fmt;

use log::error;

use crate::field::Field;
use crate::tpsa::Tpsa;

/// Highest order covered by the hand-derived expansion tables.
pub const MANUAL_ORD: u8 = 5;

/// A violated precondition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    /// Operands belong to different descriptors.
    DescMismatch,
    /// The requested order exceeds the manual expansion table.
    OrderCeiling { to: u8 },
    /// The constant term lies outside the function's domain.
    Domain { cond: &'static str },
    /// A series or descriptor order above the supported maximum.
    OrderTooHigh { mo: u8, max: u8 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DescMismatch => write!(f, "incompatible descriptors"),
            Violation::OrderCeiling { to } => write!(
                f,
                "order ceiling exceeded: order {} > {} (manual expansion)",
                to, MANUAL_ORD
            ),
            Violation::Domain { cond } => write!(f, "domain violation: requires {}", cond),
            Violation::OrderTooHigh { mo, max } => {
                write!(f, "order {} exceeds maximum order {}", mo, max)
            }
        }
    }
}

/// Log and abort with `"<fun>: <violation>"`.
#[cold]
#[track_caller]
pub fn fail(fun: &str, v: Violation) -> ! {
    error!("{fun}: {v}");
    panic!("{fun}: {v}");
}

/// Abort unless `ok`, reporting the domain condition `cond`.
#[inline]
#[track_caller]
pub(crate) fn domain(fun: &str, ok: bool, cond: &'static str) {
    if !ok {
        fail(fun, Violation::Domain { cond });
    }
}

#[inline]
#[track_caller]
pub(crate) fn same_desc<T: Field>(fun: &str, a: &Tpsa<T>, c: &Tpsa<T>) {
    if !std::rc::Rc::ptr_eq(a.desc(), c.desc()) {
        fail(fun, Violation::DescMismatch);
    }
}

#[inline]
#[track_caller]
pub(crate) fn manual_ord(fun: &str, to: u8) {
    if to > MANUAL_ORD {
        fail(fun, Violation::OrderCeiling { to });
    }
}

// ── Field-aware domain predicates ──
//
// Real fields constrain signs, complex fields only exclude singular points.

/// `a0 > 0` (real) or `a0 ≠ 0` (complex).
pub(crate) fn positive<T: Field>(a0: T) -> bool {
    if T::REAL {
        a0.re() > 0.0
    } else {
        a0 != T::zero()
    }
}

/// `a0 ≥ 0` (real), always true (complex).
pub(crate) fn non_negative<T: Field>(a0: T) -> bool {
    !T::REAL || a0.re() >= 0.0
}

/// `|a0| < 1` (real) or `a0² ≠ 1` (complex).
pub(crate) fn inside_unit<T: Field>(a0: T) -> bool {
    if T::REAL {
        a0.re().abs() < 1.0
    } else {
        a0 * a0 != T::one()
    }
}

/// `|a0| > 1` (real) or `a0 ≠ 0`, `a0² ≠ 1` (complex).
pub(crate) fn outside_unit<T: Field>(a0: T) -> bool {
    if T::REAL {
        a0.re().abs() > 1.0
    } else {
        a0 != T::zero() && a0 * a0 != T::one()
    }
}

/// `a0 > 1` (real) or `a0² ≠ 1` (complex).
pub(crate) fn above_one<T: Field>(a0: T) -> bool {
    if T::REAL {
        a0.re() > 1.0
    } else {
        a0 * a0 != T::one()
    }
}

/// `a0² ≠ -1`.
pub(crate) fn not_pole_i<T: Field>(a0: T) -> bool {
    a0 * a0 != -T::one()
}
