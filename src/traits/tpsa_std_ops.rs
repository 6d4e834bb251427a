//! `std::ops` implementations for `Tpsa<T>`.
//!
//! Binary operators on references allocate a result with the order of the
//! left operand. The owned-left forms reuse its buffer.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_complex::Complex64;

use crate::field::Field;
use crate::fun;
use crate::tpsa::Tpsa;

// ══════════════════════════════════════════════
//  Tpsa<T> ↔ Tpsa<T>
// ══════════════════════════════════════════════

impl<T: Field> Add for &Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn add(self, rhs: Self) -> Tpsa<T> {
        let mut c = self.clone();
        c.acc(rhs, T::one());
        c
    }
}

impl<T: Field> Sub for &Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn sub(self, rhs: Self) -> Tpsa<T> {
        let mut c = self.clone();
        c.acc(rhs, -T::one());
        c
    }
}

impl<T: Field> Mul for &Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn mul(self, rhs: Self) -> Tpsa<T> {
        let mut c = self.same();
        c.mul_from(self, rhs);
        c
    }
}

// Series division goes through the inverse series
#[allow(clippy::suspicious_arithmetic_impl)]
impl<T: Field> Div for &Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn div(self, rhs: Self) -> Tpsa<T> {
        let mut c = self.same();
        fun::div(self, rhs, &mut c);
        c
    }
}

impl<T: Field> Neg for &Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn neg(self) -> Tpsa<T> {
        let mut c = self.clone();
        c.scale(-T::one());
        c
    }
}

impl<T: Field> Add<&Tpsa<T>> for Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn add(mut self, rhs: &Tpsa<T>) -> Tpsa<T> {
        self += rhs;
        self
    }
}

impl<T: Field> Sub<&Tpsa<T>> for Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn sub(mut self, rhs: &Tpsa<T>) -> Tpsa<T> {
        self -= rhs;
        self
    }
}

impl<T: Field> Mul<&Tpsa<T>> for Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn mul(mut self, rhs: &Tpsa<T>) -> Tpsa<T> {
        self *= rhs;
        self
    }
}

impl<T: Field> AddAssign<&Tpsa<T>> for Tpsa<T> {
    #[inline]
    fn add_assign(&mut self, rhs: &Tpsa<T>) {
        self.acc(rhs, T::one());
    }
}

impl<T: Field> SubAssign<&Tpsa<T>> for Tpsa<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: &Tpsa<T>) {
        self.acc(rhs, -T::one());
    }
}

impl<T: Field> MulAssign<&Tpsa<T>> for Tpsa<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: &Tpsa<T>) {
        self.mul_by(rhs);
    }
}

// ══════════════════════════════════════════════
//  Tpsa<T> ↔ T
// ══════════════════════════════════════════════

impl<T: Field> Add<T> for &Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn add(self, rhs: T) -> Tpsa<T> {
        let mut c = self.clone();
        c.shift(rhs);
        c
    }
}

impl<T: Field> Sub<T> for &Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn sub(self, rhs: T) -> Tpsa<T> {
        let mut c = self.clone();
        c.shift(-rhs);
        c
    }
}

impl<T: Field> Mul<T> for &Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn mul(self, rhs: T) -> Tpsa<T> {
        let mut c = self.clone();
        c.scale(rhs);
        c
    }
}

// Scalar Div uses Mul internally (multiply by reciprocal)
#[allow(clippy::suspicious_arithmetic_impl)]
impl<T: Field> Div<T> for &Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn div(self, rhs: T) -> Tpsa<T> {
        let mut c = self.clone();
        c.scale(rhs.recip());
        c
    }
}

impl<T: Field> AddAssign<T> for Tpsa<T> {
    #[inline]
    fn add_assign(&mut self, rhs: T) {
        self.shift(rhs);
    }
}

impl<T: Field> MulAssign<T> for Tpsa<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: T) {
        self.scale(rhs);
    }
}

#[allow(clippy::suspicious_op_assign_impl)]
impl<T: Field> DivAssign<T> for Tpsa<T> {
    #[inline]
    fn div_assign(&mut self, rhs: T) {
        self.scale(rhs.recip());
    }
}

// Mixed ops with the scalar on the left.
macro_rules! impl_scalar_lhs_ops {
    ($f:ty) => {
        impl Add<&Tpsa<$f>> for $f {
            type Output = Tpsa<$f>;
            #[inline]
            fn add(self, rhs: &Tpsa<$f>) -> Tpsa<$f> {
                rhs + self
            }
        }

        impl Sub<&Tpsa<$f>> for $f {
            type Output = Tpsa<$f>;
            #[inline]
            fn sub(self, rhs: &Tpsa<$f>) -> Tpsa<$f> {
                let mut c = -rhs;
                c.shift(self);
                c
            }
        }

        impl Mul<&Tpsa<$f>> for $f {
            type Output = Tpsa<$f>;
            #[inline]
            fn mul(self, rhs: &Tpsa<$f>) -> Tpsa<$f> {
                rhs * self
            }
        }

        impl Div<&Tpsa<$f>> for $f {
            type Output = Tpsa<$f>;
            #[inline]
            fn div(self, rhs: &Tpsa<$f>) -> Tpsa<$f> {
                rhs.inv(self)
            }
        }
    };
}

impl_scalar_lhs_ops!(f64);
impl_scalar_lhs_ops!(Complex64);
