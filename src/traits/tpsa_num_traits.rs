//! `num_traits` operator traits for `Tpsa<T>`.

use num_traits::{Inv, Pow};

use crate::field::Field;
use crate::tpsa::Tpsa;

impl<T: Field> Inv for &Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn inv(self) -> Tpsa<T> {
        Tpsa::inv(self, T::one())
    }
}

impl<T: Field> Pow<i32> for &Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn pow(self, n: i32) -> Tpsa<T> {
        self.powi(n)
    }
}

impl<T: Field> Pow<T> for &Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn pow(self, v: T) -> Tpsa<T> {
        self.pown(v)
    }
}

impl<T: Field> Pow<&Tpsa<T>> for &Tpsa<T> {
    type Output = Tpsa<T>;
    #[inline]
    fn pow(self, b: &Tpsa<T>) -> Tpsa<T> {
        Tpsa::pow(self, b)
    }
}
