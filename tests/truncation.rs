mod common;

use approx::assert_relative_eq;
use tpsa::{fun, Desc, Field, Tpsa};

#[test]
fn lowering_trunc_zeroes_higher_orders() {
    common::init_logger();
    let d = Desc::new(2, 6);
    let a = Tpsa::<f64>::variable(&d, 6, 0, 0.3);
    let full = a.exp();

    let prev = d.set_trunc(3);
    assert_eq!(prev, 6);
    let cut = a.exp();
    assert_eq!(cut.hi(), 3);
    for i in 0..d.nc() {
        if d.ord(i) <= 3 {
            assert_relative_eq!(cut.geti(i), full.geti(i), epsilon = 1e-14);
        } else {
            assert_eq!(cut.geti(i), 0.0);
        }
    }
    d.set_trunc(prev);
    assert_eq!(a.exp().hi(), 6);
}

#[test]
fn linear_operators_zero_orders_above_trunc() {
    let d = Desc::new(1, 6);
    let x = Tpsa::<f64>::variable(&d, 6, 0, 0.5);
    let e = x.exp();
    let prev = d.set_trunc(2);

    let neg = -&e;
    let sum = &e + &e;
    let scaled = &e * 3.0;
    let shifted = &e + 1.0;
    let mut acc = e.clone();
    acc += &e;
    let mut halved = e.clone();
    halved /= 2.0;

    for c in [&neg, &sum, &scaled, &shifted, &acc, &halved] {
        assert_eq!(c.hi(), 2);
        for k in 3..=6u8 {
            assert_eq!(c.get(&[k]), 0.0);
        }
    }
    assert_relative_eq!(neg.get(&[2]), -e.get(&[2]));
    assert_relative_eq!(sum.get(&[1]), 2.0 * e.get(&[1]));
    assert_relative_eq!(shifted.get0(), e.get0() + 1.0);
    d.set_trunc(prev);
}

#[test]
fn trunc_zero_takes_the_scalar_path() {
    let d = Desc::new(1, 4);
    let a = Tpsa::<f64>::variable(&d, 4, 0, 0.2);
    d.set_trunc(0);
    let c = a.sin();
    assert_relative_eq!(c.get0(), 0.2_f64.sin());
    assert_eq!(c.nz(), 1);
}

#[test]
fn sincos_respects_trunc() {
    let d = Desc::new(1, 8);
    let a = Tpsa::<f64>::variable(&d, 8, 0, 1.1);
    d.set_trunc(4);
    let (s, c) = a.sincos();
    assert_eq!((s.hi(), c.hi()), (4, 4));
    let want = common::sin_cos(&common::var(1.1, 5));
    for k in 0..=4u8 {
        assert_relative_eq!(s.get(&[k]), want.0[k as usize], epsilon = 1e-13);
        assert_relative_eq!(c.get(&[k]), want.1[k as usize], epsilon = 1e-13);
    }
}

#[test]
fn setters_ignore_orders_above_trunc() {
    let d = Desc::new(2, 4);
    let mut a = Tpsa::<f64>::new(&d, 4);
    d.set_trunc(2);
    a.set(&[2, 1], 5.0);
    assert_eq!(a.get(&[2, 1]), 0.0);
    a.set(&[1, 1], 5.0);
    assert_eq!(a.get(&[1, 1]), 5.0);
}

#[test]
fn scratch_pool_is_reused_across_calls() {
    let d = Desc::new(3, 5);
    let a = Tpsa::<f64>::variable(&d, 5, 2, 0.4);
    let mut c = a.same();
    fun::exp(&a, &mut c);
    let pooled = <f64 as Field>::pool(&d).available();
    assert_eq!(pooled, 3);
    for _ in 0..10 {
        fun::exp(&a, &mut c);
        fun::tan(&a, &mut c);
    }
    assert_eq!(<f64 as Field>::pool(&d).available(), pooled);
    assert!(pooled <= tpsa::SCRATCH_RETAIN);
}
