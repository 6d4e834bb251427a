mod common;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use tpsa::{fun, Desc, Src, Tpsa};

const TOL: f64 = 1e-12;

/// `a0 + x - y/2 + xy` in two variables at order `mo`.
fn bilinear(d: &std::rc::Rc<Desc>, mo: u8, a0: f64) -> Tpsa<f64> {
    let mut a = Tpsa::variable(d, mo, 0, a0);
    a.set(&[0, 1], -0.5);
    a.set(&[1, 1], 1.0);
    a
}

fn assert_series_eq(a: &Tpsa<f64>, b: &Tpsa<f64>, tol: f64) {
    for (x, y) in a.coeffs().iter().zip(b.coeffs()) {
        assert_abs_diff_eq!(*x, *y, epsilon = tol);
    }
}

#[test]
fn inv_of_inv_roundtrips() {
    common::init_logger();
    let d = Desc::new(2, 7);
    let a = bilinear(&d, 7, 1.4);
    let back = a.inv(1.0).inv(1.0);
    assert_series_eq(&back, &a, 1e-11);
}

#[test]
fn sin_squared_plus_cos_squared() {
    let d = Desc::new(2, 8);
    let a = bilinear(&d, 8, 0.9);
    let (s, c) = a.sincos();
    let one = &(&s * &s) + &(&c * &c);
    assert_relative_eq!(one.get0(), 1.0, epsilon = TOL);
    for &v in &one.coeffs()[1..] {
        assert_abs_diff_eq!(v, 0.0, epsilon = 1e-11);
    }
}

#[test]
fn cosh_squared_minus_sinh_squared() {
    let d = Desc::new(2, 6);
    let a = bilinear(&d, 6, -0.4);
    let (sh, ch) = a.sincosh();
    let one = &(&ch * &ch) - &(&sh * &sh);
    assert_relative_eq!(one.get0(), 1.0, epsilon = TOL);
    for &v in &one.coeffs()[1..] {
        assert_abs_diff_eq!(v, 0.0, epsilon = 1e-11);
    }
}

#[test]
fn tan_table_matches_sin_over_cos() {
    let d = Desc::new(2, 5);
    let a = bilinear(&d, 5, 0.6);
    let (s, c) = a.sincos();
    let ratio = &s / &c;
    assert_series_eq(&a.tan(), &ratio, 1e-11);
}

#[test]
fn log_inverts_exp() {
    let d = Desc::new(2, 7);
    let a = bilinear(&d, 7, 0.5);
    assert_series_eq(&a.exp().log(), &a, 1e-11);
}

#[test]
fn sqrt_squared_and_invsqrt_product() {
    let d = Desc::new(2, 6);
    let a = bilinear(&d, 6, 2.0);
    let r = a.sqrt();
    assert_series_eq(&(&r * &r), &a, 1e-11);

    let prod = &r * &a.invsqrt(1.0);
    assert_relative_eq!(prod.get0(), 1.0, epsilon = TOL);
    assert_eq!(prod.coeffs()[1..].iter().filter(|v| v.abs() > 1e-11).count(), 0);
}

#[test]
fn asinh_inverts_sinh() {
    let d = Desc::new(2, 5);
    let a = bilinear(&d, 5, 0.3);
    assert_series_eq(&a.sinh().asinh(), &a, 1e-11);
}

#[test]
fn atan_inverts_tan() {
    let d = Desc::new(2, 5);
    let a = bilinear(&d, 5, 0.3);
    assert_series_eq(&a.tan().atan(), &a, 1e-11);
}

#[test]
fn sincos_with_mixed_output_orders() {
    let d = Desc::new(1, 6);
    let a = Tpsa::<f64>::variable(&d, 6, 0, 0.5);
    let mut s = Tpsa::new(&d, 6);
    let mut c = Tpsa::new(&d, 2);
    fun::sincos(&a, &mut s, &mut c);
    assert_series_eq(&s, &a.sin(), TOL);
    assert_relative_eq!(c.get(&[2]), -0.5_f64.cos() / 2.0, epsilon = TOL);
    assert_eq!(c.hi(), 2);

    // an order-0 output is the plain scalar
    let mut c0 = Tpsa::new(&d, 0);
    fun::sincosh(&a, &mut s, &mut c0);
    assert_relative_eq!(c0.get0(), 0.5_f64.cosh());
    assert_series_eq(&s, &a.sinh(), TOL);
}

#[test]
fn in_place_matches_out_of_place_for_every_single_output_function() {
    let d = Desc::new(2, 5);
    let a = bilinear(&d, 5, 0.45);
    type Op = for<'a> fn(Src<'a, f64>, &mut Tpsa<f64>);
    let ops: [(&str, Op); 12] = [
        ("exp", |a, c| fun::exp(a, c)),
        ("log", |a, c| fun::log(a, c)),
        ("sin", |a, c| fun::sin(a, c)),
        ("cosh", |a, c| fun::cosh(a, c)),
        ("tan", |a, c| fun::tan(a, c)),
        ("cot", |a, c| fun::cot(a, c)),
        ("asin", |a, c| fun::asin(a, c)),
        ("acos", |a, c| fun::acos(a, c)),
        ("atan", |a, c| fun::atan(a, c)),
        ("tanh", |a, c| fun::tanh(a, c)),
        ("atanh", |a, c| fun::atanh(a, c)),
        ("erf", |a, c| fun::erf(a, c)),
    ];
    for (name, op) in ops {
        let mut out = a.same();
        op(Src::Series(&a), &mut out);
        let mut inplace = a.clone();
        op(Src::Output, &mut inplace);
        for (x, y) in inplace.coeffs().iter().zip(out.coeffs()) {
            assert!((x - y).abs() <= 1e-13, "{name}: {x} vs {y}");
        }
    }
}
