pub mod desc;
pub mod field;
pub mod fun;
pub mod guard;
pub mod scratch;
pub mod tpsa;
mod compose;
mod expand;
mod manual;
mod traits;

pub use desc::{Desc, MAX_ORD};
pub use field::Field;
pub use guard::{Violation, MANUAL_ORD};
pub use scratch::{ScratchPool, SCRATCH_RETAIN};
pub use tpsa::{Src, Tpsa};

/// Series with real coefficients.
pub type Tpsa64 = Tpsa<f64>;
/// Series with complex coefficients.
pub type CTpsa64 = Tpsa<num_complex::Complex64>;
