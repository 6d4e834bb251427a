pub mod tpsa_num_traits;
pub mod tpsa_std_ops;
