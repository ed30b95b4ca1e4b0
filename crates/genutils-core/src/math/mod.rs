pub mod dec;
pub mod int;

pub use dec::{Dec, PRECISION};
pub use int::Int;
