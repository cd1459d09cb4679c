pub mod entropy;
pub mod generator;
pub mod pool;

pub use zeroize;
