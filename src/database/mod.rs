pub mod pool;
pub mod seed;
