pub mod serve;
pub mod shape;
