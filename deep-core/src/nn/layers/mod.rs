pub mod linear;
pub mod relu;
