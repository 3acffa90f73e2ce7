pub mod squeeze;

pub use squeeze::squeeze_op;
