pub mod pointer;

pub use pointer::{PointerPlugin, PointerPressed};
