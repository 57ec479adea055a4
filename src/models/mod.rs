pub mod common;
pub mod doorprize;
pub mod draw;

pub use common::*;
pub use doorprize::*;
pub use draw::*;
