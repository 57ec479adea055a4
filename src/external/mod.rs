pub mod doorprize_api;
pub mod store;

pub use doorprize_api::*;
pub use store::*;
