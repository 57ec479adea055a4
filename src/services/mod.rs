pub mod carousel;
pub mod draw_service;
pub mod draw_state;
pub mod eligibility;
pub mod popup_sequencer;
pub mod reset;
pub mod selector;
pub mod spin_scheduler;

#[cfg(test)]
pub(crate) mod test_support;

pub use draw_service::*;
pub use draw_state::{DrawEngineState, group_winners};
