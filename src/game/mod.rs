//! Game module - service layer and turn bookkeeping

mod chronicle;
mod turn;

pub use chronicle::Chronicle;
pub use turn::{Side, TurnTracker};
