//! Domain types for trade logs

pub mod side;
pub mod timestamp;
pub mod trade;

pub use side::PositionSide;
pub use timestamp::Timestamp;
pub use trade::{CompletedTrade, EntryLeg, ExitLeg, Leg, LegKind, TradeNum};
