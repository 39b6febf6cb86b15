//! Pure computations over in-memory trade records: filtering, sorting,
//! aggregate statistics and the risk:reward formula. Nothing here touches
//! the store or mutates its input.

pub mod filter;
pub mod risk_reward;
pub mod sort;
pub mod stats;

pub use filter::filter_trades;
pub use risk_reward::{is_degenerate_setup, risk_reward, round_for_display};
pub use sort::sort_trades;
pub use stats::*;
