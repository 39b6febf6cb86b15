pub mod query;
pub mod settings;
pub mod trade;

pub use query::*;
pub use settings::*;
pub use trade::*;
