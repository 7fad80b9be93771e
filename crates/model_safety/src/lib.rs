//! Pure Rust reference model of the market-maker program
//! No store, no codec, no unwrap/panic, all functions total

pub mod state;
pub mod math;
pub mod helpers;
pub mod transitions;

// Re-export commonly used types
pub use state::*;
pub use helpers::*;
pub use transitions::*;
