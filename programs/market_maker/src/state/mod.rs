pub mod params;
pub mod records;

pub use params::*;
pub use records::*;
