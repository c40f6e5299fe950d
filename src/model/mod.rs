mod filter;
mod locale;
mod team;

pub use filter::*;
pub use locale::*;
pub use team::*;
