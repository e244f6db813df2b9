pub use domain::*;
pub use operations::*;
pub use rarity::*;
pub use scheduler::*;
pub use stats::*;
pub use synthesis::*;

mod domain;
mod operations;
mod rarity;
mod scheduler;
mod stats;
mod synthesis;
