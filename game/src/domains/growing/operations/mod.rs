pub use complete_growth::*;
pub use create_plot::*;
pub use harvest::*;
pub use place_item::*;
pub use remove_item::*;
pub use start_growth::*;

mod complete_growth;
mod create_plot;
mod harvest;
mod place_item;
mod remove_item;
mod start_growth;
