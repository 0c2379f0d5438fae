mod table;
mod data_source;
mod interface;
mod category;
mod project;

pub use table::*;
pub use data_source::*;
pub use interface::*;
pub use category::*;
pub use project::*;
