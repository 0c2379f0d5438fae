#[cfg(any(test, feature = "test_utilities"))]
pub mod test_helpers;

mod error;
mod helpers;
mod models;
mod schema_catalog;
mod selection;
mod type_mapping;
mod codegen;
mod storage;
mod seed;
mod permissions;
mod confirmation;
mod workspace;

pub use error::*;
pub use models::*;
pub use schema_catalog::*;
pub use selection::*;
pub use type_mapping::*;
pub use codegen::*;
pub use storage::*;
pub use permissions::*;
pub use confirmation::*;
pub use workspace::*;
pub use seed::seed_tables;


pub(crate) fn default<T: Default>() -> T {
    T::default()
}
