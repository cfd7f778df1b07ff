pub mod error;
pub mod index;
pub mod normalize;
pub mod resolver;
pub mod service;
pub mod store;
pub mod validate;

pub use error::DictionaryError;
pub use index::TermIndex;
pub use resolver::Resolver;
pub use service::DictionaryService;
pub use store::{DictionaryStore, StoreError};
pub use validate::{ValidEntry, ValidPatch};

#[cfg(test)]
mod testing;
