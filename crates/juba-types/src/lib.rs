pub mod direction;
pub mod entry;
pub mod translation;

pub use direction::{Direction, ParseDirectionError};
pub use entry::{Category, DictionaryEntry, EntryPatch, NewEntry, ParseCategoryError};
pub use translation::{MatchKind, Translation};
