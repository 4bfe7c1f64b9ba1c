//! Data model for the tag field.
//!
//! - [`Tag`]: one chip's text plus its one-shot focus request
//! - [`TagStore`]: the ordered collection every view reads from

mod tag_store;

pub use tag_store::{Tag, TagStore};
