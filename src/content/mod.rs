pub mod collection;
pub mod date;
pub mod frontmatter;
pub mod schema;

pub use collection::{collections, find_collection, Collection, CollectionDef, Entry};
pub use schema::{Post, Schema, POST_SCHEMA};
