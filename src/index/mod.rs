//! File, alias, link and graph caches

mod alias_index;
mod file_index;
mod graph_cache;
mod links;
mod store;

pub use alias_index::{AliasIndex, AliasScan};
pub use file_index::FileIndex;
pub use graph_cache::{GraphCache, GraphEntry};
pub use links::{LinkCache, LinkEntry, LinkKind, LinkSpan, extract_links, link_at, link_spans};
pub use store::{FileEvent, IndexStore};
