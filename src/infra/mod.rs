//! File I/O, frontmatter parsing, host capabilities

mod editor;
mod frontmatter;
mod fs;
mod repo;

pub use editor::{Editor, Severity};
pub use frontmatter::{Frontmatter, FrontmatterValue, parse_frontmatter, read_frontmatter};
pub use fs::{FileSystem, FsError, MARKDOWN_EXTENSION, RealFs, is_markdown, stem_of};
pub use repo::detect_repository_root;
