//! Link graph construction and rendering

mod builder;
pub mod render;

pub use builder::GraphBuilder;
