//! 存储模块
//!
//! 图的文本文件持久化

mod text;

pub use text::{read_graph, write_graph};
