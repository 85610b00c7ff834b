//! 图核心模块
//!
//! 定义顶点、边和图的核心数据结构

mod edge;
mod graph;
mod vertex;

pub use edge::{Edge, EdgeKey};
pub use graph::{Graph, MAX_VERTICES};
pub use vertex::{Vertex, VertexId};

#[cfg(test)]
pub(crate) use self::graph::tests as test_support;
