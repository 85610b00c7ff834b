//! pathgraph - 有向带权图与路径查找
//!
//! 提供：
//! - 以整数 ID 标识顶点的有向带权图，顶点和边的增删改查
//! - 最少边数路径 (BFS) 和最低代价路径 (反向 Dijkstra)
//! - 文本文件持久化和随机图生成
//! - 交互式命令行

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod generator;
pub mod graph;
pub mod logging;
pub mod storage;

// 重导出常用类型
pub use algorithm::{PathFinder, PathResult, VisitState};
pub use error::{Error, Result};
pub use generator::{GeneratorConfig, RandomGraphGenerator, MAX_EDGES};
pub use graph::{Edge, EdgeKey, Graph, Vertex, VertexId, MAX_VERTICES};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
