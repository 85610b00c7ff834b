//! 图算法模块
//!
//! 包含无权最短路径（BFS）和最低代价路径（反向 Dijkstra）

mod path_finder;

pub use path_finder::{PathFinder, PathResult, VisitState};
