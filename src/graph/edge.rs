//! 边定义
//!
//! 有向带权边。边的身份只由 (起点, 终点) 决定，与权重无关

use crate::graph::vertex::VertexId;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 边的身份：有序的 (起点, 终点)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EdgeKey {
    pub from: VertexId,
    pub to: VertexId,
}

impl EdgeKey {
    pub fn new(from: VertexId, to: VertexId) -> Self {
        Self { from, to }
    }

    /// 反向边的 key
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// 是否与顶点相连
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.from == vertex || self.to == vertex
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// 边
///
/// 端点不可变，权重可变。类型本身不检查权重符号，
/// 需要非负权重的算法（最低代价路径）自行校验。
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Edge {
    /// 起点
    from: VertexId,
    /// 终点
    to: VertexId,
    /// 权重
    weight: i64,
}

impl Edge {
    /// 创建新边
    pub fn new(from: VertexId, to: VertexId, weight: i64) -> Self {
        Self {
            from,
            to,
            weight,
        }
    }

    /// 获取起点
    pub fn from(&self) -> VertexId {
        self.from
    }

    /// 获取终点
    pub fn to(&self) -> VertexId {
        self.to
    }

    /// 获取边的 key
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.from, self.to)
    }

    /// 获取权重
    pub fn weight(&self) -> i64 {
        self.weight
    }

    /// 设置权重
    pub fn set_weight(&mut self, weight: i64) {
        self.weight = weight;
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} (weight={})", self.from, self.to, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_edge_basic() {
        let mut e = Edge::new(VertexId::new(1), VertexId::new(2), 40);

        assert_eq!(e.from(), VertexId::new(1));
        assert_eq!(e.to(), VertexId::new(2));
        assert_eq!(e.weight(), 40);

        e.set_weight(-3);
        assert_eq!(e.weight(), -3);
    }

    #[test]
    fn test_edge_equality_ignores_weight() {
        let a = Edge::new(VertexId::new(1), VertexId::new(2), 10);
        let b = Edge::new(VertexId::new(1), VertexId::new(2), 99);
        let reverse = Edge::new(VertexId::new(2), VertexId::new(1), 10);

        assert_eq!(a, b);
        assert_ne!(a, reverse);

        let set: HashSet<Edge> = [a, b, reverse].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_edge_key() {
        let key = Edge::new(VertexId::new(4), VertexId::new(4), 1).key();
        assert!(key.is_self_loop());
        assert!(key.touches(VertexId::new(4)));

        let key = EdgeKey::new(VertexId::new(0), VertexId::new(5));
        assert_eq!(key.reversed(), EdgeKey::new(VertexId::new(5), VertexId::new(0)));
        assert!(!key.touches(VertexId::new(3)));
    }
}
