//! 顶点定义
//!
//! 顶点由整数 ID 标识，并记录所有入边和出边的 key

use crate::graph::edge::EdgeKey;
use indexmap::IndexSet;
use serde::Serialize;
use std::fmt;

/// 顶点 ID（图内唯一，删除其他顶点时保持不变）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct VertexId(pub u64);

impl VertexId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 顶点
///
/// 入度和出度直接取自边集合的大小。
/// 边集合只能通过 [`Graph`](crate::graph::Graph) 的边操作修改。
#[derive(Debug, Clone)]
pub struct Vertex {
    /// 顶点 ID
    id: VertexId,
    /// 入边（按插入顺序）
    inbound: IndexSet<EdgeKey>,
    /// 出边（按插入顺序）
    outbound: IndexSet<EdgeKey>,
}

impl Vertex {
    /// 创建没有任何边的新顶点
    pub fn new(id: VertexId) -> Self {
        Self {
            id,
            inbound: IndexSet::new(),
            outbound: IndexSet::new(),
        }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 入度
    pub fn in_degree(&self) -> usize {
        self.inbound.len()
    }

    /// 出度
    pub fn out_degree(&self) -> usize {
        self.outbound.len()
    }

    /// 遍历入边
    pub fn inbound(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.inbound.iter().copied()
    }

    /// 遍历出边
    pub fn outbound(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.outbound.iter().copied()
    }

    pub fn has_inbound(&self, key: &EdgeKey) -> bool {
        self.inbound.contains(key)
    }

    pub fn has_outbound(&self, key: &EdgeKey) -> bool {
        self.outbound.contains(key)
    }

    /// 记录入边，返回集合是否发生变化
    pub(crate) fn add_inbound(&mut self, key: EdgeKey) -> bool {
        self.inbound.insert(key)
    }

    /// 记录出边，返回集合是否发生变化
    pub(crate) fn add_outbound(&mut self, key: EdgeKey) -> bool {
        self.outbound.insert(key)
    }

    // shift_remove 保留剩余边的插入顺序，BFS 的结果依赖这个顺序
    pub(crate) fn remove_inbound(&mut self, key: &EdgeKey) -> bool {
        self.inbound.shift_remove(key)
    }

    pub(crate) fn remove_outbound(&mut self, key: &EdgeKey) -> bool {
        self.outbound.shift_remove(key)
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vertex {}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vertex{{id={}, in={}, out={}}}",
            self.id,
            self.in_degree(),
            self.out_degree()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_new_is_isolated() {
        let v = Vertex::new(VertexId::new(7));

        assert_eq!(v.id(), VertexId::new(7));
        assert_eq!(v.in_degree(), 0);
        assert_eq!(v.out_degree(), 0);
        assert_eq!(v.inbound().count(), 0);
    }

    #[test]
    fn test_vertex_degree_does_not_double_count() {
        let mut v = Vertex::new(VertexId::new(1));
        let key = EdgeKey::new(VertexId::new(1), VertexId::new(2));

        assert!(v.add_outbound(key));
        assert!(!v.add_outbound(key));
        assert_eq!(v.out_degree(), 1);

        assert!(v.remove_outbound(&key));
        assert!(!v.remove_outbound(&key));
        assert_eq!(v.out_degree(), 0);
    }

    #[test]
    fn test_vertex_equality_by_id() {
        let mut a = Vertex::new(VertexId::new(3));
        let b = Vertex::new(VertexId::new(3));
        a.add_inbound(EdgeKey::new(VertexId::new(0), VertexId::new(3)));

        assert_eq!(a, b);
        assert_ne!(a, Vertex::new(VertexId::new(4)));
    }

    #[test]
    fn test_vertex_iteration_keeps_insertion_order() {
        let mut v = Vertex::new(VertexId::new(0));
        let keys: Vec<EdgeKey> = [5, 2, 9]
            .iter()
            .map(|&to| EdgeKey::new(VertexId::new(0), VertexId::new(to)))
            .collect();
        for key in &keys {
            v.add_outbound(*key);
        }
        v.remove_outbound(&keys[1]);

        let remaining: Vec<EdgeKey> = v.outbound().collect();
        assert_eq!(remaining, vec![keys[0], keys[2]]);
        // 可重复遍历
        assert_eq!(v.outbound().count(), 2);
    }
}
