//! 图数据结构
//!
//! 有向带权图，负责维护顶点和边之间的一致性：
//! - 每条边的两个端点都在图中
//! - 每个顶点的入边/出边集合恰好等于图中以它为终点/起点的边
//! - 顶点数和边数等于对应集合的大小

use super::edge::{Edge, EdgeKey};
use super::vertex::{Vertex, VertexId};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::debug;

/// 读取文件或随机生成时允许的最大顶点数，在创建顶点之前检查
pub const MAX_VERTICES: u64 = 1 << 24;

/// 有向带权图
///
/// 顶点和边都按插入顺序保存，遍历顺序是确定的。
/// 顶点 ID 是稳定的：删除顶点不会改变其他顶点的 ID。
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// 顶点 ID -> 顶点
    vertices: IndexMap<VertexId, Vertex>,
    /// (起点, 终点) -> 边
    edges: IndexMap<EdgeKey, Edge>,
}

impl Graph {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    /// 由顶点集合和边集合构建图
    ///
    /// 逐个调用 [`add_vertex`](Self::add_vertex) 和 [`add_edge`](Self::add_edge)，
    /// 因此重复的顶点/边或引用不存在顶点的边都会返回错误。
    pub fn from_parts<V, E>(vertices: V, edges: E) -> Result<Self>
    where
        V: IntoIterator<Item = Vertex>,
        E: IntoIterator<Item = Edge>,
    {
        let mut graph = Self::new();
        for vertex in vertices {
            graph.add_vertex(vertex)?;
        }
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点
    ///
    /// 只使用传入顶点的 ID；它身上记录的边会被忽略，边必须通过 `add_edge` 添加。
    pub fn add_vertex(&mut self, vertex: Vertex) -> Result<()> {
        let id = vertex.id();
        if self.vertices.contains_key(&id) {
            return Err(Error::DuplicateVertex(id));
        }

        self.vertices.insert(id, Vertex::new(id));
        debug!(vertex = %id, "添加顶点");
        Ok(())
    }

    /// 删除顶点及其所有入边和出边
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex> {
        let vertex = self
            .vertices
            .get(&id)
            .ok_or_else(|| Error::NotFound(format!("顶点 {}", id)))?;

        // 自环同时出现在入边和出边中，detach_edge 对已删除的边是空操作
        let incident: Vec<EdgeKey> = vertex.outbound().chain(vertex.inbound()).collect();
        let mut removed_edges = 0;
        for key in &incident {
            if self.detach_edge(key).is_some() {
                removed_edges += 1;
            }
        }

        let vertex = self
            .vertices
            .shift_remove(&id)
            .ok_or_else(|| Error::NotFound(format!("顶点 {}", id)))?;

        debug!(vertex = %id, removed_edges, "删除顶点");
        Ok(vertex)
    }

    /// 获取顶点
    pub fn get_vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// 顶点是否存在
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 按插入顺序遍历顶点
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.values()
    }

    /// 按插入顺序遍历顶点 ID
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    // ==================== 边操作 ====================

    /// 添加边
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        let key = edge.key();
        self.ensure_vertex(key.from)?;
        self.ensure_vertex(key.to)?;

        if self.edges.contains_key(&key) {
            return Err(Error::DuplicateEdge {
                from: key.from,
                to: key.to,
            });
        }

        self.attach_edge(edge);
        debug!(from = %key.from, to = %key.to, weight = edge.weight(), "添加边");
        Ok(())
    }

    /// 删除边
    pub fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<Edge> {
        let key = EdgeKey::new(from, to);
        let edge = self
            .detach_edge(&key)
            .ok_or_else(|| Error::NotFound(format!("边 {}", key)))?;

        debug!(from = %from, to = %to, "删除边");
        Ok(edge)
    }

    /// 获取两个顶点之间的有向边
    ///
    /// 任一顶点不存在时返回 [`Error::InvalidVertex`]。
    pub fn get_edge(&self, from: VertexId, to: VertexId) -> Result<Option<&Edge>> {
        self.ensure_vertex(from)?;
        self.ensure_vertex(to)?;
        Ok(self.edges.get(&EdgeKey::new(from, to)))
    }

    /// 获取边的可变引用（用于修改权重）
    pub fn get_edge_mut(&mut self, from: VertexId, to: VertexId) -> Result<Option<&mut Edge>> {
        self.ensure_vertex(from)?;
        self.ensure_vertex(to)?;
        Ok(self.edges.get_mut(&EdgeKey::new(from, to)))
    }

    /// 修改边的权重，返回原权重
    pub fn set_edge_weight(&mut self, from: VertexId, to: VertexId, weight: i64) -> Result<i64> {
        let edge = self
            .get_edge_mut(from, to)?
            .ok_or_else(|| Error::NotFound(format!("边 {} -> {}", from, to)))?;

        let previous = edge.weight();
        edge.set_weight(weight);
        debug!(from = %from, to = %to, previous, weight, "修改边权重");
        Ok(previous)
    }

    /// 按 key 获取边
    pub fn get_edge_by_key(&self, key: &EdgeKey) -> Option<&Edge> {
        self.edges.get(key)
    }

    /// 是否存在 from -> to 的边
    pub fn find_directed_edge(&self, from: VertexId, to: VertexId) -> Option<&Edge> {
        self.edges.get(&EdgeKey::new(from, to))
    }

    /// 是否存在连接 a 和 b 的边（任一方向），优先返回 a -> b
    pub fn find_either_direction(&self, a: VertexId, b: VertexId) -> Option<&Edge> {
        self.find_directed_edge(a, b).or_else(|| self.find_directed_edge(b, a))
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 按插入顺序遍历边
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// 获取顶点的所有出边（快照）
    pub fn get_outgoing_edges(&self, vertex_id: VertexId) -> Vec<Edge> {
        self.vertices
            .get(&vertex_id)
            .map(|v| v.outbound().filter_map(|key| self.edges.get(&key).copied()).collect())
            .unwrap_or_default()
    }

    /// 获取顶点的所有入边（快照）
    pub fn get_incoming_edges(&self, vertex_id: VertexId) -> Vec<Edge> {
        self.vertices
            .get(&vertex_id)
            .map(|v| v.inbound().filter_map(|key| self.edges.get(&key).copied()).collect())
            .unwrap_or_default()
    }

    // ==================== 邻居查询 ====================

    /// 获取顶点的邻居（出边指向的顶点）
    pub fn neighbors(&self, vertex_id: VertexId) -> Vec<VertexId> {
        self.vertices
            .get(&vertex_id)
            .map(|v| v.outbound().map(|key| key.to).collect())
            .unwrap_or_default()
    }

    /// 获取顶点的前驱（入边来源的顶点）
    pub fn predecessors(&self, vertex_id: VertexId) -> Vec<VertexId> {
        self.vertices
            .get(&vertex_id)
            .map(|v| v.inbound().map(|key| key.from).collect())
            .unwrap_or_default()
    }

    /// 获取顶点的出度，顶点不存在时为 0
    pub fn out_degree(&self, vertex_id: VertexId) -> usize {
        self.vertices
            .get(&vertex_id)
            .map(Vertex::out_degree)
            .unwrap_or(0)
    }

    /// 获取顶点的入度，顶点不存在时为 0
    pub fn in_degree(&self, vertex_id: VertexId) -> usize {
        self.vertices
            .get(&vertex_id)
            .map(Vertex::in_degree)
            .unwrap_or(0)
    }

    // ==================== ID 整理 ====================

    /// 顶点 ID 是否恰好为 0..n
    pub fn is_dense(&self) -> bool {
        let n = self.vertices.len() as u64;
        self.vertices.keys().all(|id| id.as_u64() < n)
    }

    /// 最大的顶点 ID
    pub fn max_vertex_id(&self) -> Option<VertexId> {
        self.vertices.keys().max().copied()
    }

    /// 返回把顶点 ID 按升序重新编号为 0..n 的副本
    ///
    /// 原图不变。边保持原有的插入顺序和权重。
    pub fn compacted(&self) -> Graph {
        let mut ids: Vec<VertexId> = self.vertices.keys().copied().collect();
        ids.sort_unstable();

        let mapping: HashMap<VertexId, VertexId> = ids
            .iter()
            .enumerate()
            .map(|(new_id, &old_id)| (old_id, VertexId::new(new_id as u64)))
            .collect();

        let mut graph = Graph::new();
        for new_id in (0..ids.len() as u64).map(VertexId::new) {
            graph.vertices.insert(new_id, Vertex::new(new_id));
        }
        for edge in self.edges.values() {
            if let (Some(&from), Some(&to)) = (mapping.get(&edge.from()), mapping.get(&edge.to())) {
                graph.attach_edge(Edge::new(from, to, edge.weight()));
            }
        }

        debug!(vertices = graph.vertex_count(), "重新编号顶点");
        graph
    }

    // ==================== 内部方法 ====================

    fn ensure_vertex(&self, id: VertexId) -> Result<()> {
        if self.vertices.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::InvalidVertex(id))
        }
    }

    /// 写入边集合并登记到两个端点，调用方保证端点存在且边不重复
    fn attach_edge(&mut self, edge: Edge) {
        let key = edge.key();
        self.edges.insert(key, edge);
        if let Some(v) = self.vertices.get_mut(&key.from) {
            v.add_outbound(key);
        }
        if let Some(v) = self.vertices.get_mut(&key.to) {
            v.add_inbound(key);
        }
    }

    /// 从边集合和两个端点中移除边
    fn detach_edge(&mut self, key: &EdgeKey) -> Option<Edge> {
        let edge = self.edges.shift_remove(key)?;
        if let Some(v) = self.vertices.get_mut(&key.from) {
            v.remove_outbound(key);
        }
        if let Some(v) = self.vertices.get_mut(&key.to) {
            v.remove_inbound(key);
        }
        Some(edge)
    }
}
