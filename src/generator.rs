//! 随机图生成
//!
//! 先创建顶点 `0..n`，再随机抽取有序顶点对，已存在的边直接丢弃重抽，
//! 直到边数达到要求。

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, Vertex, VertexId, MAX_VERTICES};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// 单次生成允许的最大边数
pub const MAX_EDGES: u64 = 1 << 26;

/// 生成器配置
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// 权重上限（不含），权重取自 `0..max_weight`
    pub max_weight: i64,
    /// 随机种子，相同种子生成相同的图
    pub seed: Option<u64>,
    /// 是否允许自环
    pub allow_self_loops: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_weight: 500,
            seed: None,
            allow_self_loops: true,
        }
    }
}

/// 随机图生成器
pub struct RandomGraphGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl RandomGraphGenerator {
    /// 创建生成器
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// 可容纳的最多边数
    pub fn max_edges(&self, vertex_count: u64) -> u64 {
        let per_vertex = if self.config.allow_self_loops {
            vertex_count
        } else {
            vertex_count.saturating_sub(1)
        };
        vertex_count.saturating_mul(per_vertex)
    }

    /// 生成有 `vertex_count` 个顶点、`edge_count` 条边的随机有向图
    pub fn generate(&mut self, vertex_count: u64, edge_count: u64) -> Result<Graph> {
        if vertex_count == 0 {
            return Err(Error::InvalidArgument("顶点数必须大于 0".to_string()));
        }
        if vertex_count > MAX_VERTICES {
            return Err(Error::InvalidArgument(format!(
                "顶点数 {} 超过上限 {}",
                vertex_count, MAX_VERTICES
            )));
        }
        if self.config.max_weight <= 0 {
            return Err(Error::InvalidArgument(format!(
                "权重上限必须大于 0: {}",
                self.config.max_weight
            )));
        }
        let max_edges = self.max_edges(vertex_count);
        if edge_count > max_edges {
            return Err(Error::InvalidArgument(format!(
                "{} 个顶点最多容纳 {} 条边, 请求 {} 条",
                vertex_count, max_edges, edge_count
            )));
        }
        if edge_count > MAX_EDGES {
            return Err(Error::InvalidArgument(format!(
                "边数 {} 超过上限 {}",
                edge_count, MAX_EDGES
            )));
        }

        let mut graph = Graph::new();
        for id in 0..vertex_count {
            graph.add_vertex(Vertex::new(VertexId::new(id)))?;
        }

        let mut rejected: u64 = 0;
        while (graph.edge_count() as u64) < edge_count {
            let from = VertexId::new(self.rng.gen_range(0..vertex_count));
            let to = VertexId::new(self.rng.gen_range(0..vertex_count));

            if (!self.config.allow_self_loops && from == to)
                || graph.find_directed_edge(from, to).is_some()
            {
                rejected += 1;
                continue;
            }

            let weight = self.rng.gen_range(0..self.config.max_weight);
            graph.add_edge(Edge::new(from, to, weight))?;
        }

        info!(
            vertices = vertex_count,
            edges = edge_count,
            rejected,
            "随机图已生成"
        );
        Ok(graph)
    }
}

impl Graph {
    /// 使用默认配置生成随机图
    pub fn generate_random(vertex_count: u64, edge_count: u64) -> Result<Graph> {
        RandomGraphGenerator::new(GeneratorConfig::default()).generate(vertex_count, edge_count)
    }
}
