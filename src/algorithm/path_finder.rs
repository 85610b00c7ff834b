//! 路径查找算法
//!
//! - 无权最短路径：沿出边的 BFS，发现终点时立即结束
//! - 最低代价路径：以终点为源、沿入边反向运行的 Dijkstra
//!
//! 两种搜索共用同一个顶点状态机：`Unvisited -> Frontier -> Finalized`，状态不会回退。

use crate::error::{Error, Result};
use crate::graph::{EdgeKey, Graph, VertexId};
use priority_queue::PriorityQueue;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// 搜索中顶点的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitState {
    /// 尚未发现
    #[default]
    Unvisited,
    /// 已发现（在队列或优先队列中）
    Frontier,
    /// 已出队，结果确定
    Finalized,
}

/// 记录每个顶点的搜索状态
#[derive(Debug, Default)]
struct VisitTracker {
    states: HashMap<VertexId, VisitState>,
    finalized: usize,
}

impl VisitTracker {
    fn state(&self, id: VertexId) -> VisitState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    /// Unvisited -> Frontier，顶点第一次被发现时返回 true
    fn discover(&mut self, id: VertexId) -> bool {
        if self.state(id) == VisitState::Unvisited {
            self.states.insert(id, VisitState::Frontier);
            true
        } else {
            false
        }
    }

    /// Frontier -> Finalized
    fn finalize(&mut self, id: VertexId) {
        if self.states.insert(id, VisitState::Finalized) != Some(VisitState::Finalized) {
            self.finalized += 1;
        }
    }
}

/// 路径结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathResult {
    /// 路径上的顶点序列（包含起点和终点）
    pub vertices: Vec<VertexId>,
    /// 路径上的边序列
    pub edges: Vec<EdgeKey>,
    /// 路径长度（边数）
    pub length: usize,
    /// 路径总权重
    pub total_weight: i64,
    /// 搜索过程中确定状态的顶点数
    pub explored: usize,
}

impl PathResult {
    fn with_start(start: VertexId) -> Self {
        Self {
            vertices: vec![start],
            edges: Vec::new(),
            length: 0,
            total_weight: 0,
            explored: 1,
        }
    }
}

/// 路径查找器
///
/// 只读借用图，搜索期间图不能被修改。
pub struct PathFinder<'a> {
    graph: &'a Graph,
}

impl<'a> PathFinder<'a> {
    /// 创建路径查找器
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// BFS 最短路径（按边数）
    ///
    /// 同一层有多条最短路径时，按出边插入顺序取第一条。
    /// 发现终点即结束，不再处理当前层剩余的顶点。
    pub fn shortest_path(&self, start: VertexId, end: VertexId) -> Result<PathResult> {
        self.ensure_endpoints(start, end)?;
        if start == end {
            return Ok(PathResult::with_start(start));
        }

        let mut tracker = VisitTracker::default();
        let mut queue = VecDeque::new();
        let mut parent: HashMap<VertexId, EdgeKey> = HashMap::new();

        tracker.discover(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            tracker.finalize(current);

            let Some(vertex) = self.graph.get_vertex(current) else {
                continue;
            };

            for key in vertex.outbound() {
                if !tracker.discover(key.to) {
                    continue;
                }
                parent.insert(key.to, key);

                if key.to == end {
                    let path = self.reconstruct_path(start, end, &parent, tracker.finalized)?;
                    debug!(
                        start = %start,
                        end = %end,
                        length = path.length,
                        explored = path.explored,
                        "BFS 找到最短路径"
                    );
                    return Ok(path);
                }
                queue.push_back(key.to);
            }
        }

        debug!(start = %start, end = %end, explored = tracker.finalized, "BFS 未找到路径");
        Err(Error::NoPath {
            from: start,
            to: end,
        })
    }

    /// 最低代价路径（反向 Dijkstra）
    ///
    /// 从终点出发沿入边松弛，`dist[v]` 收敛为 v 到终点的最低总权重。
    /// 起点出队时距离已确定，搜索结束。距离相同时 ID 小的顶点先出队。
    /// 图中存在负权重时返回 [`Error::InvalidWeight`]；
    /// 距离以 i128 累加，最优路径总权重超出 i64 时返回 [`Error::WeightOverflow`]。
    pub fn lowest_cost_path(&self, start: VertexId, end: VertexId) -> Result<PathResult> {
        self.ensure_endpoints(start, end)?;
        self.ensure_non_negative_weights()?;
        if start == end {
            return Ok(PathResult::with_start(start));
        }

        let mut tracker = VisitTracker::default();
        let mut dist: HashMap<VertexId, i128> = HashMap::new();
        // 顶点 -> 它通往终点的最优路径上的第一条边
        let mut next: HashMap<VertexId, EdgeKey> = HashMap::new();
        let mut frontier: PriorityQueue<VertexId, Reverse<(i128, VertexId)>> = PriorityQueue::new();

        dist.insert(end, 0);
        tracker.discover(end);
        frontier.push(end, Reverse((0, end)));

        while let Some((current, Reverse((distance, _)))) = frontier.pop() {
            tracker.finalize(current);

            if current == start {
                let total_weight = i64::try_from(distance).map_err(|_| Error::WeightOverflow {
                    from: start,
                    to: end,
                })?;
                let path =
                    self.follow_successors(start, end, &next, total_weight, tracker.finalized);
                debug!(
                    start = %start,
                    end = %end,
                    cost = path.total_weight,
                    explored = path.explored,
                    "Dijkstra 找到最低代价路径"
                );
                return Ok(path);
            }

            let Some(vertex) = self.graph.get_vertex(current) else {
                continue;
            };

            for key in vertex.inbound() {
                let source = key.from;
                if tracker.state(source) == VisitState::Finalized {
                    continue;
                }
                let Some(edge) = self.graph.get_edge_by_key(&key) else {
                    continue;
                };

                let candidate = distance + i128::from(edge.weight());
                let improved = dist.get(&source).map_or(true, |&known| candidate < known);
                if improved {
                    dist.insert(source, candidate);
                    next.insert(source, key);
                    tracker.discover(source);
                    frontier.push(source, Reverse((candidate, source)));
                }
            }
        }

        debug!(start = %start, end = %end, explored = tracker.finalized, "Dijkstra 未找到路径");
        Err(Error::NoPath {
            from: start,
            to: end,
        })
    }

    /// 判断两点是否连通
    pub fn is_reachable(&self, start: VertexId, end: VertexId) -> bool {
        self.shortest_path(start, end).is_ok()
    }

    fn ensure_endpoints(&self, start: VertexId, end: VertexId) -> Result<()> {
        for id in [start, end] {
            if !self.graph.contains_vertex(id) {
                return Err(Error::VertexNotFound(id));
            }
        }
        Ok(())
    }

    fn ensure_non_negative_weights(&self) -> Result<()> {
        match self.graph.edges().find(|e| e.weight() < 0) {
            Some(edge) => Err(Error::InvalidWeight {
                from: edge.from(),
                to: edge.to(),
                weight: edge.weight(),
            }),
            None => Ok(()),
        }
    }

    /// 从终点沿前驱回溯到起点，再反转
    fn reconstruct_path(
        &self,
        start: VertexId,
        end: VertexId,
        parent: &HashMap<VertexId, EdgeKey>,
        explored: usize,
    ) -> Result<PathResult> {
        let mut current = end;
        let mut vertices = vec![end];
        let mut edges = Vec::new();
        let mut total_weight: i128 = 0;

        while current != start {
            let Some(&key) = parent.get(&current) else {
                break;
            };
            edges.push(key);
            vertices.push(key.from);
            if let Some(edge) = self.graph.get_edge_by_key(&key) {
                total_weight += i128::from(edge.weight());
            }
            current = key.from;
        }

        vertices.reverse();
        edges.reverse();

        let total_weight = i64::try_from(total_weight).map_err(|_| Error::WeightOverflow {
            from: start,
            to: end,
        })?;
        Ok(PathResult {
            length: edges.len(),
            vertices,
            edges,
            total_weight,
            explored,
        })
    }

    /// 反向搜索记录的是每个顶点通往终点的下一条边，从起点顺着走即为正向路径
    fn follow_successors(
        &self,
        start: VertexId,
        end: VertexId,
        next: &HashMap<VertexId, EdgeKey>,
        total_weight: i64,
        explored: usize,
    ) -> PathResult {
        let mut current = start;
        let mut vertices = vec![start];
        let mut edges = Vec::new();

        while current != end {
            let Some(&key) = next.get(&current) else {
                break;
            };
            edges.push(key);
            vertices.push(key.to);
            current = key.to;
        }

        PathResult {
            length: edges.len(),
            vertices,
            edges,
            total_weight,
            explored,
        }
    }
}
