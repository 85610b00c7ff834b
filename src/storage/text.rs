//! 文本格式的图持久化
//!
//! 文件格式（整数以空格分隔，每行以换行结束）：
//!
//! ```text
//! <顶点数> <边数>
//! <起点> <终点> <权重>
//! ...
//! ```
//!
//! 读取时预先创建顶点 `0..顶点数`，边引用范围外的 ID 视为无效顶点。
//! 文件头声明的顶点数超过 [`MAX_VERTICES`] 时视为文件损坏。

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, Vertex, VertexId, MAX_VERTICES};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// 将图写入 writer
///
/// 顶点 ID 必须恰好为 `0..n`，否则返回 [`Error::SparseVertexIds`]，
/// 可以先调用 [`Graph::compacted`] 重新编号。
pub fn write_graph<W: Write>(graph: &Graph, mut writer: W) -> Result<()> {
    if !graph.is_dense() {
        return Err(Error::SparseVertexIds {
            count: graph.vertex_count(),
            max_id: graph.max_vertex_id().map(|id| id.as_u64()).unwrap_or(0),
        });
    }

    writeln!(writer, "{} {}", graph.vertex_count(), graph.edge_count())?;
    for edge in graph.edges() {
        writeln!(writer, "{} {} {}", edge.from(), edge.to(), edge.weight())?;
    }
    writer.flush()?;
    Ok(())
}

/// 从 reader 读取图
pub fn read_graph<R: BufRead>(reader: R) -> Result<Graph> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line));

    let (vertex_count, edge_count) = loop {
        match lines.next() {
            Some((line_no, line)) => {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let [vertices, edges] = parse_fields::<u64, 2>(line_no, &line)?;
                if vertices > MAX_VERTICES {
                    return Err(Error::CorruptFile(format!(
                        "第 {} 行: 顶点数 {} 超过上限 {}",
                        line_no, vertices, MAX_VERTICES
                    )));
                }
                break (vertices, edges);
            }
            None => return Err(Error::CorruptFile("缺少文件头".to_string())),
        }
    };

    let mut graph = Graph::new();
    for id in 0..vertex_count {
        graph.add_vertex(Vertex::new(VertexId::new(id)))?;
    }

    let mut edges_read: u64 = 0;
    for (line_no, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let [from, to, weight] = parse_fields::<i64, 3>(line_no, &line)?;
        let from = parse_vertex(line_no, from, vertex_count)?;
        let to = parse_vertex(line_no, to, vertex_count)?;

        match graph.add_edge(Edge::new(from, to, weight)) {
            Err(Error::DuplicateEdge { from, to }) => {
                return Err(Error::CorruptFile(format!(
                    "第 {} 行: 重复的边 {} -> {}",
                    line_no, from, to
                )));
            }
            result => result?,
        }
        edges_read += 1;
    }

    if edges_read != edge_count {
        return Err(Error::CorruptFile(format!(
            "文件头声明 {} 条边, 实际读取 {} 条",
            edge_count, edges_read
        )));
    }

    Ok(graph)
}

/// 解析一行中恰好 N 个整数
fn parse_fields<T: FromStr, const N: usize>(line_no: usize, line: &str) -> Result<[T; N]> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != N {
        return Err(Error::CorruptFile(format!(
            "第 {} 行: 期望 {} 个整数, 实际 {} 个",
            line_no,
            N,
            tokens.len()
        )));
    }

    let values: Vec<T> = tokens
        .iter()
        .map(|token| {
            token.parse::<T>().map_err(|_| {
                Error::CorruptFile(format!("第 {} 行: 无法解析整数 '{}'", line_no, token))
            })
        })
        .collect::<Result<_>>()?;

    values
        .try_into()
        .map_err(|_| Error::CorruptFile(format!("第 {} 行: 字段数量错误", line_no)))
}

fn parse_vertex(line_no: usize, raw: i64, vertex_count: u64) -> Result<VertexId> {
    let id = u64::try_from(raw).map_err(|_| {
        Error::CorruptFile(format!("第 {} 行: 顶点 ID 不能为负数: {}", line_no, raw))
    })?;
    if id >= vertex_count {
        return Err(Error::InvalidVertex(VertexId::new(id)));
    }
    Ok(VertexId::new(id))
}

impl Graph {
    /// 从文件读取图
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let graph = read_graph(BufReader::new(file))?;

        info!(
            path = %path.display(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "图已加载"
        );
        Ok(graph)
    }

    /// 由文件路径构造图，等同于 [`Graph::load`]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load(path)
    }

    /// 将图保存到文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        write_graph(self, BufWriter::new(file))?;

        info!(
            path = %path.display(),
            vertices = self.vertex_count(),
            edges = self.edge_count(),
            "图已保存"
        );
        Ok(())
    }
}
