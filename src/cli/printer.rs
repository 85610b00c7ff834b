//! 结果打印器
//!
//! 默认输出表格，开启 JSON 模式后输出 serde_json 格式

use crate::algorithm::PathResult;
use crate::error::Result;
use crate::graph::{Edge, Graph, Vertex};
use prettytable::{format, row, Table};
use serde_json::json;

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintMode {
    /// 表格模式
    #[default]
    Table,
    /// JSON 模式
    Json,
}

/// 结果打印器
#[derive(Debug, Default)]
pub struct Printer {
    mode: PrintMode,
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    fn table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table
    }

    /// 打印统计信息
    pub fn print_stats(&self, graph: &Graph) -> Result<String> {
        if self.mode == PrintMode::Json {
            let value = json!({
                "vertices": graph.vertex_count(),
                "edges": graph.edge_count(),
            });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        let mut table = Self::table();
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", graph.vertex_count()]);
        table.add_row(row!["Edge Count", graph.edge_count()]);
        Ok(table.to_string())
    }

    /// 打印顶点列表
    pub fn print_vertices<'a, I>(&self, vertices: I) -> Result<String>
    where
        I: IntoIterator<Item = &'a Vertex>,
    {
        let vertices: Vec<&Vertex> = vertices.into_iter().collect();

        if self.mode == PrintMode::Json {
            let value: Vec<_> = vertices
                .iter()
                .map(|v| {
                    json!({
                        "id": v.id(),
                        "in_degree": v.in_degree(),
                        "out_degree": v.out_degree(),
                    })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        if vertices.is_empty() {
            return Ok("Empty set\n".to_string());
        }

        let mut table = Self::table();
        table.set_titles(row!["ID", "In", "Out"]);
        for v in &vertices {
            table.add_row(row![v.id(), v.in_degree(), v.out_degree()]);
        }
        Ok(format!("{}{} vertex(es)\n", table, vertices.len()))
    }

    /// 打印边列表
    pub fn print_edges<'a, I>(&self, edges: I) -> Result<String>
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        let edges: Vec<&Edge> = edges.into_iter().collect();

        if self.mode == PrintMode::Json {
            return Ok(serde_json::to_string_pretty(&edges)?);
        }

        if edges.is_empty() {
            return Ok("Empty set\n".to_string());
        }

        let mut table = Self::table();
        table.set_titles(row!["From", "To", "Weight"]);
        for e in &edges {
            table.add_row(row![e.from(), e.to(), e.weight()]);
        }
        Ok(format!("{}{} edge(s)\n", table, edges.len()))
    }

    /// 打印路径
    pub fn print_path(&self, path: &PathResult) -> Result<String> {
        if self.mode == PrintMode::Json {
            return Ok(serde_json::to_string_pretty(path)?);
        }

        let route = path
            .vertices
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");

        let mut table = Self::table();
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Path", route]);
        table.add_row(row!["Length", path.length]);
        table.add_row(row!["Total Weight", path.total_weight]);
        table.add_row(row!["Explored", path.explored]);
        Ok(table.to_string())
    }

    /// 帮助信息
    pub fn print_help() -> String {
        r#"
═══════════════════════════════════════════════════════════════
                   pathgraph 命令帮助
═══════════════════════════════════════════════════════════════

基础命令:
  help, h, ?                  显示帮助
  quit, exit, q               退出程序
  stats, count                顶点数和边数

查看:
  vertices                    列出所有顶点及入度/出度
  edges                       列出所有边
  vertex <ID>                 查看顶点的入度和出度
  inbound <ID>                顶点的入边
  outbound <ID>               顶点的出边
  edge <起点> <终点>          检查有向边是否存在
  connected <A> <B>           检查任一方向的边是否存在

修改:
  add-vertex <ID>             添加顶点
  remove-vertex <ID>          删除顶点及其所有关联边
  add-edge <起点> <终点> <权重>
                              添加边
  remove-edge <起点> <终点>   删除边
  weight <起点> <终点> [权重] 查看或修改边的权重

路径:
  path <起点> <终点>          最少边数的路径 (BFS)
  cost <起点> <终点>          总权重最低的路径 (Dijkstra)

文件:
  save <文件>                 保存图
  load <文件>                 加载图，替换当前图
  generate <顶点数> <边数>    生成随机图，替换当前图
  compact                     将顶点 ID 重新编号为 0..n

═══════════════════════════════════════════════════════════════
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::PathFinder;
    use crate::graph::test_support::{build_graph, vid};

    #[test]
    fn test_print_stats() {
        let graph = build_graph(3, &[(0, 1, 5)]);

        let table = Printer::default().print_stats(&graph).unwrap();
        assert!(table.contains("Vertex Count"));
        assert!(table.contains('3'));

        let output = Printer::new(PrintMode::Json).print_stats(&graph).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["vertices"], 3);
        assert_eq!(value["edges"], 1);
    }

    #[test]
    fn test_print_edges_json() {
        let graph = build_graph(3, &[(0, 1, 5), (1, 2, 3)]);
        let output = Printer::new(PrintMode::Json)
            .print_edges(graph.edges())
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[1]["from"], 1);
        assert_eq!(value[1]["weight"], 3);
    }

    #[test]
    fn test_print_empty() {
        let graph = Graph::new();
        let printer = Printer::default();

        assert_eq!(printer.print_edges(graph.edges()).unwrap(), "Empty set\n");
        assert_eq!(printer.print_vertices(graph.vertices()).unwrap(), "Empty set\n");
    }

    #[test]
    fn test_print_path() {
        let graph = build_graph(3, &[(0, 1, 5), (1, 2, 3)]);
        let path = PathFinder::new(&graph)
            .lowest_cost_path(vid(0), vid(2))
            .unwrap();

        let table = Printer::default().print_path(&path).unwrap();
        assert!(table.contains("0 -> 1 -> 2"));

        let output = Printer::new(PrintMode::Json).print_path(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["total_weight"], 8);
    }
}
