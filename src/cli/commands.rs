//! 命令处理
//!
//! `Session` 持有当前的图，逐行解析并执行命令。
//! 单条命令出错只返回错误信息，不影响会话继续。

use crate::algorithm::PathFinder;
use crate::cli::printer::{PrintMode, Printer};
use crate::error::{Error, Result};
use crate::generator::{GeneratorConfig, RandomGraphGenerator};
use crate::graph::{Edge, Graph, Vertex, VertexId};
use std::str::FromStr;
use tracing::debug;

/// 命令执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 错误
    Error(String),
}

/// 会话配置
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// 以 JSON 输出统计、列表和路径
    pub json_output: bool,
    /// `generate` 命令使用的生成器配置
    pub generator: GeneratorConfig,
}

/// 交互会话
#[derive(Default)]
pub struct Session {
    graph: Graph,
    config: SessionConfig,
    printer: Printer,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_graph(Graph::new(), config)
    }

    /// 以已有的图创建会话
    pub fn with_graph(graph: Graph, config: SessionConfig) -> Self {
        let mode = if config.json_output {
            PrintMode::Json
        } else {
            PrintMode::Table
        };
        Self {
            graph,
            config,
            printer: Printer::new(mode),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// 执行一行命令
    pub fn execute(&mut self, input: &str) -> CommandResult {
        let mut parts = input.split_whitespace();
        let Some(cmd) = parts.next() else {
            return CommandResult::Continue;
        };
        let cmd = cmd.to_lowercase();
        let args: Vec<&str> = parts.collect();

        debug!(command = %cmd, args = args.len(), "执行命令");
        match self.dispatch(&cmd, &args) {
            Ok(result) => result,
            Err(e) => CommandResult::Error(e.to_string()),
        }
    }

    fn dispatch(&mut self, cmd: &str, args: &[&str]) -> Result<CommandResult> {
        let message = match cmd {
            "quit" | "exit" | "q" => return Ok(CommandResult::Exit),

            "help" | "h" | "?" => Printer::print_help(),

            "stats" | "count" => self.printer.print_stats(&self.graph)?,

            "vertices" => self.printer.print_vertices(self.graph.vertices())?,

            "edges" => self.printer.print_edges(self.graph.edges())?,

            "vertex" => {
                let [id] = vertex_args::<1>(args, "vertex <ID>")?;
                let vertex = self
                    .graph
                    .get_vertex(id)
                    .ok_or(Error::VertexNotFound(id))?;
                format!(
                    "顶点 {}: 入度 {}, 出度 {}",
                    id,
                    vertex.in_degree(),
                    vertex.out_degree()
                )
            }

            "inbound" | "outbound" => {
                let [id] = vertex_args::<1>(args, "inbound|outbound <ID>")?;
                if !self.graph.contains_vertex(id) {
                    return Err(Error::VertexNotFound(id));
                }
                let edges = if cmd == "inbound" {
                    self.graph.get_incoming_edges(id)
                } else {
                    self.graph.get_outgoing_edges(id)
                };
                self.printer.print_edges(&edges)?
            }

            "edge" => {
                let [from, to] = vertex_args::<2>(args, "edge <起点> <终点>")?;
                match self.graph.find_directed_edge(from, to) {
                    Some(edge) => format!("存在: {}", edge),
                    None => format!("不存在边 {} -> {}", from, to),
                }
            }

            "connected" => {
                let [a, b] = vertex_args::<2>(args, "connected <A> <B>")?;
                match self.graph.find_either_direction(a, b) {
                    Some(edge) => format!("相连: {}", edge),
                    None => format!("{} 与 {} 之间没有边", a, b),
                }
            }

            "weight" => self.weight(args)?,

            "add-vertex" => {
                let [id] = vertex_args::<1>(args, "add-vertex <ID>")?;
                self.graph.add_vertex(Vertex::new(id))?;
                format!("已添加顶点 {}", id)
            }

            "remove-vertex" => {
                let [id] = vertex_args::<1>(args, "remove-vertex <ID>")?;
                let before = self.graph.edge_count();
                self.graph.remove_vertex(id)?;
                format!(
                    "已删除顶点 {} 及 {} 条关联边",
                    id,
                    before - self.graph.edge_count()
                )
            }

            "add-edge" => {
                let usage = "add-edge <起点> <终点> <权重>";
                let [from, to, weight] = expect_args::<3>(args, usage)?;
                let edge = Edge::new(
                    parse_vertex(from)?,
                    parse_vertex(to)?,
                    parse_number(weight)?,
                );
                self.graph.add_edge(edge)?;
                format!("已添加边 {}", edge)
            }

            "remove-edge" => {
                let [from, to] = vertex_args::<2>(args, "remove-edge <起点> <终点>")?;
                let edge = self.graph.remove_edge(from, to)?;
                format!("已删除边 {}", edge)
            }

            "path" => {
                let [start, end] = vertex_args::<2>(args, "path <起点> <终点>")?;
                let path = PathFinder::new(&self.graph).shortest_path(start, end)?;
                self.printer.print_path(&path)?
            }

            "cost" => {
                let [start, end] = vertex_args::<2>(args, "cost <起点> <终点>")?;
                let path = PathFinder::new(&self.graph).lowest_cost_path(start, end)?;
                self.printer.print_path(&path)?
            }

            "save" => {
                let [path] = expect_args::<1>(args, "save <文件>")?;
                self.graph.save(path)?;
                format!(
                    "已保存 {} 个顶点, {} 条边到 {}",
                    self.graph.vertex_count(),
                    self.graph.edge_count(),
                    path
                )
            }

            "load" => {
                let [path] = expect_args::<1>(args, "load <文件>")?;
                self.graph = Graph::load(path)?;
                format!(
                    "已从 {} 加载 {} 个顶点, {} 条边",
                    path,
                    self.graph.vertex_count(),
                    self.graph.edge_count()
                )
            }

            "generate" => {
                let [vertices, edges] = expect_args::<2>(args, "generate <顶点数> <边数>")?;
                let mut generator = RandomGraphGenerator::new(self.config.generator.clone());
                self.graph = generator.generate(parse_number(vertices)?, parse_number(edges)?)?;
                format!(
                    "已生成 {} 个顶点, {} 条边的随机图",
                    self.graph.vertex_count(),
                    self.graph.edge_count()
                )
            }

            "compact" => {
                self.graph = self.graph.compacted();
                format!("顶点已重新编号为 0..{}", self.graph.vertex_count())
            }

            _ => {
                return Ok(CommandResult::Error(format!(
                    "未知命令: {}。输入 'help' 查看帮助。",
                    cmd
                )))
            }
        };

        Ok(CommandResult::Message(message))
    }

    /// weight <起点> <终点> [权重]
    fn weight(&mut self, args: &[&str]) -> Result<String> {
        let usage = "weight <起点> <终点> [权重]";
        match args {
            [from, to] => {
                let (from, to) = (parse_vertex(from)?, parse_vertex(to)?);
                let edge = self
                    .graph
                    .get_edge(from, to)?
                    .ok_or_else(|| Error::NotFound(format!("边 {} -> {}", from, to)))?;
                Ok(format!("{}", edge))
            }
            [from, to, weight] => {
                let (from, to) = (parse_vertex(from)?, parse_vertex(to)?);
                let weight = parse_number(weight)?;
                let old = self.graph.set_edge_weight(from, to, weight)?;
                Ok(format!("边 {} -> {} 的权重: {} -> {}", from, to, old, weight))
            }
            _ => Err(usage_error(usage)),
        }
    }
}

fn usage_error(usage: &str) -> Error {
    Error::InvalidArgument(format!("用法: {}", usage))
}

/// 取恰好 N 个参数
fn expect_args<'a, const N: usize>(args: &[&'a str], usage: &str) -> Result<[&'a str; N]> {
    <[&'a str; N]>::try_from(args).map_err(|_| usage_error(usage))
}

/// 取恰好 N 个顶点 ID 参数
fn vertex_args<const N: usize>(args: &[&str], usage: &str) -> Result<[VertexId; N]> {
    let raw = expect_args::<N>(args, usage)?;
    let mut ids = [VertexId::new(0); N];
    for (slot, raw) in ids.iter_mut().zip(raw) {
        *slot = parse_vertex(raw)?;
    }
    Ok(ids)
}

fn parse_vertex(raw: &str) -> Result<VertexId> {
    raw.parse::<u64>()
        .map(VertexId::new)
        .map_err(|_| Error::ParseError(format!("无效的顶点 ID: {}", raw)))
}

fn parse_number<T: FromStr>(raw: &str) -> Result<T> {
    raw.parse::<T>()
        .map_err(|_| Error::ParseError(format!("无效的数字: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_support::{assert_consistent, vid};
    use tempfile::TempDir;

    fn session_with(commands: &[&str]) -> Session {
        let mut session = Session::default();
        for cmd in commands {
            let result = session.execute(cmd);
            assert!(
                matches!(result, CommandResult::Message(_)),
                "{} 失败: {:?}",
                cmd,
                result
            );
        }
        session
    }

    fn message(result: CommandResult) -> String {
        match result {
            CommandResult::Message(msg) => msg,
            other => panic!("期望消息, 实际 {:?}", other),
        }
    }

    fn error(result: CommandResult) -> String {
        match result {
            CommandResult::Error(msg) => msg,
            other => panic!("期望错误, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_blank_and_exit() {
        let mut session = Session::default();
        assert_eq!(session.execute("   "), CommandResult::Continue);
        assert_eq!(session.execute("QUIT"), CommandResult::Exit);
        assert_eq!(session.execute("q"), CommandResult::Exit);
    }

    #[test]
    fn test_build_and_query() {
        let mut session = session_with(&[
            "add-vertex 0",
            "add-vertex 1",
            "add-vertex 2",
            "add-edge 0 1 5",
            "add-edge 1 2 3",
        ]);

        assert_eq!(session.graph().edge_count(), 2);
        assert!(message(session.execute("edge 0 1")).starts_with("存在"));
        assert!(message(session.execute("edge 1 0")).starts_with("不存在"));
        assert!(message(session.execute("connected 1 0")).starts_with("相连"));
        assert_eq!(message(session.execute("vertex 1")), "顶点 1: 入度 1, 出度 1");

        let path = message(session.execute("cost 0 2"));
        assert!(path.contains("0 -> 1 -> 2"));
        assert!(path.contains('8'));
        assert!(message(session.execute("path 0 2")).contains("0 -> 1 -> 2"));
    }

    #[test]
    fn test_errors_keep_session_alive() {
        let mut session = session_with(&["add-vertex 0"]);

        assert!(error(session.execute("add-vertex 0")).contains("顶点已存在"));
        assert!(error(session.execute("add-edge 0 9 1")).contains("无效的顶点"));
        assert!(error(session.execute("add-edge 0 x 1")).contains("无效的顶点 ID"));
        assert!(error(session.execute("path 0")).contains("用法"));
        assert!(error(session.execute("vertex 5")).contains("顶点不存在"));
        assert!(error(session.execute("frobnicate")).starts_with("未知命令"));

        assert!(matches!(session.execute("stats"), CommandResult::Message(_)));
    }

    #[test]
    fn test_weight_show_and_update() {
        let mut session = session_with(&["add-vertex 0", "add-vertex 1", "add-edge 0 1 5"]);

        assert!(message(session.execute("weight 0 1")).contains("weight=5"));
        assert_eq!(
            message(session.execute("weight 0 1 -2")),
            "边 0 -> 1 的权重: 5 -> -2"
        );
        assert!(error(session.execute("cost 0 1")).contains("负数"));
        assert!(error(session.execute("weight 1 0")).contains("未找到"));
    }

    #[test]
    fn test_remove_and_compact() {
        let mut session = session_with(&[
            "add-vertex 0",
            "add-vertex 1",
            "add-vertex 2",
            "add-edge 0 1 1",
            "add-edge 1 2 1",
            "add-edge 2 0 1",
        ]);

        assert_eq!(
            message(session.execute("remove-vertex 1")),
            "已删除顶点 1 及 2 条关联边"
        );
        assert!(!session.graph().contains_vertex(vid(1)));

        message(session.execute("compact"));
        assert!(session.graph().is_dense());
        assert!(session.graph().find_directed_edge(vid(1), vid(0)).is_some());
        assert_consistent(session.graph());
    }

    #[test]
    fn test_save_load_and_generate() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("graph.txt");
        let file = file.to_string_lossy();

        let mut session = Session::new(SessionConfig {
            json_output: true,
            generator: GeneratorConfig {
                seed: Some(11),
                ..GeneratorConfig::default()
            },
        });
        message(session.execute("generate 10 25"));
        message(session.execute(&format!("save {}", file)));

        let mut other = Session::default();
        message(other.execute(&format!("load {}", file)));
        assert_eq!(other.graph().vertex_count(), 10);
        assert_eq!(other.graph().edge_count(), 25);

        let stats: serde_json::Value =
            serde_json::from_str(&message(session.execute("stats"))).unwrap();
        assert_eq!(stats["edges"], 25);

        assert!(error(session.execute("generate 0 1")).contains("无效的参数"));
    }

    #[test]
    fn test_oversized_inputs_keep_session_alive() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("corrupt.txt");
        std::fs::write(&file, "9999999999 0\n").unwrap();

        let mut session = session_with(&["add-vertex 0"]);
        let msg = error(session.execute(&format!("load {}", file.to_string_lossy())));
        assert!(msg.contains("文件内容损坏"));
        assert!(error(session.execute("generate 9999999999 0")).contains("上限"));

        // 出错后原来的图保持不变
        assert_eq!(session.graph().vertex_count(), 1);
        assert!(matches!(session.execute("stats"), CommandResult::Message(_)));
    }

    #[test]
    fn test_incident_edges() {
        let mut session = Session::new(SessionConfig {
            json_output: true,
            ..SessionConfig::default()
        });
        for cmd in ["add-vertex 0", "add-vertex 1", "add-edge 0 1 7", "add-edge 1 1 2"] {
            message(session.execute(cmd));
        }

        let inbound: serde_json::Value =
            serde_json::from_str(&message(session.execute("inbound 1"))).unwrap();
        assert_eq!(inbound.as_array().map(Vec::len), Some(2));

        let outbound: serde_json::Value =
            serde_json::from_str(&message(session.execute("outbound 0"))).unwrap();
        assert_eq!(outbound[0]["weight"], 7);

        assert!(error(session.execute("outbound 4")).contains("顶点不存在"));
    }
}
