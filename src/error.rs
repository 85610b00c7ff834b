//! 错误类型定义

use crate::graph::VertexId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点已存在: {0}")]
    DuplicateVertex(VertexId),

    #[error("边已存在: {from} -> {to}")]
    DuplicateEdge { from: VertexId, to: VertexId },

    #[error("未找到: {0}")]
    NotFound(String),

    #[error("无效的顶点: {0}")]
    InvalidVertex(VertexId),

    #[error("顶点不存在: {0}")]
    VertexNotFound(VertexId),

    #[error("不存在从 {from} 到 {to} 的路径")]
    NoPath { from: VertexId, to: VertexId },

    #[error("边 {from} -> {to} 的权重为负数: {weight}")]
    InvalidWeight {
        from: VertexId,
        to: VertexId,
        weight: i64,
    },

    #[error("从 {from} 到 {to} 的路径总权重超出 i64 范围")]
    WeightOverflow { from: VertexId, to: VertexId },

    #[error("文件内容损坏: {0}")]
    CorruptFile(String),

    #[error("顶点 ID 不连续: 共 {count} 个顶点, 最大 ID 为 {max_id}")]
    SparseVertexIds { count: usize, max_id: u64 },

    #[error("无效的参数: {0}")]
    InvalidArgument(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

