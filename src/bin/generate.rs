//! pathgraph 随机图生成工具
//!
//! 生成随机有向带权图并写入文本文件

use anyhow::Context;
use clap::Parser;
use pathgraph::generator::{GeneratorConfig, RandomGraphGenerator};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "pathgraph-gen")]
#[command(about = "pathgraph 随机图生成工具")]
struct Args {
    /// 顶点数
    #[arg(short = 'n', long)]
    vertices: u64,

    /// 边数
    #[arg(short = 'm', long)]
    edges: u64,

    /// 输出文件路径
    #[arg(short, long)]
    output: PathBuf,

    /// 随机种子
    #[arg(short, long)]
    seed: Option<u64>,

    /// 权重上限（不含）
    #[arg(short = 'w', long, default_value = "500")]
    max_weight: i64,

    /// 禁止自环
    #[arg(long)]
    no_self_loops: bool,

    /// 日志级别 (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    pathgraph::logging::init(args.verbose);

    println!("pathgraph 随机图生成工具");
    println!("========================");
    println!("顶点数: {}", args.vertices);
    println!("边数: {}", args.edges);
    println!("权重上限: {}", args.max_weight);
    if let Some(seed) = args.seed {
        println!("随机种子: {}", seed);
    }

    let started = Instant::now();
    let mut generator = RandomGraphGenerator::new(GeneratorConfig {
        max_weight: args.max_weight,
        seed: args.seed,
        allow_self_loops: !args.no_self_loops,
    });
    let graph = generator
        .generate(args.vertices, args.edges)
        .context("生成随机图失败")?;

    graph
        .save(&args.output)
        .with_context(|| format!("无法写入 {}", args.output.display()))?;

    println!("\n生成完成!");
    println!("  输出文件: {}", args.output.display());
    println!("  耗时: {} ms", started.elapsed().as_millis());

    Ok(())
}
