//! pathgraph CLI 工具
//!
//! 交互式命令行界面

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use pathgraph::cli::{CommandCompleter, CommandResult, Session, SessionConfig};
use pathgraph::graph::Graph;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pathgraph-cli")]
#[command(about = "pathgraph 命令行工具")]
struct Args {
    /// 启动时加载的图文件
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// 执行单条命令后退出
    #[arg(short = 'e', long)]
    execute: Option<String>,

    /// 以 JSON 输出结果
    #[arg(long)]
    json: bool,

    /// 日志级别 (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    pathgraph::logging::init(args.verbose);

    let graph = match &args.file {
        Some(path) => {
            Graph::load(path).with_context(|| format!("无法加载图文件 {}", path.display()))?
        }
        None => Graph::new(),
    };

    let config = SessionConfig {
        json_output: args.json,
        ..SessionConfig::default()
    };
    let mut session = Session::with_graph(graph, config);

    // 单条命令模式
    if let Some(command) = args.execute {
        return match session.execute(&command) {
            CommandResult::Error(msg) => Err(anyhow::anyhow!(msg)),
            result => {
                report(&result);
                Ok(())
            }
        };
    }

    println!("pathgraph CLI {}", pathgraph::VERSION);
    println!(
        "当前图: {} 个顶点, {} 条边",
        session.graph().vertex_count(),
        session.graph().edge_count()
    );
    println!("\n输入 'help' 查看命令列表，'quit' 退出\n");

    let mut editor: Editor<CommandCompleter, DefaultHistory> =
        Editor::new().context("无法初始化行编辑器")?;
    editor.set_helper(Some(CommandCompleter::new()));

    let history = history_path();
    if let Some(path) = &history {
        // 首次运行时历史文件不存在
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("pathgraph> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                let result = session.execute(line);
                if result == CommandResult::Exit {
                    break;
                }
                report(&result);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("读取输入失败"),
        }
    }

    if let Some(path) = &history {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        editor.save_history(path).context("无法保存命令历史")?;
    }

    println!("再见！");
    Ok(())
}

fn report(result: &CommandResult) {
    match result {
        CommandResult::Message(msg) => println!("{}", msg),
        CommandResult::Error(msg) => eprintln!("{} {}", "错误:".red().bold(), msg),
        CommandResult::Continue | CommandResult::Exit => {}
    }
}

fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("pathgraph").join("history.txt"))
}
