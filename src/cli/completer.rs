//! 命令补全器
//!
//! 基于 rustyline 实现命令名的 Tab 补全

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// 命令列表
pub const COMMANDS: &[&str] = &[
    "help", "quit", "exit", "stats", "count",
    "vertices", "edges", "vertex", "inbound", "outbound",
    "edge", "connected", "weight",
    "add-vertex", "remove-vertex", "add-edge", "remove-edge",
    "path", "cost",
    "save", "load", "generate", "compact",
];

/// 命令补全器，只补全行首的命令名
#[derive(Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }

    fn candidates(prefix: &str) -> Vec<Pair> {
        let prefix = prefix.to_lowercase();
        COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(&prefix))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect()
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let start = line_to_cursor.len() - line_to_cursor.trim_start().len();
        let word = &line_to_cursor[start..];

        // 命令之后是参数，不补全
        if word.contains(char::is_whitespace) {
            return Ok((pos, vec![]));
        }

        Ok((start, Self::candidates(word)))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|p| p.replacement).collect()
    }

    #[test]
    fn test_candidates() {
        assert_eq!(
            names(CommandCompleter::candidates("re")),
            vec!["remove-vertex", "remove-edge"]
        );
        assert_eq!(
            names(CommandCompleter::candidates("CO")),
            vec!["count", "connected", "cost", "compact"]
        );
        assert!(CommandCompleter::candidates("xyz").is_empty());
    }

    #[test]
    fn test_commands_are_dispatched() {
        let mut session = crate::cli::Session::default();
        for cmd in COMMANDS {
            let result = session.execute(cmd);
            assert!(
                !matches!(&result, crate::cli::CommandResult::Error(msg) if msg.starts_with("未知命令")),
                "{} 未被识别",
                cmd
            );
        }
    }
}
