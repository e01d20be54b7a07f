//! REPL command handling, kept apart from terminal I/O.

use crate::interpreter::{Interpreter, TraceMode};
use crate::{parse, render, Result};

/// Prompt shown for each line.
pub const PROMPT: &str = "lispy> ";

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Blank line.
    Empty,
    /// Evaluate source text.
    Eval(&'a str),
    /// `:js <expr>`: translate instead of evaluating.
    Translate(&'a str),
    /// `:ast <expr>`: dump the parsed tree as JSON.
    Ast(&'a str),
    /// `:trace`: toggle step recording.
    Trace,
    /// `:env`: list global bindings.
    Env,
    /// `:help`
    Help,
    /// `:quit`
    Quit,
    /// A `:` command that does not exist.
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(meta) = line.strip_prefix(':') else {
            return Self::Eval(line);
        };
        let (name, rest) = meta
            .split_once(char::is_whitespace)
            .map(|(n, r)| (n, r.trim()))
            .unwrap_or((meta, ""));
        match name {
            "js" => Self::Translate(rest),
            "ast" => Self::Ast(rest),
            "trace" => Self::Trace,
            "env" => Self::Env,
            "help" => Self::Help,
            "quit" | "q" => Self::Quit,
            _ => Self::Unknown(name),
        }
    }
}

/// What the REPL should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print these lines (possibly none) and read the next line.
    Print(Vec<String>),
    Exit,
}

const HELP: &str = "\
Enter an expression such as (+ 1 2) to evaluate it.
  :js <expr>   translate an expression to JavaScript
  :ast <expr>  show the parsed expression tree as JSON
  :trace       toggle step-by-step evaluation trace
  :env         list global bindings
  :quit        exit";

/// Run one command. Errors are returned for the caller to report; the
/// session stays usable afterwards. After a failed evaluation the steps
/// recorded so far are still available from [`Interpreter::take_trace`].
pub fn execute(interp: &mut Interpreter, command: Command<'_>) -> Result<Outcome> {
    let lines = match command {
        Command::Empty => Vec::new(),
        Command::Quit => return Ok(Outcome::Exit),
        Command::Eval(source) => {
            let value = interp.eval_str(source)?;
            let mut lines = interp.take_trace();
            if !value.is_unit() {
                lines.push(value.to_string());
            }
            lines
        }
        Command::Translate(source) => vec![interp.translate_str(source)?],
        Command::Ast(source) => {
            let expr = parse(source)?;
            let json = serde_json::to_string_pretty(&expr)
                .unwrap_or_else(|e| format!("cannot serialize {}: {e}", render(&expr)));
            vec![json]
        }
        Command::Trace => {
            let next = if interp.config().trace == TraceMode::Record {
                TraceMode::Off
            } else {
                TraceMode::Record
            };
            interp.set_trace(next);
            vec![format!("trace {}", if next == TraceMode::Off { "off" } else { "on" })]
        }
        Command::Env => interp.env().names(),
        Command::Help => HELP.lines().map(String::from).collect(),
        Command::Unknown(name) => vec![format!("unknown command :{name} (try :help)")],
    };
    Ok(Outcome::Print(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(Command::parse(" (+ 1 2) "), Command::Eval("(+ 1 2)"));
        assert_eq!(Command::parse(":js (f x)"), Command::Translate("(f x)"));
        assert_eq!(Command::parse(":ast  a"), Command::Ast("a"));
        assert_eq!(Command::parse(":trace"), Command::Trace);
        assert_eq!(Command::parse(":q"), Command::Quit);
        assert_eq!(Command::parse(":bogus 1"), Command::Unknown("bogus"));
    }
}
