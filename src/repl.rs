//! Line-oriented shell over a [`Session`].
//!
//! Each input line is one JSON-encoded module from an external parser, or a
//! dot command. Results are echoed with `repr`; errors are reported and the
//! shell keeps going.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::ast::Module;
use crate::session::{Session, SessionOptions};

pub struct SessionRepl {
    session: Session,
    prompt: bool,
}

impl SessionRepl {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            session: Session::new(options),
            prompt: false,
        }
    }

    /// Print a prompt before each line (for interactive input).
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            if self.prompt {
                write!(out, ">>> ")?;
                out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if matches!(line, "exit" | ".exit" | "quit" | ".quit") {
                break;
            }
            if line.starts_with('.') {
                self.handle_command(line, out)?;
            } else {
                self.execute_line(line, out)?;
            }
        }
        Ok(())
    }

    fn handle_command<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<()> {
        match line {
            ".help" => {
                writeln!(out, "Enter one JSON module per line.")?;
                writeln!(out, "  .vars    list bindings of the active engine")?;
                writeln!(out, "  .dis     disassemble the accumulated bytecode")?;
                writeln!(out, "  .reset   forget all bindings and code")?;
                writeln!(out, "  .exit    leave the shell")?;
            }
            ".vars" => {
                let vars = self.session.variables();
                if vars.is_empty() {
                    writeln!(out, "No variables defined.")?;
                }
                for (name, value) in vars {
                    writeln!(out, "  {} = {}", name, value.repr())?;
                }
            }
            ".dis" => match self.session.disassemble_last() {
                Some(text) => write!(out, "{}", text)?,
                None => writeln!(out, "No bytecode yet.")?,
            },
            ".reset" | ".clear" => {
                self.session.reset();
                writeln!(out, "Session reset.")?;
            }
            _ => writeln!(
                out,
                "Unknown command: {}. Type .help for available commands.",
                line
            )?,
        }
        Ok(())
    }

    fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<()> {
        let module = match Module::from_json(line) {
            Ok(module) => module,
            Err(e) => {
                writeln!(out, "{} {}", "Error:".red(), e)?;
                return Ok(());
            }
        };
        match self.session.run_turn(&module) {
            Ok(Some(value)) => writeln!(out, "{}", value.repr())?,
            Ok(None) => {}
            Err(e) => writeln!(out, "{} {}", "Error:".red(), e)?,
        }
        if self.session.options().disassemble {
            if let Some(text) = self.session.disassemble_last() {
                write!(out, "{}", text.dimmed())?;
            }
        }
        Ok(())
    }
}
