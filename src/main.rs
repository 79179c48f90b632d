//! pyvm CLI: run, disassemble, or drive a session over JSON syntax trees.

use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use mimalloc::MiMalloc;

use pyvm::ast::Module;
use pyvm::error::PyvmError;
use pyvm::repl::SessionRepl;
use pyvm::session::{Session, SessionOptions};
use pyvm::ExecutionMode;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "pyvm", version)]
#[command(about = "Compile and run Python-subset syntax trees on a bytecode VM")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a JSON-encoded module
    Run {
        /// Path to the module JSON
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = Mode::Vm)]
        mode: Mode,

        /// Print the bytecode before the result
        #[arg(long)]
        disassemble: bool,
    },
    /// Print the bytecode for a JSON-encoded module
    Disassemble {
        /// Path to the module JSON
        file: PathBuf,
    },
    /// Read one JSON module per line from stdin, keeping bindings between lines
    Session {
        #[arg(long, value_enum, default_value_t = Mode::Vm)]
        mode: Mode,

        /// Print the accumulated bytecode after each line
        #[arg(long)]
        disassemble: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// Tree-walking interpreter
    Tree,
    /// Bytecode VM
    Vm,
    /// Both engines, failing on disagreement
    Diff,
}

impl From<Mode> for ExecutionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Tree => ExecutionMode::TreeWalk,
            Mode::Vm => ExecutionMode::Bytecode,
            Mode::Diff => ExecutionMode::Differential,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = match cli.command {
        Command::Run {
            file,
            mode,
            disassemble,
        } => run_file(&file, mode.into(), disassemble),
        Command::Disassemble { file } => disassemble_file(&file),
        Command::Session { mode, disassemble } => run_session(SessionOptions {
            mode: mode.into(),
            disassemble,
        }),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(exit_code(&e));
    }
}

fn load_module(path: &Path) -> Result<Module, PyvmError> {
    let json = fs::read_to_string(path)?;
    Ok(Module::from_json(&json)?)
}

fn run_file(path: &Path, mode: ExecutionMode, disassemble: bool) -> Result<(), PyvmError> {
    let module = load_module(path)?;
    let mut session = Session::new(SessionOptions { mode, disassemble });
    let result = session.run_turn(&module)?;

    if disassemble {
        if let Some(text) = session.disassemble_last() {
            print!("{}", text);
            println!("---");
        }
    }
    if let Some(value) = result {
        println!("{}", value.repr());
    }
    Ok(())
}

fn disassemble_file(path: &Path) -> Result<(), PyvmError> {
    let module = load_module(path)?;
    let code = pyvm::compile(&module)?;
    print!("{}", pyvm::disassemble(&code));
    Ok(())
}

fn run_session(options: SessionOptions) -> Result<(), PyvmError> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut repl = SessionRepl::new(options).with_prompt(interactive);
    repl.run(stdin.lock(), &mut io::stdout())?;
    Ok(())
}

fn exit_code(error: &PyvmError) -> i32 {
    match error {
        PyvmError::Json(_) | PyvmError::Compile(_) | PyvmError::Decode(_) => 65,
        PyvmError::Io(_) => 74,
        PyvmError::Runtime(_) | PyvmError::Divergence { .. } => 70,
    }
}
