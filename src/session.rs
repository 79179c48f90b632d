//! Session state shared across shell turns.
//!
//! A `Session` keeps one compiler and one interpreter alive so names bound in
//! one turn are visible in the next. Every turn is all-or-nothing: a failing
//! turn leaves the session as it was before the turn started.

use ahash::AHashMap;

use crate::ast::Module;
use crate::bytecode::{disassemble, CodeObject, Compiler, VM};
use crate::error::PyvmError;
use crate::interpreter::{Interpreter, Value};
use crate::ExecutionMode;

/// Per-session configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub mode: ExecutionMode,
    /// Print the accumulated bytecode after each turn (honored by the shell).
    pub disassemble: bool,
}

pub struct Session {
    compiler: Compiler,
    interpreter: Interpreter,
    last_code: Option<CodeObject>,
    /// Global namespace left by the last successful VM run.
    vm_globals: AHashMap<String, Value>,
    options: SessionOptions,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            compiler: Compiler::new(),
            interpreter: Interpreter::new(),
            last_code: None,
            vm_globals: AHashMap::new(),
            options,
        }
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    /// Run one turn.
    ///
    /// The bytecode path compiles `module` onto the accumulated program and
    /// replays the whole program on a fresh VM. The tree-walk path evaluates
    /// only `module` against the persistent environment. Both surface the
    /// value of the last bare expression executed so far.
    pub fn run_turn(&mut self, module: &Module) -> Result<Option<Value>, PyvmError> {
        let checkpoint = self.compiler.checkpoint();
        let snapshot = self.interpreter.clone();
        let previous_code = self.last_code.clone();
        let previous_globals = self.vm_globals.clone();

        let result = self.dispatch(module);
        if let Err(e) = &result {
            log::debug!("turn failed, restoring session: {}", e);
            self.compiler.rollback(checkpoint);
            self.interpreter = snapshot;
            self.last_code = previous_code;
            self.vm_globals = previous_globals;
        }
        result
    }

    fn dispatch(&mut self, module: &Module) -> Result<Option<Value>, PyvmError> {
        match self.options.mode {
            ExecutionMode::TreeWalk => Ok(self.interpreter.evaluate(module)?),
            ExecutionMode::Bytecode => self.run_bytecode(module),
            ExecutionMode::Differential => {
                let vm = self.run_bytecode(module)?;
                let tree = self.interpreter.evaluate(module)?;
                let agree = match (&vm, &tree) {
                    (Some(a), Some(b)) => a.same_as(b),
                    (None, None) => true,
                    _ => false,
                };
                if !agree {
                    return Err(PyvmError::divergence(&vm, &tree));
                }
                Ok(vm)
            }
        }
    }

    fn run_bytecode(&mut self, module: &Module) -> Result<Option<Value>, PyvmError> {
        let code = self.compiler.compile(module)?;
        let frame = VM::new(code.clone()).execute();
        self.last_code = Some(code);
        let frame = frame?;
        let result = frame.top().cloned();
        self.vm_globals = frame.globals;
        Ok(result)
    }

    /// Bindings visible to the next turn, sorted by name.
    ///
    /// Bytecode and differential sessions report the VM's namespace; tree-walk
    /// sessions report the interpreter's.
    pub fn variables(&self) -> Vec<(String, Value)> {
        let mut vars: Vec<(String, Value)> = match self.options.mode {
            ExecutionMode::TreeWalk => {
                let env = self.interpreter.environment();
                env.var_names()
                    .into_iter()
                    .filter_map(|name| env.get(&name).cloned().map(|v| (name, v)))
                    .collect()
            }
            ExecutionMode::Bytecode | ExecutionMode::Differential => self
                .vm_globals
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        };
        vars.sort_by(|a, b| a.0.cmp(&b.0));
        vars
    }

    /// The code object produced by the last successful bytecode turn.
    pub fn last_code(&self) -> Option<&CodeObject> {
        self.last_code.as_ref()
    }

    pub fn disassemble_last(&self) -> Option<String> {
        self.last_code.as_ref().map(disassemble)
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Forget every binding and all compiled code.
    pub fn reset(&mut self) {
        self.compiler.reset();
        self.interpreter.reset();
        self.last_code = None;
        self.vm_globals.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}
