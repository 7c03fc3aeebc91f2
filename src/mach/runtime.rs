use super::operation::Operation;
use super::{
    unpack, Address, Assembler, Cell, Config, Dictionary, Image, Memory, Opcode, Stack, HALT_IP,
};
use crate::error;
use crate::lang::{fenced, tokens, Error};
use std::convert::TryFrom;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Result<T> = std::result::Result<T, Error>;

/// Everything a primitive may touch during one invocation.
pub struct Context {
    pub memory: Memory,
    pub stack: Stack<Cell>,
    pub address: Stack<Cell>,
    pub ip: i64,
    /// Characters sent to the console device, not yet collected.
    pub output: String,
}

/// ## Execution engine and interpret driver
///
/// One invocation runs at a time and always to completion: a sentinel
/// zero goes on the address stack, and the invocation is done when a
/// return drains it. `halt` ends it early by parking the instruction
/// pointer at `HALT_IP`; a later sub-op in the same cell may still move
/// it. Passing the instruction pointer ceiling any other way is a fault.

pub struct Runtime {
    ctx: Context,
    config: Config,
    interpret: Option<Address>,
    interrupted: Arc<AtomicBool>,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new(Config::default())
    }
}

impl Runtime {
    pub fn new(config: Config) -> Runtime {
        let memory = Memory::new(config.capacity);
        Runtime::with_memory(memory, config)
    }

    pub fn with_memory(memory: Memory, config: Config) -> Runtime {
        Runtime {
            ctx: Context {
                memory,
                stack: Stack::new("DATA STACK", config.stack_limit),
                address: Stack::new("ADDRESS STACK", config.stack_limit),
                ip: 0,
                output: String::new(),
            },
            config,
            interpret: None,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn memory(&self) -> &Memory {
        &self.ctx.memory
    }

    pub fn set_memory(&mut self, memory: Memory) {
        self.interpret = None;
        self.ctx.memory = memory;
    }

    pub fn load_image<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let memory = Image::load(path, self.config.capacity)?;
        self.set_memory(memory);
        Ok(())
    }

    pub fn save_image<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        Image::save(&self.ctx.memory, path)
    }

    pub fn dictionary(&self) -> Dictionary<'_> {
        Dictionary::new(&self.ctx.memory)
    }

    /// Header address for `name`, or 0 when it is not defined.
    pub fn find_entry(&self, name: &str) -> Result<Address> {
        self.dictionary().find(name)
    }

    pub fn stack(&self) -> &[Cell] {
        self.ctx.stack.as_slice()
    }

    pub fn push(&mut self, value: Cell) -> Result<()> {
        self.ctx.stack.push(value)
    }

    pub fn pop(&mut self) -> Result<Cell> {
        self.ctx.stack.pop()
    }

    pub fn address_depth(&self) -> usize {
        self.ctx.address.len()
    }

    /// Console output since the last call.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.ctx.output)
    }

    /// Set this from another thread to stop the running invocation.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        self.interrupted.clone()
    }

    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    /// Run the code at `word` until its outermost return or a `halt`.
    /// The address stack is left empty whatever the outcome, so a fault
    /// cannot leak return addresses into the next invocation.
    pub fn execute(&mut self, word: Address) -> Result<()> {
        self.ctx.ip = word as i64;
        let result = match self.ctx.address.push(0) {
            Ok(()) => self.run(),
            Err(e) => Err(e),
        };
        self.ctx.address.clear();
        if let Err(e) = &result {
            log::warn!("{}", e);
        }
        result
    }

    fn run(&mut self) -> Result<()> {
        loop {
            if self.ctx.address.is_empty() {
                return Ok(());
            }
            let ip = self.ctx.ip;
            if ip >= HALT_IP {
                return Ok(());
            }
            if ip >= self.config.ip_ceiling {
                return Err(error!(RunawayExecution; format!("IP {}", ip)));
            }
            if self.interrupted.swap(false, Ordering::SeqCst) {
                return Err(error!(Break; format!("IP {}", ip)));
            }
            let cell = self.ctx.memory.fetch(ip)?;
            for byte in unpack(cell).iter() {
                let at = ip as Address;
                let op = Opcode::try_from(*byte).map_err(|e| e.at_address(at))?;
                Operation::dispatch(&mut self.ctx, op).map_err(|e| e.at_address(at))?;
            }
            self.ctx.ip += 1;
        }
    }

    /// Code field of the resident `interpret` word.
    fn interpret_entry(&mut self) -> Result<Address> {
        if let Some(entry) = self.interpret {
            return Ok(entry);
        }
        let entry = self.dictionary().code_field("interpret")?;
        self.interpret = Some(entry);
        Ok(entry)
    }

    /// Hand one token to `interpret` through the scratch buffer.
    pub fn interpret(&mut self, token: &str) -> Result<()> {
        let entry = self.interpret_entry()?;
        let scratch = self.config.scratch;
        self.ctx.memory.inject_string(token, scratch)?;
        self.ctx.stack.push(scratch as Cell)?;
        self.execute(entry)
    }

    /// One line of operator input. Tokens run in order; the first fault
    /// abandons the rest of the line.
    pub fn enter(&mut self, line: &str) -> Result<()> {
        for token in tokens(line) {
            self.interpret(token)?;
        }
        Ok(())
    }

    /// Same as `enter`, but console output goes to `flush` after every
    /// token instead of waiting for the whole line.
    pub fn enter_with<F>(&mut self, line: &str, mut flush: F) -> Result<()>
    where
        F: FnMut(&str) -> std::io::Result<()>,
    {
        for token in tokens(line) {
            let result = self.interpret(token);
            let output = self.take_output();
            if !output.is_empty() {
                if let Err(error) = flush(&output) {
                    return Err(error!(InternalError; error.to_string()));
                }
            }
            result?;
        }
        Ok(())
    }

    /// Build from fenced source. Blank memory is assembled from it;
    /// otherwise every whitespace-delimited token inside the fences is
    /// fed to the resident `interpret`.
    pub fn build(&mut self, source: &str) -> Result<()> {
        if self.ctx.memory.is_blank() {
            let memory = Assembler::new(self.config.capacity).assemble(source)?;
            log::info!(
                "assembled {} cells, crc32 {:08x}",
                memory.populated(),
                memory.checksum()
            );
            self.set_memory(memory);
            return Ok(());
        }
        for (number, text) in fenced(source) {
            log::trace!("{:04} {}", number, text);
            for token in text.split_whitespace() {
                if let Err(e) = self.interpret(token) {
                    return Err(e.in_line_number(number));
                }
            }
        }
        Ok(())
    }

    pub fn build_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let mut source = String::new();
        let mut file = super::image::open(path.as_ref())?;
        if let Err(error) = file.read_to_string(&mut source) {
            return Err(error!(InternalError; error.to_string()));
        }
        self.build(&source)
    }
}
