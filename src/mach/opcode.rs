use super::Cell;
use crate::error;
use crate::lang::{Error, NOP_COLUMN};
use std::convert::TryFrom;

/// ## Virtual machine instruction set
///
/// Thirty primitives, none with an operand. `lit` is the exception that
/// proves the rule: it consumes the following cell as data.
///
/// Four opcodes share each cell, one per byte, executed low byte first.
/// For example `i liadre..` is `[Lit, Add, Ret, Nop]` and packs to
/// `0x000A_1101`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    // *** Stack manipulation
    Nop,
    /// Push the next cell and skip over it.
    Lit,
    Dup,
    Drop,
    Swap,
    /// Move top of stack to the address stack.
    Push,
    /// Move top of address stack to the stack.
    Pop,

    // *** Branch control
    Jump,
    Call,
    /// Call if the flag below the target is non-zero.
    Ccall,
    Ret,

    // *** Comparison, -1 for true and 0 for false
    Eq,
    Neq,
    Lt,
    Gt,

    // *** Memory
    /// Read a cell, or a machine property for the negative selectors.
    Fetch,
    Store,

    // *** Arithmetic
    Add,
    Sub,
    Mul,
    /// Leaves remainder below quotient.
    Div,
    And,
    Or,
    Xor,
    Shift,

    // *** Termination
    /// Return when top of stack is zero.
    Zret,
    Halt,

    // *** Devices
    Ienum,
    Iquery,
    Iinvoke,
}

/// Four raw opcode bytes in execution order.
pub type Word = [u8; 4];

impl Opcode {
    pub const ALL: [Opcode; 30] = [
        Opcode::Nop,
        Opcode::Lit,
        Opcode::Dup,
        Opcode::Drop,
        Opcode::Swap,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Jump,
        Opcode::Call,
        Opcode::Ccall,
        Opcode::Ret,
        Opcode::Eq,
        Opcode::Neq,
        Opcode::Lt,
        Opcode::Gt,
        Opcode::Fetch,
        Opcode::Store,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Shift,
        Opcode::Zret,
        Opcode::Halt,
        Opcode::Ienum,
        Opcode::Iquery,
        Opcode::Iinvoke,
    ];

    pub fn mnemonic(self) -> &'static str {
        use Opcode::*;
        match self {
            Nop => "nop",
            Lit => "lit",
            Dup => "dup",
            Drop => "drop",
            Swap => "swap",
            Push => "push",
            Pop => "pop",
            Jump => "jump",
            Call => "call",
            Ccall => "ccall",
            Ret => "ret",
            Eq => "eq",
            Neq => "neq",
            Lt => "lt",
            Gt => "gt",
            Fetch => "fetch",
            Store => "store",
            Add => "add",
            Sub => "sub",
            Mul => "mul",
            Div => "div",
            And => "and",
            Or => "or",
            Xor => "xor",
            Shift => "shift",
            Zret => "zret",
            Halt => "halt",
            Ienum => "ienum",
            Iquery => "iquery",
            Iinvoke => "iinvoke",
        }
    }

    /// Two-letter form used in `i` lines.
    pub fn prefix(self) -> &'static str {
        &self.mnemonic()[..2]
    }

    /// Resolve an assembler column. Every mnemonic registers its prefix in
    /// table order, so if two ever shared one the later would win. `..`
    /// is an alias for `nop`.
    pub fn from_prefix(prefix: &str) -> Option<Opcode> {
        if prefix == NOP_COLUMN {
            return Some(Opcode::Nop);
        }
        Opcode::ALL
            .iter()
            .rev()
            .find(|op| op.prefix() == prefix)
            .copied()
    }
}

impl TryFrom<u8> for Opcode {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Opcode, Error> {
        match Opcode::ALL.get(byte as usize) {
            Some(op) => Ok(*op),
            None => Err(error!(InvalidOpcode; format!("{}", byte))),
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Pack four opcode bytes into one cell, byte 0 in the low bits.
pub fn pack(word: Word) -> Cell {
    i32::from_le_bytes(word)
}

/// Split a cell into its four opcode bytes, byte 0 from the low bits.
pub fn unpack(cell: Cell) -> Word {
    cell.to_le_bytes()
}
