/*!
## Rust Machine Module

This Rust module is the POW4TH virtual machine: a flat cell memory, two
stacks, thirty primitive instructions packed four to a cell, and the
assembler that builds images for it.

*/

/// One machine cell. Images store cells as 32-bit little-endian integers.
pub type Cell = i32;
/// A cell index into memory.
pub type Address = usize;

/// Bytes per cell in a binary image.
pub const CELL_WIDTH: usize = 4;
/// Holds the address of the newest dictionary header.
pub const DICTIONARY_ROOT: Address = 2;
/// Where operator tokens are written before calling `interpret`.
pub const SCRATCH: Address = 1025;
pub const DEFAULT_CAPACITY: usize = 524_288;
pub const DEFAULT_IP_CEILING: i64 = 100_000;
/// `halt` parks the instruction pointer here, well past any ceiling.
pub const HALT_IP: i64 = 9_000_000;
/// Operator input that ends an interactive session.
pub const BYE: &str = "bye";

mod assemble;
mod config;
mod dictionary;
mod image;
mod link;
mod memory;
mod opcode;
mod operation;
mod runtime;
mod stack;

pub use assemble::Assembler;
pub use config::Config;
pub use dictionary::{Dictionary, Header};
pub use image::Image;
pub use link::Link;
pub use memory::Memory;
pub use opcode::{pack, unpack, Opcode, Word};
pub use runtime::Runtime;
pub use stack::Stack;

#[cfg(test)]
mod tests;
