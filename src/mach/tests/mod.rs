use crate::lang::{Error, ErrorCode};
use crate::mach::{pack, unpack, Assembler, Cell, Config, Opcode, Runtime};


/// Assemble `body` inside fences and start at address 0 with `stack`.
fn run(body: &str, stack: &[Cell]) -> Runtime {
    let mut r = machine(body);
    for v in stack {
        r.push(*v).unwrap();
    }
    r.execute(0).unwrap();
    r
}

fn run_err(body: &str, stack: &[Cell]) -> Error {
    let mut r = machine(body);
    for v in stack {
        r.push(*v).unwrap();
    }
    let error = r.execute(0).unwrap_err();
    assert_eq!(r.address_depth(), 0);
    error
}

fn machine(body: &str) -> Runtime {
    let config = Config::default().with_capacity(256);
    let memory = Assembler::new(config.capacity)
        .assemble(&format!("~~~\n{}\n~~~\n", body))
        .unwrap();
    Runtime::with_memory(memory, config)
}

#[test]
fn test_pack_unpack() {
    for word in &[[0, 0, 0, 0], [1, 17, 10, 0], [29, 28, 27, 26], [7, 0, 0, 29]] {
        assert_eq!(unpack(pack(*word)), *word);
    }
    assert_eq!(pack([1, 17, 10, 0]), 0x000A_1101);
}

#[test]
fn test_opcode_bytes_match_table() {
    for (index, op) in Opcode::ALL.iter().enumerate() {
        assert_eq!(*op as usize, index);
    }
}

#[test]
fn test_prefixes_are_unique() {
    for op in Opcode::ALL.iter() {
        assert_eq!(Opcode::from_prefix(op.prefix()), Some(*op));
    }
    assert_eq!(Opcode::from_prefix(".."), Some(Opcode::Nop));
    assert_eq!(Opcode::from_prefix("zr"), Some(Opcode::Zret));
    assert_eq!(Opcode::from_prefix("xx"), None);
}
