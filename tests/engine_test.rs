mod common;
use common::*;
use pow4th::lang::ErrorCode;
use pow4th::mach::{Assembler, Config, Runtime};

#[test]
fn test_jump_to_halt() {
    let capacity = 64;
    let mut assembler = Assembler::new(capacity);
    let memory = assembler
        .assemble("~~~\ni ..ju..\n:start\ni ha......\n~~~")
        .unwrap();
    let start = assembler.link().get("start").unwrap();
    assert_eq!(start, 1);
    let mut r = Runtime::with_memory(memory, Config::default().with_capacity(capacity));
    r.push(start as i32).unwrap();
    r.execute(0).unwrap();
    assert!(r.stack().is_empty());
    assert_eq!(r.address_depth(), 0);
}

#[test]
fn test_find_and_run_dup() {
    let mut r = forth();
    let header = r.find_entry("dup").unwrap();
    assert_ne!(header, 0);
    let code = r.memory().get(header + 1).unwrap() as usize;
    r.push(5).unwrap();
    r.execute(code).unwrap();
    assert_eq!(r.stack(), &[5, 5]);
    assert_eq!(r.pop().unwrap(), 5);
    assert_eq!(r.stack(), &[5]);
    assert_eq!(r.find_entry("swap").unwrap(), 0);
}

#[test]
fn test_transmit_character() {
    let mut r = machine("i ii......\ni re......");
    r.push(65).unwrap();
    r.push(0).unwrap();
    r.execute(0).unwrap();
    assert_eq!(r.take_output(), "A");
    assert!(r.stack().is_empty());
    assert_eq!(r.take_output(), "");
}

#[test]
fn test_dictionary_words() {
    let r = forth();
    let names: Vec<String> = r
        .dictionary()
        .words()
        .unwrap()
        .into_iter()
        .map(|h| h.name)
        .collect();
    assert_eq!(names, vec!["interpret", "dup"]);
}

#[test]
fn test_faults_do_not_poison_the_machine() {
    let mut r = machine("i dr......\n:ok\ni lire....\nd 9");
    assert!(r.execute(0).unwrap_err().is(ErrorCode::StackUnderflow));
    assert_eq!(r.address_depth(), 0);
    r.execute(1).unwrap();
    assert_eq!(r.stack(), &[9]);
}
