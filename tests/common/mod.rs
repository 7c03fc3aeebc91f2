#![allow(dead_code)]
use pow4th::mach::{Assembler, Config, Runtime};

/// Assemble `body` inside fences into a small machine.
pub fn machine(body: &str) -> Runtime {
    machine_n(body, 256)
}

pub fn machine_n(body: &str, capacity: usize) -> Runtime {
    let config = Config::default().with_capacity(capacity);
    let memory = Assembler::new(capacity)
        .assemble(&format!("~~~\n{}\n~~~\n", body))
        .unwrap();
    Runtime::with_memory(memory, config)
}

/// A resident dictionary holding `dup` and an `interpret` that echoes
/// every character of the token it is handed.
pub const FORTH: &str = "
~~~
d 0
d 0
r latest

:interpret
i dufedu..
i lieqli..
d 0
r done
i cc......
i liii....
d 0
i liadli..
d 1
r interpret
i ju......
:done
i podrdrdr
i re......

:dup_code
i dure....

:h_dup
d 0
r dup_code
d 0
s dup

:latest
r h_dup
r interpret
d 0
s interpret
~~~
";

pub fn forth() -> Runtime {
    let config = Config::default().with_capacity(2048);
    let memory = Assembler::new(config.capacity).assemble(FORTH).unwrap();
    Runtime::with_memory(memory, config)
}
