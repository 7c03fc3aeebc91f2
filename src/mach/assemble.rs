use super::{pack, Cell, Link, Memory, Opcode, Word};
use crate::error;
use crate::lang::{fenced, Error, Item, Line};

type Result<T> = std::result::Result<T, Error>;

/// ## Two-pass assembler
///
/// Pass one appends cells in line order and records each label at the
/// offset where it was declared; references get a `-1` placeholder.
/// Pass two walks the same lines with a running offset that grows by
/// exactly what pass one emitted and patches every placeholder.

pub struct Assembler {
    capacity: usize,
    link: Link,
}

impl Assembler {
    pub fn new(capacity: usize) -> Assembler {
        Assembler {
            capacity,
            link: Link::new(),
        }
    }

    /// Labels from the last assembly.
    pub fn link(&self) -> &Link {
        &self.link
    }

    pub fn assemble(&mut self, source: &str) -> Result<Memory> {
        self.link.clear();
        let mut lines = vec![];
        for (number, text) in fenced(source) {
            if let Some(line) = Line::new(number, text)? {
                lines.push(line);
            }
        }
        log::trace!("pass 1");
        let mut cells = self.pass_one(&lines)?;
        log::trace!("pass 2");
        self.pass_two(&lines, &mut cells)?;
        Memory::from_cells(cells, self.capacity)
    }

    fn pass_one(&mut self, lines: &[Line]) -> Result<Vec<Cell>> {
        let mut cells: Vec<Cell> = vec![];
        for line in lines {
            log::trace!("{:04} {}", cells.len(), line);
            let end = cells.len().checked_add(line.len());
            if end.map_or(true, |end| end > self.capacity) {
                return Err(error!(OutOfMemory, line.number()));
            }
            match line.item() {
                Item::Instruction(columns) => {
                    let mut word: Word = [0; 4];
                    for (byte, column) in word.iter_mut().zip(columns.iter()) {
                        match Opcode::from_prefix(column) {
                            Some(op) => *byte = op as u8,
                            None => {
                                return Err(error!(UnknownMnemonic, line.number(); column.as_str()))
                            }
                        }
                    }
                    cells.push(pack(word));
                }
                Item::Reference(_) => cells.push(-1),
                Item::Data(n) => cells.push(*n),
                Item::Text(s) => {
                    cells.extend(s.chars().map(|c| c as Cell));
                    cells.push(0);
                }
                Item::Alloc(n) => cells.resize(cells.len() + n, 0),
                Item::Label(name) => self.link.insert(name, cells.len()),
                Item::Other(tag) => log::debug!("line {} ignored, tag {:?}", line.number(), tag),
            }
        }
        Ok(cells)
    }

    fn pass_two(&self, lines: &[Line], cells: &mut [Cell]) -> Result<()> {
        let mut offset = 0;
        for line in lines {
            if let Item::Reference(label) = line.item() {
                let value = self.link.resolve(line.number(), label)?;
                log::trace!("{:04} {} = {}", offset, line, value);
                cells[offset] = value;
            }
            offset = match offset.checked_add(line.len()) {
                Some(offset) => offset,
                None => return Err(error!(OutOfMemory, line.number())),
            };
        }
        debug_assert_eq!(offset, cells.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_forward_and_back_references() {
        let src = "~~~\nr end\n:loop\ns hi\nr loop\n:end\nd 9\n~~~\n";
        let mut asm = Assembler::new(32);
        let m = asm.assemble(src).unwrap();
        assert_eq!(&m.cells()[..6], &[5, 104, 105, 0, 1, 9]);
        assert_eq!(asm.link().get("loop"), Some(1));
        assert_eq!(m.populated(), 6);
        assert_eq!(m.len(), 32);
    }

    #[test]
    fn test_alloc_keeps_offsets() {
        let src = "~~~\na 3\nr here\n:here\n~~~";
        let m = Assembler::new(8).assemble(src).unwrap();
        assert_eq!(&m.cells()[..4], &[0, 0, 0, 4]);
    }

    #[test]
    fn test_unknown_mnemonic() {
        let e = Assembler::new(8).assemble("~~~\ni zzli....\n~~~").unwrap_err();
        assert!(e.is(ErrorCode::UnknownMnemonic));
        assert_eq!(e.line_number(), Some(2));
    }

    #[test]
    fn test_unresolved_label() {
        let e = Assembler::new(8).assemble("~~~\nr nowhere\n~~~").unwrap_err();
        assert!(e.is(ErrorCode::UnresolvedLabel));
    }

    #[test]
    fn test_capacity() {
        let e = Assembler::new(4).assemble("~~~\nd 1\na 4\n~~~").unwrap_err();
        assert!(e.is(ErrorCode::OutOfMemory));
        assert_eq!(e.line_number(), Some(3));
    }

    #[test]
    fn test_huge_alloc() {
        let src = format!("~~~\nd 1\na {}\n~~~", usize::max_value());
        let e = Assembler::new(16).assemble(&src).unwrap_err();
        assert!(e.is(ErrorCode::OutOfMemory));
        assert_eq!(e.line_number(), Some(3));
    }

    #[test]
    fn test_outside_fence_ignored() {
        let m = Assembler::new(4).assemble("d 5\n~~~\nd 6\n~~~\nd 7").unwrap();
        assert_eq!(m.cells(), &[6, 0, 0, 0]);
    }
}
