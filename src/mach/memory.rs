use super::{Address, Cell, CELL_WIDTH};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Cell memory
///
/// A fixed number of cells holding code, data, dictionary and strings
/// alike. The capacity is set once; every access is bounds checked.
/// `populated` remembers how many leading cells came from an image or
/// the assembler, which is what "no image yet" means to the runtime.

#[derive(Clone, PartialEq)]
pub struct Memory {
    cells: Vec<Cell>,
    populated: usize,
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Memory {{ capacity: {}, populated: {} }}",
            self.cells.len(),
            self.populated
        )
    }
}

impl Memory {
    pub fn new(capacity: usize) -> Memory {
        Memory {
            cells: vec![0; capacity],
            populated: 0,
        }
    }

    /// Place `cells` at address 0 and zero the remainder.
    pub fn from_cells(mut cells: Vec<Cell>, capacity: usize) -> Result<Memory> {
        let populated = cells.len();
        if populated > capacity {
            return Err(error!(OutOfMemory; format!("{} CELLS, CAPACITY {}", populated, capacity)));
        }
        cells.resize(capacity, 0);
        Ok(Memory { cells, populated })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn populated(&self) -> usize {
        self.populated
    }

    /// True until an image has been loaded or assembled.
    pub fn is_blank(&self) -> bool {
        self.populated == 0
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Validate a machine value as an address.
    pub fn address(&self, addr: i64) -> Result<Address> {
        if addr < 0 || addr >= self.cells.len() as i64 {
            return Err(error!(OutOfRange; format!("ADDRESS {}", addr)));
        }
        Ok(addr as Address)
    }

    pub fn fetch(&self, addr: i64) -> Result<Cell> {
        let addr = self.address(addr)?;
        Ok(self.cells[addr])
    }

    pub fn store(&mut self, addr: i64, value: Cell) -> Result<()> {
        let addr = self.address(addr)?;
        self.cells[addr] = value;
        Ok(())
    }

    pub fn get(&self, addr: Address) -> Result<Cell> {
        match self.cells.get(addr) {
            Some(cell) => Ok(*cell),
            None => Err(error!(OutOfRange; format!("ADDRESS {}", addr))),
        }
    }

    pub fn set(&mut self, addr: Address, value: Cell) -> Result<()> {
        match self.cells.get_mut(addr) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(error!(OutOfRange; format!("ADDRESS {}", addr))),
        }
    }

    /// Read one character per cell up to a zero cell.
    pub fn extract_string(&self, addr: Address) -> Result<String> {
        let mut s = String::new();
        let mut i = addr;
        loop {
            let cell = self.get(i)?;
            if cell == 0 {
                return Ok(s);
            }
            s.push(std::char::from_u32(cell as u32).unwrap_or(std::char::REPLACEMENT_CHARACTER));
            i += 1;
        }
    }

    /// Write one character per cell followed by a zero cell. The whole
    /// string is checked against capacity before anything is written.
    pub fn inject_string(&mut self, s: &str, addr: Address) -> Result<()> {
        let len = s.chars().count();
        if addr.checked_add(len).map_or(true, |end| end >= self.cells.len()) {
            return Err(error!(OutOfRange; format!("STRING AT {}", addr)));
        }
        let mut i = addr;
        for c in s.chars() {
            self.cells[i] = c as Cell;
            i += 1;
        }
        self.cells[i] = 0;
        Ok(())
    }

    /// Little-endian bytes of every cell up to the last non-zero one.
    pub fn to_bytes(&self) -> Vec<u8> {
        let end = self
            .cells
            .iter()
            .rposition(|c| *c != 0)
            .map_or(0, |i| i + 1);
        let mut bytes = Vec::with_capacity(end * CELL_WIDTH);
        for cell in &self.cells[..end] {
            bytes.extend_from_slice(&cell.to_le_bytes());
        }
        bytes
    }

    /// CRC-32 of the image as it would be stored.
    pub fn checksum(&self) -> u32 {
        crc::crc32::checksum_ieee(&self.to_bytes())
    }

    /// Addresses where two memories differ, over the longer of the two.
    pub fn mismatches(&self, other: &Memory) -> Vec<Address> {
        let len = self.cells.len().max(other.cells.len());
        (0..len)
            .filter(|&i| self.cells.get(i).unwrap_or(&0) != other.cells.get(i).unwrap_or(&0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_bounds() {
        let mut m = Memory::new(4);
        assert!(m.fetch(-1).unwrap_err().is(ErrorCode::OutOfRange));
        assert!(m.store(4, 1).unwrap_err().is(ErrorCode::OutOfRange));
        m.store(3, 7).unwrap();
        assert_eq!(m.fetch(3).unwrap(), 7);
        assert_eq!(m.len(), 4);
    }

    #[test]
    fn test_from_cells_pads() {
        let m = Memory::from_cells(vec![1, 2], 5).unwrap();
        assert_eq!(m.cells(), &[1, 2, 0, 0, 0]);
        assert_eq!(m.populated(), 2);
        assert!(!m.is_blank());
        assert!(Memory::from_cells(vec![1, 2, 3], 2).is_err());
    }

    #[test]
    fn test_string_codec() {
        let mut m = Memory::new(32);
        m.inject_string("words", 10).unwrap();
        assert_eq!(m.get(15).unwrap(), 0);
        assert_eq!(m.extract_string(10).unwrap(), "words");
        assert_eq!(m.extract_string(11).unwrap(), "ords");
    }

    #[test]
    fn test_inject_checks_room_for_terminator() {
        let mut m = Memory::new(8);
        assert!(m.inject_string("1234", 4).is_err());
        assert_eq!(m.cells(), &[0; 8]);
        m.inject_string("123", 4).unwrap();
    }

    #[test]
    fn test_unterminated_string() {
        let m = Memory::from_cells(vec![65, 66], 2).unwrap();
        assert!(m.extract_string(0).is_err());
    }

    #[test]
    fn test_to_bytes_trims() {
        let m = Memory::from_cells(vec![1, -1, 0], 6).unwrap();
        assert_eq!(m.to_bytes(), vec![1, 0, 0, 0, 255, 255, 255, 255]);
        assert_eq!(Memory::new(3).to_bytes(), Vec::<u8>::new());
    }

    #[test]
    fn test_checksum_and_mismatches() {
        let a = Memory::from_cells(vec![1, 2, 3], 8).unwrap();
        let mut b = a.clone();
        assert_eq!(a.checksum(), b.checksum());
        b.set(1, 9).unwrap();
        assert_ne!(a.checksum(), b.checksum());
        assert_eq!(a.mismatches(&b), vec![1]);
    }
}
