use super::{Cell, Memory, CELL_WIDTH};
use crate::error;
use crate::lang::Error;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

type Result<T> = std::result::Result<T, Error>;

/// ## Binary memory images
///
/// An image is nothing but cells: 32-bit little-endian integers in
/// address order, no header and no checksum.

pub struct Image;

impl Image {
    pub fn from_bytes(bytes: &[u8], capacity: usize) -> Result<Memory> {
        if bytes.len() % CELL_WIDTH != 0 {
            return Err(error!(MalformedImage; format!(
                "{} BYTES IS NOT A WHOLE NUMBER OF CELLS",
                bytes.len()
            )));
        }
        let count = bytes.len() / CELL_WIDTH;
        if count > capacity {
            return Err(error!(MalformedImage; format!(
                "{} CELLS, CAPACITY {}",
                count, capacity
            )));
        }
        let cells: Vec<Cell> = bytes
            .chunks_exact(CELL_WIDTH)
            .map(|c| Cell::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        let memory = Memory::from_cells(cells, capacity)?;
        log::info!(
            "loaded {} cells, crc32 {:08x}",
            memory.populated(),
            memory.checksum()
        );
        Ok(memory)
    }

    pub fn read<R: Read>(mut reader: R, capacity: usize) -> Result<Memory> {
        let mut bytes = vec![];
        if let Err(error) = reader.read_to_end(&mut bytes) {
            return Err(error!(InternalError; error.to_string()));
        }
        Image::from_bytes(&bytes, capacity)
    }

    pub fn load<P: AsRef<Path>>(path: P, capacity: usize) -> Result<Memory> {
        let file = open(path.as_ref())?;
        Image::read(file, capacity)
    }

    /// Trailing zero cells are left out; loading pads them back.
    pub fn write<W: Write>(memory: &Memory, mut writer: W) -> Result<()> {
        match writer.write_all(&memory.to_bytes()) {
            Ok(_) => Ok(()),
            Err(error) => Err(error!(InternalError; error.to_string())),
        }
    }

    pub fn save<P: AsRef<Path>>(memory: &Memory, path: P) -> Result<()> {
        let file = match File::create(path.as_ref()) {
            Ok(file) => file,
            Err(error) => return Err(error!(InternalError; error.to_string())),
        };
        Image::write(memory, file)
    }
}

pub(super) fn open(path: &Path) -> Result<File> {
    match File::open(path) {
        Ok(file) => Ok(file),
        Err(error) => {
            let msg = format!("{}: {}", path.display(), error);
            match error.kind() {
                ErrorKind::NotFound => Err(error!(FileNotFound; msg)),
                _ => Err(error!(InternalError; msg)),
            }
        }
    }
}
