use super::{Address, Memory, DICTIONARY_ROOT};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Dictionary header
///
/// Headers live in machine memory as
/// `[previous, code field, reserved, name..., 0]`.
/// A previous link of zero ends the chain.

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub address: Address,
    pub link: Address,
    pub code: Address,
    pub name: String,
}

const CODE_FIELD: Address = 1;
const NAME_FIELD: Address = 3;

impl Header {
    pub fn read(memory: &Memory, address: Address) -> Result<Header> {
        Ok(Header {
            address,
            link: link_at(memory, address)?,
            code: memory.get(address + CODE_FIELD)? as Address,
            name: memory.extract_string(address + NAME_FIELD)?,
        })
    }
}

fn link_at(memory: &Memory, address: Address) -> Result<Address> {
    let link = memory.get(address)?;
    if link < 0 {
        return Err(error!(OutOfRange, @address; "BAD DICTIONARY LINK"));
    }
    Ok(link as Address)
}

/// Walks the header chain from the root cell, newest first.
pub struct Dictionary<'a> {
    memory: &'a Memory,
}

impl<'a> Dictionary<'a> {
    pub fn new(memory: &'a Memory) -> Dictionary<'a> {
        Dictionary { memory }
    }

    pub fn latest(&self) -> Result<Address> {
        link_at(self.memory, DICTIONARY_ROOT)
    }

    /// Address of the newest header named exactly `name`, or 0.
    pub fn find(&self, name: &str) -> Result<Address> {
        let mut header = self.latest()?;
        let mut steps = 0;
        while header != 0 {
            if self.memory.extract_string(header + NAME_FIELD)? == name {
                break;
            }
            header = self.next(header, &mut steps)?;
        }
        log::debug!("find entry {} = {}", name, header);
        Ok(header)
    }

    /// The code field of `name`, failing if the word is not defined.
    pub fn code_field(&self, name: &str) -> Result<Address> {
        match self.find(name)? {
            0 => Err(error!(UndefinedWord; name)),
            header => Ok(self.memory.get(header + CODE_FIELD)? as Address),
        }
    }

    /// Every header, newest first.
    pub fn words(&self) -> Result<Vec<Header>> {
        let mut headers = vec![];
        let mut header = self.latest()?;
        let mut steps = 0;
        while header != 0 {
            headers.push(Header::read(self.memory, header)?);
            header = self.next(header, &mut steps)?;
        }
        Ok(headers)
    }

    /// A chain longer than memory can only be a cycle.
    fn next(&self, header: Address, steps: &mut usize) -> Result<Address> {
        *steps += 1;
        if *steps > self.memory.len() {
            return Err(error!(InternalError, @header; "DICTIONARY CYCLE"));
        }
        link_at(self.memory, header)
    }
}
