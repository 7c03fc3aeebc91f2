use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and size limited vector
///
/// Both the data stack and the address stack are one of these. Every
/// access that would reach below the bottom is an error, never a panic.

pub struct Stack<T> {
    name: &'static str,
    max_len: usize,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T: Copy> Stack<T> {
    pub fn new(name: &'static str, max_len: usize) -> Stack<T> {
        Stack {
            name,
            max_len,
            vec: vec![],
        }
    }
    fn overflow_check(&self) -> Result<()> {
        if self.vec.len() > self.max_len {
            Err(error!(StackOverflow; self.name))
        } else {
            Ok(())
        }
    }
    fn underflow_error(&self) -> Error {
        error!(StackUnderflow; self.name)
    }
    pub fn clear(&mut self) {
        self.vec.clear()
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn as_slice(&self) -> &[T] {
        &self.vec
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        self.vec.push(val);
        self.overflow_check()
    }
    pub fn pop(&mut self) -> Result<T> {
        match self.vec.pop() {
            Some(v) => Ok(v),
            None => Err(self.underflow_error()),
        }
    }
    /// Returns `(second, top)` after removing both.
    pub fn pop_2(&mut self) -> Result<(T, T)> {
        if self.vec.len() < 2 {
            return Err(self.underflow_error());
        }
        let two = self.pop()?;
        let one = self.pop()?;
        Ok((one, two))
    }
    pub fn top(&self) -> Result<T> {
        self.peek(0)
    }
    /// Look `depth` cells below the top without removing anything.
    pub fn peek(&self, depth: usize) -> Result<T> {
        match self.vec.len().checked_sub(depth + 1) {
            Some(index) => Ok(self.vec[index]),
            None => Err(self.underflow_error()),
        }
    }
    pub fn top_mut(&mut self) -> Result<&mut T> {
        self.peek_mut(0)
    }
    pub fn peek_mut(&mut self, depth: usize) -> Result<&mut T> {
        match self.vec.len().checked_sub(depth + 1) {
            Some(index) => Ok(&mut self.vec[index]),
            None => Err(self.underflow_error()),
        }
    }
}
