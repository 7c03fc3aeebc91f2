use super::runtime::Context;
use super::{Cell, Opcode, HALT_IP};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

const TRUE: Cell = -1;
const FALSE: Cell = 0;
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";
const RUBOUT: &str = "\x08 \x08";

/// ## Primitive instructions
///
/// Each primitive reads and writes the context and returns nothing but
/// success or a fault. Arithmetic wraps at 32 bits. Jumps store
/// `target - 1` because the engine steps the instruction pointer after
/// every cell.

pub struct Operation {}

impl Operation {
    pub fn dispatch(ctx: &mut Context, op: Opcode) -> Result<()> {
        use Opcode::*;
        match op {
            Nop => Ok(()),
            Lit => Operation::lit(ctx),
            Dup => {
                let t = ctx.stack.top()?;
                ctx.stack.push(t)
            }
            Drop => ctx.stack.pop().map(|_| ()),
            Swap => {
                let (second, top) = ctx.stack.pop_2()?;
                ctx.stack.push(top)?;
                ctx.stack.push(second)
            }
            Push => {
                let t = ctx.stack.pop()?;
                ctx.address.push(t)
            }
            Pop => {
                let t = ctx.address.pop()?;
                ctx.stack.push(t)
            }
            Jump => {
                ctx.ip = ctx.stack.pop()? as i64 - 1;
                Ok(())
            }
            Call => {
                let target = ctx.stack.pop()?;
                ctx.address.push(ctx.ip as Cell)?;
                ctx.ip = target as i64 - 1;
                Ok(())
            }
            Ccall => Operation::ccall(ctx),
            Ret => {
                ctx.ip = ctx.address.pop()? as i64;
                Ok(())
            }
            Eq => Operation::compare(ctx, |b, a| b == a),
            Neq => Operation::compare(ctx, |b, a| b != a),
            Lt => Operation::compare(ctx, |b, a| b < a),
            Gt => Operation::compare(ctx, |b, a| b > a),
            Fetch => Operation::fetch(ctx),
            Store => {
                let (value, addr) = ctx.stack.pop_2()?;
                ctx.memory.store(addr as i64, value)
            }
            Add => Operation::binary(ctx, |n, t| Ok(n.wrapping_add(t))),
            Sub => Operation::binary(ctx, |n, t| Ok(n.wrapping_sub(t))),
            Mul => Operation::binary(ctx, |n, t| Ok(n.wrapping_mul(t))),
            Div => Operation::divide(ctx),
            And => Operation::binary(ctx, |n, t| Ok(n & t)),
            Or => Operation::binary(ctx, |n, t| Ok(n | t)),
            Xor => Operation::binary(ctx, |n, t| Ok(n ^ t)),
            Shift => Operation::shift(ctx),
            Zret => Operation::zret(ctx),
            Halt => {
                ctx.ip = HALT_IP;
                Ok(())
            }
            Ienum => ctx.stack.push(1),
            Iquery => {
                ctx.stack.pop()?;
                ctx.stack.push(0)?;
                ctx.stack.push(0)
            }
            Iinvoke => Operation::invoke(ctx),
        }
    }

    fn lit(ctx: &mut Context) -> Result<()> {
        ctx.ip += 1;
        let value = ctx.memory.fetch(ctx.ip)?;
        ctx.stack.push(value)
    }

    fn ccall(ctx: &mut Context) -> Result<()> {
        let (flag, target) = ctx.stack.pop_2()?;
        if flag != 0 {
            ctx.address.push(ctx.ip as Cell)?;
            ctx.ip = target as i64 - 1;
        }
        Ok(())
    }

    /// Pops `a` then `b` and pushes the flag for `b <op> a`.
    fn compare<F: Fn(Cell, Cell) -> bool>(ctx: &mut Context, f: F) -> Result<()> {
        let (b, a) = ctx.stack.pop_2()?;
        ctx.stack.push(if f(b, a) { TRUE } else { FALSE })
    }

    /// Pops `t` and folds it into the new top of stack.
    fn binary<F: Fn(Cell, Cell) -> Result<Cell>>(ctx: &mut Context, f: F) -> Result<()> {
        let t = ctx.stack.pop()?;
        let top = ctx.stack.top_mut()?;
        *top = f(*top, t)?;
        Ok(())
    }

    fn fetch(ctx: &mut Context) -> Result<()> {
        let value = match ctx.stack.top()? {
            -1 => (ctx.stack.len() - 1) as Cell,
            -2 => ctx.address.len() as Cell,
            -3 => ctx.memory.len() as Cell,
            -4 => Cell::min_value(),
            -5 => Cell::max_value(),
            addr => ctx.memory.fetch(addr as i64)?,
        };
        *ctx.stack.top_mut()? = value;
        Ok(())
    }

    /// Divides the second cell by the top. Magnitudes are divided first,
    /// then signs are applied:
    ///
    /// | divisor | dividend | quotient | remainder |
    /// |---------|----------|----------|-----------|
    /// | < 0     | < 0      | +        | -         |
    /// | > 0     | < 0      | -        | +         |
    /// | < 0     | > 0      | -        | -         |
    /// | > 0     | > 0      | +        | +         |
    ///
    /// The remainder replaces the dividend and the quotient replaces the
    /// divisor.
    fn divide(ctx: &mut Context) -> Result<()> {
        let a = ctx.stack.peek(0)? as i64;
        let b = ctx.stack.peek(1)? as i64;
        let (q, r) = signed_divmod(b, a)?;
        *ctx.stack.peek_mut(0)? = q as Cell;
        *ctx.stack.peek_mut(1)? = r as Cell;
        Ok(())
    }

    /// Two shifts in sequence against whatever is on top at the time:
    /// pop `t1` and shift the new top left by it, then pop that shifted
    /// value as `t2` and shift the cell beneath it right by `t2`.
    /// `[x, v, n]` becomes `[x >> (v << n)]`.
    fn shift(ctx: &mut Context) -> Result<()> {
        Operation::binary(ctx, shift_left)?;
        Operation::binary(ctx, shift_right)
    }

    fn zret(ctx: &mut Context) -> Result<()> {
        if ctx.stack.top()? == 0 {
            ctx.stack.pop()?;
            ctx.ip = ctx.address.pop()? as i64;
        }
        Ok(())
    }

    /// Device 0 is the console: pop the device id, then pop a character.
    fn invoke(ctx: &mut Context) -> Result<()> {
        ctx.stack.pop()?;
        let c = ctx.stack.pop()?;
        match c {
            8 => ctx.output.push_str(RUBOUT),
            1..=127 => ctx.output.push(c as u8 as char),
            _ => ctx.output.push_str(CLEAR_SCREEN),
        }
        Ok(())
    }
}

pub fn signed_divmod(dividend: i64, divisor: i64) -> Result<(i64, i64)> {
    if divisor == 0 {
        return Err(error!(DivisionByZero));
    }
    let (a, b) = (divisor, dividend);
    let mut q = b.abs() / a.abs();
    let mut r = b.abs() % a.abs();
    if a < 0 && b < 0 {
        r = -r;
    } else if a > 0 && b < 0 {
        q = -q;
    } else if a < 0 && b > 0 {
        q = -q;
        r = -r;
    }
    Ok((q, r))
}

fn shift_left(n: Cell, t: Cell) -> Result<Cell> {
    match t {
        t if t < 0 => Err(error!(IllegalShift; format!("LEFT BY {}", t))),
        t if t >= 32 => Ok(0),
        t => Ok(n.wrapping_shl(t as u32)),
    }
}

fn shift_right(n: Cell, t: Cell) -> Result<Cell> {
    match t {
        t if t < 0 => Err(error!(IllegalShift; format!("RIGHT BY {}", t))),
        t if t >= 32 => Ok(if n < 0 { -1 } else { 0 }),
        t => Ok(n >> t),
    }
}
