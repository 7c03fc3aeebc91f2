use super::error::Error;
use crate::error;
use crate::mach::Cell;

type Result<T> = std::result::Result<T, Error>;

/// Filler for instruction columns left off the end of an `i` line.
pub const NOP_COLUMN: &str = "..";

/// ## One tagged line of assembly source
///
/// The first character selects the kind; the payload starts at the
/// third character. Source lines are trimmed before parsing. Label and
/// reference names are trimmed too, so `:loop` and `: loop` declare the
/// same label.
///
/// ```text
/// i liju....   four two-letter mnemonic prefixes packed into one cell;
///              missing trailing columns are filled with `..`
/// r name       reference to a label, resolved in pass two
/// d 42         literal integer cell
/// s text       null-terminated string, one character per cell
/// a 16         sixteen zero cells
/// : name       label at the current offset
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    number: usize,
    item: Item,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Instruction([String; 4]),
    Reference(String),
    Data(Cell),
    Text(String),
    Alloc(usize),
    Label(String),
    /// Unrecognized tag; emits nothing.
    Other(char),
}

/// Everything after the tag and its separator. A one-character line has
/// an empty payload.
fn payload(number: usize, text: &str) -> Result<&str> {
    match text.get(2..) {
        Some(rest) => Ok(rest),
        None if text.len() <= 2 => Ok(""),
        None => Err(error!(SyntaxError, number; "BAD SEPARATOR")),
    }
}

impl Line {
    /// Returns `Ok(None)` for blank lines.
    pub fn new(number: usize, text: &str) -> Result<Option<Line>> {
        let text = text.trim();
        let tag = match text.chars().next() {
            Some(tag) => tag,
            None => return Ok(None),
        };
        let item = match tag {
            'i' => {
                let mut columns: [String; 4] = Default::default();
                for (index, column) in columns.iter_mut().enumerate() {
                    let start = 2 + index * 2;
                    match text.get(start..start + 2) {
                        Some(s) => *column = s.to_string(),
                        None if start >= text.len() => *column = NOP_COLUMN.to_string(),
                        None => return Err(error!(SyntaxError, number; "BAD MNEMONIC COLUMN")),
                    }
                }
                Item::Instruction(columns)
            }
            'r' => Item::Reference(text[1..].trim().to_string()),
            'd' => match payload(number, text)?.trim().parse::<Cell>() {
                Ok(n) => Item::Data(n),
                Err(_) => return Err(error!(SyntaxError, number; format!("BAD NUMBER {}", text))),
            },
            's' => Item::Text(payload(number, text)?.to_string()),
            'a' => match payload(number, text)?.trim().parse::<usize>() {
                Ok(n) => Item::Alloc(n),
                Err(_) => return Err(error!(SyntaxError, number; format!("BAD COUNT {}", text))),
            },
            ':' => Item::Label(text[1..].trim().to_string()),
            other => Item::Other(other),
        };
        Ok(Some(Line { number, item }))
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Number of cells this line adds to memory.
    pub fn len(&self) -> usize {
        match &self.item {
            Item::Instruction(_) | Item::Reference(_) | Item::Data(_) => 1,
            Item::Text(s) => s.chars().count() + 1,
            Item::Alloc(n) => *n,
            Item::Label(_) | Item::Other(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.item {
            Item::Instruction(c) => write!(f, "i {}{}{}{}", c[0], c[1], c[2], c[3]),
            Item::Reference(s) => write!(f, "r {}", s),
            Item::Data(n) => write!(f, "d {}", n),
            Item::Text(s) => write!(f, "s {}", s),
            Item::Alloc(n) => write!(f, "a {}", n),
            Item::Label(s) => write!(f, ": {}", s),
            Item::Other(c) => write!(f, "{}", c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn parse(s: &str) -> Line {
        Line::new(1, s).unwrap().unwrap()
    }

    #[test]
    fn test_blank_is_none() {
        assert_eq!(Line::new(1, "   \t").unwrap(), None);
    }

    #[test]
    fn test_instruction_columns() {
        let l = parse("  i liju....  ");
        assert_eq!(
            l.item(),
            &Item::Instruction(["li".into(), "ju".into(), "..".into(), "..".into()])
        );
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn test_short_instruction_is_padded() {
        let l = parse("i ha");
        assert_eq!(
            l.item(),
            &Item::Instruction(["ha".into(), "..".into(), "..".into(), "..".into()])
        );
    }

    #[test]
    fn test_split_column() {
        let e = Line::new(9, "i lij").unwrap_err();
        assert_eq!(e.line_number(), Some(9));
    }

    #[test]
    fn test_text_length_counts_terminator() {
        let l = parse("s hello");
        assert_eq!(l.item(), &Item::Text("hello".into()));
        assert_eq!(l.len(), 6);
        assert_eq!(parse("s").len(), 1);
    }

    #[test]
    fn test_data_and_alloc() {
        assert_eq!(parse("d -12").item(), &Item::Data(-12));
        assert_eq!(parse("a 12").len(), 12);
        assert!(Line::new(3, "d twelve").is_err());
    }

    #[test]
    fn test_wide_character_after_tag() {
        let e = Line::new(4, "sé").unwrap_err();
        assert!(e.is(ErrorCode::SyntaxError));
        assert_eq!(e.line_number(), Some(4));
        assert!(Line::new(4, "d€5").is_err());
        assert_eq!(parse("s é").item(), &Item::Text("é".into()));
        assert!(Line::new(4, "é").unwrap().is_some());
    }

    #[test]
    fn test_label_spacing() {
        assert_eq!(parse(": loop").item(), &Item::Label("loop".into()));
        assert_eq!(parse("r  loop").item(), &Item::Reference("loop".into()));
    }

    #[test]
    fn test_label_emits_nothing() {
        let l = parse(":loop");
        assert_eq!(l.item(), &Item::Label("loop".into()));
        assert!(l.is_empty());
    }
}
