//! Leaf operands: numeric literals and the accepted variable spellings.

/// A leaf payload the evaluator can reduce to a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Literal(f64),
    /// The input value, possibly negated
    Variable { negated: bool },
}

impl Operand {
    /// Classifies a leaf payload. Only `x`, `+x`, `--x` and `-x` count as the
    /// variable; `---x` and other sign stacks are rejected.
    pub fn parse(payload: &str) -> Option<Self> {
        match payload {
            "x" | "+x" | "--x" => Some(Operand::Variable { negated: false }),
            "-x" => Some(Operand::Variable { negated: true }),
            _ => parse_literal(payload).map(Operand::Literal),
        }
    }

    pub fn value(self, input: f64) -> f64 {
        match self {
            Operand::Literal(value) => value,
            Operand::Variable { negated: false } => input,
            Operand::Variable { negated: true } => -input,
        }
    }
}

/// Parses a numeric literal made of digits, `.` and sign characters only.
///
/// Exponents and `inf`/`nan` spellings are outside the formula alphabet and
/// are rejected even though `f64::from_str` would take them.
pub fn parse_literal(text: &str) -> Option<f64> {
    if text.is_empty()
        || !text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-'))
    {
        return None;
    }
    text.parse::<f64>().ok()
}
