//! Operator table and the shared sign-vs-operator recognition rule.

use std::fmt;

/// Reserved symbol standing for the formula's single input value.
pub const VARIABLE: char = 'x';

/// Binary operators understood by the formula compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '^' => Some(Operator::Power),
            _ => None,
        }
    }

    pub fn from_byte(b: u8) -> Option<Self> {
        Self::from_char(char::from(b))
    }

    /// Parses a node payload that must consist of exactly one operator symbol.
    pub fn from_payload(payload: &str) -> Option<Self> {
        let mut chars = payload.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
        }
    }

    /// Lower binds looser; the tree builder splits at the lowest value first.
    pub fn priority(self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
            Operator::Power => 3,
        }
    }

    /// `+` and `-` double as sign prefixes on operands.
    pub fn is_sign(self) -> bool {
        matches!(self, Operator::Add | Operator::Subtract)
    }

    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Power => left.powf(right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

pub fn is_operator_symbol(b: u8) -> bool {
    Operator::from_byte(b).is_some()
}

/// Decides whether the character at byte `position` of `text` acts as a binary operator.
///
/// A `+` or `-` at the start of the text, after another operator or after `(`
/// is a sign on the following operand, unless scanning right reaches another
/// operator before a closing `)`. Single-character texts are taken at face
/// value so that split nodes holding just an operator symbol are recognised.
pub fn is_genuine_operator(text: &str, position: usize) -> bool {
    let bytes = text.as_bytes();
    let Some(operator) = bytes.get(position).and_then(|&b| Operator::from_byte(b)) else {
        return false;
    };

    if bytes.len() > 1 && operator.is_sign() {
        let sign_slot = position == 0
            || bytes[position - 1] == b'('
            || is_operator_symbol(bytes[position - 1]);
        if sign_slot {
            for &b in &bytes[position + 1..] {
                if is_operator_symbol(b) {
                    return true;
                }
                if b == b')' {
                    return false;
                }
            }
            return false;
        }
    }

    true
}
