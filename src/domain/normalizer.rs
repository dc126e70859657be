//! Rewrites raw formula text into an unambiguous string for the tree builder.

use tracing::instrument;

use crate::domain::operator::VARIABLE;

fn is_operand_end(c: char) -> bool {
    c.is_ascii_digit() || c == VARIABLE
}

/// Removes spaces and makes implied multiplication explicit.
///
/// `2x` becomes `2*x`, `2(` and `x(` become `2*(` and `x*(`, a `)` followed
/// by a digit or the variable gets a `*` after it, and `)(` becomes `)*(`.
/// Sign and operator context is left to the tree builder.
#[instrument(level = "trace")]
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 2);
    let mut prev: Option<char> = None;

    for c in input.chars().filter(|&c| c != ' ') {
        let implied = match prev {
            Some(p) if c == VARIABLE && p.is_ascii_digit() => true,
            Some(p) if c == '(' && is_operand_end(p) => true,
            Some(')') if is_operand_end(c) || c == '(' => true,
            _ => false,
        };
        if implied {
            out.push('*');
        }
        out.push(c);
        prev = Some(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_spaces() {
        assert_eq!(normalize(" 1 + 2 x "), "1+2*x");
    }

    #[test]
    fn test_normalize_inserts_implied_multiplication() {
        assert_eq!(normalize("2x"), "2*x");
        assert_eq!(normalize("2(x+1)"), "2*(x+1)");
        assert_eq!(normalize("x(x)"), "x*(x)");
        assert_eq!(normalize("(x+1)2"), "(x+1)*2");
        assert_eq!(normalize("(x+1)x"), "(x+1)*x");
        assert_eq!(normalize("(x+1)(x-1)"), "(x+1)*(x-1)");
    }

    #[test]
    fn test_normalize_cascades() {
        assert_eq!(normalize("3x(x)(2)x"), "3*x*(x)*(2)*x");
    }

    #[test]
    fn test_normalize_leaves_operators_alone() {
        assert_eq!(normalize("-x^2/3"), "-x^2/3");
        assert_eq!(normalize("x2"), "x2");
        assert_eq!(normalize(""), "");
    }
}
