//! Rendering an AST back to surface syntax ([`to_pattern`]) or to a verbose
//! human-readable description ([`to_english`]).
use super::{AstError, Atom, CharClass, Regex};

const PATTERN_METACHARS: &str = "()\\.|*+[]?{}";

/// Precedence tiers used to decide when a child needs parentheses. Higher binds
/// tighter; a child is parenthesized when its own precedence is lower than what its
/// parent requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    /// `|`, loosest.
    Alternation,
    /// concatenation.
    Sequence,
    /// `*`, `+`, `?` postfix repetition.
    Repetition,
    /// atoms: literals, classes, parenthesized groups.
    Atom,
}

fn precedence_of(r: &Regex) -> Precedence {
    match r {
        Regex::Or(..) => Precedence::Alternation,
        Regex::Sequence(..) => Precedence::Sequence,
        Regex::ZeroOrMore(_) | Regex::Optional(_) => Precedence::Repetition,
        Regex::Epsilon
        | Regex::Null
        | Regex::Char(_)
        | Regex::AnyChar
        | Regex::CharClass(_) => Precedence::Atom,
    }
}

/// Detects the `Sequence(a, ZeroOrMore(a'))` shape (where `a' == a`) that the smart
/// constructors leave around instead of a first-class `Plus`, so printers can re-emit
/// `a+` rather than `aa*`.
fn as_plus(r: &Regex) -> Option<&Regex> {
    if let Regex::Sequence(a, b) = r {
        if let Regex::ZeroOrMore(inner) = b.as_ref() {
            if inner.as_ref() == a.as_ref() {
                return Some(a);
            }
        }
    }
    None
}

fn escape_pattern_char(c: char, out: &mut String) {
    if PATTERN_METACHARS.contains(c) {
        out.push('\\');
    }
    out.push(c);
}

fn escape_class_member(c: char, out: &mut String) {
    if matches!(c, '-' | '^' | '\\' | ']') {
        out.push('\\');
    }
    out.push(c);
}

fn render_class_body(cc: &CharClass, out: &mut String) {
    if cc.invert {
        out.push('^');
    }
    for atom in cc.members.iter() {
        match atom {
            Atom::Single(c) => escape_class_member(*c, out),
            Atom::Range(range) => {
                escape_class_member(range.start, out);
                out.push('-');
                escape_class_member(range.end, out);
            }
        }
    }
}

/// Renders `r` as a surface pattern that reparses to an equal tree. Emits parentheses
/// exactly where precedence/associativity demands them, and escapes pattern
/// metacharacters (`( ) \ . | * + [ ] ? { }`) in literal position. `Null` has no pattern
/// representation and is a defined error.
pub fn to_pattern(r: &Regex) -> Result<String, AstError> {
    let mut out = String::new();
    write_pattern(r, Precedence::Alternation, &mut out)?;
    Ok(out)
}

fn write_pattern(r: &Regex, min_prec: Precedence, out: &mut String) -> Result<(), AstError> {
    if let Some(base) = as_plus(r) {
        let mut inner = String::new();
        write_pattern(base, Precedence::Repetition, &mut inner)?;
        maybe_paren(Precedence::Repetition, min_prec, &inner, out);
        out.push('+');
        return Ok(());
    }

    match r {
        Regex::Null => return Err(AstError::UnrepresentableRegex),
        Regex::Epsilon => {}
        Regex::Char(c) => escape_pattern_char(*c, out),
        Regex::AnyChar => out.push('.'),
        Regex::CharClass(cc) => {
            out.push('[');
            render_class_body(cc, out);
            out.push(']');
        }
        Regex::Or(a, b) => {
            let mut body = String::new();
            write_pattern(a, Precedence::Alternation, &mut body)?;
            body.push('|');
            write_pattern(b, Precedence::Alternation, &mut body)?;
            maybe_paren(Precedence::Alternation, min_prec, &body, out);
        }
        Regex::Sequence(a, b) => {
            let mut body = String::new();
            write_pattern(a, Precedence::Sequence, &mut body)?;
            write_pattern(b, Precedence::Sequence, &mut body)?;
            maybe_paren(Precedence::Sequence, min_prec, &body, out);
        }
        Regex::ZeroOrMore(inner) => {
            let mut body = String::new();
            write_pattern(inner, Precedence::Repetition, &mut body)?;
            maybe_paren(Precedence::Repetition, min_prec, &body, out);
            out.push('*');
        }
        Regex::Optional(inner) => {
            let mut body = String::new();
            write_pattern(inner, Precedence::Repetition, &mut body)?;
            maybe_paren(Precedence::Repetition, min_prec, &body, out);
            out.push('?');
        }
    }
    Ok(())
}

fn maybe_paren(own_prec: Precedence, min_prec: Precedence, body: &str, out: &mut String) {
    if own_prec < min_prec {
        out.push('(');
        out.push_str(body);
        out.push(')');
    } else {
        out.push_str(body);
    }
}

/// Renders `r` as a verbose, human-readable English description. Shares its precedence
/// and `+`-folding logic with [`to_pattern`]; only the leaf and connective vocabulary
/// differs.
pub fn to_english(r: &Regex) -> Result<String, AstError> {
    if let Some(base) = as_plus(r) {
        return Ok(format!("one or more of ({})", to_english(base)?));
    }
    Ok(match r {
        Regex::Null => return Err(AstError::UnrepresentableRegex),
        Regex::Epsilon => "the empty string".to_string(),
        Regex::Char(c) => format!("the character '{c}'"),
        Regex::AnyChar => "any character".to_string(),
        Regex::CharClass(cc) => {
            let mut members = String::new();
            for (i, atom) in cc.members.iter().enumerate() {
                if i > 0 {
                    members.push_str(", ");
                }
                match atom {
                    Atom::Single(c) => members.push_str(&format!("'{c}'")),
                    Atom::Range(range) => {
                        members.push_str(&format!("'{}'..='{}'", range.start, range.end))
                    }
                }
            }
            if cc.invert {
                format!("any character not in [{members}]")
            } else {
                format!("any character in [{members}]")
            }
        }
        Regex::Or(a, b) => format!("either ({}) or ({})", to_english(a)?, to_english(b)?),
        Regex::Sequence(a, b) => format!("({}) followed by ({})", to_english(a)?, to_english(b)?),
        Regex::ZeroOrMore(inner) => format!("zero or more of ({})", to_english(inner)?),
        Regex::Optional(inner) => format!("optionally ({})", to_english(inner)?),
    })
}
