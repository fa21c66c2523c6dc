//! # Surface-syntax parser
//! A recursive-descent parser, built with `nom`, from pattern strings to [`Regex`]
//! trees:
//!
//! ```text
//! regex      ::= term ( '|' regex )?
//! term       ::= factor*
//! factor     ::= base ( '*' | '+' | '?' | '{' quantifier '}' )*
//! base       ::= '.' | '\' escape | '(' regex ')' | '[' char_class ']' | <literal>
//! quantifier ::= int ( ',' int? )?
//! char_class ::= '^'? ( <c> '-' <c> | '\' <c> | <c> )*
//! escape     ::= 'd'|'D'|'s'|'S'|'w'|'W' | <any literal>
//! ```
//!
//! ```
//! use triad::parser::parse;
//!
//! let ast = parse("a(bcd)?e").unwrap();
//! assert!(triad::ast::matches(&ast, "abcde"));
//! assert!(triad::ast::matches(&ast, "ae"));
//! assert!(!triad::ast::matches(&ast, "abcd"));
//! ```
use crate::ast::{char_class, optional, or, sequence, zero_or_more, Atom, CharRange, Regex};
use nom::branch::alt;
use nom::character::complete::{anychar, char, none_of, u32 as nom_u32};
use nom::combinator::{all_consuming, map, opt, value};
use nom::multi::{fold_many0, separated_list1};
use nom::sequence::{delimited, preceded};
use nom::{Finish, IResult};
use thiserror::Error;

/// Pattern-level syntax violations: unbalanced brackets, unexpected end of input, or
/// anything else `nom` rejects. The core (`ast`, `nfa`, `dfa`) never raises this, only
/// this parser does.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Parses `input` as a full pattern. The whole string must be consumed, or this errors.
pub fn parse(input: &str) -> Result<Regex, ParseError> {
    all_consuming(regex_expr)(input)
        .finish()
        .map(|(_, r)| r)
        .map_err(|e: nom::error::Error<&str>| ParseError::InvalidPattern(e.to_string()))
}

fn regex_expr(input: &str) -> IResult<&str, Regex> {
    map(separated_list1(char('|'), term), |mut terms| {
        let mut acc = terms.remove(0);
        for t in terms {
            acc = or(acc, t);
        }
        acc
    })(input)
}

fn term(input: &str) -> IResult<&str, Regex> {
    fold_many0(factor, || Regex::Epsilon, sequence)(input)
}

fn factor(input: &str) -> IResult<&str, Regex> {
    let (input, base_regex) = base(input)?;
    fold_many0(postfix, move || base_regex.clone(), apply_postfix)(input)
}

#[derive(Debug, Clone, Copy)]
enum Quant {
    Exact(u32),
    AtLeast(u32),
    Range(u32, u32),
}

#[derive(Debug, Clone, Copy)]
enum Postfix {
    Star,
    Plus,
    Question,
    Quantifier(Quant),
}

fn postfix(input: &str) -> IResult<&str, Postfix> {
    alt((
        value(Postfix::Star, char('*')),
        value(Postfix::Plus, char('+')),
        value(Postfix::Question, char('?')),
        map(
            delimited(char('{'), quantifier, char('}')),
            Postfix::Quantifier,
        ),
    ))(input)
}

fn quantifier(input: &str) -> IResult<&str, Quant> {
    let (input, n) = nom_u32(input)?;
    let (input, rest) = opt(preceded(char(','), opt(nom_u32)))(input)?;
    let quant = match rest {
        None => Quant::Exact(n),
        Some(None) => Quant::AtLeast(n),
        Some(Some(m)) => Quant::Range(n, m),
    };
    Ok((input, quant))
}

fn apply_postfix(r: Regex, op: Postfix) -> Regex {
    match op {
        Postfix::Star => zero_or_more(r),
        Postfix::Plus => sequence(r.clone(), zero_or_more(r)),
        Postfix::Question => optional(r),
        Postfix::Quantifier(Quant::Exact(n)) => repeat_exact(&r, n),
        Postfix::Quantifier(Quant::AtLeast(n)) => repeat_at_least(&r, n),
        Postfix::Quantifier(Quant::Range(n, m)) => repeat_range(&r, n, m),
    }
}

/// `n`-fold concatenation of `base` (left-associative, so `n=0` yields `Epsilon`).
fn repeat_exact(base: &Regex, n: u32) -> Regex {
    let mut acc = Regex::Epsilon;
    for _ in 0..n {
        acc = sequence(acc, base.clone());
    }
    acc
}

/// `n` copies of `base` followed by `ZeroOrMore(base)`.
fn repeat_at_least(base: &Regex, n: u32) -> Regex {
    sequence(repeat_exact(base, n), zero_or_more(base.clone()))
}

/// `n` copies of `base` followed by `m - n` separate `Optional(base)` copies. `m < n` is
/// treated as `m == n` (no optional tail), since the grammar doesn't define that case.
fn repeat_range(base: &Regex, n: u32, m: u32) -> Regex {
    let mut acc = repeat_exact(base, n);
    for _ in 0..m.saturating_sub(n) {
        acc = sequence(acc, optional(base.clone()));
    }
    acc
}

const RESERVED: &str = ".\\()|*+?{}[]";

fn base(input: &str) -> IResult<&str, Regex> {
    alt((
        value(Regex::AnyChar, char('.')),
        escape_base,
        delimited(char('('), regex_expr, char(')')),
        char_class_base,
        literal_char,
    ))(input)
}

fn literal_char(input: &str) -> IResult<&str, Regex> {
    map(none_of(RESERVED), Regex::Char)(input)
}

fn escape_base(input: &str) -> IResult<&str, Regex> {
    preceded(char('\\'), escape_body)(input)
}

fn escape_body(input: &str) -> IResult<&str, Regex> {
    alt((
        value(digit_class(false), char('d')),
        value(digit_class(true), char('D')),
        value(space_class(false), char('s')),
        value(space_class(true), char('S')),
        value(word_class(false), char('w')),
        value(word_class(true), char('W')),
        map(anychar, Regex::Char),
    ))(input)
}

fn digit_class(invert: bool) -> Regex {
    char_class(invert, vec![Atom::Range(digit_range())])
}

fn space_class(invert: bool) -> Regex {
    char_class(
        invert,
        vec![
            Atom::Single(' '),
            Atom::Single('\t'),
            Atom::Single('\r'),
            Atom::Single('\n'),
            Atom::Single('\u{0C}'),
        ],
    )
}

fn word_class(invert: bool) -> Regex {
    char_class(
        invert,
        vec![
            Atom::Range(CharRange::new('A', 'Z').expect("A < Z")),
            Atom::Range(CharRange::new('a', 'z').expect("a < z")),
            Atom::Range(digit_range()),
            Atom::Single('_'),
        ],
    )
}

fn digit_range() -> CharRange {
    CharRange::new('0', '9').expect("0 < 9")
}

fn char_class_base(input: &str) -> IResult<&str, Regex> {
    delimited(char('['), char_class_body, char(']'))(input)
}

fn char_class_body(input: &str) -> IResult<&str, Regex> {
    let (input, invert) = map(opt(char('^')), |o| o.is_some())(input)?;
    let (input, members) = nom::multi::many0(class_member)(input)?;
    Ok((input, char_class(invert, members)))
}

fn class_member(input: &str) -> IResult<&str, Atom> {
    alt((class_range, class_escaped, class_single))(input)
}

/// Any class member character that isn't `]` (ends the class) or `\` (starts an
/// escape). A bare `-` is allowed here: whether it ends up meaning "range separator" or
/// "literal dash" is resolved by which alternative of [`class_member`] matches.
fn class_plain_char(input: &str) -> IResult<&str, char> {
    none_of("]\\")(input)
}

fn class_range(input: &str) -> IResult<&str, Atom> {
    let (input, start) = class_plain_char(input)?;
    let (input, _) = char('-')(input)?;
    let (input, end) = class_plain_char(input)?;
    match CharRange::new(start, end) {
        Ok(range) => Ok((input, Atom::Range(range))),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        ))),
    }
}

fn class_escaped(input: &str) -> IResult<&str, Atom> {
    map(preceded(char('\\'), anychar), Atom::Single)(input)
}

fn class_single(input: &str) -> IResult<&str, Atom> {
    map(class_plain_char, Atom::Single)(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfa::Dfa;

    fn matches(pattern: &str, subject: &str) -> bool {
        Dfa::from_ast(&parse(pattern).unwrap()).matches(subject)
    }

    #[test]
    fn literal_concatenation() {
        assert!(matches("abc", "abc"));
        assert!(!matches("abc", "abd"));
    }

    #[test]
    fn alternation_and_grouping() {
        assert!(matches("a(bcd)?e", "abcde"));
        assert!(matches("a(bcd)?e", "ae"));
        assert!(!matches("a(bcd)?e", "abcd"));
        assert!(!matches("a(bcd)?e", "abce"));
    }

    #[test]
    fn any_char_and_star() {
        assert!(matches(".+@.+\\..+", "email@address.com"));
        assert!(!matches(".+@.+\\..+", "@address.com"));
        assert!(!matches(".+@.+\\..+", "email@address"));
    }

    #[test]
    fn shorthand_classes() {
        assert!(matches("\\d\\d\\d", "123"));
        assert!(!matches("\\d\\d\\d", "1a3"));
        assert!(matches("\\W\\W\\W", "   "));
        assert!(matches("\\W\\W\\W", "/*$"));
        assert!(!matches("\\W\\W\\W", "add"));
    }

    #[test]
    fn negated_class_with_escaped_dash() {
        let pat = "a[^|$b-d\\-]d";
        for s in ["a|d", "a$d", "abd", "acd", "add", "a-d", "ad"] {
            assert!(!matches(pat, s), "expected no match for {s}");
        }
        for s in ["a/d", "a\\d", "aad"] {
            assert!(matches(pat, s), "expected match for {s}");
        }
    }

    #[test]
    fn exact_quantifier_structural_shape() {
        let exact = parse("a{15,17}").unwrap();
        let mut expected = Regex::Epsilon;
        for _ in 0..15 {
            expected = sequence(expected, Regex::Char('a'));
        }
        expected = sequence(expected, optional(Regex::Char('a')));
        expected = sequence(expected, optional(Regex::Char('a')));
        assert_eq!(exact, expected);
    }

    #[test]
    fn digit_range_shorthand_agrees_with_explicit_class() {
        let shorthand = parse("(\\(0\\d\\))?\\d\\d\\d\\d-\\d\\d\\d\\d").unwrap();
        let explicit =
            parse("(\\(0[0-9]\\))?[0-9][0-9][0-9][0-9]-[0-9][0-9][0-9][0-9]").unwrap();
        assert_eq!(shorthand, explicit);
    }

    #[test]
    fn phone_number_scenarios() {
        let pat = "(\\(0[0-9]\\))?[0-9][0-9][0-9][0-9]-[0-9][0-9][0-9][0-9]";
        assert!(matches(pat, "(03)9743-9939"));
        assert!(matches(pat, "9743-9939"));
        for s in [
            "039743-9939",
            "(0397439939",
            "03)97439939",
            "(0)97439939",
            "(13)9743-9939",
            "97439939",
        ] {
            assert!(!matches(pat, s), "expected no match for {s}");
        }
    }
}
