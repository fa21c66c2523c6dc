//! # The regex AST algebra
//! This module defines the value-typed abstract syntax tree for regular expressions,
//! [`Regex`], along with the smart constructors that keep every tree in this crate in
//! normal form, and the Brzozowski-derivative operations ([`nullable`], [`derivative`],
//! [`matches`]) that give the algebra its meaning.
//!
//! Two trees are equal iff they have the same variant and structurally equal fields:
//! this is required for the smart constructors to fold things like `Or(r, r) -> r` and
//! `Sequence(a, ZeroOrMore(a)) -> a+` on construction, so an already-normalized tree is
//! a fixed point of every smart constructor.
//!
//! `Epsilon`, `Null` and `AnyChar` are singleton-shaped (no payload): every reference to
//! [`Regex::Epsilon`] compares equal to every other, with no interning required.
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

mod derivative;
mod print;

pub use derivative::{derivative, matches, nullable};
pub use print::{to_english, to_pattern};

/// Errors raised while constructing or rendering an AST node.
///
/// `InvalidCharClass` is representable but unreachable in this implementation: [`Atom`]
/// is a closed two-variant enum, so there is no value of the wrong shape to reject. It
/// is kept for symmetry with the error taxonomy a looser-typed constructor would need.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AstError {
    #[error("invalid char range: start '{start}' is not strictly less than end '{end}'")]
    InvalidCharRange { start: char, end: char },
    #[error("char class members must be single code points or char ranges")]
    InvalidCharClass,
    #[error("∅ (Null) has no pattern representation")]
    UnrepresentableRegex,
}

/// The regex abstract syntax tree. See the [module-level documentation](self) for the
/// equality and normalization contract every tree here satisfies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Regex {
    /// Matches the empty string only.
    Epsilon,
    /// Matches nothing.
    Null,
    /// Matches exactly one code point.
    Char(char),
    /// Matches exactly one arbitrary code point.
    AnyChar,
    /// Matches one code point in (or, if inverted, out of) a set.
    CharClass(CharClass),
    /// Alternation.
    Or(Rc<Regex>, Rc<Regex>),
    /// Concatenation.
    Sequence(Rc<Regex>, Rc<Regex>),
    /// Kleene star.
    ZeroOrMore(Rc<Regex>),
    /// Zero-or-one.
    Optional(Rc<Regex>),
}

/// The body of a [`Regex::CharClass`]: a (possibly inverted) set of [`Atom`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharClass {
    pub invert: bool,
    pub members: Rc<[Atom]>,
}

/// One member of a char class: either a single code point or an inclusive range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Atom {
    Single(char),
    Range(CharRange),
}

impl Atom {
    fn contains(&self, c: char) -> bool {
        match self {
            Atom::Single(s) => *s == c,
            Atom::Range(r) => r.contains(c),
        }
    }
}

/// An inclusive code point range `start..=end`, with `start < end` strictly enforced at
/// construction (a range of exactly one code point is represented as `Atom::Single`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharRange {
    pub start: char,
    pub end: char,
}

impl CharRange {
    pub fn new(start: char, end: char) -> Result<Self, AstError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(AstError::InvalidCharRange { start, end })
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.start <= c && c <= self.end
    }

    /// Iterates every code point in the range, in order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        (self.start as u32..=self.end as u32).filter_map(char::from_u32)
    }
}

fn class_contains(members: &[Atom], c: char) -> bool {
    members.iter().any(|a| a.contains(c))
}

/// Builds an [`Or`](Regex::Or) node, applying the normalization rules `Or(Null, r) =
/// Or(r, Null) = r` and `Or(r, r) = r`.
pub fn or(a: Regex, b: Regex) -> Regex {
    if a == Regex::Null {
        return b;
    }
    if b == Regex::Null {
        return a;
    }
    if a == b {
        return a;
    }
    Regex::Or(Rc::new(a), Rc::new(b))
}

/// Builds a [`Sequence`](Regex::Sequence) node, applying the normalization rules
/// `Sequence(Null, _) = Sequence(_, Null) = Null` and `Sequence(Epsilon, r) =
/// Sequence(r, Epsilon) = r`.
pub fn sequence(a: Regex, b: Regex) -> Regex {
    if a == Regex::Null || b == Regex::Null {
        return Regex::Null;
    }
    if a == Regex::Epsilon {
        return b;
    }
    if b == Regex::Epsilon {
        return a;
    }
    Regex::Sequence(Rc::new(a), Rc::new(b))
}

/// Builds a [`ZeroOrMore`](Regex::ZeroOrMore) node, applying `ZeroOrMore(Null) =
/// ZeroOrMore(Epsilon) = Epsilon`, `ZeroOrMore(ZeroOrMore(r)) = ZeroOrMore(r)`, and
/// `ZeroOrMore(Optional(r)) = ZeroOrMore(r)`.
pub fn zero_or_more(r: Regex) -> Regex {
    match r {
        Regex::Null | Regex::Epsilon => Regex::Epsilon,
        Regex::ZeroOrMore(_) => r,
        Regex::Optional(inner) => Regex::ZeroOrMore(inner),
        other => Regex::ZeroOrMore(Rc::new(other)),
    }
}

/// Builds an [`Optional`](Regex::Optional) node, applying `Optional(Null) =
/// Optional(Epsilon) = Epsilon`, `Optional(Optional(r)) = Optional(r)`, and
/// `Optional(ZeroOrMore(r)) = ZeroOrMore(r)`.
///
/// The last identity is lossless only because `ZeroOrMore` already accepts the empty
/// string: `Optional` adds nothing `ZeroOrMore` didn't already have.
pub fn optional(r: Regex) -> Regex {
    match r {
        Regex::Null | Regex::Epsilon => Regex::Epsilon,
        Regex::Optional(_) => r,
        Regex::ZeroOrMore(_) => r,
        other => Regex::Optional(Rc::new(other)),
    }
}

/// Builds a [`CharClass`] node, collapsing `CharClass(invert=false, [single_char])` to
/// [`Regex::Char`].
pub fn char_class(invert: bool, members: Vec<Atom>) -> Regex {
    if !invert && members.len() == 1 {
        if let Atom::Single(c) = members[0] {
            return Regex::Char(c);
        }
    }
    Regex::CharClass(CharClass {
        invert,
        members: members.into(),
    })
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match to_pattern(self) {
            Ok(s) => f.write_str(&s),
            Err(e) => write!(f, "<{e}>"),
        }
    }
}
