//! # triad
//!
//! `triad` is a regex engine built from three independently implemented matching
//! strategies that agree on every input: a direct [Brzozowski derivative](ast) matcher
//! operating on the AST, a Thompson-constructed [NFA](nfa), and a subset-constructed
//! [DFA](dfa) with a longest-match scanner.
//!
//! ## Usage
//!
//! ```rust
//! use triad::ast::{sequence, zero_or_more, Regex};
//! use triad::dfa::Dfa;
//! use triad::nfa::Nfa;
//!
//! let ab_star = sequence(Regex::Char('a'), zero_or_more(Regex::Char('b')));
//!
//! assert!(triad::ast::matches(&ab_star, "abbb"));
//! assert!(Nfa::from_ast(&ab_star).matches("abbb"));
//! assert!(Dfa::from_ast(&ab_star).matches("abbb"));
//! assert!(!Dfa::from_ast(&ab_star).matches("ba"));
//! ```
//!
//! Patterns written as surface syntax (see [`parser`]) go through the same three
//! matchers:
//!
//! ```rust
//! use triad::dfa::Dfa;
//! use triad::parser::parse;
//!
//! let ast = parse(r"a(bcd)?e").unwrap();
//! assert!(Dfa::from_ast(&ast).matches("abcde"));
//! assert!(Dfa::from_ast(&ast).matches("ae"));
//! assert!(!Dfa::from_ast(&ast).matches("abcd"));
//! ```
pub mod ast;
pub mod dfa;
pub mod nfa;
pub mod parser;
