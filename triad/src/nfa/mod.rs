//! # Nondeterministic finite automaton
//! [`Nfa`] is built from a [`Regex`](crate::ast::Regex) by Thompson-style construction
//! (see [`Nfa::from_ast`]) and matched by depth-first exploration with a visited-guard
//! (see [`eval`]).
//!
//! States live in an arena (`Vec<NfaState>`) addressed by `usize` rather than behind
//! shared pointers: `ZeroOrMore` introduces back-edges, and an arena sidesteps the
//! reference-cycle hazards that would come with `Rc`-linked states.
//!
//! ```
//! use triad::ast::{sequence, zero_or_more, Regex};
//! use triad::nfa::Nfa;
//!
//! let ab_star = sequence(Regex::Char('a'), zero_or_more(Regex::Char('b')));
//! let nfa = Nfa::from_ast(&ab_star);
//! assert!(nfa.matches("abbb"));
//! assert!(!nfa.matches("ba"));
//! ```
use crate::ast::{Atom, Regex};
use std::collections::HashMap;

pub mod eval;

/// One state in an [`Nfa`]'s arena.
#[derive(Debug, Clone, Default)]
pub struct NfaState {
    pub accepting: bool,
    pub on_char: HashMap<char, Vec<usize>>,
    pub on_epsilon: Vec<usize>,
    /// Successors taken for any code point with no entry in `on_char` at all. Used to
    /// encode `AnyChar` and negated char classes without enumerating the alphabet. An
    /// explicit (even empty) `on_char` entry always takes precedence over this.
    pub on_unmatched_char: Option<Vec<usize>>,
}

/// A Thompson-constructed NFA: an arena of states plus the index of the entry state.
#[derive(Debug, Clone)]
pub struct Nfa {
    pub(crate) states: Vec<NfaState>,
    pub(crate) entry: usize,
}

impl Nfa {
    /// Builds an NFA from `ast` following the construction rules for each variant.
    pub fn from_ast(ast: &Regex) -> Self {
        let mut states = Vec::new();
        let (entry, _exit) = build(ast, &mut states);
        Nfa { states, entry }
    }

    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    pub fn entry(&self) -> usize {
        self.entry
    }

    /// True iff some depth-first traversal consuming all of `s` ends in an accepting
    /// state. See [`eval::matches`] for the algorithm.
    pub fn matches(&self, s: &str) -> bool {
        eval::matches(self, s)
    }
}

fn new_state(states: &mut Vec<NfaState>) -> usize {
    states.push(NfaState::default());
    states.len() - 1
}

fn expand_members(members: &[Atom]) -> Vec<char> {
    let mut out = Vec::new();
    for atom in members {
        match atom {
            Atom::Single(c) => out.push(*c),
            Atom::Range(r) => out.extend(r.chars()),
        }
    }
    out
}

/// Builds the sub-NFA for `ast` into the shared `states` arena, returning its
/// `(entry, exit)` state indices.
fn build(ast: &Regex, states: &mut Vec<NfaState>) -> (usize, usize) {
    match ast {
        Regex::Epsilon => {
            let entry = new_state(states);
            let exit = new_state(states);
            states[exit].accepting = true;
            states[entry].on_epsilon.push(exit);
            (entry, exit)
        }
        Regex::Null => {
            // No rule connects entry to exit: exit is unreachable, so nothing matches.
            let entry = new_state(states);
            let exit = new_state(states);
            states[exit].accepting = true;
            (entry, exit)
        }
        Regex::Char(c) => {
            let entry = new_state(states);
            let exit = new_state(states);
            states[exit].accepting = true;
            states[entry].on_char.entry(*c).or_default().push(exit);
            (entry, exit)
        }
        Regex::AnyChar => {
            let entry = new_state(states);
            let exit = new_state(states);
            states[exit].accepting = true;
            states[entry].on_unmatched_char = Some(vec![exit]);
            (entry, exit)
        }
        Regex::CharClass(cc) => {
            let entry = new_state(states);
            let exit = new_state(states);
            states[exit].accepting = true;
            if cc.invert {
                states[entry].on_unmatched_char = Some(vec![exit]);
                for c in expand_members(&cc.members) {
                    states[entry].on_char.insert(c, Vec::new());
                }
            } else {
                for c in expand_members(&cc.members) {
                    states[entry].on_char.entry(c).or_default().push(exit);
                }
            }
            (entry, exit)
        }
        Regex::Or(a, b) => {
            let (a_entry, a_exit) = build(a, states);
            let (b_entry, b_exit) = build(b, states);
            states[a_exit].accepting = false;
            states[b_exit].accepting = false;
            let entry = new_state(states);
            states[entry].on_epsilon.push(a_entry);
            states[entry].on_epsilon.push(b_entry);
            let exit = new_state(states);
            states[exit].accepting = true;
            states[a_exit].on_epsilon.push(exit);
            states[b_exit].on_epsilon.push(exit);
            (entry, exit)
        }
        Regex::Sequence(a, b) => {
            let (a_entry, a_exit) = build(a, states);
            let (b_entry, b_exit) = build(b, states);
            states[a_exit].accepting = false;
            states[a_exit].on_epsilon.push(b_entry);
            (a_entry, b_exit)
        }
        Regex::ZeroOrMore(inner) => {
            let (r_entry, r_exit) = build(inner, states);
            states[r_exit].on_epsilon.push(r_entry);
            states[r_entry].on_epsilon.push(r_exit);
            (r_entry, r_exit)
        }
        Regex::Optional(inner) => {
            let (r_entry, r_exit) = build(inner, states);
            states[r_entry].on_epsilon.push(r_exit);
            (r_entry, r_exit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{char_class, optional, sequence, zero_or_more, Atom};

    #[test]
    fn char_matches_only_itself() {
        let nfa = Nfa::from_ast(&Regex::Char('a'));
        assert!(nfa.matches("a"));
        assert!(!nfa.matches("b"));
        assert!(!nfa.matches(""));
        assert!(!nfa.matches("aa"));
    }

    #[test]
    fn null_matches_nothing() {
        let nfa = Nfa::from_ast(&Regex::Null);
        assert!(!nfa.matches(""));
        assert!(!nfa.matches("a"));
    }

    #[test]
    fn epsilon_matches_empty_only() {
        let nfa = Nfa::from_ast(&Regex::Epsilon);
        assert!(nfa.matches(""));
        assert!(!nfa.matches("a"));
    }

    #[test]
    fn any_char_matches_one_code_point() {
        let nfa = Nfa::from_ast(&Regex::AnyChar);
        assert!(nfa.matches("x"));
        assert!(nfa.matches("€"));
        assert!(!nfa.matches(""));
        assert!(!nfa.matches("xy"));
    }

    #[test]
    fn inverted_class_excludes_listed_members() {
        let class = char_class(true, vec![Atom::Single('a'), Atom::Single('b')]);
        let nfa = Nfa::from_ast(&class);
        assert!(nfa.matches("c"));
        assert!(!nfa.matches("a"));
        assert!(!nfa.matches("b"));
    }

    #[test]
    fn star_and_optional_and_sequence() {
        let r = sequence(
            sequence(Regex::Char('a'), optional(Regex::Char('b'))),
            zero_or_more(Regex::Char('c')),
        );
        let nfa = Nfa::from_ast(&r);
        assert!(nfa.matches("a"));
        assert!(nfa.matches("ab"));
        assert!(nfa.matches("accc"));
        assert!(nfa.matches("abccc"));
        assert!(!nfa.matches("b"));
    }
}
