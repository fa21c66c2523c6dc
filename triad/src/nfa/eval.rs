//! Depth-first NFA matching with a visited-guard to break ε-cycles.
use super::{Nfa, NfaState};
use std::collections::HashSet;

/// True iff some depth-first traversal of `nfa`, starting at its entry state and
/// consuming all of `s`, ends in an accepting state.
///
/// Cycles (from `ZeroOrMore` back-edges) make an unguarded DFS loop forever, so the
/// traversal carries a single visited set keyed by `(state, remaining_len)`, shared
/// across the *whole* traversal rather than cloned per branch: reachability from
/// `(state, remaining suffix)` is a fact about the NFA and the suffix alone, independent
/// of how that pair was reached, so a branch that has already failed to find an
/// accepting path from a given `(state, remaining_len)` can never succeed by revisiting
/// it.
pub fn matches(nfa: &Nfa, s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    let mut visited = HashSet::new();
    search(&nfa.states, &mut visited, nfa.entry, &chars)
}

fn search(
    states: &[NfaState],
    visited: &mut HashSet<(usize, usize)>,
    idx: usize,
    remaining: &[char],
) -> bool {
    if !visited.insert((idx, remaining.len())) {
        return false;
    }

    let state = &states[idx];

    if remaining.is_empty() {
        if state.accepting {
            return true;
        }
    } else {
        let c = remaining[0];
        let rest = &remaining[1..];
        let consumed = if let Some(targets) = state.on_char.get(&c) {
            targets.iter().any(|&t| search(states, visited, t, rest))
        } else if let Some(targets) = &state.on_unmatched_char {
            targets.iter().any(|&t| search(states, visited, t, rest))
        } else {
            false
        };
        if consumed {
            return true;
        }
    }

    state
        .on_epsilon
        .iter()
        .any(|&t| search(states, visited, t, remaining))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{sequence, zero_or_more, Regex};
    use crate::nfa::Nfa;

    #[test]
    fn star_does_not_infinite_loop() {
        let r = zero_or_more(sequence(Regex::Char('a'), Regex::Epsilon));
        let nfa = Nfa::from_ast(&r);
        assert!(nfa.matches("aaaa"));
        assert!(nfa.matches(""));
        assert!(!nfa.matches("aaab"));
    }
}
