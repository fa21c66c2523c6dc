//! Subset construction: turning an [`Nfa`](crate::nfa::Nfa) into an equivalent [`Dfa`].
//!
//! Grounded directly in `original_source/dfa.py::from_nfa`: a synthetic NFA trap state
//! is appended to a cloned copy of the NFA's arena so every inverted state's "character
//! I explicitly exclude" edges have somewhere concrete to point, and every discovered
//! NFA-state-set, including the empty set (reached once no inverted state's default
//! contributes anything), becomes its own DFA state. The empty-set DFA state is
//! non-accepting with no enumerated edges and a self-looping default, i.e. exactly the
//! dead/trap state the total transition function needs; no separate sentinel is
//! required.
use super::{Dfa, DfaState};
use crate::nfa::{Nfa, NfaState};
use std::collections::{BTreeSet, HashMap, VecDeque};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DfaError {
    #[error("attempted to install two enumerated edges for the same character on one DFA state")]
    InternalInvariantViolated,
}

type NfaStateSet = BTreeSet<usize>;

/// Builds a DFA equivalent to `nfa` by subset construction.
pub fn from_nfa(nfa: &Nfa) -> Result<Dfa, DfaError> {
    let mut arena = nfa.states.clone();
    let trap = arena.len();
    arena.push(NfaState::default());

    let mut discovered: Vec<NfaStateSet> = Vec::new();
    let mut index_of: HashMap<NfaStateSet, usize> = HashMap::new();
    let mut queue: VecDeque<usize> = VecDeque::new();

    let start_set = epsilon_closure(&arena, &[nfa.entry].into_iter().collect());
    let start_idx = register(start_set, &mut discovered, &mut index_of, &mut queue);

    let mut char_edges: Vec<HashMap<char, usize>> = Vec::new();
    let mut default_edges: Vec<usize> = Vec::new();

    while let Some(idx) = queue.pop_front() {
        let set = discovered[idx].clone();
        let (moves, default_move) = compute_moves(&arena, &set, trap);

        let mut char_map = HashMap::new();
        for (c, target_set) in moves {
            let target_idx = register(target_set, &mut discovered, &mut index_of, &mut queue);
            if char_map.insert(c, target_idx).is_some() {
                return Err(DfaError::InternalInvariantViolated);
            }
        }
        let default_idx = register(default_move, &mut discovered, &mut index_of, &mut queue);

        grow(&mut char_edges, idx);
        grow(&mut default_edges, idx);
        char_edges[idx] = char_map;
        default_edges[idx] = default_idx;
    }

    char_edges.resize_with(discovered.len(), HashMap::new);
    default_edges.resize(discovered.len(), 0);

    let states = discovered
        .iter()
        .enumerate()
        .map(|(idx, set)| DfaState {
            accepting: set.iter().any(|&q| arena[q].accepting),
            on_char: char_edges[idx].clone(),
            default: default_edges[idx],
        })
        .collect();

    Ok(Dfa {
        states,
        entry: start_idx,
    })
}

fn grow<T: Default>(v: &mut Vec<T>, idx: usize) {
    if v.len() <= idx {
        v.resize_with(idx + 1, Default::default);
    }
}

fn register(
    set: NfaStateSet,
    discovered: &mut Vec<NfaStateSet>,
    index_of: &mut HashMap<NfaStateSet, usize>,
    queue: &mut VecDeque<usize>,
) -> usize {
    if let Some(&idx) = index_of.get(&set) {
        return idx;
    }
    let idx = discovered.len();
    index_of.insert(set.clone(), idx);
    discovered.push(set);
    queue.push_back(idx);
    idx
}

fn epsilon_closure(arena: &[NfaState], seed: &NfaStateSet) -> NfaStateSet {
    let mut closure = BTreeSet::new();
    let mut stack: Vec<usize> = seed.iter().copied().collect();
    while let Some(idx) = stack.pop() {
        if closure.insert(idx) {
            stack.extend(arena[idx].on_epsilon.iter().copied());
        }
    }
    closure
}

/// Computes, for the closed set `set`, the per-char move table and the default move:
/// the five-step procedure from `dfa.py::all_possible_moves`.
fn compute_moves(
    arena: &[NfaState],
    set: &NfaStateSet,
    trap: usize,
) -> (HashMap<char, NfaStateSet>, NfaStateSet) {
    let (inverted, non_inverted): (Vec<usize>, Vec<usize>) = set
        .iter()
        .copied()
        .partition(|&q| arena[q].on_unmatched_char.is_some());

    let mut moves: HashMap<char, NfaStateSet> = HashMap::new();

    // Step 2: non-inverted states contribute their real enumerated edges.
    for &q in &non_inverted {
        for (&c, targets) in &arena[q].on_char {
            moves.entry(c).or_default().extend(targets.iter().copied());
        }
    }

    // Step 3: an inverted state's own disabled chars, if no non-inverted state (or
    // earlier inverted state, in this same pass) already contributed that char, route
    // to the shared trap state: the inverted state must go somewhere on that char, and
    // it has no real successor for it.
    for &q in &inverted {
        for &c in arena[q].on_char.keys() {
            moves.entry(c).or_insert_with(|| [trap].into_iter().collect());
        }
    }

    // Step 4: every inverted state's default successor feeds the global default move,
    // and also feeds every already-known char that state does not itself disable.
    let mut default_move: NfaStateSet = BTreeSet::new();
    for &q in &inverted {
        let default_targets = arena[q]
            .on_unmatched_char
            .as_ref()
            .expect("q was partitioned as inverted");
        default_move.extend(default_targets.iter().copied());
        let disabled = &arena[q].on_char;
        for (&c, target_set) in moves.iter_mut() {
            if !disabled.contains_key(&c) {
                target_set.extend(default_targets.iter().copied());
            }
        }
    }

    // Step 5: ε-close every destination set.
    for target_set in moves.values_mut() {
        *target_set = epsilon_closure(arena, target_set);
    }
    let default_move = epsilon_closure(arena, &default_move);

    (moves, default_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{char_class, or, sequence, zero_or_more, Atom, Regex};

    #[test]
    fn trivial_char_dfa_has_three_states() {
        let nfa = Nfa::from_ast(&Regex::Char('a'));
        let dfa = from_nfa(&nfa).unwrap();
        // entry, post-'a' accepting state, dead state.
        assert_eq!(dfa.states.len(), 3);
        assert!(dfa.matches("a"));
        assert!(!dfa.matches("b"));
    }

    #[test]
    fn or_of_chars_builds_single_decision_dfa() {
        let r = or(Regex::Char('a'), Regex::Char('b'));
        let nfa = Nfa::from_ast(&r);
        let dfa = from_nfa(&nfa).unwrap();
        assert!(dfa.matches("a"));
        assert!(dfa.matches("b"));
        assert!(!dfa.matches("c"));
    }

    #[test]
    fn inverted_class_routes_excluded_chars_through_trap() {
        let class = char_class(true, vec![Atom::Single('a')]);
        let nfa = Nfa::from_ast(&class);
        let dfa = from_nfa(&nfa).unwrap();
        assert!(!dfa.matches("a"));
        assert!(dfa.matches("b"));
        assert!(dfa.matches("€"));
    }

    #[test]
    fn star_dfa_is_total_and_loops() {
        let nfa = Nfa::from_ast(&zero_or_more(Regex::Char('a')));
        let dfa = from_nfa(&nfa).unwrap();
        assert!(dfa.matches(""));
        assert!(dfa.matches("aaaaa"));
        assert!(!dfa.matches("aaab"));
    }

    #[test]
    fn sequence_of_inverted_classes_grounds_the_step3_resolution() {
        // Two sibling CharClasses, each inverted over a different char: this is the
        // shape where step 3's "own disabled chars, not some other state's" reading
        // (per `dfa.py`, diverging from spec.md's summary wording) actually matters.
        let r = sequence(
            char_class(true, vec![Atom::Single('a')]),
            char_class(true, vec![Atom::Single('b')]),
        );
        let nfa = Nfa::from_ast(&r);
        let dfa = from_nfa(&nfa).unwrap();
        assert!(dfa.matches("xy"));
        assert!(!dfa.matches("ay"));
        assert!(!dfa.matches("xb"));
        assert!(!dfa.matches("ab"));
    }
}
