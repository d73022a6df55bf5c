use std::collections::{HashSet, VecDeque};
use std::fmt::{Display, Formatter};

/// Stable handle into the state arena. Handles never move or dangle;
/// a state abandoned by a merge simply becomes unreachable.
pub(crate) type StateId = usize;

/// Label on an automaton edge: either a literal character consuming one
/// input symbol, or an epsilon consuming none.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TransitionKind {
    Symbol(char),
    Epsilon,
}

impl Display for TransitionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionKind::Symbol(c) => write!(f, "{c}"),
            TransitionKind::Epsilon => write!(f, "ε"),
        }
    }
}

/// One reachable edge of the final automaton, reported with renumbered ids.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub kind: TransitionKind,
}

#[derive(Debug)]
struct State {
    /// Display identifier: creation order during construction, rewritten
    /// to BFS discovery order by the renumbering pass.
    id: usize,
    accepting: bool,
    /// Outgoing edges in insertion order. Order is irrelevant to NFA
    /// semantics but drives deterministic renumbering and serialization.
    edges: Vec<(TransitionKind, StateId)>,
}

/// Automaton piece with exactly one start and one end state; the unit of
/// composition during construction. The end state has no outgoing edges
/// and is the fragment's only accepting state at the moment it is returned.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct Fragment {
    pub start: StateId,
    pub end: StateId,
}

/// Growing state arena plus the Thompson splicing operations. Owned by a
/// single parser for the duration of one compile; dropping it releases
/// every state, reachable or not.
pub(crate) struct StateArena {
    states: Vec<State>,
}

impl StateArena {
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    fn new_state(&mut self, accepting: bool) -> StateId {
        let id = self.states.len();
        self.states.push(State {
            id,
            accepting,
            edges: Vec::new(),
        });
        id
    }

    fn add_edge(&mut self, from: StateId, kind: TransitionKind, to: StateId) {
        self.states[from].edges.push((kind, to));
    }

    /// `s --c--> e`, with `e` accepting.
    pub fn literal(&mut self, c: char) -> Fragment {
        let start = self.new_state(false);
        let end = self.new_state(true);
        self.add_edge(start, TransitionKind::Symbol(c), end);
        Fragment { start, end }
    }

    /// `s --ε--> e`. Stands in for the empty expression and for the
    /// degenerate fragment produced after a syntax error.
    pub fn epsilon(&mut self) -> Fragment {
        let start = self.new_state(false);
        let end = self.new_state(true);
        self.add_edge(start, TransitionKind::Epsilon, end);
        Fragment { start, end }
    }

    /// Concatenation merge: the right start state's contents move onto the
    /// left end state, and the right start slot becomes unreachable. Safe
    /// because a returned fragment's start state never has incoming edges.
    pub fn concatenate(&mut self, left: Fragment, right: Fragment) -> Fragment {
        let moved_edges = std::mem::take(&mut self.states[right.start].edges);
        let moved_accepting = self.states[right.start].accepting;
        self.states[left.end].edges = moved_edges;
        self.states[left.end].accepting = moved_accepting;
        Fragment {
            start: left.start,
            end: right.end,
        }
    }

    /// Zero or more: skippable entirely, loops back after each pass.
    pub fn star(&mut self, fragment: Fragment) -> Fragment {
        let start = self.new_state(false);
        let end = self.new_state(true);
        self.states[fragment.end].accepting = false;
        self.add_edge(start, TransitionKind::Epsilon, end);
        self.add_edge(start, TransitionKind::Epsilon, fragment.start);
        self.add_edge(fragment.end, TransitionKind::Epsilon, end);
        self.add_edge(fragment.end, TransitionKind::Epsilon, fragment.start);
        Fragment { start, end }
    }

    /// One or more: no edge from the new start straight to the new end,
    /// so the body must be traversed at least once.
    pub fn plus(&mut self, fragment: Fragment) -> Fragment {
        let start = self.new_state(false);
        let end = self.new_state(true);
        self.states[fragment.end].accepting = false;
        self.add_edge(start, TransitionKind::Epsilon, fragment.start);
        self.add_edge(fragment.end, TransitionKind::Epsilon, end);
        self.add_edge(fragment.end, TransitionKind::Epsilon, fragment.start);
        Fragment { start, end }
    }

    /// Zero or one.
    pub fn optional(&mut self, fragment: Fragment) -> Fragment {
        let start = self.new_state(false);
        let end = self.new_state(true);
        self.states[fragment.end].accepting = false;
        self.add_edge(start, TransitionKind::Epsilon, fragment.start);
        self.add_edge(start, TransitionKind::Epsilon, end);
        self.add_edge(fragment.end, TransitionKind::Epsilon, end);
        Fragment { start, end }
    }

    /// `left|right`: both branch ends lose their accepting flag and
    /// converge on a fresh accepting end.
    pub fn alternate(&mut self, left: Fragment, right: Fragment) -> Fragment {
        let start = self.new_state(false);
        let end = self.new_state(true);
        self.states[left.end].accepting = false;
        self.states[right.end].accepting = false;
        self.add_edge(start, TransitionKind::Epsilon, left.start);
        self.add_edge(start, TransitionKind::Epsilon, right.start);
        self.add_edge(left.end, TransitionKind::Epsilon, end);
        self.add_edge(right.end, TransitionKind::Epsilon, end);
        Fragment { start, end }
    }

    #[cfg(test)]
    pub fn edges_of(&self, state: StateId) -> &[(TransitionKind, StateId)] {
        &self.states[state].edges
    }
}

/// The finished automaton: the arena of one compile plus the top-level
/// fragment's start and accepting states.
pub struct Nfa {
    states: Vec<State>,
    start: StateId,
    accept: StateId,
}

impl Nfa {
    pub(crate) fn new(arena: StateArena, fragment: Fragment) -> Self {
        Self {
            states: arena.states,
            start: fragment.start,
            accept: fragment.end,
        }
    }

    /// Renumbered identifier of the start state (always 0 after the
    /// renumbering pass).
    pub fn start_id(&self) -> usize {
        self.states[self.start].id
    }

    /// Renumbered identifier of the accepting state.
    pub fn accept_id(&self) -> usize {
        self.states[self.accept].id
    }

    /// Number of states reachable from the start state.
    pub fn state_count(&self) -> usize {
        self.reachable().len()
    }

    /// Identifiers of every reachable accepting state.
    pub fn accepting_ids(&self) -> Vec<usize> {
        self.reachable()
            .into_iter()
            .filter(|&s| self.states[s].accepting)
            .map(|s| self.states[s].id)
            .collect()
    }

    /// Reachable states in breadth-first discovery order, sibling order
    /// following edge insertion order.
    fn reachable(&self) -> Vec<StateId> {
        let mut vis = HashSet::from([self.start]);
        let mut queue = VecDeque::from([self.start]);
        let mut order = Vec::new();
        while let Some(cur) = queue.pop_front() {
            order.push(cur);
            for &(_, to) in &self.states[cur].edges {
                if vis.insert(to) {
                    queue.push_back(to);
                }
            }
        }
        order
    }

    /// Reassigns every reachable state's identifier to its breadth-first
    /// discovery order, producing a dense 0-based numbering independent of
    /// how many states were created and abandoned during construction.
    pub(crate) fn renumber(&mut self) {
        for (id, state) in self.reachable().into_iter().enumerate() {
            self.states[state].id = id;
        }
    }

    /// Every reachable edge as `(from, to, label)` records, in depth-first
    /// order: all edges of a state are emitted before recursing into its
    /// first unvisited target. Cycle-safe via a visited set.
    pub fn transitions(&self) -> Vec<Transition> {
        let mut vis = HashSet::new();
        let mut out = Vec::new();
        self.collect_transitions(self.start, &mut vis, &mut out);
        out
    }

    fn collect_transitions(
        &self,
        state: StateId,
        vis: &mut HashSet<StateId>,
        out: &mut Vec<Transition>,
    ) {
        vis.insert(state);
        for &(kind, to) in &self.states[state].edges {
            out.push(Transition {
                from: self.states[state].id,
                to: self.states[to].id,
                kind,
            });
            if !vis.contains(&to) {
                self.collect_transitions(to, vis, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finish(arena: StateArena, fragment: Fragment) -> Nfa {
        let mut nfa = Nfa::new(arena, fragment);
        nfa.renumber();
        nfa
    }

    mod literal {
        use super::*;

        #[test]
        fn builds_two_states_with_one_symbol_edge() {
            // given
            let mut arena = StateArena::new();

            // when
            let fragment = arena.literal('a');
            let nfa = finish(arena, fragment);

            // then
            assert_eq!(nfa.state_count(), 2);
            assert_eq!(nfa.start_id(), 0);
            assert_eq!(nfa.accept_id(), 1);
            assert_eq!(
                nfa.transitions(),
                vec![Transition {
                    from: 0,
                    to: 1,
                    kind: TransitionKind::Symbol('a'),
                }]
            );
        }
    }

    mod concatenate {
        use super::*;

        #[test]
        fn moves_right_start_edges_onto_left_end_unmodified() {
            // given
            let mut arena = StateArena::new();
            let left = arena.literal('a');
            let right = arena.literal('b');
            let right_start_edges = arena.edges_of(right.start).to_vec();

            // when
            let merged = arena.concatenate(left, right);

            // then
            assert_eq!(arena.edges_of(left.end), &right_start_edges[..]);
            assert!(arena.edges_of(right.start).is_empty());
            assert_eq!(merged, Fragment { start: left.start, end: right.end });
        }

        #[test]
        fn merged_automaton_has_three_states_and_one_accepting() {
            // given
            let mut arena = StateArena::new();
            let left = arena.literal('a');
            let right = arena.literal('b');

            // when
            let merged = arena.concatenate(left, right);
            let nfa = finish(arena, merged);

            // then
            assert_eq!(nfa.state_count(), 3);
            assert_eq!(nfa.accepting_ids(), vec![2]);
            assert_eq!(
                nfa.transitions(),
                vec![
                    Transition { from: 0, to: 1, kind: TransitionKind::Symbol('a') },
                    Transition { from: 1, to: 2, kind: TransitionKind::Symbol('b') },
                ]
            );
        }
    }

    mod star {
        use super::*;

        #[test]
        fn wraps_fragment_with_skip_and_loop_edges() {
            // given
            let mut arena = StateArena::new();
            let inner = arena.literal('a');

            // when
            let starred = arena.star(inner);
            let nfa = finish(arena, starred);

            // then: 2 inner states + 2 wrapper states
            assert_eq!(nfa.state_count(), 4);
            assert_eq!(nfa.accepting_ids(), vec![nfa.accept_id()]);
            assert_eq!(
                nfa.transitions(),
                vec![
                    Transition { from: 0, to: 1, kind: TransitionKind::Epsilon },
                    Transition { from: 0, to: 2, kind: TransitionKind::Epsilon },
                    Transition { from: 2, to: 3, kind: TransitionKind::Symbol('a') },
                    Transition { from: 3, to: 1, kind: TransitionKind::Epsilon },
                    Transition { from: 3, to: 2, kind: TransitionKind::Epsilon },
                ]
            );
        }
    }

    mod plus {
        use super::*;

        #[test]
        fn has_no_direct_skip_edge_from_start_to_end() {
            // given
            let mut arena = StateArena::new();
            let inner = arena.literal('a');

            // when
            let plussed = arena.plus(inner);
            let nfa = finish(arena, plussed);

            // then
            assert_eq!(nfa.state_count(), 4);
            let start = nfa.start_id();
            let accept = nfa.accept_id();
            assert!(
                !nfa.transitions()
                    .iter()
                    .any(|t| t.from == start && t.to == accept)
            );
            assert_eq!(
                nfa.transitions(),
                vec![
                    Transition { from: 0, to: 1, kind: TransitionKind::Epsilon },
                    Transition { from: 1, to: 2, kind: TransitionKind::Symbol('a') },
                    Transition { from: 2, to: 3, kind: TransitionKind::Epsilon },
                    Transition { from: 2, to: 1, kind: TransitionKind::Epsilon },
                ]
            );
        }
    }

    mod optional {
        use super::*;

        #[test]
        fn allows_skipping_but_not_looping() {
            // given
            let mut arena = StateArena::new();
            let inner = arena.literal('a');

            // when
            let opt = arena.optional(inner);
            let nfa = finish(arena, opt);

            // then
            assert_eq!(nfa.state_count(), 4);
            assert_eq!(
                nfa.transitions(),
                vec![
                    Transition { from: 0, to: 1, kind: TransitionKind::Epsilon },
                    Transition { from: 1, to: 3, kind: TransitionKind::Symbol('a') },
                    Transition { from: 3, to: 2, kind: TransitionKind::Epsilon },
                    Transition { from: 0, to: 2, kind: TransitionKind::Epsilon },
                ]
            );
            // no loop back into the body
            assert!(
                !nfa.transitions()
                    .iter()
                    .any(|t| t.from == 3 && t.to == 1)
            );
        }
    }

    mod alternate {
        use super::*;

        #[test]
        fn branches_converge_on_a_single_accepting_state() {
            // given
            let mut arena = StateArena::new();
            let left = arena.literal('a');
            let right = arena.literal('b');

            // when
            let alt = arena.alternate(left, right);
            let nfa = finish(arena, alt);

            // then
            assert_eq!(nfa.state_count(), 6);
            assert_eq!(nfa.accepting_ids(), vec![nfa.accept_id()]);
            assert_eq!(
                nfa.transitions(),
                vec![
                    Transition { from: 0, to: 1, kind: TransitionKind::Epsilon },
                    Transition { from: 1, to: 3, kind: TransitionKind::Symbol('a') },
                    Transition { from: 3, to: 5, kind: TransitionKind::Epsilon },
                    Transition { from: 0, to: 2, kind: TransitionKind::Epsilon },
                    Transition { from: 2, to: 4, kind: TransitionKind::Symbol('b') },
                    Transition { from: 4, to: 5, kind: TransitionKind::Epsilon },
                ]
            );
        }
    }

    mod renumber {
        use super::*;

        #[test]
        fn assigns_dense_ids_in_bfs_order_despite_abandoned_states() {
            // given: (ab)* leaves one merged-away slot in the arena
            let mut arena = StateArena::new();
            let a = arena.literal('a');
            let b = arena.literal('b');
            let ab = arena.concatenate(a, b);
            let starred = arena.star(ab);

            // when
            let nfa = finish(arena, starred);

            // then: ids are 0..N-1 over reachable states, start first
            let mut ids = nfa.transitions().iter().fold(
                vec![nfa.start_id()],
                |mut acc, t| {
                    acc.push(t.from);
                    acc.push(t.to);
                    acc
                },
            );
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids, (0..nfa.state_count()).collect::<Vec<_>>());
            assert_eq!(nfa.start_id(), 0);
        }

        #[test]
        fn traversal_terminates_on_cyclic_graphs() {
            // given
            let mut arena = StateArena::new();
            let inner = arena.literal('a');
            let starred = arena.star(inner);

            // when: both walks must tolerate the star's cycle
            let nfa = finish(arena, starred);

            // then
            assert_eq!(nfa.state_count(), 4);
            assert_eq!(nfa.transitions().len(), 5);
        }
    }
}
