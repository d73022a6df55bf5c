use crate::nfa::Nfa;

/// Renders the automaton as Graphviz DOT text: the accepting state as a
/// doublecircle, a plaintext arrow into the start state, then one line per
/// reachable edge in traversal order. Formatting only, no I/O.
pub fn to_dot(nfa: &Nfa) -> String {
    let mut out = String::new();
    out.push_str("digraph nfa {\n");
    out.push_str("  rankdir = LR;\n");
    out.push_str(&format!(
        "  node [shape = doublecircle]; {};\n",
        nfa.accept_id()
    ));
    out.push_str("  node [shape = plaintext];\n");
    out.push_str(&format!(
        "  \"\" -> {} [label = \"start\"];\n",
        nfa.start_id()
    ));
    out.push_str("  node [shape = circle];\n");
    for transition in nfa.transitions() {
        out.push_str(&format!(
            "  {} -> {} [label = \"{}\"];\n",
            transition.from, transition.to, transition.kind
        ));
    }
    out.push('}');
    out
}
