//! Pass ordering: stable topological sort with a deterministic fallback.
//!
//! The enabled-pass array's index order is the authoritative default order;
//! `run_after` / `run_before` declarations contribute the only edges. The
//! sort is stable: whenever several passes are simultaneously ready, the one
//! registered earliest wins, so the result is a minimal perturbation of the
//! declared order rather than an arbitrary valid order.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::pass::Pass;

/// Successor lists for the derived dependency graph, indexed by array
/// position. Edge `i -> j` means pass `i` must execute before pass `j`.
///
/// Built fresh from the current enabled set on every assembly; never cached.
/// Constraints are declared by name, and duplicate names are tolerated, so a
/// name resolves to *every* index carrying it. A pass naming itself yields a
/// self-edge, which the sort treats as a cycle like any other.
pub(crate) fn dependency_edges(passes: &[Pass]) -> Vec<Vec<usize>> {
    let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, pass) in passes.iter().enumerate() {
        by_name.entry(pass.name()).or_default().push(i);
    }

    let mut succs: Vec<Vec<usize>> = vec![Vec::new(); passes.len()];
    for (i, pass) in passes.iter().enumerate() {
        for dep in pass.run_after_names() {
            if let Some(sources) = by_name.get(dep.as_str()) {
                for &j in sources {
                    succs[j].push(i);
                }
            }
            // Absent names contribute no edge; the validator reports them.
        }
        for dep in pass.run_before_names() {
            if let Some(targets) = by_name.get(dep.as_str()) {
                for &j in targets {
                    succs[i].push(j);
                }
            }
        }
    }
    succs
}

/// Resolves the execution order for `passes`.
///
/// Returns indices into `passes` in execution order, plus any diagnostics.
/// Kahn's algorithm with the ready set kept as a min-heap of original
/// indices. If the graph has a cycle the topological result is abandoned and
/// the original order is returned unchanged, with a cycle diagnostic; the
/// cycle's intended ordering is simply not honored.
pub fn schedule(passes: &[Pass]) -> (Vec<usize>, Vec<Diagnostic>) {
    let n = passes.len();
    let succs = dependency_edges(passes);

    let mut indegree = vec![0usize; n];
    for out in &succs {
        for &j in out {
            indegree[j] += 1;
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = (0..n)
        .filter(|&i| indegree[i] == 0)
        .map(Reverse)
        .collect();

    let mut order = Vec::with_capacity(n);
    while let Some(Reverse(i)) = ready.pop() {
        order.push(i);
        for &j in &succs[i] {
            indegree[j] -= 1;
            if indegree[j] == 0 {
                ready.push(Reverse(j));
            }
        }
    }

    if order.len() < n {
        let stuck: Vec<&str> = (0..n)
            .filter(|&i| indegree[i] > 0)
            .map(|i| passes[i].name())
            .collect();
        let diag = Diagnostic::emit(
            DiagnosticKind::DependencyCycle,
            format!(
                "dependency cycle among passes [{}]; keeping registration order",
                stuck.join(", ")
            ),
        );
        return ((0..n).collect(), vec![diag]);
    }

    (order, Vec::new())
}
