//! Advisory validation of the enabled-pass list.
//!
//! Every check here is non-fatal. The pass list is large and organically
//! grown; failing hard on an imperfect constraint graph would make the
//! pipeline unusable as it evolves. Scheduling has its own deterministic
//! fallback, so validation only reports.

use std::collections::{HashMap, HashSet};

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::pass::schedule::dependency_edges;
use crate::pass::Pass;

/// Checks `passes` for duplicate names, dangling dependency references, and
/// dependency cycles. Returns the diagnostics; never aborts.
pub fn validate(passes: &[Pass]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    // Duplicate names: reported once per colliding name. Both instances
    // still run; a collision usually means accidental double registration,
    // since intentional replays use distinct names.
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for pass in passes {
        *counts.entry(pass.name()).or_insert(0) += 1;
    }
    let mut reported: HashSet<&str> = HashSet::new();
    for pass in passes {
        let name = pass.name();
        if counts[name] > 1 && reported.insert(name) {
            diagnostics.push(Diagnostic::emit(
                DiagnosticKind::DuplicateName,
                format!("pass name '{}' is registered {} times", name, counts[name]),
            ));
        }
    }

    // Dangling references: a constraint on an absent or disabled pass is
    // vacuous and likely stale.
    let known: HashSet<&str> = passes.iter().map(|p| p.name()).collect();
    for pass in passes {
        for dep in pass.run_after_names().iter().chain(pass.run_before_names()) {
            if !known.contains(dep.as_str()) {
                diagnostics.push(Diagnostic::emit(
                    DiagnosticKind::MissingDependency,
                    format!(
                        "pass '{}' references '{}', which is not in the enabled set",
                        pass.name(),
                        dep
                    ),
                ));
            }
        }
    }

    if let Some(cycle) = find_cycle(passes) {
        let names: Vec<&str> = cycle.iter().map(|&i| passes[i].name()).collect();
        diagnostics.push(Diagnostic::emit(
            DiagnosticKind::DependencyCycle,
            format!("dependency cycle: {}", names.join(" -> ")),
        ));
    }

    diagnostics
}

/// Depth-first search for the first cycle in the derived dependency graph.
/// Returns the cycle as index positions, closed (first element repeated at
/// the end).
fn find_cycle(passes: &[Pass]) -> Option<Vec<usize>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Color {
        White,
        Gray,
        Black,
    }

    let succs = dependency_edges(passes);
    let mut color = vec![Color::White; passes.len()];
    let mut stack: Vec<usize> = Vec::new();

    fn visit(
        i: usize,
        succs: &[Vec<usize>],
        color: &mut [Color],
        stack: &mut Vec<usize>,
    ) -> Option<Vec<usize>> {
        color[i] = Color::Gray;
        stack.push(i);
        for &j in &succs[i] {
            match color[j] {
                Color::Gray => {
                    // Back edge: the cycle is the stack suffix from j.
                    let start = stack.iter().position(|&k| k == j).unwrap_or(0);
                    let mut cycle: Vec<usize> = stack[start..].to_vec();
                    cycle.push(j);
                    return Some(cycle);
                }
                Color::White => {
                    if let Some(cycle) = visit(j, succs, color, stack) {
                        return Some(cycle);
                    }
                }
                Color::Black => {}
            }
        }
        stack.pop();
        color[i] = Color::Black;
        None
    }

    for i in 0..passes.len() {
        if color[i] == Color::White {
            if let Some(cycle) = visit(i, &succs, &mut color, &mut stack) {
                return Some(cycle);
            }
        }
    }
    None
}
