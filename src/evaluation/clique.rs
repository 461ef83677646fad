use std::collections::BTreeSet;
use tracing::debug;

use crate::core::overhang::OverhangRecord;
use crate::evaluation::diagnostics::OverhangSetDiagnostics;
use crate::evaluation::evaluator::unique_records;

/// Undirected graph over overhangs where an edge means "safe to use together".
///
/// Nodes are the distinct input overhangs that pass the weak-anneal and
/// self-misanneal filters; two nodes are adjacent unless their pairs are
/// named together in a cross-misanneal.
#[derive(Debug, Clone)]
pub struct CompatibilityGraph {
    nodes: Vec<String>,
    adjacency: Vec<BTreeSet<usize>>,
}

impl CompatibilityGraph {
    /// Build the graph for the records that produced `diagnostics`
    #[must_use]
    pub fn build(diagnostics: &OverhangSetDiagnostics, records: &[OverhangRecord]) -> Self {
        let unreliable = diagnostics.unreliable_pairs();
        let survivors: Vec<&OverhangRecord> = unique_records(records)
            .into_iter()
            .filter(|r| !unreliable.contains(&r.pair()))
            .collect();

        let mut adjacency = vec![BTreeSet::new(); survivors.len()];
        for (i, a) in survivors.iter().enumerate() {
            for (j, b) in survivors.iter().enumerate().skip(i + 1) {
                if !diagnostics.cross_misanneal_between(&a.pair(), &b.pair()) {
                    adjacency[i].insert(j);
                    adjacency[j].insert(i);
                }
            }
        }

        let nodes: Vec<String> = survivors.iter().map(|r| r.input().to_string()).collect();
        debug!(
            "Compatibility graph: {} of {} overhang(s) kept, {} edge(s)",
            nodes.len(),
            records.len(),
            adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
        );
        Self { nodes, adjacency }
    }

    /// Overhangs that survived filtering, in input order
    #[must_use]
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    #[must_use]
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        let (Some(i), Some(j)) = (self.position(a), self.position(b)) else {
            return false;
        };
        self.adjacency[i].contains(&j)
    }

    fn position(&self, seq: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n == seq)
    }

    /// A maximum-cardinality clique.
    ///
    /// Bron-Kerbosch with pivoting, pruned whenever the current clique plus all
    /// remaining candidates cannot beat the best found so far. Among cliques of
    /// equal size the first reached in node order wins.
    #[must_use]
    pub fn max_clique(&self) -> BTreeSet<String> {
        let mut best = Vec::new();
        let candidates: BTreeSet<usize> = (0..self.nodes.len()).collect();
        self.expand(&mut Vec::new(), candidates, BTreeSet::new(), &mut best);
        best.into_iter().map(|i| self.nodes[i].clone()).collect()
    }

    fn expand(
        &self,
        clique: &mut Vec<usize>,
        mut candidates: BTreeSet<usize>,
        mut excluded: BTreeSet<usize>,
        best: &mut Vec<usize>,
    ) {
        if candidates.is_empty() {
            if clique.len() > best.len() {
                best.clone_from(clique);
            }
            return;
        }
        if clique.len() + candidates.len() <= best.len() {
            return;
        }

        // Pivot on the vertex covering the most candidates
        let pivot = candidates
            .union(&excluded)
            .copied()
            .max_by_key(|&u| candidates.intersection(&self.adjacency[u]).count())
            .unwrap_or_default();
        let branches: Vec<usize> = candidates
            .difference(&self.adjacency[pivot])
            .copied()
            .collect();

        for v in branches {
            let neighbors = &self.adjacency[v];
            clique.push(v);
            self.expand(
                clique,
                candidates.intersection(neighbors).copied().collect(),
                excluded.intersection(neighbors).copied().collect(),
                best,
            );
            clique.pop();
            candidates.remove(&v);
            excluded.insert(v);
        }
    }
}

/// Largest group of input overhangs that are pairwise free of misannealing.
///
/// Overhangs with a weak or self-misannealing pair are dropped first. Repeated
/// inputs appear once.
#[must_use]
pub fn find_compatible_subset(
    diagnostics: &OverhangSetDiagnostics,
    records: &[OverhangRecord],
) -> BTreeSet<String> {
    let subset = CompatibilityGraph::build(diagnostics, records).max_clique();
    debug!("Compatible subset of {} overhang(s)", subset.len());
    subset
}
