use std::collections::{HashSet, VecDeque};

use strata_types::ContentId;

use crate::graph::CrossRefGraph;

/// Breadth-first walk up the hierarchy: every transitive ancestor of
/// the starting record, nearest first. Lazy — each `next` call does
/// one step of work, so stopping early walks no further.
pub struct Ancestors<'a> {
    graph: &'a CrossRefGraph,
    queue: VecDeque<&'a ContentId>,
    visited: HashSet<&'a ContentId>,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(graph: &'a CrossRefGraph, start: &ContentId) -> Self {
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        if let Some(links) = graph.nodes.get(start) {
            for parent in &links.parents {
                if visited.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }
        Self {
            graph,
            queue,
            visited,
        }
    }
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ContentId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.queue.pop_front()?;
        if let Some(links) = self.graph.nodes.get(current) {
            for parent in &links.parents {
                if self.visited.insert(parent) {
                    self.queue.push_back(parent);
                }
            }
        }
        Some(current)
    }
}

/// Breadth-first walk down the hierarchy: every transitive descendant
/// of the starting record, nearest first. Lazy like [`Ancestors`].
pub struct Descendants<'a> {
    graph: &'a CrossRefGraph,
    queue: VecDeque<&'a ContentId>,
    visited: HashSet<&'a ContentId>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(graph: &'a CrossRefGraph, start: &ContentId) -> Self {
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        if let Some(links) = graph.nodes.get(start) {
            for child in &links.children {
                if visited.insert(child) {
                    queue.push_back(child);
                }
            }
        }
        Self {
            graph,
            queue,
            visited,
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ContentId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.queue.pop_front()?;
        if let Some(links) = self.graph.nodes.get(current) {
            for child in &links.children {
                if self.visited.insert(child) {
                    self.queue.push_back(child);
                }
            }
        }
        Some(current)
    }
}

/// Records one related/sibling hop away from the starting record, in
/// declaration order. Relatedness is not transitive, so this is a
/// single-hop sequence, still produced lazily for a uniform surface.
pub struct RelatedTo<'a> {
    neighbors: std::slice::Iter<'a, ContentId>,
}

impl<'a> RelatedTo<'a> {
    pub(crate) fn new(graph: &'a CrossRefGraph, start: &ContentId) -> Self {
        let neighbors = graph
            .nodes
            .get(start)
            .map(|links| links.related.as_slice())
            .unwrap_or(&[])
            .iter();
        Self { neighbors }
    }
}

impl<'a> Iterator for RelatedTo<'a> {
    type Item = &'a ContentId;

    fn next(&mut self) -> Option<Self::Item> {
        self.neighbors.next()
    }
}
