use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use strata_types::{ContentId, ContentItem, Corpus, Relationship};
use tracing::{debug, info};

use crate::findings::{GraphFinding, GraphReport};
use crate::traverse::{Ancestors, Descendants, RelatedTo};

/// How unresolved targets are treated.
///
/// `Lenient` is the authoring-time default; `Strict` is the
/// pre-publish gate, where a dangling reference blocks the build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveMode {
    #[default]
    Lenient,
    Strict,
}

/// Adjacency for one record. Parent/child declarations are normalized
/// into one parent→child direction; related and sibling edges share an
/// undirected adjacency.
#[derive(Clone, Debug, Default)]
pub(crate) struct NodeLinks {
    pub(crate) parents: Vec<ContentId>,
    pub(crate) children: Vec<ContentId>,
    pub(crate) related: Vec<ContentId>,
}

/// The resolved cross-reference graph, queryable once the resolver has
/// found nothing corpus-fatal. Immutable after construction.
#[derive(Clone, Debug, Default)]
pub struct CrossRefGraph {
    pub(crate) nodes: BTreeMap<ContentId, NodeLinks>,
}

/// Resolver result: the report always, the query handle only when the
/// report carries nothing fatal.
#[derive(Clone, Debug)]
pub struct GraphOutcome {
    pub report: GraphReport,
    pub graph: Option<CrossRefGraph>,
}

/// Build the cross-reference graph over the whole corpus and check
/// resolvability, parent/child symmetry, and hierarchy acyclicity.
///
/// Requires the complete corpus: this is the barrier stage, since an
/// edge can only be judged dangling once every id is known.
pub fn resolve(corpus: &Corpus, mode: ResolveMode) -> GraphOutcome {
    let mut by_id: HashMap<&ContentId, &ContentItem> = HashMap::new();
    for item in corpus.items() {
        // First occurrence wins; duplicate ids are the registry
        // builder's fatality, not ours.
        by_id.entry(&item.id).or_insert(item);
    }

    let mut graph = CrossRefGraph::default();
    for id in by_id.keys() {
        graph.nodes.insert((*id).clone(), NodeLinks::default());
    }

    let mut findings = Vec::new();
    for item in corpus.items() {
        for xref in &item.cross_references {
            if xref.target_id.as_str().is_empty() {
                // Locally malformed; the schema validator owns it.
                continue;
            }
            let Some(target) = by_id.get(&xref.target_id) else {
                let fatal = mode == ResolveMode::Strict;
                debug!(source = %item.id, target = %xref.target_id, "orphan reference");
                findings.push(GraphFinding::orphan(&item.id, &xref.target_id, fatal));
                continue;
            };

            graph.add_edge(&item.id, &xref.target_id, xref.relationship);

            if xref.relationship.is_hierarchical() && !declares_reciprocal(target, item, xref.relationship)
            {
                debug!(source = %item.id, target = %xref.target_id, "asymmetric relationship");
                findings.push(GraphFinding::asymmetric(&item.id, &xref.target_id));
            }
        }
    }

    for cycle in graph.find_hierarchy_cycles() {
        findings.push(GraphFinding::cycle(cycle));
    }

    let report = GraphReport { findings };
    info!(
        nodes = graph.nodes.len(),
        findings = report.findings.len(),
        fatal = report.is_fatal(),
        "cross-reference resolution complete"
    );

    let graph = if report.is_fatal() { None } else { Some(graph) };
    GraphOutcome { report, graph }
}

fn declares_reciprocal(target: &ContentItem, source: &ContentItem, relationship: Relationship) -> bool {
    target.cross_references.iter().any(|back| {
        back.target_id == source.id && back.relationship == relationship.reciprocal()
    })
}

impl CrossRefGraph {
    pub fn contains(&self, id: &ContentId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Direct parents of a record, in declaration order.
    pub fn parents_of(&self, id: &ContentId) -> &[ContentId] {
        self.nodes
            .get(id)
            .map(|links| links.parents.as_slice())
            .unwrap_or(&[])
    }

    /// Direct children of a record, in declaration order.
    pub fn children_of(&self, id: &ContentId) -> &[ContentId] {
        self.nodes
            .get(id)
            .map(|links| links.children.as_slice())
            .unwrap_or(&[])
    }

    /// Every transitive ancestor of `id`, nearest first, lazily.
    ///
    /// Each call starts a fresh traversal; nothing is materialized up
    /// front, so taking the first few ancestors walks no further.
    pub fn ancestors<'a>(&'a self, id: &ContentId) -> Ancestors<'a> {
        Ancestors::new(self, id)
    }

    /// Every transitive descendant of `id`, nearest first, lazily.
    pub fn descendants<'a>(&'a self, id: &ContentId) -> Descendants<'a> {
        Descendants::new(self, id)
    }

    /// Records one related/sibling hop away, in declaration order.
    /// Related edges are not transitive, so this never walks further.
    pub fn related_to<'a>(&'a self, id: &ContentId) -> RelatedTo<'a> {
        RelatedTo::new(self, id)
    }

    /// Record a resolved edge. Parent declarations are flipped into
    /// the parent→child direction so both authoring styles land in one
    /// hierarchy; a mirrored pair therefore inserts only once.
    fn add_edge(&mut self, source: &ContentId, target: &ContentId, relationship: Relationship) {
        match relationship {
            Relationship::Child => self.link_parent_child(source, target),
            Relationship::Parent => self.link_parent_child(target, source),
            Relationship::Related | Relationship::Sibling => {
                self.link_related(source, target);
            }
        }
    }

    fn link_parent_child(&mut self, parent: &ContentId, child: &ContentId) {
        let links = self.nodes.entry(parent.clone()).or_default();
        if !links.children.contains(child) {
            links.children.push(child.clone());
        }
        let links = self.nodes.entry(child.clone()).or_default();
        if !links.parents.contains(parent) {
            links.parents.push(parent.clone());
        }
    }

    fn link_related(&mut self, a: &ContentId, b: &ContentId) {
        let links = self.nodes.entry(a.clone()).or_default();
        if !links.related.contains(b) {
            links.related.push(b.clone());
        }
        let links = self.nodes.entry(b.clone()).or_default();
        if !links.related.contains(a) {
            links.related.push(a.clone());
        }
    }

    /// Find every cycle in the parent→child hierarchy with an
    /// iterative colored depth-first search. Each back edge yields the
    /// id walk from the re-entered node down to itself.
    fn find_hierarchy_cycles(&self) -> Vec<Vec<ContentId>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Color {
            White,
            Gray,
            Black,
        }

        let mut color: HashMap<&ContentId, Color> =
            self.nodes.keys().map(|id| (id, Color::White)).collect();
        let mut cycles = Vec::new();

        for start in self.nodes.keys() {
            if color[start] != Color::White {
                continue;
            }
            let mut stack: Vec<(&ContentId, usize)> = vec![(start, 0)];
            let mut path: Vec<&ContentId> = vec![start];
            color.insert(start, Color::Gray);

            while !stack.is_empty() {
                let (node, next_child) = {
                    let frame = stack.last_mut().expect("non-empty stack");
                    let children = &self.nodes[frame.0].children;
                    if frame.1 < children.len() {
                        let child = &children[frame.1];
                        frame.1 += 1;
                        (frame.0, Some(child))
                    } else {
                        (frame.0, None)
                    }
                };

                match next_child {
                    Some(child) => match color.get(child).copied().unwrap_or(Color::Black) {
                        Color::White => {
                            color.insert(child, Color::Gray);
                            stack.push((child, 0));
                            path.push(child);
                        }
                        Color::Gray => {
                            let entry = path
                                .iter()
                                .position(|on_path| *on_path == child)
                                .expect("gray node is on the current path");
                            let mut cycle: Vec<ContentId> =
                                path[entry..].iter().map(|id| (*id).clone()).collect();
                            cycle.push(child.clone());
                            cycles.push(cycle);
                        }
                        Color::Black => {}
                    },
                    None => {
                        color.insert(node, Color::Black);
                        stack.pop();
                        path.pop();
                    }
                }
            }
        }

        cycles
    }
}
