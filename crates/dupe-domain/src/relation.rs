//! Relation module - the duplicate links judged during one run
//!
//! Two mutually exclusive shapes exist:
//!
//! - [`FullRelation`]: an undirected graph over issue numbers, built when every
//!   issue is cross-compared. Reachability (the connected component) defines
//!   which issues are duplicates of which.
//! - [`StarRelation`]: a single hub (the newest issue) with one record per
//!   issue judged a duplicate of it. No end-to-end links exist.

use crate::{Confidence, IssueNumber};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Errors raised when a link would break a relation invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationError {
    /// An issue cannot be a duplicate of itself
    SelfLoop(IssueNumber),
}

impl fmt::Display for RelationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationError::SelfLoop(n) => write!(f, "Issue #{} cannot duplicate itself", n),
        }
    }
}

impl std::error::Error for RelationError {}

/// Undirected duplicate graph
///
/// Nodes are remembered in first-insertion order and each adjacency list keeps
/// the order in which edges were added, so traversal output is deterministic
/// and follows comparison order.
#[derive(Debug, Clone, Default)]
pub struct FullRelation {
    nodes: Vec<IssueNumber>,
    adjacency: HashMap<IssueNumber, Vec<IssueNumber>>,
    // Keyed by the orientation the edge was first added with.
    edges: HashMap<(IssueNumber, IssueNumber), Confidence>,
}

impl FullRelation {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or overwrite) the edge between `a` and `b`
    ///
    /// At most one edge exists per unordered pair: adding `(b, a)` after
    /// `(a, b)` replaces the attributes of the existing edge.
    pub fn add_edge(
        &mut self,
        a: IssueNumber,
        b: IssueNumber,
        confidence: Confidence,
    ) -> Result<(), RelationError> {
        if a == b {
            return Err(RelationError::SelfLoop(a));
        }

        if let Some(existing) = self.edge_key(a, b) {
            self.edges.insert(existing, confidence);
            return Ok(());
        }

        self.touch(a);
        self.touch(b);
        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
        self.edges.insert((a, b), confidence);
        Ok(())
    }

    fn touch(&mut self, node: IssueNumber) {
        if !self.adjacency.contains_key(&node) {
            self.nodes.push(node);
            self.adjacency.insert(node, Vec::new());
        }
    }

    fn edge_key(&self, a: IssueNumber, b: IssueNumber) -> Option<(IssueNumber, IssueNumber)> {
        if self.edges.contains_key(&(a, b)) {
            Some((a, b))
        } else if self.edges.contains_key(&(b, a)) {
            Some((b, a))
        } else {
            None
        }
    }

    /// Look up the edge attributes for a pair, in either orientation
    pub fn edge(&self, a: IssueNumber, b: IssueNumber) -> Option<&Confidence> {
        self.edges.get(&(a, b)).or_else(|| self.edges.get(&(b, a)))
    }

    /// Whether an issue takes part in at least one edge
    pub fn contains(&self, node: IssueNumber) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Nodes in first-insertion order
    pub fn nodes(&self) -> &[IssueNumber] {
        &self.nodes
    }

    /// Direct neighbours of a node, in edge insertion order
    pub fn neighbors(&self, node: IssueNumber) -> &[IssueNumber] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node reachable from `start` through any path, excluding `start`
    ///
    /// Breadth-first order: direct neighbours first, then their neighbours.
    /// Returns an empty list for a node that is not in the graph.
    pub fn reachable_from(&self, start: IssueNumber) -> Vec<IssueNumber> {
        if !self.contains(start) {
            return Vec::new();
        }

        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut reached = Vec::new();

        while let Some(node) = queue.pop_front() {
            for &next in self.neighbors(node) {
                if seen.insert(next) {
                    reached.push(next);
                    queue.push_back(next);
                }
            }
        }

        reached
    }

    /// Connected components, each listed from its earliest-inserted node
    pub fn components(&self) -> Vec<Vec<IssueNumber>> {
        let mut assigned = HashSet::new();
        let mut components = Vec::new();

        for &node in &self.nodes {
            if assigned.contains(&node) {
                continue;
            }
            let mut component = vec![node];
            component.extend(self.reachable_from(node));
            assigned.extend(component.iter().copied());
            components.push(component);
        }

        components
    }

    /// Plain-text rendering, one block per component
    ///
    /// ```text
    /// component #1 (3 issues)
    ///   #1 -- #2 (92%)
    ///   #2 -- #3 (80%)
    /// ```
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for component in self.components() {
            out.push_str(&format!(
                "component #{} ({} issues)\n",
                component[0],
                component.len()
            ));
            let members: HashSet<_> = component.iter().copied().collect();
            let mut printed = HashSet::new();
            for &node in &component {
                for &other in self.neighbors(node) {
                    if !members.contains(&other) {
                        continue;
                    }
                    let key = if node < other { (node, other) } else { (other, node) };
                    if !printed.insert(key) {
                        continue;
                    }
                    if let Some(confidence) = self.edge(node, other) {
                        out.push_str(&format!("  #{} -- #{} ({})\n", node, other, confidence));
                    }
                }
            }
        }

        out
    }
}

/// One judged link from the star center to another issue
#[derive(Debug, Clone, PartialEq)]
pub struct StarRecord {
    /// The newest issue all records share
    pub center: IssueNumber,

    /// The issue judged a duplicate of the center
    pub end: IssueNumber,

    /// Oracle confidence for this pair
    pub confidence: Confidence,
}

/// Center-only relation used when only the newest issue is evaluated
#[derive(Debug, Clone)]
pub struct StarRelation {
    center: IssueNumber,
    records: Vec<StarRecord>,
}

impl StarRelation {
    /// Create an empty star around `center`
    pub fn new(center: IssueNumber) -> Self {
        Self {
            center,
            records: Vec::new(),
        }
    }

    /// Append a record for `end`
    pub fn push(&mut self, end: IssueNumber, confidence: Confidence) -> Result<(), RelationError> {
        if end == self.center {
            return Err(RelationError::SelfLoop(end));
        }

        self.records.push(StarRecord {
            center: self.center,
            end,
            confidence,
        });
        Ok(())
    }

    /// The hub issue
    pub fn center(&self) -> IssueNumber {
        self.center
    }

    /// Records in comparison order
    pub fn records(&self) -> &[StarRecord] {
        &self.records
    }

    /// End nodes in comparison order
    pub fn ends(&self) -> Vec<IssueNumber> {
        self.records.iter().map(|r| r.end).collect()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no duplicates were recorded
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The relation assembled by one run
#[derive(Debug, Clone)]
pub enum DuplicateRelation {
    /// Built by cross-comparing every issue
    Full(FullRelation),

    /// Built by comparing only the newest issue
    Star(StarRelation),
}

impl DuplicateRelation {
    /// Count published as `duplicates-found`
    ///
    /// Node count for a full relation, record count for a star.
    pub fn annotated_count(&self) -> usize {
        match self {
            DuplicateRelation::Full(graph) => graph.node_count(),
            DuplicateRelation::Star(star) => star.len(),
        }
    }

    /// Whether the relation holds no links at all
    pub fn is_empty(&self) -> bool {
        match self {
            DuplicateRelation::Full(graph) => graph.is_empty(),
            DuplicateRelation::Star(star) => star.is_empty(),
        }
    }

    /// Issues that `issue` is related to under this relation's rules
    ///
    /// In a full relation this is the connected component minus the issue
    /// itself. In a star the center relates to every end and an end relates
    /// only to the center.
    pub fn duplicates_of(&self, issue: IssueNumber) -> Vec<IssueNumber> {
        match self {
            DuplicateRelation::Full(graph) => graph.reachable_from(issue),
            DuplicateRelation::Star(star) => {
                if issue == star.center() {
                    star.ends()
                } else if star.records().iter().any(|r| r.end == issue) {
                    vec![star.center()]
                } else {
                    Vec::new()
                }
            }
        }
    }
}
