//! Relation traverser: turns a relation into per-issue duplicate sets

use dupe_domain::{Confidence, DuplicateOf, DuplicateRelation, DuplicateSet, FullRelation, IssueNumber, StarRelation};
use std::collections::{HashMap, VecDeque};

/// Collect the duplicate set of every issue that takes part in the relation
///
/// A full relation yields one set per node, in node insertion order, listing
/// the rest of its connected component breadth-first. A star yields a single
/// set for its center listing the record ends in comparison order; the ends
/// themselves are not annotated.
pub fn traverse(relation: &DuplicateRelation) -> Vec<DuplicateSet> {
    match relation {
        DuplicateRelation::Full(graph) => traverse_full(graph),
        DuplicateRelation::Star(star) => traverse_star(star),
    }
}

fn traverse_full(graph: &FullRelation) -> Vec<DuplicateSet> {
    graph
        .nodes()
        .iter()
        .map(|&node| DuplicateSet {
            issue: node,
            duplicates: component_from(graph, node),
        })
        .collect()
}

/// Breadth-first walk from `start`, labelling each reached issue
///
/// A directly linked issue carries its own edge confidence. An issue reached
/// only through others carries the weakest edge on the path that first
/// reached it.
fn component_from(graph: &FullRelation, start: IssueNumber) -> Vec<DuplicateOf> {
    let mut path_confidence: HashMap<IssueNumber, Option<Confidence>> = HashMap::from([(start, None)]);
    let mut queue = VecDeque::from([start]);
    let mut reached = Vec::new();

    while let Some(node) = queue.pop_front() {
        let inherited = path_confidence.get(&node).cloned().flatten();
        for &next in graph.neighbors(node) {
            if path_confidence.contains_key(&next) {
                continue;
            }
            let Some(edge) = graph.edge(node, next) else {
                continue;
            };
            let confidence = match &inherited {
                Some(path) if path.percent() < edge.percent() => path.clone(),
                _ => edge.clone(),
            };
            path_confidence.insert(next, Some(confidence.clone()));
            reached.push(DuplicateOf {
                issue: next,
                confidence,
            });
            queue.push_back(next);
        }
    }

    reached
}

fn traverse_star(star: &StarRelation) -> Vec<DuplicateSet> {
    if star.is_empty() {
        return Vec::new();
    }

    vec![DuplicateSet {
        issue: star.center(),
        duplicates: star
            .records()
            .iter()
            .map(|r| DuplicateOf {
                issue: r.end,
                confidence: r.confidence.clone(),
            })
            .collect(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(value: u64) -> IssueNumber {
        IssueNumber::new(value)
    }

    fn token(t: &str) -> Confidence {
        Confidence::from_token(t).unwrap()
    }

    fn labels(set: &DuplicateSet) -> Vec<(u64, String)> {
        set.duplicates
            .iter()
            .map(|d| (d.issue.value(), d.confidence.label()))
            .collect()
    }

    #[test]
    fn test_chain_is_reported_from_every_node() {
        let mut graph = FullRelation::new();
        graph.add_edge(n(1), n(2), token("92")).unwrap();
        graph.add_edge(n(2), n(3), token("80")).unwrap();

        let sets = traverse(&DuplicateRelation::Full(graph));

        assert_eq!(sets.len(), 3);
        assert_eq!(sets[0].issue, n(1));
        assert_eq!(labels(&sets[0]), vec![(2, "92%".into()), (3, "80%".into())]);
        assert_eq!(sets[1].issue, n(2));
        assert_eq!(labels(&sets[1]), vec![(1, "92%".into()), (3, "80%".into())]);
        assert_eq!(sets[2].issue, n(3));
        assert_eq!(labels(&sets[2]), vec![(2, "80%".into()), (1, "80%".into())]);
    }

    #[test]
    fn test_indirect_link_takes_weakest_edge() {
        let mut graph = FullRelation::new();
        graph.add_edge(n(1), n(2), token("60")).unwrap();
        graph.add_edge(n(2), n(3), token("95")).unwrap();

        let sets = traverse(&DuplicateRelation::Full(graph));
        assert_eq!(labels(&sets[0]), vec![(2, "60%".into()), (3, "60%".into())]);
    }

    #[test]
    fn test_direct_edge_preferred_over_path() {
        let mut graph = FullRelation::new();
        graph.add_edge(n(1), n(2), token("90")).unwrap();
        graph.add_edge(n(1), n(3), token("85")).unwrap();
        graph.add_edge(n(2), n(3), token("70")).unwrap();

        let sets = traverse(&DuplicateRelation::Full(graph));
        assert_eq!(labels(&sets[0]), vec![(2, "90%".into()), (3, "85%".into())]);
    }

    #[test]
    fn test_components_do_not_mix() {
        let mut graph = FullRelation::new();
        graph.add_edge(n(1), n(2), token("90")).unwrap();
        graph.add_edge(n(5), n(6), token("75")).unwrap();

        let sets = traverse(&DuplicateRelation::Full(graph));
        assert_eq!(sets.len(), 4);
        assert_eq!(sets[0].numbers(), vec![n(2)]);
        assert_eq!(sets[2].issue, n(5));
        assert_eq!(sets[2].numbers(), vec![n(6)]);
    }

    #[test]
    fn test_star_reports_center_only() {
        let mut star = StarRelation::new(n(10));
        star.push(n(11), token("70")).unwrap();
        star.push(n(13), token("65.5")).unwrap();

        let sets = traverse(&DuplicateRelation::Star(star));

        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].issue, n(10));
        assert_eq!(labels(&sets[0]), vec![(11, "70%".into()), (13, "65.5%".into())]);
    }

    #[test]
    fn test_empty_relations_yield_nothing() {
        assert!(traverse(&DuplicateRelation::Full(FullRelation::new())).is_empty());
        assert!(traverse(&DuplicateRelation::Star(StarRelation::new(n(1)))).is_empty());
    }
}
