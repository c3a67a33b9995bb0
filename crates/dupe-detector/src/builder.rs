//! Relation builder: drives pairwise comparisons for one run

use crate::error::DetectorError;
use crate::types::BuildOutcome;
use crate::verdict::parse_verdict;
use dupe_domain::traits::SimilarityOracle;
use dupe_domain::{DuplicateRelation, FullRelation, Issue, IssueNumber, Mode, StarRelation, Verdict};
use std::fmt::Display;
use tracing::{debug, info};

/// Asks the oracle about issue pairs and assembles the duplicate relation
///
/// Issues are taken in tracker order; index 0 is the newest issue. Every
/// comparison is made as `(earlier index, later index)` and never twice for
/// the same unordered pair. The first oracle or verdict failure aborts the
/// build.
pub struct RelationBuilder<'a, O> {
    oracle: &'a O,
}

impl<'a, O> RelationBuilder<'a, O>
where
    O: SimilarityOracle,
    O::Error: Display,
{
    /// Create a builder over an oracle
    pub fn new(oracle: &'a O) -> Self {
        Self { oracle }
    }

    /// Build the relation for `mode`
    ///
    /// `is_flagged` reports whether an issue already carries the duplicate
    /// label or a bot annotation. In full mode a flagged issue is never used
    /// as the source of a comparison, but it can still be the target of one.
    /// Star mode always re-evaluates the newest issue and never consults it.
    pub fn build<F, E>(
        &self,
        issues: &[Issue],
        mode: Mode,
        is_flagged: F,
    ) -> Result<BuildOutcome, DetectorError>
    where
        F: FnMut(IssueNumber) -> Result<bool, E>,
        E: Display,
    {
        match mode {
            Mode::Full => self.build_full(issues, is_flagged),
            Mode::Star => self.build_star(issues),
        }
    }

    fn build_full<F, E>(&self, issues: &[Issue], mut is_flagged: F) -> Result<BuildOutcome, DetectorError>
    where
        F: FnMut(IssueNumber) -> Result<bool, E>,
        E: Display,
    {
        let mut graph = FullRelation::new();
        let mut comparisons = 0;
        let mut skipped_sources = Vec::new();

        // The last issue has no later partner, so it is never a source.
        for (i, source) in issues.iter().enumerate().take(issues.len().saturating_sub(1)) {
            if check_flag(&mut is_flagged, source.number)? {
                skipped_sources.push(source.number);
                continue;
            }

            for target in &issues[i + 1..] {
                let verdict = self.judge(source, target)?;
                comparisons += 1;
                if let Verdict::Duplicate(confidence) = verdict {
                    graph.add_edge(source.number, target.number, confidence)?;
                }
            }
        }

        debug!(
            "Full relation: {} nodes, {} edges after {} comparisons",
            graph.node_count(),
            graph.edge_count(),
            comparisons
        );

        Ok(BuildOutcome {
            relation: DuplicateRelation::Full(graph),
            comparisons,
            skipped_sources,
        })
    }

    fn build_star(&self, issues: &[Issue]) -> Result<BuildOutcome, DetectorError> {
        let (center, rest) = issues.split_first().ok_or_else(|| {
            DetectorError::Config("star mode needs at least one issue".to_string())
        })?;

        let mut star = StarRelation::new(center.number);
        let mut comparisons = 0;

        for target in rest {
            let verdict = self.judge(center, target)?;
            comparisons += 1;
            if let Verdict::Duplicate(confidence) = verdict {
                star.push(target.number, confidence)?;
            }
        }

        debug!("Star relation around #{}: {} records", center.number, star.len());

        Ok(BuildOutcome {
            relation: DuplicateRelation::Star(star),
            comparisons,
            skipped_sources: Vec::new(),
        })
    }

    fn judge(&self, a: &Issue, b: &Issue) -> Result<Verdict, DetectorError> {
        let raw = self
            .oracle
            .compare(a, b)
            .map_err(|e| DetectorError::Oracle(e.to_string()))?;
        info!("Issue #{} compared with #{} : {}", a.number, b.number, raw.trim());
        parse_verdict(&raw)
    }
}

fn check_flag<F, E>(is_flagged: &mut F, number: IssueNumber) -> Result<bool, DetectorError>
where
    F: FnMut(IssueNumber) -> Result<bool, E>,
    E: Display,
{
    let flagged = is_flagged(number).map_err(|e| DetectorError::Tracker(e.to_string()))?;
    if flagged {
        info!("Issue #{} already detected as duplicate, skip it.", number);
    }
    Ok(flagged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dupe_llm::MockOracle;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::convert::Infallible;

    fn n(value: u64) -> IssueNumber {
        IssueNumber::new(value)
    }

    fn issues(numbers: &[u64]) -> Vec<Issue> {
        numbers.iter().map(|&x| Issue::new(x)).collect()
    }

    fn never(_: IssueNumber) -> Result<bool, Infallible> {
        Ok(false)
    }

    fn full_graph(outcome: &BuildOutcome) -> &FullRelation {
        match &outcome.relation {
            DuplicateRelation::Full(graph) => graph,
            DuplicateRelation::Star(_) => panic!("expected a full relation"),
        }
    }

    fn star(outcome: &BuildOutcome) -> &StarRelation {
        match &outcome.relation {
            DuplicateRelation::Star(star) => star,
            DuplicateRelation::Full(_) => panic!("expected a star relation"),
        }
    }

    #[test]
    fn test_full_compares_every_pair_once_in_order() {
        let oracle = MockOracle::default();
        let outcome = RelationBuilder::new(&oracle)
            .build(&issues(&[3, 2, 1]), Mode::Full, never)
            .unwrap();

        assert_eq!(outcome.comparisons, 3);
        assert_eq!(
            oracle.calls(),
            vec![(n(3), n(2)), (n(3), n(1)), (n(2), n(1))]
        );
        assert!(full_graph(&outcome).is_empty());
    }

    #[test]
    fn test_full_records_positive_verdicts() {
        let mut oracle = MockOracle::default();
        oracle.add_verdict(1, 2, "True, 92%");
        oracle.add_verdict(2, 3, "True, 80%");

        let outcome = RelationBuilder::new(&oracle)
            .build(&issues(&[1, 2, 3]), Mode::Full, never)
            .unwrap();
        let graph = full_graph(&outcome);

        assert_eq!(graph.nodes(), &[n(1), n(2), n(3)]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge(n(2), n(1)).unwrap().label(), "92%");
        assert!(graph.edge(n(1), n(3)).is_none());
    }

    #[test]
    fn test_full_skips_flagged_sources_but_keeps_them_as_targets() {
        let mut oracle = MockOracle::default();
        oracle.add_verdict(1, 2, "True, 90%");

        let outcome = RelationBuilder::new(&oracle)
            .build(&issues(&[1, 2, 3]), Mode::Full, |x: IssueNumber| {
                Ok::<_, Infallible>(x == n(2))
            })
            .unwrap();

        assert_eq!(outcome.skipped_sources, vec![n(2)]);
        assert_eq!(oracle.calls(), vec![(n(1), n(2)), (n(1), n(3))]);
        assert_eq!(full_graph(&outcome).edge_count(), 1);
    }

    #[test]
    fn test_full_never_checks_last_issue() {
        let oracle = MockOracle::default();
        let mut checked = Vec::new();
        RelationBuilder::new(&oracle)
            .build(&issues(&[5, 4, 3]), Mode::Full, |x: IssueNumber| {
                checked.push(x);
                Ok::<_, Infallible>(false)
            })
            .unwrap();

        assert_eq!(checked, vec![n(5), n(4)]);
    }

    #[test]
    fn test_star_compares_newest_only() {
        let mut oracle = MockOracle::default();
        oracle.add_verdict(10, 11, "True, 70%");
        oracle.add_verdict(11, 12, "True, 99%");

        let outcome = RelationBuilder::new(&oracle)
            .build(&issues(&[10, 11, 12]), Mode::Star, never)
            .unwrap();
        let star = star(&outcome);

        assert_eq!(oracle.calls(), vec![(n(10), n(11)), (n(10), n(12))]);
        assert_eq!(star.center(), n(10));
        assert_eq!(star.ends(), vec![n(11)]);
        assert_eq!(star.records()[0].confidence.label(), "70%");
    }

    #[test]
    fn test_star_ignores_flag_state() {
        let oracle = MockOracle::new("True, 99%");
        let mut consulted = false;
        let outcome = RelationBuilder::new(&oracle)
            .build(&issues(&[10, 11]), Mode::Star, |_| {
                consulted = true;
                Ok::<_, Infallible>(true)
            })
            .unwrap();

        assert!(!consulted);
        assert_eq!(oracle.call_count(), 1);
        assert!(outcome.skipped_sources.is_empty());
        assert_eq!(outcome.relation.annotated_count(), 1);
    }

    #[test]
    fn test_star_without_issues_is_error() {
        let oracle = MockOracle::default();
        let result = RelationBuilder::new(&oracle).build(&[], Mode::Star, never);
        assert!(matches!(result, Err(DetectorError::Config(_))));
    }

    #[test]
    fn test_oracle_failure_aborts() {
        let mut oracle = MockOracle::default();
        oracle.add_failure(1, 3);

        let result = RelationBuilder::new(&oracle).build(&issues(&[1, 2, 3]), Mode::Full, never);

        assert!(matches!(result, Err(DetectorError::Oracle(_))));
        assert_eq!(oracle.calls(), vec![(n(1), n(2)), (n(1), n(3))]);
    }

    #[test]
    fn test_malformed_verdict_aborts() {
        let mut oracle = MockOracle::default();
        oracle.add_verdict(1, 2, "True");

        let result = RelationBuilder::new(&oracle).build(&issues(&[1, 2, 3]), Mode::Full, never);
        assert!(matches!(result, Err(DetectorError::MalformedVerdict(_))));
    }

    #[test]
    fn test_flag_lookup_failure_aborts() {
        let oracle = MockOracle::default();
        let result = RelationBuilder::new(&oracle).build(&issues(&[1, 2]), Mode::Full, |_| {
            Err::<bool, _>("rate limited")
        });

        assert!(matches!(result, Err(DetectorError::Tracker(_))));
        assert_eq!(oracle.call_count(), 0);
    }

    #[test]
    fn test_repeated_issue_number_is_rejected() {
        let oracle = MockOracle::new("True, 50%");
        let result = RelationBuilder::new(&oracle).build(&issues(&[4, 4]), Mode::Full, never);
        assert!(matches!(result, Err(DetectorError::InvalidRelation(_))));
    }

    proptest! {
        #[test]
        fn prop_full_pair_coverage(
            count in 0usize..9,
            flagged in prop::collection::hash_set(0u64..9, 0..5)
        ) {
            let numbers: Vec<u64> = (0..count as u64).collect();
            let oracle = MockOracle::default();
            let outcome = RelationBuilder::new(&oracle)
                .build(&issues(&numbers), Mode::Full, |x: IssueNumber| {
                    Ok::<_, Infallible>(flagged.contains(&x.value()))
                })
                .unwrap();

            let expected: usize = (0..count.saturating_sub(1))
                .filter(|&i| !flagged.contains(&(i as u64)))
                .map(|i| count - 1 - i)
                .sum();
            prop_assert_eq!(outcome.comparisons, expected);

            let calls = oracle.calls();
            let unique: HashSet<_> = calls.iter().collect();
            prop_assert_eq!(unique.len(), calls.len());
            for (a, b) in calls {
                prop_assert!(a.value() < b.value());
                prop_assert!(!flagged.contains(&a.value()));
            }
        }
    }
}
