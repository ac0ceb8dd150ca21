use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use super::validator::{Claim, ConflictValidator, Rejection, UsedOffers};
use crate::constants::matching::{DEFAULT_MAX_CYCLE_LEN, MIN_CYCLE_PARTICIPANTS};
use crate::core::{Cycle, ParticipantMap};
use crate::enumerator::{CycleEnumerator, weakly_connected_components};
use crate::graph::CompatibilityGraph;

/// How candidate cycles are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Per connected component, longest cycles first, each participant in at
    /// most one accepted cycle
    #[default]
    Greedy,
    /// Every cycle of the whole graph in discovery order; participants may
    /// appear in several accepted cycles as long as no offer is reused
    Exhaustive,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Greedy => write!(f, "greedy"),
            Strategy::Exhaustive => write!(f, "exhaustive"),
        }
    }
}

/// Enumeration bounds shared by both strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingOptions {
    /// Longest cycle to consider, counted in participants; `None` is unbounded
    pub max_len: Option<usize>,
    /// Stop enumerating a pass after this many cycles
    pub cycle_limit: Option<usize>,
}

impl Default for MatchingOptions {
    fn default() -> Self {
        Self {
            max_len: Some(DEFAULT_MAX_CYCLE_LEN),
            cycle_limit: None,
        }
    }
}

/// A candidate cycle that was turned down, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedCycle {
    pub cycle: Cycle,
    pub reason: Rejection,
}

/// Mutable bookkeeping of one selection run
///
/// Every run starts from its own state, so concurrent runs never share
/// consumed offers.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub used_offers: UsedOffers,
    /// Participants already placed by greedy selection
    pub used_participants: HashSet<String>,
}

/// Outcome of one selection run
#[derive(Debug, Clone)]
pub struct Selection {
    strategy: Strategy,
    accepted: Vec<Cycle>,
    claims: Vec<Claim>,
    rejected: Vec<RejectedCycle>,
    state: SelectionState,
    candidates: usize,
    truncated: bool,
}

impl Selection {
    fn new(strategy: Strategy, state: SelectionState) -> Self {
        Self {
            strategy,
            accepted: Vec::new(),
            claims: Vec::new(),
            rejected: Vec::new(),
            state,
            candidates: 0,
            truncated: false,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Accepted cycles in acceptance order
    pub fn accepted(&self) -> &[Cycle] {
        &self.accepted
    }

    /// Accepted cycles paired with the hand-overs they perform
    pub fn accepted_with_claims(&self) -> impl Iterator<Item = (&Cycle, &Claim)> {
        self.accepted.iter().zip(&self.claims)
    }

    pub fn into_accepted(self) -> Vec<Cycle> {
        self.accepted
    }

    pub fn rejected(&self) -> &[RejectedCycle] {
        &self.rejected
    }

    pub fn used_offers(&self) -> &UsedOffers {
        &self.state.used_offers
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn into_state(self) -> SelectionState {
        self.state
    }

    /// Number of cycles enumerated before selection
    pub fn candidate_count(&self) -> usize {
        self.candidates
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Whether a cycle limit cut enumeration short
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Participants that trade in at least one accepted cycle
    pub fn matched_participants(&self) -> HashSet<&str> {
        self.accepted
            .iter()
            .flat_map(|cycle| cycle.members().iter().map(String::as_str))
            .collect()
    }

    fn accept(&mut self, cycle: Cycle, claim: Claim) {
        debug!(strategy = %self.strategy, cycle = %cycle, "accepted cycle");
        self.accepted.push(cycle);
        self.claims.push(claim);
    }

    fn reject(&mut self, cycle: Cycle, reason: Rejection) {
        debug!(strategy = %self.strategy, cycle = %cycle, reason = %reason, "rejected cycle");
        self.rejected.push(RejectedCycle { cycle, reason });
    }
}

/// Selects a conflict-free set of cycles from a compatibility graph
pub struct CycleSelector {
    strategy: Strategy,
    options: MatchingOptions,
}

impl CycleSelector {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            options: MatchingOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MatchingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_max_len(mut self, max_len: Option<usize>) -> Self {
        self.options.max_len = max_len;
        self
    }

    pub fn with_cycle_limit(mut self, cycle_limit: Option<usize>) -> Self {
        self.options.cycle_limit = cycle_limit;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn options(&self) -> MatchingOptions {
        self.options
    }

    /// Run the configured strategy from a fresh state
    pub fn select(&self, graph: &CompatibilityGraph, participants: &ParticipantMap) -> Selection {
        self.select_with_state(graph, participants, SelectionState::default())
    }

    /// Run the configured strategy starting from `state`
    ///
    /// The final state is returned inside the [`Selection`].
    pub fn select_with_state(
        &self,
        graph: &CompatibilityGraph,
        participants: &ParticipantMap,
        state: SelectionState,
    ) -> Selection {
        let mut selection = Selection::new(self.strategy, state);
        let validator = ConflictValidator::new(participants);

        match self.strategy {
            Strategy::Greedy => self.select_greedy(graph, &validator, &mut selection),
            Strategy::Exhaustive => self.select_exhaustive(graph, &validator, &mut selection),
        }

        info!(
            strategy = %self.strategy,
            candidates = selection.candidates,
            accepted = selection.accepted.len(),
            rejected = selection.rejected.len(),
            truncated = selection.truncated,
            "cycle selection finished"
        );
        selection
    }

    fn enumerator(&self) -> CycleEnumerator {
        CycleEnumerator::new(self.options.max_len).with_cycle_limit(self.options.cycle_limit)
    }

    fn select_greedy(
        &self,
        graph: &CompatibilityGraph,
        validator: &ConflictValidator<'_>,
        selection: &mut Selection,
    ) {
        for component in weakly_connected_components(graph) {
            if component.len() < MIN_CYCLE_PARTICIPANTS {
                continue;
            }

            let mut enumerator = self.enumerator();
            enumerator.enumerate_within(graph, &component);
            selection.truncated |= enumerator.is_truncated();

            let mut cycles = enumerator.into_cycles();
            selection.candidates += cycles.len();
            // Stable: equal lengths keep discovery order
            cycles.sort_by_key(|cycle| Reverse(cycle.participant_count()));

            for cycle in cycles {
                let busy = cycle
                    .members()
                    .iter()
                    .find(|id| selection.state.used_participants.contains(*id))
                    .cloned();
                if let Some(participant) = busy {
                    selection.reject(cycle, Rejection::ParticipantInUse { participant });
                    continue;
                }

                match validator.claim(&cycle, &mut selection.state.used_offers) {
                    Ok(claim) => {
                        selection
                            .state
                            .used_participants
                            .extend(cycle.members().iter().cloned());
                        selection.accept(cycle, claim);
                    }
                    Err(reason) => selection.reject(cycle, reason),
                }
            }
        }
    }

    fn select_exhaustive(
        &self,
        graph: &CompatibilityGraph,
        validator: &ConflictValidator<'_>,
        selection: &mut Selection,
    ) {
        let mut enumerator = self.enumerator();
        enumerator.enumerate(graph);
        selection.truncated = enumerator.is_truncated();

        let cycles = enumerator.into_cycles();
        selection.candidates = cycles.len();

        for cycle in cycles {
            match validator.claim(&cycle, &mut selection.state.used_offers) {
                Ok(claim) => selection.accept(cycle, claim),
                Err(reason) => selection.reject(cycle, reason),
            }
        }
    }
}

/// Select cycles with `strategy`, returning the accepted cycles in order
///
/// `max_len` bounds cycle length in participants; `None` is unbounded.
pub fn select_cycles(
    graph: &CompatibilityGraph,
    participants: &ParticipantMap,
    strategy: Strategy,
    max_len: Option<usize>,
) -> Vec<Cycle> {
    CycleSelector::new(strategy)
        .with_max_len(max_len)
        .select(graph, participants)
        .into_accepted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ConfigBuilder;
    use crate::core::{Item, Participant};
    use crate::graph::build_graph;

    fn participant(id: &str, offers: &[&str], wants: &[&str]) -> Participant {
        Participant::builder()
            .with_id(id)
            .with_offers(offers)
            .with_wants(wants)
            .build()
            .unwrap()
    }

    fn round(participants: Vec<Participant>) -> (CompatibilityGraph, ParticipantMap) {
        let graph = build_graph(&participants);
        (graph, ParticipantMap::new(participants).unwrap())
    }

    fn rendered(cycles: &[Cycle]) -> Vec<String> {
        cycles.iter().map(ToString::to_string).collect()
    }

    /// Two triangles sharing participant b, each with its own offers
    fn overlapping() -> (CompatibilityGraph, ParticipantMap) {
        round(vec![
            participant("a", &["a"], &["c"]),
            participant("b", &["b1", "b2"], &["a", "d"]),
            participant("c", &["c"], &["b1"]),
            participant("d", &["d"], &["e"]),
            participant("e", &["e"], &["b2"]),
        ])
    }

    #[test]
    fn test_three_way_swap() {
        let (graph, participants) = round(vec![
            participant("a", &["X"], &["Y"]),
            participant("b", &["Y"], &["Z"]),
            participant("c", &["Z"], &["X"]),
        ]);

        for strategy in [Strategy::Greedy, Strategy::Exhaustive] {
            let cycles = select_cycles(&graph, &participants, strategy, Some(10));
            assert_eq!(rendered(&cycles), vec!["a → c → b → a"]);
        }
    }

    #[test]
    fn test_two_way_swap_is_not_a_cycle() {
        let (graph, participants) = round(vec![
            participant("a", &["X"], &["Y"]),
            participant("b", &["Y"], &["X"]),
        ]);

        let selection = CycleSelector::new(Strategy::Exhaustive).select(&graph, &participants);

        assert!(selection.is_empty());
        assert_eq!(selection.candidate_count(), 0);
    }

    #[test]
    fn test_empty_round() {
        let (graph, participants) = round(Vec::new());

        for strategy in [Strategy::Greedy, Strategy::Exhaustive] {
            assert!(select_cycles(&graph, &participants, strategy, None).is_empty());
        }
    }

    #[test]
    fn test_greedy_keeps_participants_disjoint() {
        let (graph, participants) = overlapping();

        let selection = CycleSelector::new(Strategy::Greedy).select(&graph, &participants);

        assert_eq!(rendered(selection.accepted()), vec!["a → b → c → a"]);
        assert_eq!(selection.rejected().len(), 1);
        assert_eq!(selection.rejected()[0].cycle.to_string(), "b → e → d → b");
        assert_eq!(
            selection.rejected()[0].reason,
            Rejection::ParticipantInUse {
                participant: "b".to_string()
            }
        );
    }

    #[test]
    fn test_exhaustive_allows_shared_participants() {
        let (graph, participants) = overlapping();

        let selection = CycleSelector::new(Strategy::Exhaustive).select(&graph, &participants);

        assert_eq!(
            rendered(selection.accepted()),
            vec!["a → b → c → a", "b → e → d → b"]
        );
        assert!(selection.rejected().is_empty());
        assert_eq!(selection.used_offers().len(), 6);
    }

    #[test]
    fn test_exhaustive_leaves_participant_set_untouched() {
        let (graph, participants) = overlapping();

        let selection = CycleSelector::new(Strategy::Exhaustive).select(&graph, &participants);

        assert_eq!(selection.accepted_count(), 2);
        assert!(selection.state().used_participants.is_empty());
        assert_eq!(
            selection.matched_participants(),
            HashSet::from(["a", "b", "c", "d", "e"])
        );
    }

    #[test]
    fn test_greedy_prefers_longer_cycles() {
        // Triangle a→b→c→a and square a→d→e→f→a share a and its only item
        let (graph, participants) = round(vec![
            participant("a", &["X"], &["C", "F"]),
            participant("b", &["B"], &["X"]),
            participant("c", &["C"], &["B"]),
            participant("d", &["D"], &["X"]),
            participant("e", &["E"], &["D"]),
            participant("f", &["F"], &["E"]),
        ]);

        let greedy = CycleSelector::new(Strategy::Greedy).select(&graph, &participants);
        assert_eq!(rendered(greedy.accepted()), vec!["a → d → e → f → a"]);

        let exhaustive = CycleSelector::new(Strategy::Exhaustive).select(&graph, &participants);
        assert_eq!(rendered(exhaustive.accepted()), vec!["a → b → c → a"]);
        assert_eq!(
            exhaustive.rejected()[0].reason,
            Rejection::OfferConflict {
                giver: "a".to_string(),
                item: Item::new("X").unwrap(),
            }
        );
    }

    #[test]
    fn test_duplicate_listing_is_one_offer() {
        let (graph, participants) = round(vec![
            participant("a", &["X", "X"], &["P", "Q"]),
            participant("b", &["B"], &["X"]),
            participant("c", &["P"], &["B"]),
            participant("d", &["D"], &["X"]),
            participant("e", &["Q"], &["D"]),
        ]);

        let selection = CycleSelector::new(Strategy::Exhaustive).select(&graph, &participants);

        assert_eq!(selection.accepted_count(), 1);
        assert!(matches!(
            selection.rejected()[0].reason,
            Rejection::OfferConflict { .. }
        ));
    }

    #[test]
    fn test_max_len_bounds_candidates() {
        let (graph, participants) = round(vec![
            participant("a", &["A"], &["D"]),
            participant("b", &["B"], &["A"]),
            participant("c", &["C"], &["B"]),
            participant("d", &["D"], &["C"]),
        ]);

        let bounded = CycleSelector::new(Strategy::Greedy)
            .with_max_len(Some(3))
            .select(&graph, &participants);
        assert!(bounded.is_empty());

        let unbounded = CycleSelector::new(Strategy::Greedy)
            .with_max_len(None)
            .select(&graph, &participants);
        assert_eq!(rendered(unbounded.accepted()), vec!["a → b → c → d → a"]);
    }

    #[test]
    fn test_components_are_processed_independently() {
        let (graph, participants) = round(vec![
            participant("a", &["X"], &["Y"]),
            participant("b", &["Y"], &["Z"]),
            participant("c", &["Z"], &["X"]),
            participant("d", &["P"], &["Q"]),
            participant("e", &["Q"], &["R"]),
            participant("f", &["R"], &["P"]),
            participant("g", &["lonely"], &[]),
        ]);

        let greedy = CycleSelector::new(Strategy::Greedy).select(&graph, &participants);

        assert_eq!(
            rendered(greedy.accepted()),
            vec!["a → c → b → a", "d → f → e → d"]
        );
        assert_eq!(greedy.matched_participants().len(), 6);
        assert!(!greedy.matched_participants().contains("g"));
    }

    #[test]
    fn test_cycle_limit_marks_truncation() {
        let (graph, participants) = overlapping();

        let selection = CycleSelector::new(Strategy::Exhaustive)
            .with_cycle_limit(Some(1))
            .select(&graph, &participants);

        assert!(selection.is_truncated());
        assert_eq!(selection.candidate_count(), 1);
    }

    #[test]
    fn test_fresh_state_per_run() {
        let (graph, participants) = overlapping();
        let selector = CycleSelector::new(Strategy::Exhaustive);

        let first = selector.select(&graph, &participants);
        let second = selector.select(&graph, &participants);

        assert_eq!(first.accepted(), second.accepted());
    }

    #[test]
    fn test_state_is_carried_into_a_run() {
        let (graph, participants) = overlapping();
        let selector = CycleSelector::new(Strategy::Exhaustive);

        let state = selector.select(&graph, &participants).into_state();
        let again = selector.select_with_state(&graph, &participants, state);

        assert!(again.is_empty());
        assert_eq!(again.rejected().len(), 2);
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(Strategy::Greedy.to_string(), "greedy");
        assert_eq!(Strategy::Exhaustive.to_string(), "exhaustive");
        assert_eq!(Strategy::default(), Strategy::Greedy);
    }
}
