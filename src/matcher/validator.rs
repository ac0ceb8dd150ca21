//! Offer conflict validation
//!
//! A participant's item can be promised to at most one recipient per
//! selection run. Consumption is tracked by `(participant id, item)`, so two
//! listed copies of the same item still count as one offer.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::core::{Cycle, Item, Participant, ParticipantMap};

/// One consumed offer slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OfferKey {
    pub participant_id: String,
    pub item: Item,
}

/// Offer slots consumed so far in one selection run
#[derive(Debug, Clone, Default)]
pub struct UsedOffers {
    keys: HashSet<OfferKey>,
}

impl UsedOffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, participant_id: &str, item: &Item) -> bool {
        self.keys.contains(&OfferKey {
            participant_id: participant_id.to_string(),
            item: item.clone(),
        })
    }

    /// Record every offer a claim consumes
    pub fn commit(&mut self, claim: &Claim) {
        self.keys.extend(claim.offer_keys());
    }

    pub fn iter(&self) -> impl Iterator<Item = &OfferKey> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// A single hand-over inside a cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    pub giver: String,
    pub receiver: String,
    pub item: Item,
}

/// The hand-overs a conflict-free cycle would perform, in cycle order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    exchanges: Vec<Exchange>,
}

impl Claim {
    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn offer_keys(&self) -> impl Iterator<Item = OfferKey> + '_ {
        self.exchanges.iter().map(|exchange| OfferKey {
            participant_id: exchange.giver.clone(),
            item: exchange.item.clone(),
        })
    }
}

/// Why a candidate cycle was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    #[error("participant '{participant}' already trades in an accepted cycle")]
    ParticipantInUse { participant: String },

    #[error("'{giver}' already promised '{item}' to someone else")]
    OfferConflict { giver: String, item: Item },

    #[error("participant '{participant}' is not in this round")]
    UnknownParticipant { participant: String },

    #[error("'{giver}' offers nothing that '{receiver}' wants")]
    NoMatchingOffer { giver: String, receiver: String },
}

/// Checks candidate cycles against the offers already consumed
pub struct ConflictValidator<'a> {
    participants: &'a ParticipantMap,
}

impl<'a> ConflictValidator<'a> {
    pub fn new(participants: &'a ParticipantMap) -> Self {
        Self { participants }
    }

    /// Work out the hand-overs of `cycle` without touching `used`
    ///
    /// For every giver/receiver pair the giver's first matching offer is
    /// taken. The cycle conflicts when that offer was consumed earlier in the
    /// run, or when the same giver would hand the same item over twice within
    /// this cycle.
    pub fn validate(&self, cycle: &Cycle, used: &UsedOffers) -> Result<Claim, Rejection> {
        let mut staged: HashSet<(&str, &Item)> = HashSet::new();
        let mut exchanges = Vec::with_capacity(cycle.participant_count());

        for (giver_id, receiver_id) in cycle.exchanges() {
            let giver = self.lookup(giver_id)?;
            let receiver = self.lookup(receiver_id)?;

            let item = giver
                .first_offer_for(receiver)
                .ok_or_else(|| Rejection::NoMatchingOffer {
                    giver: giver_id.to_string(),
                    receiver: receiver_id.to_string(),
                })?;

            if used.contains(giver_id, item) || !staged.insert((giver_id, item)) {
                return Err(Rejection::OfferConflict {
                    giver: giver_id.to_string(),
                    item: item.clone(),
                });
            }

            exchanges.push(Exchange {
                giver: giver_id.to_string(),
                receiver: receiver_id.to_string(),
                item: item.clone(),
            });
        }

        Ok(Claim { exchanges })
    }

    /// Validate `cycle` and, only if it is conflict-free, commit its offers
    ///
    /// On rejection `used` is left exactly as it was.
    pub fn claim(&self, cycle: &Cycle, used: &mut UsedOffers) -> Result<Claim, Rejection> {
        let claim = self.validate(cycle, used)?;
        used.commit(&claim);
        Ok(claim)
    }

    /// Boolean form of [`ConflictValidator::claim`]: `true` means the cycle
    /// conflicts and nothing was committed
    pub fn conflicts(&self, cycle: &Cycle, used: &mut UsedOffers) -> bool {
        self.claim(cycle, used).is_err()
    }

    fn lookup(&self, id: &str) -> Result<&'a Participant, Rejection> {
        self.participants
            .get(id)
            .ok_or_else(|| Rejection::UnknownParticipant {
                participant: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ConfigBuilder;

    fn participant(id: &str, offers: &[&str], wants: &[&str]) -> Participant {
        Participant::builder()
            .with_id(id)
            .with_offers(offers)
            .with_wants(wants)
            .build()
            .unwrap()
    }

    fn cycle(ids: &[&str]) -> Cycle {
        Cycle::from_open(ids.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn round() -> ParticipantMap {
        ParticipantMap::new(vec![
            participant("a", &["X"], &["Y"]),
            participant("b", &["Y"], &["Z"]),
            participant("c", &["Z"], &["X"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_valid_cycle_produces_exchanges() {
        let participants = round();
        let validator = ConflictValidator::new(&participants);

        let claim = validator
            .validate(&cycle(&["a", "c", "b"]), &UsedOffers::new())
            .unwrap();

        let handovers: Vec<(&str, &str, &str)> = claim
            .exchanges()
            .iter()
            .map(|e| (e.giver.as_str(), e.receiver.as_str(), e.item.label()))
            .collect();
        assert_eq!(
            handovers,
            vec![("a", "c", "X"), ("c", "b", "Z"), ("b", "a", "Y")]
        );
    }

    #[test]
    fn test_validate_does_not_commit() {
        let participants = round();
        let validator = ConflictValidator::new(&participants);
        let used = UsedOffers::new();

        validator.validate(&cycle(&["a", "c", "b"]), &used).unwrap();

        assert!(used.is_empty());
    }

    #[test]
    fn test_claim_commits_offer_keys() {
        let participants = round();
        let validator = ConflictValidator::new(&participants);
        let mut used = UsedOffers::new();

        validator.claim(&cycle(&["a", "c", "b"]), &mut used).unwrap();

        assert_eq!(used.len(), 3);
        assert!(used.contains("a", &Item::new("x").unwrap()));
        assert!(used.contains("c", &Item::new("Z").unwrap()));
        assert!(!used.contains("c", &Item::new("X").unwrap()));
    }

    #[test]
    fn test_second_claim_on_same_offer_conflicts() {
        let participants = ParticipantMap::new(vec![
            participant("a", &["X", "X"], &["P", "Q"]),
            participant("b", &["B"], &["X"]),
            participant("c", &["P"], &["B"]),
            participant("d", &["D"], &["X"]),
            participant("e", &["Q"], &["D"]),
        ])
        .unwrap();
        let validator = ConflictValidator::new(&participants);
        let mut used = UsedOffers::new();

        assert!(!validator.conflicts(&cycle(&["a", "b", "c"]), &mut used));
        let before = used.len();

        let rejection = validator
            .claim(&cycle(&["a", "d", "e"]), &mut used)
            .unwrap_err();

        assert_eq!(
            rejection,
            Rejection::OfferConflict {
                giver: "a".to_string(),
                item: Item::new("X").unwrap(),
            }
        );
        assert_eq!(used.len(), before);
    }

    #[test]
    fn test_rejected_cycle_rolls_back_partial_claims() {
        let participants = ParticipantMap::new(vec![
            participant("a", &["X"], &["Z"]),
            participant("b", &["Y"], &["X"]),
            participant("c", &["Z"], &["Y"]),
        ])
        .unwrap();
        let validator = ConflictValidator::new(&participants);
        let mut used = UsedOffers::new();
        // Pretend c's Z is already gone; a→b and b→c would be claimed first
        let earlier = Claim {
            exchanges: vec![Exchange {
                giver: "c".to_string(),
                receiver: "elsewhere".to_string(),
                item: Item::new("Z").unwrap(),
            }],
        };
        used.commit(&earlier);

        assert!(validator.conflicts(&cycle(&["a", "b", "c"]), &mut used));

        assert_eq!(used.len(), 1);
        assert!(!used.contains("a", &Item::new("X").unwrap()));
        assert!(!used.contains("b", &Item::new("Y").unwrap()));
    }

    #[test]
    fn test_pair_without_matching_offer_is_rejected() {
        let participants = round();
        let validator = ConflictValidator::new(&participants);

        // a offers X but b wants Z
        let rejection = validator
            .validate(&cycle(&["a", "b", "c"]), &UsedOffers::new())
            .unwrap_err();

        assert_eq!(
            rejection,
            Rejection::NoMatchingOffer {
                giver: "a".to_string(),
                receiver: "b".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_participant_is_rejected() {
        let participants = round();
        let validator = ConflictValidator::new(&participants);

        let rejection = validator
            .validate(&cycle(&["a", "ghost", "b"]), &UsedOffers::new())
            .unwrap_err();

        assert_eq!(
            rejection,
            Rejection::UnknownParticipant {
                participant: "ghost".to_string()
            }
        );
    }

    #[test]
    fn test_rejection_messages() {
        let rejection = Rejection::OfferConflict {
            giver: "a".to_string(),
            item: Item::new("COROLLA - XEI").unwrap(),
        };
        assert_eq!(
            rejection.to_string(),
            "'a' already promised 'COROLLA - XEI' to someone else"
        );
    }
}
