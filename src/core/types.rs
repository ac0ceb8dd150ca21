//! Core type definitions
//!
//! This module contains the basic data structures used throughout the
//! application, with minimal logic - focusing on data representation.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

use crate::constants::matching::MIN_CYCLE_PARTICIPANTS;
use crate::error::BarterWheelError;

/// A normalized, comparable item identifier
///
/// The label is kept exactly as listed so reports can echo it back;
/// comparisons go through a lower-cased key.
#[derive(Debug, Clone)]
pub struct Item {
    label: String,
    key: String,
}

impl Item {
    /// Create an item from an already-canonical label
    ///
    /// Returns `None` for blank labels, which can never match anything.
    pub fn new(label: &str) -> Option<Self> {
        if label.trim().is_empty() {
            return None;
        }

        Some(Self {
            label: label.to_string(),
            key: label.to_lowercase(),
        })
    }

    /// Derive the canonical `"MODEL - VERSION"` identifier from raw fields
    pub fn from_parts(model: &str, version: &str) -> Option<Self> {
        let model = model.trim();
        let version = version.trim();
        if model.is_empty() || version.is_empty() {
            return None;
        }

        Self::new(&format!(
            "{} - {}",
            model.to_uppercase(),
            version.to_uppercase()
        ))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}

/// A participant in an exchange round
#[derive(Debug, Clone, Serialize)]
pub struct Participant {
    id: String,
    name: String,
    offers: Vec<Item>,
    wants: Vec<Item>,
}

impl Participant {
    pub fn builder() -> ParticipantBuilder {
        ParticipantBuilder::new()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offers(&self) -> &[Item] {
        &self.offers
    }

    pub fn wants(&self) -> &[Item] {
        &self.wants
    }

    /// First of this participant's offers that `receiver` wants
    ///
    /// Offers are scanned in listed order and, for each, the receiver's wants
    /// in listed order. The first hit wins; there is no notion of a better
    /// match.
    pub fn first_offer_for(&self, receiver: &Participant) -> Option<&Item> {
        self.offers
            .iter()
            .find(|offer| receiver.wants.iter().any(|want| *offer == want))
    }
}

pub struct ParticipantBuilder {
    id: Option<String>,
    name: Option<String>,
    offers: Vec<Item>,
    wants: Vec<Item>,
}

impl Default for ParticipantBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticipantBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            name: None,
            offers: Vec::new(),
            wants: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Offer labels that fail [`Item::new`] are skipped
    pub fn with_offers<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.offers
            .extend(labels.into_iter().filter_map(|l| Item::new(l.as_ref())));
        self
    }

    /// Want labels that fail [`Item::new`] are skipped
    pub fn with_wants<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.wants
            .extend(labels.into_iter().filter_map(|l| Item::new(l.as_ref())));
        self
    }

    pub fn with_offer_items(mut self, items: Vec<Item>) -> Self {
        self.offers.extend(items);
        self
    }

    pub fn with_want_items(mut self, items: Vec<Item>) -> Self {
        self.wants.extend(items);
        self
    }
}

impl crate::common::ConfigBuilder for ParticipantBuilder {
    type Config = Participant;

    fn build(self) -> Result<Self::Config, BarterWheelError> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| BarterWheelError::ConfigurationError {
                message: "Missing required field: id".to_string(),
            })?;

        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| id.clone());

        Ok(Participant {
            id,
            name,
            offers: self.offers,
            wants: self.wants,
        })
    }
}

/// Participants of one exchange round, in input order, indexed by id
#[derive(Debug, Clone, Default)]
pub struct ParticipantMap {
    participants: Vec<Participant>,
    index: HashMap<String, usize>,
}

impl ParticipantMap {
    /// Index `participants`, rejecting any repeated id
    pub fn new(participants: Vec<Participant>) -> Result<Self, BarterWheelError> {
        let mut index = HashMap::with_capacity(participants.len());
        for (position, participant) in participants.iter().enumerate() {
            if index.insert(participant.id.clone(), position).is_some() {
                return Err(BarterWheelError::DuplicateParticipant {
                    id: participant.id.clone(),
                });
            }
        }

        Ok(Self {
            participants,
            index,
        })
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.index.get(id).map(|&position| &self.participants[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn as_slice(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

/// A closed chain of participants: `[p0, p1, ..., p0]`
///
/// Each participant gives to the next one; the last gives back to the first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cycle {
    participants: Vec<String>,
}

impl Cycle {
    /// Validate a closed id sequence
    pub fn new(closed: Vec<String>) -> Result<Self, BarterWheelError> {
        let (first, last) = match (closed.first(), closed.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(BarterWheelError::InvalidCycle {
                    message: "sequence is empty".to_string(),
                });
            }
        };

        if closed.len() < 2 || first != last {
            return Err(BarterWheelError::InvalidCycle {
                message: format!("sequence starting at '{first}' is not closed"),
            });
        }

        let members = &closed[..closed.len() - 1];
        let distinct: HashSet<&String> = members.iter().collect();
        if distinct.len() != members.len() {
            return Err(BarterWheelError::InvalidCycle {
                message: "a participant appears twice inside the cycle".to_string(),
            });
        }

        if members.len() < MIN_CYCLE_PARTICIPANTS {
            return Err(BarterWheelError::InvalidCycle {
                message: format!(
                    "{} participants is below the minimum of {MIN_CYCLE_PARTICIPANTS}",
                    members.len()
                ),
            });
        }

        Ok(Self {
            participants: closed,
        })
    }

    /// Close an open id sequence by repeating its first id, then validate
    pub fn from_open(mut ids: Vec<String>) -> Result<Self, BarterWheelError> {
        if let Some(first) = ids.first().cloned() {
            ids.push(first);
        }
        Self::new(ids)
    }

    /// The closed sequence, first id repeated at the end
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    /// Distinct members, without the closing repeat
    pub fn members(&self) -> &[String] {
        &self.participants[..self.participants.len() - 1]
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len() - 1
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members().iter().any(|member| member == id)
    }

    /// `(giver, receiver)` pairs along the cycle
    pub fn exchanges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.participants
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.participants.join(" → "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ConfigBuilder;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_item_equality_ignores_case() {
        let a = Item::new("Model X - Version 2024").unwrap();
        let b = Item::new("MODEL X - VERSION 2024").unwrap();

        assert_eq!(a, b);
        assert_eq!(a.label(), "Model X - Version 2024");
        assert_eq!(a.key(), "model x - version 2024");
    }

    #[test]
    fn test_blank_item_is_rejected() {
        assert!(Item::new("").is_none());
        assert!(Item::new("   ").is_none());
    }

    #[test]
    fn test_item_from_parts() {
        let item = Item::from_parts(" corolla ", "xei 2020 ").unwrap();
        assert_eq!(item.label(), "COROLLA - XEI 2020");

        assert!(Item::from_parts("corolla", "").is_none());
        assert!(Item::from_parts("  ", "xei").is_none());
    }

    #[test]
    fn test_participant_name_defaults_to_id() {
        let participant = Participant::builder()
            .with_id("agency-1")
            .with_name(None)
            .build()
            .unwrap();

        assert_eq!(participant.name(), "agency-1");
    }

    #[test]
    fn test_participant_requires_id() {
        let result = Participant::builder().with_offers(["X"]).build();
        assert!(result.is_err());

        let result = Participant::builder().with_id("  ").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_skips_blank_labels() {
        let participant = Participant::builder()
            .with_id("a")
            .with_offers(["X", "", "Y"])
            .with_wants([" "])
            .build()
            .unwrap();

        assert_eq!(participant.offers().len(), 2);
        assert!(participant.wants().is_empty());
    }

    #[test]
    fn test_first_offer_for_uses_listed_order() {
        let giver = Participant::builder()
            .with_id("giver")
            .with_offers(["Sedan", "Truck", "Coupe"])
            .build()
            .unwrap();
        let receiver = Participant::builder()
            .with_id("receiver")
            .with_wants(["coupe", "truck"])
            .build()
            .unwrap();

        // The giver's order decides, not the receiver's
        let offer = giver.first_offer_for(&receiver).unwrap();
        assert_eq!(offer.label(), "Truck");
    }

    #[test]
    fn test_participant_map_rejects_duplicates() {
        let a = Participant::builder().with_id("a").build().unwrap();
        let again = Participant::builder().with_id("a").build().unwrap();

        let result = ParticipantMap::new(vec![a, again]);
        assert!(matches!(
            result,
            Err(BarterWheelError::DuplicateParticipant { id }) if id == "a"
        ));
    }

    #[test]
    fn test_participant_map_lookup_keeps_order() {
        let map = ParticipantMap::new(vec![
            Participant::builder().with_id("b").build().unwrap(),
            Participant::builder().with_id("a").build().unwrap(),
        ])
        .unwrap();

        assert_eq!(map.len(), 2);
        assert!(map.contains("a"));
        assert_eq!(map.get("b").unwrap().id(), "b");
        let order: Vec<&str> = map.iter().map(|p| p.id()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn test_cycle_accepts_closed_sequence() {
        let cycle = Cycle::new(ids(&["a", "b", "c", "a"])).unwrap();

        assert_eq!(cycle.participant_count(), 3);
        assert_eq!(cycle.members(), &ids(&["a", "b", "c"])[..]);
        let exchanges: Vec<_> = cycle.exchanges().collect();
        assert_eq!(exchanges, vec![("a", "b"), ("b", "c"), ("c", "a")]);
        assert_eq!(cycle.to_string(), "a → b → c → a");
    }

    #[test]
    fn test_cycle_rejects_open_sequence() {
        assert!(Cycle::new(ids(&["a", "b", "c"])).is_err());
        assert!(Cycle::new(Vec::new()).is_err());
    }

    #[test]
    fn test_cycle_rejects_short_sequences() {
        assert!(Cycle::new(ids(&["a", "a"])).is_err());
        assert!(Cycle::new(ids(&["a", "b", "a"])).is_err());
        assert!(Cycle::from_open(ids(&["a", "b"])).is_err());
    }

    #[test]
    fn test_cycle_rejects_repeated_member() {
        assert!(Cycle::new(ids(&["a", "b", "a", "c", "a"])).is_err());
    }

    #[test]
    fn test_cycle_from_open() {
        let cycle = Cycle::from_open(ids(&["x", "y", "z"])).unwrap();
        assert_eq!(cycle.participants(), &ids(&["x", "y", "z", "x"])[..]);
        assert!(cycle.contains("y"));
        assert!(!cycle.contains("w"));
    }
}
