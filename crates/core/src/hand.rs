use crate::{Card, Rank};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Hand categories, weakest first. The derived order is scoring strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandKind {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl HandKind {
    pub const ALL: [HandKind; 10] = [
        HandKind::HighCard,
        HandKind::OnePair,
        HandKind::TwoPair,
        HandKind::ThreeOfAKind,
        HandKind::Straight,
        HandKind::Flush,
        HandKind::FullHouse,
        HandKind::FourOfAKind,
        HandKind::StraightFlush,
        HandKind::RoyalFlush,
    ];

    /// Evaluation order for a full five-card hand.
    const PRECEDENCE: [HandKind; 10] = [
        HandKind::RoyalFlush,
        HandKind::StraightFlush,
        HandKind::FourOfAKind,
        HandKind::FullHouse,
        HandKind::Flush,
        HandKind::Straight,
        HandKind::ThreeOfAKind,
        HandKind::TwoPair,
        HandKind::OnePair,
        HandKind::HighCard,
    ];

    pub fn id(self) -> &'static str {
        match self {
            HandKind::HighCard => "high_card",
            HandKind::OnePair => "one_pair",
            HandKind::TwoPair => "two_pair",
            HandKind::ThreeOfAKind => "three_of_a_kind",
            HandKind::Straight => "straight",
            HandKind::Flush => "flush",
            HandKind::FullHouse => "full_house",
            HandKind::FourOfAKind => "four_of_a_kind",
            HandKind::StraightFlush => "straight_flush",
            HandKind::RoyalFlush => "royal_flush",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HandKind::HighCard => "High Card",
            HandKind::OnePair => "One Pair",
            HandKind::TwoPair => "Two Pair",
            HandKind::ThreeOfAKind => "Three of a Kind",
            HandKind::Straight => "Straight",
            HandKind::Flush => "Flush",
            HandKind::FullHouse => "Full House",
            HandKind::FourOfAKind => "Four of a Kind",
            HandKind::StraightFlush => "Straight Flush",
            HandKind::RoyalFlush => "Royal Flush",
        }
    }

    /// Categories a played hand of `len` cards can possibly form, strongest first.
    pub fn candidates(len: usize) -> &'static [HandKind] {
        match len {
            1 => &[HandKind::HighCard],
            2 => &[HandKind::OnePair, HandKind::HighCard],
            3 => &[HandKind::ThreeOfAKind, HandKind::OnePair, HandKind::HighCard],
            4 => &[
                HandKind::FourOfAKind,
                HandKind::ThreeOfAKind,
                HandKind::TwoPair,
                HandKind::OnePair,
                HandKind::HighCard,
            ],
            5 => &Self::PRECEDENCE,
            _ => &[],
        }
    }
}

impl fmt::Display for HandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for HandKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let norm: String = value
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        HandKind::ALL
            .into_iter()
            .find(|kind| kind.id() == norm)
            .ok_or_else(|| format!("unknown hand category: {value}"))
    }
}

/// Result of classifying a played hand. `kind` is `None` only when no
/// category applies (an empty hand).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub kind: Option<HandKind>,
    /// Cards forming the category, sorted high to low.
    pub cards: Vec<Card>,
}

impl Classification {
    pub fn empty() -> Self {
        Self {
            kind: None,
            cards: Vec::new(),
        }
    }
}

pub fn classify(cards: &[Card]) -> Classification {
    let mut sorted = cards.to_vec();
    sort_descending(&mut sorted);
    for &kind in HandKind::candidates(sorted.len()) {
        if let Some(contributing) = match_kind(kind, &sorted) {
            return Classification {
                kind: Some(kind),
                cards: contributing,
            };
        }
    }
    Classification::empty()
}

/// Highest rank first; suit breaks ties so the order is total.
pub fn sort_descending(cards: &mut [Card]) {
    cards.sort_by(|a, b| b.cmp(a));
}

fn match_kind(kind: HandKind, cards: &[Card]) -> Option<Vec<Card>> {
    match kind {
        HandKind::RoyalFlush => match_kind(HandKind::StraightFlush, cards)
            .filter(|hand| hand.iter().all(|card| card.rank >= Rank::Ten)),
        HandKind::StraightFlush => {
            (is_flush(cards) && is_straight(cards)).then(|| cards.to_vec())
        }
        HandKind::FourOfAKind => exact_group(cards, 4, 4),
        HandKind::FullHouse => {
            if cards.len() != 5 {
                return None;
            }
            let mut triple = cards_with_count(cards, 3);
            let pair = cards_with_count(cards, 2);
            if triple.is_empty() || pair.is_empty() {
                return None;
            }
            triple.extend(pair);
            Some(triple)
        }
        HandKind::Flush => is_flush(cards).then(|| cards.to_vec()),
        HandKind::Straight => is_straight(cards).then(|| cards.to_vec()),
        HandKind::ThreeOfAKind => exact_group(cards, 3, 3),
        HandKind::TwoPair => exact_group(cards, 2, 4),
        HandKind::OnePair => exact_group(cards, 2, 2),
        HandKind::HighCard => cards.first().map(|card| vec![*card]),
    }
}

fn is_flush(cards: &[Card]) -> bool {
    cards.len() == 5 && cards.iter().all(|card| card.suit == cards[0].suit)
}

/// Expects `cards` sorted high to low. Ace is always high.
fn is_straight(cards: &[Card]) -> bool {
    cards.len() == 5
        && cards
            .windows(2)
            .all(|pair| pair[0].rank.value() == pair[1].rank.value() + 1)
}

/// Cards whose rank appears exactly `count` times, in input order.
fn cards_with_count(cards: &[Card], count: usize) -> Vec<Card> {
    let mut rank_counts: HashMap<Rank, usize> = HashMap::new();
    for card in cards {
        *rank_counts.entry(card.rank).or_insert(0) += 1;
    }
    cards
        .iter()
        .filter(|card| rank_counts.get(&card.rank) == Some(&count))
        .copied()
        .collect()
}

fn exact_group(cards: &[Card], count: usize, total: usize) -> Option<Vec<Card>> {
    let group = cards_with_count(cards, count);
    (group.len() == total).then_some(group)
}
