use deckbound_core::{classify, parse_cards, HandKind};

fn cards(text: &str) -> Vec<deckbound_core::Card> {
    parse_cards(text).unwrap()
}

macro_rules! classify_case {
    ($name:ident, $played:expr, $kind:expr, $contributing:expr) => {
        #[test]
        fn $name() {
            let result = classify(&cards($played));
            assert_eq!(result.kind, $kind);
            assert_eq!(result.cards, cards($contributing));
        }
    };
}

classify_case!(empty_hand_is_none, "", None, "");
classify_case!(
    single_card_is_high_card,
    "7D",
    Some(HandKind::HighCard),
    "7D"
);
classify_case!(
    high_card_picks_top_rank,
    "2C 9H KD 4S 6C",
    Some(HandKind::HighCard),
    "KD"
);
classify_case!(
    pair_is_ordered_by_suit,
    "KD KS",
    Some(HandKind::OnePair),
    "KS KD"
);
classify_case!(one_pair_of_two, "9H 9C", Some(HandKind::OnePair), "9H 9C");
classify_case!(
    one_pair_ignores_kickers,
    "9H 2C 9C",
    Some(HandKind::OnePair),
    "9H 9C"
);
classify_case!(
    three_of_a_kind_in_three,
    "4S 4H 4D",
    Some(HandKind::ThreeOfAKind),
    "4S 4H 4D"
);
classify_case!(
    two_pair_in_four,
    "5S 5H JD JC",
    Some(HandKind::TwoPair),
    "JC JD 5S 5H"
);
classify_case!(
    four_of_a_kind_contributes_four,
    "QS QH QC QD 3H",
    Some(HandKind::FourOfAKind),
    "QS QH QC QD"
);
classify_case!(
    four_of_a_kind_in_four,
    "8S 8H 8C 8D",
    Some(HandKind::FourOfAKind),
    "8S 8H 8C 8D"
);
classify_case!(
    full_house_triple_then_pair,
    "QH KH QD KD KS",
    Some(HandKind::FullHouse),
    "KS KH KD QH QD"
);
classify_case!(
    pairs_without_triple_are_two_pair,
    "KH KD QH QD 2C",
    Some(HandKind::TwoPair),
    "KH KD QH QD"
);
classify_case!(
    flush_needs_five,
    "2H 7H 9H JH KH",
    Some(HandKind::Flush),
    "KH JH 9H 7H 2H"
);
classify_case!(
    straight_in_any_order,
    "7C 5D 9H 8S 6C",
    Some(HandKind::Straight),
    "9H 8S 7C 6C 5D"
);
classify_case!(
    ace_high_straight,
    "TS JH QD KC AS",
    Some(HandKind::Straight),
    "AS KC QD JH TS"
);
classify_case!(
    ace_low_is_not_a_straight,
    "AS 2H 3D 4C 5S",
    Some(HandKind::HighCard),
    "AS"
);
classify_case!(
    straight_flush,
    "5H 6H 7H 8H 9H",
    Some(HandKind::StraightFlush),
    "9H 8H 7H 6H 5H"
);
classify_case!(
    royal_flush,
    "TS JS QS KS AS",
    Some(HandKind::RoyalFlush),
    "AS KS QS JS TS"
);
classify_case!(
    king_high_straight_flush_is_not_royal,
    "9D TD JD QD KD",
    Some(HandKind::StraightFlush),
    "KD QD JD TD 9D"
);
classify_case!(
    four_suited_cards_are_not_a_flush,
    "2H 7H 9H JH",
    Some(HandKind::HighCard),
    "JH"
);
classify_case!(
    four_in_a_row_is_not_a_straight,
    "5C 6D 7H 8S",
    Some(HandKind::HighCard),
    "8S"
);

#[test]
fn small_hands_never_reach_five_card_categories() {
    let five_card_only = [
        HandKind::Flush,
        HandKind::Straight,
        HandKind::FullHouse,
        HandKind::StraightFlush,
        HandKind::RoyalFlush,
    ];
    for len in 0..5 {
        for kind in five_card_only {
            assert!(!HandKind::candidates(len).contains(&kind), "{kind} at {len}");
        }
    }
    for len in 0..4 {
        assert!(!HandKind::candidates(len).contains(&HandKind::TwoPair));
    }
}

#[test]
fn more_than_five_cards_has_no_category() {
    let result = classify(&cards("2C 3C 4C 5C 6C 7C"));
    assert_eq!(result.kind, None);
}

#[test]
fn input_order_does_not_matter() {
    let a = classify(&cards("QH KH QD KD KS"));
    let b = classify(&cards("KS KD KH QD QH"));
    assert_eq!(a, b);
}
