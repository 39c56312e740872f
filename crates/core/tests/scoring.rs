use deckbound_core::{
    parse_cards, resolve, ActiveJoker, DebuffKind, GameConfig, HandKind, JokerDef, JokerId,
    RoundRule, Score, ScoreEffect, ScoreTable, StepSource,
};

fn table() -> ScoreTable {
    ScoreTable::from_rules(&GameConfig::standard().hands).unwrap()
}

fn joker(config: &GameConfig, id: &str) -> JokerDef {
    config.joker_def(id).unwrap().clone()
}

macro_rules! base_case {
    ($name:ident, $kind:expr, $score:expr, $mult:expr) => {
        #[test]
        fn $name() {
            assert_eq!(table().effective_base($kind), ($score, $mult));
        }
    };
}

base_case!(base_high_card, HandKind::HighCard, 5, 1);
base_case!(base_one_pair, HandKind::OnePair, 10, 2);
base_case!(base_two_pair, HandKind::TwoPair, 20, 3);
base_case!(base_three_of_a_kind, HandKind::ThreeOfAKind, 35, 3);
base_case!(base_straight, HandKind::Straight, 50, 4);
base_case!(base_flush, HandKind::Flush, 55, 4);
base_case!(base_full_house, HandKind::FullHouse, 60, 4);
base_case!(base_four_of_a_kind, HandKind::FourOfAKind, 75, 6);
base_case!(base_straight_flush, HandKind::StraightFlush, 100, 8);
base_case!(base_royal_flush, HandKind::RoyalFlush, 100, 10);

#[test]
fn upgrades_scale_score_and_multiplier() {
    let mut table = table();
    assert_eq!(table.level(HandKind::Flush), 1);
    table.upgrade(HandKind::Flush);
    assert_eq!(table.upgrade(HandKind::Flush), 3);
    assert_eq!(table.level(HandKind::Flush), 3);
    assert_eq!(table.effective_base(HandKind::Flush), (55 + 40, 4 + 2));
    assert_eq!(table.level(HandKind::Straight), 1);
}

#[test]
fn full_house_end_to_end() {
    let played = parse_cards("KH KD KS QH QD").unwrap();
    let res = resolve(&played, &table(), None, &[], &RoundRule::default()).unwrap();
    assert_eq!(res.kind, Some(HandKind::FullHouse));
    assert_eq!(res.cards.len(), 5);
    assert_eq!(res.score, Score { hand_score: 60, multiplier: 4 });
    assert_eq!(res.total, 240);
}

#[test]
fn two_pair_with_a_kicker_scores_as_two_pair() {
    let played = parse_cards("KH KD QH QD 2C").unwrap();
    let res = resolve(&played, &table(), None, &[], &RoundRule::default()).unwrap();
    assert_eq!(res.kind, Some(HandKind::TwoPair));
    assert_eq!(res.total, 60);
}

#[test]
fn joker_order_changes_the_multiplier() {
    let config = GameConfig::standard();
    let add = joker(&config, "multiplier_joker");
    let times = joker(&config, "moon_joker");
    let played = parse_cards("9H 9C").unwrap();
    let rules = RoundRule::default();

    let forward = [
        ActiveJoker { id: JokerId(1), def: &add },
        ActiveJoker { id: JokerId(2), def: &times },
    ];
    let res = resolve(&played, &table(), None, &forward, &rules).unwrap();
    assert_eq!(res.score.multiplier, 28);
    assert_eq!(res.total, 280);

    let reversed = [forward[1], forward[0]];
    let res = resolve(&played, &table(), None, &reversed, &rules).unwrap();
    assert_eq!(res.score.multiplier, 13);
    assert_eq!(res.total, 130);
}

#[test]
fn play_exactly_five_rejects_short_plays() {
    let played = parse_cards("KH KD 2C").unwrap();
    let err = resolve(
        &played,
        &table(),
        Some(DebuffKind::PlayExactly(5)),
        &[],
        &RoundRule::default(),
    )
    .unwrap_err();
    assert_eq!(err.debuff, DebuffKind::PlayExactly(5));

    let played = parse_cards("KH KD 2C 3C 4C").unwrap();
    let res = resolve(
        &played,
        &table(),
        Some(DebuffKind::PlayExactly(5)),
        &[],
        &RoundRule::default(),
    )
    .unwrap();
    assert_eq!(res.kind, Some(HandKind::OnePair));
    assert_eq!(res.total, 20);
}

#[test]
fn halve_score_floors_and_proceeds() {
    let mut rules = GameConfig::standard().hands;
    for rule in &mut rules {
        if rule.kind == HandKind::OnePair {
            rule.base_score = 101;
        }
    }
    let table = ScoreTable::from_rules(&rules).unwrap();
    let played = parse_cards("5S 5H").unwrap();
    let res = resolve(
        &played,
        &table,
        Some(DebuffKind::HalveScore),
        &[],
        &RoundRule::default(),
    )
    .unwrap();
    assert_eq!(res.score.hand_score, 50);
    assert_eq!(res.total, 100);
    assert!(res
        .steps
        .iter()
        .any(|step| step.source == StepSource::Debuff(DebuffKind::HalveScore)));
}

#[test]
fn count_scaled_jokers_use_match_count() {
    let config = GameConfig::standard();
    let castle = joker(&config, "castle_joker");
    let snake = joker(&config, "heart_snake_joker");
    let played = parse_cards("KH QH 2S 7D 9C").unwrap();
    let jokers = [
        ActiveJoker { id: JokerId(1), def: &castle },
        ActiveJoker { id: JokerId(2), def: &snake },
    ];
    let res = resolve(&played, &table(), None, &jokers, &RoundRule::default()).unwrap();
    assert_eq!(res.kind, Some(HandKind::HighCard));
    // base 5 x 1; castle: +100 score, x4 mult; snake: x4 mult
    assert_eq!(res.score, Score { hand_score: 105, multiplier: 16 });
    assert_eq!(res.joker_matches.get(&JokerId(1)), Some(&2));
    assert_eq!(res.joker_matches.get(&JokerId(2)), Some(&2));
}

#[test]
fn unmatched_joker_is_skipped() {
    let config = GameConfig::standard();
    let snake = joker(&config, "heart_snake_joker");
    let played = parse_cards("KS KC").unwrap();
    let jokers = [ActiveJoker { id: JokerId(4), def: &snake }];
    let res = resolve(&played, &table(), None, &jokers, &RoundRule::default()).unwrap();
    assert_eq!(res.total, 20);
    assert_eq!(res.joker_matches.get(&JokerId(4)), Some(&0));
    assert!(res
        .steps
        .iter()
        .all(|step| !matches!(step.source, StepSource::Joker { .. })));
}

#[test]
fn steps_record_every_mutation_in_order() {
    let config = GameConfig::standard();
    let add = joker(&config, "multiplier_joker");
    let played = parse_cards("9H 9C").unwrap();
    let jokers = [ActiveJoker { id: JokerId(1), def: &add }];
    let res = resolve(&played, &table(), None, &jokers, &RoundRule::default()).unwrap();
    let effects: Vec<ScoreEffect> = res.steps.iter().map(|step| step.effect).collect();
    assert_eq!(
        effects,
        [
            ScoreEffect::AddScore(10),
            ScoreEffect::SetMult(2),
            ScoreEffect::AddMult(5)
        ]
    );
    for pair in res.steps.windows(2) {
        assert_eq!(pair[0].after, pair[1].before);
    }
    assert_eq!(res.steps[0].before, Score::default());
}

#[test]
fn jokers_never_fire_on_an_unclassified_play() {
    let config = GameConfig::standard();
    let add = joker(&config, "multiplier_joker");
    let castle = joker(&config, "castle_joker");
    let jokers = [
        ActiveJoker { id: JokerId(1), def: &add },
        ActiveJoker { id: JokerId(2), def: &castle },
    ];
    for text in ["", "KH KD KS QH QD 2C"] {
        let played = parse_cards(text).unwrap();
        let res = resolve(&played, &table(), None, &jokers, &RoundRule::default()).unwrap();
        assert_eq!(res.kind, None, "{text}");
        assert_eq!(res.score, Score::default(), "{text}");
        assert_eq!(res.total, 0, "{text}");
        assert!(res.steps.is_empty(), "{text}");
        assert!(res.joker_matches.is_empty(), "{text}");
    }
}
