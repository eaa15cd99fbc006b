use cribbage_engine::cards::{Card, Rank, Suit};
use cribbage_engine::errors::GameError;
use cribbage_engine::scoring::{score_hand, total_from_combos};

fn card(rank: Rank, suit: Suit) -> Card {
    Card { suit, rank }
}

#[test]
fn twenty_nine_hand_enumerates_every_combo() {
    // Three fives and the Jack of the cut suit, with the fourth five cut:
    // the canonical maximum hand.
    let hand = [
        card(Rank::Five, Suit::Spades),
        card(Rank::Five, Suit::Hearts),
        card(Rank::Five, Suit::Diamonds),
        card(Rank::Jack, Suit::Clubs),
    ];
    let cut = card(Rank::Five, Suit::Clubs);
    let combos = score_hand(&hand, cut, false).expect("well-formed hand");

    let fifteens = combos.iter().filter(|c| c.label == "Fifteen").count();
    let pairs = combos.iter().filter(|c| c.label == "Pair").count();
    let nobs = combos.iter().filter(|c| c.label == "His nobs").count();
    let runs = combos.iter().filter(|c| c.label.starts_with("Run")).count();

    // Four ways to pick three fives, four ways to pair the Jack with a five.
    assert_eq!(fifteens, 8, "expected 8 fifteens, got {:?}", combos);
    // C(4,2) pairs among the four fives.
    assert_eq!(pairs, 6, "expected 6 pairs, got {:?}", combos);
    assert_eq!(nobs, 1, "the Jack of clubs matches the clubs cut");
    assert_eq!(runs, 0);
    assert_eq!(total_from_combos(&combos), 29);
}

#[test]
fn rescoring_the_same_cards_is_deterministic() {
    let hand = [
        card(Rank::Five, Suit::Spades),
        card(Rank::Five, Suit::Hearts),
        card(Rank::Five, Suit::Diamonds),
        card(Rank::Jack, Suit::Clubs),
    ];
    let cut = card(Rank::Five, Suit::Clubs);
    let first = score_hand(&hand, cut, false).unwrap();
    let second = score_hand(&hand, cut, false).unwrap();
    assert_eq!(first, second, "identical input must yield identical combos");
}

#[test]
fn double_run_of_four_counts_both_runs_once_each() {
    // 2-3-4-4-5: two runs of four, one pair, one fifteen (2+4+4+5).
    let hand = [
        card(Rank::Two, Suit::Spades),
        card(Rank::Three, Suit::Hearts),
        card(Rank::Four, Suit::Diamonds),
        card(Rank::Four, Suit::Clubs),
    ];
    let cut = card(Rank::Five, Suit::Spades);
    let combos = score_hand(&hand, cut, false).unwrap();

    let run_combos: Vec<_> = combos.iter().filter(|c| c.label.starts_with("Run")).collect();
    assert_eq!(run_combos.len(), 2, "duplicated rank doubles the run");
    for run in &run_combos {
        assert_eq!(run.label, "Run of 4");
        assert_eq!(run.points, 4, "no shorter run may also score");
    }
    assert_eq!(combos.iter().filter(|c| c.label == "Pair").count(), 1);
    assert_eq!(combos.iter().filter(|c| c.label == "Fifteen").count(), 1);
    assert_eq!(total_from_combos(&combos), 12);
}

#[test]
fn triple_run_counts_three_runs_and_three_pairs() {
    // 3-3-3-4-5: three runs of three, three pairs, three fifteens.
    let hand = [
        card(Rank::Three, Suit::Spades),
        card(Rank::Three, Suit::Hearts),
        card(Rank::Three, Suit::Diamonds),
        card(Rank::Four, Suit::Clubs),
    ];
    let cut = card(Rank::Five, Suit::Clubs);
    let combos = score_hand(&hand, cut, false).unwrap();

    assert_eq!(
        combos.iter().filter(|c| c.label == "Run of 3").count(),
        3,
        "each choice of three extends the run"
    );
    assert_eq!(combos.iter().filter(|c| c.label == "Pair").count(), 3);
    assert_eq!(combos.iter().filter(|c| c.label == "Fifteen").count(), 3);
    assert_eq!(total_from_combos(&combos), 21);
}

#[test]
fn long_run_is_never_split_into_shorter_runs() {
    let hand = [
        card(Rank::Seven, Suit::Spades),
        card(Rank::Eight, Suit::Hearts),
        card(Rank::Nine, Suit::Diamonds),
        card(Rank::Ten, Suit::Clubs),
    ];
    let cut = card(Rank::Jack, Suit::Spades);
    let combos = score_hand(&hand, cut, false).unwrap();

    let runs: Vec<_> = combos.iter().filter(|c| c.label.starts_with("Run")).collect();
    assert_eq!(runs.len(), 1, "only the longest run scores");
    assert_eq!(runs[0].points, 5);
    assert_eq!(runs[0].cards.len(), 5);
    // 7+8 is the only fifteen.
    assert_eq!(combos.iter().filter(|c| c.label == "Fifteen").count(), 1);
    assert_eq!(total_from_combos(&combos), 7);
}

#[test]
fn four_of_a_kind_scores_six_pairs() {
    let hand = [
        card(Rank::Eight, Suit::Spades),
        card(Rank::Eight, Suit::Hearts),
        card(Rank::Eight, Suit::Diamonds),
        card(Rank::Eight, Suit::Clubs),
    ];
    let cut = card(Rank::King, Suit::Spades);
    let combos = score_hand(&hand, cut, false).unwrap();
    assert_eq!(combos.iter().filter(|c| c.label == "Pair").count(), 6);
    assert_eq!(total_from_combos(&combos), 12);
}

#[test]
fn hand_flush_scores_four_and_five_with_matching_cut() {
    let hand = [
        card(Rank::Two, Suit::Hearts),
        card(Rank::Six, Suit::Hearts),
        card(Rank::Ten, Suit::Hearts),
        card(Rank::Queen, Suit::Hearts),
    ];
    let offsuit_cut = card(Rank::Seven, Suit::Spades);
    let combos = score_hand(&hand, offsuit_cut, false).unwrap();
    let flush = combos
        .iter()
        .find(|c| c.label == "Flush")
        .expect("four hearts make a flush");
    assert_eq!(flush.points, 4);
    assert_eq!(flush.cards.len(), 4);

    let matching_cut = card(Rank::Seven, Suit::Hearts);
    let combos = score_hand(&hand, matching_cut, false).unwrap();
    let flush = combos
        .iter()
        .find(|c| c.label == "Five-card flush")
        .expect("matching cut upgrades the flush");
    assert_eq!(flush.points, 5);
    assert_eq!(flush.cards.len(), 5);
}

#[test]
fn crib_flush_requires_all_five_cards() {
    let hand = [
        card(Rank::Two, Suit::Hearts),
        card(Rank::Six, Suit::Hearts),
        card(Rank::Ten, Suit::Hearts),
        card(Rank::Queen, Suit::Hearts),
    ];
    let offsuit_cut = card(Rank::Seven, Suit::Spades);
    let combos = score_hand(&hand, offsuit_cut, true).unwrap();
    assert!(
        combos.iter().all(|c| !c.label.contains("lush")),
        "a 4-card flush never scores in the crib: {:?}",
        combos
    );

    let matching_cut = card(Rank::Seven, Suit::Hearts);
    let combos = score_hand(&hand, matching_cut, true).unwrap();
    assert!(
        combos.iter().any(|c| c.label == "Five-card flush"),
        "a 5-card crib flush scores 5"
    );
}

#[test]
fn nobs_references_the_cut_card() {
    let hand = [
        card(Rank::Jack, Suit::Hearts),
        card(Rank::Two, Suit::Spades),
        card(Rank::Six, Suit::Diamonds),
        card(Rank::Nine, Suit::Clubs),
    ];
    let cut = card(Rank::Four, Suit::Hearts);
    let combos = score_hand(&hand, cut, false).unwrap();
    let nobs = combos
        .iter()
        .find(|c| c.label == "His nobs")
        .expect("Jack of hearts with hearts cut");
    assert_eq!(nobs.points, 1);
    assert!(nobs.cards.contains(&cut), "the combo must name the cut card");

    // Same jack, offsuit cut: no nobs.
    let cut = card(Rank::Four, Suit::Spades);
    let combos = score_hand(&hand, cut, false).unwrap();
    assert!(combos.iter().all(|c| c.label != "His nobs"));
}

#[test]
fn total_is_always_the_sum_of_combo_points() {
    let fixtures = [
        (
            [
                card(Rank::Five, Suit::Spades),
                card(Rank::Five, Suit::Hearts),
                card(Rank::Five, Suit::Diamonds),
                card(Rank::Jack, Suit::Clubs),
            ],
            card(Rank::Five, Suit::Clubs),
        ),
        (
            [
                card(Rank::Ace, Suit::Spades),
                card(Rank::Seven, Suit::Hearts),
                card(Rank::Eight, Suit::Diamonds),
                card(Rank::King, Suit::Clubs),
            ],
            card(Rank::Two, Suit::Clubs),
        ),
    ];
    for (hand, cut) in fixtures {
        let combos = score_hand(&hand, cut, false).unwrap();
        let sum: u32 = combos.iter().map(|c| c.points).sum();
        assert_eq!(total_from_combos(&combos), sum);
    }
}

#[test]
fn wrong_card_count_fails_fast() {
    let short = [
        card(Rank::Five, Suit::Spades),
        card(Rank::Five, Suit::Hearts),
        card(Rank::Five, Suit::Diamonds),
    ];
    let cut = card(Rank::Five, Suit::Clubs);
    match score_hand(&short, cut, false) {
        Err(GameError::InvariantViolation(msg)) => {
            assert!(msg.contains("4-card"), "unexpected message: {}", msg)
        }
        other => panic!("expected an invariant violation, got {:?}", other),
    }
}

#[test]
fn ace_runs_low_never_around_the_corner() {
    // Q-K-A is not a run; A-2-3 is.
    let hand = [
        card(Rank::Queen, Suit::Spades),
        card(Rank::King, Suit::Hearts),
        card(Rank::Ace, Suit::Diamonds),
        card(Rank::Seven, Suit::Clubs),
    ];
    let cut = card(Rank::Nine, Suit::Clubs);
    let combos = score_hand(&hand, cut, false).unwrap();
    assert!(
        combos.iter().all(|c| !c.label.starts_with("Run")),
        "Ace is low: Q-K-A must not score a run, got {:?}",
        combos
    );

    let hand = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::Two, Suit::Hearts),
        card(Rank::Three, Suit::Diamonds),
        card(Rank::Eight, Suit::Clubs),
    ];
    let cut = card(Rank::King, Suit::Clubs);
    let combos = score_hand(&hand, cut, false).unwrap();
    assert!(combos.iter().any(|c| c.label == "Run of 3"));
}
