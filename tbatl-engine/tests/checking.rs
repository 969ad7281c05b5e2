use tbatl_engine::algorithms::{evaluate, evaluate_over_set, CheckError, Marking, ModelChecker};
use tbatl_engine::atl::{Coalition, Phi};
use tbatl_engine::game_structure::{GameBuilder, GameStructure, StateIdx, TurnBasedGame};
use tbatl_engine::parsing::parse_phi;

mod common;

use common::{train_gate, ALL, Q0, Q1, Q2, Q3};

/// Checks `formula` in q0..q3 of the train-gate game.
fn check_train_gate(formula: &str) -> Vec<bool> {
    let game = train_gate();
    let phi = parse_phi(formula).unwrap();
    evaluate_over_set(&game, &phi, &ALL).unwrap()
}

#[test]
fn next_001() {
    // A controlling coalition picks a successor, otherwise all successors count
    assert_eq!(check_train_gate("{c}@(oog)"), [true, true, false, true]);
    assert_eq!(check_train_gate("{t}@(req)"), [true, false, false, false]);
    assert_eq!(check_train_gate("{0}@(oog)"), [true, true, false, false]);
}

#[test]
fn next_turn_semantics_001() {
    // s is controlled by c and can move to s1 (p holds) or s2 (p does not)
    let mut builder = GameBuilder::new();
    let s = builder.add_state("s", Vec::<String>::new(), "c");
    let s1 = builder.add_state("s1", ["p"], "c");
    let s2 = builder.add_state("s2", Vec::<String>::new(), "c");
    builder.connect(s, &[s1, s2]).connect(s1, &[s1]).connect(s2, &[s2]);
    let game = builder.build().unwrap();

    let controller_picks = Phi::next(Coalition::new(["c"]), Phi::proposition("p"));
    let others_cannot_force = Phi::next(Coalition::new(["other"]), Phi::proposition("p"));
    assert_eq!(evaluate(&game, &controller_picks, s), Ok(true));
    assert_eq!(evaluate(&game, &others_cannot_force, s), Ok(false));
}

#[test]
fn next_002() {
    // Nested next operators
    assert_eq!(
        check_train_gate("{c}@({t}@(oog))"),
        [true, true, false, true]
    );
}

#[test]
fn invariant_001() {
    assert_eq!(check_train_gate("{c}[](oog)"), [true, true, false, true]);
    assert_eq!(check_train_gate("{t}[](oog)"), [true, true, true, false]);
    assert_eq!(check_train_gate("{0}[](oog)"), [false, false, false, false]);
    assert_eq!(check_train_gate("{c,t}[](oog)"), [true, true, true, true]);
}

#[test]
fn invariant_true_holds_everywhere_001() {
    // Every state lies on a cycle, so an invariant of true always holds
    assert_eq!(check_train_gate("{0}[](true)"), [true; 4]);
    assert_eq!(check_train_gate("{c}[](true)"), [true; 4]);

    let mut builder = GameBuilder::new();
    let states: Vec<StateIdx> = (0..7)
        .map(|i| {
            let controller = if i % 2 == 0 { "a" } else { "b" };
            builder.add_state(format!("r{}", i), Vec::<String>::new(), controller)
        })
        .collect();
    for (i, &state) in states.iter().enumerate() {
        builder.connect(state, &[states[(i + 1) % states.len()]]);
    }
    let ring = builder.build().unwrap();
    let phi = Phi::invariant(Coalition::new(["b"]), Phi::True);
    assert!(ModelChecker::new(&ring).is_valid(&phi).unwrap());
}

#[test]
fn until_goal_in_current_state_001() {
    // If the goal holds right away the until holds, whatever the coalition
    let game = train_gate();
    for players in [Coalition::empty(), Coalition::new(["c"]), Coalition::new(["t"])] {
        let phi = Phi::until(players, Phi::False, Phi::proposition("ig"));
        assert_eq!(evaluate(&game, &phi, Q3), Ok(true));
    }
}

#[test]
fn until_001() {
    assert_eq!(check_train_gate("{c}(oog) U (ig)"), [false, false, false, true]);
    assert_eq!(check_train_gate("{0}<>(req)"), [false, true, false, false]);
    assert_eq!(check_train_gate("{t}<>(req)"), [true, true, true, false]);
}

#[test]
fn until_ignores_left_hand_side_001() {
    // The left-hand side of an until is not checked along the way, so any
    // left-hand side gives the same result as eventually.
    let game = train_gate();
    let players = Coalition::new(["t"]);
    let eventually = Phi::eventually(players.clone(), Phi::proposition("ig"));
    let never = Phi::until(players, Phi::False, Phi::proposition("ig"));
    assert_eq!(
        evaluate_over_set(&game, &never, &ALL),
        evaluate_over_set(&game, &eventually, &ALL)
    );
}

#[test]
fn eventually_001() {
    assert_eq!(check_train_gate("{0}<>(ig)"), [false, false, false, true]);
    assert_eq!(check_train_gate("{t}<>(ig)"), [false, false, true, true]);
    assert_eq!(check_train_gate("{c}<>(ig)"), [false, false, false, true]);
    assert_eq!(check_train_gate("{c,t}<>(ig)"), [true; 4]);
    assert_eq!(check_train_gate("{c}<>(grant)"), [false, true, true, false]);
    assert_eq!(check_train_gate("{t}<>(grant)"), [false, false, true, false]);
}

#[test]
fn eventually_is_until_true_001() {
    let game = train_gate();
    for players in [
        Coalition::empty(),
        Coalition::new(["c"]),
        Coalition::new(["t"]),
        Coalition::new(["c", "t"]),
    ] {
        for goal in ["oog", "req", "grant", "ig"] {
            let eventually = Phi::eventually(players.clone(), Phi::proposition(goal));
            let until = Phi::until(players.clone(), Phi::True, Phi::proposition(goal));
            assert_eq!(
                evaluate_over_set(&game, &eventually, &ALL),
                evaluate_over_set(&game, &until, &ALL)
            );
        }
    }
}

#[test]
fn avoid_001() {
    // Avoid is checked as the negation of an invariant
    let game = train_gate();
    let cases = [
        (Coalition::new(["c"]), "grant", [false, false, false, false]),
        (Coalition::new(["t"]), "ig", [false, false, false, true]),
        (Coalition::empty(), "ig", [true, true, true, true]),
    ];
    for (players, goal, expected) in cases {
        let phi = Phi::avoid(players, Phi::proposition(goal));
        assert_eq!(evaluate_over_set(&game, &phi, &ALL).unwrap(), expected);
    }
}

#[test]
fn train_gate_properties_001() {
    let game = train_gate();
    let checker = ModelChecker::new(&game);
    for (formula, valid) in [
        ("{0}[]((oog ^ ~grant) -> {c,t}[](oog))", true),
        ("{0}[]((oog ^ ~grant) -> {c}[](oog))", true),
        ("{0}[](ig -> {c}@(oog))", true),
        ("{0}[](oog -> {c,t}<>(ig))", false),
        (
            "{0}[](oog -> {t}<>(req ^ ({c}<>(grant)) ^ ({c}[](~grant))))",
            false,
        ),
        ("{c}[](oog)", false),
    ] {
        let phi = parse_phi(formula).unwrap();
        assert_eq!(checker.is_valid(&phi), Ok(valid), "{}", formula);
    }
}

#[test]
fn nested_fixpoints_share_marks_001() {
    // An inner fixpoint reaching a state the outer one is still working on
    // closes the cycle with the outer operator's result
    assert_eq!(check_train_gate("{0}[](oog -> {c,t}<>(ig))"), [false; 4]);
    assert_eq!(
        check_train_gate("{t}[]({c}[](oog))"),
        [true, false, true, true]
    );
}

#[test]
fn nested_fixpoints_share_marks_002() {
    assert_eq!(
        check_train_gate("{t}<>({c}<>(ig))"),
        [false, false, true, true]
    );
    assert_eq!(
        check_train_gate("{c}[]({t}<>(ig))"),
        [false, false, false, true]
    );
    // Without an enclosing fixpoint the inner operators see no marks
    assert_eq!(check_train_gate("{c,t}<>(ig)"), [true; 4]);
    assert_eq!(check_train_gate("{c}[](oog)"), [true, true, false, true]);
}

#[test]
fn marking_is_clean_after_check_001() {
    let game = train_gate();
    let checker = ModelChecker::new(&game);
    let marking = Marking::new();
    let cases = [
        ("{0}[](oog -> {t}<>(req ^ ({c}<>(grant)) ^ ({c}[](~grant))))", false),
        ("{0}[]((oog ^ ~grant) -> {c}[](oog))", true),
    ];
    for (formula, expected) in cases {
        let phi = parse_phi(formula).unwrap();
        for state in ALL {
            assert_eq!(checker.check_with(&phi, state, &marking), Ok(expected));
            assert!(marking.is_clean());
        }
    }
}

#[test]
fn dirty_marking_001() {
    // A marking left in progress is reported instead of being trusted
    let game = train_gate();
    let checker = ModelChecker::new(&game);
    let marking = Marking::new();
    let phi = parse_phi("{c}[](oog)").unwrap();
    let guard = marking.enter(Q2);
    assert_eq!(
        checker.check_with(&phi, Q0, &marking),
        Err(CheckError::DirtyMarking { state: Q2 })
    );
    drop(guard);
    assert_eq!(checker.check_with(&phi, Q0, &marking), Ok(true));
    assert!(marking.is_clean());
}

#[test]
fn parallel_001() {
    let game = train_gate();
    let checker = ModelChecker::new(&game);
    let phi = parse_phi("{c}<>(grant)").unwrap();
    let states = [Q3, Q2, Q1, Q0, Q1];
    assert_eq!(
        checker.check_all_parallel(&phi, &states, 3).unwrap(),
        vec![false, true, true, false, true]
    );
}

#[test]
fn json_game_001() {
    // The demo game description is the same game
    let game: TurnBasedGame =
        serde_json::from_str(include_str!("../../demos/train_gate.json")).unwrap();
    let expected = train_gate();
    assert_eq!(game.state_count(), expected.state_count());
    assert_eq!(game.initial_state_index(), Q0);
    for state in ALL {
        assert_eq!(game.state(state), expected.state(state));
    }
    assert_eq!(game.players(), &["t".to_string(), "c".to_string()]);
}

#[test]
fn json_game_002() {
    // Dead ends are rejected while loading
    let json = r#"{ "states": [
        { "name": "a", "controller": "p", "transitions": [1] },
        { "name": "b", "controller": "p" }
    ] }"#;
    let err = serde_json::from_str::<TurnBasedGame>(json).unwrap_err();
    assert!(err.to_string().contains("no outgoing transitions"));
}

#[test]
fn unknown_state_001() {
    let game = train_gate();
    assert_eq!(
        evaluate(&game, &Phi::True, StateIdx(4)),
        Err(CheckError::UnknownState(StateIdx(4)))
    );
    assert_eq!(game.controller(Q1), "c");
}
