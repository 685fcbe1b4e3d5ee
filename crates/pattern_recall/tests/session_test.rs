//! State machine scenarios for a recall session.

use pattern_recall::{
    Catalog, Command, MATCH_AWARD, OBSERVE_TICKS, Pattern, Phase, ResultAction, Session,
    SessionError, Transition,
};

/// Ticks the observation countdown to zero.
fn observe(session: &mut Session) {
    for _ in 0..OBSERVE_TICKS {
        assert_eq!(session.tick(), Transition::Applied);
    }
    assert_eq!(session.phase(), Phase::Guessing);
}

fn select(session: &mut Session, indices: &[usize]) {
    for &index in indices {
        assert_eq!(session.toggle(index), Ok(Transition::Applied));
    }
}

/// Plays the current level perfectly.
fn solve(session: &mut Session) {
    observe(session);
    let target = session.target().indices();
    select(session, &target);
    assert_eq!(session.submit(), Transition::Applied);
    assert!(session.is_exact_match());
}

/// Submits a guess that is certainly wrong for every built-in level.
fn fail(session: &mut Session) {
    observe(session);
    let target = session.target().indices();
    let wrong: Vec<usize> = target.iter().skip(1).copied().collect();
    if wrong.is_empty() {
        select(session, &[24]);
    } else {
        select(session, &wrong);
    }
    assert_eq!(session.submit(), Transition::Applied);
    assert!(!session.is_exact_match());
}

#[test]
fn test_level_1_exact_match_scores() {
    let mut session = Session::standard();
    observe(&mut session);
    select(&mut session, &[0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24]);
    assert_eq!(session.submit(), Transition::Applied);

    assert_eq!(session.phase(), Phase::Result);
    assert!(session.is_exact_match());
    assert_eq!(session.score(), MATCH_AWARD);
    assert!(!session.hint_revealed());
    assert!(session.incorrect().is_empty());
}

#[test]
fn test_exact_match_before_final_level_offers_next() {
    let mut session = Session::standard();
    solve(&mut session);

    let summary = session.view().summary.expect("Result summary");
    assert!(summary.success);
    assert_eq!(summary.title, "Excellent!");
    assert_eq!(summary.message, "Flawless execution! Move on to Level 2.");
    assert_eq!(summary.actions, vec![ResultAction::Next]);
    assert_eq!(summary.actions[0].command(), Command::Next);
}

#[test]
fn test_level_4_partial_guess() {
    let mut session = Session::standard();
    for _ in 0..3 {
        solve(&mut session);
        session.next_level().expect("Next level");
    }
    assert_eq!(session.level_index(), 3);

    observe(&mut session);
    select(&mut session, &[12]);
    session.submit();

    assert_eq!(session.correct().indices(), vec![12]);
    assert_eq!(session.incorrect().indices(), vec![7, 11, 13, 17]);
    assert!(!session.is_exact_match());
    assert!(session.hint_revealed());
    assert_eq!(session.score(), 3 * MATCH_AWARD);
}

#[test]
fn test_double_toggle_restores_selection() {
    let mut session = Session::standard();
    observe(&mut session);
    select(&mut session, &[3, 8]);
    let before: Pattern = session.selection().clone();

    select(&mut session, &[17, 17]);
    assert_eq!(*session.selection(), before);
    select(&mut session, &[3, 3]);
    assert_eq!(*session.selection(), before);
}

#[test]
fn test_mismatch_keeps_score_and_reveals_hint() {
    let mut session = Session::standard();
    solve(&mut session);
    session.next_level().expect("Next level");
    fail(&mut session);

    assert_eq!(session.score(), MATCH_AWARD);
    assert!(session.hint_revealed());
    assert_eq!(session.view().summary.map(|s| s.actions), Some(vec![ResultAction::Retry]));
}

#[test]
fn test_correct_and_incorrect_partition_union() {
    let mut session = Session::standard();
    observe(&mut session);
    select(&mut session, &[0, 1, 2, 3]);
    session.submit();

    let target = session.target().clone();
    let selection = session.selection().clone();
    assert_eq!(*session.correct(), selection.intersection(&target));
    assert_eq!(*session.incorrect(), selection.symmetric_difference(&target));
    assert!(session.correct().is_disjoint(session.incorrect()));
}

#[test]
fn test_tick_after_countdown_is_noop() {
    let mut session = Session::standard();
    observe(&mut session);

    assert_eq!(session.tick(), Transition::Ignored(Phase::Guessing));
    assert_eq!(session.remaining(), 0);
    assert_eq!(session.phase(), Phase::Guessing);
}

#[test]
fn test_commands_ignored_in_wrong_phase() {
    let mut session = Session::standard();
    assert_eq!(session.submit(), Transition::Ignored(Phase::Observing));
    assert_eq!(session.next_level(), Ok(Transition::Ignored(Phase::Observing)));
    assert_eq!(session.retry(), Ok(Transition::Ignored(Phase::Observing)));
    assert_eq!(session.toggle(0), Ok(Transition::Ignored(Phase::Observing)));

    observe(&mut session);
    select(&mut session, &[0]);
    session.submit();
    assert_eq!(session.toggle(5), Ok(Transition::Ignored(Phase::Result)));
    assert_eq!(session.tick(), Transition::Ignored(Phase::Result));
    assert_eq!(session.submit(), Transition::Ignored(Phase::Result));
}

#[test]
fn test_toggle_out_of_range_is_an_error() {
    let mut session = Session::standard();
    observe(&mut session);
    assert_eq!(
        session.toggle(25),
        Err(SessionError::OutOfRange {
            index: 25,
            cell_count: 25
        })
    );
    assert!(session.selection().is_empty());
}

#[test]
fn test_perfect_run_wraps_and_clears_score() {
    let mut session = Session::standard();
    for level in 0..10 {
        assert_eq!(session.level_index(), level);
        solve(&mut session);
        assert_eq!(session.score(), (level as u32 + 1) * MATCH_AWARD);
        if level < 9 {
            session.next_level().expect("Next level");
        }
    }

    assert!(session.is_final_level());
    let summary = session.view().summary.expect("Result summary");
    assert_eq!(summary.title, "Challenge Conquered!");
    assert_eq!(summary.actions, vec![ResultAction::Restart, ResultAction::Finish]);

    assert_eq!(session.next_level(), Ok(Transition::Applied));
    assert_eq!(session.level_index(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.phase(), Phase::Observing);
}

#[test]
fn test_failed_final_level_still_wraps_and_clears_score() {
    let mut session = Session::standard();
    for _ in 0..9 {
        solve(&mut session);
        session.next_level().expect("Next level");
    }
    assert!(session.is_final_level());
    fail(&mut session);
    assert_eq!(session.score(), 9 * MATCH_AWARD);

    session.next_level().expect("Next level");
    assert_eq!(session.level_index(), 0);
    assert_eq!(session.score(), 0);
}

#[test]
fn test_reset_mid_observation() {
    let mut session = Session::standard();
    solve(&mut session);
    session.next_level().expect("Next level");
    session.tick();
    session.tick();
    let stale = session.entry();

    assert_eq!(session.reset(), Ok(Transition::Applied));
    assert_eq!(session.level_index(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.phase(), Phase::Observing);
    assert_eq!(session.remaining(), OBSERVE_TICKS);

    assert_eq!(session.tick_entry(stale), Transition::Stale(stale));
    assert_eq!(session.remaining(), OBSERVE_TICKS);

    let live = session.entry();
    assert_eq!(session.tick_entry(live), Transition::Applied);
    assert_eq!(session.remaining(), OBSERVE_TICKS - 1);
}

#[test]
fn test_stale_tick_cannot_end_new_observation() {
    let mut session = Session::standard();
    observe(&mut session);
    select(&mut session, &[0]);
    session.submit();
    let old = session.entry();
    session.retry().expect("Retry");

    for _ in 0..OBSERVE_TICKS {
        assert_eq!(session.tick_entry(old), Transition::Stale(old));
    }
    assert_eq!(session.phase(), Phase::Observing);
    assert_eq!(session.remaining(), OBSERVE_TICKS);
}

#[test]
fn test_replay_matches_step_by_step() {
    let mut commands = vec![Command::Tick; OBSERVE_TICKS as usize];
    commands.extend([7, 11, 12, 13, 17].map(|index| Command::Toggle { index }));
    commands.push(Command::Submit);
    commands.push(Command::Retry);

    let replayed = Session::replay(Catalog::standard(), &commands).expect("Valid replay");

    let mut stepped = Session::standard();
    for command in &commands {
        stepped.apply(*command).expect("Valid command");
    }

    assert_eq!(replayed.view(), stepped.view());
    assert_eq!(replayed.phase(), Phase::Observing);
    assert_eq!(replayed.score(), 0);
}

#[test]
fn test_replay_stops_on_error() {
    let commands = [Command::Reset, Command::Toggle { index: 40 }];
    assert!(Session::replay(Catalog::standard(), &commands).is_err());
}
