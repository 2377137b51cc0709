//! Integration tests for episode recording and replay.

use stack_chain::core::RulesConfig;
use stack_chain::policy::{play_episode, FirstLegal, UniformRandom};
use stack_chain::replay::{replay, EpisodeRecord, EpisodeSummary, ReplayError};
use stack_chain::StackGame;

fn random_episode(seed: u64) -> (StackGame, EpisodeRecord) {
    let mut game = StackGame::new(0).unwrap();
    let record = play_episode(&mut game, &mut UniformRandom::new(seed ^ 0xA5A5), seed).unwrap();
    (game, record)
}

#[test]
fn test_same_seed_same_record() {
    let (_, a) = random_episode(42);
    let (_, b) = random_episode(42);
    assert_eq!(a, b);
}

#[test]
fn test_replay_from_bytes() {
    let (game, record) = random_episode(7);
    let bytes = record.to_bytes().unwrap();
    let decoded = EpisodeRecord::from_bytes(&bytes).unwrap();

    let replayed = replay(&decoded).unwrap();
    assert_eq!(replayed.state(), game.state());
    assert!(replayed.is_terminated());
}

#[test]
fn test_replay_custom_config() {
    let config = RulesConfig::default()
        .with_max_turns(5)
        .with_zero_draw_rate(0.3);
    let mut game = StackGame::with_config(config.clone(), 0).unwrap();
    let record = play_episode(&mut game, &mut FirstLegal, 99).unwrap();

    assert_eq!(record.config, config);
    let replayed = replay(&record).unwrap();
    assert_eq!(replayed.state().current_turn, 6);
    assert_eq!(replayed.state().score, record.final_score);
}

#[test]
fn test_tampered_reward_diverges() {
    let (_, mut record) = random_episode(3);
    let index = record.steps.len() / 2;
    record.steps[index].reward += 1.0;

    match replay(&record) {
        Err(ReplayError::Diverged { step, .. }) => assert_eq!(step, index),
        other => panic!("expected divergence, got {:?}", other),
    }
}

#[test]
fn test_wrong_seed_diverges_or_mismatches() {
    let (_, mut record) = random_episode(11);
    record.seed = 12;

    assert!(matches!(
        replay(&record),
        Err(ReplayError::Diverged { .. }) | Err(ReplayError::ScoreMismatch { .. })
    ));
}

#[test]
fn test_tampered_score_mismatch() {
    let (_, mut record) = random_episode(5);
    record.final_score += 1000.0;
    assert!(matches!(
        replay(&record),
        Err(ReplayError::ScoreMismatch { .. })
    ));
}

#[test]
fn test_out_of_range_action_in_record() {
    let (_, mut record) = random_episode(8);
    record.steps[0].action = 40;
    assert!(matches!(replay(&record), Err(ReplayError::Engine(_))));
}

#[test]
fn test_summary_of_real_episode() {
    let (game, record) = random_episode(21);
    let summary = EpisodeSummary::from_record(&record);

    assert_eq!(summary.steps, record.len());
    assert_eq!(summary.turns, game.config().max_turns as usize);
    assert_eq!(summary.score, game.state().score);
    assert!(summary.full_chains <= summary.turns);
    assert!(summary.forced_clears <= summary.turns);
    // the random policy only picks legal actions
    assert_eq!(summary.invalid_actions, 0);
    assert!((summary.total_reward - record.total_reward()).abs() < 1e-9);
}
