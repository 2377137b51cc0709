//! The game engine.
//!
//! `StackGame` owns one `GameState` and one draw policy. Drivers call
//! `reset`, then alternate `action_masks` and `step` until `terminated`.
//!
//! ```
//! use stack_chain::StackGame;
//!
//! let mut game = StackGame::new(7).unwrap();
//! let mask = game.action_masks();
//! let action = mask.legal_actions().next().unwrap();
//! let outcome = game.step(action).unwrap();
//! assert!(!outcome.terminated);
//! ```

use smallvec::SmallVec;

use crate::core::{
    Action, Card, ClearOutcome, EngineError, GameState, Hold, RulesConfig, HAND_SIZE,
};
use crate::rules::{legality, scoring, ActionMask, DrawPolicy, RandomDraw};

use super::observation::{Info, Observation, StepOutcome};

/// Single-player stack-chain game.
#[derive(Clone, Debug)]
pub struct StackGame<D = RandomDraw> {
    config: RulesConfig,
    state: GameState,
    draw: D,
}

impl StackGame<RandomDraw> {
    /// Create a standard game, dealt from `seed`.
    pub fn new(seed: u64) -> Result<Self, EngineError> {
        Self::with_config(RulesConfig::default(), seed)
    }

    /// Create a game with custom rules, dealt from `seed`.
    pub fn with_config(config: RulesConfig, seed: u64) -> Result<Self, EngineError> {
        let draw = RandomDraw::new(seed).with_zero_rate(config.zero_draw_rate);
        Self::with_draw(config, draw)
    }
}

impl<D: DrawPolicy> StackGame<D> {
    /// Create a game with a custom draw policy and deal the opening hand.
    ///
    /// `config.zero_draw_rate` is not pushed into `draw`: a `RandomDraw`
    /// passed here should already use the same rate, or recorded episodes
    /// will not replay. `with_config` keeps the two in step.
    pub fn with_draw(config: RulesConfig, draw: D) -> Result<Self, EngineError> {
        let mut game = Self {
            config,
            state: GameState::default(),
            draw,
        };
        game.deal()?;
        Ok(game)
    }

    /// Create a game positioned at an arbitrary state.
    ///
    /// The state is taken as-is, without checking invariants.
    pub fn from_state(config: RulesConfig, state: GameState, draw: D) -> Self {
        Self {
            config,
            state,
            draw,
        }
    }

    /// Start a new episode.
    ///
    /// With a seed, the draw sequence restarts from it; without one the
    /// current sequence continues.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<(Observation, Info), EngineError> {
        if let Some(seed) = seed {
            self.draw.reseed(seed);
        }
        self.deal()?;
        Ok((self.observation(), self.info()))
    }

    /// Apply one action.
    ///
    /// Ids outside the action space are an error. Anything inside it is
    /// accepted: a rule violation costs `penalty_invalid_action` and leaves
    /// the state alone. If nothing can be played onto a non-empty stack,
    /// the stack is cleared instead and `info.forced_clear` is set.
    pub fn step(&mut self, action_id: usize) -> Result<StepOutcome, EngineError> {
        let action = Action::from_index(action_id)?;

        if self.is_terminated() {
            log::warn!(
                "step({}) on a finished episode (turn {} of {})",
                action_id,
                self.state.current_turn,
                self.config.max_turns
            );
        }

        if legality::forced_clear_pending(&self.state) {
            let outcome = self.clear_stack();
            log::debug!(
                "no playable card: forced clear replaced {} (reward {})",
                action,
                outcome.reward
            );
            return Ok(self.outcome(outcome.reward, true));
        }

        let reward = match action {
            Action::PlayHand(slot) => self.play_from_hand(slot)?,
            Action::PlayHold => self.play_from_hold(),
            Action::Merge(_) => self.merge(action)?,
            Action::Hold(slot) => self.hold(slot)?,
            Action::ClearStack => self.clear(),
        };

        Ok(self.outcome(reward, false))
    }

    /// Legality of every action id in the current state.
    #[must_use]
    pub fn action_masks(&self) -> ActionMask {
        legality::action_masks(&self.state, &self.config)
    }

    /// Legal action ids in ascending order.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<usize> {
        self.action_masks().legal_actions().collect()
    }

    /// Agent-facing view of the current state.
    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation::from_state(&self.state, &self.config)
    }

    /// Diagnostic view of the current state.
    #[must_use]
    pub fn info(&self) -> Info {
        Info::from_state(&self.state, false)
    }

    /// Has the turn limit been passed?
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.state.current_turn > self.config.max_turns
    }

    /// Will the next `step` clear the stack regardless of its action?
    #[must_use]
    pub fn forced_clear_pending(&self) -> bool {
        legality::forced_clear_pending(&self.state)
    }

    /// Describe an action id against the current state.
    pub fn describe_action(&self, action_id: usize) -> Result<String, EngineError> {
        Ok(Action::from_index(action_id)?.describe(&self.state))
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The rules in force.
    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// The draw policy.
    #[must_use]
    pub fn draw_policy(&self) -> &D {
        &self.draw
    }

    // === Transitions ===

    fn play_from_hand(&mut self, slot: usize) -> Result<f64, EngineError> {
        if !legality::can_play_hand(&self.state, slot) {
            return Ok(self.reject(Action::PlayHand(slot)));
        }

        let mut staged = self.state.clone();
        staged.stack.push(staged.hand[slot]);
        refill(&mut self.draw, &mut staged, slot)?;
        self.state = staged;
        Ok(0.0)
    }

    fn play_from_hold(&mut self) -> f64 {
        let Some(card) = self.state.hold.card() else {
            return self.reject(Action::PlayHold);
        };
        if !legality::can_play_hold(&self.state) {
            return self.reject(Action::PlayHold);
        }

        self.state.stack.push(card);
        self.state.hold = Hold::Empty;
        0.0
    }

    fn merge(&mut self, action: Action) -> Result<f64, EngineError> {
        let Some((low, high)) = action.merge_slots() else {
            return Ok(self.reject(action));
        };
        if !legality::can_merge(&self.state, &self.config, low, high) {
            return Ok(self.reject(action));
        }

        let mut staged = self.state.clone();
        staged.hand[low] = staged.hand[low].merged();
        refill(&mut self.draw, &mut staged, high)?;
        staged.merges_this_turn += 1;
        self.state = staged;
        Ok(0.0)
    }

    fn hold(&mut self, slot: usize) -> Result<f64, EngineError> {
        if !legality::can_hold(&self.state, slot) {
            return Ok(self.reject(Action::Hold(slot)));
        }

        let mut staged = self.state.clone();
        staged.hold = Hold::Wildcard;
        refill(&mut self.draw, &mut staged, slot)?;
        self.state = staged;
        Ok(0.0)
    }

    fn clear(&mut self) -> f64 {
        if !legality::can_clear(&self.state) {
            return self.reject(Action::ClearStack);
        }
        self.clear_stack().reward
    }

    /// Score and empty the stack, then start the next turn.
    fn clear_stack(&mut self) -> ClearOutcome {
        let outcome = scoring::score_clear(&self.state.stack, &self.config);

        if outcome.reward > 0.0 {
            self.state.score += outcome.reward;
        }
        if outcome.full_chain {
            log::debug!(
                "full chain on turn {} with {} wildcard(s): +{}",
                self.state.current_turn,
                outcome.zeros,
                outcome.reward
            );
        }

        self.state.last_clear = outcome;
        self.state.stack.clear();
        self.state.current_turn += 1;
        self.state.merges_this_turn = 0;

        if self.is_terminated() {
            log::info!(
                "episode finished after {} turns, score {}",
                self.config.max_turns,
                self.state.score
            );
        }

        outcome
    }

    fn reject(&self, action: Action) -> f64 {
        log::trace!(
            "rejected {} on turn {}",
            action.describe(&self.state),
            self.state.current_turn
        );
        self.config.penalty_invalid_action
    }

    // === Drawing ===

    /// Deal a fresh hand and next card into a turn-1 state.
    ///
    /// Cards are drawn one by one against what has been dealt so far, so a
    /// second `5` cannot appear during the deal.
    fn deal(&mut self) -> Result<(), EngineError> {
        let mut dealt: SmallVec<[Card; HAND_SIZE + 1]> = SmallVec::new();
        for _ in 0..=HAND_SIZE {
            let five_in_play = dealt.contains(&Card::FIVE);
            dealt.push(self.draw.draw(five_in_play)?);
        }

        let hand = [dealt[0], dealt[1], dealt[2], dealt[3]];
        self.state = GameState::new(hand, Some(dealt[HAND_SIZE]));
        Ok(())
    }

    fn outcome(&self, reward: f64, forced_clear: bool) -> StepOutcome {
        StepOutcome {
            observation: self.observation(),
            reward,
            terminated: self.is_terminated(),
            truncated: false,
            info: Info::from_state(&self.state, forced_clear),
        }
    }
}

/// Move the next card into `slot` of a staged state and draw a new next card.
///
/// Handlers apply their move to a copy of the state and commit it only once
/// this succeeds, so a failed draw leaves the live state untouched.
fn refill<D: DrawPolicy>(
    draw: &mut D,
    staged: &mut GameState,
    slot: usize,
) -> Result<(), EngineError> {
    let incoming = match staged.next_card.take() {
        Some(card) => card,
        None => draw.draw(staged.five_in_play())?,
    };
    staged.hand[slot] = incoming;
    staged.next_card = Some(draw.draw(staged.five_in_play())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ScriptedDraw;

    fn hand(values: [u8; 4]) -> [Card; 4] {
        values.map(Card::new)
    }

    fn scripted(state: GameState, refills: &[u8]) -> StackGame<ScriptedDraw> {
        StackGame::from_state(
            RulesConfig::default(),
            state,
            ScriptedDraw::from_values(refills),
        )
    }

    #[test]
    fn test_new_game_is_dealt() {
        let game = StackGame::new(42).unwrap();
        let state = game.state();

        assert_eq!(state.current_turn, 1);
        assert!(state.next_card.is_some());
        assert!(state.stack.is_empty());
        assert!(state.hold.is_empty());
        assert!(state.count_on_board(Card::FIVE) <= 1);
        assert!(!game.is_terminated());
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = StackGame::new(1234).unwrap();
        let b = StackGame::new(1234).unwrap();
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_reset_with_seed_restarts() {
        let mut game = StackGame::new(77).unwrap();
        let first = game.state().clone();

        game.step(game.legal_actions()[0]).unwrap();
        let (obs, info) = game.reset(Some(77)).unwrap();

        assert_eq!(game.state(), &first);
        assert_eq!(obs, Observation::from_state(&first, game.config()));
        assert_eq!(info.current_turn, 1);
        assert_eq!(info.score, 0.0);
    }

    #[test]
    fn test_deal_order() {
        let draw = ScriptedDraw::from_values(&[1, 2, 3, 4, 5]);
        let game = StackGame::with_draw(RulesConfig::default(), draw).unwrap();
        assert_eq!(game.state().hand, hand([1, 2, 3, 4]));
        assert_eq!(game.state().next_card, Some(Card::FIVE));
        assert_eq!(game.draw_policy().remaining(), 0);
    }

    #[test]
    fn test_deal_exhaustion_is_fatal() {
        let draw = ScriptedDraw::from_values(&[1, 2]);
        let result = StackGame::with_draw(RulesConfig::default(), draw);
        assert!(matches!(result, Err(EngineError::DrawExhausted)));
    }

    #[test]
    fn test_play_refills_from_next() {
        let mut game = scripted(GameState::new(hand([2, 3, 1, 4]), Some(Card::new(5))), &[1]);

        let outcome = game.step(2).unwrap();
        assert_eq!(outcome.reward, 0.0);
        assert_eq!(game.state().stack.as_slice(), &[Card::new(1)]);
        assert_eq!(game.state().hand, hand([2, 3, 5, 4]));
        assert_eq!(game.state().next_card, Some(Card::new(1)));
    }

    #[test]
    fn test_refill_without_next_card_draws_twice() {
        let mut game = scripted(GameState::new(hand([2, 3, 1, 4]), None), &[3, 4]);

        game.step(0).unwrap();
        assert_eq!(game.state().hand[0], Card::new(3));
        assert_eq!(game.state().next_card, Some(Card::new(4)));
    }

    #[test]
    fn test_merge_writes_low_refills_high() {
        let mut game = scripted(GameState::new(hand([1, 3, 2, 3]), Some(Card::new(2))), &[4]);

        // (1, 3) is merge id 9
        let outcome = game.step(9).unwrap();
        assert_eq!(outcome.reward, 0.0);
        assert_eq!(game.state().hand, hand([1, 4, 2, 2]));
        assert_eq!(game.state().next_card, Some(Card::new(4)));
        assert_eq!(game.state().merges_this_turn, 1);
        assert_eq!(outcome.observation.remaining_merges, 1);
    }

    #[test]
    fn test_merge_fours_saturate() {
        let mut game = scripted(GameState::new(hand([4, 4, 1, 2]), Some(Card::new(3))), &[1]);

        game.step(5).unwrap();
        assert_eq!(game.state().hand, hand([4, 3, 1, 2]));
    }

    #[test]
    fn test_hold_overwrites() {
        let state =
            GameState::new(hand([0, 2, 3, 4]), Some(Card::new(1))).with_hold(Hold::Wildcard);
        let mut game = scripted(state, &[2]);

        let outcome = game.step(11).unwrap();
        assert_eq!(outcome.reward, 0.0);
        assert_eq!(game.state().hold, Hold::Wildcard);
        assert_eq!(game.state().hand, hand([1, 2, 3, 4]));
        assert_eq!(outcome.observation.hold, 1);
    }

    #[test]
    fn test_play_hold_empties_slot() {
        let state =
            GameState::new(hand([1, 2, 3, 4]), Some(Card::new(1))).with_hold(Hold::Wildcard);
        let mut game = scripted(state, &[]);

        let outcome = game.step(4).unwrap();
        assert_eq!(outcome.reward, 0.0);
        assert!(game.state().hold.is_empty());
        assert_eq!(game.state().stack.as_slice(), &[Card::ZERO]);
        // no draw for a hold play
        assert_eq!(game.state().hand, hand([1, 2, 3, 4]));
    }

    #[test]
    fn test_play_empty_hold_penalized() {
        let mut game = scripted(GameState::new(hand([1, 2, 3, 4]), Some(Card::new(1))), &[]);
        let before = game.state().clone();

        let outcome = game.step(4).unwrap();
        assert_eq!(outcome.reward, -0.1);
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn test_clear_empty_stack_penalized() {
        let mut game = scripted(GameState::new(hand([1, 2, 3, 4]), Some(Card::new(1))), &[]);
        let outcome = game.step(15).unwrap();
        assert_eq!(outcome.reward, -0.1);
        assert_eq!(game.state().current_turn, 1);
    }

    #[test]
    fn test_invalid_action_id_is_error() {
        let mut game = StackGame::new(3).unwrap();
        let before = game.state().clone();

        assert_eq!(game.step(16), Err(EngineError::InvalidAction { id: 16 }));
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn test_invalid_action_id_checked_before_forced_clear() {
        let state = GameState::new(hand([1, 2, 3, 4]), Some(Card::new(1)))
            .with_stack(&[Card::new(1), Card::new(5)]);
        let mut game = scripted(state, &[]);
        assert!(game.forced_clear_pending());

        assert!(game.step(99).is_err());
        assert_eq!(game.state().current_turn, 1);
    }

    #[test]
    fn test_describe_action() {
        let game = scripted(GameState::new(hand([1, 2, 3, 0]), Some(Card::new(1))), &[]);
        assert_eq!(game.describe_action(14).unwrap(), "hold hand slot 4 (0)");
        assert!(game.describe_action(20).is_err());
    }
}
