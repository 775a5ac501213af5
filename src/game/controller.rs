//! Player controller trait and game state view
//!
//! This module defines the interface between the game engine and player
//! controllers (AI or scripts). The game loop asks the controller of the
//! priority holder to pick one of the legal decisions, and the controller
//! inspects a read-only view of the game state to make its choice.

use crate::core::{CardId, ManaPool, PlayerDecision, PlayerId};
use crate::game::{GameState, Step};

/// Read-only view of game state for controllers
///
/// This provides access to game information without allowing mutation.
pub struct GameStateView<'a> {
    game: &'a GameState,
    player_id: PlayerId,
}

impl<'a> GameStateView<'a> {
    /// Create a new view of the game state from a player's perspective
    pub fn new(game: &'a GameState, player_id: PlayerId) -> Self {
        GameStateView { game, player_id }
    }

    /// Get the player ID this view is for
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Get cards in this player's hand
    pub fn hand(&self) -> &[CardId] {
        self.game
            .get_player(self.player_id)
            .map(|p| p.zones.hand.cards.as_slice())
            .unwrap_or(&[])
    }

    /// Get this player's permanents
    pub fn battlefield(&self) -> &[CardId] {
        self.game
            .get_player(self.player_id)
            .map(|p| p.zones.battlefield.cards.as_slice())
            .unwrap_or(&[])
    }

    /// Get player's current life total
    pub fn life(&self) -> i32 {
        self.game
            .get_player(self.player_id)
            .map(|p| p.life)
            .unwrap_or(0)
    }

    pub fn mana_pool(&self) -> ManaPool {
        self.game
            .get_player(self.player_id)
            .map(|p| p.mana_pool)
            .unwrap_or_default()
    }

    /// Get a card's name
    pub fn card_name(&self, card_id: CardId) -> Option<String> {
        self.game
            .definition_of(card_id)
            .ok()
            .map(|def| def.name.to_string())
    }

    /// Check if a card is a land
    pub fn is_land(&self, card_id: CardId) -> bool {
        self.game
            .definition_of(card_id)
            .is_ok_and(|def| def.is_land())
    }

    /// Check if a card is tapped
    pub fn is_tapped(&self, card_id: CardId) -> bool {
        self.game.cards.get(card_id).is_ok_and(|c| c.tapped)
    }

    /// Opponents still in the game, in turn order after this player
    pub fn opponents(&self) -> Vec<PlayerId> {
        self.game.opponents_of(self.player_id)
    }

    pub fn step(&self) -> Step {
        self.game.turn.step
    }

    pub fn turn_number(&self) -> u32 {
        self.game.turn.turn_number
    }

    pub fn stack_len(&self) -> usize {
        self.game.stack.len()
    }

    /// The whole state, for controllers that need more than the helpers
    pub fn game(&self) -> &GameState {
        self.game
    }
}

/// Player controller trait
///
/// Implement this trait to create AI players or connect to UI.
/// The game loop calls it whenever its player holds priority.
pub trait PlayerController {
    /// Get the player ID this controller is responsible for
    fn player_id(&self) -> PlayerId;

    /// Choose one of the available decisions
    ///
    /// `available` is exactly the legal set for this player. Returning None
    /// passes priority.
    fn choose_decision(
        &mut self,
        view: &GameStateView,
        available: &[PlayerDecision],
    ) -> Option<PlayerDecision>;

    /// Called when the game ends (for cleanup/logging)
    fn on_game_end(&mut self, _view: &GameStateView, _won: bool) {}

    /// Short name used in logs
    fn name(&self) -> &str {
        "controller"
    }
}
