//! Main game state structure

use crate::core::{
    CardDefinition, CardId, CardInstance, DefinitionId, EntityStore, IdAllocator, Player,
    PlayerId, PlayerName,
};
use crate::game::{
    GameEndReason, GameEvent, KillSwitch, KillSwitchConfig, Stack, StackObjectId, TurnState,
};
use crate::loader::CardRegistry;
use crate::zones::Zone;
use crate::{MtgError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

/// Complete game state
///
/// The single source of truth for one game. Only the reducer mutates it
/// between transitions; everything else reads it through `&GameState`.
/// Cloning is cheap enough to apply every transition to a copy first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// All players, in turn order
    pub players: Vec<Player>,

    /// Every card instance in the game
    pub cards: EntityStore<CardInstance>,

    /// Immutable card definitions, shared with the engine that created the game
    pub card_definitions: Arc<CardRegistry>,

    /// The stack (for spells and abilities)
    pub stack: Stack,

    pub turn: TurnState,

    /// Player currently holding priority (None once the game is over)
    pub priority_player: Option<PlayerId>,

    /// Players who passed since the last state-changing action or step change
    pub players_who_passed_priority: SmallVec<[PlayerId; 4]>,

    /// Terminal once true
    pub game_ended: bool,

    pub end_reason: Option<GameEndReason>,

    /// Random number generator for effects (serializable for deterministic replay)
    pub rng: ChaCha12Rng,

    pub kill_switch: KillSwitch,

    /// Unified entity ID generator (shared across all entity types)
    ids: IdAllocator,
}

impl GameState {
    /// Create a game with the given players in turn order
    ///
    /// The first player starts; `with_starting_player` changes that.
    pub fn new<N: Into<PlayerName>>(
        player_names: impl IntoIterator<Item = N>,
        starting_life: i32,
        card_definitions: Arc<CardRegistry>,
        seed: u64,
    ) -> Result<Self> {
        let mut ids = IdAllocator::new();
        let players: Vec<Player> = player_names
            .into_iter()
            .map(|name| Player::new(ids.next_id(), name, starting_life))
            .collect();

        let first = players
            .first()
            .map(|p| p.id)
            .ok_or_else(|| MtgError::InvalidSettings("a game needs players".to_string()))?;

        Ok(GameState {
            players,
            cards: EntityStore::new(),
            card_definitions,
            stack: Stack::new(),
            turn: TurnState::new(first),
            priority_player: Some(first),
            players_who_passed_priority: SmallVec::new(),
            game_ended: false,
            end_reason: None,
            rng: ChaCha12Rng::seed_from_u64(seed),
            kill_switch: KillSwitch::new(KillSwitchConfig::default()),
            ids,
        })
    }

    /// Make another player go first (before any decision is taken)
    pub fn with_starting_player(mut self, player_id: PlayerId) -> Result<Self> {
        self.get_player(player_id)?;
        self.turn = TurnState::new(player_id);
        self.priority_player = Some(player_id);
        Ok(self)
    }

    pub fn with_kill_switch(mut self, config: KillSwitchConfig) -> Self {
        self.kill_switch = KillSwitch::new(config);
        self
    }

    /// Allocate an ID for a new stack object
    pub fn next_stack_object_id(&mut self) -> StackObjectId {
        self.ids.next_id()
    }

    /// Create a card instance owned by `owner` and put it into one of their zones
    pub fn create_card(
        &mut self,
        definition: &DefinitionId,
        owner: PlayerId,
        zone: Zone,
    ) -> Result<CardId> {
        self.card_definitions.get(definition)?;
        let card_id = self.ids.next_id();
        let turn_number = self.turn.turn_number;

        let zone_list = self
            .get_player_mut(owner)?
            .zones
            .get_zone_mut(zone)
            .ok_or_else(|| {
                MtgError::InvalidSettings(format!("cannot create a card on the {zone}"))
            })?;
        zone_list.add(card_id);

        let mut card = CardInstance::new(card_id, definition.clone(), owner);
        if zone == Zone::Battlefield {
            card.turn_entered_battlefield = Some(turn_number);
        }
        self.cards.insert(card_id, card);
        Ok(card_id)
    }

    /// Get a player by ID
    pub fn get_player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| MtgError::UnknownCardReference(format!("player {id}")))
    }

    /// Get a mutable player by ID
    pub fn get_player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| MtgError::UnknownCardReference(format!("player {id}")))
    }

    /// Get the index of a player by ID
    pub fn get_player_idx(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Definition of a card instance
    pub fn definition_of(&self, card_id: CardId) -> Result<&CardDefinition> {
        let card = self.cards.get(card_id)?;
        self.card_definitions.get(&card.definition)
    }

    /// Printed name of a card, for logs
    pub fn card_name(&self, card_id: CardId) -> String {
        self.definition_of(card_id)
            .map(|def| def.name.to_string())
            .unwrap_or_else(|_| format!("card {card_id}"))
    }

    /// Players still in the game, in turn order
    pub fn players_in_game(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.in_game())
    }

    /// Next player after `player_id` in turn order who is still in the game
    ///
    /// Wraps around; returns `player_id` itself when nobody else remains.
    pub fn next_player_in_game(&self, player_id: PlayerId) -> Option<PlayerId> {
        let idx = self.get_player_idx(player_id)?;
        let n = self.players.len();
        (1..=n)
            .map(|offset| &self.players[(idx + offset) % n])
            .find(|p| p.in_game())
            .map(|p| p.id)
    }

    /// Opponents of a player still in the game, in turn order after them
    pub fn opponents_of(&self, player_id: PlayerId) -> Vec<PlayerId> {
        let Some(idx) = self.get_player_idx(player_id) else {
            return Vec::new();
        };
        let n = self.players.len();
        (1..n)
            .map(|offset| &self.players[(idx + offset) % n])
            .filter(|p| p.in_game())
            .map(|p| p.id)
            .collect()
    }

    pub fn holds_priority(&self, player_id: PlayerId) -> bool {
        self.priority_player == Some(player_id)
    }

    /// Is this card on its controller's battlefield?
    pub fn is_on_battlefield(&self, card_id: CardId) -> bool {
        self.cards
            .get(card_id)
            .ok()
            .and_then(|card| self.get_player(card.controller).ok())
            .is_some_and(|p| p.zones.battlefield.contains(card_id))
    }

    /// Move a card between zones of its owner
    ///
    /// The stack has no card list of its own: moving to or from `Zone::Stack`
    /// only touches the other zone. Emits CARD_MOVED.
    pub fn move_card(
        &mut self,
        card_id: CardId,
        from: Zone,
        to: Zone,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let owner = self.cards.get(card_id)?.owner;
        let turn_number = self.turn.turn_number;
        let zones = &mut self.get_player_mut(owner)?.zones;

        if let Some(zone) = zones.get_zone_mut(from) {
            if !zone.remove(card_id) {
                return Err(MtgError::UnknownCardReference(format!(
                    "card {card_id} not in {from}"
                )));
            }
        }
        if let Some(zone) = zones.get_zone_mut(to) {
            zone.add(card_id);
        }

        let card = self.cards.get_mut(card_id)?;
        if to == Zone::Battlefield {
            card.turn_entered_battlefield = Some(turn_number);
        } else if from == Zone::Battlefield {
            card.turn_entered_battlefield = None;
            card.untap();
        }

        events.push(GameEvent::CardMoved {
            card_id,
            owner,
            from,
            to,
        });
        Ok(())
    }

    /// Draw the top card of a player's library
    ///
    /// Drawing from an empty library marks the player as having lost.
    pub fn draw_card(
        &mut self,
        player_id: PlayerId,
        events: &mut Vec<GameEvent>,
    ) -> Result<Option<CardId>> {
        let player = self.get_player_mut(player_id)?;
        let Some(&card_id) = player.zones.library.cards.last() else {
            player.has_lost = true;
            player.decked = true;
            return Ok(None);
        };
        self.move_card(card_id, Zone::Library, Zone::Hand, events)?;
        Ok(Some(card_id))
    }

    /// Untap all permanents controlled by a player; returns how many untapped
    pub fn untap_all(&mut self, player_id: PlayerId) -> Result<usize> {
        let battlefield = self.get_player(player_id)?.zones.battlefield.cards.clone();
        let mut count = 0;
        for card_id in battlefield {
            let card = self.cards.get_mut(card_id)?;
            if card.tapped {
                card.untap();
                count += 1;
            }
        }
        Ok(count)
    }

    /// Empty every mana pool, emitting MANA_POOL_EMPTIED for non-empty ones
    pub fn empty_mana_pools(&mut self, events: &mut Vec<GameEvent>) {
        for player in &mut self.players {
            if !player.mana_pool.is_empty() {
                player.empty_mana_pool();
                events.push(GameEvent::ManaPoolEmptied { player: player.id });
            }
        }
    }

    /// End the game and emit GAME_ENDED
    pub fn end_game(&mut self, reason: GameEndReason, events: &mut Vec<GameEvent>) {
        self.game_ended = true;
        self.priority_player = None;
        self.players_who_passed_priority.clear();
        self.end_reason = Some(reason.clone());
        events.push(GameEvent::GameEnded { reason });
    }

    /// Check if the game is over
    pub fn is_game_over(&self) -> bool {
        self.game_ended
    }

    /// Get the winner (if the game ended with one)
    pub fn get_winner(&self) -> Option<PlayerId> {
        self.end_reason.as_ref().and_then(GameEndReason::winner)
    }

    /// Verify referential integrity
    ///
    /// Every card in a zone or on the stack must exist, every card must have
    /// a known definition, and the passed set must only name players.
    pub fn check_invariants(&self) -> Result<()> {
        for player in &self.players {
            for card_id in player.zones.all_cards() {
                self.cards.get(card_id)?;
            }
        }
        for object in self.stack.iter() {
            self.cards.get(object.source.card_id())?;
            self.get_player(object.controller)?;
        }
        for (_, card) in self.cards.iter() {
            self.card_definitions.get(&card.definition)?;
            self.get_player(card.owner)?;
        }
        for &player_id in &self.players_who_passed_priority {
            self.get_player(player_id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardType;
    use crate::game::Step;

    fn registry() -> Arc<CardRegistry> {
        let mut registry = CardRegistry::new();
        registry
            .add(CardDefinition::new("island", "Island", CardType::Land))
            .unwrap();
        Arc::new(registry)
    }

    fn two_player_game() -> GameState {
        GameState::new(["Alice", "Bob"], 20, registry(), 42).unwrap()
    }

    #[test]
    fn test_game_creation() {
        let game = two_player_game();

        assert_eq!(game.players.len(), 2);
        assert_eq!(game.turn.turn_number, 1);
        assert_eq!(game.turn.step, Step::Untap);
        assert_eq!(game.priority_player, Some(game.players[0].id));
        assert!(!game.game_ended);
        game.check_invariants().unwrap();
    }

    #[test]
    fn test_no_players_rejected() {
        let names: [&str; 0] = [];
        assert!(matches!(
            GameState::new(names, 20, registry(), 0),
            Err(MtgError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_draw_card() {
        let mut game = two_player_game();
        let p1 = game.players[0].id;
        let card_id = game
            .create_card(&DefinitionId::new("island"), p1, Zone::Library)
            .unwrap();

        let mut events = Vec::new();
        assert_eq!(game.draw_card(p1, &mut events).unwrap(), Some(card_id));
        assert!(game.players[0].zones.hand.contains(card_id));
        assert_eq!(
            events,
            vec![GameEvent::CardMoved {
                card_id,
                owner: p1,
                from: Zone::Library,
                to: Zone::Hand,
            }]
        );

        // Library is now empty
        assert_eq!(game.draw_card(p1, &mut events).unwrap(), None);
        assert!(game.players[0].has_lost);
        assert!(game.players[0].decked);
    }

    #[test]
    fn test_unknown_definition() {
        let mut game = two_player_game();
        let p1 = game.players[0].id;
        assert!(matches!(
            game.create_card(&DefinitionId::new("missing"), p1, Zone::Hand),
            Err(MtgError::UnknownCardReference(_))
        ));
    }

    #[test]
    fn test_turn_order_helpers() {
        let mut game = GameState::new(["A", "B", "C"], 20, registry(), 1).unwrap();
        let ids: Vec<_> = game.players.iter().map(|p| p.id).collect();

        assert_eq!(game.next_player_in_game(ids[0]), Some(ids[1]));
        assert_eq!(game.next_player_in_game(ids[2]), Some(ids[0]));
        assert_eq!(game.opponents_of(ids[1]), vec![ids[2], ids[0]]);

        game.players[1].has_lost = true;
        assert_eq!(game.next_player_in_game(ids[0]), Some(ids[2]));
        assert_eq!(game.opponents_of(ids[0]), vec![ids[2]]);
    }

    #[test]
    fn test_invariant_violation_detected() {
        let mut game = two_player_game();
        game.players[0].zones.hand.add(CardId::new(999));
        assert!(matches!(
            game.check_invariants(),
            Err(MtgError::UnknownCardReference(_))
        ));
    }

    #[test]
    fn test_end_game() {
        let mut game = two_player_game();
        let p2 = game.players[1].id;
        let mut events = Vec::new();

        game.end_game(GameEndReason::PlayerDeath(p2), &mut events);
        assert!(game.is_game_over());
        assert_eq!(game.get_winner(), Some(p2));
        assert_eq!(game.priority_player, None);
        assert_eq!(events.len(), 1);
    }
}
