//! Game initialization from settings
//!
//! Creates the players and their cards, shuffles libraries with the game's
//! own RNG and draws opening hands.

use crate::game::GameState;
use crate::loader::{CardRegistry, GameSettings};
use crate::zones::Zone;
use crate::Result;
use std::sync::Arc;

/// Build the initial state for a game
///
/// Deterministic: the same settings and registry always give the same state.
pub fn initialize_game(settings: &GameSettings, registry: Arc<CardRegistry>) -> Result<GameState> {
    settings.validate()?;

    let names = settings.players.iter().map(|p| p.name.clone());
    let mut game = GameState::new(names, settings.starting_life, registry, settings.seed)?
        .with_kill_switch(settings.kill_switch);
    let player_ids: Vec<_> = game.players.iter().map(|p| p.id).collect();
    game = game.with_starting_player(player_ids[settings.starting_player])?;

    for (setup, &player_id) in settings.players.iter().zip(&player_ids) {
        for card in setup.deck.cards() {
            game.create_card(card, player_id, Zone::Library)?;
        }
        for card in &setup.hand {
            game.create_card(card, player_id, Zone::Hand)?;
        }
        for card in &setup.battlefield {
            game.create_card(card, player_id, Zone::Battlefield)?;
        }
    }

    if settings.shuffle_libraries {
        for player in &mut game.players {
            player.zones.library.shuffle(&mut game.rng);
        }
    }

    // Opening hands are part of setup, not a draw: an empty library is fine
    for player in &mut game.players {
        for _ in 0..settings.opening_hand_size {
            let Some(card_id) = player.zones.library.draw_top() else {
                break;
            };
            player.zones.hand.add(card_id);
        }
    }

    game.check_invariants()?;
    Ok(game)
}
