//! Decision enumerator
//!
//! Computes the legal decisions for the player holding priority. Pure and
//! side-effect free: calling it repeatedly on the same state gives the same
//! list in the same order (pass, lands in hand order, mana sources in
//! battlefield order, spells in hand order then target order, end game).

use crate::core::{CardDefinition, PlayerDecision, PlayerId};
use crate::game::GameState;

/// Legal decisions for the current priority holder
pub fn decisions_for(state: &GameState) -> Vec<PlayerDecision> {
    match state.priority_player {
        Some(player) if !state.game_ended => decisions_for_player(state, player),
        _ => Vec::new(),
    }
}

/// Legal decisions for one player
///
/// Empty unless the player holds priority and the game is still running.
pub fn decisions_for_player(state: &GameState, player_id: PlayerId) -> Vec<PlayerDecision> {
    if state.game_ended || !state.holds_priority(player_id) {
        return Vec::new();
    }
    let Ok(player) = state.get_player(player_id) else {
        return Vec::new();
    };

    let mut decisions = vec![PlayerDecision::PassPriority];

    if can_play_land_now(state, player_id) {
        decisions.extend(
            player
                .zones
                .hand
                .iter()
                .filter(|&card_id| state.definition_of(card_id).is_ok_and(|def| def.is_land()))
                .map(|card_id| PlayerDecision::PlayLand { card_id }),
        );
    }

    for card_id in player.zones.battlefield.iter() {
        let untapped = state.cards.get(card_id).is_ok_and(|card| !card.tapped);
        let has_mana = state
            .definition_of(card_id)
            .is_ok_and(CardDefinition::has_mana_ability);
        if untapped && has_mana {
            decisions.push(PlayerDecision::TapForMana { card_id });
        }
    }

    for card_id in player.zones.hand.iter() {
        let Ok(def) = state.definition_of(card_id) else {
            continue;
        };
        if !can_cast_now(state, player_id, def) || !player.mana_pool.can_pay(&def.mana_cost) {
            continue;
        }
        let spec = def.spell_target();
        if spec.requires_target() {
            decisions.extend(
                state
                    .legal_targets(player_id, spec)
                    .into_iter()
                    .map(|target| PlayerDecision::CastSpell {
                        card_id,
                        target: Some(target),
                    }),
            );
        } else {
            decisions.push(PlayerDecision::CastSpell {
                card_id,
                target: None,
            });
        }
    }

    decisions.push(PlayerDecision::EndGame);
    decisions
}

/// Is the player in a window where sorcery-speed actions are allowed?
///
/// Their own main phase with an empty stack.
pub fn is_sorcery_timing(state: &GameState, player_id: PlayerId) -> bool {
    state.turn.active_player == player_id && state.turn.step.is_main() && state.stack.is_empty()
}

/// Can the player play a land right now (ignoring which cards are in hand)?
pub fn can_play_land_now(state: &GameState, player_id: PlayerId) -> bool {
    is_sorcery_timing(state, player_id) && state.turn.lands_played_this_turn < 1
}

/// Does the timing allow casting this card? Mana is checked separately.
pub fn can_cast_now(state: &GameState, player_id: PlayerId, def: &CardDefinition) -> bool {
    !def.is_land() && (def.is_instant() || is_sorcery_timing(state, player_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        Ability, CardId, CardType, Color, DefinitionId, Effect, Target, TargetSpec,
    };
    use crate::game::Step;
    use crate::loader::CardRegistry;
    use crate::zones::Zone;
    use std::sync::Arc;

    fn registry() -> Arc<CardRegistry> {
        let mut registry = CardRegistry::new();
        let cards = [
            CardDefinition::new("mountain", "Mountain", CardType::Land)
                .with_ability(Ability::mana(Color::Red, 1)),
            CardDefinition::new("bolt", "Lightning Bolt", CardType::Instant)
                .with_cost("R")
                .with_ability(Ability::spell(
                    "Lightning Bolt deals 3 damage to any target.",
                    TargetSpec::AnyPlayer,
                    [Effect::DealDamage { amount: 3 }],
                )),
            CardDefinition::new("divination", "Divination", CardType::Sorcery)
                .with_cost("R")
                .with_ability(Ability::spell(
                    "Draw two cards.",
                    TargetSpec::None,
                    [Effect::DrawCards { count: 2 }],
                )),
        ];
        for card in cards {
            registry.add(card).unwrap();
        }
        Arc::new(registry)
    }

    fn setup() -> (GameState, PlayerId, PlayerId) {
        let game = GameState::new(["Alice", "Bob"], 20, registry(), 0).unwrap();
        let (p1, p2) = (game.players[0].id, game.players[1].id);
        (game, p1, p2)
    }

    fn add(game: &mut GameState, def: &str, owner: PlayerId, zone: Zone) -> CardId {
        game.create_card(&DefinitionId::new(def), owner, zone)
            .unwrap()
    }

    #[test]
    fn test_always_pass_and_end_game() {
        let (game, p1, p2) = setup();
        assert_eq!(
            decisions_for(&game),
            vec![PlayerDecision::PassPriority, PlayerDecision::EndGame]
        );
        assert!(decisions_for_player(&game, p2).is_empty());
        assert_eq!(decisions_for_player(&game, p1), decisions_for(&game));
    }

    #[test]
    fn test_enumeration_order() {
        let (mut game, p1, p2) = setup();
        game.turn.step = Step::Main1;
        let land_in_hand = add(&mut game, "mountain", p1, Zone::Hand);
        let bolt = add(&mut game, "bolt", p1, Zone::Hand);
        let land_in_play = add(&mut game, "mountain", p1, Zone::Battlefield);
        game.players[0].mana_pool.add(Color::Red, 1);

        assert_eq!(
            decisions_for(&game),
            vec![
                PlayerDecision::PassPriority,
                PlayerDecision::PlayLand {
                    card_id: land_in_hand
                },
                PlayerDecision::TapForMana {
                    card_id: land_in_play
                },
                PlayerDecision::CastSpell {
                    card_id: bolt,
                    target: Some(Target::Player(p1))
                },
                PlayerDecision::CastSpell {
                    card_id: bolt,
                    target: Some(Target::Player(p2))
                },
                PlayerDecision::EndGame,
            ]
        );
    }

    #[test]
    fn test_land_timing() {
        let (mut game, p1, _) = setup();
        let land = add(&mut game, "mountain", p1, Zone::Hand);
        let play = PlayerDecision::PlayLand { card_id: land };

        // Untap step: not a main phase
        assert!(!decisions_for(&game).contains(&play));

        game.turn.step = Step::Main2;
        assert!(decisions_for(&game).contains(&play));

        game.turn.lands_played_this_turn = 1;
        assert!(!decisions_for(&game).contains(&play));
    }

    #[test]
    fn test_sorcery_needs_empty_stack_and_own_turn() {
        let (mut game, p1, p2) = setup();
        game.turn.step = Step::Main1;
        let sorcery = add(&mut game, "divination", p1, Zone::Hand);
        game.players[0].mana_pool.add(Color::Red, 1);
        let cast = PlayerDecision::CastSpell {
            card_id: sorcery,
            target: None,
        };
        assert!(decisions_for(&game).contains(&cast));

        game.turn.step = Step::Upkeep;
        assert!(!decisions_for(&game).contains(&cast));

        // Instants are fine on the opponent's turn
        game.turn.step = Step::Main1;
        game.turn.active_player = p2;
        let bolt = add(&mut game, "bolt", p1, Zone::Hand);
        let decisions = decisions_for(&game);
        assert!(!decisions.contains(&cast));
        assert!(decisions
            .iter()
            .any(|d| d.card_id() == Some(bolt)));
    }

    #[test]
    fn test_tapped_permanents_not_offered() {
        let (mut game, p1, _) = setup();
        let land = add(&mut game, "mountain", p1, Zone::Battlefield);
        assert!(decisions_for(&game).contains(&PlayerDecision::TapForMana { card_id: land }));
        game.cards.get_mut(land).unwrap().tap();
        assert!(!decisions_for(&game).contains(&PlayerDecision::TapForMana { card_id: land }));
    }

    #[test]
    fn test_nothing_once_game_ended() {
        let (mut game, _, _) = setup();
        game.game_ended = true;
        assert!(decisions_for(&game).is_empty());
    }
}
