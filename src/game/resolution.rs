//! Stack resolution and effect execution

use crate::core::{AbilityKind, CardId, Effect, PlayerId, Target};
use crate::game::{GameEvent, GameState, StackObject, StackSource};
use crate::zones::Zone;
use crate::{MtgError, Result};
use rand::Rng;
use smallvec::SmallVec;

/// An ability waiting to be put on the stack once resolution finishes
struct PendingTrigger {
    card_id: CardId,
    ability_index: usize,
    controller: PlayerId,
    targets: SmallVec<[Target; 1]>,
}

impl GameState {
    /// Resolve the top object of the stack
    ///
    /// Event order: SPELL_RESOLVED, the effect events, the CARD_MOVED of a
    /// spell card leaving the stack, then ABILITY_TRIGGERED for anything the
    /// resolution put on the stack.
    pub fn resolve_top(&mut self, events: &mut Vec<GameEvent>) -> Result<()> {
        if self.stack.is_empty() {
            return Ok(());
        }
        if let Some(reason) = self.kill_switch.record_resolution() {
            self.fire_kill_switch(reason, events);
            return Ok(());
        }
        let Some(object) = self.stack.pop() else {
            return Ok(());
        };

        // An object whose every target has become illegal does nothing
        let fizzled = !object.targets.is_empty()
            && object.targets.iter().all(|&t| !self.is_target_legal(t));

        events.push(GameEvent::SpellResolved {
            stack_object: object.id,
            source: object.source,
            controller: object.controller,
            fizzled,
        });

        let mut pending = Vec::new();
        if !fizzled {
            for effect in self.effects_of(&object.source)? {
                self.apply_effect(&effect, &object, &mut pending, events)?;
            }
        }

        let mut entered_battlefield = None;
        if let StackSource::Spell { card_id } = object.source {
            let to = if !fizzled && self.definition_of(card_id)?.is_permanent() {
                Zone::Battlefield
            } else {
                Zone::Graveyard
            };
            self.move_card(card_id, Zone::Stack, to, events)?;
            if to == Zone::Battlefield {
                self.cards.get_mut(card_id)?.controller = object.controller;
                entered_battlefield = Some(card_id);
            }
        }

        for trigger in pending {
            if self.game_ended {
                break;
            }
            self.trigger_ability(
                trigger.card_id,
                trigger.ability_index,
                trigger.controller,
                trigger.targets,
                events,
            )?;
        }
        if let Some(card_id) = entered_battlefield {
            self.put_enters_battlefield_triggers(card_id, object.controller, events)?;
        }

        if self.stack.is_empty() {
            self.kill_switch.stack_emptied();
        }
        Ok(())
    }

    /// Effects applied when an object from this source resolves
    fn effects_of(&self, source: &StackSource) -> Result<Vec<Effect>> {
        let def = self.definition_of(source.card_id())?;
        match *source {
            StackSource::Spell { .. } => Ok(def
                .abilities_of_kind(AbilityKind::Spell)
                .flat_map(|(_, ability)| ability.effects.iter().cloned())
                .collect()),
            StackSource::Ability { ability_index, .. } => def
                .abilities
                .get(ability_index)
                .map(|ability| ability.effects.to_vec())
                .ok_or_else(|| {
                    MtgError::UnknownCardReference(format!(
                        "ability {ability_index} of {}",
                        def.name
                    ))
                }),
        }
    }

    /// First still-legal player among an object's targets
    fn target_player(&self, object: &StackObject) -> Option<PlayerId> {
        object.targets.iter().find_map(|&target| match target {
            Target::Player(id) if self.is_target_legal(target) => Some(id),
            _ => None,
        })
    }

    fn apply_effect(
        &mut self,
        effect: &Effect,
        object: &StackObject,
        pending: &mut Vec<PendingTrigger>,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let controller = object.controller;
        let source = object.source.card_id();

        match *effect {
            Effect::DealDamage { amount } => {
                if let Some(target) = self.target_player(object) {
                    self.deal_damage(source, target, amount, events)?;
                }
            }
            Effect::DealRandomDamage { min, max } => {
                if let Some(target) = self.target_player(object) {
                    let amount = self.rng.gen_range(min.min(max)..=max.max(min));
                    self.deal_damage(source, target, amount, events)?;
                }
            }
            Effect::GainLife { amount } => {
                let player = self.get_player_mut(controller)?;
                player.gain_life(amount);
                events.push(GameEvent::LifeGained {
                    player: controller,
                    amount,
                    life_after: player.life,
                });
            }
            Effect::DrawCards { count } => {
                for _ in 0..count {
                    if self.draw_card(controller, events)?.is_none() {
                        break;
                    }
                }
            }
            Effect::AddMana { color, amount } => {
                let pool = &mut self.get_player_mut(controller)?.mana_pool;
                let amount = pool.add(color, amount);
                if amount > 0 {
                    events.push(GameEvent::ManaAdded {
                        player: controller,
                        color,
                        amount,
                    });
                }
            }
            Effect::DestroyTarget => {
                for &target in &object.targets {
                    if let Target::Permanent(card_id) = target {
                        if self.is_on_battlefield(card_id) {
                            self.move_card(card_id, Zone::Battlefield, Zone::Graveyard, events)?;
                        }
                    }
                }
            }
            Effect::TriggerAbility { ability_index } => pending.push(PendingTrigger {
                card_id: source,
                ability_index,
                controller,
                targets: object.targets.clone(),
            }),
        }
        Ok(())
    }

    /// Deal damage to a player and emit DIRECT_DAMAGE_APPLIED
    ///
    /// Losing is left to the state-based checks after the transition.
    pub fn deal_damage(
        &mut self,
        source: CardId,
        target: PlayerId,
        amount: i32,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let player = self.get_player_mut(target)?;
        player.lose_life(amount);
        events.push(GameEvent::DirectDamageApplied {
            source,
            target,
            amount,
            life_after: player.life,
        });
        Ok(())
    }
}
