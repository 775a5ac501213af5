//! Game actions and mechanics
//!
//! State-changing actions a player takes while holding priority. Callers
//! (the reducer) have already checked the action is legal; the checks here
//! only guard against malformed state.

use crate::core::{AbilityKind, CardId, PlayerId, Target, TargetSpec};
use crate::game::{GameEvent, GameState, StackObject, StackSource};
use crate::zones::Zone;
use crate::{MtgError, Result};
use smallvec::SmallVec;

impl GameState {
    /// Play a land from hand to battlefield
    pub fn play_land(
        &mut self,
        player_id: PlayerId,
        card_id: CardId,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        if !self.definition_of(card_id)?.is_land() {
            return Err(MtgError::UnknownCardReference(format!(
                "card {card_id} is not a land"
            )));
        }

        self.move_card(card_id, Zone::Hand, Zone::Battlefield, events)?;
        self.turn.lands_played_this_turn += 1;
        self.put_enters_battlefield_triggers(card_id, player_id, events)
    }

    /// Tap a permanent for mana
    ///
    /// Mana abilities don't use the stack: the yield goes straight into the
    /// controller's pool.
    pub fn tap_for_mana(
        &mut self,
        player_id: PlayerId,
        card_id: CardId,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let yields = self
            .definition_of(card_id)?
            .abilities_of_kind(AbilityKind::Mana)
            .next()
            .map(|(_, ability)| ability.mana_yield())
            .ok_or_else(|| {
                MtgError::UnknownCardReference(format!("card {card_id} has no mana ability"))
            })?;

        self.cards.get_mut(card_id)?.tap();

        let player = self.get_player_mut(player_id)?;
        for (color, amount) in yields {
            let amount = player.mana_pool.add(color, amount);
            if amount > 0 {
                events.push(GameEvent::ManaAdded {
                    player: player_id,
                    color,
                    amount,
                });
            }
        }
        Ok(())
    }

    /// Cast a spell (put it on the stack)
    ///
    /// Pays the cost from the current pool, moves the card from hand to the
    /// stack and emits SPELL_CAST. A target the spell cannot take fails with
    /// `IllegalTarget` before anything is paid.
    pub fn cast_spell(
        &mut self,
        player_id: PlayerId,
        card_id: CardId,
        target: Option<Target>,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let def = self.definition_of(card_id)?;
        let (mana_cost, spec) = (def.mana_cost, def.spell_target());
        if let Some(target) = target {
            if !self.legal_targets(player_id, spec).contains(&target) {
                return Err(MtgError::IllegalTarget(target));
            }
        }
        self.get_player_mut(player_id)?.mana_pool.pay_cost(&mana_cost)?;

        self.move_card(card_id, Zone::Hand, Zone::Stack, events)?;

        let stack_object = self.next_stack_object_id();
        let targets: SmallVec<[Target; 1]> = target.into_iter().collect();
        events.push(GameEvent::SpellCast {
            player: player_id,
            card_id,
            stack_object,
            targets: targets.clone(),
        });
        self.push_stack_object(
            StackObject {
                id: stack_object,
                source: StackSource::Spell { card_id },
                controller: player_id,
                targets,
            },
            events,
        );
        Ok(())
    }

    /// Put an ability of a card on the stack and emit ABILITY_TRIGGERED
    pub fn trigger_ability(
        &mut self,
        card_id: CardId,
        ability_index: usize,
        controller: PlayerId,
        targets: SmallVec<[Target; 1]>,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let def = self.definition_of(card_id)?;
        if ability_index >= def.abilities.len() {
            return Err(MtgError::UnknownCardReference(format!(
                "ability {ability_index} of {}",
                def.name
            )));
        }

        let stack_object = self.next_stack_object_id();
        events.push(GameEvent::AbilityTriggered {
            controller,
            source: card_id,
            ability_index,
            stack_object,
        });
        self.push_stack_object(
            StackObject {
                id: stack_object,
                source: StackSource::Ability {
                    card_id,
                    ability_index,
                },
                controller,
                targets,
            },
            events,
        );
        Ok(())
    }

    /// Put a permanent's enters-the-battlefield abilities on the stack
    ///
    /// Targeted triggers aim at the next opponent in turn order; a trigger
    /// with no legal target is skipped.
    pub fn put_enters_battlefield_triggers(
        &mut self,
        card_id: CardId,
        controller: PlayerId,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let triggers: Vec<(usize, TargetSpec)> = self
            .definition_of(card_id)?
            .abilities_of_kind(AbilityKind::EntersBattlefield)
            .map(|(index, ability)| (index, ability.target))
            .collect();

        for (ability_index, spec) in triggers {
            if self.game_ended {
                break;
            }
            let targets: SmallVec<[Target; 1]> = match spec {
                TargetSpec::None => SmallVec::new(),
                TargetSpec::AnyPlayer | TargetSpec::Opponent => {
                    match self.opponents_of(controller).first() {
                        Some(&opponent) => smallvec::smallvec![Target::Player(opponent)],
                        None => continue,
                    }
                }
                TargetSpec::AnyPermanent => match self.legal_targets(controller, spec).first() {
                    Some(&target) => smallvec::smallvec![target],
                    None => continue,
                },
            };
            self.trigger_ability(card_id, ability_index, controller, targets, events)?;
        }
        Ok(())
    }

    /// Push onto the stack, firing the kill switch if it grows too deep
    fn push_stack_object(&mut self, object: StackObject, events: &mut Vec<GameEvent>) {
        self.stack.push(object);
        if let Some(reason) = self.kill_switch.check_stack_depth(self.stack.len()) {
            self.fire_kill_switch(reason, events);
        }
    }

    /// Legal targets for a target specification, in a stable order
    ///
    /// Players in turn order, then permanents by controller in turn order and
    /// battlefield order.
    pub fn legal_targets(&self, controller: PlayerId, spec: TargetSpec) -> Vec<Target> {
        match spec {
            TargetSpec::None => Vec::new(),
            TargetSpec::AnyPlayer => self
                .players_in_game()
                .map(|p| Target::Player(p.id))
                .collect(),
            TargetSpec::Opponent => self
                .players_in_game()
                .filter(|p| p.id != controller)
                .map(|p| Target::Player(p.id))
                .collect(),
            TargetSpec::AnyPermanent => self
                .players
                .iter()
                .flat_map(|p| p.zones.battlefield.iter())
                .map(Target::Permanent)
                .collect(),
        }
    }

    /// Is a chosen target still legal?
    pub fn is_target_legal(&self, target: Target) -> bool {
        match target {
            Target::Player(id) => self.get_player(id).is_ok_and(|p| p.in_game()),
            Target::Permanent(id) => self.is_on_battlefield(id),
        }
    }
}
