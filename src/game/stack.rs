//! The stack: spells and abilities waiting to resolve
//!
//! Strictly LIFO. The last pushed object resolves first.

use crate::core::{CardId, EntityId, PlayerId, Target};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Stack object identifier
pub type StackObjectId = EntityId<StackObject>;

/// What put an object on the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackSource {
    /// A spell cast from hand; the card itself sits on the stack
    Spell { card_id: CardId },
    /// An ability of a card, identified by its index on the definition
    Ability { card_id: CardId, ability_index: usize },
}

impl StackSource {
    /// The card that is the source of this object
    pub fn card_id(&self) -> CardId {
        match self {
            StackSource::Spell { card_id } | StackSource::Ability { card_id, .. } => *card_id,
        }
    }

    pub fn is_spell(&self) -> bool {
        matches!(self, StackSource::Spell { .. })
    }
}

impl fmt::Display for StackSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackSource::Spell { card_id } => write!(f, "spell {card_id}"),
            StackSource::Ability {
                card_id,
                ability_index,
            } => write!(f, "ability {ability_index} of {card_id}"),
        }
    }
}

/// A spell or ability on the stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackObject {
    pub id: StackObjectId,
    pub source: StackSource,
    pub controller: PlayerId,
    /// Targets chosen when the object was put on the stack
    pub targets: SmallVec<[Target; 1]>,
}

/// Ordered stack of objects; the last element is the top
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    objects: Vec<StackObject>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, object: StackObject) {
        self.objects.push(object);
    }

    /// Remove and return the top object
    pub fn pop(&mut self) -> Option<StackObject> {
        self.objects.pop()
    }

    pub fn top(&self) -> Option<&StackObject> {
        self.objects.last()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate from bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &StackObject> {
        self.objects.iter()
    }

    /// Is this card on the stack as a spell?
    pub fn contains_spell(&self, card_id: CardId) -> bool {
        self.objects
            .iter()
            .any(|obj| obj.source == StackSource::Spell { card_id })
    }
}
