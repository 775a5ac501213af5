//! Mana system for casting spells
//!
//! A `ManaPool` holds per-color counts for one player. Costs are matched
//! deterministically: colored pips first by exact color, then generic pips
//! from whatever remains in canonical color order (W, U, B, R, G, C).

use crate::{MtgError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mana colors in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
}

impl Color {
    /// Canonical enumeration order, also the order generic costs are paid in
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Colorless,
    ];

    pub fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Colorless => 'C',
        }
    }

    pub fn from_symbol(c: char) -> Option<Color> {
        Color::ALL.into_iter().find(|color| color.symbol() == c)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Represents a mana cost (e.g., "2RR" = 2 generic + 2 red)
///
/// Copy-eligible since it's just 7 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaCost {
    pub generic: u8,
    /// Colored (and explicit colorless) pips, indexed by `Color as usize`
    pips: [u8; 6],
}

impl ManaCost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a mana cost string like "2RR", "1UB" or "{1}{R}"
    ///
    /// Unknown characters (braces, spaces) are ignored. Each run of digits is
    /// one generic amount, so "{1}{1}" is 2. Amounts above 255 saturate; use
    /// [`ManaCost::parse`] to reject them instead.
    pub fn from_string(s: &str) -> Self {
        let mut cost = ManaCost::new();
        let mut run: Option<u8> = None;

        for c in s.chars() {
            if let Some(digit) = c.to_digit(10) {
                let n = run.unwrap_or(0);
                run = Some(n.saturating_mul(10).saturating_add(digit as u8));
                continue;
            }
            if let Some(n) = run.take() {
                cost.generic = cost.generic.saturating_add(n);
            }
            if let Some(color) = Color::from_symbol(c) {
                cost.pips[color.index()] = cost.pips[color.index()].saturating_add(1);
            }
        }
        if let Some(n) = run {
            cost.generic = cost.generic.saturating_add(n);
        }

        cost
    }

    /// Strict form of [`ManaCost::from_string`]
    ///
    /// Fails on symbols other than digits, color letters, braces and
    /// whitespace, and on any amount that does not fit in a `u8`.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = |why: String| MtgError::InvalidManaCost(format!("{s:?}: {why}"));
        let too_large = || invalid("generic amount above 255".to_string());
        let mut cost = ManaCost::new();
        let mut run: Option<u8> = None;

        for c in s.chars() {
            if let Some(digit) = c.to_digit(10) {
                let n = run.unwrap_or(0);
                run = Some(
                    n.checked_mul(10)
                        .and_then(|n| n.checked_add(digit as u8))
                        .ok_or_else(too_large)?,
                );
                continue;
            }
            if let Some(n) = run.take() {
                cost.generic = cost.generic.checked_add(n).ok_or_else(too_large)?;
            }
            if let Some(color) = Color::from_symbol(c) {
                let pips = &mut cost.pips[color.index()];
                *pips = pips
                    .checked_add(1)
                    .ok_or_else(|| invalid(format!("more than 255 {color} pips")))?;
            } else if !(c == '{' || c == '}' || c.is_whitespace()) {
                return Err(invalid(format!("unexpected symbol '{c}'")));
            }
        }
        if let Some(n) = run {
            cost.generic = cost.generic.checked_add(n).ok_or_else(too_large)?;
        }

        Ok(cost)
    }

    /// Builder-style helper for adding colored pips
    pub fn with_pips(mut self, color: Color, count: u8) -> Self {
        self.pips[color.index()] = self.pips[color.index()].saturating_add(count);
        self
    }

    pub fn pips(&self, color: Color) -> u8 {
        self.pips[color.index()]
    }

    /// Total converted mana cost
    pub fn cmc(&self) -> u32 {
        self.pips
            .iter()
            .fold(self.generic as u32, |total, &n| total + n as u32)
    }

    pub fn is_free(&self) -> bool {
        self.cmc() == 0
    }
}

impl fmt::Display for ManaCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generic > 0 || self.cmc() == 0 {
            write!(f, "{}", self.generic)?;
        }
        for color in Color::ALL {
            for _ in 0..self.pips(color) {
                write!(f, "{color}")?;
            }
        }
        Ok(())
    }
}

/// Mana pool for a player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaPool {
    amounts: [u8; 6],
}

impl ManaPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add mana, returning how much fit
    ///
    /// Each color holds at most 255; the excess is lost.
    pub fn add(&mut self, color: Color, amount: u8) -> u8 {
        let slot = &mut self.amounts[color.index()];
        let added = amount.min(u8::MAX - *slot);
        *slot += added;
        added
    }

    pub fn add_color(&mut self, color: Color) {
        self.add(color, 1);
    }

    pub fn amount(&self, color: Color) -> u8 {
        self.amounts[color.index()]
    }

    pub fn clear(&mut self) {
        self.amounts = [0; 6];
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Total mana in pool
    pub fn total(&self) -> u32 {
        self.amounts.iter().map(|&n| n as u32).sum()
    }

    /// Check if we can pay the given mana cost
    pub fn can_pay(&self, cost: &ManaCost) -> bool {
        let colored_ok = Color::ALL
            .iter()
            .all(|&color| self.amount(color) >= cost.pips(color));
        colored_ok && self.total() >= cost.cmc()
    }

    /// Pay a mana cost from this pool
    ///
    /// Colored requirements are paid first by exact color, then the generic
    /// part is taken from the remaining mana in canonical color order.
    /// On failure the pool is left unchanged.
    pub fn pay_cost(&mut self, cost: &ManaCost) -> Result<()> {
        let insufficient = || MtgError::InsufficientMana {
            cost: *cost,
            pool: *self,
        };

        let mut remaining = self.amounts;
        for color in Color::ALL {
            let slot = &mut remaining[color.index()];
            *slot = slot
                .checked_sub(cost.pips(color))
                .ok_or_else(insufficient)?;
        }

        let mut generic_remaining = cost.generic;
        for slot in remaining.iter_mut() {
            let used = generic_remaining.min(*slot);
            *slot -= used;
            generic_remaining -= used;
        }
        if generic_remaining > 0 {
            return Err(insufficient());
        }

        self.amounts = remaining;
        Ok(())
    }
}

impl fmt::Display for ManaPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "empty");
        }
        for color in Color::ALL {
            for _ in 0..self.amount(color) {
                write!(f, "{color}")?;
            }
        }
        Ok(())
    }
}
