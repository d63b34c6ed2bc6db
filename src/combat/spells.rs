//! Battle spell table.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellId {
    Flame,
    Cure,
    Water,
    Lightning,
    BubbleBlast,
    Restore,
    Firestorm,
    DivineLight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spell {
    pub id: SpellId,
    pub name: &'static str,
    pub mp_cost: u32,
    pub required_level: u32,
    pub base_effect: u32,
    pub random_bonus: u32,
    pub is_healing: bool,
}

impl Spell {
    /// Unmodified effect: base + uniform(1, random_bonus) + level. The
    /// random part is 0 when `random_bonus` is 0.
    pub fn roll_base_effect(&self, level: u32, rng: &mut impl Rng) -> u32 {
        let random_component = if self.random_bonus > 0 {
            rng.gen_range(1..=self.random_bonus)
        } else {
            0
        };
        self.base_effect
            .saturating_add(random_component)
            .saturating_add(level)
    }

    /// Effect after the challenge/prestige spell multiplier, rounded.
    pub fn roll_effect(&self, level: u32, multiplier: f64, rng: &mut impl Rng) -> u32 {
        let raw = self.roll_base_effect(level, rng) as f64 * multiplier;
        raw.round().max(0.0) as u32
    }

    pub fn can_cast(&self, level: u32, current_mp: u32) -> bool {
        self.required_level <= level && current_mp >= self.mp_cost
    }
}

pub const SPELLS: [Spell; 8] = [
    Spell {
        id: SpellId::Flame,
        name: "Flame",
        mp_cost: 3,
        required_level: 1,
        base_effect: 10,
        random_bonus: 10,
        is_healing: false,
    },
    Spell {
        id: SpellId::Cure,
        name: "Cure",
        mp_cost: 4,
        required_level: 2,
        base_effect: 6,
        random_bonus: 4,
        is_healing: true,
    },
    Spell {
        id: SpellId::Water,
        name: "Water",
        mp_cost: 8,
        required_level: 3,
        base_effect: 25,
        random_bonus: 15,
        is_healing: false,
    },
    Spell {
        id: SpellId::Lightning,
        name: "Lightning",
        mp_cost: 12,
        required_level: 4,
        base_effect: 25,
        random_bonus: 15,
        is_healing: false,
    },
    Spell {
        id: SpellId::BubbleBlast,
        name: "BubbleBlast",
        mp_cost: 25,
        required_level: 5,
        base_effect: 45,
        random_bonus: 20,
        is_healing: false,
    },
    Spell {
        id: SpellId::Restore,
        name: "Restore",
        mp_cost: 15,
        required_level: 6,
        base_effect: 20,
        random_bonus: 10,
        is_healing: true,
    },
    Spell {
        id: SpellId::Firestorm,
        name: "Firestorm",
        mp_cost: 35,
        required_level: 7,
        base_effect: 60,
        random_bonus: 25,
        is_healing: false,
    },
    Spell {
        id: SpellId::DivineLight,
        name: "Divine Light",
        mp_cost: 50,
        required_level: 10,
        base_effect: 100,
        random_bonus: 30,
        is_healing: false,
    },
];

/// Spell by 0-based position in the spell book.
pub fn spell_at(index: usize) -> Option<&'static Spell> {
    SPELLS.get(index)
}

pub fn available_spells(level: u32) -> impl Iterator<Item = (usize, &'static Spell)> {
    SPELLS
        .iter()
        .enumerate()
        .filter(move |(_, s)| s.required_level <= level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_effect_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let flame = &SPELLS[0];
        for _ in 0..1_000 {
            let effect = flame.roll_base_effect(3, &mut rng);
            assert!((14..=23).contains(&effect), "effect {}", effect);
        }
    }

    #[test]
    fn test_zero_random_bonus_is_deterministic() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let spell = Spell {
            random_bonus: 0,
            ..SPELLS[0]
        };
        assert_eq!(spell.roll_base_effect(4, &mut rng), 14);
    }

    #[test]
    fn test_multiplier_rounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let spell = Spell {
            random_bonus: 0,
            base_effect: 10,
            ..SPELLS[0]
        };
        // (10 + 0 + 1) * 1.5 = 16.5 -> 17
        assert_eq!(spell.roll_effect(1, 1.5, &mut rng), 17);
    }

    #[test]
    fn test_available_spells_by_level() {
        assert_eq!(available_spells(1).count(), 1);
        assert_eq!(available_spells(5).count(), 5);
        assert_eq!(available_spells(10).count(), SPELLS.len());
    }

    #[test]
    fn test_can_cast_requires_level_and_mp() {
        let cure = spell_at(1).expect("cure exists");
        assert!(!cure.can_cast(1, 100));
        assert!(!cure.can_cast(2, 3));
        assert!(cure.can_cast(2, 4));
    }
}
