//! Purchasable weapon and armor tiers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weapon {
    None,
    Dagger,
    ShortSword,
    LongSword,
    SwordOfThorns,
    BroadSword,
    TwoHandedSword,
    AtlanteanSword,
}

impl Weapon {
    pub const ALL: [Weapon; 8] = [
        Weapon::None,
        Weapon::Dagger,
        Weapon::ShortSword,
        Weapon::LongSword,
        Weapon::SwordOfThorns,
        Weapon::BroadSword,
        Weapon::TwoHandedSword,
        Weapon::AtlanteanSword,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Weapon::None => "none",
            Weapon::Dagger => "dagger",
            Weapon::ShortSword => "short sword",
            Weapon::LongSword => "long sword",
            Weapon::SwordOfThorns => "sword of thorns",
            Weapon::BroadSword => "broad sword",
            Weapon::TwoHandedSword => "twohanded sword",
            Weapon::AtlanteanSword => "Atlantean Sword",
        }
    }

    pub fn base_price(&self) -> u32 {
        match self {
            Weapon::None => 0,
            Weapon::Dagger => 20,
            Weapon::ShortSword => 30,
            Weapon::LongSword => 65,
            Weapon::SwordOfThorns => 88,
            Weapon::BroadSword => 103,
            Weapon::TwoHandedSword => 250,
            Weapon::AtlanteanSword => 500,
        }
    }

    pub fn attack_bonus(&self) -> u32 {
        match self {
            Weapon::None => 0,
            Weapon::Dagger => 2,
            Weapon::ShortSword => 3,
            Weapon::LongSword => 5,
            Weapon::SwordOfThorns => 7,
            Weapon::BroadSword => 9,
            Weapon::TwoHandedSword => 15,
            Weapon::AtlanteanSword => 25,
        }
    }

    /// The next stronger tier, if any.
    pub fn next_tier(&self) -> Option<Weapon> {
        let idx = Self::ALL.iter().position(|w| w == self)?;
        Self::ALL.get(idx + 1).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Armor {
    None,
    Cloth,
    Leather,
    PlatedLeather,
    SpikedLeather,
    ChainMail,
    Platemail,
}

impl Armor {
    pub const ALL: [Armor; 7] = [
        Armor::None,
        Armor::Cloth,
        Armor::Leather,
        Armor::PlatedLeather,
        Armor::SpikedLeather,
        Armor::ChainMail,
        Armor::Platemail,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Armor::None => "none",
            Armor::Cloth => "cloth",
            Armor::Leather => "leather",
            Armor::PlatedLeather => "plated leather",
            Armor::SpikedLeather => "spiked leather",
            Armor::ChainMail => "chain mail",
            Armor::Platemail => "platemail",
        }
    }

    pub fn base_price(&self) -> u32 {
        match self {
            Armor::None => 0,
            Armor::Cloth => 20,
            Armor::Leather => 40,
            Armor::PlatedLeather => 88,
            Armor::SpikedLeather => 98,
            Armor::ChainMail => 134,
            Armor::Platemail => 279,
        }
    }

    pub fn defense_bonus(&self) -> u32 {
        match self {
            Armor::None => 0,
            Armor::Cloth => 5,
            Armor::Leather => 10,
            Armor::PlatedLeather => 18,
            Armor::SpikedLeather => 20,
            Armor::ChainMail => 28,
            Armor::Platemail => 50,
        }
    }

    pub fn next_tier(&self) -> Option<Armor> {
        let idx = Self::ALL.iter().position(|a| a == self)?;
        Self::ALL.get(idx + 1).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_strictly_increase() {
        for pair in Weapon::ALL.windows(2) {
            assert!(pair[1].attack_bonus() > pair[0].attack_bonus());
            assert!(pair[1].base_price() > pair[0].base_price());
        }
        for pair in Armor::ALL.windows(2) {
            assert!(pair[1].defense_bonus() > pair[0].defense_bonus());
            assert!(pair[1].base_price() > pair[0].base_price());
        }
    }

    #[test]
    fn test_next_tier() {
        assert_eq!(Weapon::None.next_tier(), Some(Weapon::Dagger));
        assert_eq!(Weapon::AtlanteanSword.next_tier(), None);
        assert_eq!(Armor::ChainMail.next_tier(), Some(Armor::Platemail));
        assert_eq!(Armor::Platemail.next_tier(), None);
    }
}
