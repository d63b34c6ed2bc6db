use crate::challenge::config::ChallengeConfig;
use crate::challenge::modifiers::{
    effective_armor_bonus, effective_weapon_bonus, spell_effect_multiplier,
};
use crate::character::prestige::PrestigeData;
use crate::character::stats::CharacterStats;
use crate::core::constants::*;
use crate::monsters::types::MonsterStats;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Player,
    Monster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleResult {
    InProgress,
    Victory,
    Defeat,
    Fled,
}

impl BattleResult {
    pub fn is_over(&self) -> bool {
        !matches!(self, BattleResult::InProgress)
    }
}

/// A player command. `CastSpell` carries the 0-based spell book index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleAction {
    Attack,
    Magic,
    Run,
    CastSpell(usize),
}

/// Challenge and prestige modifiers in effect for one battle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleContext {
    pub challenge: ChallengeConfig,
    pub prestige: PrestigeData,
}

impl BattleContext {
    pub fn new(challenge: ChallengeConfig, prestige: PrestigeData) -> Self {
        Self {
            challenge,
            prestige,
        }
    }

    /// Weapon bonus after the weapon mode, plus the prestige flat AP bonus.
    pub fn weapon_bonus(&self, character: &CharacterStats) -> u32 {
        effective_weapon_bonus(character.weapon_bonus(), self.challenge.weapon_mode)
            .saturating_add(self.prestige.permanent_ap_bonus())
    }

    /// Armor bonus after the armor mode, plus the prestige flat DP bonus.
    pub fn armor_bonus(&self, character: &CharacterStats) -> u32 {
        effective_armor_bonus(character.armor_bonus(), self.challenge.armor_mode)
            .saturating_add(self.prestige.permanent_dp_bonus())
    }

    pub fn total_attack(&self, character: &CharacterStats) -> u32 {
        character.base_attack.saturating_add(self.weapon_bonus(character))
    }

    pub fn total_defense(&self, character: &CharacterStats) -> u32 {
        character.base_defense.saturating_add(self.armor_bonus(character))
    }

    pub fn spell_multiplier(&self) -> f64 {
        spell_effect_multiplier(&self.prestige)
    }
}

/// One battle between the character and a single monster.
///
/// `result` only ever leaves `InProgress` once; every resolver function
/// returns terminal states unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub character: CharacterStats,
    pub monster: MonsterStats,
    pub turn: Turn,
    pub result: BattleResult,
    pub spell_menu_open: bool,
    pub messages: VecDeque<String>,
}

impl BattleState {
    pub fn new(character: CharacterStats, monster: MonsterStats) -> Self {
        let mut state = Self {
            character,
            monster,
            turn: Turn::Player,
            result: BattleResult::InProgress,
            spell_menu_open: false,
            messages: VecDeque::with_capacity(BATTLE_LOG_CAPACITY),
        };
        state.push_message(format!("A {} appears!", state.monster.name()));
        state
    }

    pub fn is_over(&self) -> bool {
        self.result.is_over()
    }

    pub fn push_message(&mut self, message: String) {
        if self.messages.len() >= BATTLE_LOG_CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Settles the result after an HP change. A dead character loses even
    /// if the monster died in the same exchange.
    pub fn check_battle_end(&mut self) {
        if self.result.is_over() {
            return;
        }
        if !self.character.is_alive() {
            self.result = BattleResult::Defeat;
            self.push_message("You have been defeated...".to_string());
        } else if !self.monster.is_alive() {
            self.result = BattleResult::Victory;
            self.push_message(format!("The {} is defeated!", self.monster.name()));
        }
    }
}
