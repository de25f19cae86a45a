//! Phase-specific transient data.
//!
//! Each sub-phase of a turn remembers what the preceding choice selected
//! (the hand slot being played, the attacker). Old slices are left in place
//! when the phase moves on; only the slice for the current phase takes part
//! in board equality and hashing.

use serde::{Deserialize, Serialize};

use super::phase::Phase;
use crate::core::Character;

/// The minion card being played.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PutMinionData {
    pub hand_slot: u8,
}

/// The weapon card being equipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquipWeaponData {
    pub hand_slot: u8,
}

/// The attacker chosen for the current attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackData {
    pub attacker: Character,
}

impl Default for AttackData {
    fn default() -> Self {
        Self {
            attacker: Character::Hero,
        }
    }
}

/// All transient slices.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PhaseData {
    pub put_minion: PutMinionData,
    pub equip_weapon: EquipWeaponData,
    pub attack: AttackData,
}

/// The slice of `PhaseData` that matters in a given phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelevantData<'a> {
    None,
    PutMinion(&'a PutMinionData),
    EquipWeapon(&'a EquipWeaponData),
    Attack(&'a AttackData),
}

impl PhaseData {
    /// Select the slice relevant to `phase`.
    #[must_use]
    pub fn relevant(&self, phase: Phase) -> RelevantData<'_> {
        match phase {
            Phase::PlayerPutMinion | Phase::OpponentPutMinion => {
                RelevantData::PutMinion(&self.put_minion)
            }
            Phase::PlayerEquipWeapon | Phase::OpponentEquipWeapon => {
                RelevantData::EquipWeapon(&self.equip_weapon)
            }
            Phase::PlayerAttack | Phase::OpponentAttack => RelevantData::Attack(&self.attack),
            _ => RelevantData::None,
        }
    }
}
