//! Base stats - the allocatable attribute vector of a combatant.
//!
//! Base stats are the only stat values that are stored. Equipment bonuses and
//! temporary modifiers are layered on top at read time (see
//! [`Combatant::effective`](crate::state::Combatant::effective)).

/// The seven allocatable attributes.
///
/// - **MaxHp / MaxSp**: resource pool sizes
/// - **Strength**: attack power
/// - **Dexterity**: hit chance and evasion
/// - **Resilience**: physical defense
/// - **Constitution**: shortens debuffs applied to this combatant
/// - **Intelligence**: skill scaling and SP regeneration
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    MaxHp,
    MaxSp,
    Strength,
    Dexterity,
    Resilience,
    Constitution,
    Intelligence,
}

impl StatKind {
    pub const ALL: [StatKind; 7] = [
        StatKind::MaxHp,
        StatKind::MaxSp,
        StatKind::Strength,
        StatKind::Dexterity,
        StatKind::Resilience,
        StatKind::Constitution,
        StatKind::Intelligence,
    ];

    /// Amount one spent stat point adds to this stat.
    pub const fn allocation_step(self) -> i32 {
        match self {
            StatKind::MaxHp => 3,
            StatKind::MaxSp => 2,
            _ => 1,
        }
    }
}

/// Stored attribute values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub max_hp: i32,
    pub max_sp: i32,
    pub strength: i32,
    pub dexterity: i32,
    pub resilience: i32,
    pub constitution: i32,
    pub intelligence: i32,
}

impl BaseStats {
    pub const fn new(
        max_hp: i32,
        max_sp: i32,
        strength: i32,
        dexterity: i32,
        resilience: i32,
        constitution: i32,
        intelligence: i32,
    ) -> Self {
        Self {
            max_hp,
            max_sp,
            strength,
            dexterity,
            resilience,
            constitution,
            intelligence,
        }
    }

    /// Maps an enemy template's {HP, Attack, Defense, Dexterity} onto the full
    /// vector. Attack lands in Strength, Defense in Resilience, the rest is 0.
    pub const fn enemy(hp: i32, attack: i32, defense: i32, dexterity: i32) -> Self {
        Self::new(hp, 0, attack, dexterity, defense, 0, 0)
    }

    pub const fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::MaxHp => self.max_hp,
            StatKind::MaxSp => self.max_sp,
            StatKind::Strength => self.strength,
            StatKind::Dexterity => self.dexterity,
            StatKind::Resilience => self.resilience,
            StatKind::Constitution => self.constitution,
            StatKind::Intelligence => self.intelligence,
        }
    }

    pub fn get_mut(&mut self, stat: StatKind) -> &mut i32 {
        match stat {
            StatKind::MaxHp => &mut self.max_hp,
            StatKind::MaxSp => &mut self.max_sp,
            StatKind::Strength => &mut self.strength,
            StatKind::Dexterity => &mut self.dexterity,
            StatKind::Resilience => &mut self.resilience,
            StatKind::Constitution => &mut self.constitution,
            StatKind::Intelligence => &mut self.intelligence,
        }
    }
}

impl Default for BaseStats {
    /// Starting player stats: 30 HP, 10 SP, STR 5, DEX 5, RES 3, CON 3, INT 3.
    fn default() -> Self {
        Self::new(30, 10, 5, 5, 3, 3, 3)
    }
}
