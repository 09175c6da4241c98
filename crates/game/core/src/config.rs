/// Game configuration constants and tunable balance parameters.
///
/// Every field has a compile-time default so a partial TOML file only needs to
/// name the values it overrides.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Hit chance formula parameters.
    pub hit_chance: HitChanceParams,

    /// Probability that a flee attempt succeeds. Flat, not dexterity-weighted.
    pub flee_chance: f64,

    /// XP threshold multiplier: level `n` is left once cumulative XP reaches `n * xp_per_level`.
    pub xp_per_level: u32,

    /// Divisor applied to the next incoming hit while defending.
    pub defend_divisor: u32,

    /// Flat attack added on top of Strength for player combatants.
    pub player_attack_base: i32,

    /// Turns a skill debuff lasts when the skill does not specify its own duration.
    pub skill_debuff_turns: u32,

    /// Chance that a scrap pickup also yields a bonus consumable.
    pub bonus_drop_chance: f64,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// One slot per status kind; reapplication refreshes instead of stacking.
    pub const MAX_STATUS_EFFECTS: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FLEE_CHANCE: f64 = 0.40;
    pub const DEFAULT_XP_PER_LEVEL: u32 = 20;
    pub const DEFAULT_DEFEND_DIVISOR: u32 = 2;
    pub const DEFAULT_PLAYER_ATTACK_BASE: i32 = 3;
    pub const DEFAULT_SKILL_DEBUFF_TURNS: u32 = 3;
    pub const DEFAULT_BONUS_DROP_CHANCE: f64 = 0.25;

    pub fn new() -> Self {
        Self {
            hit_chance: HitChanceParams::default(),
            flee_chance: Self::DEFAULT_FLEE_CHANCE,
            xp_per_level: Self::DEFAULT_XP_PER_LEVEL,
            defend_divisor: Self::DEFAULT_DEFEND_DIVISOR,
            player_attack_base: Self::DEFAULT_PLAYER_ATTACK_BASE,
            skill_debuff_turns: Self::DEFAULT_SKILL_DEBUFF_TURNS,
            bonus_drop_chance: Self::DEFAULT_BONUS_DROP_CHANCE,
        }
    }

    pub fn with_flee_chance(mut self, flee_chance: f64) -> Self {
        self.flee_chance = flee_chance;
        self
    }

    /// XP total needed to leave `level`.
    pub fn xp_threshold(&self, level: u32) -> u32 {
        level.saturating_mul(self.xp_per_level)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters of the hit chance formula.
///
/// ```text
/// hit_chance = clamp(base + per_dex × (attacker_dex − defender_dex), min, max)
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitChanceParams {
    pub base: f64,
    pub per_dex: f64,
    pub min: f64,
    pub max: f64,
}

impl HitChanceParams {
    pub const fn new(base: f64, per_dex: f64, min: f64, max: f64) -> Self {
        Self {
            base,
            per_dex,
            min,
            max,
        }
    }
}

impl Default for HitChanceParams {
    fn default() -> Self {
        Self::new(0.85, 0.03, 0.30, 0.99)
    }
}
