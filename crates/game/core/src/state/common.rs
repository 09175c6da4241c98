use std::fmt;

/// Identifier of a combatant inside one battle.
///
/// The controllable player is [`EntityId::PLAYER`] (0) and other player-side
/// combatants take small ids after it. Enemy instances are numbered
/// `ENEMY_BASE + index` (100, 101, ...) in encounter order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    /// First id handed out to enemy instances.
    pub const ENEMY_BASE: u32 = 100;

    /// Id of the `index`-th enemy instance of an encounter.
    #[inline]
    pub const fn enemy(index: usize) -> Self {
        Self(Self::ENEMY_BASE + index as u32)
    }

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declares a string-backed identifier used to key content catalogs.
macro_rules! content_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

content_id!(
    /// Identifier of a skill definition (e.g. `shrapnel_blast`).
    SkillId
);

content_id!(
    /// Identifier of an enemy template (e.g. `scrap_rat`).
    EnemyTypeId
);

content_id!(
    /// Identifier of an item definition, equipment or consumable.
    ItemId
);

content_id!(
    /// Identifier of a quest definition (e.g. `pest_control`).
    QuestId
);
