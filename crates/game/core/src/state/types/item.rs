//! Collectable item definitions.

/// Broad item category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    Key,
    Potion,
    Special,
}

impl ItemKind {
    /// Category implied by an item id when content omits the type.
    pub fn infer_from_id(id: &str) -> Self {
        if id.contains("key") {
            Self::Key
        } else if id.contains("potion") {
            Self::Potion
        } else {
            Self::Special
        }
    }
}

/// Key and door colors.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum KeyColor {
    Yellow,
    Blue,
    Red,
}

/// One-shot special item effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum SpecialKind {
    Bomb,
    MonsterManual,
    Snowflake,
    Cross,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub color: Option<KeyColor>,
    /// Heal amount for potions.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub value: Option<i32>,
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "specialType", skip_serializing_if = "Option::is_none")
    )]
    pub special_type: Option<SpecialKind>,
}

impl Item {
    pub fn key(id: impl Into<String>, name: impl Into<String>, color: KeyColor) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Key,
            color: Some(color),
            value: None,
            special_type: None,
        }
    }

    pub fn potion(id: impl Into<String>, name: impl Into<String>, value: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Potion,
            color: None,
            value: Some(value),
            special_type: None,
        }
    }

    pub fn special(id: impl Into<String>, name: impl Into<String>, special: SpecialKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Special,
            color: None,
            value: None,
            special_type: Some(special),
        }
    }
}

/// Key counters held by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeyRing {
    pub yellow: u32,
    pub blue: u32,
    pub red: u32,
}

impl KeyRing {
    pub const fn count(&self, color: KeyColor) -> u32 {
        match color {
            KeyColor::Yellow => self.yellow,
            KeyColor::Blue => self.blue,
            KeyColor::Red => self.red,
        }
    }

    fn slot_mut(&mut self, color: KeyColor) -> &mut u32 {
        match color {
            KeyColor::Yellow => &mut self.yellow,
            KeyColor::Blue => &mut self.blue,
            KeyColor::Red => &mut self.red,
        }
    }

    pub fn add(&mut self, color: KeyColor) {
        let slot = self.slot_mut(color);
        *slot = slot.saturating_add(1);
    }

    /// Removes one key of `color`. Returns false if none was held.
    pub fn take(&mut self, color: KeyColor) -> bool {
        let slot = self.slot_mut(color);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}
