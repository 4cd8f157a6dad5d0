//! Wearable equipment definitions.

use super::common::{PercentLine, StatLine};

/// Slot on a character that can hold one piece of equipment.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentSlot {
    Head,
    Body,
    LeftHand,
    RightHand,
    Feet,
}

impl EquipmentSlot {
    pub const fn is_hand(self) -> bool {
        matches!(self, Self::LeftHand | Self::RightHand)
    }
}

/// Handedness of a weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WeaponType {
    OneHanded,
    TwoHanded,
}

/// Slot occupancy as authored: a single slot or several taken at once.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum SlotSpec {
    Single(EquipmentSlot),
    Multiple(Vec<EquipmentSlot>),
}

impl SlotSpec {
    pub fn slots(&self) -> &[EquipmentSlot] {
        match self {
            SlotSpec::Single(slot) => core::slice::from_ref(slot),
            SlotSpec::Multiple(slots) => slots,
        }
    }
}

impl From<EquipmentSlot> for SlotSpec {
    fn from(slot: EquipmentSlot) -> Self {
        SlotSpec::Single(slot)
    }
}

/// A piece of equipment, either lying on the floor or worn by a character.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub slot: SlotSpec,
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "weaponType", skip_serializing_if = "Option::is_none")
    )]
    pub weapon_type: Option<WeaponType>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat_mods: StatLine,
    #[cfg_attr(feature = "serde", serde(default))]
    pub percent_mods: PercentLine,
}

impl Equipment {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slot: impl Into<SlotSpec>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slot: slot.into(),
            weapon_type: None,
            stat_mods: StatLine::ZERO,
            percent_mods: PercentLine::default(),
        }
    }

    /// A weapon occupying both hands.
    pub fn two_handed(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut equipment = Self::new(
            id,
            name,
            SlotSpec::Multiple(vec![EquipmentSlot::LeftHand, EquipmentSlot::RightHand]),
        );
        equipment.weapon_type = Some(WeaponType::TwoHanded);
        equipment
    }

    pub fn with_weapon_type(mut self, weapon_type: WeaponType) -> Self {
        self.weapon_type = Some(weapon_type);
        self
    }

    pub fn with_stat_mods(mut self, stat_mods: StatLine) -> Self {
        self.stat_mods = stat_mods;
        self
    }

    pub fn with_percent_mods(mut self, percent_mods: PercentLine) -> Self {
        self.percent_mods = percent_mods;
        self
    }

    pub fn slots(&self) -> &[EquipmentSlot] {
        self.slot.slots()
    }

    pub fn is_weapon(&self) -> bool {
        self.weapon_type.is_some()
    }

    pub fn is_two_handed(&self) -> bool {
        self.weapon_type == Some(WeaponType::TwoHanded)
    }
}
