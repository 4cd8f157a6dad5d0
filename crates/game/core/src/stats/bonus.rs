//! Equipment bonus aggregation.
//!
//! Modifiers stack in two layers: flat addends are summed, percent fractions
//! are summed, then
//!
//! ```text
//! final = base + flat + floor(base × percent)
//! ```
//!
//! clamped to a minimum of 1.

use crate::state::{Character, Equipment, PercentLine, StatKind, StatLine};

/// Lowest value any calculated stat may take.
pub const MIN_STAT: i32 = 1;

/// Summed modifiers from a set of equipment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EquipmentBonuses {
    pub flat: StatLine,
    pub percent: PercentLine,
}

impl EquipmentBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, equipment: &Equipment) {
        self.flat = self.flat + equipment.stat_mods;
        self.percent = self.percent + equipment.percent_mods;
    }

    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Equipment>) -> Self {
        let mut bonuses = Self::new();
        for item in items {
            bonuses.add(item);
        }
        bonuses
    }

    /// Bonuses granted by everything `character` currently wears.
    pub fn of(character: &Character) -> Self {
        Self::from_items(character.equipped_items())
    }

    /// Applies the stack to one base value.
    pub fn apply(&self, stat: StatKind, base: i32) -> i32 {
        apply(base, self.flat.get(stat), self.percent.get(stat))
    }
}

pub fn apply(base: i32, flat: i32, percent: f64) -> i32 {
    let scaled = (f64::from(base) * percent).floor() as i32;
    (base + flat + scaled).max(MIN_STAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EquipmentSlot;

    #[test]
    fn flat_then_percent_of_base() {
        // 10 + 5 + floor(10 × 0.25) = 17
        assert_eq!(apply(10, 5, 0.25), 17);
        // floor keeps fractions down: 7 × 0.5 = 3.5 → 3
        assert_eq!(apply(7, 0, 0.5), 10);
    }

    #[test]
    fn negative_totals_clamp_to_one() {
        assert_eq!(apply(3, -10, 0.0), 1);
        assert_eq!(apply(10, 0, -2.0), 1);
    }

    #[test]
    fn negative_percent_floors_downward() {
        // 10 × -0.15 = -1.5 → -2
        assert_eq!(apply(10, 0, -0.15), 8);
    }

    #[test]
    fn bonuses_sum_across_items() {
        let helm = Equipment::new("helm", "Helm", EquipmentSlot::Head)
            .with_stat_mods(StatLine::new(0, 0, 3, 0));
        let boots = Equipment::new("boots", "Boots", EquipmentSlot::Feet)
            .with_stat_mods(StatLine::new(0, 0, 1, 2))
            .with_percent_mods(PercentLine {
                speed: 0.1,
                ..PercentLine::default()
            });

        let bonuses = EquipmentBonuses::from_items([&helm, &boots]);
        assert_eq!(bonuses.flat, StatLine::new(0, 0, 4, 2));
        assert_eq!(bonuses.apply(StatKind::Speed, 20), 24);
    }
}
