use core::ops::{Add, Sub};

/// Tile coordinate on a floor grid. `y` indexes rows, `x` indexes columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Horizontal facing of a character sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by a horizontal step, if any.
    pub const fn from_dx(dx: i32) -> Option<Self> {
        if dx < 0 {
            Some(Self::Left)
        } else if dx > 0 {
            Some(Self::Right)
        } else {
            None
        }
    }

    /// Facing that looks from `from` towards `to` along the x axis.
    ///
    /// Returns `None` when both share a column.
    pub const fn towards(from: Position, to: Position) -> Option<Self> {
        Self::from_dx(to.x - from.x)
    }
}

/// The four stats equipment may modify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    Speed,
}

/// Integer value per stat: flat equipment modifiers, stat deltas and
/// level-up gains all share this shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatLine {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

impl StatLine {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    pub const fn new(hp: i32, attack: i32, defense: i32, speed: i32) -> Self {
        Self {
            hp,
            attack,
            defense,
            speed,
        }
    }

    pub const fn get(&self, stat: StatKind) -> i32 {
        match stat {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
        }
    }

    pub fn values(&self) -> [i32; 4] {
        [self.hp, self.attack, self.defense, self.speed]
    }

    /// Number of stats that went up.
    pub fn increases(&self) -> usize {
        self.values().iter().filter(|v| **v > 0).count()
    }

    /// Number of stats that went down.
    pub fn decreases(&self) -> usize {
        self.values().iter().filter(|v| **v < 0).count()
    }
}

impl Add for StatLine {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.hp + rhs.hp,
            self.attack + rhs.attack,
            self.defense + rhs.defense,
            self.speed + rhs.speed,
        )
    }
}

impl Sub for StatLine {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.hp - rhs.hp,
            self.attack - rhs.attack,
            self.defense - rhs.defense,
            self.speed - rhs.speed,
        )
    }
}

/// Percent modifiers as decimal fractions (`0.1` = +10%).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PercentLine {
    pub hp: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
}

impl PercentLine {
    pub const fn get(&self, stat: StatKind) -> f64 {
        match stat {
            StatKind::Hp => self.hp,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
        }
    }
}

impl Add for PercentLine {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            hp: self.hp + rhs.hp,
            attack: self.attack + rhs.attack,
            defense: self.defense + rhs.defense,
            speed: self.speed + rhs.speed,
        }
    }
}
