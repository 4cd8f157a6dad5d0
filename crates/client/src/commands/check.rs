//! Content pack validation.
//!
//! Loads a content directory the same way a game would, then checks that
//! every floor can actually be built from it and prints how each monster
//! fares against a level-1 player.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use game_content::ContentFactory;
use game_core::combat::{damage_between, experience_reward, opening_turn};
use game_core::map::EntityKind;
use game_core::{BattleTurn, Character, ContentOracle, ContentSnapshot, LevelRow};

/// Validate a content directory
#[derive(Parser)]
pub struct Check {
    /// Content pack directory
    #[arg(value_name = "DIR")]
    content_dir: PathBuf,

    /// Skip the monster balance table
    #[arg(long)]
    no_balance: bool,
}

impl Check {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(&self.content_dir);
        let content = factory
            .build()
            .with_context(|| format!("Failed to load {}", self.content_dir.display()))?;
        // Declared order, before the table sorts it.
        let levels = factory.load_levels()?;

        println!(
            "{} {}",
            style("Content:").bold().cyan(),
            self.content_dir.display()
        );
        println!(
            "{} {}",
            style("Data version:").bold().cyan(),
            content.data_version()
        );
        println!();
        print_counts(&content, levels.len());

        let issues = validate(&content, &levels);
        println!();
        if issues.is_empty() {
            println!("{}", style("No problems found").bold().green());
        } else {
            println!("{}", style("=== Problems ===").bold().red());
            for issue in &issues {
                println!("  {} {issue}", style("✗").red());
            }
        }

        if !self.no_balance {
            println!();
            print_balance(&content);
        }

        if !issues.is_empty() {
            anyhow::bail!("{} problem(s) found", issues.len());
        }
        Ok(())
    }
}

/// One referential-integrity problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issue {
    pub floor: Option<i32>,
    pub message: String,
}

impl Issue {
    fn on_floor(floor: i32, message: impl Into<String>) -> Self {
        Self {
            floor: Some(floor),
            message: message.into(),
        }
    }

    fn global(message: impl Into<String>) -> Self {
        Self {
            floor: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.floor {
            Some(floor) => write!(f, "floor {floor}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Definitions keyed by content id, dropping file-stem aliases.
fn distinct<'a, T>(
    entries: impl Iterator<Item = (&'a str, &'a T)>,
    id: impl Fn(&T) -> &str,
) -> BTreeMap<String, &'a T>
where
    T: 'a,
{
    entries
        .map(|(_, value)| (id(value).to_string(), value))
        .collect()
}

fn print_counts(content: &ContentSnapshot, level_rows: usize) {
    let monsters = distinct(content.monsters(), |m| m.id.as_str()).len();
    let items = distinct(content.items(), |i| i.id.as_str()).len();
    let equipments = distinct(content.equipments(), |e| e.id.as_str()).len();
    let buffs = distinct(content.buffs(), |b| b.id.as_str()).len();

    println!("{}", style("=== Content Summary ===").bold().green());
    println!("  Floors: {}", content.floors().len());
    println!("  Monsters: {monsters}");
    println!("  Items: {items}");
    println!("  Equipment: {equipments}");
    println!("  Buffs: {buffs}");
    println!("  Level rows: {level_rows}");
    println!(
        "  Player: {}",
        content
            .player()
            .map(|p| p.id.as_str())
            .unwrap_or("(missing)")
    );
}

/// Checks that every placement resolves and the level curve is well formed.
///
/// `levels` are the rows in declared order.
pub fn validate(content: &ContentSnapshot, levels: &[LevelRow]) -> Vec<Issue> {
    let mut issues = Vec::new();
    let floors = content.floors();

    if content.player().is_none() {
        issues.push(Issue::global("no player definition"));
    }

    for &floor in &floors {
        let Some(map) = content.map_layout(floor) else {
            continue;
        };

        let starts = map
            .entities
            .values()
            .filter(|spec| spec.kind == EntityKind::PlayerStart)
            .count();
        if starts > 1 {
            issues.push(Issue::on_floor(
                floor,
                format!("{starts} player_start entities"),
            ));
        }

        for (key, spec) in &map.entities {
            if map.tile(spec.position()).is_none() {
                issues.push(Issue::on_floor(
                    floor,
                    format!("'{key}' is placed outside the map at {:?}", spec.position()),
                ));
            }

            match &spec.kind {
                EntityKind::Monster if content.monster(&spec.id).is_none() => {
                    issues.push(Issue::on_floor(
                        floor,
                        format!("'{key}' references unknown monster '{}'", spec.id),
                    ));
                }
                EntityKind::Item if content.item(&spec.id).is_none() => {
                    issues.push(Issue::on_floor(
                        floor,
                        format!("'{key}' references unknown item '{}'", spec.id),
                    ));
                }
                EntityKind::Equipment
                    if !map.equipments.contains_key(&spec.id)
                        && content.equipment(&spec.id).is_none() =>
                {
                    issues.push(Issue::on_floor(
                        floor,
                        format!("'{key}' references unknown equipment '{}'", spec.id),
                    ));
                }
                EntityKind::Door => {
                    match map.doors.get(key).or_else(|| map.doors.get(&spec.id)) {
                        None => issues.push(Issue::on_floor(
                            floor,
                            format!("door '{key}' has no definition"),
                        )),
                        Some(door) => {
                            if let Some(monster) = door.required_defeat()
                                && content.monster(monster).is_none()
                            {
                                issues.push(Issue::on_floor(
                                    floor,
                                    format!(
                                        "door '{key}' waits on unknown monster '{monster}'"
                                    ),
                                ));
                            }
                        }
                    }
                }
                EntityKind::Stair => {
                    match map.stairs.get(key).or_else(|| map.stairs.get(&spec.id)) {
                        None => issues.push(Issue::on_floor(
                            floor,
                            format!("stair '{key}' has no definition"),
                        )),
                        Some(stair) => match content.map_layout(stair.target.floor) {
                            None => issues.push(Issue::on_floor(
                                floor,
                                format!(
                                    "stair '{key}' leads to missing floor {}",
                                    stair.target.floor
                                ),
                            )),
                            Some(target) if target.tile(stair.target.position()).is_none() => {
                                issues.push(Issue::on_floor(
                                    floor,
                                    format!(
                                        "stair '{key}' lands outside floor {} at {:?}",
                                        stair.target.floor,
                                        stair.target.position()
                                    ),
                                ));
                            }
                            Some(_) => {}
                        },
                    }
                }
                _ => {}
            }
        }
    }

    for pair in levels.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        if upper.level <= lower.level {
            issues.push(Issue::global(format!(
                "level {} follows level {}",
                upper.level, lower.level
            )));
        }
        if upper.exp_needed <= lower.exp_needed {
            issues.push(Issue::global(format!(
                "level {} needs {} exp, not more than level {} ({})",
                upper.level, upper.exp_needed, lower.level, lower.exp_needed
            )));
        }
    }

    issues
}

/// A level-1 player against one monster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matchup {
    pub monster: String,
    pub dealt: i32,
    pub taken: i32,
    pub hits_to_kill: i32,
    /// Hp the player loses over the whole fight.
    pub hp_lost: i32,
    pub experience: u32,
}

/// Simulated fights against every monster, by content id.
pub fn matchups(content: &ContentSnapshot) -> Option<Vec<Matchup>> {
    let row = content.levels().rows().first()?;
    let player = Character::new("player", "Player").with_stats(
        row.maxhp,
        row.attack,
        row.defense,
        row.speed,
    );

    let monsters = distinct(content.monsters(), |m| m.id.as_str());
    let table = monsters
        .into_iter()
        .map(|(id, monster)| {
            let dealt = damage_between(&player, monster);
            let taken = damage_between(monster, &player);
            let hits_to_kill = (monster.hp + dealt - 1) / dealt;
            let monster_hits = match opening_turn(&player, monster).turn {
                BattleTurn::Player => hits_to_kill - 1,
                _ => hits_to_kill,
            };
            Matchup {
                monster: id,
                dealt,
                taken,
                hits_to_kill,
                hp_lost: monster_hits * taken,
                experience: experience_reward(monster),
            }
        })
        .collect();
    Some(table)
}

fn print_balance(content: &ContentSnapshot) {
    println!("{}", style("=== Balance vs. level 1 ===").bold().green());
    let Some(table) = matchups(content) else {
        println!("  {}", style("no level table, skipped").yellow());
        return;
    };
    let maxhp = content.levels().rows().first().map_or(0, |row| row.maxhp);

    println!(
        "  {:<20} {:>6} {:>6} {:>6} {:>8} {:>6}",
        "monster", "dealt", "taken", "hits", "hp lost", "exp"
    );
    for matchup in table {
        let hp_lost = if matchup.hp_lost >= maxhp {
            style(matchup.hp_lost.to_string()).red()
        } else {
            style(matchup.hp_lost.to_string()).white()
        };
        println!(
            "  {:<20} {:>6} {:>6} {:>6} {:>8} {:>6}",
            matchup.monster,
            matchup.dealt,
            matchup.taken,
            matchup.hits_to_kill,
            hp_lost,
            matchup.experience
        );
    }
}
