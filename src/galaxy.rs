//! Galaxy state: star systems, visibility, and deterministic generation
//!
//! Positions are decorative (no pathfinding, no orbital mechanics); only
//! pairwise distances feed the travel-time calculation. All randomness is
//! seeded so the same seed always yields the same galaxy.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::{world_template, GalaxySettings, ResourceAmount};
use crate::core::types::{IdGen, PlanetKind, Position, SystemId, Tick};

/// Spectral class of a system's primary star
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarClass {
    BlueGiant,
    YellowDwarf,
    RedDwarf,
    WhiteDwarf,
    NeutronStar,
}

/// How much of a system the player has uncovered.
///
/// Visibility only ever increases: unknown systems become revealed,
/// revealed systems become surveyed, and nothing regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Unknown,
    Revealed,
    Surveyed,
}

/// Template for the planet a colony ship would found in this system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitableWorld {
    pub kind: PlanetKind,
    pub size: u32,
    pub base_production: Vec<ResourceAmount>,
    pub upkeep: Vec<ResourceAmount>,
}

/// A star system on the galaxy map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub id: SystemId,
    pub name: String,
    pub position: Position,
    pub star_class: StarClass,
    pub visibility: Visibility,
    pub habitable_world: Option<HabitableWorld>,
    /// Environmental hostile presence. Only combat reduces this.
    pub hostile_power: u32,
}

impl StarSystem {
    /// Raise visibility, never lower it
    pub fn reveal_to(&mut self, level: Visibility) {
        if level > self.visibility {
            self.visibility = level;
        }
    }
}

/// The galaxy map plus the war-zone index picker seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Galaxy {
    pub systems: Vec<StarSystem>,
    /// Seed for deterministic war-zone placement (see `ZonePicker`)
    pub zone_seed: u64,
}

impl Galaxy {
    pub fn get(&self, id: SystemId) -> Option<&StarSystem> {
        self.systems.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: SystemId) -> Option<&mut StarSystem> {
        self.systems.iter_mut().find(|s| s.id == id)
    }

    pub fn zone_picker(&self) -> ZonePicker {
        ZonePicker::new(self.zone_seed)
    }

    /// Systems currently carrying hostile power
    pub fn hostile_systems(&self) -> impl Iterator<Item = &StarSystem> {
        self.systems.iter().filter(|s| s.hostile_power > 0)
    }
}

/// Deterministic pseudo-random index picker for war-zone placement.
///
/// Not a statistical RNG: war starts need reproducible but scattered
/// system choices derived from `(tick, empire, slot)`, with no state
/// carried between calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZonePicker {
    seed: u64,
}

impl ZonePicker {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn pick(&self, tick: Tick, empire_index: usize, slot: usize, len: usize) -> usize {
        debug_assert!(len > 0);
        let mut z = self
            .seed
            .wrapping_add(tick.wrapping_mul(0x9e3779b97f4a7c15))
            .wrapping_add((empire_index as u64).wrapping_mul(0xd1b54a32d192ed03))
            .wrapping_add((slot as u64).wrapping_mul(0x94d049bb133111eb));
        // splitmix64 finalizer
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^= z >> 31;
        (z % len as u64) as usize
    }
}

const STAR_NAMES: &[&str] = &[
    "Altair", "Bellatrix", "Caph", "Deneb", "Electra", "Fomalhaut", "Gienah", "Hadar", "Izar",
    "Jabbah", "Kochab", "Lesath", "Mintaka", "Naos", "Okul", "Procyon", "Rastaban", "Sargas",
    "Thuban", "Unukalhai", "Vega", "Wezen", "Yildun", "Zosma",
];

fn system_name(index: usize) -> String {
    let name = STAR_NAMES[index % STAR_NAMES.len()];
    if index < STAR_NAMES.len() {
        name.to_string()
    } else {
        format!("{} {}", name, index / STAR_NAMES.len() + 1)
    }
}

/// Generate a galaxy from a seed.
///
/// System 0 is the home system: surveyed, habitable, and free of hostiles.
/// Everything else starts unknown; some uncolonized systems carry hostile
/// power as early combat objectives.
pub fn generate_galaxy(settings: &GalaxySettings, seed: u64, ids: &mut IdGen) -> Galaxy {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut systems = Vec::with_capacity(settings.system_count);

    for index in 0..settings.system_count {
        let id = SystemId(ids.next());
        let position = Position::new(
            rng.gen_range(-settings.spread..settings.spread),
            rng.gen_range(-settings.spread..settings.spread),
        );
        let star_class = match rng.gen_range(0..10) {
            0 => StarClass::BlueGiant,
            1..=3 => StarClass::YellowDwarf,
            4..=7 => StarClass::RedDwarf,
            8 => StarClass::WhiteDwarf,
            _ => StarClass::NeutronStar,
        };

        let habitable = index == 0 || rng.gen_bool(settings.habitable_chance);
        let habitable_world = habitable.then(|| {
            let kind = match rng.gen_range(0..5) {
                0 => PlanetKind::Continental,
                1 => PlanetKind::Ocean,
                2 => PlanetKind::Arid,
                3 => PlanetKind::Tundra,
                _ => PlanetKind::Volcanic,
            };
            let kind = if index == 0 { PlanetKind::Continental } else { kind };
            let size = if index == 0 { 10 } else { rng.gen_range(6..=14) };
            let (base_production, upkeep) = world_template(kind, size);
            HabitableWorld {
                kind,
                size,
                base_production,
                upkeep,
            }
        });

        let hostile_power = if index != 0 && rng.gen_bool(settings.hostile_chance) {
            rng.gen_range(settings.hostile_power_min..=settings.hostile_power_max)
        } else {
            0
        };

        systems.push(StarSystem {
            id,
            name: system_name(index),
            position: if index == 0 { Position::default() } else { position },
            star_class,
            visibility: if index == 0 {
                Visibility::Surveyed
            } else {
                Visibility::Unknown
            },
            habitable_world,
            hostile_power,
        });
    }

    Galaxy {
        systems,
        zone_seed: seed ^ 0xa076_1d64_78bd_642f,
    }
}
