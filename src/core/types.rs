//! Core type definitions used throughout the simulation kernel

use serde::{Deserialize, Serialize};

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Unique identifier for star systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemId(pub u32);

/// Unique identifier for planets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanetId(pub u32);

/// Unique identifier for fleets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FleetId(pub u32);

/// Unique identifier for individual ships within a fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipId(pub u32);

/// Unique identifier for empires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmpireId(pub u32);

/// Unique identifier for transient queue tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u32);

/// Monotonic id source owned by the session.
///
/// Entity ids are plain counters rather than random UUIDs so that two runs
/// from the same seed produce identical sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdGen {
    next: u32,
}

impl IdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start allocating above ids handed out during world generation
    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }

    pub fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// 2D galaxy-map position (positions are decorative, distances are not)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The closed set of resource types tracked by the economy.
///
/// Config files refer to these by their lowercase names; unknown names are
/// rejected at config-load time rather than surfacing as runtime lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Energy,
    Minerals,
    Food,
    Alloys,
    Research,
    Influence,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Energy,
        ResourceKind::Minerals,
        ResourceKind::Food,
        ResourceKind::Alloys,
        ResourceKind::Research,
        ResourceKind::Influence,
    ];
}

/// Population job categories.
///
/// `Workers` is the base pool; promotion moves one unit from `Workers` into
/// a target job, demotion moves it back. `Workers` itself is never a valid
/// promotion or demotion target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Workers,
    Specialists,
    Researchers,
}

/// Hull role of a ship design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipClass {
    Corvette,
    Destroyer,
    Cruiser,
    Science,
    Colony,
}

/// The three independent research branches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchBranch {
    Physics,
    Society,
    Engineering,
}

impl ResearchBranch {
    pub const ALL: [ResearchBranch; 3] = [
        ResearchBranch::Physics,
        ResearchBranch::Society,
        ResearchBranch::Engineering,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResearchBranch::Physics => "physics",
            ResearchBranch::Society => "society",
            ResearchBranch::Engineering => "engineering",
        }
    }
}

/// Planet surface archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanetKind {
    Continental,
    Ocean,
    Arid,
    Tundra,
    Volcanic,
}
