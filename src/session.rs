//! The game session: the single value the whole simulation advances
//!
//! A `GameSession` owns every piece of mutable game state. The driver
//! treats it as a value: commands either mutate it and return `Ok`, or
//! leave it untouched and return a tagged error. Everything in here is
//! serializable, so a snapshot is just the session run through serde.

use serde::{Deserialize, Serialize};

use crate::colonization::ColonizationTask;
use crate::core::config::GameConfig;
use crate::core::types::{EmpireId, FleetId, IdGen, PlanetId, PlanetKind, ShipId, SystemId, Tick};
use crate::diplomacy::{Empire, EmpireKind, WarStatus};
use crate::economy::districts::DistrictConstructionTask;
use crate::economy::{EconomyState, Planet, Population};
use crate::exploration::{reveal_within_range, SurveyTask};
use crate::fleet::combat::{CombatReport, CombatResult};
use crate::fleet::{Fleet, Ship};
use crate::galaxy::{generate_galaxy, Galaxy};
use crate::progression::{ResearchState, TraditionState};
use crate::shipyard::ShipyardTask;

/// Entries kept in the rolling event log
const EVENT_LOG_CAP: usize = 64;

/// Tick accounting. The session never reads a wall clock: the driver
/// reports elapsed milliseconds and the clock converts them into whole
/// ticks, carrying the remainder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationClock {
    pub tick: Tick,
    pub is_running: bool,
    pub speed_multiplier: f64,
    /// Milliseconds accumulated toward the next tick
    pub carry_ms: f64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self {
            tick: 0,
            is_running: true,
            speed_multiplier: 1.0,
            carry_ms: 0.0,
        }
    }

    /// Convert an elapsed wall-clock delta into ticks to simulate.
    ///
    /// Capped at `max_ticks_per_advance`; a long gap (backgrounded tab,
    /// loaded snapshot) drops the excess instead of fast-forwarding
    /// through it.
    pub fn pending_ticks(&mut self, delta_ms: f64, config: &GameConfig) -> u64 {
        if !self.is_running || delta_ms <= 0.0 {
            return 0;
        }
        self.carry_ms += delta_ms * self.speed_multiplier;
        let tick_ms = config.simulation.tick_duration_ms;
        let ticks = (self.carry_ms / tick_ms) as u64;
        let cap = config.simulation.max_ticks_per_advance as u64;
        if ticks > cap {
            self.carry_ms = 0.0;
            cap
        } else {
            self.carry_ms -= ticks as f64 * tick_ms;
            ticks
        }
    }

    pub fn pause(&mut self) {
        self.is_running = false;
    }

    pub fn resume(&mut self) {
        self.is_running = true;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEventKind {
    ColonyFounded { system: SystemId, planet: PlanetId },
    DistrictCompleted { planet: PlanetId, district: String },
    ShipCompleted { fleet: FleetId, design: String },
    FleetArrived { fleet: FleetId, system: SystemId },
    FleetRespawned { fleet: FleetId, system: SystemId },
    CombatResolved { system: SystemId, result: CombatResult },
    SystemSurveyed { system: SystemId },
    WarDeclared { empire: EmpireId },
    PeaceSigned { empire: EmpireId },
    WarZoneSeeded { system: SystemId, power: u32 },
    TechCompleted { tech: String },
    EraUnlocked { era: u32 },
    TraditionAdopted { perk: String },
}

/// A logged event with the tick it happened on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub tick: Tick,
    pub kind: GameEventKind,
}

const AI_EMPIRE_NAMES: &[&str] = &[
    "Vex Ascendancy",
    "Krellid Swarm",
    "Auric Combine",
    "Meridian Pact",
];

/// Complete session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub clock: SimulationClock,
    pub galaxy: Galaxy,
    pub economy: EconomyState,
    pub fleets: Vec<Fleet>,
    pub empires: Vec<Empire>,
    pub district_tasks: Vec<DistrictConstructionTask>,
    pub shipyard_queue: Vec<ShipyardTask>,
    pub colonization_tasks: Vec<ColonizationTask>,
    pub survey_tasks: Vec<SurveyTask>,
    pub research: ResearchState,
    pub traditions: TraditionState,
    pub combat_reports: Vec<CombatReport>,
    pub events: Vec<GameEvent>,
    pub ids: IdGen,
    pub home_system: SystemId,
    pub player: EmpireId,
}

impl GameSession {
    /// Build a fresh session from config and a galaxy seed.
    ///
    /// The player starts with a developed home world, one mixed fleet
    /// (escorts, a science vessel, a colony ship), and sensor coverage of
    /// the home system's neighborhood.
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut ids = IdGen::new();
        let mut galaxy = generate_galaxy(&config.galaxy, seed, &mut ids);
        let home_system = galaxy.systems[0].id;
        reveal_within_range(&mut galaxy, home_system, config.exploration.sensor_range);

        let mut economy = EconomyState::with_starting_resources(&config.economy.starting_resources);
        economy.planets.push(home_planet(&galaxy, home_system, &mut ids));

        let player = EmpireId(ids.next());
        let mut empires = vec![Empire {
            id: player,
            kind: EmpireKind::Player,
            name: "Terran Concord".to_string(),
            opinion: 0,
            war_status: WarStatus::Peace,
            border_access: false,
        }];
        for index in 0..config.galaxy.ai_empire_count {
            empires.push(Empire {
                id: EmpireId(ids.next()),
                kind: EmpireKind::Ai,
                name: AI_EMPIRE_NAMES[index % AI_EMPIRE_NAMES.len()].to_string(),
                opinion: 0,
                war_status: WarStatus::Peace,
                border_access: false,
            });
        }

        let fleets = vec![starting_fleet(config, player, home_system, &mut ids)];

        Self {
            clock: SimulationClock::new(),
            galaxy,
            economy,
            fleets,
            empires,
            district_tasks: Vec::new(),
            shipyard_queue: Vec::new(),
            colonization_tasks: Vec::new(),
            survey_tasks: Vec::new(),
            research: ResearchState::new(config),
            traditions: TraditionState::new(),
            combat_reports: Vec::new(),
            events: Vec::new(),
            ids,
            home_system,
            player,
        }
    }

    pub fn empire(&self, id: EmpireId) -> Option<&Empire> {
        self.empires.iter().find(|e| e.id == id)
    }

    pub fn fleet(&self, id: FleetId) -> Option<&Fleet> {
        self.fleets.iter().find(|f| f.id == id)
    }

    /// Append to the rolling event log, dropping the oldest entries past
    /// the cap.
    pub fn log_event(&mut self, kind: GameEventKind) {
        self.events.push(GameEvent {
            tick: self.clock.tick,
            kind,
        });
        if self.events.len() > EVENT_LOG_CAP {
            let excess = self.events.len() - EVENT_LOG_CAP;
            self.events.drain(..excess);
        }
    }

    /// Keep only the most recent combat reports, per the configured cap
    pub fn push_combat_report(&mut self, report: CombatReport, config: &GameConfig) {
        self.combat_reports.push(report);
        let cap = config.simulation.combat_report_cap;
        if self.combat_reports.len() > cap {
            let excess = self.combat_reports.len() - cap;
            self.combat_reports.drain(..excess);
        }
    }
}

fn home_planet(galaxy: &Galaxy, home_system: SystemId, ids: &mut IdGen) -> Planet {
    let world = galaxy
        .get(home_system)
        .and_then(|s| s.habitable_world.as_ref())
        .expect("home system is generated habitable");
    let mut districts = ahash::AHashMap::new();
    districts.insert("generator".to_string(), 1);
    districts.insert("farm".to_string(), 1);
    districts.insert("mine".to_string(), 1);

    Planet {
        id: PlanetId(ids.next()),
        system_id: home_system,
        kind: PlanetKind::Continental,
        size: world.size,
        population: Population {
            workers: 5,
            specialists: 2,
            researchers: 2,
        },
        base_production: world.base_production.clone(),
        upkeep: world.upkeep.clone(),
        districts,
        stability: 1.0,
        happiness: 1.0,
    }
}

fn starting_fleet(
    config: &GameConfig,
    owner: EmpireId,
    home_system: SystemId,
    ids: &mut IdGen,
) -> Fleet {
    let mut fleet = Fleet::idle_at(FleetId(ids.next()), owner, home_system);
    let mut add = |design_id: &str, count: usize| {
        if let Some(design) = config.design(design_id) {
            for _ in 0..count {
                fleet.ships.push(Ship::from_design(ShipId(ids.next()), design, None));
            }
        }
    };
    add("corvette", 2);
    add("science_vessel", 1);
    add("colony_ship", 1);
    fleet
}

/// Net income snapshot handed from the economy stage to the progression
/// stages within one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickIncome {
    pub research: f64,
    pub influence: f64,
}

impl TickIncome {
    pub fn from_net(net: &ahash::AHashMap<crate::core::types::ResourceKind, f64>) -> Self {
        use crate::core::types::ResourceKind;
        Self {
            research: net.get(&ResourceKind::Research).copied().unwrap_or(0.0),
            influence: net.get(&ResourceKind::Influence).copied().unwrap_or(0.0),
        }
    }
}
