//! Game configuration with documented constants
//!
//! All tuning values are collected here. The kernel treats the config as
//! read-only: no engine ever mutates it. Configs can be loaded from TOML
//! (any omitted section falls back to the built-in catalog) and are
//! validated once at load time so runtime lookups only fail on genuinely
//! unknown ids.

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::types::{JobKind, PlanetKind, ResearchBranch, ResourceKind, ShipClass};

/// A resource quantity used in costs, production and upkeep tables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceAmount {
    pub resource: ResourceKind,
    pub amount: f64,
}

fn amounts(pairs: &[(ResourceKind, f64)]) -> Vec<ResourceAmount> {
    pairs
        .iter()
        .map(|&(resource, amount)| ResourceAmount { resource, amount })
        .collect()
}

/// Driver-level tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Wall-clock duration of one tick in milliseconds
    pub tick_duration_ms: f64,

    /// Catch-up cap: a backgrounded tab can imply thousands of pending
    /// ticks, so one driver call never advances more than this many.
    pub max_ticks_per_advance: u32,

    /// Maximum number of queued shipyard tasks
    pub shipyard_queue_size: usize,

    /// The session keeps only the most recent N combat reports
    pub combat_report_cap: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_duration_ms: 1000.0,
            max_ticks_per_advance: 5,
            shipyard_queue_size: 5,
            combat_report_cap: 8,
        }
    }
}

/// Galaxy generation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxySettings {
    pub system_count: usize,
    /// Half-width of the square the galaxy is scattered over (distance units)
    pub spread: f32,
    /// Chance that a generated system carries a habitable world
    pub habitable_chance: f64,
    /// Chance that an uncolonized system starts with hostile power
    pub hostile_chance: f64,
    pub hostile_power_min: u32,
    pub hostile_power_max: u32,
    /// Number of AI empires created alongside the player
    pub ai_empire_count: usize,
}

impl Default for GalaxySettings {
    fn default() -> Self {
        Self {
            system_count: 24,
            spread: 500.0,
            habitable_chance: 0.45,
            hostile_chance: 0.3,
            hostile_power_min: 10,
            hostile_power_max: 40,
            ai_empire_count: 2,
        }
    }
}

/// Per-job production and upkeep, scaled by assigned population counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDef {
    pub kind: JobKind,
    pub production: Vec<ResourceAmount>,
    pub upkeep: Vec<ResourceAmount>,
}

/// A buildable planetary district
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictDef {
    pub id: String,
    pub name: String,
    pub cost: Vec<ResourceAmount>,
    pub build_ticks: u32,
    pub production: Vec<ResourceAmount>,
    pub upkeep: Vec<ResourceAmount>,
}

/// Economy tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomySettings {
    pub starting_resources: Vec<ResourceAmount>,
    /// When enabled, a scheduled heuristic pass shifts population toward
    /// jobs producing deficit priority resources. Total population is
    /// always preserved.
    pub auto_rebalance: bool,
    /// The rebalance pass runs every this-many ticks
    pub rebalance_interval: u64,
    /// Resources the rebalancer protects, in priority order
    pub priority_resources: Vec<ResourceKind>,
    /// Net production below this value counts as a deficit
    pub deficit_threshold: f64,
}

impl Default for EconomySettings {
    fn default() -> Self {
        Self {
            starting_resources: amounts(&[
                (ResourceKind::Energy, 200.0),
                (ResourceKind::Minerals, 200.0),
                (ResourceKind::Food, 150.0),
                (ResourceKind::Alloys, 100.0),
                (ResourceKind::Research, 0.0),
                (ResourceKind::Influence, 50.0),
            ]),
            auto_rebalance: false,
            rebalance_interval: 5,
            priority_resources: vec![ResourceKind::Food, ResourceKind::Energy],
            deficit_threshold: 0.0,
        }
    }
}

/// A buildable ship design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipDesign {
    pub id: String,
    pub name: String,
    pub class: ShipClass,
    pub cost: Vec<ResourceAmount>,
    pub build_ticks: u32,
    pub attack: u32,
    pub hull: u32,
}

/// An optional refit template applied on top of a base design.
///
/// The template scales the build cost and adds flat combat stat deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipTemplate {
    pub id: String,
    pub name: String,
    pub cost_multiplier: f64,
    pub attack_bonus: u32,
    pub hull_bonus: u32,
}

/// Colonization pipeline tuning. The traveling stage's length is computed
/// from map distance at task creation; only the fixed stages live here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonizationSettings {
    pub cost: Vec<ResourceAmount>,
    pub prepare_ticks: u32,
    pub colonize_ticks: u32,
}

impl Default for ColonizationSettings {
    fn default() -> Self {
        Self {
            cost: amounts(&[(ResourceKind::Energy, 100.0), (ResourceKind::Food, 50.0)]),
            prepare_ticks: 2,
            colonize_ticks: 4,
        }
    }
}

/// Fleet movement tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetSettings {
    /// Flat tick overhead added to every inter-system jump
    pub base_travel_ticks: f32,
    /// Distance units covered per travel tick
    pub distance_per_tick: f32,
    /// Design used when respawning the fallback fleet
    pub fallback_design: String,
}

impl Default for FleetSettings {
    fn default() -> Self {
        Self {
            base_travel_ticks: 3.0,
            distance_per_tick: 60.0,
            fallback_design: "corvette".to_string(),
        }
    }
}

/// Diplomacy thresholds and cadence.
///
/// War/peace transitions use hysteresis: `peace_threshold` must be strictly
/// greater than `war_threshold`, otherwise empires would oscillate between
/// states on every check interval. This is asserted by `validate()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiplomacySettings {
    /// The diplomacy/AI pass runs every this-many ticks
    pub auto_check_interval: u64,
    /// Opinion delta applied to every AI empire per check
    pub opinion_drift: i32,
    /// peace -> war when drifted opinion falls to this value or below
    pub war_threshold: i32,
    /// war -> peace when drifted opinion rises to this value or above
    pub peace_threshold: i32,
    /// Number of systems seeded with hostile power when a war starts
    pub war_zone_count: usize,
    /// Hostile power injected into each war zone
    pub war_zone_power: u32,
    /// Minimum opinion for a border access request to be granted
    pub border_access_opinion: i32,
}

impl Default for DiplomacySettings {
    fn default() -> Self {
        Self {
            auto_check_interval: 10,
            opinion_drift: -2,
            war_threshold: -50,
            peace_threshold: -10,
            war_zone_count: 3,
            war_zone_power: 25,
            border_access_opinion: 20,
        }
    }
}

/// AI fleet director tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    /// Minimum ships per AI fleet
    pub base_ships: u32,
    /// Extra ships per hostile system, capped by `max_ships`
    pub extra_per_hostile: u32,
    /// Cap on the extra ships added from threat scaling
    pub max_ships: u32,
    /// AI fleet count grows by one per this-many hostile systems
    pub hostiles_per_extra_fleet: usize,
    /// Hard cap on fleets per AI empire
    pub max_fleets: usize,
    /// Design AI fleets are stocked with
    pub ship_design: String,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            base_ships: 2,
            extra_per_hostile: 1,
            max_ships: 6,
            hostiles_per_extra_fleet: 3,
            max_fleets: 3,
            ship_design: "corvette".to_string(),
        }
    }
}

/// A researchable technology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechDef {
    pub id: String,
    pub name: String,
    pub branch: ResearchBranch,
    pub era: u32,
    pub cost: f64,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub exclusive_group: Option<String>,
}

/// A research era. An era unlocks when all of its gateway techs are
/// completed (an era with no gateways is unlocked from the start).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraDef {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub gateway_techs: Vec<String>,
}

/// Research tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchSettings {
    pub eras: Vec<EraDef>,
    pub techs: Vec<TechDef>,
}

impl Default for ResearchSettings {
    fn default() -> Self {
        let t = |id: &str,
                 name: &str,
                 branch: ResearchBranch,
                 era: u32,
                 cost: f64,
                 prereqs: &[&str],
                 group: Option<&str>| TechDef {
            id: id.to_string(),
            name: name.to_string(),
            branch,
            era,
            cost,
            prerequisites: prereqs.iter().map(|s| s.to_string()).collect(),
            exclusive_group: group.map(|s| s.to_string()),
        };

        use ResearchBranch::{Engineering, Physics, Society};

        Self {
            eras: vec![
                EraDef {
                    id: 0,
                    name: "Exploration Era".to_string(),
                    gateway_techs: vec![],
                },
                EraDef {
                    id: 1,
                    name: "Expansion Era".to_string(),
                    gateway_techs: vec![
                        "fusion_power".to_string(),
                        "colonial_charters".to_string(),
                        "corvette_hulls".to_string(),
                    ],
                },
                EraDef {
                    id: 2,
                    name: "Dominion Era".to_string(),
                    gateway_techs: vec![
                        "shield_harmonics".to_string(),
                        "xeno_diplomacy".to_string(),
                        "destroyer_hulls".to_string(),
                    ],
                },
            ],
            techs: vec![
                t("fusion_power", "Fusion Power", Physics, 0, 40.0, &[], None),
                t("lasers", "Laser Weaponry", Physics, 0, 60.0, &["fusion_power"], None),
                t(
                    "colonial_charters",
                    "Colonial Charters",
                    Society,
                    0,
                    40.0,
                    &[],
                    None,
                ),
                t(
                    "galactic_bureaucracy",
                    "Galactic Bureaucracy",
                    Society,
                    0,
                    60.0,
                    &["colonial_charters"],
                    None,
                ),
                t("corvette_hulls", "Corvette Hulls", Engineering, 0, 40.0, &[], None),
                t(
                    "orbital_foundries",
                    "Orbital Foundries",
                    Engineering,
                    0,
                    60.0,
                    &["corvette_hulls"],
                    None,
                ),
                t(
                    "shield_harmonics",
                    "Shield Harmonics",
                    Physics,
                    1,
                    90.0,
                    &["lasers"],
                    None,
                ),
                t(
                    "focused_arrays",
                    "Focused Arrays",
                    Physics,
                    1,
                    100.0,
                    &["lasers"],
                    Some("weapons_doctrine"),
                ),
                t(
                    "kinetic_batteries",
                    "Kinetic Batteries",
                    Engineering,
                    1,
                    100.0,
                    &["orbital_foundries"],
                    Some("weapons_doctrine"),
                ),
                t("xeno_diplomacy", "Xeno Diplomacy", Society, 1, 90.0, &[], None),
                t(
                    "destroyer_hulls",
                    "Destroyer Hulls",
                    Engineering,
                    1,
                    100.0,
                    &["orbital_foundries"],
                    None,
                ),
                t(
                    "cruiser_hulls",
                    "Cruiser Hulls",
                    Engineering,
                    2,
                    160.0,
                    &["destroyer_hulls"],
                    None,
                ),
                t(
                    "ascension_theory",
                    "Ascension Theory",
                    Society,
                    2,
                    160.0,
                    &["xeno_diplomacy"],
                    None,
                ),
            ],
        }
    }
}

/// A tradition perk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerkDef {
    pub id: String,
    pub name: String,
    pub era: u32,
    pub cost: f64,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub exclusive_group: Option<String>,
}

/// Tradition tree and point accrual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraditionSettings {
    /// Tradition points gained per unit of influence income per tick
    pub points_per_influence_income: f64,
    pub perks: Vec<PerkDef>,
}

impl Default for TraditionSettings {
    fn default() -> Self {
        let p = |id: &str, name: &str, era: u32, cost: f64, prereqs: &[&str], group: Option<&str>| {
            PerkDef {
                id: id.to_string(),
                name: name.to_string(),
                era,
                cost,
                prerequisites: prereqs.iter().map(|s| s.to_string()).collect(),
                exclusive_group: group.map(|s| s.to_string()),
            }
        };

        Self {
            points_per_influence_income: 0.05,
            perks: vec![
                p("discovery", "Discovery", 0, 10.0, &[], None),
                p("expansion", "Expansion", 0, 10.0, &[], None),
                p(
                    "deep_space_surveys",
                    "Deep Space Surveys",
                    0,
                    20.0,
                    &["discovery"],
                    None,
                ),
                p("militarist", "Militarist Ethos", 0, 15.0, &[], Some("ethos")),
                p("pacifist", "Pacifist Ethos", 0, 15.0, &[], Some("ethos")),
                p("supremacy", "Supremacy", 1, 25.0, &["militarist"], Some("finisher")),
                p("harmony", "Harmony", 1, 25.0, &["pacifist"], Some("finisher")),
            ],
        }
    }
}

/// Exploration tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorationSettings {
    /// Ticks for one survey task to complete
    pub survey_ticks: u32,
    /// Completing a survey reveals unknown systems within this range
    pub sensor_range: f32,
}

impl Default for ExplorationSettings {
    fn default() -> Self {
        Self {
            survey_ticks: 4,
            sensor_range: 150.0,
        }
    }
}

/// The complete, read-only game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub simulation: SimulationSettings,
    pub galaxy: GalaxySettings,
    pub economy: EconomySettings,
    pub jobs: Vec<JobDef>,
    pub districts: Vec<DistrictDef>,
    pub ship_designs: Vec<ShipDesign>,
    pub ship_templates: Vec<ShipTemplate>,
    pub colonization: ColonizationSettings,
    pub fleet: FleetSettings,
    pub diplomacy: DiplomacySettings,
    pub ai: AiSettings,
    pub research: ResearchSettings,
    pub traditions: TraditionSettings,
    pub exploration: ExplorationSettings,
}

impl GameConfig {
    /// Built-in catalog with tuned values, already valid
    pub fn standard() -> Self {
        Self {
            jobs: default_jobs(),
            districts: default_districts(),
            ship_designs: default_ship_designs(),
            ship_templates: default_ship_templates(),
            ..Self::default()
        }
    }

    /// Parse a TOML config. Sections omitted from the file fall back to
    /// their built-in defaults. The result is validated before being
    /// returned.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let mut config: GameConfig = toml::from_str(s)?;
        if config.jobs.is_empty() {
            config.jobs = default_jobs();
        }
        if config.districts.is_empty() {
            config.districts = default_districts();
        }
        if config.ship_designs.is_empty() {
            config.ship_designs = default_ship_designs();
        }
        if config.ship_templates.is_empty() {
            config.ship_templates = default_ship_templates();
        }
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn job(&self, kind: JobKind) -> Option<&JobDef> {
        self.jobs.iter().find(|j| j.kind == kind)
    }

    pub fn district(&self, id: &str) -> Option<&DistrictDef> {
        self.districts.iter().find(|d| d.id == id)
    }

    pub fn design(&self, id: &str) -> Option<&ShipDesign> {
        self.ship_designs.iter().find(|d| d.id == id)
    }

    pub fn template(&self, id: &str) -> Option<&ShipTemplate> {
        self.ship_templates.iter().find(|t| t.id == id)
    }

    pub fn tech(&self, id: &str) -> Option<&TechDef> {
        self.research.techs.iter().find(|t| t.id == id)
    }

    pub fn era(&self, id: u32) -> Option<&EraDef> {
        self.research.eras.iter().find(|e| e.id == id)
    }

    pub fn perk(&self, id: &str) -> Option<&PerkDef> {
        self.traditions.perks.iter().find(|p| p.id == id)
    }

    /// Validate internal consistency. Run once at load time; engines may
    /// assume a validated config afterwards.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unique("district", self.districts.iter().map(|d| d.id.as_str()))?;
        check_unique("ship design", self.ship_designs.iter().map(|d| d.id.as_str()))?;
        check_unique("ship template", self.ship_templates.iter().map(|t| t.id.as_str()))?;
        check_unique("tech", self.research.techs.iter().map(|t| t.id.as_str()))?;
        check_unique("perk", self.traditions.perks.iter().map(|p| p.id.as_str()))?;

        // Hysteresis invariant: without a strictly looser peace threshold,
        // empires flip war/peace on every check interval.
        if self.diplomacy.peace_threshold <= self.diplomacy.war_threshold {
            return Err(ConfigError::InvalidValue {
                field: "diplomacy.peace_threshold",
                reason: format!(
                    "peace_threshold ({}) must be > war_threshold ({})",
                    self.diplomacy.peace_threshold, self.diplomacy.war_threshold
                ),
            });
        }

        if self.simulation.shipyard_queue_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "simulation.shipyard_queue_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.simulation.max_ticks_per_advance == 0 {
            return Err(ConfigError::InvalidValue {
                field: "simulation.max_ticks_per_advance",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.fleet.distance_per_tick <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "fleet.distance_per_tick",
                reason: "must be positive".to_string(),
            });
        }
        if self.traditions.points_per_influence_income < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "traditions.points_per_influence_income",
                reason: "must not be negative".to_string(),
            });
        }

        for district in &self.districts {
            if district.build_ticks == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "districts.build_ticks",
                    reason: format!("district {} has zero build ticks", district.id),
                });
            }
        }
        for design in &self.ship_designs {
            if design.build_ticks == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "ship_designs.build_ticks",
                    reason: format!("design {} has zero build ticks", design.id),
                });
            }
        }
        for template in &self.ship_templates {
            if !template.cost_multiplier.is_finite() || template.cost_multiplier <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "ship_templates.cost_multiplier",
                    reason: format!("template {} must have a positive cost multiplier", template.id),
                });
            }
        }

        if self.design(&self.fleet.fallback_design).is_none() {
            return Err(ConfigError::DanglingReference {
                kind: "fleet.fallback_design",
                id: self.fleet.fallback_design.clone(),
                target: "ship design".to_string(),
            });
        }
        if self.design(&self.ai.ship_design).is_none() {
            return Err(ConfigError::DanglingReference {
                kind: "ai.ship_design",
                id: self.ai.ship_design.clone(),
                target: "ship design".to_string(),
            });
        }

        for tech in &self.research.techs {
            if self.era(tech.era).is_none() {
                return Err(ConfigError::DanglingReference {
                    kind: "tech",
                    id: tech.id.clone(),
                    target: format!("era {}", tech.era),
                });
            }
            for prereq in &tech.prerequisites {
                if self.tech(prereq).is_none() {
                    return Err(ConfigError::DanglingReference {
                        kind: "tech",
                        id: tech.id.clone(),
                        target: format!("prerequisite {}", prereq),
                    });
                }
            }
        }
        for era in &self.research.eras {
            for gateway in &era.gateway_techs {
                if self.tech(gateway).is_none() {
                    return Err(ConfigError::DanglingReference {
                        kind: "era",
                        id: era.id.to_string(),
                        target: format!("gateway tech {}", gateway),
                    });
                }
            }
        }
        for perk in &self.traditions.perks {
            for prereq in &perk.prerequisites {
                if self.perk(prereq).is_none() {
                    return Err(ConfigError::DanglingReference {
                        kind: "perk",
                        id: perk.id.clone(),
                        target: format!("prerequisite {}", prereq),
                    });
                }
            }
        }

        Ok(())
    }
}

fn check_unique<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigError::DuplicateId(format!("{kind} {id}")));
        }
    }
    Ok(())
}

fn default_jobs() -> Vec<JobDef> {
    vec![
        JobDef {
            kind: JobKind::Workers,
            production: amounts(&[(ResourceKind::Minerals, 2.0), (ResourceKind::Food, 1.0)]),
            upkeep: vec![],
        },
        JobDef {
            kind: JobKind::Specialists,
            production: amounts(&[(ResourceKind::Alloys, 1.5), (ResourceKind::Energy, 1.0)]),
            upkeep: amounts(&[(ResourceKind::Minerals, 1.0)]),
        },
        JobDef {
            kind: JobKind::Researchers,
            production: amounts(&[(ResourceKind::Research, 2.0)]),
            upkeep: amounts(&[(ResourceKind::Energy, 0.5)]),
        },
    ]
}

fn default_districts() -> Vec<DistrictDef> {
    let d = |id: &str,
             name: &str,
             cost: &[(ResourceKind, f64)],
             build_ticks: u32,
             production: &[(ResourceKind, f64)],
             upkeep: &[(ResourceKind, f64)]| DistrictDef {
        id: id.to_string(),
        name: name.to_string(),
        cost: amounts(cost),
        build_ticks,
        production: amounts(production),
        upkeep: amounts(upkeep),
    };

    vec![
        d(
            "generator",
            "Generator District",
            &[(ResourceKind::Minerals, 60.0)],
            4,
            &[(ResourceKind::Energy, 4.0)],
            &[],
        ),
        d(
            "mine",
            "Mining District",
            &[(ResourceKind::Minerals, 50.0)],
            4,
            &[(ResourceKind::Minerals, 3.0)],
            &[(ResourceKind::Energy, 1.0)],
        ),
        d(
            "farm",
            "Agri District",
            &[(ResourceKind::Minerals, 40.0)],
            3,
            &[(ResourceKind::Food, 3.0)],
            &[(ResourceKind::Energy, 0.5)],
        ),
        d(
            "foundry",
            "Foundry District",
            &[(ResourceKind::Minerals, 80.0)],
            6,
            &[(ResourceKind::Alloys, 2.0)],
            &[(ResourceKind::Minerals, 2.0), (ResourceKind::Energy, 1.0)],
        ),
        d(
            "lab",
            "Research District",
            &[(ResourceKind::Minerals, 70.0), (ResourceKind::Energy, 20.0)],
            5,
            &[(ResourceKind::Research, 3.0)],
            &[(ResourceKind::Energy, 2.0)],
        ),
    ]
}

fn default_ship_designs() -> Vec<ShipDesign> {
    let s = |id: &str,
             name: &str,
             class: ShipClass,
             cost: &[(ResourceKind, f64)],
             build_ticks: u32,
             attack: u32,
             hull: u32| ShipDesign {
        id: id.to_string(),
        name: name.to_string(),
        class,
        cost: amounts(cost),
        build_ticks,
        attack,
        hull,
    };

    vec![
        s(
            "corvette",
            "Corvette",
            ShipClass::Corvette,
            &[(ResourceKind::Alloys, 30.0), (ResourceKind::Minerals, 20.0)],
            4,
            8,
            20,
        ),
        s(
            "destroyer",
            "Destroyer",
            ShipClass::Destroyer,
            &[(ResourceKind::Alloys, 60.0)],
            6,
            18,
            35,
        ),
        s(
            "cruiser",
            "Cruiser",
            ShipClass::Cruiser,
            &[(ResourceKind::Alloys, 120.0)],
            9,
            35,
            60,
        ),
        s(
            "science_vessel",
            "Science Vessel",
            ShipClass::Science,
            &[(ResourceKind::Alloys, 25.0), (ResourceKind::Energy, 20.0)],
            4,
            0,
            12,
        ),
        s(
            "colony_ship",
            "Colony Ship",
            ShipClass::Colony,
            &[(ResourceKind::Alloys, 50.0), (ResourceKind::Food, 30.0)],
            8,
            0,
            15,
        ),
    ]
}

fn default_ship_templates() -> Vec<ShipTemplate> {
    vec![
        ShipTemplate {
            id: "assault_refit".to_string(),
            name: "Assault Refit".to_string(),
            cost_multiplier: 1.25,
            attack_bonus: 4,
            hull_bonus: 0,
        },
        ShipTemplate {
            id: "bulwark_refit".to_string(),
            name: "Bulwark Refit".to_string(),
            cost_multiplier: 1.4,
            attack_bonus: 0,
            hull_bonus: 12,
        },
    ]
}

/// Habitable world template used both by galaxy generation and by tests
pub fn world_template(kind: PlanetKind, size: u32) -> (Vec<ResourceAmount>, Vec<ResourceAmount>) {
    let scale = size as f64 / 10.0;
    let base = amounts(&[
        (ResourceKind::Energy, 3.0 * scale),
        (ResourceKind::Minerals, 2.0 * scale),
        (ResourceKind::Food, 2.0 * scale),
        (ResourceKind::Influence, 1.0),
    ]);
    let upkeep = match kind {
        PlanetKind::Tundra | PlanetKind::Volcanic => amounts(&[(ResourceKind::Energy, 1.0)]),
        _ => vec![],
    };
    (base, upkeep)
}
