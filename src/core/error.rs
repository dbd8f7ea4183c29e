//! Error taxonomy for the simulation kernel
//!
//! Every player/AI command returns a tagged `CommandError` on validation
//! failure instead of throwing; the session is left untouched in that case.
//! Invariant violations (a caller skipping validation) panic instead.

use thiserror::Error;

use crate::core::types::{EmpireId, FleetId, JobKind, PlanetId, ResourceKind, SystemId};

/// Domain validation failures.
///
/// All of these are locally recoverable: the caller surfaces a message and
/// the session value is byte-for-byte unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("star system not found: {0:?}")]
    SystemNotFound(SystemId),

    #[error("planet not found: {0:?}")]
    PlanetNotFound(PlanetId),

    #[error("fleet not found: {0:?}")]
    FleetNotFound(FleetId),

    #[error("empire not found: {0:?}")]
    EmpireNotFound(EmpireId),

    #[error("unknown ship design: {0}")]
    DesignNotFound(String),

    #[error("unknown ship template: {0}")]
    TemplateNotFound(String),

    #[error("unknown district: {0}")]
    DistrictNotFound(String),

    #[error("unknown technology: {0}")]
    TechNotFound(String),

    #[error("unknown tradition perk: {0}")]
    PerkNotFound(String),

    #[error("system has not been surveyed")]
    NotSurveyed,

    #[error("system has not been revealed")]
    NotRevealed,

    #[error("system is already surveyed")]
    AlreadySurveyed,

    #[error("survey already in progress for this system")]
    SurveyInProgress,

    #[error("system has no habitable world")]
    NoHabitableWorld,

    #[error("system is already colonized")]
    AlreadyColonized,

    #[error("colonization already in progress for this system")]
    ColonizationInProgress,

    #[error("no colony ship available")]
    NoColonyShip,

    #[error("shipyard queue is full")]
    QueueFull,

    #[error("cost multiplier must be positive and finite, got {0}")]
    InvalidMultiplier(f64),

    #[error("insufficient {0:?}")]
    InsufficientResources(ResourceKind),

    #[error("no workers available to promote")]
    NoWorkers,

    #[error("no population in job {0:?} to demote")]
    NoPopulation(JobKind),

    #[error("{0:?} is not a valid promotion or demotion target")]
    InvalidJob(JobKind),

    #[error("fleet has no ships")]
    EmptyFleet,

    #[error("technology {tech} belongs to branch {expected}, not {requested}")]
    WrongBranch {
        tech: String,
        expected: String,
        requested: String,
    },

    #[error("era {0} is not unlocked")]
    EraLocked(u32),

    #[error("already completed: {0}")]
    AlreadyCompleted(String),

    #[error("already unlocked: {0}")]
    AlreadyUnlocked(String),

    #[error("prerequisite not satisfied: {0}")]
    PrerequisiteMissing(String),

    #[error("exclusive group {group} is locked to {picked}")]
    ExclusiveGroupTaken { group: String, picked: String },

    #[error("insufficient tradition points (need {needed}, have {available})")]
    InsufficientPoints { needed: f64, available: f64 },

    #[error("already at war with {0:?}")]
    AlreadyAtWar(EmpireId),

    #[error("already at peace with {0:?}")]
    AlreadyAtPeace(EmpireId),

    #[error("cannot target own empire")]
    SelfTarget,

    #[error("peace proposal refused")]
    PeaceRefused,

    #[error("border access refused")]
    AccessRefused,

    #[error("border access already granted")]
    AccessAlreadyGranted,
}

/// Result alias for command entry points
pub type CommandResult<T = ()> = Result<T, CommandError>;

/// Config-load failures. These abort startup; the kernel never sees a
/// config that failed validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("duplicate id: {0}")]
    DuplicateId(String),

    #[error("dangling reference: {kind} {id} refers to unknown {target}")]
    DanglingReference {
        kind: &'static str,
        id: String,
        target: String,
    },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Persistence failures are reported to the caller, never panicked on.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("snapshot parse failed: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
