//! Fleet state and the movement/combat engines

pub mod combat;
pub mod movement;

use serde::{Deserialize, Serialize};

use crate::core::config::{GameConfig, ShipDesign, ShipTemplate};
use crate::core::types::{EmpireId, FleetId, ShipClass, ShipId, SystemId};

/// A single ship. Ships have no lifecycle outside a fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub design_id: String,
    pub hull_points: u32,
    pub max_hull: u32,
    /// Flat attack added on top of the design's attack (template refits)
    pub attack_bonus: u32,
}

impl Ship {
    /// Build a ship from its design plus an optional refit template
    pub fn from_design(id: ShipId, design: &ShipDesign, template: Option<&ShipTemplate>) -> Self {
        let hull = design.hull + template.map(|t| t.hull_bonus).unwrap_or(0);
        Self {
            id,
            design_id: design.id.clone(),
            hull_points: hull,
            max_hull: hull,
            attack_bonus: template.map(|t| t.attack_bonus).unwrap_or(0),
        }
    }

    pub fn attack(&self, config: &GameConfig) -> u32 {
        let base = config.design(&self.design_id).map(|d| d.attack).unwrap_or(0);
        base + self.attack_bonus
    }

    pub fn class(&self, config: &GameConfig) -> Option<ShipClass> {
        config.design(&self.design_id).map(|d| d.class)
    }
}

/// A fleet of ships.
///
/// A fleet with zero ships is a valid sentinel, not deleted, so movement
/// orders and AI targeting loops always have something to act on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    pub id: FleetId,
    pub owner: EmpireId,
    pub system_id: SystemId,
    pub target_system_id: Option<SystemId>,
    /// Previous destination, excluded from the AI's next target choice
    pub last_target: Option<SystemId>,
    pub ticks_to_arrival: u32,
    pub ships: Vec<Ship>,
}

impl Fleet {
    pub fn idle_at(id: FleetId, owner: EmpireId, system_id: SystemId) -> Self {
        Self {
            id,
            owner,
            system_id,
            target_system_id: None,
            last_target: None,
            ticks_to_arrival: 0,
            ships: Vec::new(),
        }
    }

    pub fn total_attack(&self, config: &GameConfig) -> u32 {
        self.ships.iter().map(|s| s.attack(config)).sum()
    }

    /// Detach the first ship of the given class, if any. Used by
    /// colonization to consume a colony ship.
    pub fn detach_first_of_class(&mut self, class: ShipClass, config: &GameConfig) -> Option<Ship> {
        let index = self.ships.iter().position(|s| s.class(config) == Some(class))?;
        Some(self.ships.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_from_design_with_template() {
        let config = GameConfig::standard();
        let design = config.design("corvette").unwrap();
        let template = config.template("bulwark_refit").unwrap();

        let plain = Ship::from_design(ShipId(0), design, None);
        let refit = Ship::from_design(ShipId(1), design, Some(template));

        assert_eq!(plain.hull_points, design.hull);
        assert_eq!(refit.hull_points, design.hull + 12);
        assert_eq!(plain.attack(&config), design.attack);
    }

    #[test]
    fn test_fleet_total_attack_sums_bonuses() {
        let config = GameConfig::standard();
        let design = config.design("corvette").unwrap();
        let template = config.template("assault_refit").unwrap();
        let mut fleet = Fleet::idle_at(FleetId(0), EmpireId(0), SystemId(0));
        fleet.ships.push(Ship::from_design(ShipId(0), design, None));
        fleet.ships.push(Ship::from_design(ShipId(1), design, Some(template)));

        assert_eq!(fleet.total_attack(&config), 8 + 8 + 4);
    }

    #[test]
    fn test_detach_colony_ship() {
        let config = GameConfig::standard();
        let corvette = config.design("corvette").unwrap();
        let colony = config.design("colony_ship").unwrap();
        let mut fleet = Fleet::idle_at(FleetId(0), EmpireId(0), SystemId(0));
        fleet.ships.push(Ship::from_design(ShipId(0), corvette, None));
        fleet.ships.push(Ship::from_design(ShipId(1), colony, None));

        let detached = fleet.detach_first_of_class(ShipClass::Colony, &config);
        assert!(detached.is_some());
        assert_eq!(fleet.ships.len(), 1);
        assert!(fleet.detach_first_of_class(ShipClass::Colony, &config).is_none());
    }
}
