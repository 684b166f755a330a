//! Technology records describe the economics and physical limits of one generation asset.
//!
//! Records are constructed by the caller before model construction and are read-only thereafter;
//! the dispatch model never mutates them.
use crate::units::{Dimensionless, MoneyPerEnergy, MoneyPerPower, Power};
use anyhow::{Result, ensure};
use std::rc::Rc;

/// A unique identifier for a technology within a roster.
#[derive(Clone, Debug, Hash, PartialEq, Eq, derive_more::Display)]
pub struct TechnologyId(pub Rc<str>);

impl std::borrow::Borrow<str> for TechnologyId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TechnologyId {
    fn from(s: &str) -> Self {
        TechnologyId(Rc::from(s))
    }
}

impl From<String> for TechnologyId {
    fn from(s: String) -> Self {
        TechnologyId(Rc::from(s))
    }
}

/// Limits on how fast a technology may change its output between consecutive time steps.
///
/// Each rate is a fraction of capacity. A rate of 0 pins the output at a constant level
/// (baseload behaviour); a rate of 1 permits any step-to-step change within capacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RampRates {
    /// Maximum fractional increase in output per time step
    pub up: Dimensionless,
    /// Maximum fractional decrease in output per time step
    pub down: Dimensionless,
}

/// An immutable description of one generation asset's economics and physical limits.
#[derive(Clone, Debug, PartialEq)]
pub struct Technology {
    /// A unique identifier for the technology (e.g. "Nuclear")
    pub id: TechnologyId,
    /// Category tag for the technology
    pub kind: String,
    /// Maximum power output
    pub capacity: Power,
    /// Overnight capital cost per unit capacity
    pub capital_cost: MoneyPerPower,
    /// Annual fixed operating cost per unit capacity
    pub om_cost_fixed: MoneyPerPower,
    /// Variable operating cost per unit energy produced
    pub om_cost_variable: MoneyPerEnergy,
    /// Fuel cost per unit energy produced
    pub fuel_cost: MoneyPerEnergy,
    /// Ramp-rate limits; technologies without them are unconstrained in ramp
    pub ramp: Option<RampRates>,
}

impl Technology {
    /// Create a technology with the given identifier and capacity and all costs zero.
    pub fn new(id: &str, capacity: Power) -> Self {
        Self {
            id: id.into(),
            kind: "production".into(),
            capacity,
            capital_cost: MoneyPerPower(0.0),
            om_cost_fixed: MoneyPerPower(0.0),
            om_cost_variable: MoneyPerEnergy(0.0),
            fuel_cost: MoneyPerEnergy(0.0),
            ramp: None,
        }
    }

    /// Set the cost attributes of the technology.
    pub fn with_costs(
        mut self,
        capital_cost: MoneyPerPower,
        om_cost_fixed: MoneyPerPower,
        om_cost_variable: MoneyPerEnergy,
        fuel_cost: MoneyPerEnergy,
    ) -> Self {
        self.capital_cost = capital_cost;
        self.om_cost_fixed = om_cost_fixed;
        self.om_cost_variable = om_cost_variable;
        self.fuel_cost = fuel_cost;
        self
    }

    /// Attach ramp-rate limits, making this a thermal technology.
    pub fn with_ramp_rates(mut self, up: f64, down: f64) -> Self {
        self.ramp = Some(RampRates {
            up: Dimensionless(up),
            down: Dimensionless(down),
        });
        self
    }

    /// The per-unit-energy cost used in the dispatch objective.
    pub fn variable_cost(&self) -> MoneyPerEnergy {
        self.om_cost_variable + self.fuel_cost
    }

    /// Check the record's invariants: positive capacity, non-negative costs, ramp rates in [0, 1].
    pub(crate) fn validate(&self) -> Result<()> {
        ensure!(
            self.capacity.value() > 0.0 && self.capacity.value().is_finite(),
            "capacity must be positive"
        );
        for cost in [
            self.capital_cost.value(),
            self.om_cost_fixed.value(),
            self.om_cost_variable.value(),
            self.fuel_cost.value(),
        ] {
            ensure!(cost >= 0.0 && cost.is_finite(), "costs must be non-negative");
        }
        if let Some(ramp) = &self.ramp {
            for rate in [ramp.up.0, ramp.down.0] {
                ensure!(
                    (0.0..=1.0).contains(&rate),
                    "ramp rates must lie within [0, 1]"
                );
            }
        }

        Ok(())
    }
}
