//! The dispatch model: the public entry point for formulating and solving a dispatch problem.
use crate::demand::DemandSeries;
use crate::error::{DispatchError, DispatchResult};
use crate::optimisation::perform_dispatch_optimisation;
use crate::results::DispatchResults;
use crate::technology::{Technology, TechnologyId};
use crate::time_step::TimeDelta;
use crate::units::{Money, Power};
use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use itertools::Itertools;
use log::info;
use strum::EnumString;

/// Identifier for the external solver backend.
///
/// Backend selection is an explicit parameter with a documented default; it is never inferred
/// from the execution environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Solver {
    /// The bundled HiGHS LP solver (the default).
    #[default]
    #[strum(serialize = "highs")]
    Highs,
}

/// A least-cost dispatch problem for a fixed technology mix and a net-demand series.
///
/// Construction validates the inputs and resolves the time step; [`DispatchModel::solve`]
/// formulates the linear program, invokes the solver and records the dispatch table and achieved
/// objective. Re-invoking `solve` rebuilds the problem from the current attributes and overwrites
/// both.
pub struct DispatchModel {
    technology_list: Vec<Technology>,
    net_demand: DemandSeries,
    solver: Solver,
    time_delta: TimeDelta,
    capacity_dict: IndexMap<TechnologyId, Power>,
    indices: Vec<(TechnologyId, usize)>,
    results: Option<DispatchResults>,
    objective: Option<Money>,
}

/// Check the technology roster and build the capacity map, preserving roster order.
fn check_roster(technology_list: &[Technology]) -> Result<IndexMap<TechnologyId, Power>> {
    ensure!(!technology_list.is_empty(), "technology roster is empty");

    let mut capacity_dict = IndexMap::new();
    for technology in technology_list {
        technology
            .validate()
            .with_context(|| format!("invalid definition for technology '{}'", technology.id))?;
        ensure!(
            capacity_dict
                .insert(technology.id.clone(), technology.capacity)
                .is_none(),
            "duplicate technology name '{}'",
            technology.id
        );
    }

    Ok(capacity_dict)
}

impl DispatchModel {
    /// Create a dispatch model from a technology roster, a demand series and a solver backend.
    ///
    /// The time step is derived from the demand series (see
    /// [`DemandSeries::resolve_time_delta`]); use [`DispatchModel::with_time_delta`] or
    /// [`DispatchModel::set_time_delta`] to override it.
    pub fn new(
        technology_list: Vec<Technology>,
        net_demand: DemandSeries,
        solver: Solver,
    ) -> DispatchResult<Self> {
        let capacity_dict = check_roster(&technology_list).map_err(DispatchError::config)?;
        net_demand.validate().map_err(DispatchError::config)?;

        let time_delta = net_demand.resolve_time_delta();
        let indices = technology_list
            .iter()
            .map(|technology| technology.id.clone())
            .cartesian_product(0..net_demand.len())
            .collect_vec();

        Ok(Self {
            technology_list,
            net_demand,
            solver,
            time_delta,
            capacity_dict,
            indices,
            results: None,
            objective: None,
        })
    }

    /// Override the derived time step at construction.
    pub fn with_time_delta(mut self, time_delta: TimeDelta) -> Self {
        self.time_delta = time_delta;
        self
    }

    /// Parse a duration literal such as `"2 hr"` and overwrite the stored time step.
    ///
    /// Takes effect immediately and independently of the demand series; the next call to
    /// [`DispatchModel::solve`] uses the new value.
    pub fn set_time_delta(&mut self, literal: &str) -> DispatchResult<()> {
        self.time_delta = literal.parse().map_err(DispatchError::config)?;
        Ok(())
    }

    /// Formulate and solve the dispatch problem.
    ///
    /// On success the dispatch table and achieved objective are recorded on the model. On failure
    /// they retain their previous state, so stale values can only be told apart from fresh ones
    /// by checking the returned result.
    pub fn solve(&mut self) -> DispatchResult<()> {
        info!(
            "Performing dispatch optimisation ({} technologies, {} time steps, solver {})",
            self.technology_list.len(),
            self.net_demand.len(),
            self.solver
        );
        let (results, objective) = perform_dispatch_optimisation(self)?;

        self.results = Some(results);
        self.objective = Some(objective);
        Ok(())
    }

    /// The technology roster, in caller-supplied order.
    pub fn technology_list(&self) -> &[Technology] {
        &self.technology_list
    }

    /// The technology identifiers, in roster order.
    pub fn tech_set(&self) -> impl Iterator<Item = &TechnologyId> {
        self.capacity_dict.keys()
    }

    /// The net-demand series the fleet is dispatched against.
    pub fn net_demand(&self) -> &DemandSeries {
        &self.net_demand
    }

    /// The solver backend identifier.
    pub fn solver(&self) -> Solver {
        self.solver
    }

    /// The duration represented by one time step.
    pub fn time_delta(&self) -> TimeDelta {
        self.time_delta
    }

    /// Each technology's capacity, keyed by identifier in roster order.
    pub fn capacity_dict(&self) -> &IndexMap<TechnologyId, Power> {
        &self.capacity_dict
    }

    /// The flattened (technology, time step) index space of the decision variables.
    pub fn indices(&self) -> &[(TechnologyId, usize)] {
        &self.indices
    }

    /// The dispatch table from the most recent successful solve, if any.
    pub fn results(&self) -> Option<&DispatchResults> {
        self.results.as_ref()
    }

    /// The total operating cost achieved by the most recent successful solve, if any.
    pub fn objective(&self) -> Option<Money> {
        self.objective
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{fleet, natural_gas, net_demand, nuclear};
    use crate::time_step::TimeUnit;
    use itertools::assert_equal;
    use rstest::rstest;

    #[rstest]
    fn test_model_initialise(fleet: Vec<Technology>, net_demand: DemandSeries) {
        let n_technologies = fleet.len();
        let n_steps = net_demand.len();
        let model = DispatchModel::new(fleet, net_demand, Solver::Highs).unwrap();

        assert_equal(model.tech_set().map(ToString::to_string), ["Nuclear", "NaturalGas"]);
        assert_eq!(model.solver(), Solver::Highs);
        assert_eq!(model.capacity_dict().len(), n_technologies);
        assert_eq!(model.indices().len(), n_technologies * n_steps);
        assert_eq!(model.time_delta(), TimeDelta::default());
        assert!(model.results().is_none());
        assert!(model.objective().is_none());
    }

    #[rstest]
    fn test_empty_roster(net_demand: DemandSeries) {
        let result = DispatchModel::new(vec![], net_demand, Solver::Highs);
        assert!(matches!(result, Err(DispatchError::Configuration(_))));
    }

    #[rstest]
    fn test_duplicate_technology_names(nuclear: Technology, net_demand: DemandSeries) {
        let roster = vec![nuclear.clone(), nuclear];
        let result = DispatchModel::new(roster, net_demand, Solver::Highs);
        assert!(matches!(result, Err(DispatchError::Configuration(_))));
    }

    #[rstest]
    fn test_invalid_technology(natural_gas: Technology, net_demand: DemandSeries) {
        let roster = vec![natural_gas.with_ramp_rates(2.0, 0.5)];
        let result = DispatchModel::new(roster, net_demand, Solver::Highs);
        assert!(matches!(result, Err(DispatchError::Configuration(_))));
    }

    #[rstest]
    fn test_negative_demand(fleet: Vec<Technology>) {
        let demand = DemandSeries::from(vec![1.0, -1.0]);
        let result = DispatchModel::new(fleet, demand, Solver::Highs);
        assert!(matches!(result, Err(DispatchError::Configuration(_))));
    }

    #[rstest]
    fn test_set_time_delta(fleet: Vec<Technology>, net_demand: DemandSeries) {
        let mut model = DispatchModel::new(fleet, net_demand, Solver::Highs).unwrap();
        model.set_time_delta("2 hr").unwrap();
        assert_eq!(model.time_delta(), TimeDelta::new(2.0, TimeUnit::Hours));

        let result = model.set_time_delta("2 parsecs");
        assert!(matches!(result, Err(DispatchError::Configuration(_))));
        assert_eq!(model.time_delta(), TimeDelta::new(2.0, TimeUnit::Hours));
    }

    #[rstest]
    fn test_with_time_delta(fleet: Vec<Technology>, net_demand: DemandSeries) {
        let model = DispatchModel::new(fleet, net_demand, Solver::Highs)
            .unwrap()
            .with_time_delta(TimeDelta::new(2.0, TimeUnit::Days));
        assert_eq!(model.time_delta(), TimeDelta::new(2.0, TimeUnit::Days));
    }

    #[test]
    fn test_solver_from_str() {
        assert_eq!("highs".parse::<Solver>().unwrap(), Solver::Highs);
        assert_eq!("HiGHS".parse::<Solver>().unwrap(), Solver::Highs);
        assert!("cplex".parse::<Solver>().is_err());
    }
}
