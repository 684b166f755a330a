//! Code for performing the dispatch optimisation.
//!
//! The problem has one continuous output variable per (technology, time step) pair, bounded by
//! the technology's capacity; an equality demand-balance constraint per time step; and, for
//! technologies with ramp limits, a two-sided ramp constraint per pair of consecutive steps. The
//! objective minimises total operating cost, i.e. output multiplied by per-energy variable cost
//! and the step duration.
use crate::error::{DispatchError, DispatchResult};
use crate::model::DispatchModel;
use crate::results::DispatchResults;
use crate::technology::{Technology, TechnologyId};
use crate::time_step::TimeDelta;
use crate::units::{Money, Power};
use highs::{HighsModelStatus, RowProblem as Problem, Sense};
use indexmap::IndexMap;
use log::debug;

/// A decision variable in the optimisation
///
/// Note that this type does **not** include the value of the variable; it just refers to a
/// particular column of the problem.
type Variable = highs::Col;

/// A map for easy lookup of variables in the problem.
///
/// The entries are ordered (see [`IndexMap`]): technology-major, then by time step. This ordering
/// is relied on when reading the solution back out, as the solver reports column values in
/// insertion order.
#[derive(Default)]
struct VariableMap(IndexMap<VariableMapKey, Variable>);

impl VariableMap {
    /// Get the [`Variable`] corresponding to the given technology and time step.
    fn get(&self, technology: &TechnologyId, time_step: usize) -> Variable {
        let key = VariableMapKey {
            technology: technology.clone(),
            time_step,
        };

        *self
            .0
            .get(&key)
            .expect("No variable found for given params")
    }
}

/// A key for a [`VariableMap`]
#[derive(Eq, PartialEq, Hash)]
struct VariableMapKey {
    technology: TechnologyId,
    time_step: usize,
}

/// The solution to the dispatch optimisation problem
struct Solution {
    solution: highs::Solution,
    variables: VariableMap,
}

impl Solution {
    /// Iterate over the solved output level of every (technology, time step) variable.
    fn iter_dispatch(&self) -> impl Iterator<Item = (&TechnologyId, usize, Power)> {
        self.variables
            .0
            .keys()
            .zip(self.solution.columns().iter().copied())
            .map(|(key, output)| (&key.technology, key.time_step, Power(output)))
    }
}

/// Formulate the dispatch problem, invoke the solver and extract the results.
///
/// # Arguments
///
/// * `model` - The dispatch model to solve
///
/// # Returns
///
/// The dispatch table and the achieved objective value, or an error if the problem is infeasible
/// or the solver fails.
pub fn perform_dispatch_optimisation(
    model: &DispatchModel,
) -> DispatchResult<(DispatchResults, Money)> {
    // Set up problem
    let mut problem = Problem::default();
    let variables = add_variables(&mut problem, model);

    // Add constraints
    add_demand_balance_constraints(&mut problem, &variables, model);
    add_ramp_constraints(&mut problem, &variables, model);
    debug!(
        "Formulated dispatch problem with {} variables and {} constraints",
        variables.0.len(),
        problem.num_rows()
    );

    // Solve problem
    let mut highs_model = problem.optimise(Sense::Minimise);

    // HiGHS writes progress to stdout by default; keep the library quiet and report through our
    // own logging instead.
    highs_model.set_option("output_flag", false);

    let solved = highs_model.solve();
    match solved.status() {
        HighsModelStatus::Optimal => {
            let solution = Solution {
                solution: solved.get_solution(),
                variables,
            };
            Ok(extract_results(model, &solution))
        }
        status @ (HighsModelStatus::Infeasible
        | HighsModelStatus::Unbounded
        | HighsModelStatus::UnboundedOrInfeasible) => {
            Err(DispatchError::Infeasible(format!("{status:?}")))
        }
        status => Err(DispatchError::Solver(format!(
            "unrecognised solver status: {status:?}"
        ))),
    }
}

/// Calculate the objective coefficient for one unit of output held for one time step.
///
/// Energy is power multiplied by the step duration; cost is energy multiplied by the
/// technology's per-energy variable cost.
fn cost_coefficient(technology: &Technology, time_delta: TimeDelta) -> Money {
    technology.variable_cost() * (Power(1.0) * time_delta.hours())
}

/// Add variables to the optimisation problem.
///
/// # Arguments
///
/// * `problem` - The optimisation problem
/// * `model` - The dispatch model
///
/// # Returns
///
/// A [`VariableMap`] with the problem's variables as values.
fn add_variables(problem: &mut Problem, model: &DispatchModel) -> VariableMap {
    let mut variables = VariableMap::default();

    for technology in model.technology_list() {
        let coeff = cost_coefficient(technology, model.time_delta());
        for time_step in 0..model.net_demand().len() {
            let var = problem.add_column(coeff.value(), 0.0..=technology.capacity.value());
            let key = VariableMapKey {
                technology: technology.id.clone(),
                time_step,
            };

            let existing = variables.0.insert(key, var).is_some();
            assert!(!existing, "Duplicate entry for var");
        }
    }

    variables
}

/// Add a demand-balance constraint for every time step.
///
/// The sum of all technologies' output at each step must equal the net demand at that step
/// exactly; this is deterministic dispatch with no curtailment or storage.
fn add_demand_balance_constraints(
    problem: &mut Problem,
    variables: &VariableMap,
    model: &DispatchModel,
) {
    let mut terms = Vec::new();
    for (time_step, demand) in model.net_demand().iter().enumerate() {
        terms.extend(
            model
                .technology_list()
                .iter()
                .map(|technology| (variables.get(&technology.id, time_step), 1.0)),
        );

        // Sum of output across the fleet must equal demand
        let rhs = demand.value();
        problem.add_row(rhs..=rhs, terms.drain(0..));
    }
}

/// Add ramp constraints for technologies that expose ramp rates.
///
/// For each pair of consecutive time steps the change in output is bounded below by the maximum
/// ramp-down and above by the maximum ramp-up, both expressed as fractions of capacity. Rates of
/// zero pin the output to a constant level. Technologies without ramp rates are exempt from this
/// constraint family entirely.
fn add_ramp_constraints(problem: &mut Problem, variables: &VariableMap, model: &DispatchModel) {
    let n_steps = model.net_demand().len();
    for technology in model.technology_list() {
        let Some(ramp) = technology.ramp else {
            continue;
        };

        let max_increase = technology.capacity * ramp.up;
        let max_decrease = technology.capacity * ramp.down;
        for time_step in 1..n_steps {
            let previous = variables.get(&technology.id, time_step - 1);
            let current = variables.get(&technology.id, time_step);
            problem.add_row(
                -max_decrease.value()..=max_increase.value(),
                [(current, 1.0), (previous, -1.0)],
            );
        }
    }
}

/// Map the solved variable values back into a per-technology dispatch table and compute the
/// realised objective.
///
/// The objective is recomputed from the solution rather than taken from the solver, which also
/// serves as a consistency check that the extraction preserved the formulation's cost sum.
fn extract_results(model: &DispatchModel, solution: &Solution) -> (DispatchResults, Money) {
    let n_steps = model.net_demand().len();
    let mut columns: IndexMap<TechnologyId, Vec<Power>> = model
        .technology_list()
        .iter()
        .map(|technology| (technology.id.clone(), Vec::with_capacity(n_steps)))
        .collect();

    // Variables are ordered technology-major, so each column fills in time-step order
    for (technology, _, output) in solution.iter_dispatch() {
        columns
            .get_mut(technology)
            .expect("technology missing from results table")
            .push(output);
    }

    let objective = model
        .technology_list()
        .iter()
        .map(|technology| {
            let dispatched: Power = columns[&technology.id].iter().copied().sum();
            technology.variable_cost() * (dispatched * model.time_delta().hours())
        })
        .sum();

    (DispatchResults::new(columns), objective)
}
