//! The dispatch table produced by a successful solve.
use crate::technology::TechnologyId;
use crate::units::Power;
use indexmap::IndexMap;

/// Per-technology, per-time-step dispatched output.
///
/// One column per technology (in roster order), one row per time step of the demand series.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchResults {
    columns: IndexMap<TechnologyId, Vec<Power>>,
}

impl DispatchResults {
    /// Create a results table from per-technology columns.
    pub(crate) fn new(columns: IndexMap<TechnologyId, Vec<Power>>) -> Self {
        Self { columns }
    }

    /// The dispatched output of the given technology at every time step.
    pub fn column(&self, technology: &str) -> Option<&[Power]> {
        self.columns.get(technology).map(Vec::as_slice)
    }

    /// The summed dispatched output of the given technology across all time steps.
    pub fn total(&self, technology: &str) -> Option<Power> {
        self.column(technology)
            .map(|column| column.iter().copied().sum())
    }

    /// The number of time steps in the table.
    pub fn n_steps(&self) -> usize {
        self.columns
            .first()
            .map_or(0, |(_, column)| column.len())
    }

    /// Iterate over the columns in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (&TechnologyId, &[Power])> {
        self.columns
            .iter()
            .map(|(technology, column)| (technology, column.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use itertools::assert_equal;

    fn results() -> DispatchResults {
        DispatchResults::new(
            [
                ("Nuclear".into(), vec![Power(2.0), Power(2.5)]),
                ("NaturalGas".into(), vec![Power(0.0), Power(1.0)]),
            ]
            .into_iter()
            .collect(),
        )
    }

    #[test]
    fn test_column_lookup() {
        let results = results();
        assert_eq!(results.column("Nuclear").unwrap().len(), 2);
        assert!(results.column("Coal").is_none());
        assert_eq!(results.n_steps(), 2);
    }

    #[test]
    fn test_total() {
        let results = results();
        assert_approx_eq!(f64, results.total("Nuclear").unwrap().value(), 4.5);
        assert!(results.total("Coal").is_none());
    }

    #[test]
    fn test_iter_preserves_order() {
        assert_equal(
            results().iter().map(|(technology, _)| technology.to_string()),
            ["Nuclear".to_string(), "NaturalGas".to_string()],
        );
    }
}
