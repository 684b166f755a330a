//! The net-demand time series the fleet is dispatched against.
//!
//! A series is either a bare ordered sequence of power values (one-hour steps assumed) or a
//! sequence paired with a strictly increasing timestamp index from which the step duration is
//! derived.
use crate::error::{DispatchError, DispatchResult};
use crate::time_step::TimeDelta;
use crate::units::Power;
use anyhow::{Result, ensure};
use chrono::NaiveDateTime;
use itertools::Itertools;

/// A time series of non-negative power-demand values.
#[derive(Clone, Debug, PartialEq)]
pub struct DemandSeries {
    values: Vec<Power>,
    index: Option<Vec<NaiveDateTime>>,
}

impl From<Vec<f64>> for DemandSeries {
    /// A bare numeric sequence; the time step defaults to one hour.
    fn from(values: Vec<f64>) -> Self {
        Self {
            values: values.into_iter().map(Power).collect(),
            index: None,
        }
    }
}

impl DemandSeries {
    /// Create a series paired with a timestamp index.
    ///
    /// The index must have one entry per demand value and be strictly increasing.
    pub fn with_index(values: Vec<f64>, index: Vec<NaiveDateTime>) -> DispatchResult<Self> {
        check_index(&values, &index).map_err(DispatchError::config)?;

        Ok(Self {
            values: values.into_iter().map(Power).collect(),
            index: Some(index),
        })
    }

    /// The number of time steps in the series.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series contains no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The demand values, one per time step.
    pub fn values(&self) -> &[Power] {
        &self.values
    }

    /// The timestamp index, if the series carries one.
    pub fn index(&self) -> Option<&[NaiveDateTime]> {
        self.index.as_deref()
    }

    /// Iterate over the demand values.
    pub fn iter(&self) -> impl Iterator<Item = Power> + '_ {
        self.values.iter().copied()
    }

    /// Derive the duration of one time step from the series.
    ///
    /// For an indexed series this is the elapsed duration between its first two entries,
    /// normalised to the coarsest whole unit; a bare series (or an indexed series with a single
    /// observation) steps in one-hour intervals.
    pub fn resolve_time_delta(&self) -> TimeDelta {
        match &self.index {
            Some(index) if index.len() >= 2 => TimeDelta::from_elapsed(index[1] - index[0]),
            _ => TimeDelta::default(),
        }
    }

    /// Check that the series is non-empty and all values are non-negative and finite.
    pub(crate) fn validate(&self) -> Result<()> {
        ensure!(!self.values.is_empty(), "net demand series is empty");
        for value in &self.values {
            ensure!(
                value.value() >= 0.0 && value.value().is_finite(),
                "net demand values must be non-negative, got {}",
                value.value()
            );
        }

        Ok(())
    }
}

/// Check that a timestamp index matches the series length and is strictly increasing.
fn check_index(values: &[f64], index: &[NaiveDateTime]) -> Result<()> {
    ensure!(
        values.len() == index.len(),
        "timestamp index length ({}) does not match series length ({})",
        index.len(),
        values.len()
    );
    ensure!(
        index.iter().tuple_windows().all(|(t1, t2)| t1 < t2),
        "timestamp index must be strictly increasing"
    );

    Ok(())
}
