#![allow(missing_docs)]

//! Unit-bearing value types used throughout the dispatch formulation.
//!
//! Each quantity is a newtype over `f64` holding its magnitude in the canonical unit for its
//! dimension (MW, MWh, USD, hours). Cross-dimension arithmetic is only defined where it is
//! physically meaningful, so mixing incompatible quantities fails to compile rather than
//! producing nonsense. The raw magnitude is extracted with `value()` at the solver boundary,
//! since the solver operates on dimensionless numbers.

/// Represents a dimensionless quantity, e.g. a ramp rate expressed as a fraction of capacity.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, derive_more::Add, derive_more::Sub)]
pub struct Dimensionless(pub f64);

impl std::ops::Mul for Dimensionless {
    type Output = Dimensionless;

    fn mul(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless::from(self.0 * rhs.0)
    }
}

impl std::ops::Div for Dimensionless {
    type Output = Dimensionless;

    fn div(self, rhs: Dimensionless) -> Self::Output {
        Dimensionless::from(self.0 / rhs.0)
    }
}

impl From<f64> for Dimensionless {
    fn from(val: f64) -> Self {
        Self(val)
    }
}

impl From<Dimensionless> for f64 {
    fn from(val: Dimensionless) -> Self {
        val.0
    }
}

macro_rules! unit_struct {
    ($name:ident) => {
        /// Represents a type of quantity.
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, derive_more::Add, derive_more::Sub)]
        pub struct $name(pub f64);

        impl $name {
            /// Creates a new instance of the unit type from a f64 value.
            pub fn from(val: f64) -> Self {
                Self(val)
            }

            /// Returns the value of the unit type as a f64.
            pub fn value(self) -> f64 {
                self.0
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = $name>>(iter: I) -> Self {
                Self(iter.map(|item| item.0).sum())
            }
        }

        impl std::ops::Mul<Dimensionless> for $name {
            type Output = $name;
            fn mul(self, rhs: Dimensionless) -> $name {
                $name::from(self.0 * rhs.0)
            }
        }

        impl std::ops::Mul<$name> for Dimensionless {
            type Output = $name;
            fn mul(self, rhs: $name) -> $name {
                $name::from(self.0 * rhs.0)
            }
        }

        impl std::ops::Div<Dimensionless> for $name {
            type Output = $name;
            fn div(self, rhs: Dimensionless) -> $name {
                $name::from(self.0 / rhs.0)
            }
        }
    };
}

macro_rules! impl_mul {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Mul<$Rhs> for $Lhs {
            type Output = $Out;
            fn mul(self, rhs: $Rhs) -> $Out {
                <$Out>::from(self.0 * rhs.0)
            }
        }
        impl std::ops::Mul<$Lhs> for $Rhs {
            type Output = $Out;
            fn mul(self, lhs: $Lhs) -> $Out {
                <$Out>::from(self.0 * lhs.0)
            }
        }
    };
}

macro_rules! impl_div {
    ($Lhs:ty, $Rhs:ty, $Out:ty) => {
        impl std::ops::Div<$Rhs> for $Lhs {
            type Output = $Out;
            fn div(self, rhs: $Rhs) -> $Out {
                <$Out>::from(self.0 / rhs.0)
            }
        }
    };
}

// Base quantities
unit_struct!(Power);
unit_struct!(Energy);
unit_struct!(Money);
unit_struct!(Hours);

// Derived quantities
unit_struct!(MoneyPerEnergy);
unit_struct!(MoneyPerPower);

// Multiplication rules
impl_mul!(Power, Hours, Energy);
impl_mul!(MoneyPerEnergy, Energy, Money);
impl_mul!(MoneyPerPower, Power, Money);

// Division rules
impl_div!(Energy, Hours, Power);
impl_div!(Money, Energy, MoneyPerEnergy);
impl_div!(Money, Power, MoneyPerPower);
impl_div!(Power, Power, Dimensionless);

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_power_times_hours_is_energy() {
        let energy: Energy = Power(5.0) * Hours(24.0);
        assert_approx_eq!(f64, energy.value(), 120.0);
    }

    #[test]
    fn test_cost_per_energy_times_energy_is_money() {
        let cost: Money = MoneyPerEnergy(25.0) * Energy(2.0);
        assert_approx_eq!(f64, cost.value(), 50.0);
    }

    #[test]
    fn test_ramp_fraction_of_capacity() {
        let max_step: Power = Power(5.0) * Dimensionless(0.1);
        assert_approx_eq!(f64, max_step.value(), 0.5);
        assert_approx_eq!(f64, f64::from(max_step / Power(5.0)), 0.1);
    }

    #[test]
    fn test_sum_of_quantities() {
        let total: Energy = [Energy(1.0), Energy(2.5)].into_iter().sum();
        assert_approx_eq!(f64, total.value(), 3.5);
    }
}
