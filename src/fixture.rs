//! Fixtures for tests

use crate::demand::DemandSeries;
use crate::technology::Technology;
use crate::units::{MoneyPerEnergy, MoneyPerPower, Power};
use rstest::fixture;

/// A baseload-economics technology; variable cost 25 USD/MWh.
#[fixture]
pub fn nuclear() -> Technology {
    Technology::new("Nuclear", Power(5.0)).with_costs(
        MoneyPerPower(6.0),
        MoneyPerPower(50.0),
        MoneyPerEnergy(20.0),
        MoneyPerEnergy(5.0),
    )
}

/// A load-following technology; variable cost 32 USD/MWh.
#[fixture]
pub fn natural_gas() -> Technology {
    Technology::new("NaturalGas", Power(5.0)).with_costs(
        MoneyPerPower(1.0),
        MoneyPerPower(30.0),
        MoneyPerEnergy(12.0),
        MoneyPerEnergy(20.0),
    )
}

#[fixture]
pub fn fleet(nuclear: Technology, natural_gas: Technology) -> Vec<Technology> {
    vec![nuclear, natural_gas]
}

/// A demand profile whose largest upswing and downswing both exceed the ramp limits used in the
/// ramp-constraint tests, so the binding steps are exercised.
#[fixture]
pub fn net_demand() -> DemandSeries {
    DemandSeries::from(vec![2.0, 2.5, 3.5, 4.5, 4.0, 3.0, 2.0, 2.0])
}
