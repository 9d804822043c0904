//! Goods consumption
//!
//! Houses use up pottery, furniture, oil and wine on the first day of each
//! month, and multi-tile houses a second time later in the month. Monument
//! modules stretch the interval between consumptions.

use crate::city::house::HousingUnit;
use crate::city::house_model::HouseModelTable;
use crate::city::inventory::Good;
use crate::city::modifiers::GlobalModifiers;
use crate::core::calendar::GameCalendar;
use crate::core::config::EngineConfig;

/// Whether today is a scheduled consumption day for this house
pub fn should_consume_today(house: &HousingUnit, calendar: &GameCalendar, config: &EngineConfig) -> bool {
    let day = calendar.day();
    day == 0 || (day == config.second_consumption_day && house.size > 1)
}

/// Whether a good with `reduction` percent savings is consumed this month
///
/// With a reduction the good is only used once every `100 / reduction`
/// months.
pub fn consumes_this_month(reduction: u32, total_months: u64) -> bool {
    if reduction == 0 {
        return true;
    }
    let interval = u64::from((100 / reduction).max(1));
    total_months % interval == 0
}

/// Deplete the house's goods by its tier's usage rates
///
/// Returns the total amount removed. Stock never drops below zero.
pub fn consume_resources(
    house: &mut HousingUnit,
    table: &HouseModelTable,
    modifiers: &GlobalModifiers,
    total_months: u64,
) -> u32 {
    let row = table.get(house.tier);
    let mut consumed = 0;
    for good in Good::GOODS {
        let usage = row.uses(good);
        if usage == 0 {
            continue;
        }
        let reduction = modifiers.consumption_reduction(house, good);
        if consumes_this_month(reduction, total_months) {
            consumed += house.inventory.remove(good, usage);
        }
    }
    consumed
}
