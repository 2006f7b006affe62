// Team selection and budget enforcement.
//
// Every operation is pure: it borrows the current selection and returns a
// new one (or an error), so a rejected operation can never leave a
// half-applied state behind. The remaining budget is always derived from
// the captured prices rather than tracked separately.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::config::LeagueRules;
use crate::money::Amount;

/// A driver on the team, with the price captured at selection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedDriver {
    pub id: String,
    pub name: String,
    pub price: Amount,
}

/// The selected constructor, with the price captured at selection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedConstructor {
    pub id: String,
    pub name: String,
    pub price: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("team already has {max} drivers")]
    SelectionFull { max: usize },

    #[error("not enough budget: short by {shortfall}")]
    BudgetExceeded { shortfall: Amount },

    #[error("unknown driver id: {0}")]
    UnknownDriver(String),

    #[error("unknown constructor id: {0}")]
    UnknownConstructor(String),

    #[error("incomplete team: {drivers} of {required_drivers} drivers, constructor set: {has_constructor}")]
    IncompleteTeam {
        drivers: usize,
        required_drivers: usize,
        has_constructor: bool,
    },

    #[error("duplicate driver on team: {0}")]
    DuplicateDriver(String),
}

/// A fantasy team in progress: up to `drivers_per_team` drivers plus one
/// constructor, all paid for out of a fixed budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSelection {
    rules: LeagueRules,
    drivers: Vec<SelectedDriver>,
    constructor: Option<SelectedConstructor>,
}

impl TeamSelection {
    /// An empty selection with the full budget available.
    pub fn new(rules: LeagueRules) -> Self {
        TeamSelection {
            rules,
            drivers: Vec::new(),
            constructor: None,
        }
    }

    pub fn rules(&self) -> LeagueRules {
        self.rules
    }

    pub fn drivers(&self) -> &[SelectedDriver] {
        &self.drivers
    }

    pub fn constructor(&self) -> Option<&SelectedConstructor> {
        self.constructor.as_ref()
    }

    /// Whether a driver is on the team.
    pub fn contains_driver(&self, id: &str) -> bool {
        self.drivers.iter().any(|d| d.id == id)
    }

    /// Budget left after every selected driver and the constructor are paid
    /// for. Exact: prices are tenths of a million, so no rounding happens
    /// anywhere between here and the accept/reject decision.
    pub fn remaining_budget(&self) -> Amount {
        let spent: Amount = self.drivers.iter().map(|d| d.price).sum::<Amount>()
            + self.constructor.as_ref().map_or(Amount::ZERO, |c| c.price);
        self.rules.total_budget - spent
    }

    /// The remaining budget as a one-decimal value for display ("21.0").
    pub fn display_budget(&self) -> rust_decimal::Decimal {
        self.remaining_budget().to_decimal().round_dp(1)
    }

    /// Add the driver if absent, remove it if present.
    ///
    /// Adding fails with `SelectionFull` when the team already has its full
    /// driver count, and with `BudgetExceeded` when the driver's price does
    /// not fit the remaining budget. Either way the original selection is
    /// untouched. Removing always succeeds and frees the driver's price.
    pub fn toggle_driver(
        &self,
        catalog: &Catalog,
        driver_id: &str,
    ) -> Result<TeamSelection, SelectionError> {
        let driver = catalog
            .driver(driver_id)
            .ok_or_else(|| SelectionError::UnknownDriver(driver_id.to_string()))?;

        if self.contains_driver(driver_id) {
            let mut next = self.clone();
            next.drivers.retain(|d| d.id != driver_id);
            return Ok(next);
        }

        if self.drivers.len() == self.rules.drivers_per_team {
            return Err(SelectionError::SelectionFull {
                max: self.rules.drivers_per_team,
            });
        }

        let after = self.remaining_budget() - driver.price;
        if after.is_negative() {
            return Err(SelectionError::BudgetExceeded {
                shortfall: Amount::ZERO - after,
            });
        }

        let mut next = self.clone();
        next.drivers.push(SelectedDriver {
            id: driver.id.clone(),
            name: driver.name.clone(),
            price: driver.price,
        });
        Ok(next)
    }

    /// Set (or replace) the constructor.
    ///
    /// A previously selected constructor is refunded before the new one is
    /// charged; if the new price still does not fit, the operation fails
    /// with `BudgetExceeded` and the previous constructor stays in place.
    pub fn set_constructor(
        &self,
        catalog: &Catalog,
        constructor_id: &str,
    ) -> Result<TeamSelection, SelectionError> {
        let constructor = catalog
            .constructor(constructor_id)
            .ok_or_else(|| SelectionError::UnknownConstructor(constructor_id.to_string()))?;

        let refunded = self.remaining_budget()
            + self.constructor.as_ref().map_or(Amount::ZERO, |c| c.price);
        let after = refunded - constructor.price;
        if after.is_negative() {
            return Err(SelectionError::BudgetExceeded {
                shortfall: Amount::ZERO - after,
            });
        }

        let mut next = self.clone();
        next.constructor = Some(SelectedConstructor {
            id: constructor.id.clone(),
            name: constructor.name.clone(),
            price: constructor.price,
        });
        Ok(next)
    }

    /// Remove the constructor, refunding its price.
    pub fn clear_constructor(&self) -> TeamSelection {
        let mut next = self.clone();
        next.constructor = None;
        next
    }

    /// Check that the team is ready to submit: the exact driver count, all
    /// distinct, plus a constructor, within budget.
    ///
    /// A selection built only through `toggle_driver`/`set_constructor`
    /// cannot fail the budget check; it matters for values deserialized or
    /// assembled by hand.
    pub fn validate(&self) -> Result<(), SelectionError> {
        for (i, driver) in self.drivers.iter().enumerate() {
            if self.drivers[..i].iter().any(|d| d.id == driver.id) {
                return Err(SelectionError::DuplicateDriver(driver.id.clone()));
            }
        }

        if self.drivers.len() != self.rules.drivers_per_team || self.constructor.is_none() {
            return Err(SelectionError::IncompleteTeam {
                drivers: self.drivers.len(),
                required_drivers: self.rules.drivers_per_team,
                has_constructor: self.constructor.is_some(),
            });
        }

        let remaining = self.remaining_budget();
        if remaining.is_negative() {
            return Err(SelectionError::BudgetExceeded {
                shortfall: Amount::ZERO - remaining,
            });
        }

        Ok(())
    }

    /// Rebuild a selection from stored driver/constructor ids, replaying
    /// them through the normal operations so every invariant (known ids,
    /// cardinality, budget) is re-enforced on restore.
    pub fn from_saved(
        catalog: &Catalog,
        rules: LeagueRules,
        driver_ids: &[&str],
        constructor_id: &str,
    ) -> Result<TeamSelection, SelectionError> {
        let mut selection = TeamSelection::new(rules);
        for id in driver_ids {
            if selection.contains_driver(id) {
                return Err(SelectionError::DuplicateDriver(id.to_string()));
            }
            selection = selection.toggle_driver(catalog, id)?;
        }
        selection = selection.set_constructor(catalog, constructor_id)?;
        selection.validate()?;
        Ok(selection)
    }
}
