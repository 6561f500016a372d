//! Clean-energy budget and station/truck energy accounting.

/// Finite pool of clean energy, drawn down by charging and never refilled.
///
/// # Examples
///
/// ```
/// use truck_charge_sim::sim::energy::CleanBudget;
///
/// let mut budget = CleanBudget::new(10.0);
/// assert_eq!(budget.draw(6.0), 6.0);
/// assert_eq!(budget.draw(6.0), 4.0);
/// assert!(budget.is_exhausted());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CleanBudget {
    total_kwh: f64,
    remaining_kwh: f64,
    exhausted: bool,
}

impl CleanBudget {
    /// Creates a budget of `total_kwh`. A zero budget starts exhausted.
    ///
    /// # Panics
    ///
    /// Panics if `total_kwh` is negative.
    pub fn new(total_kwh: f64) -> Self {
        assert!(total_kwh >= 0.0, "clean budget cannot be negative");
        Self {
            total_kwh,
            remaining_kwh: total_kwh,
            exhausted: total_kwh <= 0.0,
        }
    }

    /// Draws up to `kwh` and returns the amount granted.
    ///
    /// When the request meets or exceeds what is left, the remainder is
    /// granted and the budget becomes permanently exhausted.
    ///
    /// # Panics
    ///
    /// Panics if `kwh` is negative.
    pub fn draw(&mut self, kwh: f64) -> f64 {
        assert!(kwh >= 0.0, "cannot draw a negative amount ({kwh} kWh)");
        if self.exhausted {
            return 0.0;
        }
        if kwh >= self.remaining_kwh {
            let granted = self.remaining_kwh;
            self.remaining_kwh = 0.0;
            self.exhausted = true;
            granted
        } else {
            self.remaining_kwh -= kwh;
            kwh
        }
    }

    pub fn total_kwh(&self) -> f64 {
        self.total_kwh
    }

    pub fn remaining_kwh(&self) -> f64 {
        self.remaining_kwh
    }

    /// Clean energy handed out so far (kWh).
    pub fn consumed_kwh(&self) -> f64 {
        self.total_kwh - self.remaining_kwh
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Running totals of energy metered at the stations and absorbed by trucks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergyLedger {
    delivered_kwh: f64,
    received_kwh: f64,
}

impl EnergyLedger {
    /// Records one delivery: `delivered_kwh` left the station, `received_kwh`
    /// ended up in the battery.
    ///
    /// # Panics
    ///
    /// Panics if either amount is negative or the truck received more than
    /// was delivered.
    pub fn record(&mut self, delivered_kwh: f64, received_kwh: f64) {
        assert!(delivered_kwh >= 0.0 && received_kwh >= 0.0, "negative energy flow");
        assert!(
            received_kwh <= delivered_kwh,
            "truck received {received_kwh} kWh out of {delivered_kwh} kWh delivered"
        );
        self.delivered_kwh += delivered_kwh;
        self.received_kwh += received_kwh;
    }

    pub fn delivered_kwh(&self) -> f64 {
        self.delivered_kwh
    }

    pub fn received_kwh(&self) -> f64 {
        self.received_kwh
    }

    /// Share of station energy that never reached a battery, in percent.
    pub fn loss_pct(&self) -> f64 {
        if self.delivered_kwh > 0.0 {
            100.0 * (1.0 - self.received_kwh / self.delivered_kwh)
        } else {
            0.0
        }
    }
}
