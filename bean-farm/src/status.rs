//! Status screen.

use std::fmt;

use bean_core::BeanSnapshot;

/// What the status screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Farmer's name.
    pub farmer_name: String,
    /// The Bean's observable state.
    pub bean: BeanSnapshot,
    /// Current day.
    pub day: u32,
    /// 1-based turn within the day.
    pub turn_of_day: u32,
    /// Turns per day.
    pub turns_per_day: u32,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "──────────────────")?;
        writeln!(f, "Farmer: {}", self.farmer_name)?;
        writeln!(f, "Bean:   {} ({})", self.bean.name, self.bean.personality)?;
        writeln!(
            f,
            "Day {} (turn {}/{})",
            self.day, self.turn_of_day, self.turns_per_day
        )?;
        writeln!(f)?;
        writeln!(f, "{:<10} : {}", "Energy", self.bean.energy)?;
        for (emotion, level) in &self.bean.emotions {
            writeln!(f, "{:<10} : {level}", emotion.label())?;
        }
        if self.bean.energy == 0 {
            writeln!(f, "{} has collapsed and needs healing.", self.bean.name)?;
        }
        write!(f, "──────────────────")
    }
}
