use super::{Cell, LifeError, MAX_NEIGHBORS};

/// Trait for 3D cellular automaton rules.
/// The engine only needs the per-cell transition, so alternative rule
/// families can be plugged in beside [`RuleSet`].
pub trait Rule: Send + Sync {
    /// Name of the rule
    fn name(&self) -> &'static str;

    /// Short human readable summary of the thresholds
    fn description(&self) -> String;

    /// Apply rule to compute next cell state
    fn evolve(&self, current: Cell, neighbors: u8) -> Cell;
}

/// One of the four tunable thresholds of a [`RuleSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Threshold {
    SurviveMin,
    SurviveMax,
    DeathAbove,
    DeathBelow,
}

impl Threshold {
    /// All thresholds in slider order (r1..r4)
    pub const ALL: [Threshold; 4] = [
        Threshold::SurviveMin,
        Threshold::SurviveMax,
        Threshold::DeathAbove,
        Threshold::DeathBelow,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Threshold::SurviveMin => "survive_min",
            Threshold::SurviveMax => "survive_max",
            Threshold::DeathAbove => "death_above",
            Threshold::DeathBelow => "death_below",
        }
    }
}

/// Four neighbor-count thresholds governing birth and death.
///
/// A dead cell is born when `survive_min <= c <= survive_max`. A live cell
/// dies when `c > death_above` or `c < death_below`. The two conditions are
/// evaluated independently; overlapping or inverted bands are legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleSet {
    survive_min: u8,
    survive_max: u8,
    death_above: u8,
    death_below: u8,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            survive_min: 4,
            survive_max: 10,
            death_above: 10,
            death_below: 4,
        }
    }
}

fn validate(threshold: Threshold, value: i64) -> Result<u8, LifeError> {
    if (0..=MAX_NEIGHBORS as i64).contains(&value) {
        Ok(value as u8)
    } else {
        Err(LifeError::InvalidRule {
            threshold: threshold.name(),
            value,
        })
    }
}

impl RuleSet {
    /// Build a rule set, rejecting any threshold outside [0, 26]
    pub fn new(
        survive_min: i64,
        survive_max: i64,
        death_above: i64,
        death_below: i64,
    ) -> Result<Self, LifeError> {
        Ok(Self {
            survive_min: validate(Threshold::SurviveMin, survive_min)?,
            survive_max: validate(Threshold::SurviveMax, survive_max)?,
            death_above: validate(Threshold::DeathAbove, death_above)?,
            death_below: validate(Threshold::DeathBelow, death_below)?,
        })
    }

    pub const fn survive_min(&self) -> u8 {
        self.survive_min
    }

    pub const fn survive_max(&self) -> u8 {
        self.survive_max
    }

    pub const fn death_above(&self) -> u8 {
        self.death_above
    }

    pub const fn death_below(&self) -> u8 {
        self.death_below
    }

    /// Current value of one threshold
    pub const fn get(&self, threshold: Threshold) -> u8 {
        match threshold {
            Threshold::SurviveMin => self.survive_min,
            Threshold::SurviveMax => self.survive_max,
            Threshold::DeathAbove => self.death_above,
            Threshold::DeathBelow => self.death_below,
        }
    }

    /// Update one threshold. On error the rule set is left untouched.
    pub fn set(&mut self, threshold: Threshold, value: i64) -> Result<(), LifeError> {
        let value = validate(threshold, value)?;
        let slot = match threshold {
            Threshold::SurviveMin => &mut self.survive_min,
            Threshold::SurviveMax => &mut self.survive_max,
            Threshold::DeathAbove => &mut self.death_above,
            Threshold::DeathBelow => &mut self.death_below,
        };
        *slot = value;
        Ok(())
    }

    /// Dead cell with `neighbors` live neighbors is born
    pub const fn births(&self, neighbors: u8) -> bool {
        self.survive_min <= neighbors && neighbors <= self.survive_max
    }

    /// Live cell with `neighbors` live neighbors dies
    pub const fn kills(&self, neighbors: u8) -> bool {
        neighbors > self.death_above || neighbors < self.death_below
    }
}

impl Rule for RuleSet {
    fn name(&self) -> &'static str {
        "Threshold"
    }

    fn description(&self) -> String {
        format!(
            "born {}..={}, dies >{} or <{}",
            self.survive_min, self.survive_max, self.death_above, self.death_below
        )
    }

    fn evolve(&self, current: Cell, neighbors: u8) -> Cell {
        match current {
            Cell::Dead if self.births(neighbors) => Cell::Alive,
            Cell::Alive if self.kills(neighbors) => Cell::Dead,
            unchanged => unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let rules = RuleSet::default();
        assert_eq!(rules, RuleSet::new(4, 10, 10, 4).unwrap());
        assert_eq!(rules.survive_min(), 4);
        assert_eq!(rules.survive_max(), 10);
        assert_eq!(rules.death_above(), 10);
        assert_eq!(rules.death_below(), 4);
    }

    #[test]
    fn test_out_of_range_rejected() {
        for position in 0..4 {
            for bad in [-1, 27] {
                let mut values = [4, 10, 10, 4];
                values[position] = bad;
                let err = RuleSet::new(values[0], values[1], values[2], values[3]).unwrap_err();
                assert_eq!(
                    err,
                    LifeError::InvalidRule {
                        threshold: Threshold::ALL[position].name(),
                        value: bad,
                    }
                );
            }
        }
    }

    #[test]
    fn test_boundary_values_accepted() {
        assert!(RuleSet::new(0, 0, 0, 0).is_ok());
        assert!(RuleSet::new(26, 26, 26, 26).is_ok());
        assert!(RuleSet::new(0, 26, 26, 0).is_ok());
    }

    #[test]
    fn test_set_validates_and_preserves() {
        let mut rules = RuleSet::default();
        rules.set(Threshold::SurviveMax, 12).unwrap();
        assert_eq!(rules.get(Threshold::SurviveMax), 12);

        assert!(rules.set(Threshold::DeathBelow, 27).is_err());
        assert!(rules.set(Threshold::DeathBelow, -1).is_err());
        assert_eq!(rules.get(Threshold::DeathBelow), 4);
    }

    #[test]
    fn test_default_decisions() {
        let rules = RuleSet::default();

        // Isolation
        assert_eq!(rules.evolve(Cell::Alive, 0), Cell::Dead);
        assert_eq!(rules.evolve(Cell::Alive, 3), Cell::Dead);

        // Survival band
        assert_eq!(rules.evolve(Cell::Alive, 4), Cell::Alive);
        assert_eq!(rules.evolve(Cell::Alive, 10), Cell::Alive);

        // Overcrowding
        assert_eq!(rules.evolve(Cell::Alive, 11), Cell::Dead);

        // Birth band is inclusive
        assert_eq!(rules.evolve(Cell::Dead, 3), Cell::Dead);
        assert_eq!(rules.evolve(Cell::Dead, 4), Cell::Alive);
        assert_eq!(rules.evolve(Cell::Dead, 10), Cell::Alive);
        assert_eq!(rules.evolve(Cell::Dead, 11), Cell::Dead);
    }

    #[test]
    fn test_inverted_death_band_evaluated_as_given() {
        // death_above < death_below: every count satisfies one side
        let rules = RuleSet::new(26, 26, 5, 8).unwrap();
        for c in 0..=26 {
            assert_eq!(rules.evolve(Cell::Alive, c), Cell::Dead, "count {}", c);
        }
    }

    #[test]
    fn test_birth_independent_of_death_band() {
        // Born at 2 even though a live cell at 2 would die
        let rules = RuleSet::new(2, 2, 26, 3).unwrap();
        assert_eq!(rules.evolve(Cell::Dead, 2), Cell::Alive);
        assert_eq!(rules.evolve(Cell::Alive, 2), Cell::Dead);
    }

    #[test]
    fn test_empty_birth_band() {
        let rules = RuleSet::new(10, 4, 26, 0).unwrap();
        for c in 0..=26 {
            assert_eq!(rules.evolve(Cell::Dead, c), Cell::Dead);
            assert_eq!(rules.evolve(Cell::Alive, c), Cell::Alive);
        }
    }
}
