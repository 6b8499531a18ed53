//! Algorithm enum for selecting the step implementation.
//!
//! Both variants produce identical generations and change records; they
//! differ only in how the lattice is scheduled across threads.

use serde::{Deserialize, Serialize};

/// Available step algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Single thread, x-major scan
    Serial,
    /// x-slabs evaluated on the rayon pool, concatenated in x order
    #[default]
    Parallel,
}

impl Algorithm {
    /// Get all available algorithms
    pub fn all() -> Vec<Algorithm> {
        vec![Algorithm::Serial, Algorithm::Parallel]
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Serial",
            Algorithm::Parallel => "Parallel",
        }
    }

    /// Short description
    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Cell by cell on the calling thread",
            Algorithm::Parallel => "One x-slab per rayon task",
        }
    }
}

impl std::str::FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::all()
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown algorithm '{s}', expected serial or parallel"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_parallel() {
        assert_eq!(Algorithm::default(), Algorithm::Parallel);
    }

    #[test]
    fn test_names_are_unique() {
        let names: Vec<_> = Algorithm::all().iter().map(|a| a.name()).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn test_parse() {
        assert_eq!("serial".parse::<Algorithm>().unwrap(), Algorithm::Serial);
        assert_eq!("Parallel".parse::<Algorithm>().unwrap(), Algorithm::Parallel);
        assert!("simd".parse::<Algorithm>().is_err());
    }
}
