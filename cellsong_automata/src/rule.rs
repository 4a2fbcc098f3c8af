// Rule configuration for the Generations automaton.
//
// All tunable automaton parameters live here in `RuleConfig`, supplied at
// engine construction. The engine never uses magic numbers — it reads from
// the config. Rule sets are plain neighbor-count lists checked with
// `contains`; with at most nine distinct counts (0..=8) a `Vec<u8>` scan
// beats any set structure.
//
// The named preset `generations()` carries the tuning the sequencer ships
// with: live on 2–4 neighbors, decay on 5–8, half-density seeding, eight
// decay steps from full to dead.
//
// See also: `cell.rs` for how `live_rule`/`die_rule`/`states` drive the
// per-cell transition, `engine.rs` which owns the config as part of
// `Automaton`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Complete automaton rule set — all parameters needed to seed and evolve
/// a grid. Immutable once handed to an engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Neighbor counts at which a dead cell is born at full state.
    pub live_rule: Vec<u8>,
    /// Neighbor counts at which a live cell decays by one step.
    pub die_rule: Vec<u8>,
    /// Probability in [0, 1] that a cell seeds with a nonzero state.
    pub density: f32,
    /// Number of discrete decay steps from full (1.0) to dead (0.0).
    pub states: u32,
    /// Generations per loop before every cell is restored to its seed.
    /// `None` runs free, never reseeding.
    pub loop_length: Option<u64>,
}

impl RuleConfig {
    /// The classic Generations tuning: birth on 2–4 live neighbors, decay
    /// on 5–8, half the cells seeded, eight-step decay.
    pub fn generations() -> Self {
        Self {
            live_rule: vec![2, 3, 4],
            die_rule: vec![5, 6, 7, 8],
            density: 0.5,
            states: 8,
            loop_length: None,
        }
    }

    /// Builder-style loop setting: reseed every `generations` sweeps.
    pub fn looped(mut self, generations: u64) -> Self {
        self.loop_length = Some(generations);
        self
    }

    /// Check every parameter. Called by `Automaton::new` before any cell
    /// is allocated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.states == 0 {
            return Err(ConfigError::ZeroStates);
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::DensityOutOfRange(self.density));
        }
        if self.loop_length == Some(0) {
            return Err(ConfigError::ZeroLoopLength);
        }
        for &count in self.live_rule.iter().chain(self.die_rule.iter()) {
            if count > 8 {
                return Err(ConfigError::RuleCountOutOfRange(count));
            }
        }
        Ok(())
    }

    /// State lost per decay generation: 1 / states.
    pub fn decay_step(&self) -> f32 {
        1.0 / self.states as f32
    }

    /// Whether a dead cell with this many live neighbors is born.
    pub fn births_at(&self, neighbors: u8) -> bool {
        self.live_rule.contains(&neighbors)
    }

    /// Whether a live cell with this many live neighbors decays.
    pub fn decays_at(&self, neighbors: u8) -> bool {
        self.die_rule.contains(&neighbors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_preset_is_valid() {
        let rules = RuleConfig::generations();
        assert!(rules.validate().is_ok());
        assert!(rules.births_at(3));
        assert!(!rules.births_at(5));
        assert!(rules.decays_at(5));
        assert!(!rules.decays_at(4));
        assert_eq!(rules.decay_step(), 0.125);
    }

    #[test]
    fn zero_states_rejected() {
        let rules = RuleConfig {
            states: 0,
            ..RuleConfig::generations()
        };
        assert_eq!(rules.validate(), Err(ConfigError::ZeroStates));
    }

    #[test]
    fn density_out_of_range_rejected() {
        let rules = RuleConfig {
            density: 1.5,
            ..RuleConfig::generations()
        };
        assert_eq!(
            rules.validate(),
            Err(ConfigError::DensityOutOfRange(1.5))
        );
        let rules = RuleConfig {
            density: -0.1,
            ..RuleConfig::generations()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn zero_loop_length_rejected() {
        let rules = RuleConfig::generations().looped(0);
        assert_eq!(rules.validate(), Err(ConfigError::ZeroLoopLength));
    }

    #[test]
    fn impossible_neighbor_count_rejected() {
        let rules = RuleConfig {
            live_rule: vec![2, 9],
            ..RuleConfig::generations()
        };
        assert_eq!(rules.validate(), Err(ConfigError::RuleCountOutOfRange(9)));
    }

    #[test]
    fn looped_builder_sets_length() {
        let rules = RuleConfig::generations().looped(16);
        assert_eq!(rules.loop_length, Some(16));
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn serde_roundtrip() {
        let rules = RuleConfig::generations().looped(4);
        let json = serde_json::to_string(&rules).unwrap();
        let back: RuleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(rules, back);
    }
}
