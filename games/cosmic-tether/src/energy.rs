//! Bounded grab energy: spent on each grab, refilled a little every tick.

use crate::config::EnergyConfig;
use crate::error::TetherError;

#[derive(Debug, Clone)]
pub struct EnergyMeter {
    value: f32,
    max: f32,
    regen: f32,
}

impl EnergyMeter {
    /// Full meter.
    pub fn new(max: f32, regen: f32) -> Self {
        Self { value: max, max, regen }
    }

    pub fn from_config(cfg: &EnergyConfig) -> Self {
        Self::new(cfg.max, cfg.regen)
    }

    /// Adopt new limits, keeping the current balance within them.
    pub fn reconfigure(&mut self, cfg: &EnergyConfig) {
        self.max = cfg.max;
        self.regen = cfg.regen;
        self.value = self.value.clamp(0.0, self.max);
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Balance in [0, 1].
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.value / self.max).clamp(0.0, 1.0)
    }

    pub fn refill(&mut self) {
        self.value = self.max;
    }

    /// One tick of passive regeneration.
    pub fn regenerate(&mut self) {
        self.value = (self.value + self.regen).min(self.max);
    }

    /// Deduct `cost` if the balance covers it; otherwise leave it untouched.
    pub fn try_spend(&mut self, cost: f32) -> Result<(), TetherError> {
        if self.value < cost {
            return Err(TetherError::ResourceUnavailable {
                needed: cost,
                available: self.value,
            });
        }
        self.value = (self.value - cost).max(0.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grabs_deduct_cost() {
        let mut meter = EnergyMeter::new(100.0, 0.16);
        meter.try_spend(12.0).unwrap();
        assert!((meter.value() - 88.0).abs() < 1e-4);
        for _ in 0..4 {
            meter.try_spend(12.0).unwrap();
        }
        assert!((meter.value() - 40.0).abs() < 1e-4);
    }

    #[test]
    fn insufficient_energy_leaves_balance() {
        let mut meter = EnergyMeter::new(100.0, 0.16);
        for _ in 0..8 {
            meter.try_spend(12.0).unwrap();
        }
        let before = meter.value();
        let err = meter.try_spend(12.0).unwrap_err();
        assert!(matches!(err, TetherError::ResourceUnavailable { .. }));
        assert_eq!(meter.value(), before);
    }

    #[test]
    fn regen_restores_grab_ability() {
        let mut meter = EnergyMeter::new(100.0, 0.16);
        for _ in 0..8 {
            meter.try_spend(12.0).unwrap();
        }
        // 4 left, 8 short: 50 ticks of 0.16
        for _ in 0..49 {
            meter.regenerate();
        }
        assert!(meter.try_spend(12.0).is_err());
        meter.regenerate();
        meter.regenerate();
        assert!(meter.try_spend(12.0).is_ok());
    }

    #[test]
    fn regen_clamps_at_max() {
        let mut meter = EnergyMeter::new(100.0, 0.16);
        for _ in 0..100 {
            meter.regenerate();
        }
        assert_eq!(meter.value(), 100.0);
        assert_eq!(meter.fraction(), 1.0);
    }

    #[test]
    fn reconfigure_clamps_balance() {
        let mut meter = EnergyMeter::new(100.0, 0.16);
        meter.reconfigure(&EnergyConfig { max: 50.0, grab_cost: 12.0, regen: 1.0 });
        assert_eq!(meter.value(), 50.0);
        assert_eq!(meter.max(), 50.0);
    }
}
