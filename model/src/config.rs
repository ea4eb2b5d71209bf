use std::time::Duration;

use crate::errors::PlanningError;

/// Parameters steering the stochastic local search.
#[derive(Debug, Clone)]
pub struct Config {
    /// Probability of keeping the current assignment when the best neighbor
    /// is worse than the current one.
    pub acceptance_probability: f64,

    /// Hard budget on search iterations.
    pub max_iterations: usize,

    /// Iterations without improvement of the overall best assignment before
    /// the search stops.
    pub max_global_stagnation: usize,

    /// Iterations without improvement of the local best assignment before a
    /// perturbation is applied.
    pub max_local_stagnation: usize,

    /// Number of cost-blind random steps performed per perturbation.
    pub perturbation_steps: usize,

    /// Wall-clock budget. Checked once per iteration; on expiry the search
    /// returns the best assignment found so far.
    pub time_limit: Option<Duration>,

    /// Seed for the random stream. Identical seed, configuration and inputs
    /// give an identical search trajectory.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            acceptance_probability: 0.5,
            max_iterations: 20_000,
            max_global_stagnation: 2_000,
            max_local_stagnation: 100,
            perturbation_steps: 2,
            time_limit: None,
            seed: None,
        }
    }
}

impl Config {
    pub fn with_acceptance_probability(mut self, p: f64) -> Self {
        self.acceptance_probability = p;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_max_global_stagnation(mut self, n: usize) -> Self {
        self.max_global_stagnation = n;
        self
    }

    pub fn with_max_local_stagnation(mut self, n: usize) -> Self {
        self.max_local_stagnation = n;
        self
    }

    pub fn with_perturbation_steps(mut self, n: usize) -> Self {
        self.perturbation_steps = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration. Runs before any search is started.
    pub fn validate(&self) -> Result<(), PlanningError> {
        if !self.acceptance_probability.is_finite()
            || !(0.0..=1.0).contains(&self.acceptance_probability)
        {
            return Err(PlanningError::InvalidConfig(format!(
                "acceptance_probability must be in [0, 1], got {}",
                self.acceptance_probability
            )));
        }
        if self.max_iterations == 0 {
            return Err(PlanningError::InvalidConfig(
                "max_iterations must be positive".into(),
            ));
        }
        if self.max_global_stagnation == 0 {
            return Err(PlanningError::InvalidConfig(
                "max_global_stagnation must be positive".into(),
            ));
        }
        if self.max_local_stagnation == 0 {
            return Err(PlanningError::InvalidConfig(
                "max_local_stagnation must be positive".into(),
            ));
        }
        if self.perturbation_steps == 0 {
            return Err(PlanningError::InvalidConfig(
                "perturbation_steps must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn acceptance_probability_must_be_a_probability() {
        assert!(Config::default()
            .with_acceptance_probability(1.5)
            .validate()
            .is_err());
        assert!(Config::default()
            .with_acceptance_probability(-0.1)
            .validate()
            .is_err());
        assert!(Config::default()
            .with_acceptance_probability(f64::NAN)
            .validate()
            .is_err());
        assert!(Config::default()
            .with_acceptance_probability(0.0)
            .validate()
            .is_ok());
        assert!(Config::default()
            .with_acceptance_probability(1.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn zero_bounds_are_rejected() {
        assert!(Config::default().with_max_iterations(0).validate().is_err());
        assert!(Config::default()
            .with_max_global_stagnation(0)
            .validate()
            .is_err());
        assert!(Config::default()
            .with_max_local_stagnation(0)
            .validate()
            .is_err());
        assert!(Config::default()
            .with_perturbation_steps(0)
            .validate()
            .is_err());
    }
}
