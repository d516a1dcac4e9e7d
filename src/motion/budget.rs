// src/motion/budget.rs
use std::time::{Duration, Instant};
use thiserror::Error;

/// Why the relaxation loop was stopped before converging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BudgetExhausted {
    #[error("iteration limit reached")]
    Iterations,
    #[error("time limit reached")]
    Deadline,
}

/// Upper bound on the work the relaxation loop may do.
///
/// Always bounded by an iteration count; optionally also by a wall-clock
/// deadline checked at the start of every iteration.
#[derive(Debug, Clone)]
pub struct IterationBudget {
    max_iterations: u32,
    deadline: Option<Instant>,
    used: u32,
}

impl IterationBudget {
    pub fn new(max_iterations: u32) -> Self {
        Self {
            max_iterations,
            deadline: None,
            used: 0,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn with_time_limit(self, limit: Duration) -> Self {
        self.with_deadline(Instant::now() + limit)
    }

    /// Claim one iteration.
    pub fn try_begin_iteration(&mut self) -> Result<(), BudgetExhausted> {
        if self.used >= self.max_iterations {
            return Err(BudgetExhausted::Iterations);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(BudgetExhausted::Deadline);
            }
        }
        self.used += 1;
        Ok(())
    }

    /// Iterations claimed so far.
    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_limit() {
        let mut budget = IterationBudget::new(2);
        assert!(budget.try_begin_iteration().is_ok());
        assert!(budget.try_begin_iteration().is_ok());
        assert_eq!(budget.try_begin_iteration(), Err(BudgetExhausted::Iterations));
        assert_eq!(budget.used(), 2);
    }

    #[test]
    fn test_expired_deadline() {
        let mut budget = IterationBudget::new(10).with_deadline(Instant::now());
        assert_eq!(budget.try_begin_iteration(), Err(BudgetExhausted::Deadline));
        assert_eq!(budget.used(), 0);
    }

    #[test]
    fn test_earliest_deadline_wins() {
        let now = Instant::now();
        let budget = IterationBudget::new(1)
            .with_deadline(now + Duration::from_secs(60))
            .with_deadline(now);
        assert_eq!(budget.deadline, Some(now));
    }

    #[test]
    fn test_generous_time_limit() {
        let mut budget = IterationBudget::new(3).with_time_limit(Duration::from_secs(3600));
        for _ in 0..3 {
            assert!(budget.try_begin_iteration().is_ok());
        }
        assert_eq!(budget.try_begin_iteration(), Err(BudgetExhausted::Iterations));
    }
}
