use model::base_types::Cost;

use crate::Assignment;

/// Absolute tolerance for comparing assignment costs. Exact float equality
/// would let the search oscillate forever between candidates whose costs
/// differ only by rounding noise.
pub const COST_TOLERANCE: Cost = 1e-9;

pub fn costs_equal(a: Cost, b: Cost) -> bool {
    (a - b).abs() <= COST_TOLERANCE
}

/// True if `new_cost` beats `old_cost` by more than the tolerance.
pub fn cost_improves(new_cost: Cost, old_cost: Cost) -> bool {
    new_cost < old_cost - COST_TOLERANCE
}

/// An assignment together with its cached cost, so the search never scores
/// the same candidate twice.
#[derive(Clone)]
pub struct EvaluatedAssignment {
    assignment: Assignment,
    cost: Cost,
}

impl EvaluatedAssignment {
    pub fn evaluate(assignment: Assignment) -> EvaluatedAssignment {
        let cost = assignment.cost();
        EvaluatedAssignment { assignment, cost }
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::{default_assignment, init_test_data};

    #[test]
    fn comparisons_use_the_tolerance() {
        assert!(costs_equal(10.0, 10.0 + COST_TOLERANCE / 2.0));
        assert!(!costs_equal(10.0, 10.0 + 1e-6));

        assert!(cost_improves(9.0, 10.0));
        assert!(!cost_improves(10.0 - COST_TOLERANCE / 2.0, 10.0));
        assert!(!cost_improves(11.0, 10.0));
    }

    #[test]
    fn evaluation_caches_the_cost() {
        let d = init_test_data();
        let assignment = default_assignment(&d);
        let evaluated = EvaluatedAssignment::evaluate(assignment.clone());
        assert_eq!(evaluated.cost(), assignment.cost());
    }
}
