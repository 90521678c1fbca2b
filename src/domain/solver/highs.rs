//! HiGHS solver backend via good_lp.
//!
//! HiGHS is a high-performance open-source linear programming solver.
//! This implementation wraps it using the good_lp crate for ergonomic
//! Rust usage.

use good_lp::solvers::highs::highs;
use good_lp::{constraint, variable, variables, Expression, Solution, SolverModel};

use super::{ConstraintSense, LpProblem, LpSolution, SolutionStatus, Solver};
use crate::error::Result;

/// HiGHS-based LP solver.
#[derive(Debug, Default, Clone)]
pub struct HighsSolver;

impl HighsSolver {
    /// Create a new HiGHS solver instance.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for HighsSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve_lp(&self, problem: &LpProblem) -> Result<LpSolution> {
        solve_with_good_lp(problem)
    }
}

fn solve_with_good_lp(problem: &LpProblem) -> Result<LpSolution> {
    let n = problem.num_vars();

    // Handle empty problem
    if n == 0 {
        return Ok(LpSolution {
            values: vec![],
            objective: 0.0,
            status: SolutionStatus::Optimal,
        });
    }

    // Create variables
    let mut vars = variables!();
    let mut var_list = Vec::with_capacity(n);

    for bounds in &problem.bounds {
        let mut v = variable();
        if let Some(lower) = bounds.lower {
            v = v.min(lower);
        }
        if let Some(upper) = bounds.upper {
            v = v.max(upper);
        }
        var_list.push(vars.add(v));
    }

    // Build objective function
    let objective: Expression = var_list
        .iter()
        .zip(problem.objective.iter())
        .map(|(v, c)| *c * *v)
        .sum();

    let mut model = vars.minimise(&objective).using(highs);

    // Add constraints
    for constr in &problem.constraints {
        let lhs: Expression = var_list
            .iter()
            .zip(constr.coefficients.iter())
            .map(|(v, c)| *c * *v)
            .sum();

        match constr.sense {
            ConstraintSense::GreaterEqual => {
                model = model.with(constraint!(lhs >= constr.rhs));
            }
            ConstraintSense::LessEqual => {
                model = model.with(constraint!(lhs <= constr.rhs));
            }
            ConstraintSense::Equal => {
                model = model.with(constraint!(lhs == constr.rhs));
            }
        }
    }

    match model.solve() {
        Ok(solution) => {
            let values: Vec<f64> = var_list.iter().map(|v| solution.value(*v)).collect();
            let objective = values
                .iter()
                .zip(problem.objective.iter())
                .map(|(v, c)| v * c)
                .sum();

            Ok(LpSolution {
                values,
                objective,
                status: SolutionStatus::Optimal,
            })
        }
        // good_lp returns an error for infeasible/unbounded
        Err(_) => Ok(LpSolution {
            values: vec![0.0; n],
            objective: 0.0,
            status: SolutionStatus::Infeasible,
        }),
    }
}
