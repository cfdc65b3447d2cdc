extern crate mle_search;

use mle_search::objective::{bernoulli_likelihood, bernoulli_log_likelihood};
use mle_search::scalar::{
    GoldenRatioBuilder, GradientAscentBuilder, GridSearchBuilder, NewtonBuilder,
};
use mle_search::{BracketOptimizer, OptimError, Optimizer};

/// One head in three flips: every search should land on 1/3.
fn main() -> Result<(), OptimError> {
    let likelihood = bernoulli_likelihood(1, 3);
    let loglik = bernoulli_log_likelihood(1, 3);

    let grid = GridSearchBuilder::default().resolution(0.01).build().unwrap();
    println!("grid:     {}", grid.optimize(&likelihood, 0.0, 1.0)?);

    let golden = GoldenRatioBuilder::default().build().unwrap();
    println!("golden:   {}", golden.optimize(&loglik, 0.0, 1.0)?);

    let gradient = GradientAscentBuilder::default()
        .step_size(0.01)
        .domain((0.0, 1.0))
        .build()
        .unwrap();
    println!("gradient: {}", gradient.optimize(&loglik, 0.5)?);

    let newton = NewtonBuilder::default().domain((0.0, 1.0)).build().unwrap();
    println!("newton:   {}", newton.optimize(&loglik, 0.5)?);

    Ok(())
}
