use tally::prelude::*;
use tally_bayes::{cross_validate, par_cross_validate, CategoricalNb, CategoricalNbParams, Result};

fn main() -> Result<()> {
    env_logger::init();

    let dataset = tally_datasets::cars();
    let params = CategoricalNbParams::<f64>::new().smoothing(1.0).check()?;

    // Leave-one-out on the ten cars
    let mut model = CategoricalNb::new(params.clone(), &dataset, 0)?;
    let result = cross_validate(&mut model, dataset.nsamples())?;

    println!("{:?}", result.confusion[0]);
    println!(
        "leave-one-out: {} of {} correct, accuracy {}",
        result.correct(),
        result.total(),
        result.accuracy()
    );

    // Five folds, one freshly built classifier per fold
    let result = par_cross_validate(&dataset, 5, |ds| CategoricalNb::new(params.clone(), ds, 0))?;
    println!("five folds: {:?}", result.fold_accuracies());

    Ok(())
}
