use log::info;
use ndarray::array;
use tally::prelude::*;
use tally_bayes::{CategoricalNb, NaiveBayes, Result};

fn main() -> Result<()> {
    env_logger::init();

    // Ten cars described by colour, type and origin, labelled as stolen or not
    let dataset = tally_datasets::cars();

    // Train with the default smoothing of three virtual samples
    let model = CategoricalNb::<f64>::params().fit(&dataset)?;
    info!("priors {}", model.priors());

    // A red sports car made domestically and a red SUV made domestically
    for observation in [array![1, 0, 1], array![1, 1, 1]] {
        let result = model.classify(observation.view())?;
        let scores = model.scores(observation.view())?;

        // [1, 0, 1] -> Yes (Yes 0.0845947265625, No 0.0538330078125)
        // [1, 1, 1] -> No  (Yes 0.0384521484375, No 0.0692138671875)
        println!(
            "{} -> {} (Yes {}, No {})",
            observation, result.name, scores[1], scores[0]
        );
    }

    Ok(())
}
