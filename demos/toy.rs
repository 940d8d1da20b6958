use graph_perceptron::data::toy_dataset;
use graph_perceptron::train::{evaluate, train_epoch};
use graph_perceptron::Network;

fn main() -> graph_perceptron::Result<()> {
    let dataset = toy_dataset();
    let mut network = Network::new(2, 2, 2)?;

    let rate = 0.3;
    let epochs = 200;

    for epoch in 0..epochs {
        let error = train_epoch(&mut network, &dataset, rate)?;
        if epoch % 20 == 0 {
            println!("Epoch {epoch}: error = {error:.6}");
        }
    }

    for sample in &dataset {
        let predicted = network.predict(&sample.features)?;
        println!(
            "Input: {:?} -> class {} (expected {}), outputs {:.4?}",
            sample.features,
            predicted,
            sample.class,
            network.outputs()
        );
    }

    let accuracy = evaluate(&mut network, &dataset)?;
    println!("Accuracy: {:.2}%", accuracy.percent());
    Ok(())
}
