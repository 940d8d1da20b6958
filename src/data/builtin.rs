use crate::data::dataset::{Dataset, Sample};

/// Ten points in two linearly separable clusters; class 0 on the left,
/// class 1 on the right. Features are not normalized.
pub fn toy_dataset() -> Dataset {
    let rows: [(f64, f64, usize); 10] = [
        (2.7810836, 2.550537003, 0),
        (1.465489372, 2.362125076, 0),
        (3.396561688, 4.400293529, 0),
        (1.38807019, 1.850220317, 0),
        (3.06407232, 3.005305973, 0),
        (7.627531214, 2.759262235, 1),
        (5.332441248, 2.088626775, 1),
        (6.922596716, 1.77106367, 1),
        (8.675418651, -0.242068655, 1),
        (7.673756466, 3.508563011, 1),
    ];
    Dataset::new(
        rows.iter()
            .map(|&(x, y, class)| Sample { features: vec![x, y], class })
            .collect(),
    )
}
