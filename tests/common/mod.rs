//! Common test utilities for tabprep integration tests.

#![allow(dead_code)]

use ndarray::Array1;
use rand::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tabprep::*;

/// Header of the synthetic passenger table
pub const TITANIC_HEADER: &str = "PassengerId,Survived,Pclass,Sex,Age,Fare,Embarked,Cabin";

/// Synthetic Titanic-like CSV with missing Age, Embarked and Cabin values.
///
/// Survival depends on sex and class so a linear model has signal to find.
pub fn titanic_csv(num_rows: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::from(TITANIC_HEADER);
    out.push('\n');

    for id in 1..=num_rows {
        let pclass = rng.gen_range(1..=3);
        let female = rng.gen_bool(0.4);
        let sex = if female { "female" } else { "male" };
        let age = if rng.gen_bool(0.2) {
            String::new()
        } else {
            format!("{:.0}", rng.gen_range(1.0..80.0))
        };
        let fare = match pclass {
            1 => rng.gen_range(30.0..250.0),
            2 => rng.gen_range(10.0..40.0),
            _ => rng.gen_range(5.0..20.0),
        };
        let embarked = if rng.gen_bool(0.02) {
            ""
        } else {
            ["S", "C", "Q"][rng.gen_range(0..3)]
        };
        let survival_odds = match (female, pclass) {
            (true, 1 | 2) => 0.9,
            (true, _) => 0.5,
            (false, 1) => 0.35,
            (false, _) => 0.12,
        };
        let survived = u8::from(rng.gen_bool(survival_odds));

        out.push_str(&format!(
            "{},{},{},{},{},{:.2},{},\n",
            id, survived, pclass, sex, age, fare, embarked
        ));
    }
    out
}

/// Features and `Survived` target of the synthetic table
pub fn titanic_dataset(num_rows: usize, seed: u64) -> (Dataset, Array1<f64>) {
    let data = CsvLoader::new()
        .load_reader(titanic_csv(num_rows, seed).as_bytes())
        .expect("synthetic CSV should parse");
    data.take_target("Survived")
        .expect("synthetic CSV has a numeric Survived column")
}

/// Small hand-written table with one missing Age and one unseen category path
pub fn tiny_passengers() -> (Dataset, Array1<f64>) {
    let x = Dataset::builder()
        .columns(["Age", "Sex", "Embarked"])
        .row([Value::from(22.0), Value::from("male"), Value::from("S")])
        .row([Value::Missing, Value::from("female"), Value::from("C")])
        .row([Value::from(30.0), Value::from("male"), Value::from("S")])
        .row([Value::from(41.0), Value::from("female"), Value::Missing])
        .row([Value::from(19.0), Value::from("male"), Value::from("Q")])
        .build()
        .expect("tiny table is rectangular");
    (x, Array1::from(vec![0.0, 1.0, 1.0, 1.0, 0.0]))
}

/// Write `content` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("temp file should be writable");
    path
}

/// Deterministic config for tests
pub fn test_config(test_fraction: f64, seed: u64) -> PreprocessorConfig {
    ConfigBuilder::new()
        .test_fraction(test_fraction)
        .seed(seed)
        .build()
        .expect("test config is valid")
}
