use anyhow::Result;
use hashbench::{run, Args};
use std::fs;
use std::path::Path;

#[test]
fn test_integration_full_run() -> Result<()> {
    // The report lands in the working directory under a title-derived name.
    let report_path = "test int bench".to_lowercase().replace(' ', "_") + ".txt";
    if Path::new(&report_path).exists() {
        fs::remove_file(&report_path)?;
    }

    // Low cost and a 1 ms target keep the real bcrypt search short.
    let args = Args {
        title: "Test Int Bench".to_string(),
        iterations: 3,
        min_cost: 4,
        target_ms: 1,
        password: "pw".to_string(),
    };
    run(args)?;

    let content = fs::read_to_string(&report_path)?;
    assert!(content.contains("Starting benchmark Test Int Bench"));
    assert!(content.contains("Iterations for average calculation: 3"));
    assert!(content.contains("Minimum salting rounds: 4"));
    assert!(content.contains("Minimum hashing time: 1000000 ns"));
    assert!(content.contains("Number of rounds: 4"));
    assert!(content.contains("Average: "));
    assert!(content.contains("---------------------"));
    assert!(content.contains("Stopping benchmark Test Int Bench"));

    let recommended: u32 = content
        .lines()
        .find_map(|l| l.strip_prefix("Recommended number of rounds: "))
        .expect("recommendation line missing")
        .parse()?;
    assert!((4..=31).contains(&recommended));

    fs::remove_file(&report_path)?;
    Ok(())
}

#[test]
fn test_integration_rejects_bad_config_before_writing() {
    let report_path = "test_int_invalid.txt";
    let _ = fs::remove_file(report_path);

    let args = Args {
        title: "Test Int Invalid".to_string(),
        iterations: 0,
        min_cost: 4,
        target_ms: 1,
        password: "pw".to_string(),
    };

    assert!(run(args).is_err());
    // Config errors must not leave a partial report behind.
    assert!(!Path::new(report_path).exists());
}
