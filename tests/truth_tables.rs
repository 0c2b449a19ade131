use qperceptron::prelude::*;

fn seeded(seed: u64) -> Result<StatevectorSimulator<f64>, CircuitError> {
    StatevectorSimulator::new(SimulatorConfig::default().with_seed(seed))
}

fn predicted(
    gate: LogicGate,
    sim: &mut StatevectorSimulator<f64>,
) -> Result<Vec<bool>, CircuitError> {
    Ok(evaluate_truth_table(gate, sim, DEFAULT_SHOTS)?
        .iter()
        .map(Evaluation::output)
        .collect())
}

#[test]
fn test_and_truth_table() -> Result<(), CircuitError> {
    let mut sim = seeded(1)?;
    assert_eq!(predicted(LogicGate::And, &mut sim)?, vec![false, false, false, true]);
    Ok(())
}

#[test]
fn test_or_truth_table() -> Result<(), CircuitError> {
    let mut sim = seeded(2)?;
    assert_eq!(predicted(LogicGate::Or, &mut sim)?, vec![false, true, true, true]);
    Ok(())
}

#[test]
fn test_noiseless_counts_are_point_masses() -> Result<(), CircuitError> {
    let mut sim = StatevectorSimulator::<f64>::default();
    for gate in [LogicGate::And, LogicGate::Or] {
        for eval in evaluate_truth_table(gate, &mut sim, DEFAULT_SHOTS)? {
            assert!(eval.counts.is_point_mass());
            assert_eq!(eval.counts.total(), DEFAULT_SHOTS);
            assert_eq!(eval.counts.get(&eval.predicted), DEFAULT_SHOTS);
            let (a, b) = eval.inputs;
            assert_eq!(eval.output(), gate.classical(a, b));
        }
    }
    Ok(())
}

#[test]
fn test_same_inputs_same_counts() -> Result<(), CircuitError> {
    let mut sim = StatevectorSimulator::<f64>::default();
    for gate in [LogicGate::And, LogicGate::Or] {
        for (a, b) in INPUT_PAIRS {
            let first = gate.circuit(a, b)?;
            let second = gate.circuit(a, b)?;
            assert_eq!(first, second);
            assert_eq!(
                sim.run(&first, DEFAULT_SHOTS)?,
                sim.run(&second, DEFAULT_SHOTS)?
            );
        }
    }
    Ok(())
}

#[test]
fn test_majority_survives_readout_error() -> Result<(), CircuitError> {
    let config = SimulatorConfig::default()
        .with_seed(9)
        .with_readout_error(0.1);
    let mut sim = StatevectorSimulator::<f64>::new(config)?;
    for gate in [LogicGate::And, LogicGate::Or] {
        for eval in evaluate_truth_table(gate, &mut sim, DEFAULT_SHOTS)? {
            let (a, b) = eval.inputs;
            assert_eq!(eval.output(), gate.classical(a, b));
            assert!(!eval.counts.is_point_mass());
            assert_eq!(eval.counts.total(), DEFAULT_SHOTS);
        }
    }
    Ok(())
}

#[test]
fn test_report_lists_every_pair() -> Result<(), CircuitError> {
    let mut sim = seeded(3)?;
    let mut out = Vec::new();
    run_truth_table(LogicGate::And, &mut sim, DEFAULT_SHOTS, &mut out)?;
    let text = String::from_utf8(out).map_err(|e| CircuitError::new(e.to_string()))?;
    let headers = text
        .lines()
        .filter(|l| l.starts_with("--- Circuit for inputs"))
        .collect::<Vec<_>>();
    assert_eq!(
        headers,
        vec![
            "--- Circuit for inputs (0, 0) ---",
            "--- Circuit for inputs (0, 1) ---",
            "--- Circuit for inputs (1, 0) ---",
            "--- Circuit for inputs (1, 1) ---",
        ]
    );
    assert!(text.contains("Input: (1, 1) -> Predicted Output: 1"));
    assert!(text.contains("Measurement Counts: {'1': 1024}"));
    assert!(text.contains("Measurement Counts: {'0': 1024}"));
    assert!(text.contains("q_2: "));
    Ok(())
}
