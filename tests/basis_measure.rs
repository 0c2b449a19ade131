use qperceptron::prelude::*;

fn assert_almost_eq(a: f64, b: f64, prec: i32) {
    let mult = 10.0f64.powi(prec);
    let (a, b) = (a * mult, b * mult);
    let (a, b) = (a.round(), b.round());
    assert_eq!(a / mult, b / mult);
}

#[test]
fn test_hadamard_splits_evenly() -> Result<(), CircuitError> {
    let mut b = LocalBuilder::new();
    let q = b.qubit();
    let c = b.classical_bit();
    let q = b.h(q);
    b.measure(q, c)?;
    let circuit = b.build()?;

    let mut sim = StatevectorSimulator::<f64>::new(SimulatorConfig::default().with_seed(17))?;
    let state = sim.statevector(&circuit)?;
    assert_almost_eq(state[0].norm_sqr(), 0.5, 10);
    assert_almost_eq(state[1].norm_sqr(), 0.5, 10);

    let counts = sim.run(&circuit, 4000)?;
    assert_eq!(counts.total(), 4000);
    assert!(counts.get("0") > 1800 && counts.get("0") < 2200);
    assert!(!counts.is_point_mass());
    Ok(())
}

#[test]
fn test_double_hadamard_is_identity() -> Result<(), CircuitError> {
    let mut b = LocalBuilder::new();
    let q = b.qubit();
    let c = b.classical_bit();
    let q = b.h(q);
    let q = b.h(q);
    b.measure(q, c)?;
    let circuit = b.build()?;

    let mut sim = StatevectorSimulator::<f64>::new(SimulatorConfig::default().with_seed(4))?;
    let counts = sim.run(&circuit, 256)?;
    assert_eq!(counts.get("0"), 256);
    Ok(())
}
