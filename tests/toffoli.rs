use qperceptron::prelude::*;

// https://en.wikipedia.org/wiki/Quantum_logic_gate#Toffoli_(CCNOT)_gate
fn truth_table() -> Vec<((u8, u8, u8), (u8, u8, u8))> {
    vec![
        ((0, 0, 0), (0, 0, 0)),
        ((0, 0, 1), (0, 0, 1)),
        ((0, 1, 0), (0, 1, 0)),
        ((0, 1, 1), (0, 1, 1)),
        ((1, 0, 0), (1, 0, 0)),
        ((1, 0, 1), (1, 0, 1)),
        ((1, 1, 0), (1, 1, 1)),
        ((1, 1, 1), (1, 1, 0)),
    ]
}

#[test]
fn test_toffoli() -> Result<(), CircuitError> {
    let mut sim = StatevectorSimulator::<f64>::new(SimulatorConfig::default().with_seed(0))?;
    for (input, output) in truth_table() {
        // create a builder
        let mut b = LocalBuilder::new();

        // all qubits are initially in the 0 state
        let mut q1 = b.qubit();
        let mut q2 = b.qubit();
        let mut q3 = b.qubit();
        let cs = [b.classical_bit(), b.classical_bit(), b.classical_bit()];

        // change inputs as truth table
        if input.0 == 1 {
            q1 = b.not(q1);
        }
        if input.1 == 1 {
            q2 = b.not(q2);
        }
        if input.2 == 1 {
            q3 = b.not(q3);
        }

        // apply the Toffoli gate
        let (q1, q2, q3) = b.toffoli(q1, q2, q3)?;

        // add measurements to all the qubits
        b.measure(q1, cs[0])?;
        b.measure(q2, cs[1])?;
        b.measure(q3, cs[2])?;

        let counts = sim.run(&b.build()?, 16)?;

        // classical bit 0 is rightmost
        let expected = format!("{}{}{}", output.2, output.1, output.0);
        assert_eq!(counts.get(&expected), 16, "input {:?}", input);
    }

    Ok(())
}
