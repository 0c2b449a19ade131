//! Text diagrams of circuits, one column per instruction. The AND circuit for inputs (1, 0):
//!
//! ```text
//!       ┌───┐  ░         ░
//! q_0: ─┤ X ├──░────■────░──────
//!       └───┘  ░    │    ░
//!              ░    │    ░
//! q_1: ────────░────■────░──────
//!              ░    │    ░
//!              ░  ┌─┴─┐  ░  ┌─┐
//! q_2: ────────░──┤ X ├──░──┤M├─
//!              ░  └───┘  ░  └╥┘
//!                            ║
//! c: 1/══════════════════════╩══
//!                            0
//! ```

use crate::circuit::{Circuit, Instruction};

const GATE_WIDTH: usize = 5;
const NARROW_WIDTH: usize = 3;

/// Three text rows making up one wire inside one column.
#[derive(Clone)]
struct Cell {
    top: String,
    mid: String,
    bot: String,
}

impl Cell {
    fn new(top: &str, mid: &str, bot: &str) -> Self {
        Self {
            top: top.to_string(),
            mid: mid.to_string(),
            bot: bot.to_string(),
        }
    }

    fn quantum_idle(w: usize) -> Self {
        Self::new(&" ".repeat(w), &"─".repeat(w), &" ".repeat(w))
    }

    fn classical_idle(w: usize) -> Self {
        Self::new(&" ".repeat(w), &"═".repeat(w), &" ".repeat(w))
    }

    fn boxed(label: &str, up: bool, down: bool) -> Self {
        Self::new(
            if up { "┌─┴─┐" } else { "┌───┐" },
            &format!("┤ {} ├", label),
            if down { "└─┬─┘" } else { "└───┘" },
        )
    }

    fn control(up: bool, down: bool) -> Self {
        Self::new(
            if up { "  │  " } else { "     " },
            "──■──",
            if down { "  │  " } else { "     " },
        )
    }

    fn crossing() -> Self {
        Self::new("  │  ", "──┼──", "  │  ")
    }
}

/// Draw `circuit` as text, one wire per qubit plus a classical wire if it has classical bits.
pub fn draw(circuit: &Circuit) -> String {
    let n = circuit.n_qubits();
    let has_clbits = circuit.n_clbits() > 0;

    let mut labels = (0..n).map(|i| format!("q_{}: ", i)).collect::<Vec<_>>();
    if has_clbits {
        labels.push(format!("c: {}/", circuit.n_clbits()));
    }
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let columns = circuit
        .instructions()
        .iter()
        .map(|inst| column(n, has_clbits, inst))
        .collect::<Vec<_>>();

    let mut lines = vec![];
    for (wire, label) in labels.iter().enumerate() {
        let wire_char = if wire == n { '═' } else { '─' };
        let pad = " ".repeat(label_width);
        let mut top = pad.clone();
        let mut mid = format!("{:>width$}", label, width = label_width);
        let mut bot = pad;
        for col in &columns {
            let cell = &col[wire];
            top.push(' ');
            mid.push(wire_char);
            bot.push(' ');
            top.push_str(&cell.top);
            mid.push_str(&cell.mid);
            bot.push_str(&cell.bot);
        }
        mid.push(wire_char);
        lines.push(top.trim_end().to_string());
        lines.push(mid);
        lines.push(bot.trim_end().to_string());
    }
    lines.join("\n")
}

/// Cells for every wire (qubits then the classical wire) for a single instruction.
fn column(n: usize, has_clbits: bool, inst: &Instruction) -> Vec<Cell> {
    let width = match inst {
        Instruction::Barrier { .. } | Instruction::Measure { .. } => NARROW_WIDTH,
        _ => GATE_WIDTH,
    };
    let mut cells = (0..n)
        .map(|_| Cell::quantum_idle(width))
        .collect::<Vec<_>>();
    let mut classical = Cell::classical_idle(width);

    match inst {
        Instruction::X { qubit } => cells[*qubit] = Cell::boxed("X", false, false),
        Instruction::H { qubit } => cells[*qubit] = Cell::boxed("H", false, false),
        Instruction::Cx { control, target } => {
            draw_controlled(&mut cells, &[*control], *target);
        }
        Instruction::Ccx { controls, target } => {
            draw_controlled(&mut cells, controls, *target);
        }
        Instruction::Barrier { qubits } => {
            qubits
                .iter()
                .for_each(|q| cells[*q] = Cell::new(" ░ ", "─░─", " ░ "));
        }
        Instruction::Measure { qubit, clbit } => {
            cells[*qubit] = Cell::new("┌─┐", "┤M├", "└╥┘");
            cells
                .iter_mut()
                .skip(qubit + 1)
                .for_each(|c| *c = Cell::new(" ║ ", "─╫─", " ║ "));
            classical = Cell::new(" ║ ", "═╩═", &format!("{:^3}", clbit));
        }
    }

    if has_clbits {
        cells.push(classical);
    }
    cells
}

fn draw_controlled(cells: &mut [Cell], controls: &[usize], target: usize) {
    let lo = controls.iter().copied().chain([target]).min().unwrap_or(target);
    let hi = controls.iter().copied().chain([target]).max().unwrap_or(target);
    for (i, cell) in cells.iter_mut().enumerate().take(hi + 1).skip(lo) {
        let (up, down) = (i > lo, i < hi);
        *cell = if controls.contains(&i) {
            Cell::control(up, down)
        } else if i == target {
            Cell::boxed("X", up, down)
        } else {
            Cell::crossing()
        };
    }
}
