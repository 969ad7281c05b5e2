use tbatl_engine::game_structure::{GameBuilder, StateIdx, TurnBasedGame};

/// The train-gate controller. The train `t` approaches a gate controlled by `c`:
///
/// - q0: out of gate, the train may stay or request entry
/// - q1: entry requested, the controller may grant it, stall, or send the train back
/// - q2: entry granted, the train may enter or leave
/// - q3: in gate, the controller decides when the train leaves
pub fn train_gate() -> TurnBasedGame {
    let mut builder = GameBuilder::new();
    let q0 = builder.add_state("q0", ["oog"], "t");
    let q1 = builder.add_state("q1", ["oog", "req"], "c");
    let q2 = builder.add_state("q2", ["oog", "grant"], "t");
    let q3 = builder.add_state("q3", ["ig"], "c");
    builder
        .connect(q0, &[q0, q1])
        .connect(q1, &[q0, q1, q2])
        .connect(q2, &[q0, q3])
        .connect(q3, &[q0, q3]);
    builder.build().unwrap()
}

pub const Q0: StateIdx = StateIdx(0);
pub const Q1: StateIdx = StateIdx(1);
pub const Q2: StateIdx = StateIdx(2);
pub const Q3: StateIdx = StateIdx(3);
pub const ALL: [StateIdx; 4] = [Q0, Q1, Q2, Q3];
