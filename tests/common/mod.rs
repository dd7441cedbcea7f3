#[cfg(feature = "bench")]
pub mod bench;

use range_sum_tree::{SumTree, Value};
use rand::{self, Rng};

/// A plain vector doing the same operations as the tree, in linear time.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Naive {
    pub values: Vec<Value>,
}

impl Naive {
    pub fn update_range(&mut self, from: usize, to: usize, delta: Value) {
        for value in &mut self.values[from..=to] {
            *value += delta;
        }
    }

    pub fn sum_of_range(&self, from: usize, to: usize) -> Value {
        self.values[from..=to].iter().sum()
    }
}

/// Something to perform in one round of tests
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Update { index: usize, delta: Value },
    UpdateRange { from: usize, to: usize, delta: Value },
    Query { from: usize, to: usize },
}

/// The result after one round
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundResult {
    Updated,
    Sum(Value),
}

pub const MAX_ADD: Value = 200;

/// A random inclusive range inside `0..len`
pub fn random_range(rng: &mut rand::prelude::ThreadRng, len: usize) -> (usize, usize) {
    let res = (rng.gen_range(0..len), rng.gen_range(0..len));
    if res.0 <= res.1 {
        res
    } else {
        (res.1, res.0)
    }
}

pub fn random_round_action(rng: &mut rand::prelude::ThreadRng, len: usize) -> RoundAction {
    use RoundAction::*;
    match rng.gen_range(0..3) {
        0 => Update {
            index: rng.gen_range(0..len),
            delta: rng.gen_range(-MAX_ADD..=MAX_ADD),
        },
        1 => {
            let (from, to) = random_range(rng, len);
            UpdateRange {
                from,
                to,
                delta: rng.gen_range(-MAX_ADD..=MAX_ADD),
            }
        }
        _ => {
            let (from, to) = random_range(rng, len);
            Query { from, to }
        }
    }
}

/// Runs one round on the tree. The round must be valid for the tree.
pub fn run_round(round_action: &RoundAction, tree: &mut SumTree) -> RoundResult {
    use RoundAction::*;
    match *round_action {
        Update { index, delta } => {
            tree.update(index, delta).unwrap();
            RoundResult::Updated
        }
        UpdateRange { from, to, delta } => {
            tree.update_range(from, to, delta).unwrap();
            RoundResult::Updated
        }
        Query { from, to } => RoundResult::Sum(tree.sum_of_range(from, to).unwrap()),
    }
}

/// Runs the same round on the naive model.
pub fn run_round_naive(round_action: &RoundAction, naive: &mut Naive) -> RoundResult {
    use RoundAction::*;
    match *round_action {
        Update { index, delta } => {
            naive.values[index] += delta;
            RoundResult::Updated
        }
        UpdateRange { from, to, delta } => {
            naive.update_range(from, to, delta);
            RoundResult::Updated
        }
        Query { from, to } => RoundResult::Sum(naive.sum_of_range(from, to)),
    }
}

/// Runs `rounds` on both a tree and the naive model, checking that they agree after every round.
pub fn check_consistency_with(initial: &[Value], rounds: &[RoundAction]) {
    let mut tree = SumTree::new(initial).unwrap();
    let mut naive = Naive {
        values: initial.to_vec(),
    };

    for round in rounds {
        let res1 = run_round(round, &mut tree);
        let res2 = run_round_naive(round, &mut naive);
        assert_eq!(res1, res2, "results differ on round {:?}", round);
        assert_eq!(tree.total(), naive.values.iter().sum::<Value>());
    }
    assert_eq!(tree.values(), naive.values);
    tree.assert_correctness();
}

/// Random rounds on a tree of length `len`
pub fn check_consistency(len: usize) {
    const NUM_ROUNDS: usize = 2_000;
    let mut rng = rand::thread_rng();

    let initial: Vec<Value> = (0..len).map(|_| rng.gen_range(-MAX_ADD..=MAX_ADD)).collect();
    let rounds: Vec<RoundAction> = (0..NUM_ROUNDS)
        .map(|_| random_round_action(&mut rng, len))
        .collect();
    check_consistency_with(&initial, &rounds);
}
