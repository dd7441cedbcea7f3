use super::*;
extern crate test;
use test::Bencher;

const INITIAL_SIZE: usize = 1 << 16;

fn bench_rounds(b: &mut Bencher, len: usize) {
    let mut rng = rand::thread_rng();
    let initial: Vec<Value> = (0..len as Value).collect();
    let mut tree = SumTree::new(&initial).unwrap();
    b.iter(|| {
        let round_action = random_round_action(&mut rng, len);
        let res = run_round(&round_action, &mut tree);
        test::black_box(res);
    });
}

#[bench]
fn bench_random_rounds(b: &mut Bencher) {
    bench_rounds(b, INITIAL_SIZE)
}

#[bench]
fn bench_random_rounds_small(b: &mut Bencher) {
    bench_rounds(b, 100)
}

// range updates visit every leaf of the range, so this one is linear
#[bench]
fn bench_update_whole_range(b: &mut Bencher) {
    let initial: Vec<Value> = (0..INITIAL_SIZE as Value).collect();
    let mut tree = SumTree::new(&initial).unwrap();
    b.iter(|| {
        tree.update_range(0, INITIAL_SIZE - 1, 1).unwrap();
        test::black_box(tree.total());
    });
}

#[bench]
fn bench_query_whole_range(b: &mut Bencher) {
    let initial: Vec<Value> = (0..INITIAL_SIZE as Value).collect();
    let tree = SumTree::new(&initial).unwrap();
    b.iter(|| test::black_box(tree.sum_of_range(1, INITIAL_SIZE - 2)));
}
