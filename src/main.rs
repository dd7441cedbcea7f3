use range_sum_tree::{Result, SumTree};

// a small demonstration of the tree. Set `RUST_LOG=trace` to see every operation.
fn main() -> Result<()> {
    env_logger::init();

    let mut tree = SumTree::new(&[0, 3, 4, 2, 1, 6, -1])?;

    println!("{}", tree.sum_of_range(0, 3)?); // 9
    println!("{}", tree.sum_of_range(1, 5)?); // 16
    println!("{}", tree.sum_of_range(1, 6)?); // 15

    tree.update(3, 4)?; // [0, 3, 4, 6, 1, 6, -1]
    println!("{}", tree.sum_of_range(1, 3)?); // 13

    tree.update_range(3, 5, -2)?; // [0, 3, 4, 4, -1, 4, -1]
    println!("{}", tree.sum_of_range(1, 5)?); // 14
    println!("{}", tree.sum_of_range(0, 3)?); // 11

    tree.assert_correctness();
    Ok(())
}
