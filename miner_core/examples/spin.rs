use miner_core::{spin_once, EngineParams, SeededRandom};

fn main() {
    // Example end-to-end spin
    let mut rng = SeededRandom::new("example-server-seed", "example-client-seed", 1);
    let params = EngineParams::standard();
    let outcome = spin_once(&mut rng, &params);
    println!("server_seed_hash={} gain={}", rng.server_seed_hash_hex(), outcome.gain);
    for row in outcome.grid.tags() {
        println!("{}", row.join(" "));
    }
    for (i, col) in outcome.columns.iter().enumerate() {
        println!(
            "col {}: {:?} depth={} chest={} x{} -> {}",
            i + 1,
            col.base_tier,
            col.depth,
            col.chest_reached,
            col.chest_multiplier,
            col.final_reward
        );
    }
}
