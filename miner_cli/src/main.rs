use clap::{Args, Parser, Subcommand};
use miner_core::{derive_hash_hex, spin_once, spin_with_seeds, EngineParams, SpinOutcome, ThreadRandom};

#[derive(Parser)]
#[command(name = "miner-cli", about = "Replay and simulate pickaxe miner spins offline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Grid rows
    #[arg(long, global = true, env = "MINER_ROWS", default_value_t = 5)]
    rows: usize,
    /// Grid columns
    #[arg(long, global = true, env = "MINER_COLS", default_value_t = 5)]
    cols: usize,
}

#[derive(Args, Clone)]
struct SeedArgs {
    /// Secret server seed; omit for OS randomness
    #[arg(long)]
    server_seed: Option<String>,
    #[arg(long, default_value = "cli")]
    client_seed: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run or replay one spin and print it
    Spin {
        #[command(flatten)]
        seeds: SeedArgs,
        #[arg(long, default_value_t = 0)]
        nonce: u64,
    },
    /// Run N spins and print aggregate stats
    Simulate {
        #[command(flatten)]
        seeds: SeedArgs,
        #[arg(long, default_value_t = 10_000)]
        spins: u64,
    },
    /// Export simulated spins to CSV path
    ExportCsv {
        path: String,
        #[command(flatten)]
        seeds: SeedArgs,
        #[arg(long, default_value_t = 1_000)]
        spins: u64,
    },
}

fn spin_for(seeds: &SeedArgs, nonce: u64, params: &EngineParams) -> SpinOutcome {
    match &seeds.server_seed {
        Some(server_seed) => spin_with_seeds(server_seed, &seeds.client_seed, nonce, params),
        None => spin_once(&mut ThreadRandom, params),
    }
}

fn print_spin(outcome: &SpinOutcome) {
    for row in outcome.grid.tags() {
        let cells: Vec<String> = row.iter().map(|t| format!("{t:<8}")).collect();
        println!("{}", cells.join(" "));
    }
    for (i, c) in outcome.columns.iter().enumerate() {
        let chest = if c.chest_reached {
            format!("chest x{}", c.chest_multiplier)
        } else {
            "no chest".to_string()
        };
        println!(
            "col {}: {} power_left={} depth={} raw={} {} -> {}",
            i + 1,
            c.base_tier.label(),
            c.final_power,
            c.depth,
            c.raw_reward,
            chest,
            c.final_reward
        );
    }
    println!("gain={}", outcome.gain);
}

#[derive(Debug, Default)]
struct Stats {
    spins: u64,
    gain: u64,
    columns: u64,
    chests: u64,
    depth_histogram: Vec<u64>,
}

impl Stats {
    fn new(blocks: usize) -> Self {
        Self {
            depth_histogram: vec![0; blocks + 1],
            ..Self::default()
        }
    }

    fn record(&mut self, outcome: &SpinOutcome) {
        self.spins += 1;
        self.gain += outcome.gain;
        for c in &outcome.columns {
            self.columns += 1;
            if c.chest_reached {
                self.chests += 1;
            }
            if let Some(slot) = self.depth_histogram.get_mut(c.depth) {
                *slot += 1;
            }
        }
    }

    fn mean_depth(&self) -> f64 {
        let total: u64 = self
            .depth_histogram
            .iter()
            .enumerate()
            .map(|(d, n)| d as u64 * n)
            .sum();
        total as f64 / self.columns.max(1) as f64
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let params = EngineParams::with_dimensions(cli.rows, cli.cols)?;

    match cli.command {
        Commands::Spin { seeds, nonce } => {
            if let Some(server_seed) = &seeds.server_seed {
                println!(
                    "server_seed_hash={} client_seed={} nonce={}",
                    derive_hash_hex(server_seed.as_bytes()),
                    seeds.client_seed,
                    nonce
                );
            }
            print_spin(&spin_for(&seeds, nonce, &params));
        }
        Commands::Simulate { seeds, spins } => {
            let mut stats = Stats::new(params.blocks.len());
            for nonce in 0..spins {
                stats.record(&spin_for(&seeds, nonce, &params));
            }
            println!("spins={}", stats.spins);
            println!("mean_gain={:.4}", stats.gain as f64 / stats.spins.max(1) as f64);
            println!(
                "chest_rate={:.4}",
                stats.chests as f64 / stats.columns.max(1) as f64
            );
            println!("mean_depth={:.4}", stats.mean_depth());
            for (depth, n) in stats.depth_histogram.iter().enumerate() {
                println!("depth {:>2}: {}", depth, n);
            }
        }
        Commands::ExportCsv { path, seeds, spins } => {
            let mut wtr = csv::Writer::from_path(&path)?;
            wtr.write_record(["nonce", "gain", "chests", "depths", "reels"])?;
            for nonce in 0..spins {
                let outcome = spin_for(&seeds, nonce, &params);
                let chests = outcome.columns.iter().filter(|c| c.chest_reached).count();
                let depths: Vec<String> = outcome.columns.iter().map(|c| c.depth.to_string()).collect();
                let reels: Vec<String> = outcome.grid.tags().iter().map(|row| row.join(",")).collect();
                wtr.write_record(&[
                    nonce.to_string(),
                    outcome.gain.to_string(),
                    chests.to_string(),
                    depths.join(" "),
                    reels.join("|"),
                ])?;
            }
            wtr.flush()?;
            println!("Exported {} rows to {}", spins, path);
        }
    }

    Ok(())
}
