//! Command-line access to world generation: build demo graphs, generate worlds from graph files,
//! and fingerprint graphs.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod make_grid;

use anyhow::Result;
use structopt::StructOpt;

use abstutil::Timer;
use map_model::{Graph, GraphSnapshot, World, WorldConfig};

#[derive(StructOpt)]
#[structopt(name = "citygen", about = "Generates cities from road graphs")]
enum Command {
    /// Generates the world around a road graph and writes it as JSON
    Generate {
        /// The path to a graph, in the JSON snapshot format
        #[structopt(long)]
        input: String,
        /// The path to a JSON config. Missing fields take their defaults.
        #[structopt(long)]
        config: Option<String>,
        /// Overrides the config's seed for placing trees
        #[structopt(long)]
        rng_seed: Option<u64>,
        /// The path to write the world
        #[structopt(long)]
        output: String,
    },
    /// Prints the checksum of a graph file
    Checksum {
        #[structopt()]
        input: String,
    },
    /// Writes a rectangular grid of roads, handy for trying out generation
    Grid {
        /// Points along each axis
        #[structopt(long, default_value = "4")]
        size: usize,
        /// Distance between neighboring points
        #[structopt(long, default_value = "600")]
        spacing: f64,
        /// The path to write the graph
        #[structopt(long)]
        output: String,
    },
}

fn main() -> Result<()> {
    let cmd = Command::from_args();

    // Checksum's output is meant for scripts
    if !matches!(cmd, Command::Checksum { .. }) {
        abstutil::logger::setup();
    }

    match cmd {
        Command::Generate {
            input,
            config,
            rng_seed,
            output,
        } => generate(input, config, rng_seed, output)?,
        Command::Checksum { input } => {
            let graph = load_graph(&input)?;
            println!("{}", map_model::checksum(&graph));
        }
        Command::Grid {
            size,
            spacing,
            output,
        } => make_grid::run(size, spacing, output)?,
    }
    Ok(())
}

fn load_graph(path: &str) -> Result<Graph> {
    let snapshot: GraphSnapshot = abstutil::read_json(path)?;
    Graph::from_snapshot(&snapshot)
}

fn generate(
    input: String,
    config: Option<String>,
    rng_seed: Option<u64>,
    output: String,
) -> Result<()> {
    let mut timer = Timer::new(format!("generate world from {}", input));

    let graph = load_graph(&input)?;
    let mut cfg: WorldConfig = match config {
        Some(path) => abstutil::read_json(&path)?,
        None => WorldConfig::default(),
    };
    if let Some(seed) = rng_seed {
        cfg.rng_seed = seed;
    }
    info!(
        "Loaded {} points and {} segments",
        graph.num_points(),
        graph.segments().len()
    );

    let mut world = World::new(graph, cfg)?;
    world.generate(&mut timer);
    let num_warnings = timer.warnings().len();
    if num_warnings > 0 {
        warn!("{} problems while generating; see the summary below", num_warnings);
    }

    abstutil::write_json(&output, &world.to_snapshot())?;
    println!("Wrote {} (checksum {})", output, world.checksum());
    Ok(())
}
