//! starhull CLI - generate spaceship hull meshes from seeds.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::Rng;

use starhull::{GenConfig, MeshBuffer};

#[derive(Parser)]
#[command(name = "starhull")]
#[command(about = "Procedural spaceship hull generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a hull and export it (format determined by extension: .obj, .json)
    Generate {
        /// Generation seed
        #[arg(short, long)]
        seed: i32,
        /// Optional TOML file with generation parameters
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Share shading across face corners instead of hard seams
        #[arg(long)]
        smooth: bool,
        /// Output file (.obj or .json)
        output: PathBuf,
    },
    /// Display statistics for a seed without writing anything
    Info {
        /// Generation seed
        #[arg(short, long)]
        seed: i32,
        /// Optional TOML file with generation parameters
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print a fresh random seed
    Randomize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            seed,
            config,
            smooth,
            output,
        } => {
            let mut config = load_config(config.as_deref())?;
            if smooth {
                config.smooth_shading = true;
            }
            let buffer = starhull::generate_with(seed, &config)?;
            export(&buffer, &output)?;
            println!(
                "Exported seed {} to {} ({} vertices, {} triangles)",
                seed,
                output.display(),
                buffer.num_vertices(),
                buffer.num_triangles()
            );
        }
        Commands::Info { seed, config } => {
            let config = load_config(config.as_deref())?;
            let buffer = starhull::generate_with(seed, &config)?;
            show_info(seed, &buffer);
        }
        Commands::Randomize => {
            let seed: i32 = rand::thread_rng().gen_range(0..i32::MAX);
            println!("{seed}");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GenConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(GenConfig::default()),
    }
}

fn export(buffer: &MeshBuffer, output: &Path) -> Result<()> {
    match output.extension().and_then(|e| e.to_str()) {
        Some("obj") => {
            starhull::export::write_obj_file(buffer, output)
                .with_context(|| format!("writing {}", output.display()))?;
        }
        Some("json") => {
            let file = fs::File::create(output)
                .with_context(|| format!("creating {}", output.display()))?;
            serde_json::to_writer_pretty(file, buffer)
                .with_context(|| format!("writing {}", output.display()))?;
        }
        _ => bail!(
            "unsupported output format: {} (use .obj or .json)",
            output.display()
        ),
    }
    Ok(())
}

fn show_info(seed: i32, buffer: &MeshBuffer) {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for v in buffer.vertices.chunks(3) {
        for i in 0..3 {
            min[i] = min[i].min(v[i]);
            max[i] = max[i].max(v[i]);
        }
    }

    println!("seed:      {seed}");
    println!("vertices:  {}", buffer.num_vertices());
    println!("triangles: {}", buffer.num_triangles());
    println!(
        "bounds:    [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
        min[0], min[1], min[2], max[0], max[1], max[2]
    );

    let mut counts = std::collections::BTreeMap::new();
    for &m in &buffer.materials {
        *counts.entry(m).or_insert(0usize) += 1;
    }
    for (tag, count) in counts {
        let name = starhull::Material::from_tag(tag).map_or("unknown", starhull::Material::name);
        println!("material:  {name} x{count}");
    }
}
