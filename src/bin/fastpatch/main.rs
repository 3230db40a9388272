//! Fastpatch CLI - patch classification for quad-dominant meshes.
//!
//! Usage: fastpatch <COMMAND> [OPTIONS] <INPUT>
//!
//! Run `fastpatch --help` for available commands.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

use fastpatch::algo::batch::{classify_faces, classify_vertices, ClassStatistics};
use fastpatch::algo::one_ring::quad_one_ring_indices;
use fastpatch::algo::{ClassifyOptions, Reporter};
use fastpatch::io;
use fastpatch::mesh::HalfEdgeMesh;

#[derive(Parser)]
#[command(name = "fastpatch")]
#[command(author, version, about = "Patch classification CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display vertex and face classification statistics
    Info {
        /// Input mesh file
        input: PathBuf,

        /// Largest sharpness difference still treated as equal
        #[arg(long, default_value_t = f32::EPSILON)]
        sharpness_epsilon: f32,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },

    /// Print the 16 control point indices of every regular quad patch
    Indices {
        /// Input mesh file
        input: PathBuf,

        /// Base added to every vertex index
        #[arg(short, long, default_value = "0")]
        offset: u32,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info {
            input,
            sharpness_epsilon,
            sequential,
        } => {
            let options = ClassifyOptions::new()
                .with_sharpness_epsilon(sharpness_epsilon)
                .with_parallel(!sequential);
            cmd_info(&input, &options)?;
        }

        Commands::Indices { input, offset } => {
            cmd_indices(&input, offset)?;
        }
    }

    Ok(())
}

fn cmd_info(input: &PathBuf, options: &ClassifyOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mesh: HalfEdgeMesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Faces: {}", mesh.num_faces());
    println!("Half-edges: {}", mesh.num_halfedges());

    if mesh.is_quad_mesh() {
        println!("Mesh type: Quad mesh");
    } else {
        println!("Mesh type: Mixed polygon mesh");
    }

    let mode = if options.parallel { "parallel" } else { "sequential" };
    let start = Instant::now();
    let vertices = classify_vertices(&mesh, options);
    let faces = classify_faces(&mesh, options, &Reporter::default());
    log::info!("Classified mesh in {:.2?} ({})", start.elapsed(), mode);

    let stats = ClassStatistics::from_vertices(&vertices);
    println!("\nVertices:");
    println!("  Regular:       {}", stats.regular);
    println!("  Extraordinary: {}", stats.extraordinary);
    println!("  Boundary:      {}", stats.boundary);
    println!("  Corner:        {}", stats.corner);
    println!("  Unevaluable:   {}", stats.unevaluable);

    let creased = vertices.iter().filter(|s| s.crease_count > 0).count();
    println!("  With creases:  {}", creased);

    let on_boundary = faces.iter().filter(|f| f.boundary_vertices > 0).count();
    let nonregular = faces.iter().filter(|f| f.nonregular_boundary).count();
    let creased_faces = faces.iter().filter(|f| f.crease_edges > 0).count();
    let transition = faces.iter().filter(|f| f.transition.is_some()).count();
    let connected = faces
        .iter()
        .filter(|f| f.transition.is_some_and(|t| t.connected))
        .count();

    println!("\nFaces:");
    println!("  Touching boundary:   {}", on_boundary);
    println!("  Nonregular boundary: {}", nonregular);
    println!("  With crease edges:   {}", creased_faces);
    println!("  Transition patches:  {} ({} connected)", transition, connected);

    Ok(())
}

fn cmd_indices(input: &PathBuf, offset: u32) -> Result<(), Box<dyn std::error::Error>> {
    let mesh: HalfEdgeMesh = io::load(input)?;

    let mut printed = 0usize;
    for f in mesh.face_ids() {
        if mesh.face(f).valence != 4 || !mesh.face_vertices(f).all(|v| mesh.valence(v) == 4) {
            continue;
        }

        let indices = quad_one_ring_indices(&mesh, f, offset);
        let line: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
        println!("{}: {}", f.index(), line.join(" "));
        printed += 1;
    }

    log::info!("{} of {} faces are regular quad patches", printed, mesh.num_faces());

    Ok(())
}
