//! ArborDB command-line driver.
//!
//! Executes an operation script against a file-backed B-tree index and
//! writes search results plus a final level-order dump to an output file.
//!
//! ```bash
//! arbor operations.txt results.txt
//! arbor operations.txt results.txt --data-file /tmp/index.arbor -v
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use arbor_common::{ArborError, StoreConfig};
use arbor_index::{write_tree, BTree, NodeStore};

mod script;

use script::{parse_script, Op};

/// ArborDB script driver
#[derive(Parser, Debug)]
#[command(
    name = "arbor",
    version,
    about = "Runs an ArborDB operation script against a disk-backed B-tree index"
)]
struct Args {
    /// Operation script to execute
    input: PathBuf,

    /// File receiving search results and the final tree dump
    output: PathBuf,

    /// Index file backing the tree (recreated on every run)
    #[arg(long, default_value = "database.arbor")]
    data_file: PathBuf,

    /// Skip fsync on index writes
    #[arg(long)]
    no_fsync: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading script {}", args.input.display()))?;
    let script = parse_script(&text)?;
    info!(
        order = script.order,
        operations = script.ops.len(),
        "parsed operation script"
    );

    let config = StoreConfig {
        path: args.data_file.clone(),
        fsync_enabled: !args.no_fsync,
    };
    let mut tree = BTree::create(script.order, &config)
        .with_context(|| format!("creating index at {}", args.data_file.display()))?;

    let out = File::create(&args.output)
        .with_context(|| format!("creating output file {}", args.output.display()))?;
    let mut out = BufWriter::new(out);

    run_script(&mut tree, &script.ops, &mut out)?;
    out.flush()?;

    tree.destroy().context("tearing down the index")?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("arbor=debug,arbor_index=debug")
    } else {
        EnvFilter::new("arbor=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the parsed operations, writing search results as they happen and
/// the final dump at the end.
fn run_script<S: NodeStore>(
    tree: &mut BTree<S>,
    ops: &[Op],
    out: &mut impl Write,
) -> Result<()> {
    for op in ops {
        match *op {
            Op::Insert { key, value } => {
                tree.insert(key, value)?;
            }
            Op::Remove { key } => match tree.remove(key) {
                Ok(()) => {}
                Err(ArborError::KeyNotFound) => warn!(key, "remove: key not in tree"),
                Err(e) => return Err(e.into()),
            },
            Op::Search { key } => {
                if tree.search(key)?.is_some() {
                    writeln!(out, "O REGISTRO ESTA NA ARVORE!")?;
                } else {
                    writeln!(out, "O REGISTRO NAO ESTA NA ARVORE!")?;
                }
            }
            Op::Unknown { opcode } => {
                warn!(%opcode, "unsupported operation");
                writeln!(out, "OPERACAO NAO SUPORTADA!")?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "-- ARVORE B")?;
    write_tree(tree, out)?;
    Ok(())
}
