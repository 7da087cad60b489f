use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use fson::export::node_info;
use fson::{
    export_dir, from_json, write_json, FsonTree, ImportOptions, Importer, LeafValue, LocalFs,
};

#[derive(Parser, Debug)]
#[command(name = "fson")]
#[command(version)]
#[command(about = "Map directory trees to JSON-like values and back", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import a directory and print it as JSON
    Show {
        #[command(flatten)]
        import: ImportArgs,
    },

    /// Import a directory and print the node at a path
    Get {
        #[command(flatten)]
        import: ImportArgs,

        /// Path segments: object keys or array indices
        segments: Vec<String>,

        /// Print a summary of the node instead of its value
        #[arg(long)]
        info: bool,
    },

    /// Build a directory tree from a JSON document
    Export {
        /// JSON file to read
        json: PathBuf,

        /// Directory to create the tree in
        out: PathBuf,

        /// Name of the top-level directory (default: the JSON file stem)
        #[arg(long)]
        name: Option<String>,
    },

    /// Import a directory and export it under another directory
    Copy {
        #[command(flatten)]
        import: ImportArgs,

        /// Directory to create the copy in
        out: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct ImportArgs {
    /// Directory to import
    path: PathBuf,

    /// Store file names instead of file contents in leaves
    #[arg(long)]
    names: bool,

    /// Maximum depth to import
    #[arg(short, long)]
    depth: Option<usize>,

    /// Follow symbolic links
    #[arg(short = 'L', long)]
    follow_links: bool,
}

impl ImportArgs {
    fn import(&self) -> Result<FsonTree> {
        let root_path = self.path.canonicalize().unwrap_or(self.path.clone());
        let leaf_value = if self.names {
            LeafValue::FileName
        } else {
            LeafValue::Content
        };

        let options = ImportOptions::new(root_path)
            .with_max_depth(self.depth)
            .with_follow_links(self.follow_links)
            .with_leaf_value(leaf_value);

        Importer::new(&LocalFs::new(), options)
            .import()
            .with_context(|| format!("could not import {}", self.path.display()))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Show { import } => {
            let tree = import.import()?;
            print_json(&tree, tree.root())
        }
        Command::Get {
            import,
            segments,
            info,
        } => run_get(&import, &segments, info),
        Command::Export { json, out, name } => run_export(json, out, name),
        Command::Copy { import, out } => {
            let tree = import.import()?;
            let path = export_dir(&tree, &out)
                .with_context(|| format!("could not export to {}", out.display()))?;
            eprintln!("Wrote {}", path.display());
            Ok(())
        }
    }
}

fn run_get(import: &ImportArgs, segments: &[String], info: bool) -> Result<()> {
    let tree = import.import()?;

    let Some(id) = tree.get(segments)? else {
        eprintln!("Not found: {}", segments.join("/"));
        println!("null");
        std::process::exit(1);
    };

    if info {
        let summary = node_info(&tree, id)?;
        serde_json::to_writer_pretty(io::stdout(), &summary)?;
        println!();
        Ok(())
    } else {
        print_json(&tree, id)
    }
}

fn run_export(json: PathBuf, out: PathBuf, name: Option<String>) -> Result<()> {
    let content = std::fs::read_to_string(&json)
        .with_context(|| format!("could not read {}", json.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("invalid JSON in {}", json.display()))?;

    let name = match name {
        Some(name) => name,
        None => json
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .ok_or_else(|| anyhow::anyhow!("cannot derive a name from {}", json.display()))?,
    };

    let tree = from_json(&name, &value)?;
    let path = export_dir(&tree, &out)
        .with_context(|| format!("could not export to {}", out.display()))?;
    eprintln!("Wrote {}", path.display());

    Ok(())
}

fn print_json(tree: &FsonTree, id: fson::NodeId) -> Result<()> {
    let mut stdout = io::stdout();
    write_json(tree, id, &mut stdout)?;
    println!(); // Final newline
    Ok(())
}
