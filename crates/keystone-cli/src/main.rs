use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dialoguer::Input;
use dotenvy::dotenv;
use keystone_cli::editor::{Editor, EditorCommand};
use keystone_cli::render::render_tree;
use keystone_config::CatalogConfig;
use keystone_core::catalog::PermissionCatalog;
use keystone_core::projection::{build_tree, extract_granted, granted_count};
use keystone_core::tree::PermissionTree;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keystone-cli")]
#[command(about = "Keystone CLI - Inspect and edit role permission trees", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the permission tree for a set of granted permissions
    Show {
        /// Catalog JSON file (defaults to PERMISSION_CATALOG_PATH or the built-in catalog)
        #[arg(short = 'c', long)]
        catalog: Option<PathBuf>,

        /// Granted leaf permission id (repeatable)
        #[arg(short = 'g', long = "grant")]
        grants: Vec<String>,
    },
    /// Interactively toggle nodes and print the resulting grants as JSON
    Edit {
        /// Catalog JSON file (defaults to PERMISSION_CATALOG_PATH or the built-in catalog)
        #[arg(short = 'c', long)]
        catalog: Option<PathBuf>,

        /// Granted leaf permission id to start from (repeatable)
        #[arg(short = 'g', long = "grant")]
        grants: Vec<String>,
    },
    /// Validate a catalog file
    CheckCatalog {
        /// Catalog JSON file
        #[arg(short = 'c', long)]
        catalog: PathBuf,
    },
}

fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { catalog, grants } => handle_show(catalog, grants),
        Commands::Edit { catalog, grants } => handle_edit(catalog, grants),
        Commands::CheckCatalog { catalog } => handle_check_catalog(catalog),
    }
}

fn load_catalog(path: Option<PathBuf>) -> Arc<PermissionCatalog> {
    let config = match path {
        Some(path) => CatalogConfig { path: Some(path) },
        None => CatalogConfig::from_env(),
    };

    match config.load() {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            eprintln!("❌ Error loading permission catalog: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_stale(tree: &PermissionTree) {
    if !tree.stale_grants().is_empty() {
        eprintln!(
            "⚠️  Ignored grants not in the catalog: {}",
            tree.stale_grants().join(", ")
        );
    }
}

fn handle_show(catalog: Option<PathBuf>, grants: Vec<String>) {
    let tree = build_tree(load_catalog(catalog), &grants);
    print_stale(&tree);

    print!("{}", render_tree(&tree));
    println!("\n{} permission(s) granted", granted_count(&tree));
}

fn handle_edit(catalog: Option<PathBuf>, grants: Vec<String>) {
    let tree = build_tree(load_catalog(catalog), &grants);
    print_stale(&tree);

    let mut editor = Editor::new(tree, grants);
    println!("Enter a node id to toggle it, :all, :none, :reset, or a blank line to finish.\n");

    loop {
        print!("{}", render_tree(editor.tree()));
        println!("{} selected\n", granted_count(editor.tree()));

        let line: String = match Input::new()
            .with_prompt("Toggle")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(e) => {
                eprintln!("\n❌ Error reading input: {}", e);
                std::process::exit(1);
            }
        };

        match editor.apply(&EditorCommand::parse(&line)) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("❌ {}\n", e),
        }
    }

    let granted: Vec<String> = extract_granted(&editor.into_tree()).into_iter().collect();
    match serde_json::to_string_pretty(&granted) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("\n❌ Error encoding permissions: {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_check_catalog(path: PathBuf) {
    match PermissionCatalog::from_json_file(&path) {
        Ok(catalog) => {
            println!("✅ Catalog is valid: {}", path.display());
            println!("   Nodes: {}", catalog.len());
            println!("   Leaves: {}", catalog.leaf_ids().count());
        }
        Err(e) => {
            eprintln!("❌ Invalid catalog {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}
