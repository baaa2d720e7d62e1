use anyhow::{Context, Result};
use clap::Parser;
use flow_diagram_editor::{Editor, EditorConfig, ValidationSeverity};
use log::info;
use std::path::PathBuf;

/// Inspect and export server creation flow diagrams
#[derive(Parser, Debug)]
#[command(name = "flow_diagram_editor")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Diagram document to load; the bundled server creation flow otherwise
    document: Option<PathBuf>,

    /// Editor configuration file (JSON)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the diagram document into this directory
    #[arg(long = "export", value_name = "DIR")]
    export_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    println!("Flow Diagram Editor");
    println!("===================\n");

    let mut editor = match &args.document {
        Some(path) => {
            let mut editor = Editor::new(config);
            editor.load_from_file(path)?;
            println!("✓ Loaded {}", path.display());
            editor
        }
        None => {
            let editor = Editor::with_starter_diagram(config)
                .context("Bundled starter diagram is invalid")?;
            println!("✓ Loaded bundled server creation flow");
            editor
        }
    };
    editor.flush_pending();

    let stats = editor.document_stats()?;
    println!("\n📊 Diagram:");
    println!("  └─ Nodes: {}", stats.nodes);
    println!("  └─ Edges: {}", stats.edges);
    println!("  └─ Characters: {}", stats.characters);

    let result = editor.validate();
    println!("\n🔍 Validation:");
    if result.issues.is_empty() {
        println!("  └─ No issues");
    }
    for issue in &result.issues {
        let marker = match issue.severity {
            ValidationSeverity::Error => "❌",
            ValidationSeverity::Warning => "⚠️",
            ValidationSeverity::Info => "ℹ️",
        };
        println!("  └─ {} {}", marker, issue.message);
    }

    let rows = editor.specification_rows();
    println!("\n📋 Specification table ({} rows):", rows.len());
    for row in &rows {
        println!(
            "  └─ [{}] {} | audit: {} | billing: {}",
            row.section,
            row.label,
            row.audit_log.as_deref().unwrap_or("-"),
            row.billing.as_deref().unwrap_or("-")
        );
    }

    if let Some(dir) = &args.export_dir {
        let path = editor.save_to_dir(dir)?;
        println!("\n✓ Exported to {}", path.display());
    }

    info!("Done");
    Ok(())
}
