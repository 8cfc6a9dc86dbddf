// System status display — artifact location, corpus size, training info.

use anyhow::Result;

use crate::store::ModelStore;

/// Display model store status to the terminal.
pub fn show(store: &ModelStore) -> Result<()> {
    if !store.exists() {
        println!("Model artifact: not created yet");
        println!("  Path: {}", store.path().display());
        println!("\nRun `veridian train` (or any scoring command) to create it.");
        return Ok(());
    }

    let file_size = std::fs::metadata(store.path())
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Model artifact: {} ({})", store.path().display(), file_size);

    match store.load()? {
        Some(artifact) => {
            println!("Trained: {}", artifact.trained_at);
            println!(
                "Holdout accuracy: {:.0}%",
                artifact.holdout_accuracy * 100.0
            );
            println!(
                "Reference corpus: {} texts",
                artifact.reference_corpus.len()
            );
        }
        None => {
            println!("Artifact file exists but could not be loaded");
        }
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
