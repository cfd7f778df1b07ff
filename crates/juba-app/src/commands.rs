use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use juba_types::{Category, DictionaryEntry, Direction, EntryPatch, NewEntry};
use serde_json::Value;
use tokio::signal;

use crate::cli::Command;
use crate::controller::AppController;
use crate::state::AppState;

pub async fn run(command: Command, state: Arc<AppState>) -> anyhow::Result<()> {
    match command {
        Command::Serve { .. } => serve(state).await,
        Command::Translate { phrase, from } => translate(&state, &phrase.join(" "), from).await,
        Command::List { category, json } => list(&state, category, json).await,
        Command::Add {
            english,
            arabi_juba,
            category,
            notes,
        } => {
            let entry = NewEntry {
                english_phrase: english,
                arabi_juba_phrase: arabi_juba,
                category,
                notes,
                ..Default::default()
            };
            let stored = state.service.create(entry).await?;
            println!("Added {}", format_entry(&stored));
            Ok(())
        }
        Command::Update {
            id,
            english,
            arabi_juba,
            category,
            notes,
        } => {
            let patch = EntryPatch {
                english_phrase: english,
                arabi_juba_phrase: arabi_juba,
                category,
                notes,
                ..Default::default()
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to update, pass at least one field");
            }
            let updated = state.service.update(&id, patch).await?;
            println!("Updated {}", format_entry(&updated));
            Ok(())
        }
        Command::Delete { id } => {
            state.service.delete(&id).await?;
            println!("Entry deleted");
            Ok(())
        }
        Command::Import { file } => import(&state, &file).await,
    }
}

async fn serve(state: Arc<AppState>) -> anyhow::Result<()> {
    let controller = AppController::new(state);
    let listener = controller.bind().await?;
    let mut tasks = controller.spawn_tasks(listener);

    tokio::select! {
        result = signal::ctrl_c() => {
            result.context("failed to listen for ctrl+c")?;
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("server task exited"),
                Ok(Err(e)) => tracing::error!("server task failed: {e:#}"),
                Err(e) => tracing::error!("server task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while tasks.join_next().await.is_some() {}
    Ok(())
}

async fn translate(state: &AppState, phrase: &str, from: Direction) -> anyhow::Result<()> {
    let t = state.service.translate(phrase, from).await?;

    println!("{}", t.phrase(from.opposite()));
    if let Some(notes) = t.notes.filter(|n| !n.is_empty()) {
        println!("  note: {notes}");
    }
    Ok(())
}

async fn list(state: &AppState, category: Option<Category>, json: bool) -> anyhow::Result<()> {
    let entries: Vec<DictionaryEntry> = state
        .service
        .list()
        .await?
        .into_iter()
        .filter(|e| category.is_none_or(|c| e.category == c))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        println!("{}", format_entry(entry));
    }
    println!("{} entries", entries.len());
    Ok(())
}

async fn import(state: &AppState, file: &Path) -> anyhow::Result<()> {
    let data = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let records: Vec<Value> = serde_json::from_str(&data)
        .with_context(|| format!("{} is not a JSON array", file.display()))?;

    let (imported, skipped) = import_entries(state, records).await?;
    println!("Imported {imported} entries, skipped {skipped}");
    Ok(())
}

/// Inserts in file order. Invalid records are skipped, store failures abort.
pub async fn import_entries(
    state: &AppState,
    records: Vec<Value>,
) -> anyhow::Result<(usize, usize)> {
    let mut imported = 0;
    let mut skipped = 0;

    for (i, record) in records.into_iter().enumerate() {
        let entry: NewEntry = match serde_json::from_value(record) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping record {}: {}", i, e);
                skipped += 1;
                continue;
            }
        };

        match state.service.create(entry).await {
            Ok(_) => imported += 1,
            Err(e @ juba_core::DictionaryError::ValidationFailed { .. }) => {
                tracing::warn!("Skipping record {}: {}", i, e);
                skipped += 1;
            }
            Err(e) => return Err(e).context(format!("import stopped at record {i}")),
        }
    }

    Ok((imported, skipped))
}

fn format_entry(entry: &DictionaryEntry) -> String {
    let mut line = format!(
        "{}  {} = {}  [{}]",
        entry.id, entry.english_phrase, entry.arabi_juba_phrase, entry.category
    );
    if !entry.notes.is_empty() {
        line.push_str(&format!("  ({})", entry.notes));
    }
    line
}
