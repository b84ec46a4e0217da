//! Signal ingestion commands

use anyhow::Result;
use innsikt_core::{split_into_sentences, InsightEngine, Reconciliation, Signal, SignalContext};

use crate::store::ChamberStore;

/// Add one signal (or, with `split`, one per sentence) to the chamber
#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    store: &ChamberStore,
    engine: &InsightEngine,
    text: &str,
    subject: &str,
    theme: &str,
    context: SignalContext,
    split: bool,
    json: bool,
) -> Result<()> {
    let mut chamber = store.load()?;

    let mut texts: Vec<String> = if split {
        split_into_sentences(text)
    } else {
        Vec::new()
    };
    if texts.is_empty() {
        texts.push(text.trim().to_string());
    }

    let mut outcomes = Vec::new();
    for t in &texts {
        let signal = Signal::from_message(t, subject, theme).with_context(context.clone());
        outcomes.push(engine.reconcile(&mut chamber, &signal));
    }

    store.save(&chamber)?;

    if json {
        let rows: Vec<serde_json::Value> = outcomes
            .iter()
            .map(|outcome| match outcome {
                Reconciliation::Created { insight_id } => serde_json::json!({
                    "outcome": "created",
                    "insight_id": insight_id,
                }),
                Reconciliation::Reinforced {
                    insight_id,
                    similarity,
                } => serde_json::json!({
                    "outcome": "reinforced",
                    "insight_id": insight_id,
                    "similarity": similarity,
                }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for (t, outcome) in texts.iter().zip(&outcomes) {
        match outcome {
            Reconciliation::Created { insight_id } => {
                println!("✨ New insight {insight_id}");
                println!("   \"{t}\"");
            }
            Reconciliation::Reinforced {
                insight_id,
                similarity,
            } => {
                println!("➕ Reinforced {insight_id} (similarity {similarity:.2})");
                println!("   \"{t}\"");
            }
        }
    }
    println!("Chamber now holds {} insight(s)", chamber.len());

    Ok(())
}
