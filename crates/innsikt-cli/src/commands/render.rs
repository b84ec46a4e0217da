//! Text renderings of a topic: insight path, concept trail, synthesis,
//! and article draft

use anyhow::Result;
use innsikt_core::{
    concept_path_for_concept, concepts_for_theme, insights_for_topic, path_steps, Insight,
    InsightEngine, TopicStats,
};

use crate::store::ChamberStore;

/// Render the numbered insight path for a topic
pub fn cmd_path(
    store: &ChamberStore,
    subject: &str,
    theme: &str,
    steps: usize,
    json: bool,
) -> Result<()> {
    let chamber = store.load()?;
    let insights = insights_for_topic(&chamber, subject, theme);
    let path = path_steps(&insights, steps);

    if json {
        println!("{}", serde_json::to_string_pretty(&path)?);
        return Ok(());
    }

    println!("Sti for «{theme}»:");
    for step in &path {
        println!("   {step}");
    }

    Ok(())
}

/// List a topic's concepts, or trace one concept across its insights
pub fn cmd_concepts(
    store: &ChamberStore,
    subject: &str,
    theme: &str,
    concept: Option<&str>,
    steps: usize,
    json: bool,
) -> Result<()> {
    let chamber = store.load()?;

    if let Some(key) = concept {
        let insights = insights_for_topic(&chamber, subject, theme);
        let trail = concept_path_for_concept(&insights, key, steps);
        if json {
            println!("{}", serde_json::to_string_pretty(&trail)?);
        } else {
            println!("Begrepssti for «{key}» i «{theme}»:");
            for step in &trail {
                println!("   {step}");
            }
        }
        return Ok(());
    }

    let entries = concepts_for_theme(&chamber, subject, theme);
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No concepts for «{theme}» yet.");
        return Ok(());
    }

    println!("{:<20} {:>6}  EXAMPLES", "CONCEPT", "COUNT");
    println!("{}", "-".repeat(50));
    for entry in &entries {
        println!(
            "{:<20} {:>6}  {}",
            entry.key,
            entry.total_count,
            entry.examples.join(", ")
        );
    }

    Ok(())
}

/// Bullet-list synthesis of a topic's insights
pub(crate) fn synthesis_text(insights: &[&Insight], theme: &str) -> String {
    if insights.is_empty() {
        return "Ingen innsikter å lage syntese av ennå.".to_string();
    }

    let bullets: Vec<String> = insights.iter().map(|ins| format!("- {}", ins.summary)).collect();
    format!("Syntese for temaet {theme}:\n{}", bullets.join("\n"))
}

/// Article draft: stats header plus the five strongest insights
pub(crate) fn article_draft(insights: &[&Insight], stats: &TopicStats, theme: &str) -> String {
    if insights.is_empty() {
        return "Ingen innsikter å lage artikkel av ennå.".to_string();
    }

    let intro = format!(
        "Artikkelutkast for tema {theme} (basert på {} innsikter, metning {}/100, begrepstetthet {}/100):\n\n",
        stats.insight_count, stats.insight_saturation, stats.concept_density
    );

    let mut sorted: Vec<&Insight> = insights.to_vec();
    sorted.sort_by(|a, b| b.strength.total_score.cmp(&a.strength.total_score));

    let body: Vec<String> = sorted
        .iter()
        .take(5)
        .enumerate()
        .map(|(idx, ins)| format!("{}) {}", idx + 1, ins.summary))
        .collect();

    let outro = "\n\n→ Dette er et råutkast som senere kan skrives om til flytende tekst.";
    format!("{intro}{}{outro}", body.join("\n"))
}

pub fn cmd_synthesis(store: &ChamberStore, subject: &str, theme: &str) -> Result<()> {
    let chamber = store.load()?;
    let insights = insights_for_topic(&chamber, subject, theme);
    println!("{}", synthesis_text(&insights, theme));
    Ok(())
}

pub fn cmd_article(
    store: &ChamberStore,
    engine: &InsightEngine,
    subject: &str,
    theme: &str,
) -> Result<()> {
    let chamber = store.load()?;
    let insights = insights_for_topic(&chamber, subject, theme);
    let stats = engine.topic_stats(&chamber, subject, theme);
    println!("{}", article_draft(&insights, &stats, theme));
    Ok(())
}
