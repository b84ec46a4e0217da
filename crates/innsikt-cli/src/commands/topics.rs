//! Topic overview, statistics, and insight listing commands

use anyhow::Result;
use innsikt_core::{insights_for_topic, InsightEngine};

use crate::store::ChamberStore;

/// List every (subject, theme) topic with its headline numbers
pub fn cmd_topics(store: &ChamberStore, engine: &InsightEngine, json: bool) -> Result<()> {
    let chamber = store.load()?;
    let overview = engine.topics_overview(&chamber);

    if json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
        return Ok(());
    }

    if overview.is_empty() {
        println!("No topics yet. Add a signal first: innsikt add \"...\" -s <subject> -t <theme>");
        return Ok(());
    }

    println!(
        "{:<15} {:<15} {:>8} {:>10} {:>8}  ARTIFACT",
        "SUBJECT", "THEME", "INSIGHTS", "SATURATION", "DENSITY"
    );
    println!("{}", "-".repeat(72));
    for row in &overview {
        println!(
            "{:<15} {:<15} {:>8} {:>10} {:>8}  {}",
            row.subject_id,
            row.topic_id,
            row.insight_count,
            row.insight_saturation,
            row.concept_density,
            row.artifact_type
        );
    }

    Ok(())
}

/// Show the full statistics for one topic
pub fn cmd_stats(
    store: &ChamberStore,
    engine: &InsightEngine,
    subject: &str,
    theme: &str,
    json: bool,
) -> Result<()> {
    let chamber = store.load()?;
    let stats = engine.topic_stats(&chamber, subject, theme);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Topic «{theme}» for {subject}:");
    println!("   Insights:     {}", stats.insight_count);
    println!("   Saturation:   {}/100", stats.insight_saturation);
    println!("   Density:      {}/100", stats.concept_density);
    println!("   Artifact:     {}", stats.artifact_type);
    println!("   Phase:        {}", stats.user_phase);
    println!("   Coherence:    {:.1}/10 (avg)", stats.avg_coherence);
    println!("   Terminology:  {:.2} (avg)", stats.avg_terminology);
    if !stats.meta_concepts.top.is_empty() {
        let domains: Vec<String> = stats
            .meta_concepts
            .top
            .iter()
            .map(|m| format!("{} ({})", m.key, m.count))
            .collect();
        println!("   Domains:      {}", domains.join(", "));
    }

    Ok(())
}

/// List the insights of one topic, strongest first
pub fn cmd_insights(store: &ChamberStore, subject: &str, theme: &str, json: bool) -> Result<()> {
    let chamber = store.load()?;
    let mut insights = insights_for_topic(&chamber, subject, theme);
    insights.sort_by(|a, b| b.strength.total_score.cmp(&a.strength.total_score));

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    if insights.is_empty() {
        println!("No insights for «{theme}» yet.");
        return Ok(());
    }

    for ins in insights {
        println!(
            "[{:>3}] {} ({}x, {})",
            ins.strength.total_score, ins.title, ins.strength.evidence_count, ins.insight_type
        );
        println!("      {}", ins.summary);
    }

    Ok(())
}
