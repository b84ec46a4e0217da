//! Cross-topic meta profile command

use anyhow::Result;
use innsikt_core::{InsightEngine, Lifecycle};

use crate::store::ChamberStore;

/// Build and print the meta profile for one subject
pub fn cmd_meta(
    store: &ChamberStore,
    engine: &InsightEngine,
    subject: &str,
    json: bool,
) -> Result<()> {
    let chamber = store.load()?;

    let Some(profile) = engine.build_meta_profile(&chamber, subject) else {
        if json {
            println!("null");
        } else {
            println!("No insights for subject «{subject}» yet.");
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("Meta profile for {subject}:");
    println!("   Topics:           {}", profile.topics.len());
    println!("   Avg saturation:   {:.0}/100", profile.global.avg_saturation);
    println!("   Pressure index:   {:.2}", profile.global.pressure_index);
    println!("   Negativity index: {:.2}", profile.global.negativity_index);

    let phases = &profile.global.phases;
    println!(
        "   Phases:           exploration {}, pattern {}, press {}, stuck {}, integration {}",
        phases.exploration, phases.pattern, phases.press, phases.stuck, phases.integration
    );

    let mut new_count = 0;
    let mut growing = 0;
    let mut mature = 0;
    let mut integrated = 0;
    for ins in &profile.insights {
        match ins.lifecycle {
            Lifecycle::New => new_count += 1,
            Lifecycle::Growing => growing += 1,
            Lifecycle::Mature => mature += 1,
            Lifecycle::Integrated => integrated += 1,
        }
    }
    println!(
        "   Lifecycle:        new {new_count}, growing {growing}, mature {mature}, integrated {integrated}"
    );

    if !profile.patterns.is_empty() {
        println!();
        println!("Patterns:");
        for pattern in &profile.patterns {
            println!("   • {} [{}]", pattern.description, pattern.themes.join(", "));
        }
    }

    if !profile.concepts.is_empty() {
        println!();
        println!("Top concepts:");
        for entry in profile.concepts.iter().take(10) {
            println!(
                "   {:<20} {:>4}x across {} theme(s)",
                entry.key, entry.total_count, entry.theme_count
            );
        }
    }

    Ok(())
}
