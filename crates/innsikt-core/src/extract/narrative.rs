//! Narrative marker analysis: actor, norm violation, bagatellization,
//! systemic effect, moral tone. First match wins per category.

use super::{contains_any, Patterns};
use crate::lexicon::Lexicon;
use crate::models::{Actor, MoralTone, Narrative};

pub(crate) fn analyze_narrative(text: &str, lexicon: &Lexicon, patterns: &Patterns) -> Narrative {
    let lower = text.to_lowercase();
    let lex = &lexicon.narrative;

    let actor = if patterns.first_person.is_match(&lower) {
        Actor::I
    } else if patterns.actor_we.is_match(&lower) {
        Actor::We
    } else if patterns.actor_one.is_match(&lower) {
        Actor::One
    } else if patterns.actor_everyone.is_match(&lower) {
        Actor::Everyone
    } else if patterns.actor_they.is_match(&lower) {
        Actor::They
    } else {
        Actor::None
    };

    let moral_tone = if contains_any(&lower, &lex.moral_critical) {
        MoralTone::Critical
    } else if contains_any(&lower, &lex.moral_normative) {
        MoralTone::Normative
    } else {
        MoralTone::None
    };

    Narrative {
        actor,
        norm_break: contains_any(&lower, &lex.norm_break),
        bagatellization: contains_any(&lower, &lex.bagatellization),
        systemic_effect: contains_any(&lower, &lex.systemic_effect),
        moral_tone,
    }
}
