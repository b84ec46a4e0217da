//! Semantic axis analysis: intensity, frequency, modality, time reference,
//! subject type, valence, tempo, meta-language, contrast, absolutes

use super::{contains_any, Patterns};
use crate::lexicon::Lexicon;
use crate::models::{
    Frequency, Intensity, MetaLanguage, Modality, Semantics, SubjectType, Tempo, TimeRef, Valence,
};

pub(crate) fn analyze_semantics(text: &str, lexicon: &Lexicon, patterns: &Patterns) -> Semantics {
    let lower = text.to_lowercase();
    let lex = &lexicon.semantics;

    let intensity = if contains_any(&lower, &lex.intensity_high) {
        Intensity::High
    } else if contains_any(&lower, &lex.intensity_low) {
        Intensity::Low
    } else {
        Intensity::Medium
    };

    let frequency = if contains_any(&lower, &lex.frequency_always) {
        Frequency::Always
    } else if contains_any(&lower, &lex.frequency_often) {
        Frequency::Often
    } else if contains_any(&lower, &lex.frequency_rare) {
        Frequency::Rare
    } else {
        Frequency::Unknown
    };

    // Obstruction overrides demand/opportunity.
    let mut modality = if contains_any(&lower, &lex.modality_demand) {
        Modality::Demand
    } else if contains_any(&lower, &lex.modality_opportunity) {
        Modality::Opportunity
    } else {
        Modality::Neutral
    };
    if contains_any(&lower, &lex.modality_obstruction) {
        modality = Modality::Obstruction;
    }

    let mut time_refs = Vec::new();
    if contains_any(&lower, &lex.time_now) {
        time_refs.push(TimeRef::Now);
    }
    if contains_any(&lower, &lex.time_past) {
        time_refs.push(TimeRef::Past);
    }
    if contains_any(&lower, &lex.time_future) {
        time_refs.push(TimeRef::Future);
    }
    let time_ref = match time_refs.as_slice() {
        [] => TimeRef::Now,
        [single] => *single,
        _ => TimeRef::Mixed,
    };

    let subject_type = if patterns.first_person.is_match(&lower) {
        SubjectType::SelfVoice
    } else if patterns.other_people.is_match(&lower) {
        SubjectType::Others
    } else {
        SubjectType::Diffuse
    };

    let pos_count = lex
        .valence_positive
        .iter()
        .filter(|w| lower.contains(w.as_str()))
        .count();
    let neg_count = lex
        .valence_negative
        .iter()
        .filter(|w| lower.contains(w.as_str()))
        .count();

    let valence = if pos_count > neg_count && pos_count > 0 {
        Valence::Positive
    } else if neg_count > pos_count && neg_count > 0 {
        Valence::Negative
    } else if pos_count > 0 && neg_count > 0 {
        Valence::Mixed
    } else {
        Valence::Neutral
    };

    let tempo = if contains_any(&lower, &lex.tempo_sudden) {
        Tempo::Sudden
    } else if contains_any(&lower, &lex.tempo_gradual) {
        Tempo::Gradual
    } else if contains_any(&lower, &lex.tempo_slow) {
        Tempo::Slow
    } else {
        Tempo::Unknown
    };

    let meta = if contains_any(&lower, &lex.meta_reflective) {
        MetaLanguage::Reflective
    } else if contains_any(&lower, &lex.meta_uncertain) {
        MetaLanguage::Uncertain
    } else {
        MetaLanguage::None
    };

    Semantics {
        intensity,
        frequency,
        valence,
        modality,
        subject_type,
        time_ref,
        tempo,
        meta,
        has_contrast: contains_any(&lower, &lex.contrast),
        has_absolute: contains_any(&lower, &lex.absolute),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> Semantics {
        let lexicon = Lexicon::builtin().unwrap();
        let patterns = Patterns::new().unwrap();
        analyze_semantics(text, &lexicon, &patterns)
    }

    #[test]
    fn test_obstruction_overrides_demand() {
        let sem = analyze("jeg må levere men klarer ikke å starte");
        assert_eq!(sem.modality, Modality::Obstruction);
    }

    #[test]
    fn test_frequency_always() {
        assert_eq!(analyze("det skjer hver gang").frequency, Frequency::Always);
        assert_eq!(analyze("det skjer ofte").frequency, Frequency::Often);
        assert_eq!(analyze("det skjer sjelden").frequency, Frequency::Rare);
        assert_eq!(analyze("det skjedde").frequency, Frequency::Unknown);
    }

    #[test]
    fn test_hver_dag_sets_time_not_frequency() {
        let sem = analyze("jeg er trøtt hver dag");
        assert_eq!(sem.time_ref, TimeRef::Now);
        assert_eq!(sem.frequency, Frequency::Unknown);
    }

    #[test]
    fn test_time_mixed_when_two_frames_present() {
        let sem = analyze("før var det verre, men nå går det bedre");
        assert_eq!(sem.time_ref, TimeRef::Mixed);
    }

    #[test]
    fn test_time_defaults_to_now() {
        let sem = analyze("det bekymrer meg litt");
        assert_eq!(sem.time_ref, TimeRef::Now);
    }

    #[test]
    fn test_valence_counting() {
        assert_eq!(analyze("jeg er stolt og trygg").valence, Valence::Positive);
        assert_eq!(analyze("jeg er redd og sliten").valence, Valence::Negative);
        // Tie with both sides present reads as mixed.
        assert_eq!(analyze("jeg er stolt men sliten").valence, Valence::Mixed);
        assert_eq!(analyze("jeg gikk en tur").valence, Valence::Neutral);
    }

    #[test]
    fn test_subject_type_word_boundaries() {
        assert_eq!(analyze("jeg tenker").subject_type, SubjectType::SelfVoice);
        assert_eq!(analyze("folk tenker").subject_type, SubjectType::Others);
        // "jegeren" must not match \bjeg\b
        assert_eq!(analyze("jegeren gikk hjem").subject_type, SubjectType::Diffuse);
    }

    #[test]
    fn test_meta_language() {
        assert_eq!(analyze("egentlig handler det om noe annet").meta, MetaLanguage::Reflective);
        assert_eq!(analyze("kanskje det går over").meta, MetaLanguage::Uncertain);
        assert_eq!(analyze("det regner ute").meta, MetaLanguage::None);
    }

    #[test]
    fn test_contrast_and_absolute_flags() {
        let sem = analyze("jeg prøver, men det går aldri");
        assert!(sem.has_contrast);
        assert!(sem.has_absolute);
    }
}
