//! Shared text utilities: tokenizing, stopword filtering, sentence
//! segmentation, titles, and token-set similarity

use std::collections::HashSet;

use crate::lexicon::Lexicon;

/// Lowercase and split on non-word characters
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Tokens worth treating as content: longer than 3 chars, purely
/// alphabetic (a-z plus æøå), and not a stopword
pub fn content_tokens(text: &str, lexicon: &Lexicon) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| {
            t.chars().count() > 3
                && t.chars().all(|c| matches!(c, 'a'..='z' | 'æ' | 'ø' | 'å'))
                && !lexicon.is_stopword(t)
        })
        .collect()
}

/// Token-set Jaccard similarity over tokens longer than 2 chars
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let tokens_a: HashSet<String> = tokenize(a)
        .into_iter()
        .filter(|t| t.chars().count() > 2)
        .collect();
    let tokens_b: HashSet<String> = tokenize(b)
        .into_iter()
        .filter(|t| t.chars().count() > 2)
        .collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.len() + tokens_b.len() - intersection;
    intersection as f64 / union as f64
}

/// Split free text into sentence fragments on `. ! ?`, trimmed, discarding
/// fragments under 15 characters. Used to turn one multi-sentence message
/// into multiple signals, one reconciliation call per sentence.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.chars().count() >= 15)
        .map(str::to_string)
        .collect()
}

/// Derive a title from the first ~10 words of a text
pub fn title_from_text(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let short = words.iter().take(10).cloned().collect::<Vec<_>>().join(" ");
    if words.len() > 10 {
        format!("{} …", short)
    } else {
        short
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_norwegian_letters() {
        let tokens = tokenize("Jeg FØLER meg sliten, hver dag!");
        assert_eq!(
            tokens,
            vec!["jeg", "føler", "meg", "sliten", "hver", "dag"]
        );
    }

    #[test]
    fn test_content_tokens_filter() {
        let lexicon = Lexicon::builtin().unwrap();
        // "jeg" is a stopword, "meg" is too short, "x123" is not alphabetic
        let tokens = content_tokens("jeg føler meg sliten x123", &lexicon);
        assert_eq!(tokens, vec!["føler", "sliten"]);
    }

    #[test]
    fn test_text_similarity_identical_and_disjoint() {
        assert!((text_similarity("sliten hver dag", "sliten hver dag") - 1.0).abs() < 1e-9);
        assert_eq!(text_similarity("helt andre ord her", "ingenting felles nei"), 0.0);
        assert_eq!(text_similarity("", "noe tekst her"), 0.0);
    }

    #[test]
    fn test_split_into_sentences_discards_short_fragments() {
        let sentences =
            split_into_sentences("Jeg føler meg sliten hver dag. Ok. Det hjelper å gå en tur!");
        assert_eq!(
            sentences,
            vec![
                "Jeg føler meg sliten hver dag".to_string(),
                "Det hjelper å gå en tur".to_string(),
            ]
        );
    }

    #[test]
    fn test_title_truncates_at_ten_words() {
        let text = "en to tre fire fem seks sju åtte ni ti elleve";
        let title = title_from_text(text);
        assert_eq!(title, "en to tre fire fem seks sju åtte ni ti …");

        let short = title_from_text("bare noen få ord");
        assert_eq!(short, "bare noen få ord");
    }
}
