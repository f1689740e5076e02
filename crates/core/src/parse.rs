//! Turns a free-text generation reply into flashcards.
//!
//! Each line is expected to read `Term: Definition`. The split happens at the
//! first colon only, so definitions may contain further colons. Lines without
//! a colon, or with a blank term or definition, are dropped silently.

use crate::model::Flashcard;

/// Parse every usable `Term: Definition` line, preserving reply order.
#[must_use]
pub fn parse_flashcards(reply: &str) -> Vec<Flashcard> {
    reply.lines().filter_map(parse_line).collect()
}

/// Parse one line; `None` when the line is not a usable pair.
#[must_use]
pub fn parse_line(line: &str) -> Option<Flashcard> {
    let (term, definition) = line.split_once(':')?;
    Flashcard::new(term, definition).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(cards: &[Flashcard]) -> Vec<(&str, &str)> {
        cards.iter().map(|c| (c.term(), c.definition())).collect()
    }

    #[test]
    fn well_formed_lines_yield_one_card_each_in_order() {
        let reply = "Hola: Hello\nAdiós: Goodbye\nGracias: Thank you";
        let cards = parse_flashcards(reply);
        assert_eq!(
            pairs(&cards),
            vec![("Hola", "Hello"), ("Adiós", "Goodbye"), ("Gracias", "Thank you")]
        );
    }

    #[test]
    fn colons_after_the_first_stay_in_definition() {
        let cards = parse_flashcards("Ratio: a : b relationship");
        assert_eq!(pairs(&cards), vec![("Ratio", "a : b relationship")]);
    }

    #[test]
    fn malformed_lines_are_dropped() {
        let reply = "Here are your cards\n: no term\nno definition:   \n\nCell: basic unit of life";
        let cards = parse_flashcards(reply);
        assert_eq!(pairs(&cards), vec![("Cell", "basic unit of life")]);
    }

    #[test]
    fn crlf_endings_and_padding_are_trimmed() {
        let cards = parse_flashcards("  Atom :  smallest unit \r\nIon:charged atom\r\n");
        assert_eq!(
            pairs(&cards),
            vec![("Atom", "smallest unit"), ("Ion", "charged atom")]
        );
    }

    #[test]
    fn duplicates_are_kept() {
        let cards = parse_flashcards("A: one\nA: one");
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn empty_and_whitespace_replies_yield_nothing() {
        assert!(parse_flashcards("").is_empty());
        assert!(parse_flashcards("  \n\t\n").is_empty());
    }

    #[test]
    fn parse_line_requires_colon() {
        assert!(parse_line("no separator here").is_none());
        assert!(parse_line("k: v").is_some());
    }
}
