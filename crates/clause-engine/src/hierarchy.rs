//! Clause slicing and parent reconstruction
//!
//! Matches are ordered by position, each clause body runs to the next match,
//! and parents come from a level-indexed stack of "current label per level".
//! Slots are only ever overwritten, never popped: a new sibling replaces its own
//! level and leaves deeper levels untouched.

use shared_types::{Clause, ClauseType};
use tracing::debug;

use crate::classifier::classify;
use crate::config::SegmenterConfig;
use crate::patterns::{PatternMatch, MAX_DECIMAL_LEVEL};

/// Section label of the single clause emitted for unstructured input
pub const FULL_TEXT_SECTION: &str = "Full Text";

const STACK_DEPTH: usize = MAX_DECIMAL_LEVEL + 1;

#[derive(Debug, Clone)]
struct Slot {
    section: String,
    header: String,
}

/// Most recent retained clause at each hierarchy level
#[derive(Debug, Default)]
struct LevelStack {
    slots: [Option<Slot>; STACK_DEPTH],
}

impl LevelStack {
    fn overwrite(&mut self, level: usize, section: &str, header: &str) {
        if let Some(slot) = self.slots.get_mut(level) {
            *slot = Some(Slot {
                section: section.to_string(),
                header: header.to_string(),
            });
        }
    }

    fn parent_of(&self, level: usize) -> Option<&Slot> {
        let parent_level = level.checked_sub(1)?;
        self.slots.get(parent_level)?.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub clauses: Vec<Clause>,
    pub noise_discarded: usize,
    pub fallback_used: bool,
}

/// Turn raw matches into ordered, classified clauses.
pub fn build_clauses(
    text: &str,
    mut matches: Vec<PatternMatch>,
    config: &SegmenterConfig,
) -> BuildOutcome {
    if matches.is_empty() {
        return full_text_fallback(text, config);
    }

    // same offset: catalog order decides
    matches.sort_by_key(|m| (m.start_offset, m.kind.catalog_rank()));

    let mut stack = LevelStack::default();
    let mut outcome = BuildOutcome::default();

    for (i, current) in matches.iter().enumerate() {
        let end = matches
            .get(i + 1)
            .map_or(text.len(), |next| next.start_offset);
        let body = &text[current.start_offset..end];
        let composed = compose_clause_text(&current.header_text, body);

        if composed.chars().count() <= config.min_clause_chars {
            debug!(section = %current.section_label, "discarding short clause");
            outcome.noise_discarded += 1;
            continue;
        }

        stack.overwrite(current.level, &current.section_label, &current.header_text);
        let parent = stack.parent_of(current.level);
        let clause_type = classify(&composed, parent.map(|p| p.header.as_str()));

        outcome.clauses.push(Clause {
            id: format!("clause-{}", outcome.clauses.len() + 1),
            section: current.section_label.clone(),
            text: truncate_chars(&composed, config.max_clause_chars),
            clause_type,
            parent_section: parent.map(|p| p.section.clone()),
        });
    }

    outcome
}

/// Header line, a blank line, then whatever follows the header line
fn compose_clause_text(header: &str, body: &str) -> String {
    let remainder = body
        .find('\n')
        .map_or("", |newline| &body[newline + 1..])
        .trim();
    if remainder.is_empty() {
        header.to_string()
    } else {
        format!("{}\n\n{}", header, remainder)
    }
}

fn full_text_fallback(text: &str, config: &SegmenterConfig) -> BuildOutcome {
    let trimmed = text.trim();
    if trimmed.chars().count() <= config.min_clause_chars {
        return BuildOutcome::default();
    }

    BuildOutcome {
        clauses: vec![Clause {
            id: "clause-1".to_string(),
            section: FULL_TEXT_SECTION.to_string(),
            text: truncate_chars(trimmed, config.max_clause_chars),
            clause_type: ClauseType::General,
            parent_section: None,
        }],
        noise_discarded: 0,
        fallback_used: true,
    }
}

/// Keep the first `max` characters, respecting char boundaries
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::find_matches;
    use pretty_assertions::assert_eq;

    fn build(text: &str) -> BuildOutcome {
        let config = SegmenterConfig::default();
        build_clauses(text, find_matches(text, &config), &config)
    }

    fn outline(clauses: &[Clause]) -> Vec<(&str, Option<&str>)> {
        clauses
            .iter()
            .map(|c| (c.section.as_str(), c.parent_section.as_deref()))
            .collect()
    }

    #[test]
    fn test_header_and_body_are_joined_by_blank_line() {
        let outcome = build("1. DEFINITIONS\n\"Borrower\" means the company.\n");
        assert_eq!(outcome.clauses.len(), 1);
        assert_eq!(
            outcome.clauses[0].text,
            "1. DEFINITIONS\n\n\"Borrower\" means the company."
        );
    }

    #[test]
    fn test_header_alone_when_no_body() {
        let outcome = build("1. Governing law and jurisdiction\n2. Counterparts of this agreement\n");
        assert_eq!(outcome.clauses[0].text, "1. Governing law and jurisdiction");
    }

    #[test]
    fn test_short_clauses_are_noise() {
        let outcome = build("1. Fees\n2. Termination of the facility\n");
        assert_eq!(outline(&outcome.clauses), vec![("2", None)]);
        assert_eq!(outcome.noise_discarded, 1);
    }

    #[test]
    fn test_parents_follow_level_stack() {
        let text = "ARTICLE I LOANS\n1. The Facility\n1.1 Commitments of lenders\n(a) each lender shall lend\n(i) in dollars only please\n1.2 Purpose of the loans\n2. Repayment of the loans\n";
        let outcome = build(text);
        assert_eq!(
            outline(&outcome.clauses),
            vec![
                ("ARTICLE I", None),
                ("1", Some("ARTICLE I")),
                ("1.1", Some("1")),
                ("(a)", Some("1.1")),
                ("(i)", Some("1.1")),
                ("(i)", Some("(i)")),
                ("1.2", Some("1")),
                ("2", Some("ARTICLE I")),
            ]
        );
    }

    #[test]
    fn test_slots_are_overwritten_not_cleared() {
        // moving on to section 2 leaves the level-2 slot holding "1.1"
        let text = "1. Alpha section heading\n1.1 Alpha subsection text\n2. Beta section heading\n(a) paragraph under beta\n";
        let outcome = build(text);
        assert_eq!(
            outline(&outcome.clauses),
            vec![
                ("1", None),
                ("1.1", Some("1")),
                ("2", None),
                ("(a)", Some("1.1")),
            ]
        );
    }

    #[test]
    fn test_parent_header_drives_classification() {
        let text = "23.1 EVENTS OF DEFAULT\n(a) the Borrower does not pay on the due date\n";
        let outcome = build(text);
        assert_eq!(outcome.clauses[1].clause_type, ClauseType::Default);
        assert_eq!(outcome.clauses[1].parent_section.as_deref(), Some("23.1"));
    }

    #[test]
    fn test_text_is_truncated() {
        let body = "x".repeat(5000);
        let outcome = build(&format!("1. Long clause heading\n{}\n", body));
        assert_eq!(outcome.clauses[0].text.chars().count(), 2000);
    }

    #[test]
    fn test_truncate_chars_is_boundary_safe() {
        assert_eq!(truncate_chars("§§§§", 2), "§§");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn test_fallback_for_unstructured_text() {
        let outcome = build("  This agreement is made between the parties below.  ");
        assert!(outcome.fallback_used);
        assert_eq!(outcome.clauses.len(), 1);
        let clause = &outcome.clauses[0];
        assert_eq!(clause.section, FULL_TEXT_SECTION);
        assert_eq!(clause.text, "This agreement is made between the parties below.");
        assert_eq!(clause.clause_type, ClauseType::General);
        assert_eq!(clause.parent_section, None);
    }

    #[test]
    fn test_trivial_input_yields_nothing() {
        let outcome = build("   tiny   ");
        assert!(outcome.clauses.is_empty());
        assert!(!outcome.fallback_used);
        assert!(build("").clauses.is_empty());
    }

    #[test]
    fn test_ids_count_retained_clauses() {
        let outcome = build("1. Fees\n2. Termination of the facility\n3. Assignment by the lenders\n");
        let ids: Vec<_> = outcome.clauses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["clause-1", "clause-2"]);
    }
}
