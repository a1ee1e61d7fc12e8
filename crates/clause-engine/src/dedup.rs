//! Duplicate-span resolution
//!
//! Independent matchers can fire on the same line (a "(i)" is both a letter
//! paragraph and a roman numeral), producing clauses with identical section and
//! text. The first occurrence wins unless it names itself as its parent and the
//! newcomer does not.

use std::collections::HashMap;

use shared_types::Clause;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct DedupOutcome {
    pub clauses: Vec<Clause>,
    pub dropped: usize,
    pub replaced: usize,
}

pub fn deduplicate(clauses: Vec<Clause>) -> DedupOutcome {
    let mut outcome = DedupOutcome::default();
    let mut seen: HashMap<(String, String), usize> = HashMap::new();

    for clause in clauses {
        let key = (clause.section.clone(), clause.text.clone());
        match seen.get(&key).copied() {
            Some(index) => {
                let kept = &mut outcome.clauses[index];
                if kept.is_self_referential() && !clause.is_self_referential() {
                    debug!(section = %clause.section, "replacing self-referential duplicate");
                    *kept = clause;
                    outcome.replaced += 1;
                } else {
                    outcome.dropped += 1;
                }
            }
            None => {
                seen.insert(key, outcome.clauses.len());
                outcome.clauses.push(clause);
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::ClauseType;

    fn clause(id: &str, section: &str, text: &str, parent: Option<&str>) -> Clause {
        Clause {
            id: id.to_string(),
            section: section.to_string(),
            text: text.to_string(),
            clause_type: ClauseType::General,
            parent_section: parent.map(str::to_string),
        }
    }

    #[test]
    fn test_keeps_first_duplicate() {
        let outcome = deduplicate(vec![
            clause("clause-1", "(i)", "(i) in dollars", Some("1.1")),
            clause("clause-2", "(i)", "(i) in dollars", Some("(i)")),
        ]);
        assert_eq!(outcome.clauses.len(), 1);
        assert_eq!(outcome.clauses[0].id, "clause-1");
        assert_eq!(outcome.dropped, 1);
        assert_eq!(outcome.replaced, 0);
    }

    #[test]
    fn test_replaces_self_referential_first_occurrence() {
        let outcome = deduplicate(vec![
            clause("clause-1", "A", "A. Corporate Details", Some("A")),
            clause("clause-2", "2", "2. Other heading text", None),
            clause("clause-3", "A", "A. Corporate Details", Some("1")),
        ]);
        let kept: Vec<_> = outcome
            .clauses
            .iter()
            .map(|c| (c.id.as_str(), c.parent_section.as_deref()))
            .collect();
        // the replacement takes the original's position
        assert_eq!(kept, vec![("clause-3", Some("1")), ("clause-2", None)]);
        assert_eq!(outcome.replaced, 1);
    }

    #[test]
    fn test_both_self_referential_keeps_first() {
        let outcome = deduplicate(vec![
            clause("clause-1", "(v)", "(v) text", Some("(v)")),
            clause("clause-2", "(v)", "(v) text", Some("(v)")),
        ]);
        assert_eq!(outcome.clauses[0].id, "clause-1");
        assert_eq!(outcome.dropped, 1);
    }

    #[test]
    fn test_same_label_different_text_is_kept() {
        // labels repeat across parents: "(a)" under 1.1 and under 1.2
        let outcome = deduplicate(vec![
            clause("clause-1", "(a)", "(a) first list item", Some("1.1")),
            clause("clause-2", "(a)", "(a) second list item", Some("1.2")),
        ]);
        assert_eq!(outcome.clauses.len(), 2);
        assert_eq!(outcome.dropped, 0);
    }
}
