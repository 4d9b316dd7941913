//! Section graph store: validated, read-only access to a loaded book.
//!
//! `load` walks the whole section graph and collects every structural
//! violation before failing, so data authors see the full list in one
//! pass. A store only exists for books that passed validation; dangling
//! choice targets are a load-time data error, never a runtime one.

use crate::book::{BookData, BookSection, Discipline};
use crate::error::{CoreError, CoreResult};

/// Read-only, validated store for one book's section graph.
#[derive(Debug, Clone)]
pub struct SectionStore {
    book: BookData,
}

impl SectionStore {
    /// Validate and load a book.
    ///
    /// Fails with [`CoreError::DataIntegrity`] listing every violation
    /// found if any structural invariant is broken.
    pub fn load(book: BookData) -> CoreResult<Self> {
        let violations = validate_book(&book);
        if violations.is_empty() {
            Ok(Self { book })
        } else {
            Err(CoreError::integrity(violations))
        }
    }

    /// Look up a section by number.
    pub fn get_section(&self, number: u32) -> CoreResult<&BookSection> {
        self.book
            .sections
            .get(&number)
            .ok_or(CoreError::SectionNotFound(number))
    }

    /// The loaded book.
    pub fn book(&self) -> &BookData {
        &self.book
    }

    /// Number of sections in the loaded book.
    pub fn section_count(&self) -> usize {
        self.book.sections.len()
    }

    /// Disciplines available in the loaded book.
    pub fn disciplines(&self) -> &[Discipline] {
        &self.book.disciplines
    }
}

/// Collect all structural violations in a book.
fn validate_book(book: &BookData) -> Vec<String> {
    let mut violations = Vec::new();

    for (key, section) in &book.sections {
        let n = section.section_number;
        if *key != n {
            violations.push(format!(
                "section map key {key} does not match section number {n}"
            ));
        }

        if section.kind.is_terminal() {
            if !section.choices.is_empty() {
                violations.push(format!(
                    "section {n} is terminal ({}) but has {} choice(s)",
                    section.kind,
                    section.choices.len()
                ));
            }
        } else if section.choices.is_empty() {
            violations.push(format!(
                "section {n} ({}) has no choices and is not terminal",
                section.kind
            ));
        }

        if section.kind == crate::book::SectionKind::Combat && section.combat.is_none() {
            violations.push(format!("combat section {n} has no encounter"));
        }

        for (i, choice) in section.choices.iter().enumerate() {
            if !book.sections.contains_key(&choice.target) {
                violations.push(format!(
                    "section {n} choice {i} targets missing section {}",
                    choice.target
                ));
            }
        }
    }

    violations
}
