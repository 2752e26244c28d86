use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::model::assignment::AssignmentField;
use crate::model::class::Class;
use crate::model::gradebook::GradeBook;
use crate::model::operation::Operation;
use crate::repository::{GradeBookRepository, StoreError};
use crate::service::dto::ClassDto;
use crate::service::grade_calc::{calculate_grade, GradeSummary};
use crate::service::reducer::apply;

pub const CLEAR_ALL_PROMPT: &str = "Delete all courses? This action cannot be undone.";

/// Owns the session's [`GradeBook`] and mirrors every change to the repository.
pub struct GradeBookService<R: GradeBookRepository> {
    repo: R,
    book: GradeBook,
}

impl<R: GradeBookRepository> GradeBookService<R> {
    /// Loads the stored book, or starts (and saves) a fresh one.
    ///
    /// Corrupt storage is moved aside and replaced by a fresh book.
    pub fn open(repo: R) -> Result<Self> {
        let book = match repo.load() {
            Ok(Some(classes)) if !classes.is_empty() => {
                info!(classes = classes.len(), "restored gradebook");
                GradeBook::from_classes(classes)
            }
            Ok(_) => {
                info!("no stored gradebook, starting with a default class");
                let book = GradeBook::new();
                repo.save(&book.classes).context("failed to save new gradebook")?;
                book
            }
            Err(err @ StoreError::Corrupt { .. }) => {
                warn!(error = %err, "stored gradebook is unreadable, starting over");
                repo.quarantine().context("failed to move corrupt gradebook aside")?;
                let book = GradeBook::new();
                repo.save(&book.classes).context("failed to save new gradebook")?;
                book
            }
            Err(err) => return Err(err).context("failed to load gradebook"),
        };

        Ok(Self { repo, book })
    }

    pub fn book(&self) -> &GradeBook {
        &self.book
    }

    pub fn classes(&self) -> &[Class] {
        &self.book.classes
    }

    pub fn active_class(&self) -> Option<&Class> {
        self.book.active_class()
    }

    pub fn resolve_class(&self, selector: &str) -> Option<&Class> {
        self.book.resolve_class(selector)
    }

    /// Applies `op` and persists when the classes changed. Returns whether they did.
    pub fn dispatch(&mut self, op: Operation) -> Result<bool> {
        let next = apply(self.book.clone(), &op);
        let changed = next.classes != self.book.classes;
        self.book = next;

        debug!(operation = op.kind(), changed, "applied operation");
        if changed {
            self.repo
                .save(&self.book.classes)
                .with_context(|| format!("failed to persist after {}", op.kind()))?;
        }
        Ok(changed)
    }

    /// Returns the id of the new class.
    pub fn add_class(&mut self) -> Result<String> {
        self.dispatch(Operation::AddClass)?;
        self.book
            .classes
            .last()
            .map(|c| c.id.clone())
            .context("gradebook has no classes after adding one")
    }

    pub fn remove_class(&mut self, class_id: &str) -> Result<bool> {
        self.dispatch(Operation::RemoveClass {
            class_id: class_id.to_string(),
        })
    }

    pub fn rename_class(&mut self, class_id: &str, name: &str) -> Result<bool> {
        self.dispatch(Operation::RenameClass {
            class_id: class_id.to_string(),
            name: name.to_string(),
        })
    }

    pub fn select_class(&mut self, class_id: &str) -> Result<()> {
        self.dispatch(Operation::SelectClass {
            class_id: class_id.to_string(),
        })?;
        Ok(())
    }

    /// Returns the id of the new assignment, if the class exists.
    pub fn add_assignment(&mut self, class_id: &str) -> Result<Option<String>> {
        self.dispatch(Operation::AddAssignment {
            class_id: class_id.to_string(),
        })?;
        Ok(self
            .book
            .find_class(class_id)
            .and_then(|c| c.assignments.last())
            .map(|a| a.id.clone()))
    }

    pub fn update_assignment(
        &mut self,
        class_id: &str,
        assignment_id: &str,
        field: AssignmentField,
        value: &str,
    ) -> Result<bool> {
        self.dispatch(Operation::UpdateAssignmentField {
            class_id: class_id.to_string(),
            assignment_id: assignment_id.to_string(),
            field,
            value: value.to_string(),
        })
    }

    /// `Ok(false)` when the row is the class's last one (or does not exist).
    pub fn remove_assignment(&mut self, class_id: &str, assignment_id: &str) -> Result<bool> {
        self.dispatch(Operation::RemoveAssignment {
            class_id: class_id.to_string(),
            assignment_id: assignment_id.to_string(),
        })
    }

    pub fn set_final_goal(&mut self, class_id: &str, value: &str) -> Result<bool> {
        self.dispatch(Operation::SetFinalGoal {
            class_id: class_id.to_string(),
            value: value.to_string(),
        })
    }

    pub fn clear_class(&mut self, class_id: &str) -> Result<bool> {
        self.dispatch(Operation::ClearClass {
            class_id: class_id.to_string(),
        })
    }

    /// Wipes every class once `confirm` accepts [`CLEAR_ALL_PROMPT`].
    pub fn clear_all<F>(&mut self, confirm: F) -> Result<bool>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(CLEAR_ALL_PROMPT) {
            debug!("clear all declined");
            return Ok(false);
        }
        info!(classes = self.book.classes.len(), "clearing all classes");
        self.dispatch(Operation::ClearAll)?;
        Ok(true)
    }

    pub fn summary(&self, class_id: &str) -> Option<GradeSummary> {
        self.book.find_class(class_id).map(calculate_grade)
    }

    pub fn class_dtos(&self) -> Vec<ClassDto> {
        let active = self.book.active.as_deref();
        self.book
            .classes
            .iter()
            .enumerate()
            .map(|(i, c)| ClassDto::from_entity(c, i + 1, Some(c.id.as_str()) == active))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct MockRepo {
        stored: RefCell<Option<Vec<Class>>>,
        corrupt: Cell<bool>,
        saves: Cell<usize>,
        quarantined: Cell<bool>,
    }

    impl MockRepo {
        fn with(classes: Vec<Class>) -> Self {
            let repo = MockRepo::default();
            *repo.stored.borrow_mut() = Some(classes);
            repo
        }
    }

    impl GradeBookRepository for &MockRepo {
        fn load(&self) -> Result<Option<Vec<Class>>, StoreError> {
            if self.corrupt.get() {
                let source = serde_json::from_str::<Vec<Class>>("{").unwrap_err();
                return Err(StoreError::Corrupt {
                    path: "mock.json".into(),
                    source,
                });
            }
            Ok(self.stored.borrow().clone())
        }

        fn save(&self, classes: &[Class]) -> Result<(), StoreError> {
            self.saves.set(self.saves.get() + 1);
            *self.stored.borrow_mut() = Some(classes.to_vec());
            Ok(())
        }

        fn quarantine(&self) -> Result<(), StoreError> {
            self.corrupt.set(false);
            self.quarantined.set(true);
            Ok(())
        }
    }

    #[test]
    fn test_open_empty_storage_saves_default() {
        let repo = MockRepo::default();
        let service = GradeBookService::open(&repo).unwrap();

        assert_eq!(service.classes().len(), 1);
        assert_eq!(service.classes()[0].name, "Class 1");
        assert_eq!(repo.saves.get(), 1);
        assert_eq!(repo.stored.borrow().as_ref().map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_open_restores_and_selects_first() {
        let mut english = Class::new(0);
        english.name = "English".to_string();
        let repo = MockRepo::with(vec![english.clone(), Class::new(1)]);

        let service = GradeBookService::open(&repo).unwrap();
        assert_eq!(service.classes().len(), 2);
        assert_eq!(service.active_class().map(|c| &c.id), Some(&english.id));
        assert_eq!(repo.saves.get(), 0);
    }

    #[test]
    fn test_open_empty_array_behaves_like_missing() {
        let repo = MockRepo::with(Vec::new());
        let service = GradeBookService::open(&repo).unwrap();
        assert_eq!(service.classes().len(), 1);
        assert_eq!(repo.saves.get(), 1);
    }

    #[test]
    fn test_open_corrupt_storage_recovers() {
        let repo = MockRepo::default();
        repo.corrupt.set(true);

        let service = GradeBookService::open(&repo).unwrap();
        assert!(repo.quarantined.get());
        assert_eq!(service.classes().len(), 1);
        assert_eq!(repo.saves.get(), 1);
    }

    #[test]
    fn test_every_change_is_persisted() {
        let repo = MockRepo::default();
        let mut service = GradeBookService::open(&repo).unwrap();
        let class_id = service.add_class().unwrap();
        assert_eq!(service.classes()[1].name, "Class 2");

        let row = service.add_assignment(&class_id).unwrap().unwrap();
        service
            .update_assignment(&class_id, &row, AssignmentField::Grade, "95")
            .unwrap();
        service.set_final_goal(&class_id, "90").unwrap();

        assert_eq!(repo.saves.get(), 5);
        let stored = repo.stored.borrow().clone().unwrap();
        assert_eq!(stored, service.classes().to_vec());
        assert_eq!(stored[1].assignments[4].grade, "95");
    }

    #[test]
    fn test_no_write_without_change() {
        let repo = MockRepo::default();
        let mut service = GradeBookService::open(&repo).unwrap();
        let class_id = service.classes()[0].id.clone();

        service.select_class(&class_id).unwrap();
        assert!(!service.rename_class("missing", "X").unwrap());
        assert!(!service.set_final_goal(&class_id, "").unwrap());
        assert_eq!(repo.saves.get(), 1);
    }

    #[test]
    fn test_remove_last_assignment_reports_rejection() {
        let repo = MockRepo::default();
        let mut service = GradeBookService::open(&repo).unwrap();
        let class_id = service.classes()[0].id.clone();
        let ids: Vec<String> = service.classes()[0]
            .assignments
            .iter()
            .map(|a| a.id.clone())
            .collect();

        for id in &ids[..3] {
            assert!(service.remove_assignment(&class_id, id).unwrap());
        }
        assert!(!service.remove_assignment(&class_id, &ids[3]).unwrap());
        assert_eq!(service.classes()[0].assignments.len(), 1);
    }

    #[test]
    fn test_clear_all_requires_confirmation() {
        let repo = MockRepo::default();
        let mut service = GradeBookService::open(&repo).unwrap();
        service.add_class().unwrap();
        let before = service.classes().to_vec();

        let mut prompt = String::new();
        let cleared = service
            .clear_all(|p| {
                prompt = p.to_string();
                false
            })
            .unwrap();
        assert!(!cleared);
        assert_eq!(prompt, CLEAR_ALL_PROMPT);
        assert_eq!(service.classes(), before.as_slice());

        assert!(service.clear_all(|_| true).unwrap());
        assert_eq!(service.classes().len(), 1);
        assert_eq!(service.classes()[0].name, "Class 1");
    }

    #[test]
    fn test_summary_and_dtos() {
        let repo = MockRepo::default();
        let mut service = GradeBookService::open(&repo).unwrap();
        let class_id = service.classes()[0].id.clone();
        let row = service.classes()[0].assignments[0].id.clone();
        service
            .update_assignment(&class_id, &row, AssignmentField::Grade, "80")
            .unwrap();
        service
            .update_assignment(&class_id, &row, AssignmentField::Weight, "50")
            .unwrap();

        let summary = service.summary(&class_id).unwrap().rounded();
        assert_eq!(summary.current_grade, 40.0);
        assert!(service.summary("missing").is_none());

        let dtos = service.class_dtos();
        assert_eq!(dtos.len(), 1);
        assert_eq!(dtos[0].position, 1);
        assert!(dtos[0].is_active);
        assert_eq!(dtos[0].summary.remaining_weight, 50.0);
    }
}
