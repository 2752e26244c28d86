use tracing::warn;

use crate::model::assignment::Assignment;
use crate::model::class::Class;
use crate::model::gradebook::GradeBook;
use crate::model::operation::Operation;

/// Applies one operation and returns the resulting book.
///
/// Unknown ids leave the book as it was. Nested values are replaced, never
/// edited in place. Persisting the result is the caller's job.
pub fn apply(book: GradeBook, op: &Operation) -> GradeBook {
    let GradeBook { classes, active } = book;

    match op {
        Operation::AddClass => {
            let class = Class::new(classes.len());
            let active = Some(class.id.clone());
            let mut classes = classes;
            classes.push(class);
            GradeBook { classes, active }
        }
        Operation::RemoveClass { class_id } => {
            let remaining: Vec<Class> = classes
                .into_iter()
                .filter(|c| &c.id != class_id)
                .collect();
            if remaining.is_empty() {
                return GradeBook::new();
            }
            let active = active
                .filter(|id| remaining.iter().any(|c| &c.id == id))
                .or_else(|| remaining.first().map(|c| c.id.clone()));
            GradeBook {
                classes: remaining,
                active,
            }
        }
        Operation::RenameClass { class_id, name } => GradeBook {
            classes: update_class(classes, class_id, |c| Class {
                name: name.clone(),
                ..c
            }),
            active,
        },
        Operation::SelectClass { class_id } => {
            let active = if classes.iter().any(|c| &c.id == class_id) {
                Some(class_id.clone())
            } else {
                active
            };
            GradeBook { classes, active }
        }
        Operation::AddAssignment { class_id } => GradeBook {
            classes: update_class(classes, class_id, |c| {
                let mut assignments = c.assignments;
                assignments.push(Assignment::new());
                Class { assignments, ..c }
            }),
            active,
        },
        Operation::UpdateAssignmentField {
            class_id,
            assignment_id,
            field,
            value,
        } => GradeBook {
            classes: update_class(classes, class_id, |c| {
                let assignments = c
                    .assignments
                    .iter()
                    .map(|a| {
                        if &a.id == assignment_id {
                            a.with_field(*field, value)
                        } else {
                            a.clone()
                        }
                    })
                    .collect();
                Class { assignments, ..c }
            }),
            active,
        },
        Operation::RemoveAssignment {
            class_id,
            assignment_id,
        } => GradeBook {
            classes: update_class(classes, class_id, |c| {
                if !c.can_remove_assignment() {
                    warn!(class_id = %c.id, "refusing to remove the last assignment");
                    return c;
                }
                let assignments = c
                    .assignments
                    .into_iter()
                    .filter(|a| &a.id != assignment_id)
                    .collect();
                Class { assignments, ..c }
            }),
            active,
        },
        Operation::SetFinalGoal { class_id, value } => GradeBook {
            classes: update_class(classes, class_id, |c| Class {
                final_goal: value.clone(),
                ..c
            }),
            active,
        },
        Operation::ClearClass { class_id } => GradeBook {
            classes: update_class(classes, class_id, |c| Class {
                assignments: Class::blank_assignments(),
                final_goal: String::new(),
                ..c
            }),
            active,
        },
        Operation::ClearAll => GradeBook::new(),
    }
}

fn update_class<F>(classes: Vec<Class>, class_id: &str, f: F) -> Vec<Class>
where
    F: Fn(Class) -> Class,
{
    classes
        .into_iter()
        .map(|c| if c.id == class_id { f(c) } else { c })
        .collect()
}
