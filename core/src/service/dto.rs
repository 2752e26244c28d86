use crate::model::class::Class;
use crate::service::grade_calc::{calculate_grade, GradeSummary};

/// Flattened view of a class for listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDto {
    pub id: String,
    pub name: String,
    pub position: usize,
    pub assignment_count: usize,
    pub final_goal: String,
    pub is_active: bool,
    // Unrounded; use `summary.rounded()` for display.
    pub summary: GradeSummary,
}

impl ClassDto {
    pub fn from_entity(class: &Class, position: usize, is_active: bool) -> Self {
        Self {
            id: class.id.clone(),
            name: class.name.clone(),
            position,
            assignment_count: class.assignments.len(),
            final_goal: class.final_goal.clone(),
            is_active,
            summary: calculate_grade(class),
        }
    }
}
