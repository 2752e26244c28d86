use serde::{Deserialize, Serialize};

use crate::model::assignment::Assignment;
use crate::model::new_id;

/// Number of blank rows a class starts with (and returns to when cleared).
pub const DEFAULT_ASSIGNMENT_COUNT: usize = 4;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: String,
    pub name: String,
    pub assignments: Vec<Assignment>,
    pub final_goal: String,
}

impl Class {
    /// Creates the class shown at `index` (0-based) in the tab order.
    pub fn new(index: usize) -> Self {
        Self {
            id: new_id(),
            name: format!("Class {}", index + 1),
            assignments: Self::blank_assignments(),
            final_goal: String::new(),
        }
    }

    pub fn blank_assignments() -> Vec<Assignment> {
        (0..DEFAULT_ASSIGNMENT_COUNT).map(|_| Assignment::new()).collect()
    }

    pub fn find_assignment(&self, id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.id == id)
    }

    /// Looks an assignment up by id or by 1-based row number.
    pub fn resolve_assignment(&self, selector: &str) -> Option<&Assignment> {
        let selector = selector.trim();
        if let Some(a) = self.find_assignment(selector) {
            return Some(a);
        }
        selector
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.assignments.get(i))
    }

    /// The last remaining row can never be removed.
    pub fn can_remove_assignment(&self) -> bool {
        self.assignments.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_class_defaults() {
        let class = Class::new(2);
        assert_eq!(class.name, "Class 3");
        assert_eq!(class.assignments.len(), DEFAULT_ASSIGNMENT_COUNT);
        assert!(class.assignments.iter().all(|a| a.is_blank()));
        assert_eq!(class.final_goal, "");
    }

    #[test]
    fn test_resolve_assignment() {
        let class = Class::new(0);
        let second = class.assignments[1].id.clone();

        assert_eq!(class.resolve_assignment("2").map(|a| a.id.clone()), Some(second.clone()));
        assert_eq!(class.resolve_assignment(&second).map(|a| a.id.clone()), Some(second));
        assert!(class.resolve_assignment("0").is_none());
        assert!(class.resolve_assignment("5").is_none());
        assert!(class.resolve_assignment("nope").is_none());
    }

    #[test]
    fn test_serializes_with_camel_case_goal() {
        let class = Class::new(0);
        let value = serde_json::to_value(&class).unwrap();
        assert!(value.get("finalGoal").is_some());
        assert!(value.get("final_goal").is_none());
        assert_eq!(value["assignments"].as_array().map(|a| a.len()), Some(4));
    }
}
