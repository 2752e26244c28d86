use serde::{Deserialize, Serialize};

use crate::model::new_id;

/// One of the editable text fields of an [`Assignment`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentField {
    Name,
    Grade,
    Weight,
}

impl AssignmentField {
    pub const KEYS: [&'static str; 3] = ["name", "grade", "weight"];

    pub fn key(&self) -> &'static str {
        match self {
            AssignmentField::Name => "name",
            AssignmentField::Grade => "grade",
            AssignmentField::Weight => "weight",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(AssignmentField::Name),
            "grade" => Some(AssignmentField::Grade),
            "weight" => Some(AssignmentField::Weight),
            _ => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            AssignmentField::Name => AssignmentField::Grade,
            AssignmentField::Grade => AssignmentField::Weight,
            AssignmentField::Weight => AssignmentField::Name,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            AssignmentField::Name => AssignmentField::Weight,
            AssignmentField::Grade => AssignmentField::Name,
            AssignmentField::Weight => AssignmentField::Grade,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Assignment {
    pub id: String,
    pub name: String,
    // Kept as the raw text the user typed; interpreted only when grading.
    pub grade: String,
    pub weight: String,
}

impl Assignment {
    pub fn new() -> Self {
        Self {
            id: new_id(),
            name: String::new(),
            grade: String::new(),
            weight: String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.grade.is_empty() && self.weight.is_empty()
    }

    pub fn field(&self, field: AssignmentField) -> &str {
        match field {
            AssignmentField::Name => &self.name,
            AssignmentField::Grade => &self.grade,
            AssignmentField::Weight => &self.weight,
        }
    }

    /// Returns a copy with exactly one field replaced.
    pub fn with_field(&self, field: AssignmentField, value: &str) -> Self {
        let mut next = self.clone();
        match field {
            AssignmentField::Name => next.name = value.to_string(),
            AssignmentField::Grade => next.grade = value.to_string(),
            AssignmentField::Weight => next.weight = value.to_string(),
        }
        next
    }
}

impl Default for Assignment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assignment_is_blank() {
        let a = Assignment::new();
        assert!(a.is_blank());
        assert!(!a.id.is_empty());
        assert_ne!(a.id, Assignment::new().id);
    }

    #[test]
    fn test_with_field_touches_one_field() {
        let a = Assignment::new().with_field(AssignmentField::Name, "Midterm");
        let b = a.with_field(AssignmentField::Grade, "85");

        assert_eq!(b.id, a.id);
        assert_eq!(b.name, "Midterm");
        assert_eq!(b.grade, "85");
        assert_eq!(b.weight, "");
    }

    #[test]
    fn test_field_keys() {
        for key in AssignmentField::KEYS {
            let field = AssignmentField::from_key(key).unwrap();
            assert_eq!(field.key(), key);
        }
        assert_eq!(AssignmentField::from_key("score"), None);
        assert_eq!(AssignmentField::Weight.next(), AssignmentField::Name);
        assert_eq!(AssignmentField::Name.previous(), AssignmentField::Weight);
    }
}
