use crate::model::class::Class;

/// Session state: the ordered classes plus the currently focused one.
///
/// Only `classes` is persisted. `active` is rebuilt on load and always points
/// at an existing class while `classes` is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeBook {
    pub classes: Vec<Class>,
    pub active: Option<String>,
}

impl GradeBook {
    /// A book holding one default class, selected.
    pub fn new() -> Self {
        let class = Class::new(0);
        let active = Some(class.id.clone());
        Self {
            classes: vec![class],
            active,
        }
    }

    /// Rebuilds a book from stored classes, selecting the first one.
    pub fn from_classes(classes: Vec<Class>) -> Self {
        if classes.is_empty() {
            return Self::new();
        }
        let active = classes.first().map(|c| c.id.clone());
        Self { classes, active }
    }

    pub fn find_class(&self, id: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.classes.iter().position(|c| c.id == id)
    }

    pub fn active_class(&self) -> Option<&Class> {
        self.active.as_deref().and_then(|id| self.find_class(id))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.as_deref().and_then(|id| self.position(id))
    }

    /// Looks a class up by id, 1-based position, or case-insensitive name.
    pub fn resolve_class(&self, selector: &str) -> Option<&Class> {
        let selector = selector.trim();
        if let Some(c) = self.find_class(selector) {
            return Some(c);
        }
        if let Some(c) = selector
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.classes.get(i))
        {
            return Some(c);
        }
        self.classes
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(selector))
    }
}

impl Default for GradeBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_selects_its_only_class() {
        let book = GradeBook::new();
        assert_eq!(book.classes.len(), 1);
        assert_eq!(book.classes[0].name, "Class 1");
        assert_eq!(book.active_index(), Some(0));
    }

    #[test]
    fn test_from_empty_classes_falls_back_to_default() {
        let book = GradeBook::from_classes(Vec::new());
        assert_eq!(book.classes.len(), 1);
        assert!(book.active_class().is_some());
    }

    #[test]
    fn test_resolve_class() {
        let mut physics = Class::new(0);
        physics.name = "Physics".to_string();
        let chem = Class::new(1);
        let book = GradeBook::from_classes(vec![physics.clone(), chem.clone()]);

        assert_eq!(book.resolve_class("physics").map(|c| &c.id), Some(&physics.id));
        assert_eq!(book.resolve_class("2").map(|c| &c.id), Some(&chem.id));
        assert_eq!(book.resolve_class(&chem.id).map(|c| &c.id), Some(&chem.id));
        assert!(book.resolve_class("Biology").is_none());
        assert_eq!(book.active.as_ref(), Some(&physics.id));
    }
}
