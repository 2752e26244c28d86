use anyhow::Result;
use ratatui::widgets::TableState;
use gradebook_core::{AssignmentField, Class, GradeBookRepository, GradeBookService};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditTarget {
    Cell(AssignmentField),
    ClassName,
    FinalGoal,
}

impl EditTarget {
    pub fn label(&self) -> &'static str {
        match self {
            EditTarget::Cell(AssignmentField::Name) => "Assignment/Exam",
            EditTarget::Cell(AssignmentField::Grade) => "Grade",
            EditTarget::Cell(AssignmentField::Weight) => "Weight",
            EditTarget::ClassName => "Class name",
            EditTarget::FinalGoal => "Final Goal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Editing(EditTarget),
    ConfirmClearAll,
}

pub struct App<R: GradeBookRepository> {
    pub service: GradeBookService<R>,
    pub state: TableState,
    pub column: AssignmentField,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub status: Option<String>,
}

impl<R: GradeBookRepository> App<R> {
    pub fn new(service: GradeBookService<R>) -> App<R> {
        let mut state = TableState::default();
        state.select(Some(0));
        App {
            service,
            state,
            column: AssignmentField::Name,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            status: None,
        }
    }

    pub fn active_class(&self) -> Option<&Class> {
        self.service.active_class()
    }

    pub fn active_index(&self) -> usize {
        self.service.book().active_index().unwrap_or(0)
    }

    fn active_id(&self) -> Option<String> {
        self.active_class().map(|c| c.id.clone())
    }

    fn selected_row_id(&self) -> Option<String> {
        let i = self.state.selected()?;
        self.active_class()
            .and_then(|c| c.assignments.get(i))
            .map(|a| a.id.clone())
    }

    fn row_count(&self) -> usize {
        self.active_class().map(|c| c.assignments.len()).unwrap_or(0)
    }

    fn clamp_selection(&mut self) {
        let len = self.row_count();
        if len == 0 {
            self.state.select(None);
        } else {
            let i = self.state.selected().unwrap_or(0).min(len - 1);
            self.state.select(Some(i));
        }
    }

    fn handle<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.status = Some(format!("Error: {:#}", e));
                None
            }
        }
    }

    pub fn next(&mut self) {
        let len = self.row_count();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.row_count();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn next_column(&mut self) {
        self.column = self.column.next();
    }

    pub fn previous_column(&mut self) {
        self.column = self.column.previous();
    }

    fn select_class_at(&mut self, index: usize) {
        let id = self.service.classes().get(index).map(|c| c.id.clone());
        if let Some(id) = id {
            let result = self.service.select_class(&id);
            self.handle(result);
            self.state.select(Some(0));
            self.clamp_selection();
        }
    }

    pub fn next_class(&mut self) {
        let len = self.service.classes().len();
        if len == 0 { return; }
        self.select_class_at((self.active_index() + 1) % len);
    }

    pub fn previous_class(&mut self) {
        let len = self.service.classes().len();
        if len == 0 { return; }
        self.select_class_at((self.active_index() + len - 1) % len);
    }

    pub fn add_class(&mut self) {
        let result = self.service.add_class();
        self.handle(result);
        self.state.select(Some(0));
    }

    pub fn remove_class(&mut self) {
        if let Some(id) = self.active_id() {
            let result = self.service.remove_class(&id);
            self.handle(result);
            self.state.select(Some(0));
            self.clamp_selection();
        }
    }

    pub fn add_row(&mut self) {
        if let Some(id) = self.active_id() {
            let result = self.service.add_assignment(&id);
            if self.handle(result).flatten().is_some() {
                self.state.select(Some(self.row_count().saturating_sub(1)));
            }
        }
    }

    pub fn can_delete_row(&self) -> bool {
        self.active_class().map(|c| c.can_remove_assignment()).unwrap_or(false)
    }

    pub fn delete_row(&mut self) {
        if !self.can_delete_row() {
            self.status = Some("Cannot remove the only remaining row.".to_string());
            return;
        }
        if let (Some(class_id), Some(row_id)) = (self.active_id(), self.selected_row_id()) {
            let result = self.service.remove_assignment(&class_id, &row_id);
            self.handle(result);
            self.clamp_selection();
        }
    }

    pub fn clear_class(&mut self) {
        if let Some(id) = self.active_id() {
            let result = self.service.clear_class(&id);
            self.handle(result);
            self.clamp_selection();
        }
    }

    pub fn request_clear_all(&mut self) {
        self.input_mode = InputMode::ConfirmClearAll;
    }

    pub fn resolve_clear_all(&mut self, confirmed: bool) {
        self.input_mode = InputMode::Normal;
        let result = self.service.clear_all(|_| confirmed);
        if self.handle(result) == Some(true) {
            self.status = Some("All classes deleted.".to_string());
            self.state.select(Some(0));
        }
    }

    pub fn calculate(&mut self) {
        if let Some(id) = self.active_id() {
            self.status = self
                .service
                .summary(&id)
                .map(|s| s.report_lines().join(" | "));
        }
    }

    fn current_value(&self, target: EditTarget) -> Option<String> {
        let class = self.active_class()?;
        match target {
            EditTarget::ClassName => Some(class.name.clone()),
            EditTarget::FinalGoal => Some(class.final_goal.clone()),
            EditTarget::Cell(field) => {
                let i = self.state.selected()?;
                class.assignments.get(i).map(|a| a.field(field).to_string())
            }
        }
    }

    pub fn start_edit(&mut self, target: EditTarget) {
        if let Some(value) = self.current_value(target) {
            self.cursor_position = value.chars().count();
            self.input = value;
            self.input_mode = InputMode::Editing(target);
            self.status = None;
        }
    }

    pub fn edit_cell(&mut self) {
        self.start_edit(EditTarget::Cell(self.column));
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.input.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.input.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Writes the input buffer into the field being edited.
    pub fn submit_input(&mut self) {
        let InputMode::Editing(target) = self.input_mode else {
            return;
        };
        let value = std::mem::take(&mut self.input);
        self.cursor_position = 0;
        self.exit_input_mode();

        let Some(class_id) = self.active_id() else {
            return;
        };
        let result = match target {
            EditTarget::ClassName => self.service.rename_class(&class_id, &value),
            EditTarget::FinalGoal => self.service.set_final_goal(&class_id, &value),
            EditTarget::Cell(field) => match self.selected_row_id() {
                Some(row_id) => self.service.update_assignment(&class_id, &row_id, field, &value),
                None => Ok(false),
            },
        };
        self.handle(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook_core::StoreError;
    use std::cell::Cell;

    #[derive(Default)]
    struct MockRepo {
        saves: Cell<usize>,
    }

    impl GradeBookRepository for &MockRepo {
        fn load(&self) -> Result<Option<Vec<Class>>, StoreError> { Ok(None) }
        fn save(&self, _classes: &[Class]) -> Result<(), StoreError> {
            self.saves.set(self.saves.get() + 1);
            Ok(())
        }
    }

    fn app(repo: &MockRepo) -> App<&MockRepo> {
        App::new(GradeBookService::open(repo).unwrap())
    }

    fn type_text<R: GradeBookRepository>(app: &mut App<R>, text: &str) {
        for c in text.chars() {
            app.input_char(c);
        }
    }

    #[test]
    fn test_edit_cell_updates_selected_row() {
        let repo = MockRepo::default();
        let mut app = app(&repo);
        app.next();
        app.next_column();
        app.edit_cell();
        assert_eq!(app.input_mode, InputMode::Editing(EditTarget::Cell(AssignmentField::Grade)));

        type_text(&mut app, "92");
        app.submit_input();

        let class = app.active_class().unwrap();
        assert_eq!(class.assignments[1].grade, "92");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_edit_prefills_and_backspace() {
        let repo = MockRepo::default();
        let mut app = app(&repo);
        app.start_edit(EditTarget::ClassName);
        assert_eq!(app.input, "Class 1");

        app.delete_char();
        type_text(&mut app, "A");
        app.submit_input();
        assert_eq!(app.active_class().unwrap().name, "Class A");
    }

    #[test]
    fn test_delete_row_stops_at_one() {
        let repo = MockRepo::default();
        let mut app = app(&repo);
        for _ in 0..5 {
            app.delete_row();
        }
        assert_eq!(app.active_class().unwrap().assignments.len(), 1);
        assert!(!app.can_delete_row());
        assert_eq!(app.state.selected(), Some(0));
        assert!(app.status.is_some());
    }

    #[test]
    fn test_class_navigation_wraps() {
        let repo = MockRepo::default();
        let mut app = app(&repo);
        app.add_class();
        assert_eq!(app.active_index(), 1);
        app.next_class();
        assert_eq!(app.active_index(), 0);
        app.previous_class();
        assert_eq!(app.active_index(), 1);
    }

    #[test]
    fn test_clear_all_waits_for_confirmation() {
        let repo = MockRepo::default();
        let mut app = app(&repo);
        app.add_class();
        app.request_clear_all();
        assert_eq!(app.input_mode, InputMode::ConfirmClearAll);

        app.resolve_clear_all(false);
        assert_eq!(app.service.classes().len(), 2);

        app.request_clear_all();
        app.resolve_clear_all(true);
        assert_eq!(app.service.classes().len(), 1);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_calculate_sets_report() {
        let repo = MockRepo::default();
        let mut app = app(&repo);
        app.column = AssignmentField::Grade;
        app.edit_cell();
        type_text(&mut app, "80");
        app.submit_input();
        app.column = AssignmentField::Weight;
        app.edit_cell();
        type_text(&mut app, "50");
        app.submit_input();
        app.start_edit(EditTarget::FinalGoal);
        type_text(&mut app, "90");
        app.submit_input();

        app.calculate();
        assert_eq!(
            app.status.as_deref(),
            Some("Current Grade: 40% | Total Weight: 50% | Remaining Weight: 50% | Needed Grade on Remaining Tasks: 100%")
        );
        assert_eq!(repo.saves.get(), 4);
    }
}
