use crate::model::assignment::AssignmentField;

/// A single user intent against the [`GradeBook`](crate::GradeBook).
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    AddClass,
    RemoveClass {
        class_id: String,
    },
    RenameClass {
        class_id: String,
        name: String,
    },
    SelectClass {
        class_id: String,
    },
    AddAssignment {
        class_id: String,
    },
    UpdateAssignmentField {
        class_id: String,
        assignment_id: String,
        field: AssignmentField,
        value: String,
    },
    RemoveAssignment {
        class_id: String,
        assignment_id: String,
    },
    SetFinalGoal {
        class_id: String,
        value: String,
    },
    ClearClass {
        class_id: String,
    },
    ClearAll,
}

impl Operation {
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::AddClass => "add_class",
            Operation::RemoveClass { .. } => "remove_class",
            Operation::RenameClass { .. } => "rename_class",
            Operation::SelectClass { .. } => "select_class",
            Operation::AddAssignment { .. } => "add_assignment",
            Operation::UpdateAssignmentField { .. } => "update_assignment_field",
            Operation::RemoveAssignment { .. } => "remove_assignment",
            Operation::SetFinalGoal { .. } => "set_final_goal",
            Operation::ClearClass { .. } => "clear_class",
            Operation::ClearAll => "clear_all",
        }
    }
}
