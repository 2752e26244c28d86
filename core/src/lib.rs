pub mod config;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;

pub use config::Config;
pub use input::{expand_key, parse_args, parse_numeric, NumericInput, ParsedInput};
pub use model::assignment::{Assignment, AssignmentField};
pub use model::class::{Class, DEFAULT_ASSIGNMENT_COUNT};
pub use model::gradebook::GradeBook;
pub use model::operation::Operation;
pub use repository::{FileGradeBookRepository, GradeBookRepository, StoreError};
pub use service::dto::ClassDto;
pub use service::grade_calc::{calculate_grade, GradeSummary};
pub use service::gradebook_service::{GradeBookService, CLEAR_ALL_PROMPT};
pub use service::reducer::apply;
