pub mod assignment;
pub mod class;
pub mod gradebook;
pub mod operation;

use uuid::Uuid;

/// Opaque identifier for classes and assignments.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}
