use crate::model::class::Class;
use crate::repository::StoreError;

/// A single durable slot holding the whole list of classes.
pub trait GradeBookRepository {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<Class>>, StoreError>;
    fn save(&self, classes: &[Class]) -> Result<(), StoreError>;

    /// Moves unreadable contents out of the way so a fresh book can be saved.
    fn quarantine(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
