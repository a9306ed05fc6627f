use crate::error::Result;
use crate::metadata::Entity;

/// Read-only supplier of entity metadata.
///
/// This is the seam between the schema builder and whatever ORM layer owns the
/// entity definitions; the builder reads the full entity list once per build.
pub trait MetadataSource: Send + Sync {
    fn entities(&self) -> Result<Vec<Entity>>;
}

impl MetadataSource for Vec<Entity> {
    fn entities(&self) -> Result<Vec<Entity>> {
        Ok(self.clone())
    }
}
