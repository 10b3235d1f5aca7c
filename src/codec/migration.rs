//! Document migrations
//!
//! Each migration upgrades a raw JSON document by exactly one step. The
//! manager chains them from the stored version up to the current one.

use crate::error::{migration_error, MenuResult};
use serde_json::{Map, Value};

/// One upgrade step between two document versions
pub trait DocumentMigration: Send + Sync {
    /// Version this migration upgrades from
    fn from_version(&self) -> u32;

    /// Version this migration upgrades to
    fn to_version(&self) -> u32;

    /// Description of what this migration does
    fn description(&self) -> &str;

    /// Rewrite the document in place
    fn apply(&self, document: &mut Map<String, Value>) -> MenuResult<()>;
}

/// Ordered set of document migrations
pub struct MigrationManager {
    migrations: Vec<Box<dyn DocumentMigration>>,
}

impl MigrationManager {
    /// Manager with the built-in migrations registered
    pub fn new() -> Self {
        Self {
            migrations: vec![Box::new(RowsToGrid)],
        }
    }

    /// Manager with no migrations at all
    pub fn empty() -> Self {
        Self {
            migrations: Vec::new(),
        }
    }

    /// Add a migration. Each step must move to a higher version.
    pub fn register(&mut self, migration: Box<dyn DocumentMigration>) -> MenuResult<()> {
        if migration.to_version() <= migration.from_version() {
            return Err(migration_error(format!(
                "migration '{}' goes from v{} to v{}",
                migration.description(),
                migration.from_version(),
                migration.to_version()
            )));
        }
        self.migrations.push(migration);
        Ok(())
    }

    /// Find migration path from one version to another
    pub fn find_migration_path(&self, from: u32, to: u32) -> Option<Vec<&dyn DocumentMigration>> {
        let mut path = Vec::new();
        let mut current = from;

        while current != to {
            let migration = self
                .migrations
                .iter()
                .find(|m| m.from_version() == current && m.to_version() > current && m.to_version() <= to)?;

            current = migration.to_version();
            path.push(migration.as_ref());
        }

        Some(path)
    }

    pub fn can_migrate(&self, from: u32, to: u32) -> bool {
        self.find_migration_path(from, to).is_some()
    }

    /// Upgrade `document` from version `from` to `to`
    pub fn migrate(&self, document: &mut Value, from: u32, to: u32) -> MenuResult<()> {
        let path = self
            .find_migration_path(from, to)
            .ok_or_else(|| migration_error(format!("no migration path from v{} to v{}", from, to)))?;

        let object = document
            .as_object_mut()
            .ok_or_else(|| migration_error("document is not a JSON object"))?;

        for migration in path {
            log::info!("Applying document migration: {}", migration.description());
            migration.apply(object)?;
            object.insert("version".to_string(), Value::from(migration.to_version()));
        }
        Ok(())
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// v1 documents were always nine columns wide and stored `rows` and `items`;
/// item entries used `slot` for the cell index.
struct RowsToGrid;

impl DocumentMigration for RowsToGrid {
    fn from_version(&self) -> u32 {
        1
    }

    fn to_version(&self) -> u32 {
        2
    }

    fn description(&self) -> &str {
        "Replace rows/items with width, height and slots"
    }

    fn apply(&self, document: &mut Map<String, Value>) -> MenuResult<()> {
        let rows = document
            .remove("rows")
            .ok_or_else(|| migration_error("v1 document has no rows field"))?;
        document.insert("height".to_string(), rows);
        document.insert("width".to_string(), Value::from(9u32));

        let mut items = match document.remove("items") {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(migration_error("v1 items field is not a list")),
            None => Vec::new(),
        };
        for item in &mut items {
            if let Some(entry) = item.as_object_mut() {
                if let Some(index) = entry.remove("slot") {
                    entry.insert("index".to_string(), index);
                }
            }
        }
        document.insert("slots".to_string(), Value::Array(items));
        Ok(())
    }
}
