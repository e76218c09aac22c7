use crate::models::{MeasurementTable, RoomTable, Table};

pub struct SchemaManager {
    tables: Vec<Box<dyn Table>>,
}

impl SchemaManager {
    /// Statements run in registration order, so a table must be registered
    /// after every table it references.
    pub fn new(tables: Vec<Box<dyn Table>>) -> Self {
        let mut seen: Vec<&str> = Vec::with_capacity(tables.len());

        for table in &tables {
            for dependency in table.dependencies() {
                assert!(
                    seen.contains(&dependency),
                    "table `{}` is registered before its dependency `{}`",
                    table.name(),
                    dependency
                );
            }
            seen.push(table.name());
        }

        Self { tables }
    }

    pub fn create_schema(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.create()).collect()
    }

    /// Drops in reverse order so referencing tables go first.
    pub fn dispose_schema(&self) -> Vec<String> {
        self.tables
            .iter()
            .rev()
            .map(|table| table.dispose())
            .collect()
    }
}

impl Default for SchemaManager {
    fn default() -> Self {
        SchemaManager::new(vec![Box::new(RoomTable), Box::new(MeasurementTable)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct MockRoomTable;
    impl Table for MockRoomTable {
        fn name(&self) -> &'static str {
            "rooms"
        }

        fn create(&self) -> String {
            "CREATE TABLE rooms;".to_string()
        }

        fn dispose(&self) -> String {
            "DROP TABLE rooms;".to_string()
        }

        fn dependencies(&self) -> Vec<&'static str> {
            vec![]
        }
    }

    #[derive(Clone)]
    struct MockMeasurementTable;
    impl Table for MockMeasurementTable {
        fn name(&self) -> &'static str {
            "measurements"
        }

        fn create(&self) -> String {
            "CREATE TABLE measurements;".to_string()
        }

        fn dispose(&self) -> String {
            "DROP TABLE measurements;".to_string()
        }

        fn dependencies(&self) -> Vec<&'static str> {
            vec!["rooms"]
        }
    }

    #[test]
    fn test_creation_follows_registration_order() {
        let manager = SchemaManager::new(vec![
            Box::new(MockRoomTable),
            Box::new(MockMeasurementTable),
        ]);

        let statements = manager.create_schema();

        assert_eq!(statements[0], "CREATE TABLE rooms;");
        assert_eq!(statements[1], "CREATE TABLE measurements;");
    }

    #[test]
    fn test_disposal_runs_in_reverse() {
        let manager = SchemaManager::new(vec![
            Box::new(MockRoomTable),
            Box::new(MockMeasurementTable),
        ]);

        let statements = manager.dispose_schema();

        assert_eq!(statements[0], "DROP TABLE measurements;");
        assert_eq!(statements[1], "DROP TABLE rooms;");
    }

    #[test]
    #[should_panic(expected = "registered before its dependency")]
    fn test_misordered_registration_panics() {
        SchemaManager::new(vec![
            Box::new(MockMeasurementTable),
            Box::new(MockRoomTable),
        ]);
    }
}
