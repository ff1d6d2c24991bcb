/// Basic unit tests to verify core functionality
use habit_tracker_server::*;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_habit_creation() {
        let storage = MemoryStorage::new();
        let mut new = NewHabit::new("Test Habit", Frequency::Daily);
        new.description = Some("A test habit".to_string());

        let habit = storage.create_habit(UserId(1), new).unwrap();
        assert_eq!(habit.name, "Test Habit");
        assert_eq!(habit.id, HabitId(1));
        assert_eq!(habit.status, HabitStatus::Active);
    }

    #[test]
    fn test_create_tool_validates_input() {
        let storage = MemoryStorage::new();
        let result = create_habit(&storage, UserId(1), NewHabit::new("ab", Frequency::Daily));

        let Err(ToolError::Domain(DomainError::Validation { issues })) = result else {
            panic!("expected a validation error");
        };
        assert_eq!(issues[0].path, "nomeHabito");
    }

    #[test]
    fn test_server_creation() {
        let server = HabitTrackerServer::new(ServerConfig::for_user(7));
        assert_eq!(server.config().user_id, UserId(7));
        assert!(server.storage().is_empty().unwrap());
    }

    #[test]
    fn test_storage_interface() {
        let storage = MemoryStorage::new();

        // Test that storage implements HabitStorage trait
        let _: &dyn HabitStorage = &storage;
    }
}
