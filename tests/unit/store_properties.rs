/// Behavioural properties of the habit store, exercised through the public API
use std::cmp::Ordering;

use chrono::{Duration, Utc};
use habit_tracker_server::*;

const OWNER: UserId = UserId(1);

fn daily(name: &str) -> NewHabit {
    NewHabit::new(name, Frequency::Daily)
}

fn names(page: &HabitPage) -> Vec<String> {
    page.items.iter().map(|h| h.name.clone()).collect()
}

#[test]
fn test_ids_are_unique_and_increasing() {
    let storage = MemoryStorage::new();
    let mut last = HabitId(0);

    for i in 0..10 {
        let habit = storage.create_habit(OWNER, daily(&format!("Habit {}", i))).unwrap();
        assert!(habit.id > last);
        last = habit.id;

        if i % 3 == 0 {
            storage.delete_habit(habit.id, OWNER).unwrap();
        }
    }
}

#[test]
fn test_status_filter_returns_only_that_status() {
    let storage = MemoryStorage::new();
    let statuses = [HabitStatus::Active, HabitStatus::Inactive, HabitStatus::Completed];

    for (i, status) in statuses.iter().cycle().take(9).enumerate() {
        let habit = storage.create_habit(OWNER, daily(&format!("Habit {}", i))).unwrap();
        let patch = HabitPatch {
            status: Some(*status),
            ..Default::default()
        };
        storage.update_habit(habit.id, OWNER, patch).unwrap();
    }

    for status in statuses {
        let query = ListQuery {
            status: Some(status),
            ..Default::default()
        };
        let page = storage.list_habits(OWNER, &query).unwrap();
        assert_eq!(page.total, 3);
        assert!(page.items.iter().all(|h| h.status == status));
    }
}

#[test]
fn test_name_sort_directions() {
    let storage = MemoryStorage::new();
    for name in ["Yoga", "estudar", "Água", "Beber água", "caminhar", "Éter"] {
        storage.create_habit(OWNER, daily(name)).unwrap();
    }

    let asc_query = ListQuery {
        sort: SortOrder::NameAsc,
        ..Default::default()
    };
    let desc_query = ListQuery {
        sort: SortOrder::NameDesc,
        ..Default::default()
    };

    let asc = names(&storage.list_habits(OWNER, &asc_query).unwrap());
    assert_eq!(asc, vec!["Água", "Beber água", "caminhar", "estudar", "Éter", "Yoga"]);

    let mut desc = names(&storage.list_habits(OWNER, &desc_query).unwrap());
    desc.reverse();
    assert_eq!(desc, asc);
}

#[test]
fn test_pages_cover_the_filtered_set() {
    let storage = MemoryStorage::new();
    for i in 0..7 {
        storage.create_habit(OWNER, daily(&format!("Habit {}", i))).unwrap();
    }

    let page_size = 3;
    let total_pages = 3; // ceil(7 / 3)
    let mut seen = Vec::new();

    for page in 1..=total_pages + 1 {
        let query = ListQuery {
            sort: SortOrder::CreatedAsc,
            page: Some(page),
            page_size: Some(page_size),
            ..Default::default()
        };
        let result = storage.list_habits(OWNER, &query).unwrap();
        assert_eq!(result.total, 7);

        if page > total_pages {
            assert!(result.items.is_empty());
        } else {
            assert!(!result.items.is_empty());
        }
        seen.extend(result.items.into_iter().map(|h| h.id));
    }

    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 7);
}

#[test]
fn test_partial_update_keeps_omitted_fields() {
    let storage = MemoryStorage::new();
    let mut new = NewHabit::new("Weekly review", Frequency::Weekly);
    new.days_of_week = Some(vec![DayOfWeek::Sunday]);
    new.start_time = Some("18:00".to_string());
    new.estimated_duration = Some(45);
    new.category_id = Some(3);
    new.end_date = Some(Utc::now() + Duration::days(365));
    let before = storage.create_habit(OWNER, new).unwrap();

    let after = storage
        .update_habit(
            before.id,
            OWNER,
            HabitPatch {
                estimated_duration: Some(Some(60)),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(after.estimated_duration, Some(60));
    assert_eq!(
        Habit {
            estimated_duration: before.estimated_duration,
            ..after
        },
        before
    );
}

#[test]
fn test_delete_then_get_is_not_found() {
    let storage = MemoryStorage::new();
    let habit = storage.create_habit(OWNER, daily("Short lived")).unwrap();

    storage.delete_habit(habit.id, OWNER).unwrap();
    assert_eq!(storage.get_habit(habit.id, OWNER).unwrap(), None);
}

#[test]
fn test_weekly_habit_frequency_filter() {
    let storage = MemoryStorage::new();
    let new: NewHabit = serde_json::from_value(serde_json::json!({
        "nomeHabito": "Team sport",
        "frequencia": "semanal",
        "diasSemana": ["segunda"]
    }))
    .unwrap();
    let habit = create_habit(&storage, OWNER, new).unwrap().data;
    assert_eq!(habit.days_of_month, None);

    let weekly = ListHabitsParams {
        frequency: Some(Frequency::Weekly),
        ..Default::default()
    };
    let response = list_habits(&storage, OWNER, weekly).unwrap();
    assert!(response.data.iter().any(|h| h.id == habit.id));

    let monthly = ListHabitsParams {
        frequency: Some(Frequency::Monthly),
        ..Default::default()
    };
    let response = list_habits(&storage, OWNER, monthly).unwrap();
    assert!(response.data.iter().all(|h| h.id != habit.id));
}

#[test]
fn test_other_owner_sees_nothing() {
    let storage = MemoryStorage::new();
    let habit = storage.create_habit(OWNER, daily("Mine only")).unwrap();
    let stranger = UserId(2);

    assert_eq!(storage.get_habit(habit.id, stranger).unwrap(), None);
    assert_eq!(storage.list_habits(stranger, &ListQuery::default()).unwrap().total, 0);
    assert!(storage.update_habit(habit.id, stranger, HabitPatch::default()).is_err());
    assert!(storage.delete_habit(habit.id, stranger).is_err());
    assert!(storage.duplicate_habit(habit.id, stranger, "Stolen".to_string()).is_err());
    assert!(storage.get_habit(habit.id, OWNER).unwrap().is_some());
}

#[test]
fn test_duplicate_carries_end_date_even_if_it_precedes_new_start() {
    let storage = MemoryStorage::new();
    let mut new = daily("Short challenge");
    new.start_date = Some(Utc::now());
    new.end_date = Some(Utc::now() + Duration::days(7));
    let source = storage.create_habit(OWNER, new).unwrap();

    // Move the end date back so that it lies before any fresh start date
    let past_end = Utc::now() - Duration::days(1);
    storage
        .update_habit(
            source.id,
            OWNER,
            HabitPatch {
                end_date: Some(Some(past_end)),
                ..Default::default()
            },
        )
        .unwrap();

    let copy = storage
        .duplicate_habit(source.id, OWNER, "Short challenge again".to_string())
        .unwrap();
    assert_eq!(copy.end_date, Some(past_end));
    assert_eq!(copy.end_date.unwrap().cmp(&copy.start_date), Ordering::Less);
}
