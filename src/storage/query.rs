/// Filtering, ordering and pagination of habit listings

use std::cmp::Ordering;

use serde::Serialize;

use crate::domain::{Frequency, Habit, HabitStatus, SortOrder};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Parameters of a habit listing
///
/// Filters are exact matches combined with AND; unset filters match
/// everything. `page` is 1-based.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub status: Option<HabitStatus>,
    pub category_id: Option<u64>,
    pub frequency: Option<Frequency>,
    pub sort: SortOrder,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// One page of a listing plus the size of the whole filtered set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitPage {
    pub items: Vec<Habit>,
    pub total: usize,
}

impl ListQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn matches(&self, habit: &Habit) -> bool {
        self.status.map_or(true, |status| habit.status == status)
            && self.category_id.map_or(true, |id| habit.category_id == Some(id))
            && self.frequency.map_or(true, |freq| habit.frequency == freq)
    }

    /// Filter, sort and slice `habits` into the requested page
    pub fn apply<'a, I>(&self, habits: I) -> HabitPage
    where
        I: IntoIterator<Item = &'a Habit>,
    {
        let mut matching: Vec<&Habit> = habits.into_iter().filter(|h| self.matches(h)).collect();

        // sort_by is stable, so ties keep insertion order
        match self.sort {
            SortOrder::NameAsc => matching.sort_by(|a, b| compare_names(&a.name, &b.name)),
            SortOrder::NameDesc => matching.sort_by(|a, b| compare_names(&b.name, &a.name)),
            SortOrder::CreatedAsc => matching.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortOrder::CreatedDesc => matching.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        let total = matching.len();
        let page_size = self.page_size() as usize;
        let start = (self.page() as usize - 1).saturating_mul(page_size);

        let items = matching
            .into_iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        HabitPage { items, total }
    }
}

/// Locale-style name comparison
///
/// Names are compared on a case- and accent-folded key first, so "água"
/// sorts next to "agua" and before "Banho"; the raw string breaks ties.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(name: &str) -> String {
    name.chars().flat_map(char::to_lowercase).map(fold_accent).collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
