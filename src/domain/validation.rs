/// Input validation for habit creation, update, duplication and listing
///
/// Every rule violation is collected into a `ValidationIssue` addressed by
/// the field's wire name, so a caller sees all problems with a request at
/// once. The store assumes its input has passed through here.

use chrono::{DateTime, Utc};

use crate::domain::{
    DayOfWeek, DomainError, Frequency, Habit, HabitPatch, NewHabit, ValidationIssue,
};

const NAME_MIN_CHARS: usize = 3;
const NAME_MAX_CHARS: usize = 50;
const DESCRIPTION_MAX_CHARS: usize = 200;
const MAX_PAGE_SIZE: u32 = 100;

/// Validate input for a new habit
pub fn validate_new(new: &NewHabit, now: DateTime<Utc>) -> Result<(), DomainError> {
    let mut issues = Vec::new();

    check_name(&new.name, "nomeHabito", &mut issues);
    check_description(new.description.as_deref(), &mut issues);
    check_days_of_week(new.days_of_week.as_deref(), &mut issues);
    check_days_of_month(new.days_of_month.as_deref(), &mut issues);
    check_start_time(new.start_time.as_deref(), &mut issues);
    check_duration(new.estimated_duration, &mut issues);
    check_category(new.category_id, &mut issues);
    if let Some(start_date) = new.start_date {
        check_start_date(start_date, now, &mut issues);
    }

    check_schedule(
        new.frequency,
        new.days_of_week.as_deref(),
        new.days_of_month.as_deref(),
        &mut issues,
    );
    check_date_range(new.start_date.unwrap_or(now), new.end_date, &mut issues);

    finish(issues)
}

/// Validate a partial update against the habit it will be applied to
///
/// Field rules only apply to supplied fields. The weekday/day-of-month
/// requirement is rechecked on the merged record when the patch touches
/// the frequency or a day list, and the date ordering when it touches
/// either date.
pub fn validate_patch(
    existing: &Habit,
    patch: &HabitPatch,
    now: DateTime<Utc>,
) -> Result<(), DomainError> {
    let mut issues = Vec::new();

    if let Some(name) = &patch.name {
        check_name(name, "nomeHabito", &mut issues);
    }
    if let Some(description) = &patch.description {
        check_description(description.as_deref(), &mut issues);
    }
    if let Some(days) = &patch.days_of_week {
        check_days_of_week(days.as_deref(), &mut issues);
    }
    if let Some(days) = &patch.days_of_month {
        check_days_of_month(days.as_deref(), &mut issues);
    }
    if let Some(start_time) = &patch.start_time {
        check_start_time(start_time.as_deref(), &mut issues);
    }
    if let Some(duration) = patch.estimated_duration {
        check_duration(duration, &mut issues);
    }
    if let Some(category_id) = patch.category_id {
        check_category(category_id, &mut issues);
    }
    if let Some(start_date) = patch.start_date {
        check_start_date(start_date, now, &mut issues);
    }

    let mut merged = existing.clone();
    merged.apply(patch.clone());

    let schedule_touched =
        patch.frequency.is_some() || patch.days_of_week.is_some() || patch.days_of_month.is_some();
    if schedule_touched {
        check_schedule(
            merged.frequency,
            merged.days_of_week.as_deref(),
            merged.days_of_month.as_deref(),
            &mut issues,
        );
    }

    if patch.start_date.is_some() || patch.end_date.is_some() {
        check_date_range(merged.start_date, merged.end_date, &mut issues);
    }

    finish(issues)
}

/// Validate the name given to a duplicated habit
pub fn validate_habit_name(name: &str) -> Result<(), DomainError> {
    let mut issues = Vec::new();
    check_name(name, "nomeNovoHabito", &mut issues);
    finish(issues)
}

/// Validate the category filter and pagination parameters of a listing
pub fn validate_list_query(
    category_id: Option<u64>,
    page: Option<u32>,
    page_size: Option<u32>,
) -> Result<(), DomainError> {
    let mut issues = Vec::new();

    check_category(category_id, &mut issues);
    if page == Some(0) {
        issues.push(ValidationIssue::new("page", "Page must be a positive integer"));
    }
    match page_size {
        Some(0) => issues.push(ValidationIssue::new(
            "pageSize",
            "Page size must be a positive integer",
        )),
        Some(size) if size > MAX_PAGE_SIZE => issues.push(ValidationIssue::new(
            "pageSize",
            format!("Page size cannot exceed {}", MAX_PAGE_SIZE),
        )),
        _ => {}
    }

    finish(issues)
}

fn finish(issues: Vec<ValidationIssue>) -> Result<(), DomainError> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation { issues })
    }
}

fn has_issue(issues: &[ValidationIssue], path: &str) -> bool {
    issues.iter().any(|issue| issue.path == path)
}

fn check_name(name: &str, path: &str, issues: &mut Vec<ValidationIssue>) {
    let chars = name.chars().count();

    if chars < NAME_MIN_CHARS {
        issues.push(ValidationIssue::new(
            path,
            format!("Habit name must be at least {} characters", NAME_MIN_CHARS),
        ));
    } else if chars > NAME_MAX_CHARS {
        issues.push(ValidationIssue::new(
            path,
            format!("Habit name cannot be longer than {} characters", NAME_MAX_CHARS),
        ));
    } else if name.trim().is_empty() {
        issues.push(ValidationIssue::new(path, "Habit name cannot contain only whitespace"));
    }
}

fn check_description(description: Option<&str>, issues: &mut Vec<ValidationIssue>) {
    if let Some(desc) = description {
        if desc.chars().count() > DESCRIPTION_MAX_CHARS {
            issues.push(ValidationIssue::new(
                "descricao",
                format!("Description cannot be longer than {} characters", DESCRIPTION_MAX_CHARS),
            ));
        }
    }
}

fn check_days_of_week(days: Option<&[DayOfWeek]>, issues: &mut Vec<ValidationIssue>) {
    if let Some([]) = days {
        issues.push(ValidationIssue::new("diasSemana", "Select at least one day of the week"));
    }
}

fn check_days_of_month(days: Option<&[u8]>, issues: &mut Vec<ValidationIssue>) {
    match days {
        Some([]) => issues.push(ValidationIssue::new(
            "diasMes",
            "Select at least one day of the month",
        )),
        Some(days) if days.iter().any(|day| !(1..=31).contains(day)) => {
            issues.push(ValidationIssue::new(
                "diasMes",
                "Days of the month must be between 1 and 31",
            ));
        }
        _ => {}
    }
}

fn check_start_time(start_time: Option<&str>, issues: &mut Vec<ValidationIssue>) {
    if let Some(time) = start_time {
        if !is_valid_clock_time(time) {
            issues.push(ValidationIssue::new("horarioInicio", "Invalid start time, use HH:MM"));
        }
    }
}

/// `H:MM` or `HH:MM` on a 24-hour clock
fn is_valid_clock_time(time: &str) -> bool {
    let Some((hours, minutes)) = time.split_once(':') else {
        return false;
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hours) || !all_digits(minutes) || hours.len() > 2 || minutes.len() != 2 {
        return false;
    }

    match (hours.parse::<u8>(), minutes.parse::<u8>()) {
        (Ok(h), Ok(m)) => h <= 23 && m <= 59,
        _ => false,
    }
}

fn check_duration(duration: Option<u32>, issues: &mut Vec<ValidationIssue>) {
    if duration == Some(0) {
        issues.push(ValidationIssue::new(
            "duracaoEstimada",
            "Estimated duration must be greater than zero",
        ));
    }
}

fn check_category(category_id: Option<u64>, issues: &mut Vec<ValidationIssue>) {
    if category_id == Some(0) {
        issues.push(ValidationIssue::new("categoriaId", "Category id must be a positive integer"));
    }
}

/// The start date may be any time today or later
fn check_start_date(
    start_date: DateTime<Utc>,
    now: DateTime<Utc>,
    issues: &mut Vec<ValidationIssue>,
) {
    let start_of_today = now.date_naive().and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());

    if let Some(start_of_today) = start_of_today {
        if start_date < start_of_today {
            issues.push(ValidationIssue::new("dataInicio", "Start date cannot be before today"));
        }
    }
}

/// Weekly habits need weekdays, monthly habits need days of the month
fn check_schedule(
    frequency: Frequency,
    days_of_week: Option<&[DayOfWeek]>,
    days_of_month: Option<&[u8]>,
    issues: &mut Vec<ValidationIssue>,
) {
    match frequency {
        Frequency::Weekly if days_of_week.map_or(true, |d| d.is_empty()) => {
            if !has_issue(issues, "diasSemana") {
                issues.push(ValidationIssue::new(
                    "diasSemana",
                    "Select at least one day of the week for weekly habits",
                ));
            }
        }
        Frequency::Monthly if days_of_month.map_or(true, |d| d.is_empty()) => {
            if !has_issue(issues, "diasMes") {
                issues.push(ValidationIssue::new(
                    "diasMes",
                    "Select at least one day of the month for monthly habits",
                ));
            }
        }
        _ => {}
    }
}

fn check_date_range(
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    issues: &mut Vec<ValidationIssue>,
) {
    if let Some(end_date) = end_date {
        if end_date <= start_date {
            issues.push(ValidationIssue::new(
                "dataTermino",
                "End date must be after the start date",
            ));
        }
    }
}
