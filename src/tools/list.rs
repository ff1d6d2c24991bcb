/// Tool for listing habits
///
/// This module implements the habit_list MCP tool.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::{validate_list_query, Frequency, Habit, HabitStatus, SortOrder, UserId};
use crate::response::{list_response, SuccessResponse};
use crate::storage::{HabitStorage, ListQuery};
use crate::tools::ToolError;

/// Parameters for listing habits
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListHabitsParams {
    /// Only habits with this status
    #[serde(default)]
    pub status: Option<HabitStatus>,
    /// Only habits in this category
    #[serde(rename = "categoriaId", default)]
    pub category_id: Option<u64>,
    /// Only habits with this frequency
    #[serde(rename = "frequencia", default)]
    pub frequency: Option<Frequency>,
    /// nome_asc, nome_desc, data_criacao_asc or data_criacao_desc (default)
    #[serde(rename = "ordenacao", default)]
    pub sort: Option<SortOrder>,
    /// 1-based page number (default 1)
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page, at most 100 (default 20)
    #[serde(rename = "pageSize", default)]
    pub page_size: Option<u32>,
}

/// List habits using the provided storage
pub fn list_habits<S: HabitStorage>(
    storage: &S,
    owner: UserId,
    params: ListHabitsParams,
) -> Result<SuccessResponse<Vec<Habit>>, ToolError> {
    validate_list_query(params.category_id, params.page, params.page_size)?;

    let query = ListQuery {
        status: params.status,
        category_id: params.category_id,
        frequency: params.frequency,
        sort: params.sort.unwrap_or_default(),
        page: params.page,
        page_size: params.page_size,
    };

    let page = storage.list_habits(owner, &query)?;
    Ok(list_response(page.items, query.page(), query.page_size(), page.total))
}
