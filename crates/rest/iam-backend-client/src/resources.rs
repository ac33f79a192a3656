//! Generic list/get/add/update/delete over the managed records.

use crate::client::BackendClient;
use crate::error::{ClientError, ClientResult};
use iam_console_core::models::{Resource, ResourceId, User};
use iam_console_core::{ActionOutcome, BackendError, EditSession};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascend,
    Descend,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascend => "ascend",
            SortOrder::Descend => "descend",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascend" => Ok(SortOrder::Ascend),
            "descend" => Ok(SortOrder::Descend),
            other => Err(format!("unknown sort order '{}', expected ascend or descend", other)),
        }
    }
}

/// Paging, search and sort parameters of a list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    /// Search column and the value to look for.
    pub field: Option<String>,
    pub value: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            field: None,
            value: None,
            sort_field: None,
            sort_order: None,
        }
    }
}

impl ListQuery {
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            ..Default::default()
        }
    }

    pub fn search(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self.value = Some(value.into());
        self
    }

    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("p", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("field", self.field.clone().unwrap_or_default()),
            ("value", self.value.clone().unwrap_or_default()),
            ("sortField", self.sort_field.clone().unwrap_or_default()),
            (
                "sortOrder",
                self.sort_order
                    .map(|order| order.as_str().to_string())
                    .unwrap_or_default(),
            ),
        ]
    }
}

/// One page of a list plus the total number of matching records.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn page_count(&self, page_size: u32) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(page_size))
    }
}

fn plural_path<T: Resource>() -> String {
    format!("get-{}s", T::KIND)
}

impl BackendClient {
    async fn fetch_page<T: Resource>(
        &self,
        path: &str,
        owner: Option<&str>,
        query: &ListQuery,
    ) -> ClientResult<Page<T>> {
        let pairs = query.to_pairs();
        let owner_pair = owner.map(|owner| ("owner", owner));
        let url = self.endpoint_with_query(
            path,
            owner_pair
                .into_iter()
                .chain(pairs.iter().map(|(k, v)| (*k, v.as_str()))),
        )?;

        let response = self.get_envelope(url).await?.into_result()?;
        let items: Vec<T> = if response.data.is_null() {
            Vec::new()
        } else {
            response.data_as()?
        };
        let total = response.data2.as_u64().ok_or_else(|| {
            BackendError::UnexpectedResponse(format!(
                "expected a record count in data2, got {}",
                response.data2
            ))
        })?;

        Ok(Page { items, total })
    }

    /// One page of `owner`'s records (`GET /api/get-<kind>s?owner=&p=&pageSize=...`).
    pub async fn list<T: Resource>(&self, owner: &str, query: &ListQuery) -> ClientResult<Page<T>> {
        self.fetch_page(&plural_path::<T>(), Some(owner), query).await
    }

    /// Every record of `owner`, unpaged.
    pub async fn list_all<T: Resource>(&self, owner: &str) -> ClientResult<Vec<T>> {
        let url = self.endpoint_with_query(&plural_path::<T>(), [("owner", owner)])?;
        let items: Option<Vec<T>> = self.get_json(url).await?;
        Ok(items.unwrap_or_default())
    }

    /// Users across all organizations (`GET /api/get-global-users`).
    pub async fn list_global_users(&self, query: &ListQuery) -> ClientResult<Page<User>> {
        self.fetch_page("get-global-users", None, query).await
    }

    /// `None` when no such record exists.
    pub async fn get<T: Resource>(&self, id: &ResourceId) -> ClientResult<Option<T>> {
        let id = id.to_string();
        let url = self.endpoint_with_query(&format!("get-{}", T::KIND), [("id", id.as_str())])?;
        self.get_json(url).await
    }

    pub async fn add<T: Resource>(&self, record: &T) -> ClientResult<ActionOutcome> {
        let url = self.endpoint(&format!("add-{}", T::KIND))?;
        let response = self.post_json(url, record).await?.into_result()?;
        let outcome = ActionOutcome::from_response(&response)?;
        info!("Added {} {} ({:?})", T::KIND, record.id(), outcome);
        Ok(outcome)
    }

    /// Replaces the record stored under `id`; `record` may carry a new name.
    pub async fn update<T: Resource>(&self, id: &ResourceId, record: &T) -> ClientResult<ActionOutcome> {
        let id_value = id.to_string();
        let url = self.endpoint_with_query(
            &format!("update-{}", T::KIND),
            [("id", id_value.as_str())],
        )?;
        let response = self.post_json(url, record).await?.into_result()?;
        let outcome = ActionOutcome::from_response(&response)?;
        info!("Updated {} {} ({:?})", T::KIND, id, outcome);
        Ok(outcome)
    }

    pub async fn delete<T: Resource>(&self, record: &T) -> ClientResult<ActionOutcome> {
        let url = self.endpoint(&format!("delete-{}", T::KIND))?;
        let response = self.post_json(url, record).await?.into_result()?;
        let outcome = ActionOutcome::from_response(&response)?;
        info!("Deleted {} {} ({:?})", T::KIND, record.id(), outcome);
        Ok(outcome)
    }

    /// Saves the draft of an edit session under the saved record's id.
    ///
    /// The session is committed when the backend accepts the update and
    /// rolled back when it rejects it. Transport failures leave the draft
    /// in place so the save can be retried.
    pub async fn submit_edit<T: Resource>(
        &self,
        session: &mut EditSession<T>,
    ) -> ClientResult<ActionOutcome> {
        let id = session.saved().id();

        let result = self.update(&id, session.draft()).await;

        match result {
            Ok(outcome) => {
                session.commit();
                Ok(outcome)
            }
            Err(error @ ClientError::BackendError(BackendError::Rejected { .. })) => {
                warn!("Save of {} {} rejected, reverting draft: {}", T::KIND, id, error);
                session.rollback();
                Err(error)
            }
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs() {
        let query = ListQuery::page(2, 20)
            .search("name", "alice")
            .sort("createdTime", SortOrder::Descend);

        let pairs = query.to_pairs();
        assert_eq!(pairs[0], ("p", "2".to_string()));
        assert_eq!(pairs[1], ("pageSize", "20".to_string()));
        assert_eq!(pairs[2], ("field", "name".to_string()));
        assert_eq!(pairs[5], ("sortOrder", "descend".to_string()));

        let defaults = ListQuery::default().to_pairs();
        assert_eq!(defaults[1], ("pageSize", "10".to_string()));
        assert_eq!(defaults[4], ("sortField", String::new()));
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("ascend".parse::<SortOrder>(), Ok(SortOrder::Ascend));
        assert!("asc".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_page_count() {
        let page: Page<()> = Page {
            items: Vec::new(),
            total: 21,
        };
        assert_eq!(page.page_count(10), 3);
        assert_eq!(page.page_count(0), 0);
    }
}
