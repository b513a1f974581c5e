//! Item request service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::AppResult,
    models::request::{CreateItemRequest, ItemRequest, ItemRequestDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
}

impl RequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new item request
    pub async fn create_request(
        &self,
        requester_id: i64,
        request: CreateItemRequest,
    ) -> AppResult<ItemRequest> {
        request.validate()?;

        // Verify requester exists
        self.repository.users.get_by_id(requester_id).await?;

        let created = self
            .repository
            .requests
            .create(requester_id, &request.description, Utc::now())
            .await?;
        tracing::info!("Request created: id={}", created.id);
        Ok(created)
    }

    /// Get a single request with the items listed in answer to it
    pub async fn get_request(&self, request_id: i64, caller_id: i64) -> AppResult<ItemRequestDetails> {
        self.repository.users.get_by_id(caller_id).await?;
        let request = self.repository.requests.get_by_id(request_id).await?;
        let items = self.repository.items.find_all_by_request(request_id).await?;
        Ok(ItemRequestDetails::new(request, items))
    }

    /// All requests made by the caller, newest first, with answering items
    pub async fn get_all_requests(&self, caller_id: i64) -> AppResult<Vec<ItemRequestDetails>> {
        self.repository.users.get_by_id(caller_id).await?;
        let requests = self
            .repository
            .requests
            .find_all_by_requester(caller_id)
            .await?;

        let mut result = Vec::with_capacity(requests.len());
        for request in requests {
            let items = self.repository.items.find_all_by_request(request.id).await?;
            result.push(ItemRequestDetails::new(request, items));
        }
        Ok(result)
    }
}
