//! Short code issuance, resolution, click accounting, and deletion.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::access;
use crate::domain::entities::{Actor, InsertOutcome, NewUrlMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, is_valid_code};
use crate::utils::url_validator::validate_original_url;

/// Generate-check-insert rounds before giving up on a shorten request.
///
/// With 62^6 codes a single collision is already rare; this bound only
/// matters for a nearly full code space or a misbehaving generator.
pub const MAX_CODE_ATTEMPTS: usize = 16;

/// Rows fetched per storage round trip by [`ShorteningService::list_all`].
pub const LIST_ALL_PAGE: i64 = 500;

/// Result of a delete request.
///
/// Keeps "missing" and "not permitted" apart so the HTTP layer can decide
/// whether to expose the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    Forbidden,
}

impl DeleteOutcome {
    /// Collapses the outcome into the single success flag.
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted)
    }
}

/// One round of the collision loop.
enum Attempt {
    Created(UrlMapping),
    Collision,
}

/// Service for creating, resolving, counting and deleting short links.
///
/// Holds no mutable state of its own; every invariant is delegated to the
/// repository's write-time constraints.
pub struct ShorteningService<M: MappingRepository, G: CodeGenerator> {
    repository: Arc<M>,
    generator: Arc<G>,
    base_url: String,
}

impl<M: MappingRepository, G: CodeGenerator> ShorteningService<M, G> {
    /// Creates a new shortening service.
    ///
    /// `base_url` is the public origin short links are served from, e.g.
    /// `https://s.example.com`.
    pub fn new(repository: Arc<M>, generator: Arc<G>, base_url: impl Into<String>) -> Self {
        Self {
            repository,
            generator,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a mapping for `original_url` owned by `actor`.
    ///
    /// # Flow
    ///
    /// 1. Validate the URL
    /// 2. Reject it if any mapping already targets it
    /// 3. Generate a candidate code and check it is free
    /// 4. Insert; if the insert loses a race on the code, go back to 3
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute HTTP(S) URL.
    /// Returns [`AppError::Conflict`] (`duplicate_url`) if the URL is already shortened.
    /// Returns [`AppError::Internal`] (`code_space_exhausted`) after
    /// [`MAX_CODE_ATTEMPTS`] collisions.
    pub async fn shorten(&self, original_url: &str, actor: &Actor) -> Result<UrlMapping, AppError> {
        let original_url = validate_original_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if self
            .repository
            .find_by_original_url(&original_url)
            .await?
            .is_some()
        {
            return Err(AppError::duplicate_url(&original_url));
        }

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            match self.try_create(&original_url, actor.user_id).await? {
                Attempt::Created(mapping) => {
                    info!(
                        code = %mapping.short_code,
                        user_id = actor.user_id,
                        attempt,
                        "Short link created"
                    );
                    return Ok(mapping);
                }
                Attempt::Collision => {
                    metrics::counter!("short_code_collisions_total").increment(1);
                    debug!(attempt, "Short code collision, retrying");
                }
            }
        }

        warn!(
            attempts = MAX_CODE_ATTEMPTS,
            "Gave up generating a unique short code"
        );
        Err(AppError::code_space_exhausted(MAX_CODE_ATTEMPTS))
    }

    async fn try_create(&self, original_url: &str, created_by: i64) -> Result<Attempt, AppError> {
        let code = self.generator.generate();

        if self.repository.code_exists(&code).await? {
            return Ok(Attempt::Collision);
        }

        let new_mapping = NewUrlMapping {
            original_url: original_url.to_string(),
            short_code: code,
            created_by,
        };

        match self.repository.insert(new_mapping).await? {
            InsertOutcome::Created(mapping) => Ok(Attempt::Created(mapping)),
            InsertOutcome::CodeTaken => Ok(Attempt::Collision),
            // A concurrent request shortened the same URL after our check.
            InsertOutcome::UrlTaken => Err(AppError::duplicate_url(original_url)),
        }
    }

    /// Looks up a mapping by short code. No side effects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this code.
    pub async fn resolve(&self, code: &str) -> Result<UrlMapping, AppError> {
        if !is_valid_code(code) {
            return Err(short_link_not_found(code));
        }

        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| short_link_not_found(code))
    }

    /// Counts one visit to `code` at the current time.
    ///
    /// Absent codes are ignored. Returns whether a mapping was updated.
    pub async fn record_visit(&self, code: &str) -> Result<bool, AppError> {
        self.record_visit_at(code, Utc::now()).await
    }

    /// Counts one visit to `code` that happened at `at`.
    pub async fn record_visit_at(&self, code: &str, at: DateTime<Utc>) -> Result<bool, AppError> {
        if !is_valid_code(code) {
            return Ok(false);
        }

        self.repository.record_visit(code, at).await
    }

    /// Retrieves a mapping by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this id.
    pub async fn get_by_id(&self, id: i64) -> Result<UrlMapping, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "id": id })))
    }

    /// Retrieves a mapping for display to `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for anonymous callers, checked
    /// before the lookup so absence is not revealed.
    pub async fn get_details(&self, id: i64, actor: Option<&Actor>) -> Result<UrlMapping, AppError> {
        if !access::can_view_details(actor) {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authentication required"}),
            ));
        }

        self.get_by_id(id).await
    }

    /// Lists one page of mappings, newest first.
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<UrlMapping>, AppError> {
        self.repository.list(offset, limit).await
    }

    /// Counts all mappings.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Lists every mapping, newest first, reading storage page by page.
    ///
    /// Pages are chained by keyset cursor, so mappings created or deleted
    /// while reading never cause a row to repeat or be skipped among those
    /// that existed at the start.
    pub async fn list_all(&self) -> Result<Vec<UrlMapping>, AppError> {
        let mut all: Vec<UrlMapping> = Vec::new();
        loop {
            let cursor = all.last().map(UrlMapping::cursor);
            let page = self.repository.list_after(cursor, LIST_ALL_PAGE).await?;
            let done = (page.len() as i64) < LIST_ALL_PAGE;
            all.extend(page);
            if done {
                return Ok(all);
            }
        }
    }

    /// Deletes mapping `id` on behalf of `actor`.
    ///
    /// The permission decision is [`access::can_delete`]. The repository is
    /// left untouched unless the outcome is [`DeleteOutcome::Deleted`].
    pub async fn delete_mapping(&self, id: i64, actor: &Actor) -> Result<DeleteOutcome, AppError> {
        let Some(mapping) = self.repository.find_by_id(id).await? else {
            return Ok(DeleteOutcome::NotFound);
        };

        if !access::can_delete(actor, &mapping) {
            info!(id, user_id = actor.user_id, "Delete denied");
            return Ok(DeleteOutcome::Forbidden);
        }

        if self.repository.delete(id).await? {
            info!(id, code = %mapping.short_code, user_id = actor.user_id, "Short link deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            // Removed by someone else in between.
            Ok(DeleteOutcome::NotFound)
        }
    }

    /// Builds the public short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}

fn short_link_not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
