//! Historic batch queries
//!
//! Query objects are configured by the authorization collaborator
//! before execution; the manager calls `configure_query`
//! unconditionally for every list and count.

use crate::historic_batch::HistoricBatch;
use flowmig_core::{BatchId, TenantId};

/// Criteria for historic batch list/count queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoricBatchQuery {
    /// Exact batch id
    pub batch_id: Option<BatchId>,
    /// Batch type string
    pub batch_type: Option<String>,
    /// Completed (`Some(true)`), still running (`Some(false)`), or both
    pub completed: Option<bool>,
    /// Tenant restriction; `None` means unrestricted
    pub tenant_ids: Option<Vec<TenantId>>,
}

impl HistoricBatchQuery {
    /// Create unrestricted query
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by batch id
    #[inline]
    #[must_use]
    pub fn by_batch_id(mut self, id: BatchId) -> Self {
        self.batch_id = Some(id);
        self
    }

    /// Filter by batch type
    #[inline]
    #[must_use]
    pub fn by_type(mut self, batch_type: impl Into<String>) -> Self {
        self.batch_type = Some(batch_type.into());
        self
    }

    /// Filter by completion
    #[inline]
    #[must_use]
    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Whether a row satisfies the criteria
    ///
    /// Readers must tolerate rows with an unset end time mid-flight,
    /// so completion is only filtered when explicitly requested.
    #[must_use]
    pub fn matches(&self, row: &HistoricBatch) -> bool {
        if let Some(id) = self.batch_id {
            if row.id != id {
                return false;
            }
        }
        if let Some(batch_type) = &self.batch_type {
            if &row.batch_type != batch_type {
                return false;
            }
        }
        if let Some(completed) = self.completed {
            if row.is_completed() != completed {
                return false;
            }
        }
        if let Some(tenants) = &self.tenant_ids {
            match &row.tenant_id {
                Some(tenant) => {
                    if !tenants.contains(tenant) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }
}

/// Authorization/tenant collaborator
///
/// Mutates a query to add tenant and permission filters before it is
/// executed. Internals are not specified here.
pub trait QueryAuthorizer: Send + Sync {
    /// Narrow the query to what the caller may see
    fn configure_query(&self, query: &mut HistoricBatchQuery);
}

/// No-op authorizer for single-tenant deployments
#[derive(Debug, Clone, Copy, Default)]
pub struct PermitAll;

impl QueryAuthorizer for PermitAll {
    fn configure_query(&self, _query: &mut HistoricBatchQuery) {}
}
