//! Generic CRUD and paginated listing for a family of resources.
//!
//! Each resource family (NodeBalancers, NodeBalancer configs, instance
//! configs, ...) is a marker type implementing [`ResourceFamily`]. The
//! pagination, error mapping and timestamp normalization below are shared by
//! all of them.

use std::fmt;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cancel::CancelSignal;
use crate::client::{decode, ApiClient};
use crate::endpoint::{Endpoint, ParentId};
use crate::pagination::{ListOptions, PagedResponse, FILTER_HEADER};
use crate::timestamp::Record;
use crate::{Error, Result};

/// Static description of a resource family.
pub trait ResourceFamily: Send + Sync + 'static {
    /// Name used in logs.
    const NAME: &'static str;

    /// Collection path template relative to the API base URL.
    ///
    /// A template that does not match `Parent` is a programming error;
    /// [`ResourceClient::new`] rejects it and no call can succeed.
    const ENDPOINT: &'static str;

    /// Identifier of the parent resource, `()` for top-level families.
    type Parent: ParentId;

    /// Identifier of one record.
    type Id: fmt::Display + Copy + Send + Sync + 'static;

    /// Decoded record.
    type Record: Record + DeserializeOwned + Send + 'static;

    /// Payload accepted on create.
    type CreateOptions: Serialize + Send + Sync;

    /// Payload accepted on update.
    type UpdateOptions: Serialize + Send + Sync;
}

/// Outcome of an existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    /// The resource was found.
    Present,
    /// The API answered 404.
    Absent,
}

impl Existence {
    /// Classify the result of a lookup. A 404 means the resource is gone;
    /// any other failure is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns the lookup error when it is not a 404.
    pub fn classify<T>(result: Result<T>) -> Result<Self> {
        match result {
            Ok(_) => Ok(Self::Present),
            Err(err) if err.is_not_found() => Ok(Self::Absent),
            Err(err) => Err(err),
        }
    }

    /// Returns true if the resource is gone.
    #[must_use]
    pub const fn is_absent(self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Paginated CRUD client for one resource family.
pub struct ResourceClient<F: ResourceFamily> {
    api: ApiClient,
    endpoint: Endpoint<F::Parent>,
}

impl<F: ResourceFamily> Clone for ResourceClient<F> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}

impl<F: ResourceFamily> fmt::Debug for ResourceClient<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("family", &F::NAME)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl<F: ResourceFamily> ResourceClient<F> {
    /// Create a client for `F`, validating its endpoint template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the family's template does not match its
    /// parent type.
    pub fn new(api: ApiClient) -> Result<Self> {
        let endpoint = Endpoint::parse(F::ENDPOINT)
            .map_err(|err| Error::Config(format!("{} endpoint: {err}", F::NAME)))?;
        Ok(Self { api, endpoint })
    }

    /// Return a copy of this client whose requests abort when `signal` fires.
    #[must_use]
    pub fn with_cancel_signal(&self, signal: CancelSignal) -> Self {
        Self {
            api: self.api.with_cancel_signal(signal),
            endpoint: self.endpoint.clone(),
        }
    }

    /// The underlying transport.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The validated endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint<F::Parent> {
        &self.endpoint
    }

    /// List records, walking every page unless `opts.page` names one.
    pub async fn list(&self, parent: F::Parent, opts: &ListOptions) -> Result<Vec<F::Record>> {
        if let Some(page) = opts.page {
            return Ok(self.fetch_page(parent, opts, page).await?.data);
        }

        let mut page = 1;
        let mut collected = self.fetch_page(parent, opts, page).await?;
        let mut last_len = collected.data.len();

        while page < collected.pages && !is_last_page(last_len, opts.page_size) {
            page += 1;
            let next = self.fetch_page(parent, opts, page).await?;
            last_len = next.data.len();
            collected.append(next);
        }

        debug!(
            family = F::NAME,
            pages = page,
            records = collected.data.len(),
            "listed records"
        );
        Ok(collected.data)
    }

    /// Fetch the single page named by `opts.page` (default 1).
    pub async fn list_page(
        &self,
        parent: F::Parent,
        opts: &ListOptions,
    ) -> Result<PagedResponse<F::Record>> {
        self.fetch_page(parent, opts, opts.page.unwrap_or(1)).await
    }

    /// Fetch one record.
    pub async fn get(&self, parent: F::Parent, id: F::Id) -> Result<F::Record> {
        let path = self.endpoint.item(parent, id);
        let record = self
            .api
            .send_json::<(), F::Record>(Method::GET, &path, &[], None)
            .await?;
        Ok(normalized(record))
    }

    /// Create a record.
    pub async fn create(&self, parent: F::Parent, opts: &F::CreateOptions) -> Result<F::Record> {
        let path = self.endpoint.collection(parent);
        let record = self
            .api
            .send_json(Method::POST, &path, &[], Some(opts))
            .await?;
        Ok(normalized(record))
    }

    /// Update a record. Fields absent from `opts` keep their remote values.
    pub async fn update(
        &self,
        parent: F::Parent,
        id: F::Id,
        opts: &F::UpdateOptions,
    ) -> Result<F::Record> {
        let path = self.endpoint.item(parent, id);
        let record = self
            .api
            .send_json(Method::PUT, &path, &[], Some(opts))
            .await?;
        Ok(normalized(record))
    }

    /// Delete a record. Deleting a missing record fails with a 404
    /// [`Error::Api`].
    pub async fn delete(&self, parent: F::Parent, id: F::Id) -> Result<()> {
        let path = self.endpoint.item(parent, id);
        self.api
            .execute(Method::DELETE, &path, &[], |request| request)
            .await
            .map(|_| ())
    }

    /// Check whether a record still exists, treating 404 as
    /// [`Existence::Absent`].
    pub async fn existence(&self, parent: F::Parent, id: F::Id) -> Result<Existence> {
        Existence::classify(self.get(parent, id).await)
    }

    async fn fetch_page(
        &self,
        parent: F::Parent,
        opts: &ListOptions,
        page: u32,
    ) -> Result<PagedResponse<F::Record>> {
        let path = self.endpoint.collection(parent);
        let params = opts.to_pairs(page);
        let filter = opts.filter.clone();

        let text = self
            .api
            .execute(Method::GET, &path, &params, |request| match filter {
                Some(filter) => request.header(FILTER_HEADER, filter),
                None => request,
            })
            .await?;

        let mut response: PagedResponse<F::Record> = decode(&path, &text)?;
        for record in &mut response.data {
            record.fix_dates();
        }

        debug!(
            family = F::NAME,
            page = response.page,
            pages = response.pages,
            count = response.data.len(),
            "fetched page"
        );
        Ok(response)
    }
}

/// An empty page, or one shorter than the requested size, ends the walk.
fn is_last_page(len: usize, page_size: Option<u32>) -> bool {
    len == 0 || page_size.is_some_and(|size| len < size as usize)
}

fn normalized<R: Record>(mut record: R) -> R {
    record.fix_dates();
    record
}
