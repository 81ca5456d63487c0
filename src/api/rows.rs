//! Row CRUD operations
//!
//! Each operation is stateless: one outbound request, translated to or from
//! JSON, with no retry, backoff, or idempotency key. Callers may run
//! operations concurrently; ordering between concurrent calls is left to the
//! remote service.
//!
//! # Example
//!
//! ```ignore
//! use glide_tables::{Row, TableClient};
//!
//! let rows = client.list_rows().limit(25).await?;
//! client.add_row(Row::new().set("name", "Ada")).await?;
//! client.delete_row("r1").await?;
//! ```

use tracing::debug;

use crate::TableClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Row;
use crate::response::Payload;
use crate::transport::HttpRequest;
use crate::transport::HttpResponse;

impl TableClient {
    /// Lists rows of the table.
    ///
    /// Returns a builder that can be configured and awaited.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let payload = client.list_rows().limit(25).offset(50).await?;
    /// for row in payload.into_rows().unwrap_or_default() {
    ///     println!("{:?}", row.get_string("name"));
    /// }
    /// ```
    pub fn list_rows(&self) -> ListRowsBuilder<'_> {
        ListRowsBuilder {
            client: self,
            limit: 10,
            offset: 0,
        }
    }

    /// Adds a row to the table.
    ///
    /// Empty-string values are normalized to null, then the row is validated
    /// against the declared schema. A row that fails validation is rejected
    /// before any request is issued. Returns the remote representation of the
    /// created row.
    pub async fn add_row(&self, row: Row) -> Result<Payload, Error> {
        let row = row.normalized();
        self.inner.config.columns.validate(&row)?;

        let request =
            self.inner
                .dialect
                .add_row_request(&self.inner.base_url, &self.inner.config, &row)?;
        let response = self.request(request).await?;
        Ok(Payload::parse(&response.body))
    }

    /// Updates an existing row identified by its opaque `row_id`.
    ///
    /// The submitted values go through the same normalization and schema
    /// validation as [`add_row`](Self::add_row).
    pub async fn update_row(&self, row_id: &str, row: Row) -> Result<Payload, Error> {
        let row = row.normalized();
        self.inner.config.columns.validate(&row)?;

        let request = self.inner.dialect.update_row_request(
            &self.inner.base_url,
            &self.inner.config,
            row_id,
            &row,
        )?;
        let response = self.request(request).await?;
        Ok(Payload::parse(&response.body))
    }

    /// Deletes the row identified by its opaque `row_id`.
    pub async fn delete_row(&self, row_id: &str) -> Result<(), Error> {
        let request = self.inner.dialect.delete_row_request(
            &self.inner.base_url,
            &self.inner.config,
            row_id,
        )?;
        self.request(request).await?;
        Ok(())
    }

    /// Sends a shaped request and maps non-success responses to [`ApiError`].
    ///
    /// This is the low-level path shared by all row operations.
    pub(crate) async fn request(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        debug!(method = %request.method, url = %request.url, "issuing request");

        let response = self.inner.transport.send(request).await?;

        if response.is_success() {
            Ok(response)
        } else {
            debug!(status = response.status, "remote returned error status");
            Err(Error::Api(ApiError::from_response(
                response.status,
                &response.body,
            )))
        }
    }

    async fn execute_list(&self, limit: usize, offset: usize) -> Result<Payload, Error> {
        let request = self.inner.dialect.list_rows_request(
            &self.inner.base_url,
            &self.inner.config,
            limit,
            offset,
        );
        let response = self.request(request).await?;
        Ok(Payload::parse(&response.body))
    }
}

/// Builder for list operations bound to a client.
pub struct ListRowsBuilder<'a> {
    client: &'a TableClient,
    limit: usize,
    offset: usize,
}

impl<'a> ListRowsBuilder<'a> {
    /// Sets the maximum number of rows to fetch. Defaults to 10.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the number of rows to skip. Defaults to 0.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

impl<'a> std::future::IntoFuture for ListRowsBuilder<'a> {
    type Output = Result<Payload, Error>;
    type IntoFuture =
        std::pin::Pin<Box<dyn std::future::Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.client.execute_list(self.limit, self.offset).await })
    }
}
