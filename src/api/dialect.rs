//! HTTP dialect definitions
//!
//! The hosted service has been exposed under two successive API shapes. The
//! dialect decides the URL layout, the authentication header, and how row
//! payloads are wrapped; everything else (validation, parsing, transport) is
//! shared.

use serde_json::json;

use crate::config::TableConfig;
use crate::error::Error;
use crate::model::Row;
use crate::transport::HttpRequest;
use crate::transport::Method;

/// The HTTP dialect spoken to the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Legacy direct REST endpoint: `GET`/`POST /tables/{appId}/{tableId}`
    /// with `Authorization: Bearer` auth. List and add only.
    Rest,
    /// The data API: `/{appId}/tables/{tableId}/rows` resources with
    /// `api-key` auth. Supports the full CRUD surface.
    #[default]
    DataApi,
}

impl Dialect {
    /// Returns the default base URL for this dialect.
    ///
    /// The base URL is explicit client configuration and can be overridden at
    /// build time.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Dialect::Rest => "https://api.glideapp.io/api/v1/tables",
            Dialect::DataApi => "https://api.glideapp.io/api/data/v0",
        }
    }

    fn auth_header(&self, config: &TableConfig) -> (&'static str, String) {
        match self {
            Dialect::Rest => ("Authorization", format!("Bearer {}", config.api_token)),
            Dialect::DataApi => ("api-key", config.api_token.clone()),
        }
    }

    /// Returns the URL of the table resource, path segments percent-encoded.
    fn table_url(&self, base_url: &str, config: &TableConfig) -> String {
        let app_id = urlencoding::encode(&config.app_id);
        let table_id = urlencoding::encode(&config.table_id);
        match self {
            Dialect::Rest => format!("{}/{}/{}", base_url, app_id, table_id),
            Dialect::DataApi => format!("{}/{}/tables/{}", base_url, app_id, table_id),
        }
    }

    fn row_url(&self, base_url: &str, config: &TableConfig, row_id: &str) -> String {
        format!(
            "{}/rows/{}",
            self.table_url(base_url, config),
            urlencoding::encode(row_id)
        )
    }

    // =========================================================================
    // Request shaping
    // =========================================================================

    /// Builds the list-rows request.
    ///
    /// The legacy REST endpoint does not accept pagination parameters; they
    /// are only sent on the data API.
    pub(crate) fn list_rows_request(
        &self,
        base_url: &str,
        config: &TableConfig,
        limit: usize,
        offset: usize,
    ) -> HttpRequest {
        let url = match self {
            Dialect::Rest => self.table_url(base_url, config),
            Dialect::DataApi => format!(
                "{}/rows?limit={}&offset={}",
                self.table_url(base_url, config),
                limit,
                offset
            ),
        };
        let (name, value) = self.auth_header(config);
        HttpRequest::new(Method::Get, url).header(name, value)
    }

    /// Builds the add-row request. The row must already be normalized and
    /// validated.
    pub(crate) fn add_row_request(
        &self,
        base_url: &str,
        config: &TableConfig,
        row: &Row,
    ) -> Result<HttpRequest, Error> {
        let (url, body) = match self {
            Dialect::Rest => (
                self.table_url(base_url, config),
                serde_json::to_string(row)?,
            ),
            Dialect::DataApi => (
                format!("{}/rows", self.table_url(base_url, config)),
                serde_json::to_string(&json!({ "rows": [row] }))?,
            ),
        };
        let (name, value) = self.auth_header(config);
        Ok(HttpRequest::new(Method::Post, url)
            .header(name, value)
            .json_body(body))
    }

    /// Builds the update-row request.
    pub(crate) fn update_row_request(
        &self,
        base_url: &str,
        config: &TableConfig,
        row_id: &str,
        row: &Row,
    ) -> Result<HttpRequest, Error> {
        match self {
            Dialect::Rest => Err(self.unsupported("update_row")),
            Dialect::DataApi => {
                let url = self.row_url(base_url, config, row_id);
                let body = serde_json::to_string(&json!({ "values": row }))?;
                let (name, value) = self.auth_header(config);
                Ok(HttpRequest::new(Method::Patch, url)
                    .header(name, value)
                    .json_body(body))
            }
        }
    }

    /// Builds the delete-row request.
    pub(crate) fn delete_row_request(
        &self,
        base_url: &str,
        config: &TableConfig,
        row_id: &str,
    ) -> Result<HttpRequest, Error> {
        match self {
            Dialect::Rest => Err(self.unsupported("delete_row")),
            Dialect::DataApi => {
                let url = self.row_url(base_url, config, row_id);
                let (name, value) = self.auth_header(config);
                Ok(HttpRequest::new(Method::Delete, url).header(name, value))
            }
        }
    }

    fn unsupported(&self, operation: &str) -> Error {
        Error::InvalidOperation(format!(
            "{} is not available on the legacy REST dialect",
            operation
        ))
    }
}
