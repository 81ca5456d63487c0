//! Main TableClient

use std::sync::Arc;

use tracing::debug;

use crate::api::Dialect;
use crate::config::TableConfig;
use crate::error::Error;
use crate::transport::ReqwestTransport;
use crate::transport::Transport;

/// The client for one remote table.
///
/// Holds the immutable connection configuration and exposes the row CRUD
/// operations in [`crate::api`]. Cheap to clone (uses `Arc` internally) and
/// safe to share across tasks.
///
/// # Example
///
/// ```ignore
/// use glide_tables::{ColumnType, TableClient, TableConfig, TableSchema};
///
/// let config = TableConfig::new("token", "app-1", "table-1")
///     .schema(TableSchema::new().column("name", ColumnType::String));
///
/// let client = TableClient::builder().config(config).build()?;
/// let payload = client.list_rows().await?;
/// ```
#[derive(Clone)]
pub struct TableClient {
    pub(crate) inner: Arc<TableClientInner>,
}

pub(crate) struct TableClientInner {
    pub(crate) config: TableConfig,
    pub(crate) dialect: Dialect,
    pub(crate) base_url: String,
    pub(crate) transport: Arc<dyn Transport>,
}

impl TableClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> TableClientBuilder<Missing> {
        TableClientBuilder::new()
    }

    /// Returns the connection configuration.
    pub fn config(&self) -> &TableConfig {
        &self.inner.config
    }

    /// Returns the dialect this client speaks.
    pub fn dialect(&self) -> Dialect {
        self.inner.dialect
    }

    /// Returns the base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }
}

impl std::fmt::Debug for TableClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableClient")
            .field("app_id", &self.inner.config.app_id)
            .field("table_id", &self.inner.config.table_id)
            .field("dialect", &self.inner.dialect)
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`TableClient`].
///
/// Uses the typestate pattern so the required configuration is enforced at
/// compile time.
///
/// # Example
///
/// ```ignore
/// let client = TableClient::builder()
///     .config(config)
///     .dialect(Dialect::Rest)
///     .build()?;
/// ```
pub struct TableClientBuilder<Config> {
    config: Config,
    dialect: Dialect,
    base_url: Option<String>,
    http_client: Option<reqwest::Client>,
    transport: Option<Arc<dyn Transport>>,
}

impl TableClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: Missing,
            dialect: Dialect::default(),
            base_url: None,
            http_client: None,
            transport: None,
        }
    }

    /// Sets the table configuration.
    pub fn config(self, config: TableConfig) -> TableClientBuilder<Set<TableConfig>> {
        TableClientBuilder {
            config: Set(config),
            dialect: self.dialect,
            base_url: self.base_url,
            http_client: self.http_client,
            transport: self.transport,
        }
    }
}

impl Default for TableClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> TableClientBuilder<C> {
    /// Sets the HTTP dialect. Defaults to [`Dialect::DataApi`].
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Overrides the base URL for the selected dialect.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets a custom `reqwest::Client` for the default transport.
    ///
    /// Useful for callers that want a timeout or proxy; the client itself
    /// applies none.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets a custom transport, replacing the default reqwest-backed one.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }
}

impl TableClientBuilder<Set<TableConfig>> {
    /// Builds the [`TableClient`].
    ///
    /// Fails only if the default transport cannot be constructed; that error
    /// is propagated to the caller.
    pub fn build(self) -> Result<TableClient, Error> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let inner = match self.http_client {
                    Some(client) => ReqwestTransport::with_client(client),
                    None => ReqwestTransport::new()?,
                };
                Arc::new(inner)
            }
        };

        let base_url = self
            .base_url
            .unwrap_or_else(|| self.dialect.default_base_url().to_string())
            .trim_end_matches('/')
            .to_string();

        let config = self.config.0;
        debug!(
            app_id = %config.app_id,
            table_id = %config.table_id,
            dialect = ?self.dialect,
            "building table client"
        );

        Ok(TableClient {
            inner: Arc::new(TableClientInner {
                config,
                dialect: self.dialect,
                base_url,
                transport,
            }),
        })
    }
}
