//! Everything a host needs, wired once.

use std::sync::Arc;

use crate::api::{ApiClient, HttpTransport, Transport};
use crate::config::load_config;
use crate::error::Result;
use crate::models::Config;
use crate::session::{AuthService, RouteGuard, SessionStore};
use crate::store::{
    ArticleStore, AssociationStore, AuthorFileStore, BookStore, CategoryStore, ContactStore,
    JournalStore, NewsStore, PublicationStore, ResourceStore,
};

/// The stores, session and services of one site, sharing a client.
///
/// Nothing is fetched on construction; call [`Site::load_public`] or the
/// individual stores' `load`.
pub struct Site {
    pub config: Config,
    pub client: Arc<ApiClient>,
    pub auth: AuthService,
    pub guard: RouteGuard,
    pub journals: JournalStore,
    pub articles: ArticleStore,
    pub categories: CategoryStore,
    pub news: NewsStore,
    pub books: BookStore,
    pub associations: AssociationStore,
    pub author_files: AuthorFileStore,
    pub publications: PublicationStore,
    pub contact: ContactStore,
}

impl Site {
    /// Connect over HTTP, restoring the persisted session for this backend.
    pub async fn connect(config: Config) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config.api)?);
        let session =
            SessionStore::open(&config.session.storage_dir, &config.api.base_url).await?;
        Ok(Self::with_transport(config, transport, Arc::new(session)))
    }

    /// Load configuration from `path` (or defaults) and connect.
    pub async fn from_config_file(path: Option<&std::path::Path>) -> Result<Self> {
        Self::connect(load_config(path)?).await
    }

    pub fn with_transport(
        config: Config,
        transport: Arc<dyn Transport>,
        session: Arc<SessionStore>,
    ) -> Self {
        let client = Arc::new(ApiClient::new(transport, session));
        Self {
            config,
            auth: AuthService::new(client.clone()),
            guard: RouteGuard::new(client.clone()),
            journals: ResourceStore::new(client.clone()),
            articles: ResourceStore::new(client.clone()),
            categories: ResourceStore::new(client.clone()),
            news: ResourceStore::new(client.clone()),
            books: ResourceStore::new(client.clone()),
            associations: ResourceStore::new(client.clone()),
            author_files: ResourceStore::new(client.clone()),
            publications: ResourceStore::new(client.clone()),
            contact: ContactStore::new(client.clone()),
            client,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.client.session()
    }

    /// Load the collections the public pages show, concurrently. Each store
    /// keeps its own error; the first failure is returned.
    pub async fn load_public(&self) -> Result<()> {
        let (journals, news, books, associations, publications, author_files) = futures::join!(
            self.journals.load(),
            self.news.load(),
            self.books.load(),
            self.associations.load(),
            self.publications.load(),
            self.author_files.load(),
        );
        journals?;
        news?;
        books?;
        associations?;
        publications?;
        author_files?;
        Ok(())
    }
}
