//! tooldex-client — front-of-site client library
//!
//! Everything the catalog UI needs between user input and the gateway:
//!
//! - **Transport** (`http`): same-origin JSON POST with uniform error mapping
//! - **Catalog** (`catalog`): the fetcher (query build + normalize over the
//!   GraphQL proxy) and the debounced search/filter/pagination controller
//! - **Assistant** (`assistant`): conversation state for the chat widget
//! - **Analytics** (`analytics`): fire-and-forget search/chat event reporting

pub mod analytics;
pub mod assistant;
pub mod catalog;
pub mod error;
pub mod http;

// Re-export public types
pub use analytics::AnalyticsReporter;
pub use assistant::AssistantWidget;
pub use catalog::controller::{CatalogController, CatalogState, Phase};
pub use catalog::fetcher::{CatalogSource, GraphqlCatalogSource};
pub use error::{ClientError, ClientResult};
pub use http::{ApiTransport, HttpTransport};
