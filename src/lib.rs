//! # devops_roster
//!
//! A small JSON service for a DevOps class roster, served on the `may`
//! coroutine runtime through `may_minihttp`.
//!
//! ## Routes
//!
//! | Method | Path              | Answer                                   |
//! |--------|-------------------|------------------------------------------|
//! | GET    | `/devops`         | every record, insertion order            |
//! | GET    | `/devops-count`   | number of records as a bare integer      |
//! | POST   | `/students`       | 201 with the added record                |
//! | GET    | `/students/{id}`  | the record with that `classId`, or 404   |
//! | GET    | `/health`         | `{"status":"ok"}`                        |
//! | GET    | `/metrics`        | Prometheus text                          |
//!
//! ## Architecture
//!
//! - **[`model`]** - `StudentRecord` and the seed roster
//! - **[`store`]** - the `RosterStore` trait and its in-memory implementation
//! - **[`routes`]** / **[`router`]** - static route table and regex matching
//! - **[`dispatcher`]** - coroutine-per-handler dispatch with middleware
//! - **[`typed`]** / **[`handlers`]** - typed request conversion and the four controllers
//! - **[`server`]** - HTTP parsing, built-in endpoints and response writing
//! - **[`middleware`]** - tracing and metrics
//! - **[`config`]**, **[`runtime_config`]**, **[`logging`]**, **[`cli`]** - process setup
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as HttpServer<br/>(may_minihttp)
//!     participant Service as AppService
//!     participant Router
//!     participant Dispatcher
//!     participant Handler as Controller<br/>(Coroutine)
//!     participant Store as InMemoryRoster
//!
//!     Client->>Server: GET /students/3
//!     Server->>Service: ParsedRequest
//!     Service->>Router: route(GET, "/students/3")
//!     alt No Route Match
//!         Service-->>Client: 404 {"error":"Not Found"}
//!     end
//!     Router-->>Service: RouteMatch (get_student, id=3)
//!     Service->>Dispatcher: dispatch
//!     Dispatcher->>Dispatcher: middleware before
//!     Dispatcher->>Handler: HandlerRequest via channel
//!     Handler->>Handler: TryFrom -> GetStudentRequest
//!     Handler->>Store: find(3)
//!     Store-->>Handler: StudentRecord
//!     Handler-->>Dispatcher: HandlerResponse 200
//!     Dispatcher->>Dispatcher: middleware after
//!     Dispatcher-->>Server: response
//!     Server-->>Client: 200 OK + JSON body
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use devops_roster::server::ParsedRequest;
//!
//! let service = devops_roster::app::build_default_service()?;
//! let resp = service.handle(ParsedRequest::new("GET", "/devops-count"));
//! assert_eq!(resp.status, 200);
//! assert_eq!(resp.body, serde_json::json!(4));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod ids;
pub mod logging;
pub mod middleware;
pub mod model;
pub mod registry;
pub mod router;
pub mod routes;
pub mod runtime_config;
pub mod server;
pub mod store;
pub mod typed;

pub use error::RosterError;
pub use model::StudentRecord;
pub use routes::{route_table, RouteMeta};
pub use store::{InMemoryRoster, RosterStore};
