//! Server-rendered personal blog backend.
//!
//! Pages are served by actix-web handlers in [`inbound::http`], which talk
//! to external collaborators (data store, tag index, account service,
//! mailer, view renderer) exclusively through the ports in
//! [`domain::ports`]. Production adapters live in [`outbound`]; [`server`]
//! wires everything together.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::Trace;
