#![doc = "The `todoforge` library crate."]
#![doc = ""]
#![doc = "A multi-user to-do backend: users register and log in to obtain session tokens,"]
#![doc = "then manage tasks that only they can see. The crate holds the domain models,"]
#![doc = "the token/password/user-directory layer, the owner-scoped task repository,"]
#![doc = "the credential store implementations and the HTTP routes. `main.rs` wires them"]
#![doc = "into an actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod tasks;

pub use crate::auth::{AuthContext, TokenService, UserDirectory};
pub use crate::error::AppError;
pub use crate::tasks::TaskRepository;
