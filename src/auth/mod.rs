//! Authentication: token signing, password hashing, the user directory and
//! the request gate that ties them to HTTP.

pub mod directory;
pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

pub use directory::UserDirectory;
pub use extractors::AuthContext;
pub use middleware::{AuthGate, AUTH_HEADER};
pub use token::{Claims, TokenService};
