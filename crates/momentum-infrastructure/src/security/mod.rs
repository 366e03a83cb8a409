mod jwt;
mod password;

pub use jwt::{Claims, IssuedToken, JwtService};
pub use password::{hash_password, verify_password};
