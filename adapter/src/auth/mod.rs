pub mod chain;
pub mod jwt;
pub mod static_token;

pub use chain::ChainVerifier;
pub use jwt::JwtVerifier;
pub use static_token::StaticTokenVerifier;
