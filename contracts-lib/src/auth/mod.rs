//! Authentication

mod memory;
mod provider;
mod session;
mod token;
mod user;

pub use memory::InMemoryIdentityProvider;
pub use provider::AuthUser;
pub use provider::IdentityProvider;
pub use provider::IdentityTokenProvider;
pub use provider::SignInOutcome;
pub use session::AuthSession;
pub use session::AuthStep;
pub use token::AccessToken;
pub use token::NoToken;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
pub use user::UserProfile;
