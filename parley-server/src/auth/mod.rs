mod authenticator;
mod jwt_verifier;
mod static_verifier;
mod token_verifier;

pub use authenticator::*;
pub use jwt_verifier::*;
pub use static_verifier::*;
pub use token_verifier::*;
