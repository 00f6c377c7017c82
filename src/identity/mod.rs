//! Identity provider session and the sign-in prompt capability.
//!
//! The credential manager only talks to the [`IdentityProvider`] and
//! [`SignInPrompt`] traits. [`MicrosoftIdentitySession`] is the production
//! provider: silent reuse through the refresh-token grant, interactive
//! sign-in through the device-code grant.
mod claims;
mod microsoft;
mod prompt;
mod types;


pub use microsoft::{IdentitySettings, MicrosoftIdentitySession};
pub use prompt::ConsolePrompt;
pub use types::{Account, AccountId, IdentityProvider, SignInPrompt, TokenResponse};
