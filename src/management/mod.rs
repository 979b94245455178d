mod auth;
mod playback;
mod state;

pub use auth::TokenManager;
pub use playback::PlaybackError;
pub use playback::PlaybackManager;
pub use state::CredentialStore;
pub use state::FileCredentialStore;
pub use state::MemoryCredentialStore;
