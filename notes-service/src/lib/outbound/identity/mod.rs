pub mod disabled;
pub mod google;

pub use disabled::DisabledIdentityVerifier;
pub use google::GoogleIdentityVerifier;
