//! AppScale Core - deployment-configuration helpers for the AppScale toolchain
//!
//! This crate provides the helper routines the deployment commands share:
//! - `locations`: node-role manifest loading and address resolution
//! - `descriptor`: App Engine thread-safety validation
//! - `credentials`: operator credential resolution and redaction
//! - `files`: the file-access seam the helpers read through
//!
//! Every helper is stateless: explicit inputs, a typed [`CoreError`] on
//! failure, no caching and no shared mutable state.

pub mod credentials;
pub mod descriptor;
pub mod error;
pub mod files;
pub mod locations;

pub use credentials::{
    CredentialMap, CredentialSource, DefaultCredentials, EnvReader, MockEnv, OperatorPrompt,
    ProcessEnv, obscure_creds, obscure_string,
};
pub use descriptor::{ensure_app_has_threadsafe, threadsafe_value};
pub use error::{CoreError, Result};
pub use files::{FileReader, FsReader, MockFileReader};
pub use locations::{
    LOAD_BALANCER_ROLE, LocationsManifest, NodeRecord, get_load_balancer_ip, locations_path,
};
