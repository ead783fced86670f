/// Error types for scene construction, configuration and the frame loop
use std::io;

use thiserror::Error;

/// Malformed scene content, detected when a mesh is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("mesh '{mesh}': edge {edge} references vertex {index}, but the mesh has {vertex_count} vertices")]
    EdgeOutOfRange {
        mesh: String,
        edge: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Invalid viewer configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown rotation policy '{0}' (expected 'incremental' or 'euler')")]
    UnknownRotationPolicy(String),
}

/// Errors surfaced by viewer startup and the frame loop
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("backend I/O error: {0}")]
    Backend(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_policy(raw: &str) -> Result<crate::RotationPolicy, ViewerError> {
        Ok(raw.parse()?)
    }

    #[test]
    fn test_config_error_converts() {
        let err = load_policy("slerp").unwrap_err();
        assert!(matches!(
            err,
            ViewerError::Config(ConfigError::UnknownRotationPolicy(ref raw)) if raw == "slerp"
        ));
        assert_eq!(
            err.to_string(),
            "configuration error: unknown rotation policy 'slerp' (expected 'incremental' or 'euler')"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let err: ViewerError = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(err, ViewerError::Backend(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }
}
