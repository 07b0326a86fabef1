//! Trait definitions for the reconciler module.

use async_trait::async_trait;
use std::path::Path;

use crate::placement::Destination;

use super::error::ReconcileError;
use super::types::{Action, ReconcileOptions};

/// Applies a computed destination to a source file.
#[async_trait]
pub trait Reconciler: Send + Sync {
    /// Returns the name of this reconciler implementation.
    fn name(&self) -> &str;

    /// Decides what to do with `source` and, unless `options.dry_run` is set,
    /// does it.
    ///
    /// `destination` is `None` for unclassified files.
    async fn reconcile(
        &self,
        source: &Path,
        destination: Option<&Destination>,
        options: &ReconcileOptions,
    ) -> Result<Action, ReconcileError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciler::SkipReason;

    struct SkipEverything;

    #[async_trait]
    impl Reconciler for SkipEverything {
        fn name(&self) -> &str {
            "skip"
        }

        async fn reconcile(
            &self,
            _source: &Path,
            _destination: Option<&Destination>,
            _options: &ReconcileOptions,
        ) -> Result<Action, ReconcileError> {
            Ok(Action::Skipped(SkipReason::Unclassified))
        }
    }

    #[tokio::test]
    async fn test_trait_object() {
        let reconciler: Box<dyn Reconciler> = Box::new(SkipEverything);
        let action = reconciler
            .reconcile(Path::new("/a.mp4"), None, &ReconcileOptions::default())
            .await
            .unwrap();
        assert_eq!(reconciler.name(), "skip");
        assert!(matches!(action, Action::Skipped(_)));
    }
}
