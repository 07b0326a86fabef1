pub mod classifier;
pub mod config;
pub mod metadata;
pub mod organizer;
pub mod placement;
pub mod reconciler;
pub mod sanitize;
pub mod tag_reader;
pub mod testing;
pub mod walker;

pub use config::{
    load_config, load_config_from_str, load_layered, validate_config, Config, ConfigError,
    LogFormat, LoggingConfig, PlacementConfig,
};
pub use metadata::{AppleMetadata, MediaKind, MetadataRecord};
pub use organizer::{FileOutcome, OrganizeError, Organizer, RunSummary};
pub use placement::{build_destination, Destination, PlacementOptions};
pub use reconciler::{
    Action, FsReconciler, ReconcileError, ReconcileOptions, Reconciler, ReconcilerConfig,
};
pub use tag_reader::{Mp4TagReader, TagReadError, TagReader};
