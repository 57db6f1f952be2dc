//! Tremolo Core - Playback queue engine
//!
//! This crate provides the ordered queue model, deterministic shuffle
//! traversal, the versioned playlist file codec, and the queue manager
//! that ties them to storage and link providers.

pub mod codec;
pub mod item;
pub mod manager;
pub mod provider;
pub mod queue;
pub mod shuffle;
pub mod store;

pub use codec::CodecError;
pub use item::{ AudioType, Item, ItemPayload };
pub use manager::{ ManagerError, NowPlaying, QueueManager, RESERVED_QUEUE, RESERVED_TRASH };
pub use provider::{ extract_url, LinkProvider, ProviderRegistry };
pub use queue::{ cleanse_name, validate_name, NameError, Queue };
pub use shuffle::ShuffleGenerator;
pub use store::PlaylistStore;
