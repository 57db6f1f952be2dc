//! Queue manager
//!
//! Owns the active and discard queues, drives navigation over them,
//! and dispatches persistence and link resolution. All calls must be
//! serialized by the caller; the manager holds no locks of its own.

use std::fs::{ self, File };
use std::io::{ self, BufReader, BufWriter, Write };
use std::path::PathBuf;

use thiserror::Error;

use crate::codec::{ self, CodecError };
use crate::item::{ AudioType, Item };
use crate::provider::{ self, ProviderRegistry };
use crate::queue::{ self, NameError, Queue };
use crate::shuffle::ShuffleGenerator;
use crate::store::PlaylistStore;


/// Reserved name resolving to the active queue.
pub const RESERVED_QUEUE: &str = ".queue";

/// Reserved name resolving to the discard queue.
pub const RESERVED_TRASH: &str = ".trash";


/// Errors surfaced by manager operations.
#[derive( Debug, Error )]
pub enum ManagerError {
    #[error( "Playlist not found: {0}" )]
    NotFound( String ),

    #[error( "Special list not found: {0}" )]
    SpecialNotFound( String ),

    #[error( transparent )]
    Validation( #[from] NameError ),

    #[error( "Corrupted playlist: {0}" )]
    Corrupt( #[from] CodecError ),

    #[error( "You do not own playlist '{0}'" )]
    OwnershipViolation( String ),

    #[error( "Storage root is not a directory: {0}" )]
    StorageUnavailable( PathBuf ),

    #[error( "Playlist file is locked or inaccessible: {0}" )]
    IoFault( #[source] io::Error ),

    #[error( "No provider available: {0}" )]
    ProviderUnavailable( String ),

    #[error( transparent )]
    Provider( #[from] anyhow::Error ),
}


/// A navigation result: the item to play and where it came from.
#[derive( Debug, Clone )]
pub struct NowPlaying {
    pub item: Item,

    /// Index of the item in the active queue.
    pub index: usize,

    /// Set when the item was produced by queue traversal, as opposed
    /// to an ad-hoc single play.
    pub from_queue: bool,
}


/// Composes the active queue, the discard queue, the traversal state
/// and the storage/provider dispatch into one playback-facing surface.
pub struct QueueManager {
    freelist: Queue,
    trash: Queue,
    /// Linear cursor. Parks at `len` after running off the end with
    /// looping disabled.
    cursor: i64,
    loop_enabled: bool,
    random: bool,
    shuffle: ShuffleGenerator,
    /// Queue length the shuffle order was last computed for; None
    /// means stale and forces a recompute on the next traversal.
    last_shuffled_len: Option<usize>,
    store: PlaylistStore,
    providers: ProviderRegistry,
}


impl QueueManager {
    /// Creates a manager with empty queues.
    pub fn new( store: PlaylistStore, providers: ProviderRegistry, seed: u64 ) -> Self {
        Self {
            freelist: Queue::new( RESERVED_QUEUE ),
            trash: Queue::new( RESERVED_TRASH ),
            cursor: 0,
            loop_enabled: false,
            random: false,
            shuffle: ShuffleGenerator::new( seed ),
            last_shuffled_len: None,
            store,
            providers,
        }
    }


    pub fn store( &self ) -> &PlaylistStore {
        &self.store
    }


    pub fn freelist( &self ) -> &Queue {
        &self.freelist
    }


    pub fn trash( &self ) -> &Queue {
        &self.trash
    }


    pub fn cursor( &self ) -> i64 {
        self.cursor
    }


    pub fn loop_enabled( &self ) -> bool {
        self.loop_enabled
    }


    pub fn set_loop( &mut self, enabled: bool ) {
        self.loop_enabled = enabled;
    }


    pub fn random( &self ) -> bool {
        self.random
    }


    /// Enables or disables shuffle traversal, carrying the effective
    /// index across the toggle so playback does not jump.
    pub fn set_random( &mut self, random: bool ) {
        if random == self.random {
            return;
        }

        if random {
            self.sync_shuffle_len();
            if !self.freelist.is_empty() {
                let max = self.freelist.len() as i64 - 1;
                self.shuffle.set_position( self.cursor.clamp( 0, max ) as usize );
            }
        } else if !self.freelist.is_empty() {
            self.cursor = self.shuffle.position() as i64;
        }
        self.random = random;
    }


    /// Re-seeds the shuffle order.
    pub fn set_seed( &mut self, seed: u64 ) {
        self.shuffle.set_seed( seed );
    }


    /// The item at the current effective position, if any.
    ///
    /// Idempotent: repeated calls without `next`/`previous` in between
    /// return the same item and move no state.
    pub fn current( &mut self ) -> Option<NowPlaying> {
        self.traverse( 0 )
    }


    /// Advances one step and returns the new current item.
    pub fn next( &mut self ) -> Option<NowPlaying> {
        self.traverse( 1 )
    }


    /// Retreats one step and returns the new current item.
    pub fn previous( &mut self ) -> Option<NowPlaying> {
        self.traverse( -1 )
    }


    fn traverse( &mut self, off: i64 ) -> Option<NowPlaying> {
        if self.freelist.is_empty() {
            return None;
        }
        let len = self.freelist.len() as i64;

        self.cursor += off.signum();
        if self.loop_enabled {
            self.cursor = self.cursor.rem_euclid( len );
        } else if self.cursor < 0 || self.cursor >= len {
            // Park at the boundary without producing an item; repeated
            // calls stay here instead of walking further out.
            self.cursor = self.cursor.clamp( 0, len );
            return None;
        }

        if self.random {
            self.sync_shuffle_len();
            if off > 0 {
                self.shuffle.next();
            } else if off < 0 {
                self.shuffle.prev();
            }
        }

        let index = if self.random {
            self.shuffle.position() as i64
        } else {
            self.cursor
        };
        if index < 0 {
            return None;
        }

        let item = self.freelist.get( index as usize )?.clone();
        Some( NowPlaying {
            item,
            index: index as usize,
            from_queue: true,
        } )
    }


    /// Recomputes the shuffle order only when the queue length moved
    /// since the last time it was computed.
    fn sync_shuffle_len( &mut self ) {
        let len = self.freelist.len();
        if self.last_shuffled_len != Some( len ) {
            self.shuffle.set_length( len );
            self.last_shuffled_len = Some( len );
        }
    }


    /// Replaces the active queue with the contents of `source` and
    /// rewinds traversal to the start.
    pub fn play_freelist( &mut self, source: &Queue ) {
        self.freelist.clear();
        self.freelist.extend( source.iter().cloned() );
        self.cursor = 0;
        self.last_shuffled_len = None;
        self.shuffle.set_position( 0 );
    }


    /// Appends to the active queue; returns the new item's index.
    pub fn add_to_freelist( &mut self, item: Item ) -> usize {
        self.freelist.append( item )
    }


    /// Appends to the discard queue; returns the new item's index.
    pub fn add_to_trash( &mut self, item: Item ) -> usize {
        self.trash.append( item )
    }


    /// Inserts directly after the current item.
    pub fn insert_to_freelist( &mut self, item: Item ) -> usize {
        let index = ( ( self.cursor + 1 ).max( 0 ) as usize ).min( self.freelist.len() );
        self.freelist.insert( item, index )
    }


    pub fn clear_freelist( &mut self ) {
        self.freelist.clear();
    }


    pub fn clear_trash( &mut self ) {
        self.trash.clear();
    }


    fn reserved( &self, name: &str ) -> Option<&Queue> {
        match name {
            RESERVED_QUEUE => Some( &self.freelist ),
            RESERVED_TRASH => Some( &self.trash ),
            _ => None,
        }
    }


    /// Loads a playlist by name.
    ///
    /// Names starting with `.` resolve against the reserved in-memory
    /// queues first and only fall through to storage when no reserved
    /// queue matches. With `header_only` the body is not parsed.
    pub fn load( &self, name: &str, header_only: bool ) -> Result<Queue, ManagerError> {
        if name.starts_with( '.' ) {
            if let Some( q ) = self.reserved( name ) {
                return Ok( q.clone() );
            }
            if !self.store.exists( name ) {
                return Err( ManagerError::SpecialNotFound( name.to_string() ) );
            }
        }

        self.load_file( name, header_only )
    }


    fn load_file( &self, name: &str, header_only: bool ) -> Result<Queue, ManagerError> {
        let path = self.store.path_for( name );
        let file = File::open( &path ).map_err( |e| match e.kind() {
            io::ErrorKind::NotFound => ManagerError::NotFound( name.to_string() ),
            _ => ManagerError::IoFault( e ),
        } )?;

        let queue = codec::parse( BufReader::new( file ), name, header_only )?;
        Ok( queue )
    }


    /// Saves a queue under its own name.
    ///
    /// Refuses to overwrite an existing playlist whose recorded creator
    /// is present and differs from `queue.creator`; an existing entry
    /// with no recorded creator is always overwritable.
    pub fn save( &self, queue: &Queue ) -> Result<(), ManagerError> {
        queue::validate_name( &queue.name )?;

        if !self.store.is_usable() {
            return Err( ManagerError::StorageUnavailable( self.store.root().to_path_buf() ) );
        }

        if self.store.exists( &queue.name ) {
            let existing = self.load_file( &queue.name, true )?;
            if let Some( owner ) = existing.creator {
                if Some( owner ) != queue.creator {
                    return Err( ManagerError::OwnershipViolation( queue.name.clone() ) );
                }
            }
        }

        // Write to a sibling temp file and rename into place, so a
        // crash mid-write cannot leave a half-written playlist that the
        // next load silently accepts.
        let path = self.store.path_for( &queue.name );
        let tmp = self.store.path_for( &format!( ".{}.tmp", queue.name ) );

        let result = ( || {
            let file = File::create( &tmp ).map_err( ManagerError::IoFault )?;
            let mut writer = BufWriter::new( file );
            codec::serialize( &mut writer, queue ).map_err( ManagerError::IoFault )?;
            writer.flush().map_err( ManagerError::IoFault )?;
            fs::rename( &tmp, &path ).map_err( ManagerError::IoFault )
        } )();

        if result.is_err() {
            let _ = fs::remove_file( &tmp );
        }
        result
    }


    /// Deletes a stored playlist.
    ///
    /// Without `force`, the stored creator (when present) must match
    /// `requester`; a playlist with no recorded creator may be deleted
    /// by anyone.
    pub fn delete( &self, name: &str, requester: u64, force: bool ) -> Result<(), ManagerError> {
        if !self.store.exists( name ) {
            return Err( ManagerError::NotFound( name.to_string() ) );
        }

        if !force {
            let existing = self.load_file( name, true )?;
            if let Some( owner ) = existing.creator {
                if owner != requester {
                    return Err( ManagerError::OwnershipViolation( name.to_string() ) );
                }
            }
        }

        fs::remove_file( self.store.path_for( name ) ).map_err( ManagerError::IoFault )
    }


    /// Resolves the first URL embedded in `message` into a queue via
    /// the provider registry.
    ///
    /// With `explicit_type` the first provider declaring that type is
    /// used regardless of its `matches` predicate; otherwise providers
    /// are scanned in registration order and the first match wins. A
    /// provider's own failure passes through unchanged.
    pub fn resolve(
        &self,
        message: &str,
        explicit_type: Option<AudioType>,
    ) -> Result<Queue, ManagerError> {
        let url = provider::extract_url( message ).ok_or_else( || {
            ManagerError::ProviderUnavailable( "no link found in message".to_string() )
        } )?;

        let provider = match explicit_type {
            Some( kind ) => self.providers.find_for_kind( kind ).ok_or_else( || {
                ManagerError::ProviderUnavailable( format!( "no provider for type {}", kind ) )
            } )?,
            None => self.providers.find_for_url( &url ).ok_or_else( || {
                ManagerError::ProviderUnavailable( format!( "unknown link type: {}", url ) )
            } )?,
        };

        tracing::debug!( "Resolving {} via {} provider", url, provider.kind() );
        Ok( provider.resolve( &url )? )
    }
}


#[cfg( test )]
mod tests {
    use super::*;
    use crate::provider::LinkProvider;

    use anyhow::anyhow;
    use tempfile::TempDir;


    fn manager() -> QueueManager {
        QueueManager::new( PlaylistStore::new( "/nonexistent" ), ProviderRegistry::new(), 7 )
    }


    fn manager_with_store() -> ( QueueManager, TempDir ) {
        let dir = tempfile::tempdir().unwrap();
        let manager = QueueManager::new(
            PlaylistStore::new( dir.path() ),
            ProviderRegistry::new(),
            7,
        );
        ( manager, dir )
    }


    fn numbered_queue( n: u32 ) -> Queue {
        let mut queue = Queue::new( "numbers" );
        for id in 0..n {
            queue.append( Item::history( id ) );
        }
        queue
    }


    fn history_id( playing: &NowPlaying ) -> u32 {
        match playing.item.payload() {
            crate::item::ItemPayload::HistoryRef { id } => *id,
            other => panic!( "expected history ref, got {:?}", other ),
        }
    }


    #[test]
    fn test_empty_queue_navigation_returns_nothing() {
        let mut manager = manager();
        assert!( manager.current().is_none() );
        assert!( manager.next().is_none() );
        assert!( manager.previous().is_none() );
        assert_eq!( manager.cursor(), 0 );
    }


    #[test]
    fn test_current_is_idempotent() {
        let mut manager = manager();
        manager.play_freelist( &numbered_queue( 3 ) );

        let first = manager.current().unwrap();
        let again = manager.current().unwrap();
        assert_eq!( history_id( &first ), history_id( &again ) );
        assert_eq!( first.index, again.index );
    }


    #[test]
    fn test_linear_walk_marks_from_queue() {
        let mut manager = manager();
        manager.play_freelist( &numbered_queue( 3 ) );

        let playing = manager.current().unwrap();
        assert_eq!( history_id( &playing ), 0 );
        assert!( playing.from_queue );

        assert_eq!( history_id( &manager.next().unwrap() ), 1 );
        assert_eq!( history_id( &manager.next().unwrap() ), 2 );
    }


    #[test]
    fn test_boundary_stop_without_loop() {
        let mut manager = manager();
        manager.play_freelist( &numbered_queue( 3 ) );
        manager.next();
        manager.next();

        // Walking off the end parks at the boundary, forever.
        assert!( manager.next().is_none() );
        assert!( manager.next().is_none() );
        assert!( manager.next().is_none() );
        assert_eq!( manager.cursor(), 3 );

        // Walking back recovers the last item.
        assert_eq!( history_id( &manager.previous().unwrap() ), 2 );
    }


    #[test]
    fn test_boundary_stop_at_start() {
        let mut manager = manager();
        manager.play_freelist( &numbered_queue( 3 ) );

        assert!( manager.previous().is_none() );
        assert!( manager.previous().is_none() );
        assert_eq!( manager.cursor(), 0 );
    }


    #[test]
    fn test_loop_wraps_and_revisits_start() {
        let mut manager = manager();
        manager.play_freelist( &numbered_queue( 3 ) );
        manager.set_loop( true );

        let mut seen = Vec::new();
        for _ in 0..7 {
            let playing = manager.next().unwrap();
            assert!( playing.index < 3 );
            seen.push( history_id( &playing ) );
        }
        assert_eq!( seen, vec![ 1, 2, 0, 1, 2, 0, 1 ] );
    }


    #[test]
    fn test_loop_previous_wraps_backward() {
        let mut manager = manager();
        manager.play_freelist( &numbered_queue( 3 ) );
        manager.set_loop( true );

        assert_eq!( history_id( &manager.previous().unwrap() ), 2 );
    }


    #[test]
    fn test_shuffle_visits_everything_once() {
        let mut manager = manager();
        manager.play_freelist( &numbered_queue( 10 ) );
        manager.set_loop( true );
        manager.set_random( true );

        let mut seen = vec![ false; 10 ];
        for _ in 0..10 {
            let playing = manager.next().unwrap();
            assert!( !seen[ playing.index ], "index {} repeated", playing.index );
            seen[ playing.index ] = true;
        }
        assert!( seen.iter().all( |v| *v ) );
    }


    #[test]
    fn test_shuffle_previous_retraces() {
        let mut manager = manager();
        manager.play_freelist( &numbered_queue( 8 ) );
        manager.set_loop( true );
        manager.set_random( true );

        let forward: Vec<usize> = ( 0..3 ).map( |_| manager.next().unwrap().index ).collect();
        let back: Vec<usize> = ( 0..3 ).map( |_| manager.previous().unwrap().index ).collect();

        assert_eq!( back[ 0 ], forward[ 1 ] );
        assert_eq!( back[ 1 ], forward[ 0 ] );
    }


    #[test]
    fn test_toggle_random_preserves_effective_index() {
        let mut manager = manager();
        manager.play_freelist( &numbered_queue( 6 ) );
        manager.next();
        manager.next();

        let before = manager.current().unwrap().index;
        manager.set_random( true );
        assert_eq!( manager.current().unwrap().index, before );

        manager.next();
        let shuffled = manager.current().unwrap().index;
        manager.set_random( false );
        assert_eq!( manager.current().unwrap().index, shuffled );
    }


    #[test]
    fn test_shuffle_recompute_is_lazy() {
        let mut manager = manager();
        manager.play_freelist( &numbered_queue( 5 ) );
        manager.set_loop( true );
        manager.set_random( true );
        manager.next();

        // Growing the queue must not reshuffle until the next traversal.
        manager.add_to_freelist( Item::history( 100 ) );
        let playing = manager.next().unwrap();
        assert!( playing.index < 6 );
    }


    #[test]
    fn test_insert_to_freelist_lands_after_cursor() {
        let mut manager = manager();
        manager.play_freelist( &numbered_queue( 3 ) );
        manager.next();

        let index = manager.insert_to_freelist( Item::history( 99 ) );
        assert_eq!( index, 2 );
        assert_eq!( manager.freelist().len(), 4 );

        // With the cursor at the end the insert clamps to the tail.
        manager.next();
        manager.next();
        manager.next();
        let index = manager.insert_to_freelist( Item::history( 100 ) );
        assert_eq!( index, 4 );
    }


    #[test]
    fn test_play_freelist_rewinds() {
        let mut manager = manager();
        manager.play_freelist( &numbered_queue( 4 ) );
        manager.next();
        manager.next();

        manager.play_freelist( &numbered_queue( 2 ) );
        assert_eq!( manager.cursor(), 0 );
        assert_eq!( history_id( &manager.current().unwrap() ), 0 );
    }


    #[test]
    fn test_reserved_names() {
        let mut manager = manager();
        manager.play_freelist( &numbered_queue( 2 ) );
        manager.add_to_trash( Item::history( 9 ) );

        assert_eq!( manager.load( ".queue", false ).unwrap().len(), 2 );
        assert_eq!( manager.load( ".trash", false ).unwrap().len(), 1 );

        let missing = manager.load( ".nope", false );
        assert!( matches!( missing, Err( ManagerError::SpecialNotFound( _ ) ) ) );

        // A non-dotted name is never treated as reserved.
        let missing = manager.load( "queue", false );
        assert!( matches!( missing, Err( ManagerError::NotFound( _ ) ) ) );
    }


    #[test]
    fn test_save_and_load_roundtrip() {
        let ( manager, _dir ) = manager_with_store();

        let mut queue = Queue::with_creator( "party", 42 );
        queue.append( Item::history( 7 ).with_owner( 1 ) );
        queue.append( Item::resource( AudioType::Youtube, "abc123", Some( "My Song".to_string() ) ) );
        manager.save( &queue ).unwrap();

        let loaded = manager.load( "party", false ).unwrap();
        assert_eq!( loaded.creator, Some( 42 ) );
        assert_eq!( loaded.items(), queue.items() );
        assert!( loaded.file_persistent );
    }


    #[test]
    fn test_save_rejects_invalid_name() {
        let ( manager, _dir ) = manager_with_store();
        let queue = Queue::new( "bad name!" );
        assert!( matches!( manager.save( &queue ), Err( ManagerError::Validation( _ ) ) ) );
    }


    #[test]
    fn test_save_requires_usable_root() {
        let manager = manager();
        let queue = Queue::new( "party" );
        assert!( matches!( manager.save( &queue ), Err( ManagerError::StorageUnavailable( _ ) ) ) );
    }


    #[test]
    fn test_save_ownership_check_uses_existing_header() {
        let ( manager, _dir ) = manager_with_store();

        manager.save( &Queue::with_creator( "party", 9 ) ).unwrap();

        // The check compares the stored creator against the incoming
        // queue's creator field, not a separate requester id.
        let takeover = Queue::with_creator( "party", 5 );
        assert!( matches!(
            manager.save( &takeover ),
            Err( ManagerError::OwnershipViolation( _ ) )
        ) );

        // No existing file: the same save goes through.
        let fresh = Queue::with_creator( "other-party", 5 );
        manager.save( &fresh ).unwrap();
    }


    #[test]
    fn test_save_over_unowned_file_is_allowed() {
        let ( manager, _dir ) = manager_with_store();

        manager.save( &Queue::new( "shared" ) ).unwrap();
        manager.save( &Queue::with_creator( "shared", 5 ) ).unwrap();

        let loaded = manager.load( "shared", true ).unwrap();
        assert_eq!( loaded.creator, Some( 5 ) );
    }


    #[test]
    fn test_save_over_corrupt_file_fails() {
        let ( manager, dir ) = manager_with_store();
        std::fs::write( dir.path().join( "party" ), "owner:1\nowner:2\n\n" ).unwrap();

        let queue = Queue::with_creator( "party", 1 );
        assert!( matches!( manager.save( &queue ), Err( ManagerError::Corrupt( _ ) ) ) );
    }


    #[test]
    fn test_delete_ownership() {
        let ( manager, _dir ) = manager_with_store();
        manager.save( &Queue::with_creator( "party", 9 ) ).unwrap();

        assert!( matches!(
            manager.delete( "party", 5, false ),
            Err( ManagerError::OwnershipViolation( _ ) )
        ) );
        manager.delete( "party", 9, false ).unwrap();
        assert!( !manager.store().exists( "party" ) );
    }


    #[test]
    fn test_delete_force_skips_ownership() {
        let ( manager, _dir ) = manager_with_store();
        manager.save( &Queue::with_creator( "party", 9 ) ).unwrap();

        manager.delete( "party", 5, true ).unwrap();
        assert!( !manager.store().exists( "party" ) );
    }


    #[test]
    fn test_delete_unowned_by_anyone() {
        let ( manager, _dir ) = manager_with_store();
        manager.save( &Queue::new( "shared" ) ).unwrap();

        manager.delete( "shared", 12345, false ).unwrap();
    }


    #[test]
    fn test_delete_missing_is_not_found() {
        let ( manager, _dir ) = manager_with_store();
        assert!( matches!(
            manager.delete( "ghost", 1, false ),
            Err( ManagerError::NotFound( _ ) )
        ) );
    }


    struct StubProvider {
        kind: AudioType,
        prefix: &'static str,
        fail: bool,
    }


    impl LinkProvider for StubProvider {
        fn matches( &self, url: &str ) -> bool {
            url.starts_with( self.prefix )
        }


        fn kind( &self ) -> AudioType {
            self.kind
        }


        fn resolve( &self, url: &str ) -> anyhow::Result<Queue> {
            if self.fail {
                return Err( anyhow!( "upstream said no" ) );
            }
            let mut queue = Queue::new( "resolved" );
            queue.append( Item::resource( self.kind, url, None ) );
            Ok( queue )
        }
    }


    fn manager_with_providers() -> QueueManager {
        let mut providers = ProviderRegistry::new();
        providers.register( Box::new( StubProvider {
            kind: AudioType::Youtube,
            prefix: "https://youtube",
            fail: false,
        } ) );
        providers.register( Box::new( StubProvider {
            kind: AudioType::Soundcloud,
            prefix: "https://soundcloud",
            fail: true,
        } ) );
        QueueManager::new( PlaylistStore::new( "/nonexistent" ), providers, 7 )
    }


    #[test]
    fn test_resolve_dispatches_first_match() {
        let manager = manager_with_providers();
        let queue = manager
            .resolve( "hey play https://youtube.com/watch?v=1", None )
            .unwrap();
        assert_eq!( queue.len(), 1 );
    }


    #[test]
    fn test_resolve_explicit_type_overrides_matching() {
        let manager = manager_with_providers();
        let result = manager.resolve(
            "https://youtube.com/watch?v=1",
            Some( AudioType::Local ),
        );
        assert!( matches!( result, Err( ManagerError::ProviderUnavailable( _ ) ) ) );
    }


    #[test]
    fn test_resolve_unknown_link_type() {
        let manager = manager_with_providers();
        let result = manager.resolve( "https://example.com/mystery", None );
        assert!( matches!( result, Err( ManagerError::ProviderUnavailable( _ ) ) ) );
    }


    #[test]
    fn test_resolve_passes_provider_error_through() {
        let manager = manager_with_providers();
        let result = manager.resolve( "https://soundcloud.com/a", None );
        match result {
            Err( ManagerError::Provider( e ) ) => {
                assert_eq!( e.to_string(), "upstream said no" );
            }
            other => panic!( "expected provider error, got {:?}", other.map( |q| q.len() ) ),
        }
    }


    #[test]
    fn test_resolve_without_link() {
        let manager = manager_with_providers();
        let result = manager.resolve( "just words", None );
        assert!( matches!( result, Err( ManagerError::ProviderUnavailable( _ ) ) ) );
    }
}
