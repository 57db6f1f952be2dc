//! Ordered playback queue
//!
//! A named, mutable sequence of items, plus the naming rules shared by
//! everything that persists queues.

use thiserror::Error;

use crate::item::Item;


/// Queue names must be shorter than this many characters.
const NAME_MAX: usize = 64;

/// Substitute used when cleansing a name leaves nothing usable.
const FALLBACK_NAME: &str = "playlist";


/// Error returned when a queue name fails the persistence rules.
#[derive( Debug, Error, PartialEq, Eq )]
pub enum NameError {
    #[error( "Playlist name is empty" )]
    Empty,

    #[error( "Playlist name is too long: {0} characters" )]
    TooLong( usize ),

    #[error( "Playlist name contains invalid character: {0:?}" )]
    InvalidCharacter( char ),
}


/// A named, ordered sequence of playable items.
#[derive( Debug, Clone, Default, PartialEq, Eq )]
pub struct Queue {
    /// Display name. The storage key is the file a queue is saved
    /// under, not this field.
    pub name: String,

    /// Numeric id of whoever created the queue, when known.
    pub creator: Option<u64>,

    /// Whether this queue came from (or is meant for) durable storage.
    pub file_persistent: bool,

    items: Vec<Item>,
}


impl Queue {
    /// Creates an empty queue with the given name.
    pub fn new( name: impl Into<String> ) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }


    /// Creates an empty queue attributed to a creator.
    pub fn with_creator( name: impl Into<String>, creator: u64 ) -> Self {
        Self {
            name: name.into(),
            creator: Some( creator ),
            ..Self::default()
        }
    }


    /// Appends an item and returns its index.
    pub fn append( &mut self, item: Item ) -> usize {
        self.items.push( item );
        self.items.len() - 1
    }


    /// Inserts an item at `index`, clamped to `[0, len]`.
    ///
    /// @returns The index the item actually landed at
    pub fn insert( &mut self, item: Item, index: usize ) -> usize {
        let index = index.min( self.items.len() );
        self.items.insert( index, item );
        index
    }


    /// Removes the item at `index`. Out of range is a no-op.
    pub fn remove_at( &mut self, index: usize ) {
        if index < self.items.len() {
            self.items.remove( index );
        }
    }


    /// Removes all items.
    pub fn clear( &mut self ) {
        self.items.clear();
    }


    /// Appends every item from an iterator.
    pub fn extend( &mut self, items: impl IntoIterator<Item = Item> ) {
        self.items.extend( items );
    }


    pub fn get( &self, index: usize ) -> Option<&Item> {
        self.items.get( index )
    }


    pub fn items( &self ) -> &[Item] {
        &self.items
    }


    pub fn iter( &self ) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }


    pub fn len( &self ) -> usize {
        self.items.len()
    }


    pub fn is_empty( &self ) -> bool {
        self.items.is_empty()
    }
}


fn is_name_char( c: char ) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}


/// Checks a queue name against the persistence rules: non-empty,
/// shorter than 64 characters, `[A-Za-z0-9_-]` only.
pub fn validate_name( name: &str ) -> Result<(), NameError> {
    if name.is_empty() {
        return Err( NameError::Empty );
    }
    if name.len() >= NAME_MAX {
        return Err( NameError::TooLong( name.len() ) );
    }
    match name.chars().find( |c| !is_name_char( *c ) ) {
        Some( c ) => Err( NameError::InvalidCharacter( c ) ),
        None => Ok(()),
    }
}


/// Forces a name into the valid character set: truncates to 63
/// characters, strips everything outside the set, and substitutes
/// `"playlist"` if nothing valid remains.
pub fn cleanse_name( name: &str ) -> String {
    let cleaned: String = name
        .chars()
        .take( NAME_MAX - 1 )
        .filter( |c| is_name_char( *c ) )
        .collect();

    if validate_name( &cleaned ).is_ok() {
        cleaned
    } else {
        FALLBACK_NAME.to_string()
    }
}


#[cfg( test )]
mod tests {
    use super::*;
    use crate::item::Item;


    #[test]
    fn test_append_returns_index() {
        let mut queue = Queue::new( "q" );
        assert_eq!( queue.append( Item::history( 1 ) ), 0 );
        assert_eq!( queue.append( Item::history( 2 ) ), 1 );
        assert_eq!( queue.len(), 2 );
    }


    #[test]
    fn test_insert_clamps_index() {
        let mut queue = Queue::new( "q" );
        queue.append( Item::history( 1 ) );
        let landed = queue.insert( Item::history( 2 ), 99 );
        assert_eq!( landed, 1 );
        assert_eq!( queue.len(), 2 );
    }


    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut queue = Queue::new( "q" );
        queue.append( Item::history( 1 ) );
        queue.remove_at( 5 );
        assert_eq!( queue.len(), 1 );
        queue.remove_at( 0 );
        assert!( queue.is_empty() );
    }


    #[test]
    fn test_duplicates_allowed() {
        let mut queue = Queue::new( "q" );
        queue.append( Item::history( 7 ) );
        queue.append( Item::history( 7 ) );
        assert_eq!( queue.len(), 2 );
    }


    #[test]
    fn test_validate_name_rejects_empty() {
        assert_eq!( validate_name( "" ), Err( NameError::Empty ) );
    }


    #[test]
    fn test_validate_name_rejects_64_chars() {
        let name = "a".repeat( 64 );
        assert_eq!( validate_name( &name ), Err( NameError::TooLong( 64 ) ) );
        let name = "a".repeat( 63 );
        assert!( validate_name( &name ).is_ok() );
    }


    #[test]
    fn test_validate_name_rejects_bad_chars() {
        assert!( matches!( validate_name( "foo bar!" ), Err( NameError::InvalidCharacter( _ ) ) ) );
        assert!( validate_name( "foo-bar_1" ).is_ok() );
    }


    #[test]
    fn test_cleanse_strips_and_truncates() {
        let cleansed = cleanse_name( "foo bar!" );
        assert_eq!( cleansed, "foobar" );
        assert!( validate_name( &cleansed ).is_ok() );

        let long = "x".repeat( 100 );
        assert_eq!( cleanse_name( &long ).len(), 63 );
    }


    #[test]
    fn test_cleanse_falls_back() {
        assert_eq!( cleanse_name( "???" ), "playlist" );
        assert_eq!( cleanse_name( "" ), "playlist" );
    }
}
