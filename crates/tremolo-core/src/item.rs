//! Playable item model
//!
//! Defines the tagged item variants a queue can hold and the audio
//! source types they reference.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;


/// Error returned when an audio type name is not recognized.
#[derive( Debug, Error, PartialEq, Eq )]
#[error( "Unknown audio type: {0}" )]
pub struct UnknownAudioType( pub String );


/// The kind of audio source an item references.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub enum AudioType {
    Youtube,
    Soundcloud,
    Bandcamp,
    Local,
}


impl AudioType {
    /// Canonical name used in the persisted playlist format.
    pub fn name( &self ) -> &'static str {
        match self {
            AudioType::Youtube => "Youtube",
            AudioType::Soundcloud => "Soundcloud",
            AudioType::Bandcamp => "Bandcamp",
            AudioType::Local => "Local",
        }
    }
}


impl fmt::Display for AudioType {
    fn fmt( &self, f: &mut fmt::Formatter<'_> ) -> fmt::Result {
        f.write_str( self.name() )
    }
}


impl FromStr for AudioType {
    type Err = UnknownAudioType;


    fn from_str( s: &str ) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "youtube" => Ok( AudioType::Youtube ),
            "soundcloud" => Ok( AudioType::Soundcloud ),
            "bandcamp" => Ok( AudioType::Bandcamp ),
            "local" => Ok( AudioType::Local ),
            _ => Err( UnknownAudioType( s.to_string() ) ),
        }
    }
}


/// The payload of an item. Exactly one variant per item, so a payload
/// can never carry an inconsistent combination of fields.
#[derive( Debug, Clone, PartialEq, Eq )]
pub enum ItemPayload {
    /// A resolved resource with a provider-assigned id.
    Resource {
        kind: AudioType,
        id: String,
        title: Option<String>,
    },

    /// A reference into the external playback history log.
    HistoryRef { id: u32 },

    /// A raw link that was never resolved. Kept for read compatibility
    /// with old playlist files; normal code paths do not produce it.
    UnresolvedLink {
        url: String,
        kind: Option<AudioType>,
    },
}


/// One playable reference held by a queue.
///
/// The payload is fixed at construction; only the owner may be attached
/// afterwards, when resolution attributes the item to a requester.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct Item {
    payload: ItemPayload,
    owner: Option<u64>,
}


impl Item {
    /// Creates a resolved resource item.
    pub fn resource( kind: AudioType, id: impl Into<String>, title: Option<String> ) -> Self {
        Self {
            payload: ItemPayload::Resource { kind, id: id.into(), title },
            owner: None,
        }
    }


    /// Creates a history reference item.
    pub fn history( id: u32 ) -> Self {
        Self {
            payload: ItemPayload::HistoryRef { id },
            owner: None,
        }
    }


    /// Creates a legacy unresolved link item.
    pub fn link( url: impl Into<String>, kind: Option<AudioType> ) -> Self {
        Self {
            payload: ItemPayload::UnresolvedLink { url: url.into(), kind },
            owner: None,
        }
    }


    /// Attaches the requester this item is attributed to.
    pub fn with_owner( mut self, owner: u64 ) -> Self {
        self.owner = Some( owner );
        self
    }


    /// Sets the attributed requester in place.
    pub fn set_owner( &mut self, owner: u64 ) {
        self.owner = Some( owner );
    }


    pub fn owner( &self ) -> Option<u64> {
        self.owner
    }


    pub fn payload( &self ) -> &ItemPayload {
        &self.payload
    }
}


impl fmt::Display for Item {
    /// Display label, falling back from title to the most specific
    /// reference the payload still carries.
    fn fmt( &self, f: &mut fmt::Formatter<'_> ) -> fmt::Result {
        match &self.payload {
            ItemPayload::Resource { kind, id, title } => match title {
                Some( t ) if !t.is_empty() => f.write_str( t ),
                _ => write!( f, "{}: {}", kind, id ),
            },
            ItemPayload::HistoryRef { id } => write!( f, "HistoryID: {}", id ),
            ItemPayload::UnresolvedLink { url, kind } => {
                if url.is_empty() {
                    f.write_str( "<Invalid entry>" )
                } else if let Some( k ) = kind {
                    write!( f, "{}: {}", k, url )
                } else {
                    f.write_str( url )
                }
            }
        }
    }
}


#[cfg( test )]
mod tests {
    use super::*;


    #[test]
    fn test_audio_type_roundtrip() {
        for kind in [ AudioType::Youtube, AudioType::Soundcloud, AudioType::Bandcamp, AudioType::Local ] {
            assert_eq!( kind.name().parse::<AudioType>().unwrap(), kind );
        }
    }


    #[test]
    fn test_audio_type_case_insensitive() {
        assert_eq!( "YOUTUBE".parse::<AudioType>().unwrap(), AudioType::Youtube );
    }


    #[test]
    fn test_audio_type_unknown() {
        assert!( "vinyl".parse::<AudioType>().is_err() );
    }


    #[test]
    fn test_label_prefers_title() {
        let item = Item::resource( AudioType::Youtube, "abc123", Some( "My Song".to_string() ) );
        assert_eq!( item.to_string(), "My Song" );
    }


    #[test]
    fn test_label_falls_back_to_kind_and_id() {
        let item = Item::resource( AudioType::Soundcloud, "xyz", None );
        assert_eq!( item.to_string(), "Soundcloud: xyz" );
    }


    #[test]
    fn test_label_history() {
        assert_eq!( Item::history( 42 ).to_string(), "HistoryID: 42" );
    }


    #[test]
    fn test_label_link_with_and_without_kind() {
        let typed = Item::link( "https://example.com/a", Some( AudioType::Youtube ) );
        assert_eq!( typed.to_string(), "Youtube: https://example.com/a" );

        let bare = Item::link( "https://example.com/a", None );
        assert_eq!( bare.to_string(), "https://example.com/a" );
    }


    #[test]
    fn test_label_empty_link_is_invalid() {
        assert_eq!( Item::link( "", None ).to_string(), "<Invalid entry>" );
    }


    #[test]
    fn test_owner_attachment() {
        let item = Item::history( 1 ).with_owner( 99 );
        assert_eq!( item.owner(), Some( 99 ) );
    }
}
