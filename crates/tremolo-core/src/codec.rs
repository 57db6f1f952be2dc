//! Playlist file codec
//!
//! Parses the versioned line format into a queue and serializes a
//! queue back out. Stateless; callers hand in readers and writers.
//!
//! The format is two newline-terminated sections: a `key:value` header
//! ending at the first blank line, then one body line per item. Free
//! text fields are percent-escaped so the `:` and `,` delimiters stay
//! unambiguous.

use std::io::{ self, BufRead, Write };
use std::str::FromStr;

use thiserror::Error;

use crate::item::{ AudioType, Item, ItemPayload };
use crate::queue::Queue;


/// The only format version currently read or written. The header key
/// is reserved for future dispatch and its value is ignored on read.
const FORMAT_VERSION: u32 = 1;


/// Errors that abort a whole parse. Per-line body anomalies are logged
/// and skipped instead; ownership is a trust boundary, so header-level
/// owner damage is fatal.
#[derive( Debug, Error )]
pub enum CodecError {
    #[error( "IO error: {0}" )]
    Io( #[from] io::Error ),

    #[error( "Invalid file: duplicate ownerid" )]
    DuplicateOwner,

    #[error( "Broken header" )]
    BrokenHeader,
}


/// Parses a playlist stream into a queue named `name`.
///
/// With `header_only` the body is not read and the returned queue
/// carries metadata only.
pub fn parse<R: BufRead>( reader: R, name: &str, header_only: bool ) -> Result<Queue, CodecError> {
    let mut queue = Queue::new( name );
    queue.file_persistent = true;

    let mut lines = reader.lines();

    // Header: key:value lines up to the first blank line. A header with
    // zero lines is valid.
    for line in lines.by_ref() {
        let line = line?;
        let line = line.trim_end_matches( '\r' );
        if line.is_empty() {
            break;
        }

        let ( key, value ) = match line.split_once( ':' ) {
            Some( kv ) => kv,
            None => continue,
        };
        match key {
            "version" => {}
            "owner" => {
                if queue.creator.is_some() {
                    return Err( CodecError::DuplicateOwner );
                }
                let owner = value.parse::<u64>().map_err( |_| CodecError::BrokenHeader )?;
                queue.creator = Some( owner );
            }
            // Unknown header keys are ignored for forward compatibility.
            _ => {}
        }
    }

    if header_only {
        return Ok( queue );
    }

    for line in lines {
        let line = line?;
        let line = line.trim_end_matches( '\r' );
        if line.is_empty() {
            continue;
        }
        match parse_body_line( line ) {
            Some( item ) => {
                queue.append( item );
            }
            None => {
                tracing::warn!( "Skipping malformed playlist line: {:?}", line );
            }
        }
    }

    Ok( queue )
}


/// Decodes one body line. Returns None on any malformation; the caller
/// skips the line and keeps going.
fn parse_body_line( line: &str ) -> Option<Item> {
    let mut fields = line.splitn( 3, ':' );
    let kind = fields.next()?;
    let owner = fields.next()?;
    let content = fields.next()?;

    let owner = if owner.is_empty() {
        None
    } else {
        Some( owner.parse::<u64>().ok()? )
    };

    let item = match kind {
        "id" => {
            let id = content.parse::<u32>().ok()?;
            Item::history( id )
        }
        "ln" => {
            let ( kind, link ) = content.split_once( ',' )?;
            let kind = if kind.is_empty() {
                None
            } else {
                Some( AudioType::from_str( kind ).ok()? )
            };
            let url = urlencoding::decode( link ).ok()?.into_owned();
            Item::link( url, kind )
        }
        "rs" => {
            let mut parts = content.splitn( 3, ',' );
            let kind = AudioType::from_str( parts.next()? ).ok()?;
            let id = urlencoding::decode( parts.next()? ).ok()?.into_owned();
            let title = urlencoding::decode( parts.next()? ).ok()?.into_owned();
            let title = if title.is_empty() { None } else { Some( title ) };
            Item::resource( kind, id, title )
        }
        _ => return None,
    };

    Some( match owner {
        Some( o ) => item.with_owner( o ),
        None => item,
    } )
}


/// Serializes a queue into the line format: `version:1`, an owner line
/// when the creator is known, one blank line, then one line per item.
pub fn serialize<W: Write>( mut writer: W, queue: &Queue ) -> io::Result<()> {
    writeln!( writer, "version:{}", FORMAT_VERSION )?;
    if let Some( creator ) = queue.creator {
        writeln!( writer, "owner:{}", creator )?;
    }
    writeln!( writer )?;

    for item in queue.iter() {
        if let Some( line ) = encode_item( item ) {
            writeln!( writer, "{}", line )?;
        }
    }

    Ok(())
}


/// Encodes one item, or None for an item nothing can represent (an
/// unresolved link with an empty url); the writer skips it silently.
fn encode_item( item: &Item ) -> Option<String> {
    let owner = item.owner().map( |o| o.to_string() ).unwrap_or_default();

    match item.payload() {
        ItemPayload::HistoryRef { id } => Some( format!( "id:{}:{}", owner, id ) ),
        ItemPayload::UnresolvedLink { url, kind } if !url.is_empty() => {
            let kind = kind.as_ref().map_or( "", |k| k.name() );
            Some( format!( "ln:{}:{},{}", owner, kind, urlencoding::encode( url ) ) )
        }
        ItemPayload::Resource { kind, id, title } => {
            let title = title.as_deref().unwrap_or( "" );
            Some( format!(
                "rs:{}:{},{},{}",
                owner,
                kind,
                urlencoding::encode( id ),
                urlencoding::encode( title ),
            ) )
        }
        ItemPayload::UnresolvedLink { .. } => None,
    }
}


#[cfg( test )]
mod tests {
    use super::*;
    use std::io::Cursor;


    fn parse_str( data: &str ) -> Result<Queue, CodecError> {
        parse( Cursor::new( data ), "test", false )
    }


    #[test]
    fn test_parse_full_scenario() {
        let queue = parse_str( "version:1\nowner:42\n\nrs:7:Youtube,abc123,My Song\n" ).unwrap();

        assert_eq!( queue.creator, Some( 42 ) );
        assert_eq!( queue.len(), 1 );

        let item = queue.get( 0 ).unwrap();
        assert_eq!( item.owner(), Some( 7 ) );
        assert_eq!(
            item.payload(),
            &ItemPayload::Resource {
                kind: AudioType::Youtube,
                id: "abc123".to_string(),
                title: Some( "My Song".to_string() ),
            }
        );
    }


    #[test]
    fn test_parse_header_only() {
        let queue = parse(
            Cursor::new( "version:1\nowner:9\n\nid::1\nid::2\n" ),
            "test",
            true,
        ).unwrap();
        assert_eq!( queue.creator, Some( 9 ) );
        assert!( queue.is_empty() );
    }


    #[test]
    fn test_parse_zero_line_header() {
        let queue = parse_str( "\nid::5\n" ).unwrap();
        assert_eq!( queue.creator, None );
        assert_eq!( queue.len(), 1 );
    }


    #[test]
    fn test_parse_duplicate_owner_is_fatal() {
        let result = parse_str( "owner:1\nowner:2\n\n" );
        assert!( matches!( result, Err( CodecError::DuplicateOwner ) ) );
    }


    #[test]
    fn test_parse_unparsable_owner_is_fatal() {
        let result = parse_str( "owner:bob\n\n" );
        assert!( matches!( result, Err( CodecError::BrokenHeader ) ) );
    }


    #[test]
    fn test_parse_unknown_header_key_ignored() {
        let queue = parse_str( "version:1\nflavor:lemon\n\nid::3\n" ).unwrap();
        assert_eq!( queue.len(), 1 );
    }


    #[test]
    fn test_parse_skips_malformed_body_lines() {
        let data = "\n\
            id::1\n\
            id::notanumber\n\
            xx:5:whatever\n\
            rs:5:Vinyl,a,b\n\
            rs:5:Youtube,only-two-fields\n\
            short:line\n\
            id::2\n";
        let queue = parse_str( data ).unwrap();
        assert_eq!( queue.len(), 2 );
    }


    #[test]
    fn test_parse_legacy_link_blank_type() {
        let queue = parse_str( "\nln:3:,https%3A%2F%2Fexample.com%2Fa\n" ).unwrap();
        let item = queue.get( 0 ).unwrap();
        assert_eq!( item.owner(), Some( 3 ) );
        assert_eq!(
            item.payload(),
            &ItemPayload::UnresolvedLink {
                url: "https://example.com/a".to_string(),
                kind: None,
            }
        );
    }


    #[test]
    fn test_serialize_owner_line_only_when_creator_set() {
        let mut out = Vec::new();
        serialize( &mut out, &Queue::new( "anon" ) ).unwrap();
        assert_eq!( String::from_utf8( out ).unwrap(), "version:1\n\n" );

        let mut out = Vec::new();
        serialize( &mut out, &Queue::with_creator( "owned", 5 ) ).unwrap();
        assert_eq!( String::from_utf8( out ).unwrap(), "version:1\nowner:5\n\n" );
    }


    #[test]
    fn test_serialize_escapes_delimiters() {
        let mut queue = Queue::new( "q" );
        queue.append( Item::resource( AudioType::Local, "a:b,c", Some( "x,y:z".to_string() ) ) );

        let mut out = Vec::new();
        serialize( &mut out, &queue ).unwrap();
        let text = String::from_utf8( out ).unwrap();

        let body = text.split_once( "\n\n" ).unwrap().1.trim_end();
        assert_eq!( body.matches( ':' ).count(), 2 );
        assert_eq!( body.matches( ',' ).count(), 2 );
    }


    #[test]
    fn test_serialize_skips_empty_link() {
        let mut queue = Queue::new( "q" );
        queue.append( Item::link( "", None ) );
        queue.append( Item::history( 1 ) );

        let mut out = Vec::new();
        serialize( &mut out, &queue ).unwrap();
        let text = String::from_utf8( out ).unwrap();
        assert_eq!( text, "version:1\n\nid::1\n" );
    }


    #[test]
    fn test_roundtrip_all_kinds() {
        let mut queue = Queue::with_creator( "mixtape", 42 );
        queue.append( Item::history( 7 ).with_owner( 1 ) );
        queue.append( Item::link( "https://example.com/s?x=1,2", Some( AudioType::Soundcloud ) ) );
        queue.append( Item::resource( AudioType::Youtube, "abc123", Some( "My Song".to_string() ) ).with_owner( 2 ) );
        queue.append( Item::resource( AudioType::Bandcamp, "deep/cut", None ) );

        let mut out = Vec::new();
        serialize( &mut out, &queue ).unwrap();
        let reloaded = parse( Cursor::new( out ), "mixtape", false ).unwrap();

        assert_eq!( reloaded.creator, queue.creator );
        assert_eq!( reloaded.items(), queue.items() );
    }
}
