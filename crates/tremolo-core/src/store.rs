//! Playlist storage layout
//!
//! One file per playlist under a root directory; the filename is the
//! playlist name verbatim, with no extension.

use std::fs;
use std::path::{ Path, PathBuf };


/// Filesystem layout for persisted playlists.
#[derive( Debug, Clone )]
pub struct PlaylistStore {
    root: PathBuf,
}


impl PlaylistStore {
    /// Creates a store rooted at `root`. The directory is not created;
    /// saving requires it to already exist.
    pub fn new( root: impl Into<PathBuf> ) -> Self {
        Self { root: root.into() }
    }


    /// Gets the default store location.
    /// Uses ~/.local/share/tremolo/playlists on Linux, or the platform
    /// equivalent elsewhere.
    pub fn default_root() -> Option<PathBuf> {
        dirs::data_local_dir().map( |d| d.join( "tremolo" ).join( "playlists" ) )
    }


    pub fn root( &self ) -> &Path {
        &self.root
    }


    /// True when the root exists and is a directory.
    pub fn is_usable( &self ) -> bool {
        self.root.is_dir()
    }


    /// Path a playlist name maps to. The name is the storage key.
    pub fn path_for( &self, name: &str ) -> PathBuf {
        self.root.join( name )
    }


    pub fn exists( &self, name: &str ) -> bool {
        self.path_for( name ).is_file()
    }


    /// Lists stored playlist names, optionally filtered by a `*`/`?`
    /// wildcard pattern. A missing root yields an empty list, not an
    /// error.
    pub fn list( &self, pattern: Option<&str> ) -> Vec<String> {
        let entries = match fs::read_dir( &self.root ) {
            Ok( entries ) => entries,
            Err( _ ) => return Vec::new(),
        };

        let mut names: Vec<String> = entries
            .flatten()
            .filter( |entry| entry.path().is_file() )
            .filter_map( |entry| entry.file_name().into_string().ok() )
            .filter( |name| pattern.map_or( true, |p| wildcard_match( p, name ) ) )
            .collect();
        names.sort();
        names
    }
}


/// Matches `pattern` against `name`, where `*` spans any run of
/// characters and `?` matches exactly one.
fn wildcard_match( pattern: &str, name: &str ) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let n: Vec<char> = name.chars().collect();

    let ( mut pi, mut ni ) = ( 0, 0 );
    let mut star: Option<( usize, usize )> = None;

    while ni < n.len() {
        if pi < p.len() && ( p[ pi ] == '?' || p[ pi ] == n[ ni ] ) {
            pi += 1;
            ni += 1;
        } else if pi < p.len() && p[ pi ] == '*' {
            star = Some(( pi, ni ));
            pi += 1;
        } else if let Some(( star_p, star_n )) = star {
            // Backtrack: let the last `*` swallow one more character.
            pi = star_p + 1;
            ni = star_n + 1;
            star = Some(( star_p, star_n + 1 ));
        } else {
            return false;
        }
    }

    while pi < p.len() && p[ pi ] == '*' {
        pi += 1;
    }
    pi == p.len()
}


#[cfg( test )]
mod tests {
    use super::*;


    #[test]
    fn test_wildcard_literal() {
        assert!( wildcard_match( "party", "party" ) );
        assert!( !wildcard_match( "party", "partyy" ) );
    }


    #[test]
    fn test_wildcard_star() {
        assert!( wildcard_match( "rock*", "rock-classics" ) );
        assert!( wildcard_match( "*mix*", "summer-mix-2024" ) );
        assert!( !wildcard_match( "rock*", "jazz" ) );
    }


    #[test]
    fn test_wildcard_question_mark() {
        assert!( wildcard_match( "v?", "v1" ) );
        assert!( !wildcard_match( "v?", "v12" ) );
    }


    #[test]
    fn test_list_missing_root_is_empty() {
        let store = PlaylistStore::new( "/nonexistent/tremolo/playlists" );
        assert!( store.list( None ).is_empty() );
        assert!( !store.is_usable() );
    }


    #[test]
    fn test_list_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in [ "beta", "alpha", "mix-1" ] {
            std::fs::write( dir.path().join( name ), "version:1\n\n" ).unwrap();
        }

        let store = PlaylistStore::new( dir.path() );
        assert_eq!( store.list( None ), vec![ "alpha", "beta", "mix-1" ] );
        assert_eq!( store.list( Some( "mix*" ) ), vec![ "mix-1" ] );
    }
}
