//! Link resolution providers
//!
//! The queue manager consumes an ordered registry of providers that
//! turn URLs into fully populated queues. The providers themselves
//! live outside the engine; only their contract is defined here.

use anyhow::Result;

use crate::item::AudioType;
use crate::queue::Queue;


/// A link resolver the manager can dispatch to.
///
/// `resolve` may block for as long as the backing service takes; the
/// engine imposes no timeout, so callers needing bounded latency wrap
/// the call externally.
pub trait LinkProvider {
    /// Whether this provider recognizes the URL.
    fn matches( &self, url: &str ) -> bool;

    /// The audio type this provider produces.
    fn kind( &self ) -> AudioType;

    /// Resolves the URL into a queue of playable items.
    fn resolve( &self, url: &str ) -> Result<Queue>;
}


/// Ordered provider list. Registration order is the dispatch order:
/// the first match wins, and the list is never re-ordered or
/// de-duplicated.
#[derive( Default )]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn LinkProvider>>,
}


impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }


    /// Appends a provider to the end of the dispatch order.
    pub fn register( &mut self, provider: Box<dyn LinkProvider> ) {
        self.providers.push( provider );
    }


    pub fn len( &self ) -> usize {
        self.providers.len()
    }


    pub fn is_empty( &self ) -> bool {
        self.providers.is_empty()
    }


    /// First provider whose `matches` accepts the URL.
    pub fn find_for_url( &self, url: &str ) -> Option<&dyn LinkProvider> {
        self.providers
            .iter()
            .find( |p| p.matches( url ) )
            .map( |p| p.as_ref() )
    }


    /// First provider declaring the given audio type.
    pub fn find_for_kind( &self, kind: AudioType ) -> Option<&dyn LinkProvider> {
        self.providers
            .iter()
            .find( |p| p.kind() == kind )
            .map( |p| p.as_ref() )
    }
}


/// Pulls the first embedded http(s) URL out of free-form text.
pub fn extract_url( message: &str ) -> Option<String> {
    for token in message.split_whitespace() {
        let token = token.trim_matches( |c| c == '<' || c == '>' );
        if token.starts_with( "http://" ) || token.starts_with( "https://" ) {
            return Some( token.to_string() );
        }
    }
    None
}


#[cfg( test )]
mod tests {
    use super::*;
    use crate::item::Item;


    struct FakeProvider {
        kind: AudioType,
        prefix: &'static str,
    }


    impl LinkProvider for FakeProvider {
        fn matches( &self, url: &str ) -> bool {
            url.starts_with( self.prefix )
        }


        fn kind( &self ) -> AudioType {
            self.kind
        }


        fn resolve( &self, url: &str ) -> Result<Queue> {
            let mut queue = Queue::new( "resolved" );
            queue.append( Item::resource( self.kind, url, None ) );
            Ok( queue )
        }
    }


    fn registry() -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();
        registry.register( Box::new( FakeProvider {
            kind: AudioType::Youtube,
            prefix: "https://youtube",
        } ) );
        registry.register( Box::new( FakeProvider {
            kind: AudioType::Soundcloud,
            prefix: "https://soundcloud",
        } ) );
        registry
    }


    #[test]
    fn test_find_for_url_first_match_wins() {
        let registry = registry();
        let provider = registry.find_for_url( "https://soundcloud.com/a" ).unwrap();
        assert_eq!( provider.kind(), AudioType::Soundcloud );
    }


    #[test]
    fn test_find_for_url_no_match() {
        assert!( registry().find_for_url( "https://example.com" ).is_none() );
    }


    #[test]
    fn test_find_for_kind() {
        let registry = registry();
        assert!( registry.find_for_kind( AudioType::Youtube ).is_some() );
        assert!( registry.find_for_kind( AudioType::Local ).is_none() );
    }


    #[test]
    fn test_extract_url() {
        assert_eq!(
            extract_url( "play this https://youtube.com/watch?v=1 please" ).as_deref(),
            Some( "https://youtube.com/watch?v=1" )
        );
        assert_eq!(
            extract_url( "wrapped <https://example.com/x>" ).as_deref(),
            Some( "https://example.com/x" )
        );
        assert_eq!( extract_url( "no links here" ), None );
    }
}
