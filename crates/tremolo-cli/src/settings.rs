//! Application settings management
//!
//! Persistent defaults for the storage root and traversal flags.

use std::fs;
use std::path::PathBuf;

use serde::{ Deserialize, Serialize };


/// Persisted CLI settings.
#[derive( Debug, Clone, Default, Serialize, Deserialize )]
#[serde( default )]
pub struct Settings {
    /// Playlist storage root; falls back to the platform data dir.
    pub storage_root: Option<PathBuf>,

    /// Default loop flag for walks.
    pub loop_enabled: bool,

    /// Default shuffle flag for walks.
    pub random: bool,

    /// Fixed shuffle seed; a fresh one is drawn per run when unset.
    pub seed: Option<u64>,
}


impl Settings {
    /// Returns the path to the settings file.
    fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map( |p| p.join( "tremolo" ).join( "settings.json" ) )
    }


    /// Loads settings from disk, or returns defaults if not found.
    pub fn load() -> Self {
        let path = match Self::settings_path() {
            Some( p ) => p,
            None => return Self::default(),
        };

        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string( &path ) {
            Ok( contents ) => serde_json::from_str( &contents ).unwrap_or_default(),
            Err( e ) => {
                tracing::warn!( "Failed to read settings: {}", e );
                Self::default()
            }
        }
    }


    /// Saves settings to disk.
    pub fn save( &self ) {
        let path = match Self::settings_path() {
            Some( p ) => p,
            None => return,
        };

        if let Some( parent ) = path.parent() {
            if !parent.exists() {
                if let Err( e ) = fs::create_dir_all( parent ) {
                    tracing::warn!( "Failed to create settings directory: {}", e );
                    return;
                }
            }
        }

        match serde_json::to_string_pretty( self ) {
            Ok( json ) => {
                if let Err( e ) = fs::write( &path, json ) {
                    tracing::warn!( "Failed to save settings: {}", e );
                }
            }
            Err( e ) => {
                tracing::warn!( "Failed to serialize settings: {}", e );
            }
        }
    }
}
