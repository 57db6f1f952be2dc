//! Command-line argument parsing for Tremolo.

use std::path::PathBuf;

use clap::{ Parser, Subcommand };


/// Tremolo - playlist queue inspection and maintenance.
#[derive( Parser, Debug )]
#[command( name = "tremolo" )]
#[command( version, about, long_about = None )]
pub struct Args {
    /// Playlist storage directory (defaults to the configured root).
    #[arg( short, long )]
    pub root: Option<PathBuf>,

    #[command( subcommand )]
    pub command: CliCommand,
}


#[derive( Subcommand, Debug )]
pub enum CliCommand {
    /// List stored playlists.
    List {
        /// Wildcard filter, e.g. "rock*".
        pattern: Option<String>,
    },

    /// Show a playlist's owner and items.
    Show {
        name: String,

        /// Read only the header.
        #[arg( long )]
        header_only: bool,
    },

    /// Step through a playlist and print the traversal order.
    Walk {
        name: String,

        /// Number of navigation steps.
        #[arg( short, long, default_value_t = 10 )]
        steps: usize,

        /// Shuffle traversal.
        #[arg( long )]
        shuffle: bool,

        /// Wrap around at the queue boundary.
        #[arg( long = "loop" )]
        looped: bool,

        /// Shuffle seed; random when omitted.
        #[arg( long )]
        seed: Option<u64>,
    },

    /// Copy a playlist under a new name.
    Copy {
        src: String,
        dest: String,

        /// Creator id recorded on the copy.
        #[arg( long )]
        owner: Option<u64>,
    },

    /// Delete a stored playlist.
    Delete {
        name: String,

        /// Acting user id for the ownership check.
        #[arg( long )]
        requester: u64,

        /// Skip the ownership check.
        #[arg( long )]
        force: bool,
    },

    /// Show or change persistent settings.
    Config {
        /// Persist a new storage root.
        #[arg( long )]
        set_root: Option<PathBuf>,
    },
}
