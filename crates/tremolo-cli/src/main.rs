//! Tremolo command-line front-end
//!
//! A thin, non-interactive driver over the queue engine: listing,
//! inspection, traversal walks and storage maintenance.

use anyhow::{ Context, Result };
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tremolo_core::{ PlaylistStore, ProviderRegistry, Queue, QueueManager };

mod cli;
mod settings;

use cli::{ Args, CliCommand };
use settings::Settings;


fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new( "info" ) ),
        )
        .with_writer( std::io::stderr )
        .init();

    let args = Args::parse();
    let settings = Settings::load();

    let root = args.root
        .clone()
        .or_else( || settings.storage_root.clone() )
        .or_else( PlaylistStore::default_root )
        .context( "No playlist storage directory available" )?;
    let store = PlaylistStore::new( root );

    match args.command {
        CliCommand::List { pattern } => {
            for name in store.list( pattern.as_deref() ) {
                println!( "{}", name );
            }
            Ok(())
        }

        CliCommand::Show { name, header_only } => {
            let manager = read_only_manager( store, &settings );
            let queue = manager.load( &name, header_only )?;
            print_queue( &queue, header_only );
            Ok(())
        }

        CliCommand::Walk { name, steps, shuffle, looped, seed } => {
            let seed = seed.or( settings.seed ).unwrap_or_else( rand::random );
            let mut manager = QueueManager::new( store, ProviderRegistry::new(), seed );

            let queue = manager.load( &name, false )?;
            manager.play_freelist( &queue );
            manager.set_loop( looped || settings.loop_enabled );
            manager.set_random( shuffle || settings.random );

            tracing::info!( "Walking {} ({} items, seed {})", name, queue.len(), seed );
            if let Some( playing ) = manager.current() {
                println!( "{:>4}  {}", playing.index, playing.item );
            }
            for _ in 0..steps {
                match manager.next() {
                    Some( playing ) => println!( "{:>4}  {}", playing.index, playing.item ),
                    None => {
                        println!( "-- end of queue --" );
                        break;
                    }
                }
            }
            Ok(())
        }

        CliCommand::Copy { src, dest, owner } => {
            let manager = read_only_manager( store, &settings );
            let mut queue = manager.load( &src, false )?;
            queue.name = dest;
            if let Some( owner ) = owner {
                queue.creator = Some( owner );
            }
            manager.save( &queue )?;
            tracing::info!( "Copied {} to {}", src, queue.name );
            Ok(())
        }

        CliCommand::Delete { name, requester, force } => {
            let manager = read_only_manager( store, &settings );
            manager.delete( &name, requester, force )?;
            tracing::info!( "Deleted {}", name );
            Ok(())
        }

        CliCommand::Config { set_root } => {
            let mut settings = settings;
            match set_root {
                Some( path ) => {
                    settings.storage_root = Some( path );
                    settings.save();
                }
                None => {
                    println!( "storage_root: {:?}", settings.storage_root );
                    println!( "loop_enabled: {}", settings.loop_enabled );
                    println!( "random:       {}", settings.random );
                    println!( "seed:         {:?}", settings.seed );
                }
            }
            Ok(())
        }
    }
}


fn read_only_manager( store: PlaylistStore, settings: &Settings ) -> QueueManager {
    let seed = settings.seed.unwrap_or( 0 );
    QueueManager::new( store, ProviderRegistry::new(), seed )
}


fn print_queue( queue: &Queue, header_only: bool ) {
    println!( "name:    {}", queue.name );
    match queue.creator {
        Some( id ) => println!( "creator: {}", id ),
        None => println!( "creator: (none)" ),
    }
    if header_only {
        return;
    }

    println!( "items:   {}", queue.len() );
    for ( index, item ) in queue.iter().enumerate() {
        match item.owner() {
            Some( owner ) => println!( "{:>4}  {}  (requested by {})", index, item, owner ),
            None => println!( "{:>4}  {}", index, item ),
        }
    }
}
