//! cachewire CLI
//!
//! Command-line interface for talking to a memcached-compatible server
//! over the binary protocol.

use clap::{Parser, Subcommand};

use cachewire::{Client, Status};

/// cachewire CLI
#[derive(Parser, Debug)]
#[command(name = "cachewire-cli")]
#[command(about = "CLI for the cachewire memcached binary protocol client")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:11211")]
    server: String,

    /// Vbucket id to route operations to
    #[arg(long, default_value_t = 0)]
    vbucket: u16,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,

        /// Opaque flags stored alongside the value
        #[arg(long, default_value_t = 0)]
        flags: u32,

        /// Expiration in seconds (0 = never)
        #[arg(long, default_value_t = 0)]
        expiration: u32,
    },

    /// Add a key-value pair (fails if the key exists)
    Add {
        /// The key to add
        key: String,

        /// The value to add
        value: String,

        /// Opaque flags stored alongside the value
        #[arg(long, default_value_t = 0)]
        flags: u32,

        /// Expiration in seconds (0 = never)
        #[arg(long, default_value_t = 0)]
        expiration: u32,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Dump server statistics
    Stats {
        /// Stat group (empty for top-level stats)
        #[arg(default_value = "")]
        group: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut client = match Client::connect(&args.server) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("failed to connect to {}: {}", args.server, e);
            std::process::exit(1);
        }
    };

    let result = run(&mut client, args.vbucket, args.command);
    client.close();

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(client: &mut Client, vbucket: u16, command: Commands) -> cachewire::Result<()> {
    match command {
        Commands::Get { key } => {
            let response = client.get(vbucket, &key)?;
            match response.status {
                Status::NoError => println!("{}", String::from_utf8_lossy(&response.body)),
                status => println!("({})", status.as_str()),
            }
        }
        Commands::Set {
            key,
            value,
            flags,
            expiration,
        } => {
            let response = client.set(vbucket, &key, flags, expiration, value.as_bytes())?;
            println!("{}", response.status.as_str());
        }
        Commands::Add {
            key,
            value,
            flags,
            expiration,
        } => {
            let response = client.add(vbucket, &key, flags, expiration, value.as_bytes())?;
            println!("{}", response.status.as_str());
        }
        Commands::Del { key } => {
            let response = client.delete(vbucket, &key)?;
            println!("{}", response.status.as_str());
        }
        Commands::Stats { group } => {
            for entry in client.stats(&group)? {
                println!("{} {}", entry.key, entry.value);
            }
        }
    }
    Ok(())
}
