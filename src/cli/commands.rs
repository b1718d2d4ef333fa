// src/cli/commands.rs
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Create an account and open a session
    Register,

    /// Open a session for an existing account
    Login,

    /// Close the active session
    Logout,

    /// Show the active principal
    Whoami,

    /// List all credential entries
    List,

    /// Show one entry, secret included
    Get {
        /// Entry ID
        #[arg(required = true)]
        id: String,
    },

    /// Add a credential entry
    Add {
        /// Service the credential belongs to
        #[arg(long)]
        service: String,

        /// Username or email used to log in to the service
        #[arg(long)]
        login: String,

        /// Service URL
        #[arg(long)]
        url: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,

        /// Generate the secret instead of prompting for it
        #[arg(long)]
        generate: bool,
    },

    /// Update fields of an entry
    Update {
        /// Entry ID
        #[arg(required = true)]
        id: String,

        #[arg(long)]
        service: Option<String>,

        #[arg(long)]
        login: Option<String>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Prompt for a new secret
        #[arg(long)]
        secret: bool,
    },

    /// Delete an entry
    Delete {
        /// Entry ID
        #[arg(required = true)]
        id: String,
    },

    /// Generate a random password
    Generate {
        /// Password length (clamped to 8..=32)
        #[arg(long)]
        length: Option<usize>,

        /// Leave uppercase letters out of the alphabet
        #[arg(long)]
        no_uppercase: bool,

        /// Leave digits out of the alphabet
        #[arg(long)]
        no_numbers: bool,

        /// Leave symbols out of the alphabet
        #[arg(long)]
        no_symbols: bool,
    },

    /// Score a password's strength
    Strength {
        /// Password to score; prompted for when omitted
        password: Option<String>,
    },

    /// Check an email against the (mock) breach database
    Breach {
        /// Email address to check
        #[arg(required = true)]
        email: String,
    },
}
