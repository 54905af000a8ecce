//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the cfapi binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Cloud Foundry API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "cfapi", about = "Cloud Foundry v2 API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show instance info for the target.
    Info,

    /// Get a single resource by guid.
    Get {
        /// The type of resource to get.
        resource: Resource,

        /// The resource guid.
        guid: String,
    },

    /// List resources.
    List {
        /// The type of resource to list.
        resource: Collection,

        /// Application guid (required for routes/instances of an app).
        #[arg(long)]
        app: Option<String>,
    },

    /// Change the requested instance count of an application.
    Scale {
        /// The application guid.
        guid: String,

        /// New instance count.
        #[arg(long, allow_negative_numbers = true)]
        instances: i32,
    },

    /// Request that an application be started.
    Start {
        /// The application guid.
        guid: String,
    },

    /// Request that an application be stopped.
    Stop {
        /// The application guid.
        guid: String,
    },
}

/// Resource types that can be fetched individually.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Resource {
    /// An application.
    #[value(alias = "application")]
    App,
    /// An asynchronous Cloud Controller job.
    Job,
}

/// Resource types that can be listed.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Collection {
    /// Applications.
    #[value(alias = "applications")]
    Apps,
    /// Organizations.
    #[value(alias = "organizations")]
    Orgs,
    /// Spaces.
    Spaces,
    /// Users.
    Users,
    /// HTTP routes (all, or one app's with --app).
    Routes,
    /// Shared domains.
    Domains,
    /// Per-instance stats for an app (requires --app).
    Instances,
}
