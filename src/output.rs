//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Application, InstanceInfo, Job, Organization};

/// Trait for human-readable key-value output.
///
/// Implemented by resource types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Application {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.name.len().max(30));

        let mut lines = vec![
            format!("Application: {}", self.name),
            divider,
            format!("Guid:           {}", self.guid),
            format!("State:          {}", self.state),
            format!("Instances:      {}", self.instances),
            format!("Memory:         {} MB", self.memory),
        ];

        if let Some(ref space) = self.space_guid {
            lines.push(format!("Space:          {}", space));
        }

        lines.push(format!(
            "Created:        {}",
            self.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        lines.join("\n")
    }
}

impl PrettyPrint for Organization {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.name.len().max(30));

        [
            format!("Organization: {}", self.name),
            divider,
            format!("Guid:           {}", self.guid),
            format!(
                "Created:        {}",
                self.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
        ]
        .join("\n")
    }
}

impl PrettyPrint for Job {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.guid.len().max(30));

        [
            format!("Job: {}", self.guid),
            divider,
            format!("Status:         {}", self.status),
        ]
        .join("\n")
    }
}

impl PrettyPrint for InstanceInfo {
    fn pretty_print(&self) -> String {
        let divider = "─".repeat(self.name.len().max(30));

        let mut lines = vec![format!("Instance: {}", self.name), divider];

        if let Some(ref build) = self.build {
            lines.push(format!("Build:          {}", build));
        }
        if let Some(ref version) = self.version {
            lines.push(format!("Version:        {}", version));
        }
        lines.push(format!("Auth endpoint:  {}", self.authorization_endpoint));

        lines.join("\n")
    }
}
