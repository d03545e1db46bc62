//! Display formatting for CLI output

use appscale_core::{CredentialMap, NodeRecord};
use console::style;
use std::io::{self, Write};

/// Renderer for node listings
pub struct NodeListRenderer {
    writer: Box<dyn Write>,
}

impl Default for NodeListRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeListRenderer {
    /// Create a renderer that writes to stdout
    pub fn new() -> Self {
        Self {
            writer: Box::new(io::stdout()),
        }
    }

    /// Create a renderer that writes to a custom writer (for testing)
    pub fn with_writer<W: Write + 'static>(writer: W) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }

    /// Render every node of a deployment
    pub fn render(&mut self, keyname: &str, nodes: &[NodeRecord]) -> io::Result<()> {
        writeln!(
            self.writer,
            "Deployment {} ({} node(s))",
            style(keyname).cyan().bold(),
            nodes.len()
        )?;

        for node in nodes {
            writeln!(self.writer)?;
            writeln!(
                self.writer,
                "  {} {}",
                style("●").green(),
                style(&node.public_ip).bold()
            )?;
            writeln!(
                self.writer,
                "    private: {}  instance: {}  cloud: {}",
                node.private_ip, node.instance_id, node.cloud
            )?;
            writeln!(self.writer, "    roles: {}", node.jobs.join(", "))?;
        }

        Ok(())
    }
}

/// Print a credential map, one field per line
pub fn print_credentials(creds: &CredentialMap) {
    for (field, value) in creds {
        println!("  {}: {}", style(field).dim(), value);
    }
}
