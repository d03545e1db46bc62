//! Nodes command - list every node of a deployment

use appscale_core::{FsReader, LocationsManifest};

use crate::display::NodeListRenderer;
use crate::error::Result;

pub fn run(keyname: &str) -> Result<()> {
    let reader = FsReader;
    let manifest = LocationsManifest::load(&reader, keyname)?;

    let mut renderer = NodeListRenderer::new();
    renderer.render(manifest.keyname(), manifest.nodes())?;

    Ok(())
}
