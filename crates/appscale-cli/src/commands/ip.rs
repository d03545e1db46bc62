//! Ip command - resolve a node address by role

use appscale_core::{CoreError, FsReader, LocationsManifest};

use crate::error::Result;

pub fn run(keyname: &str, role: &str, all: bool) -> Result<()> {
    let reader = FsReader;
    let manifest = LocationsManifest::load(&reader, keyname)?;

    if all {
        let ips = manifest.public_ips_for_role(role);
        if ips.is_empty() {
            return Err(CoreError::RoleNotFound {
                role: role.to_string(),
            }
            .into());
        }
        for ip in ips {
            println!("{ip}");
        }
    } else {
        println!("{}", manifest.public_ip_for_role(role)?);
    }

    Ok(())
}
