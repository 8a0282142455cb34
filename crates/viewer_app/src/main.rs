mod host;
mod logging;
mod surface;

use std::path::PathBuf;

use anyhow::{bail, Result};

fn main() -> Result<()> {
    logging::initialize(logging::LogDestination::Both);

    let mut args = std::env::args().skip(1);
    let (Some(base_url), Some(picture_id)) = (args.next(), args.next()) else {
        bail!("usage: viewer_app <base-url> <picture-id> [output-dir]");
    };
    let output_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output"));

    host::run(&base_url, &picture_id, &output_dir)
}
