// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! `avatar-render`: renders avatar requests read from stdin or a file.

use anyhow::{Context, Result};
use avatar_sdk::{
    config::{ConfigOverrides, HandlerConfig},
    Handler, RenderResponse,
};
use clap::Parser;
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(
    name = "avatar-render",
    version,
    about = "Render a 3D avatar to a base64 PNG from a JSON request"
)]
struct Args {
    /// Treat the input as newline-delimited requests, answering each on its own line
    #[arg(long)]
    lines: bool,

    /// Read requests from this file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// Write responses to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also write the rendered PNG to this file
    #[arg(long)]
    png: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, env = "AVATAR_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the mesh and template host
    #[arg(long, env = "AVATAR_CONTENT_BASE")]
    content_base: Option<String>,

    /// Base URL of the asset API
    #[arg(long, env = "AVATAR_ASSET_API_BASE")]
    asset_api_base: Option<String>,

    /// Supersampling factor per axis
    #[arg(long, env = "AVATAR_RENDER_SCALE")]
    scale: Option<u32>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            content_base: self.content_base.clone(),
            asset_api_base: self.asset_api_base.clone(),
            scale: self.scale,
        }
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => HandlerConfig::load(path)?,
        None => HandlerConfig::default(),
    };
    config.apply_overrides(&args.overrides());
    let handler = Handler::new(config)?;
    log::info!(
        "Serving from {} (asset API {}), {}x supersampling",
        handler.config().assets.content_base,
        handler.config().assets.asset_api_base,
        handler.config().render.scale
    );

    let input: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(
            File::open(path)
                .with_context(|| format!("Failed to open input '{}'", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };
    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output '{}'", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let png = args.png.as_deref();
    let save = |response: &RenderResponse| {
        if let Some(path) = png {
            save_png(response, path);
        }
    };

    if args.lines {
        let served = handler
            .serve_lines(BufReader::new(input), &mut output, save)
            .context("Failed to serve requests")?;
        log::info!("Served {served} requests");
    } else {
        handler
            .serve(input, &mut output, save)
            .context("Failed to write response")?;
    }

    output.flush().context("Failed to flush output")?;
    Ok(())
}

fn save_png(response: &RenderResponse, path: &Path) {
    match response.save_png(path) {
        Ok(()) => log::info!("Wrote PNG to '{}'", path.display()),
        Err(e) => log::warn!("Failed to write PNG to '{}': {e}", path.display()),
    }
}
