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

//! The invocation boundary: one request in, one response document out.

use crate::{
    config::HandlerConfig,
    error::HandlerError,
    request::RenderRequest,
    response::{ErrorResponse, RenderResponse},
};
use avatar_agents::{
    asset_agent::{AssetAgent, AssetSource, HttpAssetSource},
    AgentError, RenderAgent, SceneAssembler,
};
use std::{
    error::Error,
    io::{self, BufRead, Read, Write},
    sync::Arc,
    time::Instant,
};

/// Serves render requests against a fixed configuration.
///
/// Invocations are independent: each one gets a fresh [`AssetAgent`], so
/// nothing fetched for one request is visible to the next.
pub struct Handler {
    config: HandlerConfig,
    source: Arc<dyn AssetSource>,
    render_agent: RenderAgent,
}

impl Handler {
    /// Creates a handler fetching assets over HTTP.
    pub fn new(config: HandlerConfig) -> Result<Self, HandlerError> {
        let source = HttpAssetSource::new(&config.assets).map_err(AgentError::from)?;
        Self::with_source(config, Arc::new(source))
    }

    /// Creates a handler fetching assets from `source`.
    ///
    /// Fails if the configuration does not validate.
    pub fn with_source(
        config: HandlerConfig,
        source: Arc<dyn AssetSource>,
    ) -> Result<Self, HandlerError> {
        config.validate()?;
        let render_agent = RenderAgent::new(config.render_settings());
        Ok(Self {
            config,
            source,
            render_agent,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Runs the render pipeline for one request.
    pub fn render(&self, request: &RenderRequest) -> Result<RenderResponse, HandlerError> {
        let started = Instant::now();
        let size = request.validated_size(self.config.render.max_size)?;
        let avatar = request.avatar(self.config.avatar.fallback())?;
        log::info!("Rendering avatar of user {} at {size}x{size}", avatar.user_id);

        let assets = AssetAgent::new(Arc::clone(&self.source));
        let scene = SceneAssembler::new(&assets, &self.config.assets).assemble(&avatar)?;
        let png = self.render_agent.render_png(&scene, size)?;

        log::info!(
            "Rendered {size}x{size} avatar ({} bytes) in {:?}",
            png.len(),
            started.elapsed()
        );
        Ok(RenderResponse::from_png(&png))
    }

    /// Decodes a request from `reader` and renders it.
    pub fn process<R: Read>(&self, reader: R) -> Result<RenderResponse, HandlerError> {
        let request = RenderRequest::from_reader(reader)?;
        self.render(&request)
    }

    /// Decodes a request from `reader`, renders it and writes exactly one
    /// response document to `writer`.
    ///
    /// Any failure becomes an [`ErrorResponse`]; only a failure to write the
    /// response itself is returned.
    pub fn handle<R: Read, W: Write>(&self, reader: R, writer: W) -> io::Result<()> {
        self.serve(reader, writer, |_| {})
    }

    /// Like [`Handler::handle`], handing a successful response to `inspect`
    /// before it is written.
    pub fn serve<R: Read, W: Write>(
        &self,
        reader: R,
        writer: W,
        inspect: impl FnOnce(&RenderResponse),
    ) -> io::Result<()> {
        let outcome = self.process(reader);
        if let Ok(response) = &outcome {
            inspect(response);
        }
        write_outcome(&outcome, writer)
    }

    /// Serves newline-delimited requests, writing one document per request
    /// line in input order. Blank lines are skipped.
    ///
    /// Lines are handled as raw bytes, so a line that is not UTF-8 or not JSON
    /// gets an error document and the following lines are still served.
    /// Returns the number of documents written.
    pub fn serve_lines<R: BufRead, W: Write>(
        &self,
        reader: R,
        mut writer: W,
        mut inspect: impl FnMut(&RenderResponse),
    ) -> io::Result<usize> {
        let mut served = 0;
        for line in reader.split(b'\n') {
            let line = line?;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            self.serve(line.as_slice(), &mut writer, &mut inspect)?;
            served += 1;
        }
        Ok(served)
    }
}

/// Writes the document for a finished invocation: the image on success, the
/// error message otherwise.
pub fn write_outcome<W: Write>(
    outcome: &Result<RenderResponse, HandlerError>,
    writer: W,
) -> io::Result<()> {
    match outcome {
        Ok(response) => response.write_to(writer),
        Err(e) => {
            let message = error_message(e);
            log::error!("Render failed: {message}");
            ErrorResponse::new(message).write_to(writer)
        }
    }
}

/// Joins an error and its chain of sources into one line.
pub fn error_message(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
