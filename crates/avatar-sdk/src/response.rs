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

//! Response documents written back to the caller.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{self, Write},
    path::Path,
};

/// A successful render: the PNG image, base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResponse {
    /// Base64 (standard alphabet, padded) of the PNG bytes.
    pub image: String,
}

impl RenderResponse {
    /// Wraps encoded PNG bytes.
    pub fn from_png(png: &[u8]) -> Self {
        Self {
            image: STANDARD.encode(png),
        }
    }

    /// Decodes the image back to PNG bytes.
    pub fn png_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.image)
    }

    /// Writes the decoded PNG to `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let png = self
            .png_bytes()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, png)
    }

    /// Writes the response as one JSON document followed by a newline.
    pub fn write_to<W: Write>(&self, writer: W) -> io::Result<()> {
        write_document(writer, self)
    }
}

/// A failed render: a human-readable message and no image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// What went wrong.
    pub error: String,
}

impl ErrorResponse {
    /// Creates an error document carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Writes the response as one JSON document followed by a newline.
    pub fn write_to<W: Write>(&self, writer: W) -> io::Result<()> {
        write_document(writer, self)
    }
}

fn write_document<W: Write, T: Serialize>(mut writer: W, document: &T) -> io::Result<()> {
    serde_json::to_writer(&mut writer, document)?;
    writer.write_all(b"\n")?;
    writer.flush()
}
