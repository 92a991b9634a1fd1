//! Expression library - loads pre-rendered animation frames from disk.
//!
//! The on-disk layout is one subdirectory per expression, each holding the
//! expression's frames as individually numbered image files:
//!
//! ```text
//! expressions/
//!   blank/0001.png
//!   happy/0001.png happy/0002.png happy/0003.png
//! ```
//!
//! Directories and files are scanned in sorted order so the same tree
//! always produces the same library. Files that fail to decode just yield
//! fewer frames; a subdirectory with no decodable frames is excluded.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{FaceError, Result};

/// Image file extensions recognized as animation frames.
const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// A single pre-decoded animation frame (RGBA8, row-major).
#[derive(Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Create a frame from raw RGBA8 pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 pixel data, `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("size", &format!("{}x{}", self.width, self.height))
            .finish()
    }
}

/// An immutable, named, looping sequence of frames.
#[derive(Debug, Clone)]
pub struct Expression {
    name: String,
    frames: Vec<Frame>,
}

impl Expression {
    pub fn new(name: impl Into<String>, frames: Vec<Frame>) -> Self {
        Self {
            name: name.into(),
            frames,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }
}

/// Mapping from expression name to its frame sequence.
///
/// Loaded once at startup and never mutated afterwards. Every entry is
/// guaranteed to hold at least one frame.
#[derive(Debug)]
pub struct ExpressionLibrary {
    expressions: BTreeMap<String, Expression>,
}

impl ExpressionLibrary {
    /// Scan `root` and decode every expression found under it.
    ///
    /// Hidden entries and plain files at the root are ignored. Fails if
    /// `root` is not a directory or if no subdirectory yields any frames.
    pub fn load(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(FaceError::Configuration(format!(
                "Expressions directory '{}' not found",
                root.display()
            )));
        }

        let mut dirs: Vec<_> = fs::read_dir(root)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .collect();
        dirs.sort();

        let mut expressions = BTreeMap::new();
        for path in dirs {
            if !path.is_dir() {
                continue;
            }
            let name = match path.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => continue,
            };
            if name.starts_with('.') {
                continue;
            }

            let frames = Self::load_frames(&path)?;
            if frames.is_empty() {
                tracing::debug!(expression = name.as_str(), "No decodable frames, skipping");
                continue;
            }
            tracing::debug!(
                expression = name.as_str(),
                frames = frames.len(),
                "Loaded expression"
            );
            expressions.insert(name.clone(), Expression::new(name, frames));
        }

        if expressions.is_empty() {
            return Err(FaceError::Configuration(format!(
                "No valid expressions in '{}'",
                root.display()
            )));
        }

        Ok(Self { expressions })
    }

    /// Build a library from already-decoded expressions.
    ///
    /// Same validity rules as [`load`](Self::load): at least one expression,
    /// and no expression without frames.
    pub fn from_expressions(
        expressions: impl IntoIterator<Item = Expression>,
    ) -> Result<Self> {
        let mut map = BTreeMap::new();
        for expression in expressions {
            if expression.frame_count() == 0 {
                return Err(FaceError::Configuration(format!(
                    "Expression '{}' has no frames",
                    expression.name()
                )));
            }
            map.insert(expression.name().to_string(), expression);
        }
        if map.is_empty() {
            return Err(FaceError::Configuration(
                "Expression library is empty".to_string(),
            ));
        }
        Ok(Self { expressions: map })
    }

    /// Decode every recognized image file in `dir`, sorted by filename.
    fn load_frames(dir: &Path) -> Result<Vec<Frame>> {
        let mut files: Vec<_> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .map(|ext| {
                            let ext = ext.to_ascii_lowercase();
                            FRAME_EXTENSIONS.contains(&ext.as_str())
                        })
                        .unwrap_or(false)
            })
            .collect();
        files.sort();

        let mut frames = Vec::with_capacity(files.len());
        for file in files {
            match image::open(&file) {
                Ok(img) => {
                    let rgba = img.to_rgba8();
                    let (width, height) = rgba.dimensions();
                    frames.push(Frame::new(width, height, rgba.into_raw()));
                }
                Err(err) => {
                    tracing::debug!(file = %file.display(), %err, "Skipping undecodable frame");
                }
            }
        }
        Ok(frames)
    }

    pub fn get(&self, name: &str) -> Option<&Expression> {
        self.expressions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.expressions.contains_key(name)
    }

    /// Expression names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.expressions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Resolve the default expression: `requested` if it is loaded,
    /// otherwise the lexicographically first library entry.
    pub fn resolve_default<'a>(&'a self, requested: &'a str) -> &'a str {
        match self.expressions.get_key_value(requested) {
            Some((key, _)) => key,
            None => self
                .expressions
                .keys()
                .next()
                .map(String::as_str)
                .unwrap_or(requested),
        }
    }
}
