//! Frame scaler using Lanczos3 interpolation
//!
//! Upscales decoded expression frames to the output surface size using the
//! `fast_image_resize` crate with SIMD acceleration. The destination buffer
//! and resizer are reused across frames.

use fast_image_resize::{
    images::{Image, ImageRef},
    FilterType, PixelType, ResizeOptions, Resizer,
};

/// Lanczos-based RGBA frame scaler.
///
/// The destination size is fixed at construction (the output surface);
/// source frames of any size are stretched to fill it.
pub struct FrameScaler {
    /// Destination width
    dst_width: u32,
    /// Destination height
    dst_height: u32,
    /// Reusable resizer instance
    resizer: Resizer,
    /// Destination image buffer
    dst_image: Image<'static>,
    /// Resize options (Lanczos3)
    options: ResizeOptions,
}

impl FrameScaler {
    /// Creates a scaler targeting the given output dimensions.
    pub fn new(dst_width: u32, dst_height: u32) -> Self {
        let resizer = Resizer::new();

        // Pre-allocate destination buffer
        let dst_image = Image::new(dst_width.max(1), dst_height.max(1), PixelType::U8x4);

        // Configure Lanczos3 algorithm
        let options = ResizeOptions::new().resize_alg(fast_image_resize::ResizeAlg::Convolution(
            FilterType::Lanczos3,
        ));

        Self {
            dst_width,
            dst_height,
            resizer,
            dst_image,
            options,
        }
    }

    /// Scales an RGBA8 frame to the destination size.
    ///
    /// Returns the scaled pixel bytes, or `None` if `pixels` does not match
    /// the stated source dimensions. Frames that already match the output
    /// size are passed through untouched.
    pub fn scale<'a>(
        &'a mut self,
        src_width: u32,
        src_height: u32,
        pixels: &'a [u8],
    ) -> Option<&'a [u8]> {
        let expected_len = src_width as usize * src_height as usize * 4;
        if pixels.len() != expected_len {
            return None;
        }

        if src_width == self.dst_width && src_height == self.dst_height {
            return Some(pixels);
        }

        let src_image = ImageRef::new(src_width, src_height, pixels, PixelType::U8x4).ok()?;

        self.resizer
            .resize(&src_image, &mut self.dst_image, &self.options)
            .ok()?;

        Some(self.dst_image.buffer())
    }

    /// Returns the destination dimensions
    pub fn dst_dimensions(&self) -> (u32, u32) {
        (self.dst_width, self.dst_height)
    }
}

impl std::fmt::Debug for FrameScaler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScaler")
            .field("dst", &format!("{}x{}", self.dst_width, self.dst_height))
            .finish()
    }
}
