//! Pixel-rebuilding stripper built on the `image` crate.
//!
//! The source is decoded to a bare pixel buffer and a brand-new container is
//! encoded from that buffer alone. Nothing else is read from the source, so
//! EXIF, XMP, ICC profiles, text chunks and embedded thumbnails cannot
//! survive.

use super::{MetadataStripper, StripOptions, StrippedImage};
use crate::error::StripError;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, ImageEncoder, ImageFormat, ImageReader};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Strips metadata by re-encoding the raw pixel grid
#[derive(Debug, Clone, Default)]
pub struct PixelStripper {
    options: StripOptions,
}

impl PixelStripper {
    /// Create a stripper with the given options
    pub fn new(options: StripOptions) -> Self {
        Self { options }
    }

    /// Writing onto the source would destroy the only copy of the original.
    fn ensure_distinct(input: &Path, output: &Path) -> Result<(), StripError> {
        if !output.exists() {
            return Ok(());
        }
        let same = match (fs::canonicalize(input), fs::canonicalize(output)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        };
        if same {
            return Err(StripError::WouldOverwriteSource {
                path: input.to_path_buf(),
            });
        }
        Ok(())
    }
}

impl MetadataStripper for PixelStripper {
    fn rebuild(&self, input: &Path, output: &Path) -> Result<StrippedImage, StripError> {
        let format =
            ImageFormat::from_path(output).map_err(|_| StripError::UnsupportedOutputFormat {
                path: output.to_path_buf(),
            })?;

        Self::ensure_distinct(input, output)?;

        // Sniff the content rather than trusting the extension; a PNG saved
        // as .jpg is still a readable image.
        let reader = ImageReader::open(input)
            .and_then(|r| r.with_guessed_format())
            .map_err(|source| StripError::Open {
                path: input.to_path_buf(),
                source,
            })?;
        let decoded = reader.decode().map_err(|e| StripError::Decode {
            path: input.to_path_buf(),
            reason: e.to_string(),
        })?;

        // JPEG only holds 8-bit gray or RGB; converting would change the mode.
        if format == ImageFormat::Jpeg && !matches!(decoded.color(), ColorType::L8 | ColorType::Rgb8)
        {
            return Err(StripError::Encode {
                path: output.to_path_buf(),
                reason: format!("cannot write {:?} pixels as JPEG", decoded.color()),
            });
        }

        let width = decoded.width();
        let height = decoded.height();
        let color = decoded.color();
        let pixels = decoded.as_bytes();

        let parent = match output.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let write_error = |source: std::io::Error| StripError::Write {
            path: output.to_path_buf(),
            source,
        };

        // Encode into a sibling temp file so a failed encode never leaves a
        // truncated image at the destination.
        let mut builder = tempfile::Builder::new();
        builder.prefix(".exif-remover-");
        // Same mode a plain `File::create` would get; the umask still applies.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut staged = builder.tempfile_in(parent).map_err(write_error)?;

        {
            let mut writer = BufWriter::new(&mut staged);
            let encoded = match format {
                ImageFormat::Jpeg => {
                    JpegEncoder::new_with_quality(&mut writer, self.options.jpeg_quality)
                        .write_image(pixels, width, height, color.into())
                }
                _ => image::write_buffer_with_format(
                    &mut writer,
                    pixels,
                    width,
                    height,
                    color,
                    format,
                ),
            };
            encoded.map_err(|e| StripError::Encode {
                path: output.to_path_buf(),
                reason: e.to_string(),
            })?;
            writer.flush().map_err(write_error)?;
        }

        staged
            .persist(output)
            .map_err(|e| write_error(e.error))?;

        Ok(StrippedImage {
            output: output.to_path_buf(),
            width,
            height,
            color,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, ImageBuffer, Rgb, RgbImage};
    use tempfile::TempDir;

    fn gradient(width: u32, height: u32) -> RgbImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8])
        })
    }

    #[test]
    fn rebuilds_png_pixel_for_pixel() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        let source = gradient(8, 6);
        source.save(&input).unwrap();

        let stripped = PixelStripper::default().rebuild(&input, &output).unwrap();

        assert_eq!((stripped.width, stripped.height), (8, 6));
        assert_eq!(stripped.color, ColorType::Rgb8);
        assert_eq!(stripped.format, ImageFormat::Png);
        let rebuilt = image::open(&output).unwrap().to_rgb8();
        assert_eq!(rebuilt.as_raw(), source.as_raw());
    }

    #[test]
    fn output_format_follows_destination_extension() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.tiff");
        gradient(4, 4).save(&input).unwrap();

        let stripped = PixelStripper::default().rebuild(&input, &output).unwrap();

        assert_eq!(stripped.format, ImageFormat::Tiff);
        assert_eq!(
            image::ImageFormat::from_path(&output).unwrap(),
            ImageFormat::Tiff
        );
        assert!(image::open(&output).is_ok());
    }

    #[test]
    fn corrupt_input_fails_without_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("corrupt.jpg");
        let output = dir.path().join("out.jpg");
        fs::write(&input, b"this is not a valid image file").unwrap();

        let result = PixelStripper::default().rebuild(&input, &output);

        assert!(matches!(result, Err(StripError::Decode { .. })));
        assert!(!output.exists());
        // No staged leftovers either
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_input_reports_open_error() {
        let dir = TempDir::new().unwrap();
        let result = PixelStripper::default().rebuild(
            &dir.path().join("missing.png"),
            &dir.path().join("out.png"),
        );
        assert!(matches!(result, Err(StripError::Open { .. })));
    }

    #[test]
    fn unknown_destination_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        gradient(2, 2).save(&input).unwrap();

        let result = PixelStripper::default().rebuild(&input, &dir.path().join("out.xyz"));

        assert!(matches!(
            result,
            Err(StripError::UnsupportedOutputFormat { .. })
        ));
    }

    #[test]
    fn refuses_to_overwrite_source() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        gradient(2, 2).save(&input).unwrap();
        let before = fs::read(&input).unwrap();

        let result = PixelStripper::default().rebuild(&input, &input);

        assert!(matches!(
            result,
            Err(StripError::WouldOverwriteSource { .. })
        ));
        assert_eq!(fs::read(&input).unwrap(), before);
    }

    #[test]
    fn strip_reports_flag_instead_of_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        gradient(3, 3).save(&input).unwrap();

        let stripper = PixelStripper::default();
        assert!(stripper.strip(&input, &dir.path().join("ok.png")));
        assert!(!stripper.strip(&dir.path().join("nope.png"), &dir.path().join("x.png")));
    }

    #[test]
    fn existing_destination_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        gradient(5, 5).save(&input).unwrap();
        fs::write(&output, b"stale").unwrap();

        PixelStripper::default().rebuild(&input, &output).unwrap();

        assert_eq!(image::open(&output).unwrap().width(), 5);
    }

    #[test]
    fn transparent_image_cannot_become_jpeg() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("logo.png");
        let output = dir.path().join("out").join("logo.jpg");
        fs::create_dir(dir.path().join("out")).unwrap();
        image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 10, 10, 128]))
            .save(&input)
            .unwrap();

        let result = PixelStripper::default().rebuild(&input, &output);

        assert!(matches!(result, Err(StripError::Encode { .. })));
        assert_eq!(fs::read_dir(dir.path().join("out")).unwrap().count(), 0);
    }

    #[test]
    fn sixteen_bit_image_cannot_become_jpeg() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("scan.png");
        let output = dir.path().join("scan.jpg");
        image::ImageBuffer::<Rgb<u16>, Vec<u16>>::from_pixel(3, 3, Rgb([1000, 2000, 3000]))
            .save(&input)
            .unwrap();

        assert!(!PixelStripper::default().strip(&input, &output));
        assert!(!output.exists());
    }

    #[test]
    fn gray_image_stays_gray_as_jpeg() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bw.png");
        let output = dir.path().join("bw.jpg");
        image::GrayImage::from_pixel(6, 6, image::Luma([90])).save(&input).unwrap();

        let image = PixelStripper::default().rebuild(&input, &output).unwrap();

        assert_eq!(image.color, ColorType::L8);
        assert_eq!(image::open(&output).unwrap().color(), ColorType::L8);
    }

    #[cfg(unix)]
    #[test]
    fn output_mode_matches_a_freshly_created_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        let reference = dir.path().join("reference");
        gradient(2, 2).save(&input).unwrap();
        fs::File::create(&reference).unwrap();

        PixelStripper::default().rebuild(&input, &output).unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&output), mode(&reference));
    }
}
