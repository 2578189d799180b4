use crate::foundation::error::{AtlasError, AtlasResult};
use crate::render::sink::Frame;
use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};
use image::Delay;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Display time of every frame, in milliseconds.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 100;

/// Options for [`compose_gif`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationOpts {
    /// Same fixed display time for every frame.
    pub frame_delay_ms: u32,
    /// Quantizer speed, 1 (best) to 30 (fastest).
    pub quantizer_speed: i32,
}

impl Default for AnimationOpts {
    fn default() -> Self {
        Self {
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
            quantizer_speed: 10,
        }
    }
}

/// Check that `frames` can be animated: non-empty, strictly ascending years, one frame size.
pub fn validate_frames(frames: &[Frame]) -> AtlasResult<()> {
    let Some(first) = frames.first() else {
        return Err(AtlasError::no_data("no frames to animate"));
    };
    for pair in frames.windows(2) {
        if pair[1].year <= pair[0].year {
            return Err(AtlasError::validation(format!(
                "frames must be in ascending year order: {} after {}",
                pair[1].year, pair[0].year
            )));
        }
    }
    let dims = first.image.dimensions();
    if let Some(f) = frames.iter().find(|f| f.image.dimensions() != dims) {
        return Err(AtlasError::render(format!(
            "frame {} is {:?}, expected {:?}",
            f.year,
            f.image.dimensions(),
            dims
        )));
    }
    Ok(())
}

/// Encode `frames` as an infinitely looping GIF into `out`.
///
/// Frame order is the input order (ascending year). No frames are interpolated.
#[tracing::instrument(skip(frames, out), fields(frames = frames.len()))]
pub fn compose_gif<W: Write>(frames: &[Frame], out: W, opts: AnimationOpts) -> AtlasResult<()> {
    validate_frames(frames)?;

    let mut enc = GifEncoder::new_with_speed(out, opts.quantizer_speed.clamp(1, 30));
    enc.set_repeat(Repeat::Infinite)
        .map_err(|e| AtlasError::render(format!("gif header: {e}")))?;
    let delay = Delay::from_numer_denom_ms(opts.frame_delay_ms, 1);
    for f in frames {
        let frame = image::Frame::from_parts(f.image.clone(), 0, 0, delay);
        enc.encode_frame(frame)
            .map_err(|e| AtlasError::render(format!("encode frame {}: {e}", f.year)))?;
    }
    Ok(())
}

/// Write the looping GIF to `path`.
pub fn write_gif(frames: &[Frame], path: &Path, opts: AnimationOpts) -> AtlasResult<()> {
    validate_frames(frames)?;
    let file = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    let mut w = BufWriter::new(file);
    compose_gif(frames, &mut w, opts)?;
    w.flush()
        .with_context(|| format!("flush '{}'", path.display()))?;
    tracing::info!(path = %path.display(), frames = frames.len(), "animation written");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/gif.rs"]
mod tests;
