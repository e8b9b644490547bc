//! Destinations for composed frames.

use crate::error::{ConfigError, OutputError};
use image::RgbaImage;
use std::io::Write;

/// Receives one composed frame per generation, in order, then a single `finish`
pub trait FrameSink<F: ?Sized> {
    fn push_frame(&mut self, frame: &F) -> Result<(), OutputError>;

    /// Completes the output; frames pushed afterwards are rejected
    fn finish(&mut self) -> Result<(), OutputError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GifOptions {
    pub frame_delay_ms: u32,
    /// Loop forever instead of playing once
    pub repeat: bool,
    /// Quantizer speed, 1 (best) to 30 (fastest)
    pub speed: i32,
}

impl GifOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=30).contains(&self.speed) {
            return Err(ConfigError::Speed(self.speed));
        }
        Ok(())
    }
}

impl Default for GifOptions {
    fn default() -> Self {
        Self {
            frame_delay_ms: 33,
            repeat: true,
            speed: 10,
        }
    }
}

/// Streams frames into an animated GIF
///
/// The encoder is opened on the first frame, once the frame size is known.
/// [`FrameSink::finish`] writes the trailer; the caller owns flushing the
/// underlying writer afterwards.
pub struct GifSink<W: Write> {
    state: GifState<W>,
    options: GifOptions,
    frames: usize,
}

enum GifState<W: Write> {
    Pending(W),
    Encoding(gif::Encoder<W>),
    Finished,
}

impl<W: Write> GifSink<W> {
    pub fn new(writer: W, options: GifOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            state: GifState::Pending(writer),
            options,
            frames: 0,
        })
    }

    /// Frames written so far
    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    fn encoder(&mut self, width: u16, height: u16) -> Result<&mut gif::Encoder<W>, OutputError> {
        self.state = match std::mem::replace(&mut self.state, GifState::Finished) {
            GifState::Pending(writer) => {
                let mut encoder = gif::Encoder::new(writer, width, height, &[])?;
                if self.options.repeat {
                    encoder.set_repeat(gif::Repeat::Infinite)?;
                }
                GifState::Encoding(encoder)
            }
            state => state,
        };
        match &mut self.state {
            GifState::Encoding(encoder) => Ok(encoder),
            _ => Err(OutputError::Finished),
        }
    }
}

impl<W: Write> FrameSink<RgbaImage> for GifSink<W> {
    fn push_frame(&mut self, frame: &RgbaImage) -> Result<(), OutputError> {
        let (width, height) = frame.dimensions();
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(OutputError::FrameSize(width, height));
        };
        // centiseconds, rounded
        let delay = u16::try_from(self.options.frame_delay_ms.saturating_add(5) / 10).unwrap_or(u16::MAX);
        let speed = self.options.speed;

        let encoder = self.encoder(w, h)?;
        let mut pixels = frame.as_raw().clone();
        let mut gif_frame = gif::Frame::from_rgba_speed(w, h, &mut pixels, speed);
        gif_frame.delay = delay;
        encoder.write_frame(&gif_frame)?;
        self.frames += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        match std::mem::replace(&mut self.state, GifState::Finished) {
            GifState::Encoding(encoder) => {
                encoder.into_inner()?;
                Ok(())
            }
            // nothing was written, so there is no image to terminate
            GifState::Pending(_) => Ok(()),
            GifState::Finished => Err(OutputError::Finished),
        }
    }
}
