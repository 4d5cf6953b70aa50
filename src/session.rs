//! FFmpeg decode session for one video.
//!
//! [`VideoSession`] owns the demuxer, the decoder for the best video stream
//! and a lazily built RGB scaler. Frames are pulled in presentation order
//! with [`grab`](VideoSession::grab); only frames the caller actually keeps
//! are converted with [`retrieve`](VideoSession::retrieve), so skipping a
//! frame costs a decode but no colour conversion.
//!
//! Everything is released when the session is dropped.
//!
//! # Example
//!
//! ```no_run
//! use stridecut::VideoSession;
//!
//! let mut session = VideoSession::open("input.mp4")?;
//! let mut index = 0;
//! while session.grab()? {
//!     if index % 30 == 0 {
//!         session.retrieve()?.save(format!("frame_{index}.png")).ok();
//!     }
//!     index += 1;
//! }
//! # Ok::<(), stridecut::StrideError>(())
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{
    Error as FfmpegError, Packet,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};

use crate::{codec::Raster, error::StrideError};

/// Read errors tolerated in a row before the stream is treated as broken.
const MAX_CONSECUTIVE_READ_ERRORS: u32 = 64;

/// Basic properties of the opened video stream.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    /// Coded width in pixels.
    pub width: u32,
    /// Coded height in pixels.
    pub height: u32,
    /// Average frame rate, `0.0` if the container does not say.
    pub frames_per_second: f64,
    /// Container duration, [`Duration::ZERO`] if unknown.
    pub duration: Duration,
    /// Frame count from duration × frame rate. Only an estimate; the real
    /// count is whatever [`grab`](VideoSession::grab) yields.
    pub estimated_frames: Option<u64>,
    /// Decoder name, e.g. `h264`.
    pub codec: String,
}

/// (format, width, height) of the frames a scaler was built for.
type ScalerKey = (Pixel, u32, u32);

/// An open video decode session.
pub struct VideoSession {
    input_context: Input,
    decoder: VideoDecoder,
    scaler: Option<(ScalerKey, ScalingContext)>,
    video_stream_index: usize,
    decoded_frame: VideoFrame,
    rgb_frame: VideoFrame,
    has_frame: bool,
    eof_sent: bool,
    info: VideoInfo,
    file_path: PathBuf,
}

impl Debug for VideoSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoSession")
            .field("info", &self.info)
            .field("video_stream_index", &self.video_stream_index)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl VideoSession {
    /// Open `path` and prepare a decoder for its best video stream.
    ///
    /// Initializes FFmpeg (idempotent) on first use.
    ///
    /// # Errors
    ///
    /// - [`StrideError::VideoOpen`] if FFmpeg cannot open the file or read its streams,
    ///   or the path is not valid UTF-8.
    /// - [`StrideError::NoVideoStream`] if the file has no video stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StrideError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();
        let open_error = |reason: String| StrideError::VideoOpen {
            path: file_path.clone(),
            reason,
        };

        // ffmpeg-next hands the path to C as UTF-8 and panics otherwise.
        if path.to_str().is_none() {
            return Err(open_error("path is not valid UTF-8".to_string()));
        }

        ffmpeg_next::init()
            .map_err(|error| open_error(format!("FFmpeg initialisation failed: {error}")))?;

        log::debug!("Opening video file: {}", path.display());
        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| open_error(error.to_string()))?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(StrideError::NoVideoStream)?;
        let video_stream_index = stream.index();

        let decoder_context = CodecContext::from_parameters(stream.parameters())
            .map_err(|error| open_error(format!("Failed to read codec parameters: {error}")))?;
        let decoder = decoder_context
            .decoder()
            .video()
            .map_err(|error| open_error(format!("Failed to create video decoder: {error}")))?;

        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        let mut frames_per_second = crate::utilities::rate_to_fps(stream.avg_frame_rate());
        if frames_per_second == 0.0 {
            frames_per_second = crate::utilities::rate_to_fps(stream.rate());
        }

        let declared_frames = stream.frames();
        let estimated_frames = if declared_frames > 0 {
            Some(declared_frames as u64)
        } else if frames_per_second > 0.0 && !duration.is_zero() {
            Some((duration.as_secs_f64() * frames_per_second).round() as u64)
        } else {
            None
        };

        let info = VideoInfo {
            width: decoder.width(),
            height: decoder.height(),
            frames_per_second,
            duration,
            estimated_frames,
            codec: decoder
                .codec()
                .map(|codec| codec.name().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        };

        log::debug!(
            "Video stream {}: {}x{} @ {:.2} fps [{}]",
            video_stream_index,
            info.width,
            info.height,
            info.frames_per_second,
            info.codec
        );

        Ok(Self {
            input_context,
            decoder,
            scaler: None,
            video_stream_index,
            decoded_frame: VideoFrame::empty(),
            rgb_frame: VideoFrame::empty(),
            has_frame: false,
            eof_sent: false,
            info,
            file_path,
        })
    }

    /// Properties of the video stream.
    pub fn info(&self) -> &VideoInfo {
        &self.info
    }

    /// The path this session was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Decode the next frame.
    ///
    /// Returns `Ok(false)` once the stream is exhausted and the decoder is
    /// drained. Packets the decoder rejects as corrupt are dropped and
    /// decoding continues with the next one.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::VideoDecodeError`] if the demuxer keeps
    /// failing, or [`StrideError::FfmpegError`] if the decoder cannot be
    /// flushed.
    pub fn grab(&mut self) -> Result<bool, StrideError> {
        self.has_frame = false;
        let mut read_errors = 0;

        loop {
            if self.decoder.receive_frame(&mut self.decoded_frame).is_ok() {
                self.has_frame = true;
                return Ok(true);
            }

            if self.eof_sent {
                return Ok(false);
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.input_context) {
                Ok(()) => {
                    read_errors = 0;
                    if packet.stream() != self.video_stream_index {
                        continue;
                    }
                    if let Err(error) = self.decoder.send_packet(&packet) {
                        log::debug!(
                            "Dropping packet the decoder rejected in {}: {error}",
                            self.file_path.display()
                        );
                    }
                }
                Err(FfmpegError::Eof) => {
                    self.decoder.send_eof()?;
                    self.eof_sent = true;
                }
                Err(error) => {
                    read_errors += 1;
                    if read_errors >= MAX_CONSECUTIVE_READ_ERRORS {
                        return Err(StrideError::VideoDecodeError(format!(
                            "demuxer failed {read_errors} times in a row: {error}"
                        )));
                    }
                }
            }
        }
    }

    /// Convert the frame produced by the last successful
    /// [`grab`](VideoSession::grab) to an RGB raster.
    ///
    /// # Errors
    ///
    /// Returns [`StrideError::VideoDecodeError`] if there is no current
    /// frame or the converted data does not fit the frame's dimensions.
    pub fn retrieve(&mut self) -> Result<Raster, StrideError> {
        if !self.has_frame {
            return Err(StrideError::VideoDecodeError(
                "no decoded frame to retrieve".to_string(),
            ));
        }

        let key: ScalerKey = (
            self.decoded_frame.format(),
            self.decoded_frame.width(),
            self.decoded_frame.height(),
        );
        let (_, width, height) = key;

        // Rebuilt whenever the stream changes format or resolution.
        let stale = !matches!(&self.scaler, Some((built_for, _)) if *built_for == key);
        if stale {
            let scaler = ScalingContext::get(
                key.0,
                width,
                height,
                Pixel::RGB24,
                width,
                height,
                ScalingFlags::BILINEAR,
            )?;
            self.scaler = Some((key, scaler));
        }
        let Some((_, scaler)) = self.scaler.as_mut() else {
            return Err(StrideError::VideoDecodeError(
                "scaler unavailable".to_string(),
            ));
        };

        scaler.run(&self.decoded_frame, &mut self.rgb_frame)?;
        let buffer = crate::utilities::frame_to_rgb_buffer(&self.rgb_frame, width, height);
        Raster::from_raw(width, height, buffer).ok_or_else(|| {
            StrideError::VideoDecodeError(
                "Failed to construct RGB image from decoded frame data".to_string(),
            )
        })
    }
}

impl Drop for VideoSession {
    fn drop(&mut self) {
        log::debug!("Releasing decode session for {}", self.file_path.display());
    }
}
