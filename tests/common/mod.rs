//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use ffmpeg_next::{
    Packet, Rational,
    codec::{self, context::Context as CodecContext},
    encoder::video::Encoder as VideoEncoder,
    format::{self, Pixel, context::Output},
    frame::Video as VideoFrame,
};
use image::{ImageFormat, Rgb, RgbImage};
use stridecut::{Event, PassOptions, Reporter, Severity};

/// Frames in the clip written by [`write_test_video`].
pub const TEST_VIDEO_FRAMES: u64 = 25;

/// Width and height of the clip written by [`write_test_video`].
pub const TEST_VIDEO_SIZE: (u32, u32) = (160, 120);

/// Keeps every reported event as `(severity, rendered message)`.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<(Severity, String)>>,
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &Event<'_>) {
        self.events
            .lock()
            .unwrap()
            .push((event.severity(), event.to_string()));
    }
}

impl RecordingReporter {
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(recorded, _)| *recorded == severity)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages(Severity::Info)
    }
}

/// Options that report into a fresh [`RecordingReporter`].
pub fn recording_options() -> (PassOptions, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::default());
    let options = PassOptions::new().with_reporter(reporter.clone());
    (options, reporter)
}

/// Write a small solid-color PNG, creating parent directories.
pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    RgbImage::from_pixel(width, height, Rgb([200, 40, 90]))
        .save_with_format(path, ImageFormat::Png)
        .expect("Failed to write fixture image");
}

/// Encode a 25 fps MPEG-4 clip of `frame_count` frames at `path`.
///
/// Each frame is a flat gray whose brightness steps with the frame index.
pub fn write_test_video(path: &Path, frame_count: u64) {
    ffmpeg_next::init().expect("Failed to initialize FFmpeg");
    let (width, height) = TEST_VIDEO_SIZE;
    let time_base = Rational::new(1, 25);

    let mut output = format::output(path).expect("Failed to create output context");
    let global_header = output
        .format()
        .flags()
        .contains(format::Flags::GLOBAL_HEADER);
    let mpeg4 = ffmpeg_next::encoder::find(codec::Id::MPEG4).expect("MPEG-4 encoder not available");

    let mut stream = output.add_stream(mpeg4).expect("Failed to add video stream");
    let stream_index = stream.index();

    let mut encoder = CodecContext::from_parameters(stream.parameters())
        .expect("Failed to create codec context")
        .encoder()
        .video()
        .expect("Failed to create video encoder");
    encoder.set_width(width);
    encoder.set_height(height);
    encoder.set_format(Pixel::YUV420P);
    encoder.set_time_base(time_base);
    encoder.set_frame_rate(Some(Rational::new(25, 1)));
    if global_header {
        encoder.set_flags(codec::Flags::GLOBAL_HEADER);
    }
    let mut encoder = encoder.open_as(mpeg4).expect("Failed to open encoder");
    stream.set_parameters(&encoder);
    stream.set_time_base(time_base);

    output.write_header().expect("Failed to write header");

    for index in 0..frame_count {
        let mut frame = VideoFrame::new(Pixel::YUV420P, width, height);
        frame.data_mut(0).fill(16 + (index * 8 % 220) as u8);
        frame.data_mut(1).fill(128);
        frame.data_mut(2).fill(128);
        frame.set_pts(Some(index as i64));
        encoder.send_frame(&frame).expect("Failed to send frame");
        write_packets(&mut encoder, &mut output, stream_index, time_base);
    }

    encoder.send_eof().expect("Failed to flush encoder");
    write_packets(&mut encoder, &mut output, stream_index, time_base);
    output.write_trailer().expect("Failed to write trailer");
}

fn write_packets(
    encoder: &mut VideoEncoder,
    output: &mut Output,
    stream_index: usize,
    time_base: Rational,
) {
    let mut packet = Packet::empty();
    while encoder.receive_packet(&mut packet).is_ok() {
        packet.set_stream(stream_index);
        let stream_time_base = output
            .stream(stream_index)
            .expect("Missing output stream")
            .time_base();
        packet.rescale_ts(time_base, stream_time_base);
        packet
            .write_interleaved(output)
            .expect("Failed to write packet");
    }
}
