//! Frame extraction integration tests.
//!
//! Tests that decode real frames encode a 25-frame clip into a temporary
//! directory first (see `common::write_test_video`).

mod common;

use std::{fs, path::Path};

use stridecut::{
    FrameNaming, Interval, StrideError, VideoSession, extract_video, extract_videos,
};
use tempfile::TempDir;

use common::{TEST_VIDEO_FRAMES, TEST_VIDEO_SIZE, recording_options, write_test_video};

/// A temporary directory holding `clip.mp4`.
fn clip() -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("clip.mp4");
    write_test_video(&path, TEST_VIDEO_FRAMES);
    (dir, path)
}

fn written_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ── Failure paths ──────────────────────────────────────────────────

#[test]
fn open_garbage_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("broken.mp4");
    fs::write(&video, b"this is not a media file").unwrap();

    let result = VideoSession::open(&video);
    match result {
        Err(StrideError::VideoOpen { path, .. }) => assert_eq!(path, video),
        Err(StrideError::NoVideoStream) => {}
        other => panic!("Expected an open failure, got: {other:?}"),
    }
}

#[test]
fn unopenable_video_yields_empty_summary() {
    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("broken.mp4");
    fs::write(&video, b"not a video").unwrap();
    let output = dir.path().join("frames");

    let (options, reporter) = recording_options();
    let summary = extract_video(&video, &output, Interval::new(10).unwrap(), &options).unwrap();

    assert!(!summary.opened);
    assert_eq!(summary.frames_seen, 0);
    assert_eq!(summary.frames_saved, 0);
    assert!(summary.is_partial());
    assert!(written_files(&output).is_empty());

    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("无法打开视频文件"), "{}", warnings[0]);
    assert!(reporter.infos()[0].contains("视频 broken.mp4: 总帧数 0, 已保存 0 张图片"));
}

#[test]
fn missing_video_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let (options, reporter) = recording_options();

    let summary = extract_video(
        dir.path().join("absent.mp4"),
        dir.path().join("frames"),
        Interval::EVERY,
        &options,
    )
    .unwrap();

    assert!(!summary.opened);
    assert_eq!(reporter.warnings().len(), 1);
}

#[test]
fn batch_continues_past_broken_videos() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("a.mp4"), b"garbage").unwrap();
    fs::write(input.path().join("b.MKV"), b"more garbage").unwrap();
    fs::write(input.path().join("notes.txt"), b"ignored").unwrap();

    let (options, reporter) = recording_options();
    let summary =
        extract_videos(input.path(), output.path(), Interval::new(5).unwrap(), &options).unwrap();

    assert_eq!(summary.videos.len(), 2);
    assert_eq!(summary.unopened(), 2);
    assert_eq!(summary.total_saved(), 0);
    assert!(summary.is_partial());
    assert_eq!(reporter.warnings().len(), 2);

    let infos = reporter.infos();
    assert!(
        infos.last().unwrap().starts_with("共处理 2 个视频，保存图片总数: 0"),
        "{infos:?}"
    );
}

#[test]
fn batch_without_videos_creates_nothing() {
    let input = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let output = scratch.path().join("frames");
    fs::write(input.path().join("photo.png"), b"x").unwrap();

    let (options, reporter) = recording_options();
    let summary = extract_videos(input.path(), &output, Interval::EVERY, &options).unwrap();

    assert!(summary.videos.is_empty());
    assert!(!output.exists());
    assert!(reporter.infos()[0].ends_with("找到视频文件。"));
}

#[test]
fn batch_with_missing_input_is_fatal() {
    let scratch = tempfile::tempdir().unwrap();
    let (options, _) = recording_options();

    let result = extract_videos(
        scratch.path().join("missing"),
        scratch.path().join("frames"),
        Interval::EVERY,
        &options,
    );
    assert!(matches!(result, Err(StrideError::DirectoryNotFound { .. })));
}

#[test]
fn frame_naming_schemes() {
    let source = Path::new("clips/holiday.final.mp4");
    assert_eq!(FrameNaming::Sequential.file_name(source, 0), "frame_000000.jpg");
    assert_eq!(FrameNaming::Sequential.file_name(source, 1234), "frame_001234.jpg");
    assert_eq!(
        FrameNaming::SourceStem.file_name(source, 20),
        "holiday.final_000020.jpg"
    );
}

// ── Decoding ───────────────────────────────────────────────────────

#[cfg(unix)]
#[test]
fn non_utf8_video_path_is_rejected() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let dir = tempfile::tempdir().unwrap();
    // Never touches the filesystem, so the name need not be creatable.
    let video = dir.path().join(OsStr::from_bytes(b"clip_\xff.mp4"));

    match VideoSession::open(&video) {
        Err(StrideError::VideoOpen { path, reason }) => {
            assert_eq!(path, video);
            assert!(reason.contains("UTF-8"), "{reason}");
        }
        other => panic!("Expected VideoOpen, got: {other:?}"),
    }

    let (options, reporter) = recording_options();
    let summary =
        extract_video(&video, dir.path().join("frames"), Interval::EVERY, &options).unwrap();
    assert!(!summary.opened);
    assert_eq!(reporter.warnings().len(), 1);
}

#[test]
fn session_reports_stream_info() {
    let (_dir, path) = clip();

    let session = VideoSession::open(&path).expect("Failed to open clip");
    let info = session.info();
    assert_eq!((info.width, info.height), TEST_VIDEO_SIZE);
    assert!((info.frames_per_second - 25.0).abs() < 0.01);
    assert_eq!(info.codec, "mpeg4");
    assert_eq!(session.path(), path);
}

#[test]
fn grab_walks_every_frame() {
    let (_dir, path) = clip();

    let mut session = VideoSession::open(&path).unwrap();
    let mut frames = 0;
    while session.grab().unwrap() {
        frames += 1;
    }
    assert_eq!(frames, TEST_VIDEO_FRAMES);
    // End of stream is sticky.
    assert!(!session.grab().unwrap());
    assert!(session.retrieve().is_err());
}

#[test]
fn retrieve_matches_stream_size() {
    let (_dir, path) = clip();

    let mut session = VideoSession::open(&path).unwrap();
    assert!(session.grab().unwrap());
    let first = session.retrieve().unwrap();
    assert_eq!(first.dimensions(), TEST_VIDEO_SIZE);

    for _ in 0..10 {
        assert!(session.grab().unwrap());
    }
    let later = session.retrieve().unwrap();
    // Brightness steps with the frame index.
    assert!(later.get_pixel(80, 60).0[0] > first.get_pixel(80, 60).0[0]);
}

#[test]
fn single_video_every_tenth_frame() {
    let (dir, path) = clip();
    let output = dir.path().join("frames");

    let (options, reporter) = recording_options();
    let summary = extract_video(&path, &output, Interval::new(10).unwrap(), &options).unwrap();

    assert!(summary.opened);
    assert_eq!(summary.frames_seen, 25);
    assert_eq!(summary.frames_saved, 3);
    assert!(!summary.is_partial());
    assert_eq!(
        written_files(&output),
        vec!["frame_000000.jpg", "frame_000010.jpg", "frame_000020.jpg"]
    );
    let frame = stridecut::read_image(output.join("frame_000010.jpg")).unwrap();
    assert_eq!(frame.dimensions(), TEST_VIDEO_SIZE);

    let infos = reporter.infos();
    assert_eq!(infos.len(), 1);
    assert!(infos[0].contains("视频 clip.mp4: 总帧数 25, 已保存 3 张图片"), "{}", infos[0]);
    assert!(reporter.warnings().is_empty());
}

#[test]
fn unwritable_frame_is_skipped_and_counted() {
    let (dir, path) = clip();
    let output = dir.path().join("frames");
    // A directory in the way of the second selected frame.
    fs::create_dir_all(output.join("frame_000010.jpg")).unwrap();

    let (options, reporter) = recording_options();
    let summary = extract_video(&path, &output, Interval::new(10).unwrap(), &options).unwrap();

    assert_eq!(summary.frames_seen, 25);
    assert_eq!(summary.frames_saved, 2);
    assert_eq!(summary.write_failures, 1);
    assert!(summary.is_partial());
    assert!(output.join("frame_000000.jpg").is_file());
    assert!(output.join("frame_000020.jpg").is_file());

    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("保存图片失败"), "{}", warnings[0]);
    assert!(warnings[0].contains("帧 10"), "{}", warnings[0]);
    assert!(reporter.infos()[0].contains("已保存 2 张图片"));
}

#[test]
fn batch_names_frames_after_source() {
    let (dir, path) = clip();
    let input = dir.path().join("videos");
    let output = dir.path().join("frames");
    fs::create_dir_all(input.join("nested")).unwrap();
    fs::copy(&path, input.join("one.mp4")).unwrap();
    fs::copy(&path, input.join("nested/two.mp4")).unwrap();
    fs::write(input.join("zz_broken.mp4"), b"garbage").unwrap();

    let (options, reporter) = recording_options();
    let summary = extract_videos(&input, &output, Interval::new(10).unwrap(), &options).unwrap();

    assert_eq!(summary.videos.len(), 3);
    assert_eq!(summary.total_saved(), 6);
    assert_eq!(summary.total_frames(), 50);
    assert_eq!(summary.unopened(), 1);
    assert_eq!(
        written_files(&output),
        vec![
            "one_000000.jpg",
            "one_000010.jpg",
            "one_000020.jpg",
            "two_000000.jpg",
            "two_000010.jpg",
            "two_000020.jpg",
        ]
    );

    let infos = reporter.infos();
    assert_eq!(infos.len(), 4);
    assert!(infos[0].contains("视频 two.mp4: 总帧数 25, 已保存 3 张图片"), "{}", infos[0]);
    assert!(infos[1].contains("视频 one.mp4: 总帧数 25, 已保存 3 张图片"), "{}", infos[1]);
    assert!(
        infos[3].starts_with("共处理 3 个视频，保存图片总数: 6"),
        "{}",
        infos[3]
    );
}
