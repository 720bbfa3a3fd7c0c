use super::*;
use crate::foundation::core::Fps;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::new(30000, 1001).unwrap(),
        bg_rgba: [0, 0, 0, 255],
    }
}

fn strings(args: &[OsString]) -> Vec<String> {
    args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
}

#[test]
fn args_describe_raw_rgba_input_and_h264_output() {
    let opts = FfmpegSinkOpts::new("out/reel.mp4");
    let args = strings(&encoder_args(&cfg(1280, 720), &opts));

    assert_eq!(args[0], "-y");
    let at = |flag: &str| args.iter().position(|a| a == flag).unwrap();
    assert_eq!(args[at("-s") + 1], "1280x720");
    assert_eq!(args[at("-r") + 1], "30000/1001");
    assert!(at("-r") < at("-i"));
    assert_eq!(args[at("-c:v") + 1], "libx264");
    assert_eq!(args[at("-crf") + 1], "18");
    assert!(args.contains(&"-an".to_owned()));
    assert_eq!(args.last().unwrap(), "out/reel.mp4");
}

#[test]
fn no_overwrite_uses_dash_n() {
    let opts = FfmpegSinkOpts {
        overwrite: false,
        crf: 28,
        ..FfmpegSinkOpts::new("a.mp4")
    };
    let args = strings(&encoder_args(&cfg(2, 2), &opts));
    assert_eq!(args[0], "-n");
    assert!(args.windows(2).any(|w| w == ["-crf", "28"]));
}

#[test]
fn is_ffmpeg_on_path_does_not_panic() {
    let _ = is_ffmpeg_on_path();
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let out = std::env::temp_dir().join("linkage_reel_odd.mp4");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    let err = sink.begin(cfg(161, 90)).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
    assert!(err.to_string().contains("161x90"));
}

#[test]
fn pushing_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}
