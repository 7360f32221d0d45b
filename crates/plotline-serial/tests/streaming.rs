//! Integration tests for plotline-serial.

use plotline_path::{plan_path, Contour, EmissionMode, PaperSize, UnitScaler};
use plotline_serial::{
    DeviceStreamer, MemoryChannel, StreamMode, StreamTiming, Submission, IMAGE_BEGIN, IMAGE_END,
};

fn three_shapes() -> Vec<Contour> {
    vec![
        Contour::from_xy(&[(0.0, 0.0), (40.0, 0.0), (20.0, 30.0)]),
        Contour::from_xy(&[(300.0, 0.0), (340.0, 0.0), (340.0, 40.0), (300.0, 40.0)]),
        Contour::from_xy(&[
            (60.0, 0.0),
            (80.0, 0.0),
            (90.0, 20.0),
            (70.0, 35.0),
            (50.0, 20.0),
        ]),
    ]
}

fn streamer(mode: StreamMode) -> DeviceStreamer<MemoryChannel> {
    DeviceStreamer::new(MemoryChannel::new(), StreamTiming::immediate(), mode)
}

mod image_tests {
    use super::*;

    #[test]
    fn test_plan_and_stream() {
        let scaler = UnitScaler::from_image(850, 1100, &PaperSize::letter()).unwrap();
        let plan = plan_path(&three_shapes(), &scaler, EmissionMode::Span).unwrap();
        assert_eq!(plan.chain.order, vec![0, 2, 1]);
        assert_eq!(plan.stats.emitted_points, 10);

        let mut s = streamer(StreamMode::Coordinates);
        let sent = s.send_plan(&plan).unwrap();
        assert_eq!(sent, 10);

        let text = s.channel().written_text();
        assert!(text.starts_with(IMAGE_BEGIN));
        assert!(text.ends_with(IMAGE_END));

        let body = &text[IMAGE_BEGIN.len()..text.len() - IMAGE_END.len()];
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 20);
        // First waypoint is the triangle origin, last is the square's first corner.
        assert_eq!(&lines[..2], &["0.0", "0.0"]);
        assert_eq!(&lines[18..], &["76.2", "0.0"]);
    }

    #[test]
    fn test_stream_is_reproducible() {
        let scaler = UnitScaler::from_image(850, 1100, &PaperSize::letter()).unwrap();
        let run = || {
            let plan = plan_path(&three_shapes(), &scaler, EmissionMode::Reference).unwrap();
            let mut s = streamer(StreamMode::Coordinates);
            s.send_plan(&plan).unwrap();
            s.channel().written_text()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_framing_only_stream() {
        let scaler = UnitScaler::from_image(850, 1100, &PaperSize::letter()).unwrap();
        let plan = plan_path(&three_shapes(), &scaler, EmissionMode::Span).unwrap();
        let mut s = streamer(StreamMode::FramingOnly);
        assert_eq!(s.send_plan(&plan).unwrap(), 0);
        assert_eq!(s.channel().written_text(), "IMGEND");
    }
}

mod session_tests {
    use super::*;

    #[test]
    fn test_manual_session() {
        let mut s = streamer(StreamMode::Coordinates);
        s.channel_mut().push_incoming("ready\n");

        let first = s.submit("G21").unwrap();
        assert_eq!(
            first,
            Submission::Sent {
                command: plotline_gcode::Command::SetUnits(plotline_gcode::Units::Millimeters),
                replies: vec!["ready".to_string()],
            }
        );
        assert!(matches!(s.submit("G01 10 20").unwrap(), Submission::Rejected(_)));
        assert!(matches!(s.submit("G00 7 3").unwrap(), Submission::Sent { .. }));

        let channel = s.shutdown().unwrap();
        assert_eq!(channel.written_text(), "G21\nG00\n7\n3\nM02");
        assert!(channel.is_closed());
    }
}
