use crosscount_rs::{
    AgingCadence, CountingSession, Detection, FrameSize, LinePlacement, MatchingStrategy,
    SessionConfig,
};

// 60x60 box whose centroid lands on (cx, cy).
fn det_at(cx: i32, cy: i32) -> Detection {
    Detection::new(cx - 30, cy - 30, 60, 60)
}

fn session(height: u32) -> CountingSession {
    CountingSession::with_default_config(FrameSize::new(640, height)).unwrap()
}

#[test]
fn test_crossing_first_line_counts_once() {
    // Lines at 200 and 300.
    let mut session = session(500);
    assert_eq!(session.reference_lines().ys(), &[200, 300]);

    // Frame 1: track appears at 35% of the height
    let r1 = session.process_frame(&[det_at(320, 175)], 1, true).unwrap();
    assert_eq!(r1.created, vec![0]);
    assert_eq!(r1.total, 0);

    // Frame 2: same object at 45%, across the 40% line
    let r2 = session.process_frame(&[det_at(320, 225)], 2, true).unwrap();
    assert!(r2.created.is_empty());
    assert_eq!(r2.total, 1);
    assert_eq!(r2.events.len(), 1);
    assert_eq!(r2.events[0].track_id, 0);
    assert!(r2.track(0).unwrap().counted);

    // Frame 3: moving on past the second line adds nothing
    let r3 = session.process_frame(&[det_at(320, 280)], 3, true).unwrap();
    let r4 = session.process_frame(&[det_at(320, 320)], 4, true).unwrap();
    assert!(r3.events.is_empty() && r4.events.is_empty());
    assert_eq!(r4.total, 1);
}

#[test]
fn test_no_crossing_below_both_lines() {
    let mut session = session(500);
    session.process_frame(&[det_at(320, 350)], 1, true).unwrap();
    let result = session.process_frame(&[det_at(320, 380)], 2, true).unwrap();
    assert_eq!(result.total, 0);
    assert!(!result.track(0).unwrap().counted);
}

#[test]
fn test_far_detection_creates_next_id() {
    let mut session = session(500);
    session.process_frame(&[det_at(100, 100)], 1, true).unwrap();
    let result = session
        .process_frame(&[det_at(100, 110), det_at(300, 100)], 2, true)
        .unwrap();
    assert_eq!(result.created, vec![1]);
    assert_eq!(result.active_tracks(), 2);
    assert_eq!(result.total, 0);
}

#[test]
fn test_tracks_created_in_a_pass_are_not_matched_in_that_pass() {
    let mut session = session(500);

    // Frame 1: two boxes 5px apart, both well inside the gate of each other
    let r1 = session
        .process_frame(&[det_at(100, 100), det_at(105, 100)], 1, true)
        .unwrap();
    assert_eq!(r1.created, vec![0, 1]);
    assert_eq!(r1.active_tracks(), 2);

    // Frame 2: aging only
    session.process_frame(&[], 2, false).unwrap();

    // Frame 3: each box goes back to its own track
    let r3 = session
        .process_frame(&[det_at(100, 102), det_at(105, 102)], 3, true)
        .unwrap();
    assert!(r3.created.is_empty());
    assert_eq!(r3.track(0).unwrap().centroid.x, 100);
    assert_eq!(r3.track(1).unwrap().centroid.x, 105);
    assert!(r3.tracks.iter().all(|t| t.disappeared_frames == 0));
}

#[test]
fn test_evicted_track_identity_is_not_restored() {
    let mut session = session(500);
    session.process_frame(&[det_at(320, 100)], 1, true).unwrap();

    // Frames 2..=11: ten misses, still inside the budget
    for frame in 2..=11 {
        let result = session.process_frame(&[], frame, false).unwrap();
        assert_eq!(result.active_tracks(), 1);
    }
    assert_eq!(session.registry().get(0).unwrap().disappeared_frames(), 10);

    // Frame 12: eleventh miss
    let result = session.process_frame(&[], 12, false).unwrap();
    assert_eq!(result.removed, vec![0]);
    assert_eq!(result.active_tracks(), 0);

    // Frame 13: detection at the old spot starts a new identity
    let result = session.process_frame(&[det_at(320, 100)], 13, true).unwrap();
    assert_eq!(result.created, vec![1]);
    assert_eq!(result.tracks[0].id, 1);
}

#[test]
fn test_step_across_both_lines_counts_once() {
    // Lines at 80 and 120.
    let mut session = session(200);
    session.process_frame(&[det_at(320, 75)], 1, true).unwrap();
    let result = session.process_frame(&[det_at(320, 125)], 2, true).unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.events.len(), 1);
    assert_eq!(result.events[0].line_index, 0);

    // Back up across both lines: already counted
    let result = session.process_frame(&[det_at(320, 75)], 3, true).unwrap();
    assert_eq!(result.total, 1);
    assert!(result.events.is_empty());
}

#[test]
fn test_sparse_detection_stream_counts_each_vehicle_once() {
    let mut session = session(480);
    let xs = [100, 300, 500];
    let mut frame = 0;
    let mut last_total = 0;

    // Detector runs every third frame; vehicles move 30px per detection pass.
    for pass in 0..12 {
        for _ in 0..2 {
            frame += 1;
            session.process_frame(&[], frame, false).unwrap();
        }
        frame += 1;
        let y = 100 + 30 * pass;
        let dets: Vec<Detection> = xs.iter().map(|&x| det_at(x, y)).collect();
        let result = session.process_frame(&dets, frame, true).unwrap();
        assert_eq!(result.active_tracks(), 3);
        assert!(result.total >= last_total);
        last_total = result.total;
    }
    assert_eq!(session.total(), 3);

    // Vehicles leave; everything ages out.
    for _ in 0..11 {
        frame += 1;
        session.process_frame(&[], frame, false).unwrap();
    }
    assert!(session.registry().is_empty());
    assert_eq!(session.finish(), 3);
}

#[test]
fn test_detection_passes_only_cadence_keeps_tracks_between_passes() {
    let config = SessionConfig {
        aging: AgingCadence::DetectionPassesOnly,
        max_disappeared: 1,
        ..Default::default()
    };
    let mut session = CountingSession::new(config, FrameSize::new(640, 480)).unwrap();
    session.process_frame(&[det_at(100, 100)], 1, true).unwrap();
    for frame in 2..50 {
        let result = session.process_frame(&[], frame, false).unwrap();
        assert_eq!(result.tracks[0].disappeared_frames, 0);
    }

    // Two empty detection passes exceed the budget of one.
    session.process_frame(&[], 50, true).unwrap();
    let result = session.process_frame(&[], 51, true).unwrap();
    assert_eq!(result.removed, vec![0]);
}

#[test]
fn test_greedy_and_hungarian_differ_on_crowded_gate() {
    let run = |matching| {
        let config = SessionConfig {
            matching,
            ..Default::default()
        };
        let mut session = CountingSession::new(config, FrameSize::new(640, 480)).unwrap();
        session
            .process_frame(&[det_at(150, 100), det_at(105, 100)], 1, true)
            .unwrap();
        let result = session.process_frame(&[det_at(100, 100)], 2, true).unwrap();
        result
            .tracks
            .iter()
            .find(|t| t.disappeared_frames == 0)
            .map(|t| t.id)
    };
    // First-fit takes the older track even though the other is nearer.
    assert_eq!(run(MatchingStrategy::Greedy), Some(0));
    assert_eq!(run(MatchingStrategy::Hungarian), Some(1));
}

#[test]
fn test_bounded_history_counts_the_same() {
    let config = SessionConfig {
        history_capacity: Some(2),
        lines: LinePlacement::Absolute(vec![240]),
        ..Default::default()
    };
    let mut session = CountingSession::new(config, FrameSize::new(640, 480)).unwrap();
    for (frame, y) in (1..).zip([150, 180, 210, 230, 250, 280]) {
        session.process_frame(&[det_at(320, y)], frame, true).unwrap();
    }
    assert_eq!(session.total(), 1);
    assert_eq!(session.registry().get(0).unwrap().history().len(), 2);
}
