use super::*;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

fn make_track() -> Track {
    Track {
        path: PathBuf::from("/tmp/music/test.mp3"),
        display_name: "test.mp3".to_string(),
        duration: Some(Duration::from_micros(1_234_567)),
    }
}

fn iface() -> (PlayerIface, Arc<Mutex<SharedState>>, mpsc::Receiver<ControlCmd>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };
    (iface, state, rx)
}

#[test]
fn set_track_metadata_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    handle.set_track_metadata(Some(&make_track()));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("test.mp3"));
        assert_eq!(s.url.as_deref(), Some("file:///tmp/music/test.mp3"));
        assert_eq!(s.length_micros, Some(1_234_567));
    }

    handle.set_track_metadata(None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert_eq!(s.url, None);
        assert_eq!(s.length_micros, None);
    }
}

#[test]
fn playback_status_maps_engine_state() {
    let (iface, state, _rx) = iface();

    state.lock().unwrap().playback = PlaybackState::Idle;
    assert_eq!(iface.playback_status(), "Stopped");
    state.lock().unwrap().playback = PlaybackState::Playing;
    assert_eq!(iface.playback_status(), "Playing");
    state.lock().unwrap().playback = PlaybackState::Paused;
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let (iface, state, _rx) = iface();
    let handle = MprisHandle {
        state: state.clone(),
    };
    handle.set_track_metadata(Some(&make_track()));

    let map = iface.metadata();
    for k in ["mpris:trackid", "xesam:title", "xesam:url", "mpris:length"] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn metadata_without_track_reports_no_track() {
    let (iface, _state, _rx) = iface();
    let map = iface.metadata();
    assert!(map.contains_key("mpris:trackid"));
    assert!(!map.contains_key("xesam:title"));
}

#[test]
fn methods_forward_control_commands() {
    let (mut iface, _state, rx) = iface();
    iface.play();
    iface.pause();
    iface.play_pause();
    iface.stop();
    iface.set_volume(0.42);
    iface.set_volume(7.0);

    let cmds: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        cmds,
        vec![
            ControlCmd::Play,
            ControlCmd::Pause,
            ControlCmd::PlayPause,
            ControlCmd::Stop,
            ControlCmd::SetVolume(42),
            ControlCmd::SetVolume(100),
        ]
    );
}

#[test]
fn volume_property_reflects_handle() {
    let (iface, state, _rx) = iface();
    let handle = MprisHandle { state };
    handle.set_volume(0.25);
    assert_eq!(iface.volume(), 0.25);
}

#[test]
fn slider_from_mpris_clamps_and_rounds() {
    assert_eq!(slider_from_mpris(-0.5), 0);
    assert_eq!(slider_from_mpris(0.204), 20);
    assert_eq!(slider_from_mpris(0.206), 21);
    assert_eq!(slider_from_mpris(f64::NAN), 0);
}
