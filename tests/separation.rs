use stem_restyle_core::{AudioData, MockSeparator, RestyleError, Rgba, StemKind, StemSeparator};

#[test]
fn mock_returns_four_labelled_copies() {
    let input = AudioData::new(vec![vec![0.1, -0.2, 0.3], vec![0.0, 0.5, -0.5]], 44_100).unwrap();
    let stems = MockSeparator.separate(&input).unwrap();

    let kinds: Vec<StemKind> = stems.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StemKind::Drums,
            StemKind::Bass,
            StemKind::Vocals,
            StemKind::Other
        ]
    );

    let names: Vec<&str> = stems.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Drums_Main_Loop_120bpm.wav",
            "Bass_Sub_Fmin.wav",
            "Vocals_Dry_Lead.wav",
            "Atmosphere_Synth_Pad.wav"
        ]
    );

    let colors: Vec<String> = stems.iter().map(|s| s.color.to_string()).collect();
    assert_eq!(colors, vec!["#3b82f6", "#8b5cf6", "#ec4899", "#10b981"]);

    for (i, stem) in stems.iter().enumerate() {
        assert_eq!(stem.id, (i + 1).to_string());
        assert_eq!(stem.audio, input);
    }
}

#[test]
fn stem_colors_parse_from_hex() {
    assert_eq!(Rgba::from_hex("#3b82f6"), Some(Rgba::rgb(0x3b, 0x82, 0xf6)));
    assert_eq!(Rgba::from_hex("3b82f6"), None);
    assert_eq!(Rgba::from_hex("#3b82"), None);
}

#[test]
fn mock_rejects_empty_audio() {
    let input = AudioData::silent(1, 0, 44_100).unwrap();
    match MockSeparator.separate(&input) {
        Err(RestyleError::EmptyAudio) => {}
        other => panic!("expected EmptyAudio, got {other:?}"),
    }
}
