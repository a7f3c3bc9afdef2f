use gesture_shooter::config::*;
use gesture_shooter::error::ConfigError;

#[test]
fn defaults_match_documented_tuning() {
    let c = GameConfig::default();
    assert_eq!(c.gesture.smoothing_factor, 0.2);
    assert_eq!(c.gesture.pinch_threshold, 0.05);
    assert_eq!(c.gesture.shot_cooldown_ms, 300);
    assert!(c.gesture.fist_trigger);
    assert_eq!(c.rules.initial_lives, 3);
    assert_eq!(c.rules.hit_margin, 15.0);
    assert_eq!(c.rules.target_score, 10);
    assert_eq!(c.rules.nuke_score, 5);
    assert_eq!(c.rules.level_step, 50);
    assert_eq!(c.rules.particles_per_burst, 10);
    assert!(c.validate().is_ok());
}

#[test]
fn empty_file_gives_defaults() {
    assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
}

#[test]
fn partial_file_overrides_only_named_keys() {
    let c = GameConfig::from_toml_str(
        r#"
        [gesture]
        shot_cooldown_ms = 500
        fist_trigger = false

        [rules]
        initial_lives = 5
        "#,
    )
    .unwrap();
    assert_eq!(c.gesture.shot_cooldown_ms, 500);
    assert!(!c.gesture.fist_trigger);
    assert_eq!(c.gesture.smoothing_factor, 0.2);
    assert_eq!(c.rules.initial_lives, 5);
    assert_eq!(c.rules.level_step, 50);
}

#[test]
fn out_of_range_smoothing_is_rejected() {
    match GameConfig::from_toml_str("[gesture]\nsmoothing_factor = 1.5\n") {
        Err(ConfigError::Invalid(msg)) => assert!(msg.contains("smoothing_factor")),
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn zero_lives_is_rejected() {
    assert!(matches!(
        GameConfig::from_toml_str("[rules]\ninitial_lives = 0\n"),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn spawn_probability_above_one_is_rejected() {
    assert!(matches!(
        GameConfig::from_toml_str("[rules]\npowerup_spawn_chance = 2.0\n"),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn negative_shake_is_rejected() {
    match GameConfig::from_toml_str("[rules]\nshot_shake = -5.0\n") {
        Err(ConfigError::Invalid(msg)) => assert!(msg.contains("shot_shake")),
        other => panic!("expected Invalid, got {other:?}"),
    }
    match GameConfig::from_toml_str("[rules]\nnuke_shake = -20.0\n") {
        Err(ConfigError::Invalid(msg)) => assert!(msg.contains("nuke_shake")),
        other => panic!("expected Invalid, got {other:?}"),
    }
    assert!(GameConfig::from_toml_str("[rules]\nshot_shake = 0.0\nnuke_shake = 0.0\n").is_ok());
}

#[test]
fn nan_shake_is_rejected() {
    let mut c = GameConfig::default();
    c.rules.nuke_shake = f32::NAN;
    assert!(matches!(c.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    assert!(matches!(
        GameConfig::from_toml_str("[gesture\nsmoothing_factor = "),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        GameConfig::from_toml_str("[rules]\ninitial_lives = \"three\"\n"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn written_config_reads_back() {
    let mut c = GameConfig::default();
    c.gesture.shot_cooldown_ms = 250;
    c.rules.hit_margin = 20.0;
    let text = c.to_toml_string().unwrap();
    assert_eq!(GameConfig::from_toml_str(&text).unwrap(), c);
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("gesture_shooter_no_such_config.toml");
    assert!(matches!(GameConfig::load(&path), Err(ConfigError::Io(_))));
}

#[test]
fn without_spawns_zeroes_spawn_chances_only() {
    let r = RulesConfig::default().without_spawns();
    assert_eq!(r.target_spawn_base, 0.0);
    assert_eq!(r.target_spawn_per_level, 0.0);
    assert_eq!(r.powerup_spawn_chance, 0.0);
    assert_eq!(r.initial_lives, 3);
}
