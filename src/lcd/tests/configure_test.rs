use super::fixture::Fixture;
use crate::device_display::impl_fake::DisplayCall;
use crate::hub::interface::HubPlugin;
use crate::lcd::error::LcdError;
use crate::lcd::main::{DisplayConfig, MSG_SET_CONFIG_FAILED};

const BATTERY: [u8; 8] = [14, 27, 17, 17, 17, 17, 17, 31];
const CLOCK: [u8; 8] = [31, 17, 10, 4, 14, 31, 31, 0];

#[test]
fn test_start_applies_config_and_custom_characters() {
    let mut f = Fixture::new("start");
    f.write_custom_char_file(
        r#"[{"id":0,"name":"battery","char":"14,27,17,17,17,17,17,31"},
            {"id":1,"name":"clock","char":"31,17,10,4,14,31,31,0"}]"#,
    );

    f.plugin.on_start();

    let calls = f.display.calls();
    assert_eq!(
        calls[1..],
        [
            DisplayCall::BacklightOn,
            DisplayCall::SetConfig {
                cursor: false,
                blinking: false,
            },
            DisplayCall::SetCustomCharacter {
                index: 0,
                pattern: BATTERY,
            },
            DisplayCall::SetCustomCharacter {
                index: 1,
                pattern: CLOCK,
            },
            DisplayCall::Disconnect,
        ]
    );
    assert!(f.logger.errors().is_empty());
}

#[test]
fn test_backlight_off_and_blinking_cursor() {
    let f = Fixture::new("backlight-off");
    f.write_custom_char_file("[]");

    f.plugin
        .configure(DisplayConfig {
            backlight_on: false,
            cursor_on: true,
            cursor_blinking: true,
        })
        .unwrap();

    let calls = f.display.calls();
    assert_eq!(calls[1], DisplayCall::BacklightOff);
    assert_eq!(
        calls[2],
        DisplayCall::SetConfig {
            cursor: true,
            blinking: true,
        }
    );
}

#[test]
fn test_out_of_range_ids_are_skipped() {
    let f = Fixture::new("bad-ids");
    f.write_custom_char_file(
        r#"[{"id":8,"name":"too high","char":"1,2,3,4,5,6,7,8"},
            {"id":3,"name":"ok","char":"31,17,10,4,14,31,31,0"},
            {"id":-1,"name":"negative","char":"1,2,3,4,5,6,7,8"}]"#,
    );

    let report = f.plugin.configure(DisplayConfig::default()).unwrap();

    assert_eq!(report.programmed, vec![3]);
    assert_eq!(report.skipped.len(), 2);
    assert!(matches!(
        report.skipped[0],
        LcdError::CustomCharacterIndex { id: 8 }
    ));
    assert_eq!(
        f.logger.errors(),
        vec![
            "Customchar: Index=8 not in range 0-7.".to_string(),
            "Customchar: Index=-1 not in range 0-7.".to_string(),
        ]
    );
    assert_eq!(
        f.display
            .calls()
            .iter()
            .filter(|call| matches!(call, DisplayCall::SetCustomCharacter { .. }))
            .count(),
        1
    );
}

#[test]
fn test_bad_pattern_is_skipped() {
    let f = Fixture::new("bad-pattern");
    f.write_custom_char_file(
        r#"[{"id":0,"name":"short","char":"1,2,3"},
            {"id":1,"name":"clock","char":"31,17,10,4,14,31,31,0"}]"#,
    );

    let report = f.plugin.configure(DisplayConfig::default()).unwrap();

    assert_eq!(report.programmed, vec![1]);
    assert_eq!(f.logger.errors().len(), 1);
    assert!(f.logger.errors()[0].contains("Index=0 pattern '1,2,3'"));
}

#[test]
fn test_missing_file_does_not_fail_configuration() {
    let mut f = Fixture::new("missing-file");

    f.plugin.on_start();

    let calls = f.display.calls();
    assert_eq!(calls[1], DisplayCall::BacklightOn);
    assert_eq!(calls.last(), Some(&DisplayCall::Disconnect));
    let errors = f.logger.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Customchar: Can not open file="));
}

#[test]
fn test_invalid_json_file_does_not_fail_configuration() {
    let f = Fixture::new("invalid-file");
    f.write_custom_char_file("[{\"id\":0,");

    let report = f.plugin.configure(DisplayConfig::default()).unwrap();

    assert!(report.programmed.is_empty());
    assert!(matches!(
        report.skipped[0],
        LcdError::CustomCharacterFile { .. }
    ));
}

#[test]
fn test_empty_file_reports_no_characters() {
    let f = Fixture::new("empty-file");
    f.write_custom_char_file("[]");

    f.plugin.configure(DisplayConfig::default()).unwrap();

    assert_eq!(
        f.logger.errors(),
        vec!["Customchar: No or wrong characters defined.".to_string()]
    );
}

#[test]
fn test_file_is_read_on_every_configuration() {
    let f = Fixture::new("reread");
    f.write_custom_char_file(r#"[{"id":0,"name":"a","char":"1,1,1,1,1,1,1,1"}]"#);
    f.plugin.configure(DisplayConfig::default()).unwrap();

    f.write_custom_char_file(r#"[{"id":5,"name":"b","char":"2,2,2,2,2,2,2,2"}]"#);
    let report = f.plugin.configure(DisplayConfig::default()).unwrap();

    assert_eq!(report.programmed, vec![5]);
}

#[test]
fn test_connection_failure_is_one_generic_error() {
    let mut f = Fixture::new("start-no-daemon");
    f.display.fail_connect();

    f.plugin.on_start();

    assert!(f.display.calls().is_empty());
    assert_eq!(f.logger.errors(), vec![MSG_SET_CONFIG_FAILED.to_string()]);
}

#[test]
fn test_device_failure_during_custom_characters_fails_session() {
    let mut f = Fixture::new("start-rejected");
    f.write_custom_char_file(r#"[{"id":0,"name":"a","char":"1,1,1,1,1,1,1,1"}]"#);
    f.display.fail_on_call(3);

    f.plugin.on_start();

    assert_eq!(f.display.calls().last(), Some(&DisplayCall::Disconnect));
    assert_eq!(f.logger.errors(), vec![MSG_SET_CONFIG_FAILED.to_string()]);
}

#[test]
fn test_missing_uid_skips_configuration() {
    let mut f = Fixture::new("no-uid");
    f.plugin.config.endpoint.uid = String::new();

    f.plugin.on_start();

    assert!(f.display.calls().is_empty());
    assert_eq!(
        f.logger.errors(),
        vec!["Bricklet UID not set. Get the UID using the Brick Viewer.".to_string()]
    );
}

#[test]
fn test_write_commands_still_accepted_after_failed_start() {
    let mut f = Fixture::new("after-failed-start");
    f.display.fail_on_call(1);
    f.plugin.on_start();
    assert_eq!(f.logger.errors().len(), 1);

    f.display.fail_on_call(usize::MAX);
    f.display.clear_calls();
    f.plugin.on_text_field_changed(&Fixture::text(
        r#"[{"line":0,"position":0,"clear":0,"text":"up"}]"#,
    ));

    assert!(f
        .display
        .calls()
        .contains(&DisplayCall::WriteLine {
            line: 0,
            position: 0,
            text: "up".to_string(),
        }));
}

#[test]
fn test_debug_start_dumps_parameters() {
    let mut f = Fixture::new("debug-dump");
    f.plugin.config.debug = true;
    f.write_custom_char_file("[]");

    f.plugin.on_start();

    let debug_lines = f
        .logger
        .messages(crate::library::logger::impl_fake::LogLevel::Debug);
    assert!(debug_lines.contains(&"'UID':'BHN'".to_string()));
}
