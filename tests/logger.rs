use alog::callsite::{CallSiteResolver, Frame, NoCallSite};
use alog::{CaptureSink, ConfigError, Configuration, ConfigurationBuilder, Level, Logger, Settings};
use std::error::Error;
use std::io;

fn quiet(capture: &CaptureSink) -> ConfigurationBuilder {
    Configuration::builder()
        .tag("Test")
        .thread_prefix(false)
        .method_prefix(false)
        .line_location_prefix(false)
        .with_resolver(NoCallSite)
        .with_sink(capture.clone())
}

struct Money(i64);

impl alog::Loggable for Money {
    fn shape(&self) -> alog::Shape<'_> {
        alog::Shape::Text("money")
    }

    fn as_any(&self) -> Option<&dyn std::any::Any> {
        Some(self)
    }
}

#[test]
fn records_below_the_minimal_level_are_dropped() {
    let capture = CaptureSink::new();
    let logger = Logger::new(quiet(&capture).minimal_level(Level::Warning).build());

    alog::verbose!(logger: logger; "v");
    alog::debug!(logger: logger; "d");
    alog::info!(logger: logger; "i");
    alog::warning!(logger: logger; "w");
    alog::error!(logger: logger; "e");
    alog::wtf!(logger: logger; "a");
    alog::log!(logger: logger; Level::Info, "dropped");
    alog::log!(logger: logger; Level::Error, "kept");

    let levels: Vec<Level> = capture.records().iter().map(|r| r.level).collect();
    assert_eq!(levels, [Level::Warning, Level::Error, Level::Wtf, Level::Error]);
    assert_eq!(capture.messages(), ["w", "e", "a", "kept"]);
}

#[test]
fn disabled_logger_emits_nothing() {
    let capture = CaptureSink::new();
    let logger = Logger::new(quiet(&capture).enabled(false).build());

    assert!(!logger.is_enabled(Level::Wtf));
    alog::wtf!(logger: logger; "never");
    logger.json("{}");
    logger.hex(&[1u8][..]);
    assert!(capture.records().is_empty());

    let logger = Logger::disabled();
    assert!(!logger.is_enabled(Level::Error));
}

#[test]
fn macro_forms() {
    let capture = CaptureSink::new();
    let logger = Logger::new(quiet(&capture).build());
    let err = io::Error::new(io::ErrorKind::Other, "disk full");

    alog::info!(logger: logger);
    alog::info!(logger: logger; "plain text");
    alog::info!(logger: logger; "%s has %d items", "cart", 3,);
    alog::info!(logger: logger; vec![1, 2]);
    alog::error!(logger: logger; err: &err);
    alog::error!(logger: logger; err: &err, "saving %s failed", "report.pdf");
    alog::error!(logger: logger; err: &err, Some(42));

    assert_eq!(
        capture.messages(),
        [
            "",
            "plain text",
            "cart has 3 items",
            "Vec(size = 2) [1, 2]",
            "disk full",
            "saving report.pdf failed\ndisk full",
            "42\ndisk full",
        ]
    );
}

#[test]
fn bodies_use_their_configured_levels() {
    let capture = CaptureSink::new();
    let logger = Logger::new(
        quiet(&capture)
            .minimal_level(Level::Info)
            .json_level(Level::Warning)
            .xml_level(Level::Debug)
            .hex_level(Level::Error)
            .json_indent(4)
            .build(),
    );

    logger.json(r#"{"a":1}"#);
    logger.xml("<a/>");
    logger.hex(&[0x6F, 0x20, 0x7B][..]);
    logger.json(None::<&str>);
    logger.xml_at(Level::Info, "<b>text</b>");

    let records = capture.records();
    let got: Vec<(Level, &str)> = records
        .iter()
        .map(|r| (r.level, r.message.as_str()))
        .collect();
    assert_eq!(
        got,
        [
            (Level::Warning, "JSON:\n{\n    \"a\": 1\n}"),
            (Level::Error, "Hex:\n6F 20 7B"),
            (Level::Warning, "Passed JSON string is null"),
            (Level::Info, "XML:\n<b>text</b>\n"),
        ]
    );
}

#[test]
fn views_share_sinks_but_not_configuration() -> Result<(), Box<dyn Error>> {
    let capture = CaptureSink::new();
    let base = Logger::new(quiet(&capture).build());

    let tagged = base.with_tag("Payments");
    alog::info!(logger: tagged; "tagged");
    alog::info!(logger: base; "base");

    let money = base.with_formatter(|m: &Money| format!("${}.{:02}", m.0 / 100, m.0 % 100))?;
    alog::info!(logger: money; "charged %s", Money(1250));
    alog::info!(logger: base; "charged %s", Money(1250));

    let records = capture.records();
    assert_eq!(records[0].tag, "Payments");
    assert_eq!(records[1].tag, "Test");
    assert_eq!(records[2].message, "charged $12.50");
    assert_eq!(records[3].message, "charged money");
    assert_eq!(base.configuration().tag(), Some("Test"));

    assert!(matches!(
        base.with_formatter(|v: &Vec<i32>| v.len().to_string()),
        Err(ConfigError::ReservedType { .. })
    ));
    Ok(())
}

struct OneFrame;

impl CallSiteResolver for OneFrame {
    fn frames(&self) -> Vec<Frame> {
        vec![Frame {
            function: "app::run".to_owned(),
            file: Some("src/app.rs".to_owned()),
            line: Some(3),
        }]
    }
}

#[test]
fn stack_trace_view() {
    let capture = CaptureSink::new();
    let logger = Logger::new(quiet(&capture).with_resolver(OneFrame).build());

    alog::info!(logger: logger.with_stack_trace_lines(1); "traced");
    alog::info!(logger: logger.with_tag_and_stack_trace_lines("Both", 1); "both");
    alog::info!(logger: logger; "untraced");

    let records = capture.records();
    assert_eq!(records[0].message, "traced\nStack trace:\n    at app::run (src/app.rs:3)");
    assert_eq!(records[1].tag, "Both");
    assert_eq!(records[1].message, "both\nStack trace:\n    at app::run (src/app.rs:3)");
    assert_eq!(records[2].message, "untraced");
}

#[test]
fn settings_override_builder_values() -> Result<(), Box<dyn Error>> {
    let settings: Settings = serde_json::from_str(
        r#"{
            "minimal_level": "ERROR",
            "tag": "FromFile",
            "json_indent": 8,
            "map_formatter": false
        }"#,
    )?;
    let config = Configuration::builder()
        .json_indent(2)
        .thread_prefix(false)
        .settings(&settings)
        .build();

    assert_eq!(config.minimal_level(), Level::Error);
    assert_eq!(config.tag(), Some("FromFile"));
    assert_eq!(config.json_indent(), 8);
    assert!(!config.registry().builtins().map);
    // absent fields keep the builder's value
    assert!(!config.thread_prefix());
    assert_eq!(config.xml_indent(), 2);
    Ok(())
}

#[test]
fn minimal_level_from_environment() -> Result<(), Box<dyn Error>> {
    std::env::set_var("ALOG_TEST_LEVEL_OK", "warn");
    std::env::set_var("ALOG_TEST_LEVEL_BAD", "chatty");

    let config = Configuration::builder()
        .minimal_level_from_env("ALOG_TEST_LEVEL_OK")?
        .build();
    assert_eq!(config.minimal_level(), Level::Warning);

    let config = Configuration::builder()
        .minimal_level(Level::Debug)
        .minimal_level_from_env("ALOG_TEST_LEVEL_UNSET")?
        .build();
    assert_eq!(config.minimal_level(), Level::Debug);

    let err = Configuration::builder()
        .minimal_level_from_env("ALOG_TEST_LEVEL_BAD")
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidLevel { ref var, .. } if var == "ALOG_TEST_LEVEL_BAD"));
    assert!(err.source().is_some());
    Ok(())
}

#[test]
fn defaults() {
    let config = Configuration::default();
    assert!(config.is_enabled());
    assert_eq!(config.minimal_level(), Level::Verbose);
    assert_eq!(config.json_level(), Level::Info);
    assert_eq!(config.tag(), None);
    assert!(config.thread_prefix());
    assert!(!config.class_prefix());
    assert!(config.method_prefix());
    assert!(config.line_location_prefix());
    assert_eq!(config.stack_trace_line_count(), 0);
    assert_eq!(config.json_indent(), 2);
    assert!(config.platform_sink().is_some());
    assert!(config.file_output().is_none());

    let rebuilt = config.to_builder().tag("Again").build();
    assert_eq!(rebuilt.tag(), Some("Again"));
    assert_eq!(config.tag(), None);
}
